//! A Network is a stack of fully-connected layers:
//! every neuron of a layer receives a weighted
//! connection from every neuron of the previous one.
//!
//! Networks are built through the `add_*` methods,
//! evaluated with [`Network::forward`], trained by
//! backpropagation with [`Network::train`], and varied
//! genetically with [`Network::mutate_new`].
//!
//! Layers and neurons are owned by position: a neuron's
//! `k`-th weight belongs to the connection from the `k`-th
//! neuron of the previous layer, so no neuron or layer
//! ever refers back to its owner.
mod forward;
mod genetics;
mod layer;
mod named;
mod neuron;
mod topology;
mod training;

pub use layer::{Layer, LayerKind};
pub use named::NamedValues;
pub use neuron::Neuron;
pub use training::Gradients;

use crate::parameters::ParameterStore;

use std::fmt;

/// A layered, fully-connected feed-forward neural network.
///
/// Cloning a network produces a wholly independent copy.
#[derive(Clone, Debug, PartialEq)]
pub struct Network {
    pub(crate) layers: Vec<Layer>,
    pub(crate) learning_rate: f64,
    pub(crate) cost: Option<f64>,
    pub(crate) fitness: f64,
    pub(crate) hyperparameters: ParameterStore,
}

impl Network {
    /// The layers, Input first and Output last.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer(&self, index: usize) -> Option<&Layer> {
        self.layers.get(index)
    }

    /// Mutable access to a layer's neuron parameters.
    /// Use the topology methods to change its shape.
    pub fn layer_mut(&mut self, index: usize) -> Option<&mut Layer> {
        self.layers.get_mut(index)
    }

    pub fn input_layer(&self) -> Option<&Layer> {
        self.layers.first().filter(|l| l.kind == LayerKind::Input)
    }

    pub fn output_layer(&self) -> Option<&Layer> {
        self.layers.last().filter(|l| l.kind == LayerKind::Output)
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn set_learning_rate(&mut self, learning_rate: f64) {
        self.learning_rate = learning_rate;
    }

    /// Loss of the last training step, if any.
    pub fn cost(&self) -> Option<f64> {
        self.cost
    }

    /// Network-wide settings. See [`crate::parameters::hyperparameters`]
    /// for the keys understood by the engine.
    pub fn hyperparameters(&self) -> &ParameterStore {
        &self.hyperparameters
    }

    pub fn hyperparameters_mut(&mut self) -> &mut ParameterStore {
        &mut self.hyperparameters
    }

    /// Total number of weights and biases subject to training.
    pub fn parameter_count(&self) -> usize {
        self.layers
            .iter()
            .skip(1)
            .flat_map(|l| &l.neurons)
            .map(|n| n.weights.len() + 1)
            .sum()
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Network(")?;
        for (i, layer) in self.layers.iter().enumerate() {
            if i > 0 {
                write!(f, " -> ")?;
            }
            write!(f, "{:?}[{}]", layer.kind, layer.len())?;
            if let Some(activation) = &layer.activation {
                write!(f, " {:?}", activation.kind())?;
            }
        }
        write!(f, ")")
    }
}
