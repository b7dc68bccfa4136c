use super::Neuron;
use crate::activations::{Activation, ActivationFunction};
use crate::errors::ConfigurationError;

use ahash::RandomState;
use serde::{Deserialize, Serialize};

use std::collections::HashMap;

/// Role of a layer within a network.
///
/// A network has exactly one `Input` layer first, exactly
/// one `Output` layer last, and any number of `Intermediate`
/// layers between them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayerKind {
    Input,
    Intermediate,
    Output,
}

/// An ordered group of neurons sharing a role.
///
/// The layer's activation function governs the transition
/// *out of* the layer: it is applied to the sums computed by
/// the following layer's neurons. On the Output layer, where
/// there is no following layer, it is instead applied to the
/// whole output vector at once, and so must be one of the
/// normalizing functions.
#[derive(Clone, Debug, PartialEq)]
pub struct Layer {
    pub(crate) kind: LayerKind,
    pub(crate) neurons: Vec<Neuron>,
    pub(crate) activation: Option<ActivationFunction>,
    // Lowercased alias to neuron position. Derived from the
    // neurons, and rebuilt whenever they change.
    aliases: HashMap<String, usize, RandomState>,
}

impl Layer {
    /// Builds a layer, checking its activation and aliases.
    pub(crate) fn new(
        kind: LayerKind,
        neurons: Vec<Neuron>,
        activation: Option<ActivationFunction>,
    ) -> Result<Layer, ConfigurationError> {
        if neurons.is_empty() {
            return Err(ConfigurationError::EmptyLayer(kind));
        }
        if let Some(activation) = &activation {
            check_activation(kind, activation)?;
        }
        let aliases = index_aliases(kind, neurons.iter().map(Neuron::alias))?;
        Ok(Layer {
            kind,
            neurons,
            activation,
            aliases,
        })
    }

    /// Recomputes the alias index from the neurons.
    pub(crate) fn rebuild_index(&mut self) -> Result<(), ConfigurationError> {
        self.aliases = index_aliases(self.kind, self.neurons.iter().map(Neuron::alias))?;
        Ok(())
    }

    pub fn kind(&self) -> LayerKind {
        self.kind
    }

    pub fn neurons(&self) -> &[Neuron] {
        &self.neurons
    }

    pub fn neuron(&self, index: usize) -> Option<&Neuron> {
        self.neurons.get(index)
    }

    /// Mutable access to a neuron's parameters. Aliases
    /// and weight counts cannot be changed through it.
    pub fn neuron_mut(&mut self, index: usize) -> Option<&mut Neuron> {
        self.neurons.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.neurons.len()
    }

    /// Always false for layers owned by a network.
    pub fn is_empty(&self) -> bool {
        self.neurons.is_empty()
    }

    pub fn activation(&self) -> Option<&ActivationFunction> {
        self.activation.as_ref()
    }

    /// Position of the neuron carrying `alias`, ignoring case.
    ///
    /// # Examples
    /// ```
    /// use dense_nn::Network;
    ///
    /// let mut network = Network::new(0.1);
    /// network.add_input(2, &["Width", "Height"], None).unwrap();
    ///
    /// let inputs = &network.layers()[0];
    /// assert_eq!(inputs.index_of("height"), Some(1));
    /// assert_eq!(inputs.index_of("depth"), None);
    /// ```
    pub fn index_of(&self, alias: &str) -> Option<usize> {
        self.aliases.get(&alias.to_lowercase()).copied()
    }

    /// Whether every neuron carries an alias.
    pub fn is_fully_aliased(&self) -> bool {
        self.aliases.len() == self.neurons.len()
    }

    /// Current neuron values, in order.
    pub fn values(&self) -> Vec<f64> {
        self.neurons.iter().map(|n| n.value).collect()
    }

    /// The function applied to the following layer's sums.
    /// Layers without an activation pass sums through unchanged.
    pub(crate) fn transition(&self) -> Activation {
        match &self.activation {
            Some(function) if !function.activation().is_output_only() => *function.activation(),
            _ => Activation::Identity,
        }
    }
}

/// Checks that `activation` may be bound to a layer of the given kind.
pub(crate) fn check_activation(
    kind: LayerKind,
    activation: &ActivationFunction,
) -> Result<(), ConfigurationError> {
    let output_only = activation.kind().is_output_only();
    if output_only != (kind == LayerKind::Output) {
        return Err(ConfigurationError::IncompatibleActivation {
            activation: activation.kind(),
            layer: kind,
        });
    }
    Ok(())
}

/// Indexes a layer's aliases by their lowercased form.
///
/// # Errors
/// Fails if an Intermediate layer carries any alias, or if two
/// aliases are equal ignoring case.
pub(crate) fn index_aliases<'a>(
    kind: LayerKind,
    aliases: impl Iterator<Item = Option<&'a str>>,
) -> Result<HashMap<String, usize, RandomState>, ConfigurationError> {
    let mut index = HashMap::default();
    for (position, alias) in aliases.enumerate() {
        let alias = match alias {
            Some(alias) => alias,
            None => continue,
        };
        if kind == LayerKind::Intermediate {
            return Err(ConfigurationError::AliasOnIntermediateLayer);
        }
        if index.insert(alias.to_lowercase(), position).is_some() {
            return Err(ConfigurationError::DuplicateAlias(alias.to_owned()));
        }
    }
    Ok(index)
}
