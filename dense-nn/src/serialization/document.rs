use crate::activations::{ActivationFunction, ActivationKind};
use crate::errors::SerializationError;
use crate::networks::{Layer, LayerKind, Network, Neuron};
use crate::parameters::{hyperparameters::LEARNING_RATE, ParameterStore};

use serde::{Deserialize, Serialize};

/// Newest document layout this crate reads and the one it writes.
pub const FORMAT_VERSION: u32 = 1;

/// The persisted form of a [`Network`].
///
/// Holds only learned and configured state: neuron values, input
/// sums and alias indexes are rebuilt on load. Fields added after
/// the first format version are optional, so older documents stay
/// readable, and unknown fields are ignored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NetworkDocument {
    pub format_version: u32,
    pub learning_rate: f64,
    #[serde(default)]
    pub cost: Option<f64>,
    #[serde(default)]
    pub fitness: Option<f64>,
    #[serde(default)]
    pub hyperparameters: ParameterStore,
    pub layers: Vec<LayerDocument>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayerDocument {
    pub kind: LayerKind,
    #[serde(default)]
    pub activation: Option<ActivationDocument>,
    pub neurons: Vec<NeuronDocument>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActivationDocument {
    pub kind: ActivationKind,
    #[serde(default)]
    pub parameters: ParameterStore,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NeuronDocument {
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub bias: f64,
    #[serde(default)]
    pub weights: Vec<f64>,
}

impl From<&Network> for NetworkDocument {
    fn from(network: &Network) -> NetworkDocument {
        let mut hyperparameters = network.hyperparameters().clone();
        hyperparameters.set(&LEARNING_RATE, network.learning_rate());
        NetworkDocument {
            format_version: FORMAT_VERSION,
            learning_rate: network.learning_rate(),
            cost: network.cost().filter(|c| c.is_finite()),
            fitness: Some(network.fitness()).filter(|f| f.is_finite()),
            hyperparameters,
            layers: network.layers().iter().map(LayerDocument::from).collect(),
        }
    }
}

impl From<&Layer> for LayerDocument {
    fn from(layer: &Layer) -> LayerDocument {
        LayerDocument {
            kind: layer.kind(),
            activation: layer.activation().map(|function| ActivationDocument {
                kind: function.kind(),
                parameters: function.parameters().clone(),
            }),
            neurons: layer
                .neurons()
                .iter()
                .map(|neuron| NeuronDocument {
                    alias: neuron.alias().map(str::to_owned),
                    bias: neuron.bias(),
                    weights: neuron.weights().to_vec(),
                })
                .collect(),
        }
    }
}

impl TryFrom<NetworkDocument> for Network {
    type Error = SerializationError;

    /// Rebuilds a network from its document, checking every
    /// structural invariant and re-deriving the alias indexes.
    /// No partially-built network is ever returned.
    fn try_from(document: NetworkDocument) -> Result<Network, SerializationError> {
        if document.format_version == 0 || document.format_version > FORMAT_VERSION {
            return Err(SerializationError::UnsupportedVersion {
                found: document.format_version,
                supported: FORMAT_VERSION,
            });
        }
        if !document.learning_rate.is_finite() {
            return Err(SerializationError::invalid("learning rate is not finite"));
        }
        check_layer_order(&document.layers)?;

        let mut layers: Vec<Layer> = Vec::with_capacity(document.layers.len());
        for (i, layer) in document.layers.into_iter().enumerate() {
            let incoming = layers.last().map_or(0, Layer::len);
            layers.push(layer_from_document(i, layer, incoming)?);
        }

        let mut hyperparameters = document.hyperparameters;
        // The mirrored learning rate is only written for external readers.
        hyperparameters.remove(LEARNING_RATE.name);
        let mut network = Network::new(document.learning_rate);
        network.layers = layers;
        network.cost = document.cost;
        network.fitness = document.fitness.unwrap_or_default();
        network.hyperparameters = hyperparameters;
        Ok(network)
    }
}

fn check_layer_order(layers: &[LayerDocument]) -> Result<(), SerializationError> {
    if layers.len() < 2 {
        return Err(SerializationError::invalid(format!(
            "a network needs at least 2 layers, found {}",
            layers.len()
        )));
    }
    let last = layers.len() - 1;
    for (i, layer) in layers.iter().enumerate() {
        let expected = match i {
            0 => LayerKind::Input,
            i if i == last => LayerKind::Output,
            _ => LayerKind::Intermediate,
        };
        if layer.kind != expected {
            return Err(SerializationError::invalid(format!(
                "layer {} is {:?}, expected {:?}",
                i, layer.kind, expected
            )));
        }
    }
    Ok(())
}

fn layer_from_document(
    index: usize,
    layer: LayerDocument,
    incoming: usize,
) -> Result<Layer, SerializationError> {
    let invalid = |reason: String| SerializationError::invalid(format!("layer {}: {}", index, reason));

    let activation = match layer.activation {
        Some(document) => Some(
            ActivationFunction::with_parameters(document.kind, document.parameters)
                .map_err(|e| invalid(e.to_string()))?,
        ),
        None => None,
    };
    let mut neurons = Vec::with_capacity(layer.neurons.len());
    for (j, neuron) in layer.neurons.into_iter().enumerate() {
        if neuron.weights.len() != incoming {
            return Err(invalid(format!(
                "neuron {} has {} weights, expected {}",
                j,
                neuron.weights.len(),
                incoming
            )));
        }
        if !neuron.bias.is_finite() || !neuron.weights.iter().all(|w| w.is_finite()) {
            return Err(invalid(format!("neuron {} has non-finite parameters", j)));
        }
        neurons.push(Neuron::from_parts(neuron.bias, neuron.weights, neuron.alias));
    }
    Layer::new(layer.kind, neurons, activation).map_err(|e| invalid(e.to_string()))
}
