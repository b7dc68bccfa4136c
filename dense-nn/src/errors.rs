use crate::activations::ActivationKind;
use crate::networks::LayerKind;

use thiserror::Error;

/// Specialized result type for network operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Any failure surfaced by the engine.
///
/// Numeric edge cases (non-finite activations, vanishing
/// normalization sums) are never reported as errors; they are
/// recovered locally by substituting safe values.
#[derive(Debug, Error)]
pub enum Error {
    /// The topology or a parameter was configured incorrectly.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
    /// A call supplied data of the wrong shape.
    #[error("shape error: {0}")]
    Shape(#[from] ShapeError),
    /// A persisted model could not be read or written.
    #[error("serialization error: {0}")]
    Serialization(#[from] SerializationError),
}

/// An error type indicating an invalid topology
/// or activation configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    /// A second Input or Output layer was added.
    #[error("network already has an {0:?} layer")]
    DuplicateLayer(LayerKind),
    /// A layer was added out of the Input, Intermediate..., Output order.
    #[error("cannot add an {added:?} layer {reason}")]
    LayerOrder {
        added: LayerKind,
        reason: &'static str,
    },
    /// A layer was declared with no neurons, or an edit would leave it empty.
    #[error("{0:?} layers must contain at least one neuron")]
    EmptyLayer(LayerKind),
    /// The alias list does not match the declared neuron count.
    #[error("{aliases} aliases given for a layer of {neurons} neurons")]
    AliasCountMismatch { neurons: usize, aliases: usize },
    /// Two neurons of the same layer share an alias (case-insensitively).
    #[error("duplicate neuron alias {0:?}")]
    DuplicateAlias(String),
    /// An alias was given for an Intermediate layer neuron.
    #[error("intermediate layer neurons cannot carry aliases")]
    AliasOnIntermediateLayer,
    /// The activation cannot be bound to this kind of layer.
    #[error("{activation:?} activation cannot be attached to an {layer:?} layer")]
    IncompatibleActivation {
        activation: ActivationKind,
        layer: LayerKind,
    },
    /// A parameter value is missing, of the wrong type, or out of range.
    #[error("invalid parameter {name:?}: {reason}")]
    InvalidParameter { name: String, reason: String },
    /// The network is used before both Input and Output layers exist.
    #[error("network has no {0:?} layer")]
    IncompleteTopology(LayerKind),
    /// A layer or neuron position does not exist.
    #[error("no {what} at index {index}")]
    IndexOutOfRange { what: &'static str, index: usize },
}

/// An error type indicating a per-call input
/// of the wrong shape.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShapeError {
    /// The input vector length differs from the Input layer's neuron count.
    #[error("expected {expected} input values, found {found}")]
    InputLength { expected: usize, found: usize },
    /// The expected-output vector length differs from the Output layer's neuron count.
    #[error("expected {expected} output values, found {found}")]
    OutputLength { expected: usize, found: usize },
    /// A boundary neuron has no alias, so named I/O is impossible.
    #[error("{layer:?} neuron {index} has no alias")]
    UnnamedNeuron { layer: LayerKind, index: usize },
    /// No value was bound to an aliased boundary neuron.
    #[error("no value bound to alias {0:?}")]
    MissingValue(String),
    /// A value was bound to an alias no boundary neuron declares.
    #[error("unknown alias {0:?}")]
    UnknownAlias(String),
    /// Two supplied keys name the same alias.
    #[error("alias {0:?} bound more than once")]
    DuplicateValue(String),
}

/// An error type indicating a malformed
/// or unreadable persisted model.
#[derive(Debug, Error)]
pub enum SerializationError {
    #[error("malformed JSON document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("malformed RON document: {0}")]
    Ron(String),
    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),
    /// The document parsed, but describes an inconsistent network.
    #[error("invalid document: {0}")]
    InvalidDocument(String),
    #[error("unsupported format version {found} (newest known is {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Error {
        Error::Serialization(e.into())
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Error {
        Error::Serialization(e.into())
    }
}

impl SerializationError {
    pub(crate) fn ron(e: impl std::fmt::Display) -> SerializationError {
        SerializationError::Ron(e.to_string())
    }

    pub(crate) fn invalid(reason: impl Into<String>) -> SerializationError {
        SerializationError::InvalidDocument(reason.into())
    }
}

impl ConfigurationError {
    pub(crate) fn parameter(name: &str, reason: impl Into<String>) -> ConfigurationError {
        ConfigurationError::InvalidParameter {
            name: name.to_owned(),
            reason: reason.into(),
        }
    }
}
