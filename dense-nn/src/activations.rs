//! Activation functions map a neuron's weighted input sum
//! to its output value, and supply the derivative used by
//! backpropagation.
//!
//! An [`ActivationKind`] is the bare name of a function, as
//! persisted. An [`Activation`] is a function with its parameters
//! resolved, and an [`ActivationFunction`] additionally keeps the
//! [`ParameterStore`] it was configured from.
//!
//! The parameter descriptors each kind reads are exported
//! alongside, so stores can be filled in a typed manner:
//! ```
//! use dense_nn::activations::{ActivationFunction, ActivationKind, STEEPNESS};
//! use dense_nn::parameters::ParameterStore;
//!
//! let mut store = ParameterStore::new();
//! store.set(&STEEPNESS, 4.9);
//! let sigmoid = ActivationFunction::with_parameters(ActivationKind::Sigmoid, store).unwrap();
//! assert_eq!(sigmoid.activate(&[0.0]), vec![0.5]);
//! ```
//!
//! [`ParameterStore`]: crate::parameters::ParameterStore
mod functions;
mod kind;

pub use functions::{
    Activation, ActivationFunction, ELU_ALPHA, HARD_SIGMOID_SLOPE, LEAKY_SLOPE,
    NORMALIZATION_FLOOR, OUTER_SLOPE, RANGE, SELU_ALPHA, SELU_LAMBDA, SLOPE, STEEPNESS,
    SWISH_BETA, TEMPERATURE,
};
pub use kind::ActivationKind;
