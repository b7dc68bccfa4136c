//! Network-wide hyperparameters, read and written through
//! a network's [`ParameterStore`](super::ParameterStore).
//!
//! Only [`WEIGHT_DECAY`], [`GRADIENT_CLIP`] and [`INITIAL_WEIGHT_RANGE`]
//! change the engine's behaviour. The remaining keys are carried and
//! persisted on behalf of external training drivers.

use super::{NumericRange, Parameter};

/// Key under which a persisted network mirrors its learning rate.
pub const LEARNING_RATE: Parameter<f64> = Parameter::new("learning_rate", 0.1);

/// L2 penalty applied to weights on every update. Zero disables it.
pub const WEIGHT_DECAY: Parameter<f64> = Parameter::new("weight_decay", 0.0);

/// Bound on the magnitude of each gradient component. Zero or
/// negative values disable clipping.
pub const GRADIENT_CLIP: Parameter<f64> = Parameter::new("gradient_clip", 0.0);

pub const USE_ADAM: Parameter<bool> = Parameter::new("use_adam", false);

pub const BATCH_NORMALIZATION: Parameter<bool> = Parameter::new("batch_normalization", false);

pub const BATCH_NORMALIZATION_MOMENTUM: Parameter<f64> =
    Parameter::new("batch_normalization_momentum", 0.9);

/// Range from which fresh weights and biases are drawn.
pub const INITIAL_WEIGHT_RANGE: Parameter<NumericRange> =
    Parameter::new("initial_weight_range", NumericRange::new(-1.0, 1.0));
