//! Typed, named key/value configuration shared by activation
//! functions and network hyperparameters.
//!
//! Values are addressed through [`Parameter`] descriptors, which
//! carry the name and the default returned when nothing is stored.
//! Names are case-insensitive.
pub mod hyperparameters;
mod store;
mod value;

pub use store::{Parameter, ParameterStore};
pub use value::{NumericRange, ParameterTextError, ParameterType, ParameterValue};
