//! # dense-nn
//! A layered, fully-connected feed-forward neural network engine.
//!
//! Provides a [`Network`] type which can be:
//! - built layer by layer, with optional aliases naming its inputs and outputs,
//! - evaluated on ordinal or alias-keyed inputs,
//! - trained by backpropagation, one sample at a time,
//! - varied genetically, by cloning and randomly perturbing weights,
//! - saved to and restored from JSON or RON, bit-exactly.
//!
//! Activation functions are configured through a [`ParameterStore`],
//! which also holds network-wide hyperparameters.
//!
//! [`ParameterStore`]: crate::parameters::ParameterStore
//!
//! # Example usage: Learning the XOR function
//! ```
//! use dense_nn::activations::ActivationKind;
//! use dense_nn::Network;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! const SAMPLES: [([f64; 2], [f64; 1]); 4] = [
//!     ([0.0, 0.0], [0.0]),
//!     ([0.0, 1.0], [1.0]),
//!     ([1.0, 0.0], [1.0]),
//!     ([1.0, 1.0], [0.0]),
//! ];
//!
//! fn main() -> dense_nn::Result<()> {
//!     let mut rng = StdRng::seed_from_u64(42);
//!     let mut network = Network::new(0.5);
//!     network
//!         .add_input_with_rng(2, &["a", "b"], Some(ActivationKind::Tanh.into()), &mut rng)?
//!         .add_intermediate_with_rng(4, Some(ActivationKind::Sigmoid.into()), &mut rng)?
//!         .add_output_with_rng(1, &["xor"], None, &mut rng)?;
//!
//!     let total_loss = |network: &mut Network| -> dense_nn::Result<f64> {
//!         SAMPLES
//!             .iter()
//!             .map(|(input, expected)| network.loss(input, expected))
//!             .sum()
//!     };
//!
//!     let initial = total_loss(&mut network)?;
//!     for _ in 0..500 {
//!         for (input, expected) in &SAMPLES {
//!             network.train(input, expected)?;
//!         }
//!     }
//!     assert!(total_loss(&mut network)? < initial);
//!
//!     let saved = network.to_ron()?;
//!     let mut restored = Network::from_ron(&saved)?;
//!     assert_eq!(restored.forward(&[1.0, 0.0])?, network.forward(&[1.0, 0.0])?);
//!     Ok(())
//! }
//! ```

pub mod activations;
pub mod errors;
pub mod networks;
pub mod parameters;
pub mod serialization;

pub use errors::{Error, Result};
pub use networks::Network;
