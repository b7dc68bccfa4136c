//! Persistence of trained networks.
//!
//! A network is saved by converting it into a [`NetworkDocument`],
//! a plain data structure holding its learned and configured state,
//! and encoding that as JSON or RON. Loading decodes the document,
//! then rebuilds and validates the network in a separate step, so a
//! malformed document can never produce a half-built network.
//!
//! Both encodings preserve every `f64` exactly, so a reloaded
//! network computes bit-identical outputs.
//!
//! # Examples
//! ```
//! use dense_nn::activations::ActivationKind;
//! use dense_nn::Network;
//!
//! let mut network = Network::new(0.1);
//! network
//!     .add_input(2, &["x", "y"], Some(ActivationKind::Tanh.into()))?
//!     .add_output(2, &["p", "q"], Some(ActivationKind::SoftMax.into()))?;
//!
//! let mut restored = Network::from_json(&network.to_json()?)?;
//! assert_eq!(restored.forward(&[0.3, 0.9])?, network.forward(&[0.3, 0.9])?);
//!
//! let mut restored = Network::from_ron(&network.to_ron()?)?;
//! assert_eq!(restored.forward(&[0.3, 0.9])?, network.forward(&[0.3, 0.9])?);
//! # Ok::<(), dense_nn::Error>(())
//! ```
mod document;

pub use document::{
    ActivationDocument, LayerDocument, NetworkDocument, NeuronDocument, FORMAT_VERSION,
};

use crate::errors::{Result, SerializationError};
use crate::networks::Network;

use serde::{Deserialize, Serialize};
use tracing::info;

use std::io::{Read, Write};

/// Text encoding of a persisted network.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Format {
    Json,
    Ron,
}

impl Network {
    /// Encodes the network as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&NetworkDocument::from(self))?)
    }

    /// Decodes a network from JSON.
    ///
    /// # Errors
    /// Fails if the text is not a well-formed document or describes
    /// an inconsistent network.
    pub fn from_json(text: &str) -> Result<Network> {
        let document: NetworkDocument = serde_json::from_str(text)?;
        Ok(Network::try_from(document)?)
    }

    /// Encodes the network as pretty-printed RON.
    pub fn to_ron(&self) -> Result<String> {
        ron::ser::to_string_pretty(&NetworkDocument::from(self), ron::ser::PrettyConfig::new())
            .map_err(|e| SerializationError::ron(e).into())
    }

    /// Decodes a network from RON.
    ///
    /// # Errors
    /// Fails if the text is not a well-formed document or describes
    /// an inconsistent network.
    pub fn from_ron(text: &str) -> Result<Network> {
        let document: NetworkDocument = ron::from_str(text).map_err(SerializationError::ron)?;
        Ok(Network::try_from(document)?)
    }

    /// Writes the network to `writer` in the given format.
    pub fn save<W: Write>(&self, mut writer: W, format: Format) -> Result<()> {
        let text = match format {
            Format::Json => self.to_json()?,
            Format::Ron => self.to_ron()?,
        };
        writer.write_all(text.as_bytes())?;
        writer.flush()?;
        info!(?format, layers = self.layers().len(), "saved network");
        Ok(())
    }

    /// Reads a network from `reader` in the given format.
    ///
    /// # Errors
    /// Fails if reading fails, or on the same conditions as
    /// [`from_json`](Network::from_json) and [`from_ron`](Network::from_ron).
    pub fn load<R: Read>(mut reader: R, format: Format) -> Result<Network> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        let network = match format {
            Format::Json => Network::from_json(&text)?,
            Format::Ron => Network::from_ron(&text)?,
        };
        info!(?format, layers = network.layers().len(), "loaded network");
        Ok(network)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activations::{ActivationFunction, ActivationKind};
    use crate::errors::Error;
    use crate::parameters::{hyperparameters::WEIGHT_DECAY, ParameterValue};
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn trained(seed: u64) -> Network {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut leaky = ActivationFunction::new(ActivationKind::LeakyReLU);
        leaky
            .set_parameter("slope", ParameterValue::Double(0.05))
            .unwrap();
        let mut network = Network::new(0.05);
        network.hyperparameters_mut().set(&WEIGHT_DECAY, 1e-4);
        network
            .add_input_with_rng(3, &["r", "g", "b"], Some(leaky), &mut rng)
            .unwrap()
            .add_intermediate_with_rng(5, Some(ActivationKind::Mish.into()), &mut rng)
            .unwrap()
            .add_intermediate_with_rng(4, Some(ActivationKind::SELU.into()), &mut rng)
            .unwrap()
            .add_output_with_rng(
                3,
                &["red", "green", "blue"],
                Some(ActivationKind::SoftMax.into()),
                &mut rng,
            )
            .unwrap();
        for _ in 0..25 {
            let input: Vec<f64> = (0..3).map(|_| rng.gen_range(-1.0..1.0)).collect();
            let mut expected = vec![0.0; 3];
            expected[rng.gen_range(0..3)] = 1.0;
            network.train(&input, &expected).unwrap();
        }
        network.set_fitness(12.75);
        network
    }

    fn samples() -> Vec<Vec<f64>> {
        vec![
            vec![0.0, 0.0, 0.0],
            vec![1.0, -1.0, 0.5],
            vec![0.1 + 0.2, 1e-9, -3.7],
            vec![42.0, -17.25, 0.001],
        ]
    }

    fn assert_identical(mut original: Network, mut restored: Network) {
        assert_eq!(restored.learning_rate(), original.learning_rate());
        assert_eq!(restored.cost(), original.cost());
        assert_eq!(restored.fitness(), original.fitness());
        assert_eq!(restored.hyperparameters(), original.hyperparameters());
        for sample in samples() {
            let a = original.forward(&sample).unwrap();
            let b = restored.forward(&sample).unwrap();
            assert_eq!(
                a.iter().map(|v| v.to_bits()).collect::<Vec<_>>(),
                b.iter().map(|v| v.to_bits()).collect::<Vec<_>>()
            );
        }
        assert_eq!(restored, original);
    }

    #[test]
    fn json_round_trip_is_exact() {
        let network = trained(1);
        let restored = Network::from_json(&network.to_json().unwrap()).unwrap();
        assert_identical(network, restored);
    }

    #[test]
    fn ron_round_trip_is_exact() {
        let network = trained(2);
        let restored = Network::from_ron(&network.to_ron().unwrap()).unwrap();
        assert_identical(network, restored);
    }

    #[test]
    fn save_and_load_through_io() {
        for format in [Format::Json, Format::Ron] {
            let network = trained(3);
            let mut buffer = vec![];
            network.save(&mut buffer, format).unwrap();
            let restored = Network::load(buffer.as_slice(), format).unwrap();
            assert_identical(network, restored);
        }
    }

    #[test]
    fn restored_network_trains_like_original() {
        let mut original = trained(4);
        let mut restored = Network::from_json(&original.to_json().unwrap()).unwrap();
        let a = original.train(&[0.2, 0.4, 0.6], &[0.0, 0.0, 1.0]).unwrap();
        let b = restored.train(&[0.2, 0.4, 0.6], &[0.0, 0.0, 1.0]).unwrap();
        assert_eq!(a, b);
        assert_eq!(restored, original);
    }

    #[test]
    fn optional_fields_default() {
        let json = r#"{
            "format_version": 1,
            "learning_rate": 0.5,
            "layers": [
                { "kind": "Input", "neurons": [{}, {}] },
                { "kind": "Output", "neurons": [{ "bias": 1.0, "weights": [0.5, 0.5] }] }
            ],
            "added_in_a_later_version": true
        }"#;
        let mut network = Network::from_json(json).unwrap();
        assert_eq!(network.cost(), None);
        assert_eq!(network.fitness(), 0.0);
        assert_eq!(network.forward(&[1.0, 3.0]).unwrap(), vec![3.0]);
    }

    #[test]
    fn malformed_documents_fail() {
        assert!(matches!(
            Network::from_json("{ \"format_version\": 1 "),
            Err(Error::Serialization(SerializationError::Json(_)))
        ));
        assert!(matches!(
            Network::from_ron("(format_version: 1, layers: ["),
            Err(Error::Serialization(SerializationError::Ron(_)))
        ));
        assert!(matches!(
            Network::from_json(r#"{"format_version": 1, "learning_rate": 0.1, "layers": []}"#),
            Err(Error::Serialization(SerializationError::InvalidDocument(_)))
        ));
        assert!(matches!(
            Network::load(&b"\xff\xfe"[..], Format::Json),
            Err(Error::Serialization(SerializationError::Io(_)))
        ));
    }

    #[test]
    fn non_finite_cost_is_not_persisted() {
        let mut network = trained(5);
        network.cost = Some(f64::NAN);
        let restored = Network::from_json(&network.to_json().unwrap()).unwrap();
        assert_eq!(restored.cost(), None);
    }
}
