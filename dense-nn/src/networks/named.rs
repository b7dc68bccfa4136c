use super::{Layer, Network};
use crate::errors::{Result, ShapeError};

use ahash::RandomState;

use std::collections::HashMap;

/// Values keyed by neuron alias.
pub type NamedValues = HashMap<String, f64, RandomState>;

impl Layer {
    /// Arranges alias-keyed values in neuron order.
    ///
    /// Every neuron must carry an alias and be bound exactly once.
    fn bind<K: AsRef<str>>(
        &self,
        values: impl IntoIterator<Item = (K, f64)>,
    ) -> std::result::Result<Vec<f64>, ShapeError> {
        self.check_aliased()?;
        let mut bound = vec![None; self.len()];
        for (key, value) in values {
            let key = key.as_ref();
            let index = self
                .index_of(key)
                .ok_or_else(|| ShapeError::UnknownAlias(key.to_owned()))?;
            if bound[index].replace(value).is_some() {
                return Err(ShapeError::DuplicateValue(key.to_owned()));
            }
        }
        bound
            .into_iter()
            .zip(&self.neurons)
            .map(|(value, neuron)| {
                value.ok_or_else(|| {
                    ShapeError::MissingValue(neuron.alias().unwrap_or_default().to_owned())
                })
            })
            .collect()
    }

    fn check_aliased(&self) -> std::result::Result<(), ShapeError> {
        match self.neurons.iter().position(|n| n.alias.is_none()) {
            Some(index) => Err(ShapeError::UnnamedNeuron {
                layer: self.kind,
                index,
            }),
            None => Ok(()),
        }
    }

    /// Current neuron values keyed by alias.
    fn named_values(&self) -> NamedValues {
        self.neurons
            .iter()
            .filter_map(|n| n.alias.clone().map(|alias| (alias, n.value)))
            .collect()
    }
}

impl Network {
    /// Evaluates the network on alias-keyed inputs, returning
    /// alias-keyed outputs. Keys are matched ignoring case; output
    /// keys use each neuron's declared spelling.
    ///
    /// # Errors
    /// Fails before evaluating anything if an Input or Output neuron
    /// has no alias, or if the inputs do not bind every Input alias
    /// exactly once.
    ///
    /// # Examples
    /// ```
    /// use dense_nn::Network;
    ///
    /// let mut network = Network::new(0.1);
    /// network
    ///     .add_input(2, &["left", "right"], None)?
    ///     .add_output(1, &["Sum"], None)?;
    ///
    /// let sum = network.layer_mut(1).unwrap().neuron_mut(0).unwrap();
    /// sum.weights_mut().copy_from_slice(&[1.0, 1.0]);
    /// sum.set_bias(0.0);
    ///
    /// let outputs = network.forward_named([("RIGHT", 2.0), ("left", 0.5)])?;
    /// assert_eq!(outputs["Sum"], 2.5);
    ///
    /// assert!(network.forward_named([("left", 1.0)]).is_err());
    /// # Ok::<(), dense_nn::Error>(())
    /// ```
    pub fn forward_named<K: AsRef<str>>(
        &mut self,
        inputs: impl IntoIterator<Item = (K, f64)>,
    ) -> Result<NamedValues> {
        let inputs = self.bind_named(inputs)?;
        self.forward(&inputs)?;
        Ok(self.output_layer().map(Layer::named_values).unwrap_or_default())
    }

    /// Alias-keyed form of [`train`](Network::train).
    ///
    /// # Errors
    /// Fails before training if either value set does not bind every
    /// alias of its boundary layer exactly once.
    pub fn train_named<K: AsRef<str>, L: AsRef<str>>(
        &mut self,
        inputs: impl IntoIterator<Item = (K, f64)>,
        expected: impl IntoIterator<Item = (L, f64)>,
    ) -> Result<f64> {
        let inputs = self.bind_named(inputs)?;
        let expected = match self.output_layer() {
            Some(layer) => layer.bind(expected)?,
            None => vec![],
        };
        self.train(&inputs, &expected)
    }

    fn bind_named<K: AsRef<str>>(
        &self,
        inputs: impl IntoIterator<Item = (K, f64)>,
    ) -> Result<Vec<f64>> {
        self.check_complete()?;
        if let Some(outputs) = self.output_layer() {
            outputs.check_aliased()?;
        }
        match self.input_layer() {
            Some(layer) => Ok(layer.bind(inputs)?),
            None => Ok(vec![]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activations::ActivationKind;
    use crate::errors::Error;
    use crate::networks::LayerKind;
    use rand::{rngs::StdRng, SeedableRng};

    fn named(rng: &mut StdRng, outputs: &[&str]) -> Network {
        let mut network = Network::new(0.5);
        network
            .add_input_with_rng(2, &["a", "b"], Some(ActivationKind::Tanh.into()), rng)
            .unwrap()
            .add_intermediate_with_rng(2, Some(ActivationKind::Sigmoid.into()), rng)
            .unwrap()
            .add_output_with_rng(2, outputs, None, rng)
            .unwrap();
        network
    }

    fn shape_error<T: std::fmt::Debug>(result: Result<T>) -> ShapeError {
        match result {
            Err(Error::Shape(e)) => e,
            other => panic!("expected a shape error, got {:?}", other),
        }
    }

    #[test]
    fn named_matches_ordinal() {
        let mut rng = StdRng::seed_from_u64(21);
        let mut network = named(&mut rng, &["X", "Y"]);
        let ordinal = network.forward(&[0.25, -1.0]).unwrap();
        let by_name = network
            .forward_named(vec![("b".to_owned(), -1.0), ("A".to_owned(), 0.25)])
            .unwrap();
        assert_eq!(by_name.len(), 2);
        assert_eq!(by_name["X"], ordinal[0]);
        assert_eq!(by_name["Y"], ordinal[1]);
    }

    #[test]
    fn binding_errors() {
        let mut rng = StdRng::seed_from_u64(21);
        let mut network = named(&mut rng, &["x", "y"]);
        assert_eq!(
            shape_error(network.forward_named([("a", 1.0)])),
            ShapeError::MissingValue("b".into())
        );
        assert_eq!(
            shape_error(network.forward_named([("a", 1.0), ("b", 1.0), ("c", 1.0)])),
            ShapeError::UnknownAlias("c".into())
        );
        assert_eq!(
            shape_error(network.forward_named([("a", 1.0), ("A", 2.0), ("b", 1.0)])),
            ShapeError::DuplicateValue("A".into())
        );
        assert_eq!(
            shape_error(network.train_named([("a", 1.0), ("b", 0.0)], [("x", 1.0)])),
            ShapeError::MissingValue("y".into())
        );
        assert_eq!(network.cost(), None);
    }

    #[test]
    fn unnamed_boundary_neurons() {
        let mut rng = StdRng::seed_from_u64(21);
        let mut network = named(&mut rng, &[]);
        let before = network.layers()[1].values();
        assert_eq!(
            shape_error(network.forward_named([("a", 1.0), ("b", 1.0)])),
            ShapeError::UnnamedNeuron {
                layer: LayerKind::Output,
                index: 0
            }
        );
        // Nothing was evaluated.
        assert_eq!(network.layers()[1].values(), before);
    }

    #[test]
    fn train_named_matches_ordinal() {
        let mut rng = StdRng::seed_from_u64(30);
        let mut by_name = named(&mut rng, &["x", "y"]);
        let mut ordinal = by_name.clone();

        let named_cost = by_name
            .train_named([("a", 0.5), ("b", -0.5)], [("y", 0.0), ("x", 1.0)])
            .unwrap();
        let ordinal_cost = ordinal.train(&[0.5, -0.5], &[1.0, 0.0]).unwrap();
        assert_eq!(named_cost, ordinal_cost);
        assert_eq!(by_name, ordinal);
    }
}
