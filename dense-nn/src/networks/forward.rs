use super::{LayerKind, Network};
use crate::errors::{Result, ShapeError};

impl Network {
    /// Evaluates the network on `inputs`, returning the
    /// Output layer's values in order.
    ///
    /// Each layer's sums are passed through the activation of
    /// the layer before it; the Output layer's own activation,
    /// if any, is then applied across the whole output vector.
    /// Non-finite inputs are treated as zero.
    ///
    /// # Errors
    /// Fails if the network is incomplete or `inputs` does not hold
    /// one value per Input neuron.
    ///
    /// # Examples
    /// ```
    /// use dense_nn::activations::ActivationKind;
    /// use dense_nn::Network;
    ///
    /// let mut network = Network::new(0.1);
    /// network
    ///     .add_input(2, &[], Some(ActivationKind::ReLU.into()))?
    ///     .add_output(1, &[], None)?;
    ///
    /// // Set the single output neuron to compute relu(x - y).
    /// let output = network.layer_mut(1).unwrap().neuron_mut(0).unwrap();
    /// output.weights_mut().copy_from_slice(&[1.0, -1.0]);
    /// output.set_bias(0.0);
    ///
    /// assert_eq!(network.forward(&[3.0, 1.0])?, vec![2.0]);
    /// assert_eq!(network.forward(&[1.0, 3.0])?, vec![0.0]);
    /// # Ok::<(), dense_nn::Error>(())
    /// ```
    pub fn forward(&mut self, inputs: &[f64]) -> Result<Vec<f64>> {
        self.check_complete()?;
        self.check_inputs(inputs)?;
        self.propagate(inputs);
        Ok(self.outputs())
    }

    /// The Output layer's values as of the last forward pass.
    pub fn outputs(&self) -> Vec<f64> {
        self.output_layer().map(|l| l.values()).unwrap_or_default()
    }

    /// Loss `0.5 * Σ (output - expected)²` of a fresh forward
    /// pass on `inputs`. The recorded [`cost`](Network::cost)
    /// is not changed.
    ///
    /// # Errors
    /// Fails on the same conditions as [`forward`](Network::forward),
    /// or if `expected` does not hold one value per Output neuron.
    pub fn loss(&mut self, inputs: &[f64], expected: &[f64]) -> Result<f64> {
        self.check_complete()?;
        self.check_inputs(inputs)?;
        self.check_expected(expected)?;
        self.propagate(inputs);
        Ok(half_squared_error(&self.outputs(), expected))
    }

    pub(crate) fn check_inputs(&self, inputs: &[f64]) -> std::result::Result<(), ShapeError> {
        let expected = self.input_layer().map_or(0, |l| l.len());
        if inputs.len() != expected {
            return Err(ShapeError::InputLength {
                expected,
                found: inputs.len(),
            });
        }
        Ok(())
    }

    pub(crate) fn check_expected(&self, outputs: &[f64]) -> std::result::Result<(), ShapeError> {
        let expected = self.output_layer().map_or(0, |l| l.len());
        if outputs.len() != expected {
            return Err(ShapeError::OutputLength {
                expected,
                found: outputs.len(),
            });
        }
        Ok(())
    }

    /// Runs a forward pass on a complete network with
    /// correctly-sized inputs, updating every neuron's
    /// input sum and value.
    pub(crate) fn propagate(&mut self, inputs: &[f64]) {
        for (neuron, x) in self.layers[0].neurons.iter_mut().zip(inputs) {
            let x = if x.is_finite() { *x } else { 0.0 };
            neuron.input_sum = x;
            neuron.value = x;
        }

        for i in 1..self.layers.len() {
            let (done, rest) = self.layers.split_at_mut(i);
            let previous = &done[i - 1];
            let layer = &mut rest[0];

            let sums: Vec<f64> = layer
                .neurons
                .iter()
                .map(|neuron| {
                    neuron
                        .weights
                        .iter()
                        .zip(&previous.neurons)
                        .map(|(w, source)| w * source.value)
                        .sum::<f64>()
                        + neuron.bias
                })
                .collect();
            let mut values = previous.transition().activate(&sums);
            if layer.kind == LayerKind::Output {
                if let Some(post) = &layer.activation {
                    values = post.activate(&values);
                }
            }

            for ((neuron, sum), value) in layer.neurons.iter_mut().zip(sums).zip(values) {
                neuron.input_sum = sum;
                neuron.value = value;
            }
        }
    }
}

pub(crate) fn half_squared_error(outputs: &[f64], expected: &[f64]) -> f64 {
    0.5 * outputs
        .iter()
        .zip(expected)
        .map(|(o, e)| (o - e).powi(2))
        .sum::<f64>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activations::{ActivationFunction, ActivationKind};
    use crate::errors::{ConfigurationError, Error};
    use rand::{rngs::StdRng, SeedableRng};

    fn sigmoid(x: f64) -> f64 {
        1.0 / (1.0 + (-x).exp())
    }

    fn fixed(network: &mut Network, layer: usize, parameters: &[(&[f64], f64)]) {
        let layer = network.layer_mut(layer).unwrap();
        for (i, (weights, bias)) in parameters.iter().enumerate() {
            let neuron = layer.neuron_mut(i).unwrap();
            neuron.weights_mut().copy_from_slice(weights);
            neuron.set_bias(*bias);
        }
    }

    #[test]
    fn activation_governs_following_layer() {
        let mut network = Network::new(0.1);
        network
            .add_input(1, &[], Some(ActivationKind::Sigmoid.into()))
            .unwrap()
            .add_intermediate(1, Some(ActivationKind::ReLU.into()))
            .unwrap()
            .add_output(1, &[], None)
            .unwrap();
        fixed(&mut network, 1, &[(&[2.0], 0.5)]);
        fixed(&mut network, 2, &[(&[-3.0], 0.25)]);

        for input in -20..=20 {
            let x = input as f64 / 10.0;
            let hidden = sigmoid(2.0 * x + 0.5);
            let output = (-3.0 * hidden + 0.25_f64).max(0.0);
            assert_eq!(network.forward(&[x]).unwrap(), vec![output]);
            assert_eq!(network.layers()[1].neurons()[0].input_sum(), 2.0 * x + 0.5);
        }
    }

    #[test]
    fn output_post_processing_sees_whole_vector() {
        let mut network = Network::new(0.1);
        network
            .add_input(1, &[], None)
            .unwrap()
            .add_output(3, &[], Some(ActivationKind::SoftMax.into()))
            .unwrap();
        fixed(
            &mut network,
            1,
            &[(&[1.0], 0.0), (&[2.0], 0.0), (&[3.0], 0.0)],
        );
        let outputs = network.forward(&[0.5]).unwrap();
        assert!((outputs.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        assert!(outputs[0] < outputs[1] && outputs[1] < outputs[2]);
    }

    #[test]
    fn forward_is_deterministic() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut network = Network::new(0.1);
        network
            .add_input_with_rng(3, &[], Some(ActivationKind::Swish.into()), &mut rng)
            .unwrap()
            .add_intermediate_with_rng(5, Some(ActivationKind::Tanh.into()), &mut rng)
            .unwrap()
            .add_output_with_rng(2, &[], Some(ActivationKind::NormalizedSigmoid.into()), &mut rng)
            .unwrap();
        let input = [0.3, -0.7, 1.9];
        let first = network.forward(&input).unwrap();
        for _ in 0..10 {
            network.forward(&[5.0, 5.0, -5.0]).unwrap();
            let again = network.forward(&input).unwrap();
            assert_eq!(
                first.iter().map(|v| v.to_bits()).collect::<Vec<_>>(),
                again.iter().map(|v| v.to_bits()).collect::<Vec<_>>()
            );
        }
    }

    #[test]
    fn non_finite_inputs_are_zeroed() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut network = Network::new(0.1);
        network
            .add_input_with_rng(2, &[], Some(ActivationKind::Sigmoid.into()), &mut rng)
            .unwrap()
            .add_output_with_rng(1, &[], None, &mut rng)
            .unwrap();
        let clean = network.forward(&[0.0, 0.0]).unwrap();
        assert_eq!(network.forward(&[f64::NAN, f64::INFINITY]).unwrap(), clean);
    }

    #[test]
    fn shape_errors() {
        let mut network = Network::new(0.1);
        assert!(matches!(
            network.forward(&[]),
            Err(Error::Configuration(ConfigurationError::IncompleteTopology(
                LayerKind::Input
            )))
        ));
        network.add_input(2, &[], None).unwrap();
        assert!(matches!(
            network.forward(&[1.0, 2.0]),
            Err(Error::Configuration(ConfigurationError::IncompleteTopology(
                LayerKind::Output
            )))
        ));
        network
            .add_output(1, &[], Some(ActivationFunction::new(ActivationKind::SoftMax)))
            .unwrap();
        assert!(matches!(
            network.forward(&[1.0]),
            Err(Error::Shape(ShapeError::InputLength {
                expected: 2,
                found: 1
            }))
        ));
        assert!(matches!(
            network.loss(&[1.0, 2.0], &[1.0, 0.0]),
            Err(Error::Shape(ShapeError::OutputLength {
                expected: 1,
                found: 2
            }))
        ));
    }

    #[test]
    fn loss_leaves_cost_alone() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut network = Network::new(0.1);
        network
            .add_input_with_rng(1, &[], None, &mut rng)
            .unwrap()
            .add_output_with_rng(2, &[], None, &mut rng)
            .unwrap();
        let outputs = network.forward(&[1.0]).unwrap();
        let loss = network.loss(&[1.0], &[0.0, 0.0]).unwrap();
        assert_eq!(loss, 0.5 * (outputs[0].powi(2) + outputs[1].powi(2)));
        assert_eq!(network.cost(), None);
    }
}
