use super::forward::half_squared_error;
use super::Network;
use crate::errors::Result;
use crate::parameters::hyperparameters::{GRADIENT_CLIP, WEIGHT_DECAY};

use tracing::trace;

/// Loss gradients with respect to every trainable parameter,
/// as computed by [`Network::gradients`].
///
/// Both collections are indexed like the network's layers; the
/// entries for the Input layer are empty.
#[derive(Clone, Debug, PartialEq)]
pub struct Gradients {
    /// Loss of the forward pass the gradients were taken at.
    pub cost: f64,
    /// `weights[layer][neuron][source]`: gradient of the weight
    /// connecting `source` in the previous layer to `neuron`.
    pub weights: Vec<Vec<Vec<f64>>>,
    /// `biases[layer][neuron]`.
    pub biases: Vec<Vec<f64>>,
}

fn finite(x: f64) -> f64 {
    if x.is_finite() {
        x
    } else {
        0.0
    }
}

impl Network {
    /// Computes the gradients of the loss `0.5 * Σ (output - expected)²`
    /// at `inputs` by backpropagation, without changing any weight.
    ///
    /// The error term ("gamma") of an Output neuron is its output error
    /// times the derivative of the transition into the Output layer. If
    /// the Output layer normalizes its values, the error is first carried
    /// back through the normalization. Each Intermediate neuron's gamma
    /// is the weighted sum of the next layer's gammas, times the
    /// derivative of the transition into its own layer. Derivatives are
    /// taken at the neurons' input sums. Non-finite gradient components
    /// are reported as zero.
    ///
    /// # Errors
    /// Fails if the network is incomplete or either slice has
    /// the wrong length.
    pub fn gradients(&mut self, inputs: &[f64], expected: &[f64]) -> Result<Gradients> {
        self.check_complete()?;
        self.check_inputs(inputs)?;
        self.check_expected(expected)?;
        self.propagate(inputs);

        let outputs = self.outputs();
        let cost = half_squared_error(&outputs, expected);
        let last = self.layers.len() - 1;

        let mut gammas: Vec<Vec<f64>> = vec![vec![]; self.layers.len()];
        {
            let output = &self.layers[last];
            let transition = self.layers[last - 1].transition();
            let sums: Vec<f64> = output.neurons.iter().map(|n| n.input_sum).collect();
            let errors = match &output.activation {
                Some(post) => {
                    let values = transition.activate(&sums);
                    post.activation().output_gradient(&values, &outputs, expected)
                }
                None => outputs.iter().zip(expected).map(|(o, e)| o - e).collect(),
            };
            gammas[last] = errors
                .iter()
                .zip(&sums)
                .map(|(error, sum)| finite(error * transition.derivative(*sum)))
                .collect();
        }
        for i in (1..last).rev() {
            let transition = self.layers[i - 1].transition();
            let next = &self.layers[i + 1];
            gammas[i] = self.layers[i]
                .neurons
                .iter()
                .enumerate()
                .map(|(j, neuron)| {
                    let propagated: f64 = next
                        .neurons
                        .iter()
                        .zip(&gammas[i + 1])
                        .map(|(target, gamma)| gamma * target.weights[j])
                        .sum();
                    finite(propagated * transition.derivative(neuron.input_sum))
                })
                .collect();
        }

        let mut weights = vec![vec![]];
        let mut biases = vec![vec![]];
        for i in 1..self.layers.len() {
            let sources = self.layers[i - 1].values();
            weights.push(
                gammas[i]
                    .iter()
                    .map(|gamma| sources.iter().map(|v| finite(gamma * v)).collect())
                    .collect(),
            );
            biases.push(gammas[i].clone());
        }

        Ok(Gradients {
            cost,
            weights,
            biases,
        })
    }

    /// Performs one step of gradient descent on a single sample,
    /// returning the loss of the forward pass it started from. The
    /// loss is also recorded as the network's [`cost`](Network::cost).
    ///
    /// Each bias moves by `-learning_rate * gamma`, and each weight by
    /// `-learning_rate * gamma * source`, where `source` is the value
    /// of the connected neuron in the previous layer. All gammas are
    /// computed before any parameter changes. The `weight_decay` and
    /// `gradient_clip` hyperparameters, when set, add an L2 penalty to
    /// the weight updates and bound each gradient component.
    ///
    /// # Errors
    /// Fails if the network is incomplete or either slice has
    /// the wrong length. The network is unchanged on failure.
    ///
    /// # Examples
    /// ```
    /// use dense_nn::activations::ActivationKind;
    /// use dense_nn::Network;
    ///
    /// let mut network = Network::new(0.5);
    /// network
    ///     .add_input(1, &[], Some(ActivationKind::Sigmoid.into()))?
    ///     .add_intermediate(2, Some(ActivationKind::Sigmoid.into()))?
    ///     .add_output(1, &[], None)?;
    ///
    /// let before = network.loss(&[1.0], &[0.0])?;
    /// for _ in 0..20 {
    ///     network.train(&[1.0], &[0.0])?;
    /// }
    /// assert!(network.loss(&[1.0], &[0.0])? < before);
    /// # Ok::<(), dense_nn::Error>(())
    /// ```
    pub fn train(&mut self, inputs: &[f64], expected: &[f64]) -> Result<f64> {
        let gradients = self.gradients(inputs, expected)?;

        let rate = self.learning_rate;
        let decay = finite(self.hyperparameters.get(&WEIGHT_DECAY));
        let clip = self.hyperparameters.get(&GRADIENT_CLIP);
        let bound = |g: f64| {
            if clip > 0.0 {
                g.clamp(-clip, clip)
            } else {
                g
            }
        };

        for ((layer, weights), biases) in self
            .layers
            .iter_mut()
            .zip(&gradients.weights)
            .zip(&gradients.biases)
            .skip(1)
        {
            for ((neuron, weights), bias) in layer.neurons.iter_mut().zip(weights).zip(biases) {
                neuron.bias -= rate * bound(*bias);
                for (w, g) in neuron.weights.iter_mut().zip(weights) {
                    *w -= rate * (bound(*g) + decay * *w);
                }
            }
        }

        self.cost = Some(gradients.cost);
        trace!(cost = gradients.cost, "training step");
        Ok(gradients.cost)
    }
}
