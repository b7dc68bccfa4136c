use crate::parameters::NumericRange;

use rand::Rng;

/// A single scalar unit of a layer.
///
/// A neuron owns its bias and the weights of its incoming
/// connections, one per neuron of the previous layer, in that
/// layer's order. Input-layer neurons have no incoming weights,
/// and their bias is unused.
#[derive(Clone, Debug, PartialEq)]
pub struct Neuron {
    pub(crate) value: f64,
    pub(crate) input_sum: f64,
    pub(crate) bias: f64,
    pub(crate) weights: Vec<f64>,
    pub(crate) alias: Option<String>,
}

impl Neuron {
    /// Creates a neuron with `incoming` weights and a bias drawn from `range`.
    /// Input neurons (`incoming == 0`) get a zero bias.
    pub(crate) fn random<R: Rng + ?Sized>(
        incoming: usize,
        alias: Option<String>,
        range: NumericRange,
        is_input: bool,
        rng: &mut R,
    ) -> Neuron {
        Neuron {
            value: 0.0,
            input_sum: 0.0,
            bias: if is_input { 0.0 } else { range.sample(rng) },
            weights: (0..incoming).map(|_| range.sample(rng)).collect(),
            alias,
        }
    }

    /// Creates a neuron from persisted parameters.
    pub(crate) fn from_parts(bias: f64, weights: Vec<f64>, alias: Option<String>) -> Neuron {
        Neuron {
            value: 0.0,
            input_sum: 0.0,
            bias,
            weights,
            alias,
        }
    }

    /// The neuron's output as of the last forward pass.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// The weighted input sum plus bias as of the last forward pass,
    /// before any activation function was applied.
    pub fn input_sum(&self) -> f64 {
        self.input_sum
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }

    pub fn set_bias(&mut self, bias: f64) {
        self.bias = bias;
    }

    /// Incoming connection weights, indexed by
    /// the previous layer's neuron positions.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Mutable access to the incoming weights. The slice
    /// cannot be resized, so the layer shapes stay consistent.
    pub fn weights_mut(&mut self) -> &mut [f64] {
        &mut self.weights
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }
}
