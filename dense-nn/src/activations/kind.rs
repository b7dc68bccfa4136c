use serde::{Deserialize, Serialize};

/// An ActivationKind names an activation function,
/// independently of the parameters bound to it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivationKind {
    // x
    Identity,
    // clamp(slope * x, range)
    Linear,
    // x inside range, continued with outer_slope outside it
    PiecewiseLinear,
    // max(0, x)
    ReLU,
    // x if x > 0, slope * x otherwise
    LeakyReLU,
    // 1 / (1 + exp(-steepness * x))
    Sigmoid,
    // tanh(x)
    Tanh,
    // exp(x_i / t) / Σ exp(x_j / t), output layers only
    SoftMax,
    // sigmoid(x_i) / Σ sigmoid(x_j), output layers only
    NormalizedSigmoid,
    // x if x > 0, alpha * (exp(x) - 1) otherwise
    ELU,
    // lambda * ELU(x) with the self-normalizing constants
    SELU,
    // ln(1 + exp(x))
    Softplus,
    // x / (1 + |x|)
    Softsign,
    // x * sigmoid(beta * x)
    Swish,
    // x * tanh(softplus(x))
    Mish,
    // exp(-x²)
    Gaussian,
    // clamp(slope * x + 0.5, 0, 1)
    HardSigmoid,
    // clamp(x, range)
    HardTanh,
}

impl ActivationKind {
    /// Every kind, in declaration order.
    pub const ALL: [ActivationKind; 18] = [
        Self::Identity,
        Self::Linear,
        Self::PiecewiseLinear,
        Self::ReLU,
        Self::LeakyReLU,
        Self::Sigmoid,
        Self::Tanh,
        Self::SoftMax,
        Self::NormalizedSigmoid,
        Self::ELU,
        Self::SELU,
        Self::Softplus,
        Self::Softsign,
        Self::Swish,
        Self::Mish,
        Self::Gaussian,
        Self::HardSigmoid,
        Self::HardTanh,
    ];

    /// Whether the function normalizes across a whole vector, and so
    /// may only post-process an Output layer.
    ///
    /// # Examples
    /// ```
    /// use dense_nn::activations::ActivationKind;
    ///
    /// assert!(ActivationKind::SoftMax.is_output_only());
    /// assert!(!ActivationKind::Sigmoid.is_output_only());
    /// ```
    pub fn is_output_only(self) -> bool {
        matches!(self, Self::SoftMax | Self::NormalizedSigmoid)
    }
}
