use super::ActivationKind;
use crate::errors::ConfigurationError;
use crate::parameters::{NumericRange, Parameter, ParameterStore, ParameterValue};

pub const SLOPE: Parameter<f64> = Parameter::new("slope", 1.0);
pub const RANGE: Parameter<NumericRange> = Parameter::new("range", NumericRange::new(-1.0, 1.0));
pub const OUTER_SLOPE: Parameter<f64> = Parameter::new("outer_slope", 0.01);
pub const LEAKY_SLOPE: Parameter<f64> = Parameter::new("slope", 0.01);
pub const STEEPNESS: Parameter<f64> = Parameter::new("steepness", 1.0);
pub const TEMPERATURE: Parameter<f64> = Parameter::new("temperature", 1.0);
pub const ELU_ALPHA: Parameter<f64> = Parameter::new("alpha", 1.0);
pub const SELU_LAMBDA: Parameter<f64> = Parameter::new("lambda", 1.050_700_987_355_480_5);
pub const SELU_ALPHA: Parameter<f64> = Parameter::new("alpha", 1.673_263_242_354_377_2);
pub const SWISH_BETA: Parameter<f64> = Parameter::new("beta", 1.0);
pub const HARD_SIGMOID_SLOPE: Parameter<f64> = Parameter::new("slope", 0.2);

/// Smallest denominator used when normalizing a vector.
pub const NORMALIZATION_FLOOR: f64 = 1e-12;

/// An activation function with its parameters resolved.
///
/// Element-wise variants map every value independently. The
/// output-only variants ([`SoftMax`] and [`NormalizedSigmoid`])
/// normalize a whole vector and are only valid on Output layers.
///
/// All functions substitute zero for non-finite inputs and results.
///
/// [`SoftMax`]: Activation::SoftMax
/// [`NormalizedSigmoid`]: Activation::NormalizedSigmoid
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Activation {
    Identity,
    Linear { slope: f64, range: NumericRange },
    PiecewiseLinear { range: NumericRange, outer_slope: f64 },
    ReLU,
    LeakyReLU { slope: f64 },
    Sigmoid { steepness: f64 },
    Tanh,
    SoftMax { temperature: f64 },
    NormalizedSigmoid,
    ELU { alpha: f64 },
    SELU { lambda: f64, alpha: f64 },
    Softplus,
    Softsign,
    Swish { beta: f64 },
    Mish,
    Gaussian,
    HardSigmoid { slope: f64 },
    HardTanh { range: NumericRange },
}

fn finite(x: f64) -> f64 {
    if x.is_finite() {
        x
    } else {
        0.0
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

// ln(1 + exp(x)) without overflow for large x.
fn softplus(x: f64) -> f64 {
    x.max(0.0) + (-x.abs()).exp().ln_1p()
}

fn read(store: &ParameterStore, parameter: &Parameter<f64>) -> Result<f64, ConfigurationError> {
    let value = store.try_get(parameter)?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigurationError::parameter(
            parameter.name,
            format!("{} is not finite", value),
        ))
    }
}

fn read_positive(
    store: &ParameterStore,
    parameter: &Parameter<f64>,
) -> Result<f64, ConfigurationError> {
    let value = read(store, parameter)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(ConfigurationError::parameter(
            parameter.name,
            format!("{} is not positive", value),
        ))
    }
}

fn read_range(
    store: &ParameterStore,
    parameter: &Parameter<NumericRange>,
) -> Result<NumericRange, ConfigurationError> {
    let range = store.try_get(parameter)?;
    if range.is_valid() {
        Ok(range)
    } else {
        Err(ConfigurationError::parameter(
            parameter.name,
            format!("{} is not an ordered finite range", range),
        ))
    }
}

impl Activation {
    /// Resolves the function of the given kind, reading its
    /// parameters from `store`. Absent parameters take their
    /// declared defaults; unrelated keys are ignored.
    ///
    /// # Errors
    /// Returns an error if a parameter is stored with an incompatible
    /// type or an out-of-range value (a non-finite number, an inverted
    /// range, or a non-positive temperature).
    ///
    /// # Examples
    /// ```
    /// use dense_nn::activations::{Activation, ActivationKind};
    /// use dense_nn::parameters::{ParameterStore, ParameterValue};
    ///
    /// let mut store = ParameterStore::new();
    /// store.set_value("slope", ParameterValue::Double(0.2));
    ///
    /// let leaky = Activation::from_parameters(ActivationKind::LeakyReLU, &store).unwrap();
    /// assert_eq!(leaky, Activation::LeakyReLU { slope: 0.2 });
    ///
    /// store.set_value("temperature", ParameterValue::Double(0.0));
    /// assert!(Activation::from_parameters(ActivationKind::SoftMax, &store).is_err());
    /// ```
    pub fn from_parameters(
        kind: ActivationKind,
        store: &ParameterStore,
    ) -> Result<Activation, ConfigurationError> {
        use ActivationKind as K;
        Ok(match kind {
            K::Identity => Self::Identity,
            K::Linear => Self::Linear {
                slope: read(store, &SLOPE)?,
                range: read_range(store, &RANGE)?,
            },
            K::PiecewiseLinear => Self::PiecewiseLinear {
                range: read_range(store, &RANGE)?,
                outer_slope: read(store, &OUTER_SLOPE)?,
            },
            K::ReLU => Self::ReLU,
            K::LeakyReLU => Self::LeakyReLU {
                slope: read(store, &LEAKY_SLOPE)?,
            },
            K::Sigmoid => Self::Sigmoid {
                steepness: read(store, &STEEPNESS)?,
            },
            K::Tanh => Self::Tanh,
            K::SoftMax => Self::SoftMax {
                temperature: read_positive(store, &TEMPERATURE)?,
            },
            K::NormalizedSigmoid => Self::NormalizedSigmoid,
            K::ELU => Self::ELU {
                alpha: read(store, &ELU_ALPHA)?,
            },
            K::SELU => Self::SELU {
                lambda: read(store, &SELU_LAMBDA)?,
                alpha: read(store, &SELU_ALPHA)?,
            },
            K::Softplus => Self::Softplus,
            K::Softsign => Self::Softsign,
            K::Swish => Self::Swish {
                beta: read(store, &SWISH_BETA)?,
            },
            K::Mish => Self::Mish,
            K::Gaussian => Self::Gaussian,
            K::HardSigmoid => Self::HardSigmoid {
                slope: read(store, &HARD_SIGMOID_SLOPE)?,
            },
            K::HardTanh => Self::HardTanh {
                range: read_range(store, &RANGE)?,
            },
        })
    }

    /// Resolves the function of the given kind with every
    /// parameter at its default.
    pub fn with_defaults(kind: ActivationKind) -> Activation {
        use ActivationKind as K;
        match kind {
            K::Identity => Self::Identity,
            K::Linear => Self::Linear {
                slope: SLOPE.default,
                range: RANGE.default,
            },
            K::PiecewiseLinear => Self::PiecewiseLinear {
                range: RANGE.default,
                outer_slope: OUTER_SLOPE.default,
            },
            K::ReLU => Self::ReLU,
            K::LeakyReLU => Self::LeakyReLU {
                slope: LEAKY_SLOPE.default,
            },
            K::Sigmoid => Self::Sigmoid {
                steepness: STEEPNESS.default,
            },
            K::Tanh => Self::Tanh,
            K::SoftMax => Self::SoftMax {
                temperature: TEMPERATURE.default,
            },
            K::NormalizedSigmoid => Self::NormalizedSigmoid,
            K::ELU => Self::ELU {
                alpha: ELU_ALPHA.default,
            },
            K::SELU => Self::SELU {
                lambda: SELU_LAMBDA.default,
                alpha: SELU_ALPHA.default,
            },
            K::Softplus => Self::Softplus,
            K::Softsign => Self::Softsign,
            K::Swish => Self::Swish {
                beta: SWISH_BETA.default,
            },
            K::Mish => Self::Mish,
            K::Gaussian => Self::Gaussian,
            K::HardSigmoid => Self::HardSigmoid {
                slope: HARD_SIGMOID_SLOPE.default,
            },
            K::HardTanh => Self::HardTanh {
                range: RANGE.default,
            },
        }
    }

    pub fn kind(&self) -> ActivationKind {
        use ActivationKind as K;
        match self {
            Self::Identity => K::Identity,
            Self::Linear { .. } => K::Linear,
            Self::PiecewiseLinear { .. } => K::PiecewiseLinear,
            Self::ReLU => K::ReLU,
            Self::LeakyReLU { .. } => K::LeakyReLU,
            Self::Sigmoid { .. } => K::Sigmoid,
            Self::Tanh => K::Tanh,
            Self::SoftMax { .. } => K::SoftMax,
            Self::NormalizedSigmoid => K::NormalizedSigmoid,
            Self::ELU { .. } => K::ELU,
            Self::SELU { .. } => K::SELU,
            Self::Softplus => K::Softplus,
            Self::Softsign => K::Softsign,
            Self::Swish { .. } => K::Swish,
            Self::Mish => K::Mish,
            Self::Gaussian => K::Gaussian,
            Self::HardSigmoid { .. } => K::HardSigmoid,
            Self::HardTanh { .. } => K::HardTanh,
        }
    }

    pub fn is_output_only(&self) -> bool {
        self.kind().is_output_only()
    }

    /// Applies the function to a vector of pre-activation values.
    ///
    /// # Examples
    /// ```
    /// use dense_nn::activations::Activation;
    ///
    /// let relu = Activation::ReLU;
    /// assert_eq!(relu.activate(&[-1.0, 2.0, f64::NAN]), vec![0.0, 2.0, 0.0]);
    ///
    /// let softmax = Activation::SoftMax { temperature: 1.0 };
    /// let outputs = softmax.activate(&[1.0, 1.0]);
    /// assert_eq!(outputs, vec![0.5, 0.5]);
    /// ```
    pub fn activate(&self, inputs: &[f64]) -> Vec<f64> {
        match *self {
            Self::SoftMax { temperature } => {
                let scaled: Vec<f64> = inputs.iter().map(|x| finite(*x) / temperature).collect();
                let max = scaled.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                let exps: Vec<f64> = scaled.iter().map(|z| (z - max).exp()).collect();
                let sum = exps.iter().sum::<f64>().max(NORMALIZATION_FLOOR);
                exps.into_iter().map(|e| finite(e / sum)).collect()
            }
            Self::NormalizedSigmoid => {
                let squashed: Vec<f64> = inputs.iter().map(|x| sigmoid(finite(*x))).collect();
                let sum = squashed.iter().sum::<f64>().max(NORMALIZATION_FLOOR);
                squashed.into_iter().map(|s| finite(s / sum)).collect()
            }
            _ => inputs.iter().map(|x| self.element(*x)).collect(),
        }
    }

    fn element(&self, x: f64) -> f64 {
        let x = finite(x);
        let y = match *self {
            Self::Identity => x,
            Self::Linear { slope, range } => range.clamp(slope * x),
            Self::PiecewiseLinear { range, outer_slope } => {
                if x < range.min {
                    range.min + outer_slope * (x - range.min)
                } else if x > range.max {
                    range.max + outer_slope * (x - range.max)
                } else {
                    x
                }
            }
            Self::ReLU => x.max(0.0),
            Self::LeakyReLU { slope } => {
                if x > 0.0 {
                    x
                } else {
                    slope * x
                }
            }
            Self::Sigmoid { steepness } => sigmoid(steepness * x),
            Self::Tanh => x.tanh(),
            Self::ELU { alpha } => {
                if x > 0.0 {
                    x
                } else {
                    alpha * x.exp_m1()
                }
            }
            Self::SELU { lambda, alpha } => {
                if x > 0.0 {
                    lambda * x
                } else {
                    lambda * alpha * x.exp_m1()
                }
            }
            Self::Softplus => softplus(x),
            Self::Softsign => x / (1.0 + x.abs()),
            Self::Swish { beta } => x * sigmoid(beta * x),
            Self::Mish => x * softplus(x).tanh(),
            Self::Gaussian => (-x * x).exp(),
            Self::HardSigmoid { slope } => (slope * x + 0.5).clamp(0.0, 1.0),
            Self::HardTanh { range } => range.clamp(x),
            // A lone value normalizes to 1.
            Self::SoftMax { .. } | Self::NormalizedSigmoid => 1.0,
        };
        finite(y)
    }

    /// Derivative of the function at the pre-activation value `x`.
    ///
    /// Defined for every input; non-finite inputs are treated as zero.
    /// Output-only variants couple all outputs, so their scalar view is
    /// the constant 1 with derivative 0; training uses
    /// [`output_gradient`](Activation::output_gradient) for them instead.
    ///
    /// # Examples
    /// ```
    /// use dense_nn::activations::Activation;
    ///
    /// let sigmoid = Activation::Sigmoid { steepness: 1.0 };
    /// assert_eq!(sigmoid.derivative(0.0), 0.25);
    /// assert_eq!(Activation::ReLU.derivative(-3.0), 0.0);
    /// ```
    pub fn derivative(&self, x: f64) -> f64 {
        let x = finite(x);
        let d = match *self {
            Self::Identity => 1.0,
            Self::Linear { slope, range } => {
                if range.contains_strictly(slope * x) {
                    slope
                } else {
                    0.0
                }
            }
            Self::PiecewiseLinear { range, outer_slope } => {
                if range.contains(x) {
                    1.0
                } else {
                    outer_slope
                }
            }
            Self::ReLU => {
                if x > 0.0 {
                    1.0
                } else {
                    0.0
                }
            }
            Self::LeakyReLU { slope } => {
                if x > 0.0 {
                    1.0
                } else {
                    slope
                }
            }
            Self::Sigmoid { steepness } => {
                let s = sigmoid(steepness * x);
                steepness * s * (1.0 - s)
            }
            Self::Tanh => 1.0 - x.tanh().powi(2),
            Self::ELU { alpha } => {
                if x > 0.0 {
                    1.0
                } else {
                    alpha * x.exp()
                }
            }
            Self::SELU { lambda, alpha } => {
                if x > 0.0 {
                    lambda
                } else {
                    lambda * alpha * x.exp()
                }
            }
            Self::Softplus => sigmoid(x),
            Self::Softsign => (1.0 + x.abs()).powi(-2),
            Self::Swish { beta } => {
                let s = sigmoid(beta * x);
                s + beta * x * s * (1.0 - s)
            }
            Self::Mish => {
                let t = softplus(x).tanh();
                t + x * (1.0 - t * t) * sigmoid(x)
            }
            Self::Gaussian => -2.0 * x * (-x * x).exp(),
            Self::HardSigmoid { slope } => {
                let y = slope * x + 0.5;
                if 0.0 < y && y < 1.0 {
                    slope
                } else {
                    0.0
                }
            }
            Self::HardTanh { range } => {
                if range.contains_strictly(x) {
                    1.0
                } else {
                    0.0
                }
            }
            Self::SoftMax { .. } | Self::NormalizedSigmoid => 0.0,
        };
        finite(d)
    }

    /// Gradient of the loss `0.5 * Σ (outputs - expected)²` with
    /// respect to this function's `inputs`, where `outputs` is
    /// `self.activate(inputs)`.
    ///
    /// Element-wise variants scale each error by their derivative.
    /// Output-only variants apply the full Jacobian of their
    /// normalization, since every output depends on every input.
    ///
    /// # Examples
    /// ```
    /// use dense_nn::activations::Activation;
    ///
    /// let softmax = Activation::SoftMax { temperature: 1.0 };
    /// let inputs = [0.0, 0.0];
    /// let outputs = softmax.activate(&inputs);
    ///
    /// // Moving both inputs together leaves softmax unchanged,
    /// // so the gradient components cancel out.
    /// let gradient = softmax.output_gradient(&inputs, &outputs, &[1.0, 0.0]);
    /// assert!((gradient[0] + gradient[1]).abs() < 1e-12);
    /// assert!(gradient[0] < 0.0);
    /// ```
    pub fn output_gradient(&self, inputs: &[f64], outputs: &[f64], expected: &[f64]) -> Vec<f64> {
        let errors: Vec<f64> = outputs
            .iter()
            .zip(expected)
            .map(|(o, e)| o - e)
            .collect();
        match *self {
            Self::SoftMax { temperature } => {
                let weighted: f64 = errors.iter().zip(outputs).map(|(g, o)| g * o).sum();
                errors
                    .iter()
                    .zip(outputs)
                    .map(|(g, o)| finite(o * (g - weighted) / temperature))
                    .collect()
            }
            Self::NormalizedSigmoid => {
                let squashed: Vec<f64> = inputs.iter().map(|x| sigmoid(finite(*x))).collect();
                let sum = squashed.iter().sum::<f64>().max(NORMALIZATION_FLOOR);
                let weighted: f64 = errors.iter().zip(outputs).map(|(g, y)| g * y).sum();
                errors
                    .iter()
                    .zip(&squashed)
                    .map(|(g, s)| finite(s * (1.0 - s) / sum * (g - weighted)))
                    .collect()
            }
            _ => errors
                .iter()
                .zip(inputs)
                .map(|(g, x)| finite(g * self.derivative(*x)))
                .collect(),
        }
    }
}

/// An activation function bound to the parameter store
/// it was configured from.
///
/// The store is kept so the configuration can be persisted
/// and edited; the resolved [`Activation`] is rebuilt from it
/// on every change.
#[derive(Clone, Debug, PartialEq)]
pub struct ActivationFunction {
    activation: Activation,
    parameters: ParameterStore,
}

impl ActivationFunction {
    /// Returns the function of the given kind with default parameters.
    pub fn new(kind: ActivationKind) -> ActivationFunction {
        ActivationFunction {
            activation: Activation::with_defaults(kind),
            parameters: ParameterStore::new(),
        }
    }

    /// Returns the function of the given kind configured from `parameters`.
    ///
    /// # Errors
    /// See [`Activation::from_parameters`].
    pub fn with_parameters(
        kind: ActivationKind,
        parameters: ParameterStore,
    ) -> Result<ActivationFunction, ConfigurationError> {
        Ok(ActivationFunction {
            activation: Activation::from_parameters(kind, &parameters)?,
            parameters,
        })
    }

    /// Changes a single parameter, re-resolving the function.
    /// On failure the function is left unchanged.
    ///
    /// # Examples
    /// ```
    /// use dense_nn::activations::{Activation, ActivationFunction, ActivationKind};
    /// use dense_nn::parameters::ParameterValue;
    ///
    /// let mut sigmoid = ActivationFunction::new(ActivationKind::Sigmoid);
    /// sigmoid.set_parameter("steepness", ParameterValue::Double(4.9)).unwrap();
    /// assert_eq!(sigmoid.activation(), &Activation::Sigmoid { steepness: 4.9 });
    ///
    /// assert!(sigmoid.set_parameter("steepness", ParameterValue::Bool(true)).is_err());
    /// assert_eq!(sigmoid.activation(), &Activation::Sigmoid { steepness: 4.9 });
    /// ```
    pub fn set_parameter(
        &mut self,
        name: &str,
        value: ParameterValue,
    ) -> Result<(), ConfigurationError> {
        let mut parameters = self.parameters.clone();
        parameters.set_value(name, value);
        self.activation = Activation::from_parameters(self.kind(), &parameters)?;
        self.parameters = parameters;
        Ok(())
    }

    pub fn kind(&self) -> ActivationKind {
        self.activation.kind()
    }

    pub fn activation(&self) -> &Activation {
        &self.activation
    }

    pub fn parameters(&self) -> &ParameterStore {
        &self.parameters
    }

    pub fn activate(&self, inputs: &[f64]) -> Vec<f64> {
        self.activation.activate(inputs)
    }

    pub fn derivative(&self, x: f64) -> f64 {
        self.activation.derivative(x)
    }
}

impl From<ActivationKind> for ActivationFunction {
    fn from(kind: ActivationKind) -> ActivationFunction {
        ActivationFunction::new(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: [f64; 9] = [-4.0, -1.5, -0.7, -0.1, 0.05, 0.3, 0.9, 2.2, 5.0];

    fn element_wise() -> impl Iterator<Item = Activation> {
        ActivationKind::ALL
            .into_iter()
            .filter(|k| !k.is_output_only())
            .map(Activation::with_defaults)
    }

    #[test]
    fn derivatives_match_finite_differences() {
        const H: f64 = 1e-6;
        for activation in element_wise() {
            for &x in &SAMPLES {
                let numeric = (activation.activate(&[x + H])[0]
                    - activation.activate(&[x - H])[0])
                    / (2.0 * H);
                let analytic = activation.derivative(x);
                assert!(
                    (numeric - analytic).abs() < 1e-5,
                    "{:?} at {}: numeric {} analytic {}",
                    activation,
                    x,
                    numeric,
                    analytic
                );
            }
        }
    }

    #[test]
    fn non_finite_inputs_become_zero() {
        for kind in ActivationKind::ALL {
            let activation = Activation::with_defaults(kind);
            let outputs = activation.activate(&[f64::NAN, f64::INFINITY, f64::NEG_INFINITY]);
            let zeros = activation.activate(&[0.0, 0.0, 0.0]);
            assert_eq!(outputs, zeros, "{:?}", kind);
            assert!(outputs.iter().all(|y| y.is_finite()));
            assert_eq!(activation.derivative(f64::NAN), activation.derivative(0.0));
        }
    }

    #[test]
    fn large_inputs_do_not_overflow() {
        for kind in ActivationKind::ALL {
            let activation = Activation::with_defaults(kind);
            for x in [-1e308, -800.0, 800.0, 1e308] {
                assert!(activation.activate(&[x, 0.0])[0].is_finite(), "{:?}", kind);
                assert!(activation.derivative(x).is_finite(), "{:?}", kind);
            }
        }
    }

    fn loss(activation: &Activation, inputs: &[f64], expected: &[f64]) -> f64 {
        activation
            .activate(inputs)
            .iter()
            .zip(expected)
            .map(|(o, e)| 0.5 * (o - e).powi(2))
            .sum()
    }

    #[test]
    fn output_gradients_match_finite_differences() {
        const H: f64 = 1e-6;
        let inputs = [0.3, -1.2, 0.8];
        let expected = [0.0, 1.0, 0.0];
        let candidates = [
            Activation::SoftMax { temperature: 1.0 },
            Activation::SoftMax { temperature: 2.5 },
            Activation::NormalizedSigmoid,
            Activation::Tanh,
        ];
        for activation in candidates {
            let outputs = activation.activate(&inputs);
            let gradient = activation.output_gradient(&inputs, &outputs, &expected);
            for i in 0..inputs.len() {
                let mut up = inputs;
                let mut down = inputs;
                up[i] += H;
                down[i] -= H;
                let numeric =
                    (loss(&activation, &up, &expected) - loss(&activation, &down, &expected))
                        / (2.0 * H);
                assert!(
                    (numeric - gradient[i]).abs() < 1e-6,
                    "{:?} input {}: numeric {} analytic {}",
                    activation,
                    i,
                    numeric,
                    gradient[i]
                );
            }
        }
    }

    #[test]
    fn normalizations_sum_to_one() {
        for activation in [
            Activation::SoftMax { temperature: 0.5 },
            Activation::NormalizedSigmoid,
        ] {
            let outputs = activation.activate(&[-2.0, 0.0, 3.0, 700.0]);
            assert!((outputs.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn vanishing_normalization_uses_floor() {
        let outputs = Activation::NormalizedSigmoid.activate(&[-1e6, -1e6]);
        assert_eq!(outputs, vec![0.0, 0.0]);
    }

    #[test]
    fn parameters_are_read_and_validated() {
        let mut store = ParameterStore::new();
        store.set(&RANGE, NumericRange::new(0.0, 6.0));
        store.set(&SLOPE, 2.0);
        assert_eq!(
            Activation::from_parameters(ActivationKind::Linear, &store).unwrap(),
            Activation::Linear {
                slope: 2.0,
                range: NumericRange::new(0.0, 6.0)
            }
        );
        assert_eq!(
            Activation::from_parameters(ActivationKind::Linear, &store)
                .unwrap()
                .activate(&[-1.0, 1.0, 4.0]),
            vec![0.0, 2.0, 6.0]
        );

        store.set(&RANGE, NumericRange::new(1.0, -1.0));
        assert!(Activation::from_parameters(ActivationKind::HardTanh, &store).is_err());
        // Kinds without a range parameter ignore it.
        assert!(Activation::from_parameters(ActivationKind::Tanh, &store).is_ok());

        store.set_value("alpha", ParameterValue::Double(f64::NAN));
        assert!(Activation::from_parameters(ActivationKind::ELU, &store).is_err());
    }

    #[test]
    fn defaults_agree_with_empty_store() {
        let empty = ParameterStore::new();
        for kind in ActivationKind::ALL {
            assert_eq!(
                Activation::from_parameters(kind, &empty).unwrap(),
                Activation::with_defaults(kind)
            );
            assert_eq!(Activation::with_defaults(kind).kind(), kind);
        }
    }
}
