use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use std::fmt;
use std::str::FromStr;

/// A closed numeric interval `[min, max]`.
///
/// Its compact text form is `min..max`, with both bounds
/// written in their shortest exact representation.
///
/// # Examples
/// ```
/// use dense_nn::parameters::NumericRange;
///
/// let range: NumericRange = "-1.0..0.5".parse().unwrap();
/// assert_eq!(range, NumericRange::new(-1.0, 0.5));
/// assert_eq!(range.to_string(), "-1.0..0.5");
/// assert_eq!(range.clamp(3.0), 0.5);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NumericRange {
    pub min: f64,
    pub max: f64,
}

impl NumericRange {
    pub const fn new(min: f64, max: f64) -> NumericRange {
        NumericRange { min, max }
    }

    /// Whether both bounds are finite and ordered.
    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }

    /// Inclusive membership test.
    pub fn contains(&self, x: f64) -> bool {
        self.min <= x && x <= self.max
    }

    /// Strict membership test, excluding both bounds.
    pub fn contains_strictly(&self, x: f64) -> bool {
        self.min < x && x < self.max
    }

    pub fn clamp(&self, x: f64) -> f64 {
        x.max(self.min).min(self.max)
    }

    /// Returns a value drawn uniformly from the range.
    /// A degenerate range always yields its single value.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        if self.min < self.max {
            rng.gen_range(self.min..=self.max)
        } else {
            self.min
        }
    }
}

impl fmt::Display for NumericRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Debug formatting of floats is exact and always carries
        // a decimal point or exponent, which keeps them apart from
        // integers when the text is parsed back.
        write!(f, "{:?}..{:?}", self.min, self.max)
    }
}

impl FromStr for NumericRange {
    type Err = ParameterTextError;

    fn from_str(s: &str) -> Result<NumericRange, ParameterTextError> {
        let (min, max) = s
            .trim()
            .split_once("..")
            .ok_or_else(|| ParameterTextError(s.to_owned()))?;
        match (min.trim().parse(), max.trim().parse()) {
            (Ok(min), Ok(max)) => Ok(NumericRange { min, max }),
            _ => Err(ParameterTextError(s.to_owned())),
        }
    }
}

/// Raised when a parameter's text form cannot be parsed.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("unparseable parameter text {0:?}")]
pub struct ParameterTextError(pub String);

/// A dynamically-typed parameter value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParameterValue {
    Double(f64),
    Bool(bool),
    Int(i64),
    Range(NumericRange),
}

impl ParameterValue {
    /// Name of the value's type, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Double(_) => f64::TYPE_NAME,
            Self::Bool(_) => bool::TYPE_NAME,
            Self::Int(_) => i64::TYPE_NAME,
            Self::Range(_) => NumericRange::TYPE_NAME,
        }
    }
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Double(d) => write!(f, "{:?}", d),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Int(i) => write!(f, "{}", i),
            Self::Range(r) => write!(f, "{}", r),
        }
    }
}

impl FromStr for ParameterValue {
    type Err = ParameterTextError;

    /// Infers the type from the text: booleans, then integers,
    /// then ranges (`a..b`), then doubles. Doubles are always
    /// written with a decimal point or exponent, so the inference
    /// is the exact inverse of `Display`.
    fn from_str(s: &str) -> Result<ParameterValue, ParameterTextError> {
        let text = s.trim();
        if let Ok(b) = text.parse::<bool>() {
            Ok(Self::Bool(b))
        } else if let Ok(i) = text.parse::<i64>() {
            Ok(Self::Int(i))
        } else if text.contains("..") {
            text.parse().map(Self::Range)
        } else {
            text.parse()
                .map(Self::Double)
                .map_err(|_| ParameterTextError(s.to_owned()))
        }
    }
}

/// Types storable in a [`ParameterStore`].
///
/// [`ParameterStore`]: crate::parameters::ParameterStore
pub trait ParameterType: Copy + fmt::Debug {
    const TYPE_NAME: &'static str;

    /// Coerces a stored value into this type, if compatible.
    fn from_value(value: &ParameterValue) -> Option<Self>;

    fn into_value(self) -> ParameterValue;
}

impl ParameterType for f64 {
    const TYPE_NAME: &'static str = "double";

    fn from_value(value: &ParameterValue) -> Option<f64> {
        match *value {
            ParameterValue::Double(d) => Some(d),
            ParameterValue::Int(i) => Some(i as f64),
            _ => None,
        }
    }

    fn into_value(self) -> ParameterValue {
        ParameterValue::Double(self)
    }
}

impl ParameterType for i64 {
    const TYPE_NAME: &'static str = "int";

    fn from_value(value: &ParameterValue) -> Option<i64> {
        match *value {
            ParameterValue::Int(i) => Some(i),
            ParameterValue::Double(d) if d.is_finite() && d.fract() == 0.0 => Some(d as i64),
            _ => None,
        }
    }

    fn into_value(self) -> ParameterValue {
        ParameterValue::Int(self)
    }
}

impl ParameterType for bool {
    const TYPE_NAME: &'static str = "bool";

    fn from_value(value: &ParameterValue) -> Option<bool> {
        match *value {
            ParameterValue::Bool(b) => Some(b),
            ParameterValue::Int(0) => Some(false),
            ParameterValue::Int(1) => Some(true),
            _ => None,
        }
    }

    fn into_value(self) -> ParameterValue {
        ParameterValue::Bool(self)
    }
}

impl ParameterType for NumericRange {
    const TYPE_NAME: &'static str = "range";

    fn from_value(value: &ParameterValue) -> Option<NumericRange> {
        match *value {
            ParameterValue::Range(r) => Some(r),
            _ => None,
        }
    }

    fn into_value(self) -> ParameterValue {
        ParameterValue::Range(self)
    }
}
