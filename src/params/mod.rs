//! Hyperparameter space description and quasi-random sampling.
//!
//! This module turns an abstract parameter-space description into concrete
//! hyperparameter configurations:
//! - [`ParameterSpec`]: one parameter (fixed, numeric range, or list)
//! - [`ParameterSpace`]: ordered mapping from name to spec
//! - [`SampledConfiguration`]: one concrete name/value assignment
//! - [`SobolSequence`]: low-discrepancy point generator
//! - [`sample`]: draws configurations from a space
//!
//! # Quick Start
//!
//! ```
//! use estabilidad::params::{sample, ParameterSpace, ParameterSpec};
//!
//! let space = ParameterSpace::new()
//!     .with("n_components", ParameterSpec::int_range(5, 50).expect("valid range"))
//!     .expect("no duplicate names");
//!
//! let configs = sample(&space, 4).expect("small spaces sample fine");
//! assert_eq!(configs.len(), 4);
//! ```

mod sampling;
mod sobol;

pub use sampling::sample;
pub use sobol::SobolSequence;

use crate::error::{EstabilidadError, Result};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::fmt;

/// A concrete hyperparameter value.
///
/// # Examples
///
/// ```
/// use estabilidad::params::ParamValue;
///
/// let v = ParamValue::from(7);
/// assert_eq!(v.as_int(), Some(7));
/// assert_eq!(v.as_float(), Some(7.0));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Integer-typed value
    Int(i64),
    /// Float-typed value
    Float(f64),
    /// Categorical value
    Text(String),
}

impl ParamValue {
    /// Returns the integer value, if this is an `Int`.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ParamValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the numeric value; integers promote to float.
    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            ParamValue::Int(v) => Some(*v as f64),
            ParamValue::Float(v) => Some(*v),
            ParamValue::Text(_) => None,
        }
    }

    /// Returns the categorical value, if this is a `Text`.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ParamValue::Text(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Int(v) => write!(f, "{v}"),
            ParamValue::Float(v) => write!(f, "{v}"),
            ParamValue::Text(v) => write!(f, "{v}"),
        }
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Int(v)
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Float(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Text(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue::Text(v)
    }
}

/// How one hyperparameter varies across sampled configurations.
///
/// A spec is either held fixed, interpolated over a numeric range, or drawn
/// from an ordered list of discrete options. Invalid shapes (inverted
/// ranges, empty lists, non-finite bounds) are rejected at construction, so
/// every reachable spec can be sampled.
///
/// # Examples
///
/// ```
/// use estabilidad::params::ParameterSpec;
///
/// let spec = ParameterSpec::int_range(5, 50).expect("min <= max");
/// assert!(!spec.is_fixed());
///
/// assert!(ParameterSpec::int_range(50, 5).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterSpec {
    kind: SpecKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) enum SpecKind {
    Fixed(ParamValue),
    IntRange { min: i64, max: i64 },
    FloatRange { min: f64, max: f64 },
    List(Vec<ParamValue>),
}

impl ParameterSpec {
    /// A parameter held at one value for every sample.
    #[must_use]
    pub fn fixed(value: impl Into<ParamValue>) -> Self {
        Self {
            kind: SpecKind::Fixed(value.into()),
        }
    }

    /// An integer parameter interpolated over `[min, max]`.
    ///
    /// # Errors
    ///
    /// Returns an error if `min > max`.
    pub fn int_range(min: i64, max: i64) -> Result<Self> {
        if min > max {
            return Err(EstabilidadError::invalid_space(format!(
                "integer range min {min} > max {max}"
            )));
        }
        Ok(Self {
            kind: SpecKind::IntRange { min, max },
        })
    }

    /// A float parameter interpolated over `[min, max]`.
    ///
    /// # Errors
    ///
    /// Returns an error if `min > max` or either bound is not finite.
    pub fn float_range(min: f64, max: f64) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(EstabilidadError::invalid_space(format!(
                "float range bounds must be finite, got [{min}, {max}]"
            )));
        }
        if min > max {
            return Err(EstabilidadError::invalid_space(format!(
                "float range min {min} > max {max}"
            )));
        }
        Ok(Self {
            kind: SpecKind::FloatRange { min, max },
        })
    }

    /// A parameter drawn from an ordered list of discrete options.
    ///
    /// # Errors
    ///
    /// Returns an error if the list is empty.
    pub fn list(values: Vec<ParamValue>) -> Result<Self> {
        if values.is_empty() {
            return Err(EstabilidadError::invalid_space(
                "list-mode parameter needs at least one option",
            ));
        }
        Ok(Self {
            kind: SpecKind::List(values),
        })
    }

    /// True if this parameter never varies across samples.
    #[must_use]
    pub fn is_fixed(&self) -> bool {
        matches!(self.kind, SpecKind::Fixed(_))
    }

    pub(crate) fn kind(&self) -> &SpecKind {
        &self.kind
    }
}

/// Ordered mapping from parameter name to [`ParameterSpec`].
///
/// Declaration order is stable and assigns sampling dimensions, so the same
/// space always produces the same configurations.
///
/// # Examples
///
/// ```
/// use estabilidad::params::{ParameterSpace, ParameterSpec};
///
/// let space = ParameterSpace::new()
///     .with("n_components", ParameterSpec::int_range(2, 10).expect("valid range"))
///     .expect("unique name")
///     .with("max_iter", ParameterSpec::fixed(30))
///     .expect("unique name");
/// assert_eq!(space.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParameterSpace {
    params: Vec<(String, ParameterSpec)>,
}

impl ParameterSpace {
    /// Creates an empty space.
    #[must_use]
    pub fn new() -> Self {
        Self { params: Vec::new() }
    }

    /// Adds a parameter, consuming and returning the space.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is already present.
    pub fn with(mut self, name: impl Into<String>, spec: ParameterSpec) -> Result<Self> {
        self.insert(name, spec)?;
        Ok(self)
    }

    /// Adds a parameter in place.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is already present.
    pub fn insert(&mut self, name: impl Into<String>, spec: ParameterSpec) -> Result<()> {
        let name = name.into();
        if self.params.iter().any(|(n, _)| *n == name) {
            return Err(EstabilidadError::invalid_space(format!(
                "duplicate parameter name: {name}"
            )));
        }
        self.params.push((name, spec));
        Ok(())
    }

    /// Number of parameters (fixed ones included).
    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// True if the space declares no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Iterates parameters in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParameterSpec)> {
        self.params.iter().map(|(n, s)| (n.as_str(), s))
    }
}

/// One concrete hyperparameter assignment, produced per sample point.
///
/// Reused identically across all repeated runs of its sample. Serializes as
/// a JSON object so reports stay consumable as tabular records.
#[derive(Debug, Clone, PartialEq)]
pub struct SampledConfiguration {
    values: Vec<(String, ParamValue)>,
}

impl SampledConfiguration {
    pub(crate) fn new() -> Self {
        Self { values: Vec::new() }
    }

    pub(crate) fn push(&mut self, name: impl Into<String>, value: ParamValue) {
        self.values.push((name.into(), value));
    }

    /// Looks up a value by parameter name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Integer value of a parameter, if present and integer-typed.
    #[must_use]
    pub fn get_int(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(ParamValue::as_int)
    }

    /// Numeric value of a parameter; integers promote to float.
    #[must_use]
    pub fn get_float(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(ParamValue::as_float)
    }

    /// Categorical value of a parameter, if present and text-typed.
    #[must_use]
    pub fn get_text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(ParamValue::as_text)
    }

    /// Number of assigned parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if no parameters are assigned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates assignments in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.values.iter().map(|(n, v)| (n.as_str(), v))
    }
}

impl Serialize for SampledConfiguration {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, value) in &self.values {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl fmt::Display for SampledConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (name, value) in &self.values {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{name}={value}")?;
            first = false;
        }
        Ok(())
    }
}
