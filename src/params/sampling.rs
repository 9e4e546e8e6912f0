//! Quasi-random sampling of parameter spaces.

use super::sobol::SobolSequence;
use super::{ParamValue, ParameterSpace, ParameterSpec, SampledConfiguration, SpecKind};
use crate::error::Result;

/// Draws `n_samples` concrete configurations from a parameter space.
///
/// The Sobol dimension equals the count of *all* declared parameters,
/// fixed ones included, so the point layout stays stable when a parameter
/// switches between fixed and varying. Varying parameters consume the
/// leading coordinates in declaration order; fixed parameters are copied
/// verbatim into every configuration.
///
/// # Errors
///
/// Returns an error if the space declares more parameters than the
/// sequence generator supports.
///
/// # Examples
///
/// ```
/// use estabilidad::params::{sample, ParameterSpace, ParameterSpec};
///
/// let space = ParameterSpace::new()
///     .with("n_components", ParameterSpec::int_range(2, 2).expect("valid range"))
///     .expect("unique name");
///
/// for config in sample(&space, 3).expect("sampling succeeds") {
///     assert_eq!(config.get_int("n_components"), Some(2));
/// }
/// ```
pub fn sample(space: &ParameterSpace, n_samples: usize) -> Result<Vec<SampledConfiguration>> {
    let sequence = SobolSequence::new(space.len())?;
    let points = sequence.generate(n_samples);

    let varying: Vec<(&str, &ParameterSpec)> =
        space.iter().filter(|(_, spec)| !spec.is_fixed()).collect();
    let fixed: Vec<(&str, &ParameterSpec)> =
        space.iter().filter(|(_, spec)| spec.is_fixed()).collect();

    let mut configurations = Vec::with_capacity(n_samples);
    for point in points {
        let mut config = SampledConfiguration::new();
        for (i, (name, spec)) in varying.iter().enumerate() {
            config.push(*name, value_from_coordinate(spec, point[i]));
        }
        for (name, spec) in &fixed {
            if let SpecKind::Fixed(value) = spec.kind() {
                config.push(*name, value.clone());
            }
        }
        configurations.push(config);
    }

    Ok(configurations)
}

/// Maps one unit-interval coordinate onto a parameter's value domain.
fn value_from_coordinate(spec: &ParameterSpec, x: f64) -> ParamValue {
    match spec.kind() {
        SpecKind::Fixed(value) => value.clone(),
        SpecKind::IntRange { min, max } => {
            let value = *min as f64 + (*max - *min) as f64 * x;
            ParamValue::Int(value as i64)
        }
        SpecKind::FloatRange { min, max } => ParamValue::Float(min + (max - min) * x),
        SpecKind::List(values) => {
            let idx = ((x * values.len() as f64).floor() as usize).min(values.len() - 1);
            values[idx].clone()
        }
    }
}
