//! In-crate topic-model families.
//!
//! Both families implement the [`TopicModel`](crate::traits::TopicModel)
//! capability, so the stability pipeline treats them interchangeably:
//! - [`LatentDirichletAllocation`]: probabilistic topic mixtures
//! - [`NonNegativeMatrixFactorization`]: multiplicative-update NMF
//!
//! Each family ships `simple_space()` and `complex_space()` presets naming
//! only the parameters it honors; custom spaces can be registered instead.

mod lda;
mod nmf;

pub use lda::{FittedLda, LatentDirichletAllocation};
pub use nmf::{FittedNmf, NonNegativeMatrixFactorization};

use crate::error::{EstabilidadError, Result};
use crate::params::SampledConfiguration;

/// Normalizes each row of a row-major buffer to sum to 1.
///
/// Rows summing below `1e-10` are left untouched.
pub(crate) fn normalize_rows(data: &mut [f64], n_rows: usize, n_cols: usize) {
    for i in 0..n_rows {
        let row = &mut data[i * n_cols..(i + 1) * n_cols];
        let row_sum: f64 = row.iter().sum();
        if row_sum > 1e-10 {
            for val in row {
                *val /= row_sum;
            }
        }
    }
}

/// Reads the mandatory `n_components` key from a configuration.
pub(crate) fn require_n_components(config: &SampledConfiguration) -> Result<usize> {
    match config.get_int("n_components") {
        Some(v) if v >= 1 => Ok(v as usize),
        Some(v) => Err(EstabilidadError::InvalidHyperparameter {
            param: "n_components".to_string(),
            value: v.to_string(),
            constraint: ">= 1".to_string(),
        }),
        None => Err(EstabilidadError::InvalidHyperparameter {
            param: "n_components".to_string(),
            value: "missing".to_string(),
            constraint: "an integer >= 1".to_string(),
        }),
    }
}
