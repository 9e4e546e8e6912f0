//! Non-negative matrix factorization model family.
//!
//! Approximates the document-term matrix V as W * H with non-negative
//! factors, using Lee-Seung multiplicative updates on the Frobenius
//! objective. Each topic is a row of H: a non-negative loading over the
//! feature vocabulary.

use crate::error::{EstabilidadError, Result};
use crate::params::{ParamValue, ParameterSpace, ParameterSpec, SampledConfiguration};
use crate::primitives::Matrix;
use crate::traits::{TopicModel, TrainedTopicModel};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::require_n_components;

const EPS: f64 = 1e-10;

/// Non-negative matrix factorization family.
///
/// Honors configuration keys `n_components` (required), `max_iter` and
/// `tol` (optional, defaulting to the builder values). Unknown keys are
/// ignored.
///
/// # Examples
///
/// ```
/// use estabilidad::models::NonNegativeMatrixFactorization;
/// use estabilidad::params::sample;
/// use estabilidad::primitives::Matrix;
/// use estabilidad::traits::{TopicModel, TrainedTopicModel};
///
/// let dtm = Matrix::from_vec(3, 4, vec![
///     1.0, 0.0, 2.0, 0.0,
///     0.0, 3.0, 0.0, 1.0,
///     2.0, 0.0, 1.0, 0.0,
/// ]).expect("valid shape");
///
/// let family = NonNegativeMatrixFactorization::new();
/// let space = NonNegativeMatrixFactorization::simple_space();
/// let config = &sample(&space, 1).expect("sampling succeeds")[0];
/// let run = family.fit(&dtm, config, 7).expect("fit succeeds");
/// assert_eq!(run.topic_term_weights().n_cols(), 4);
/// ```
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct NonNegativeMatrixFactorization {
    /// Update iterations when the configuration does not override `max_iter`.
    max_iter: usize,
    /// Relative-improvement stopping threshold when not overridden by `tol`.
    tol: f64,
}

impl Default for NonNegativeMatrixFactorization {
    fn default() -> Self {
        Self::new()
    }
}

impl NonNegativeMatrixFactorization {
    /// Creates the family with default knobs (200 iterations, tol 1e-4).
    #[must_use]
    pub fn new() -> Self {
        Self {
            max_iter: 200,
            tol: 1e-4,
        }
    }

    /// Sets the default iteration count.
    #[must_use]
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Sets the default stopping threshold.
    #[must_use]
    pub fn with_tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    /// Parameter space varying only the topic count.
    #[must_use]
    pub fn simple_space() -> ParameterSpace {
        ParameterSpace::new()
            .with(
                "n_components",
                ParameterSpec::int_range(5, 50).expect("static bounds are valid"),
            )
            .expect("static names are unique")
    }

    /// Fits one run, returning the concrete artifact.
    ///
    /// The [`TopicModel`] impl delegates here; call this directly when the
    /// document-loading view of a single run is wanted.
    ///
    /// # Errors
    ///
    /// Returns an error on an empty or negative matrix or a
    /// missing/invalid `n_components`.
    pub fn fit_once(
        &self,
        data: &Matrix<f64>,
        config: &SampledConfiguration,
        seed: u64,
    ) -> Result<FittedNmf> {
        let n_docs = data.n_rows();
        let n_terms = data.n_cols();
        if n_docs == 0 || n_terms == 0 {
            return Err(EstabilidadError::FitFailure {
                family: "nmf".to_string(),
                message: "document-term matrix cannot be empty".to_string(),
            });
        }
        if data.as_slice().iter().any(|&v| v < 0.0) {
            return Err(EstabilidadError::FitFailure {
                family: "nmf".to_string(),
                message: "document-term matrix must be non-negative".to_string(),
            });
        }

        let k = require_n_components(config)?;
        let max_iter = config
            .get_int("max_iter")
            .map_or(self.max_iter, |v| v.max(1) as usize);
        let tol = config.get_float("tol").unwrap_or(self.tol);

        let mut rng = StdRng::seed_from_u64(seed);

        // Random non-negative init scaled to the data magnitude.
        let mean = data.as_slice().iter().sum::<f64>() / (n_docs * n_terms) as f64;
        let scale = (mean / k as f64).max(EPS).sqrt();
        let mut w: Vec<f64> = (0..n_docs * k).map(|_| rng.gen::<f64>() * scale).collect();
        let mut h: Vec<f64> = (0..k * n_terms).map(|_| rng.gen::<f64>() * scale).collect();

        let mut prev_err = f64::INFINITY;
        for _ in 0..max_iter {
            // H <- H .* (W^T V) ./ (W^T W H)
            let wt_v = matmul_at_b(&w, data.as_slice(), n_docs, k, n_terms);
            let wt_w = matmul_at_b(&w, &w, n_docs, k, k);
            let wt_w_h = matmul(&wt_w, &h, k, k, n_terms);
            for i in 0..h.len() {
                h[i] *= wt_v[i] / (wt_w_h[i] + EPS);
            }

            // W <- W .* (V H^T) ./ (W H H^T)
            let v_ht = matmul_a_bt(data.as_slice(), &h, n_docs, n_terms, k);
            let h_ht = matmul_a_bt(&h, &h, k, n_terms, k);
            let w_h_ht = matmul(&w, &h_ht, n_docs, k, k);
            for i in 0..w.len() {
                w[i] *= v_ht[i] / (w_h_ht[i] + EPS);
            }

            let err = reconstruction_error(data.as_slice(), &w, &h, n_docs, k, n_terms);
            if prev_err.is_finite() && (prev_err - err).abs() / (prev_err + EPS) < tol {
                break;
            }
            prev_err = err;
        }

        let components = Matrix::from_vec(k, n_terms, h)
            .map_err(|e: &str| EstabilidadError::Other(e.to_string()))?;
        let weights = Matrix::from_vec(n_docs, k, w)
            .map_err(|e: &str| EstabilidadError::Other(e.to_string()))?;

        Ok(FittedNmf {
            weights,
            components,
        })
    }

    /// Parameter space varying topic count and iteration budget.
    #[must_use]
    pub fn complex_space() -> ParameterSpace {
        ParameterSpace::new()
            .with(
                "n_components",
                ParameterSpec::int_range(5, 50).expect("static bounds are valid"),
            )
            .expect("static names are unique")
            .with(
                "max_iter",
                ParameterSpec::list(vec![
                    ParamValue::Int(100),
                    ParamValue::Int(200),
                    ParamValue::Int(300),
                ])
                .expect("static list is non-empty"),
            )
            .expect("static names are unique")
            .with("tol", ParameterSpec::fixed(1e-4))
            .expect("static names are unique")
    }
}

impl TopicModel for NonNegativeMatrixFactorization {
    fn fit(
        &self,
        data: &Matrix<f64>,
        config: &SampledConfiguration,
        seed: u64,
    ) -> Result<Box<dyn TrainedTopicModel>> {
        Ok(Box::new(self.fit_once(data, config, seed)?))
    }
}

/// One trained NMF run.
#[derive(Debug, Clone)]
pub struct FittedNmf {
    weights: Matrix<f64>,
    components: Matrix<f64>,
}

impl FittedNmf {
    /// Document-topic loadings, one row per document.
    #[must_use]
    pub fn document_weights(&self) -> &Matrix<f64> {
        &self.weights
    }
}

impl TrainedTopicModel for FittedNmf {
    fn n_topics(&self) -> usize {
        self.components.n_rows()
    }

    fn topic_term_weights(&self) -> &Matrix<f64> {
        &self.components
    }
}

/// C = A * B for row-major buffers, A: m x n, B: n x p.
fn matmul(a: &[f64], b: &[f64], m: usize, n: usize, p: usize) -> Vec<f64> {
    let mut c = vec![0.0; m * p];
    for i in 0..m {
        for l in 0..n {
            let a_il = a[i * n + l];
            if a_il == 0.0 {
                continue;
            }
            for j in 0..p {
                c[i * p + j] += a_il * b[l * p + j];
            }
        }
    }
    c
}

/// C = A^T * B, A: m x n, B: m x p (result n x p).
fn matmul_at_b(a: &[f64], b: &[f64], m: usize, n: usize, p: usize) -> Vec<f64> {
    let mut c = vec![0.0; n * p];
    for l in 0..m {
        for i in 0..n {
            let a_li = a[l * n + i];
            if a_li == 0.0 {
                continue;
            }
            for j in 0..p {
                c[i * p + j] += a_li * b[l * p + j];
            }
        }
    }
    c
}

/// C = A * B^T, A: m x n, B: p x n (result m x p).
fn matmul_a_bt(a: &[f64], b: &[f64], m: usize, n: usize, p: usize) -> Vec<f64> {
    let mut c = vec![0.0; m * p];
    for i in 0..m {
        for j in 0..p {
            let mut sum = 0.0;
            for l in 0..n {
                sum += a[i * n + l] * b[j * n + l];
            }
            c[i * p + j] = sum;
        }
    }
    c
}

/// Frobenius norm of V - W * H.
fn reconstruction_error(v: &[f64], w: &[f64], h: &[f64], m: usize, k: usize, n: usize) -> f64 {
    let wh = matmul(w, h, m, k, n);
    v.iter()
        .zip(wh.iter())
        .map(|(a, b)| (a - b) * (a - b))
        .sum::<f64>()
        .sqrt()
}

#[cfg(test)]
#[path = "nmf_tests.rs"]
mod tests;
