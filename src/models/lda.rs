//! Latent Dirichlet Allocation model family.
//!
//! LDA discovers latent topics in a collection of documents by modeling:
//! - Each document as a mixture of topics
//! - Each topic as a distribution over terms
//!
//! Fitting uses a simplified EM-style update with Dirichlet smoothing of
//! the document-topic counts. Each run's initialization noise comes from
//! the seed supplied by the orchestrator, so repeated runs of one
//! configuration differ only in that randomness.

use crate::error::{EstabilidadError, Result};
use crate::params::{ParameterSpace, ParameterSpec, SampledConfiguration};
use crate::primitives::Matrix;
use crate::traits::{TopicModel, TrainedTopicModel};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{normalize_rows, require_n_components};

/// Latent Dirichlet Allocation family.
///
/// Honors configuration keys `n_components` (required), `doc_topic_prior`
/// and `max_iter` (optional, defaulting to the builder values). Unknown
/// keys are ignored.
///
/// # Examples
///
/// ```
/// use estabilidad::models::LatentDirichletAllocation;
/// use estabilidad::params::sample;
/// use estabilidad::primitives::Matrix;
/// use estabilidad::traits::{TopicModel, TrainedTopicModel};
///
/// let dtm = Matrix::from_vec(3, 5, vec![
///     2.0, 1.0, 0.0, 0.0, 0.0,
///     0.0, 0.0, 2.0, 1.0, 0.0,
///     1.0, 0.0, 0.0, 1.0, 2.0,
/// ]).expect("valid shape");
///
/// let family = LatentDirichletAllocation::new();
/// let space = LatentDirichletAllocation::simple_space();
/// let config = &sample(&space, 1).expect("sampling succeeds")[0];
/// let run = family.fit(&dtm, config, 42).expect("fit succeeds");
/// assert_eq!(run.topic_term_weights().n_cols(), 5);
/// ```
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct LatentDirichletAllocation {
    /// EM iterations when the configuration does not override `max_iter`.
    max_iter: usize,
    /// Document-topic smoothing when not overridden by `doc_topic_prior`.
    doc_topic_prior: f64,
}

impl Default for LatentDirichletAllocation {
    fn default() -> Self {
        Self::new()
    }
}

impl LatentDirichletAllocation {
    /// Creates the family with default knobs (30 iterations, prior 0.1).
    #[must_use]
    pub fn new() -> Self {
        Self {
            max_iter: 30,
            doc_topic_prior: 0.1,
        }
    }

    /// Sets the default iteration count.
    #[must_use]
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Sets the default document-topic smoothing.
    #[must_use]
    pub fn with_doc_topic_prior(mut self, prior: f64) -> Self {
        self.doc_topic_prior = prior;
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
    /// document-topic view of a single run is wanted.
    ///
    /// # Errors
    ///
    /// Returns an error on an empty matrix or a missing/invalid
    /// `n_components`.
    pub fn fit_once(
        &self,
        data: &Matrix<f64>,
        config: &SampledConfiguration,
        seed: u64,
    ) -> Result<FittedLda> {
        let n_docs = data.n_rows();
        let n_terms = data.n_cols();
        if n_docs == 0 || n_terms == 0 {
            return Err(EstabilidadError::FitFailure {
                family: "lda".to_string(),
                message: "document-term matrix cannot be empty".to_string(),
            });
        }

        let n_topics = require_n_components(config)?;
        let max_iter = config
            .get_int("max_iter")
            .map_or(self.max_iter, |v| v.max(1) as usize);
        let alpha = config
            .get_float("doc_topic_prior")
            .unwrap_or(self.doc_topic_prior);

        let mut rng = StdRng::seed_from_u64(seed);

        // Initialize with uniform + small random noise.
        let doc_topic_init = 1.0 / n_topics as f64;
        let topic_term_init = 1.0 / n_terms as f64;
        let mut doc_topic: Vec<f64> = (0..n_docs * n_topics)
            .map(|_| doc_topic_init + rng.gen::<f64>() * 0.01)
            .collect();
        let mut topic_term: Vec<f64> = (0..n_topics * n_terms)
            .map(|_| topic_term_init + rng.gen::<f64>() * 0.01)
            .collect();
        normalize_rows(&mut doc_topic, n_docs, n_topics);
        normalize_rows(&mut topic_term, n_topics, n_terms);

        for _ in 0..max_iter {
            // E-step: expected topic assignments per (document, term).
            let mut new_doc_topic = vec![0.0; n_docs * n_topics];
            let mut new_topic_term = vec![0.0; n_topics * n_terms];

            for d in 0..n_docs {
                for v in 0..n_terms {
                    let count = data.get(d, v);
                    if count <= 0.0 {
                        continue;
                    }
                    let mut topic_probs = vec![0.0; n_topics];
                    let mut sum = 0.0;
                    for k in 0..n_topics {
                        let p = doc_topic[d * n_topics + k] * topic_term[k * n_terms + v];
                        topic_probs[k] = p;
                        sum += p;
                    }
                    if sum > 1e-10 {
                        for k in 0..n_topics {
                            let prob = topic_probs[k] / sum;
                            new_doc_topic[d * n_topics + k] += count * prob;
                            new_topic_term[k * n_terms + v] += count * prob;
                        }
                    }
                }
            }

            // M-step: Dirichlet-smooth document-topic counts, renormalize.
            for cell in &mut new_doc_topic {
                *cell += alpha;
            }
            normalize_rows(&mut new_doc_topic, n_docs, n_topics);
            normalize_rows(&mut new_topic_term, n_topics, n_terms);

            doc_topic = new_doc_topic;
            topic_term = new_topic_term;
        }

        let doc_topic = Matrix::from_vec(n_docs, n_topics, doc_topic)
            .map_err(|e: &str| EstabilidadError::Other(e.to_string()))?;
        let topic_term = Matrix::from_vec(n_topics, n_terms, topic_term)
            .map_err(|e: &str| EstabilidadError::Other(e.to_string()))?;

        Ok(FittedLda {
            doc_topic,
            topic_term,
        })
    }

    /// Parameter space varying topic count and smoothing.
    #[must_use]
    pub fn complex_space() -> ParameterSpace {
        ParameterSpace::new()
            .with(
                "n_components",
                ParameterSpec::int_range(5, 50).expect("static bounds are valid"),
            )
            .expect("static names are unique")
            .with(
                "doc_topic_prior",
                ParameterSpec::float_range(0.1, 1.0).expect("static bounds are valid"),
            )
            .expect("static names are unique")
            .with("max_iter", ParameterSpec::fixed(30))
            .expect("static names are unique")
    }
}

impl TopicModel for LatentDirichletAllocation {
    fn fit(
        &self,
        data: &Matrix<f64>,
        config: &SampledConfiguration,
        seed: u64,
    ) -> Result<Box<dyn TrainedTopicModel>> {
        Ok(Box::new(self.fit_once(data, config, seed)?))
    }
}

/// One trained LDA run.
#[derive(Debug, Clone)]
pub struct FittedLda {
    doc_topic: Matrix<f64>,
    topic_term: Matrix<f64>,
}

impl FittedLda {
    /// Document-topic distribution, one row per document.
    #[must_use]
    pub fn document_topics(&self) -> &Matrix<f64> {
        &self.doc_topic
    }
}

impl TrainedTopicModel for FittedLda {
    fn n_topics(&self) -> usize {
        self.topic_term.n_rows()
    }

    fn topic_term_weights(&self) -> &Matrix<f64> {
        &self.topic_term
    }
}

#[cfg(test)]
#[path = "lda_tests.rs"]
mod tests;
