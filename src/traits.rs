//! Core traits for trainable topic-model families.
//!
//! These traits define the capability seam between the stability pipeline
//! and the model families it evaluates: a family turns (data,
//! configuration, seed) into an opaque trained artifact, and an artifact
//! exposes per-topic term weights. The orchestrator and similarity engine
//! are written against these traits, never against concrete families.

use crate::error::Result;
use crate::params::SampledConfiguration;
use crate::primitives::Matrix;

/// A trainable topic-model family (LDA-like, NMF-like, ...).
///
/// The contract mirrors what the stability analysis needs and nothing
/// more: the same configuration must always produce the same topic and
/// feature counts, while the artifact itself varies with `seed`. The
/// orchestrator supplies a distinct seed per run so repeated runs of one
/// configuration explore the fit procedure's own randomness.
///
/// # Examples
///
/// ```
/// use estabilidad::models::LatentDirichletAllocation;
/// use estabilidad::params::sample;
/// use estabilidad::primitives::Matrix;
/// use estabilidad::traits::{TopicModel, TrainedTopicModel};
///
/// let dtm = Matrix::from_vec(3, 4, vec![
///     2.0, 1.0, 0.0, 0.0,
///     0.0, 0.0, 2.0, 1.0,
///     1.0, 0.0, 0.0, 2.0,
/// ]).expect("valid shape");
///
/// let family = LatentDirichletAllocation::new();
/// let space = LatentDirichletAllocation::simple_space();
/// let config = &sample(&space, 1).expect("sampling succeeds")[0];
/// let artifact = family.fit(&dtm, config, 42).expect("fit succeeds");
/// assert!(artifact.n_topics() >= 1);
/// ```
pub trait TopicModel: std::fmt::Debug {
    /// Fits one model run.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid for this family or
    /// the data cannot be fitted.
    fn fit(
        &self,
        data: &Matrix<f64>,
        config: &SampledConfiguration,
        seed: u64,
    ) -> Result<Box<dyn TrainedTopicModel>>;
}

/// One trained topic-model run.
///
/// Implementations expose the trained topic-term weights; everything the
/// stability pipeline derives (top terms, rank vectors, distributions)
/// comes from this matrix.
pub trait TrainedTopicModel: std::fmt::Debug {
    /// Number of topics in this run.
    fn n_topics(&self) -> usize;

    /// Topic-term weight matrix, `n_topics x n_features`, non-negative.
    fn topic_term_weights(&self) -> &Matrix<f64>;
}
