//! Per-family ownership of data, configurations, and fitted runs.

use crate::error::{EstabilidadError, Result};
use crate::params::{sample, ParameterSpace, SampledConfiguration};
use crate::primitives::Matrix;
use crate::stability::ranking::TopicTermList;
use crate::stability::report::{FullStabilityReport, StabilityReport};
use crate::traits::{TopicModel, TrainedTopicModel};

/// The repeated runs fitted for one sampled configuration.
///
/// Owns its artifacts exclusively; nothing outside the group ever mutates
/// them. `config_index` ties the group back to the configuration it was
/// fitted with, which keeps report keys meaningful even after a caller
/// re-fits and appends further groups.
#[derive(Debug)]
pub struct RunGroup {
    config_index: usize,
    artifacts: Vec<Box<dyn TrainedTopicModel>>,
}

impl RunGroup {
    pub(crate) fn new(config_index: usize) -> Self {
        Self {
            config_index,
            artifacts: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, artifact: Box<dyn TrainedTopicModel>) {
        self.artifacts.push(artifact);
    }

    /// Index of the configuration this group was fitted with.
    #[must_use]
    pub fn config_index(&self) -> usize {
        self.config_index
    }

    /// Number of runs in the group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    /// True if the group holds no runs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }

    /// The trained runs.
    #[must_use]
    pub fn artifacts(&self) -> &[Box<dyn TrainedTopicModel>] {
        &self.artifacts
    }

    /// Verifies every run agrees on topic and feature counts.
    ///
    /// The same configuration must always yield the same shape; a mismatch
    /// means the family broke its contract, and comparing such runs would
    /// silently misalign topics.
    ///
    /// # Errors
    ///
    /// Returns [`EstabilidadError::InsufficientRuns`] for groups with fewer
    /// than two runs and [`EstabilidadError::InconsistentRunGroup`] on a
    /// shape mismatch.
    pub fn consistent_shape(&self) -> Result<(usize, usize)> {
        if self.artifacts.len() < 2 {
            return Err(EstabilidadError::InsufficientRuns {
                found: self.artifacts.len(),
            });
        }

        let first = self.artifacts[0].topic_term_weights().shape();
        for artifact in &self.artifacts[1..] {
            let shape = artifact.topic_term_weights().shape();
            if shape != first {
                return Err(EstabilidadError::InconsistentRunGroup {
                    expected: format!("{} topics x {} features", first.0, first.1),
                    actual: format!("{} topics x {} features", shape.0, shape.1),
                });
            }
        }
        Ok(first)
    }
}

/// Everything owned on behalf of one registered model family.
///
/// Created at registration, populated by fitting, read by reporting.
/// Fitting appends; callers wanting a clean rebuild call
/// [`clear_runs`](Self::clear_runs) first.
#[derive(Debug)]
pub struct ModelFamilyContext {
    pub(crate) name: String,
    pub(crate) model: Box<dyn TopicModel>,
    pub(crate) data: Matrix<f64>,
    space: ParameterSpace,
    pub(crate) configurations: Vec<SampledConfiguration>,
    pub(crate) run_groups: Vec<RunGroup>,
    /// Per completed group: `[run][topic]` top-term lists.
    pub(crate) topic_terms: Vec<Vec<Vec<TopicTermList>>>,
    pub(crate) reports: Vec<StabilityReport>,
    pub(crate) full_reports: Vec<FullStabilityReport>,
}

impl ModelFamilyContext {
    pub(crate) fn new(
        name: String,
        model: Box<dyn TopicModel>,
        data: Matrix<f64>,
        space: ParameterSpace,
        n_samples: usize,
    ) -> Result<Self> {
        let configurations = sample(&space, n_samples)?;
        Ok(Self {
            name,
            model,
            data,
            space,
            configurations,
            run_groups: Vec::new(),
            topic_terms: Vec::new(),
            reports: Vec::new(),
            full_reports: Vec::new(),
        })
    }

    /// Family name used as the report key.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The document-feature matrix this family is fitted on.
    #[must_use]
    pub fn data(&self) -> &Matrix<f64> {
        &self.data
    }

    /// The declared parameter space.
    #[must_use]
    pub fn space(&self) -> &ParameterSpace {
        &self.space
    }

    /// The sampled configurations, one per sample index.
    #[must_use]
    pub fn configurations(&self) -> &[SampledConfiguration] {
        &self.configurations
    }

    /// The completed run-groups, in fit order.
    #[must_use]
    pub fn run_groups(&self) -> &[RunGroup] {
        &self.run_groups
    }

    /// Drops all fitted runs, extracted terms, and reports, keeping the
    /// data, space, and sampled configurations.
    pub fn clear_runs(&mut self) {
        self.run_groups.clear();
        self.topic_terms.clear();
        self.reports.clear();
        self.full_reports.clear();
    }
}
