//! Stability analysis across stochastic runs and sampled configurations.
//!
//! This module ties the pipeline together:
//! - [`StabilityAnalysis`]: family registry and `register -> fit_all ->
//!   report` lifecycle
//! - [`ModelFamilyContext`] / [`RunGroup`]: per-family ownership of data,
//!   configurations, and fitted runs
//! - [`top_terms`] / [`build_vocabulary_and_rankings`]: topic comparison
//!   machinery
//! - [`compare_runs`]: the five pairwise measures per topic
//! - [`StabilityReport`] / [`FullStabilityReport`]: aggregated results
//!
//! # Quick Start
//!
//! ```
//! use estabilidad::models::LatentDirichletAllocation;
//! use estabilidad::params::{ParameterSpace, ParameterSpec};
//! use estabilidad::primitives::Matrix;
//! use estabilidad::stability::{RankingCriteria, StabilityAnalysis};
//!
//! let dtm = Matrix::from_vec(3, 5, vec![
//!     2.0, 1.0, 0.0, 0.0, 0.0,
//!     0.0, 0.0, 2.0, 1.0, 0.0,
//!     1.0, 0.0, 0.0, 1.0, 2.0,
//! ]).expect("valid shape");
//!
//! let space = ParameterSpace::new()
//!     .with("n_components", ParameterSpec::int_range(2, 3).expect("valid range"))
//!     .expect("unique name");
//!
//! let mut analysis = StabilityAnalysis::new().with_n_runs(3).with_n_top_terms(3);
//! analysis
//!     .register("lda", Box::new(LatentDirichletAllocation::new()), dtm, space, 2)
//!     .expect("fresh name");
//! analysis.fit_all().expect("fitting succeeds");
//!
//! let ranked = analysis.rank_models(&RankingCriteria::default());
//! assert_eq!(ranked.len(), 2);
//! ```

mod compare;
mod context;
mod ranking;
mod report;

pub use compare::{compare_runs, TopicMeasures};
pub use context::{ModelFamilyContext, RunGroup};
pub use ranking::{
    build_vocabulary_and_rankings, group_vocabulary, rank_vectors, top_terms, RankVector,
    TopicTermList,
};
pub use report::{
    FullStabilityReport, Measure, MeasureSummary, RankingCriteria, StabilityReport,
};

use std::collections::BTreeSet;

use crate::error::{EstabilidadError, Result};
use crate::params::ParameterSpace;
use crate::primitives::Matrix;
use crate::traits::TopicModel;

/// Runs topic-model families repeatedly and ranks sampled configurations
/// by how consistently they reproduce the same topics.
///
/// Owns an explicit family registry with a `register -> fit_all -> report`
/// lifecycle; there is no process-wide state. Fitting is sequential: one
/// `fit` call per (configuration, run), each run seeded deterministically
/// from the base seed so a whole analysis is reproducible.
pub struct StabilityAnalysis {
    n_runs: usize,
    n_top_terms: usize,
    base_seed: u64,
    contexts: Vec<ModelFamilyContext>,
}

impl Default for StabilityAnalysis {
    fn default() -> Self {
        Self::new()
    }
}

impl StabilityAnalysis {
    /// Creates an analysis with default knobs: 10 runs per configuration,
    /// 20 top terms per topic.
    #[must_use]
    pub fn new() -> Self {
        Self {
            n_runs: 10,
            n_top_terms: 20,
            base_seed: 42,
            contexts: Vec::new(),
        }
    }

    /// Sets how many times each configuration is fitted.
    #[must_use]
    pub fn with_n_runs(mut self, n_runs: usize) -> Self {
        self.n_runs = n_runs;
        self
    }

    /// Sets how many top terms per topic enter the comparisons.
    #[must_use]
    pub fn with_n_top_terms(mut self, n_top_terms: usize) -> Self {
        self.n_top_terms = n_top_terms;
        self
    }

    /// Sets the base seed all per-run seeds derive from.
    #[must_use]
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.base_seed = seed;
        self
    }

    /// Registers a model family with its data and parameter space.
    ///
    /// Samples `n_samples` configurations immediately; fitting happens in
    /// [`fit_all`](Self::fit_all).
    ///
    /// # Errors
    ///
    /// Returns an error if the name is already registered or the space
    /// cannot be sampled.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        model: Box<dyn TopicModel>,
        data: Matrix<f64>,
        space: ParameterSpace,
        n_samples: usize,
    ) -> Result<()> {
        let name = name.into();
        if self.contexts.iter().any(|c| c.name == name) {
            return Err(EstabilidadError::Other(format!(
                "model family already registered: {name}"
            )));
        }
        self.contexts
            .push(ModelFamilyContext::new(name, model, data, space, n_samples)?);
        Ok(())
    }

    /// Registered family names, in registration order.
    #[must_use]
    pub fn families(&self) -> Vec<&str> {
        self.contexts.iter().map(|c| c.name()).collect()
    }

    /// Looks up one family's context.
    ///
    /// # Errors
    ///
    /// Returns [`EstabilidadError::UnknownFamily`] if the name was never
    /// registered.
    pub fn context(&self, family: &str) -> Result<&ModelFamilyContext> {
        self.contexts
            .iter()
            .find(|c| c.name() == family)
            .ok_or_else(|| EstabilidadError::UnknownFamily {
                name: family.to_string(),
            })
    }

    /// Fits every registered family and computes its stability reports.
    ///
    /// For each configuration, the family's `fit` runs exactly `n_runs`
    /// times with the configuration held fixed and a distinct per-run
    /// seed, then the group is compared and summarized before the next
    /// configuration starts. A fit error propagates immediately: the
    /// configuration in progress is abandoned, while every already
    /// completed configuration keeps its runs and reports.
    ///
    /// Re-invoking appends further run-groups and reports; call
    /// [`clear_runs`](Self::clear_runs) first for a clean rebuild.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than 2 runs or fewer than 1 top term are
    /// configured, or if any fit or comparison fails.
    pub fn fit_all(&mut self) -> Result<()> {
        self.validate_knobs()?;
        for i in 0..self.contexts.len() {
            fit_context(
                &mut self.contexts[i],
                self.n_runs,
                self.n_top_terms,
                self.base_seed,
            )?;
        }
        Ok(())
    }

    /// Fits a single registered family; see [`fit_all`](Self::fit_all).
    ///
    /// # Errors
    ///
    /// As for `fit_all`, plus [`EstabilidadError::UnknownFamily`].
    pub fn fit_family(&mut self, family: &str) -> Result<()> {
        self.validate_knobs()?;
        let ctx = self
            .contexts
            .iter_mut()
            .find(|c| c.name() == family)
            .ok_or_else(|| EstabilidadError::UnknownFamily {
                name: family.to_string(),
            })?;
        fit_context(ctx, self.n_runs, self.n_top_terms, self.base_seed)
    }

    /// Drops all fitted runs and reports for every family, keeping data,
    /// spaces, and sampled configurations.
    pub fn clear_runs(&mut self) {
        for ctx in &mut self.contexts {
            ctx.clear_runs();
        }
    }

    /// All scalar stability reports, in fit order.
    #[must_use]
    pub fn reports(&self) -> Vec<&StabilityReport> {
        self.contexts.iter().flat_map(|c| c.reports.iter()).collect()
    }

    /// All per-topic stability reports, in fit order.
    #[must_use]
    pub fn full_reports(&self) -> Vec<&FullStabilityReport> {
        self.contexts
            .iter()
            .flat_map(|c| c.full_reports.iter())
            .collect()
    }

    /// Ranks all reports descending by the blended stability score.
    ///
    /// Stable sort: configurations with equal scores keep fit order.
    #[must_use]
    pub fn rank_models(&self, criteria: &RankingCriteria) -> Vec<StabilityReport> {
        let mut ranked: Vec<StabilityReport> = self
            .contexts
            .iter()
            .flat_map(|c| c.reports.iter().cloned())
            .collect();
        ranked.sort_by(|a, b| {
            criteria
                .score(b)
                .partial_cmp(&criteria.score(a))
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked
    }

    /// Renders the ranked reports as a JSON array of flat records.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_records(&self, criteria: &RankingCriteria) -> Result<String> {
        serde_json::to_string(&self.rank_models(criteria))
            .map_err(|e| EstabilidadError::Serialization(e.to_string()))
    }

    /// Per-topic intersection of top terms across all runs of one group,
    /// resolved to feature names.
    ///
    /// The terms every run agrees on are the stable core of a topic; a
    /// large intersection means the configuration reproduces that topic
    /// faithfully. Terms are returned sorted by feature index.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown families, out-of-range group indices,
    /// or a feature-name list that does not match the data's feature
    /// count.
    pub fn intersecting_terms(
        &self,
        family: &str,
        sample_id: usize,
        feature_names: &[String],
    ) -> Result<Vec<Vec<String>>> {
        let ctx = self.context(family)?;
        let terms = ctx
            .topic_terms
            .get(sample_id)
            .ok_or(EstabilidadError::UnknownSample {
                index: sample_id,
                len: ctx.topic_terms.len(),
            })?;
        check_feature_names(feature_names, ctx.data.n_cols())?;

        let Some(first_run) = terms.first() else {
            return Ok(Vec::new());
        };

        let mut topics = Vec::with_capacity(first_run.len());
        for topic in 0..first_run.len() {
            let mut intersection: BTreeSet<usize> = first_run[topic].iter().copied().collect();
            for run in &terms[1..] {
                let run_set: BTreeSet<usize> = run[topic].iter().copied().collect();
                intersection = intersection.intersection(&run_set).copied().collect();
            }
            topics.push(
                intersection
                    .into_iter()
                    .map(|term| feature_names[term].clone())
                    .collect(),
            );
        }
        Ok(topics)
    }

    /// Top terms of every topic for one specific run, resolved to feature
    /// names.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown families, out-of-range group or run
    /// indices, or a mismatched feature-name list.
    pub fn run_topics(
        &self,
        family: &str,
        sample_id: usize,
        run: usize,
        feature_names: &[String],
        n_terms: usize,
    ) -> Result<Vec<Vec<String>>> {
        let ctx = self.context(family)?;
        let group = ctx
            .run_groups
            .get(sample_id)
            .ok_or(EstabilidadError::UnknownSample {
                index: sample_id,
                len: ctx.run_groups.len(),
            })?;
        let artifact = group.artifacts().get(run).ok_or_else(|| {
            EstabilidadError::Other(format!(
                "run index {run} out of range (0..{})",
                group.len()
            ))
        })?;
        check_feature_names(feature_names, ctx.data.n_cols())?;

        Ok(top_terms(artifact.as_ref(), n_terms)
            .into_iter()
            .map(|topic| {
                topic
                    .into_iter()
                    .map(|term| feature_names[term].clone())
                    .collect()
            })
            .collect())
    }

    fn validate_knobs(&self) -> Result<()> {
        if self.n_runs < 2 {
            return Err(EstabilidadError::InsufficientRuns { found: self.n_runs });
        }
        if self.n_top_terms == 0 {
            return Err(EstabilidadError::InvalidHyperparameter {
                param: "n_top_terms".to_string(),
                value: "0".to_string(),
                constraint: ">= 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Fits and evaluates every configuration of one family, in order.
fn fit_context(
    ctx: &mut ModelFamilyContext,
    n_runs: usize,
    n_top_terms: usize,
    base_seed: u64,
) -> Result<()> {
    for idx in 0..ctx.configurations.len() {
        let group_seq = ctx.run_groups.len() as u64;

        // Fit stage: n_runs independent artifacts for this configuration.
        let mut group = RunGroup::new(idx);
        for run in 0..n_runs {
            let seed = derive_seed(base_seed, group_seq, run as u64);
            let artifact = ctx.model.fit(&ctx.data, &ctx.configurations[idx], seed)?;
            group.push(artifact);
        }

        // Extract stage: top terms, shared vocabulary, rank vectors.
        let terms: Vec<Vec<TopicTermList>> = group
            .artifacts()
            .iter()
            .map(|artifact| top_terms(artifact.as_ref(), n_top_terms))
            .collect();
        let (_vocabulary, rankings) = build_vocabulary_and_rankings(&terms);

        // Compare and aggregate stages, completed before the next
        // configuration starts so earlier reports survive later failures.
        let measures = compare_runs(&group, &terms, &rankings)?;
        let (scalar, full) = report::summarize(
            ctx.name(),
            idx,
            measures.n_topics(),
            &ctx.configurations[idx],
            &measures,
        );

        ctx.run_groups.push(group);
        ctx.topic_terms.push(terms);
        ctx.reports.push(scalar);
        ctx.full_reports.push(full);
    }
    Ok(())
}

/// Splitmix-style seed mix so every (group, run) pair trains with its own
/// deterministic seed.
fn derive_seed(base: u64, group: u64, run: u64) -> u64 {
    let mut z = base
        ^ group.wrapping_mul(0x9E37_79B9_7F4A_7C15)
        ^ run.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

fn check_feature_names(feature_names: &[String], n_features: usize) -> Result<()> {
    if feature_names.len() != n_features {
        return Err(EstabilidadError::Other(format!(
            "feature name count {} must match feature count {}",
            feature_names.len(),
            n_features
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "stability_tests.rs"]
mod tests;
