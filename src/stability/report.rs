//! Stability report types and aggregation.

use serde::Serialize;

use crate::params::SampledConfiguration;
use crate::stability::compare::TopicMeasures;

/// One of the five agreement measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Measure {
    /// Top-term set overlap
    Jaccard,
    /// Tie-corrected rank correlation
    KendallTau,
    /// Average-rank correlation
    Spearman,
    /// Distribution similarity, 1 - JS distance
    JensenShannon,
    /// Distribution similarity, 1 - W1 distance
    Wasserstein,
}

/// Per-topic mean/std/min/max of one measure, reduced over the pair axis.
///
/// All four vectors have one entry per topic. `std` is the population
/// standard deviation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeasureSummary {
    /// Per-topic mean across run pairs
    pub mean: Vec<f64>,
    /// Per-topic standard deviation across run pairs
    pub std: Vec<f64>,
    /// Per-topic minimum across run pairs
    pub min: Vec<f64>,
    /// Per-topic maximum across run pairs
    pub max: Vec<f64>,
}

impl MeasureSummary {
    fn from_topic_rows(rows: &[Vec<f64>]) -> Self {
        let mut mean = Vec::with_capacity(rows.len());
        let mut std = Vec::with_capacity(rows.len());
        let mut min = Vec::with_capacity(rows.len());
        let mut max = Vec::with_capacity(rows.len());

        for row in rows {
            let n = row.len() as f64;
            let m = row.iter().sum::<f64>() / n;
            let var = row.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / n;
            mean.push(m);
            std.push(var.sqrt());
            min.push(row.iter().copied().fold(f64::INFINITY, f64::min));
            max.push(row.iter().copied().fold(f64::NEG_INFINITY, f64::max));
        }

        Self {
            mean,
            std,
            min,
            max,
        }
    }
}

/// Scalar stability summary for one (family, sample) configuration.
///
/// Each measure field is the overall mean across all topics and all run
/// pairs. Serializes flat, so a list of reports is directly consumable as
/// tabular records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StabilityReport {
    /// Model family name
    pub model: String,
    /// Sample index within the family's configuration list
    pub sample_id: usize,
    /// Topic count of this configuration's runs
    pub n_topics: usize,
    /// Hyperparameters the runs were fitted with
    pub params: SampledConfiguration,
    /// Mean top-term set overlap
    pub jaccard: f64,
    /// Mean Kendall tau-b
    pub kendall_tau: f64,
    /// Mean Spearman rho
    pub spearman: f64,
    /// Mean Jensen-Shannon similarity
    pub jensen_shannon: f64,
    /// Mean Wasserstein similarity
    pub wasserstein: f64,
}

impl StabilityReport {
    /// Value of one measure by name.
    #[must_use]
    pub fn measure(&self, measure: Measure) -> f64 {
        match measure {
            Measure::Jaccard => self.jaccard,
            Measure::KendallTau => self.kendall_tau,
            Measure::Spearman => self.spearman,
            Measure::JensenShannon => self.jensen_shannon,
            Measure::Wasserstein => self.wasserstein,
        }
    }
}

/// Per-topic stability detail for one (family, sample) configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FullStabilityReport {
    /// Model family name
    pub model: String,
    /// Sample index within the family's configuration list
    pub sample_id: usize,
    /// Topic count of this configuration's runs
    pub n_topics: usize,
    /// Hyperparameters the runs were fitted with
    pub params: SampledConfiguration,
    /// Per-topic top-term overlap summary
    pub jaccard: MeasureSummary,
    /// Per-topic Kendall tau-b summary
    pub kendall_tau: MeasureSummary,
    /// Per-topic Spearman rho summary
    pub spearman: MeasureSummary,
    /// Per-topic Jensen-Shannon summary
    pub jensen_shannon: MeasureSummary,
    /// Per-topic Wasserstein summary
    pub wasserstein: MeasureSummary,
}

/// Weighted score selection for [`rank_models`].
///
/// The score blends the Jaccard mean with one rank measure and one
/// distribution measure: `(jaccard*w0 + rank*w1 + dist*w2) / (w0+w1+w2)`.
///
/// [`rank_models`]: crate::stability::StabilityAnalysis::rank_models
#[derive(Debug, Clone)]
pub struct RankingCriteria {
    /// Weights for (jaccard, rank measure, distribution measure)
    pub weights: [f64; 3],
    /// Which rank-correlation measure to blend
    pub rank_measure: Measure,
    /// Which distribution measure to blend
    pub distribution_measure: Measure,
}

impl Default for RankingCriteria {
    fn default() -> Self {
        Self {
            weights: [1.0, 1.0, 1.0],
            rank_measure: Measure::KendallTau,
            distribution_measure: Measure::JensenShannon,
        }
    }
}

impl RankingCriteria {
    /// The blended score a report is ranked by.
    #[must_use]
    pub fn score(&self, report: &StabilityReport) -> f64 {
        let [w_jaccard, w_rank, w_dist] = self.weights;
        let total = w_jaccard + w_rank + w_dist;
        (report.jaccard * w_jaccard
            + report.measure(self.rank_measure) * w_rank
            + report.measure(self.distribution_measure) * w_dist)
            / total
    }
}

/// Reduces a group's similarity arrays into both report flavors.
///
/// Pure aggregation: re-running it on the same arrays always produces
/// identical reports.
pub(crate) fn summarize(
    model: &str,
    sample_id: usize,
    n_topics: usize,
    params: &SampledConfiguration,
    measures: &TopicMeasures,
) -> (StabilityReport, FullStabilityReport) {
    let report = StabilityReport {
        model: model.to_string(),
        sample_id,
        n_topics,
        params: params.clone(),
        jaccard: overall_mean(&measures.jaccard),
        kendall_tau: overall_mean(&measures.kendall_tau),
        spearman: overall_mean(&measures.spearman),
        jensen_shannon: overall_mean(&measures.jensen_shannon),
        wasserstein: overall_mean(&measures.wasserstein),
    };

    let full = FullStabilityReport {
        model: model.to_string(),
        sample_id,
        n_topics,
        params: params.clone(),
        jaccard: MeasureSummary::from_topic_rows(&measures.jaccard),
        kendall_tau: MeasureSummary::from_topic_rows(&measures.kendall_tau),
        spearman: MeasureSummary::from_topic_rows(&measures.spearman),
        jensen_shannon: MeasureSummary::from_topic_rows(&measures.jensen_shannon),
        wasserstein: MeasureSummary::from_topic_rows(&measures.wasserstein),
    };

    (report, full)
}

fn overall_mean(rows: &[Vec<f64>]) -> f64 {
    let count: usize = rows.iter().map(Vec::len).sum();
    let sum: f64 = rows.iter().flatten().sum();
    sum / count as f64
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
