//! Pairwise comparison of runs, per topic and per measure.

use crate::error::Result;
use crate::primitives::Matrix;
use crate::similarity::{
    jaccard_index, jensen_shannon_similarity, kendall_tau, pairwise_upper, spearman_rho,
    wasserstein_similarity,
};
use crate::stability::context::RunGroup;
use crate::stability::ranking::{RankVector, TopicTermList};

/// The five `[n_topics][n_pairs]` similarity arrays for one run-group.
///
/// Pairs follow upper-triangle row order, so every measure's row `t` holds
/// `N*(N-1)/2` values for topic `t` in the same pair order.
#[derive(Debug, Clone)]
pub struct TopicMeasures {
    pub(crate) jaccard: Vec<Vec<f64>>,
    pub(crate) kendall_tau: Vec<Vec<f64>>,
    pub(crate) spearman: Vec<Vec<f64>>,
    pub(crate) jensen_shannon: Vec<Vec<f64>>,
    pub(crate) wasserstein: Vec<Vec<f64>>,
}

impl TopicMeasures {
    /// Number of topics covered.
    #[must_use]
    pub fn n_topics(&self) -> usize {
        self.jaccard.len()
    }
}

/// Compares all unordered run pairs of a group, topic by topic.
///
/// `terms` and `rankings` are the group's extracted top-term lists and
/// rank vectors (`[run][topic]`). Term-set overlap and rank correlations
/// read those; the distribution distances read each topic's full weight
/// row normalized to sum 1 over the entire feature space.
///
/// # Errors
///
/// Returns an error if the group has fewer than two runs, runs disagree
/// on shape, or any distribution is degenerate.
pub fn compare_runs(
    group: &RunGroup,
    terms: &[Vec<TopicTermList>],
    rankings: &[Vec<RankVector>],
) -> Result<TopicMeasures> {
    let (n_topics, _) = group.consistent_shape()?;

    // Full-vocabulary term distributions, one matrix per run.
    let distributions: Vec<Matrix<f64>> = group
        .artifacts()
        .iter()
        .map(|artifact| artifact.topic_term_weights().normalized_rows())
        .collect();

    let mut jaccard = Vec::with_capacity(n_topics);
    let mut kendall = Vec::with_capacity(n_topics);
    let mut spearman = Vec::with_capacity(n_topics);
    let mut jensen = Vec::with_capacity(n_topics);
    let mut wasserstein = Vec::with_capacity(n_topics);

    for topic in 0..n_topics {
        let topic_terms: Vec<&[usize]> = terms.iter().map(|run| run[topic].as_slice()).collect();
        jaccard.push(pairwise_upper(&topic_terms, |a, b| {
            Ok(jaccard_index(a, b))
        })?);

        let topic_ranks: Vec<&[f64]> = rankings.iter().map(|run| run[topic].as_slice()).collect();
        kendall.push(pairwise_upper(&topic_ranks, |a, b| kendall_tau(a, b))?);
        spearman.push(pairwise_upper(&topic_ranks, |a, b| spearman_rho(a, b))?);

        let topic_dists: Vec<&[f64]> = distributions
            .iter()
            .map(|run| run.row_slice(topic))
            .collect();
        jensen.push(pairwise_upper(&topic_dists, |a, b| {
            jensen_shannon_similarity(a, b)
        })?);
        wasserstein.push(pairwise_upper(&topic_dists, |a, b| {
            wasserstein_similarity(a, b)
        })?);
    }

    Ok(TopicMeasures {
        jaccard,
        kendall_tau: kendall,
        spearman,
        jensen_shannon: jensen,
        wasserstein,
    })
}
