//! Top-term extraction and rank-vector construction.
//!
//! Topic indices are only meaningful *within* one trained run. To compare
//! "topic 3 of run A" with "topic 3 of run B", every run's top terms are
//! projected onto one shared vocabulary per configuration, giving each
//! topic a fixed-length rank vector: the term's position in that run's
//! top-term list, or the vocabulary size as an absence sentinel.
//!
//! This leans on the assumption that runs of one configuration assign
//! topic indices in a roughly stable order. That is a known weakness of
//! the approach, not a guarantee; a robust alternative would solve an
//! explicit topic-matching problem between runs before comparing.

use std::collections::{BTreeSet, HashMap};

use crate::traits::TrainedTopicModel;

/// Top-K feature indices of one topic of one run, descending by weight.
pub type TopicTermList = Vec<usize>;

/// Fixed-length rank positions over a shared vocabulary.
pub type RankVector = Vec<f64>;

/// Extracts the top-`k` feature indices per topic, descending by weight.
///
/// Ties keep the model's native feature order (stable sort). A `k` larger
/// than the feature count returns all features in weight order.
#[must_use]
pub fn top_terms(artifact: &dyn TrainedTopicModel, k: usize) -> Vec<TopicTermList> {
    let weights = artifact.topic_term_weights();
    let n_features = weights.n_cols();

    (0..weights.n_rows())
        .map(|topic| {
            let row = weights.row_slice(topic);
            let mut indices: Vec<usize> = (0..n_features).collect();
            indices.sort_by(|&i, &j| {
                row[j]
                    .partial_cmp(&row[i])
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
            indices.truncate(k);
            indices
        })
        .collect()
}

/// Unions every feature index appearing in any run's top-term lists.
///
/// One vocabulary per configuration, shared by all topics, kept in sorted
/// index order so downstream results are deterministic.
#[must_use]
pub fn group_vocabulary(terms: &[Vec<TopicTermList>]) -> Vec<usize> {
    let mut vocabulary = BTreeSet::new();
    for run in terms {
        for topic in run {
            vocabulary.extend(topic.iter().copied());
        }
    }
    vocabulary.into_iter().collect()
}

/// Builds one rank vector per (run, topic) over a shared vocabulary.
///
/// Each vector has exactly `vocabulary.len()` entries: the 0-based
/// position of the vocabulary element in that topic's term list, or
/// `vocabulary.len()` when absent.
#[must_use]
pub fn rank_vectors(terms: &[Vec<TopicTermList>], vocabulary: &[usize]) -> Vec<Vec<RankVector>> {
    let absent = vocabulary.len() as f64;

    terms
        .iter()
        .map(|run| {
            run.iter()
                .map(|topic| {
                    let positions: HashMap<usize, usize> = topic
                        .iter()
                        .enumerate()
                        .map(|(pos, &term)| (term, pos))
                        .collect();
                    vocabulary
                        .iter()
                        .map(|term| positions.get(term).map_or(absent, |&pos| pos as f64))
                        .collect()
                })
                .collect()
        })
        .collect()
}

/// Convenience wrapper: vocabulary plus rank vectors in one call.
#[must_use]
pub fn build_vocabulary_and_rankings(
    terms: &[Vec<TopicTermList>],
) -> (Vec<usize>, Vec<Vec<RankVector>>) {
    let vocabulary = group_vocabulary(terms);
    let rankings = rank_vectors(terms, &vocabulary);
    (vocabulary, rankings)
}

#[cfg(test)]
#[path = "ranking_tests.rs"]
mod tests;
