pub(crate) use super::*;

use crate::primitives::Matrix;
use crate::traits::TrainedTopicModel;

#[derive(Debug)]
struct FixedArtifact {
    weights: Matrix<f64>,
}

impl FixedArtifact {
    fn new(n_topics: usize, n_features: usize, data: Vec<f64>) -> Self {
        Self {
            weights: Matrix::from_vec(n_topics, n_features, data).expect("valid shape"),
        }
    }
}

impl TrainedTopicModel for FixedArtifact {
    fn n_topics(&self) -> usize {
        self.weights.n_rows()
    }

    fn topic_term_weights(&self) -> &Matrix<f64> {
        &self.weights
    }
}

#[test]
fn test_top_terms_descending_by_weight() {
    let artifact = FixedArtifact::new(1, 4, vec![0.1, 0.5, 0.3, 0.1]);
    let terms = top_terms(&artifact, 3);
    assert_eq!(terms, vec![vec![1, 2, 0]]);
}

#[test]
fn test_top_terms_ties_keep_feature_order() {
    let artifact = FixedArtifact::new(1, 4, vec![0.25, 0.25, 0.25, 0.25]);
    let terms = top_terms(&artifact, 4);
    assert_eq!(terms, vec![vec![0, 1, 2, 3]]);
}

#[test]
fn test_top_terms_k_larger_than_features() {
    let artifact = FixedArtifact::new(1, 3, vec![0.2, 0.5, 0.3]);
    let terms = top_terms(&artifact, 10);
    assert_eq!(terms, vec![vec![1, 2, 0]]);
}

#[test]
fn test_top_terms_per_topic() {
    let artifact = FixedArtifact::new(2, 3, vec![0.7, 0.2, 0.1, 0.1, 0.2, 0.7]);
    let terms = top_terms(&artifact, 2);
    assert_eq!(terms, vec![vec![0, 1], vec![2, 1]]);
}

#[test]
fn test_group_vocabulary_sorted_union() {
    let terms = vec![
        vec![vec![7, 1], vec![3, 9]],
        vec![vec![1, 4], vec![9, 0]],
    ];
    let vocab = group_vocabulary(&terms);
    assert_eq!(vocab, vec![0, 1, 3, 4, 7, 9]);
}

#[test]
fn test_rank_vectors_fixed_length() {
    // Runs with different raw top-term sets still get vectors of exactly
    // vocabulary length.
    let terms = vec![vec![vec![7, 1]], vec![vec![4, 0]]];
    let vocab = group_vocabulary(&terms);
    assert_eq!(vocab, vec![0, 1, 4, 7]);

    let rankings = rank_vectors(&terms, &vocab);
    assert_eq!(rankings.len(), 2);
    for run in &rankings {
        for topic in run {
            assert_eq!(topic.len(), vocab.len());
        }
    }
}

#[test]
fn test_rank_vectors_positions_and_sentinel() {
    let terms = vec![vec![vec![7, 1]], vec![vec![4, 0]]];
    let vocab = group_vocabulary(&terms);
    let rankings = rank_vectors(&terms, &vocab);

    // Vocabulary order [0, 1, 4, 7]; sentinel = 4.
    // Run 0 topic 0 = [7, 1]: 0 absent, 1 at position 1, 4 absent, 7 at 0.
    assert_eq!(rankings[0][0], vec![4.0, 1.0, 4.0, 0.0]);
    // Run 1 topic 0 = [4, 0]: 0 at position 1, 1 absent, 4 at 0, 7 absent.
    assert_eq!(rankings[1][0], vec![1.0, 4.0, 0.0, 4.0]);
}

#[test]
fn test_rank_vectors_all_absent_entries_use_sentinel() {
    // Every vocabulary element missing from a topic's list gets exactly
    // the sentinel value, never anything else.
    let terms = vec![vec![vec![0, 1, 2]], vec![vec![3, 4, 5]]];
    let vocab = group_vocabulary(&terms);
    let sentinel = vocab.len() as f64;
    let rankings = rank_vectors(&terms, &vocab);

    let absent_in_run0: Vec<f64> = rankings[0][0]
        .iter()
        .copied()
        .filter(|&r| r == sentinel)
        .collect();
    assert_eq!(absent_in_run0.len(), 3);
}

#[test]
fn test_build_vocabulary_and_rankings_wrapper() {
    let terms = vec![vec![vec![2, 0]], vec![vec![0, 1]]];
    let (vocab, rankings) = build_vocabulary_and_rankings(&terms);
    assert_eq!(vocab, vec![0, 1, 2]);
    assert_eq!(rankings[0][0], vec![1.0, 3.0, 0.0]);
    assert_eq!(rankings[1][0], vec![0.0, 1.0, 3.0]);
}

#[test]
fn test_identical_runs_identical_rank_vectors() {
    let terms = vec![vec![vec![3, 7, 1]], vec![vec![3, 7, 1]]];
    let (_, rankings) = build_vocabulary_and_rankings(&terms);
    assert_eq!(rankings[0], rankings[1]);
}
