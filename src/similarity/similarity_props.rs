//! Property tests for the agreement measures.
//!
//! Checks the metric-space axioms the unit tests only spot-check:
//! symmetry, self-similarity, and value ranges, over randomized inputs.

use super::*;
use proptest::prelude::*;

fn index_list() -> impl Strategy<Value = Vec<usize>> {
    proptest::collection::vec(0usize..50, 1..20)
}

fn weight_vector() -> impl Strategy<Value = Vec<f64>> {
    // At least one strictly positive weight so normalization is defined.
    proptest::collection::vec(0.0f64..10.0, 2..20)
        .prop_filter("needs positive mass", |v| v.iter().sum::<f64>() > 1e-6)
}

fn rank_pair() -> impl Strategy<Value = (Vec<f64>, Vec<f64>)> {
    (2usize..15).prop_flat_map(|len| {
        (
            proptest::collection::vec(0.0f64..20.0, len),
            proptest::collection::vec(0.0f64..20.0, len),
        )
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn prop_jaccard_in_unit_interval(a in index_list(), b in index_list()) {
        let sim = jaccard_index(&a, &b);
        prop_assert!((0.0..=1.0).contains(&sim));
    }

    #[test]
    fn prop_jaccard_symmetric(a in index_list(), b in index_list()) {
        prop_assert!((jaccard_index(&a, &b) - jaccard_index(&b, &a)).abs() < 1e-12);
    }

    #[test]
    fn prop_jaccard_self_is_one(a in index_list()) {
        prop_assert!((jaccard_index(&a, &a) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn prop_kendall_in_range((a, b) in rank_pair()) {
        let tau = kendall_tau(&a, &b).expect("paired input");
        prop_assert!(tau.is_nan() || (-1.0..=1.0).contains(&tau));
    }

    #[test]
    fn prop_kendall_symmetric((a, b) in rank_pair()) {
        let ab = kendall_tau(&a, &b).expect("paired input");
        let ba = kendall_tau(&b, &a).expect("paired input");
        prop_assert!((ab.is_nan() && ba.is_nan()) || (ab - ba).abs() < 1e-12);
    }

    #[test]
    fn prop_spearman_in_range((a, b) in rank_pair()) {
        let rho = spearman_rho(&a, &b).expect("paired input");
        prop_assert!(rho.is_nan() || (-1.0 - 1e-12..=1.0 + 1e-12).contains(&rho));
    }

    #[test]
    fn prop_jensen_shannon_in_unit_interval(p in weight_vector()) {
        let q: Vec<f64> = p.iter().rev().copied().collect();
        let sim = jensen_shannon_similarity(&p, &q).expect("valid weights");
        prop_assert!((-1e-12..=1.0 + 1e-12).contains(&sim));
    }

    #[test]
    fn prop_jensen_shannon_self_is_one(p in weight_vector()) {
        let sim = jensen_shannon_similarity(&p, &p).expect("valid weights");
        prop_assert!((sim - 1.0).abs() < 1e-9);
    }

    #[test]
    fn prop_wasserstein_self_is_one(p in weight_vector()) {
        let sim = wasserstein_similarity(&p, &p).expect("non-empty");
        prop_assert!((sim - 1.0).abs() < 1e-9);
    }

    #[test]
    fn prop_wasserstein_symmetric(p in weight_vector(), q in weight_vector()) {
        let pq = wasserstein_similarity(&p, &q).expect("non-empty");
        let qp = wasserstein_similarity(&q, &p).expect("non-empty");
        prop_assert!((pq - qp).abs() < 1e-9);
    }
}
