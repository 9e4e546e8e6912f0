pub(crate) use super::*;

#[test]
fn test_jaccard_identical_lists() {
    let sim = jaccard_index(&[3, 7, 1], &[3, 7, 1]);
    assert!((sim - 1.0).abs() < 1e-12);
}

#[test]
fn test_jaccard_disjoint_lists() {
    let sim = jaccard_index(&[1, 2, 3], &[4, 5, 6]);
    assert!(sim.abs() < 1e-12);
}

#[test]
fn test_jaccard_partial_overlap() {
    // 2 shared of 4 distinct elements.
    let sim = jaccard_index(&[0, 1, 2], &[0, 1, 3]);
    assert!((sim - 0.5).abs() < 1e-12);
}

#[test]
fn test_jaccard_order_discarded() {
    let sim = jaccard_index(&[3, 7, 1], &[1, 3, 7]);
    assert!((sim - 1.0).abs() < 1e-12);
}

#[test]
fn test_jaccard_symmetric() {
    let ab = jaccard_index(&[1, 2, 5], &[2, 5, 9]);
    let ba = jaccard_index(&[2, 5, 9], &[1, 2, 5]);
    assert!((ab - ba).abs() < 1e-12);
}

#[test]
fn test_jaccard_both_empty() {
    assert_eq!(jaccard_index(&[], &[]), 1.0);
}

#[test]
fn test_jaccard_one_empty() {
    assert_eq!(jaccard_index(&[1], &[]), 0.0);
}

#[test]
fn test_kendall_perfect_agreement() {
    let tau = kendall_tau(&[0.0, 1.0, 2.0, 3.0], &[0.0, 1.0, 2.0, 3.0]).expect("should succeed");
    assert!((tau - 1.0).abs() < 1e-12);
}

#[test]
fn test_kendall_perfect_disagreement() {
    let tau = kendall_tau(&[0.0, 1.0, 2.0, 3.0], &[3.0, 2.0, 1.0, 0.0]).expect("should succeed");
    assert!((tau + 1.0).abs() < 1e-12);
}

#[test]
fn test_kendall_with_ties() {
    // Sentinel-style ties: two entries share the "absent" value 4.
    let a = [0.0, 1.0, 4.0, 4.0];
    let b = [1.0, 0.0, 4.0, 4.0];
    let tau = kendall_tau(&a, &b).expect("should succeed");
    // Untied pairs: (0,1) discordant, (0,2),(0,3),(1,2),(1,3) concordant.
    // n0 = 6, one tied pair in each vector -> denom = sqrt(5 * 5) = 5.
    assert!((tau - (4.0 - 1.0) / 5.0).abs() < 1e-12);
}

#[test]
fn test_kendall_constant_vector_undefined() {
    let tau = kendall_tau(&[1.0, 1.0, 1.0], &[0.0, 1.0, 2.0]).expect("should succeed");
    assert!(tau.is_nan());
}

#[test]
fn test_kendall_length_mismatch() {
    assert!(kendall_tau(&[1.0, 2.0], &[1.0]).is_err());
}

#[test]
fn test_kendall_empty() {
    assert!(kendall_tau(&[], &[]).is_err());
}

#[test]
fn test_spearman_perfect_agreement() {
    let rho = spearman_rho(&[0.0, 1.0, 2.0], &[0.0, 1.0, 2.0]).expect("should succeed");
    assert!((rho - 1.0).abs() < 1e-12);
}

#[test]
fn test_spearman_perfect_disagreement() {
    let rho = spearman_rho(&[0.0, 1.0, 2.0], &[2.0, 1.0, 0.0]).expect("should succeed");
    assert!((rho + 1.0).abs() < 1e-12);
}

#[test]
fn test_spearman_monotone_transform_invariant() {
    // Rho depends only on ranks, so squaring a positive vector changes
    // nothing.
    let a = [1.0, 2.0, 3.0, 4.0];
    let squared = [1.0, 4.0, 9.0, 16.0];
    let b = [2.0, 1.0, 4.0, 3.0];
    let direct = spearman_rho(&a, &b).expect("should succeed");
    let transformed = spearman_rho(&squared, &b).expect("should succeed");
    assert!((direct - transformed).abs() < 1e-12);
}

#[test]
fn test_spearman_with_ties() {
    // Average ranks: [1, 2, 3.5, 3.5] vs [1, 2.5, 2.5, 4]; their Pearson
    // correlation is 3.75 / 4.5 = 5/6.
    let rho = spearman_rho(&[1.0, 2.0, 3.0, 3.0], &[1.0, 2.0, 2.0, 3.0]).expect("should succeed");
    assert!((rho - 5.0 / 6.0).abs() < 1e-12);
}

#[test]
fn test_spearman_constant_vector_undefined() {
    let rho = spearman_rho(&[2.0, 2.0, 2.0], &[0.0, 1.0, 2.0]).expect("should succeed");
    assert!(rho.is_nan());
}

#[test]
fn test_jensen_shannon_identical() {
    let p = [0.1, 0.4, 0.5];
    let sim = jensen_shannon_similarity(&p, &p).expect("should succeed");
    assert!((sim - 1.0).abs() < 1e-12);
}

#[test]
fn test_jensen_shannon_disjoint_supports() {
    let p = [1.0, 0.0];
    let q = [0.0, 1.0];
    let sim = jensen_shannon_similarity(&p, &q).expect("should succeed");
    assert!(sim.abs() < 1e-12);
}

#[test]
fn test_jensen_shannon_symmetric() {
    let p = [0.7, 0.2, 0.1];
    let q = [0.2, 0.3, 0.5];
    let pq = jensen_shannon_similarity(&p, &q).expect("should succeed");
    let qp = jensen_shannon_similarity(&q, &p).expect("should succeed");
    assert!((pq - qp).abs() < 1e-12);
}

#[test]
fn test_jensen_shannon_normalizes_inputs() {
    // Unnormalized weights give the same answer as their normalization.
    let raw = [2.0, 8.0];
    let normalized = [0.2, 0.8];
    let other = [0.5, 0.5];
    let a = jensen_shannon_similarity(&raw, &other).expect("should succeed");
    let b = jensen_shannon_similarity(&normalized, &other).expect("should succeed");
    assert!((a - b).abs() < 1e-12);
}

#[test]
fn test_jensen_shannon_rejects_negative() {
    assert!(jensen_shannon_similarity(&[0.5, -0.5], &[0.5, 0.5]).is_err());
}

#[test]
fn test_jensen_shannon_rejects_all_zero() {
    assert!(jensen_shannon_similarity(&[0.0, 0.0], &[0.5, 0.5]).is_err());
}

#[test]
fn test_wasserstein_identical() {
    let p = [0.2, 0.3, 0.5];
    let sim = wasserstein_similarity(&p, &p).expect("should succeed");
    assert!((sim - 1.0).abs() < 1e-12);
}

#[test]
fn test_wasserstein_known_distance() {
    // Samples {0} vs {1}: the CDFs differ by 1 over an interval of
    // length 1, so W1 = 1 and similarity = 0.
    let sim = wasserstein_similarity(&[0.0], &[1.0]).expect("should succeed");
    assert!(sim.abs() < 1e-12);
}

#[test]
fn test_wasserstein_shifted_samples() {
    // scipy.stats.wasserstein_distance([1, 2], [3, 4]) = 2.
    let sim = wasserstein_similarity(&[1.0, 2.0], &[3.0, 4.0]).expect("should succeed");
    assert!((sim - (1.0 - 2.0)).abs() < 1e-12);
}

#[test]
fn test_wasserstein_symmetric() {
    let u = [0.1, 0.2, 0.7];
    let v = [0.3, 0.3, 0.4];
    let uv = wasserstein_similarity(&u, &v).expect("should succeed");
    let vu = wasserstein_similarity(&v, &u).expect("should succeed");
    assert!((uv - vu).abs() < 1e-12);
}

#[test]
fn test_wasserstein_order_insensitive() {
    let sim_sorted = wasserstein_similarity(&[0.1, 0.2, 0.7], &[0.2, 0.3, 0.5]).expect("ok");
    let sim_shuffled = wasserstein_similarity(&[0.7, 0.1, 0.2], &[0.5, 0.2, 0.3]).expect("ok");
    assert!((sim_sorted - sim_shuffled).abs() < 1e-12);
}

#[test]
fn test_wasserstein_empty_error() {
    assert!(wasserstein_similarity(&[], &[1.0]).is_err());
}

#[test]
fn test_pairwise_upper_count_and_order() {
    let items = [vec![0.0], vec![1.0], vec![2.0], vec![3.0]];
    let values = pairwise_upper(&items, |a, b| Ok(b[0] - a[0])).expect("should succeed");
    // Upper triangle in row order: (0,1) (0,2) (0,3) (1,2) (1,3) (2,3).
    assert_eq!(values, vec![1.0, 2.0, 3.0, 1.0, 2.0, 1.0]);
}

#[test]
fn test_pairwise_upper_two_items_single_pair() {
    let items = [1.0, 2.0];
    let values = pairwise_upper(&items, |a, b| Ok(a + b)).expect("should succeed");
    assert_eq!(values, vec![3.0]);
}

#[test]
fn test_pairwise_upper_rejects_single_item() {
    let err = pairwise_upper(&[1.0], |_, _| Ok(0.0)).unwrap_err();
    assert!(err.to_string().contains("at least 2 runs"));
}

#[test]
fn test_pairwise_upper_rejects_empty() {
    let items: [f64; 0] = [];
    assert!(pairwise_upper(&items, |_, _| Ok(0.0)).is_err());
}

#[test]
fn test_pairwise_upper_propagates_measure_error() {
    let items = [1.0, 2.0, 3.0];
    let result = pairwise_upper(&items, |a, _| {
        if *a > 1.5 {
            Err(crate::error::EstabilidadError::Other("boom".to_string()))
        } else {
            Ok(0.0)
        }
    });
    assert!(result.is_err());
}
