//! Topic agreement metrics.
//!
//! This module provides the pairwise measures used to score how well two
//! runs reproduce the same topic:
//! - Jaccard index (top-term set overlap)
//! - Kendall's tau-b and Spearman's rho (rank-vector correlation)
//! - Jensen-Shannon and Wasserstein similarity (term-distribution distance)
//!
//! All five are independent; each yields one value per (topic, run pair).
//!
//! # Quick Start
//!
//! ```
//! use estabilidad::similarity::jaccard_index;
//!
//! let a = [3, 7, 1];
//! let b = [3, 7, 1];
//! assert!((jaccard_index(&a, &b) - 1.0).abs() < 1e-12);
//! ```

use crate::error::{EstabilidadError, Result};
use std::collections::HashSet;

/// Compute the Jaccard index between two term-index lists.
///
/// Order is discarded; only set membership matters. Returns a value in
/// [0, 1], where 1 means identical term sets and 0 means disjoint sets.
///
/// # Formula
/// ```text
/// jaccard(A, B) = |A ∩ B| / |A ∪ B|
/// ```
///
/// # Examples
///
/// ```
/// use estabilidad::similarity::jaccard_index;
///
/// assert!((jaccard_index(&[1, 2, 3], &[4, 5, 6]) - 0.0).abs() < 1e-12);
/// assert!((jaccard_index(&[1, 2], &[2, 3]) - 1.0 / 3.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn jaccard_index(a: &[usize], b: &[usize]) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0; // Empty sets are identical
    }

    let set_a: HashSet<usize> = a.iter().copied().collect();
    let set_b: HashSet<usize> = b.iter().copied().collect();

    let intersection = set_a.intersection(&set_b).count();
    let union = set_a.union(&set_b).count();

    intersection as f64 / union as f64
}

/// Compute Kendall's tau-b rank correlation between two rank vectors.
///
/// Tie-corrected: pairs tied in either vector drop out of the
/// denominator, which matters here because absent-term sentinel entries
/// produce many ties. Returns a value in [-1, 1]; NaN if either vector is
/// entirely tied (the correlation is undefined there).
///
/// # Errors
///
/// Returns an error if the vectors are empty or differ in length.
///
/// # Examples
///
/// ```
/// use estabilidad::similarity::kendall_tau;
///
/// let tau = kendall_tau(&[0.0, 1.0, 2.0], &[0.0, 1.0, 2.0]).expect("same length");
/// assert!((tau - 1.0).abs() < 1e-12);
///
/// let tau = kendall_tau(&[0.0, 1.0, 2.0], &[2.0, 1.0, 0.0]).expect("same length");
/// assert!((tau + 1.0).abs() < 1e-12);
/// ```
pub fn kendall_tau(a: &[f64], b: &[f64]) -> Result<f64> {
    check_paired(a, b)?;

    let n = a.len();
    let mut concordant = 0u64;
    let mut discordant = 0u64;
    let mut ties_a = 0u64;
    let mut ties_b = 0u64;

    for i in 0..n {
        for j in (i + 1)..n {
            let dx = a[i] - a[j];
            let dy = b[i] - b[j];
            if dx == 0.0 {
                ties_a += 1;
            }
            if dy == 0.0 {
                ties_b += 1;
            }
            if dx != 0.0 && dy != 0.0 {
                if (dx > 0.0) == (dy > 0.0) {
                    concordant += 1;
                } else {
                    discordant += 1;
                }
            }
        }
    }

    let n0 = (n * (n - 1) / 2) as f64;
    let denom = ((n0 - ties_a as f64) * (n0 - ties_b as f64)).sqrt();
    if denom == 0.0 {
        return Ok(f64::NAN);
    }
    Ok((concordant as f64 - discordant as f64) / denom)
}

/// Compute Spearman's rank correlation between two rank vectors.
///
/// Both vectors are converted to average ranks (ties share the mean of
/// the positions they occupy), then Pearson-correlated. Returns a value
/// in [-1, 1]; NaN if either vector is constant.
///
/// # Errors
///
/// Returns an error if the vectors are empty or differ in length.
///
/// # Examples
///
/// ```
/// use estabilidad::similarity::spearman_rho;
///
/// let rho = spearman_rho(&[0.0, 1.0, 2.0], &[0.0, 1.0, 2.0]).expect("same length");
/// assert!((rho - 1.0).abs() < 1e-12);
/// ```
pub fn spearman_rho(a: &[f64], b: &[f64]) -> Result<f64> {
    check_paired(a, b)?;
    let ranks_a = average_ranks(a);
    let ranks_b = average_ranks(b);
    Ok(pearson(&ranks_a, &ranks_b))
}

/// Compute Jensen-Shannon similarity between two term distributions.
///
/// `1 - D_js` where `D_js` is the Jensen-Shannon distance with base-2
/// logarithm, so both distance and similarity lie in [0, 1]. Inputs are
/// normalized to sum to 1 before comparison.
///
/// # Errors
///
/// Returns an error if the inputs are empty, differ in length, contain a
/// negative weight, or sum to zero.
///
/// # Examples
///
/// ```
/// use estabilidad::similarity::jensen_shannon_similarity;
///
/// let p = [0.5, 0.5, 0.0];
/// let sim = jensen_shannon_similarity(&p, &p).expect("valid distributions");
/// assert!((sim - 1.0).abs() < 1e-12);
/// ```
pub fn jensen_shannon_similarity(p: &[f64], q: &[f64]) -> Result<f64> {
    check_paired(p, q)?;
    let p = normalized(p)?;
    let q = normalized(q)?;

    let mut divergence = 0.0;
    for (pi, qi) in p.iter().zip(q.iter()) {
        let mi = 0.5 * (pi + qi);
        if *pi > 0.0 {
            divergence += 0.5 * pi * (pi / mi).log2();
        }
        if *qi > 0.0 {
            divergence += 0.5 * qi * (qi / mi).log2();
        }
    }

    // Floating-point noise can push the divergence a hair outside [0, 1].
    let distance = divergence.clamp(0.0, 1.0).sqrt();
    Ok(1.0 - distance)
}

/// Compute Wasserstein similarity between two term distributions.
///
/// `1 - W1` where `W1` is the first Wasserstein distance with the two
/// inputs treated as empirical samples of values, i.e. the area between
/// the empirical CDFs of the value multisets. For normalized
/// distributions the values lie in [0, 1], so the similarity does too.
///
/// # Errors
///
/// Returns an error if either input is empty.
///
/// # Examples
///
/// ```
/// use estabilidad::similarity::wasserstein_similarity;
///
/// let p = [0.2, 0.3, 0.5];
/// let sim = wasserstein_similarity(&p, &p).expect("non-empty");
/// assert!((sim - 1.0).abs() < 1e-12);
/// ```
pub fn wasserstein_similarity(u: &[f64], v: &[f64]) -> Result<f64> {
    if u.is_empty() || v.is_empty() {
        return Err(EstabilidadError::empty_input("wasserstein samples"));
    }

    let mut sorted_u = u.to_vec();
    let mut sorted_v = v.to_vec();
    sorted_u.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    sorted_v.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let mut grid: Vec<f64> = sorted_u.iter().chain(sorted_v.iter()).copied().collect();
    grid.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let mut distance = 0.0;
    for window in grid.windows(2) {
        let delta = window[1] - window[0];
        if delta <= 0.0 {
            continue;
        }
        let cdf_u = count_le(&sorted_u, window[0]) as f64 / sorted_u.len() as f64;
        let cdf_v = count_le(&sorted_v, window[0]) as f64 / sorted_v.len() as f64;
        distance += (cdf_u - cdf_v).abs() * delta;
    }

    Ok(1.0 - distance)
}

/// Apply a symmetric measure to every unordered pair of items.
///
/// Produces the upper triangle of the N x N comparison in row order:
/// (0,1), (0,2), ..., (1,2), ...: `N*(N-1)/2` values.
///
/// # Errors
///
/// Returns an error if fewer than two items are given (zero pairs would
/// make every downstream statistic meaningless), or if the measure fails
/// for any pair.
pub fn pairwise_upper<T, F>(items: &[T], mut measure: F) -> Result<Vec<f64>>
where
    F: FnMut(&T, &T) -> Result<f64>,
{
    if items.len() < 2 {
        return Err(EstabilidadError::InsufficientRuns { found: items.len() });
    }

    let n = items.len();
    let mut values = Vec::with_capacity(n * (n - 1) / 2);
    for i in 0..n {
        for j in (i + 1)..n {
            values.push(measure(&items[i], &items[j])?);
        }
    }
    Ok(values)
}

fn check_paired(a: &[f64], b: &[f64]) -> Result<()> {
    if a.is_empty() || b.is_empty() {
        return Err(EstabilidadError::empty_input("paired vectors"));
    }
    if a.len() != b.len() {
        return Err(EstabilidadError::Other(format!(
            "paired vectors must have the same length, got {} and {}",
            a.len(),
            b.len()
        )));
    }
    Ok(())
}

/// Average-rank transform: ties share the mean of their positions.
fn average_ranks(x: &[f64]) -> Vec<f64> {
    let n = x.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&i, &j| x[i].partial_cmp(&x[j]).unwrap_or(std::cmp::Ordering::Equal));

    let mut ranks = vec![0.0; n];
    let mut start = 0;
    while start < n {
        let mut end = start + 1;
        while end < n && x[order[end]] == x[order[start]] {
            end += 1;
        }
        // Positions start..end hold one tie group; 1-based mean rank.
        let mean_rank = (start + end + 1) as f64 / 2.0;
        for &idx in &order[start..end] {
            ranks[idx] = mean_rank;
        }
        start = end;
    }
    ranks
}

fn pearson(a: &[f64], b: &[f64]) -> f64 {
    let n = a.len() as f64;
    let mean_a = a.iter().sum::<f64>() / n;
    let mean_b = b.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for (x, y) in a.iter().zip(b.iter()) {
        let dx = x - mean_a;
        let dy = y - mean_b;
        cov += dx * dy;
        var_a += dx * dx;
        var_b += dy * dy;
    }

    let denom = (var_a * var_b).sqrt();
    if denom == 0.0 {
        return f64::NAN;
    }
    cov / denom
}

fn normalized(p: &[f64]) -> Result<Vec<f64>> {
    if p.iter().any(|&x| x < 0.0 || !x.is_finite()) {
        return Err(EstabilidadError::Other(
            "distribution weights must be finite and non-negative".to_string(),
        ));
    }
    let total: f64 = p.iter().sum();
    if total <= 0.0 {
        return Err(EstabilidadError::Other(
            "distribution weights must not all be zero".to_string(),
        ));
    }
    Ok(p.iter().map(|&x| x / total).collect())
}

/// Number of elements in a sorted slice that are <= `value`.
fn count_le(sorted: &[f64], value: f64) -> usize {
    sorted.partition_point(|&x| x <= value)
}

#[cfg(test)]
#[path = "similarity_tests.rs"]
mod tests;

#[cfg(test)]
#[path = "similarity_props.rs"]
mod props;
