//! Low-discrepancy Sobol sequence.
//!
//! Quasi-random points cover the unit hypercube far more evenly than
//! pseudo-random draws, which matters here because hyperparameter searches
//! typically take only a handful of samples. Uses the gray-code
//! construction over Joe–Kuo direction numbers; the all-zeros point is
//! skipped, so the first emitted point is (0.5, ..., 0.5).

use crate::error::{EstabilidadError, Result};

const BITS: usize = 32;

/// Primitive-polynomial degree, coefficients, and initial direction
/// numbers (Joe–Kuo) for dimensions 2..=16. Dimension 1 is the van der
/// Corput sequence and needs no seed row.
const DIRECTION_SEEDS: &[(usize, u32, &[u32])] = &[
    (1, 0, &[1]),
    (2, 1, &[1, 3]),
    (3, 1, &[1, 3, 1]),
    (3, 2, &[1, 1, 1]),
    (4, 1, &[1, 1, 3, 3]),
    (4, 4, &[1, 3, 5, 13]),
    (5, 2, &[1, 1, 5, 5, 17]),
    (5, 4, &[1, 1, 5, 5, 5]),
    (5, 7, &[1, 1, 7, 11, 19]),
    (5, 11, &[1, 1, 5, 1, 1]),
    (5, 13, &[1, 1, 1, 3, 11]),
    (5, 14, &[1, 3, 5, 5, 31]),
    (6, 1, &[1, 3, 3, 9, 7, 49]),
    (6, 13, &[1, 1, 1, 15, 21, 21]),
    (6, 16, &[1, 3, 1, 13, 27, 49]),
];

/// Sobol quasi-random sequence generator.
///
/// Produces well-spread points in `[0, 1)^d`. The generator is the
/// sampling capability behind [`sample`](crate::params::sample); it is a
/// standalone type so an alternative low-discrepancy source could be
/// substituted.
///
/// # Examples
///
/// ```
/// use estabilidad::params::SobolSequence;
///
/// let seq = SobolSequence::new(2).expect("2 dimensions supported");
/// let points = seq.generate(4);
/// assert_eq!(points.len(), 4);
/// assert_eq!(points[0], vec![0.5, 0.5]);
/// ```
#[derive(Debug, Clone)]
pub struct SobolSequence {
    dimensions: usize,
    directions: Vec<[u32; BITS]>,
}

impl SobolSequence {
    /// Largest supported dimensionality.
    pub const MAX_DIMENSIONS: usize = DIRECTION_SEEDS.len() + 1;

    /// Creates a generator for the given dimensionality.
    ///
    /// # Errors
    ///
    /// Returns an error if `dimensions` exceeds
    /// [`MAX_DIMENSIONS`](Self::MAX_DIMENSIONS).
    pub fn new(dimensions: usize) -> Result<Self> {
        if dimensions > Self::MAX_DIMENSIONS {
            return Err(EstabilidadError::invalid_space(format!(
                "{} parameters exceed the {} supported sampling dimensions",
                dimensions,
                Self::MAX_DIMENSIONS
            )));
        }

        let mut directions = Vec::with_capacity(dimensions);
        for dim in 0..dimensions {
            directions.push(direction_numbers(dim));
        }

        Ok(Self {
            dimensions,
            directions,
        })
    }

    /// Dimensionality of generated points.
    #[must_use]
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Generates `count` points in `[0, 1)^d`.
    ///
    /// The sequence is deterministic: the same generator always yields the
    /// same points in the same order.
    #[must_use]
    pub fn generate(&self, count: usize) -> Vec<Vec<f64>> {
        let mut state = vec![0u32; self.dimensions];
        let mut points = Vec::with_capacity(count);

        for k in 0..count {
            // Antonov-Saleev: flip the direction indexed by the lowest
            // zero bit of k. k = 0 flips index 0, yielding (0.5, ...).
            let c = (!(k as u64)).trailing_zeros() as usize;
            debug_assert!(c < BITS);
            for (value, dirs) in state.iter_mut().zip(&self.directions) {
                *value ^= dirs[c];
            }
            points.push(
                state
                    .iter()
                    .map(|&x| f64::from(x) / (1u64 << BITS) as f64)
                    .collect(),
            );
        }

        points
    }
}

/// Direction numbers for one dimension, scaled so bit 31 is the first
/// binary digit after the point.
fn direction_numbers(dim: usize) -> [u32; BITS] {
    let mut v = [0u32; BITS];

    if dim == 0 {
        // Van der Corput sequence in base 2.
        for (j, value) in v.iter_mut().enumerate() {
            *value = 1 << (BITS - 1 - j);
        }
        return v;
    }

    let (degree, coeffs, m_init) = DIRECTION_SEEDS[dim - 1];
    for j in 0..degree.min(BITS) {
        v[j] = m_init[j] << (BITS - 1 - j);
    }
    for j in degree..BITS {
        v[j] = v[j - degree] ^ (v[j - degree] >> degree);
        for k in 1..degree {
            if (coeffs >> (degree - 1 - k)) & 1 == 1 {
                v[j] ^= v[j - k];
            }
        }
    }

    v
}
