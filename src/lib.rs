//! Estabilidad: topic-model stability analysis in pure Rust.
//!
//! Estabilidad ranks topic-model hyperparameter configurations by how
//! consistently they reproduce the same topics across repeated stochastic
//! runs. Without ground truth, run-to-run agreement is a practical proxy
//! for solution quality: a topic count that lands on the same topics every
//! run is a safer choice than one that shifts with the seed.
//!
//! # Quick Start
//!
//! ```
//! use estabilidad::models::LatentDirichletAllocation;
//! use estabilidad::params::{ParameterSpace, ParameterSpec};
//! use estabilidad::primitives::Matrix;
//! use estabilidad::stability::{RankingCriteria, StabilityAnalysis};
//!
//! // Document-term matrix (3 docs x 5 terms)
//! let dtm = Matrix::from_vec(3, 5, vec![
//!     2.0, 1.0, 0.0, 0.0, 0.0,
//!     0.0, 0.0, 2.0, 1.0, 0.0,
//!     1.0, 0.0, 0.0, 1.0, 2.0,
//! ]).expect("matrix creation should succeed");
//!
//! // Sample 2 configurations, fit each 3 times, compare the runs.
//! let space = ParameterSpace::new()
//!     .with("n_components", ParameterSpec::int_range(2, 3).expect("valid range"))
//!     .expect("unique name");
//!
//! let mut analysis = StabilityAnalysis::new().with_n_runs(3).with_n_top_terms(3);
//! analysis
//!     .register("lda", Box::new(LatentDirichletAllocation::new()), dtm, space, 2)
//!     .expect("fresh family name");
//! analysis.fit_all().expect("fitting should succeed");
//!
//! for report in analysis.rank_models(&RankingCriteria::default()) {
//!     println!("{} sample {}: jaccard {:.3}", report.model, report.sample_id, report.jaccard);
//! }
//! ```
//!
//! # Modules
//!
//! - [`primitives`]: Core Vector and Matrix types
//! - [`params`]: Parameter spaces, Sobol sampling, sampled configurations
//! - [`traits`]: The trainable topic-model capability seam
//! - [`models`]: In-crate LDA and NMF families
//! - [`similarity`]: The five pairwise agreement measures
//! - [`stability`]: Run orchestration, rank vectors, reports, ranking

pub mod error;
pub mod models;
pub mod params;
pub mod prelude;
pub mod primitives;
pub mod similarity;
pub mod stability;
pub mod traits;

pub use error::{EstabilidadError, Result};
pub use primitives::{Matrix, Vector};
pub use traits::{TopicModel, TrainedTopicModel};
