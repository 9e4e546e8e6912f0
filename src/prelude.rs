//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use estabilidad::prelude::*;
//! ```

pub use crate::error::{EstabilidadError, Result};
pub use crate::models::{LatentDirichletAllocation, NonNegativeMatrixFactorization};
pub use crate::params::{sample, ParamValue, ParameterSpace, ParameterSpec, SampledConfiguration};
pub use crate::primitives::{Matrix, Vector};
pub use crate::stability::{
    FullStabilityReport, Measure, RankingCriteria, StabilityAnalysis, StabilityReport,
};
pub use crate::traits::{TopicModel, TrainedTopicModel};
