//! `adclick` is a small toolkit for online click-through-rate prediction on sparse, one-hot
//! encoded categorical data.
//!
//! ## The Big Picture
//!
//! Click logs are wide and sparse: every record activates a few dozen coordinates out of a hashed
//! index space of millions. Learners in this workspace consume such records one at a time and
//! never materialize a design matrix.
//!
//! This crate holds what the members of the workspace share:
//!
//! * the [`Float`] bound used by every learner,
//! * the [`ParamGuard`] pattern for validated hyperparameters,
//! * the [`traits`] implemented by online learners,
//! * the [`Example`](dataset::Example) record produced by feature extractors,
//! * bounded classification [`metrics`].
//!
//! The learner itself lives in `adclick-ftrl`, the CSV reader and feature hasher in
//! `adclick-datasets` and the grid-search driver in `adclick-cli`.

pub mod benchmarks;
pub mod dataset;
pub mod error;
mod metrics_classification;
mod param_guard;
pub mod prelude;
pub mod traits;

pub use dataset::{Example, Float};
pub use error::Error;
pub use param_guard::ParamGuard;

/// Common metrics functions for binary classification
pub mod metrics {
    pub use crate::metrics_classification::{
        clamp_probability, log_loss, probability_bound, BinaryClassification, LogLossAccumulator,
    };
}
