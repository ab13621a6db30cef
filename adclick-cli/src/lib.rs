//! Command line driver of the `adclick` workspace
//!
//! Tunes FTRL-Proximal hyperparameters with an exhaustive grid search, scoring every combination
//! on a holdout taken from the training stream, and writes the predictions of the best learner
//! for a test log.

pub mod cli;
pub mod config;
pub mod error;
pub mod grid_search;
pub mod holdout;
pub mod submission;

pub use cli::{run, Args};
pub use config::GridConfig;
pub use error::{DriverError, Result};
pub use grid_search::{GridSearch, GridSearchResult, TrialSummary};
pub use holdout::{train_with_holdout, Holdout, HoldoutReport};
pub use submission::write_submission;
