//! Error types in adclick
//!

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("invalid parameter {0}")]
    Parameters(String),
    #[error("expected predictions and targets of same length, got {0} != {1}")]
    MismatchedShapes(usize, usize),
    #[error("Not enough samples to compute the mean")]
    NotEnoughSamples,
}
