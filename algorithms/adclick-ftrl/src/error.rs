#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};
use thiserror::Error;

#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FtrlError {
    #[error("alpha should be positive and finite, but is {0}")]
    InvalidAlpha(f64),
    #[error("beta should be positive and finite, but is {0}")]
    InvalidBeta(f64),
    #[error("lambda1 should be non-negative and finite, but is {0}")]
    InvalidLambda1(f64),
    #[error("lambda2 should be non-negative and finite, but is {0}")]
    InvalidLambda2(f64),
    #[error("number of coordinates must be bigger than 0 and addressable, but is {0}")]
    InvalidNCoordinates(usize),
    #[error("coordinate {index} is out of range for a model with {n_coordinates} coordinates")]
    IndexOutOfRange { index: usize, n_coordinates: usize },
    #[error("non-finite value in {0}")]
    NumericInstability(String),
}
