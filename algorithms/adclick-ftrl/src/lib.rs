//! # Follow the regularized leader - proximal
//!
//! ## The Big Picture
//!
//! `adclick-ftrl` is the learner of the `adclick` workspace: an online logistic regression for
//! sparse binary features with per-coordinate adaptive learning rates and L1/L2 regularization,
//! as described in "Ad Click Prediction: a View from the Trenches" (McMahan et al., 2013).
//!
//! ## Current state
//!
//! The [`FollowTheRegularizedLeader`] model keeps two flat arrays of length `D`, the accumulated
//! gradients `z` and the accumulated squared gradients `n`. Weights are never stored, they are a
//! closed-form function of `(z, n)` and recomputed whenever they are needed.
//!
//! Records are given as lists of active coordinates, e.g. the output of a feature hasher:
//!
//! ```
//! use adclick::ParamGuard;
//! use adclick_ftrl::{FollowTheRegularizedLeader, FtrlParams};
//!
//! let params = FtrlParams::new(0.1, 1.0, 0.0, 0.0, 10).check().unwrap();
//! let mut model = FollowTheRegularizedLeader::new(params);
//!
//! assert_eq!(model.predict(&[0, 3]).unwrap(), 0.5);
//! for _ in 0..100 {
//!     model.learn(&[0, 3], true).unwrap();
//! }
//! assert!(model.predict(&[0, 3]).unwrap() > 0.5);
//! ```
//!
//! ## Examples
//!
//! There is an usage example in the `examples/` directory. To run, use:
//!
//! ```bash
//! $ cargo run --release --example synthetic_clicks
//! ```
//!
mod algorithm;
mod error;
mod hyperparams;

pub use algorithm::{sigmoid, Result};
pub use error::FtrlError;
pub use hyperparams::{FtrlParams, FtrlValidParams};

use adclick::Float;
use ndarray::Array1;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// Per-coordinate FTRL-Proximal learner
///
/// Learner state is exclusively owned, independent instances share nothing and can be trained on
/// different threads. Updates of one instance are strictly sequential.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct FollowTheRegularizedLeader<F: Float> {
    params: FtrlValidParams<F>,
    z: Array1<F>,
    n: Array1<F>,
}

impl<F: Float> FollowTheRegularizedLeader<F> {
    /// Create a parameter set for construction of Follow The Regularized Leader - proximal model
    ///
    /// The update rule is described in "Ad Click Prediction: a View from the Trenches", see
    /// <https://research.google/pubs/ad-click-prediction-a-view-from-the-trenches/>
    pub fn params(
        alpha: F,
        beta: F,
        lambda1: F,
        lambda2: F,
        n_coordinates: usize,
    ) -> FtrlParams<F> {
        FtrlParams::new(alpha, beta, lambda1, lambda2, n_coordinates)
    }

    /// Create a new model with zeroed state from checked parameters
    pub fn new(params: FtrlValidParams<F>) -> FollowTheRegularizedLeader<F> {
        let n_coordinates = params.n_coordinates();
        Self {
            params,
            z: Array1::zeros(n_coordinates),
            n: Array1::zeros(n_coordinates),
        }
    }
}
