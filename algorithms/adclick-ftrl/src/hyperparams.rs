use crate::error::FtrlError;
use adclick::{Float, ParamGuard};
#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// A hyper-parameter set for a per-coordinate FTRL-Proximal learner
///
/// The values are checked when a learner is constructed, see
/// [`FtrlValidParams`](crate::FtrlValidParams) for the checked counterpart.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct FtrlParams<F: Float>(pub(crate) FtrlValidParams<F>);

/// A verified hyper-parameter set ready for the construction of a FTRL-Proximal learner
///
/// See [`FtrlParams`](crate::FtrlParams) for more information.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct FtrlValidParams<F: Float> {
    pub(crate) alpha: F,
    pub(crate) beta: F,
    pub(crate) lambda1: F,
    pub(crate) lambda2: F,
    pub(crate) n_coordinates: usize,
}

fn as_f64<F: Float>(x: F) -> f64 {
    x.to_f64().unwrap_or(f64::NAN)
}

/// Whether an array of `n_coordinates` values of `F` can be allocated at all
fn fits_in_memory<F: Float>(n_coordinates: usize) -> bool {
    n_coordinates
        .checked_mul(std::mem::size_of::<F>())
        .map_or(false, |bytes| bytes <= isize::MAX as usize)
}

impl<F: Float> ParamGuard for FtrlParams<F> {
    type Checked = FtrlValidParams<F>;
    type Error = FtrlError;

    /// Validate the hyper parameters
    fn check_ref(&self) -> Result<&Self::Checked, Self::Error> {
        let p = &self.0;
        if !(p.alpha.is_finite() && p.alpha > F::zero()) {
            Err(FtrlError::InvalidAlpha(as_f64(p.alpha)))
        } else if !(p.beta.is_finite() && p.beta > F::zero()) {
            Err(FtrlError::InvalidBeta(as_f64(p.beta)))
        } else if !(p.lambda1.is_finite() && p.lambda1 >= F::zero()) {
            Err(FtrlError::InvalidLambda1(as_f64(p.lambda1)))
        } else if !(p.lambda2.is_finite() && p.lambda2 >= F::zero()) {
            Err(FtrlError::InvalidLambda2(as_f64(p.lambda2)))
        } else if p.n_coordinates == 0 || !fits_in_memory::<F>(p.n_coordinates) {
            Err(FtrlError::InvalidNCoordinates(p.n_coordinates))
        } else {
            Ok(p)
        }
    }

    fn check(self) -> Result<Self::Checked, Self::Error> {
        self.check_ref()?;
        Ok(self.0)
    }
}

impl<F: Float> FtrlValidParams<F> {
    pub fn alpha(&self) -> F {
        self.alpha
    }

    pub fn beta(&self) -> F {
        self.beta
    }

    pub fn lambda1(&self) -> F {
        self.lambda1
    }

    pub fn lambda2(&self) -> F {
        self.lambda2
    }

    pub fn n_coordinates(&self) -> usize {
        self.n_coordinates
    }
}

impl<F: Float> FtrlParams<F> {
    /// Create new hyperparameters
    ///
    /// There are no defaults, every value has to be chosen by the caller. Nothing is validated
    /// until [`check`](adclick::ParamGuard::check) is called.
    pub fn new(alpha: F, beta: F, lambda1: F, lambda2: F, n_coordinates: usize) -> Self {
        Self(FtrlValidParams {
            alpha,
            beta,
            lambda1,
            lambda2,
            n_coordinates,
        })
    }

    /// Set the per-coordinate learning rate scale.
    ///
    /// `alpha` must be positive and finite
    pub fn alpha(mut self, alpha: F) -> Self {
        self.0.alpha = alpha;
        self
    }

    /// Set the learning rate smoothing constant, typically `1.0`.
    ///
    /// `beta` must be positive and finite
    pub fn beta(mut self, beta: F) -> Self {
        self.0.beta = beta;
        self
    }

    /// Set the L1 regularization strength. Coordinates whose accumulated gradient stays within
    /// `lambda1` have a weight of exactly zero.
    ///
    /// `lambda1` must be non-negative and finite
    pub fn lambda1(mut self, lambda1: F) -> Self {
        self.0.lambda1 = lambda1;
        self
    }

    /// Set the L2 regularization strength.
    ///
    /// `lambda2` must be non-negative and finite
    pub fn lambda2(mut self, lambda2: F) -> Self {
        self.0.lambda2 = lambda2;
        self
    }

    /// Set the size of the coordinate index space, e.g. `1 << 24`.
    ///
    /// `n_coordinates` must be bigger than zero and small enough for the state arrays to be
    /// addressable
    pub fn n_coordinates(mut self, n_coordinates: usize) -> Self {
        self.0.n_coordinates = n_coordinates;
        self
    }
}
