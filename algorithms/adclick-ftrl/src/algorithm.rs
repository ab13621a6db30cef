use crate::error::FtrlError;
use crate::hyperparams::FtrlValidParams;
use crate::FollowTheRegularizedLeader;
use adclick::metrics::clamp_probability;
use adclick::traits::{IncrementalFit, PredictProbability};
use adclick::Float;
use ndarray::{Array1, Zip};

/// Simplified `Result` using [`FtrlError`](crate::FtrlError) as error type
pub type Result<T> = std::result::Result<T, FtrlError>;

/// View the state and make predictions with a follow the regularized leader - proximal model
impl<F: Float> FollowTheRegularizedLeader<F> {
    /// Get Z values
    pub fn z(&self) -> &Array1<F> {
        &self.z
    }

    /// Get N values
    pub fn n(&self) -> &Array1<F> {
        &self.n
    }

    /// Get the hyperparameters
    pub fn get_params(&self) -> &FtrlValidParams<F> {
        &self.params
    }

    /// Size of the coordinate index space
    pub fn n_coordinates(&self) -> usize {
        self.z.len()
    }

    /// Weight of a single coordinate
    pub fn weight(&self, index: usize) -> Result<F> {
        self.check_index(index)?;
        Ok(self.weight_at(index))
    }

    /// Calculate the weights of all coordinates
    pub fn weights(&self) -> Array1<F> {
        Zip::from(self.z.view())
            .and(self.n.view())
            .map_collect(|z_, n_| calculate_weight(*z_, *n_, &self.params))
    }

    /// Number of coordinates with a weight different from zero
    pub fn nonzero_weights(&self) -> usize {
        let lambda1 = self.params.lambda1();
        self.z.iter().filter(|z_| z_.abs() > lambda1).count()
    }

    /// Probability of a click for the record with the active coordinates `x`
    ///
    /// The result lies in `[e^-16, 1 - e^-16]`. Repeated coordinates contribute once per
    /// occurrence.
    pub fn predict(&self, x: &[usize]) -> Result<F> {
        self.check_indices(x)?;
        let weights = self.active_weights(x);
        Ok(sigmoid(linear_score(&weights)?))
    }

    /// Update the model with the record `x` and its label `y`
    ///
    /// Coordinates are updated in the order given. A coordinate listed twice is updated twice,
    /// the second update sees the squared gradient sum left by the first one.
    ///
    /// All indices are validated before any state is touched. If an update produces a
    /// non-finite value the call fails with [`FtrlError::NumericInstability`] and the state is
    /// left partially updated.
    pub fn learn(&mut self, x: &[usize], y: bool) -> Result<()> {
        self.check_indices(x)?;
        let weights = self.active_weights(x);
        let probability = sigmoid(linear_score(&weights)?);

        let target = if y { F::one() } else { F::zero() };
        let gradient = probability - target;
        if !gradient.is_finite() {
            return Err(FtrlError::NumericInstability("gradient".to_string()));
        }
        let gradient_sq = gradient * gradient;
        let alpha = self.params.alpha();

        for (&i, &w) in x.iter().zip(weights.iter()) {
            let n_ = self.n[i];
            let sigma = calculate_sigma(n_, gradient, alpha);
            let z_new = self.z[i] + gradient - sigma * w;
            let n_new = n_ + gradient_sq;
            if !z_new.is_finite() {
                return Err(FtrlError::NumericInstability(format!("z[{}]", i)));
            }
            if !n_new.is_finite() {
                return Err(FtrlError::NumericInstability(format!("n[{}]", i)));
            }
            self.z[i] = z_new;
            self.n[i] = n_new;
        }
        Ok(())
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.z.len() {
            Ok(())
        } else {
            Err(FtrlError::IndexOutOfRange {
                index,
                n_coordinates: self.z.len(),
            })
        }
    }

    fn check_indices(&self, x: &[usize]) -> Result<()> {
        x.iter().try_for_each(|&i| self.check_index(i))
    }

    fn weight_at(&self, index: usize) -> F {
        calculate_weight(self.z[index], self.n[index], &self.params)
    }

    fn active_weights(&self, x: &[usize]) -> Vec<F> {
        x.iter().map(|&i| self.weight_at(i)).collect()
    }
}

impl<F: Float> IncrementalFit<[usize], bool> for FollowTheRegularizedLeader<F> {
    type Error = FtrlError;

    fn fit_one(&mut self, x: &[usize], target: bool) -> Result<()> {
        self.learn(x, target)
    }
}

impl<F: Float> PredictProbability<[usize], F> for FollowTheRegularizedLeader<F> {
    type Error = FtrlError;

    fn predict_probability(&self, x: &[usize]) -> Result<F> {
        self.predict(x)
    }
}

/// Logistic function bounded to `[e^-16, 1 - e^-16]`
///
/// `NaN` is passed through.
pub fn sigmoid<F: Float>(score: F) -> F {
    clamp_probability(F::one() / (F::one() + F::exp(-score)))
}

fn linear_score<F: Float>(weights: &[F]) -> Result<F> {
    let score = weights.iter().fold(F::zero(), |acc, w| acc + *w);
    if score.is_nan() {
        Err(FtrlError::NumericInstability("linear score".to_string()))
    } else {
        Ok(score)
    }
}

fn calculate_sigma<F: Float>(n: F, gradient: F, alpha: F) -> F {
    (F::sqrt(n + gradient * gradient) - F::sqrt(n)) / alpha
}

fn calculate_weight<F: Float>(z: F, n: F, params: &FtrlValidParams<F>) -> F {
    let lambda1 = params.lambda1();
    if z.abs() <= lambda1 {
        F::zero()
    } else {
        let sign = if z < F::zero() { -F::one() } else { F::one() };
        (sign * lambda1 - z) / ((params.beta() + n.sqrt()) / params.alpha() + params.lambda2())
    }
}
