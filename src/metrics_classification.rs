//! Common metrics for performance evaluation of probabilistic binary classifiers
//!
//! Probabilities are kept away from `0` and `1` by a fixed bound of `e^-16` before taking
//! logarithms, so that a single confident mistake yields a large but finite loss.
use crate::error::{Error, Result};
use crate::Float;

/// Distance kept between any reported probability and the interval ends, `e^-16`
pub fn probability_bound<F: Float>() -> F {
    F::exp(F::cast(-16.0))
}

/// Clamp a probability into `[e^-16, 1 - e^-16]`
///
/// `NaN` is passed through unchanged.
pub fn clamp_probability<F: Float>(p: F) -> F {
    if p.is_nan() {
        return p;
    }
    let bound = probability_bound::<F>();
    (F::one() - bound).min(bound.max(p))
}

/// Bounded logarithmic loss of a single prediction
///
/// `predicted` is the probability of the positive class. The result is finite and non-negative
/// for every non-`NaN` input.
pub fn log_loss<F: Float>(actual: bool, predicted: F) -> F {
    let p = clamp_probability(predicted);
    if actual {
        -p.ln()
    } else {
        -(F::one() - p).ln()
    }
}

/// Running mean of the log loss over a stream of predictions
///
/// Used for holdout evaluation where neither predictions nor targets are kept around.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LogLossAccumulator<F> {
    sum: F,
    count: usize,
}

impl<F: Float> LogLossAccumulator<F> {
    pub fn new() -> Self {
        LogLossAccumulator {
            sum: F::zero(),
            count: 0,
        }
    }

    /// Add a prediction, returns the loss of this single prediction
    pub fn add(&mut self, actual: bool, predicted: F) -> F {
        let loss = log_loss(actual, predicted);
        self.sum += loss;
        self.count += 1;
        loss
    }

    /// Number of predictions seen so far
    pub fn count(&self) -> usize {
        self.count
    }

    /// Mean log loss, fails if no prediction was added
    pub fn mean(&self) -> Result<F> {
        if self.count == 0 {
            return Err(Error::NotEnoughSamples);
        }
        Ok(self.sum / F::cast(self.count))
    }
}

/// Classification metrics for a batch of predicted probabilities
pub trait BinaryClassification<F> {
    /// Mean bounded log loss against the binary targets
    fn log_loss(&self, targets: &[bool]) -> Result<F>;
}

impl<F: Float> BinaryClassification<F> for [F] {
    fn log_loss(&self, targets: &[bool]) -> Result<F> {
        if self.len() != targets.len() {
            return Err(Error::MismatchedShapes(self.len(), targets.len()));
        }

        let mut acc = LogLossAccumulator::new();
        for (p, y) in self.iter().zip(targets) {
            acc.add(*y, *p);
        }
        acc.mean()
    }
}
