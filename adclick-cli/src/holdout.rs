use std::time::{Duration, Instant};

use adclick::metrics::LogLossAccumulator;
use adclick::traits::{IncrementalFit, PredictProbability};
use adclick::Example;

use crate::error::{DriverError, Result};

/// Every `period`-th record, counted from the first one, is held out from training
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Holdout {
    period: usize,
}

impl Holdout {
    pub fn every(period: usize) -> Result<Self> {
        if period == 0 {
            return Err(DriverError::InvalidHoldout);
        }
        Ok(Holdout { period })
    }

    pub fn period(&self) -> usize {
        self.period
    }

    pub fn is_held_out(&self, ordinal: usize) -> bool {
        ordinal % self.period == 0
    }
}

/// Outcome of one pass over a training stream
#[derive(Clone, Debug, PartialEq)]
pub struct HoldoutReport {
    /// Mean log loss over the held-out records
    pub log_loss: f64,
    pub holdout_examples: usize,
    pub trained_examples: usize,
    pub elapsed: Duration,
}

/// Train `learner` on a labelled stream while scoring the held-out records
///
/// Held-out records are predicted before the learner sees any later record, so the loss is an
/// out-of-sample estimate. Every record needs a label.
pub fn train_with_holdout<L, I>(
    learner: &mut L,
    examples: I,
    holdout: Holdout,
) -> Result<HoldoutReport>
where
    L: IncrementalFit<[usize], bool> + PredictProbability<[usize], f64>,
    DriverError: From<<L as IncrementalFit<[usize], bool>>::Error>
        + From<<L as PredictProbability<[usize], f64>>::Error>,
    I: IntoIterator<Item = adclick_datasets::Result<Example>>,
{
    let start = Instant::now();
    let mut loss = LogLossAccumulator::new();
    let mut trained_examples = 0;

    for example in examples {
        let example = example?;
        let label = match example.label {
            Some(label) => label,
            None => {
                return Err(DriverError::MissingLabel {
                    ordinal: example.ordinal,
                    id: example.id,
                })
            }
        };

        if holdout.is_held_out(example.ordinal) {
            let p = learner.predict_probability(&example.indices[..])?;
            loss.add(label, p);
        } else {
            learner.fit_one(&example.indices[..], label)?;
            trained_examples += 1;
        }
    }

    let log_loss = loss.mean().map_err(|_| DriverError::NoHoldout)?;
    Ok(HoldoutReport {
        log_loss,
        holdout_examples: loss.count(),
        trained_examples,
        elapsed: start.elapsed(),
    })
}
