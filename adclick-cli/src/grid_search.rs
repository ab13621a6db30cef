use std::cmp::Ordering;
use std::time::{Duration, Instant};

use adclick::{Example, ParamGuard};
use adclick_ftrl::{FollowTheRegularizedLeader, FtrlValidParams};
use log::info;
use rayon::prelude::*;

use crate::config::GridConfig;
use crate::error::Result;
use crate::holdout::{train_with_holdout, Holdout};

/// Holdout result of one hyperparameter combination
#[derive(Clone, Debug, PartialEq)]
pub struct TrialSummary {
    /// Position of the combination in the grid
    pub index: usize,
    pub alpha: f64,
    pub beta: f64,
    pub lambda1: f64,
    pub lambda2: f64,
    pub log_loss: f64,
    pub holdout_examples: usize,
    pub elapsed: Duration,
}

impl TrialSummary {
    /// Order by holdout log loss, ties go to the combination that comes first in the grid
    pub fn rank(&self, other: &Self) -> Ordering {
        self.log_loss
            .total_cmp(&other.log_loss)
            .then(self.index.cmp(&other.index))
    }
}

/// Outcome of a grid search
pub struct GridSearchResult {
    pub best: TrialSummary,
    /// Learner of the best combination, trained on the non-held-out records
    pub model: FollowTheRegularizedLeader<f64>,
    /// All trials in grid order
    pub trials: Vec<TrialSummary>,
}

/// Exhaustive search over a hyperparameter grid with holdout validation
///
/// Every combination gets a fresh learner and a fresh pass over the training stream. Learners
/// share no state, with more than one job they are trained on a rayon thread pool.
#[derive(Clone, Debug)]
pub struct GridSearch {
    grid: GridConfig,
    n_coordinates: usize,
    holdout: Holdout,
    jobs: usize,
}

impl GridSearch {
    pub fn new(grid: GridConfig, n_coordinates: usize, holdout: Holdout) -> Self {
        GridSearch {
            grid,
            n_coordinates,
            holdout,
            jobs: 1,
        }
    }

    /// Number of learners trained concurrently, defaults to `1`
    ///
    /// With more than one job only the hyperparameters of the winner are kept and its learner is
    /// trained once more after the search, each learner holds two arrays of `n_coordinates`.
    pub fn jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    /// Run the search, `source` opens a new pass over the training records
    pub fn run<S, I>(&self, source: S) -> Result<GridSearchResult>
    where
        S: Fn() -> adclick_datasets::Result<I> + Sync,
        I: IntoIterator<Item = adclick_datasets::Result<Example>>,
    {
        let params = self
            .grid
            .combinations(self.n_coordinates)?
            .into_iter()
            .map(|p| p.check())
            .collect::<std::result::Result<Vec<_>, _>>()?;
        info!(
            "grid search over {} combinations, holding out every {} records",
            params.len(),
            self.holdout.period()
        );

        if self.jobs == 1 {
            self.run_sequential(&params, &source)
        } else {
            self.run_parallel(&params, &source)
        }
    }

    fn run_sequential<S, I>(
        &self,
        params: &[FtrlValidParams<f64>],
        source: &S,
    ) -> Result<GridSearchResult>
    where
        S: Fn() -> adclick_datasets::Result<I>,
        I: IntoIterator<Item = adclick_datasets::Result<Example>>,
    {
        let mut trials = Vec::with_capacity(params.len());
        let mut best: Option<(TrialSummary, FollowTheRegularizedLeader<f64>)> = None;

        for (index, p) in params.iter().enumerate() {
            let (summary, model) = self.evaluate(index, p, source)?;
            let improves = best
                .as_ref()
                .map_or(true, |(b, _)| summary.rank(b) == Ordering::Less);
            trials.push(summary.clone());
            if improves {
                best = Some((summary, model));
            }
        }

        match best {
            Some((best, model)) => Ok(finish(best, model, trials)),
            None => unreachable!("a validated grid has at least one combination"),
        }
    }

    fn run_parallel<S, I>(
        &self,
        params: &[FtrlValidParams<f64>],
        source: &S,
    ) -> Result<GridSearchResult>
    where
        S: Fn() -> adclick_datasets::Result<I> + Sync,
        I: IntoIterator<Item = adclick_datasets::Result<Example>>,
    {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.jobs)
            .build()?;
        let trials = pool.install(|| {
            params
                .par_iter()
                .enumerate()
                .map(|(index, p)| self.evaluate(index, p, source).map(|(summary, _)| summary))
                .collect::<Result<Vec<_>>>()
        })?;

        let best = match trials.iter().min_by(|a, b| a.rank(b)) {
            Some(best) => best.clone(),
            None => unreachable!("a validated grid has at least one combination"),
        };
        info!("retraining the best combination #{}", best.index);
        let (_, model) = self.evaluate(best.index, &params[best.index], source)?;
        Ok(finish(best, model, trials))
    }

    fn evaluate<S, I>(
        &self,
        index: usize,
        params: &FtrlValidParams<f64>,
        source: &S,
    ) -> Result<(TrialSummary, FollowTheRegularizedLeader<f64>)>
    where
        S: Fn() -> adclick_datasets::Result<I>,
        I: IntoIterator<Item = adclick_datasets::Result<Example>>,
    {
        let start = Instant::now();
        let mut model = FollowTheRegularizedLeader::new(params.clone());
        let report = train_with_holdout(&mut model, source()?, self.holdout)?;

        let summary = TrialSummary {
            index,
            alpha: params.alpha(),
            beta: params.beta(),
            lambda1: params.lambda1(),
            lambda2: params.lambda2(),
            log_loss: report.log_loss,
            holdout_examples: report.holdout_examples,
            elapsed: start.elapsed(),
        };
        info!(
            "alpha: {}, beta: {}, lambda1: {}, lambda2: {}, logloss: {:.6}, elapsed: {:?}",
            summary.alpha,
            summary.beta,
            summary.lambda1,
            summary.lambda2,
            summary.log_loss,
            summary.elapsed
        );
        Ok((summary, model))
    }
}

fn finish(
    best: TrialSummary,
    model: FollowTheRegularizedLeader<f64>,
    trials: Vec<TrialSummary>,
) -> GridSearchResult {
    info!(
        "best: alpha: {}, beta: {}, lambda1: {}, lambda2: {}, holdout logloss: {:.6}",
        best.alpha, best.beta, best.lambda1, best.lambda2, best.log_loss
    );
    GridSearchResult {
        best,
        model,
        trials,
    }
}
