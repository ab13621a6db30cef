//! Provide traits for different classes of algorithms
//!

/// Incremental (online) training
///
/// An incremental learner consumes one record at a time and mutates its own state. Calls against
/// one instance must be strictly ordered, each update depends on the state left by the previous
/// one.
pub trait IncrementalFit<X: ?Sized, T> {
    type Error: std::error::Error;

    /// Update the model with a single record `x` and its target
    fn fit_one(&mut self, x: &X, target: T) -> Result<(), Self::Error>;
}

/// Probability prediction for binary classifiers
///
/// Returns the probability of the positive class for the record `x`. Implementors must not change
/// observable state when predicting.
pub trait PredictProbability<X: ?Sized, F> {
    type Error: std::error::Error;

    fn predict_probability(&self, x: &X) -> Result<F, Self::Error>;
}
