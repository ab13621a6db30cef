use adclick_datasets::DatasetError;
use adclick_ftrl::FtrlError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DriverError>;

#[derive(Error, Debug)]
pub enum DriverError {
    #[error(transparent)]
    FtrlError(#[from] FtrlError),
    #[error(transparent)]
    DatasetError(#[from] DatasetError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("invalid grid configuration: {0}")]
    Config(#[from] serde_json::Error),
    #[error("hyperparameter grid has no `{0}` values")]
    EmptyGrid(&'static str),
    #[error("holdout period must be bigger than 0")]
    InvalidHoldout,
    #[error("no record was held out for validation")]
    NoHoldout,
    #[error("record {ordinal} (id {id}) has no label")]
    MissingLabel { ordinal: usize, id: String },
    #[error(transparent)]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
