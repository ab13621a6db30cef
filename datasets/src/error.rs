use thiserror::Error;

pub type Result<T> = std::result::Result<T, DatasetError>;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("column `{0}` is missing")]
    MissingColumn(String),
    #[error("record {ordinal} has label `{value}`, expected `0` or `1`")]
    InvalidLabel { ordinal: usize, value: String },
    #[error(transparent)]
    AdclickError(#[from] adclick::Error),
}
