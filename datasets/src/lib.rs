//! `adclick-datasets` turns raw click logs into streams of sparse examples.
//!
//! ## The Big Picture
//!
//! `adclick-datasets` is the feature extractor of the `adclick` workspace. It reads CSV click
//! logs, optionally gzip compressed, and one-hot encodes every categorical column with the
//! hashing trick into a fixed size index space. The learners never see strings.
//!
//! ## Current State
//!
//! * [`FeatureHasher`]: deterministic hashing of `field=value` pairs, coordinate `0` is the bias
//! * [`ClickRecords`]: lazy, one-pass iterator of [`adclick::Example`]s
//! * [`open`]: opens a plain or `.gz` file
//!
//! ## Reading a click log
//!
//! ```ignore
//! let hasher = FeatureHasher::with_bits(24)?;
//! for example in adclick_datasets::open("train.gz", hasher, &CsvOptions::default())? {
//!     let example = example?;
//!     // ...
//! }
//! ```

mod dataset;
mod error;
mod hashing;

pub use dataset::{open, records_from_gz_csv, ClickRecords, CsvOptions};
pub use error::{DatasetError, Result};
pub use hashing::{FeatureHasher, BIAS_INDEX};
