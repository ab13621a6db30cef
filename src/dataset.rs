//! Datasets
//!
//! Records in this workspace are sparse: an example only lists the coordinates that are active,
//! every active coordinate carries the implicit value `1`.
use num_traits::{FromPrimitive, NumAssignOps, NumCast};

use std::fmt;
use std::iter::Sum;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// Floating point numbers
///
/// This trait bound multiplexes to the most common assumption of floating point number and
/// implement them for 32bit and 64bit floating points. Learner state is generic over it, 64bit is
/// recommended for long streams since the squared-gradient sums grow without bound.
pub trait Float:
    FromPrimitive
    + num_traits::Float
    + PartialOrd
    + Sync
    + Send
    + Default
    + fmt::Display
    + fmt::Debug
    + Sum
    + NumAssignOps
    + 'static
{
    fn cast<T: NumCast>(x: T) -> Self {
        NumCast::from(x).unwrap()
    }
}

impl Float for f32 {}

impl Float for f64 {}

/// A single sparse, binary labelled record
///
/// `indices` are coordinates in the hashed index space of the learner. Index `0` is the bias and
/// is always present in records produced by the feature extractor. Coordinates are kept in the
/// order the extractor produced them and are not deduplicated.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct Example {
    /// Zero based position of the record in its stream
    pub ordinal: usize,
    /// External identifier, echoed into prediction output
    pub id: String,
    /// Active coordinates
    pub indices: Vec<usize>,
    /// Click label, `None` for unlabelled (test) records
    pub label: Option<bool>,
}

impl Example {
    pub fn new(
        ordinal: usize,
        id: impl Into<String>,
        indices: Vec<usize>,
        label: Option<bool>,
    ) -> Self {
        Example {
            ordinal,
            id: id.into(),
            indices,
            label,
        }
    }
}
