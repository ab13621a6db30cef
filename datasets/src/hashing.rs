//! Hashing trick for categorical fields
//!
//! Every `field=value` pair is one-hot encoded into a single coordinate of a fixed size index
//! space. Coordinate `0` is reserved for the bias and never produced by a field.
use crate::error::Result;

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Index of the bias coordinate, present in every hashed record
pub const BIAS_INDEX: usize = 0;

fn fnv1a(mut hash: u64, bytes: &[u8]) -> u64 {
    for &b in bytes {
        hash ^= u64::from(b);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// Maps `field=value` pairs into `[0, n_coordinates)`
///
/// The hash is FNV-1a (64 bit) of the bytes of `"{field}_{value}"`, so indices are stable across
/// runs and platforms.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeatureHasher {
    n_coordinates: usize,
}

impl FeatureHasher {
    pub fn new(n_coordinates: usize) -> Result<Self> {
        if n_coordinates == 0 {
            return Err(adclick::Error::Parameters(
                "number of coordinates must be bigger than 0".to_string(),
            )
            .into());
        }
        Ok(FeatureHasher { n_coordinates })
    }

    /// Hasher for an index space of `2^bits` coordinates
    pub fn with_bits(bits: u32) -> Result<Self> {
        match 1usize.checked_shl(bits) {
            Some(n_coordinates) if n_coordinates > 0 => Self::new(n_coordinates),
            _ => Err(adclick::Error::Parameters(format!(
                "{} bits do not fit into the index type",
                bits
            ))
            .into()),
        }
    }

    pub fn n_coordinates(&self) -> usize {
        self.n_coordinates
    }

    /// Coordinate of a single `field=value` pair, in `[1, n_coordinates)` unless the index space
    /// only holds the bias
    pub fn index(&self, field: &str, value: &str) -> usize {
        if self.n_coordinates == 1 {
            return BIAS_INDEX;
        }
        let hash = fnv1a(FNV_OFFSET_BASIS, field.as_bytes());
        let hash = fnv1a(hash, b"_");
        let hash = fnv1a(hash, value.as_bytes());
        1 + (hash % (self.n_coordinates as u64 - 1)) as usize
    }

    /// Active coordinates of a record: the bias followed by one coordinate per field
    ///
    /// Fields are visited in order of their names so that the output does not depend on the
    /// column order of the input. Colliding fields are kept twice.
    pub fn hash_fields<'a, I>(&self, fields: I) -> Vec<usize>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut fields: Vec<_> = fields.into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(b.0));

        let mut indices = Vec::with_capacity(fields.len() + 1);
        indices.push(BIAS_INDEX);
        indices.extend(fields.into_iter().map(|(f, v)| self.index(f, v)));
        indices
    }
}
