//! Positions on the 32-bit ketama ring.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::digest;

/// Number of distinct positions on the ring (`2^32`).
pub const RING_SIZE: u64 = 1 << 32;

/// A point value on the ring.
///
/// Ordering follows the numeric value, so sorting tokens lays them out
/// clockwise from zero.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(pub u32);

impl Token {
    /// Minimum token value (start of ring).
    pub const fn zero() -> Self {
        Token(0)
    }

    /// Maximum token value (end of ring).
    pub const fn max() -> Self {
        Token(u32::MAX)
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn is_max(&self) -> bool {
        self.0 == u32::MAX
    }

    /// Hashes a lookup key onto the ring.
    pub fn from_key(key: &[u8]) -> Self {
        Token(digest::hash_key(key))
    }

    /// Clockwise distance from `self` to `other`.
    ///
    /// Equal tokens are a full turn apart, which is what a ring with a
    /// single point needs: that point owns the whole space.
    pub fn distance_to(&self, other: &Self) -> u64 {
        let (from, to) = (u64::from(self.0), u64::from(other.0));
        if to > from {
            to - from
        } else {
            RING_SIZE - from + to
        }
    }
}

impl From<u32> for Token {
    fn from(value: u32) -> Self {
        Token(value)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}", self.0)
    }
}
