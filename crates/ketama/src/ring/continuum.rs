//! The built, immutable ring and key lookup.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::point::RingPoint;
use crate::ring::builder;
use crate::server::{ServerAddr, ServerSpec};
use crate::token::{Token, RING_SIZE};

/// A sorted sequence of ring points.
///
/// Immutable once built; share it behind an `Arc` for concurrent lookups.
/// `Continuum::default()` is the empty ring, on which every lookup fails
/// with [`Error::NoServers`].
#[derive(Debug, Clone, Default)]
pub struct Continuum {
    points: Vec<RingPoint>,
    servers: Vec<ServerAddr>,
}

impl Continuum {
    /// Builds a continuum from `servers`.
    ///
    /// Fails with [`Error::NoServers`] when the list is empty or its total
    /// weight is zero, and with [`Error::MalformedServer`] when an address
    /// cannot be canonicalized.
    pub fn build(servers: &[ServerSpec]) -> Result<Self> {
        let built = builder::build_points(servers)?;
        Ok(Self {
            points: built.points,
            servers: built.servers,
        })
    }

    /// Total number of points on the ring.
    #[inline]
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points in ascending token order.
    pub fn points(&self) -> &[RingPoint] {
        &self.points
    }

    /// Distinct servers in the order they were supplied.
    pub fn servers(&self) -> &[ServerAddr] {
        &self.servers
    }

    /// Index of the point owning `key`: the first point whose token is
    /// `>= hash(key)`, wrapping to 0 past the last point.
    pub fn pick_index<K: AsRef<[u8]>>(&self, key: K) -> Result<usize> {
        if self.points.is_empty() {
            return Err(Error::NoServers);
        }
        Ok(self.index_for(Token::from_key(key.as_ref())))
    }

    /// Maps `key` to its owning server.
    pub fn pick_server<K: AsRef<[u8]>>(&self, key: K) -> Result<&ServerAddr> {
        let idx = self.pick_index(key)?;
        Ok(&self.points[idx].server)
    }

    fn index_for(&self, token: Token) -> usize {
        let idx = self.points.partition_point(|p| p.token < token);
        if idx == self.points.len() {
            0
        } else {
            idx
        }
    }

    /// Fraction of the 32-bit key space each server owns, in server order.
    ///
    /// A point owns the arc after its predecessor up to and including its own
    /// token. Of several points sharing a token only the first owns anything.
    pub fn ownership(&self) -> Vec<(ServerAddr, f64)> {
        let mut spans: HashMap<&ServerAddr, u64> = HashMap::with_capacity(self.servers.len());
        let n = self.points.len();
        for (i, point) in self.points.iter().enumerate() {
            let prev = &self.points[(i + n - 1) % n];
            let span = if i > 0 && prev.token == point.token {
                0
            } else {
                prev.token.distance_to(&point.token)
            };
            *spans.entry(&point.server).or_default() += span;
        }

        self.servers
            .iter()
            .map(|s| {
                let span = spans.get(s).copied().unwrap_or(0);
                (s.clone(), span as f64 / RING_SIZE as f64)
            })
            .collect()
    }
}
