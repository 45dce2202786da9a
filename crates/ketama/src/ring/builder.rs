//! Ring construction.
//!
//! # Algorithm
//!
//! For each server, in input order:
//!
//! 1. `fraction = weight / total_weight`
//! 2. `groups = floor(fraction * 40 * num_servers)`
//! 3. for each group `k` in `0..groups`, digest `"ketama: {addr}-{k}"` and
//!    emit one point per little-endian `u32` window (4 per group).
//!
//! The points are then stable-sorted by token. Among equal tokens the point
//! generated first keeps the lower index, and lookups return the lowest
//! index `>= hash`, so the earlier server in the input list wins a
//! collision.

use std::collections::HashSet;

use tracing::{debug, warn};

use super::continuum::Continuum;
use crate::digest::WINDOWS_PER_DIGEST;
use crate::error::{Error, Result};
use crate::point::RingPoint;
use crate::server::{ServerAddr, ServerSpec};

/// Point groups handed out per server when all weights are equal.
pub const POINT_GROUPS_PER_SERVER: usize = 40;

/// Points produced by one group (one digest).
pub const POINTS_PER_GROUP: usize = WINDOWS_PER_DIGEST;

/// Number of point groups a server of `weight` receives.
///
/// Evaluated in `f64` in the same order as other ketama clients so the
/// result (including rounding at the boundary) is identical across them.
pub fn point_groups(weight: u64, total_weight: u64, num_servers: usize) -> usize {
    let fraction = weight as f64 / total_weight as f64;
    (fraction * POINT_GROUPS_PER_SERVER as f64 * num_servers as f64).floor() as usize
}

/// Fluent collection of servers for a continuum.
///
/// ```
/// use ketama::RingBuilder;
///
/// let ring = RingBuilder::new()
///     .add_server("A", 1)
///     .add_server("B", 1)
///     .build()
///     .unwrap();
/// assert_eq!(ring.point_count(), 320);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RingBuilder {
    servers: Vec<ServerSpec>,
}

impl RingBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_server(mut self, addr: impl Into<String>, weight: u64) -> Self {
        self.servers.push(ServerSpec::new(addr, weight));
        self
    }

    pub fn add_servers<I>(mut self, servers: I) -> Self
    where
        I: IntoIterator<Item = ServerSpec>,
    {
        self.servers.extend(servers);
        self
    }

    pub fn servers(&self) -> &[ServerSpec] {
        &self.servers
    }

    pub fn build(self) -> Result<Continuum> {
        Continuum::build(&self.servers)
    }
}

/// Output of a successful build: sorted points plus the distinct servers in
/// input order.
pub(crate) struct Built {
    pub points: Vec<RingPoint>,
    pub servers: Vec<ServerAddr>,
}

pub(crate) fn build_points(specs: &[ServerSpec]) -> Result<Built> {
    if specs.is_empty() {
        return Err(Error::NoServers);
    }

    // Canonicalize everything up front; a build either succeeds whole or not
    // at all.
    let addrs = specs
        .iter()
        .map(ServerSpec::canonical_addr)
        .collect::<Result<Vec<_>>>()?;

    let total_weight = specs
        .iter()
        .try_fold(0u64, |acc, s| acc.checked_add(s.weight))
        .ok_or_else(|| Error::malformed("total server weight overflows u64"))?;
    if total_weight == 0 {
        return Err(Error::NoServers);
    }

    let num_servers = specs.len();
    let mut points =
        Vec::with_capacity(num_servers * POINT_GROUPS_PER_SERVER * POINTS_PER_GROUP);
    let mut servers = Vec::with_capacity(num_servers);
    let mut seen = HashSet::with_capacity(num_servers);

    for (addr, spec) in addrs.into_iter().zip(specs) {
        let groups = point_groups(spec.weight, total_weight, num_servers);
        if groups == 0 {
            warn!(server = %addr, weight = spec.weight, "server receives no ring points");
        }
        debug!(server = %addr, weight = spec.weight, points = groups * POINTS_PER_GROUP, "placing server");

        for group in 0..groups {
            points.extend(RingPoint::group(&addr, group));
        }

        if seen.insert(addr.clone()) {
            servers.push(addr);
        } else {
            warn!(server = %addr, "duplicate server address in list");
        }
    }

    sort_points(&mut points);
    debug!(
        servers = num_servers,
        points = points.len(),
        total_weight,
        "built continuum"
    );

    Ok(Built { points, servers })
}

/// Stable sort by token; equal tokens keep generation order.
fn sort_points(points: &mut [RingPoint]) {
    points.sort_by_key(|p| p.token);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Token;

    fn specs(list: &[(&str, u64)]) -> Vec<ServerSpec> {
        list.iter().map(|(a, w)| ServerSpec::new(*a, *w)).collect()
    }

    #[test]
    fn test_point_groups_equal_weights() {
        assert_eq!(point_groups(1, 2, 2), 40);
        assert_eq!(point_groups(5, 20, 4), 40);
        assert_eq!(point_groups(1, 5, 5), 40);
    }

    #[test]
    fn test_point_groups_weighted() {
        // 3/4 * 40 * 2
        assert_eq!(point_groups(3, 4, 2), 60);
        assert_eq!(point_groups(1, 4, 2), 20);
        assert_eq!(point_groups(0, 4, 2), 0);
    }

    #[test]
    fn test_point_groups_floors() {
        // 1/1000 * 40 * 2 = 0.08
        assert_eq!(point_groups(1, 1000, 2), 0);
        // 1/7 * 40 * 7 lands just below 40 in f64
        assert_eq!(point_groups(1, 7, 7), 39);
        assert_eq!(point_groups(1, 3, 3), 40);
    }

    #[test]
    fn test_build_points_rejects_empty() {
        assert!(matches!(build_points(&[]), Err(Error::NoServers)));
    }

    #[test]
    fn test_build_points_rejects_zero_weight() {
        let servers = specs(&[("A", 0), ("B", 0)]);
        assert!(matches!(build_points(&servers), Err(Error::NoServers)));
    }

    #[test]
    fn test_build_points_rejects_overflow() {
        let servers = specs(&[("A", u64::MAX), ("B", 1)]);
        assert!(matches!(
            build_points(&servers),
            Err(Error::MalformedServer(_))
        ));
    }

    #[test]
    fn test_build_points_rejects_malformed_anywhere() {
        let servers = specs(&[("A", 1), ("", 1)]);
        assert!(matches!(
            build_points(&servers),
            Err(Error::MalformedServer(_))
        ));
    }

    #[test]
    fn test_build_points_dedups_server_list() {
        let built = build_points(&specs(&[("A", 1), ("B", 1), ("A", 1)])).unwrap();
        let names: Vec<&str> = built.servers.iter().map(|s| s.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn test_sort_is_stable_on_ties() {
        let a = ServerAddr::parse("A").unwrap();
        let b = ServerAddr::parse("B").unwrap();
        let mut points = vec![
            RingPoint::new(Token(7), b.clone()),
            RingPoint::new(Token(3), a.clone()),
            RingPoint::new(Token(7), a.clone()),
        ];
        sort_points(&mut points);
        assert_eq!(points[0].token, Token(3));
        assert_eq!(points[1].server, b);
        assert_eq!(points[2].server, a);
    }
}
