//! Property tests over randomly generated server lists.

use std::collections::HashSet;

use ketama::ring::point_groups;
use ketama::{Continuum, ServerSpec};
use proptest::prelude::*;

fn server_list() -> impl Strategy<Value = Vec<ServerSpec>> {
    prop::collection::vec(1u64..10_000, 1..12).prop_map(|weights| {
        weights
            .into_iter()
            .enumerate()
            .map(|(i, w)| ServerSpec::new(format!("10.1.0.{i}:11211"), w))
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: point count is the sum of 4 * groups per server
    #[test]
    fn prop_point_count(servers in server_list()) {
        let ring = Continuum::build(&servers).unwrap();
        let total: u64 = servers.iter().map(|s| s.weight).sum();
        let expected: usize = servers
            .iter()
            .map(|s| 4 * point_groups(s.weight, total, servers.len()))
            .sum();
        prop_assert_eq!(ring.point_count(), expected);
        prop_assert!(!ring.is_empty());
    }

    /// Property: points are non-decreasing by token
    #[test]
    fn prop_sorted(servers in server_list()) {
        let ring = Continuum::build(&servers).unwrap();
        prop_assert!(ring.points().windows(2).all(|w| w[0].token <= w[1].token));
    }

    /// Property: every key maps to a supplied server
    #[test]
    fn prop_coverage(
        servers in server_list(),
        keys in prop::collection::vec(any::<Vec<u8>>(), 1..50)
    ) {
        let ring = Continuum::build(&servers).unwrap();
        let known: HashSet<&str> = servers.iter().map(|s| s.addr.as_str()).collect();
        for key in &keys {
            let owner = ring.pick_server(key).unwrap();
            prop_assert!(known.contains(owner.as_str()));
        }
    }

    /// Property: rebuilding from the same list gives the same answers
    #[test]
    fn prop_deterministic(servers in server_list(), key in ".*") {
        let a = Continuum::build(&servers).unwrap();
        let b = Continuum::build(&servers).unwrap();
        prop_assert_eq!(a.pick_server(&key).unwrap(), b.pick_server(&key).unwrap());
        prop_assert_eq!(a.pick_index(&key).unwrap(), b.pick_index(&key).unwrap());
    }

    /// Property: the owning point is the first at or after the key's hash
    #[test]
    fn prop_owner_is_successor(servers in server_list(), key in any::<Vec<u8>>()) {
        let ring = Continuum::build(&servers).unwrap();
        let h = ketama::Token::from_key(&key);
        let idx = ring.pick_index(&key).unwrap();
        let points = ring.points();
        if points[idx].token >= h {
            prop_assert!(idx == 0 || points[idx - 1].token < h);
        } else {
            prop_assert_eq!(idx, 0);
            prop_assert!(points.last().unwrap().token < h);
        }
    }
}
