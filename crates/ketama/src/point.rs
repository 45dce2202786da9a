//! Ring points.
//!
//! Each server is expanded into groups of four points. A group is seeded by
//! the string `"ketama: {addr}-{group}"`; its MD5 digest yields one point per
//! 4-byte window.
//!
//! ```
//! use ketama::point::{seed, RingPoint};
//! use ketama::ServerAddr;
//!
//! let addr = ServerAddr::parse("10.0.0.1:11211").unwrap();
//! assert_eq!(seed(&addr, 7), "ketama: 10.0.0.1:11211-7");
//! assert_eq!(RingPoint::group(&addr, 7).len(), 4);
//! ```

use std::cmp::Ordering;
use std::fmt;

use crate::digest::{self, WINDOWS_PER_DIGEST};
use crate::server::ServerAddr;
use crate::token::Token;

/// Renders the seed string for one point group of `addr`.
pub fn seed(addr: &ServerAddr, group: usize) -> String {
    format!("ketama: {addr}-{group}")
}

/// A single (token, server) entry on the continuum.
///
/// Equality and ordering only look at the token.
#[derive(Clone, Debug)]
pub struct RingPoint {
    pub token: Token,
    pub server: ServerAddr,
}

impl RingPoint {
    #[inline]
    pub fn new(token: Token, server: ServerAddr) -> Self {
        Self { token, server }
    }

    /// Generates the four points of group `group` for `addr`, in window order.
    pub fn group(addr: &ServerAddr, group: usize) -> [RingPoint; WINDOWS_PER_DIGEST] {
        let digest = digest::digest(seed(addr, group).as_bytes());
        std::array::from_fn(|window| {
            RingPoint::new(
                Token(digest::extract_u32_le(&digest, window)),
                addr.clone(),
            )
        })
    }

    #[inline]
    pub fn token(&self) -> Token {
        self.token
    }

    #[inline]
    pub fn server(&self) -> &ServerAddr {
        &self.server
    }
}

impl PartialEq for RingPoint {
    fn eq(&self, other: &Self) -> bool {
        self.token == other.token
    }
}

impl Eq for RingPoint {}

impl PartialOrd for RingPoint {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RingPoint {
    fn cmp(&self, other: &Self) -> Ordering {
        self.token.cmp(&other.token)
    }
}

impl fmt::Display for RingPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.token, self.server)
    }
}
