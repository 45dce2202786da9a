//! Server definitions fed into the ring builder.
//!
//! `ServerSpec` is the raw input a host process hands over (usually loaded
//! from configuration). `ServerAddr` is its canonical, validated form: the
//! exact string embedded in point seeds, so two clients that agree on the
//! address agree on the ring.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Canonical server identifier.
///
/// Non-empty, with no whitespace or control characters. Cloning is cheap;
/// every ring point shares the same allocation.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ServerAddr(Arc<str>);

impl ServerAddr {
    /// Validates `addr` and returns its canonical form.
    pub fn parse(addr: &str) -> Result<Self> {
        if addr.is_empty() {
            return Err(Error::malformed("empty server address"));
        }
        if let Some(c) = addr.chars().find(|c| c.is_whitespace() || c.is_control()) {
            return Err(Error::malformed(format!(
                "server address {addr:?} contains {c:?}"
            )));
        }
        Ok(ServerAddr(Arc::from(addr)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServerAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for ServerAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ServerAddr({:?})", &*self.0)
    }
}

impl FromStr for ServerAddr {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ServerAddr {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<ServerAddr> for String {
    fn from(addr: ServerAddr) -> Self {
        addr.0.to_string()
    }
}

impl AsRef<str> for ServerAddr {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for ServerAddr {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for ServerAddr {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

fn default_weight() -> u64 {
    1
}

/// A server as supplied by the caller: an address and a relative weight
/// (typically memory size).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSpec {
    pub addr: String,
    #[serde(default = "default_weight")]
    pub weight: u64,
}

impl ServerSpec {
    pub fn new(addr: impl Into<String>, weight: u64) -> Self {
        Self {
            addr: addr.into(),
            weight,
        }
    }

    /// Canonicalizes the address.
    pub fn canonical_addr(&self) -> Result<ServerAddr> {
        ServerAddr::parse(&self.addr)
    }
}

/// Parses `addr=weight`, or a bare `addr` with weight 1.
///
/// The weight is split off the last `=`.
impl FromStr for ServerSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (addr, weight) = match s.rsplit_once('=') {
            Some((addr, weight)) => {
                let weight = weight.parse::<u64>().map_err(|e| {
                    Error::malformed(format!("invalid weight {weight:?} for {addr:?}: {e}"))
                })?;
                (addr, weight)
            }
            None => (s, default_weight()),
        };
        ServerAddr::parse(addr)?;
        Ok(Self::new(addr, weight))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_addr() {
        let addr = ServerAddr::parse("10.0.0.1:11211").unwrap();
        assert_eq!(addr.as_str(), "10.0.0.1:11211");
        assert_eq!(addr.to_string(), "10.0.0.1:11211");
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert!(matches!(
            ServerAddr::parse(""),
            Err(Error::MalformedServer(_))
        ));
    }

    #[test]
    fn test_parse_rejects_whitespace_and_control() {
        for bad in ["a b", " a", "a\n", "a\u{7}b", "a\tb"] {
            assert!(
                matches!(ServerAddr::parse(bad), Err(Error::MalformedServer(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_clone_shares_storage() {
        let a = ServerAddr::parse("cache-1").unwrap();
        let b = a.clone();
        assert!(Arc::ptr_eq(&a.0, &b.0));
    }

    #[test]
    fn test_spec_from_str() {
        assert_eq!(
            "cache-1:11211=1024".parse::<ServerSpec>().unwrap(),
            ServerSpec::new("cache-1:11211", 1024)
        );
        assert_eq!(
            "cache-2".parse::<ServerSpec>().unwrap(),
            ServerSpec::new("cache-2", 1)
        );
        assert!(matches!(
            "cache-3=lots".parse::<ServerSpec>(),
            Err(Error::MalformedServer(_))
        ));
        assert!(matches!(
            "=5".parse::<ServerSpec>(),
            Err(Error::MalformedServer(_))
        ));
    }

    #[test]
    fn test_spec_deserialize_default_weight() {
        let specs: Vec<ServerSpec> =
            serde_json::from_str(r#"[{"addr":"a","weight":3},{"addr":"b"}]"#).unwrap();
        assert_eq!(specs, vec![ServerSpec::new("a", 3), ServerSpec::new("b", 1)]);
    }

    #[test]
    fn test_addr_deserialize_validates() {
        let ok: ServerAddr = serde_json::from_str(r#""cache-1""#).unwrap();
        assert_eq!(ok, "cache-1");
        assert!(serde_json::from_str::<ServerAddr>(r#""""#).is_err());
    }
}
