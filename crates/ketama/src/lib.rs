//! Ketama consistent hashing.
//!
//! This crate computes a weighted ring ("continuum") of MD5-derived points
//! over a set of servers and maps keys to the server owning the first point
//! at or after the key's hash. Adding, removing, or reweighting a server
//! only moves the keys that have to move.
//!
//! - Digest helpers (MD5, little-endian `u32` windows)
//! - Ring tokens and points
//! - Ring construction and lookup
//! - A shared handle for swapping rebuilt rings
//!
//! The point layout follows the legacy ketama scheme exactly so that other
//! ketama clients route every key the same way.
//!
//! ```
//! use ketama::{Continuum, ServerSpec};
//!
//! let ring = Continuum::build(&[ServerSpec::new("A", 1), ServerSpec::new("B", 1)]).unwrap();
//! let owner = ring.pick_server("user:42").unwrap();
//! assert!(*owner == "A" || *owner == "B");
//! ```

pub mod digest;
pub mod error;
pub mod point;
pub mod ring;
pub mod server;
pub mod token;
pub mod topology;

pub use error::{Error, Result};
pub use point::RingPoint;
pub use ring::{Continuum, RingBuilder};
pub use server::{ServerAddr, ServerSpec};
pub use token::Token;
pub use topology::Topology;
