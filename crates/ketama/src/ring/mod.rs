//! The ketama continuum.
//!
//! A continuum is built once from a server list snapshot and then queried
//! any number of times. There are no mutation operations: a topology change
//! builds a new continuum (see [`crate::topology::Topology`]).

pub mod builder;
pub mod continuum;

pub use builder::{point_groups, RingBuilder, POINTS_PER_GROUP, POINT_GROUPS_PER_SERVER};
pub use continuum::Continuum;
