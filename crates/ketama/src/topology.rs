//! Shared handle over the current continuum.
//!
//! Lookups take a snapshot (`Arc<Continuum>`) and never block on a rebuild
//! beyond the pointer swap. A rebuild constructs a brand-new continuum and
//! replaces the pointer; snapshots taken earlier stay valid.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{info, warn};

use crate::error::Result;
use crate::ring::Continuum;
use crate::server::{ServerAddr, ServerSpec};

/// The continuum currently used for routing, swappable as a whole.
#[derive(Debug)]
pub struct Topology {
    current: RwLock<Arc<Continuum>>,
    generation: AtomicU64,
}

impl Topology {
    /// Builds the initial continuum.
    pub fn new(servers: &[ServerSpec]) -> Result<Self> {
        let continuum = Continuum::build(servers)?;
        Ok(Self::from_continuum(continuum))
    }

    pub fn from_continuum(continuum: Continuum) -> Self {
        Self {
            current: RwLock::new(Arc::new(continuum)),
            generation: AtomicU64::new(0),
        }
    }

    /// Snapshot of the current continuum.
    pub fn current(&self) -> Arc<Continuum> {
        self.current.read().clone()
    }

    /// Number of successful rebuilds since construction.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Rebuilds from `servers` and swaps the result in.
    ///
    /// On error the current continuum is left untouched.
    pub fn rebuild(&self, servers: &[ServerSpec]) -> Result<Arc<Continuum>> {
        let continuum = match Continuum::build(servers) {
            Ok(c) => Arc::new(c),
            Err(e) => {
                warn!(error = %e, "ring rebuild failed, keeping previous continuum");
                return Err(e);
            }
        };

        let mut current = self.current.write();
        *current = Arc::clone(&continuum);
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        drop(current);

        info!(
            generation,
            servers = continuum.servers().len(),
            points = continuum.point_count(),
            "swapped in rebuilt continuum"
        );
        Ok(continuum)
    }

    /// Looks `key` up against the current snapshot.
    pub fn pick_server<K: AsRef<[u8]>>(&self, key: K) -> Result<ServerAddr> {
        self.current().pick_server(key).cloned()
    }
}
