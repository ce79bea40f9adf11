//! Cart snapshot source
//!
//! The cart itself is owned by order bookkeeping outside this crate. The
//! engine only asks for the committed state at call time.

use shared::order::CartSnapshot;

/// Supplies the current cart as an immutable snapshot
pub trait CartSnapshotProvider: Send + Sync {
    fn current_snapshot(&self) -> anyhow::Result<CartSnapshot>;
}

/// A snapshot is trivially its own provider
impl CartSnapshotProvider for CartSnapshot {
    fn current_snapshot(&self) -> anyhow::Result<CartSnapshot> {
        Ok(self.clone())
    }
}
