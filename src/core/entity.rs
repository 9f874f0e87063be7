//! Stable identifiers for equipped instances.
//!
//! Every card placed in an equip slot receives a `SlotId` that never changes
//! while it stays equipped. Satchel contents are keyed by this id, so
//! removing an item from the middle of the equip row never re-indexes
//! another satchel.
//!
//! ```
//! use frontier_engine::core::{SlotId, SlotAllocator};
//!
//! let mut ids = SlotAllocator::default();
//! let first = ids.next_id();
//! let second = ids.next_id();
//! assert_ne!(first, second);
//! assert_eq!(second, SlotId(1));
//! ```

use serde::{Deserialize, Serialize};

/// Opaque identifier of one equipped instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotId(pub u32);

impl std::fmt::Display for SlotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "slot#{}", self.0)
    }
}

/// Monotonic `SlotId` source, persisted with the player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotAllocator(u32);

impl SlotAllocator {
    /// Hand out the next unused id.
    pub fn next_id(&mut self) -> SlotId {
        let id = SlotId(self.0);
        self.0 = self.0.wrapping_add(1);
        id
    }

    /// Make sure future ids never collide with `used`.
    pub fn reserve_past(&mut self, used: SlotId) {
        self.0 = self.0.max(used.0.wrapping_add(1));
    }
}
