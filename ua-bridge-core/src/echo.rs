//! Suppression of value-changed echoes for locally issued writes.
//!
//! A local value write makes the store emit the same value-changed event it
//! emits for peer-originated writes. Each local write marks its node before
//! the store call; the matching event consumes one mark and is dropped.
//! Generation counters per node keep this correct when writes to different
//! nodes are in flight at the same time.

use std::collections::HashMap;
use std::sync::Mutex;
use ua_bridge_sdk::NodeId;

#[derive(Default)]
pub struct EchoGuard {
    pending: Mutex<HashMap<NodeId, u32>>,
}

impl EchoGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one expected echo for the node. Call before the store write.
    pub fn mark(&self, node_id: &NodeId) {
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        *pending.entry(node_id.clone()).or_insert(0) += 1;
    }

    /// Consume one expected echo. Returns true when the event was an echo of
    /// a local write and must not be forwarded.
    pub fn absorb(&self, node_id: &NodeId) -> bool {
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        match pending.get_mut(node_id) {
            Some(count) => {
                *count -= 1;
                if *count == 0 {
                    pending.remove(node_id);
                }
                true
            }
            None => false,
        }
    }
}
