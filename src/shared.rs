//! Exclusively locked node handle.
//!
//! Allocation is order dependent, so one node must only ever be mutated by
//! one allocation pass at a time. `SharedIoNode` holds the node behind a
//! single mutex; distinct nodes have distinct locks and never contend.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::model::{IoModule, IoNode};
use crate::Result;

/// Cloneable handle to one [`IoNode`]. Clones share the same node.
#[derive(Debug, Clone)]
pub struct SharedIoNode {
    inner: Arc<Mutex<IoNode>>,
}

impl SharedIoNode {
    pub fn new(node: IoNode) -> Self {
        Self {
            inner: Arc::new(Mutex::new(node)),
        }
    }

    /// [`IoNode::set_module`] under the node lock.
    pub fn set_module(&self, module: Arc<dyn IoModule>, slot_number: usize) -> Result<()> {
        self.inner.lock().set_module(module, slot_number)
    }

    pub fn read<R>(&self, f: impl FnOnce(&IoNode) -> R) -> R {
        f(&self.inner.lock())
    }

    pub fn write<R>(&self, f: impl FnOnce(&mut IoNode) -> R) -> R {
        f(&mut self.inner.lock())
    }

    /// Copy of the node as it is right now.
    pub fn snapshot(&self) -> IoNode {
        self.inner.lock().clone()
    }
}

impl From<IoNode> for SharedIoNode {
    fn from(node: IoNode) -> Self {
        Self::new(node)
    }
}
