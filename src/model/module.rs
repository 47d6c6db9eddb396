//! I/O modules as seen by a node.
//!
//! Modules are supplied by the surrounding project model. A node only needs
//! a module's name and the number of address area units it occupies.

use std::fmt::Debug;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Capability set a node needs from a physical I/O module.
pub trait IoModule: Debug + Send + Sync {
    fn name(&self) -> &str;

    /// Address area units the module consumes.
    fn address_area(&self) -> u32;

    fn is_empty(&self) -> bool {
        self.name().is_empty()
    }
}

/// Placeholder reported for unassigned slots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmptyModule;

impl IoModule for EmptyModule {
    fn name(&self) -> &str {
        ""
    }

    fn address_area(&self) -> u32 {
        0
    }
}

/// Plain module value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    pub name: String,
    pub address_area: u32,
}

impl Module {
    pub fn new(name: impl Into<String>, address_area: u32) -> Self {
        Self {
            name: name.into(),
            address_area,
        }
    }

    pub fn shared(self) -> Arc<dyn IoModule> {
        Arc::new(self)
    }
}

impl IoModule for Module {
    fn name(&self) -> &str {
        &self.name
    }

    fn address_area(&self) -> u32 {
        self.address_area
    }
}
