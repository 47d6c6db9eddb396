//! # Address Area Policies
//!
//! Per-family capacity limits: how many module slots a node offers and how
//! many address area units its process image can hold.
//!
//! The table is an explicit configuration object. Callers build one (or use
//! the built-in [`AddressAreaPolicyTable::default`]) and hand it to the
//! nodes they construct, so every test and every project gets a fresh,
//! independent instance.
//!
//! ## Document format
//!
//! ```json
//! {
//!   "policies": [
//!     { "family": "PhoenixController", "max_module_slots": 64, "max_address_area": 512 }
//!   ]
//! }
//! ```

use std::fs;
use std::path::Path;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::model::NodeFamily;
use crate::{Error, Result};

// ============================================================================
// AddressArea
// ============================================================================

/// Capacity limits of one node family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AddressArea {
    /// Highest valid 1-based slot number.
    pub max_module_slots: usize,
    /// Address area units available to modules.
    pub max_address_area: u32,
}

impl AddressArea {
    pub const fn new(max_module_slots: usize, max_address_area: u32) -> Self {
        Self {
            max_module_slots,
            max_address_area,
        }
    }

    /// WAGO 750-863.
    pub const INTERNAL_750_86X: AddressArea = AddressArea::new(64, 256);
    /// WAGO Ethernet couplers and controllers.
    pub const ETHERNET: AddressArea = AddressArea::new(64, 512);
    /// WAGO PFC200 (750-820x).
    pub const INTERNAL_750_820X: AddressArea = AddressArea::new(64, 1024);
    /// Phoenix Contact Axioline couplers and PLCnext controllers.
    pub const PHOENIX_CONTACT: AddressArea = AddressArea::new(64, 512);
}

// ============================================================================
// AddressAreaPolicyTable
// ============================================================================

/// Family → address area lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressAreaPolicyTable {
    policies: HashMap<NodeFamily, AddressArea>,
}

#[derive(Debug, Serialize, Deserialize)]
struct PolicyDocument {
    policies: Vec<PolicyEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
struct PolicyEntry {
    family: NodeFamily,
    max_module_slots: usize,
    max_address_area: u32,
}

impl Default for AddressAreaPolicyTable {
    fn default() -> Self {
        Self::empty()
            .with_policy(NodeFamily::InternalBus750_86x, AddressArea::INTERNAL_750_86X)
            .with_policy(NodeFamily::Ethernet, AddressArea::ETHERNET)
            .with_policy(NodeFamily::InternalBus750_820x, AddressArea::INTERNAL_750_820X)
            .with_policy(NodeFamily::PhoenixCoupler, AddressArea::PHOENIX_CONTACT)
            .with_policy(NodeFamily::PhoenixController, AddressArea::PHOENIX_CONTACT)
    }
}

impl AddressAreaPolicyTable {
    /// A table without any policies. Every family resolves to `None`.
    pub fn empty() -> Self {
        Self {
            policies: HashMap::new(),
        }
    }

    pub fn with_policy(mut self, family: NodeFamily, policy: AddressArea) -> Self {
        self.insert(family, policy);
        self
    }

    /// Insert or replace a family's policy, returning the previous one.
    pub fn insert(&mut self, family: NodeFamily, policy: AddressArea) -> Option<AddressArea> {
        self.policies.insert(family, policy)
    }

    pub fn remove(&mut self, family: NodeFamily) -> Option<AddressArea> {
        self.policies.remove(&family)
    }

    pub fn resolve(&self, family: NodeFamily) -> Option<AddressArea> {
        self.policies.get(&family).copied()
    }

    pub fn len(&self) -> usize {
        self.policies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }

    /// Families with a policy, in [`NodeFamily::ALL`] order.
    pub fn families(&self) -> impl Iterator<Item = NodeFamily> + '_ {
        NodeFamily::ALL
            .into_iter()
            .filter(|family| self.policies.contains_key(family))
    }

    // ========================================================================
    // Loading / saving
    // ========================================================================

    pub fn from_json_str(json: &str) -> Result<Self> {
        let doc: PolicyDocument = serde_json::from_str(json)?;

        let mut table = Self::empty();
        for entry in doc.policies {
            if entry.max_module_slots == 0 {
                return Err(Error::Config(format!(
                    "{}: max_module_slots must be at least 1",
                    entry.family
                )));
            }
            let policy = AddressArea::new(entry.max_module_slots, entry.max_address_area);
            if table.insert(entry.family, policy).is_some() {
                return Err(Error::Config(format!(
                    "{}: duplicate address area policy",
                    entry.family
                )));
            }
        }

        tracing::debug!(families = table.len(), "loaded address area policies");
        Ok(table)
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn to_json_string(&self) -> Result<String> {
        let policies = self
            .families()
            .filter_map(|family| {
                self.resolve(family).map(|policy| PolicyEntry {
                    family,
                    max_module_slots: policy.max_module_slots,
                    max_address_area: policy.max_address_area,
                })
            })
            .collect();
        Ok(serde_json::to_string_pretty(&PolicyDocument { policies })?)
    }
}
