//! Diagnostic snapshot of a node for reporting.

use serde::{Deserialize, Serialize};

use crate::model::{IoNode, NodeFamily, SignalCounters};
use crate::Result;

/// One occupied slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotReport {
    /// 1-based slot number.
    pub slot: usize,
    pub name: String,
    pub address_area: u32,
}

/// Serializable view of an [`IoNode`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeReport {
    pub type_str: Option<String>,
    pub name: Option<String>,
    pub ip: Option<String>,
    pub location: Option<String>,
    pub n: i32,
    pub node_number: i32,
    pub family: NodeFamily,
    pub is_coupler: bool,
    pub counters: SignalCounters,
    pub address_area_cursor: u32,
    /// `None` when the node's address area policy is unavailable.
    pub max_address_area: Option<u32>,
    pub slots: Vec<SlotReport>,
}

impl NodeReport {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl IoNode {
    pub fn report(&self) -> NodeReport {
        NodeReport {
            type_str: self.type_str().map(str::to_owned),
            name: self.name().map(str::to_owned),
            ip: self.ip().map(str::to_owned),
            location: self.location().map(str::to_owned),
            n: self.n(),
            node_number: self.node_number(),
            family: self.family(),
            is_coupler: self.is_coupler(),
            counters: *self.counters(),
            address_area_cursor: self.address_area_cursor(),
            max_address_area: self.address_area().map(|a| a.max_address_area),
            slots: self
                .modules()
                .map(|(slot, m)| SlotReport {
                    slot,
                    name: m.name().to_string(),
                    address_area: m.address_area(),
                })
                .collect(),
        }
    }
}
