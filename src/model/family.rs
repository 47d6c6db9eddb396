//! Node family classification.
//!
//! A node's family is derived from the raw device type string found in the
//! CAD device list. Lookup is an exact, case-sensitive match against the
//! literal type tables below: no trimming, no prefix matching, no fuzzing.

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// Type tables
// ============================================================================

const INTERNAL_750_86X_TYPES: &[&str] = &["750-863"];

const ETHERNET_TYPES: &[&str] = &["750-341", "750-841", "750-352", "750-362"];

const INTERNAL_750_820X_TYPES: &[&str] = &[
    "750-8202", "750-8203", "750-8204", "750-8205", "750-8206",
];

const PHOENIX_COUPLER_TYPES: &[&str] = &["AXL F BK ETH", "AXL F BK ETH NET2"];

const PHOENIX_CONTROLLER_TYPES: &[&str] = &["AXC F 1152", "AXC F 2152", "AXC F 3152"];

/// Lookup order. The first table containing the type wins.
const TYPE_TABLES: &[(NodeFamily, &[&str])] = &[
    (NodeFamily::InternalBus750_86x, INTERNAL_750_86X_TYPES),
    (NodeFamily::Ethernet, ETHERNET_TYPES),
    (NodeFamily::InternalBus750_820x, INTERNAL_750_820X_TYPES),
    (NodeFamily::PhoenixCoupler, PHOENIX_COUPLER_TYPES),
    (NodeFamily::PhoenixController, PHOENIX_CONTROLLER_TYPES),
];

// ============================================================================
// NodeFamily
// ============================================================================

/// Hardware family of a field-bus node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum NodeFamily {
    /// WAGO 750-86x controller with internal bus.
    InternalBus750_86x,
    /// WAGO Ethernet coupler / controller (750-341, 750-841, ...).
    Ethernet,
    /// WAGO PFC200 controller with internal bus (750-820x).
    InternalBus750_820x,
    /// Phoenix Contact Axioline bus coupler.
    PhoenixCoupler,
    /// Phoenix Contact PLCnext controller.
    PhoenixController,
    /// Unrecognised, empty or missing type string.
    Unknown,
}

impl NodeFamily {
    /// Every family, in declaration order.
    pub const ALL: [NodeFamily; 6] = [
        NodeFamily::InternalBus750_86x,
        NodeFamily::Ethernet,
        NodeFamily::InternalBus750_820x,
        NodeFamily::PhoenixCoupler,
        NodeFamily::PhoenixController,
        NodeFamily::Unknown,
    ];

    /// Classify a raw device type string. Never fails.
    pub fn classify(raw_type: Option<&str>) -> NodeFamily {
        let Some(raw) = raw_type else {
            tracing::trace!("classify: no type string");
            return NodeFamily::Unknown;
        };

        let family = TYPE_TABLES
            .iter()
            .find(|(_, types)| types.contains(&raw))
            .map(|(family, _)| *family)
            .unwrap_or(NodeFamily::Unknown);

        tracing::trace!(raw_type = raw, %family, "classify");
        if family == NodeFamily::Unknown && !raw.is_empty() {
            tracing::debug!(raw_type = raw, "unrecognised node type, classified as Unknown");
        }
        family
    }

    /// A coupler is a transparent bus head without onboard control logic.
    pub fn is_coupler(self) -> bool {
        matches!(self, NodeFamily::Ethernet | NodeFamily::PhoenixCoupler)
    }

    /// Literal type strings that classify into this family.
    pub fn type_strings(self) -> &'static [&'static str] {
        TYPE_TABLES
            .iter()
            .find(|(family, _)| *family == self)
            .map(|(_, types)| *types)
            .unwrap_or(&[])
    }

    /// Variant name, as used in policy documents.
    pub fn name(self) -> &'static str {
        match self {
            NodeFamily::InternalBus750_86x => "InternalBus750_86x",
            NodeFamily::Ethernet => "Ethernet",
            NodeFamily::InternalBus750_820x => "InternalBus750_820x",
            NodeFamily::PhoenixCoupler => "PhoenixCoupler",
            NodeFamily::PhoenixController => "PhoenixController",
            NodeFamily::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for NodeFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Shorthand for [`NodeFamily::classify`].
pub fn classify(raw_type: Option<&str>) -> NodeFamily {
    NodeFamily::classify(raw_type)
}
