//! # io-node — Field-Bus I/O Node Model
//!
//! Classifies field-bus couplers and controllers by their device type string
//! and allocates I/O modules into their numbered slots, enforcing the
//! family's slot count and address area capacity.
//!
//! ## Design Principles
//!
//! 1. **Classification never fails**: unknown type strings become `NodeFamily::Unknown`
//! 2. **Explicit configuration**: capacity limits live in an `AddressAreaPolicyTable`
//!    the caller owns, not in a process-wide cache
//! 3. **Atomic allocation**: a rejected `set_module` leaves the node untouched
//! 4. **`None` is not `""`**: identity strings round-trip exactly
//!
//! ## Quick Start
//!
//! ```rust
//! use io_node::{Error, IoModule, IoNode, Module, NodeFamily};
//!
//! let mut node = IoNode::new(Some("AXC F 2152"), 1, 100, Some("10.0.0.1"), Some("A1"), Some("+MCC1"), None);
//! assert_eq!(node.family(), NodeFamily::PhoenixController);
//! assert!(!node.is_coupler());
//!
//! node.set_module(Module::new("A101", 4).shared(), 1)?;
//! assert_eq!(node[0].name(), "A101");
//! assert_eq!(node.address_area_cursor(), 4);
//!
//! let err = node.set_module(Module::new("A165", 4).shared(), 65).unwrap_err();
//! assert!(matches!(err, Error::SlotOutOfRange { slot: 65, max: 64 }));
//! # Ok::<(), io_node::Error>(())
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod policy;
pub mod report;
pub mod shared;

// ============================================================================
// Re-exports
// ============================================================================

pub use model::{
    classify, EmptyModule, IoModule, IoNode, Module, NodeFamily,
    SignalCounters, SignalKind,
};
pub use policy::{AddressArea, AddressAreaPolicyTable};
pub use report::{NodeReport, SlotReport};
pub use shared::SharedIoNode;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Slot {slot} out of range: valid slots are 1..={max}")]
    SlotOutOfRange { slot: usize, max: usize },

    #[error("Address area overflow: {cursor} used + {footprint} requested exceeds {max}")]
    AddressAreaOverflow { cursor: u32, footprint: u32, max: u32 },

    #[error("Address area unavailable for node family {family}")]
    AddressAreaUnavailable { family: NodeFamily },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
