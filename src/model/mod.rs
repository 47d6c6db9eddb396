//! # I/O Node Model
//!
//! Plain data types describing a field-bus node and the modules it hosts.
//! No I/O, no global state: everything a node needs is passed in.

pub mod family;
pub mod module;
pub mod signals;
pub mod node;

pub use family::{classify, NodeFamily};
pub use module::{EmptyModule, IoModule, Module};
pub use signals::{SignalCounters, SignalKind};
pub use node::IoNode;
