//! End-to-end tests for module allocation.
//!
//! Each test builds a node, places modules through `set_module` and checks
//! the slot table, the address area cursor and the error kinds.

use std::sync::Arc;

use io_node::{
    AddressArea, AddressAreaPolicyTable, Error, IoModule, IoNode, Module, NodeFamily,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn node(type_str: &str) -> IoNode {
    IoNode::new(Some(type_str), 1, 1, Some(""), Some(""), Some(""), Some(""))
}

fn module(name: &str, address_area: u32) -> Arc<dyn IoModule> {
    Module::new(name, address_area).shared()
}

// ============================================================================
// 1. Successful placement
// ============================================================================

#[test]
fn test_set_module_correct_set() {
    let mut node = node("AXC F 1152");
    node.set_module(module("A101", 0), 63).unwrap();

    assert_eq!(node[62].name(), "A101");
    assert_eq!(node[61].name(), "");
    assert_eq!(node.stub_module().name(), "");
}

#[test]
fn test_last_slot_is_valid() {
    let mut node = node("AXC F 1152");
    node.set_module(module("A164", 2), 64).unwrap();
    assert_eq!(node[63].name(), "A164");
}

#[test]
fn test_cursor_accumulates_footprints() {
    let mut node = node("750-8204");
    node.set_module(module("A1", 4), 1).unwrap();
    node.set_module(module("A2", 12), 2).unwrap();
    node.set_module(module("A3", 0), 3).unwrap();

    assert_eq!(node.address_area_cursor(), 16);
    assert_eq!(
        node.address_area_remaining(),
        Some(AddressArea::INTERNAL_750_820X.max_address_area - 16)
    );
}

#[test]
fn test_slots_are_not_shifted() {
    let mut node = node("750-362");
    node.set_module(module("A5", 1), 5).unwrap();
    node.set_module(module("A2", 1), 2).unwrap();

    let placed: Vec<(usize, String)> = node
        .modules()
        .map(|(slot, m)| (slot, m.name().to_string()))
        .collect();
    assert_eq!(placed, vec![(2, "A2".to_string()), (5, "A5".to_string())]);
    assert!(node[0].is_empty());
}

// ============================================================================
// 2. Slot range
// ============================================================================

#[test]
fn test_slot_out_of_range() {
    for (type_str, slot) in [("AXC F 1152", 65), ("750-863", 65), ("AXC F 1152", 0)] {
        let mut node = node(type_str);
        let err = node.set_module(module("A1", 1), slot).unwrap_err();
        assert!(
            matches!(err, Error::SlotOutOfRange { slot: s, max: 64 } if s == slot),
            "{type_str} slot {slot}: {err}"
        );
    }
}

#[test]
fn test_one_slot_coupler() {
    let table = AddressAreaPolicyTable::default()
        .with_policy(NodeFamily::PhoenixCoupler, AddressArea::new(1, 64));
    let mut node = node("AXL F BK ETH").with_policy_table(&table);
    assert!(node.is_coupler());

    node.set_module(module("A1", 8), 1).unwrap();
    let err = node.set_module(module("A2", 8), 2).unwrap_err();
    assert!(matches!(err, Error::SlotOutOfRange { slot: 2, max: 1 }));
    assert_eq!(node.address_area_cursor(), 8);
}

// ============================================================================
// 3. Address area capacity
// ============================================================================

#[test]
fn test_address_area_overflow() {
    let max = AddressArea::PHOENIX_CONTACT.max_address_area;
    let mut node = node("AXC F 1152");
    node.set_module(module("Filler", max - 4), 2).unwrap();

    let before = node.report();
    let err = node.set_module(module("A1", 6), 1).unwrap_err();

    match err {
        Error::AddressAreaOverflow { cursor, footprint, max: m } => {
            assert_eq!((cursor, footprint, m), (max - 4, 6, max));
        }
        other => panic!("expected AddressAreaOverflow, got {other}"),
    }
    assert_eq!(node.report(), before);
    assert!(node[0].is_empty());
}

#[test]
fn test_slot_checked_before_address_area() {
    let mut node = node("AXC F 1152");
    let err = node.set_module(module("Huge", u32::MAX), 65).unwrap_err();
    assert!(matches!(err, Error::SlotOutOfRange { .. }));
}

// ============================================================================
// 4. Unavailable policy
// ============================================================================

#[test]
fn test_address_area_unavailable_after_clear() {
    let mut node = node("AXC F 1152");
    node.set_address_area(None);

    for (slot, footprint) in [(0, 0), (1, 1), (64, 0), (65, 1000)] {
        let err = node.set_module(module("A1", footprint), slot).unwrap_err();
        assert!(matches!(
            err,
            Error::AddressAreaUnavailable { family: NodeFamily::PhoenixController }
        ));
    }
    assert_eq!(node.address_area_cursor(), 0);
}

#[test]
fn test_address_area_unavailable_from_table() {
    let mut node = node("750-841").with_policy_table(&AddressAreaPolicyTable::empty());
    let err = node.set_module(module("A1", 1), 1).unwrap_err();
    assert!(matches!(err, Error::AddressAreaUnavailable { family: NodeFamily::Ethernet }));
}

#[test]
fn test_unknown_family_is_unavailable() {
    let mut node = IoNode::new(None, 0, 0, None, None, None, None);
    let err = node.set_module(module("A1", 0), 1).unwrap_err();
    assert!(matches!(err, Error::AddressAreaUnavailable { family: NodeFamily::Unknown }));
}

// ============================================================================
// 5. Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_failed_allocation_changes_nothing(
        placed in proptest::collection::vec((1usize..=64, 0u32..64), 0..16),
        slot in 0usize..80,
        footprint in 0u32..1024,
    ) {
        let mut node = node("AXC F 2152");
        node.counters_mut().ai += 3;
        for (i, (s, f)) in placed.iter().enumerate() {
            let _ = node.set_module(module(&format!("M{i}"), *f), *s);
        }

        let before = node.report();
        if node.set_module(module("Probe", footprint), slot).is_err() {
            prop_assert_eq!(node.report(), before);
        } else {
            prop_assert_eq!(node.address_area_cursor(), before.address_area_cursor + footprint);
            prop_assert_eq!(node[slot - 1].name(), "Probe");
        }
    }

    #[test]
    fn prop_cursor_is_sum_of_committed(
        footprints in proptest::collection::vec(0u32..200, 1..40),
    ) {
        let mut node = node("750-8203");
        let mut committed = 0u32;
        for (i, f) in footprints.iter().enumerate() {
            if node.set_module(module("M", *f), i + 1).is_ok() {
                committed += f;
            }
        }
        prop_assert_eq!(node.address_area_cursor(), committed);
        prop_assert!(committed <= AddressArea::INTERNAL_750_820X.max_address_area);
    }
}
