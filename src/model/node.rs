//! Field-bus I/O node and its module allocator.

use std::ops::Index;
use std::sync::Arc;

use super::{EmptyModule, IoModule, NodeFamily, SignalCounters};
use crate::policy::{AddressArea, AddressAreaPolicyTable};
use crate::{Error, Result};

static EMPTY_MODULE: EmptyModule = EmptyModule;

/// A coupler or controller hosting a sequence of I/O modules.
///
/// Identity and family are fixed at construction. Only the signal counters,
/// the slot table and the address area cursor change afterwards.
#[derive(Debug, Clone)]
pub struct IoNode {
    type_str: Option<String>,
    name: Option<String>,
    ip: Option<String>,
    location: Option<String>,
    reserved: Option<String>,
    n: i32,
    node_number: i32,
    family: NodeFamily,
    address_area: Option<AddressArea>,
    counters: SignalCounters,
    /// `None` marks an unassigned slot.
    slots: Vec<Option<Arc<dyn IoModule>>>,
    /// Address area units already consumed.
    address_area_cursor: u32,
}

impl IoNode {
    /// Create a node bound to the built-in policy table.
    ///
    /// `reserved` is kept as-is and has no effect on behaviour.
    pub fn new(
        type_str: Option<&str>,
        n: i32,
        node_number: i32,
        ip: Option<&str>,
        name: Option<&str>,
        location: Option<&str>,
        reserved: Option<&str>,
    ) -> Self {
        let family = NodeFamily::classify(type_str);
        let address_area = AddressAreaPolicyTable::default().resolve(family);

        let mut node = Self {
            type_str: type_str.map(str::to_owned),
            name: name.map(str::to_owned),
            ip: ip.map(str::to_owned),
            location: location.map(str::to_owned),
            reserved: reserved.map(str::to_owned),
            n,
            node_number,
            family,
            address_area: None,
            counters: SignalCounters::default(),
            slots: Vec::new(),
            address_area_cursor: 0,
        };
        node.set_address_area(address_area);
        node
    }

    /// Re-resolve the node's address area from `table`.
    pub fn with_policy_table(mut self, table: &AddressAreaPolicyTable) -> Self {
        self.set_address_area(table.resolve(self.family));
        self
    }

    /// Replace the node's address area policy.
    ///
    /// `None` marks the policy as unavailable: every later
    /// [`set_module`](Self::set_module) fails with
    /// [`Error::AddressAreaUnavailable`]. The slot table is resized to the
    /// new slot count; the cursor is kept.
    pub fn set_address_area(&mut self, address_area: Option<AddressArea>) {
        let slot_count = address_area.map_or(0, |a| a.max_module_slots);
        self.slots.resize(slot_count, None);
        self.address_area = address_area;
    }

    // ========================================================================
    // Identity
    // ========================================================================

    pub fn type_str(&self) -> Option<&str> {
        self.type_str.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn ip(&self) -> Option<&str> {
        self.ip.as_deref()
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn reserved(&self) -> Option<&str> {
        self.reserved.as_deref()
    }

    /// Position index of the node.
    pub fn n(&self) -> i32 {
        self.n
    }

    /// Full node number.
    pub fn node_number(&self) -> i32 {
        self.node_number
    }

    pub fn family(&self) -> NodeFamily {
        self.family
    }

    pub fn is_coupler(&self) -> bool {
        self.family.is_coupler()
    }

    pub fn address_area(&self) -> Option<AddressArea> {
        self.address_area
    }

    /// Placeholder reported for unassigned slots.
    pub fn stub_module(&self) -> Arc<dyn IoModule> {
        Arc::new(EmptyModule)
    }

    // ========================================================================
    // Signal counters
    // ========================================================================

    pub fn counters(&self) -> &SignalCounters {
        &self.counters
    }

    pub fn counters_mut(&mut self) -> &mut SignalCounters {
        &mut self.counters
    }

    pub fn ai_count(&self) -> u32 {
        self.counters.ai
    }

    pub fn ao_count(&self) -> u32 {
        self.counters.ao
    }

    pub fn di_count(&self) -> u32 {
        self.counters.di
    }

    pub fn do_count(&self) -> u32 {
        self.counters.do_
    }

    // ========================================================================
    // Slot table
    // ========================================================================

    /// Physical size of the slot table.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Module at 1-based `slot_number`, `None` outside the table.
    ///
    /// Unassigned slots yield the empty placeholder.
    pub fn module(&self, slot_number: usize) -> Option<&dyn IoModule> {
        let index = slot_number.checked_sub(1)?;
        self.slots.get(index).map(slot_or_empty)
    }

    /// Slots a module was committed to, as `(slot_number, module)`, in slot
    /// order. A committed module counts even when its name is empty.
    pub fn modules(&self) -> impl Iterator<Item = (usize, &dyn IoModule)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_deref().map(|m| (i + 1, m)))
    }

    pub fn occupied_slots(&self) -> usize {
        self.modules().count()
    }

    pub fn address_area_cursor(&self) -> u32 {
        self.address_area_cursor
    }

    /// Units still free, `None` when the policy is unavailable.
    pub fn address_area_remaining(&self) -> Option<u32> {
        self.address_area
            .map(|a| a.max_address_area.saturating_sub(self.address_area_cursor))
    }

    /// Place `module` into 1-based `slot_number` and advance the cursor.
    ///
    /// Checks run in order: policy available, slot in range, address area
    /// fits. On error the node is left untouched. An existing module in the
    /// slot is overwritten.
    pub fn set_module(&mut self, module: Arc<dyn IoModule>, slot_number: usize) -> Result<()> {
        let result = self.check_module(module.as_ref(), slot_number);
        if let Err(err) = &result {
            tracing::warn!(
                node = self.name.as_deref().unwrap_or_default(),
                family = %self.family,
                slot = slot_number,
                module = module.name(),
                error = %err,
                "module rejected"
            );
            return result;
        }

        let footprint = module.address_area();
        tracing::debug!(
            node = self.name.as_deref().unwrap_or_default(),
            slot = slot_number,
            module = module.name(),
            footprint,
            cursor = self.address_area_cursor + footprint,
            "module placed"
        );
        self.slots[slot_number - 1] = Some(module);
        self.address_area_cursor += footprint;
        Ok(())
    }

    fn check_module(&self, module: &dyn IoModule, slot_number: usize) -> Result<()> {
        let Some(area) = self.address_area else {
            return Err(Error::AddressAreaUnavailable {
                family: self.family,
            });
        };

        if slot_number == 0 || slot_number > area.max_module_slots {
            return Err(Error::SlotOutOfRange {
                slot: slot_number,
                max: area.max_module_slots,
            });
        }

        let footprint = module.address_area();
        let remaining = area.max_address_area.saturating_sub(self.address_area_cursor);
        if footprint > remaining {
            return Err(Error::AddressAreaOverflow {
                cursor: self.address_area_cursor,
                footprint,
                max: area.max_address_area,
            });
        }

        Ok(())
    }
}

impl Index<usize> for IoNode {
    type Output = dyn IoModule;

    /// Module at 0-based table index `index`.
    fn index(&self, index: usize) -> &Self::Output {
        slot_or_empty(&self.slots[index])
    }
}

fn slot_or_empty(slot: &Option<Arc<dyn IoModule>>) -> &(dyn IoModule + 'static) {
    match slot {
        Some(module) => module.as_ref(),
        None => &EMPTY_MODULE,
    }
}
