//! Per-node signal counters.

use serde::{Deserialize, Serialize};

/// Kind of process signal contributed by a module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignalKind {
    AI,
    AO,
    DI,
    DO,
}

/// Signal counts accumulated by the caller as modules are placed.
///
/// The node never updates these itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalCounters {
    pub ai: u32,
    pub ao: u32,
    pub di: u32,
    #[serde(rename = "do")]
    pub do_: u32,
}

impl SignalCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, kind: SignalKind) -> u32 {
        match kind {
            SignalKind::AI => self.ai,
            SignalKind::AO => self.ao,
            SignalKind::DI => self.di,
            SignalKind::DO => self.do_,
        }
    }

    /// Add `delta` to one counter, saturating at `u32::MAX`.
    pub fn add(&mut self, kind: SignalKind, delta: u32) {
        let counter = match kind {
            SignalKind::AI => &mut self.ai,
            SignalKind::AO => &mut self.ao,
            SignalKind::DI => &mut self.di,
            SignalKind::DO => &mut self.do_,
        };
        *counter = counter.saturating_add(delta);
    }

    /// Sum of all four counters, widened so it cannot overflow.
    pub fn total(&self) -> u64 {
        u64::from(self.ai) + u64::from(self.ao) + u64::from(self.di) + u64::from(self.do_)
    }
}
