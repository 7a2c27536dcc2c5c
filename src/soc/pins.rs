//! Canonical Pin Tables.
//!
//! Every component type declares its inputs and outputs as an ordered list
//! of named pin arrays. A `(name, index)` pair is resolved once, at wiring
//! time, into a `PinHandle`: the flat slot number of that pin in the type's
//! table. The signal hot path only ever sees handles.

use serde::Serialize;

/// A named array of pins.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PinDecl {
    pub name: &'static str,
    pub count: usize,
}

impl PinDecl {
    pub const fn new(name: &'static str, count: usize) -> Self {
        Self { name, count }
    }
}

/// Opaque, pre-resolved pin slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct PinHandle(pub(crate) u32);

impl PinHandle {
    pub fn slot(self) -> usize {
        self.0 as usize
    }
}

/// Resolves `(name, num)` against a pin table.
pub fn resolve(table: &[PinDecl], name: &str, num: usize) -> Option<PinHandle> {
    let mut base = 0usize;
    for decl in table {
        if decl.name == name {
            if num < decl.count {
                return u32::try_from(base + num).ok().map(PinHandle);
            }
            return None;
        }
        base += decl.count;
    }
    None
}

/// Total number of slots in a pin table.
pub fn slot_count(table: &[PinDecl]) -> usize {
    table.iter().map(|d| d.count).sum()
}

/// Maps a slot back to its `(name, num)` pair, for diagnostics.
pub fn describe(table: &[PinDecl], handle: PinHandle) -> Option<(&'static str, usize)> {
    let mut slot = handle.slot();
    for decl in table {
        if slot < decl.count {
            return Some((decl.name, slot));
        }
        slot -= decl.count;
    }
    None
}
