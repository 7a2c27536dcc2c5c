//! Component Descriptor Tables.
//!
//! A composite is described entirely by a static table of descriptors. Each
//! descriptor declares the component type, its memory map, the signals it
//! drives, the peers it references and its initial properties. The table is
//! pure data: nothing is validated here, out-of-range references are reported
//! by the resolution stage that consumes them.

use crate::common::data::PropInit;
use crate::common::error::BuildError;
use crate::config::{ResourceTable, StartupConfig};
use crate::soc::reset::{ResetPhases, ResetRoles};
use crate::soc::traits::Component;
use serde::Serialize;
use std::fmt;

/// Identifier of a component instance: its index in the descriptor table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ComponentId(pub usize);

impl ComponentId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Name used for anonymous GPIO lines.
pub const GPIO: &str = "gpio";

/// Name of the interrupt outputs of memory-mapped devices.
pub const SYSBUS_IRQ: &str = "sysbus-irq";

/// Placement of one memory region.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MemMapEntry {
    pub base: u64,
    /// Index into the composite's address space list.
    pub space: usize,
}

impl MemMapEntry {
    /// Maps into the default (system) address space.
    pub const fn new(base: u64) -> Self {
        Self { base, space: 0 }
    }

    pub const fn in_space(base: u64, space: usize) -> Self {
        Self { base, space }
    }
}

/// A named, indexed pin reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PinRef {
    pub name: &'static str,
    pub num: usize,
}

impl PinRef {
    pub const fn new(name: &'static str, num: usize) -> Self {
        Self { name, num }
    }
}

/// One output-to-input connection owned by the descriptor that drives it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SignalDef {
    pub output: PinRef,
    pub target: usize,
    pub input: PinRef,
    /// Stand-in loopback for a signal that is not modeled yet.
    pub bypass: bool,
}

impl SignalDef {
    pub const fn new(
        out_name: &'static str,
        out_num: usize,
        target: usize,
        in_name: &'static str,
        in_num: usize,
    ) -> Self {
        Self {
            output: PinRef::new(out_name, out_num),
            target,
            input: PinRef::new(in_name, in_num),
            bypass: false,
        }
    }

    /// Anonymous GPIO output `irq` to anonymous GPIO input `num` of `target`.
    pub const fn gpio(irq: usize, target: usize, num: usize) -> Self {
        Self::new(GPIO, irq, target, GPIO, num)
    }

    /// Interrupt output `irq` to anonymous GPIO input `num` of `target`.
    pub const fn sysbus_irq(irq: usize, target: usize, num: usize) -> Self {
        Self::new(SYSBUS_IRQ, irq, target, GPIO, num)
    }

    /// Marks the connection as a stand-in loopback.
    pub const fn bypass(mut self) -> Self {
        self.bypass = true;
        self
    }
}

/// Object-reference property pointing at another table entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LinkDef {
    pub name: &'static str,
    pub target: usize,
}

impl LinkDef {
    pub const fn new(name: &'static str, target: usize) -> Self {
        Self { name, target }
    }
}

/// Static typed property.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PropDef {
    pub name: &'static str,
    pub value: PropInit,
}

impl PropDef {
    pub const fn uint(name: &'static str, value: u64) -> Self {
        Self {
            name,
            value: PropInit::Uint(value),
        }
    }

    pub const fn bool(name: &'static str, value: bool) -> Self {
        Self {
            name,
            value: PropInit::Bool(value),
        }
    }

    pub const fn string(name: &'static str, value: &'static str) -> Self {
        Self {
            name,
            value: PropInit::Str(value),
        }
    }
}

/// Context handed to a configure hook.
pub struct ConfigureContext<'a> {
    /// Index of the descriptor being configured.
    pub index: usize,
    /// Name of the composite the component belongs to.
    pub parent: &'static str,
    pub startup: &'a StartupConfig,
    pub resources: &'a ResourceTable,
}

/// Late-binding hook, run after static properties are applied.
pub type ConfigureHook =
    fn(&mut dyn Component, &ComponentDescriptor, &ConfigureContext<'_>) -> Result<(), BuildError>;

/// Static declaration of one component.
#[derive(Clone, Copy)]
pub struct ComponentDescriptor {
    pub type_name: &'static str,
    /// Optional display name, used by generic component types.
    pub name: Option<&'static str>,
    /// Distinguishes same-typed siblings.
    pub instance: Option<u32>,
    pub memmap: &'static [MemMapEntry],
    pub gpio: &'static [SignalDef],
    pub link: &'static [LinkDef],
    pub prop: &'static [PropDef],
    pub cfg: Option<ConfigureHook>,
}

impl ComponentDescriptor {
    pub const fn new(type_name: &'static str) -> Self {
        Self {
            type_name,
            name: None,
            instance: None,
            memmap: &[],
            gpio: &[],
            link: &[],
            prop: &[],
            cfg: None,
        }
    }
}

impl fmt::Debug for ComponentDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentDescriptor")
            .field("type_name", &self.type_name)
            .field("name", &self.name)
            .field("instance", &self.instance)
            .field("memmap", &self.memmap)
            .field("gpio", &self.gpio)
            .field("link", &self.link)
            .field("prop", &self.prop)
            .field("cfg", &self.cfg.is_some())
            .finish()
    }
}

/// Forwarding of a child output to one of the composite's own inputs,
/// connected once every child is realized.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompositeSignal {
    pub source: usize,
    pub output: PinRef,
    pub input: PinRef,
}

/// Static definition of a composite: its table plus the composite-level
/// wiring and reset hooks.
#[derive(Debug, Clone, Copy)]
pub struct SocDefinition {
    pub name: &'static str,
    pub devices: &'static [ComponentDescriptor],
    /// Address space names; index 0 is the system address space.
    pub address_spaces: &'static [&'static str],
    /// Name of the published reset-request input.
    pub reset_request: &'static str,
    pub composite_signals: &'static [CompositeSignal],
    pub reset_roles: ResetRoles,
    pub reset_phases: ResetPhases,
}
