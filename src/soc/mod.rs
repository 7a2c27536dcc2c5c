//! Composition Engine.
//!
//! Turns a static `SocDefinition` into a realized `SocGraph` and sequences
//! its reset protocol.

/// Composite construction, signal propagation and graph summary.
pub mod builder;

/// Static descriptor tables.
pub mod descriptor;

/// Address spaces and the region mapper.
pub mod interconnect;

/// Object-reference resolution.
pub mod links;

/// Canonical pin tables and pre-resolved pin handles.
pub mod pins;

/// Static properties and configure hooks.
pub mod properties;

/// Two-phase reset protocol.
pub mod reset;

/// Output-to-input routing.
pub mod signals;

/// Component type contract.
pub mod traits;

pub use builder::{instantiate, realize_all, GraphSummary, SocGraph};
pub use descriptor::{
    ComponentDescriptor, ComponentId, CompositeSignal, ConfigureContext, LinkDef, MemMapEntry,
    PinRef, PropDef, SignalDef, SocDefinition, GPIO, SYSBUS_IRQ,
};
pub use reset::{ResetEvent, ResetPhase, ResetPhases, ResetRoles, ResetStep};
pub use traits::{Component, ComponentClass, DeviceState, LinkSpec, PropSpec, RegionSpec, SignalSink};
