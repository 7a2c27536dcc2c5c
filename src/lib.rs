//! Declarative SoC Composition Library.
//!
//! This crate builds a system-on-chip from a static table of component
//! descriptors: it instantiates every component, resolves inter-component
//! links, maps memory regions into address spaces, wires interrupt and
//! control signals, applies properties, realizes the components and then
//! drives the two-phase reset protocol across the result.
//!
//! # Architecture
//!
//! * **Descriptors**: each table entry names a component type, its memory
//!   placement, its outgoing signals, links to other entries and initial
//!   properties. Cross references are table indices.
//! * **Builder**: `SocGraph::build` runs the construction stages in a fixed
//!   order and fails as a whole on the first error.
//! * **Reset**: hold and exit phases, each with a default slot and an
//!   override slot. The boot-integrity component is released last.
//!
//! # Modules
//!
//! * `common`: Property values and error types.
//! * `config`: Machine configuration, startup flags and host resources.
//! * `soc`: The composition engine.
//! * `devices`: Component types and the type registry.
//! * `earlgrey`: The OpenTitan EarlGrey SoC and board.

/// Shared property value types and the error taxonomy.
pub mod common;

/// Configuration loading and host resources.
///
/// Loads the TOML machine configuration: startup flags and the character
/// devices, serial ports and drives components may bind to.
pub mod config;

/// Component types and the registry that maps type tags to them.
pub mod devices;

/// OpenTitan EarlGrey SoC definition and board.
pub mod earlgrey;

/// Composition engine: descriptors, construction stages, signal propagation
/// and reset orchestration.
pub mod soc;
