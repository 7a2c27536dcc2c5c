//! Common types used throughout the SoC composition engine.
//!
//! This module provides the typed property values exchanged with components
//! and the error taxonomy shared by construction and reset.

/// Typed property values and static initializers.
pub mod data;

/// Error types for construction, signal propagation and reset.
pub mod error;

pub use data::{PropInit, PropKind, PropValue};
pub use error::{
    BuildError, ConfigurationError, PropertyError, RealizationError, RealizeError,
    ResetError, ResourceAttachError, SignalError,
};
