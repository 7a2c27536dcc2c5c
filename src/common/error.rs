//! Error Types.
//!
//! Construction errors are fatal and carry the index of the failing
//! descriptor so that a single diagnostic can name it. Runtime errors cover
//! signal propagation and the reset protocol.

use crate::common::data::PropKind;
use thiserror::Error;

/// Invalid table content, detected while resolving the descriptor table.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("device #{index}: unknown component type '{type_name}'")]
    UnknownType {
        index: usize,
        type_name: &'static str,
    },

    #[error("device #{index} ({type_name}): link '{name}' targets #{target}, table has {len} entries")]
    LinkTargetOutOfRange {
        index: usize,
        type_name: &'static str,
        name: &'static str,
        target: usize,
        len: usize,
    },

    #[error("device #{index} ({type_name}): no link property named '{name}'")]
    UnknownLink {
        index: usize,
        type_name: &'static str,
        name: &'static str,
    },

    #[error("device #{index} ({type_name}): signal targets #{target}, table has {len} entries")]
    SignalTargetOutOfRange {
        index: usize,
        type_name: &'static str,
        target: usize,
        len: usize,
    },

    #[error("device #{index} ({type_name}): no {direction} pin '{pin}'[{num}]")]
    UnknownPin {
        index: usize,
        type_name: &'static str,
        direction: &'static str,
        pin: &'static str,
        num: usize,
    },

    #[error(
        "device #{index}: input '{pin}'[{num}] of device #{target} is already driven by device #{previous}"
    )]
    DuplicateSignalSource {
        index: usize,
        target: usize,
        pin: &'static str,
        num: usize,
        previous: usize,
    },

    #[error("device #{index} ({type_name}): property '{name}': {source}")]
    Property {
        index: usize,
        type_name: &'static str,
        name: String,
        #[source]
        source: PropertyError,
    },

    #[error("device #{index}: address space #{space} does not exist ({count} defined)")]
    AddressSpaceOutOfRange {
        index: usize,
        space: usize,
        count: usize,
    },

    #[error("device #{index} ({type_name}): memory entry #{region} has no matching region ({regions} declared)")]
    UnmappedRegion {
        index: usize,
        type_name: &'static str,
        region: usize,
        regions: usize,
    },

    #[error("device #{index} ({type_name}): region #{region} has no size after realization")]
    UnsizedRegion {
        index: usize,
        type_name: &'static str,
        region: usize,
    },

    #[error("device #{index} ({type_name}): descriptor has no instance number")]
    MissingInstanceNumber {
        index: usize,
        type_name: &'static str,
    },

    #[error("reset role '{role}' designates #{index}, table has {len} entries")]
    InvalidResetRole {
        role: &'static str,
        index: usize,
        len: usize,
    },
}

/// Rejection of a single property or link assignment by a component.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PropertyError {
    #[error("unknown property")]
    Unknown,

    #[error("expected a {expected} value, got a {found} value")]
    KindMismatch { expected: PropKind, found: PropKind },

    #[error("component is already realized")]
    Realized,
}

/// Failure reported by a component's own realize step.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RealizeError {
    #[error("required link '{0}' is not set")]
    MissingLink(&'static str),

    #[error("property '{0}' is not set or zero")]
    MissingProperty(&'static str),

    #[error("{0}")]
    Failed(String),
}

/// Fatal failure while finalizing a component.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("device #{index} ({type_name}): realize failed: {source}")]
pub struct RealizationError {
    pub index: usize,
    pub type_name: &'static str,
    #[source]
    pub source: RealizeError,
}

/// A requested external resource could not be bound.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("device #{index}: cannot attach {resource}: {reason}")]
pub struct ResourceAttachError {
    pub index: usize,
    pub resource: String,
    pub reason: String,
}

/// Any fatal error raised while constructing a composite.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Realization(#[from] RealizationError),

    #[error(transparent)]
    ResourceAttach(#[from] ResourceAttachError),
}

impl BuildError {
    /// Returns the index of the descriptor this error was raised for, if any.
    pub fn index(&self) -> Option<usize> {
        match self {
            BuildError::Configuration(e) => match e {
                ConfigurationError::UnknownType { index, .. }
                | ConfigurationError::LinkTargetOutOfRange { index, .. }
                | ConfigurationError::UnknownLink { index, .. }
                | ConfigurationError::SignalTargetOutOfRange { index, .. }
                | ConfigurationError::UnknownPin { index, .. }
                | ConfigurationError::DuplicateSignalSource { index, .. }
                | ConfigurationError::Property { index, .. }
                | ConfigurationError::AddressSpaceOutOfRange { index, .. }
                | ConfigurationError::UnmappedRegion { index, .. }
                | ConfigurationError::UnsizedRegion { index, .. }
                | ConfigurationError::MissingInstanceNumber { index, .. } => Some(*index),
                ConfigurationError::InvalidResetRole { .. } => None,
            },
            BuildError::Realization(e) => Some(e.index),
            BuildError::ResourceAttach(e) => Some(e.index),
        }
    }
}

/// Violation of the reset protocol.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResetError {
    #[error("reset requested while a reset request is being serviced")]
    Reentrant,

    #[error("reset exit requested without a preceding hold")]
    ExitWithoutHold,

    #[error("device #{0} cannot be released during the hold phase")]
    ReleaseDuringHold(usize),

    #[error("no device is designated for reset role '{0}'")]
    MissingRole(&'static str),

    #[error("device #{0} does not exist")]
    UnknownComponent(usize),
}

/// Failure while propagating a signal through the graph.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SignalError {
    #[error("device #{index}: no {direction} pin '{pin}'[{num}]")]
    UnknownPin {
        index: usize,
        direction: &'static str,
        pin: String,
        num: usize,
    },

    #[error("device #{0} does not exist")]
    UnknownComponent(usize),

    #[error("signal propagation did not settle after {0} deliveries")]
    Unsettled(usize),

    #[error(transparent)]
    Reset(#[from] ResetError),
}
