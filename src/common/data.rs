//! Typed Property Values.
//!
//! This module defines the value types that flow through the property
//! interface of every component: the static initializers used by descriptor
//! tables, and the owned values stored by a component once applied.

use serde::Serialize;
use std::fmt;

/// Kind of a property value.
///
/// Descriptor tables only use `Uint`, `Bool` and `Str`; configure hooks may
/// additionally bind arrays and external resources.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum PropKind {
    /// Unsigned integer.
    Uint,
    /// Boolean flag.
    Bool,
    /// UTF-8 string.
    Str,
    /// Ordered list of unsigned integers.
    UintArray,
    /// Character device backend, referenced by id.
    Chardev,
    /// Block device backend, referenced by id.
    Drive,
}

impl fmt::Display for PropKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PropKind::Uint => "uint",
            PropKind::Bool => "bool",
            PropKind::Str => "string",
            PropKind::UintArray => "uint array",
            PropKind::Chardev => "chardev",
            PropKind::Drive => "drive",
        };
        f.write_str(name)
    }
}

/// Owned property value, as stored on a component instance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PropValue {
    Uint(u64),
    Bool(bool),
    Str(String),
    UintArray(Vec<u64>),
    Chardev(String),
    Drive(String),
}

impl PropValue {
    /// Returns the kind of this value.
    pub fn kind(&self) -> PropKind {
        match self {
            PropValue::Uint(_) => PropKind::Uint,
            PropValue::Bool(_) => PropKind::Bool,
            PropValue::Str(_) => PropKind::Str,
            PropValue::UintArray(_) => PropKind::UintArray,
            PropValue::Chardev(_) => PropKind::Chardev,
            PropValue::Drive(_) => PropKind::Drive,
        }
    }

    pub fn as_uint(&self) -> Option<u64> {
        match self {
            PropValue::Uint(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropValue::Str(v) | PropValue::Chardev(v) | PropValue::Drive(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[u64]> {
        match self {
            PropValue::UintArray(v) => Some(v),
            _ => None,
        }
    }
}

/// Compile-time property initializer used in descriptor tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PropInit {
    Uint(u64),
    Bool(bool),
    Str(&'static str),
}

impl PropInit {
    /// Converts the initializer into an owned value.
    pub fn to_value(self) -> PropValue {
        match self {
            PropInit::Uint(v) => PropValue::Uint(v),
            PropInit::Bool(v) => PropValue::Bool(v),
            PropInit::Str(v) => PropValue::Str(v.to_string()),
        }
    }
}
