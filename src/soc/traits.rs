//! Component Type Contract.
//!
//! This module defines what every component type must expose to the
//! composition engine: a static `ComponentClass` describing its properties,
//! links, pins and memory regions, and the `Component` trait through which
//! the engine configures, realizes, signals and resets an instance.

use crate::common::data::{PropKind, PropValue};
use crate::common::error::{PropertyError, RealizeError};
use crate::soc::descriptor::ComponentId;
use crate::soc::pins::{self, PinDecl, PinHandle};
use crate::soc::signals::OutputKey;
use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;

/// Constructor registered for a component type.
pub type CreateFn = fn(&'static ComponentClass, Option<u32>) -> Box<dyn Component>;

/// Declared property of a component type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PropSpec {
    pub name: &'static str,
    pub kind: PropKind,
}

impl PropSpec {
    pub const fn uint(name: &'static str) -> Self {
        Self {
            name,
            kind: PropKind::Uint,
        }
    }

    pub const fn bool(name: &'static str) -> Self {
        Self {
            name,
            kind: PropKind::Bool,
        }
    }

    pub const fn string(name: &'static str) -> Self {
        Self {
            name,
            kind: PropKind::Str,
        }
    }

    pub const fn array(name: &'static str) -> Self {
        Self {
            name,
            kind: PropKind::UintArray,
        }
    }

    pub const fn chardev(name: &'static str) -> Self {
        Self {
            name,
            kind: PropKind::Chardev,
        }
    }

    pub const fn drive(name: &'static str) -> Self {
        Self {
            name,
            kind: PropKind::Drive,
        }
    }
}

/// Declared object-reference property.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LinkSpec {
    pub name: &'static str,
    /// Realization fails when a required link is left unset.
    pub required: bool,
}

impl LinkSpec {
    pub const fn required(name: &'static str) -> Self {
        Self {
            name,
            required: true,
        }
    }

    pub const fn optional(name: &'static str) -> Self {
        Self {
            name,
            required: false,
        }
    }
}

/// Size of a memory region exposed by a component type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegionSpec {
    Fixed(u64),
    /// Size taken from a uint property once the component is configured.
    Property(&'static str),
}

/// Static description of a component type.
pub struct ComponentClass {
    pub type_name: &'static str,
    pub properties: &'static [PropSpec],
    pub links: &'static [LinkSpec],
    pub outputs: &'static [PinDecl],
    pub inputs: &'static [PinDecl],
    pub regions: &'static [RegionSpec],
    pub create: CreateFn,
}

impl ComponentClass {
    pub fn property(&self, name: &str) -> Option<&'static PropSpec> {
        self.properties.iter().find(|p| p.name == name)
    }

    pub fn link(&self, name: &str) -> Option<&'static LinkSpec> {
        self.links.iter().find(|l| l.name == name)
    }

    pub fn output_pin(&self, name: &str, num: usize) -> Option<PinHandle> {
        pins::resolve(self.outputs, name, num)
    }

    pub fn input_pin(&self, name: &str, num: usize) -> Option<PinHandle> {
        pins::resolve(self.inputs, name, num)
    }

    pub fn instantiate(&'static self, instance: Option<u32>) -> Box<dyn Component> {
        (self.create)(self, instance)
    }
}

impl fmt::Debug for ComponentClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentClass")
            .field("type_name", &self.type_name)
            .field("properties", &self.properties.len())
            .field("links", &self.links.len())
            .field("outputs", &self.outputs)
            .field("inputs", &self.inputs)
            .field("regions", &self.regions)
            .finish()
    }
}

/// Bookkeeping shared by every component: applied properties, resolved
/// links, input levels, realization and reset counters.
#[derive(Debug)]
pub struct DeviceState {
    class: &'static ComponentClass,
    instance: Option<u32>,
    props: BTreeMap<&'static str, PropValue>,
    links: BTreeMap<&'static str, ComponentId>,
    inputs: Vec<i32>,
    realized: bool,
    holds: u32,
    exits: u32,
}

impl DeviceState {
    pub fn new(class: &'static ComponentClass, instance: Option<u32>) -> Self {
        Self {
            class,
            instance,
            props: BTreeMap::new(),
            links: BTreeMap::new(),
            inputs: vec![0; pins::slot_count(class.inputs)],
            realized: false,
            holds: 0,
            exits: 0,
        }
    }

    pub fn class(&self) -> &'static ComponentClass {
        self.class
    }

    pub fn instance(&self) -> Option<u32> {
        self.instance
    }

    pub fn set_property(&mut self, name: &str, value: PropValue) -> Result<(), PropertyError> {
        if self.realized {
            return Err(PropertyError::Realized);
        }
        let spec = self.class.property(name).ok_or(PropertyError::Unknown)?;
        if spec.kind != value.kind() {
            return Err(PropertyError::KindMismatch {
                expected: spec.kind,
                found: value.kind(),
            });
        }
        self.props.insert(spec.name, value);
        Ok(())
    }

    pub fn property(&self, name: &str) -> Option<&PropValue> {
        self.props.get(name)
    }

    pub fn uint(&self, name: &str) -> Option<u64> {
        self.property(name).and_then(PropValue::as_uint)
    }

    pub fn flag(&self, name: &str) -> Option<bool> {
        self.property(name).and_then(PropValue::as_bool)
    }

    pub fn set_link(&mut self, name: &str, target: ComponentId) -> Result<(), PropertyError> {
        if self.realized {
            return Err(PropertyError::Realized);
        }
        let spec = self.class.link(name).ok_or(PropertyError::Unknown)?;
        self.links.insert(spec.name, target);
        Ok(())
    }

    pub fn link(&self, name: &str) -> Option<ComponentId> {
        self.links.get(name).copied()
    }

    /// Size of region `region`, if the type declares it and it is known.
    pub fn region_size(&self, region: usize) -> Option<u64> {
        match self.class.regions.get(region)? {
            RegionSpec::Fixed(size) => Some(*size),
            RegionSpec::Property(name) => self.uint(name).filter(|&size| size != 0),
        }
    }

    pub fn input_level(&self, pin: PinHandle) -> i32 {
        self.inputs.get(pin.slot()).copied().unwrap_or(0)
    }

    pub fn set_input_level(&mut self, pin: PinHandle, level: i32) {
        if let Some(slot) = self.inputs.get_mut(pin.slot()) {
            *slot = level;
        }
    }

    /// Drops every recorded input level back to 0.
    pub fn clear_inputs(&mut self) {
        self.inputs.fill(0);
    }

    /// Checks the generic realization preconditions: required links are
    /// resolved and property-sized regions have a size.
    pub fn validate(&self) -> Result<(), RealizeError> {
        for spec in self.class.links {
            if spec.required && !self.links.contains_key(spec.name) {
                return Err(RealizeError::MissingLink(spec.name));
            }
        }
        for region in self.class.regions {
            if let RegionSpec::Property(name) = region {
                if self.uint(name).unwrap_or(0) == 0 {
                    return Err(RealizeError::MissingProperty(name));
                }
            }
        }
        Ok(())
    }

    pub fn is_realized(&self) -> bool {
        self.realized
    }

    pub(crate) fn mark_realized(&mut self) {
        self.realized = true;
    }

    pub fn hold_count(&self) -> u32 {
        self.holds
    }

    pub fn exit_count(&self) -> u32 {
        self.exits
    }

    pub fn note_hold(&mut self) {
        self.holds += 1;
    }

    pub fn note_exit(&mut self) {
        self.exits += 1;
    }
}

/// Collects the outputs a component raises while handling an input.
///
/// Raised signals are delivered after the handler returns, never from
/// within it.
pub struct SignalSink<'a> {
    source: ComponentId,
    pending: &'a mut Vec<(OutputKey, i32)>,
}

impl<'a> SignalSink<'a> {
    pub(crate) fn new(source: ComponentId, pending: &'a mut Vec<(OutputKey, i32)>) -> Self {
        Self { source, pending }
    }

    /// The component the sink raises signals for.
    pub fn source(&self) -> ComponentId {
        self.source
    }

    pub fn raise(&mut self, pin: PinHandle, level: i32) {
        self.pending.push((
            OutputKey {
                component: self.source,
                pin,
            },
            level,
        ));
    }
}

/// A component instance, as seen by the composition engine.
///
/// Implementors only provide access to their `DeviceState`; every other
/// method has a default that a specific type may override.
pub trait Component: Any {
    fn state(&self) -> &DeviceState;

    fn state_mut(&mut self) -> &mut DeviceState;

    fn as_any(&self) -> &dyn Any;

    fn class(&self) -> &'static ComponentClass {
        self.state().class()
    }

    fn type_name(&self) -> &'static str {
        self.class().type_name
    }

    fn set_property(&mut self, name: &str, value: PropValue) -> Result<(), PropertyError> {
        self.state_mut().set_property(name, value)
    }

    fn property(&self, name: &str) -> Option<&PropValue> {
        self.state().property(name)
    }

    fn set_link(&mut self, name: &str, target: ComponentId) -> Result<(), PropertyError> {
        self.state_mut().set_link(name, target)
    }

    fn link(&self, name: &str) -> Option<ComponentId> {
        self.state().link(name)
    }

    fn region_size(&self, region: usize) -> Option<u64> {
        self.state().region_size(region)
    }

    /// Finalizes the component. Called exactly once.
    fn realize(&mut self) -> Result<(), RealizeError> {
        self.state().validate()
    }

    /// Handles a level change on one of the component's inputs.
    fn set_input(&mut self, pin: PinHandle, level: i32, _out: &mut SignalSink<'_>) {
        self.state_mut().set_input_level(pin, level);
    }

    /// Default hold-phase hook. Input levels do not survive a reset.
    fn reset_hold(&mut self) {
        let state = self.state_mut();
        state.note_hold();
        state.clear_inputs();
    }

    /// Default exit-phase hook.
    fn reset_exit(&mut self) {
        self.state_mut().note_exit();
    }

    /// Brings execution state up to date before a reset (processing
    /// elements only).
    fn synchronize_state(&mut self) {}

    /// Resumes execution state tracking after a reset (processing elements
    /// only).
    fn synchronize_post_reset(&mut self) {}
}
