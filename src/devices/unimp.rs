//! Unimplemented Device.
//!
//! Claims an address window for a block that is not modeled. The window size
//! comes from the `size` property and the display name from the descriptor.

use crate::common::data::PropValue;
use crate::common::error::{BuildError, RealizeError};
use crate::soc::descriptor::{ComponentDescriptor, ConfigureContext};
use crate::soc::properties;
use crate::soc::traits::{Component, ComponentClass, DeviceState, PropSpec, RegionSpec};
use std::any::Any;

pub const TYPE_UNIMPLEMENTED_DEVICE: &str = "unimplemented-device";

pub static UNIMPLEMENTED_DEVICE: ComponentClass = ComponentClass {
    type_name: TYPE_UNIMPLEMENTED_DEVICE,
    properties: &[
        PropSpec::string("name"),
        PropSpec::uint("size"),
        PropSpec::bool("warn-once"),
    ],
    links: &[],
    outputs: &[],
    inputs: &[],
    regions: &[RegionSpec::Property("size")],
    create,
};

#[derive(Debug)]
pub struct UnimplementedDevice {
    state: DeviceState,
}

impl UnimplementedDevice {
    /// Display name, or the type tag when none was configured.
    pub fn name(&self) -> &str {
        self.state
            .property("name")
            .and_then(PropValue::as_str)
            .unwrap_or(TYPE_UNIMPLEMENTED_DEVICE)
    }

    pub fn warn_once(&self) -> bool {
        self.state.flag("warn-once").unwrap_or(false)
    }
}

fn create(class: &'static ComponentClass, instance: Option<u32>) -> Box<dyn Component> {
    Box::new(UnimplementedDevice {
        state: DeviceState::new(class, instance),
    })
}

impl Component for UnimplementedDevice {
    fn state(&self) -> &DeviceState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut DeviceState {
        &mut self.state
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn realize(&mut self) -> Result<(), RealizeError> {
        if self.state.uint("size").unwrap_or(0) == 0 {
            return Err(RealizeError::MissingProperty("size"));
        }
        self.state.validate()
    }
}

/// Configure hook: names the device after its descriptor.
pub fn configure(
    dev: &mut dyn Component,
    def: &ComponentDescriptor,
    ctx: &ConfigureContext<'_>,
) -> Result<(), BuildError> {
    if let Some(name) = def.name {
        properties::set_property(dev, ctx.index, "name", PropValue::Str(name.to_string()))?;
    }
    Ok(())
}
