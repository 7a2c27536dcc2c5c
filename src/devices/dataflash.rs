//! SPI NOR Dataflash.
//!
//! Board-level serial flash sitting on an SPI host bus. Only the pieces the
//! board wiring touches are modeled: the backing drive and the active-low
//! chip select.

use crate::soc::pins::{PinDecl, PinHandle};
use crate::soc::traits::{
    Component, ComponentClass, DeviceState, LinkSpec, PropSpec, SignalSink,
};
use std::any::Any;

pub const TYPE_IS25WP128: &str = "is25wp128";

/// Chip-select line between an SPI host and a peripheral on its bus.
pub const SSI_GPIO_CS: &str = "ssi-gpio-cs";

pub static IS25WP128: ComponentClass = ComponentClass {
    type_name: TYPE_IS25WP128,
    properties: &[PropSpec::drive("drive"), PropSpec::bool("read-only")],
    links: &[LinkSpec::required("bus")],
    outputs: &[],
    inputs: &[PinDecl::new(SSI_GPIO_CS, 1)],
    regions: &[],
    create,
};

#[derive(Debug)]
pub struct Dataflash {
    state: DeviceState,
    selected: bool,
    selections: u32,
}

fn create(class: &'static ComponentClass, instance: Option<u32>) -> Box<dyn Component> {
    Box::new(Dataflash {
        state: DeviceState::new(class, instance),
        selected: false,
        selections: 0,
    })
}

impl Dataflash {
    /// Whether the chip select is currently driven low.
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Number of select edges seen since creation.
    pub fn selections(&self) -> u32 {
        self.selections
    }

    /// Id of the bound drive, if any.
    pub fn drive(&self) -> Option<&str> {
        self.state.property("drive").and_then(|v| v.as_str())
    }
}

impl Component for Dataflash {
    fn state(&self) -> &DeviceState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut DeviceState {
        &mut self.state
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn set_input(&mut self, pin: PinHandle, level: i32, _out: &mut SignalSink<'_>) {
        self.state.set_input_level(pin, level);
        let selected = level == 0;
        if selected && !self.selected {
            self.selections += 1;
        }
        self.selected = selected;
    }

    fn reset_hold(&mut self) {
        self.state.note_hold();
        self.state.clear_inputs();
        self.selected = false;
    }
}
