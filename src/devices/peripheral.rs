//! Inert Peripheral.
//!
//! Register behavior is not modeled: the component keeps the properties,
//! links and input levels the engine hands it, and takes part in reset.

use crate::soc::traits::{Component, ComponentClass, DeviceState};
use std::any::Any;

#[derive(Debug)]
pub struct Peripheral {
    state: DeviceState,
}

impl Peripheral {
    pub fn new(class: &'static ComponentClass, instance: Option<u32>) -> Self {
        Self {
            state: DeviceState::new(class, instance),
        }
    }
}

/// Constructor for classes backed by `Peripheral`.
pub fn create(class: &'static ComponentClass, instance: Option<u32>) -> Box<dyn Component> {
    Box::new(Peripheral::new(class, instance))
}

impl Component for Peripheral {
    fn state(&self) -> &DeviceState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut DeviceState {
        &mut self.state
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
