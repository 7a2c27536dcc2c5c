//! Processing Element.
//!
//! Models the architectural state the composition engine interacts with:
//! the reset vector, interrupt lines, the initial power state and the
//! quiesce/resume handshake around a requested reset. Instruction execution
//! is outside this crate.

use crate::common::data::PropValue;
use crate::common::error::RealizeError;
use crate::soc::descriptor::GPIO;
use crate::soc::pins::PinDecl;
use crate::soc::traits::{Component, ComponentClass, DeviceState, PropSpec};
use std::any::Any;

pub const TYPE_IBEX_HART: &str = "lowrisc-ibex-riscv-cpu";

/// Machine software interrupt line.
pub const IRQ_M_SOFT: usize = 3;
/// Machine timer interrupt line.
pub const IRQ_M_TIMER: usize = 7;
/// Machine external interrupt line.
pub const IRQ_M_EXT: usize = 11;

/// Number of PMP entries.
pub const PMP_ENTRIES: usize = 16;

pub static IBEX_HART: ComponentClass = ComponentClass {
    type_name: TYPE_IBEX_HART,
    properties: &[
        PropSpec::uint("resetvec"),
        PropSpec::uint("mtvec"),
        PropSpec::uint("dmhaltvec"),
        PropSpec::uint("dmexcpvec"),
        PropSpec::bool("start-powered-off"),
        PropSpec::array("pmp_cfg"),
        PropSpec::array("pmp_addr"),
        PropSpec::uint("mseccfg"),
    ],
    links: &[],
    outputs: &[],
    inputs: &[PinDecl::new(GPIO, 32)],
    regions: &[],
    create,
};

#[derive(Debug)]
pub struct Hart {
    state: DeviceState,
    pc: u64,
    running: bool,
    quiesced: u32,
    resumed: u32,
}

fn create(class: &'static ComponentClass, instance: Option<u32>) -> Box<dyn Component> {
    Box::new(Hart {
        state: DeviceState::new(class, instance),
        pc: 0,
        running: false,
        quiesced: 0,
        resumed: 0,
    })
}

impl Hart {
    pub fn pc(&self) -> u64 {
        self.pc
    }

    /// Whether the hart is out of reset and powered.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Number of times execution state was synchronized ahead of a reset.
    pub fn quiesce_count(&self) -> u32 {
        self.quiesced
    }

    pub fn resume_count(&self) -> u32 {
        self.resumed
    }

    /// Level of interrupt line `irq`.
    pub fn irq_level(&self, irq: usize) -> i32 {
        self.state
            .class()
            .input_pin(GPIO, irq)
            .map_or(0, |pin| self.state.input_level(pin))
    }

    pub fn pmp_cfg(&self) -> Option<&[u64]> {
        self.state.property("pmp_cfg").and_then(PropValue::as_array)
    }

    pub fn pmp_addr(&self) -> Option<&[u64]> {
        self.state.property("pmp_addr").and_then(PropValue::as_array)
    }

    pub fn mseccfg(&self) -> Option<u64> {
        self.state.uint("mseccfg")
    }
}

impl Component for Hart {
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
        self.state.validate()?;
        for name in ["pmp_cfg", "pmp_addr"] {
            if let Some(entries) = self.state.property(name).and_then(PropValue::as_array) {
                if entries.len() > PMP_ENTRIES {
                    return Err(RealizeError::Failed(format!(
                        "{name} has {} entries, at most {PMP_ENTRIES} supported",
                        entries.len()
                    )));
                }
            }
        }
        self.pc = self.state.uint("resetvec").unwrap_or(0);
        self.running = !self.state.flag("start-powered-off").unwrap_or(false);
        Ok(())
    }

    fn reset_hold(&mut self) {
        self.state.note_hold();
        self.state.clear_inputs();
        self.running = false;
    }

    fn reset_exit(&mut self) {
        self.state.note_exit();
        self.pc = self.state.uint("resetvec").unwrap_or(0);
        self.running = true;
    }

    fn synchronize_state(&mut self) {
        self.quiesced += 1;
    }

    fn synchronize_post_reset(&mut self) {
        self.resumed += 1;
    }
}
