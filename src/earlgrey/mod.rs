//! OpenTitan EarlGrey Machine.
//!
//! The EarlGrey SoC composite, the board around it and the machine that
//! boots the board. The SoC is entirely described by the static table in
//! `table`; the board adds its dataflash and the machine adds the boot
//! sequence on top of the generic composition engine.

/// The board: SoC plus dataflash.
pub mod board;

/// Late configuration hooks referenced by the descriptor table.
pub mod configure;

/// The EarlGrey descriptor table.
pub mod table;

use crate::common::error::{BuildError, ResetError, SignalError};
use crate::config::{HostEnvironment, MachineConfig, StartupConfig};
use crate::devices::hart::{Hart, TYPE_IBEX_HART};
use crate::devices::opentitan::{
    OT_IBEX_PWRMGR_CPU_EN, OT_IBEX_WRAPPER_CPU_EN, OT_ROM_CTRL_DONE, OT_ROM_CTRL_GOOD,
    OT_RSTMGR_SOC_RST, TYPE_OT_SRAM_CTRL,
};
use crate::soc::builder::SocGraph;
use board::EarlGreyBoard;
use crate::soc::descriptor::{CompositeSignal, PinRef, SocDefinition};
use crate::soc::reset::{ResetPhases, ResetRoles};
use log::info;
use table::{EgDevice, EG_DEVICES, SRAM_MAIN_SIZE};

pub const TYPE_RISCV_OT_EG_SOC: &str = "riscv.ot_earlgrey.soc";
pub const TYPE_RISCV_OT_EG_BOARD: &str = "riscv.ot_earlgrey.board";

/// Reset-request input published by the SoC.
pub const OT_EG_SOC_RST_REQ: &str = "riscv.ot_earlgrey.soc-reset";

pub const MACHINE_DESC: &str = "RISC-V Board compatible with OpenTitan EarlGrey FPGA platform";
pub const MAX_CPUS: usize = 1;
pub const DEFAULT_CPU_TYPE: &str = TYPE_IBEX_HART;
pub const DEFAULT_RAM_ID: &str = TYPE_OT_SRAM_CTRL;
pub const DEFAULT_RAM_SIZE: u64 = SRAM_MAIN_SIZE;

/// The EarlGrey SoC composite.
pub static EARLGREY_SOC: SocDefinition = SocDefinition {
    name: TYPE_RISCV_OT_EG_SOC,
    devices: &EG_DEVICES,
    address_spaces: &["system"],
    reset_request: OT_EG_SOC_RST_REQ,
    composite_signals: &[CompositeSignal {
        source: EgDevice::Rstmgr as usize,
        output: PinRef::new(OT_RSTMGR_SOC_RST, 0),
        input: PinRef::new(OT_EG_SOC_RST_REQ, 0),
    }],
    reset_roles: ResetRoles {
        main_cpu: Some(EgDevice::Hart as usize),
        boot_integrity: Some(EgDevice::RomCtrl as usize),
        debug_transport: Some(EgDevice::Dtm as usize),
        debug_module: Some(EgDevice::Dm as usize),
    },
    reset_phases: ResetPhases::BOOT_INTEGRITY,
};

/// An EarlGrey machine: the board plus the startup flags it was built with.
pub struct EarlGreyMachine {
    board: EarlGreyBoard,
    startup: StartupConfig,
}

impl EarlGreyMachine {
    /// Builds the board from a machine configuration.
    pub fn new(config: &MachineConfig) -> Result<Self, BuildError> {
        Self::with_host(&HostEnvironment::from_config(config))
    }

    /// Builds the board against an explicit host environment.
    ///
    /// # Arguments
    ///
    /// * `host` - Startup flags and host resources
    pub fn with_host(host: &HostEnvironment) -> Result<Self, BuildError> {
        info!("[Machine] {}", MACHINE_DESC);
        let board = EarlGreyBoard::realize(host)?;
        Ok(Self {
            board,
            startup: host.startup.clone(),
        })
    }

    /// Runs the power-on reset. The hart stays held afterwards.
    pub fn power_on(&mut self) -> Result<(), ResetError> {
        self.board.soc_mut().cold_reset()
    }

    /// Power-on reset followed by the ROM check handshake. Releases the hart
    /// once the power manager enables it.
    pub fn boot(&mut self) -> Result<(), SignalError> {
        self.power_on()?;
        let rom = EgDevice::RomCtrl.id();
        let soc = self.board.soc_mut();
        soc.raise(rom, OT_ROM_CTRL_GOOD, 0, 1)?;
        soc.raise(rom, OT_ROM_CTRL_DONE, 0, 1)?;

        let cpu_en = soc.input_level(
            EgDevice::IbexWrapper.id(),
            OT_IBEX_WRAPPER_CPU_EN,
            OT_IBEX_PWRMGR_CPU_EN,
        )?;
        if cpu_en != 0 {
            self.release_cpu()?;
        }
        Ok(())
    }

    /// Lifts the reset hold on the hart.
    pub fn release_cpu(&mut self) -> Result<(), ResetError> {
        info!("[Machine] Releasing hart");
        self.board.soc_mut().release_reset(EgDevice::Hart.id())
    }

    pub fn hart(&self) -> Option<&Hart> {
        self.soc().device_as::<Hart>(EgDevice::Hart.id())
    }

    pub fn board(&self) -> &EarlGreyBoard {
        &self.board
    }

    pub fn soc(&self) -> &SocGraph {
        self.board.soc()
    }

    pub fn soc_mut(&mut self) -> &mut SocGraph {
        self.board.soc_mut()
    }

    pub fn startup(&self) -> &StartupConfig {
        &self.startup
    }
}
