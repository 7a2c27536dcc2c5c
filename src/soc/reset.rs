//! Reset Orchestration.
//!
//! Drives the two-phase reset protocol across a realized `SocGraph`. Each
//! phase runs in two ordered slots: the default behavior over every
//! component in table order, then an optional override hook carried by the
//! composite's `SocDefinition`. The override hooks shipped here hold the
//! boot-integrity component through the whole cycle and release it last.

use crate::common::error::{ConfigurationError, ResetError};
use crate::soc::builder::SocGraph;
use crate::soc::descriptor::ComponentId;
use log::{debug, info};
use serde::Serialize;
use std::fmt;

/// Phase of the reset state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ResetPhase {
    Idle,
    Hold,
    Exit,
}

/// One state change recorded in the reset log.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ResetStep {
    /// Default hold hook ran.
    Hold,
    /// Default exit hook ran.
    Exit,
    /// Explicitly asserted and held in reset.
    Assert,
    /// Explicitly released.
    Release,
    /// Execution state synchronized ahead of a requested reset.
    Quiesce,
    /// Execution state tracking resumed after a requested reset.
    Resume,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ResetEvent {
    pub component: ComponentId,
    pub step: ResetStep,
}

/// Components singled out by the reset protocol, by table index.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResetRoles {
    pub main_cpu: Option<usize>,
    pub boot_integrity: Option<usize>,
    pub debug_transport: Option<usize>,
    pub debug_module: Option<usize>,
}

impl ResetRoles {
    pub const NONE: Self = Self {
        main_cpu: None,
        boot_integrity: None,
        debug_transport: None,
        debug_module: None,
    };

    /// Checks every designated index against a table of `len` entries.
    pub fn validate(&self, len: usize) -> Result<(), ConfigurationError> {
        let roles = [
            ("main_cpu", self.main_cpu),
            ("boot_integrity", self.boot_integrity),
            ("debug_transport", self.debug_transport),
            ("debug_module", self.debug_module),
        ];
        for (role, index) in roles {
            if let Some(index) = index.filter(|&i| i >= len) {
                return Err(ConfigurationError::InvalidResetRole { role, index, len });
            }
        }
        Ok(())
    }
}

/// Override hook run after the default behavior of a phase.
pub type PhaseHook = fn(&mut SocGraph) -> Result<(), ResetError>;

/// Override slots of the two reset phases.
#[derive(Clone, Copy)]
pub struct ResetPhases {
    pub hold: Option<PhaseHook>,
    pub exit: Option<PhaseHook>,
}

impl ResetPhases {
    /// Default behavior only.
    pub const DEFAULT: Self = Self {
        hold: None,
        exit: None,
    };

    /// Keeps the boot-integrity component in reset until the end of the
    /// cycle.
    pub const BOOT_INTEGRITY: Self = Self {
        hold: Some(boot_integrity_hold),
        exit: Some(boot_integrity_exit),
    };
}

impl fmt::Debug for ResetPhases {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResetPhases")
            .field("hold", &self.hold.is_some())
            .field("exit", &self.exit.is_some())
            .finish()
    }
}

/// Reset bookkeeping of a composite.
#[derive(Debug)]
pub struct ResetController {
    phase: ResetPhase,
    in_reset: Vec<bool>,
    held: Vec<bool>,
    log: Vec<ResetEvent>,
    servicing_request: bool,
    cycles: u64,
}

impl ResetController {
    pub fn new(len: usize) -> Self {
        Self {
            phase: ResetPhase::Idle,
            in_reset: vec![false; len],
            held: vec![false; len],
            log: Vec::new(),
            servicing_request: false,
            cycles: 0,
        }
    }

    /// Tracks one more component, out of reset.
    pub(crate) fn add_component(&mut self) {
        self.in_reset.push(false);
        self.held.push(false);
    }

    fn record(&mut self, component: ComponentId, step: ResetStep) {
        self.log.push(ResetEvent { component, step });
    }
}

/// Hold override: cycles the debug chain, then asserts reset on the
/// boot-integrity component and on the main processing element.
pub fn boot_integrity_hold(soc: &mut SocGraph) -> Result<(), ResetError> {
    let roles = soc.definition.reset_roles;
    if let Some(dtm) = roles.debug_transport {
        soc.pulse_reset(ComponentId(dtm))?;
    }
    if let Some(dm) = roles.debug_module {
        soc.pulse_reset(ComponentId(dm))?;
    }
    let rom = roles
        .boot_integrity
        .ok_or(ResetError::MissingRole("boot_integrity"))?;
    soc.assert_reset(ComponentId(rom))?;
    if let Some(cpu) = roles.main_cpu {
        soc.assert_reset(ComponentId(cpu))?;
    }
    Ok(())
}

/// Exit override: releases the boot-integrity component.
pub fn boot_integrity_exit(soc: &mut SocGraph) -> Result<(), ResetError> {
    let rom = soc
        .definition
        .reset_roles
        .boot_integrity
        .ok_or(ResetError::MissingRole("boot_integrity"))?;
    soc.release_reset(ComponentId(rom))
}

impl SocGraph {
    fn check_component(&self, id: ComponentId) -> Result<usize, ResetError> {
        if id.index() < self.devices.len() {
            Ok(id.index())
        } else {
            Err(ResetError::UnknownComponent(id.index()))
        }
    }

    /// Enters the hold phase. A second call without an intervening exit has
    /// no effect.
    pub fn reset_hold(&mut self) -> Result<(), ResetError> {
        if self.reset.phase == ResetPhase::Hold {
            debug!("[{}] Reset already held", self.name());
            return Ok(());
        }
        self.reset.phase = ResetPhase::Hold;
        for (i, device) in self.devices.iter_mut().enumerate() {
            device.reset_hold();
            self.reset.in_reset[i] = true;
            self.reset.record(ComponentId(i), ResetStep::Hold);
        }
        if let Some(hook) = self.definition.reset_phases.hold {
            hook(self)?;
        }
        Ok(())
    }

    /// Leaves the hold phase: every component in reset that is not
    /// explicitly held is released, then the exit override runs.
    pub fn reset_exit(&mut self) -> Result<(), ResetError> {
        if self.reset.phase != ResetPhase::Hold {
            return Err(ResetError::ExitWithoutHold);
        }
        self.reset.phase = ResetPhase::Exit;
        for (i, device) in self.devices.iter_mut().enumerate() {
            if self.reset.in_reset[i] && !self.reset.held[i] {
                device.reset_exit();
                self.reset.in_reset[i] = false;
                self.reset.record(ComponentId(i), ResetStep::Exit);
            }
        }
        let result = match self.definition.reset_phases.exit {
            Some(hook) => hook(self),
            None => Ok(()),
        };
        self.reset.phase = ResetPhase::Idle;
        if result.is_ok() {
            self.reset.cycles += 1;
        }
        result
    }

    /// Runs one full hold-then-exit cycle.
    pub fn cold_reset(&mut self) -> Result<(), ResetError> {
        info!("[{}] Cold reset", self.name());
        self.reset_hold()?;
        self.reset_exit()
    }

    /// Puts `id` in reset and keeps it there until `release_reset`.
    pub fn assert_reset(&mut self, id: ComponentId) -> Result<(), ResetError> {
        let i = self.check_component(id)?;
        if !self.reset.in_reset[i] {
            self.devices[i].reset_hold();
            self.reset.in_reset[i] = true;
        }
        self.reset.held[i] = true;
        self.reset.record(id, ResetStep::Assert);
        debug!("[{}] {} held in reset", self.name(), id);
        Ok(())
    }

    /// Lifts an explicit hold on `id`. Not allowed during the hold phase.
    pub fn release_reset(&mut self, id: ComponentId) -> Result<(), ResetError> {
        let i = self.check_component(id)?;
        if self.reset.phase == ResetPhase::Hold {
            return Err(ResetError::ReleaseDuringHold(i));
        }
        self.reset.held[i] = false;
        if self.reset.in_reset[i] {
            self.devices[i].reset_exit();
            self.reset.in_reset[i] = false;
        }
        self.reset.record(id, ResetStep::Release);
        debug!("[{}] {} released from reset", self.name(), id);
        Ok(())
    }

    /// Runs a complete hold and exit on `id` alone.
    pub fn pulse_reset(&mut self, id: ComponentId) -> Result<(), ResetError> {
        let i = self.check_component(id)?;
        self.devices[i].reset_hold();
        self.reset.record(id, ResetStep::Hold);
        self.devices[i].reset_exit();
        self.reset.in_reset[i] = false;
        self.reset.held[i] = false;
        self.reset.record(id, ResetStep::Exit);
        Ok(())
    }

    /// Services the published reset-request input. A zero level is ignored.
    pub fn request_reset(&mut self, level: i32) -> Result<(), ResetError> {
        if level == 0 {
            return Ok(());
        }
        if self.reset.servicing_request {
            return Err(ResetError::Reentrant);
        }
        info!("[{}] Reset requested", self.name());
        self.reset.servicing_request = true;
        let result = self.service_reset_request();
        self.reset.servicing_request = false;
        result
    }

    fn service_reset_request(&mut self) -> Result<(), ResetError> {
        let cpu = self.definition.reset_roles.main_cpu;
        if let Some(cpu) = cpu {
            self.devices[cpu].synchronize_state();
            self.reset.record(ComponentId(cpu), ResetStep::Quiesce);
        }
        self.cold_reset()?;
        if let Some(cpu) = cpu {
            self.devices[cpu].synchronize_post_reset();
            self.reset.record(ComponentId(cpu), ResetStep::Resume);
        }
        Ok(())
    }

    pub fn reset_phase(&self) -> ResetPhase {
        self.reset.phase
    }

    pub fn is_in_reset(&self, id: ComponentId) -> bool {
        self.reset.in_reset.get(id.index()).copied().unwrap_or(false)
    }

    pub fn is_held(&self, id: ComponentId) -> bool {
        self.reset.held.get(id.index()).copied().unwrap_or(false)
    }

    /// Number of completed reset cycles.
    pub fn reset_cycles(&self) -> u64 {
        self.reset.cycles
    }

    pub fn reset_log(&self) -> &[ResetEvent] {
        &self.reset.log
    }

    /// Returns the reset log and clears it.
    pub fn take_reset_log(&mut self) -> Vec<ResetEvent> {
        std::mem::take(&mut self.reset.log)
    }
}
