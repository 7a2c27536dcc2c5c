//! EarlGrey Configure Hooks.
//!
//! Late configuration of the components whose settings depend on the
//! startup flags or on host resources.

use crate::common::data::PropValue;
use crate::common::error::{BuildError, ConfigurationError};
use crate::config::DriveInterface;
use crate::devices::debug::PULP_RV_DM_REQUESTER_ID;
use crate::soc::descriptor::{ComponentDescriptor, ConfigureContext};
use crate::soc::properties::{attach_chardev, attach_drive, attach_serial, set_property};
use crate::soc::traits::Component;
use log::debug;

pub const PMP_MODE_OFF: u64 = 0;
pub const PMP_MODE_TOR: u64 = 1;
pub const PMP_MODE_NAPOT: u64 = 3;

/// Encodes one `pmpcfg` byte.
pub const fn pmp_cfg(lock: u64, mode: u64, x: u64, w: u64, r: u64) -> u64 {
    (lock << 7) | (mode << 3) | (x << 2) | (w << 1) | r
}

/// Encodes a `pmpaddr` value from a byte address.
pub const fn pmp_addr(addr: u64) -> u64 {
    addr >> 2
}

/// Encodes `mseccfg`.
pub const fn mseccfg(rlb: u64, mmwp: u64, mml: u64) -> u64 {
    (rlb << 2) | (mmwp << 1) | mml
}

const OFF: u64 = pmp_cfg(0, PMP_MODE_OFF, 0, 0, 0);

/// Default ePMP configuration: ROM (LRX), MMIO (LRW), debug ROM (LRWX).
pub const PMP_CFGS: [u64; 16] = [
    OFF,
    OFF,
    pmp_cfg(1, PMP_MODE_NAPOT, 1, 0, 1),
    OFF,
    OFF,
    OFF,
    OFF,
    OFF,
    OFF,
    OFF,
    OFF,
    pmp_cfg(1, PMP_MODE_TOR, 0, 1, 1),
    OFF,
    pmp_cfg(1, PMP_MODE_NAPOT, 1, 1, 1),
    OFF,
    OFF,
];

pub const PMP_ADDRS: [u64; 16] = [
    0,
    0,
    pmp_addr(0x0000_83fc), // ROM: 0x8000, 2 KiB
    0,
    0,
    0,
    0,
    0,
    0,
    0,
    pmp_addr(0x4000_0000), // MMIO low
    pmp_addr(0x4201_0000), // MMIO high
    0,
    pmp_addr(0x0001_07fc), // debug ROM: 0x10000, 4 KiB
    0,
    0,
];

pub const MSECCFG: u64 = mseccfg(1, 1, 0);

pub fn configure_hart(
    dev: &mut dyn Component,
    _def: &ComponentDescriptor,
    ctx: &ConfigureContext<'_>,
) -> Result<(), BuildError> {
    if ctx.startup.no_epmp_cfg {
        debug!("#{}: skipping default ePMP configuration", ctx.index);
        return Ok(());
    }
    set_property(dev, ctx.index, "pmp_cfg", PropValue::UintArray(PMP_CFGS.to_vec()))?;
    set_property(dev, ctx.index, "pmp_addr", PropValue::UintArray(PMP_ADDRS.to_vec()))?;
    set_property(dev, ctx.index, "mseccfg", PropValue::Uint(MSECCFG))?;
    Ok(())
}

pub fn configure_dm(
    dev: &mut dyn Component,
    _def: &ComponentDescriptor,
    ctx: &ConfigureContext<'_>,
) -> Result<(), BuildError> {
    set_property(dev, ctx.index, "hart", PropValue::UintArray(vec![0]))?;
    set_property(dev, ctx.index, "mta_dm", PropValue::Uint(PULP_RV_DM_REQUESTER_ID))?;
    Ok(())
}

pub fn configure_flash_ctrl(
    dev: &mut dyn Component,
    _def: &ComponentDescriptor,
    ctx: &ConfigureContext<'_>,
) -> Result<(), BuildError> {
    attach_drive(dev, ctx, "drive", DriveInterface::Mtd, 1, 0)
}

pub fn configure_otp_ctrl(
    dev: &mut dyn Component,
    _def: &ComponentDescriptor,
    ctx: &ConfigureContext<'_>,
) -> Result<(), BuildError> {
    attach_drive(dev, ctx, "drive", DriveInterface::Pflash, 0, 0)
}

pub fn configure_tap_ctrl(
    dev: &mut dyn Component,
    _def: &ComponentDescriptor,
    ctx: &ConfigureContext<'_>,
) -> Result<(), BuildError> {
    attach_chardev(dev, ctx, "chardev", "taprbb")
}

pub fn configure_spi_device(
    dev: &mut dyn Component,
    _def: &ComponentDescriptor,
    ctx: &ConfigureContext<'_>,
) -> Result<(), BuildError> {
    attach_chardev(dev, ctx, "chardev", "spidev")
}

/// Binds the serial port matching the UART instance number.
pub fn configure_uart(
    dev: &mut dyn Component,
    def: &ComponentDescriptor,
    ctx: &ConfigureContext<'_>,
) -> Result<(), BuildError> {
    let port = def
        .instance
        .ok_or(ConfigurationError::MissingInstanceNumber {
            index: ctx.index,
            type_name: def.type_name,
        })?;
    attach_serial(dev, ctx, "chardev", port as usize)
}

/// Binds the board dataflash to the first MTD drive.
pub fn configure_dataflash(
    dev: &mut dyn Component,
    _def: &ComponentDescriptor,
    ctx: &ConfigureContext<'_>,
) -> Result<(), BuildError> {
    attach_drive(dev, ctx, "drive", DriveInterface::Mtd, 0, 0)
}
