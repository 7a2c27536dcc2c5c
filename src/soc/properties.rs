//! Property Application and Late Configuration.
//!
//! Static properties are applied first, then each descriptor's configure
//! hook runs. Hooks bind what cannot be a static value: host resources,
//! arrays, and settings derived from the startup configuration.

use crate::common::data::PropValue;
use crate::common::error::{BuildError, ConfigurationError, ResourceAttachError};
use crate::config::{DriveInterface, HostEnvironment};
use crate::soc::descriptor::{ComponentDescriptor, ConfigureContext};
use crate::soc::traits::Component;
use log::{debug, warn};
use std::path::Path;

/// Companion property of a drive binding.
pub const READ_ONLY: &str = "read-only";

/// Assigns every static property of `table` onto its instance.
pub fn apply_properties(
    devices: &mut [Box<dyn Component>],
    table: &[ComponentDescriptor],
) -> Result<(), ConfigurationError> {
    for (index, def) in table.iter().enumerate() {
        apply_device_properties(devices[index].as_mut(), index, def)?;
    }
    Ok(())
}

pub fn apply_device_properties(
    device: &mut dyn Component,
    index: usize,
    def: &ComponentDescriptor,
) -> Result<(), ConfigurationError> {
    for prop in def.prop {
        set_property(device, index, prop.name, prop.value.to_value())?;
    }
    Ok(())
}

/// Runs the configure hook of every descriptor that has one, in table
/// order.
pub fn run_configure_hooks(
    devices: &mut [Box<dyn Component>],
    table: &[ComponentDescriptor],
    parent: &'static str,
    host: &HostEnvironment,
) -> Result<(), BuildError> {
    for (index, def) in table.iter().enumerate() {
        run_configure_hook(devices[index].as_mut(), index, def, parent, host)?;
    }
    Ok(())
}

/// Runs the configure hook of descriptor `index`, if it has one.
pub fn run_configure_hook(
    device: &mut dyn Component,
    index: usize,
    def: &ComponentDescriptor,
    parent: &'static str,
    host: &HostEnvironment,
) -> Result<(), BuildError> {
    let Some(hook) = def.cfg else {
        return Ok(());
    };
    let ctx = ConfigureContext {
        index,
        parent,
        startup: &host.startup,
        resources: &host.resources,
    };
    debug!("#{} {}: configure", index, def.type_name);
    hook(device, def, &ctx)
}

/// Sets one property, attributing a rejection to descriptor `index`.
pub fn set_property(
    device: &mut dyn Component,
    index: usize,
    name: &str,
    value: PropValue,
) -> Result<(), ConfigurationError> {
    device
        .set_property(name, value)
        .map_err(|source| ConfigurationError::Property {
            index,
            type_name: device.type_name(),
            name: name.to_string(),
            source,
        })
}

/// Applies the resource policy: fatal in strict mode, logged otherwise.
fn attach_failure(ctx: &ConfigureContext<'_>, err: ResourceAttachError) -> Result<(), BuildError> {
    if ctx.startup.strict_resources {
        Err(err.into())
    } else {
        warn!("{err}; leaving it unbound");
        Ok(())
    }
}

/// Binds chardev `id` to property `prop`, if the host declares it.
pub fn attach_chardev(
    device: &mut dyn Component,
    ctx: &ConfigureContext<'_>,
    prop: &str,
    id: &str,
) -> Result<(), BuildError> {
    let Some(chr) = ctx.resources.chardev(id) else {
        debug!("#{}: no chardev '{}'", ctx.index, id);
        return Ok(());
    };
    if chr.backend.needs_path() && chr.path.as_deref().map_or(true, str::is_empty) {
        return attach_failure(
            ctx,
            ResourceAttachError {
                index: ctx.index,
                resource: format!("chardev '{id}'"),
                reason: format!("{:?} backend has no path", chr.backend),
            },
        );
    }
    set_property(device, ctx.index, prop, PropValue::Chardev(chr.id.clone()))?;
    Ok(())
}

/// Binds the chardev assigned to serial port `port`, if any.
pub fn attach_serial(
    device: &mut dyn Component,
    ctx: &ConfigureContext<'_>,
    prop: &str,
    port: usize,
) -> Result<(), BuildError> {
    let Some(id) = ctx.resources.serial_id(port) else {
        debug!("#{}: serial port {} is not connected", ctx.index, port);
        return Ok(());
    };
    if ctx.resources.chardev(id).is_none() {
        return attach_failure(
            ctx,
            ResourceAttachError {
                index: ctx.index,
                resource: format!("serial port {port}"),
                reason: format!("chardev '{id}' is not declared"),
            },
        );
    }
    attach_chardev(device, ctx, prop, id)
}

/// Binds the drive at `(interface, bus, unit)` to property `prop`, if the
/// host declares one. Components declaring `read-only` also get the
/// drive's access mode.
pub fn attach_drive(
    device: &mut dyn Component,
    ctx: &ConfigureContext<'_>,
    prop: &str,
    interface: DriveInterface,
    bus: u32,
    unit: u32,
) -> Result<(), BuildError> {
    let Some(drive) = ctx.resources.drive(interface, bus, unit) else {
        debug!(
            "#{}: no {} drive {}.{}",
            ctx.index,
            interface.name(),
            bus,
            unit
        );
        return Ok(());
    };
    if !Path::new(&drive.file).is_file() {
        return attach_failure(
            ctx,
            ResourceAttachError {
                index: ctx.index,
                resource: format!("drive {}", drive.id()),
                reason: format!("'{}' is not a readable file", drive.file),
            },
        );
    }
    set_property(device, ctx.index, prop, PropValue::Drive(drive.id()))?;
    if device.class().property(READ_ONLY).is_some() {
        set_property(device, ctx.index, READ_ONLY, PropValue::Bool(drive.read_only))?;
    } else if drive.read_only {
        warn!("#{}: {} cannot honor read-only drive {}", ctx.index, device.type_name(), drive.id());
    }
    Ok(())
}
