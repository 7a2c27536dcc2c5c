//! Link Resolution.
//!
//! Assigns object-reference properties between components. Every instance
//! exists before this runs, so a link may point at any table entry, before
//! or after the referencing one.

use crate::common::error::ConfigurationError;
use crate::soc::descriptor::{ComponentDescriptor, ComponentId};
use crate::soc::traits::Component;
use log::debug;

pub fn resolve_links(
    devices: &mut [Box<dyn Component>],
    table: &[ComponentDescriptor],
) -> Result<(), ConfigurationError> {
    let len = devices.len();
    for (index, def) in table.iter().enumerate() {
        resolve_device_links(devices[index].as_mut(), index, def, len)?;
    }
    Ok(())
}

/// Assigns the links of descriptor `index` in a composite of `len`
/// components.
pub fn resolve_device_links(
    device: &mut dyn Component,
    index: usize,
    def: &ComponentDescriptor,
    len: usize,
) -> Result<(), ConfigurationError> {
    for link in def.link {
        if link.target >= len {
            return Err(ConfigurationError::LinkTargetOutOfRange {
                index,
                type_name: device.type_name(),
                name: link.name,
                target: link.target,
                len,
            });
        }
        device
            .set_link(link.name, ComponentId(link.target))
            .map_err(|_| ConfigurationError::UnknownLink {
                index,
                type_name: device.type_name(),
                name: link.name,
            })?;
        debug!("#{} {}: {} -> #{}", index, def.type_name, link.name, link.target);
    }
    Ok(())
}
