//! Address Spaces.
//!
//! This module maps the memory regions of components into the address
//! spaces of a composite. Each memory-map entry of a descriptor maps the
//! region with the same index; a component may appear in several windows of
//! one space or in several spaces. Overlaps are the integrator's concern and
//! are not detected: lookups resolve to the first window mapped.

use crate::common::error::ConfigurationError;
use crate::soc::descriptor::{ComponentDescriptor, ComponentId};
use crate::soc::traits::Component;
use log::debug;
use serde::Serialize;

/// One mapped region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Window {
    pub owner: ComponentId,
    pub region: usize,
    pub base: u64,
    /// Zero until the owner is realized and the space is sealed.
    pub size: u64,
}

impl Window {
    pub fn contains(&self, addr: u64) -> bool {
        addr >= self.base && addr - self.base < self.size
    }
}

/// A named address space holding the windows mapped into it.
#[derive(Debug, Clone)]
pub struct AddressSpace {
    name: &'static str,
    windows: Vec<Window>,
}

impl AddressSpace {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            windows: Vec::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Maps region `region` of `owner` at `base`.
    pub fn map(&mut self, owner: ComponentId, region: usize, base: u64) {
        debug!(
            "[{}] Mapped device {} region {} @ {:#010x}",
            self.name, owner, region, base
        );
        self.windows.push(Window {
            owner,
            region,
            base,
            size: 0,
        });
    }

    /// Resolves the size of every window from its realized owner.
    pub fn seal(&mut self, devices: &[Box<dyn Component>]) -> Result<(), ConfigurationError> {
        for window in &mut self.windows {
            let device = &devices[window.owner.index()];
            window.size =
                device
                    .region_size(window.region)
                    .ok_or(ConfigurationError::UnsizedRegion {
                        index: window.owner.index(),
                        type_name: device.type_name(),
                        region: window.region,
                    })?;
        }
        Ok(())
    }

    pub fn windows(&self) -> &[Window] {
        &self.windows
    }

    /// Windows owned by one component, in mapping order.
    pub fn windows_of(&self, owner: ComponentId) -> impl Iterator<Item = &Window> + '_ {
        self.windows.iter().filter(move |w| w.owner == owner)
    }

    /// Finds the window covering `addr` and the offset within it.
    pub fn find(&self, addr: u64) -> Option<(&Window, u64)> {
        self.windows
            .iter()
            .find(|w| w.contains(addr))
            .map(|w| (w, addr - w.base))
    }

    pub fn is_valid_address(&self, addr: u64) -> bool {
        self.find(addr).is_some()
    }
}

/// Maps every memory-map entry of `table` into the spaces named by
/// `spaces`, in declaration order.
pub fn map_devices(
    devices: &[Box<dyn Component>],
    table: &[ComponentDescriptor],
    spaces: &[&'static str],
) -> Result<Vec<AddressSpace>, ConfigurationError> {
    let mut out: Vec<AddressSpace> = spaces.iter().map(|name| AddressSpace::new(name)).collect();
    for (index, def) in table.iter().enumerate() {
        map_device(&mut out, devices[index].as_ref(), index, def)?;
    }
    Ok(out)
}

/// Maps the memory-map entries of descriptor `index`.
pub fn map_device(
    spaces: &mut [AddressSpace],
    device: &dyn Component,
    index: usize,
    def: &ComponentDescriptor,
) -> Result<(), ConfigurationError> {
    let class = device.class();
    for (region, entry) in def.memmap.iter().enumerate() {
        if region >= class.regions.len() {
            return Err(ConfigurationError::UnmappedRegion {
                index,
                type_name: class.type_name,
                region,
                regions: class.regions.len(),
            });
        }
        let count = spaces.len();
        let space = spaces
            .get_mut(entry.space)
            .ok_or(ConfigurationError::AddressSpaceOutOfRange {
                index,
                space: entry.space,
                count,
            })?;
        space.map(ComponentId(index), region, entry.base);
    }
    Ok(())
}
