//! System-on-Chip (SoC) Builder.
//!
//! This module defines `SocGraph`, the composite that owns every component
//! instance of a descriptor table. Construction runs the stages in a fixed
//! order (instantiate, link, map, wire, configure, realize) and is
//! all-or-nothing: either every component is realized and wired, or an error
//! naming the failing descriptor is returned and nothing is kept.

use crate::common::data::PropValue;
use crate::common::error::{BuildError, ConfigurationError, RealizationError, SignalError};
use crate::config::HostEnvironment;
use crate::devices::TypeRegistry;
use crate::soc::descriptor::{ComponentDescriptor, ComponentId, SocDefinition};
use crate::soc::interconnect::{self, AddressSpace, Window};
use crate::soc::links;
use crate::soc::pins::PinHandle;
use crate::soc::properties;
use crate::soc::reset::ResetController;
use crate::soc::signals::{Destination, OutputKey, SignalNetwork, MAX_PROPAGATION_STEPS};
use crate::soc::traits::{Component, SignalSink};
use log::{debug, info};
use serde::Serialize;
use std::collections::VecDeque;

/// A fully constructed composite of components.
pub struct SocGraph {
    pub(crate) definition: SocDefinition,
    pub(crate) devices: Vec<Box<dyn Component>>,
    pub(crate) spaces: Vec<AddressSpace>,
    pub(crate) signals: SignalNetwork,
    pub(crate) reset: ResetController,
}

/// Allocates one instance per descriptor, in table order.
pub fn instantiate(
    table: &[ComponentDescriptor],
    registry: &TypeRegistry,
) -> Result<Vec<Box<dyn Component>>, ConfigurationError> {
    table
        .iter()
        .enumerate()
        .map(|(index, def)| {
            registry
                .lookup(def.type_name)
                .map(|class| class.instantiate(def.instance))
                .ok_or(ConfigurationError::UnknownType {
                    index,
                    type_name: def.type_name,
                })
        })
        .collect()
}

/// Realizes every instance in ascending order, stopping at the first
/// failure.
pub fn realize_all(devices: &mut [Box<dyn Component>]) -> Result<(), RealizationError> {
    for (index, device) in devices.iter_mut().enumerate() {
        device.realize().map_err(|source| RealizationError {
            index,
            type_name: device.type_name(),
            source,
        })?;
        device.state_mut().mark_realized();
    }
    Ok(())
}

impl SocGraph {
    /// Builds the composite described by `definition`.
    ///
    /// # Arguments
    ///
    /// * `definition` - Descriptor table and composite-level wiring
    /// * `registry` - Component types available for instantiation
    /// * `host` - Startup flags and host resources for configure hooks
    pub fn build(
        definition: &SocDefinition,
        registry: &TypeRegistry,
        host: &HostEnvironment,
    ) -> Result<Self, BuildError> {
        let table = definition.devices;
        info!("[{}] Building {} components", definition.name, table.len());

        let mut devices = instantiate(table, registry)?;
        links::resolve_links(&mut devices, table)?;
        let mut spaces = interconnect::map_devices(&devices, table, definition.address_spaces)?;
        let mut signals = SignalNetwork::wire(&devices, table)?;
        properties::apply_properties(&mut devices, table)?;
        properties::run_configure_hooks(&mut devices, table, definition.name, host)?;
        definition.reset_roles.validate(devices.len())?;

        realize_all(&mut devices)?;
        for space in &mut spaces {
            space.seal(&devices)?;
        }
        signals.connect_composite(&devices, definition)?;

        info!(
            "[{}] Realized {} components, {} windows, {} signal edges",
            definition.name,
            devices.len(),
            spaces.iter().map(|s| s.windows().len()).sum::<usize>(),
            signals.edge_count()
        );

        let reset = ResetController::new(devices.len());
        Ok(Self {
            definition: *definition,
            devices,
            spaces,
            signals,
            reset,
        })
    }

    /// Adds one component to the realized composite, the way a board adds
    /// devices that sit outside the SoC.
    ///
    /// The descriptor goes through the same stages as a table entry; links
    /// and signals may reference any existing component. On error the
    /// composite is left unchanged. The new component starts out of reset.
    ///
    /// # Arguments
    ///
    /// * `def` - Descriptor of the new component
    /// * `parent` - Name passed to the configure hook
    /// * `registry` - Component types available for instantiation
    /// * `host` - Startup flags and host resources for the configure hook
    pub fn attach(
        &mut self,
        def: &ComponentDescriptor,
        parent: &'static str,
        registry: &TypeRegistry,
        host: &HostEnvironment,
    ) -> Result<ComponentId, BuildError> {
        let index = self.devices.len();
        let class = registry
            .lookup(def.type_name)
            .ok_or(ConfigurationError::UnknownType {
                index,
                type_name: def.type_name,
            })?;
        let mut device = class.instantiate(def.instance);
        links::resolve_device_links(device.as_mut(), index, def, index + 1)?;
        let mut spaces = self.spaces.clone();
        interconnect::map_device(&mut spaces, device.as_ref(), index, def)?;
        properties::apply_device_properties(device.as_mut(), index, def)?;
        properties::run_configure_hook(device.as_mut(), index, def, parent, host)?;
        device.realize().map_err(|source| RealizationError {
            index,
            type_name: device.type_name(),
            source,
        })?;
        device.state_mut().mark_realized();

        self.devices.push(device);
        let mut signals = self.signals.clone();
        let wired = signals
            .wire_device(&self.devices, index, def)
            .and_then(|()| spaces.iter_mut().try_for_each(|s| s.seal(&self.devices)));
        if let Err(e) = wired {
            self.devices.pop();
            return Err(e.into());
        }
        self.spaces = spaces;
        self.signals = signals;
        self.reset.add_component();
        info!("[{}] Attached #{} {} from {}", self.name(), index, def.type_name, parent);
        Ok(ComponentId(index))
    }

    /// Connects output `(out, out_num)` of `source` to input `(input,
    /// in_num)` of `target` on a realized composite.
    pub fn connect(
        &mut self,
        source: ComponentId,
        out: &'static str,
        out_num: usize,
        target: ComponentId,
        input: &'static str,
        in_num: usize,
    ) -> Result<(), ConfigurationError> {
        let pin_error = |index: usize, direction: &'static str, pin: &'static str, num: usize| {
            ConfigurationError::UnknownPin {
                index,
                type_name: self
                    .device(ComponentId(index))
                    .map_or(self.name(), |d| d.type_name()),
                direction,
                pin,
                num,
            }
        };
        let output = self
            .output_pin(source, out, out_num)
            .map_err(|_| pin_error(source.index(), "output", out, out_num))?;
        let pin = self
            .input_pin(target, input, in_num)
            .map_err(|_| pin_error(target.index(), "input", input, in_num))?;
        let key = OutputKey {
            component: source,
            pin: output,
        };
        self.signals
            .connect(key, Destination::Input { component: target, pin })
            .map_err(|previous| ConfigurationError::DuplicateSignalSource {
                index: source.index(),
                target: target.index(),
                pin: input,
                num: in_num,
                previous: previous.component.index(),
            })?;
        debug!("#{} {}[{}] -> #{} {}[{}]", source.index(), out, out_num, target.index(), input, in_num);
        Ok(())
    }

    pub fn name(&self) -> &'static str {
        self.definition.name
    }

    pub fn definition(&self) -> &SocDefinition {
        &self.definition
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    pub fn device(&self, id: ComponentId) -> Option<&dyn Component> {
        self.devices.get(id.index()).map(|d| d.as_ref())
    }

    pub fn device_mut(&mut self, id: ComponentId) -> Option<&mut dyn Component> {
        self.devices.get_mut(id.index()).map(|d| d.as_mut())
    }

    /// Downcasts a component to its concrete type.
    pub fn device_as<T: Component>(&self, id: ComponentId) -> Option<&T> {
        self.device(id)?.as_any().downcast_ref::<T>()
    }

    pub fn devices(&self) -> impl Iterator<Item = (ComponentId, &dyn Component)> + '_ {
        self.devices
            .iter()
            .enumerate()
            .map(|(i, d)| (ComponentId(i), d.as_ref()))
    }

    /// Resolved link `name` of component `id`.
    pub fn link(&self, id: ComponentId, name: &str) -> Option<ComponentId> {
        self.device(id)?.link(name)
    }

    pub fn property(&self, id: ComponentId, name: &str) -> Option<&PropValue> {
        self.device(id)?.property(name)
    }

    pub fn address_spaces(&self) -> &[AddressSpace] {
        &self.spaces
    }

    pub fn address_space(&self, space: usize) -> Option<&AddressSpace> {
        self.spaces.get(space)
    }

    /// Windows of component `id` across every address space, as
    /// `(space, window)` pairs.
    pub fn windows_of(&self, id: ComponentId) -> Vec<(usize, Window)> {
        self.spaces
            .iter()
            .enumerate()
            .flat_map(|(i, s)| s.windows_of(id).map(move |w| (i, *w)))
            .collect()
    }

    pub fn signals(&self) -> &SignalNetwork {
        &self.signals
    }

    /// Resolves an output pin of component `id`.
    pub fn output_pin(&self, id: ComponentId, name: &str, num: usize) -> Result<PinHandle, SignalError> {
        let device = self
            .device(id)
            .ok_or(SignalError::UnknownComponent(id.index()))?;
        device
            .class()
            .output_pin(name, num)
            .ok_or_else(|| SignalError::UnknownPin {
                index: id.index(),
                direction: "output",
                pin: name.to_string(),
                num,
            })
    }

    /// Resolves an input pin of component `id`.
    pub fn input_pin(&self, id: ComponentId, name: &str, num: usize) -> Result<PinHandle, SignalError> {
        let device = self
            .device(id)
            .ok_or(SignalError::UnknownComponent(id.index()))?;
        device
            .class()
            .input_pin(name, num)
            .ok_or_else(|| SignalError::UnknownPin {
                index: id.index(),
                direction: "input",
                pin: name.to_string(),
                num,
            })
    }

    /// Current level of input `(name, num)` of component `id`.
    pub fn input_level(&self, id: ComponentId, name: &str, num: usize) -> Result<i32, SignalError> {
        let pin = self.input_pin(id, name, num)?;
        Ok(self.devices[id.index()].state().input_level(pin))
    }

    /// Drives output `(name, num)` of component `id` to `level`.
    pub fn raise(&mut self, id: ComponentId, name: &str, num: usize, level: i32) -> Result<(), SignalError> {
        let pin = self.output_pin(id, name, num)?;
        self.fire(id, pin, level)
    }

    /// Drives a pre-resolved output and propagates until the graph settles.
    ///
    /// Each handler runs to completion before anything it raised is
    /// delivered; deliveries happen in FIFO order.
    pub fn fire(&mut self, id: ComponentId, pin: PinHandle, level: i32) -> Result<(), SignalError> {
        if id.index() >= self.devices.len() {
            return Err(SignalError::UnknownComponent(id.index()));
        }
        let mut queue = VecDeque::from([(OutputKey { component: id, pin }, level)]);
        let mut pending = Vec::new();
        let mut steps = 0usize;

        while let Some((source, level)) = queue.pop_front() {
            let count = self.signals.destinations(source).len();
            for i in 0..count {
                steps += 1;
                if steps > MAX_PROPAGATION_STEPS {
                    return Err(SignalError::Unsettled(MAX_PROPAGATION_STEPS));
                }
                let dest = self.signals.destinations(source)[i];
                match dest {
                    Destination::Input { component, pin } => {
                        let mut sink = SignalSink::new(component, &mut pending);
                        self.devices[component.index()].set_input(pin, level, &mut sink);
                        queue.extend(pending.drain(..));
                    }
                    Destination::ResetRequest => self.request_reset(level)?,
                }
            }
        }
        Ok(())
    }

    /// Serializable overview of the composite.
    pub fn summary(&self) -> GraphSummary {
        let devices = self
            .devices()
            .map(|(id, device)| DeviceSummary {
                index: id.index(),
                type_name: device.type_name(),
                instance: device.state().instance(),
                windows: self
                    .windows_of(id)
                    .into_iter()
                    .map(|(space, w)| WindowSummary {
                        space: self.spaces[space].name(),
                        region: w.region,
                        base: w.base,
                        size: w.size,
                    })
                    .collect(),
                links: device
                    .class()
                    .links
                    .iter()
                    .filter_map(|l| device.link(l.name).map(|t| (l.name, t.index())))
                    .collect(),
            })
            .collect();
        GraphSummary {
            name: self.name(),
            devices,
            signal_edges: self.signals.edge_count(),
            bypass_edges: self.signals.bypass_edges().len(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GraphSummary {
    pub name: &'static str,
    pub devices: Vec<DeviceSummary>,
    pub signal_edges: usize,
    pub bypass_edges: usize,
}

#[derive(Debug, Serialize)]
pub struct DeviceSummary {
    pub index: usize,
    #[serde(rename = "type")]
    pub type_name: &'static str,
    pub instance: Option<u32>,
    pub windows: Vec<WindowSummary>,
    pub links: Vec<(&'static str, usize)>,
}

#[derive(Debug, Serialize)]
pub struct WindowSummary {
    pub space: &'static str,
    pub region: usize,
    pub base: u64,
    pub size: u64,
}
