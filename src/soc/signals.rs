//! Signal Wiring.
//!
//! Resolves the signal connections declared in a descriptor table into a
//! routing table from output pins to input pins. An output may fan out to
//! any number of inputs; an input accepts exactly one source. A component
//! may route its own outputs back into its own inputs.

use crate::common::error::ConfigurationError;
use crate::soc::descriptor::{ComponentDescriptor, ComponentId, SocDefinition};
use crate::soc::pins::PinHandle;
use crate::soc::traits::Component;
use log::{debug, warn};
use std::collections::HashMap;

/// Upper bound on deliveries for a single propagation.
pub const MAX_PROPAGATION_STEPS: usize = 1 << 16;

/// An output pin of a specific component.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct OutputKey {
    pub component: ComponentId,
    pub pin: PinHandle,
}

/// Where a connection delivers its events.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Destination {
    Input {
        component: ComponentId,
        pin: PinHandle,
    },
    /// The composite's published reset-request input.
    ResetRequest,
}

/// Routing table of a composite.
#[derive(Debug, Default, Clone)]
pub struct SignalNetwork {
    routes: HashMap<OutputKey, Vec<Destination>>,
    sources: HashMap<Destination, OutputKey>,
    bypass: Vec<(OutputKey, Destination)>,
}

impl SignalNetwork {
    /// Wires every connection declared in `table`.
    pub fn wire(
        devices: &[Box<dyn Component>],
        table: &[ComponentDescriptor],
    ) -> Result<Self, ConfigurationError> {
        let mut network = Self::default();
        for (index, def) in table.iter().enumerate() {
            network.wire_device(devices, index, def)?;
        }
        Ok(network)
    }

    /// Wires the connections declared by descriptor `index`.
    pub fn wire_device(
        &mut self,
        devices: &[Box<dyn Component>],
        index: usize,
        def: &ComponentDescriptor,
    ) -> Result<(), ConfigurationError> {
        let class = devices[index].class();
        for conn in def.gpio {
            let output = class.output_pin(conn.output.name, conn.output.num).ok_or(
                ConfigurationError::UnknownPin {
                    index,
                    type_name: class.type_name,
                    direction: "output",
                    pin: conn.output.name,
                    num: conn.output.num,
                },
            )?;
            let target = devices.get(conn.target).ok_or(
                ConfigurationError::SignalTargetOutOfRange {
                    index,
                    type_name: class.type_name,
                    target: conn.target,
                    len: devices.len(),
                },
            )?;
            let input = target
                .class()
                .input_pin(conn.input.name, conn.input.num)
                .ok_or(ConfigurationError::UnknownPin {
                    index: conn.target,
                    type_name: target.type_name(),
                    direction: "input",
                    pin: conn.input.name,
                    num: conn.input.num,
                })?;
            let source = OutputKey {
                component: ComponentId(index),
                pin: output,
            };
            let dest = Destination::Input {
                component: ComponentId(conn.target),
                pin: input,
            };
            self.connect(source, dest).map_err(|previous| {
                ConfigurationError::DuplicateSignalSource {
                    index,
                    target: conn.target,
                    pin: conn.input.name,
                    num: conn.input.num,
                    previous: previous.component.index(),
                }
            })?;
            if conn.bypass {
                warn!(
                    "#{} {}[{}] -> #{} {}[{}]: loopback stands in for an unmodeled signal",
                    index,
                    conn.output.name,
                    conn.output.num,
                    conn.target,
                    conn.input.name,
                    conn.input.num
                );
                self.bypass.push((source, dest));
            } else {
                debug!(
                    "#{} {}[{}] -> #{} {}[{}]",
                    index,
                    conn.output.name,
                    conn.output.num,
                    conn.target,
                    conn.input.name,
                    conn.input.num
                );
            }
        }
        Ok(())
    }

    /// Connects the composite-level signals of `definition`; requires every
    /// child to be realized.
    pub fn connect_composite(
        &mut self,
        devices: &[Box<dyn Component>],
        definition: &SocDefinition,
    ) -> Result<(), ConfigurationError> {
        for sig in definition.composite_signals {
            let device = devices.get(sig.source).ok_or(
                ConfigurationError::SignalTargetOutOfRange {
                    index: sig.source,
                    type_name: definition.name,
                    target: sig.source,
                    len: devices.len(),
                },
            )?;
            let output = device
                .class()
                .output_pin(sig.output.name, sig.output.num)
                .ok_or(ConfigurationError::UnknownPin {
                    index: sig.source,
                    type_name: device.type_name(),
                    direction: "output",
                    pin: sig.output.name,
                    num: sig.output.num,
                })?;
            if sig.input.name != definition.reset_request || sig.input.num != 0 {
                return Err(ConfigurationError::UnknownPin {
                    index: sig.source,
                    type_name: definition.name,
                    direction: "composite input",
                    pin: sig.input.name,
                    num: sig.input.num,
                });
            }
            let source = OutputKey {
                component: ComponentId(sig.source),
                pin: output,
            };
            self.connect(source, Destination::ResetRequest)
                .map_err(|previous| ConfigurationError::DuplicateSignalSource {
                    index: sig.source,
                    target: sig.source,
                    pin: sig.input.name,
                    num: sig.input.num,
                    previous: previous.component.index(),
                })?;
            debug!(
                "#{} {}[{}] -> {} {}",
                sig.source, sig.output.name, sig.output.num, definition.name, sig.input.name
            );
        }
        Ok(())
    }

    /// Adds one edge. Returns the existing source when `dest` is already
    /// driven.
    pub fn connect(&mut self, source: OutputKey, dest: Destination) -> Result<(), OutputKey> {
        if let Some(previous) = self.sources.get(&dest) {
            return Err(*previous);
        }
        self.sources.insert(dest, source);
        self.routes.entry(source).or_default().push(dest);
        Ok(())
    }

    /// Destinations of an output, in declaration order.
    pub fn destinations(&self, source: OutputKey) -> &[Destination] {
        self.routes.get(&source).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn source_of(&self, dest: Destination) -> Option<OutputKey> {
        self.sources.get(&dest).copied()
    }

    /// Edges that stand in for signals not modeled yet.
    pub fn bypass_edges(&self) -> &[(OutputKey, Destination)] {
        &self.bypass
    }

    pub fn edge_count(&self) -> usize {
        self.sources.len()
    }
}
