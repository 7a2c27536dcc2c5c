//! Shared fixtures: small component types and table helpers.

#![allow(dead_code)]

use earlgrey_soc::common::{BuildError, RealizeError};
use earlgrey_soc::config::HostEnvironment;
use earlgrey_soc::devices::TypeRegistry;
use earlgrey_soc::soc::pins::{PinDecl, PinHandle};
use earlgrey_soc::soc::{
    Component, ComponentClass, ComponentDescriptor, CompositeSignal, DeviceState, LinkSpec,
    PinRef, PropSpec, RegionSpec, ResetPhases, ResetRoles, SignalSink, SocDefinition, SocGraph,
    GPIO,
};
use std::any::Any;

pub const TYPE_PLAIN: &str = "test-plain";
pub const TYPE_PEER: &str = "test-peer";
pub const TYPE_SOURCE: &str = "test-source";
pub const TYPE_DUAL: &str = "test-dual";
pub const TYPE_INTEGRITY: &str = "test-integrity";
pub const TYPE_ECHO: &str = "test-echo";
pub const TYPE_BROKEN: &str = "test-broken";
pub const TYPE_CPU: &str = "test-cpu";

pub const DONE: &str = "done";
pub const GO: &str = "go";
pub const RESET_OUT: &str = "reset-out";
pub const SOC_RESET: &str = "test-soc-reset";

pub static PLAIN: ComponentClass = ComponentClass {
    type_name: TYPE_PLAIN,
    properties: &[
        PropSpec::uint("value"),
        PropSpec::bool("enabled"),
        PropSpec::string("label"),
        PropSpec::array("table"),
    ],
    links: &[],
    outputs: &[PinDecl::new(GPIO, 4)],
    inputs: &[PinDecl::new(GPIO, 8)],
    regions: &[RegionSpec::Fixed(0x100)],
    create: TestDevice::create,
};

pub static PEER: ComponentClass = ComponentClass {
    type_name: TYPE_PEER,
    properties: &[],
    links: &[LinkSpec::required("peer"), LinkSpec::optional("other")],
    outputs: &[],
    inputs: &[PinDecl::new(GO, 2)],
    regions: &[],
    create: TestDevice::create,
};

pub static SOURCE: ComponentClass = ComponentClass {
    type_name: TYPE_SOURCE,
    properties: &[],
    links: &[],
    outputs: &[PinDecl::new(DONE, 1), PinDecl::new(RESET_OUT, 1)],
    inputs: &[],
    regions: &[],
    create: TestDevice::create,
};

pub static DUAL: ComponentClass = ComponentClass {
    type_name: TYPE_DUAL,
    properties: &[PropSpec::uint("size")],
    links: &[],
    outputs: &[],
    inputs: &[],
    regions: &[RegionSpec::Fixed(0x40), RegionSpec::Property("size")],
    create: TestDevice::create,
};

pub static INTEGRITY: ComponentClass = ComponentClass {
    type_name: TYPE_INTEGRITY,
    properties: &[],
    links: &[],
    outputs: &[],
    inputs: &[],
    regions: &[RegionSpec::Fixed(0x80)],
    create: TestDevice::create,
};

/// Re-raises every input level on the output with the same index.
pub static ECHO: ComponentClass = ComponentClass {
    type_name: TYPE_ECHO,
    properties: &[],
    links: &[],
    outputs: &[PinDecl::new(GPIO, 4)],
    inputs: &[PinDecl::new(GPIO, 4)],
    regions: &[],
    create: TestDevice::create,
};

pub static BROKEN: ComponentClass = ComponentClass {
    type_name: TYPE_BROKEN,
    properties: &[],
    links: &[],
    outputs: &[],
    inputs: &[],
    regions: &[],
    create: TestDevice::create,
};

pub static CPU: ComponentClass = ComponentClass {
    type_name: TYPE_CPU,
    properties: &[],
    links: &[],
    outputs: &[],
    inputs: &[PinDecl::new(GPIO, 16)],
    regions: &[],
    create: TestDevice::create,
};

#[derive(Debug)]
pub struct TestDevice {
    state: DeviceState,
    pub quiesced: u32,
    pub resumed: u32,
    /// Input events received, in delivery order.
    pub received: Vec<(PinHandle, i32)>,
}

impl TestDevice {
    fn create(class: &'static ComponentClass, instance: Option<u32>) -> Box<dyn Component> {
        Box::new(TestDevice {
            state: DeviceState::new(class, instance),
            quiesced: 0,
            resumed: 0,
            received: Vec::new(),
        })
    }
}

impl Component for TestDevice {
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
        if self.state.class().type_name == TYPE_BROKEN {
            return Err(RealizeError::Failed("broken on purpose".to_string()));
        }
        self.state.validate()
    }

    fn set_input(&mut self, pin: PinHandle, level: i32, out: &mut SignalSink<'_>) {
        self.state.set_input_level(pin, level);
        self.received.push((pin, level));
        let class = self.state.class();
        if class.type_name == TYPE_ECHO {
            if let Some(echo) = class.output_pin(GPIO, pin.slot()) {
                out.raise(echo, level);
            }
        }
    }

    fn synchronize_state(&mut self) {
        self.quiesced += 1;
    }

    fn synchronize_post_reset(&mut self) {
        self.resumed += 1;
    }
}

/// Registry holding every test type.
pub fn registry() -> TypeRegistry {
    let mut registry = TypeRegistry::new();
    registry
        .register(&PLAIN)
        .register(&PEER)
        .register(&SOURCE)
        .register(&DUAL)
        .register(&INTEGRITY)
        .register(&ECHO)
        .register(&BROKEN)
        .register(&CPU);
    registry
}

/// Leaks a slice so it can sit in a `'static` descriptor.
pub fn leak<T>(items: Vec<T>) -> &'static [T] {
    Box::leak(items.into_boxed_slice())
}

/// Composite over `devices` with two address spaces and default reset.
pub fn definition(devices: Vec<ComponentDescriptor>) -> SocDefinition {
    SocDefinition {
        name: "test-soc",
        devices: leak(devices),
        address_spaces: &["system", "secure"],
        reset_request: SOC_RESET,
        composite_signals: &[],
        reset_roles: ResetRoles::NONE,
        reset_phases: ResetPhases::DEFAULT,
    }
}

/// Forwards output `(name, num)` of `source` to the composite reset request.
pub fn reset_forward(source: usize, name: &'static str, num: usize) -> &'static [CompositeSignal] {
    leak(vec![CompositeSignal {
        source,
        output: PinRef::new(name, num),
        input: PinRef::new(SOC_RESET, 0),
    }])
}

pub fn build(definition: &SocDefinition) -> Result<SocGraph, BuildError> {
    SocGraph::build(definition, &registry(), &HostEnvironment::default())
}
