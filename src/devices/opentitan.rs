//! OpenTitan Peripherals.
//!
//! Component classes of the OpenTitan IP blocks and of the platform-level
//! interrupt controller. Most blocks are inert `Peripheral`s; the power
//! manager, reset manager and PLIC carry the signal behavior the reset and
//! interrupt paths depend on.

use crate::common::error::RealizeError;
use crate::devices::dataflash::SSI_GPIO_CS;
use crate::devices::peripheral;
use crate::soc::descriptor::{GPIO, SYSBUS_IRQ};
use crate::soc::pins::{self, PinDecl, PinHandle};
use crate::soc::traits::{
    Component, ComponentClass, DeviceState, LinkSpec, PropSpec, RegionSpec, SignalSink,
};
use log::debug;
use std::any::Any;

// Pin names shared by both ends of a connection.
pub const OT_PWRMGR_OTP_REQ: &str = "ot-pwrmgr-otp-req";
pub const OT_PWRMGR_OTP_RSP: &str = "ot-pwrmgr-otp-rsp";
pub const OT_PWRMGR_LC_REQ: &str = "ot-pwrmgr-lc-req";
pub const OT_PWRMGR_LC_RSP: &str = "ot-pwrmgr-lc-rsp";
pub const OT_PWRMGR_CPU_EN: &str = "ot-pwrmgr-cpu-en";
pub const OT_PWRMGR_RST_REQ: &str = "ot-pwrmgr-rst-req";
pub const OT_PWRMGR_SW_RST: &str = "ot-pwrmgr-sw-rst";
pub const OT_PWRMGR_WKUP: &str = "ot-pwrmgr-wkup";
pub const OT_PWRMGR_RST: &str = "ot-pwrmgr-rst";
pub const OT_PWRMGR_ROM_GOOD: &str = "ot-pwrmgr-rom-good";
pub const OT_PWRMGR_ROM_DONE: &str = "ot-pwrmgr-rom-done";
pub const OT_RSTMGR_RST_REQ: &str = "ot-rstmgr-rst-req";
pub const OT_RSTMGR_SW_RST: &str = "ot-rstmgr-sw-rst";
pub const OT_RSTMGR_SOC_RST: &str = "ot-rstmgr-soc-rst";
pub const OT_IBEX_WRAPPER_CPU_EN: &str = "ot-ibex-wrapper-cpu-en";
pub const OT_AON_TIMER_WKUP: &str = "ot-aon-timer-wkup";
pub const OT_AON_TIMER_BITE: &str = "ot-aon-timer-bite";
pub const OT_ROM_CTRL_GOOD: &str = "ot-rom-ctrl-good";
pub const OT_ROM_CTRL_DONE: &str = "ot-rom-ctrl-done";
pub const OT_CLOCK_ACTIVE: &str = "ot-clock-active";
pub const OT_CLKMGR_HINT: &str = "ot-clkmgr-hint";

/// Wakeup sources of the power manager.
pub const OT_PWRMGR_WAKEUP_SYSRST: usize = 0;
pub const OT_PWRMGR_WAKEUP_ADC_CTRL: usize = 1;
pub const OT_PWRMGR_WAKEUP_PINMUX: usize = 2;
pub const OT_PWRMGR_WAKEUP_USBDEV: usize = 3;
pub const OT_PWRMGR_WAKEUP_AON_TIMER: usize = 4;
pub const OT_PWRMGR_WAKEUP_SENSOR: usize = 5;
pub const OT_PWRMGR_WAKEUP_COUNT: usize = 6;

/// Peripheral reset requests routed to the power manager.
pub const OT_PWRMGR_RST_COUNT: usize = 3;

/// Power manager register layout version for EarlGrey.
pub const OT_PWRMGR_VERSION_EG: u64 = 0;

/// CPU enable inputs of the Ibex wrapper.
pub const OT_IBEX_LC_CTRL_CPU_EN: usize = 0;
pub const OT_IBEX_PWRMGR_CPU_EN: usize = 1;

/// Clock hint inputs of the clock manager.
pub const OT_CLKMGR_HINT_AES: usize = 0;
pub const OT_CLKMGR_HINT_HMAC: usize = 1;
pub const OT_CLKMGR_HINT_KMAC: usize = 2;
pub const OT_CLKMGR_HINT_OTBN: usize = 3;
pub const OT_CLKMGR_HINT_COUNT: usize = 4;

/// Interrupt sources of the PLIC, including the reserved source 0.
pub const PLIC_NUM_SOURCES: usize = 186;
/// PLIC output driving the machine external interrupt of hart 0.
pub const PLIC_M_EXT_OUTPUT: usize = 1;

pub const TYPE_OT_AES: &str = "ot-aes";
pub const TYPE_OT_ALERT: &str = "ot-alert";
pub const TYPE_OT_AON_TIMER: &str = "ot-aon_timer";
pub const TYPE_OT_AST_EG: &str = "ot-ast-eg";
pub const TYPE_OT_CLKMGR: &str = "ot-clkmgr";
pub const TYPE_OT_CSRNG: &str = "ot-csrng";
pub const TYPE_OT_EDN: &str = "ot-edn";
pub const TYPE_OT_ENTROPY_SRC: &str = "ot-entropy_src";
pub const TYPE_OT_FLASH: &str = "ot-flash";
pub const TYPE_OT_GPIO_EG: &str = "ot-gpio-eg";
pub const TYPE_OT_HMAC: &str = "ot-hmac";
pub const TYPE_OT_IBEX_WRAPPER_EG: &str = "ot-ibex_wrapper-eg";
pub const TYPE_OT_KMAC: &str = "ot-kmac";
pub const TYPE_OT_LC_CTRL: &str = "ot-lc_ctrl";
pub const TYPE_OT_OTBN: &str = "ot-otbn";
pub const TYPE_OT_OTP_EG: &str = "ot-otp-eg";
pub const TYPE_OT_OTP_OT_BE: &str = "ot-otp-ot-be";
pub const TYPE_OT_PINMUX_EG: &str = "ot-pinmux-eg";
pub const TYPE_OT_PLIC_EXT: &str = "ot-plic-ext";
pub const TYPE_OT_PWRMGR: &str = "ot-pwrmgr";
pub const TYPE_OT_ROM_CTRL: &str = "ot-rom_ctrl";
pub const TYPE_OT_RSTMGR: &str = "ot-rstmgr";
pub const TYPE_OT_SENSOR: &str = "ot-sensor";
pub const TYPE_OT_SPI_DEVICE: &str = "ot-spi_device";
pub const TYPE_OT_SPI_HOST: &str = "ot-spi_host";
pub const TYPE_OT_SRAM_CTRL: &str = "ot-sram_ctrl";
pub const TYPE_OT_TIMER: &str = "ot-timer";
pub const TYPE_OT_UART: &str = "ot-uart";
pub const TYPE_SIFIVE_PLIC: &str = "riscv.sifive.plic";

pub static AES: ComponentClass = ComponentClass {
    type_name: TYPE_OT_AES,
    properties: &[PropSpec::uint("edn-ep")],
    links: &[LinkSpec::required("edn")],
    outputs: &[PinDecl::new(OT_CLOCK_ACTIVE, 1)],
    inputs: &[],
    regions: &[RegionSpec::Fixed(0x100)],
    create: peripheral::create,
};

pub static ALERT_HANDLER: ComponentClass = ComponentClass {
    type_name: TYPE_OT_ALERT,
    properties: &[
        PropSpec::uint("pclk"),
        PropSpec::uint("n_alerts"),
        PropSpec::uint("n_classes"),
        PropSpec::uint("n_lpg"),
        PropSpec::uint("edn-ep"),
    ],
    links: &[LinkSpec::optional("edn")],
    outputs: &[PinDecl::new(SYSBUS_IRQ, 4)],
    inputs: &[],
    regions: &[RegionSpec::Fixed(0x800)],
    create: peripheral::create,
};

pub static AON_TIMER: ComponentClass = ComponentClass {
    type_name: TYPE_OT_AON_TIMER,
    properties: &[PropSpec::uint("pclk")],
    links: &[],
    outputs: &[
        PinDecl::new(SYSBUS_IRQ, 2),
        PinDecl::new(OT_AON_TIMER_WKUP, 1),
        PinDecl::new(OT_AON_TIMER_BITE, 1),
    ],
    inputs: &[],
    regions: &[RegionSpec::Fixed(0x40)],
    create: peripheral::create,
};

pub static AST: ComponentClass = ComponentClass {
    type_name: TYPE_OT_AST_EG,
    properties: &[],
    links: &[],
    outputs: &[],
    inputs: &[],
    regions: &[RegionSpec::Fixed(0x400)],
    create: peripheral::create,
};

pub static CLKMGR: ComponentClass = ComponentClass {
    type_name: TYPE_OT_CLKMGR,
    properties: &[],
    links: &[],
    outputs: &[],
    inputs: &[PinDecl::new(OT_CLKMGR_HINT, OT_CLKMGR_HINT_COUNT)],
    regions: &[RegionSpec::Fixed(0x80)],
    create: peripheral::create,
};

pub static CSRNG: ComponentClass = ComponentClass {
    type_name: TYPE_OT_CSRNG,
    properties: &[],
    links: &[
        LinkSpec::required("random_src"),
        LinkSpec::required("otp_ctrl"),
    ],
    outputs: &[PinDecl::new(SYSBUS_IRQ, 4)],
    inputs: &[],
    regions: &[RegionSpec::Fixed(0x80)],
    create: peripheral::create,
};

pub static EDN: ComponentClass = ComponentClass {
    type_name: TYPE_OT_EDN,
    properties: &[PropSpec::uint("csrng-app")],
    links: &[LinkSpec::required("csrng")],
    outputs: &[PinDecl::new(SYSBUS_IRQ, 2)],
    inputs: &[],
    regions: &[RegionSpec::Fixed(0x80)],
    create: peripheral::create,
};

pub static ENTROPY_SRC: ComponentClass = ComponentClass {
    type_name: TYPE_OT_ENTROPY_SRC,
    properties: &[],
    links: &[LinkSpec::required("ast"), LinkSpec::required("otp_ctrl")],
    outputs: &[PinDecl::new(SYSBUS_IRQ, 4)],
    inputs: &[],
    regions: &[RegionSpec::Fixed(0x100)],
    create: peripheral::create,
};

pub static FLASH_CTRL: ComponentClass = ComponentClass {
    type_name: TYPE_OT_FLASH,
    properties: &[PropSpec::drive("drive"), PropSpec::bool("read-only")],
    links: &[],
    outputs: &[PinDecl::new(SYSBUS_IRQ, 6)],
    inputs: &[],
    // controller registers, flash primitive registers, flash data
    regions: &[
        RegionSpec::Fixed(0x200),
        RegionSpec::Fixed(0x80),
        RegionSpec::Fixed(0x10_0000),
    ],
    create: peripheral::create,
};

pub static GPIO_EG: ComponentClass = ComponentClass {
    type_name: TYPE_OT_GPIO_EG,
    properties: &[],
    links: &[],
    outputs: &[PinDecl::new(SYSBUS_IRQ, 32)],
    inputs: &[],
    regions: &[RegionSpec::Fixed(0x80)],
    create: peripheral::create,
};

pub static HMAC: ComponentClass = ComponentClass {
    type_name: TYPE_OT_HMAC,
    properties: &[],
    links: &[],
    outputs: &[
        PinDecl::new(SYSBUS_IRQ, 3),
        PinDecl::new(OT_CLOCK_ACTIVE, 1),
    ],
    inputs: &[],
    regions: &[RegionSpec::Fixed(0x1000)],
    create: peripheral::create,
};

pub static IBEX_WRAPPER: ComponentClass = ComponentClass {
    type_name: TYPE_OT_IBEX_WRAPPER_EG,
    properties: &[PropSpec::uint("edn-ep")],
    links: &[LinkSpec::required("edn")],
    outputs: &[],
    inputs: &[PinDecl::new(OT_IBEX_WRAPPER_CPU_EN, 2)],
    regions: &[RegionSpec::Fixed(0x100)],
    create: peripheral::create,
};

pub static KMAC: ComponentClass = ComponentClass {
    type_name: TYPE_OT_KMAC,
    properties: &[PropSpec::uint("edn-ep"), PropSpec::uint("num-app")],
    links: &[LinkSpec::required("edn")],
    outputs: &[PinDecl::new(SYSBUS_IRQ, 3)],
    inputs: &[],
    regions: &[RegionSpec::Fixed(0x1000)],
    create: peripheral::create,
};

pub static LC_CTRL: ComponentClass = ComponentClass {
    type_name: TYPE_OT_LC_CTRL,
    properties: &[
        PropSpec::uint("edn-ep"),
        PropSpec::uint("silicon_creator_id"),
        PropSpec::uint("product_id"),
        PropSpec::uint("revision_id"),
        PropSpec::bool("volatile_raw_unlock"),
        PropSpec::uint("kmac-app"),
        PropSpec::string("raw_unlock_token"),
        PropSpec::string("lc_state_first"),
        PropSpec::string("lc_state_last"),
        PropSpec::string("lc_trscnt_first"),
        PropSpec::string("lc_trscnt_last"),
    ],
    links: &[LinkSpec::required("otp_ctrl"), LinkSpec::required("kmac")],
    outputs: &[PinDecl::new(OT_PWRMGR_LC_RSP, 1)],
    inputs: &[PinDecl::new(OT_PWRMGR_LC_REQ, 1)],
    regions: &[RegionSpec::Fixed(0x100)],
    create: peripheral::create,
};

pub static OTBN: ComponentClass = ComponentClass {
    type_name: TYPE_OT_OTBN,
    properties: &[PropSpec::uint("edn-u-ep"), PropSpec::uint("edn-r-ep")],
    links: &[LinkSpec::required("edn-u"), LinkSpec::required("edn-r")],
    outputs: &[
        PinDecl::new(SYSBUS_IRQ, 1),
        PinDecl::new(OT_CLOCK_ACTIVE, 1),
    ],
    inputs: &[],
    regions: &[RegionSpec::Fixed(0x10000)],
    create: peripheral::create,
};

pub static OTP_CTRL: ComponentClass = ComponentClass {
    type_name: TYPE_OT_OTP_EG,
    properties: &[
        PropSpec::uint("edn-ep"),
        PropSpec::drive("drive"),
        PropSpec::bool("read-only"),
    ],
    links: &[LinkSpec::required("edn"), LinkSpec::required("backend")],
    outputs: &[PinDecl::new(SYSBUS_IRQ, 2)],
    inputs: &[],
    regions: &[RegionSpec::Fixed(0x2000)],
    create: peripheral::create,
};

pub static OTP_BACKEND: ComponentClass = ComponentClass {
    type_name: TYPE_OT_OTP_OT_BE,
    properties: &[],
    links: &[LinkSpec::required("parent")],
    outputs: &[],
    inputs: &[],
    regions: &[RegionSpec::Fixed(0x800)],
    create: peripheral::create,
};

pub static PINMUX: ComponentClass = ComponentClass {
    type_name: TYPE_OT_PINMUX_EG,
    properties: &[],
    links: &[],
    outputs: &[],
    inputs: &[],
    regions: &[RegionSpec::Fixed(0x1000)],
    create: peripheral::create,
};

pub static PLIC_EXT: ComponentClass = ComponentClass {
    type_name: TYPE_OT_PLIC_EXT,
    properties: &[],
    links: &[],
    outputs: &[PinDecl::new(GPIO, 1)],
    inputs: &[],
    regions: &[RegionSpec::Fixed(0x10)],
    create: peripheral::create,
};

pub static ROM_CTRL: ComponentClass = ComponentClass {
    type_name: TYPE_OT_ROM_CTRL,
    properties: &[
        PropSpec::string("ot_id"),
        PropSpec::uint("size"),
        PropSpec::uint("kmac-app"),
        PropSpec::string("nonce"),
        PropSpec::string("key"),
    ],
    links: &[LinkSpec::required("kmac")],
    outputs: &[
        PinDecl::new(OT_ROM_CTRL_GOOD, 1),
        PinDecl::new(OT_ROM_CTRL_DONE, 1),
    ],
    inputs: &[],
    // registers, then the ROM itself
    regions: &[RegionSpec::Fixed(0x80), RegionSpec::Property("size")],
    create: peripheral::create,
};

pub static SENSOR: ComponentClass = ComponentClass {
    type_name: TYPE_OT_SENSOR,
    properties: &[],
    links: &[],
    outputs: &[],
    inputs: &[],
    regions: &[RegionSpec::Fixed(0x40)],
    create: peripheral::create,
};

pub static SPI_DEVICE: ComponentClass = ComponentClass {
    type_name: TYPE_OT_SPI_DEVICE,
    properties: &[PropSpec::chardev("chardev")],
    links: &[],
    outputs: &[PinDecl::new(SYSBUS_IRQ, 8)],
    inputs: &[],
    regions: &[RegionSpec::Fixed(0x2000)],
    create: peripheral::create,
};

pub static SPI_HOST: ComponentClass = ComponentClass {
    type_name: TYPE_OT_SPI_HOST,
    properties: &[PropSpec::uint("bus-num")],
    links: &[],
    outputs: &[PinDecl::new(SYSBUS_IRQ, 2), PinDecl::new(SSI_GPIO_CS, 1)],
    inputs: &[],
    regions: &[RegionSpec::Fixed(0x40)],
    create: peripheral::create,
};

pub static SRAM_CTRL: ComponentClass = ComponentClass {
    type_name: TYPE_OT_SRAM_CTRL,
    properties: &[PropSpec::uint("size"), PropSpec::string("ot_id")],
    links: &[LinkSpec::required("otp_ctrl")],
    outputs: &[],
    inputs: &[],
    // registers, then the memory
    regions: &[RegionSpec::Fixed(0x20), RegionSpec::Property("size")],
    create: peripheral::create,
};

pub static TIMER: ComponentClass = ComponentClass {
    type_name: TYPE_OT_TIMER,
    properties: &[PropSpec::uint("pclk")],
    links: &[],
    outputs: &[PinDecl::new(GPIO, 1), PinDecl::new(SYSBUS_IRQ, 1)],
    inputs: &[],
    regions: &[RegionSpec::Fixed(0x200)],
    create: peripheral::create,
};

pub static UART: ComponentClass = ComponentClass {
    type_name: TYPE_OT_UART,
    properties: &[PropSpec::uint("pclk"), PropSpec::chardev("chardev")],
    links: &[],
    outputs: &[PinDecl::new(SYSBUS_IRQ, 9)],
    inputs: &[],
    regions: &[RegionSpec::Fixed(0x40)],
    create: peripheral::create,
};

pub static PWRMGR: ComponentClass = ComponentClass {
    type_name: TYPE_OT_PWRMGR,
    properties: &[PropSpec::uint("num-rom"), PropSpec::uint("version")],
    links: &[],
    outputs: &[
        PinDecl::new(SYSBUS_IRQ, 1),
        PinDecl::new(OT_PWRMGR_OTP_REQ, 1),
        PinDecl::new(OT_PWRMGR_LC_REQ, 1),
        PinDecl::new(OT_PWRMGR_CPU_EN, 1),
        PinDecl::new(OT_PWRMGR_RST_REQ, 1),
    ],
    inputs: &[
        PinDecl::new(OT_PWRMGR_OTP_RSP, 1),
        PinDecl::new(OT_PWRMGR_LC_RSP, 1),
        PinDecl::new(OT_PWRMGR_SW_RST, 1),
        PinDecl::new(OT_PWRMGR_WKUP, OT_PWRMGR_WAKEUP_COUNT),
        PinDecl::new(OT_PWRMGR_RST, OT_PWRMGR_RST_COUNT),
        PinDecl::new(OT_PWRMGR_ROM_GOOD, 1),
        PinDecl::new(OT_PWRMGR_ROM_DONE, 1),
    ],
    regions: &[RegionSpec::Fixed(0x80)],
    create: create_pwrmgr,
};

pub static RSTMGR: ComponentClass = ComponentClass {
    type_name: TYPE_OT_RSTMGR,
    properties: &[],
    links: &[],
    outputs: &[
        PinDecl::new(OT_RSTMGR_SW_RST, 1),
        PinDecl::new(OT_RSTMGR_SOC_RST, 1),
    ],
    inputs: &[PinDecl::new(OT_RSTMGR_RST_REQ, 1)],
    regions: &[RegionSpec::Fixed(0x80)],
    create: create_rstmgr,
};

pub static PLIC: ComponentClass = ComponentClass {
    type_name: TYPE_SIFIVE_PLIC,
    properties: &[
        PropSpec::string("hart-config"),
        PropSpec::uint("hartid-base"),
        PropSpec::uint("num-sources"),
        PropSpec::uint("num-priorities"),
        PropSpec::uint("priority-base"),
        PropSpec::uint("pending-base"),
        PropSpec::uint("enable-base"),
        PropSpec::uint("enable-stride"),
        PropSpec::uint("context-base"),
        PropSpec::uint("context-stride"),
        PropSpec::uint("aperture-size"),
    ],
    links: &[],
    outputs: &[PinDecl::new(GPIO, 2)],
    inputs: &[PinDecl::new(GPIO, PLIC_NUM_SOURCES)],
    regions: &[RegionSpec::Property("aperture-size")],
    create: create_plic,
};

/// Raises output `(name, num)` of `class`, if the class declares it.
fn raise(out: &mut SignalSink<'_>, class: &ComponentClass, name: &str, num: usize, level: i32) {
    if let Some(pin) = class.output_pin(name, num) {
        out.raise(pin, level);
    }
}

/// Power manager: sequences the boot handshake and forwards reset requests.
#[derive(Debug)]
pub struct PowerManager {
    state: DeviceState,
    cpu_enabled: bool,
    reset_requests: u32,
}

fn create_pwrmgr(class: &'static ComponentClass, instance: Option<u32>) -> Box<dyn Component> {
    Box::new(PowerManager {
        state: DeviceState::new(class, instance),
        cpu_enabled: false,
        reset_requests: 0,
    })
}

impl PowerManager {
    /// Whether the CPU enable output has been asserted.
    pub fn cpu_enabled(&self) -> bool {
        self.cpu_enabled
    }

    /// Number of reset requests forwarded to the reset manager.
    pub fn reset_requests(&self) -> u32 {
        self.reset_requests
    }

    fn input(&self, name: &str, num: usize) -> i32 {
        self.state
            .class()
            .input_pin(name, num)
            .map_or(0, |p| self.state.input_level(p))
    }
}

impl Component for PowerManager {
    fn state(&self) -> &DeviceState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut DeviceState {
        &mut self.state
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn set_input(&mut self, handle: PinHandle, level: i32, out: &mut SignalSink<'_>) {
        self.state.set_input_level(handle, level);
        let class = self.state.class();
        let Some((name, num)) = pins::describe(class.inputs, handle) else {
            return;
        };
        match name {
            OT_PWRMGR_OTP_RSP if level != 0 => {
                raise(out, class, OT_PWRMGR_LC_REQ, 0, 1);
            }
            OT_PWRMGR_ROM_GOOD | OT_PWRMGR_ROM_DONE => {
                let ready = self.input(OT_PWRMGR_ROM_GOOD, 0) != 0
                    && self.input(OT_PWRMGR_ROM_DONE, 0) != 0;
                if ready && !self.cpu_enabled {
                    debug!("[PwrMgr] ROM check done, enabling CPU");
                    self.cpu_enabled = true;
                    raise(out, class, OT_PWRMGR_CPU_EN, 0, 1);
                }
            }
            OT_PWRMGR_SW_RST | OT_PWRMGR_RST if level != 0 => {
                debug!("[PwrMgr] Reset request from {}[{}]", name, num);
                self.reset_requests += 1;
                raise(out, class, OT_PWRMGR_RST_REQ, 0, 1);
            }
            _ => {}
        }
    }

    fn reset_hold(&mut self) {
        self.state.note_hold();
        self.state.clear_inputs();
        self.cpu_enabled = false;
    }
}

/// Reset manager: turns a power manager reset request into a SoC reset.
#[derive(Debug)]
pub struct ResetManager {
    state: DeviceState,
}

fn create_rstmgr(class: &'static ComponentClass, instance: Option<u32>) -> Box<dyn Component> {
    Box::new(ResetManager {
        state: DeviceState::new(class, instance),
    })
}

impl Component for ResetManager {
    fn state(&self) -> &DeviceState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut DeviceState {
        &mut self.state
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn set_input(&mut self, handle: PinHandle, level: i32, out: &mut SignalSink<'_>) {
        self.state.set_input_level(handle, level);
        if level != 0 {
            raise(out, self.state.class(), OT_RSTMGR_SOC_RST, 0, level);
        }
    }
}

/// Platform-level interrupt controller. Priorities and enables are not
/// modeled: the machine external interrupt follows the OR of all sources.
#[derive(Debug)]
pub struct Plic {
    state: DeviceState,
    pending: Vec<bool>,
    asserted: bool,
}

fn create_plic(class: &'static ComponentClass, instance: Option<u32>) -> Box<dyn Component> {
    Box::new(Plic {
        state: DeviceState::new(class, instance),
        pending: vec![false; PLIC_NUM_SOURCES],
        asserted: false,
    })
}

impl Plic {
    pub fn is_pending(&self, source: usize) -> bool {
        self.pending.get(source).copied().unwrap_or(false)
    }

    pub fn is_asserted(&self) -> bool {
        self.asserted
    }
}

impl Component for Plic {
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
        let sources = self.state.uint("num-sources").unwrap_or(0);
        if sources == 0 || sources > PLIC_NUM_SOURCES as u64 {
            return Err(RealizeError::Failed(format!(
                "num-sources {sources} outside 1..={PLIC_NUM_SOURCES}"
            )));
        }
        Ok(())
    }

    fn set_input(&mut self, handle: PinHandle, level: i32, out: &mut SignalSink<'_>) {
        self.state.set_input_level(handle, level);
        if let Some(slot) = self.pending.get_mut(handle.slot()) {
            *slot = level != 0;
        }
        let asserted = self.pending.iter().any(|&p| p);
        if asserted != self.asserted {
            self.asserted = asserted;
            raise(
                out,
                self.state.class(),
                GPIO,
                PLIC_M_EXT_OUTPUT,
                i32::from(asserted),
            );
        }
    }

    fn reset_hold(&mut self) {
        self.state.note_hold();
        self.state.clear_inputs();
        self.pending.fill(false);
        self.asserted = false;
    }
}
