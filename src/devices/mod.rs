//! Component Library.
//!
//! Component types available to descriptor tables, and the `TypeRegistry`
//! that maps a type tag to its class.

use crate::soc::traits::ComponentClass;
use std::collections::HashMap;

/// Board-level SPI NOR flash.
pub mod dataflash;

/// Debug chain: JTAG TAP, debug transport and debug modules.
pub mod debug;

/// Processing element.
pub mod hart;

/// OpenTitan peripherals and the platform interrupt controller.
pub mod opentitan;

/// Generic inert peripheral model.
pub mod peripheral;

/// Placeholder for devices that are not modeled.
pub mod unimp;

/// Every component class shipped with the crate.
pub static BUILTIN: &[&ComponentClass] = &[
    &hart::IBEX_HART,
    &unimp::UNIMPLEMENTED_DEVICE,
    &debug::TAP_CTRL_RBB,
    &debug::RISCV_DTM,
    &debug::RISCV_DM,
    &debug::PULP_RV_DM,
    &opentitan::AES,
    &opentitan::ALERT_HANDLER,
    &opentitan::AON_TIMER,
    &opentitan::AST,
    &opentitan::CLKMGR,
    &opentitan::CSRNG,
    &opentitan::EDN,
    &opentitan::ENTROPY_SRC,
    &opentitan::FLASH_CTRL,
    &opentitan::GPIO_EG,
    &opentitan::HMAC,
    &opentitan::IBEX_WRAPPER,
    &opentitan::KMAC,
    &opentitan::LC_CTRL,
    &opentitan::OTBN,
    &opentitan::OTP_CTRL,
    &opentitan::OTP_BACKEND,
    &opentitan::PINMUX,
    &opentitan::PLIC,
    &opentitan::PLIC_EXT,
    &opentitan::PWRMGR,
    &opentitan::ROM_CTRL,
    &opentitan::RSTMGR,
    &opentitan::SENSOR,
    &opentitan::SPI_DEVICE,
    &opentitan::SPI_HOST,
    &opentitan::SRAM_CTRL,
    &opentitan::TIMER,
    &opentitan::UART,
    &dataflash::IS25WP128,
];

/// Lookup table from type tag to component class.
#[derive(Debug, Default, Clone)]
pub struct TypeRegistry {
    classes: HashMap<&'static str, &'static ComponentClass>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every class in `BUILTIN`.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        for class in BUILTIN {
            registry.register(class);
        }
        registry
    }

    /// Adds `class`, replacing any class registered under the same tag.
    pub fn register(&mut self, class: &'static ComponentClass) -> &mut Self {
        self.classes.insert(class.type_name, class);
        self
    }

    pub fn lookup(&self, type_name: &str) -> Option<&'static ComponentClass> {
        self.classes.get(type_name).copied()
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.classes.contains_key(type_name)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}
