//! Machine Configuration.
//!
//! The machine configuration is read from a TOML file. It carries the
//! startup flags consumed by configure hooks and the host resources
//! (character devices, serial ports, drives) that components may bind to.

use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failure to load a machine configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct MachineConfig {
    #[serde(default)]
    pub machine: StartupConfig,

    #[serde(default)]
    pub chardev: Vec<ChardevConfig>,

    /// Serial port index to chardev id.
    #[serde(default)]
    pub serial: Vec<String>,

    #[serde(default)]
    pub drive: Vec<DriveConfig>,
}

impl MachineConfig {
    /// Loads a configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}

/// Process-wide startup flags.
///
/// Passed by reference into graph construction rather than kept as ambient
/// global state.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct StartupConfig {
    /// Skip the default ePMP configuration of the hart.
    #[serde(default)]
    pub no_epmp_cfg: bool,

    /// Do not set the hart PC from an ELF entry point.
    #[serde(default)]
    pub ignore_elf_entry: bool,

    /// Treat a resource that is declared but unusable as a fatal error.
    #[serde(default = "default_strict_resources")]
    pub strict_resources: bool,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            no_epmp_cfg: false,
            ignore_elf_entry: false,
            strict_resources: default_strict_resources(),
        }
    }
}

fn default_strict_resources() -> bool {
    true
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChardevBackend {
    Null,
    Stdio,
    File,
    Socket,
    Pty,
}

impl ChardevBackend {
    /// Whether this backend needs a `path` to be usable.
    pub fn needs_path(self) -> bool {
        matches!(self, ChardevBackend::File | ChardevBackend::Socket)
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ChardevConfig {
    pub id: String,

    #[serde(default = "default_backend")]
    pub backend: ChardevBackend,

    #[serde(default)]
    pub path: Option<String>,
}

fn default_backend() -> ChardevBackend {
    ChardevBackend::Null
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DriveInterface {
    Mtd,
    Pflash,
}

impl DriveInterface {
    pub fn name(self) -> &'static str {
        match self {
            DriveInterface::Mtd => "mtd",
            DriveInterface::Pflash => "pflash",
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct DriveConfig {
    #[serde(rename = "if")]
    pub interface: DriveInterface,

    #[serde(default)]
    pub bus: u32,

    #[serde(default)]
    pub unit: u32,

    pub file: String,

    #[serde(default)]
    pub read_only: bool,
}

impl DriveConfig {
    /// Identifier under which the drive is bound to a component.
    pub fn id(&self) -> String {
        format!("{}{}.{}", self.interface.name(), self.bus, self.unit)
    }
}

/// Host resources available to configure hooks.
///
/// A missing entry is a valid, inert state: the component simply stays
/// unbound.
#[derive(Debug, Default, Clone)]
pub struct ResourceTable {
    chardevs: HashMap<String, ChardevConfig>,
    serial: Vec<String>,
    drives: HashMap<(DriveInterface, u32, u32), DriveConfig>,
}

impl ResourceTable {
    pub fn from_config(config: &MachineConfig) -> Self {
        let mut table = Self::default();
        for chr in &config.chardev {
            table.add_chardev(chr.clone());
        }
        table.serial = config.serial.clone();
        for drive in &config.drive {
            table.add_drive(drive.clone());
        }
        table
    }

    pub fn add_chardev(&mut self, chardev: ChardevConfig) {
        self.chardevs.insert(chardev.id.clone(), chardev);
    }

    pub fn add_serial(&mut self, chardev_id: impl Into<String>) {
        self.serial.push(chardev_id.into());
    }

    pub fn add_drive(&mut self, drive: DriveConfig) {
        self.drives
            .insert((drive.interface, drive.bus, drive.unit), drive);
    }

    /// Looks up a character device by id.
    pub fn chardev(&self, id: &str) -> Option<&ChardevConfig> {
        self.chardevs.get(id)
    }

    /// Returns the chardev id assigned to a serial port, if any.
    pub fn serial_id(&self, index: usize) -> Option<&str> {
        self.serial.get(index).map(String::as_str)
    }

    /// Looks up a drive by interface, bus and unit.
    pub fn drive(&self, interface: DriveInterface, bus: u32, unit: u32) -> Option<&DriveConfig> {
        self.drives.get(&(interface, bus, unit))
    }
}

/// Everything the host supplies to graph construction.
#[derive(Debug, Default, Clone)]
pub struct HostEnvironment {
    pub startup: StartupConfig,
    pub resources: ResourceTable,
}

impl HostEnvironment {
    pub fn from_config(config: &MachineConfig) -> Self {
        Self {
            startup: config.machine.clone(),
            resources: ResourceTable::from_config(config),
        }
    }
}
