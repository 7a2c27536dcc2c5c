//! Integration tests for machine configuration and host resources.

use std::io::Write;

use earlgrey_soc::common::{BuildError, PropValue};
use earlgrey_soc::config::{
    ChardevBackend, ChardevConfig, ConfigError, DriveConfig, DriveInterface, HostEnvironment,
    MachineConfig, ResourceTable,
};
use earlgrey_soc::earlgrey::table::{EgDevice, EG_DEVICE_COUNT};
use earlgrey_soc::earlgrey::EarlGreyMachine;
use tempfile::{tempdir, NamedTempFile};

fn chardev(id: &str, backend: ChardevBackend, path: Option<&str>) -> ChardevConfig {
    ChardevConfig {
        id: id.to_string(),
        backend,
        path: path.map(str::to_string),
    }
}

/// Tests the defaults of an empty document.
#[test]
fn test_empty_config_defaults() {
    let config = MachineConfig::from_toml_str("").unwrap();
    assert!(!config.machine.no_epmp_cfg);
    assert!(!config.machine.ignore_elf_entry);
    assert!(config.machine.strict_resources);
    assert!(config.chardev.is_empty());
    assert!(config.serial.is_empty());
    assert!(config.drive.is_empty());
}

/// Tests parsing a complete document.
#[test]
fn test_parse_full_config() {
    let config = MachineConfig::from_toml_str(
        r#"
        serial = ["console"]

        [machine]
        no_epmp_cfg = true
        strict_resources = false

        [[chardev]]
        id = "console"
        backend = "stdio"

        [[chardev]]
        id = "taprbb"
        backend = "socket"
        path = "/tmp/rbb.sock"

        [[drive]]
        if = "mtd"
        bus = 1
        file = "flash.bin"
        "#,
    )
    .unwrap();

    assert!(config.machine.no_epmp_cfg);
    assert!(!config.machine.strict_resources);
    assert_eq!(config.serial, vec!["console".to_string()]);
    assert_eq!(config.chardev.len(), 2);
    assert_eq!(config.chardev[1].backend, ChardevBackend::Socket);
    assert_eq!(config.drive[0].interface, DriveInterface::Mtd);
    assert_eq!(config.drive[0].unit, 0);
    assert_eq!(config.drive[0].id(), "mtd1.0");
}

/// Tests that unknown backends are rejected at parse time.
#[test]
fn test_parse_error() {
    let err = MachineConfig::from_toml_str("[[chardev]]\nid = \"x\"\nbackend = \"telnet\"\n")
        .unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

/// Tests loading from a file, present and missing.
#[test]
fn test_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "[machine]\nignore_elf_entry = true").unwrap();
    let config = MachineConfig::from_file(file.path()).unwrap();
    assert!(config.machine.ignore_elf_entry);

    let dir = tempdir().unwrap();
    let missing = dir.path().join("absent.toml");
    match MachineConfig::from_file(&missing) {
        Err(ConfigError::Io { path, .. }) => assert_eq!(path, missing),
        other => panic!("expected an I/O error, got {other:?}"),
    }
}

/// Tests resource lookups.
#[test]
fn test_resource_table_lookups() {
    let mut table = ResourceTable::default();
    table.add_chardev(chardev("console", ChardevBackend::Stdio, None));
    table.add_serial("console");
    table.add_drive(DriveConfig {
        interface: DriveInterface::Pflash,
        bus: 0,
        unit: 0,
        file: "otp.raw".to_string(),
        read_only: false,
    });

    assert_eq!(table.chardev("console").map(|c| c.backend), Some(ChardevBackend::Stdio));
    assert!(table.chardev("missing").is_none());
    assert_eq!(table.serial_id(0), Some("console"));
    assert_eq!(table.serial_id(1), None);
    assert!(table.drive(DriveInterface::Pflash, 0, 0).is_some());
    assert!(table.drive(DriveInterface::Mtd, 0, 0).is_none());
}

/// Tests serial and debug chardevs bound to their components.
#[test]
fn test_chardevs_bound() {
    let mut host = HostEnvironment::default();
    host.resources
        .add_chardev(chardev("console", ChardevBackend::Stdio, None));
    host.resources.add_serial("console");
    host.resources.add_chardev(chardev(
        "taprbb",
        ChardevBackend::Socket,
        Some("/tmp/rbb.sock"),
    ));

    let m = EarlGreyMachine::with_host(&host).unwrap();
    let soc = m.soc();
    assert_eq!(
        soc.property(EgDevice::Uart0.id(), "chardev"),
        Some(&PropValue::Chardev("console".to_string()))
    );
    assert_eq!(soc.property(EgDevice::Uart1.id(), "chardev"), None);
    assert_eq!(
        soc.property(EgDevice::TapCtrl.id(), "chardev"),
        Some(&PropValue::Chardev("taprbb".to_string()))
    );
}

/// Tests that an unusable chardev is fatal only in strict mode.
#[test]
fn test_unusable_chardev() {
    let mut host = HostEnvironment::default();
    host.resources
        .add_chardev(chardev("taprbb", ChardevBackend::Socket, None));

    match EarlGreyMachine::with_host(&host) {
        Err(BuildError::ResourceAttach(e)) => assert_eq!(e.index, EgDevice::TapCtrl.index()),
        other => panic!("expected an attach error, got {:?}", other.err()),
    }

    host.startup.strict_resources = false;
    let m = EarlGreyMachine::with_host(&host).unwrap();
    assert_eq!(m.soc().property(EgDevice::TapCtrl.id(), "chardev"), None);
}

/// Tests a serial port pointing at an undeclared chardev.
#[test]
fn test_serial_without_chardev() {
    let mut host = HostEnvironment::default();
    host.resources.add_serial("ghost");

    let err = EarlGreyMachine::with_host(&host).err().unwrap();
    assert_eq!(err.index(), Some(EgDevice::Uart0.index()));
}

/// Tests flash drive binding against a real and a missing backing file.
#[test]
fn test_flash_drive() {
    let image = NamedTempFile::new().unwrap();
    let mut host = HostEnvironment::default();
    host.resources.add_drive(DriveConfig {
        interface: DriveInterface::Mtd,
        bus: 1,
        unit: 0,
        file: image.path().to_string_lossy().into_owned(),
        read_only: true,
    });
    let m = EarlGreyMachine::with_host(&host).unwrap();
    assert_eq!(
        m.soc().property(EgDevice::FlashCtrl.id(), "drive"),
        Some(&PropValue::Drive("mtd1.0".to_string()))
    );
    assert_eq!(
        m.soc().property(EgDevice::FlashCtrl.id(), "read-only"),
        Some(&PropValue::Bool(true))
    );
    assert_eq!(m.board().dataflash().unwrap().drive(), None);

    let dir = tempdir().unwrap();
    let mut host = HostEnvironment::default();
    host.resources.add_drive(DriveConfig {
        interface: DriveInterface::Mtd,
        bus: 1,
        unit: 0,
        file: dir.path().join("flash.bin").to_string_lossy().into_owned(),
        read_only: false,
    });
    let err = EarlGreyMachine::with_host(&host).err().unwrap();
    assert!(matches!(err, BuildError::ResourceAttach(ref e) if e.index == EgDevice::FlashCtrl.index()));
}

/// Tests that a loaded file drives the machine build.
#[test]
fn test_machine_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "[machine]\nno_epmp_cfg = true").unwrap();
    let config = MachineConfig::from_file(file.path()).unwrap();

    let m = EarlGreyMachine::new(&config).unwrap();
    assert!(m.startup().no_epmp_cfg);
    assert_eq!(m.hart().unwrap().pmp_cfg(), None);
}

fn mtd_drive(bus: u32, file: String, read_only: bool) -> DriveConfig {
    DriveConfig {
        interface: DriveInterface::Mtd,
        bus,
        unit: 0,
        file,
        read_only,
    }
}

/// Tests that the board dataflash takes the first MTD drive and leaves the
/// second one to the embedded flash controller.
#[test]
fn test_dataflash_drive() {
    let spi = NamedTempFile::new().unwrap();
    let embedded = NamedTempFile::new().unwrap();
    let mut host = HostEnvironment::default();
    host.resources.add_drive(mtd_drive(
        0,
        spi.path().to_string_lossy().into_owned(),
        false,
    ));
    host.resources.add_drive(mtd_drive(
        1,
        embedded.path().to_string_lossy().into_owned(),
        false,
    ));

    let m = EarlGreyMachine::with_host(&host).unwrap();
    let flash = m.board().dataflash_id();
    assert_eq!(m.board().dataflash().unwrap().drive(), Some("mtd0.0"));
    assert_eq!(m.soc().property(flash, "read-only"), Some(&PropValue::Bool(false)));
    assert_eq!(
        m.soc().property(EgDevice::FlashCtrl.id(), "drive"),
        Some(&PropValue::Drive("mtd1.0".to_string()))
    );
}

/// Tests a missing dataflash image, fatal only in strict mode.
#[test]
fn test_dataflash_missing_image() {
    let dir = tempdir().unwrap();
    let mut host = HostEnvironment::default();
    host.resources.add_drive(mtd_drive(
        0,
        dir.path().join("spi.bin").to_string_lossy().into_owned(),
        true,
    ));

    match EarlGreyMachine::with_host(&host) {
        Err(BuildError::ResourceAttach(e)) => {
            assert_eq!(e.index, EG_DEVICE_COUNT);
            assert_eq!(e.resource, "drive mtd0.0");
        }
        other => panic!("expected an attach error, got {:?}", other.err()),
    }

    host.startup.strict_resources = false;
    let m = EarlGreyMachine::with_host(&host).unwrap();
    let flash = m.board().dataflash_id();
    assert_eq!(m.board().dataflash().unwrap().drive(), None);
    assert_eq!(m.soc().property(flash, "read-only"), None);
}
