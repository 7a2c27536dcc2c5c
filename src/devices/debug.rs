//! Debug Chain.
//!
//! JTAG TAP controller with a remote-bitbang host link, the RISC-V debug
//! transport module behind it, the debug module, and the PULP debug ROM that
//! acknowledges debug module requests.

use crate::devices::peripheral;
use crate::soc::pins::PinDecl;
use crate::soc::traits::{ComponentClass, LinkSpec, PropSpec, RegionSpec};

pub const TYPE_TAP_CTRL_RBB: &str = "tap-ctrl-rbb";
pub const TYPE_RISCV_DTM: &str = "riscv.dtm";
pub const TYPE_RISCV_DM: &str = "riscv.dm";
pub const TYPE_PULP_RV_DM: &str = "pulp-rv-dm";

/// Acknowledge lines of the debug module.
pub const RISCV_DM_ACK_LINES: &str = "riscv-dm-ack-lines";
/// Acknowledge outputs of the PULP debug ROM.
pub const PULP_RV_DM_ACK_OUT_LINES: &str = "pulp-rv-dm-ack-out-lines";
pub const DM_ACK_COUNT: usize = 4;

/// Instruction register length of the TAP.
pub const TAP_IR_LENGTH: u64 = 5;

/// Offsets within the PULP debug module window.
pub const PULP_RV_DM_ROM_BASE: u64 = 0x800;
pub const PULP_RV_DM_HALT_OFFSET: u64 = 0x0;
pub const PULP_RV_DM_RESUME_OFFSET: u64 = 0x4;
pub const PULP_RV_DM_EXCEPTION_OFFSET: u64 = 0x8;
pub const PULP_RV_DM_WHERETO_OFFSET: u64 = 0x300;
pub const PULP_RV_DM_PROGRAM_BUFFER_OFFSET: u64 = 0x360;
pub const PULP_RV_DM_DATAADDR_OFFSET: u64 = 0x380;

pub const PULP_RV_DM_NSCRATCH_COUNT: u64 = 2;
pub const PULP_RV_DM_PROGRAM_BUFFER_COUNT: u64 = 8;
pub const PULP_RV_DM_DATA_COUNT: u64 = 2;
pub const PULP_RV_DM_ABSTRACTCMD_COUNT: u64 = 10;

/// Bus requester id of debug module initiated accesses.
pub const PULP_RV_DM_REQUESTER_ID: u64 = 0xd;

/// JTAG IDCODE: version, part number and JEP106 manufacturer id (lowRISC,
/// continuation bank `bank`).
pub const fn jtag_idcode(part: u64, bank: u64, version: u64) -> u64 {
    const LOWRISC_JEP106: u64 = 0xef;
    ((version & 0xf) << 28) | ((part & 0xffff) << 12) | ((bank & 0xf) << 8) | ((LOWRISC_JEP106 & 0x7f) << 1) | 1
}

pub static TAP_CTRL_RBB: ComponentClass = ComponentClass {
    type_name: TYPE_TAP_CTRL_RBB,
    properties: &[
        PropSpec::uint("ir_length"),
        PropSpec::uint("idcode"),
        PropSpec::chardev("chardev"),
    ],
    links: &[],
    outputs: &[],
    inputs: &[],
    regions: &[],
    create: peripheral::create,
};

pub static RISCV_DTM: ComponentClass = ComponentClass {
    type_name: TYPE_RISCV_DTM,
    properties: &[PropSpec::uint("abits")],
    links: &[LinkSpec::required("tap_ctrl")],
    outputs: &[],
    inputs: &[],
    regions: &[],
    create: peripheral::create,
};

pub static RISCV_DM: ComponentClass = ComponentClass {
    type_name: TYPE_RISCV_DM,
    properties: &[
        PropSpec::uint("nscratch"),
        PropSpec::uint("progbuf_count"),
        PropSpec::uint("data_count"),
        PropSpec::uint("abstractcmd_count"),
        PropSpec::uint("dm_phyaddr"),
        PropSpec::uint("rom_phyaddr"),
        PropSpec::uint("whereto_phyaddr"),
        PropSpec::uint("data_phyaddr"),
        PropSpec::uint("progbuf_phyaddr"),
        PropSpec::uint("resume_offset"),
        PropSpec::bool("sysbus_access"),
        PropSpec::bool("abstractauto"),
        PropSpec::array("hart"),
        PropSpec::uint("mta_dm"),
    ],
    links: &[LinkSpec::required("dtm")],
    outputs: &[],
    inputs: &[PinDecl::new(RISCV_DM_ACK_LINES, DM_ACK_COUNT)],
    regions: &[],
    create: peripheral::create,
};

pub static PULP_RV_DM: ComponentClass = ComponentClass {
    type_name: TYPE_PULP_RV_DM,
    properties: &[],
    links: &[],
    outputs: &[PinDecl::new(PULP_RV_DM_ACK_OUT_LINES, DM_ACK_COUNT)],
    inputs: &[],
    // debug memory, then the debug ROM registers
    regions: &[RegionSpec::Fixed(0x1000), RegionSpec::Fixed(0x4)],
    create: peripheral::create,
};
