//! EarlGrey Descriptor Table.
//!
//! Memory map and interrupt routing follow the top_earlgrey memory and
//! interrupt maps. Entries appear in `EgDevice` order: the position of an
//! entry is its component id.

use super::configure::{
    configure_dm, configure_flash_ctrl, configure_hart, configure_otp_ctrl, configure_spi_device,
    configure_tap_ctrl, configure_uart,
};
use crate::devices::debug::{
    jtag_idcode, PULP_RV_DM_ABSTRACTCMD_COUNT, PULP_RV_DM_ACK_OUT_LINES,
    PULP_RV_DM_DATAADDR_OFFSET, PULP_RV_DM_DATA_COUNT, PULP_RV_DM_EXCEPTION_OFFSET,
    PULP_RV_DM_HALT_OFFSET, PULP_RV_DM_NSCRATCH_COUNT, PULP_RV_DM_PROGRAM_BUFFER_COUNT,
    PULP_RV_DM_PROGRAM_BUFFER_OFFSET, PULP_RV_DM_RESUME_OFFSET, PULP_RV_DM_ROM_BASE,
    PULP_RV_DM_WHERETO_OFFSET, RISCV_DM_ACK_LINES, TAP_IR_LENGTH, TYPE_PULP_RV_DM, TYPE_RISCV_DM,
    TYPE_RISCV_DTM, TYPE_TAP_CTRL_RBB,
};
use crate::devices::hart::{IRQ_M_EXT, IRQ_M_SOFT, IRQ_M_TIMER, TYPE_IBEX_HART};
use crate::devices::opentitan::{
    OT_AON_TIMER_BITE, OT_AON_TIMER_WKUP, OT_CLKMGR_HINT, OT_CLKMGR_HINT_AES,
    OT_CLKMGR_HINT_HMAC, OT_CLKMGR_HINT_OTBN, OT_CLOCK_ACTIVE, OT_IBEX_PWRMGR_CPU_EN,
    OT_IBEX_WRAPPER_CPU_EN, OT_PWRMGR_CPU_EN, OT_PWRMGR_LC_REQ, OT_PWRMGR_LC_RSP,
    OT_PWRMGR_OTP_REQ, OT_PWRMGR_OTP_RSP, OT_PWRMGR_RST, OT_PWRMGR_RST_REQ,
    OT_PWRMGR_ROM_DONE, OT_PWRMGR_ROM_GOOD, OT_PWRMGR_SW_RST, OT_PWRMGR_VERSION_EG,
    OT_PWRMGR_WAKEUP_AON_TIMER, OT_PWRMGR_WKUP, OT_ROM_CTRL_DONE, OT_ROM_CTRL_GOOD,
    OT_RSTMGR_RST_REQ, OT_RSTMGR_SW_RST, TYPE_OT_AES, TYPE_OT_ALERT, TYPE_OT_AON_TIMER,
    TYPE_OT_AST_EG, TYPE_OT_CLKMGR, TYPE_OT_CSRNG, TYPE_OT_EDN, TYPE_OT_ENTROPY_SRC,
    TYPE_OT_FLASH, TYPE_OT_GPIO_EG, TYPE_OT_HMAC, TYPE_OT_IBEX_WRAPPER_EG, TYPE_OT_KMAC,
    TYPE_OT_LC_CTRL, TYPE_OT_OTBN, TYPE_OT_OTP_EG, TYPE_OT_OTP_OT_BE, TYPE_OT_PINMUX_EG,
    TYPE_OT_PLIC_EXT, TYPE_OT_PWRMGR, TYPE_OT_ROM_CTRL, TYPE_OT_RSTMGR, TYPE_OT_SENSOR,
    TYPE_OT_SPI_DEVICE, TYPE_OT_SPI_HOST, TYPE_OT_SRAM_CTRL, TYPE_OT_TIMER, TYPE_OT_UART,
    TYPE_SIFIVE_PLIC,
};
use crate::devices::unimp::{self, TYPE_UNIMPLEMENTED_DEVICE};
use crate::soc::descriptor::{
    ComponentDescriptor, ComponentId, LinkDef, MemMapEntry, PropDef, SignalDef,
};

/// Component ids of the EarlGrey SoC.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum EgDevice {
    AdcCtrl,
    Aes,
    AlertHandler,
    AonTimer,
    Ast,
    Clkmgr,
    Csrng,
    Dm,
    Dtm,
    Edn0,
    Edn1,
    EntropySrc,
    FlashCtrl,
    Gpio,
    Hart,
    Hmac,
    I2c0,
    I2c1,
    I2c2,
    IbexWrapper,
    Keymgr,
    Kmac,
    LcCtrl,
    Otbn,
    OtpCtrl,
    OtpBackend,
    Pattgen,
    Pinmux,
    Plic,
    PlicExt,
    Pwm,
    Pwrmgr,
    SramRetCtrl,
    RomCtrl,
    Rstmgr,
    RvDm,
    SensorCtrl,
    SpiDevice,
    SpiHost0,
    SpiHost1,
    SramMainCtrl,
    SysrstCtrl,
    TapCtrl,
    Timer,
    Uart0,
    Uart1,
    Uart2,
    Uart3,
    Usbdev,
}

pub const EG_DEVICE_COUNT: usize = EgDevice::Usbdev as usize + 1;

impl EgDevice {
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn id(self) -> ComponentId {
        ComponentId(self as usize)
    }
}

/// Peripheral clock of the CW310 board.
pub const PERIPHERAL_CLK_HZ: u64 = 6_000_000;
/// Always-on clock of the CW310 board.
pub const AON_CLK_HZ: u64 = 250_000;

/// Reset requests routed to the power manager.
pub const RESET_SYSRST_CTRL: usize = 0;
pub const RESET_AON_TIMER: usize = 1;
pub const RESET_SENSOR_CTRL: usize = 2;

pub const PULP_DM_BASE: u64 = 0x0001_0000;
pub const SRAM_MAIN_SIZE: u64 = 0x2_0000;

/// TAP IDCODE of the EarlGrey M2.5.2-RC0 debug module.
pub const EG_TAP_IDCODE: u64 = jtag_idcode(0, 1, 0);

const PLIC: usize = EgDevice::Plic as usize;
const HART: usize = EgDevice::Hart as usize;
const CLKMGR: usize = EgDevice::Clkmgr as usize;

/// Interrupt outputs `0..N` to consecutive PLIC sources starting at `first`.
const fn plic_irqs<const N: usize>(first: usize) -> [SignalDef; N] {
    let mut out = [SignalDef::sysbus_irq(0, PLIC, first); N];
    let mut i = 0;
    while i < N {
        out[i] = SignalDef::sysbus_irq(i, PLIC, first + i);
        i += 1;
    }
    out
}

const fn plic_irq(irq: usize, source: usize) -> SignalDef {
    SignalDef::sysbus_irq(irq, PLIC, source)
}

/// Clock-active output to clock manager hint `hint`.
const fn clkmgr_hint(hint: usize) -> SignalDef {
    SignalDef::new(OT_CLOCK_ACTIVE, 0, CLKMGR, OT_CLKMGR_HINT, hint)
}

/// Debug ROM acknowledge line `num` to the debug module.
const fn dm_ack(num: usize) -> SignalDef {
    SignalDef::new(
        PULP_RV_DM_ACK_OUT_LINES,
        num,
        EgDevice::Dm as usize,
        RISCV_DM_ACK_LINES,
        num,
    )
}

const fn link(name: &'static str, target: EgDevice) -> LinkDef {
    LinkDef::new(name, target as usize)
}

/// Request output `name` to the input of the same name on `target`.
const fn handshake(name: &'static str, target: EgDevice) -> SignalDef {
    SignalDef::new(name, 0, target as usize, name, 0)
}

const fn signal(
    out_name: &'static str,
    out_num: usize,
    target: EgDevice,
    in_name: &'static str,
    in_num: usize,
) -> SignalDef {
    SignalDef::new(out_name, out_num, target as usize, in_name, in_num)
}

/// The EarlGrey SoC, indexed by `EgDevice`.
pub static EG_DEVICES: [ComponentDescriptor; EG_DEVICE_COUNT] = [
    // AdcCtrl
    ComponentDescriptor {
        name: Some("ot-adc_ctrl"),
        cfg: Some(unimp::configure),
        memmap: &[MemMapEntry::new(0x4044_0000)],
        prop: &[PropDef::uint("size", 0x80)],
        ..ComponentDescriptor::new(TYPE_UNIMPLEMENTED_DEVICE)
    },
    // Aes
    ComponentDescriptor {
        memmap: &[MemMapEntry::new(0x4110_0000)],
        gpio: &[clkmgr_hint(OT_CLKMGR_HINT_AES)],
        link: &[link("edn", EgDevice::Edn0)],
        prop: &[PropDef::uint("edn-ep", 5)],
        ..ComponentDescriptor::new(TYPE_OT_AES)
    },
    // AlertHandler
    ComponentDescriptor {
        memmap: &[MemMapEntry::new(0x4015_0000)],
        gpio: &plic_irqs::<4>(127),
        link: &[link("edn", EgDevice::Edn0)],
        prop: &[
            PropDef::uint("pclk", PERIPHERAL_CLK_HZ),
            PropDef::uint("n_alerts", 65),
            PropDef::uint("n_classes", 4),
            PropDef::uint("n_lpg", 22),
            PropDef::uint("edn-ep", 4),
        ],
        ..ComponentDescriptor::new(TYPE_OT_ALERT)
    },
    // AonTimer
    ComponentDescriptor {
        memmap: &[MemMapEntry::new(0x4047_0000)],
        gpio: &[
            plic_irq(0, 156),
            plic_irq(1, 157),
            signal(OT_AON_TIMER_WKUP, 0, EgDevice::Pwrmgr, OT_PWRMGR_WKUP, OT_PWRMGR_WAKEUP_AON_TIMER),
            signal(OT_AON_TIMER_BITE, 0, EgDevice::Pwrmgr, OT_PWRMGR_RST, RESET_AON_TIMER),
        ],
        prop: &[PropDef::uint("pclk", AON_CLK_HZ)],
        ..ComponentDescriptor::new(TYPE_OT_AON_TIMER)
    },
    // Ast
    ComponentDescriptor {
        memmap: &[MemMapEntry::new(0x4048_0000)],
        ..ComponentDescriptor::new(TYPE_OT_AST_EG)
    },
    // Clkmgr
    ComponentDescriptor {
        memmap: &[MemMapEntry::new(0x4042_0000)],
        ..ComponentDescriptor::new(TYPE_OT_CLKMGR)
    },
    // Csrng
    ComponentDescriptor {
        memmap: &[MemMapEntry::new(0x4115_0000)],
        gpio: &plic_irqs::<4>(174),
        link: &[
            link("random_src", EgDevice::EntropySrc),
            link("otp_ctrl", EgDevice::OtpCtrl),
        ],
        ..ComponentDescriptor::new(TYPE_OT_CSRNG)
    },
    // Dm
    ComponentDescriptor {
        cfg: Some(configure_dm),
        link: &[link("dtm", EgDevice::Dtm)],
        prop: &[
            PropDef::uint("nscratch", PULP_RV_DM_NSCRATCH_COUNT),
            PropDef::uint("progbuf_count", PULP_RV_DM_PROGRAM_BUFFER_COUNT),
            PropDef::uint("data_count", PULP_RV_DM_DATA_COUNT),
            PropDef::uint("abstractcmd_count", PULP_RV_DM_ABSTRACTCMD_COUNT),
            PropDef::uint("dm_phyaddr", PULP_DM_BASE),
            PropDef::uint("rom_phyaddr", PULP_DM_BASE + PULP_RV_DM_ROM_BASE),
            PropDef::uint("whereto_phyaddr", PULP_DM_BASE + PULP_RV_DM_WHERETO_OFFSET),
            PropDef::uint("data_phyaddr", PULP_DM_BASE + PULP_RV_DM_DATAADDR_OFFSET),
            PropDef::uint(
                "progbuf_phyaddr",
                PULP_DM_BASE + PULP_RV_DM_PROGRAM_BUFFER_OFFSET,
            ),
            PropDef::uint("resume_offset", PULP_RV_DM_RESUME_OFFSET),
            PropDef::bool("sysbus_access", true),
            PropDef::bool("abstractauto", true),
        ],
        ..ComponentDescriptor::new(TYPE_RISCV_DM)
    },
    // Dtm
    ComponentDescriptor {
        link: &[link("tap_ctrl", EgDevice::TapCtrl)],
        prop: &[PropDef::uint("abits", 7)],
        ..ComponentDescriptor::new(TYPE_RISCV_DTM)
    },
    // Edn0
    ComponentDescriptor {
        memmap: &[MemMapEntry::new(0x4117_0000)],
        gpio: &plic_irqs::<2>(182),
        link: &[link("csrng", EgDevice::Csrng)],
        prop: &[PropDef::uint("csrng-app", 0)],
        ..ComponentDescriptor::new(TYPE_OT_EDN)
    },
    // Edn1
    ComponentDescriptor {
        memmap: &[MemMapEntry::new(0x4118_0000)],
        gpio: &plic_irqs::<2>(184),
        link: &[link("csrng", EgDevice::Csrng)],
        prop: &[PropDef::uint("csrng-app", 1)],
        ..ComponentDescriptor::new(TYPE_OT_EDN)
    },
    // EntropySrc
    ComponentDescriptor {
        memmap: &[MemMapEntry::new(0x4116_0000)],
        gpio: &plic_irqs::<4>(178),
        link: &[
            link("ast", EgDevice::Ast),
            link("otp_ctrl", EgDevice::OtpCtrl),
        ],
        ..ComponentDescriptor::new(TYPE_OT_ENTROPY_SRC)
    },
    // FlashCtrl
    ComponentDescriptor {
        cfg: Some(configure_flash_ctrl),
        memmap: &[
            MemMapEntry::new(0x4100_0000),
            MemMapEntry::new(0x4100_8000),
            MemMapEntry::new(0x2000_0000),
        ],
        gpio: &plic_irqs::<6>(160),
        ..ComponentDescriptor::new(TYPE_OT_FLASH)
    },
    // Gpio
    ComponentDescriptor {
        memmap: &[MemMapEntry::new(0x4004_0000)],
        gpio: &plic_irqs::<32>(37),
        ..ComponentDescriptor::new(TYPE_OT_GPIO_EG)
    },
    // Hart
    ComponentDescriptor {
        cfg: Some(configure_hart),
        prop: &[
            PropDef::uint("resetvec", 0x8080),
            PropDef::uint("mtvec", 0x8001),
            PropDef::uint(
                "dmhaltvec",
                PULP_DM_BASE + PULP_RV_DM_ROM_BASE + PULP_RV_DM_HALT_OFFSET,
            ),
            PropDef::uint(
                "dmexcpvec",
                PULP_DM_BASE + PULP_RV_DM_ROM_BASE + PULP_RV_DM_EXCEPTION_OFFSET,
            ),
            PropDef::bool("start-powered-off", true),
        ],
        ..ComponentDescriptor::new(TYPE_IBEX_HART)
    },
    // Hmac
    ComponentDescriptor {
        memmap: &[MemMapEntry::new(0x4111_0000)],
        gpio: &[
            plic_irq(0, 166),
            plic_irq(1, 167),
            plic_irq(2, 168),
            clkmgr_hint(OT_CLKMGR_HINT_HMAC),
        ],
        ..ComponentDescriptor::new(TYPE_OT_HMAC)
    },
    // I2c0
    ComponentDescriptor {
        name: Some("ot-i2c"),
        cfg: Some(unimp::configure),
        memmap: &[MemMapEntry::new(0x4008_0000)],
        prop: &[PropDef::uint("size", 0x80)],
        ..ComponentDescriptor::new(TYPE_UNIMPLEMENTED_DEVICE)
    },
    // I2c1
    ComponentDescriptor {
        name: Some("ot-i2c"),
        cfg: Some(unimp::configure),
        memmap: &[MemMapEntry::new(0x4009_0000)],
        prop: &[PropDef::uint("size", 0x80)],
        ..ComponentDescriptor::new(TYPE_UNIMPLEMENTED_DEVICE)
    },
    // I2c2
    ComponentDescriptor {
        name: Some("ot-i2c"),
        cfg: Some(unimp::configure),
        memmap: &[MemMapEntry::new(0x400a_0000)],
        prop: &[PropDef::uint("size", 0x80)],
        ..ComponentDescriptor::new(TYPE_UNIMPLEMENTED_DEVICE)
    },
    // IbexWrapper
    ComponentDescriptor {
        memmap: &[MemMapEntry::new(0x411f_0000)],
        link: &[link("edn", EgDevice::Edn0)],
        prop: &[PropDef::uint("edn-ep", 7)],
        ..ComponentDescriptor::new(TYPE_OT_IBEX_WRAPPER_EG)
    },
    // Keymgr
    ComponentDescriptor {
        name: Some("ot-keymgr"),
        cfg: Some(unimp::configure),
        memmap: &[MemMapEntry::new(0x4114_0000)],
        prop: &[
            PropDef::uint("size", 0x100),
            PropDef::bool("warn-once", true),
        ],
        ..ComponentDescriptor::new(TYPE_UNIMPLEMENTED_DEVICE)
    },
    // Kmac
    ComponentDescriptor {
        memmap: &[MemMapEntry::new(0x4112_0000)],
        gpio: &plic_irqs::<3>(169),
        link: &[link("edn", EgDevice::Edn0)],
        prop: &[PropDef::uint("edn-ep", 3), PropDef::uint("num-app", 3)],
        ..ComponentDescriptor::new(TYPE_OT_KMAC)
    },
    // LcCtrl
    ComponentDescriptor {
        memmap: &[MemMapEntry::new(0x4014_0000)],
        gpio: &[handshake(OT_PWRMGR_LC_RSP, EgDevice::Pwrmgr)],
        link: &[
            link("otp_ctrl", EgDevice::OtpCtrl),
            link("kmac", EgDevice::Kmac),
        ],
        // Supersedes an earlier list that only set edn-ep; needs review.
        prop: &[
            PropDef::uint("silicon_creator_id", 0x4001),
            PropDef::uint("product_id", 0x0002),
            PropDef::uint("revision_id", 0x1),
            PropDef::bool("volatile_raw_unlock", true),
            PropDef::uint("kmac-app", 1),
            PropDef::string("raw_unlock_token", "51e6121c8694c6bc41f36e2175199296"),
            PropDef::string(
                "lc_state_first",
                "f29f2eb011e290c9210fb1d4302b323db0e81df4a59985e47749732c6c910d3015a62e61b0c383c1",
            ),
            PropDef::string(
                "lc_state_last",
                "f29f3fb41fe3d2fda7afffd676abb3ffbaeefff4a5ffefe4ff4f7fbeed9ddff29db77ee5b7d3d7e5",
            ),
            PropDef::string(
                "lc_trscnt_first",
                "3cfc8321c4f818ac4d53d244a4c4631e90656423004b81baaa5b692c13f2f21d609b685ec45d05042876e8628a8b0dd0",
            ),
            PropDef::string(
                "lc_trscnt_last",
                "3cfcfb23eef99fad6f7ffb44e6ce7b5ed47767e753cbabfebf5fe96e77f3f35d6f9f68ffde5d5564be76fd6bfb8fcdfb",
            ),
        ],
        ..ComponentDescriptor::new(TYPE_OT_LC_CTRL)
    },
    // Otbn
    ComponentDescriptor {
        memmap: &[MemMapEntry::new(0x4113_0000)],
        gpio: &[plic_irq(0, 172), clkmgr_hint(OT_CLKMGR_HINT_OTBN)],
        link: &[
            link("edn-u", EgDevice::Edn0),
            link("edn-r", EgDevice::Edn1),
        ],
        prop: &[PropDef::uint("edn-u-ep", 6), PropDef::uint("edn-r-ep", 0)],
        ..ComponentDescriptor::new(TYPE_OT_OTBN)
    },
    // OtpCtrl
    ComponentDescriptor {
        cfg: Some(configure_otp_ctrl),
        memmap: &[MemMapEntry::new(0x4013_0000)],
        gpio: &plic_irqs::<2>(125),
        link: &[
            link("edn", EgDevice::Edn0),
            link("backend", EgDevice::OtpBackend),
        ],
        prop: &[PropDef::uint("edn-ep", 1)],
        ..ComponentDescriptor::new(TYPE_OT_OTP_EG)
    },
    // OtpBackend
    ComponentDescriptor {
        memmap: &[MemMapEntry::new(0x4013_2000)],
        link: &[link("parent", EgDevice::OtpCtrl)],
        ..ComponentDescriptor::new(TYPE_OT_OTP_OT_BE)
    },
    // Pattgen
    ComponentDescriptor {
        name: Some("ot-pattgen"),
        cfg: Some(unimp::configure),
        memmap: &[MemMapEntry::new(0x400e_0000)],
        prop: &[PropDef::uint("size", 0x80)],
        ..ComponentDescriptor::new(TYPE_UNIMPLEMENTED_DEVICE)
    },
    // Pinmux
    ComponentDescriptor {
        memmap: &[MemMapEntry::new(0x4046_0000)],
        ..ComponentDescriptor::new(TYPE_OT_PINMUX_EG)
    },
    // Plic
    ComponentDescriptor {
        memmap: &[MemMapEntry::new(0x4800_0000)],
        gpio: &[SignalDef::gpio(1, HART, IRQ_M_EXT)],
        prop: &[
            PropDef::string("hart-config", "M"),
            PropDef::uint("hartid-base", 0),
            // max irq + 1
            PropDef::uint("num-sources", 186),
            PropDef::uint("num-priorities", 3),
            PropDef::uint("priority-base", 0x0),
            PropDef::uint("pending-base", 0x1000),
            PropDef::uint("enable-base", 0x2000),
            PropDef::uint("enable-stride", 32),
            PropDef::uint("context-base", 0x20_0000),
            PropDef::uint("context-stride", 8),
            PropDef::uint("aperture-size", 0x400_0000),
        ],
        ..ComponentDescriptor::new(TYPE_SIFIVE_PLIC)
    },
    // PlicExt
    ComponentDescriptor {
        memmap: &[MemMapEntry::new(0x2c00_0000)],
        gpio: &[SignalDef::gpio(0, HART, IRQ_M_SOFT)],
        ..ComponentDescriptor::new(TYPE_OT_PLIC_EXT)
    },
    // Pwm
    ComponentDescriptor {
        name: Some("ot-pwm"),
        cfg: Some(unimp::configure),
        memmap: &[MemMapEntry::new(0x4045_0000)],
        prop: &[PropDef::uint("size", 0x80)],
        ..ComponentDescriptor::new(TYPE_UNIMPLEMENTED_DEVICE)
    },
    // Pwrmgr
    ComponentDescriptor {
        memmap: &[MemMapEntry::new(0x4040_0000)],
        gpio: &[
            plic_irq(0, 153),
            // OTP power handshake is not modeled yet
            signal(OT_PWRMGR_OTP_REQ, 0, EgDevice::Pwrmgr, OT_PWRMGR_OTP_RSP, 0).bypass(),
            handshake(OT_PWRMGR_LC_REQ, EgDevice::LcCtrl),
            signal(
                OT_PWRMGR_CPU_EN,
                0,
                EgDevice::IbexWrapper,
                OT_IBEX_WRAPPER_CPU_EN,
                OT_IBEX_PWRMGR_CPU_EN,
            ),
            signal(OT_PWRMGR_RST_REQ, 0, EgDevice::Rstmgr, OT_RSTMGR_RST_REQ, 0),
        ],
        prop: &[
            PropDef::uint("num-rom", 1),
            PropDef::uint("version", OT_PWRMGR_VERSION_EG),
        ],
        ..ComponentDescriptor::new(TYPE_OT_PWRMGR)
    },
    // SramRetCtrl
    ComponentDescriptor {
        memmap: &[
            MemMapEntry::new(0x4050_0000),
            MemMapEntry::new(0x4060_0000),
        ],
        link: &[link("otp_ctrl", EgDevice::OtpCtrl)],
        prop: &[PropDef::uint("size", 0x1000), PropDef::string("ot_id", "ret")],
        ..ComponentDescriptor::new(TYPE_OT_SRAM_CTRL)
    },
    // RomCtrl
    ComponentDescriptor {
        name: Some("ot-rom_ctrl"),
        memmap: &[
            MemMapEntry::new(0x411e_0000),
            MemMapEntry::new(0x0000_8000),
        ],
        gpio: &[
            signal(OT_ROM_CTRL_GOOD, 0, EgDevice::Pwrmgr, OT_PWRMGR_ROM_GOOD, 0),
            signal(OT_ROM_CTRL_DONE, 0, EgDevice::Pwrmgr, OT_PWRMGR_ROM_DONE, 0),
        ],
        link: &[link("kmac", EgDevice::Kmac)],
        prop: &[
            PropDef::string("ot_id", "rom"),
            PropDef::uint("size", 0x8000),
            PropDef::uint("kmac-app", 2),
            PropDef::string("nonce", "755cf00bd7432c3f"),
            PropDef::string("key", "8cd4e7eff1b9ec59ce812447c5714595"),
        ],
        ..ComponentDescriptor::new(TYPE_OT_ROM_CTRL)
    },
    // Rstmgr
    ComponentDescriptor {
        memmap: &[MemMapEntry::new(0x4041_0000)],
        gpio: &[signal(OT_RSTMGR_SW_RST, 0, EgDevice::Pwrmgr, OT_PWRMGR_SW_RST, 0)],
        ..ComponentDescriptor::new(TYPE_OT_RSTMGR)
    },
    // RvDm
    ComponentDescriptor {
        memmap: &[
            MemMapEntry::new(PULP_DM_BASE),
            MemMapEntry::new(0x4120_0000),
        ],
        gpio: &[dm_ack(0), dm_ack(1), dm_ack(2), dm_ack(3)],
        ..ComponentDescriptor::new(TYPE_PULP_RV_DM)
    },
    // SensorCtrl
    ComponentDescriptor {
        memmap: &[MemMapEntry::new(0x4049_0000)],
        ..ComponentDescriptor::new(TYPE_OT_SENSOR)
    },
    // SpiDevice
    ComponentDescriptor {
        cfg: Some(configure_spi_device),
        memmap: &[MemMapEntry::new(0x4005_0000)],
        gpio: &plic_irqs::<8>(69),
        ..ComponentDescriptor::new(TYPE_OT_SPI_DEVICE)
    },
    // SpiHost0
    ComponentDescriptor {
        memmap: &[MemMapEntry::new(0x4030_0000)],
        gpio: &plic_irqs::<2>(131),
        prop: &[PropDef::uint("bus-num", 0)],
        ..ComponentDescriptor::new(TYPE_OT_SPI_HOST)
    },
    // SpiHost1
    ComponentDescriptor {
        memmap: &[MemMapEntry::new(0x4031_0000)],
        gpio: &plic_irqs::<2>(133),
        prop: &[PropDef::uint("bus-num", 1)],
        ..ComponentDescriptor::new(TYPE_OT_SPI_HOST)
    },
    // SramMainCtrl
    ComponentDescriptor {
        memmap: &[
            MemMapEntry::new(0x411c_0000),
            MemMapEntry::new(0x1000_0000),
        ],
        link: &[link("otp_ctrl", EgDevice::OtpCtrl)],
        prop: &[
            PropDef::uint("size", SRAM_MAIN_SIZE),
            PropDef::string("ot_id", "ram"),
        ],
        ..ComponentDescriptor::new(TYPE_OT_SRAM_CTRL)
    },
    // SysrstCtrl
    ComponentDescriptor {
        name: Some("ot-sysrst_ctrl"),
        cfg: Some(unimp::configure),
        memmap: &[MemMapEntry::new(0x4043_0000)],
        prop: &[PropDef::uint("size", 0x100)],
        ..ComponentDescriptor::new(TYPE_UNIMPLEMENTED_DEVICE)
    },
    // TapCtrl
    ComponentDescriptor {
        cfg: Some(configure_tap_ctrl),
        prop: &[
            PropDef::uint("ir_length", TAP_IR_LENGTH),
            PropDef::uint("idcode", EG_TAP_IDCODE),
        ],
        ..ComponentDescriptor::new(TYPE_TAP_CTRL_RBB)
    },
    // Timer
    ComponentDescriptor {
        memmap: &[MemMapEntry::new(0x4010_0000)],
        gpio: &[SignalDef::gpio(0, HART, IRQ_M_TIMER), plic_irq(0, 124)],
        prop: &[PropDef::uint("pclk", PERIPHERAL_CLK_HZ)],
        ..ComponentDescriptor::new(TYPE_OT_TIMER)
    },
    // Uart0
    ComponentDescriptor {
        cfg: Some(configure_uart),
        instance: Some(0),
        memmap: &[MemMapEntry::new(0x4000_0000)],
        gpio: &plic_irqs::<9>(1),
        prop: &[PropDef::uint("pclk", PERIPHERAL_CLK_HZ)],
        ..ComponentDescriptor::new(TYPE_OT_UART)
    },
    // Uart1
    ComponentDescriptor {
        cfg: Some(configure_uart),
        instance: Some(1),
        memmap: &[MemMapEntry::new(0x4001_0000)],
        gpio: &plic_irqs::<9>(10),
        prop: &[PropDef::uint("pclk", PERIPHERAL_CLK_HZ)],
        ..ComponentDescriptor::new(TYPE_OT_UART)
    },
    // Uart2
    ComponentDescriptor {
        cfg: Some(configure_uart),
        instance: Some(2),
        memmap: &[MemMapEntry::new(0x4002_0000)],
        gpio: &plic_irqs::<9>(19),
        prop: &[PropDef::uint("pclk", PERIPHERAL_CLK_HZ)],
        ..ComponentDescriptor::new(TYPE_OT_UART)
    },
    // Uart3
    ComponentDescriptor {
        cfg: Some(configure_uart),
        instance: Some(3),
        memmap: &[MemMapEntry::new(0x4003_0000)],
        gpio: &plic_irqs::<9>(28),
        prop: &[PropDef::uint("pclk", PERIPHERAL_CLK_HZ)],
        ..ComponentDescriptor::new(TYPE_OT_UART)
    },
    // Usbdev
    ComponentDescriptor {
        name: Some("ot-usbdev"),
        cfg: Some(unimp::configure),
        memmap: &[MemMapEntry::new(0x4032_0000)],
        prop: &[PropDef::uint("size", 0x1000)],
        ..ComponentDescriptor::new(TYPE_UNIMPLEMENTED_DEVICE)
    },
];
