//! EarlGrey Board.
//!
//! The board holds the SoC and an SPI NOR dataflash on the bus of the
//! first SPI host. The flash is attached once the SoC is realized, then its
//! chip select is wired from the host.

use crate::common::error::BuildError;
use crate::config::HostEnvironment;
use crate::devices::dataflash::{Dataflash, SSI_GPIO_CS, TYPE_IS25WP128};
use crate::devices::TypeRegistry;
use crate::earlgrey::configure::configure_dataflash;
use crate::earlgrey::table::EgDevice;
use crate::earlgrey::{EARLGREY_SOC, TYPE_RISCV_OT_EG_BOARD};
use crate::soc::builder::SocGraph;
use crate::soc::descriptor::{ComponentDescriptor, ComponentId, LinkDef};
use log::info;

/// Devices owned by the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EgBoardDevice {
    Soc,
    Flash,
}

pub const EG_BOARD_DEVICE_COUNT: usize = EgBoardDevice::Flash as usize + 1;

pub static BOARD_DATAFLASH: ComponentDescriptor = ComponentDescriptor {
    cfg: Some(configure_dataflash),
    link: &[LinkDef::new("bus", EgDevice::SpiHost0 as usize)],
    ..ComponentDescriptor::new(TYPE_IS25WP128)
};

pub struct EarlGreyBoard {
    soc: SocGraph,
    dataflash: ComponentId,
}

impl EarlGreyBoard {
    /// Realizes the SoC, then attaches and wires the dataflash.
    pub fn realize(host: &HostEnvironment) -> Result<Self, BuildError> {
        info!("[{}] Realizing {} devices", TYPE_RISCV_OT_EG_BOARD, EG_BOARD_DEVICE_COUNT);
        let registry = TypeRegistry::with_builtin();
        let mut soc = SocGraph::build(&EARLGREY_SOC, &registry, host)?;

        let dataflash = soc.attach(&BOARD_DATAFLASH, TYPE_RISCV_OT_EG_BOARD, &registry, host)?;
        soc.connect(
            EgDevice::SpiHost0.id(),
            SSI_GPIO_CS,
            0,
            dataflash,
            SSI_GPIO_CS,
            0,
        )?;
        Ok(Self { soc, dataflash })
    }

    pub fn name(&self) -> &'static str {
        TYPE_RISCV_OT_EG_BOARD
    }

    pub fn soc(&self) -> &SocGraph {
        &self.soc
    }

    pub fn soc_mut(&mut self) -> &mut SocGraph {
        &mut self.soc
    }

    /// Component id of the dataflash inside the SoC graph.
    pub fn dataflash_id(&self) -> ComponentId {
        self.dataflash
    }

    pub fn dataflash(&self) -> Option<&Dataflash> {
        self.soc.device_as::<Dataflash>(self.dataflash)
    }
}
