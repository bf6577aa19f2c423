//! Cartridge mappers. Only NROM (mapper 0) is implemented; anything
//! else satisfying the two bus-device traits can be attached in its
//! place.
//!
//! Reference: <https://www.nesdev.org/wiki/NROM>

use log::warn;

use crate::bus::{CpuBusDevice, PpuBusDevice};
use crate::cartridge::{Cartridge, LoadError, CHR_PAGE_SIZE, PRG_PAGE_SIZE};
use crate::common::PRG_REGION;

const CHR_END: u16 = 0x1FFF;

/// Mapper 0: fixed PRG at $8000-$FFFF (16 KiB images mirror across both
/// halves), fixed CHR at PPU $0000-$1FFF. Both are ROM; writes are
/// discarded with a warning.
pub struct Nrom {
    prg: Vec<u8>,
    chr: Vec<u8>,
}

impl Nrom {
    pub fn new(cartridge: Cartridge) -> Result<Nrom, LoadError> {
        if cartridge.mapper != 0 {
            return Err(LoadError::UnsupportedMapper(cartridge.mapper));
        }

        let prg_ok = cartridge.prg.len() == PRG_PAGE_SIZE || cartridge.prg.len() == 2 * PRG_PAGE_SIZE;
        if !prg_ok || cartridge.chr.len() != CHR_PAGE_SIZE {
            return Err(LoadError::BadLayout {
                prg: cartridge.prg.len() / 1024,
                chr: cartridge.chr.len() / 1024,
            });
        }

        Ok(Nrom {
            prg: cartridge.prg,
            chr: cartridge.chr,
        })
    }
}

impl CpuBusDevice for Nrom {
    fn reset(&mut self) {}

    fn read(&mut self, addr: u16) -> Option<u8> {
        if PRG_REGION.contains(addr) {
            Some(self.prg[(addr - PRG_REGION.start) as usize % self.prg.len()])
        } else {
            None
        }
    }

    fn write(&mut self, addr: u16, _value: u8) -> bool {
        if PRG_REGION.contains(addr) {
            warn!("mapper: write to PRG ROM at {:#06X} ignored", addr);
            true
        } else {
            false
        }
    }
}

impl PpuBusDevice for Nrom {
    fn reset(&mut self) {}

    fn ppu_read(&mut self, addr: u16) -> Option<u8> {
        (addr <= CHR_END).then(|| self.chr[addr as usize])
    }

    fn ppu_write(&mut self, addr: u16, _value: u8) -> bool {
        if addr <= CHR_END {
            warn!("mapper: write to CHR ROM at {:#06X} ignored", addr);
            true
        } else {
            false
        }
    }
}
