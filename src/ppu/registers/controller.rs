//! The PPU control register ($2000).
//! Reference: <https://www.nesdev.org/wiki/PPU_registers#PPUCTRL>

use bitflags::bitflags;

bitflags! {
    // 7654 3210
    // VPHB SINN
    // |||| ||++- Base nametable address
    // |||| |+--- VRAM address increment per $2007 access (0: 1; 1: 32)
    // |||| +---- Sprite pattern table for 8x8 sprites
    // |||+------ Background pattern table address
    // ||+------- Sprite size (0: 8x8; 1: 8x16)
    // |+-------- PPU master/slave select (unused on the NES)
    // +--------- Generate an NMI at the start of vblank
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Control: u8 {
        const NAMETABLE_LOW      = 1 << 0;
        const NAMETABLE_HIGH     = 1 << 1;
        const VRAM_INCREMENT     = 1 << 2;
        const SPRITE_TABLE       = 1 << 3;
        const BACKGROUND_TABLE   = 1 << 4;
        const SPRITE_SIZE        = 1 << 5;
        const MASTER_SLAVE       = 1 << 6;
        const NMI_ENABLE         = 1 << 7;
    }
}

impl Control {
    pub fn new() -> Self {
        Control::empty()
    }

    /// How far $2007 accesses move the VRAM address.
    pub fn vram_increment(self) -> u8 {
        if self.contains(Control::VRAM_INCREMENT) {
            32
        } else {
            1
        }
    }

    pub fn nametable_base(self) -> u16 {
        0x2000 + 0x0400 * (self.bits() & 0b11) as u16
    }
}

impl Default for Control {
    fn default() -> Self {
        Control::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_vram_increment() {
        assert_eq!(Control::new().vram_increment(), 1);
        assert_eq!(Control::VRAM_INCREMENT.vram_increment(), 32);
    }

    #[test]
    fn test_nametable_base() {
        assert_eq!(Control::from_bits_truncate(0b00).nametable_base(), 0x2000);
        assert_eq!(Control::from_bits_truncate(0b11).nametable_base(), 0x2C00);
    }
}
