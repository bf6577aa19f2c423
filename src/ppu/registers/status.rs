//! The PPU status register ($2002).
//! Reference: <https://www.nesdev.org/wiki/PPU_registers#PPUSTATUS>

use bitflags::bitflags;

bitflags! {
    // 7654 3210
    // VSO. ....
    // ||+------- Sprite overflow
    // |+-------- Sprite 0 hit
    // +--------- Vertical blank has started
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Status: u8 {
        const SPRITE_OVERFLOW = 1 << 5;
        const SPRITE_ZERO_HIT = 1 << 6;
        const VBLANK          = 1 << 7;
    }
}

impl Status {
    pub fn new() -> Self {
        Status::empty()
    }
}

impl Default for Status {
    fn default() -> Self {
        Status::new()
    }
}
