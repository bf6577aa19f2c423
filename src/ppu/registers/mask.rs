//! The PPU mask register ($2001).
//! Reference: <https://www.nesdev.org/wiki/PPU_registers#PPUMASK>

use bitflags::bitflags;

bitflags! {
    // 7654 3210
    // BGRs bMmG
    // |||| |||+- Greyscale
    // |||| ||+-- Show background in the leftmost 8 pixels
    // |||| |+--- Show sprites in the leftmost 8 pixels
    // |||| +---- Show background
    // |||+------ Show sprites
    // +++------- Color emphasis
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Mask: u8 {
        const GREYSCALE            = 1 << 0;
        const SHOW_BACKGROUND_LEFT = 1 << 1;
        const SHOW_SPRITES_LEFT    = 1 << 2;
        const SHOW_BACKGROUND      = 1 << 3;
        const SHOW_SPRITES         = 1 << 4;
        const EMPHASIZE_RED        = 1 << 5;
        const EMPHASIZE_GREEN      = 1 << 6;
        const EMPHASIZE_BLUE       = 1 << 7;
    }
}

impl Mask {
    pub fn new() -> Self {
        Mask::empty()
    }

    pub fn rendering_enabled(self) -> bool {
        self.intersects(Mask::SHOW_BACKGROUND | Mask::SHOW_SPRITES)
    }
}

impl Default for Mask {
    fn default() -> Self {
        Mask::new()
    }
}
