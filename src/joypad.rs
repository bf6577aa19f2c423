//! The standard controller: eight buttons behind a strobe latch and a
//! serial shift register.
//!
//! Reference: <https://www.nesdev.org/wiki/Standard_controller>

use bitflags::bitflags;

bitflags! {
    // Bit order matches the shift-out order on the data line.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Buttons: u8 {
        const A      = 1 << 0;
        const B      = 1 << 1;
        const SELECT = 1 << 2;
        const START  = 1 << 3;
        const UP     = 1 << 4;
        const DOWN   = 1 << 5;
        const LEFT   = 1 << 6;
        const RIGHT  = 1 << 7;
    }
}

/// Host-facing button state, one boolean per pad button.
#[derive(Debug, Clone, Copy, Default)]
pub struct JoypadInput {
    pub a: bool,
    pub b: bool,
    pub select: bool,
    pub start: bool,
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl From<JoypadInput> for Buttons {
    fn from(input: JoypadInput) -> Buttons {
        let mut buttons = Buttons::empty();
        buttons.set(Buttons::A, input.a);
        buttons.set(Buttons::B, input.b);
        buttons.set(Buttons::SELECT, input.select);
        buttons.set(Buttons::START, input.start);
        buttons.set(Buttons::UP, input.up);
        buttons.set(Buttons::DOWN, input.down);
        buttons.set(Buttons::LEFT, input.left);
        buttons.set(Buttons::RIGHT, input.right);
        buttons
    }
}

pub struct Joypad {
    strobe: bool,
    shift_index: u8,
    buttons: Buttons,
}

impl Joypad {
    pub fn new() -> Self {
        Joypad {
            strobe: false,
            shift_index: 0,
            buttons: Buttons::empty(),
        }
    }

    pub fn set_buttons(&mut self, input: JoypadInput) {
        self.buttons = input.into();
    }

    /// Bit 0 of a $4016 write drives the strobe line; while high the
    /// shift register keeps reloading from the A button.
    pub fn write(&mut self, value: u8) {
        self.strobe = value & 1 == 1;
        if self.strobe {
            self.shift_index = 0;
        }
    }

    /// Shift one button bit out; official pads return 1 once all eight
    /// bits have been read.
    pub fn read(&mut self) -> u8 {
        if self.shift_index > 7 {
            return 1;
        }

        let bit = (self.buttons.bits() >> self.shift_index) & 1;
        if !self.strobe {
            self.shift_index += 1;
        }
        bit
    }

    pub fn reset(&mut self) {
        self.strobe = false;
        self.shift_index = 0;
        self.buttons = Buttons::empty();
    }
}

impl Default for Joypad {
    fn default() -> Self {
        Joypad::new()
    }
}
