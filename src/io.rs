//! The $4000-$401F I/O register block: joypad ports at $4016/$4017,
//! OAM DMA at $4014, APU registers accepted but not modeled.

use log::warn;

use crate::bus::CpuBusDevice;
use crate::common::IO_REGION;
use crate::joypad::{Joypad, JoypadInput};

const JOYPAD0: u16 = 0x4016;
const JOYPAD1: u16 = 0x4017;
const OAM_DMA: u16 = 0x4014;

pub struct IoRegs {
    joypads: [Joypad; 2],
}

impl IoRegs {
    pub fn new() -> Self {
        IoRegs {
            joypads: [Joypad::new(), Joypad::new()],
        }
    }

    pub fn set_input(&mut self, pad: usize, input: JoypadInput) {
        if pad > 1 {
            warn!("io: ignoring input for nonexistent pad {}", pad);
            return;
        }
        self.joypads[pad].set_buttons(input);
    }
}

impl Default for IoRegs {
    fn default() -> Self {
        IoRegs::new()
    }
}

impl CpuBusDevice for IoRegs {
    fn reset(&mut self) {
        for joypad in &mut self.joypads {
            joypad.reset();
        }
    }

    fn read(&mut self, addr: u16) -> Option<u8> {
        if !IO_REGION.contains(addr) {
            return None;
        }

        match addr {
            JOYPAD0 => Some(self.joypads[0].read()),
            JOYPAD1 => Some(self.joypads[1].read()),
            // APU state is not modeled; reads are open.
            _ => Some(0),
        }
    }

    fn write(&mut self, addr: u16, value: u8) -> bool {
        if !IO_REGION.contains(addr) {
            return false;
        }

        match addr {
            // The strobe line is wired to both controller ports.
            JOYPAD0 => {
                self.joypads[0].write(value);
                self.joypads[1].write(value);
            }
            OAM_DMA => {
                warn!("io: OAM DMA write ignored, transfer stall not modeled");
            }
            _ => {}
        }
        true
    }
}
