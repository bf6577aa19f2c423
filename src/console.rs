//! Top-level composition: wires the mapper, RAM, I/O block and PPU to
//! the bus, builds the CPU, and drives everything at the hardware's
//! 3:1 PPU-to-CPU clock ratio.

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use crate::bus::Bus;
use crate::cartridge::{Cartridge, LoadError, PRG_PAGE_SIZE};
use crate::common::PRG_REGION;
use crate::cpu::disassembler::Disassembler;
use crate::cpu::Cpu;
use crate::io::IoRegs;
use crate::joypad::JoypadInput;
use crate::mapper::Nrom;
use crate::ppu::Ppu;
use crate::ram::Ram;
use crate::screen::Image;
use crate::sram::Sram;

pub struct Console {
    pub cpu: Cpu,
    bus: Rc<Bus>,
    ppu: Rc<RefCell<Ppu>>,
    io: Rc<RefCell<IoRegs>>,
    disassembler: Disassembler,
    // Master cycle counter; the CPU steps on every third cycle.
    cycles: u64,
}

impl Console {
    pub fn new<P: AsRef<Path>>(rom_path: P) -> Result<Console, LoadError> {
        Console::with_cartridge(Cartridge::load(rom_path)?)
    }

    pub fn with_cartridge(cartridge: Cartridge) -> Result<Console, LoadError> {
        let mirroring = cartridge.mirroring;
        let battery = cartridge.battery;

        let mut disassembler = Disassembler::new();
        disassembler.index(&cartridge.prg, PRG_REGION.start);
        if cartridge.prg.len() == PRG_PAGE_SIZE {
            // A 16 KiB image appears in both halves of the PRG window.
            disassembler.index(&cartridge.prg, PRG_REGION.start + PRG_PAGE_SIZE as u16);
        }

        let mapper = Rc::new(RefCell::new(Nrom::new(cartridge)?));
        let ram = Rc::new(RefCell::new(Ram::new()));
        let io = Rc::new(RefCell::new(IoRegs::new()));
        let ppu = Rc::new(RefCell::new(Ppu::new(mirroring)));

        let mut bus = Bus::new();
        bus.attach_cpu(mapper.clone());
        bus.attach_ppu(mapper);
        bus.attach_cpu(ram);
        if battery {
            bus.attach_cpu(Rc::new(RefCell::new(Sram::new())));
        }
        bus.attach_cpu(io.clone());
        bus.attach_cpu(ppu.clone());

        let bus = Rc::new(bus);
        ppu.borrow_mut().connect(&bus);
        let cpu = Cpu::new(&bus);

        Ok(Console {
            cpu,
            bus,
            ppu,
            io,
            disassembler,
            cycles: 0,
        })
    }

    pub fn reset(&mut self) {
        self.bus.reset();
        self.cpu.reset(&self.bus);
        self.cycles = 0;
    }

    /// One master-clock tick: the PPU always steps, the CPU steps every
    /// third cycle.
    pub fn clock(&mut self, image: &mut dyn Image) {
        self.ppu.borrow_mut().clock(image);

        if self.cycles % 3 == 0 {
            self.cpu.clock(&self.bus);
        }

        self.cycles += 1;
    }

    /// Latch host button state into a joypad; read back by the program
    /// through $4016/$4017.
    pub fn input(&mut self, pad: usize, buttons: JoypadInput) {
        self.io.borrow_mut().set_input(pad, buttons);
    }

    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    pub fn frames(&self) -> u64 {
        self.ppu.borrow().frames()
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Disassembly lines centered on `addr`, for debug front-ends.
    pub fn disassembly(&self, addr: u16, n: u16) -> Vec<String> {
        self.disassembler.get(addr, n)
    }
}
