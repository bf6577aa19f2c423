//! The MOS 6502 core: fetch/decode/execute with per-instruction cycle
//! accounting.
//!
//! Reference: <https://www.nesdev.org/wiki/CPU>

use bitflags::bitflags;
use log::info;

use crate::bus::Bus;
use crate::common::{RESET_VECTOR, STACK_BASE};

pub mod disassembler;
pub mod instructions;

pub use instructions::{AddressMode, Instruction, INSTRUCTION_TABLE};

// Status flags -- https://www.nesdev.org/wiki/Status_flags
// 7654 3210
// NV1B DIZC
// |||| ||||
// |||| |||+- Carry
// |||| ||+-- Zero
// |||| |+--- Interrupt disable
// |||| +---- Decimal (present but unused on the NES)
// |||+------ Break
// ||+------- (no CPU effect; reads as 1 on pushes)
// |+-------- Overflow
// +--------- Negative
bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Status: u8 {
        const CARRY       = 1 << 0;
        const ZERO        = 1 << 1;
        const IRQ_DISABLE = 1 << 2;
        const DECIMAL     = 1 << 3;
        const BREAK       = 1 << 4;
        const UNUSED      = 1 << 5;
        const OVERFLOW    = 1 << 6;
        const NEGATIVE    = 1 << 7;
    }
}

const SP_POWER_ON: u8 = 0xFD;
// IRQ disabled at power-up.
const STATUS_POWER_ON: u8 = 0x34;

pub struct Cpu {
    pub pc: u16,
    pub sp: u8,
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub status: Status,

    // Cycles the current instruction still has to burn before the next
    // fetch happens.
    cycles: u16,

    // Operand latch filled per addressing mode before execution.
    mode: AddressMode,
    operand_addr: u16,
    operand_value: u8,

    cross_page_armed: bool,
    halted: bool,
}

impl Cpu {
    /// Power-on state; the program counter comes from the reset vector.
    /// Reference: <https://www.nesdev.org/wiki/CPU_power_up_state>
    pub fn new(bus: &Bus) -> Self {
        let pc = bus.read16(RESET_VECTOR);
        info!("cpu: pc = memory[{:#06X}] = {:#06X}", RESET_VECTOR, pc);

        Cpu {
            pc,
            sp: SP_POWER_ON,
            a: 0,
            x: 0,
            y: 0,
            status: Status::from_bits_truncate(STATUS_POWER_ON),
            cycles: 0,
            mode: AddressMode::Implicit,
            operand_addr: 0,
            operand_value: 0,
            cross_page_armed: false,
            halted: false,
        }
    }

    pub fn reset(&mut self, bus: &Bus) {
        self.pc = bus.read16(RESET_VECTOR);
        info!("cpu: reset, pc = {:#06X}", self.pc);

        self.sp = SP_POWER_ON;
        self.status = Status::empty();
        self.a = 0;
        self.x = 0;
        self.y = 0;
        self.halted = false;
        self.cycles += 8;
    }

    /// One master-clock tick. Burns a pending cycle if the previous
    /// instruction still owes some; otherwise fetches and executes the
    /// next instruction and charges its cost (minus the cycle this very
    /// call represents).
    pub fn clock(&mut self, bus: &Bus) {
        if self.halted {
            return;
        }
        if self.cycles > 0 {
            self.cycles -= 1;
            return;
        }

        let opcode = self.fetch(bus);
        let instruction = &INSTRUCTION_TABLE[opcode as usize];

        self.prepare_operand(instruction.mode, bus);
        let previous_pc = self.pc;
        self.cross_page_armed = true;

        (instruction.exec)(self, bus);

        if self.halted {
            self.cycles = 0;
            return;
        }

        self.cycles += instruction.cycles as u16;
        if self.cross_page_armed
            && instruction.cross_page_penalty
            && self.pc >> 8 != previous_pc >> 8
        {
            self.cycles += 1;
        }
        self.cycles -= 1;
    }

    pub fn cycles_remaining(&self) -> u16 {
        self.cycles
    }

    pub fn halted(&self) -> bool {
        self.halted
    }

    fn fetch(&mut self, bus: &Bus) -> u8 {
        let value = bus.read(self.pc);
        self.pc = self.pc.wrapping_add(1);
        value
    }

    fn fetch16(&mut self, bus: &Bus) -> u16 {
        let low = self.fetch(bus) as u16;
        let high = self.fetch(bus) as u16;
        high << 8 | low
    }

    /// Compute the effective address and value for the coming
    /// instruction. Addressing modes from Appendix E of
    /// <http://www.nesdev.com/NESDoc.pdf>.
    fn prepare_operand(&mut self, mode: AddressMode, bus: &Bus) {
        match mode {
            AddressMode::Implicit => {}
            AddressMode::Accumulator => {
                self.operand_value = self.a;
            }
            AddressMode::Immediate | AddressMode::Relative => {
                self.operand_value = self.fetch(bus);
            }
            AddressMode::ZeroPage => {
                self.operand_addr = self.fetch(bus) as u16;
                self.operand_value = bus.read(self.operand_addr);
            }
            AddressMode::ZeroPageX => {
                self.operand_addr = self.fetch(bus).wrapping_add(self.x) as u16;
                self.operand_value = bus.read(self.operand_addr);
            }
            AddressMode::ZeroPageY => {
                self.operand_addr = self.fetch(bus).wrapping_add(self.y) as u16;
                self.operand_value = bus.read(self.operand_addr);
            }
            AddressMode::Absolute => {
                self.operand_addr = self.fetch16(bus);
                self.operand_value = bus.read(self.operand_addr);
            }
            AddressMode::AbsoluteX => {
                self.operand_addr = self.fetch16(bus).wrapping_add(self.x as u16);
                self.operand_value = bus.read(self.operand_addr);
            }
            AddressMode::AbsoluteY => {
                self.operand_addr = self.fetch16(bus).wrapping_add(self.y as u16);
                self.operand_value = bus.read(self.operand_addr);
            }
            AddressMode::Indirect => {
                let pointer = self.fetch16(bus);
                // A vector starting on the last byte of a page takes its
                // high byte from the start of the *same* page. Hardware
                // bug, kept: http://www.6502.org/tutorials/6502opcodes.html#JMP
                self.operand_addr = if pointer & 0x00FF == 0x00FF {
                    let low = bus.read(pointer) as u16;
                    let high = bus.read(pointer & 0xFF00) as u16;
                    high << 8 | low
                } else {
                    bus.read16(pointer)
                };
                self.operand_value = bus.read(self.operand_addr);
            }
            AddressMode::IndexedIndirect => {
                let pointer = self.fetch(bus).wrapping_add(self.x);
                self.operand_addr = self.zero_page_read16(bus, pointer);
                self.operand_value = bus.read(self.operand_addr);
            }
            AddressMode::IndirectIndexed => {
                let pointer = self.fetch(bus);
                self.operand_addr = self
                    .zero_page_read16(bus, pointer)
                    .wrapping_add(self.y as u16);
                self.operand_value = bus.read(self.operand_addr);
            }
        }

        self.mode = mode;
    }

    // 16-bit read whose second byte wraps within the zero page.
    fn zero_page_read16(&self, bus: &Bus, pointer: u8) -> u16 {
        let low = bus.read(pointer as u16) as u16;
        let high = bus.read(pointer.wrapping_add(1) as u16) as u16;
        high << 8 | low
    }

    pub(crate) fn operand_value(&self) -> u8 {
        self.operand_value
    }

    pub(crate) fn operand_addr(&self) -> u16 {
        self.operand_addr
    }

    /// Store a transformed operand back through the addressing mode the
    /// instruction came in with.
    pub(crate) fn write_operand(&mut self, bus: &Bus, value: u8) {
        match self.mode {
            AddressMode::Accumulator => self.a = value,
            AddressMode::Implicit | AddressMode::Immediate | AddressMode::Relative => {}
            _ => bus.write(self.operand_addr, value),
        }
    }

    pub(crate) fn push(&mut self, bus: &Bus, value: u8) {
        bus.write(STACK_BASE | self.sp as u16, value);
        self.sp = self.sp.wrapping_sub(1);
    }

    pub(crate) fn pop(&mut self, bus: &Bus) -> u8 {
        self.sp = self.sp.wrapping_add(1);
        bus.read(STACK_BASE | self.sp as u16)
    }

    // 16-bit values go on the stack high byte first, so they pop back
    // low then high and sit big-end-up in memory.
    pub(crate) fn push16(&mut self, bus: &Bus, value: u16) {
        self.push(bus, (value >> 8) as u8);
        self.push(bus, (value & 0x00FF) as u8);
    }

    pub(crate) fn pop16(&mut self, bus: &Bus) -> u16 {
        let low = self.pop(bus) as u16;
        let high = self.pop(bus) as u16;
        high << 8 | low
    }

    /// Relative branch: taking it costs one extra cycle and keeps the
    /// page-cross penalty armed; not taking it disarms the penalty.
    pub(crate) fn branch_if(&mut self, condition: bool) {
        if condition {
            let offset = self.operand_value as i8;
            self.pc = self.pc.wrapping_add(offset as u16);
            self.cycles += 1;
        } else {
            self.cross_page_armed = false;
        }
    }

    /// Register-minus-operand comparison: carry from the 9-bit
    /// subtraction, zero/negative from the truncated result.
    pub(crate) fn compare(&mut self, register: u8, value: u8) {
        self.status.set(Status::CARRY, register >= value);
        self.update_zero_negative(register.wrapping_sub(value));
    }

    pub(crate) fn update_zero_negative(&mut self, result: u8) {
        self.status.set(Status::ZERO, result == 0);
        self.status.set(Status::NEGATIVE, result & 0x80 != 0);
    }

    pub(crate) fn halt(&mut self) {
        self.halted = true;
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ram::Ram;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn cpu_and_bus() -> (Cpu, Bus) {
        let mut bus = Bus::new();
        bus.attach_cpu(Rc::new(RefCell::new(Ram::new())));
        let cpu = Cpu::new(&bus);
        (cpu, bus)
    }

    #[test]
    fn test_stack_byte_order() {
        let (mut cpu, bus) = cpu_and_bus();
        cpu.sp = 0xFD;

        cpu.push16(&bus, 0x1234);

        // Big-end-up in memory: high byte at the higher address.
        assert_eq!(bus.read(0x01FD), 0x12);
        assert_eq!(bus.read(0x01FC), 0x34);
        assert_eq!(cpu.sp, 0xFB);

        assert_eq!(cpu.pop16(&bus), 0x1234);
        assert_eq!(cpu.sp, 0xFD);
    }

    #[test]
    fn test_push_pre_decrements_pop_post_increments() {
        let (mut cpu, bus) = cpu_and_bus();
        cpu.sp = 0x80;

        cpu.push(&bus, 0xAB);
        assert_eq!(bus.read(0x0180), 0xAB);
        assert_eq!(cpu.sp, 0x7F);

        assert_eq!(cpu.pop(&bus), 0xAB);
        assert_eq!(cpu.sp, 0x80);
    }

    #[test]
    fn test_power_on_state() {
        let (cpu, _bus) = cpu_and_bus();

        assert_eq!(cpu.sp, 0xFD);
        assert_eq!(cpu.status.bits(), 0x34);
        assert_eq!((cpu.a, cpu.x, cpu.y), (0, 0, 0));
    }

    #[test]
    fn test_reset_adds_eight_cycles() {
        let (mut cpu, bus) = cpu_and_bus();
        cpu.reset(&bus);

        assert_eq!(cpu.cycles_remaining(), 8);
        assert_eq!(cpu.status, Status::empty());
        assert_eq!(cpu.sp, 0xFD);
    }

    #[test]
    fn test_zero_page_indexed_wraps() {
        let (mut cpu, bus) = cpu_and_bus();

        bus.write(0x0200, 0xF0); // operand byte
        cpu.pc = 0x0200;
        cpu.x = 0x20;
        cpu.prepare_operand(AddressMode::ZeroPageX, &bus);

        // $F0 + $20 wraps to $10 within the zero page.
        assert_eq!(cpu.operand_addr(), 0x0010);
    }

    #[test]
    fn test_indexed_indirect_pointer_wraps() {
        let (mut cpu, bus) = cpu_and_bus();

        bus.write(0x0020, 0xFF); // operand byte
        bus.write(0x00FF, 0x34);
        bus.write(0x0000, 0x12); // pointer high wraps to $00

        cpu.pc = 0x0020;
        cpu.x = 0;
        cpu.prepare_operand(AddressMode::IndexedIndirect, &bus);

        assert_eq!(cpu.operand_addr(), 0x1234);
    }

    #[test]
    fn test_indirect_indexed_adds_y_after() {
        let (mut cpu, bus) = cpu_and_bus();

        bus.write(0x0020, 0x40); // operand byte
        bus.write(0x0040, 0x00);
        bus.write(0x0041, 0x10);

        cpu.pc = 0x0020;
        cpu.y = 0x05;
        cpu.prepare_operand(AddressMode::IndirectIndexed, &bus);

        assert_eq!(cpu.operand_addr(), 0x1005);
    }
}
