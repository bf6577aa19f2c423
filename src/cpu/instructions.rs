//! The 6502 instruction set: one executor function per mnemonic and
//! the 256-entry decode table tying opcodes to executors, addressing
//! modes and cycle costs.
//!
//! Reference (official): <https://www.nesdev.org/obelisk-6502-guide/reference.html>
//! Reference (unofficial): <https://www.oxyron.de/html/opcodes02.html>

use lazy_static::lazy_static;
use log::{error, warn};

use crate::bus::Bus;
use crate::common::IRQ_VECTOR;
use crate::cpu::{Cpu, Status};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressMode {
    Implicit,
    Accumulator,
    Immediate,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    Relative,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    Indirect,
    IndexedIndirect,
    IndirectIndexed,
}

/// One decode-table entry. Executors are plain functions over the CPU
/// and bus; the operand latch has already been filled when they run.
pub struct Instruction {
    pub exec: fn(&mut Cpu, &Bus),
    pub name: &'static str,
    pub mode: AddressMode,
    pub cycles: u8,
    pub cross_page_penalty: bool,
}

// ---------------------------------------------------------------- ALU

fn add_with_carry(cpu: &mut Cpu, value: u8) {
    let carry = cpu.status.contains(Status::CARRY) as u16;
    let sum = cpu.a as u16 + value as u16 + carry;
    let result = sum as u8;

    cpu.status.set(Status::CARRY, sum > 0xFF);
    // Signed overflow: both operands share a sign the result lacks.
    cpu.status
        .set(Status::OVERFLOW, (cpu.a ^ result) & (value ^ result) & 0x80 != 0);

    cpu.a = result;
    cpu.update_zero_negative(result);
}

fn subtract_with_borrow(cpu: &mut Cpu, value: u8) {
    let borrow = 1 - cpu.status.contains(Status::CARRY) as u16;
    let diff = (cpu.a as u16)
        .wrapping_sub(value as u16)
        .wrapping_sub(borrow);
    let result = diff as u8;

    // Carry set when the 9-bit subtraction does not borrow.
    cpu.status.set(Status::CARRY, diff < 0x100);
    cpu.status
        .set(Status::OVERFLOW, (cpu.a ^ value) & (cpu.a ^ result) & 0x80 != 0);

    cpu.a = result;
    cpu.update_zero_negative(result);
}

fn adc(cpu: &mut Cpu, _bus: &Bus) {
    add_with_carry(cpu, cpu.operand_value());
}

fn sbc(cpu: &mut Cpu, _bus: &Bus) {
    subtract_with_borrow(cpu, cpu.operand_value());
}

fn and(cpu: &mut Cpu, _bus: &Bus) {
    cpu.a &= cpu.operand_value();
    cpu.update_zero_negative(cpu.a);
}

fn ora(cpu: &mut Cpu, _bus: &Bus) {
    cpu.a |= cpu.operand_value();
    cpu.update_zero_negative(cpu.a);
}

fn eor(cpu: &mut Cpu, _bus: &Bus) {
    cpu.a ^= cpu.operand_value();
    cpu.update_zero_negative(cpu.a);
}

fn bit(cpu: &mut Cpu, _bus: &Bus) {
    let value = cpu.operand_value();
    cpu.status.set(Status::ZERO, value & cpu.a == 0);
    cpu.status.set(Status::OVERFLOW, value & 0x40 != 0);
    cpu.status.set(Status::NEGATIVE, value & 0x80 != 0);
}

fn cmp(cpu: &mut Cpu, _bus: &Bus) {
    cpu.compare(cpu.a, cpu.operand_value());
}

fn cpx(cpu: &mut Cpu, _bus: &Bus) {
    cpu.compare(cpu.x, cpu.operand_value());
}

fn cpy(cpu: &mut Cpu, _bus: &Bus) {
    cpu.compare(cpu.y, cpu.operand_value());
}

// ---------------------------------------------------- shifts, rotates

fn asl(cpu: &mut Cpu, bus: &Bus) {
    let value = cpu.operand_value();
    cpu.status.set(Status::CARRY, value >> 7 == 1);
    let result = value << 1;
    cpu.update_zero_negative(result);
    cpu.write_operand(bus, result);
}

fn lsr(cpu: &mut Cpu, bus: &Bus) {
    let value = cpu.operand_value();
    cpu.status.set(Status::CARRY, value & 1 == 1);
    let result = value >> 1;
    cpu.update_zero_negative(result);
    cpu.write_operand(bus, result);
}

fn rol(cpu: &mut Cpu, bus: &Bus) {
    let value = cpu.operand_value();
    let carry_in = cpu.status.contains(Status::CARRY) as u8;
    cpu.status.set(Status::CARRY, value >> 7 == 1);
    let result = value << 1 | carry_in;
    cpu.update_zero_negative(result);
    cpu.write_operand(bus, result);
}

fn ror(cpu: &mut Cpu, bus: &Bus) {
    let value = cpu.operand_value();
    let carry_in = cpu.status.contains(Status::CARRY) as u8;
    cpu.status.set(Status::CARRY, value & 1 == 1);
    let result = value >> 1 | carry_in << 7;
    cpu.update_zero_negative(result);
    cpu.write_operand(bus, result);
}

// -------------------------------------------------- memory increments

fn inc(cpu: &mut Cpu, bus: &Bus) {
    let result = cpu.operand_value().wrapping_add(1);
    cpu.update_zero_negative(result);
    cpu.write_operand(bus, result);
}

fn dec(cpu: &mut Cpu, bus: &Bus) {
    let result = cpu.operand_value().wrapping_sub(1);
    cpu.update_zero_negative(result);
    cpu.write_operand(bus, result);
}

fn inx(cpu: &mut Cpu, _bus: &Bus) {
    cpu.x = cpu.x.wrapping_add(1);
    cpu.update_zero_negative(cpu.x);
}

fn dex(cpu: &mut Cpu, _bus: &Bus) {
    cpu.x = cpu.x.wrapping_sub(1);
    cpu.update_zero_negative(cpu.x);
}

fn iny(cpu: &mut Cpu, _bus: &Bus) {
    cpu.y = cpu.y.wrapping_add(1);
    cpu.update_zero_negative(cpu.y);
}

fn dey(cpu: &mut Cpu, _bus: &Bus) {
    cpu.y = cpu.y.wrapping_sub(1);
    cpu.update_zero_negative(cpu.y);
}

// ----------------------------------------------------------- branches

fn bcc(cpu: &mut Cpu, _bus: &Bus) {
    cpu.branch_if(!cpu.status.contains(Status::CARRY));
}

fn bcs(cpu: &mut Cpu, _bus: &Bus) {
    cpu.branch_if(cpu.status.contains(Status::CARRY));
}

fn bne(cpu: &mut Cpu, _bus: &Bus) {
    cpu.branch_if(!cpu.status.contains(Status::ZERO));
}

fn beq(cpu: &mut Cpu, _bus: &Bus) {
    cpu.branch_if(cpu.status.contains(Status::ZERO));
}

fn bpl(cpu: &mut Cpu, _bus: &Bus) {
    cpu.branch_if(!cpu.status.contains(Status::NEGATIVE));
}

fn bmi(cpu: &mut Cpu, _bus: &Bus) {
    cpu.branch_if(cpu.status.contains(Status::NEGATIVE));
}

fn bvc(cpu: &mut Cpu, _bus: &Bus) {
    cpu.branch_if(!cpu.status.contains(Status::OVERFLOW));
}

fn bvs(cpu: &mut Cpu, _bus: &Bus) {
    cpu.branch_if(cpu.status.contains(Status::OVERFLOW));
}

// ------------------------------------------------- jumps, interrupts

fn jmp(cpu: &mut Cpu, _bus: &Bus) {
    cpu.pc = cpu.operand_addr();
}

fn jsr(cpu: &mut Cpu, bus: &Bus) {
    // The saved pc points at the last byte of the JSR operand; RTS
    // compensates with its post-increment.
    cpu.push16(bus, cpu.pc.wrapping_sub(1));
    cpu.pc = cpu.operand_addr();
}

fn rts(cpu: &mut Cpu, bus: &Bus) {
    cpu.pc = cpu.pop16(bus).wrapping_add(1);
}

fn rti(cpu: &mut Cpu, bus: &Bus) {
    pull_status(cpu, bus);
    cpu.pc = cpu.pop16(bus);
}

fn brk(cpu: &mut Cpu, bus: &Bus) {
    if cpu.status.contains(Status::IRQ_DISABLE) {
        return;
    }

    cpu.push16(bus, cpu.pc);
    cpu.push(bus, (cpu.status | Status::BREAK | Status::UNUSED).bits());
    cpu.pc = bus.read16(IRQ_VECTOR);
    cpu.status.insert(Status::BREAK);
    cpu.status.insert(Status::IRQ_DISABLE);
}

// -------------------------------------------------------- flag writes

fn clc(cpu: &mut Cpu, _bus: &Bus) {
    cpu.status.remove(Status::CARRY);
}

fn sec(cpu: &mut Cpu, _bus: &Bus) {
    cpu.status.insert(Status::CARRY);
}

fn cli(cpu: &mut Cpu, _bus: &Bus) {
    cpu.status.remove(Status::IRQ_DISABLE);
}

fn sei(cpu: &mut Cpu, _bus: &Bus) {
    cpu.status.insert(Status::IRQ_DISABLE);
}

fn clv(cpu: &mut Cpu, _bus: &Bus) {
    cpu.status.remove(Status::OVERFLOW);
}

fn cld(cpu: &mut Cpu, _bus: &Bus) {
    cpu.status.remove(Status::DECIMAL);
}

fn sed(cpu: &mut Cpu, _bus: &Bus) {
    cpu.status.insert(Status::DECIMAL);
}

// ----------------------------------------------------- loads, stores

fn lda(cpu: &mut Cpu, _bus: &Bus) {
    cpu.a = cpu.operand_value();
    cpu.update_zero_negative(cpu.a);
}

fn ldx(cpu: &mut Cpu, _bus: &Bus) {
    cpu.x = cpu.operand_value();
    cpu.update_zero_negative(cpu.x);
}

fn ldy(cpu: &mut Cpu, _bus: &Bus) {
    cpu.y = cpu.operand_value();
    cpu.update_zero_negative(cpu.y);
}

fn sta(cpu: &mut Cpu, bus: &Bus) {
    cpu.write_operand(bus, cpu.a);
}

fn stx(cpu: &mut Cpu, bus: &Bus) {
    cpu.write_operand(bus, cpu.x);
}

fn sty(cpu: &mut Cpu, bus: &Bus) {
    cpu.write_operand(bus, cpu.y);
}

// ------------------------------------------------ transfers and stack

fn tax(cpu: &mut Cpu, _bus: &Bus) {
    cpu.x = cpu.a;
    cpu.update_zero_negative(cpu.x);
}

fn tay(cpu: &mut Cpu, _bus: &Bus) {
    cpu.y = cpu.a;
    cpu.update_zero_negative(cpu.y);
}

fn txa(cpu: &mut Cpu, _bus: &Bus) {
    cpu.a = cpu.x;
    cpu.update_zero_negative(cpu.a);
}

fn tya(cpu: &mut Cpu, _bus: &Bus) {
    cpu.a = cpu.y;
    cpu.update_zero_negative(cpu.a);
}

fn tsx(cpu: &mut Cpu, _bus: &Bus) {
    cpu.x = cpu.sp;
    cpu.update_zero_negative(cpu.x);
}

// TXS is the one transfer that leaves the flags alone.
fn txs(cpu: &mut Cpu, _bus: &Bus) {
    cpu.sp = cpu.x;
}

fn pha(cpu: &mut Cpu, bus: &Bus) {
    cpu.push(bus, cpu.a);
}

fn pla(cpu: &mut Cpu, bus: &Bus) {
    cpu.a = cpu.pop(bus);
    cpu.update_zero_negative(cpu.a);
}

fn php(cpu: &mut Cpu, bus: &Bus) {
    // Bit 5 reads as 1 on pushes.
    cpu.push(bus, (cpu.status | Status::UNUSED).bits());
}

fn plp(cpu: &mut Cpu, bus: &Bus) {
    pull_status(cpu, bus);
}

fn pull_status(cpu: &mut Cpu, bus: &Bus) {
    cpu.status = Status::from_bits_retain(cpu.pop(bus)) | Status::UNUSED;
}

fn nop(_cpu: &mut Cpu, _bus: &Bus) {}

// --------------------------------------------------- illegal opcodes

fn lax(cpu: &mut Cpu, _bus: &Bus) {
    let value = cpu.operand_value();
    cpu.a = value;
    cpu.x = value;
    cpu.update_zero_negative(value);
}

fn sax(cpu: &mut Cpu, bus: &Bus) {
    cpu.write_operand(bus, cpu.a & cpu.x);
}

fn dcp(cpu: &mut Cpu, bus: &Bus) {
    let result = cpu.operand_value().wrapping_sub(1);
    cpu.write_operand(bus, result);
    cpu.compare(cpu.a, result);
}

fn isc(cpu: &mut Cpu, bus: &Bus) {
    let result = cpu.operand_value().wrapping_add(1);
    cpu.write_operand(bus, result);
    subtract_with_borrow(cpu, result);
}

fn slo(cpu: &mut Cpu, bus: &Bus) {
    let value = cpu.operand_value();
    cpu.status.set(Status::CARRY, value >> 7 == 1);
    let result = value << 1;
    cpu.write_operand(bus, result);
    cpu.a |= result;
    cpu.update_zero_negative(cpu.a);
}

fn rla(cpu: &mut Cpu, bus: &Bus) {
    let value = cpu.operand_value();
    let carry_in = cpu.status.contains(Status::CARRY) as u8;
    cpu.status.set(Status::CARRY, value >> 7 == 1);
    let result = value << 1 | carry_in;
    cpu.write_operand(bus, result);
    cpu.a &= result;
    cpu.update_zero_negative(cpu.a);
}

fn sre(cpu: &mut Cpu, bus: &Bus) {
    let value = cpu.operand_value();
    cpu.status.set(Status::CARRY, value & 1 == 1);
    let result = value >> 1;
    cpu.write_operand(bus, result);
    cpu.a ^= result;
    cpu.update_zero_negative(cpu.a);
}

fn rra(cpu: &mut Cpu, bus: &Bus) {
    let value = cpu.operand_value();
    let carry_in = cpu.status.contains(Status::CARRY) as u8;
    cpu.status.set(Status::CARRY, value & 1 == 1);
    let result = value >> 1 | carry_in << 7;
    cpu.write_operand(bus, result);
    add_with_carry(cpu, result);
}

fn kil(cpu: &mut Cpu, _bus: &Bus) {
    error!("cpu: KIL opcode executed, halting");
    cpu.halt();
}

// The unstable ones (AHX, ALR, ANC, ARR, AXS, LAS, SHX, SHY, TAS,
// XAA) are accepted but have no effect.
fn unsupported(_cpu: &mut Cpu, _bus: &Bus) {
    warn!("cpu: unsupported opcode executed, treating as NOP");
}

macro_rules! instruction {
    ($name:literal, $exec:ident, $mode:ident, $cycles:literal, $penalty:literal) => {
        Instruction {
            exec: $exec,
            name: $name,
            mode: AddressMode::$mode,
            cycles: $cycles,
            cross_page_penalty: $penalty,
        }
    };
}

lazy_static! {
    /// All 256 opcodes in numeric order. Undocumented entries keep their
    /// conventional mnemonics.
    pub static ref INSTRUCTION_TABLE: [Instruction; 256] = [
        // 0x00
        instruction!("BRK", brk, Implicit, 7, false),
        instruction!("ORA", ora, IndexedIndirect, 6, false),
        instruction!("KIL", kil, Implicit, 0, false),
        instruction!("SLO", slo, IndexedIndirect, 8, false),
        instruction!("NOP", nop, ZeroPage, 3, false),
        instruction!("ORA", ora, ZeroPage, 3, false),
        instruction!("ASL", asl, ZeroPage, 5, false),
        instruction!("SLO", slo, ZeroPage, 5, false),
        instruction!("PHP", php, Implicit, 3, false),
        instruction!("ORA", ora, Immediate, 2, false),
        instruction!("ASL", asl, Accumulator, 2, false),
        instruction!("ANC", unsupported, Immediate, 2, false),
        instruction!("NOP", nop, Absolute, 4, false),
        instruction!("ORA", ora, Absolute, 4, false),
        instruction!("ASL", asl, Absolute, 6, false),
        instruction!("SLO", slo, Absolute, 6, false),
        // 0x10
        instruction!("BPL", bpl, Relative, 2, true),
        instruction!("ORA", ora, IndirectIndexed, 5, true),
        instruction!("KIL", kil, Implicit, 0, false),
        instruction!("SLO", slo, IndirectIndexed, 8, false),
        instruction!("NOP", nop, ZeroPageX, 4, false),
        instruction!("ORA", ora, ZeroPageX, 4, false),
        instruction!("ASL", asl, ZeroPageX, 6, false),
        instruction!("SLO", slo, ZeroPageX, 6, false),
        instruction!("CLC", clc, Implicit, 2, false),
        instruction!("ORA", ora, AbsoluteY, 4, true),
        instruction!("NOP", nop, Implicit, 2, false),
        instruction!("SLO", slo, AbsoluteY, 7, false),
        instruction!("NOP", nop, AbsoluteX, 4, true),
        instruction!("ORA", ora, AbsoluteX, 4, true),
        instruction!("ASL", asl, AbsoluteX, 7, false),
        instruction!("SLO", slo, AbsoluteX, 7, false),
        // 0x20
        instruction!("JSR", jsr, Absolute, 6, false),
        instruction!("AND", and, IndexedIndirect, 6, false),
        instruction!("KIL", kil, Implicit, 0, false),
        instruction!("RLA", rla, IndexedIndirect, 8, false),
        instruction!("BIT", bit, ZeroPage, 3, false),
        instruction!("AND", and, ZeroPage, 3, false),
        instruction!("ROL", rol, ZeroPage, 5, false),
        instruction!("RLA", rla, ZeroPage, 5, false),
        instruction!("PLP", plp, Implicit, 4, false),
        instruction!("AND", and, Immediate, 2, false),
        instruction!("ROL", rol, Accumulator, 2, false),
        instruction!("ANC", unsupported, Immediate, 2, false),
        instruction!("BIT", bit, Absolute, 4, false),
        instruction!("AND", and, Absolute, 4, false),
        instruction!("ROL", rol, Absolute, 6, false),
        instruction!("RLA", rla, Absolute, 6, false),
        // 0x30
        instruction!("BMI", bmi, Relative, 2, true),
        instruction!("AND", and, IndirectIndexed, 5, true),
        instruction!("KIL", kil, Implicit, 0, false),
        instruction!("RLA", rla, IndirectIndexed, 8, false),
        instruction!("NOP", nop, ZeroPageX, 4, false),
        instruction!("AND", and, ZeroPageX, 4, false),
        instruction!("ROL", rol, ZeroPageX, 6, false),
        instruction!("RLA", rla, ZeroPageX, 6, false),
        instruction!("SEC", sec, Implicit, 2, false),
        instruction!("AND", and, AbsoluteY, 4, true),
        instruction!("NOP", nop, Implicit, 2, false),
        instruction!("RLA", rla, AbsoluteY, 7, false),
        instruction!("NOP", nop, AbsoluteX, 4, true),
        instruction!("AND", and, AbsoluteX, 4, true),
        instruction!("ROL", rol, AbsoluteX, 7, false),
        instruction!("RLA", rla, AbsoluteX, 7, false),
        // 0x40
        instruction!("RTI", rti, Implicit, 6, false),
        instruction!("EOR", eor, IndexedIndirect, 6, false),
        instruction!("KIL", kil, Implicit, 0, false),
        instruction!("SRE", sre, IndexedIndirect, 8, false),
        instruction!("NOP", nop, ZeroPage, 3, false),
        instruction!("EOR", eor, ZeroPage, 3, false),
        instruction!("LSR", lsr, ZeroPage, 5, false),
        instruction!("SRE", sre, ZeroPage, 5, false),
        instruction!("PHA", pha, Implicit, 3, false),
        instruction!("EOR", eor, Immediate, 2, false),
        instruction!("LSR", lsr, Accumulator, 2, false),
        instruction!("ALR", unsupported, Immediate, 2, false),
        instruction!("JMP", jmp, Absolute, 3, false),
        instruction!("EOR", eor, Absolute, 4, false),
        instruction!("LSR", lsr, Absolute, 6, false),
        instruction!("SRE", sre, Absolute, 6, false),
        // 0x50
        instruction!("BVC", bvc, Relative, 2, true),
        instruction!("EOR", eor, IndirectIndexed, 5, true),
        instruction!("KIL", kil, Implicit, 0, false),
        instruction!("SRE", sre, IndirectIndexed, 8, false),
        instruction!("NOP", nop, ZeroPageX, 4, false),
        instruction!("EOR", eor, ZeroPageX, 4, false),
        instruction!("LSR", lsr, ZeroPageX, 6, false),
        instruction!("SRE", sre, ZeroPageX, 6, false),
        instruction!("CLI", cli, Implicit, 2, false),
        instruction!("EOR", eor, AbsoluteY, 4, true),
        instruction!("NOP", nop, Implicit, 2, false),
        instruction!("SRE", sre, AbsoluteY, 7, false),
        instruction!("NOP", nop, AbsoluteX, 4, true),
        instruction!("EOR", eor, AbsoluteX, 4, true),
        instruction!("LSR", lsr, AbsoluteX, 7, false),
        instruction!("SRE", sre, AbsoluteX, 7, false),
        // 0x60
        instruction!("RTS", rts, Implicit, 6, false),
        instruction!("ADC", adc, IndexedIndirect, 6, false),
        instruction!("KIL", kil, Implicit, 0, false),
        instruction!("RRA", rra, IndexedIndirect, 8, false),
        instruction!("NOP", nop, ZeroPage, 3, false),
        instruction!("ADC", adc, ZeroPage, 3, false),
        instruction!("ROR", ror, ZeroPage, 5, false),
        instruction!("RRA", rra, ZeroPage, 5, false),
        instruction!("PLA", pla, Implicit, 4, false),
        instruction!("ADC", adc, Immediate, 2, false),
        instruction!("ROR", ror, Accumulator, 2, false),
        instruction!("ARR", unsupported, Immediate, 2, false),
        instruction!("JMP", jmp, Indirect, 5, false),
        instruction!("ADC", adc, Absolute, 4, false),
        instruction!("ROR", ror, Absolute, 6, false),
        instruction!("RRA", rra, Absolute, 6, false),
        // 0x70
        instruction!("BVS", bvs, Relative, 2, true),
        instruction!("ADC", adc, IndirectIndexed, 5, true),
        instruction!("KIL", kil, Implicit, 0, false),
        instruction!("RRA", rra, IndirectIndexed, 8, false),
        instruction!("NOP", nop, ZeroPageX, 4, false),
        instruction!("ADC", adc, ZeroPageX, 4, false),
        instruction!("ROR", ror, ZeroPageX, 6, false),
        instruction!("RRA", rra, ZeroPageX, 6, false),
        instruction!("SEI", sei, Implicit, 2, false),
        instruction!("ADC", adc, AbsoluteY, 4, true),
        instruction!("NOP", nop, Implicit, 2, false),
        instruction!("RRA", rra, AbsoluteY, 7, false),
        instruction!("NOP", nop, AbsoluteX, 4, true),
        instruction!("ADC", adc, AbsoluteX, 4, true),
        instruction!("ROR", ror, AbsoluteX, 7, false),
        instruction!("RRA", rra, AbsoluteX, 7, false),
        // 0x80
        instruction!("NOP", nop, Immediate, 2, false),
        instruction!("STA", sta, IndexedIndirect, 6, false),
        instruction!("NOP", nop, Immediate, 2, false),
        instruction!("SAX", sax, IndexedIndirect, 6, false),
        instruction!("STY", sty, ZeroPage, 3, false),
        instruction!("STA", sta, ZeroPage, 3, false),
        instruction!("STX", stx, ZeroPage, 3, false),
        instruction!("SAX", sax, ZeroPage, 3, false),
        instruction!("DEY", dey, Implicit, 2, false),
        instruction!("NOP", nop, Immediate, 2, false),
        instruction!("TXA", txa, Implicit, 2, false),
        instruction!("XAA", unsupported, Immediate, 2, false),
        instruction!("STY", sty, Absolute, 4, false),
        instruction!("STA", sta, Absolute, 4, false),
        instruction!("STX", stx, Absolute, 4, false),
        instruction!("SAX", sax, Absolute, 4, false),
        // 0x90
        instruction!("BCC", bcc, Relative, 2, true),
        instruction!("STA", sta, IndirectIndexed, 6, false),
        instruction!("KIL", kil, Implicit, 0, false),
        instruction!("AHX", unsupported, IndirectIndexed, 6, false),
        instruction!("STY", sty, ZeroPageX, 4, false),
        instruction!("STA", sta, ZeroPageX, 4, false),
        instruction!("STX", stx, ZeroPageY, 4, false),
        instruction!("SAX", sax, ZeroPageY, 4, false),
        instruction!("TYA", tya, Implicit, 2, false),
        instruction!("STA", sta, AbsoluteY, 5, false),
        instruction!("TXS", txs, Implicit, 2, false),
        instruction!("TAS", unsupported, AbsoluteY, 5, false),
        instruction!("SHY", unsupported, AbsoluteX, 5, false),
        instruction!("STA", sta, AbsoluteX, 5, false),
        instruction!("SHX", unsupported, AbsoluteY, 5, false),
        instruction!("AHX", unsupported, AbsoluteY, 5, false),
        // 0xA0
        instruction!("LDY", ldy, Immediate, 2, false),
        instruction!("LDA", lda, IndexedIndirect, 6, false),
        instruction!("LDX", ldx, Immediate, 2, false),
        instruction!("LAX", lax, IndexedIndirect, 6, false),
        instruction!("LDY", ldy, ZeroPage, 3, false),
        instruction!("LDA", lda, ZeroPage, 3, false),
        instruction!("LDX", ldx, ZeroPage, 3, false),
        instruction!("LAX", lax, ZeroPage, 3, false),
        instruction!("TAY", tay, Implicit, 2, false),
        instruction!("LDA", lda, Immediate, 2, false),
        instruction!("TAX", tax, Implicit, 2, false),
        instruction!("LAX", lax, Immediate, 2, false),
        instruction!("LDY", ldy, Absolute, 4, false),
        instruction!("LDA", lda, Absolute, 4, false),
        instruction!("LDX", ldx, Absolute, 4, false),
        instruction!("LAX", lax, Absolute, 4, false),
        // 0xB0
        instruction!("BCS", bcs, Relative, 2, true),
        instruction!("LDA", lda, IndirectIndexed, 5, true),
        instruction!("KIL", kil, Implicit, 0, false),
        instruction!("LAX", lax, IndirectIndexed, 5, true),
        instruction!("LDY", ldy, ZeroPageX, 4, false),
        instruction!("LDA", lda, ZeroPageX, 4, false),
        instruction!("LDX", ldx, ZeroPageY, 4, false),
        instruction!("LAX", lax, ZeroPageY, 4, false),
        instruction!("CLV", clv, Implicit, 2, false),
        instruction!("LDA", lda, AbsoluteY, 4, true),
        instruction!("TSX", tsx, Implicit, 2, false),
        instruction!("LAS", unsupported, AbsoluteY, 4, true),
        instruction!("LDY", ldy, AbsoluteX, 4, true),
        instruction!("LDA", lda, AbsoluteX, 4, true),
        instruction!("LDX", ldx, AbsoluteY, 4, true),
        instruction!("LAX", lax, AbsoluteY, 4, true),
        // 0xC0
        instruction!("CPY", cpy, Immediate, 2, false),
        instruction!("CMP", cmp, IndexedIndirect, 6, false),
        instruction!("NOP", nop, Immediate, 2, false),
        instruction!("DCP", dcp, IndexedIndirect, 8, false),
        instruction!("CPY", cpy, ZeroPage, 3, false),
        instruction!("CMP", cmp, ZeroPage, 3, false),
        instruction!("DEC", dec, ZeroPage, 5, false),
        instruction!("DCP", dcp, ZeroPage, 5, false),
        instruction!("INY", iny, Implicit, 2, false),
        instruction!("CMP", cmp, Immediate, 2, false),
        instruction!("DEX", dex, Implicit, 2, false),
        instruction!("AXS", unsupported, Immediate, 2, false),
        instruction!("CPY", cpy, Absolute, 4, false),
        instruction!("CMP", cmp, Absolute, 4, false),
        instruction!("DEC", dec, Absolute, 6, false),
        instruction!("DCP", dcp, Absolute, 6, false),
        // 0xD0
        instruction!("BNE", bne, Relative, 2, true),
        instruction!("CMP", cmp, IndirectIndexed, 5, true),
        instruction!("KIL", kil, Implicit, 0, false),
        instruction!("DCP", dcp, IndirectIndexed, 8, false),
        instruction!("NOP", nop, ZeroPageX, 4, false),
        instruction!("CMP", cmp, ZeroPageX, 4, false),
        instruction!("DEC", dec, ZeroPageX, 6, false),
        instruction!("DCP", dcp, ZeroPageX, 6, false),
        instruction!("CLD", cld, Implicit, 2, false),
        instruction!("CMP", cmp, AbsoluteY, 4, true),
        instruction!("NOP", nop, Implicit, 2, false),
        instruction!("DCP", dcp, AbsoluteY, 7, false),
        instruction!("NOP", nop, AbsoluteX, 4, true),
        instruction!("CMP", cmp, AbsoluteX, 4, true),
        instruction!("DEC", dec, AbsoluteX, 7, false),
        instruction!("DCP", dcp, AbsoluteX, 7, false),
        // 0xE0
        instruction!("CPX", cpx, Immediate, 2, false),
        instruction!("SBC", sbc, IndexedIndirect, 6, false),
        instruction!("NOP", nop, Immediate, 2, false),
        instruction!("ISC", isc, IndexedIndirect, 8, false),
        instruction!("CPX", cpx, ZeroPage, 3, false),
        instruction!("SBC", sbc, ZeroPage, 3, false),
        instruction!("INC", inc, ZeroPage, 5, false),
        instruction!("ISC", isc, ZeroPage, 5, false),
        instruction!("INX", inx, Implicit, 2, false),
        instruction!("SBC", sbc, Immediate, 2, false),
        instruction!("NOP", nop, Implicit, 2, false),
        instruction!("SBC", sbc, Immediate, 2, false),
        instruction!("CPX", cpx, Absolute, 4, false),
        instruction!("SBC", sbc, Absolute, 4, false),
        instruction!("INC", inc, Absolute, 6, false),
        instruction!("ISC", isc, Absolute, 6, false),
        // 0xF0
        instruction!("BEQ", beq, Relative, 2, true),
        instruction!("SBC", sbc, IndirectIndexed, 5, true),
        instruction!("KIL", kil, Implicit, 0, false),
        instruction!("ISC", isc, IndirectIndexed, 8, false),
        instruction!("NOP", nop, ZeroPageX, 4, false),
        instruction!("SBC", sbc, ZeroPageX, 4, false),
        instruction!("INC", inc, ZeroPageX, 6, false),
        instruction!("ISC", isc, ZeroPageX, 6, false),
        instruction!("SED", sed, Implicit, 2, false),
        instruction!("SBC", sbc, AbsoluteY, 4, true),
        instruction!("NOP", nop, Implicit, 2, false),
        instruction!("ISC", isc, AbsoluteY, 7, false),
        instruction!("NOP", nop, AbsoluteX, 4, true),
        instruction!("SBC", sbc, AbsoluteX, 4, true),
        instruction!("INC", inc, AbsoluteX, 7, false),
        instruction!("ISC", isc, AbsoluteX, 7, false),
    ];
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_table_covers_every_opcode() {
        assert_eq!(INSTRUCTION_TABLE.len(), 256);
    }

    #[test]
    fn test_documented_entries_spot_check() {
        let lda_imm = &INSTRUCTION_TABLE[0xA9];
        assert_eq!(lda_imm.name, "LDA");
        assert_eq!(lda_imm.mode, AddressMode::Immediate);
        assert_eq!(lda_imm.cycles, 2);
        assert!(!lda_imm.cross_page_penalty);

        let lda_abx = &INSTRUCTION_TABLE[0xBD];
        assert_eq!(lda_abx.mode, AddressMode::AbsoluteX);
        assert!(lda_abx.cross_page_penalty);

        let jmp_ind = &INSTRUCTION_TABLE[0x6C];
        assert_eq!(jmp_ind.name, "JMP");
        assert_eq!(jmp_ind.mode, AddressMode::Indirect);
        assert_eq!(jmp_ind.cycles, 5);
    }

    #[test]
    fn test_every_branch_carries_penalty_flag() {
        for opcode in [0x10, 0x30, 0x50, 0x70, 0x90, 0xB0, 0xD0, 0xF0] {
            let instruction = &INSTRUCTION_TABLE[opcode];
            assert_eq!(instruction.mode, AddressMode::Relative);
            assert_eq!(instruction.cycles, 2);
            assert!(instruction.cross_page_penalty);
        }
    }

    #[test]
    fn test_accumulator_shifts_use_accumulator_mode() {
        for opcode in [0x0A, 0x2A, 0x4A, 0x6A] {
            assert_eq!(INSTRUCTION_TABLE[opcode].mode, AddressMode::Accumulator);
        }
    }
}
