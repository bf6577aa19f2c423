//! Static disassembly of PRG bytes, decoded once at load time into an
//! ordered map so debug views can page around any address.

use std::collections::BTreeMap;
use std::ops::Bound::{Excluded, Unbounded};

use crate::cpu::instructions::{AddressMode, INSTRUCTION_TABLE};

const PADDING_LINE: &str = "$????: ???";

#[derive(Default)]
pub struct Disassembler {
    assembly: BTreeMap<u16, String>,
}

impl Disassembler {
    pub fn new() -> Self {
        Disassembler {
            assembly: BTreeMap::new(),
        }
    }

    /// Decode `prg` sequentially, recording one line per instruction
    /// keyed by its address starting at `base`.
    pub fn index(&mut self, prg: &[u8], base: u16) {
        let mut offset = 0usize;
        while offset < prg.len() {
            let (text, consumed) = decode_one(&prg[offset..]);
            self.assembly.insert(base.wrapping_add(offset as u16), text);
            offset += consumed;
        }
    }

    /// `2n + 1` formatted lines centered on `addr`; ends with no known
    /// instruction are padded.
    pub fn get(&self, addr: u16, n: u16) -> Vec<String> {
        let n = n as usize;
        let mut lines = vec![PADDING_LINE.to_string(); 2 * n + 1];

        lines[n] = match self.assembly.get(&addr) {
            Some(text) => format!("${:04X}: {}", addr, text),
            None => format!("${:04X}: ???", addr),
        };

        for (slot, (line_addr, text)) in lines
            .iter_mut()
            .skip(n + 1)
            .zip(self.assembly.range((Excluded(addr), Unbounded)))
        {
            *slot = format!("${:04X}: {}", line_addr, text);
        }

        for (i, (line_addr, text)) in self.assembly.range(..addr).rev().take(n).enumerate() {
            lines[n - 1 - i] = format!("${:04X}: {}", line_addr, text);
        }

        lines
    }
}

/// Decode a single instruction at the head of `mem`, returning its text
/// and the number of bytes consumed. Operand bytes cut off by the end
/// of the slice render as `??`.
fn decode_one(mem: &[u8]) -> (String, usize) {
    let instruction = &INSTRUCTION_TABLE[mem[0] as usize];
    let name = instruction.name;

    let a = match mem.get(1) {
        Some(byte) => format!("{:02X}", byte),
        None => "??".to_string(),
    };
    let b = match mem.get(2) {
        Some(byte) => format!("{:02X}", byte),
        None => "??".to_string(),
    };

    let (text, length) = match instruction.mode {
        AddressMode::Implicit => (name.to_string(), 1),
        AddressMode::Accumulator => (format!("{} A", name), 1),
        AddressMode::Immediate => (format!("{} #${}", name, a), 2),
        AddressMode::ZeroPage => (format!("{} ${}", name, a), 2),
        AddressMode::ZeroPageX => (format!("{} ${},X", name, a), 2),
        AddressMode::ZeroPageY => (format!("{} ${},Y", name, a), 2),
        AddressMode::Relative => {
            let offset = match mem.get(1) {
                Some(&byte) => format!("{:+}", byte as i8),
                None => "??".to_string(),
            };
            (format!("{} {}", name, offset), 2)
        }
        AddressMode::Absolute => (format!("{} ${}{}", name, b, a), 3),
        AddressMode::AbsoluteX => (format!("{} ${}{},X", name, b, a), 3),
        AddressMode::AbsoluteY => (format!("{} ${}{},Y", name, b, a), 3),
        AddressMode::Indirect => (format!("{} (${}{})", name, b, a), 3),
        AddressMode::IndexedIndirect => (format!("{} (${},X)", name, a), 2),
        AddressMode::IndirectIndexed => (format!("{} (${}),Y", name, a), 2),
    };

    (text, length.min(mem.len()))
}
