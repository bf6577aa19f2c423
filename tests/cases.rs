//! Data-driven register/flag cases in the style of the SingleStepTests
//! JSON layout: each case gives full initial CPU state plus RAM pairs,
//! runs one instruction, and checks the resulting state.

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::Value;

use nesemu::bus::Bus;
use nesemu::cpu::{Cpu, Status};
use nesemu::ram::Ram;

fn reg(state: &Value, name: &str) -> u64 {
    state[name]
        .as_u64()
        .unwrap_or_else(|| panic!("missing register {}", name))
}

fn run_case(case: &Value) {
    let name = case["name"].as_str().unwrap_or("unnamed");
    let initial = &case["initial"];
    let expected = &case["final"];

    let mut bus = Bus::new();
    bus.attach_cpu(Rc::new(RefCell::new(Ram::new())));
    let mut cpu = Cpu::new(&bus);

    cpu.pc = reg(initial, "pc") as u16;
    cpu.sp = reg(initial, "s") as u8;
    cpu.a = reg(initial, "a") as u8;
    cpu.x = reg(initial, "x") as u8;
    cpu.y = reg(initial, "y") as u8;
    cpu.status = Status::from_bits_retain(reg(initial, "p") as u8);

    for pair in initial["ram"].as_array().expect("initial ram") {
        let addr = pair[0].as_u64().unwrap() as u16;
        let value = pair[1].as_u64().unwrap() as u8;
        bus.write(addr, value);
    }

    cpu.clock(&bus);
    while cpu.cycles_remaining() > 0 {
        cpu.clock(&bus);
    }

    assert_eq!(cpu.pc, reg(expected, "pc") as u16, "{}: pc", name);
    assert_eq!(cpu.sp, reg(expected, "s") as u8, "{}: s", name);
    assert_eq!(cpu.a, reg(expected, "a") as u8, "{}: a", name);
    assert_eq!(cpu.x, reg(expected, "x") as u8, "{}: x", name);
    assert_eq!(cpu.y, reg(expected, "y") as u8, "{}: y", name);
    assert_eq!(cpu.status.bits(), reg(expected, "p") as u8, "{}: p", name);

    for pair in expected["ram"].as_array().expect("final ram") {
        let addr = pair[0].as_u64().unwrap() as u16;
        let value = pair[1].as_u64().unwrap() as u8;
        assert_eq!(bus.read(addr), value, "{}: ram[{:#06X}]", name, addr);
    }
}

fn run_file(file: &str) {
    let path = format!("tests/cases/{}", file);
    let text = std::fs::read_to_string(&path).unwrap_or_else(|_| panic!("cannot read {}", path));
    let cases: Value = serde_json::from_str(&text).expect("malformed case file");

    for case in cases.as_array().expect("top-level array") {
        run_case(case);
    }
}

#[test]
fn alu_cases() {
    run_file("alu.json");
}

#[test]
fn control_cases() {
    run_file("control.json");
}
