//! The system bus: routes CPU and PPU accesses to whichever attached
//! device claims the address.
//!
//! Reference: <https://www.nesdev.org/wiki/CPU_memory_map>

use std::cell::RefCell;
use std::rc::Rc;

use log::warn;

/// A device reachable from the CPU address space. `read`/`write` return
/// whether the device claimed the address; unclaimed accesses fall
/// through to the next attachment.
pub trait CpuBusDevice {
    fn reset(&mut self);

    fn read(&mut self, addr: u16) -> Option<u8>;
    fn write(&mut self, addr: u16, value: u8) -> bool;
}

/// A device reachable from the PPU address space (pattern tables live
/// on the cartridge, so CHR access goes through here).
pub trait PpuBusDevice {
    fn reset(&mut self);

    fn ppu_read(&mut self, addr: u16) -> Option<u8>;
    fn ppu_write(&mut self, addr: u16, value: u8) -> bool;
}

/// Two ordered attachment lists, one per bus face. Devices are attached
/// once at power-on; dispatch only needs `&self` since every device sits
/// behind its own `RefCell`.
#[derive(Default)]
pub struct Bus {
    cpu_devices: Vec<Rc<RefCell<dyn CpuBusDevice>>>,
    ppu_devices: Vec<Rc<RefCell<dyn PpuBusDevice>>>,
}

impl Bus {
    pub fn new() -> Self {
        Bus::default()
    }

    pub fn attach_cpu(&mut self, device: Rc<RefCell<dyn CpuBusDevice>>) {
        self.cpu_devices.push(device);
    }

    pub fn attach_ppu(&mut self, device: Rc<RefCell<dyn PpuBusDevice>>) {
        self.ppu_devices.push(device);
    }

    pub fn reset(&self) {
        for device in &self.cpu_devices {
            device.borrow_mut().reset();
        }
        for device in &self.ppu_devices {
            device.borrow_mut().reset();
        }
    }

    /// Consult attachments in order; the first hit wins. A miss is
    /// logged and reads as zero.
    pub fn read(&self, addr: u16) -> u8 {
        for device in &self.cpu_devices {
            if let Some(value) = device.borrow_mut().read(addr) {
                return value;
            }
        }

        warn!("bus: read from unattached address {:#06X}", addr);
        0
    }

    /// Offer the write to every attachment, so aliased devices all see
    /// it. A write nobody claims is logged and dropped.
    pub fn write(&self, addr: u16, value: u8) {
        let mut hit = false;
        for device in &self.cpu_devices {
            if device.borrow_mut().write(addr, value) {
                hit = true;
            }
        }

        if !hit {
            warn!("bus: write to unattached address {:#06X}", addr);
        }
    }

    pub fn read16(&self, addr: u16) -> u16 {
        let low = self.read(addr) as u16;
        let high = self.read(addr.wrapping_add(1)) as u16;
        high << 8 | low
    }

    pub fn write16(&self, addr: u16, value: u16) {
        self.write(addr, (value & 0x00FF) as u8);
        self.write(addr.wrapping_add(1), (value >> 8) as u8);
    }

    pub fn ppu_read(&self, addr: u16) -> u8 {
        for device in &self.ppu_devices {
            if let Some(value) = device.borrow_mut().ppu_read(addr) {
                return value;
            }
        }

        warn!("bus: PPU read from unattached address {:#06X}", addr);
        0
    }

    pub fn ppu_write(&self, addr: u16, value: u8) {
        let mut hit = false;
        for device in &self.ppu_devices {
            if device.borrow_mut().ppu_write(addr, value) {
                hit = true;
            }
        }

        if !hit {
            warn!("bus: PPU write to unattached address {:#06X}", addr);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    /// A fixed-value device claiming a single address.
    struct Stub {
        claims: u16,
        value: u8,
        last_write: Option<u8>,
        resets: u32,
    }

    impl Stub {
        fn new(claims: u16, value: u8) -> Self {
            Stub { claims, value, last_write: None, resets: 0 }
        }
    }

    impl CpuBusDevice for Stub {
        fn reset(&mut self) {
            self.resets += 1;
        }

        fn read(&mut self, addr: u16) -> Option<u8> {
            (addr == self.claims).then_some(self.value)
        }

        fn write(&mut self, addr: u16, value: u8) -> bool {
            if addr == self.claims {
                self.last_write = Some(value);
                true
            } else {
                false
            }
        }
    }

    #[test]
    fn test_first_read_hit_wins() {
        let first = Rc::new(RefCell::new(Stub::new(0x0040, 0xAA)));
        let second = Rc::new(RefCell::new(Stub::new(0x0040, 0xBB)));

        let mut bus = Bus::new();
        bus.attach_cpu(first);
        bus.attach_cpu(second);

        assert_eq!(bus.read(0x0040), 0xAA);
    }

    #[test]
    fn test_write_offered_to_every_device() {
        let first = Rc::new(RefCell::new(Stub::new(0x0040, 0)));
        let second = Rc::new(RefCell::new(Stub::new(0x0040, 0)));

        let mut bus = Bus::new();
        bus.attach_cpu(first.clone());
        bus.attach_cpu(second.clone());

        bus.write(0x0040, 0x5A);
        assert_eq!(first.borrow().last_write, Some(0x5A));
        assert_eq!(second.borrow().last_write, Some(0x5A));
    }

    #[test]
    fn test_miss_reads_zero() {
        let stub = Rc::new(RefCell::new(Stub::new(0x0040, 0xAA)));

        let mut bus = Bus::new();
        bus.attach_cpu(stub);

        assert_eq!(bus.read(0x1234), 0);
    }

    #[test]
    fn test_read16_is_little_endian() {
        let low = Rc::new(RefCell::new(Stub::new(0x0010, 0x34)));
        let high = Rc::new(RefCell::new(Stub::new(0x0011, 0x12)));

        let mut bus = Bus::new();
        bus.attach_cpu(low);
        bus.attach_cpu(high);

        assert_eq!(bus.read16(0x0010), 0x1234);
    }

    #[test]
    fn test_reset_reaches_attachments() {
        let stub = Rc::new(RefCell::new(Stub::new(0, 0)));

        let mut bus = Bus::new();
        bus.attach_cpu(stub.clone());

        bus.reset();
        assert_eq!(stub.borrow().resets, 1);
    }
}
