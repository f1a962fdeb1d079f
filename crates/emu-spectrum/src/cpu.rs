//! CPU bus adapter.
//!
//! Bridges an external pin-level core to memory and the I/O registry.
//! Each T-state: merge the latched interrupt request into the INT line,
//! tick the core, then resolve whatever bus transaction the core left
//! on its pins so the data lines are correct before the next tick.

use emu_core::IoBus;
use zilog_z80_bus::{PinCpu, Pins};

use crate::memory::Memory;

/// The CPU as the machine sees it: a core plus its bus plumbing.
pub struct CpuAdapter<C: PinCpu> {
    core: C,
    pins: Pins,
    int_pending: bool,
}

impl<C: PinCpu> CpuAdapter<C> {
    pub fn new(core: C) -> Self {
        Self {
            core,
            pins: Pins::default(),
            int_pending: false,
        }
    }

    /// Advance the core one T-state and resolve its bus transaction.
    pub fn tick(&mut self, memory: &mut Memory, io: &mut IoBus) {
        if self.int_pending {
            self.pins.set(Pins::INT);
        } else {
            self.pins.clear(Pins::INT);
        }

        self.pins = self.core.tick(self.pins);
        self.transact(memory, io);
    }

    fn transact(&mut self, memory: &mut Memory, io: &mut IoBus) {
        let pins = self.pins;
        if pins.contains(Pins::MREQ) {
            if pins.contains(Pins::RD) {
                let data = memory.read(pins.addr());
                self.pins.set_data(data);
            } else if pins.contains(Pins::WR) {
                memory.write(pins.addr(), pins.data());
            }
        } else if pins.contains(Pins::IORQ) {
            if pins.contains(Pins::M1) {
                // Interrupt acknowledge: nothing drives the data bus.
                self.pins.set_data(0xFF);
            } else if pins.contains(Pins::RD) {
                let data = io.read(pins.addr());
                self.pins.set_data(data);
            } else if pins.contains(Pins::WR) {
                io.write(pins.addr(), pins.data());
            }
        }
    }

    /// Latch or clear the interrupt request applied on the next tick.
    pub fn set_interrupt(&mut self, pending: bool) {
        self.int_pending = pending;
    }

    /// True while an interrupt request is latched.
    #[must_use]
    pub fn interrupt_pending(&self) -> bool {
        self.int_pending
    }

    /// Redirect execution to `addr` via the core's prefetch.
    ///
    /// Snapshot restore only; bypasses normal instruction flow.
    pub fn set_pc(&mut self, addr: u16) {
        self.pins = self.core.prefetch(addr);
    }

    /// Bus pin state after the last tick's transaction was resolved.
    #[must_use]
    pub fn pins(&self) -> Pins {
        self.pins
    }

    #[must_use]
    pub fn core(&self) -> &C {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut C {
        &mut self.core
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use emu_core::IoDevice;
    use std::cell::RefCell;
    use std::rc::Rc;
    use zilog_z80_bus::ScriptedCore;

    struct Probe {
        response: u8,
        writes: Rc<RefCell<Vec<(u16, u8)>>>,
    }

    impl IoDevice for Probe {
        fn read(&mut self, _port: u16) -> u8 {
            self.response
        }

        fn write(&mut self, port: u16, value: u8) {
            self.writes.borrow_mut().push((port, value));
        }
    }

    fn harness() -> (Memory, IoBus, Rc<RefCell<Vec<(u16, u8)>>>) {
        let memory = Memory::new();
        let mut io = IoBus::new();
        let writes = Rc::new(RefCell::new(Vec::new()));
        io.register(
            0x0001,
            Box::new(Probe {
                response: 0x5A,
                writes: Rc::clone(&writes),
            }),
        );
        (memory, io, writes)
    }

    #[test]
    fn memory_read_fills_data_lines() {
        let (mut memory, mut io, _) = harness();
        memory.write(0x8000, 0xAB);

        let mut core = ScriptedCore::new();
        core.push(Pins::new(Pins::MREQ | Pins::RD, 0x8000, 0));
        let mut cpu = CpuAdapter::new(core);

        cpu.tick(&mut memory, &mut io);
        assert_eq!(cpu.pins().data(), 0xAB);

        // The core sees the resolved data on its next tick.
        cpu.tick(&mut memory, &mut io);
        assert_eq!(cpu.core().seen[1].data(), 0xAB);
    }

    #[test]
    fn memory_write_stores_data() {
        let (mut memory, mut io, _) = harness();

        let mut core = ScriptedCore::new();
        core.push(Pins::new(Pins::MREQ | Pins::WR, 0x8000, 0xCD));
        let mut cpu = CpuAdapter::new(core);

        cpu.tick(&mut memory, &mut io);
        assert_eq!(memory.read(0x8000), 0xCD);
    }

    #[test]
    fn rom_write_through_bus_is_ignored() {
        let (mut memory, mut io, _) = harness();

        let mut core = ScriptedCore::new();
        core.push(Pins::new(Pins::MREQ | Pins::WR, 0x1000, 0xCD));
        let mut cpu = CpuAdapter::new(core);

        cpu.tick(&mut memory, &mut io);
        assert_eq!(memory.read(0x1000), 0x00);
    }

    #[test]
    fn io_read_consults_registry() {
        let (mut memory, mut io, _) = harness();

        let mut core = ScriptedCore::new();
        core.push(Pins::new(Pins::IORQ | Pins::RD, 0x00FE, 0));
        core.push(Pins::new(Pins::IORQ | Pins::RD, 0x00FF, 0));
        let mut cpu = CpuAdapter::new(core);

        cpu.tick(&mut memory, &mut io);
        assert_eq!(cpu.pins().data(), 0x5A);

        // Odd port: no device, floating bus.
        cpu.tick(&mut memory, &mut io);
        assert_eq!(cpu.pins().data(), 0xFF);
    }

    #[test]
    fn io_write_dispatches_to_device() {
        let (mut memory, mut io, writes) = harness();

        let mut core = ScriptedCore::new();
        core.push(Pins::new(Pins::IORQ | Pins::WR, 0x00FE, 0x07));
        let mut cpu = CpuAdapter::new(core);

        cpu.tick(&mut memory, &mut io);
        assert_eq!(*writes.borrow(), vec![(0x00FE, 0x07)]);
    }

    #[test]
    fn interrupt_acknowledge_floats_data_bus() {
        let (mut memory, mut io, _) = harness();

        let mut core = ScriptedCore::new();
        core.push(Pins::new(Pins::IORQ | Pins::M1, 0x0038, 0x00));
        let mut cpu = CpuAdapter::new(core);

        cpu.tick(&mut memory, &mut io);
        assert_eq!(cpu.pins().data(), 0xFF);
    }

    #[test]
    fn interrupt_latch_drives_int_pin() {
        let (mut memory, mut io, _) = harness();
        let mut cpu = CpuAdapter::new(ScriptedCore::new());

        cpu.tick(&mut memory, &mut io);
        cpu.set_interrupt(true);
        cpu.tick(&mut memory, &mut io);
        cpu.tick(&mut memory, &mut io);
        cpu.set_interrupt(false);
        cpu.tick(&mut memory, &mut io);

        let seen = &cpu.core().seen;
        assert!(!seen[0].contains(Pins::INT));
        assert!(seen[1].contains(Pins::INT));
        assert!(seen[2].contains(Pins::INT));
        assert!(!seen[3].contains(Pins::INT));
    }

    #[test]
    fn set_pc_prefetches() {
        let (mut memory, mut io, _) = harness();
        let mut cpu = CpuAdapter::new(ScriptedCore::new());

        cpu.set_pc(0x0072);
        assert_eq!(cpu.core().prefetched, vec![0x0072]);
        assert_eq!(cpu.pins().addr(), 0x0072);

        cpu.tick(&mut memory, &mut io);
        assert_eq!(cpu.core().registers().pc, 0x0072);
    }
}
