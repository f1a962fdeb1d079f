//! The machine aggregate.
//!
//! One `Spectrum` owns everything: memory, the I/O registry, the CPU
//! adapter (which owns the external core), the ULA and the CRT, plus the
//! running T-state counter. There is no global machine; the scheduler
//! and front end borrow this one explicitly.

use emu_core::{IoBus, Tickable};
use zilog_z80_bus::PinCpu;

use crate::cpu::CpuAdapter;
use crate::crt::Crt;
use crate::io::{BorderLatch, ULA_PORT_MASK, UlaPort};
use crate::memory::Memory;
use crate::ula::Ula;

/// A complete emulated Spectrum, generic over the bound CPU core.
pub struct Spectrum<C: PinCpu> {
    cpu: CpuAdapter<C>,
    memory: Memory,
    io: IoBus,
    ula: Ula,
    crt: Crt,
    tstates: u64,
}

impl<C: PinCpu> Spectrum<C> {
    /// Build a machine around the given core.
    ///
    /// The ULA's port personality is registered in the I/O bus under
    /// mask `0x0001`, so any write to an even port sets the border.
    pub fn new(core: C) -> Self {
        let border = BorderLatch::new();
        let mut io = IoBus::new();
        io.register(ULA_PORT_MASK, Box::new(UlaPort::new(border.clone())));

        Self {
            cpu: CpuAdapter::new(core),
            memory: Memory::new(),
            io,
            ula: Ula::new(border),
            crt: Crt::new(),
            tstates: 0,
        }
    }

    /// T-states executed since construction.
    #[must_use]
    pub fn tstates(&self) -> u64 {
        self.tstates
    }

    #[must_use]
    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut Memory {
        &mut self.memory
    }

    #[must_use]
    pub fn cpu(&self) -> &CpuAdapter<C> {
        &self.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut CpuAdapter<C> {
        &mut self.cpu
    }

    #[must_use]
    pub fn ula(&self) -> &Ula {
        &self.ula
    }

    #[must_use]
    pub fn crt(&self) -> &Crt {
        &self.crt
    }

    /// Current border colour (0-7).
    #[must_use]
    pub fn border_colour(&self) -> u8 {
        self.ula.border_colour()
    }

    /// Set the border colour directly (snapshot restore).
    pub fn set_border_colour(&mut self, colour: u8) {
        self.ula.set_border_colour(colour);
    }
}

impl<C: PinCpu> Tickable for Spectrum<C> {
    fn tick(&mut self) {
        self.ula
            .tick(&mut self.cpu, &mut self.memory, &mut self.io, &mut self.crt);
        self.tstates += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ula::TSTATES_PER_FIELD;
    use zilog_z80_bus::{NopCore, Pins, ScriptedCore};

    #[test]
    fn tick_advances_tstate_counter() {
        let mut spectrum = Spectrum::new(NopCore::new());
        spectrum.tick();
        assert_eq!(spectrum.tstates(), 1);
        spectrum.tick_n(emu_core::Ticks::new(9));
        assert_eq!(spectrum.tstates(), 10);
    }

    #[test]
    fn out_to_even_port_sets_border() {
        let mut core = ScriptedCore::new();
        core.push(Pins::new(Pins::IORQ | Pins::WR, 0x00FE, 0x05));
        let mut spectrum = Spectrum::new(core);

        assert_eq!(spectrum.border_colour(), 0);
        spectrum.tick();
        assert_eq!(spectrum.border_colour(), 5);
    }

    #[test]
    fn in_from_ula_port_floats_high() {
        let mut core = ScriptedCore::new();
        core.push(Pins::new(Pins::IORQ | Pins::RD, 0xFEFE, 0x00));
        let mut spectrum = Spectrum::new(core);

        spectrum.tick();
        assert_eq!(spectrum.cpu().pins().data(), 0xFF);
    }

    #[test]
    fn field_counter_matches_frame_length() {
        let mut spectrum = Spectrum::new(NopCore::new());
        spectrum.tick_n(emu_core::Ticks::new(TSTATES_PER_FIELD));
        assert_eq!(spectrum.tstates(), 69_888);
        assert_eq!(spectrum.ula().line(), 0);
    }
}
