//! Bit-packed Z80 bus pin state.
//!
//! One 64-bit word carries the whole external bus: A0-A15 in the low 16
//! bits, D0-D7 at bits 16-23, and the named control signals above them.
//! The word is a plain value: copied into the core on every tick,
//! copied back out, never aliased.

/// Snapshot of the Z80's external bus signals at one instant.
///
/// The data field is meaningful only while a request pin (`MREQ` or
/// `IORQ`) and one of `RD`/`WR` are asserted together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pins(pub u64);

impl Pins {
    /// Machine cycle one (opcode fetch, or interrupt acknowledge with `IORQ`).
    pub const M1: u64 = 1 << 24;
    /// Memory request.
    pub const MREQ: u64 = 1 << 25;
    /// I/O request.
    pub const IORQ: u64 = 1 << 26;
    /// Read.
    pub const RD: u64 = 1 << 27;
    /// Write.
    pub const WR: u64 = 1 << 28;
    /// Halt state.
    pub const HALT: u64 = 1 << 29;
    /// Maskable interrupt request.
    pub const INT: u64 = 1 << 30;
    /// Reset request.
    pub const RES: u64 = 1 << 31;
    /// Non-maskable interrupt request.
    pub const NMI: u64 = 1 << 32;
    /// Wait request.
    pub const WAIT: u64 = 1 << 33;
    /// Memory refresh.
    pub const RFSH: u64 = 1 << 34;

    /// Every control pin a core drives during a bus transaction.
    pub const CTRL_MASK: u64 =
        Self::M1 | Self::MREQ | Self::IORQ | Self::RD | Self::WR | Self::RFSH;

    /// Pack control pins, an address and a data byte into one word.
    #[must_use]
    pub const fn new(ctrl: u64, addr: u16, data: u8) -> Self {
        Self(ctrl | ((data as u64) << 16) | addr as u64)
    }

    /// Address lines A0-A15.
    #[must_use]
    pub const fn addr(self) -> u16 {
        self.0 as u16
    }

    pub fn set_addr(&mut self, addr: u16) {
        self.0 = (self.0 & !0xFFFF) | addr as u64;
    }

    /// Data lines D0-D7.
    #[must_use]
    pub const fn data(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub fn set_data(&mut self, data: u8) {
        self.0 = (self.0 & !0xFF_0000) | ((data as u64) << 16);
    }

    /// True when every pin in `mask` is asserted.
    #[must_use]
    pub const fn contains(self, mask: u64) -> bool {
        self.0 & mask == mask
    }

    /// Assert the pins in `mask`.
    pub fn set(&mut self, mask: u64) {
        self.0 |= mask;
    }

    /// Release the pins in `mask`.
    pub fn clear(&mut self, mask: u64) {
        self.0 &= !mask;
    }
}
