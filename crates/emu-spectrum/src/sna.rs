//! SNA machine-state snapshots.
//!
//! A 27-byte register header followed by a 49,152-byte RAM image loaded
//! at $4000. Header layout (little-endian words): I; shadow HL, DE, BC,
//! AF; main HL, DE, BC; IY; IX; interrupt byte (bit 2 = IFF2); R; AF;
//! SP; interrupt mode; border colour.
//!
//! The format stores no program counter. By long-standing convention a
//! snapshot is taken from an interrupt handler and resumed by jumping to
//! the RETN at $0072 in the 48K ROM, so loading ends with a prefetch
//! there rather than a register write.

use zilog_z80_bus::PinCpu;

use crate::spectrum::Spectrum;

/// Register header length.
const HEADER_SIZE: usize = 27;
/// RAM image length ($4000-$FFFF).
const RAM_SIZE: usize = 49_152;
/// Minimum length of a complete snapshot.
pub const SNA_SIZE: usize = HEADER_SIZE + RAM_SIZE;

/// Conventional resume address for snapshots with no stored PC.
const SNA_RETURN_ADDR: u16 = 0x0072;

/// Load an SNA snapshot into the machine.
///
/// # Errors
///
/// Fails if `data` is shorter than a complete snapshot (trailing bytes
/// are ignored, matching sequential-read loaders).
pub fn load_sna<C: PinCpu>(spectrum: &mut Spectrum<C>, data: &[u8]) -> Result<(), String> {
    if data.len() < SNA_SIZE {
        return Err(format!(
            "SNA snapshot must be at least {SNA_SIZE} bytes, got {}",
            data.len()
        ));
    }

    let word = |offset: usize| u16::from(data[offset]) | (u16::from(data[offset + 1]) << 8);

    let mut regs = spectrum.cpu().core().registers();
    regs.i = data[0];
    regs.set_hl_alt(word(1));
    regs.set_de_alt(word(3));
    regs.set_bc_alt(word(5));
    regs.set_af_alt(word(7));
    regs.set_hl(word(9));
    regs.set_de(word(11));
    regs.set_bc(word(13));
    regs.iy = word(15);
    regs.ix = word(17);
    let iff2 = data[19] & 0x04 != 0;
    regs.iff1 = iff2;
    regs.iff2 = iff2;
    regs.r = data[20];
    regs.set_af(word(21));
    regs.sp = word(23);
    regs.im = data[25];
    spectrum.cpu_mut().core_mut().set_registers(&regs);

    spectrum.set_border_colour(data[26]);

    let mut ram = &data[HEADER_SIZE..HEADER_SIZE + RAM_SIZE];
    spectrum
        .memory_mut()
        .load_image(&mut ram, 0x4000, RAM_SIZE)
        .map_err(|e| format!("SNA RAM image: {e}"))?;

    // No PC in the header: resume at the conventional return address.
    spectrum.cpu_mut().set_pc(SNA_RETURN_ADDR);

    Ok(())
}
