//! Block transfer framing.
//!
//! The Si4703 has no register addressing on the bus. A read always returns
//! all 16 registers starting at STATUSRSSI (0x0A) and wrapping around after
//! RDSD (0x0F). A write always starts at POWERCFG (0x02) and the host only
//! ever sends the six control registers 0x02..=0x07.

use crate::regs::{Register, REGISTER_COUNT};
use crate::shadow::RegisterFile;

pub const READ_BLOCK_LEN: usize = REGISTER_COUNT * 2;
pub const WRITE_REGISTER_COUNT: usize = Register::WRITE_END.idx() - Register::WRITE_START.idx() + 1;
pub const WRITE_BLOCK_LEN: usize = WRITE_REGISTER_COUNT * 2;

/// Map a raw block read to the register file.
/// Byte pair `i` is register `(start + i) mod 16`, high byte first.
pub fn decode_block(raw: &[u8; READ_BLOCK_LEN], start: Register) -> RegisterFile {
    let mut words = [0u16; REGISTER_COUNT];
    for (i, pair) in raw.chunks_exact(2).enumerate() {
        let index = (start.idx() + i) % REGISTER_COUNT;
        words[index] = u16::from_be_bytes([pair[0], pair[1]]);
    }
    RegisterFile::from_words(words)
}

/// Serialize the writable registers 0x02..=0x07, high byte first.
pub fn encode_block(file: &RegisterFile) -> [u8; WRITE_BLOCK_LEN] {
    let mut raw = [0; WRITE_BLOCK_LEN];
    let writable = &file.words()[Register::WRITE_START.idx()..=Register::WRITE_END.idx()];
    for (chunk, word) in raw.chunks_exact_mut(2).zip(writable) {
        chunk.copy_from_slice(&word.to_be_bytes());
    }
    raw
}

/// The leading byte sent ahead of a block read.
///
/// The device ignores the value but SMBus style block reads require one, so
/// the current upper byte of POWERCFG is sent to keep the register unchanged.
pub fn command_byte(file: &RegisterFile) -> u8 {
    file.word(Register::PowerCfg).to_be_bytes()[0]
}
