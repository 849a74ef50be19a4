//! In-memory iNES images for tests.

#![allow(dead_code)]

use crate::header::{Flags6, Flags7, Header, PRG_ROM_UNIT_SIZE};

/// Bytes counting up from 0 and wrapping at 256.
pub fn patterned(len: usize) -> Vec<u8> {
    (0..len).map(|i| i as u8).collect()
}

/// Header followed by patterned PRG data and 0xCC-filled CHR data.
/// No trainer or PlayChoice bytes are appended even if the flags ask for them.
pub fn build_ines(prg_banks: u8, chr_banks: u8, flags6: Flags6, flags7: Flags7) -> Vec<u8> {
    let header = Header::new(prg_banks, chr_banks, flags6, flags7).unwrap();
    let mut bytes = header.to_bytes().to_vec();
    bytes.extend(patterned(header.prg_size()));
    bytes.extend(std::iter::repeat(0xCC).take(header.chr_size()));
    bytes
}

/// One PRG bank holding `program` at its start, zero-filled after it.
pub fn program_image(program: &[u8]) -> Vec<u8> {
    assert!(program.len() <= PRG_ROM_UNIT_SIZE);
    let header = Header::new(1, 0, Flags6::empty(), Flags7::empty()).unwrap();
    let mut bytes = header.to_bytes().to_vec();
    bytes.extend_from_slice(program);
    bytes.resize(bytes.len() + PRG_ROM_UNIT_SIZE - program.len(), 0);
    bytes
}
