/*
 * https://wiki.nesdev.com/w/index.php/INES#iNES_file_format
 */

use std::fmt;
use std::io::{self, Read};

use bitflags::bitflags;
use thiserror::Error;

pub const INES_HEADER_SIZE: usize = 16;
pub const INES_HEADER_CONSTANT: [u8; 4] = [0x4e, 0x45, 0x53, 0x1a];
pub const PRG_ROM_UNIT_SIZE: usize = 0x4000; // 16384 bytes
pub const CHR_ROM_UNIT_SIZE: usize = 0x2000; // 8192 bytes
pub const PRG_RAM_UNIT_SIZE: usize = 0x2000; // 8192 bytes

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Flags6: u8 {
        const MIRRORING = 0b0000_0001;
        const BATTERY = 0b0000_0010;
        const TRAINER = 0b0000_0100;
        const FOUR_SCREEN = 0b0000_1000;
        const MAPPER_LOW = 0b1111_0000;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Flags7: u8 {
        const VS_UNISYSTEM = 0b0000_0001;
        const PLAYCHOICE = 0b0000_0010;
        const NES2 = 0b0000_1100;
        const MAPPER_HIGH = 0b1111_0000;
    }
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("image ended before the {section} section was complete")]
    Truncated { section: &'static str },
    #[error("header declares no program ROM banks")]
    InvalidBankCount,
    #[error("not an iNES image (found {found:02X?})")]
    InvalidMagic { found: [u8; 4] },
    #[error("failed to read {section}: {source}")]
    Io {
        section: &'static str,
        #[source]
        source: io::Error,
    },
}

impl ParseError {
    /*
     * An exhausted source is always reported as truncation, whatever
     * section was being read.
     */
    pub(crate) fn from_io(err: io::Error, section: &'static str) -> Self {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            Self::Truncated { section }
        } else {
            Self::Io { section, source: err }
        }
    }
}

/// The fixed 16-byte prefix of an iNES image.
///
/// Immutable once built; a `Header` always declares at least one program bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    prg_banks: u8,
    chr_banks: u8,
    flags6: Flags6,
    flags7: Flags7,
    prg_ram_banks: u8,
}

impl Header {
    pub fn new(
        prg_banks: u8,
        chr_banks: u8,
        flags6: Flags6,
        flags7: Flags7,
    ) -> Result<Self, ParseError> {
        if prg_banks == 0 {
            return Err(ParseError::InvalidBankCount);
        }
        Ok(Self {
            prg_banks,
            chr_banks,
            flags6,
            flags7,
            prg_ram_banks: 0,
        })
    }

    pub fn with_prg_ram_banks(mut self, banks: u8) -> Self {
        self.prg_ram_banks = banks;
        self
    }

    pub fn parse<R: Read>(source: &mut R) -> Result<Self, ParseError> {
        let mut buf = [0; INES_HEADER_SIZE];
        source
            .read_exact(&mut buf)
            .map_err(|e| ParseError::from_io(e, "header"))?;
        Self::from_bytes(&buf)
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, ParseError> {
        if data.len() < INES_HEADER_SIZE {
            return Err(ParseError::Truncated { section: "header" });
        }

        let mut magic = [0; 4];
        magic.copy_from_slice(&data[0..4]);
        if magic != INES_HEADER_CONSTANT {
            return Err(ParseError::InvalidMagic { found: magic });
        }

        // Bytes 9..16 are padding
        let header = Self::new(
            data[4],
            data[5],
            Flags6::from_bits_retain(data[6]),
            Flags7::from_bits_retain(data[7]),
        )?
        .with_prg_ram_banks(data[8]);

        debug!("PRG ROM size = {} units ({} bytes)", header.prg_banks, header.prg_size());
        debug!("CHR ROM size = {} units ({} bytes)", header.chr_banks, header.chr_size());
        debug!("Trainer = {}, PlayChoice = {}", header.has_trainer(), header.has_playchoice());

        Ok(header)
    }

    pub fn to_bytes(&self) -> [u8; INES_HEADER_SIZE] {
        let mut buf = [0; INES_HEADER_SIZE];
        buf[0..4].copy_from_slice(&INES_HEADER_CONSTANT);
        buf[4] = self.prg_banks;
        buf[5] = self.chr_banks;
        buf[6] = self.flags6.bits();
        buf[7] = self.flags7.bits();
        buf[8] = self.prg_ram_banks;
        buf
    }

    pub fn prg_banks(&self) -> u8 {
        self.prg_banks
    }

    pub fn chr_banks(&self) -> u8 {
        self.chr_banks
    }

    pub fn flags6(&self) -> Flags6 {
        self.flags6
    }

    pub fn flags7(&self) -> Flags7 {
        self.flags7
    }

    pub fn prg_size(&self) -> usize {
        self.prg_banks as usize * PRG_ROM_UNIT_SIZE
    }

    pub fn chr_size(&self) -> usize {
        self.chr_banks as usize * CHR_ROM_UNIT_SIZE
    }

    pub fn prg_ram_size(&self) -> usize {
        self.prg_ram_banks as usize * PRG_RAM_UNIT_SIZE
    }

    pub fn has_trainer(&self) -> bool {
        self.flags6.contains(Flags6::TRAINER)
    }

    /// Player's Choice (PlayChoice-10) hint ROM follows the CHR data.
    pub fn has_playchoice(&self) -> bool {
        self.flags7.contains(Flags7::PLAYCHOICE)
    }

    pub fn mapper(&self) -> u8 {
        (self.flags7 & Flags7::MAPPER_HIGH).bits() | (self.flags6 & Flags6::MAPPER_LOW).bits() >> 4
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Program ROM Size: {}", self.prg_size())?;
        writeln!(f, "Character ROM Size: {}", self.chr_size())?;
        writeln!(f, "Program RAM Size: {}", self.prg_ram_size())?;
        writeln!(f, "Mapper: {}", self.mapper())?;
        writeln!(
            f,
            "Trainer is {}present.",
            if self.has_trainer() { "" } else { "not " }
        )?;
        write!(
            f,
            "Player's Choice ROM is {}present.",
            if self.has_playchoice() { "" } else { "not " }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bank_counts_and_flags() {
        let bytes = [
            0x4e, 0x45, 0x53, 0x1a, 2, 1, 0b0001_0100, 0b0010_0010, 1, 0, 0, 0, 0, 0, 0, 0,
        ];
        let header = Header::from_bytes(&bytes).unwrap();

        assert_eq!(header.prg_banks(), 2);
        assert_eq!(header.chr_banks(), 1);
        assert_eq!(header.prg_size(), 32768);
        assert_eq!(header.chr_size(), 8192);
        assert_eq!(header.prg_ram_size(), 8192);
        assert!(header.has_trainer());
        assert!(header.has_playchoice());
        assert_eq!(header.mapper(), 0x21);
    }

    #[test]
    fn rejects_zero_program_banks() {
        let mut bytes = [0u8; INES_HEADER_SIZE];
        bytes[0..4].copy_from_slice(&INES_HEADER_CONSTANT);
        bytes[5] = 1;
        assert!(matches!(Header::from_bytes(&bytes), Err(ParseError::InvalidBankCount)));
    }

    #[test]
    fn short_source_is_truncated() {
        let bytes = [0x4e, 0x45, 0x53, 0x1a, 1, 0];
        let result = Header::parse(&mut &bytes[..]);
        assert!(matches!(result, Err(ParseError::Truncated { section: "header" })));
    }

    #[test]
    fn rejects_bad_magic() {
        let mut bytes = [0u8; INES_HEADER_SIZE];
        bytes[4] = 1;
        assert!(matches!(Header::from_bytes(&bytes), Err(ParseError::InvalidMagic { .. })));
    }

    #[test]
    fn zero_chr_banks_is_valid() {
        let header = Header::new(1, 0, Flags6::empty(), Flags7::empty()).unwrap();
        assert_eq!(header.chr_size(), 0);
    }

    #[test]
    fn serialized_header_parses_back() {
        let header = Header::new(1, 2, Flags6::TRAINER, Flags7::PLAYCHOICE)
            .unwrap()
            .with_prg_ram_banks(3);
        assert_eq!(Header::from_bytes(&header.to_bytes()).unwrap(), header);
    }

    #[test]
    fn summary_mentions_optional_sections() {
        let header = Header::new(1, 0, Flags6::TRAINER, Flags7::empty()).unwrap();
        let text = header.to_string();
        assert!(text.contains("Program ROM Size: 16384"));
        assert!(text.contains("Trainer is present."));
        assert!(text.contains("Player's Choice ROM is not present."));
    }
}
