/*
 * https://wiki.nesdev.com/w/index.php/INES#iNES_file_format
 */

use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use thiserror::Error;

use super::header::Header;
use super::header::ParseError;

pub type Address = u32;

pub const TRAINER_SIZE: usize = 0x0200; // 512 bytes
pub const PLAYCHOICE_SIZE: usize = 0x10; // 16 bytes, read as two halves
const PLAYCHOICE_HALF: usize = PLAYCHOICE_SIZE / 2;

// PRG ROM is mapped to the top half of the CPU address space
pub const PRG_ROM_BASE: Address = 0x8000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceMode {
    Program,
    Graphics,
    Auxiliary,
}

impl fmt::Display for DeviceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DeviceMode::Program => "program",
            DeviceMode::Graphics => "graphics",
            DeviceMode::Auxiliary => "auxiliary",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoundsError {
    #[error("address ${addr:04X} is out of range of the {mode} space")]
    OutOfRange { addr: Address, mode: DeviceMode },
}

/*
 * Cartridge contents. Every section is owned here and dropped together
 * with the cassette; nothing is resized after loading.
 */
#[derive(Debug)]
pub struct Cassette {
    header: Header,
    trainer: Option<Box<[u8; TRAINER_SIZE]>>,
    prg_rom: Vec<u8>,
    chr_rom: Vec<u8>,
    playchoice: Option<[u8; PLAYCHOICE_SIZE]>,
}

impl Cassette {
    /// Parses the header and every section that follows it.
    pub fn from_reader<R: Read>(source: &mut R) -> Result<Self, ParseError> {
        let header = Header::parse(source)?;
        Self::load(source, header)
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, ParseError> {
        Self::from_reader(&mut &data[..])
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ParseError> {
        let file = File::open(path.as_ref()).map_err(|e| ParseError::Io {
            section: "image file",
            source: e,
        })?;
        Self::from_reader(&mut BufReader::new(file))
    }

    /// Reads the sections described by `header` from `source`, which must be
    /// positioned just past the header.
    ///
    /// Either every required section is read or nothing is kept. The second
    /// half of the Player's Choice data is the only part allowed to be missing.
    pub fn load<R: Read>(source: &mut R, header: Header) -> Result<Self, ParseError> {
        let trainer = if header.has_trainer() {
            let mut buf = Box::new([0; TRAINER_SIZE]);
            read_section(source, &mut buf[..], "trainer")?;
            debug!("Trainer loaded ({} bytes)", TRAINER_SIZE);
            Some(buf)
        } else {
            None
        };

        let mut prg_rom = vec![0; header.prg_size()];
        read_section(source, &mut prg_rom, "PRG ROM")?;
        debug!("PRG ROM loaded ({} bytes)", prg_rom.len());

        let mut chr_rom = vec![0; header.chr_size()];
        read_section(source, &mut chr_rom, "CHR ROM")?;
        debug!("CHR ROM loaded ({} bytes)", chr_rom.len());

        let playchoice = if header.has_playchoice() {
            let mut buf = [0; PLAYCHOICE_SIZE];
            read_section(source, &mut buf[..PLAYCHOICE_HALF], "PlayChoice")?;
            let mut tail = Vec::with_capacity(PLAYCHOICE_HALF);
            source
                .by_ref()
                .take(PLAYCHOICE_HALF as u64)
                .read_to_end(&mut tail)
                .map_err(|e| ParseError::from_io(e, "PlayChoice"))?;
            buf[PLAYCHOICE_HALF..PLAYCHOICE_HALF + tail.len()].copy_from_slice(&tail);
            if tail.len() < PLAYCHOICE_HALF {
                warn!(
                    "PlayChoice second half has {} of {} bytes, leaving the rest blank",
                    tail.len(),
                    PLAYCHOICE_HALF
                );
            }
            Some(buf)
        } else {
            None
        };

        Ok(Self {
            header,
            trainer,
            prg_rom,
            chr_rom,
            playchoice,
        })
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn trainer(&self) -> Option<&[u8]> {
        self.trainer.as_ref().map(|t| &t[..])
    }

    pub fn prg_rom(&self) -> &[u8] {
        &self.prg_rom
    }

    pub fn chr_rom(&self) -> &[u8] {
        &self.chr_rom
    }

    pub fn playchoice(&self) -> Option<&[u8]> {
        self.playchoice.as_ref().map(|p| &p[..])
    }

    pub fn base_address(&self, mode: DeviceMode) -> Address {
        match mode {
            DeviceMode::Program => PRG_ROM_BASE,
            DeviceMode::Graphics | DeviceMode::Auxiliary => 0,
        }
    }

    /// Highest valid address of a space, inclusive.
    ///
    /// An empty graphics space reports 0 like an absent auxiliary space; reads
    /// from either still fail because there is no byte behind address 0.
    pub fn max_address(&self, mode: DeviceMode) -> Address {
        match mode {
            DeviceMode::Program => self.base_address(mode) + self.prg_rom.len() as Address - 1,
            DeviceMode::Graphics => (self.chr_rom.len() as Address).saturating_sub(1),
            DeviceMode::Auxiliary => {
                if self.playchoice.is_some() {
                    PLAYCHOICE_SIZE as Address - 1
                } else {
                    0
                }
            }
        }
    }

    pub fn read(&self, addr: Address, mode: DeviceMode) -> Result<u8, BoundsError> {
        let out_of_range = BoundsError::OutOfRange { addr, mode };
        let base = self.base_address(mode);
        if addr < base || addr > self.max_address(mode) {
            return Err(out_of_range);
        }

        let offset = (addr - base) as usize;
        let section: &[u8] = match mode {
            DeviceMode::Program => &self.prg_rom,
            DeviceMode::Graphics => &self.chr_rom,
            DeviceMode::Auxiliary => match &self.playchoice {
                Some(p) => &p[..],
                None => &[],
            },
        };
        section.get(offset).copied().ok_or(out_of_range)
    }
}

fn read_section<R: Read>(
    source: &mut R,
    buf: &mut [u8],
    section: &'static str,
) -> Result<(), ParseError> {
    source
        .read_exact(buf)
        .map_err(|e| ParseError::from_io(e, section))
}
