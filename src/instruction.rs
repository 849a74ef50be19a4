use std::convert::TryFrom;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::opcodes::OFFICIAL_OPCODES;

pub const OPCODE_COUNT: usize = 256;
pub const MNEMONIC_LEN: usize = 3;
// Mnemonic bytes followed by the addressing mode byte
pub const RECORD_SIZE: usize = MNEMONIC_LEN + 1;

// https://www.masswerk.at/6502/6502_instruction_set.html
// http://obelisk.me.uk/6502/reference.html
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressingMode {
    Implied,
    Accumulator,
    Immediate,
    Relative,
    ZeroPage,
    Absolute,
    Indirect,
    AbsoluteX,
    AbsoluteY,
    ZeroPageX,
    ZeroPageY,
    IndexedIndirectX,
    IndirectIndexedY,
    AbsoluteIndirect,
}

impl AddressingMode {
    /// Operand bytes following the opcode.
    pub fn operand_len(self) -> usize {
        match self {
            AddressingMode::Implied | AddressingMode::Accumulator => 0,
            AddressingMode::Absolute
            | AddressingMode::AbsoluteX
            | AddressingMode::AbsoluteY
            | AddressingMode::AbsoluteIndirect => 2,
            _ => 1,
        }
    }
}

impl From<AddressingMode> for u8 {
    fn from(m: AddressingMode) -> Self {
        match m {
            AddressingMode::Implied => 0,
            AddressingMode::Accumulator => 1,
            AddressingMode::Immediate => 2,
            AddressingMode::Relative => 3,
            AddressingMode::ZeroPage => 4,
            AddressingMode::Absolute => 5,
            AddressingMode::Indirect => 6,
            AddressingMode::AbsoluteX => 7,
            AddressingMode::AbsoluteY => 8,
            AddressingMode::ZeroPageX => 9,
            AddressingMode::ZeroPageY => 10,
            AddressingMode::IndexedIndirectX => 11,
            AddressingMode::IndirectIndexedY => 12,
            AddressingMode::AbsoluteIndirect => 13,
        }
    }
}

impl TryFrom<u8> for AddressingMode {
    type Error = u8;

    fn try_from(b: u8) -> Result<Self, Self::Error> {
        let mode = match b {
            0 => AddressingMode::Implied,
            1 => AddressingMode::Accumulator,
            2 => AddressingMode::Immediate,
            3 => AddressingMode::Relative,
            4 => AddressingMode::ZeroPage,
            5 => AddressingMode::Absolute,
            6 => AddressingMode::Indirect,
            7 => AddressingMode::AbsoluteX,
            8 => AddressingMode::AbsoluteY,
            9 => AddressingMode::ZeroPageX,
            10 => AddressingMode::ZeroPageY,
            11 => AddressingMode::IndexedIndirectX,
            12 => AddressingMode::IndirectIndexedY,
            13 => AddressingMode::AbsoluteIndirect,
            _ => return Err(b),
        };
        Ok(mode)
    }
}

#[derive(Debug, Error)]
pub enum TableError {
    #[error("instruction table {} not found", .path.display())]
    Missing { path: PathBuf },
    #[error("malformed instruction table: {0}")]
    Malformed(String),
    #[error("failed to read instruction table {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/*
 * One decodable instruction variant. A blank mnemonic marks an opcode slot
 * that has no instruction.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstructionDescriptor {
    mnemonic: [u8; MNEMONIC_LEN],
    mode: AddressingMode,
}

impl InstructionDescriptor {
    pub const SENTINEL: Self = Self {
        mnemonic: [0; MNEMONIC_LEN],
        mode: AddressingMode::Implied,
    };

    /// Fails if `mnemonic` is longer than three characters or holds anything
    /// but printable, non-space ASCII.
    pub fn new(mnemonic: &str, mode: AddressingMode) -> Result<Self, TableError> {
        if mnemonic.len() > MNEMONIC_LEN || !mnemonic.bytes().all(|b| b.is_ascii_graphic()) {
            return Err(TableError::Malformed(format!("invalid mnemonic {:?}", mnemonic)));
        }
        let mut bytes = [0; MNEMONIC_LEN];
        bytes[..mnemonic.len()].copy_from_slice(mnemonic.as_bytes());
        Ok(Self { mnemonic: bytes, mode })
    }

    fn from_record(record: &[u8]) -> Result<Self, TableError> {
        let mnemonic = &record[..MNEMONIC_LEN];
        let len = mnemonic.iter().position(|&b| b == 0).unwrap_or(MNEMONIC_LEN);
        let padded = mnemonic[len..].iter().all(|&b| b == 0);
        if !padded || !mnemonic[..len].iter().all(u8::is_ascii_graphic) {
            return Err(TableError::Malformed(format!("invalid mnemonic bytes {:02X?}", mnemonic)));
        }

        let mode = AddressingMode::try_from(record[MNEMONIC_LEN])
            .map_err(|b| TableError::Malformed(format!("unknown addressing mode {}", b)))?;

        let mut bytes = [0; MNEMONIC_LEN];
        bytes.copy_from_slice(mnemonic);
        Ok(Self { mnemonic: bytes, mode })
    }

    pub fn mnemonic(&self) -> &str {
        let len = self.mnemonic.iter().position(|&b| b == 0).unwrap_or(MNEMONIC_LEN);
        std::str::from_utf8(&self.mnemonic[..len]).unwrap_or_default()
    }

    pub fn mode(&self) -> AddressingMode {
        self.mode
    }

    pub fn is_sentinel(&self) -> bool {
        self.mnemonic[0] == 0
    }
}

impl fmt::Display for InstructionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:?})", self.mnemonic(), self.mode)
    }
}

/*
 * Opcode byte -> descriptor index, plus the distinct descriptors.
 *
 * File layout: 256 index bytes, then N records of RECORD_SIZE bytes each
 * (NUL-padded ASCII mnemonic, addressing mode byte). A table value can only
 * be obtained through a loader, so every lookup happens after a load.
 */
#[derive(Debug, Clone)]
pub struct InstructionTable {
    lookup: [u8; OPCODE_COUNT],
    descriptors: Vec<InstructionDescriptor>,
}

impl InstructionTable {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, TableError> {
        let path = path.as_ref();
        let data = fs::read(path).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                TableError::Missing { path: path.to_path_buf() }
            } else {
                TableError::Io { path: path.to_path_buf(), source: e }
            }
        })?;
        debug!("Instruction table {} = {} bytes", path.display(), data.len());
        Self::from_bytes(&data)
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, TableError> {
        // Size first, records second
        if data.len() < OPCODE_COUNT + RECORD_SIZE
            || (data.len() - OPCODE_COUNT) % RECORD_SIZE != 0
        {
            return Err(TableError::Malformed(format!(
                "expected {} index bytes plus a whole number of {}-byte records, got {} bytes",
                OPCODE_COUNT,
                RECORD_SIZE,
                data.len()
            )));
        }

        let (index, records) = data.split_at(OPCODE_COUNT);
        let descriptors = records
            .chunks_exact(RECORD_SIZE)
            .map(InstructionDescriptor::from_record)
            .collect::<Result<Vec<_>, _>>()?;

        let mut lookup = [0; OPCODE_COUNT];
        lookup.copy_from_slice(index);
        Self::new(lookup, descriptors)
    }

    pub fn new(
        lookup: [u8; OPCODE_COUNT],
        descriptors: Vec<InstructionDescriptor>,
    ) -> Result<Self, TableError> {
        if descriptors.is_empty() || descriptors.len() > OPCODE_COUNT {
            return Err(TableError::Malformed(format!(
                "{} descriptors, expected 1 to {}",
                descriptors.len(),
                OPCODE_COUNT
            )));
        }
        let dangling = lookup
            .iter()
            .enumerate()
            .find(|&(_, &i)| i as usize >= descriptors.len());
        if let Some((opcode, &i)) = dangling {
            return Err(TableError::Malformed(format!(
                "opcode {:02X} refers to descriptor {} of {}",
                opcode,
                i,
                descriptors.len()
            )));
        }
        debug!("Instruction table loaded with {} descriptors", descriptors.len());
        Ok(Self { lookup, descriptors })
    }

    /// The documented 6502 instruction set. Undocumented opcodes map to the
    /// sentinel descriptor.
    pub fn official() -> Self {
        let mut lookup = [0; OPCODE_COUNT];
        let mut descriptors = vec![InstructionDescriptor::SENTINEL];
        for opcode in 0..=u8::MAX {
            if let Some(&(mnemonic, mode)) = OFFICIAL_OPCODES.get(&opcode) {
                let mut bytes = [0; MNEMONIC_LEN];
                bytes.copy_from_slice(mnemonic.as_bytes());
                lookup[opcode as usize] = descriptors.len() as u8;
                descriptors.push(InstructionDescriptor { mnemonic: bytes, mode });
            }
        }
        Self { lookup, descriptors }
    }

    pub fn lookup(&self, opcode: u8) -> &InstructionDescriptor {
        &self.descriptors[self.lookup[opcode as usize] as usize]
    }

    pub fn descriptors(&self) -> &[InstructionDescriptor] {
        &self.descriptors
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(OPCODE_COUNT + self.descriptors.len() * RECORD_SIZE);
        bytes.extend_from_slice(&self.lookup);
        for d in &self.descriptors {
            bytes.extend_from_slice(&d.mnemonic);
            bytes.push(d.mode.into());
        }
        bytes
    }
}
