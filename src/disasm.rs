use std::fmt;
use std::io::{self, Write};

use super::cassette::Address;
use super::cassette::Cassette;
use super::cassette::DeviceMode;
use super::instruction::InstructionTable;
use super::operand::{self, ByteStream};

pub const END_OF_SEGMENT: &str = "End of segment";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The cursor reached the end of the range or left the program space.
    EndOfRange,
    /// The opcode has no instruction assigned.
    Sentinel { opcode: u8, addr: Address },
    /// The operand would run past the end of the range.
    Truncated { addr: Address },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Instruction { address: Address, text: String },
    EndOfSegment,
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Line::Instruction { text, .. } => f.write_str(text),
            Line::EndOfSegment => f.write_str(END_OF_SEGMENT),
        }
    }
}

/*
 * Operand bytes come from the program space, never past `end`.
 */
struct ProgramCursor<'a> {
    cassette: &'a Cassette,
    pos: Address,
    end: Address,
}

impl ByteStream for ProgramCursor<'_> {
    fn remaining(&self) -> usize {
        let limit = self.end.min(self.cassette.max_address(DeviceMode::Program) + 1);
        limit.saturating_sub(self.pos) as usize
    }

    fn fetch_byte(&mut self) -> Option<u8> {
        if self.pos >= self.end {
            return None;
        }
        let b = self.cassette.read(self.pos, DeviceMode::Program).ok()?;
        self.pos += 1;
        Some(b)
    }
}

/// Walks the program space over `[pc, end)`, yielding one line per
/// instruction and a final `Line::EndOfSegment`.
///
/// A run cannot be resumed once it stops; create a new one instead.
pub struct Disassembler<'a> {
    cassette: &'a Cassette,
    table: &'a InstructionTable,
    pc: Address,
    end: Address,
    stop: Option<StopReason>,
    marked: bool,
}

impl<'a> Disassembler<'a> {
    /// Covers the whole program space.
    pub fn new(cassette: &'a Cassette, table: &'a InstructionTable) -> Self {
        let min = cassette.base_address(DeviceMode::Program);
        let end = cassette.max_address(DeviceMode::Program) + 1;
        Self::with_range(cassette, table, min, end)
    }

    pub fn with_range(
        cassette: &'a Cassette,
        table: &'a InstructionTable,
        min: Address,
        end: Address,
    ) -> Self {
        debug!("Disassembling ${:04X}..${:04X}", min, end);
        Self {
            cassette,
            table,
            pc: min,
            end,
            stop: None,
            marked: false,
        }
    }

    pub fn pc(&self) -> Address {
        self.pc
    }

    /// Why the run ended, once it has.
    pub fn stop_reason(&self) -> Option<StopReason> {
        self.stop
    }

    /// Writes every remaining line to `out`.
    pub fn run<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        for line in self {
            writeln!(out, "{}", line)?;
        }
        Ok(())
    }

    fn step(&mut self) -> Result<Line, StopReason> {
        if self.pc >= self.end {
            return Err(StopReason::EndOfRange);
        }

        let address = self.pc;
        let opcode = self
            .cassette
            .read(address, DeviceMode::Program)
            .map_err(|_| StopReason::EndOfRange)?;

        let descriptor = self.table.lookup(opcode);
        if descriptor.is_sentinel() {
            return Err(StopReason::Sentinel { opcode, addr: address });
        }

        let mut cursor = ProgramCursor {
            cassette: self.cassette,
            pos: address + 1,
            end: self.end,
        };
        let (operand, consumed) = operand::decode(descriptor.mode(), &mut cursor)
            .map_err(|_| StopReason::Truncated { addr: address })?;

        self.pc = address + 1 + consumed as Address;
        Ok(Line::Instruction {
            address,
            text: format!("{}{}", descriptor.mnemonic(), operand),
        })
    }
}

impl Iterator for Disassembler<'_> {
    type Item = Line;

    fn next(&mut self) -> Option<Line> {
        if self.stop.is_none() {
            match self.step() {
                Ok(line) => return Some(line),
                Err(reason) => {
                    debug!("Disassembly stopped at ${:04X}: {:?}", self.pc, reason);
                    self.stop = Some(reason);
                }
            }
        }

        if self.marked {
            None
        } else {
            self.marked = true;
            Some(Line::EndOfSegment)
        }
    }
}
