/*
 * Cartridge loading and 6502 disassembly for the NES.
 *
 * header      - iNES header and flag bits
 * cassette    - cartridge sections and bounds-checked address spaces
 * instruction - addressing modes, descriptors and the opcode table
 * opcodes     - the documented 6502 opcode set
 * operand     - operand decoding and rendering
 * disasm      - line-by-line disassembly of the program space
 * nes         - owner of the inserted cartridge
 */

#[macro_use]
extern crate log;

pub mod cassette;
pub mod disasm;
pub mod header;
pub mod instruction;
pub mod nes;
pub mod opcodes;
pub mod operand;

pub use cassette::{Address, BoundsError, Cassette, DeviceMode};
pub use disasm::{Disassembler, Line, StopReason};
pub use header::{Header, ParseError};
pub use instruction::{AddressingMode, InstructionDescriptor, InstructionTable, TableError};
pub use nes::{Nes, NoCartridgeError};
pub use operand::{decode, ByteCursor, ByteStream, DecodeError};

#[cfg(test)]
mod test_utils;
