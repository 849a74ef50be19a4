use thiserror::Error;

use super::cassette::Cassette;
use super::disasm::Disassembler;
use super::instruction::InstructionTable;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("no cartridge has been inserted")]
pub struct NoCartridgeError;

/*
 * Holds the inserted cartridge. Replacing it drops every section of the
 * previous one; readers borrow it, so no read can overlap an insert.
 */
#[derive(Debug, Default)]
pub struct Nes {
    cassette: Option<Cassette>,
}

impl Nes {
    pub fn new() -> Self {
        Self { cassette: None }
    }

    pub fn with_cassette(cassette: Cassette) -> Self {
        Self {
            cassette: Some(cassette),
        }
    }

    /// Inserts `cassette`, dropping the one it replaces.
    pub fn insert(&mut self, cassette: Cassette) {
        info!(
            "Inserting cartridge ({} bytes PRG ROM, {} bytes CHR ROM)",
            cassette.prg_rom().len(),
            cassette.chr_rom().len()
        );
        if self.cassette.replace(cassette).is_some() {
            info!("Previous cartridge released");
        }
    }

    pub fn eject(&mut self) -> Option<Cassette> {
        self.cassette.take()
    }

    pub fn cassette(&self) -> Result<&Cassette, NoCartridgeError> {
        self.cassette.as_ref().ok_or(NoCartridgeError)
    }

    pub fn disassemble<'a>(
        &'a self,
        table: &'a InstructionTable,
    ) -> Result<Disassembler<'a>, NoCartridgeError> {
        Ok(Disassembler::new(self.cassette()?, table))
    }
}
