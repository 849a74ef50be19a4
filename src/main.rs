use std::env;
use std::fs;
use std::io::{self, Write};

#[macro_use]
extern crate log;

use nes_disasm::{Cassette, InstructionTable, Nes};

const USAGE: &str = "usage: nes-disasm [--header] <rom> [opcode-table]
       nes-disasm --write-table <path>";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().skip(1).collect();
    let (header_only, args) = match args.split_first() {
        Some((flag, rest)) if flag == "--header" => (true, rest),
        Some((flag, rest)) if flag == "--write-table" => {
            let path = rest.first().ok_or(USAGE)?;
            fs::write(path, InstructionTable::official().to_bytes())?;
            info!("Wrote instruction table to {}", path);
            return Ok(());
        }
        _ => (false, &args[..]),
    };

    let rom_filename = match args.first() {
        Some(name) => name,
        None => {
            error!("ROM filename is required");
            return Err(USAGE.into());
        }
    };
    debug!("ROM file = {}", rom_filename);

    let mut nes = Nes::new();
    nes.insert(Cassette::open(rom_filename)?);
    let cassette = nes.cassette()?;

    if header_only {
        println!("{}", cassette.header());
        return Ok(());
    }

    let table = match args.get(1) {
        Some(path) => InstructionTable::open(path)?,
        None => InstructionTable::official(),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    nes.disassemble(&table)?.run(&mut out)?;
    out.flush()?;

    Ok(())
}
