use nes_disasm::header::{Flags6, Flags7};
use nes_disasm::instruction::OPCODE_COUNT;
use nes_disasm::{
    AddressingMode, Cassette, DeviceMode, Disassembler, Header, InstructionDescriptor,
    InstructionTable, Line, Nes, StopReason,
};

fn image(program: &[u8]) -> Vec<u8> {
    let header = Header::new(1, 0, Flags6::empty(), Flags7::empty()).unwrap();
    let mut bytes = header.to_bytes().to_vec();
    bytes.extend_from_slice(program);
    bytes.resize(16 + 16384, 0);
    bytes
}

fn lda_only_table() -> InstructionTable {
    let mut lookup = [0; OPCODE_COUNT];
    lookup[0xA9] = 1;
    let descriptors = vec![
        InstructionDescriptor::SENTINEL,
        InstructionDescriptor::new("LDA", AddressingMode::Immediate).unwrap(),
    ];
    InstructionTable::new(lookup, descriptors).unwrap()
}

#[test]
fn lda_immediate_from_the_program_base() {
    let mut nes = Nes::new();
    nes.insert(Cassette::from_bytes(&image(&[0xA9, 0x42])).unwrap());

    let table = InstructionTable::from_bytes(&lda_only_table().to_bytes()).unwrap();
    let mut disasm = nes.disassemble(&table).unwrap();
    let lines: Vec<String> = disasm.by_ref().map(|l| l.to_string()).collect();

    assert_eq!(lines, vec!["LDA #$42", "End of segment"]);
    assert_eq!(disasm.stop_reason(), Some(StopReason::Sentinel { opcode: 0x00, addr: 0x8002 }));
}

#[test]
fn official_table_keeps_decoding_after_the_first_line() {
    let program = [0xA9, 0x42, 0xAA, 0xE8, 0xD0, 0xFC, 0xFF];
    let cassette = Cassette::from_bytes(&image(&program)).unwrap();
    let table = InstructionTable::official();
    let lines: Vec<Line> = Disassembler::new(&cassette, &table).collect();

    let text: Vec<String> = lines.iter().map(|l| l.to_string()).collect();
    assert_eq!(text, vec!["LDA #$42", "TAX", "INX", "BNE $FC", "End of segment"]);
    assert_eq!(
        lines[3],
        Line::Instruction {
            address: 0x8004,
            text: "BNE $FC".to_string()
        }
    );
}

#[test]
fn every_program_byte_is_readable_and_nothing_else() {
    let program: Vec<u8> = (0..16384).map(|i| (i * 7) as u8).collect();
    let cassette = Cassette::from_bytes(&image(&program)).unwrap();

    let base = cassette.base_address(DeviceMode::Program);
    let max = cassette.max_address(DeviceMode::Program);
    assert_eq!(max - base + 1, 16384);

    for (i, &b) in program.iter().enumerate() {
        assert_eq!(cassette.read(base + i as u32, DeviceMode::Program), Ok(b));
    }
    assert!(cassette.read(base - 1, DeviceMode::Program).is_err());
    assert!(cassette.read(max + 1, DeviceMode::Program).is_err());
}

#[test]
fn truncated_image_leaves_the_console_unchanged() {
    let mut nes = Nes::new();
    nes.insert(Cassette::from_bytes(&image(&[0xEA])).unwrap());

    let mut short = image(&[]);
    short.truncate(1000);
    assert!(Cassette::from_bytes(&short).is_err());

    assert_eq!(nes.cassette().unwrap().read(0x8000, DeviceMode::Program), Ok(0xEA));
}
