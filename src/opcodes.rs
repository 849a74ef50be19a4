use phf::phf_map;

use super::instruction::AddressingMode;
use super::instruction::AddressingMode::*;

// Documented NMOS 6502 opcodes, https://www.masswerk.at/6502/6502_instruction_set.html
pub static OFFICIAL_OPCODES: phf::Map<u8, (&'static str, AddressingMode)> = phf_map! {
    0x00u8 => ("BRK", Implied),
    0x01u8 => ("ORA", IndexedIndirectX),
    0x05u8 => ("ORA", ZeroPage),
    0x06u8 => ("ASL", ZeroPage),
    0x08u8 => ("PHP", Implied),
    0x09u8 => ("ORA", Immediate),
    0x0Au8 => ("ASL", Accumulator),
    0x0Du8 => ("ORA", Absolute),
    0x0Eu8 => ("ASL", Absolute),
    0x10u8 => ("BPL", Relative),
    0x11u8 => ("ORA", IndirectIndexedY),
    0x15u8 => ("ORA", ZeroPageX),
    0x16u8 => ("ASL", ZeroPageX),
    0x18u8 => ("CLC", Implied),
    0x19u8 => ("ORA", AbsoluteY),
    0x1Du8 => ("ORA", AbsoluteX),
    0x1Eu8 => ("ASL", AbsoluteX),
    0x20u8 => ("JSR", Absolute),
    0x21u8 => ("AND", IndexedIndirectX),
    0x24u8 => ("BIT", ZeroPage),
    0x25u8 => ("AND", ZeroPage),
    0x26u8 => ("ROL", ZeroPage),
    0x28u8 => ("PLP", Implied),
    0x29u8 => ("AND", Immediate),
    0x2Au8 => ("ROL", Accumulator),
    0x2Cu8 => ("BIT", Absolute),
    0x2Du8 => ("AND", Absolute),
    0x2Eu8 => ("ROL", Absolute),
    0x30u8 => ("BMI", Relative),
    0x31u8 => ("AND", IndirectIndexedY),
    0x35u8 => ("AND", ZeroPageX),
    0x36u8 => ("ROL", ZeroPageX),
    0x38u8 => ("SEC", Implied),
    0x39u8 => ("AND", AbsoluteY),
    0x3Du8 => ("AND", AbsoluteX),
    0x3Eu8 => ("ROL", AbsoluteX),
    0x40u8 => ("RTI", Implied),
    0x41u8 => ("EOR", IndexedIndirectX),
    0x45u8 => ("EOR", ZeroPage),
    0x46u8 => ("LSR", ZeroPage),
    0x48u8 => ("PHA", Implied),
    0x49u8 => ("EOR", Immediate),
    0x4Au8 => ("LSR", Accumulator),
    0x4Cu8 => ("JMP", Absolute),
    0x4Du8 => ("EOR", Absolute),
    0x4Eu8 => ("LSR", Absolute),
    0x50u8 => ("BVC", Relative),
    0x51u8 => ("EOR", IndirectIndexedY),
    0x55u8 => ("EOR", ZeroPageX),
    0x56u8 => ("LSR", ZeroPageX),
    0x58u8 => ("CLI", Implied),
    0x59u8 => ("EOR", AbsoluteY),
    0x5Du8 => ("EOR", AbsoluteX),
    0x5Eu8 => ("LSR", AbsoluteX),
    0x60u8 => ("RTS", Implied),
    0x61u8 => ("ADC", IndexedIndirectX),
    0x65u8 => ("ADC", ZeroPage),
    0x66u8 => ("ROR", ZeroPage),
    0x68u8 => ("PLA", Implied),
    0x69u8 => ("ADC", Immediate),
    0x6Au8 => ("ROR", Accumulator),
    0x6Cu8 => ("JMP", AbsoluteIndirect),
    0x6Du8 => ("ADC", Absolute),
    0x6Eu8 => ("ROR", Absolute),
    0x70u8 => ("BVS", Relative),
    0x71u8 => ("ADC", IndirectIndexedY),
    0x75u8 => ("ADC", ZeroPageX),
    0x76u8 => ("ROR", ZeroPageX),
    0x78u8 => ("SEI", Implied),
    0x79u8 => ("ADC", AbsoluteY),
    0x7Du8 => ("ADC", AbsoluteX),
    0x7Eu8 => ("ROR", AbsoluteX),
    0x81u8 => ("STA", IndexedIndirectX),
    0x84u8 => ("STY", ZeroPage),
    0x85u8 => ("STA", ZeroPage),
    0x86u8 => ("STX", ZeroPage),
    0x88u8 => ("DEY", Implied),
    0x8Au8 => ("TXA", Implied),
    0x8Cu8 => ("STY", Absolute),
    0x8Du8 => ("STA", Absolute),
    0x8Eu8 => ("STX", Absolute),
    0x90u8 => ("BCC", Relative),
    0x91u8 => ("STA", IndirectIndexedY),
    0x94u8 => ("STY", ZeroPageX),
    0x95u8 => ("STA", ZeroPageX),
    0x96u8 => ("STX", ZeroPageY),
    0x98u8 => ("TYA", Implied),
    0x99u8 => ("STA", AbsoluteY),
    0x9Au8 => ("TXS", Implied),
    0x9Du8 => ("STA", AbsoluteX),
    0xA0u8 => ("LDY", Immediate),
    0xA1u8 => ("LDA", IndexedIndirectX),
    0xA2u8 => ("LDX", Immediate),
    0xA4u8 => ("LDY", ZeroPage),
    0xA5u8 => ("LDA", ZeroPage),
    0xA6u8 => ("LDX", ZeroPage),
    0xA8u8 => ("TAY", Implied),
    0xA9u8 => ("LDA", Immediate),
    0xAAu8 => ("TAX", Implied),
    0xACu8 => ("LDY", Absolute),
    0xADu8 => ("LDA", Absolute),
    0xAEu8 => ("LDX", Absolute),
    0xB0u8 => ("BCS", Relative),
    0xB1u8 => ("LDA", IndirectIndexedY),
    0xB4u8 => ("LDY", ZeroPageX),
    0xB5u8 => ("LDA", ZeroPageX),
    0xB6u8 => ("LDX", ZeroPageY),
    0xB8u8 => ("CLV", Implied),
    0xB9u8 => ("LDA", AbsoluteY),
    0xBAu8 => ("TSX", Implied),
    0xBCu8 => ("LDY", AbsoluteX),
    0xBDu8 => ("LDA", AbsoluteX),
    0xBEu8 => ("LDX", AbsoluteY),
    0xC0u8 => ("CPY", Immediate),
    0xC1u8 => ("CMP", IndexedIndirectX),
    0xC4u8 => ("CPY", ZeroPage),
    0xC5u8 => ("CMP", ZeroPage),
    0xC6u8 => ("DEC", ZeroPage),
    0xC8u8 => ("INY", Implied),
    0xC9u8 => ("CMP", Immediate),
    0xCAu8 => ("DEX", Implied),
    0xCCu8 => ("CPY", Absolute),
    0xCDu8 => ("CMP", Absolute),
    0xCEu8 => ("DEC", Absolute),
    0xD0u8 => ("BNE", Relative),
    0xD1u8 => ("CMP", IndirectIndexedY),
    0xD5u8 => ("CMP", ZeroPageX),
    0xD6u8 => ("DEC", ZeroPageX),
    0xD8u8 => ("CLD", Implied),
    0xD9u8 => ("CMP", AbsoluteY),
    0xDDu8 => ("CMP", AbsoluteX),
    0xDEu8 => ("DEC", AbsoluteX),
    0xE0u8 => ("CPX", Immediate),
    0xE1u8 => ("SBC", IndexedIndirectX),
    0xE4u8 => ("CPX", ZeroPage),
    0xE5u8 => ("SBC", ZeroPage),
    0xE6u8 => ("INC", ZeroPage),
    0xE8u8 => ("INX", Implied),
    0xE9u8 => ("SBC", Immediate),
    0xEAu8 => ("NOP", Implied),
    0xECu8 => ("CPX", Absolute),
    0xEDu8 => ("SBC", Absolute),
    0xEEu8 => ("INC", Absolute),
    0xF0u8 => ("BEQ", Relative),
    0xF1u8 => ("SBC", IndirectIndexedY),
    0xF5u8 => ("SBC", ZeroPageX),
    0xF6u8 => ("INC", ZeroPageX),
    0xF8u8 => ("SED", Implied),
    0xF9u8 => ("SBC", AbsoluteY),
    0xFDu8 => ("SBC", AbsoluteX),
    0xFEu8 => ("INC", AbsoluteX),
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn covers_the_documented_set() {
        assert_eq!(OFFICIAL_OPCODES.len(), 151);
        assert!(OFFICIAL_OPCODES.values().all(|(m, _)| m.len() == 3));
    }

    #[test]
    fn jmp_variants() {
        assert_eq!(OFFICIAL_OPCODES.get(&0x4C), Some(&("JMP", Absolute)));
        assert_eq!(OFFICIAL_OPCODES.get(&0x6C), Some(&("JMP", AbsoluteIndirect)));
    }
}
