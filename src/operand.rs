use thiserror::Error;

use super::instruction::AddressingMode;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("operand needs {needed} bytes but only {remaining} remain")]
    Truncated { needed: usize, remaining: usize },
}

/// Bytes an operand is decoded from.
pub trait ByteStream {
    /// Bytes that may still be fetched before the stream's limit.
    fn remaining(&self) -> usize;

    fn fetch_byte(&mut self) -> Option<u8>;

    fn fetch_word(&mut self) -> Option<u16> {
        let l = self.fetch_byte()? as u16;
        let h = self.fetch_byte()? as u16;
        Some(h << 8 | l)
    }
}

pub struct ByteCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }
}

impl ByteStream for ByteCursor<'_> {
    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn fetch_byte(&mut self) -> Option<u8> {
        let b = *self.data.get(self.pos)?;
        self.pos += 1;
        Some(b)
    }
}

/// Renders the operand for `mode`, returning the text and the number of bytes consumed.
///
/// Nothing is consumed when the stream is too short.
pub fn decode<S: ByteStream>(
    mode: AddressingMode,
    stream: &mut S,
) -> Result<(String, usize), DecodeError> {
    let needed = mode.operand_len();
    let remaining = stream.remaining();
    if remaining < needed {
        return Err(DecodeError::Truncated { needed, remaining });
    }

    let text = match needed {
        0 => render(mode, Some(0)),
        1 => render(mode, stream.fetch_byte().map(u16::from)),
        _ => render(mode, stream.fetch_word()),
    }
    .ok_or(DecodeError::Truncated { needed, remaining })?;

    Ok((text, needed))
}

fn render(mode: AddressingMode, operand: Option<u16>) -> Option<String> {
    let v = operand?;
    let text = match mode {
        AddressingMode::Implied => String::new(),
        AddressingMode::Accumulator => " A".to_string(),
        AddressingMode::Immediate => format!(" #${:02X}", v),
        AddressingMode::Relative | AddressingMode::ZeroPage => format!(" ${:02X}", v),
        AddressingMode::Absolute => format!(" ${:04X}", v),
        AddressingMode::Indirect => format!(" (${:02X})", v),
        AddressingMode::AbsoluteIndirect => format!(" (${:04X})", v),
        AddressingMode::AbsoluteX => format!(" ${:04X},X", v),
        AddressingMode::AbsoluteY => format!(" ${:04X},Y", v),
        AddressingMode::ZeroPageX => format!(" ${:02X},X", v),
        AddressingMode::ZeroPageY => format!(" ${:02X},Y", v),
        AddressingMode::IndexedIndirectX => format!(" (${:02X},X)", v),
        AddressingMode::IndirectIndexedY => format!(" (${:02X}),Y", v),
    };
    Some(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_bytes(mode: AddressingMode, bytes: &[u8]) -> Result<(String, usize), DecodeError> {
        decode(mode, &mut ByteCursor::new(bytes))
    }

    #[test]
    fn renders_every_mode() {
        let cases = [
            (AddressingMode::Implied, "", 0),
            (AddressingMode::Accumulator, " A", 0),
            (AddressingMode::Immediate, " #$34", 1),
            (AddressingMode::Relative, " $34", 1),
            (AddressingMode::ZeroPage, " $34", 1),
            (AddressingMode::Absolute, " $1234", 2),
            (AddressingMode::Indirect, " ($34)", 1),
            (AddressingMode::AbsoluteIndirect, " ($1234)", 2),
            (AddressingMode::AbsoluteX, " $1234,X", 2),
            (AddressingMode::AbsoluteY, " $1234,Y", 2),
            (AddressingMode::ZeroPageX, " $34,X", 1),
            (AddressingMode::ZeroPageY, " $34,Y", 1),
            (AddressingMode::IndexedIndirectX, " ($34,X)", 1),
            (AddressingMode::IndirectIndexedY, " ($34),Y", 1),
        ];

        for &(mode, text, len) in cases.iter() {
            let decoded = decode_bytes(mode, &[0x34, 0x12, 0xFF]);
            assert_eq!(decoded, Ok((text.to_string(), len)), "{:?}", mode);
        }
    }

    #[test]
    fn immediate_is_always_two_hex_digits() {
        for b in 0..=u8::MAX {
            let (text, len) = decode_bytes(AddressingMode::Immediate, &[b]).unwrap();
            assert_eq!(len, 1);
            assert_eq!(text, format!(" #${:02X}", b));
            assert_eq!(text.trim_start_matches(" #$").len(), 2);
        }
    }

    #[test]
    fn pads_with_leading_zeros() {
        assert_eq!(decode_bytes(AddressingMode::Absolute, &[0x0A, 0x00]).unwrap().0, " $000A");
        assert_eq!(decode_bytes(AddressingMode::ZeroPage, &[0x05]).unwrap().0, " $05");
    }

    #[test]
    fn short_stream_is_truncated_without_consuming() {
        let bytes = [0x34];
        let mut cursor = ByteCursor::new(&bytes);
        assert_eq!(
            decode(AddressingMode::Absolute, &mut cursor),
            Err(DecodeError::Truncated { needed: 2, remaining: 1 })
        );
        assert_eq!(cursor.position(), 0);

        assert!(decode_bytes(AddressingMode::Immediate, &[]).is_err());
        assert_eq!(decode_bytes(AddressingMode::Accumulator, &[]), Ok((" A".to_string(), 0)));
    }
}
