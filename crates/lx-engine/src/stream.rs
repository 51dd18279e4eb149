//! Bit-level payload encoding and decoding.
//!
//! Layout: overflow table block, entry count, then the tagged entries.
//! Tag assignment (uniquely decodable, every prefix resolves one way):
//! `0` primary word, `10` overflow word, `11` phrase id. A wildcard filler
//! carries no tag of its own; the decoder has just resolved the phrase
//! record and reads one filler field (1 table-select bit plus a code)
//! whenever the record has a wildcard.

use lx_core::{LexError, Result, Table, Token};

use crate::bitio::{BitReader, BitWriter};
use crate::phrase::PhraseSet;
use crate::vocab::VocabTable;

const OVERFLOW_SIZE_BITS: u8 = 32;
const TABLE_WIDTH_BITS: u8 = 8;
const WORD_LEN_BITS: u8 = 8;
const CHAR_BITS: u8 = 8;
const ENTRY_COUNT_BITS: u8 = 32;

/// Serialize the tagged token stream. The overflow table rides inside the
/// payload; the primary and phrase tables are persisted separately.
pub fn encode(
    tokens: &[Token],
    primary: &VocabTable,
    overflow: &VocabTable,
    phrases: &PhraseSet,
) -> Result<Vec<u8>> {
    let mut writer = BitWriter::new();

    writer.write_bits(overflow.len() as u32, OVERFLOW_SIZE_BITS);
    writer.write_bits(overflow.bit_width() as u32, TABLE_WIDTH_BITS);
    for word in overflow.words() {
        if word.len() > u8::MAX as usize {
            return Err(LexError::MalformedStream(format!(
                "overflow word exceeds {} bytes: {word:?}",
                u8::MAX
            )));
        }
        writer.write_bits(word.len() as u32, WORD_LEN_BITS);
        for &byte in word.as_bytes() {
            writer.write_bits(byte as u32, CHAR_BITS);
        }
    }

    // A phrase and its filler form one entry; decode stops exactly at this
    // count, so trailing flush padding is never interpreted as data.
    let entries = tokens
        .iter()
        .filter(|t| !matches!(t, Token::WildcardFiller { .. }))
        .count();
    writer.write_bits(entries as u32, ENTRY_COUNT_BITS);

    for token in tokens {
        match *token {
            Token::Word { code, table } => match table {
                Table::Primary => {
                    writer.write_bits(0b0, 1);
                    writer.write_bits(code, primary.bit_width());
                }
                Table::Overflow => {
                    writer.write_bits(0b10, 2);
                    writer.write_bits(code, overflow.bit_width());
                }
            },
            Token::Phrase { phrase_id } => {
                writer.write_bits(0b11, 2);
                writer.write_bits(phrase_id, phrases.bit_width());
            }
            Token::WildcardFiller { code, table } => match table {
                Table::Primary => {
                    writer.write_bits(0b0, 1);
                    writer.write_bits(code, primary.bit_width());
                }
                Table::Overflow => {
                    writer.write_bits(0b1, 1);
                    writer.write_bits(code, overflow.bit_width());
                }
            },
        }
    }

    Ok(writer.into_bytes())
}

/// Decode a payload back into the overflow table and the tagged token
/// stream. Codes and phrase ids are validated against their tables as they
/// are read.
pub fn decode(
    payload: &[u8],
    primary: &VocabTable,
    phrases: &PhraseSet,
) -> Result<(VocabTable, Vec<Token>)> {
    let mut reader = BitReader::new(payload);

    let overflow_len = reader.read_bits(OVERFLOW_SIZE_BITS)?;
    let overflow_width = reader.read_bits(TABLE_WIDTH_BITS)? as u8;
    if overflow_width > 32 {
        return Err(LexError::MalformedStream(format!(
            "overflow table width {overflow_width} exceeds 32 bits"
        )));
    }
    // Counts come from the wire and are untrusted; never size allocations
    // by them.
    let mut words = Vec::new();
    for _ in 0..overflow_len {
        let len = reader.read_bits(WORD_LEN_BITS)?;
        let mut bytes = Vec::with_capacity(len as usize);
        for _ in 0..len {
            bytes.push(reader.read_bits(CHAR_BITS)? as u8);
        }
        let word = String::from_utf8(bytes)
            .map_err(|e| LexError::MalformedStream(format!("overflow word is not UTF-8: {e}")))?;
        words.push(word);
    }
    let overflow = VocabTable::from_words(words);

    let entry_count = reader.read_bits(ENTRY_COUNT_BITS)?;
    let mut tokens = Vec::new();
    for _ in 0..entry_count {
        if reader.read_bits(1)? == 0 {
            let code = reader.read_bits(primary.bit_width())?;
            primary.decode(code)?;
            tokens.push(Token::Word {
                code,
                table: Table::Primary,
            });
        } else if reader.read_bits(1)? == 0 {
            let code = reader.read_bits(overflow_width)?;
            overflow.decode(code)?;
            tokens.push(Token::Word {
                code,
                table: Table::Overflow,
            });
        } else {
            let phrase_id = reader.read_bits(phrases.bit_width())?;
            let has_wildcard = phrases.get(phrase_id)?.has_wildcard;
            tokens.push(Token::Phrase { phrase_id });
            if has_wildcard {
                if reader.read_bits(1)? == 0 {
                    let code = reader.read_bits(primary.bit_width())?;
                    primary.decode(code)?;
                    tokens.push(Token::WildcardFiller {
                        code,
                        table: Table::Primary,
                    });
                } else {
                    let code = reader.read_bits(overflow_width)?;
                    overflow.decode(code)?;
                    tokens.push(Token::WildcardFiller {
                        code,
                        table: Table::Overflow,
                    });
                }
            }
        }
    }

    Ok((overflow, tokens))
}
