//! Greedy longest-match segmentation.
//!
//! A single left-to-right pass turns raw tokens into the tagged stream the
//! codec serializes. Longest local match is not guaranteed to minimize the
//! encoded size; that approximation is accepted.

use lx_core::{LexError, Result, Table, Token};

use crate::phrase::PhraseSet;
use crate::vocab::VocabTable;

/// Segments a token sequence against the phrase trie and the two
/// vocabulary tables.
pub struct Segmenter<'a> {
    primary: &'a VocabTable,
    overflow: &'a VocabTable,
    phrases: &'a PhraseSet,
}

impl<'a> Segmenter<'a> {
    pub fn new(primary: &'a VocabTable, overflow: &'a VocabTable, phrases: &'a PhraseSet) -> Self {
        Self {
            primary,
            overflow,
            phrases,
        }
    }

    /// Pre-pass: the per-document overflow table holds every token the
    /// primary table does not cover, first occurrence first.
    pub fn overflow_table(primary: &VocabTable, tokens: &[String]) -> VocabTable {
        VocabTable::first_occurrence(
            tokens
                .iter()
                .filter(|t| !primary.contains(t))
                .map(String::as_str),
        )
    }

    /// Emit the tagged token stream for `tokens`.
    ///
    /// Every raw token must resolve against one of the two tables; a miss
    /// means the overflow pre-pass was skipped or given different input,
    /// and surfaces as [`LexError::UnknownWord`] rather than dropping the
    /// word.
    pub fn segment(&self, tokens: &[String]) -> Result<Vec<Token>> {
        let mut out = Vec::with_capacity(tokens.len());
        let mut i = 0;
        while i < tokens.len() {
            if let Some(found) = self.phrases.longest_match(tokens, i) {
                out.push(Token::Phrase {
                    phrase_id: found.phrase_id,
                });
                let record = self.phrases.get(found.phrase_id)?;
                if let Some(pos) = record.wildcard_pos {
                    let (code, table) = self.resolve(&tokens[i + pos])?;
                    out.push(Token::WildcardFiller { code, table });
                }
                i += found.span;
            } else {
                let (code, table) = self.resolve(&tokens[i])?;
                out.push(Token::Word { code, table });
                i += 1;
            }
        }
        Ok(out)
    }

    fn resolve(&self, word: &str) -> Result<(u32, Table)> {
        if let Some(code) = self.primary.code_of(word) {
            return Ok((code, Table::Primary));
        }
        if let Some(code) = self.overflow.code_of(word) {
            return Ok((code, Table::Overflow));
        }
        Err(LexError::UnknownWord {
            word: word.to_string(),
        })
    }
}
