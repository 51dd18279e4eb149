//! Word-to-code tables.
//!
//! Two instances back the compressor: a primary table ranked by corpus
//! frequency over the canonical word list, reused across documents, and a
//! per-document overflow table for words the primary table does not cover.

use lx_core::{LexError, Result, WordEntry};
use std::collections::HashMap;

/// Smallest width `b` with `2^b >= n`. Zero for empty and single-entry
/// tables, whose only code needs no bits at all.
pub fn bit_width_for(n: usize) -> u8 {
    let mut bits = 0u8;
    while (1usize << bits) < n {
        bits += 1;
    }
    bits
}

/// A dense word/code table with a derived fixed bit width.
///
/// Codes are exactly `0..len`, so `words[code]` decodes and the reverse map
/// encodes.
#[derive(Debug, Clone, Default)]
pub struct VocabTable {
    words: Vec<String>,
    codes: HashMap<String, u32>,
    bit_width: u8,
}

impl VocabTable {
    /// Primary table: canonical words ranked by observed corpus frequency,
    /// descending. Words absent from the corpus count as frequency 1, and
    /// the sort is stable, so canonical-list order breaks ties.
    pub fn ranked(canonical: &[String], frequencies: &HashMap<String, u32>) -> Self {
        let mut entries: Vec<WordEntry> = canonical
            .iter()
            .map(|w| WordEntry {
                word: w.clone(),
                frequency: frequencies.get(w).copied().unwrap_or(1),
            })
            .collect();
        entries.sort_by(|a, b| b.frequency.cmp(&a.frequency));
        Self::from_words(entries.into_iter().map(|e| e.word).collect())
    }

    /// Overflow table: first-occurrence order, deduplicated.
    pub fn first_occurrence<'a, I>(words: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut ordered = Vec::new();
        let mut codes = HashMap::new();
        for word in words {
            if !codes.contains_key(word) {
                codes.insert(word.to_string(), ordered.len() as u32);
                ordered.push(word.to_string());
            }
        }
        let bit_width = bit_width_for(ordered.len());
        Self {
            words: ordered,
            codes,
            bit_width,
        }
    }

    /// Table over `words` in the given order (decode side, loading a
    /// persisted dictionary).
    pub fn from_words(words: Vec<String>) -> Self {
        let codes = words
            .iter()
            .enumerate()
            .map(|(i, w)| (w.clone(), i as u32))
            .collect();
        let bit_width = bit_width_for(words.len());
        Self {
            words,
            codes,
            bit_width,
        }
    }

    /// Code for `word`, or [`LexError::UnknownWord`] if absent. Callers are
    /// expected to try the primary table first, then the overflow table.
    pub fn encode(&self, word: &str) -> Result<u32> {
        self.code_of(word).ok_or_else(|| LexError::UnknownWord {
            word: word.to_string(),
        })
    }

    /// Code for `word` if present.
    pub fn code_of(&self, word: &str) -> Option<u32> {
        self.codes.get(word).copied()
    }

    /// Word for `code`, or [`LexError::InvalidCode`] if out of range.
    pub fn decode(&self, code: u32) -> Result<&str> {
        self.words
            .get(code as usize)
            .map(String::as_str)
            .ok_or(LexError::InvalidCode {
                code,
                table_len: self.words.len(),
            })
    }

    pub fn contains(&self, word: &str) -> bool {
        self.codes.contains_key(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn bit_width(&self) -> u8 {
        self.bit_width
    }

    /// Words in code order.
    pub fn words(&self) -> &[String] {
        &self.words
    }
}
