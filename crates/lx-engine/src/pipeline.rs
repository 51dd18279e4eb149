//! Compression pipeline.
//!
//! Ties the tokenizer, vocabulary tables, phrase mining, segmentation and
//! the stream codec together into compress/decompress entry points.

use lx_core::{EngineConfig, LexError, Result, Table, Token};
use serde::Serialize;
use std::collections::HashMap;

use crate::phrase::{PhraseMiner, PhraseSet};
use crate::segmenter::Segmenter;
use crate::stream;
use crate::tokenizer::{detokenize, Tokenizer};
use crate::vocab::VocabTable;

/// Primary table plus phrase table, persisted between compression and
/// decompression. The overflow table is document-specific and travels
/// inside the payload instead.
#[derive(Debug, Clone)]
pub struct Dictionary {
    pub primary: VocabTable,
    pub phrases: PhraseSet,
}

/// Compression statistics.
#[derive(Debug, Clone, Serialize)]
pub struct CompressionStats {
    pub original_len: usize,
    pub compressed_len: usize,
    pub reduction_pct: f64,
    pub token_count: usize,
    pub entry_count: usize,
    pub primary_words: usize,
    pub overflow_words: usize,
    pub fixed_phrases: usize,
    pub wildcard_phrases: usize,
}

impl CompressionStats {
    pub fn ratio(&self) -> f64 {
        if self.original_len == 0 {
            return 1.0;
        }
        self.compressed_len as f64 / self.original_len as f64
    }
}

/// Everything a compression run produces: the payload, the dictionary it
/// must be decoded with, and the run statistics.
#[derive(Debug, Clone)]
pub struct CompressedDoc {
    pub payload: Vec<u8>,
    pub dictionary: Dictionary,
    pub stats: CompressionStats,
}

/// The phrase-aware two-tier compressor.
///
/// Each call owns its tables, trie and bit buffers; independent documents
/// can be processed concurrently with separate instances or a shared one,
/// since compression takes `&self`.
pub struct Compressor {
    config: EngineConfig,
    tokenizer: Tokenizer,
}

impl Compressor {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            tokenizer: Tokenizer::new(),
        }
    }

    /// Compress `text` against a canonical word list.
    ///
    /// The primary table is rebuilt from the canonical list and fresh
    /// frequency counts on every run, then frozen before phrase mining
    /// starts (mining never grows it).
    pub fn compress(&self, text: &str, canonical: &[String]) -> Result<CompressedDoc> {
        let tokens = self.tokenizer.tokenize(text);
        tracing::debug!(tokens = tokens.len(), "tokenized input");

        let mut frequencies: HashMap<String, u32> = HashMap::new();
        for token in &tokens {
            *frequencies.entry(token.clone()).or_insert(0) += 1;
        }
        let primary = VocabTable::ranked(canonical, &frequencies);

        let phrases = PhraseMiner::new(&self.config).mine(&tokens, &primary)?;
        let overflow = Segmenter::overflow_table(&primary, &tokens);
        tracing::debug!(
            primary = primary.len(),
            overflow = overflow.len(),
            phrases = phrases.len(),
            "tables built"
        );

        let stream_tokens = Segmenter::new(&primary, &overflow, &phrases).segment(&tokens)?;
        let payload = stream::encode(&stream_tokens, &primary, &overflow, &phrases)?;

        let entry_count = stream_tokens
            .iter()
            .filter(|t| !matches!(t, Token::WildcardFiller { .. }))
            .count();
        let wildcard_phrases = phrases.records().iter().filter(|r| r.has_wildcard).count();
        let stats = CompressionStats {
            original_len: text.len(),
            compressed_len: payload.len(),
            reduction_pct: reduction_pct(text.len(), payload.len()),
            token_count: tokens.len(),
            entry_count,
            primary_words: primary.len(),
            overflow_words: overflow.len(),
            fixed_phrases: phrases.len() - wildcard_phrases,
            wildcard_phrases,
        };
        tracing::debug!(
            compressed = stats.compressed_len,
            reduction_pct = stats.reduction_pct,
            "encoding finished"
        );

        Ok(CompressedDoc {
            payload,
            dictionary: Dictionary { primary, phrases },
            stats,
        })
    }

    /// Restore text from a payload and the dictionary its run produced.
    pub fn decompress(&self, payload: &[u8], dictionary: &Dictionary) -> Result<String> {
        let (overflow, tokens) = stream::decode(payload, &dictionary.primary, &dictionary.phrases)?;
        let words = resolve_tokens(&tokens, dictionary, &overflow)?;
        Ok(detokenize(&words))
    }
}

impl Default for Compressor {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

fn reduction_pct(original: usize, compressed: usize) -> f64 {
    if original == 0 || compressed >= original {
        return 0.0;
    }
    ((original - compressed) as f64 / original as f64) * 100.0
}

/// Expand a decoded token stream back into raw words.
fn resolve_tokens(
    tokens: &[Token],
    dictionary: &Dictionary,
    overflow: &VocabTable,
) -> Result<Vec<String>> {
    let lookup = |code: u32, table: Table| -> Result<String> {
        let word = match table {
            Table::Primary => dictionary.primary.decode(code)?,
            Table::Overflow => overflow.decode(code)?,
        };
        Ok(word.to_string())
    };

    let mut words = Vec::with_capacity(tokens.len());
    let mut iter = tokens.iter();
    while let Some(token) = iter.next() {
        match *token {
            Token::Word { code, table } => words.push(lookup(code, table)?),
            Token::Phrase { phrase_id } => {
                let record = dictionary.phrases.get(phrase_id)?;
                let filler = if record.has_wildcard {
                    match iter.next() {
                        Some(&Token::WildcardFiller { code, table }) => Some(lookup(code, table)?),
                        _ => {
                            return Err(LexError::MalformedStream(format!(
                                "wildcard phrase {phrase_id} has no filler"
                            )))
                        }
                    }
                } else {
                    None
                };
                for (i, &code) in record.word_codes.iter().enumerate() {
                    if record.wildcard_pos == Some(i) {
                        let word = filler.as_ref().ok_or_else(|| {
                            LexError::MalformedStream(format!(
                                "phrase {phrase_id} marks position {i} as wildcard without a filler"
                            ))
                        })?;
                        words.push(word.clone());
                    } else {
                        words.push(dictionary.primary.decode(code)?.to_string());
                    }
                }
            }
            Token::WildcardFiller { .. } => {
                return Err(LexError::MalformedStream(
                    "wildcard filler outside a phrase".into(),
                ))
            }
        }
    }
    Ok(words)
}
