//! Lossy normalizing tokenizer.
//!
//! Lowercases the input, keeps alphanumeric runs (apostrophes included) as
//! word tokens, and turns every other non-whitespace character into its own
//! single-character token. Case and the original whitespace are not
//! recoverable; the round-trip contract holds over the token sequence.

use regex::Regex;

/// Splits raw text into normalized tokens.
pub struct Tokenizer {
    token: Regex,
}

impl Tokenizer {
    pub fn new() -> Self {
        // One match per token: a word run, or a single non-word character.
        Self {
            token: Regex::new(r"[a-z0-9']+|[^a-z0-9'\s]").expect("token pattern is valid"),
        }
    }

    /// Tokenize `text` into lowercase word and punctuation tokens.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        self.token
            .find_iter(&lowered)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Reassemble tokens into text, one space between tokens.
///
/// Tokenizing the result reproduces the token sequence exactly, which is
/// what the compressor round-trips; byte-level whitespace is not preserved.
pub fn detokenize(tokens: &[String]) -> String {
    tokens.join(" ")
}
