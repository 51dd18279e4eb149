//! Canonical word list loading.

use lx_core::Result;
use std::fs;
use std::path::Path;

/// Load a canonical word list: one word per line, lowercased, blank lines
/// skipped. The order is significant; it breaks frequency ties when the
/// primary table is ranked.
pub fn load_word_list(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path)?;
    Ok(parse_word_list(&text))
}

pub fn parse_word_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| line.to_lowercase())
        .collect()
}
