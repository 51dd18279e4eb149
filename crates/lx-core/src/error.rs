use thiserror::Error;

#[derive(Error, Debug)]
pub enum LexError {
    #[error("Word not found in any table: {word}")]
    UnknownWord { word: String },
    #[error("Code out of range: {code} (table size {table_len})")]
    InvalidCode { code: u32, table_len: usize },
    #[error("Phrase id out of range: {id} (phrase table size {table_len})")]
    InvalidPhraseId { id: u32, table_len: usize },
    #[error("Bitstream ended early: needed {needed} bits, {remaining} remaining")]
    TruncatedStream { needed: u32, remaining: usize },
    #[error("Malformed stream: {0}")]
    MalformedStream(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LexError>;
