use serde::{Deserialize, Serialize};

/// Thresholds driving phrase mining.
///
/// All values are tunable; the defaults reproduce the reference behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Shortest n-gram length considered a phrase candidate.
    pub ngram_min: usize,
    /// Longest n-gram length considered a phrase candidate. Also caps the
    /// longest-match walk during segmentation.
    pub ngram_max: usize,
    /// A fixed n-gram is retained once it occurs this often.
    pub min_phrase_freq: u32,
    /// On small corpora (fewer distinct fixed n-grams than this), n-grams
    /// seen only once are retained as well.
    pub singleton_corpus_limit: usize,
    /// A wildcard pattern is retained once its occurrences, aggregated over
    /// all filler words, reach this count.
    pub min_wildcard_freq: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            ngram_min: 2,
            ngram_max: 5,
            min_phrase_freq: 2,
            singleton_corpus_limit: 1000,
            min_wildcard_freq: 2,
        }
    }
}
