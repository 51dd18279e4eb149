//! Phrase mining and longest-match lookup.
//!
//! Fixed n-grams and single-wildcard patterns are mined from the raw token
//! sequence of a document, filtered by the frequency thresholds in
//! [`EngineConfig`], and inserted into a trie used only for matching. The
//! flat record table is what the stream and the persisted dictionary refer
//! to; the trie itself is never serialized.

use lx_core::{EngineConfig, LexError, PhraseRecord, Result, WILDCARD_CODE};
use std::collections::HashMap;

use crate::vocab::{bit_width_for, VocabTable};

/// One step of a trie path: a literal word, or the free position of a
/// wildcard phrase.
#[derive(Debug, Clone)]
enum PathStep {
    Word(String),
    Wildcard,
}

#[derive(Debug, Clone, Default)]
struct TrieNode {
    children: HashMap<String, usize>,
    wildcard: Option<usize>,
    phrase_id: Option<u32>,
}

/// Arena trie: nodes addressed by dense index, children keyed by literal
/// word text. The free position of a wildcard phrase is a distinguished
/// edge any token can traverse.
#[derive(Debug, Clone)]
struct Trie {
    nodes: Vec<TrieNode>,
}

impl Trie {
    fn new() -> Self {
        Self {
            nodes: vec![TrieNode::default()],
        }
    }

    fn add_node(&mut self) -> usize {
        self.nodes.push(TrieNode::default());
        self.nodes.len() - 1
    }

    fn insert(&mut self, steps: &[PathStep], phrase_id: u32) {
        let mut node = 0;
        for step in steps {
            node = match step {
                PathStep::Word(word) => match self.nodes[node].children.get(word).copied() {
                    Some(child) => child,
                    None => {
                        let child = self.add_node();
                        self.nodes[node].children.insert(word.clone(), child);
                        child
                    }
                },
                PathStep::Wildcard => match self.nodes[node].wildcard {
                    Some(child) => child,
                    None => {
                        let child = self.add_node();
                        self.nodes[node].wildcard = Some(child);
                        child
                    }
                },
            };
        }
        self.nodes[node].phrase_id = Some(phrase_id);
    }
}

/// Result of a longest-match lookup: the phrase and how many raw tokens it
/// covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhraseMatch {
    pub phrase_id: u32,
    pub span: usize,
}

/// The mined phrase table plus the trie that matches against it.
#[derive(Debug, Clone)]
pub struct PhraseSet {
    records: Vec<PhraseRecord>,
    trie: Trie,
    max_span: usize,
}

impl PhraseSet {
    /// A set with no phrases; every lookup misses.
    pub fn empty() -> Self {
        Self {
            records: Vec::new(),
            trie: Trie::new(),
            max_span: 0,
        }
    }

    /// Rebuild the matching trie from a flat record table. Word codes are
    /// resolved against `primary`; a stale dictionary surfaces as
    /// [`LexError::InvalidCode`].
    pub fn from_records(records: Vec<PhraseRecord>, primary: &VocabTable) -> Result<Self> {
        let mut trie = Trie::new();
        let mut max_span = 0;
        for (id, record) in records.iter().enumerate() {
            let mut steps = Vec::with_capacity(record.word_codes.len());
            for &code in &record.word_codes {
                if code == WILDCARD_CODE {
                    steps.push(PathStep::Wildcard);
                } else {
                    steps.push(PathStep::Word(primary.decode(code)?.to_string()));
                }
            }
            trie.insert(&steps, id as u32);
            max_span = max_span.max(record.span());
        }
        Ok(Self {
            records,
            trie,
            max_span,
        })
    }

    /// Record for `id`, or [`LexError::InvalidPhraseId`] if out of range.
    pub fn get(&self, id: u32) -> Result<&PhraseRecord> {
        self.records
            .get(id as usize)
            .ok_or(LexError::InvalidPhraseId {
                id,
                table_len: self.records.len(),
            })
    }

    /// Records in id order.
    pub fn records(&self) -> &[PhraseRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Width of a phrase id field in the stream.
    pub fn bit_width(&self) -> u8 {
        bit_width_for(self.records.len())
    }

    /// Longest phrase starting at `tokens[start]`, if any.
    ///
    /// Walks the trie consuming tokens while an edge exists, remembering
    /// the deepest terminal visited, so a shorter phrase is overridden only
    /// by a strictly longer one. Literal edges are tried before the
    /// wildcard edge at each node, which keeps ties deterministic in favor
    /// of the more specific phrase.
    pub fn longest_match(&self, tokens: &[String], start: usize) -> Option<PhraseMatch> {
        if self.records.is_empty() || start >= tokens.len() {
            return None;
        }
        let end = tokens.len().min(start + self.max_span);
        let mut best = None;
        self.walk(0, tokens, start, end, 0, &mut best);
        best
    }

    fn walk(
        &self,
        node: usize,
        tokens: &[String],
        pos: usize,
        end: usize,
        depth: usize,
        best: &mut Option<PhraseMatch>,
    ) {
        if let Some(id) = self.trie.nodes[node].phrase_id {
            if best.map_or(true, |b| depth > b.span) {
                *best = Some(PhraseMatch {
                    phrase_id: id,
                    span: depth,
                });
            }
        }
        if pos >= end {
            return;
        }
        if let Some(&child) = self.trie.nodes[node].children.get(&tokens[pos]) {
            self.walk(child, tokens, pos + 1, end, depth + 1, best);
        }
        if let Some(child) = self.trie.nodes[node].wildcard {
            self.walk(child, tokens, pos + 1, end, depth + 1, best);
        }
    }
}

#[derive(Debug, Default)]
struct WildcardStat {
    fillers: HashMap<String, u32>,
}

impl WildcardStat {
    fn total(&self) -> u32 {
        self.fillers.values().sum()
    }
}

/// Mines phrase candidates from a tokenized document.
///
/// The primary table is finalized before mining starts and is never grown
/// here: a window qualifies only if every fixed position is already a
/// primary word. Out-of-vocabulary words can still occupy the wildcard
/// position, since fillers are encoded explicitly per occurrence.
pub struct PhraseMiner<'a> {
    config: &'a EngineConfig,
}

impl<'a> PhraseMiner<'a> {
    pub fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    /// Mine fixed and wildcard phrases from `tokens` and return the phrase
    /// table with its matching trie.
    pub fn mine(&self, tokens: &[String], primary: &VocabTable) -> Result<PhraseSet> {
        let token_codes: Vec<Option<u32>> = tokens.iter().map(|t| primary.code_of(t)).collect();

        let mut fixed: HashMap<Vec<u32>, u32> = HashMap::new();
        let mut wildcard: HashMap<Vec<u32>, WildcardStat> = HashMap::new();

        for n in self.config.ngram_min..=self.config.ngram_max {
            if n > tokens.len() {
                break;
            }
            for (i, window) in token_codes.windows(n).enumerate() {
                if let Some(key) = window.iter().copied().collect::<Option<Vec<u32>>>() {
                    *fixed.entry(key).or_insert(0) += 1;
                }
                for pos in 0..n {
                    let masked: Option<Vec<u32>> = window
                        .iter()
                        .enumerate()
                        .map(|(j, &code)| if j == pos { Some(WILDCARD_CODE) } else { code })
                        .collect();
                    if let Some(key) = masked {
                        let stat = wildcard.entry(key).or_default();
                        *stat.fillers.entry(tokens[i + pos].clone()).or_insert(0) += 1;
                    }
                }
            }
        }

        // Singleton admission is judged against the whole candidate pool.
        let distinct_fixed = fixed.len();
        let mut kept_fixed: Vec<(Vec<u32>, u32)> = fixed
            .into_iter()
            .filter(|(_, freq)| {
                *freq >= self.config.min_phrase_freq
                    || (*freq == 1 && distinct_fixed < self.config.singleton_corpus_limit)
            })
            .collect();
        kept_fixed.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        let mut kept_wildcard: Vec<(Vec<u32>, u32)> = wildcard
            .into_iter()
            .map(|(key, stat)| (key, stat.total()))
            .filter(|(_, freq)| *freq >= self.config.min_wildcard_freq)
            .collect();
        kept_wildcard.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        tracing::debug!(
            fixed = kept_fixed.len(),
            wildcard = kept_wildcard.len(),
            distinct_candidates = distinct_fixed,
            "phrase mining finished"
        );

        let mut records = Vec::with_capacity(kept_fixed.len() + kept_wildcard.len());
        for (word_codes, frequency) in kept_fixed {
            records.push(PhraseRecord {
                word_codes,
                frequency,
                has_wildcard: false,
                wildcard_pos: None,
            });
        }
        for (word_codes, frequency) in kept_wildcard {
            let wildcard_pos = word_codes.iter().position(|&c| c == WILDCARD_CODE);
            records.push(PhraseRecord {
                word_codes,
                frequency,
                has_wildcard: true,
                wildcard_pos,
            });
        }

        PhraseSet::from_records(records, primary)
    }
}
