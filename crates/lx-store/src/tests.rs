use crate::dictionary::{parse_dictionary, render_dictionary};
use crate::lexicon::parse_word_list;
use lx_core::{LexError, PhraseRecord, WILDCARD_CODE};
use lx_engine::phrase::PhraseSet;
use lx_engine::vocab::VocabTable;
use lx_engine::{Compressor, Dictionary};

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| w.to_string()).collect()
}

fn sample_dictionary() -> Dictionary {
    let primary = VocabTable::from_words(words(&["in", "the", "of", "end"]));
    let phrases = PhraseSet::from_records(
        vec![
            PhraseRecord {
                word_codes: vec![0, 1, 3],
                frequency: 4,
                has_wildcard: false,
                wildcard_pos: None,
            },
            PhraseRecord {
                word_codes: vec![0, 1, WILDCARD_CODE, 2],
                frequency: 2,
                has_wildcard: true,
                wildcard_pos: Some(2),
            },
        ],
        &primary,
    )
    .unwrap();
    Dictionary { primary, phrases }
}

// ========== Word list ==========

#[test]
fn test_word_list_lowercases_and_skips_blanks() {
    let parsed = parse_word_list("The\n\n  Cat \nsat\n");
    assert_eq!(parsed, words(&["the", "cat", "sat"]));
}

#[test]
fn test_word_list_empty() {
    assert!(parse_word_list("").is_empty());
}

#[test]
fn test_word_list_missing_file() {
    let err = crate::lexicon::load_word_list(std::path::Path::new("/no/such/list")).unwrap_err();
    assert!(matches!(err, LexError::Io(_)));
}

// ========== Dictionary format ==========

#[test]
fn test_dictionary_roundtrip() {
    let dictionary = sample_dictionary();
    let rendered = render_dictionary(&dictionary);
    let parsed = parse_dictionary(&rendered).unwrap();
    assert_eq!(parsed.primary.words(), dictionary.primary.words());
    assert_eq!(parsed.phrases.records(), dictionary.phrases.records());
}

#[test]
fn test_dictionary_rendered_shape() {
    let rendered = render_dictionary(&sample_dictionary());
    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines[0], "4 2");
    assert_eq!(&lines[1..5], &["in", "the", "of", "end"]);
    assert_eq!(lines[5], "0 3 4 0 1 3");
    assert_eq!(lines[6], "1 2 3 2 0 1 2");
}

#[test]
fn test_dictionary_file_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sample.dict");
    let dictionary = sample_dictionary();
    crate::dictionary::save_dictionary(&path, &dictionary).unwrap();
    let loaded = crate::dictionary::load_dictionary(&path).unwrap();
    assert_eq!(loaded.phrases.records(), dictionary.phrases.records());
}

#[test]
fn test_dictionary_empty_file() {
    let err = parse_dictionary("").unwrap_err();
    assert!(matches!(err, LexError::Parse(_)));
}

#[test]
fn test_dictionary_truncated_word_list() {
    let err = parse_dictionary("3 0\nonly\ntwo\n").unwrap_err();
    assert!(matches!(err, LexError::Parse(_)));
}

#[test]
fn test_dictionary_bad_phrase_line() {
    let err = parse_dictionary("1 1\nword\n2 0 1\n").unwrap_err();
    assert!(matches!(err, LexError::Parse(_)));
}

#[test]
fn test_dictionary_wildcard_position_out_of_span() {
    let err = parse_dictionary("1 1\nword\n1 5 1 2 0\n").unwrap_err();
    assert!(matches!(err, LexError::Parse(_)));
}

#[test]
fn test_dictionary_phrase_code_out_of_table() {
    // Phrase references code 9 but the table has a single word.
    let err = parse_dictionary("1 1\nword\n0 2 3 0 9\n").unwrap_err();
    assert!(matches!(err, LexError::InvalidCode { .. }));
}

#[test]
fn test_dictionary_no_phrases() {
    let parsed = parse_dictionary("2 0\nalpha\nbeta\n").unwrap();
    assert_eq!(parsed.primary.len(), 2);
    assert!(parsed.phrases.is_empty());
}

// ========== End to end through files ==========

#[test]
fn test_compress_persist_reload_decompress() {
    let dir = tempfile::tempdir().unwrap();
    let dict_path = dir.path().join("run.dict");

    let canonical = words(&["the", "cat", "sat", "on", "mat"]);
    let compressor = Compressor::default();
    let text = "the cat sat on the mat while the cat sat on the mat";
    let doc = compressor.compress(text, &canonical).unwrap();

    crate::dictionary::save_dictionary(&dict_path, &doc.dictionary).unwrap();
    let reloaded = crate::dictionary::load_dictionary(&dict_path).unwrap();
    let restored = compressor.decompress(&doc.payload, &reloaded).unwrap();
    assert_eq!(restored, text);
}

// ========== Stats report ==========

#[test]
fn test_stats_report_is_valid_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stats.json");
    let canonical = words(&["a", "b"]);
    let doc = Compressor::default().compress("a b a b", &canonical).unwrap();
    crate::report::write_stats_report(&path, &doc.stats).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert!(value.get("generated_at").is_some());
    assert_eq!(value["token_count"], 4);
}
