//! Dictionary persistence.
//!
//! Text format, all fields whitespace-separated:
//!
//! ```text
//! <word_count> <phrase_count>
//! <word>            one per line, in code order
//! <phrase record>   one per line:
//!     has_wildcard [wildcard_pos] fixed_code_count frequency code...
//! ```
//!
//! `fixed_code_count` counts only the non-wildcard positions, so a record's
//! span is `fixed_code_count + has_wildcard`.

use lx_core::{LexError, PhraseRecord, Result, WILDCARD_CODE};
use lx_engine::phrase::PhraseSet;
use lx_engine::vocab::VocabTable;
use lx_engine::Dictionary;
use std::fs;
use std::path::Path;

pub fn save_dictionary(path: &Path, dictionary: &Dictionary) -> Result<()> {
    fs::write(path, render_dictionary(dictionary))?;
    tracing::debug!(path = %path.display(), "dictionary written");
    Ok(())
}

pub fn load_dictionary(path: &Path) -> Result<Dictionary> {
    let text = fs::read_to_string(path)?;
    parse_dictionary(&text)
}

pub fn render_dictionary(dictionary: &Dictionary) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} {}\n",
        dictionary.primary.len(),
        dictionary.phrases.len()
    ));
    for word in dictionary.primary.words() {
        out.push_str(word);
        out.push('\n');
    }
    for record in dictionary.phrases.records() {
        out.push_str(&render_phrase_line(record));
        out.push('\n');
    }
    out
}

pub fn parse_dictionary(text: &str) -> Result<Dictionary> {
    let mut lines = text.lines();
    let header = lines
        .next()
        .ok_or_else(|| LexError::Parse("empty dictionary file".into()))?;
    let mut fields = header.split_whitespace();
    let word_count = parse_count(fields.next(), "word count")?;
    let phrase_count = parse_count(fields.next(), "phrase count")?;

    let mut words = Vec::with_capacity(word_count);
    for _ in 0..word_count {
        let line = lines
            .next()
            .ok_or_else(|| LexError::Parse("dictionary ended inside the word list".into()))?;
        words.push(line.to_string());
    }
    let primary = VocabTable::from_words(words);

    let mut records = Vec::with_capacity(phrase_count);
    for _ in 0..phrase_count {
        let line = lines
            .next()
            .ok_or_else(|| LexError::Parse("dictionary ended inside the phrase table".into()))?;
        records.push(parse_phrase_line(line)?);
    }

    let phrases = PhraseSet::from_records(records, &primary)?;
    Ok(Dictionary { primary, phrases })
}

fn render_phrase_line(record: &PhraseRecord) -> String {
    let mut line = String::new();
    match record.wildcard_pos {
        Some(pos) => line.push_str(&format!("1 {pos}")),
        None => line.push('0'),
    }
    line.push_str(&format!(" {} {}", record.fixed_count(), record.frequency));
    for &code in record.word_codes.iter().filter(|&&c| c != WILDCARD_CODE) {
        line.push_str(&format!(" {code}"));
    }
    line
}

fn parse_phrase_line(line: &str) -> Result<PhraseRecord> {
    let mut fields = line.split_whitespace();
    let has_wildcard = match parse_u32(fields.next(), line, "wildcard flag")? {
        0 => false,
        1 => true,
        other => {
            return Err(LexError::Parse(format!(
                "bad wildcard flag {other} in phrase line {line:?}"
            )))
        }
    };
    let wildcard_pos = if has_wildcard {
        Some(parse_u32(fields.next(), line, "wildcard position")? as usize)
    } else {
        None
    };
    let fixed_count = parse_u32(fields.next(), line, "code count")? as usize;
    let frequency = parse_u32(fields.next(), line, "frequency")?;

    let span = fixed_count + usize::from(has_wildcard);
    if let Some(pos) = wildcard_pos {
        if pos >= span {
            return Err(LexError::Parse(format!(
                "wildcard position {pos} outside span {span} in phrase line {line:?}"
            )));
        }
    }

    let mut word_codes = Vec::with_capacity(span);
    for i in 0..span {
        if wildcard_pos == Some(i) {
            word_codes.push(WILDCARD_CODE);
        } else {
            word_codes.push(parse_u32(fields.next(), line, "word code")?);
        }
    }
    if fields.next().is_some() {
        return Err(LexError::Parse(format!(
            "trailing fields in phrase line {line:?}"
        )));
    }

    Ok(PhraseRecord {
        word_codes,
        frequency,
        has_wildcard,
        wildcard_pos,
    })
}

fn parse_count(field: Option<&str>, what: &str) -> Result<usize> {
    field
        .ok_or_else(|| LexError::Parse(format!("missing {what} in dictionary header")))?
        .parse()
        .map_err(|e| LexError::Parse(format!("bad {what} in dictionary header: {e}")))
}

fn parse_u32(field: Option<&str>, line: &str, what: &str) -> Result<u32> {
    field
        .ok_or_else(|| LexError::Parse(format!("missing {what} in phrase line {line:?}")))?
        .parse()
        .map_err(|e| LexError::Parse(format!("bad {what} in phrase line {line:?}: {e}")))
}
