use crate::debug_log;
use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

pub const EMBEDDED_WORDBANK: &str = include_str!("resources/wordbank.txt");

pub const DEFAULT_WORD_LENGTH: usize = 5;

fn normalize(line: &str, word_length: usize) -> Option<String> {
    let word = line.trim().to_lowercase();
    if word.chars().count() == word_length && word.chars().all(|c| c.is_ascii_alphabetic()) {
        Some(word)
    } else {
        if !word.is_empty() {
            debug_log!("skipping word list entry {word:?}");
        }
        None
    }
}

/// Collect usable words in order, dropping repeats.
fn collect_words<I: IntoIterator<Item = String>>(lines: I, word_length: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    lines
        .into_iter()
        .filter_map(|line| normalize(&line, word_length))
        .filter(|word| seen.insert(word.clone()))
        .collect()
}

/// Parse a newline-delimited word list. Entries are trimmed and lowercased; blank lines,
/// non-alphabetic entries and words of any other length are skipped.
#[must_use]
pub fn load_wordbank_from_str(data: &str, word_length: usize) -> Vec<String> {
    collect_words(data.lines().map(str::to_string), word_length)
}

/// Read a newline-delimited word list from any reader.
pub fn load_wordbank_from_reader<R: BufRead>(reader: R, word_length: usize) -> io::Result<Vec<String>> {
    let lines = reader.lines().collect::<io::Result<Vec<String>>>()?;
    Ok(collect_words(lines, word_length))
}

pub fn load_wordbank_from_file<P: AsRef<Path>>(path: P, word_length: usize) -> io::Result<Vec<String>> {
    let file = File::open(path)?;
    load_wordbank_from_reader(BufReader::new(file), word_length)
}
