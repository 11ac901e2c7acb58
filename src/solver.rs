use crate::knowledge::KnowledgeState;
use crate::{debug_log, info_log};
use log::warn;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Keep only the words still consistent with `knowledge`, in their original order.
///
/// Builds a new list instead of removing from `candidates` while walking it.
#[must_use]
pub fn filter_candidates(candidates: &[String], knowledge: &KnowledgeState) -> Vec<String> {
    candidates
        .iter()
        .filter(|word| knowledge.is_possible(word))
        .cloned()
        .collect()
}

/// The shrinking, ordered list of words that could still be the answer.
///
/// Words only ever leave the pool, either because they were guessed or because they stopped
/// being possible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidatePool {
    words: Vec<String>,
}

impl CandidatePool {
    #[must_use]
    pub fn new(words: Vec<String>) -> Self {
        Self { words }
    }

    #[must_use]
    pub fn words(&self) -> &[String] {
        &self.words
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|w| w == word)
    }

    /// Remove `word` if present, returning the index it was at.
    pub fn remove(&mut self, word: &str) -> Option<usize> {
        let index = self.words.iter().position(|w| w == word)?;
        self.words.remove(index);
        Some(index)
    }

    /// Return a word taken by [`CandidatePool::take_guess`] or [`CandidatePool::remove`] to
    /// the slot it came from.
    pub fn put_back(&mut self, index: usize, word: String) {
        if self.contains(&word) {
            return;
        }
        let index = index.min(self.words.len());
        self.words.insert(index, word);
    }

    /// Let `picker` choose a word and take it out of the pool, along with its index.
    ///
    /// An index past the end is clamped to the last word.
    pub fn take_guess(&mut self, picker: &mut dyn GuessPicker) -> Option<(usize, String)> {
        if self.words.is_empty() {
            return None;
        }
        let mut index = picker.pick(&self.words)?;
        if index >= self.words.len() {
            warn!(
                "picker returned index {index} for {} candidates, using the last one",
                self.words.len()
            );
            index = self.words.len() - 1;
        }
        debug_log!("picked candidate {index} of {}", self.words.len());
        Some((index, self.words.remove(index)))
    }

    /// Drop every word `knowledge` rules out and return how many remain.
    pub fn retain_possible(&mut self, knowledge: &KnowledgeState) -> usize {
        let before = self.words.len();
        self.words = filter_candidates(&self.words, knowledge);
        info_log!(
            "Possible # of words {} (removed {})",
            self.words.len(),
            before - self.words.len()
        );
        self.words.len()
    }
}

/// Strategy for choosing the next guess out of the remaining candidates.
pub trait GuessPicker {
    /// Index into `candidates` of the word to guess, or `None` to give up.
    fn pick(&mut self, candidates: &[String]) -> Option<usize>;
}

/// Always picks the first remaining candidate.
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstPicker;

impl GuessPicker for FirstPicker {
    fn pick(&mut self, candidates: &[String]) -> Option<usize> {
        if candidates.is_empty() { None } else { Some(0) }
    }
}

/// Picks uniformly at random.
#[derive(Debug, Clone)]
pub struct RandomPicker {
    rng: StdRng,
}

impl RandomPicker {
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible picks for a given seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomPicker {
    fn default() -> Self {
        Self::new()
    }
}

impl GuessPicker for RandomPicker {
    fn pick(&mut self, candidates: &[String]) -> Option<usize> {
        if candidates.is_empty() {
            return None;
        }
        Some(self.rng.gen_range(0..candidates.len()))
    }
}
