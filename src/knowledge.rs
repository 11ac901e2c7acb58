//! Accumulated constraints on the hidden answer.

use crate::debug_log;
use crate::error::SolverError;
use crate::feedback::{Feedback, parse_feedback};
use std::collections::BTreeSet;
use std::fmt;

/// Everything learned about the answer so far in one session.
///
/// Only [`KnowledgeState::apply`] mutates it, and only after the feedback has passed
/// [`KnowledgeState::check`]. A letter in `absent_letters` never appears in a locked slot or
/// in `present_letters`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnowledgeState {
    locked_positions: Vec<Option<char>>,
    present_letters: BTreeSet<char>,
    absent_letters: BTreeSet<char>,
}

impl KnowledgeState {
    #[must_use]
    pub fn new(word_length: usize) -> Self {
        Self {
            locked_positions: vec![None; word_length],
            present_letters: BTreeSet::new(),
            absent_letters: BTreeSet::new(),
        }
    }

    /// Build a state from already-known constraints.
    ///
    /// Letters listed as absent that are also present or locked are dropped from the absent
    /// set, so the result always upholds the state's invariant.
    #[must_use]
    pub fn with_constraints(
        locked_positions: Vec<Option<char>>,
        present_letters: impl IntoIterator<Item = char>,
        absent_letters: impl IntoIterator<Item = char>,
    ) -> Self {
        let mut present_letters: BTreeSet<char> = present_letters.into_iter().collect();
        present_letters.extend(locked_positions.iter().flatten().copied());
        let absent_letters = absent_letters
            .into_iter()
            .filter(|c| !present_letters.contains(c))
            .collect();
        Self {
            locked_positions,
            present_letters,
            absent_letters,
        }
    }

    #[must_use]
    pub fn word_length(&self) -> usize {
        self.locked_positions.len()
    }

    #[must_use]
    pub fn locked_positions(&self) -> &[Option<char>] {
        &self.locked_positions
    }

    #[must_use]
    pub fn present_letters(&self) -> &BTreeSet<char> {
        &self.present_letters
    }

    #[must_use]
    pub fn absent_letters(&self) -> &BTreeSet<char> {
        &self.absent_letters
    }

    /// Check that `feedback` for `guess` agrees with what is already known, without changing
    /// anything. Reports the first problem found.
    pub fn check(&self, guess: &str, feedback: &[Feedback]) -> Result<(), SolverError> {
        let letters: Vec<char> = guess.chars().collect();
        if letters.len() != self.word_length() {
            return Err(SolverError::WordLength {
                expected: self.word_length(),
                actual: letters.len(),
            });
        }
        if feedback.len() != self.word_length() {
            return Err(SolverError::invalid_format(format!(
                "expected {} symbols, got {}",
                self.word_length(),
                feedback.len()
            )));
        }

        for (position, (&letter, &code)) in letters.iter().zip(feedback).enumerate() {
            let locked = self.locked_positions[position];
            debug_log!("position {position}: guess={letter} feedback={code} locked={locked:?}");

            if let Some(known) = locked
                && known != letter
                && code == Feedback::Hit
            {
                return Err(SolverError::ContradictoryFeedback {
                    position,
                    letter,
                    reason: "conflicts with the letter already found there",
                });
            }
            if code != Feedback::Miss && self.absent_letters.contains(&letter) {
                return Err(SolverError::ContradictoryFeedback {
                    position,
                    letter,
                    reason: "was already marked absent",
                });
            }
            if code == Feedback::Miss && locked == Some(letter) {
                return Err(SolverError::ContradictoryFeedback {
                    position,
                    letter,
                    reason: "was already found at this position",
                });
            }
        }
        Ok(())
    }

    /// Boolean form of [`KnowledgeState::check`].
    #[must_use]
    pub fn validate(&self, guess: &str, feedback: &[Feedback]) -> bool {
        self.check(guess, feedback).is_ok()
    }

    /// [`KnowledgeState::check`] for feedback still in its `b`/`y`/`g` text form.
    pub fn check_encoded(&self, guess: &str, feedback: &str) -> Result<(), SolverError> {
        let feedback = parse_feedback(feedback, self.word_length())?;
        self.check(guess, &feedback)
    }

    /// Fold one round of feedback into the state.
    ///
    /// Rejected feedback leaves the state untouched. Applying the same pair twice is a no-op.
    pub fn apply(&mut self, guess: &str, feedback: &[Feedback]) -> Result<(), SolverError> {
        self.check(guess, feedback)?;

        let letters: Vec<char> = guess.chars().collect();
        for (position, (&letter, &code)) in letters.iter().zip(feedback).enumerate() {
            match code {
                Feedback::Hit => {
                    self.locked_positions[position] = Some(letter);
                    self.present_letters.insert(letter);
                }
                Feedback::Present => {
                    self.present_letters.insert(letter);
                }
                Feedback::Miss => {}
            }
        }

        // Misses go last so a repeated letter scored present or hit elsewhere in this guess
        // (e.g. "tests" against an answer with one 't') is not recorded as absent.
        for (&letter, &code) in letters.iter().zip(feedback) {
            if code != Feedback::Miss {
                continue;
            }
            if self.present_letters.contains(&letter) {
                debug_log!("'{letter}' missed but is known present, not marking absent");
                continue;
            }
            self.absent_letters.insert(letter);
        }
        Ok(())
    }

    /// Whether `word` is still consistent with everything known.
    #[must_use]
    pub fn is_possible(&self, word: &str) -> bool {
        if word.chars().any(|c| self.absent_letters.contains(&c)) {
            return false;
        }
        if self.present_letters.iter().any(|c| !word.contains(*c)) {
            return false;
        }
        self.locked_positions
            .iter()
            .zip(word.chars())
            .all(|(locked, c)| locked.is_none_or(|known| known == c))
    }
}

impl fmt::Display for KnowledgeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for slot in &self.locked_positions {
            write!(f, "{}", slot.unwrap_or('_'))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::parse_feedback;

    fn fb(text: &str) -> Vec<Feedback> {
        parse_feedback(text, text.len()).unwrap()
    }

    fn set(letters: &str) -> BTreeSet<char> {
        letters.chars().collect()
    }

    #[test]
    fn test_new_state_is_empty() {
        let state = KnowledgeState::new(5);
        assert_eq!(state.word_length(), 5);
        assert_eq!(state.locked_positions(), &[None; 5]);
        assert!(state.present_letters().is_empty());
        assert!(state.absent_letters().is_empty());
        assert_eq!(state.to_string(), "_____");
    }

    #[test]
    fn test_apply_locks_first_letter() {
        let mut state = KnowledgeState::new(5);
        state.apply("tests", &fb("gbbbb")).unwrap();
        assert_eq!(state.to_string(), "t____");
        assert_eq!(state.present_letters(), &set("t"));
        // The second 't' missed, but 't' is in the answer.
        assert_eq!(state.absent_letters(), &set("es"));
    }

    #[test]
    fn test_apply_is_idempotent() {
        let mut state = KnowledgeState::new(5);
        state.apply("tests", &fb("gbbbb")).unwrap();
        let snapshot = state.clone();
        state.apply("tests", &fb("gbbbb")).unwrap();
        assert_eq!(state, snapshot);
        assert_eq!(state.to_string(), "t____");
    }

    #[test]
    fn test_apply_accumulates_across_guesses() {
        let mut state = KnowledgeState::new(5);
        state.apply("tests", &fb("gbbbb")).unwrap();
        state.apply("books", &fb("bybgb")).unwrap();
        assert_eq!(
            state.locked_positions(),
            &[Some('t'), None, None, Some('k'), None]
        );
        assert!(state.present_letters().is_superset(&set("tok")));
        assert_eq!(state.to_string(), "t__k_");
    }

    #[test]
    fn test_apply_all_hits() {
        let mut state = KnowledgeState::new(5);
        state.apply("tests", &fb("ggggg")).unwrap();
        assert_eq!(state.to_string(), "tests");
        assert_eq!(state.present_letters(), &set("tes"));
        assert!(state.absent_letters().is_empty());
    }

    #[test]
    fn test_hit_conflicting_with_locked_letter_is_rejected() {
        let mut state = KnowledgeState::new(5);
        state.apply("tests", &fb("gbbbb")).unwrap();
        let snapshot = state.clone();

        let err = state.apply("foooo", &fb("gbbbb")).unwrap_err();
        assert!(matches!(
            err,
            SolverError::ContradictoryFeedback {
                position: 0,
                letter: 'f',
                ..
            }
        ));
        assert_eq!(state, snapshot);
    }

    #[test]
    fn test_miss_on_locked_letter_is_rejected() {
        let mut state = KnowledgeState::new(5);
        state.apply("tests", &fb("gbbbb")).unwrap();
        let snapshot = state.clone();

        assert!(!state.validate("tests", &fb("bbbbb")));
        assert!(state.apply("tests", &fb("bbbbb")).is_err());
        assert_eq!(state, snapshot);
    }

    #[test]
    fn test_found_letter_previously_absent_is_rejected() {
        let mut state = KnowledgeState::new(5);
        state.apply("crane", &fb("bbbbb")).unwrap();

        let err = state.check("eager", &fb("ybbbb")).unwrap_err();
        assert!(matches!(
            err,
            SolverError::ContradictoryFeedback {
                position: 0,
                letter: 'e',
                ..
            }
        ));
        // A miss on an absent letter is fine.
        assert!(state.validate("eager", &fb("bbbbb")));
    }

    #[test]
    fn test_wrong_lengths_are_invalid() {
        let state = KnowledgeState::new(5);
        assert!(matches!(
            state.check_encoded("tests", "bbbb"),
            Err(SolverError::InvalidFeedbackFormat { .. })
        ));
        assert!(matches!(
            state.check_encoded("tests", "bbbbbb"),
            Err(SolverError::InvalidFeedbackFormat { .. })
        ));
        assert!(matches!(
            state.check("test", &fb("bbbb")),
            Err(SolverError::WordLength {
                expected: 5,
                actual: 4
            })
        ));
        assert!(!state.validate("tests", &fb("bbbbbb")));
    }

    #[test]
    fn test_check_encoded_rejects_illegal_symbols() {
        let state = KnowledgeState::new(5);
        assert!(matches!(
            state.check_encoded("tests", "gbxbb"),
            Err(SolverError::InvalidFeedbackFormat { .. })
        ));
        assert!(state.check_encoded("tests", "GBBBB").is_ok());
    }

    #[test]
    fn test_miss_on_letter_known_present_from_earlier_guess() {
        let mut state = KnowledgeState::new(5);
        state.apply("stare", &fb("ybbbb")).unwrap();
        state.apply("lions", &fb("bbbbg")).unwrap();
        state.apply("sissy", &fb("bbbgb")).unwrap();
        assert!(state.present_letters().contains(&'s'));
        assert!(!state.absent_letters().contains(&'s'));
    }

    #[test]
    fn test_is_possible_found_and_absent() {
        let state = KnowledgeState::with_constraints(vec![None; 5], set("ac"), set("be"));
        assert!(!state.is_possible("chest"));
        assert!(!state.is_possible("trips"));
        assert!(state.is_possible("crack"));
        assert!(!state.is_possible("flats"));
    }

    #[test]
    fn test_is_possible_nothing_found_yet() {
        let state = KnowledgeState::with_constraints(vec![None; 5], set(""), set("be"));
        assert!(state.is_possible("crack"));
        assert!(!state.is_possible("chest"));
        assert!(state.is_possible("rants"));

        let empty = KnowledgeState::new(5);
        assert!(empty.is_possible("crack"));
        assert!(empty.is_possible("chest"));
        assert!(empty.is_possible("rants"));
    }

    #[test]
    fn test_is_possible_with_locked_positions() {
        let state = KnowledgeState::with_constraints(
            vec![None, None, None, Some('s'), Some('t')],
            set("ast"),
            set("be"),
        );
        assert!(!state.is_possible("whack"));
        assert!(!state.is_possible("crest"));
        assert!(!state.is_possible("blast"));
        assert!(state.is_possible("rhast"));
    }

    #[test]
    fn test_with_constraints_keeps_invariant() {
        let state = KnowledgeState::with_constraints(
            vec![Some('t'), None, None, None, None],
            set("o"),
            set("tob"),
        );
        assert_eq!(state.present_letters(), &set("ot"));
        assert_eq!(state.absent_letters(), &set("b"));
    }
}
