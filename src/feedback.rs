//! Feedback codes and the scorer that produces them.
//!
//! Internally feedback is always a slice of [`Feedback`]; the `b`/`y`/`g` text form only
//! exists at the boundary, through [`parse_feedback`] and [`format_feedback`].

use crate::error::SolverError;
use std::fmt;

/// Feedback for a single letter of a guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feedback {
    /// Right letter, right position (green, `g`).
    Hit,
    /// Letter occurs in the answer but not here (yellow, `y`).
    Present,
    /// Letter does not count as present (black, `b`).
    Miss,
}

impl Feedback {
    /// Parse from the text encoding. Case-insensitive.
    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'g' => Some(Self::Hit),
            'y' => Some(Self::Present),
            'b' => Some(Self::Miss),
            _ => None,
        }
    }

    #[must_use]
    pub fn to_char(self) -> char {
        match self {
            Self::Hit => 'g',
            Self::Present => 'y',
            Self::Miss => 'b',
        }
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Parse a feedback string such as `"bygbb"` for a word of `word_length` letters.
///
/// Surrounding whitespace is ignored.
pub fn parse_feedback(input: &str, word_length: usize) -> Result<Vec<Feedback>, SolverError> {
    let input = input.trim();
    let len = input.chars().count();
    if len != word_length {
        return Err(SolverError::invalid_format(format!(
            "expected {word_length} symbols, got {len}"
        )));
    }
    input
        .chars()
        .map(|c| {
            Feedback::from_char(c).ok_or_else(|| {
                SolverError::invalid_format(format!("'{c}' is not one of b, y or g"))
            })
        })
        .collect()
}

/// Render feedback in the lowercase text encoding.
#[must_use]
pub fn format_feedback(feedback: &[Feedback]) -> String {
    feedback.iter().map(|f| f.to_char()).collect()
}

/// True when every letter is a [`Feedback::Hit`].
#[must_use]
pub fn is_solved(feedback: &[Feedback]) -> bool {
    !feedback.is_empty() && feedback.iter().all(|f| *f == Feedback::Hit)
}

/// Score `guess` against `answer` with a plain membership check.
///
/// A letter that is not a hit is `Present` whenever it occurs anywhere in the answer, with no
/// per-letter budget: guessing `"sassy"` against `"tests"` marks both unmatched `s` present.
/// The knowledge update tolerates this, so it stays the default policy.
#[must_use]
pub fn score_word(guess: &str, answer: &str) -> Vec<Feedback> {
    let answer_chars: Vec<char> = answer.chars().collect();
    guess
        .chars()
        .enumerate()
        .map(|(i, g)| {
            if answer_chars.get(i) == Some(&g) {
                Feedback::Hit
            } else if answer_chars.contains(&g) {
                Feedback::Present
            } else {
                Feedback::Miss
            }
        })
        .collect()
}

/// Score with standard Wordle semantics: each answer letter can justify at most one
/// `Hit` or `Present`, hits are assigned first.
#[must_use]
pub fn score_word_counted(guess: &str, answer: &str) -> Vec<Feedback> {
    let guess_chars: Vec<char> = guess.chars().collect();
    let mut answer_chars: Vec<Option<char>> = answer.chars().map(Some).collect();
    let mut feedback = vec![Feedback::Miss; guess_chars.len()];

    for (i, g) in guess_chars.iter().enumerate() {
        if let Some(slot) = answer_chars.get_mut(i)
            && *slot == Some(*g)
        {
            feedback[i] = Feedback::Hit;
            *slot = None;
        }
    }
    for (i, g) in guess_chars.iter().enumerate() {
        if feedback[i] == Feedback::Hit {
            continue;
        }
        if let Some(pos) = answer_chars.iter().position(|c| *c == Some(*g)) {
            feedback[i] = Feedback::Present;
            answer_chars[pos] = None;
        }
    }
    feedback
}

/// Which scorer produces feedback when the answer is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scoring {
    /// [`score_word`]: naive membership check.
    #[default]
    Membership,
    /// [`score_word_counted`]: letter-budgeted scoring.
    Counted,
}

impl Scoring {
    #[must_use]
    pub fn score(self, guess: &str, answer: &str) -> Vec<Feedback> {
        match self {
            Self::Membership => score_word(guess, answer),
            Self::Counted => score_word_counted(guess, answer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Feedback::{Hit, Miss, Present};

    #[test]
    fn test_score_word_known_answers() {
        assert_eq!(score_word("tests", "tests"), vec![Hit; 5]);
        assert_eq!(score_word("fubar", "tests"), vec![Miss; 5]);
        assert_eq!(
            score_word("resty", "tests"),
            vec![Miss, Hit, Hit, Hit, Miss]
        );
        assert_eq!(
            score_word("letsb", "tests"),
            vec![Miss, Hit, Present, Present, Miss]
        );
    }

    #[test]
    fn test_score_word_repeated_letters_are_not_budgeted() {
        // Only one 's' left unmatched in "tests", yet both extra s's come back present.
        assert_eq!(
            score_word("sassy", "tests"),
            vec![Present, Miss, Hit, Present, Miss]
        );
    }

    #[test]
    fn test_score_word_counted_budgets_repeated_letters() {
        assert_eq!(
            score_word_counted("sassy", "tests"),
            vec![Present, Miss, Hit, Miss, Miss]
        );
        assert_eq!(
            score_word_counted("speed", "creep"),
            vec![Miss, Present, Hit, Hit, Miss]
        );
        assert_eq!(score_word_counted("tests", "tests"), vec![Hit; 5]);
    }

    #[test]
    fn test_scoring_policy_dispatch() {
        assert_eq!(Scoring::default(), Scoring::Membership);
        assert_eq!(
            Scoring::Membership.score("sassy", "tests"),
            score_word("sassy", "tests")
        );
        assert_eq!(
            Scoring::Counted.score("sassy", "tests"),
            score_word_counted("sassy", "tests")
        );
    }

    #[test]
    fn test_parse_feedback() {
        assert_eq!(
            parse_feedback("bybgb", 5),
            Ok(vec![Miss, Present, Miss, Hit, Miss])
        );
        assert_eq!(parse_feedback(" GGGGG \n", 5), Ok(vec![Hit; 5]));
    }

    #[test]
    fn test_parse_feedback_wrong_length() {
        assert!(matches!(
            parse_feedback("bbbb", 5),
            Err(SolverError::InvalidFeedbackFormat { .. })
        ));
        assert!(matches!(
            parse_feedback("bbbbbb", 5),
            Err(SolverError::InvalidFeedbackFormat { .. })
        ));
        assert!(parse_feedback("", 5).is_err());
    }

    #[test]
    fn test_parse_feedback_illegal_symbol() {
        assert!(matches!(
            parse_feedback("bbxbb", 5),
            Err(SolverError::InvalidFeedbackFormat { .. })
        ));
    }

    #[test]
    fn test_format_feedback_matches_input_encoding() {
        let text = "gybbg";
        let parsed = parse_feedback(text, 5).unwrap();
        assert_eq!(format_feedback(&parsed), text);
        assert_eq!(format_feedback(&parse_feedback("GYBBG", 5).unwrap()), text);
    }

    #[test]
    fn test_is_solved() {
        assert!(is_solved(&[Hit; 5]));
        assert!(!is_solved(&[Hit, Hit, Hit, Hit, Present]));
        assert!(!is_solved(&[]));
    }
}
