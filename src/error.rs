use thiserror::Error;

/// Everything that can go wrong while feeding guesses and feedback into a session.
///
/// Only [`SolverError::ExhaustedCandidates`] ends a session; the rest describe bad input
/// that the caller can correct and resubmit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolverError {
    /// Feedback text had the wrong length or contained a symbol other than `b`, `y` or `g`.
    #[error("invalid feedback: {reason}")]
    InvalidFeedbackFormat { reason: String },

    /// A guess or answer did not match the session's word length.
    #[error("expected a {expected}-letter word, got {actual} letters")]
    WordLength { expected: usize, actual: usize },

    /// Feedback conflicts with what is already known about the answer.
    #[error("contradictory feedback at position {}: '{letter}' {reason}", .position + 1)]
    ContradictoryFeedback {
        position: usize,
        letter: char,
        reason: &'static str,
    },

    /// No word in the candidate pool explains the feedback seen so far.
    #[error("out of words: no candidate is consistent with the feedback given")]
    ExhaustedCandidates,

    /// The session was already solved.
    #[error("the session is already solved")]
    SessionOver,
}

impl SolverError {
    /// Whether the caller may correct its input and try again.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::ExhaustedCandidates | Self::SessionOver)
    }

    pub(crate) fn invalid_format(reason: impl Into<String>) -> Self {
        Self::InvalidFeedbackFormat {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_errors() {
        assert!(SolverError::invalid_format("too short").is_recoverable());
        assert!(
            SolverError::WordLength {
                expected: 5,
                actual: 4
            }
            .is_recoverable()
        );
        assert!(
            SolverError::ContradictoryFeedback {
                position: 0,
                letter: 't',
                reason: "was already marked absent",
            }
            .is_recoverable()
        );
        assert!(!SolverError::ExhaustedCandidates.is_recoverable());
        assert!(!SolverError::SessionOver.is_recoverable());
    }

    #[test]
    fn test_contradiction_message_is_one_based() {
        let err = SolverError::ContradictoryFeedback {
            position: 0,
            letter: 'f',
            reason: "conflicts with the letter already found there",
        };
        assert_eq!(
            err.to_string(),
            "contradictory feedback at position 1: 'f' conflicts with the letter already found there"
        );
    }
}
