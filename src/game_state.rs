use crate::error::SolverError;
use crate::feedback::{Feedback, Scoring, format_feedback, is_solved, parse_feedback};
use crate::knowledge::KnowledgeState;
use crate::solver::{CandidatePool, GuessPicker};
use crate::{debug_log, info_log};
use log::{error, warn};

/// Where a session is in its guess/feedback cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    AwaitingGuess,
    AwaitingFeedback { guess: String },
    Solved { guess: String, tries: usize },
}

/// Result of feeding accepted feedback into a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress {
    Solved { guess: String, tries: usize },
    Continue { remaining: usize },
}

/// One solving session: the knowledge gathered so far and the words still in play.
///
/// Sessions share nothing with each other.
#[derive(Debug, Clone)]
pub struct Session {
    knowledge: KnowledgeState,
    pool: CandidatePool,
    phase: Phase,
    guesses: Vec<String>,
    /// Pool index the pending guess was taken from, if it came from the pool.
    pending_slot: Option<usize>,
}

impl Session {
    #[must_use]
    pub fn new(words: Vec<String>, word_length: usize) -> Self {
        Self {
            knowledge: KnowledgeState::new(word_length),
            pool: CandidatePool::new(words),
            phase: Phase::AwaitingGuess,
            guesses: Vec::new(),
            pending_slot: None,
        }
    }

    #[must_use]
    pub fn knowledge(&self) -> &KnowledgeState {
        &self.knowledge
    }

    #[must_use]
    pub fn pool(&self) -> &CandidatePool {
        &self.pool
    }

    #[must_use]
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    #[must_use]
    pub fn guesses(&self) -> &[String] {
        &self.guesses
    }

    #[must_use]
    pub fn word_length(&self) -> usize {
        self.knowledge.word_length()
    }

    /// Pick the next guess and take it out of the pool.
    ///
    /// Asking again while feedback is still pending returns the pending guess.
    pub fn next_guess(&mut self, picker: &mut dyn GuessPicker) -> Result<String, SolverError> {
        match &self.phase {
            Phase::Solved { .. } => return Err(SolverError::SessionOver),
            Phase::AwaitingFeedback { guess } => return Ok(guess.clone()),
            Phase::AwaitingGuess => {}
        }
        let Some((slot, guess)) = self.pool.take_guess(picker) else {
            error!("Out of words, is the answer missing from the word list?");
            return Err(SolverError::ExhaustedCandidates);
        };
        self.begin_round(guess.clone(), Some(slot));
        Ok(guess)
    }

    /// Use a guess chosen outside the session, such as the player's opening word.
    ///
    /// A pending guess it replaces goes back into the pool where it was.
    pub fn offer_guess(&mut self, guess: &str) -> Result<(), SolverError> {
        if matches!(self.phase, Phase::Solved { .. }) {
            return Err(SolverError::SessionOver);
        }
        let guess = guess.trim().to_lowercase();
        let len = guess.chars().count();
        if len != self.word_length() {
            return Err(SolverError::WordLength {
                expected: self.word_length(),
                actual: len,
            });
        }
        if let Phase::AwaitingFeedback { guess: pending } = &self.phase {
            warn!("Replacing pending guess {pending} with {guess}");
            if let Some(slot) = self.pending_slot {
                self.pool.put_back(slot, pending.clone());
            }
            self.guesses.pop();
        }
        let slot = self.pool.remove(&guess);
        self.begin_round(guess, slot);
        Ok(())
    }

    fn begin_round(&mut self, guess: String, slot: Option<usize>) {
        info_log!("Guess: {guess}");
        self.guesses.push(guess.clone());
        self.pending_slot = slot;
        self.phase = Phase::AwaitingFeedback { guess };
    }

    /// Feed the feedback for the pending guess into the session.
    ///
    /// Rejected feedback leaves everything as it was and the same guess stays pending.
    pub fn submit_feedback(&mut self, feedback: &[Feedback]) -> Result<Progress, SolverError> {
        let guess = match &self.phase {
            Phase::AwaitingFeedback { guess } => guess.clone(),
            Phase::Solved { .. } => return Err(SolverError::SessionOver),
            Phase::AwaitingGuess => {
                return Err(SolverError::invalid_format("no guess is waiting for feedback"));
            }
        };

        if let Err(err) = self.knowledge.apply(&guess, feedback) {
            warn!("Rejected feedback {} for {guess}: {err}", format_feedback(feedback));
            return Err(err);
        }
        debug_log!("Word so far: {}", self.knowledge);

        if is_solved(feedback) {
            let tries = self.guesses.len();
            info_log!("Correctly guessed {guess} in {tries}");
            self.phase = Phase::Solved {
                guess: guess.clone(),
                tries,
            };
            return Ok(Progress::Solved { guess, tries });
        }

        let remaining = self.pool.retain_possible(&self.knowledge);
        self.phase = Phase::AwaitingGuess;
        Ok(Progress::Continue { remaining })
    }

    /// [`Session::submit_feedback`] for feedback in its `b`/`y`/`g` text form.
    pub fn submit_encoded(&mut self, feedback: &str) -> Result<Progress, SolverError> {
        let feedback = parse_feedback(feedback, self.word_length())?;
        self.submit_feedback(&feedback)
    }
}

/// Receives progress events from a running session.
///
/// Every method defaults to doing nothing.
pub trait Reporter {
    fn display_guess(&mut self, _guess: &str) {}

    fn display_feedback(&mut self, _guess: &str, _feedback: &[Feedback]) {}

    fn display_progress(&mut self, _knowledge: &KnowledgeState, _remaining: &[String]) {}

    fn display_rejected(&mut self, _error: &SolverError) {}

    fn display_solution_found(&mut self, _solution: &str, _tries: usize) {}

    fn display_no_candidates_message(&mut self) {}
}

/// A reporter that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentReporter;

impl Reporter for SilentReporter {}

/// What the player does when asked for an opening word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    Guess(String),
    /// Let the assistant choose.
    Suggest,
    Exit,
}

/// What the player types in answer to a guess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedbackInput {
    Entered(String),
    Exit,
}

/// The human side of an interactive session.
pub trait GameInterface: Reporter {
    fn read_opening_guess(&mut self, word_length: usize) -> UserAction;

    fn read_feedback(&mut self, guess: &str) -> FeedbackInput;

    fn display_exit_message(&mut self) {}
}

/// Summary of an autosolve run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveReport {
    pub answer: String,
    pub guesses: Vec<String>,
    pub tries: usize,
}

/// Play against a known answer until it is guessed.
///
/// An answer that is not `word_length` letters long is rejected before any guess is made.
pub fn autosolve(
    words: &[String],
    word_length: usize,
    answer: &str,
    picker: &mut dyn GuessPicker,
    scoring: Scoring,
    reporter: &mut dyn Reporter,
) -> Result<SolveReport, SolverError> {
    let answer = answer.trim().to_lowercase();
    let answer_len = answer.chars().count();
    if answer_len != word_length {
        error!("Answer {answer:?} is {answer_len} letters, expected {word_length}");
        return Err(SolverError::WordLength {
            expected: word_length,
            actual: answer_len,
        });
    }
    let mut session = Session::new(words.to_vec(), word_length);

    loop {
        let guess = match session.next_guess(picker) {
            Ok(guess) => guess,
            Err(err) => {
                reporter.display_no_candidates_message();
                return Err(err);
            }
        };
        reporter.display_guess(&guess);

        let feedback = scoring.score(&guess, &answer);
        reporter.display_feedback(&guess, &feedback);

        match session.submit_feedback(&feedback)? {
            Progress::Solved { guess, tries } => {
                reporter.display_solution_found(&guess, tries);
                return Ok(SolveReport {
                    answer,
                    guesses: session.guesses().to_vec(),
                    tries,
                });
            }
            Progress::Continue { .. } => {
                reporter.display_progress(session.knowledge(), session.pool().words());
            }
        }
    }
}

/// How an interactive game ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameOutcome {
    Solved { solution: String, tries: usize },
    Quit,
}

/// Play interactively: the player scores each guess through `interface`.
pub fn game_loop(
    words: &[String],
    word_length: usize,
    interface: &mut dyn GameInterface,
    picker: &mut dyn GuessPicker,
) -> Result<GameOutcome, SolverError> {
    let mut session = Session::new(words.to_vec(), word_length);

    loop {
        match interface.read_opening_guess(word_length) {
            UserAction::Exit => {
                interface.display_exit_message();
                return Ok(GameOutcome::Quit);
            }
            UserAction::Suggest => break,
            UserAction::Guess(word) => match session.offer_guess(&word) {
                Ok(()) => break,
                Err(err) if err.is_recoverable() => interface.display_rejected(&err),
                Err(err) => return Err(err),
            },
        }
    }

    loop {
        let guess = match session.next_guess(picker) {
            Ok(guess) => guess,
            Err(err) => {
                interface.display_no_candidates_message();
                return Err(err);
            }
        };
        interface.display_guess(&guess);

        let progress = loop {
            let input = match interface.read_feedback(&guess) {
                FeedbackInput::Exit => {
                    interface.display_exit_message();
                    return Ok(GameOutcome::Quit);
                }
                FeedbackInput::Entered(input) => input,
            };
            let feedback = match parse_feedback(&input, word_length) {
                Ok(feedback) => feedback,
                Err(err) => {
                    interface.display_rejected(&err);
                    continue;
                }
            };
            match session.submit_feedback(&feedback) {
                Ok(progress) => {
                    interface.display_feedback(&guess, &feedback);
                    break progress;
                }
                Err(err) if err.is_recoverable() => interface.display_rejected(&err),
                Err(err) => return Err(err),
            }
        };

        match progress {
            Progress::Solved { guess, tries } => {
                interface.display_solution_found(&guess, tries);
                return Ok(GameOutcome::Solved {
                    solution: guess,
                    tries,
                });
            }
            Progress::Continue { .. } => {
                interface.display_progress(session.knowledge(), session.pool().words());
            }
        }
    }
}
