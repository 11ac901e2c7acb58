// Library interface for wordle-assistant
// This allows integration tests to access internal modules

pub mod cli;
pub mod error;
pub mod feedback;
pub mod game_state;
pub mod knowledge;
pub mod logging;
pub mod solver;
pub mod tui;
pub mod wordbank;

// Re-export commonly used items for easier testing
pub use error::SolverError;
pub use feedback::{Feedback, Scoring, format_feedback, parse_feedback, score_word};
pub use game_state::{GameOutcome, Session, SolveReport, autosolve, game_loop};
pub use knowledge::KnowledgeState;
pub use solver::{CandidatePool, FirstPicker, GuessPicker, RandomPicker, filter_candidates};
pub use wordbank::{load_wordbank_from_file, load_wordbank_from_str};
