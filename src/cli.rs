use crate::debug_log;
use crate::error::SolverError;
use crate::feedback::{Feedback, Scoring, format_feedback};
use crate::game_state::{FeedbackInput, GameInterface, Reporter, UserAction};
use crate::knowledge::KnowledgeState;
use crate::wordbank::DEFAULT_WORD_LENGTH;
use clap::{Parser, ValueEnum};
use std::fmt;
use std::io::{BufRead, Write};
use std::path::PathBuf;

const MAX_CANDIDATES_DISPLAY: usize = 5;

/// Narrow down Wordle answers from the feedback you get, or watch it solve a known word.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a newline-delimited word list (defaults to the built-in list)
    #[arg(short = 'f', long = "filename")]
    pub wordbank_path: Option<PathBuf>,

    /// Provide an answer and have the assistant solve it by itself
    #[arg(short, long)]
    pub answer: Option<String>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Use the full-screen terminal interface for interactive play
    #[arg(long)]
    pub tui: bool,

    /// Seed for the random guess picker
    #[arg(long)]
    pub seed: Option<u64>,

    /// How feedback is computed when solving a known answer
    #[arg(long, value_enum, default_value_t = ScoringArg::Membership)]
    pub scoring: ScoringArg,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Number of letters per word
    #[arg(long, default_value_t = DEFAULT_WORD_LENGTH, value_parser = parse_word_length)]
    pub length: usize,
}

fn parse_word_length(value: &str) -> Result<usize, String> {
    let length: usize = value
        .parse()
        .map_err(|e| format!("'{value}' is not a number: {e}"))?;
    if length == 0 {
        return Err("word length must be at least 1".to_string());
    }
    Ok(length)
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoringArg {
    /// Any letter found in the answer is present, however often it is guessed
    Membership,
    /// Each answer letter is matched at most once (standard Wordle rules)
    Counted,
}

impl From<ScoringArg> for Scoring {
    fn from(arg: ScoringArg) -> Self {
        match arg {
            ScoringArg::Membership => Scoring::Membership,
            ScoringArg::Counted => Scoring::Counted,
        }
    }
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

fn is_valid_word(word: &str, word_length: usize) -> bool {
    word.chars().count() == word_length && word.chars().all(|c| c.is_ascii_alphabetic())
}

/// Prints session progress as plain lines of text.
pub struct ConsoleReporter<W: Write> {
    writer: W,
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn emit(&mut self, line: fmt::Arguments<'_>) {
        if let Err(e) = writeln!(self.writer, "{line}") {
            debug_log!("write error: {}", e);
        }
    }

    fn prompt(&mut self, text: &str) {
        self.emit(format_args!("{text}"));
        if let Err(e) = self.writer.flush() {
            debug_log!("flush error: {}", e);
        }
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn display_guess(&mut self, guess: &str) {
        self.emit(format_args!("Guess: {guess}"));
    }

    fn display_feedback(&mut self, _guess: &str, feedback: &[Feedback]) {
        self.emit(format_args!("Score: {}", format_feedback(feedback)));
    }

    fn display_progress(&mut self, knowledge: &KnowledgeState, remaining: &[String]) {
        self.emit(format_args!("Word so far: {knowledge}"));
        self.emit(format_args!("Possible # of words {}", remaining.len()));
        for word in remaining.iter().take(MAX_CANDIDATES_DISPLAY) {
            self.emit(format_args!("  {word}"));
        }
        if remaining.len() > MAX_CANDIDATES_DISPLAY {
            self.emit(format_args!(
                "  ...and {} more",
                remaining.len() - MAX_CANDIDATES_DISPLAY
            ));
        }
    }

    fn display_rejected(&mut self, error: &SolverError) {
        self.emit(format_args!("Invalid score: {error}"));
    }

    fn display_solution_found(&mut self, solution: &str, tries: usize) {
        self.emit(format_args!("Correctly guessed: {solution} in {tries}"));
    }

    fn display_no_candidates_message(&mut self) {
        self.emit(format_args!("Out of words, not a valid Wordle word?"));
    }
}

/// Line-based interactive interface over any reader and writer.
pub struct CliInterface<R: BufRead, W: Write> {
    reader: R,
    reporter: ConsoleReporter<W>,
}

impl<R: BufRead, W: Write> CliInterface<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            reporter: ConsoleReporter::new(writer),
        }
    }

    pub fn into_writer(self) -> W {
        self.reporter.into_inner()
    }

    /// Next trimmed line, or `None` at end of input.
    fn read_line(&mut self) -> Option<String> {
        let mut input = String::new();
        match self.reader.read_line(&mut input) {
            Ok(0) => None,
            Ok(_) => Some(input.trim().to_string()),
            Err(e) => {
                debug_log!("read error: {}", e);
                None
            }
        }
    }
}

impl<R: BufRead, W: Write> Reporter for CliInterface<R, W> {
    fn display_guess(&mut self, guess: &str) {
        self.reporter.display_guess(guess);
    }

    fn display_feedback(&mut self, guess: &str, feedback: &[Feedback]) {
        self.reporter.display_feedback(guess, feedback);
    }

    fn display_progress(&mut self, knowledge: &KnowledgeState, remaining: &[String]) {
        self.reporter.display_progress(knowledge, remaining);
    }

    fn display_rejected(&mut self, error: &SolverError) {
        self.reporter.display_rejected(error);
    }

    fn display_solution_found(&mut self, solution: &str, _tries: usize) {
        self.reporter
            .emit(format_args!("Word correctly guessed: {solution}"));
    }

    fn display_no_candidates_message(&mut self) {
        self.reporter.display_no_candidates_message();
    }
}

impl<R: BufRead, W: Write> GameInterface for CliInterface<R, W> {
    fn read_opening_guess(&mut self, word_length: usize) -> UserAction {
        loop {
            self.reporter.prompt(&format!(
                "Enter initial word guess ({word_length} letters, blank to let me pick, 'exit' to quit):"
            ));
            let Some(input) = self.read_line() else {
                return UserAction::Exit;
            };
            let input = input.to_lowercase();
            match input.as_str() {
                "exit" => return UserAction::Exit,
                "" => return UserAction::Suggest,
                _ if is_valid_word(&input, word_length) => return UserAction::Guess(input),
                _ => self.reporter.emit(format_args!(
                    "Invalid word size, please enter {word_length} letters."
                )),
            }
        }
    }

    fn read_feedback(&mut self, guess: &str) -> FeedbackInput {
        self.reporter.prompt(&format!(
            "Enter word score for {guess} (b=not in word, y=wrong spot, g=correct, e.g. bygbb):"
        ));
        match self.read_line() {
            None => FeedbackInput::Exit,
            Some(input) if input.eq_ignore_ascii_case("exit") => FeedbackInput::Exit,
            Some(input) => FeedbackInput::Entered(input),
        }
    }

    fn display_exit_message(&mut self) {
        self.reporter.emit(format_args!("Exiting."));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn interface(input: &str) -> CliInterface<Cursor<String>, Vec<u8>> {
        CliInterface::new(Cursor::new(input.to_string()), Vec::new())
    }

    fn output(interface: CliInterface<Cursor<String>, Vec<u8>>) -> String {
        String::from_utf8(interface.into_writer()).unwrap()
    }

    #[test]
    fn test_parse_cli_defaults() {
        let cli = Cli::try_parse_from(["wordle-assistant"]).unwrap();
        assert_eq!(cli.wordbank_path, None);
        assert_eq!(cli.answer, None);
        assert!(!cli.debug);
        assert!(!cli.tui);
        assert_eq!(cli.scoring, ScoringArg::Membership);
        assert_eq!(cli.length, 5);
    }

    #[test]
    fn test_parse_cli_all_options() {
        let cli = Cli::try_parse_from([
            "wordle-assistant",
            "-f",
            "word_list",
            "-a",
            "tests",
            "--debug",
            "--seed",
            "9",
            "--scoring",
            "counted",
            "--log-file",
            "/tmp/wordle.log",
        ])
        .unwrap();
        assert_eq!(cli.wordbank_path, Some(PathBuf::from("word_list")));
        assert_eq!(cli.answer.as_deref(), Some("tests"));
        assert!(cli.debug);
        assert_eq!(cli.seed, Some(9));
        assert_eq!(Scoring::from(cli.scoring), Scoring::Counted);
        assert_eq!(cli.log_file, Some(PathBuf::from("/tmp/wordle.log")));
    }

    #[test]
    fn test_parse_cli_word_length() {
        let cli = Cli::try_parse_from(["wordle-assistant", "--length", "4"]).unwrap();
        assert_eq!(cli.length, 4);
        assert!(Cli::try_parse_from(["wordle-assistant", "--length", "0"]).is_err());
        assert!(Cli::try_parse_from(["wordle-assistant", "--length", "five"]).is_err());
    }

    #[test]
    fn test_parse_cli_rejects_unknown_scoring() {
        assert!(Cli::try_parse_from(["wordle-assistant", "--scoring", "entropy"]).is_err());
    }

    #[test]
    fn test_is_valid_word() {
        assert!(is_valid_word("crane", 5));
        assert!(is_valid_word("CrAnE", 5));
        assert!(!is_valid_word("cran", 5));
        assert!(!is_valid_word("cranes", 5));
        assert!(!is_valid_word("cr4ne", 5));
        assert!(!is_valid_word("", 5));
    }

    #[test]
    fn test_read_opening_guess() {
        let mut ui = interface("CRANE\n");
        assert_eq!(ui.read_opening_guess(5), UserAction::Guess("crane".to_string()));
    }

    #[test]
    fn test_read_opening_guess_blank_and_exit() {
        let mut ui = interface("\n");
        assert_eq!(ui.read_opening_guess(5), UserAction::Suggest);
        let mut ui = interface("EXIT\n");
        assert_eq!(ui.read_opening_guess(5), UserAction::Exit);
        let mut ui = interface("");
        assert_eq!(ui.read_opening_guess(5), UserAction::Exit);
    }

    #[test]
    fn test_read_opening_guess_reprompts_on_bad_word() {
        let mut ui = interface("cran\ncr4ne\nslate\n");
        assert_eq!(ui.read_opening_guess(5), UserAction::Guess("slate".to_string()));
        let text = output(ui);
        assert_eq!(text.matches("Invalid word size").count(), 2);
    }

    #[test]
    fn test_read_feedback() {
        let mut ui = interface("  gybbb \nexit\n");
        assert_eq!(
            ui.read_feedback("crane"),
            FeedbackInput::Entered("gybbb".to_string())
        );
        assert_eq!(ui.read_feedback("crane"), FeedbackInput::Exit);
        assert_eq!(ui.read_feedback("crane"), FeedbackInput::Exit);
    }

    #[test]
    fn test_console_reporter_progress() {
        let mut reporter = ConsoleReporter::new(Vec::new());
        let knowledge = KnowledgeState::with_constraints(
            vec![Some('t'), None, None, Some('k'), None],
            ['o'],
            ['b'],
        );
        let remaining: Vec<String> = ["a", "b", "c", "d", "e", "f", "g"]
            .iter()
            .map(|w| w.repeat(5))
            .collect();
        reporter.display_progress(&knowledge, &remaining);
        let text = String::from_utf8(reporter.into_inner()).unwrap();
        assert!(text.contains("Word so far: t__k_"));
        assert!(text.contains("Possible # of words 7"));
        assert!(text.contains("...and 2 more"));
    }

    #[test]
    fn test_console_reporter_messages() {
        let mut reporter = ConsoleReporter::new(Vec::new());
        reporter.display_guess("tests");
        reporter.display_feedback("tests", &[Feedback::Hit; 5]);
        reporter.display_solution_found("tests", 3);
        reporter.display_rejected(&SolverError::ExhaustedCandidates);
        let text = String::from_utf8(reporter.into_inner()).unwrap();
        assert!(text.contains("Guess: tests"));
        assert!(text.contains("Score: ggggg"));
        assert!(text.contains("Correctly guessed: tests in 3"));
        assert!(text.contains("Invalid score: out of words"));
    }
}
