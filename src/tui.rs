//! Full-screen terminal interface built on Ratatui.
//!
//! # State Machine
//! - `EnteringGuess` → `MarkingFeedback` → `ConfirmingFeedback` → back to `MarkingFeedback`
//!   for the next guess the assistant makes
//! - Terminal state: `GameOver`, left with any key

use crate::error::SolverError;
use crate::feedback::Feedback;
use crate::game_state::{FeedbackInput, GameInterface, Reporter, UserAction};
use crate::knowledge::KnowledgeState;
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;

const MAX_CANDIDATES_DISPLAY: usize = 10;

const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const INFO_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);

#[derive(Clone, Copy, PartialEq, Debug)]
enum LetterState {
    Entered,
    Hit,
    Present,
    Miss,
}

impl LetterState {
    fn colors(self) -> (Color, Color) {
        match self {
            Self::Entered => (Color::DarkGray, Color::White),
            Self::Hit => (Color::Green, Color::Black),
            Self::Present => (Color::Yellow, Color::Black),
            Self::Miss => (Color::Gray, Color::White),
        }
    }

    fn from_feedback(feedback: Feedback) -> Self {
        match feedback {
            Feedback::Hit => Self::Hit,
            Feedback::Present => Self::Present,
            Feedback::Miss => Self::Miss,
        }
    }

    fn to_char(self) -> Option<char> {
        match self {
            Self::Entered => None,
            Self::Hit => Some(Feedback::Hit.to_char()),
            Self::Present => Some(Feedback::Present.to_char()),
            Self::Miss => Some(Feedback::Miss.to_char()),
        }
    }
}

#[derive(Debug)]
struct GuessRow {
    letters: Vec<char>,
    states: Vec<LetterState>,
}

impl GuessRow {
    fn from_guess(guess: &str) -> Self {
        let letters: Vec<char> = guess.chars().map(|c| c.to_ascii_uppercase()).collect();
        let states = vec![LetterState::Entered; letters.len()];
        Self { letters, states }
    }

    fn reset(&mut self) {
        self.states.fill(LetterState::Entered);
    }

    /// The marked feedback as text, once every letter is marked.
    fn encoded(&self) -> Option<String> {
        self.states.iter().map(|s| s.to_char()).collect()
    }
}

#[derive(Debug, PartialEq)]
enum TuiState {
    EnteringGuess,
    MarkingFeedback { marking_index: usize },
    ConfirmingFeedback,
    GameOver,
}

struct RenderContext<'a> {
    guesses: &'a [GuessRow],
    current_input: &'a str,
    word_length: usize,
    state: &'a TuiState,
    pattern: &'a str,
    candidates: &'a [String],
    message: &'a str,
    error_message: &'a str,
    status: &'a str,
}

pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    guesses: Vec<GuessRow>,
    current_input: String,
    word_length: usize,
    state: TuiState,
    pattern: String,
    candidates: Vec<String>,
    message: String,
    error_message: String,
    status: String,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        info_log!("Terminal backend created");

        Ok(Self {
            terminal,
            guesses: Vec::new(),
            current_input: String::new(),
            word_length: 0,
            state: TuiState::EnteringGuess,
            pattern: String::new(),
            candidates: Vec::new(),
            message: String::new(),
            error_message: String::new(),
            status: "Ready to start".to_string(),
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    fn draw(&mut self) -> Result<(), io::Error> {
        let ctx = RenderContext {
            guesses: &self.guesses,
            current_input: &self.current_input,
            word_length: self.word_length,
            state: &self.state,
            pattern: &self.pattern,
            candidates: &self.candidates,
            message: &self.message,
            error_message: &self.error_message,
            status: &self.status,
        };
        self.terminal.draw(|f| Self::render_static(f, &ctx))?;
        Ok(())
    }

    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    fn render_static(f: &mut Frame, ctx: &RenderContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),  // Title
                Constraint::Length(14), // Board
                Constraint::Min(8),     // Info
                Constraint::Length(3),  // Status
                Constraint::Length(3),  // Instructions
            ])
            .split(f.area());

        Self::render_title(f, chunks[0]);
        Self::render_board(f, chunks[1], ctx);
        Self::render_info(f, chunks[2], ctx);
        Self::render_status(f, chunks[3], ctx.status);
        Self::render_instructions(f, chunks[4], ctx.state);
    }

    fn render_title(f: &mut Frame, area: Rect) {
        let title = Paragraph::new("WORDLE ASSISTANT")
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn render_board(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let block = Block::default().title("Guesses").borders(Borders::ALL);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let mut lines: Vec<Line> = Vec::new();
        for (row_index, row) in ctx.guesses.iter().enumerate() {
            let mut spans = vec![Span::raw("  ")];
            for (letter, state) in row.letters.iter().zip(&row.states) {
                let (bg, fg) = state.colors();
                spans.push(Span::styled(format!(" {letter} "), Style::default().fg(fg).bg(bg)));
                spans.push(Span::raw(" "));
            }
            if let TuiState::MarkingFeedback { marking_index } = ctx.state
                && row_index + 1 == ctx.guesses.len()
            {
                spans.push(Span::raw(format!(
                    " <- Marking letter {} (G/Y/B)",
                    marking_index + 1
                )));
            }
            lines.push(Line::from(spans));
            lines.push(Line::from(""));
        }

        if *ctx.state == TuiState::EnteringGuess {
            let mut spans = vec![Span::raw("  ")];
            for i in 0..ctx.word_length {
                let letter = ctx.current_input.chars().nth(i).unwrap_or(' ');
                spans.push(Span::styled(
                    format!(" {letter} "),
                    Style::default().fg(Color::White).bg(Color::DarkGray),
                ));
                spans.push(Span::raw(" "));
            }
            lines.push(Line::from(spans));
        }

        // Keep the most recent rows visible.
        let visible = inner.height as usize;
        let skip = lines.len().saturating_sub(visible);
        let lines: Vec<Line> = lines.into_iter().skip(skip).collect();
        f.render_widget(Paragraph::new(lines), inner);
    }

    fn render_info(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let mut lines = Vec::new();

        if !ctx.pattern.is_empty() {
            lines.push(Line::from(vec![Span::styled(
                format!("Word so far: {}", ctx.pattern),
                SUCCESS_STYLE,
            )]));
            lines.push(Line::from(""));
        }

        if !ctx.candidates.is_empty() {
            lines.push(Line::from(vec![Span::styled(
                format!("Possible candidates ({}):", ctx.candidates.len()),
                INFO_STYLE,
            )]));
            for word in ctx.candidates.iter().take(MAX_CANDIDATES_DISPLAY) {
                lines.push(Line::from(format!("  {word}")));
            }
            if ctx.candidates.len() > MAX_CANDIDATES_DISPLAY {
                lines.push(Line::from(format!(
                    "  ... and {} more",
                    ctx.candidates.len() - MAX_CANDIDATES_DISPLAY
                )));
            }
            lines.push(Line::from(""));
        }

        if !ctx.message.is_empty() {
            lines.push(Line::from(vec![Span::styled(ctx.message, MESSAGE_STYLE)]));
        }
        if !ctx.error_message.is_empty() {
            lines.push(Line::from(vec![Span::styled(ctx.error_message, ERROR_STYLE)]));
        }

        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Information").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_instructions(f: &mut Frame, area: Rect, state: &TuiState) {
        let text = match state {
            TuiState::EnteringGuess => {
                "Type your opening guess | ENTER: Submit (empty: let me pick) | ESC: Quit"
            }
            TuiState::MarkingFeedback { .. } => {
                "G: Green (correct) | Y: Yellow (wrong spot) | B: Black (not in word) | BACKSPACE: Go back"
            }
            TuiState::ConfirmingFeedback => "ENTER: Confirm feedback | BACKSPACE: Go back and edit",
            TuiState::GameOver => "Press any key to exit",
        };
        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_status(f: &mut Frame, area: Rect, status: &str) {
        let status_text = if status.is_empty() { "Ready" } else { status };
        let paragraph = Paragraph::new(status_text)
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL).title("Status"));
        f.render_widget(paragraph, area);
    }

    /// Block until the next key press. Release/repeat events and modified keys are skipped.
    fn next_key(&mut self) -> Result<KeyEvent, io::Error> {
        loop {
            if let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press
                && !key
                    .modifiers
                    .intersects(KeyModifiers::ALT | KeyModifiers::CONTROL)
            {
                debug_log!("next_key() - {:?}", key.code);
                return Ok(key);
            }
        }
    }

    fn handle_guess_key(&mut self, key: KeyEvent) -> Option<UserAction> {
        self.error_message.clear();
        match key.code {
            KeyCode::Char(c) if c.is_ascii_alphabetic() => {
                if self.current_input.len() < self.word_length {
                    self.current_input.push(c.to_ascii_uppercase());
                }
            }
            KeyCode::Char(c) => {
                self.error_message = format!("Only letters are allowed! ('{c}' is not a letter)");
            }
            KeyCode::Backspace => {
                self.current_input.pop();
            }
            KeyCode::Enter if self.current_input.is_empty() => return Some(UserAction::Suggest),
            KeyCode::Enter if self.current_input.len() == self.word_length => {
                let guess = self.current_input.to_lowercase();
                self.current_input.clear();
                return Some(UserAction::Guess(guess));
            }
            KeyCode::Enter => {
                self.error_message =
                    format!("Guess must be exactly {} letters!", self.word_length);
            }
            KeyCode::Esc => return Some(UserAction::Exit),
            _ => {}
        }
        None
    }

    /// Returns true once the marked feedback is confirmed.
    fn handle_feedback_key(&mut self, key: KeyEvent) -> bool {
        let Some(row) = self.guesses.last_mut() else {
            return false;
        };
        match self.state {
            TuiState::MarkingFeedback { marking_index } => {
                let mark = match key.code {
                    KeyCode::Char(c) => Feedback::from_char(c),
                    KeyCode::Backspace if marking_index > 0 => {
                        row.states[marking_index - 1] = LetterState::Entered;
                        self.state = TuiState::MarkingFeedback {
                            marking_index: marking_index - 1,
                        };
                        return false;
                    }
                    _ => return false,
                };
                let Some(mark) = mark else {
                    self.error_message =
                        "Invalid feedback! Use G (green), Y (yellow) or B (black).".to_string();
                    return false;
                };
                self.error_message.clear();
                row.states[marking_index] = LetterState::from_feedback(mark);
                self.state = if marking_index + 1 < row.states.len() {
                    TuiState::MarkingFeedback {
                        marking_index: marking_index + 1,
                    }
                } else {
                    TuiState::ConfirmingFeedback
                };
                false
            }
            TuiState::ConfirmingFeedback => match key.code {
                KeyCode::Enter => true,
                KeyCode::Backspace => {
                    let last = row.states.len() - 1;
                    row.states[last] = LetterState::Entered;
                    self.state = TuiState::MarkingFeedback {
                        marking_index: last,
                    };
                    false
                }
                _ => false,
            },
            _ => false,
        }
    }

    fn finish(&mut self) {
        self.state = TuiState::GameOver;
        self.draw_or_log();
        if let Err(e) = self.next_key() {
            debug_log!("finish() - input error: {}", e);
        }
    }
}

impl Reporter for TuiInterface {
    fn display_guess(&mut self, guess: &str) {
        self.guesses.push(GuessRow::from_guess(guess));
        self.status = format!("Guess: {guess} - now mark the feedback");
        self.draw_or_log();
    }

    fn display_feedback(&mut self, _guess: &str, feedback: &[Feedback]) {
        if let Some(row) = self.guesses.last_mut() {
            row.states = feedback.iter().copied().map(LetterState::from_feedback).collect();
        }
    }

    fn display_progress(&mut self, knowledge: &KnowledgeState, remaining: &[String]) {
        self.pattern = knowledge.to_string();
        self.candidates = remaining.to_vec();
        self.status = format!("{} words remaining", remaining.len());
        self.draw_or_log();
    }

    fn display_rejected(&mut self, error: &SolverError) {
        self.error_message = format!("Rejected: {error}");
        if matches!(
            self.state,
            TuiState::MarkingFeedback { .. } | TuiState::ConfirmingFeedback
        ) && let Some(row) = self.guesses.last_mut()
        {
            row.reset();
        }
        self.draw_or_log();
    }

    fn display_solution_found(&mut self, solution: &str, tries: usize) {
        self.message = format!("✓ Solved: {solution} in {tries} guesses");
        self.status = format!("Game Over - Solution: {solution}");
        self.finish();
    }

    fn display_no_candidates_message(&mut self) {
        self.message = "Out of words: no candidate fits the feedback. Check your inputs.".to_string();
        self.status = "Error: No valid candidates found".to_string();
        self.finish();
    }
}

impl GameInterface for TuiInterface {
    fn read_opening_guess(&mut self, word_length: usize) -> UserAction {
        self.word_length = word_length;
        self.state = TuiState::EnteringGuess;
        self.status = format!("Enter a {word_length}-letter opening guess");
        loop {
            self.draw_or_log();
            let key = match self.next_key() {
                Ok(key) => key,
                Err(e) => {
                    debug_log!("read_opening_guess() - input error: {}", e);
                    return UserAction::Exit;
                }
            };
            if let Some(action) = self.handle_guess_key(key) {
                info_log!("read_opening_guess() - {:?}", action);
                return action;
            }
        }
    }

    fn read_feedback(&mut self, guess: &str) -> FeedbackInput {
        if let Some(row) = self.guesses.last_mut() {
            row.reset();
        }
        self.state = TuiState::MarkingFeedback { marking_index: 0 };
        self.status = format!("Mark each letter of {guess}: G, Y or B");
        loop {
            self.draw_or_log();
            let key = match self.next_key() {
                Ok(key) => key,
                Err(e) => {
                    debug_log!("read_feedback() - input error: {}", e);
                    return FeedbackInput::Exit;
                }
            };
            if key.code == KeyCode::Esc {
                return FeedbackInput::Exit;
            }
            if self.handle_feedback_key(key)
                && let Some(encoded) = self.guesses.last().and_then(GuessRow::encoded)
            {
                info_log!("read_feedback() - {guess}: {encoded}");
                return FeedbackInput::Entered(encoded);
            }
        }
    }

    fn display_exit_message(&mut self) {
        self.message = "Exiting...".to_string();
        self.draw_or_log();
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
