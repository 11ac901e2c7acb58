use log::{error, info};
use std::error::Error;
use std::io;
use std::process::ExitCode;
use wordle_assistant::cli::{Cli, CliInterface, ConsoleReporter, parse_cli};
use wordle_assistant::game_state::{GameInterface, GameOutcome, autosolve, game_loop};
use wordle_assistant::logging::{LogConfig, LogDestination, default_log_path, init_logging};
use wordle_assistant::solver::RandomPicker;
use wordle_assistant::tui::TuiInterface;
use wordle_assistant::wordbank::{EMBEDDED_WORDBANK, load_wordbank_from_file, load_wordbank_from_str};

fn log_config(cli: &Cli) -> LogConfig {
    // The full-screen interface owns the terminal, so its logs go to a file.
    let destination = match (&cli.log_file, cli.tui) {
        (Some(path), _) => LogDestination::File(path.clone()),
        (None, true) => default_log_path().map_or(LogDestination::Stderr, LogDestination::File),
        (None, false) => LogDestination::Stderr,
    };
    LogConfig {
        debug: cli.debug,
        destination,
    }
}

fn load_words(cli: &Cli) -> io::Result<Vec<String>> {
    match &cli.wordbank_path {
        Some(path) => load_wordbank_from_file(path, cli.length),
        None => Ok(load_wordbank_from_str(EMBEDDED_WORDBANK, cli.length)),
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let words = load_words(cli).map_err(|e| {
        error!("Failed to load word list: {e}");
        e
    })?;
    info!("Loaded {} words.", words.len());

    let mut picker = match cli.seed {
        Some(seed) => RandomPicker::seeded(seed),
        None => RandomPicker::new(),
    };

    if let Some(answer) = &cli.answer {
        let mut reporter = ConsoleReporter::new(io::stdout());
        let report = autosolve(
            &words,
            cli.length,
            answer,
            &mut picker,
            cli.scoring.into(),
            &mut reporter,
        )?;
        info!("Solved {} in {} tries", report.answer, report.tries);
        return Ok(());
    }

    let mut interface: Box<dyn GameInterface> = if cli.tui {
        Box::new(TuiInterface::new()?)
    } else {
        Box::new(CliInterface::new(io::stdin().lock(), io::stdout()))
    };
    match game_loop(&words, cli.length, interface.as_mut(), &mut picker)? {
        GameOutcome::Solved { solution, tries } => info!("Solved {solution} in {tries} guesses"),
        GameOutcome::Quit => info!("Quit before solving"),
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = parse_cli();
    if let Err(e) = init_logging(&log_config(&cli)) {
        eprintln!("Failed to set up logging: {e}");
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
