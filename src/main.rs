mod app;
mod command;
mod config;
mod consts;
mod game;
mod highscore;
mod logging;
mod menu;
mod play;
mod util;
use crate::app::{App, Globals};
use crate::config::Config;
use crate::game::{Mode, ParseModeError};
use crate::highscore::{load_high_score, HighScore, ScoreWriter, WriterThread};
use crate::logging::init_logging;
use anyhow::Context;
use std::io::{self, ErrorKind};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use thiserror::Error;

const USAGE: &str = "Usage: snakebite [--config PATH] [--mode NAME] [--no-save]";

const HELP: &str = "\
Usage: snakebite [--config PATH] [--mode NAME] [--no-save]

Play Snake in your terminal

Options:
  -c, --config PATH   Read configuration from the given file
  -m, --mode NAME     Start in the given mode (easy, normal, hard,
                      impossible, still, slow)
      --no-save       Keep the high score in memory only
  -h, --help          Display this help message and exit
  -V, --version       Show the program version and exit
";

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run(Arguments),
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: lexopt::Parser) -> Result<Command, UsageError> {
        use lexopt::{Arg, ValueExt};
        let mut args = Arguments::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('c') | Arg::Long("config") => {
                    args.config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Short('m') | Arg::Long("mode") => {
                    args.mode = Some(parser.value()?.string()?.parse::<Mode>()?);
                }
                Arg::Long("no-save") => args.no_save = true,
                _ => return Err(arg.unexpected().into()),
            }
        }
        Ok(Command::Run(args))
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct Arguments {
    config: Option<PathBuf>,
    mode: Option<Mode>,
    no_save: bool,
}

impl Arguments {
    fn run(self) -> anyhow::Result<()> {
        let config = self.load_config()?;
        if let Err(e) = init_logging(&config) {
            eprintln!(
                "snakebite: logging disabled: {}",
                highscore::error_chain(&e)
            );
        }
        let (high_score, writer_thread) = open_high_score(&config);
        let app = App::new(Globals { config, high_score });
        let terminal = ratatui::init();
        let r = app.run(terminal);
        ratatui::restore();
        // All `ScoreWriter`s went away with the app, so this only waits for
        // writes that are still in flight
        if let Some(thread) = writer_thread {
            thread.finish();
        }
        log::info!("Exiting");
        r.context("error running game")
    }

    fn load_config(&self) -> anyhow::Result<Config> {
        let mut config = if let Some(ref path) = self.config {
            Config::load(path, false)
                .with_context(|| format!("failed to load configuration from {}", path.display()))?
        } else {
            let path = Config::default_path()?;
            Config::load(&path, true)
                .with_context(|| format!("failed to load configuration from {}", path.display()))?
        };
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        if self.no_save {
            config.files.save_high_score = false;
        }
        Ok(config)
    }
}

/// Load the stored high score and start the thread that saves new ones.  If
/// saving is disabled or the thread can't be started, the high score is kept
/// in memory only.
fn open_high_score(config: &Config) -> (HighScore, Option<WriterThread>) {
    let Some(store) = config.high_score_store() else {
        log::info!("High score will not be saved");
        return (HighScore::in_memory(consts::INITIAL_SCORE), None);
    };
    log::debug!("Using high score file {}", store.path().display());
    let best = load_high_score(&store);
    match ScoreWriter::spawn(Arc::new(store)) {
        Ok((writer, thread)) => (HighScore::new(best, Some(writer)), Some(thread)),
        Err(e) => {
            log::error!("Failed to start high score writer thread: {e}");
            (HighScore::in_memory(best), None)
        }
    }
}

#[derive(Debug, Error)]
enum UsageError {
    #[error(transparent)]
    Args(#[from] lexopt::Error),
    #[error(transparent)]
    Mode(#[from] ParseModeError),
}

fn main() -> ExitCode {
    match Command::from_parser(lexopt::Parser::from_env()) {
        Ok(Command::Run(args)) => exit_status(args.run()),
        Ok(Command::Help) => {
            print!("{HELP}");
            ExitCode::SUCCESS
        }
        Ok(Command::Version) => {
            println!("snakebite {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("snakebite: {e}\n{USAGE}");
            ExitCode::from(2)
        }
    }
}

fn exit_status(r: anyhow::Result<()>) -> ExitCode {
    match r {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if is_broken_pipe(&e) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("snakebite: {e:#}");
            ExitCode::from(2)
        }
    }
}

fn is_broken_pipe(e: &anyhow::Error) -> bool {
    e.chain()
        .filter_map(|src| src.downcast_ref::<io::Error>())
        .any(|ioe| ioe.kind() == ErrorKind::BrokenPipe)
}
