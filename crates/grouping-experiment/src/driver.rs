//! Command loop driving a session round by round.
//!
//! Reads one command per line and writes reports to the given output, so the
//! same loop serves stdin/stdout and tests.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use grouping_kernel::Session;
use rand::Rng;
use tracing::{info, warn};

use crate::report::{round_report, statistics_report};
use crate::results::{default_history_path, save_history};

/// A command accepted by the loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Advance one round
    Go,
    /// Show statistics
    Stat,
    /// Save history
    Save,
    Quit,
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let normalized = line.trim().to_lowercase();
        match normalized.as_str() {
            "go" | "g" => Command::Go,
            "stat" | "s" => Command::Stat,
            "save" => Command::Save,
            "quit" | "q" => Command::Quit,
            _ => Command::Unknown(normalized),
        }
    }
}

pub const HELP: &str = "Commands:\n  go, g     start a new round\n  stat, s   show statistics\n  save      save history to JSON\n  quit, q   exit";

/// Run one round and write its report followed by statistics.
pub fn advance<R: Rng>(session: &mut Session<R>, out: &mut impl Write) -> Result<()> {
    let text = round_text(session)?;
    write!(out, "{}", text)?;
    Ok(())
}

fn round_text<R: Rng>(session: &mut Session<R>) -> Result<String> {
    let round = session.create_round()?.clone();
    let mut text = round_report(&round, session.roster());
    text.push_str(&statistics_report(&session.statistics()));
    Ok(text)
}

/// Run a non-quit command against the session and return its output.
fn execute<R: Rng>(
    session: &mut Session<R>,
    command: Command,
    save_path: Option<&Path>,
) -> Result<String> {
    match command {
        Command::Go => round_text(session),
        Command::Stat => Ok(statistics_report(&session.statistics())),
        Command::Save => {
            let path = save_path.map_or_else(default_history_path, Path::to_path_buf);
            save_history(&session.export(), &path)?;
            info!(path = %path.display(), rounds = session.history().len(), "History saved");
            Ok(format!("History saved to {}\n", path.display()))
        }
        Command::Quit => Ok(String::new()),
        Command::Unknown(other) => Ok(format!(
            "Unknown command '{}'. Use go, stat, save or quit.\n",
            other
        )),
    }
}

/// Interactive loop. Returns when `quit` is read or input ends.
///
/// A failing command is reported and the loop keeps going; only read and
/// write errors on `input`/`out` end it early. `save_path` overrides the
/// timestamped default file name.
pub fn run_interactive<R: Rng>(
    session: &mut Session<R>,
    input: impl BufRead,
    out: &mut impl Write,
    save_path: Option<PathBuf>,
) -> Result<()> {
    writeln!(out, "{}", HELP)?;
    write!(out, "> ")?;
    out.flush()?;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            write!(out, "> ")?;
            out.flush()?;
            continue;
        }

        let command = Command::parse(&line);
        if command == Command::Quit {
            writeln!(out, "Bye.")?;
            return Ok(());
        }

        match execute(session, command, save_path.as_deref()) {
            Ok(text) => write!(out, "{}", text)?,
            Err(e) => {
                warn!(command = %line.trim(), error = %format!("{e:#}"), "Command failed");
                writeln!(out, "Error: {:#}", e)?;
            }
        }

        write!(out, "> ")?;
        out.flush()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("go"), Command::Go);
        assert_eq!(Command::parse(" G "), Command::Go);
        assert_eq!(Command::parse("STAT"), Command::Stat);
        assert_eq!(Command::parse("s"), Command::Stat);
        assert_eq!(Command::parse("save"), Command::Save);
        assert_eq!(Command::parse("q"), Command::Quit);
        assert_eq!(
            Command::parse("dance"),
            Command::Unknown("dance".to_string())
        );
    }
}
