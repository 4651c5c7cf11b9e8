//! Core logic behind the binary entry points:
//! - `family-forest`: run a command file and write the event log
//! - `family-diff`: compare two event logs line by line

use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::error::FamilyError;
use crate::event::EventLog;
use crate::session::Session;

pub const DEFAULT_INPUT: &str = "input.txt";
pub const DEFAULT_LOG_FILTER: &str = "warn";
pub const DEFAULT_OUTPUT: &str = "output.txt";

/// Installs the `env_logger` backend for both binaries.
///
/// `RUST_LOG` overrides [`DEFAULT_LOG_FILTER`]. A second call is a no-op.
pub fn init_logging() {
    let env = env_logger::Env::default().default_filter_or(DEFAULT_LOG_FILTER);
    let _ = env_logger::Builder::from_env(env).try_init();
}

// ── family-forest ─────────────────────────────────────────────────────────

/// Input and output paths for one run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub input: PathBuf,
    pub output: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

impl Config {
    /// Builds a config from positional arguments (program name excluded).
    ///
    /// Both paths fall back to the defaults unless both are given.
    pub fn from_args<I>(args: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        match (args.next(), args.next()) {
            (Some(input), Some(output)) => Self {
                input: input.into(),
                output: output.into(),
            },
            _ => Self::default(),
        }
    }
}

fn read(path: &Path) -> Result<String, FamilyError> {
    fs::read_to_string(path).map_err(|source| FamilyError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Runs a script held in memory and returns the rendered log.
pub fn run_script(script: &str) -> Result<String, FamilyError> {
    let mut session = Session::new();
    session.run(script)?;
    Ok(session.log().render())
}

/// Reads `config.input`, runs it, and writes the log to `config.output`.
pub fn run(config: &Config) -> Result<EventLog, FamilyError> {
    let script = read(&config.input)?;
    let mut session = Session::new();
    session.run(&script)?;
    let log = session.into_log();

    fs::write(&config.output, log.render()).map_err(|source| FamilyError::Io {
        path: config.output.clone(),
        source,
    })?;
    info!("wrote {} lines to {}", log.len(), config.output.display());
    Ok(log)
}

// ── family-diff ───────────────────────────────────────────────────────────

/// One differing line. `None` means the line is missing on that side.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineDifference {
    pub line: usize,
    pub left: Option<String>,
    pub right: Option<String>,
}

/// Compares two texts line by line, in order.
pub fn compare_lines(left: &str, right: &str) -> Vec<LineDifference> {
    let left: Vec<&str> = left.lines().collect();
    let right: Vec<&str> = right.lines().collect();
    let longest = left.len().max(right.len());

    (0..longest)
        .filter_map(|i| {
            let (l, r) = (left.get(i).copied(), right.get(i).copied());
            (l != r).then(|| LineDifference {
                line: i + 1,
                left: l.map(str::to_string),
                right: r.map(str::to_string),
            })
        })
        .collect()
}

pub fn compare_files(left: &Path, right: &Path) -> Result<Vec<LineDifference>, FamilyError> {
    Ok(compare_lines(&read(left)?, &read(right)?))
}

/// Human-readable report for `family-diff`.
pub fn describe(differences: &[LineDifference], left_name: &str, right_name: &str) -> String {
    if differences.is_empty() {
        return "The files are identical (including line order).\n".to_string();
    }

    let mut out = String::from("Differences found:\n");
    for d in differences {
        match (&d.left, &d.right) {
            (Some(l), Some(r)) => {
                out.push_str(&format!("Line {}:\n", d.line));
                out.push_str(&format!("{left_name}: {}\n", l.trim()));
                out.push_str(&format!("{right_name}: {}\n", r.trim()));
            }
            (Some(l), None) => {
                out.push_str(&format!(
                    "Line {} in {left_name} is not present in {right_name}:\n{}\n",
                    d.line,
                    l.trim()
                ));
            }
            (None, Some(r)) => {
                out.push_str(&format!(
                    "Line {} in {right_name} is not present in {left_name}:\n{}\n",
                    d.line,
                    r.trim()
                ));
            }
            (None, None) => {}
        }
    }
    out
}
