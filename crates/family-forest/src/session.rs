//! A tree plus its event log, driven one command at a time.

use log::{debug, warn};

use crate::command::Command;
use crate::error::FamilyError;
use crate::event::EventLog;
use crate::tree::FamilyTree;

#[derive(Clone, Debug, Default)]
pub struct Session {
    tree: FamilyTree,
    log: EventLog,
    rooted: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tree(&self) -> &FamilyTree {
        &self.tree
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    pub fn into_log(self) -> EventLog {
        self.log
    }

    /// Runs a whole script in order, stopping at the first fatal error.
    ///
    /// Blank lines are skipped. The first non-blank line is parsed as the
    /// root member, the rest as commands.
    pub fn run(&mut self, script: &str) -> Result<(), FamilyError> {
        for (idx, text) in script.lines().enumerate() {
            if text.trim().is_empty() {
                continue;
            }
            let line = idx + 1;
            let command = if self.rooted {
                Command::parse(line, text)?
            } else {
                Command::parse_root(line, text)?
            };
            debug!("line {line}: {command:?}");
            self.apply(command)?;
        }
        Ok(())
    }

    pub fn apply(&mut self, command: Command) -> Result<(), FamilyError> {
        match command {
            Command::Root { name, key } => {
                self.rooted = true;
                self.tree.insert(&name, key, &mut self.log);
            }
            Command::MemberIn { name, key } => {
                self.tree.insert(&name, key, &mut self.log);
            }
            Command::MemberOut { name, key } => {
                self.tree.remove(&name, key, &mut self.log)?;
            }
            Command::Target { first, second } => {
                self.tree.target(&first, &second, &mut self.log)?;
            }
            Command::Divide => {
                self.tree.divide(&mut self.log);
            }
            Command::Rank { name } => {
                self.tree.same_rank(&name, &mut self.log)?;
            }
            Command::Unknown(word) => warn!("Unknown command: {word}"),
        }
        Ok(())
    }
}
