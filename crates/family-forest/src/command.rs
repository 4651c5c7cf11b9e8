//! Typed commands and the line parser.
//!
//! Lines are whitespace-separated tokens. The first non-blank line of a
//! script names the root member; every later line starts with a command word.

use crate::error::FamilyError;

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// First line of a script: `<name> <key>`.
    Root { name: String, key: f64 },
    MemberIn { name: String, key: f64 },
    MemberOut { name: String, key: f64 },
    Target { first: String, second: String },
    Divide,
    Rank { name: String },
    Unknown(String),
}

impl Command {
    /// Parses the root line, `<name> <key>`.
    pub fn parse_root(line: usize, text: &str) -> Result<Self, FamilyError> {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        expect_arity(line, &tokens, 2, 2)?;
        Ok(Command::Root {
            name: tokens[0].to_string(),
            key: parse_key(line, tokens[1])?,
        })
    }

    /// Parses a command line. Unknown command words are not an error.
    ///
    /// `INTEL_TARGET` and `INTEL_RANK` accept the trailing key tokens the
    /// input format carries after each name; those tokens are not read.
    pub fn parse(line: usize, text: &str) -> Result<Self, FamilyError> {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        let Some(&word) = tokens.first() else {
            return Err(malformed(line, "empty command"));
        };

        match word {
            "MEMBER_IN" => {
                expect_arity(line, &tokens, 3, 3)?;
                Ok(Command::MemberIn {
                    name: tokens[1].to_string(),
                    key: parse_key(line, tokens[2])?,
                })
            }
            "MEMBER_OUT" => {
                expect_arity(line, &tokens, 3, 3)?;
                Ok(Command::MemberOut {
                    name: tokens[1].to_string(),
                    key: parse_key(line, tokens[2])?,
                })
            }
            "INTEL_TARGET" => {
                expect_arity(line, &tokens, 4, 5)?;
                Ok(Command::Target {
                    first: tokens[1].to_string(),
                    second: tokens[3].to_string(),
                })
            }
            "INTEL_DIVIDE" => {
                expect_arity(line, &tokens, 1, 1)?;
                Ok(Command::Divide)
            }
            "INTEL_RANK" => {
                expect_arity(line, &tokens, 2, 3)?;
                Ok(Command::Rank {
                    name: tokens[1].to_string(),
                })
            }
            other => Ok(Command::Unknown(other.to_string())),
        }
    }
}

fn malformed(line: usize, reason: impl Into<String>) -> FamilyError {
    FamilyError::Malformed {
        line,
        reason: reason.into(),
    }
}

fn expect_arity(line: usize, tokens: &[&str], min: usize, max: usize) -> Result<(), FamilyError> {
    let n = tokens.len();
    if (min..=max).contains(&n) {
        return Ok(());
    }
    let expected = if min == max {
        min.to_string()
    } else {
        format!("{min} to {max}")
    };
    Err(malformed(line, format!("expected {expected} tokens, found {n}")))
}

fn parse_key(line: usize, token: &str) -> Result<f64, FamilyError> {
    match token.parse::<f64>() {
        Ok(key) if key.is_finite() => Ok(key),
        Ok(_) => Err(malformed(line, format!("key must be finite: {token}"))),
        Err(e) => Err(malformed(line, format!("invalid key {token:?}: {e}"))),
    }
}
