//! `family-diff`: compare two event logs line by line.
//!
//! Usage:
//!   family-diff <LEFT> <RIGHT>
//!
//! Exits with status 1 when the files differ.
//! Set `RUST_LOG` to change diagnostic verbosity (default `warn`).

use std::path::Path;

use family_forest::cli::{compare_files, describe, init_logging};

fn main() {
    init_logging();

    let args: Vec<String> = std::env::args().collect();
    let (Some(left), Some(right)) = (args.get(1), args.get(2)) else {
        eprintln!("Usage: family-diff <LEFT> <RIGHT>");
        std::process::exit(1);
    };

    match compare_files(Path::new(left), Path::new(right)) {
        Ok(differences) => {
            print!("{}", describe(&differences, left, right));
            if !differences.is_empty() {
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
