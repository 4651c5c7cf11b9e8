//! `family-forest`: run a family command file.
//!
//! Usage:
//!   family-forest [INPUT OUTPUT]
//!
//! Without arguments, reads `input.txt` and writes `output.txt`.
//! Set `RUST_LOG` to change diagnostic verbosity (default `warn`).

use family_forest::cli::{init_logging, run, Config};

fn main() {
    init_logging();

    let config = Config::from_args(std::env::args().skip(1));
    if let Err(e) = run(&config) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
