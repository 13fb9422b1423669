//! # retsmeta CLI
//!
//! The binary is intentionally thin: the CLI lives in `src/cli/`, while this
//! file only invokes `cli::run()` and handles process termination.
//!
//! ## Workspace Structure
//!
//! - `crates/retsmeta/`: Core library, UI agnostic
//! - `crates/retsmeta-cli/`: This CLI tool, depends on the `retsmeta` library
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/retsmeta-cli/src/cli/)                   │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - Config, logging and dispatch (commands.rs)               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  retsmeta library                                           │
//! │  - metadata tree, formatters, DMQL compiler, monitor        │
//! │  - No knowledge of stdout/stderr or process exits           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Command handlers return the text to print, so they are tested without a
//! terminal; `tests/cli.rs` runs the binary end to end.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
