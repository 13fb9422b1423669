//! # CLI Behavior
//!
//! This is **one possible UI client** for retsmeta. It is the only place that
//! knows about terminal I/O, exit codes and log output.
//!
//! ## Commands
//!
//! - `retsmeta format <document.json>`: Load a JSON metadata document as a
//!   lazily fetched tree, materialize it and print its sections.
//! - `retsmeta columns <kind>`: Show the declared attributes of a kind.
//! - `retsmeta sql <clause.json>`: Compile a clause tree to SQL.
//! - `retsmeta watch <file>`: Print a line whenever the file changes.
//!
//! Settings come from `retsmeta.toml` and `RETSMETA_*` variables (see
//! `retsmeta::config`); flags override them per invocation.
//!
//! ## Module Structure
//!
//! - `commands`: Handlers, config loading and logging setup
//! - `setup`: Argument parsing via clap

mod commands;
pub mod setup;

pub use commands::run;
