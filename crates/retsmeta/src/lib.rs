//! # retsmeta Architecture
//!
//! retsmeta is a **UI-agnostic RETS metadata library**: typed metadata
//! entities, their wire serialization, and DMQL-to-SQL compilation. The
//! `retsmeta` binary is one client of it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (retsmeta-cli)                                         │
//! │  - Parses arguments, loads config, installs logging         │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  format/  dmql/  config::monitor                            │
//! │  - Walk a materialized tree into COMPACT / STANDARD-XML     │
//! │  - Compile clause trees to parameterized SQL                │
//! │  - Watch a config source and notify listeners               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  metadata/                                                  │
//! │  - MetaObject tree with lazily fetched children             │
//! │  - MetaCollector trait (DocumentCollector, InMemoryCollector)│
//! │  - AttributeRegistry: cached attribute maps per kind        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  attributes/                                                │
//! │  - Value grammars with strict and loose parsing             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: Faults Stay Local
//!
//! Grammar violations surface as errors only when a caller asks for strict
//! parsing. Collector failures, unknown attributes and config check failures
//! are logged through `tracing` and absorbed, so a partially broken data
//! source still yields a usable tree.
//!
//! ## Module Overview
//!
//! - [`attributes`]: Attribute grammars, values and declarations
//! - [`metadata`]: Metadata kinds, entities, collectors and the declaration cache
//! - [`format`]: COMPACT and STANDARD-XML serialization
//! - [`dmql`]: Clause trees and SQL compilation
//! - [`config`]: Configuration and the config change monitor
//! - [`error`]: Error types

pub mod attributes;
pub mod config;
pub mod dmql;
pub mod error;
pub mod format;
pub mod metadata;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;

pub use error::{MetadataError, Result};
