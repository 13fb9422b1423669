//! # DMQL Query Compiler
//!
//! Compiles a parsed DMQL clause tree into a parameterized SQL predicate.
//! Parsing DMQL itself happens elsewhere; this module only renders trees
//! handed to it, either built in code or deserialized from JSON:
//!
//! ```json
//! { "type": "composite", "op": "AND", "elements": [
//!     { "type": "compare", "column": "r_price", "op": ">=", "value": 100000 },
//!     { "type": "in", "column": "r_area", "values": ["1", "2"] }
//! ] }
//! ```
//!
//! Composite clauses parenthesize every element, so `AND(AND(A, B), C)`
//! compiles to `((A) AND (B)) AND (C)` and precedence never depends on the
//! target database.

mod clause;
mod sql;

pub use clause::{BoolOp, CompareOp, CompositeClause, SqlClause};
pub use sql::{SqlStatement, SqlValue, SqlWriter, ToSql};
