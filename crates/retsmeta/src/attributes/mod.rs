//! # Attribute Type System
//!
//! RETS metadata is a set of tables whose cells are typed by small value
//! grammars. This module provides:
//!
//! - **Grammars** ([`AttrType`]): parse/render pairs with strict and loose modes
//! - **Values** ([`AttrValue`]): the parsed representation, in four families
//! - **Declarations** ([`AttrSpec`]): name, grammar and flags of one column
//!
//! ## Grammar Families
//!
//! | Family | Catalog examples | Value |
//! |--------|------------------|-------|
//! | Alphanumeric | `Alphanum32`, `RetsId` | text |
//! | Identifier | `RetsName` | text |
//! | Plaintext | `Plaintext64` | text |
//! | Text | `Text256` | text (CR, LF, HT allowed) |
//! | Restricted text | `Attributes1to5` | text |
//! | Boolean | `Boolean` | bool |
//! | Timestamp | `Date` | UTC date-time |
//! | Numeric | `Numeric`, `PositiveNumeric` | integer |
//! | Enumeration | `ExpressionType` | text |
//! | Version | `Version` | integer (`MM.mm.rrrrr`) |
//! | Timezone | `TimeZoneOffset` | text |
//!
//! ## Strict vs Loose
//!
//! Strict parsing fails on any grammar violation. Loose parsing coerces what it
//! can (`"TRUE"` → `true`, `" 12 "` → `12`) and keeps anything else as raw
//! text, so data from servers with slightly different metadata still loads.

mod spec;
pub mod types;
mod value;

pub use spec::{AttrSpec, Stamp};
pub use types::{attr_type_by_name, name_of, AttrType, Grammar};
pub use value::{AttrValue, ValueKind};
