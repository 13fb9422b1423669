//! # Metadata Tree
//!
//! RETS metadata is a tree rooted at the `System` entity:
//!
//! ```text
//! System
//! ├── Resource
//! │   ├── Class
//! │   │   ├── Table
//! │   │   └── Update ── UpdateType
//! │   ├── Object, SearchHelp, EditMask, ValidationExpression
//! │   ├── Lookup ── LookupType
//! │   ├── ValidationLookup ── ValidationLookupType
//! │   └── ValidationExternal ── ValidationExternalType
//! └── ForeignKey
//! ```
//!
//! - [`MetadataKind`]: the fixed shape of each kind
//! - [`MetaObject`]: one entity, with lazily fetched children
//! - [`AttributeRegistry`]: shared, cached attribute maps per kind
//! - [`MetaCollector`]: where children come from
//! - [`MetadataDocument`]: JSON form of a subtree

mod collector;
pub mod declarations;
mod document;
mod kind;
mod object;
mod registry;

pub use collector::{InMemoryCollector, MetaCollector};
pub use declarations::builtin_declarations;
pub use document::{DocumentCollector, MetadataDocument};
pub use kind::MetadataKind;
pub use object::{ChildState, MetaObject, EXTENSION_PREFIX, LOOSE_PARSING, STRICT_PARSING};
pub use registry::{AttributeMap, AttributeRegistry};
