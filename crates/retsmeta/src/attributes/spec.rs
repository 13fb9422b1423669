//! Attribute declarations.
//!
//! Every metadata kind declares an ordered list of [`AttrSpec`]s. The order is
//! the wire column order; `required` is only consulted by validation and export.

use super::types::AttrType;

/// Marks a column that carries the version or date of a dependent section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stamp {
    Version,
    Date,
}

/// Declaration of a single attribute of a metadata kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AttrSpec {
    /// Wire name (e.g. "ClassName", "StandardName")
    pub name: &'static str,

    /// Grammar used to parse and render the value
    pub attr_type: AttrType,

    /// Whether a complete entity must carry this attribute
    pub required: bool,

    /// Version/date stamp columns fall back to the formatting invocation's
    /// Version or Date when the entity has no value of its own
    pub stamp: Option<Stamp>,
}

impl AttrSpec {
    /// Create an optional attribute declaration.
    pub const fn new(name: &'static str, attr_type: AttrType) -> Self {
        Self {
            name,
            attr_type,
            required: false,
            stamp: None,
        }
    }

    /// Set the required flag.
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Mark as a version stamp column.
    pub const fn version_stamp(mut self) -> Self {
        self.stamp = Some(Stamp::Version);
        self
    }

    /// Mark as a date stamp column.
    pub const fn date_stamp(mut self) -> Self {
        self.stamp = Some(Stamp::Date);
        self
    }
}
