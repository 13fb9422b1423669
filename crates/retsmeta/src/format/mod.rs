//! # Serialization Engine
//!
//! Renders collections of metadata entities as RETS metadata sections.
//!
//! | Mode | Code | Shape |
//! |------|------|-------|
//! | [`FormatMode::Compact`] | `COMPACT` | tab-delimited `COLUMNS`/`DATA` lines |
//! | [`FormatMode::Standard`] | `STANDARD-XML` | one element per entity |
//!
//! A single generic renderer per mode covers every kind; the per-kind part is
//! data (header keys, declared columns, child kinds) taken from
//! [`MetadataKind`] and the entity's attribute map.
//!
//! Composite kinds embed the sections of their children before their own
//! closing tag. Embedded sections reuse the invocation's [`FormatContext`],
//! extended with the parent's id under the parent's context name, so Version
//! and Date are identical everywhere in one output.
//!
//! An empty collection renders to the empty string in every mode.

mod compact;
mod standard;

use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::attributes::types::DATE;
use crate::attributes::{AttrSpec, AttrValue, Stamp};
use crate::error::{MetadataError, Result};
use crate::metadata::{MetaObject, MetadataKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatMode {
    Compact,
    Standard,
}

impl FormatMode {
    pub fn code(&self) -> &'static str {
        match self {
            FormatMode::Compact => "COMPACT",
            FormatMode::Standard => "STANDARD-XML",
        }
    }
}

impl fmt::Display for FormatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for FormatMode {
    type Err = MetadataError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "COMPACT" => Ok(FormatMode::Compact),
            "STANDARD-XML" | "STANDARD" => Ok(FormatMode::Standard),
            _ => Err(MetadataError::UnknownFormat(s.to_string())),
        }
    }
}

/// Per-invocation values shared by every section of one output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatContext {
    version: String,
    date: DateTime<Utc>,
    /// Header attributes such as `Resource` and `Class`, in insertion order.
    values: Vec<(String, String)>,
}

impl FormatContext {
    pub fn new(version: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self {
            version: version.into(),
            date,
            values: Vec::new(),
        }
    }

    /// Set a header attribute, replacing an existing value.
    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn with_resource(self, resource: impl Into<String>) -> Self {
        self.with("Resource", resource)
    }

    pub fn with_class(self, class: impl Into<String>) -> Self {
        self.with("Class", class)
    }

    pub fn with_lookup(self, lookup: impl Into<String>) -> Self {
        self.with("Lookup", lookup)
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.values.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value,
            None => self.values.push((key.to_string(), value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    /// Date as it appears in headers and date stamp columns.
    pub fn date_text(&self) -> String {
        DATE.render(&AttrValue::Date(self.date))
    }

    /// Header attributes of a `kind` section, in the kind's order. Keys the
    /// context doesn't know render empty.
    fn header(&self, kind: MetadataKind) -> Vec<(&'static str, &str)> {
        kind.header_keys()
            .iter()
            .map(|k| (*k, self.get(k).unwrap_or("")))
            .collect()
    }

    /// Context for the sections embedded under `parent`.
    fn nested(&self, parent: &MetaObject) -> FormatContext {
        match parent.kind().context_name() {
            Some(key) => self.clone().with(key, parent.id()),
            None => self.clone(),
        }
    }

    /// Rendered value of one declared column, falling back to the
    /// invocation's Version or Date for stamp columns.
    fn cell(&self, object: &MetaObject, spec: &AttrSpec) -> String {
        match (object.attr_string(spec.name), spec.stamp) {
            (Some(value), _) => value,
            (None, Some(Stamp::Version)) => self.version.clone(),
            (None, Some(Stamp::Date)) => self.date_text(),
            (None, None) => String::new(),
        }
    }
}

/// Formatter for one `(kind, mode)` pair.
///
/// Every kind renders in both modes, so the only lookup that can fail is by
/// an unknown mode code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Formatter {
    kind: MetadataKind,
    mode: FormatMode,
}

impl Formatter {
    pub const fn new(kind: MetadataKind, mode: FormatMode) -> Self {
        Self { kind, mode }
    }

    /// Lookup by mode code (`COMPACT`, `STANDARD-XML`). An unknown code fails
    /// here, before anything is rendered.
    pub fn lookup_code(kind: MetadataKind, code: &str) -> Result<Self> {
        Ok(Self::new(kind, code.parse()?))
    }

    pub fn kind(&self) -> MetadataKind {
        self.kind
    }

    pub fn mode(&self) -> FormatMode {
        self.mode
    }

    /// Render `objects` and their resolved descendants.
    ///
    /// Objects of another kind than the formatter's are skipped.
    pub fn format(&self, ctx: &FormatContext, objects: &[MetaObject]) -> String {
        let objects: Vec<&MetaObject> = objects.iter().filter(|o| o.kind() == self.kind).collect();
        let mut out = String::new();
        if objects.is_empty() {
            return out;
        }
        debug!(kind = %self.kind, mode = %self.mode, count = objects.len(), "formatting section");
        match self.mode {
            FormatMode::Compact => compact::write_section(&mut out, ctx, self.kind, &objects),
            FormatMode::Standard => standard::write_section(&mut out, ctx, self.kind, &objects),
        }
        out
    }
}

/// Non-empty resolved child collections of `parent`, in declared kind order,
/// each with the context they are embedded under.
fn embedded<'a>(
    ctx: &FormatContext,
    parent: &'a MetaObject,
) -> impl Iterator<Item = (MetadataKind, FormatContext, Vec<&'a MetaObject>)> + 'a {
    let nested = ctx.nested(parent);
    parent.kind().child_kinds().iter().filter_map(move |kind| {
        let children: Vec<&MetaObject> = parent.resolved_children(*kind).iter().collect();
        if children.is_empty() {
            None
        } else {
            Some((*kind, nested.clone(), children))
        }
    })
}
