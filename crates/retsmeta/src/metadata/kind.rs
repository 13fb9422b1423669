//! Metadata kinds and their fixed shape.
//!
//! The shape of a kind (id attribute, permitted children, wire names) never
//! varies per instance.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::MetadataError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MetadataKind {
    System,
    Resource,
    Class,
    Table,
    Update,
    UpdateType,
    Object,
    SearchHelp,
    EditMask,
    Lookup,
    LookupType,
    ValidationLookup,
    ValidationLookupType,
    ValidationExternal,
    ValidationExternalType,
    ValidationExpression,
    ForeignKey,
}

use MetadataKind::*;

impl MetadataKind {
    pub const ALL: &'static [MetadataKind] = &[
        System,
        Resource,
        Class,
        Table,
        Update,
        UpdateType,
        Object,
        SearchHelp,
        EditMask,
        Lookup,
        LookupType,
        ValidationLookup,
        ValidationLookupType,
        ValidationExternal,
        ValidationExternalType,
        ValidationExpression,
        ForeignKey,
    ];

    /// Constant type name, also the id of entities whose kind has no id attribute.
    pub fn type_name(&self) -> &'static str {
        match self {
            System => "System",
            Resource => "Resource",
            Class => "Class",
            Table => "Table",
            Update => "Update",
            UpdateType => "UpdateType",
            Object => "Object",
            SearchHelp => "SearchHelp",
            EditMask => "EditMask",
            Lookup => "Lookup",
            LookupType => "LookupType",
            ValidationLookup => "ValidationLookup",
            ValidationLookupType => "ValidationLookupType",
            ValidationExternal => "ValidationExternal",
            ValidationExternalType => "ValidationExternalType",
            ValidationExpression => "ValidationExpression",
            ForeignKey => "ForeignKey",
        }
    }

    /// Suffix of the `METADATA-*` section tag.
    pub fn wire_name(&self) -> &'static str {
        match self {
            System => "SYSTEM",
            Resource => "RESOURCE",
            Class => "CLASS",
            Table => "TABLE",
            Update => "UPDATE",
            UpdateType => "UPDATE_TYPE",
            Object => "OBJECT",
            SearchHelp => "SEARCH_HELP",
            EditMask => "EDITMASK",
            Lookup => "LOOKUP",
            LookupType => "LOOKUP_TYPE",
            ValidationLookup => "VALIDATION_LOOKUP",
            ValidationLookupType => "VALIDATION_LOOKUP_TYPE",
            ValidationExternal => "VALIDATION_EXTERNAL",
            ValidationExternalType => "VALIDATION_EXTERNAL_TYPE",
            ValidationExpression => "VALIDATION_EXPRESSION",
            ForeignKey => "FOREIGNKEYS",
        }
    }

    /// Element name of one entity in the STANDARD-XML encoding.
    pub fn element_name(&self) -> &'static str {
        match self {
            Table => "Field",
            other => other.type_name(),
        }
    }

    /// Attribute whose value identifies an entity among its siblings.
    pub fn id_attr(&self) -> Option<&'static str> {
        match self {
            System => None,
            Resource => Some("ResourceID"),
            Class => Some("ClassName"),
            Table => Some("SystemName"),
            Update => Some("UpdateName"),
            UpdateType => Some("SystemName"),
            Object => Some("ObjectType"),
            SearchHelp => Some("SearchHelpID"),
            EditMask => Some("EditMaskID"),
            Lookup => Some("LookupName"),
            LookupType => Some("Value"),
            ValidationLookup => Some("ValidationLookupName"),
            ValidationLookupType => Some("ValidText"),
            ValidationExternal => Some("ValidationExternalName"),
            ValidationExternalType => Some("SearchField"),
            ValidationExpression => Some("ValidationExpressionID"),
            ForeignKey => Some("ForeignKeyID"),
        }
    }

    /// Permitted child kinds, in embedding order.
    pub fn child_kinds(&self) -> &'static [MetadataKind] {
        match self {
            System => &[Resource, ForeignKey],
            Resource => &[
                Class,
                Object,
                SearchHelp,
                EditMask,
                Lookup,
                ValidationLookup,
                ValidationExternal,
                ValidationExpression,
            ],
            Class => &[Table, Update],
            Update => &[UpdateType],
            Lookup => &[LookupType],
            ValidationLookup => &[ValidationLookupType],
            ValidationExternal => &[ValidationExternalType],
            _ => &[],
        }
    }

    pub fn permits_child(&self, child: MetadataKind) -> bool {
        self.child_kinds().contains(&child)
    }

    /// Header attribute this kind's id contributes to its descendants' sections.
    pub fn context_name(&self) -> Option<&'static str> {
        match self {
            Resource => Some("Resource"),
            Class => Some("Class"),
            Update => Some("Update"),
            Lookup => Some("Lookup"),
            ValidationLookup => Some("ValidationLookup"),
            ValidationExternal => Some("ValidationExternal"),
            _ => None,
        }
    }

    /// Context attributes shown in this kind's section header, before Version/Date.
    pub fn header_keys(&self) -> &'static [&'static str] {
        match self {
            System | Resource | ForeignKey => &[],
            Class | Object | SearchHelp | EditMask | Lookup | ValidationLookup
            | ValidationExternal | ValidationExpression => &["Resource"],
            Table | Update => &["Resource", "Class"],
            UpdateType => &["Resource", "Class", "Update"],
            LookupType => &["Resource", "Lookup"],
            ValidationLookupType => &["Resource", "ValidationLookup"],
            ValidationExternalType => &["Resource", "ValidationExternal"],
        }
    }
}

impl fmt::Display for MetadataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

impl FromStr for MetadataKind {
    type Err = MetadataError;

    /// Accepts the type name (`LookupType`) or the wire name (`LOOKUP_TYPE`),
    /// case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MetadataKind::ALL
            .iter()
            .find(|k| k.type_name().eq_ignore_ascii_case(s) || k.wire_name().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| MetadataError::UnknownKind(s.to_string()))
    }
}
