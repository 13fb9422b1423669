//! Built-in attribute declarations per metadata kind.
//!
//! Column order here is the COMPACT wire order.

use super::kind::MetadataKind;
use crate::attributes::types::*;
use crate::attributes::AttrSpec;

const SYSTEM: &[AttrSpec] = &[
    AttrSpec::new("SystemID", ALPHANUM_10).required(),
    AttrSpec::new("SystemDescription", PLAINTEXT_64),
    AttrSpec::new("TimeZoneOffset", TIMEZONE_OFFSET),
    AttrSpec::new("Comments", TEXT),
];

const RESOURCE: &[AttrSpec] = &[
    AttrSpec::new("ResourceID", RETS_NAME).required(),
    AttrSpec::new("StandardName", ALPHANUM_64),
    AttrSpec::new("VisibleName", PLAINTEXT_32).required(),
    AttrSpec::new("Description", PLAINTEXT_64).required(),
    AttrSpec::new("KeyField", RETS_NAME).required(),
    AttrSpec::new("ClassCount", NUMERIC).required(),
    AttrSpec::new("ClassVersion", VERSION).version_stamp(),
    AttrSpec::new("ClassDate", DATE).date_stamp(),
    AttrSpec::new("ObjectVersion", VERSION).version_stamp(),
    AttrSpec::new("ObjectDate", DATE).date_stamp(),
    AttrSpec::new("SearchHelpVersion", VERSION).version_stamp(),
    AttrSpec::new("SearchHelpDate", DATE).date_stamp(),
    AttrSpec::new("EditMaskVersion", VERSION).version_stamp(),
    AttrSpec::new("EditMaskDate", DATE).date_stamp(),
    AttrSpec::new("LookupVersion", VERSION).version_stamp(),
    AttrSpec::new("LookupDate", DATE).date_stamp(),
    AttrSpec::new("ValidationExpressionVersion", VERSION).version_stamp(),
    AttrSpec::new("ValidationExpressionDate", DATE).date_stamp(),
    AttrSpec::new("ValidationLookupVersion", VERSION).version_stamp(),
    AttrSpec::new("ValidationLookupDate", DATE).date_stamp(),
    AttrSpec::new("ValidationExternalVersion", VERSION).version_stamp(),
    AttrSpec::new("ValidationExternalDate", DATE).date_stamp(),
];

const CLASS: &[AttrSpec] = &[
    AttrSpec::new("ClassName", ALPHANUM_32).required(),
    AttrSpec::new("StandardName", ALPHANUM_64),
    AttrSpec::new("VisibleName", PLAINTEXT_32).required(),
    AttrSpec::new("DBName", ALPHANUM_10),
    AttrSpec::new("Description", PLAINTEXT_128),
    AttrSpec::new("TableVersion", VERSION).version_stamp(),
    AttrSpec::new("TableDate", DATE).date_stamp(),
    AttrSpec::new("UpdateVersion", VERSION).version_stamp(),
    AttrSpec::new("UpdateDate", DATE).date_stamp(),
];

const TABLE: &[AttrSpec] = &[
    AttrSpec::new("SystemName", RETS_NAME).required(),
    AttrSpec::new("StandardName", ALPHANUM_64),
    AttrSpec::new("LongName", PLAINTEXT_32).required(),
    AttrSpec::new("DBName", ALPHANUM_10).required(),
    AttrSpec::new("ShortName", PLAINTEXT_32),
    AttrSpec::new("MaximumLength", POSITIVE_NUMERIC).required(),
    AttrSpec::new("DataType", ALPHANUM_10).required(),
    AttrSpec::new("Precision", NUMERIC),
    AttrSpec::new("Searchable", BOOLEAN).required(),
    AttrSpec::new("Interpretation", ALPHANUM_24),
    AttrSpec::new("Alignment", ALPHANUM_10),
    AttrSpec::new("UseSeparator", BOOLEAN),
    AttrSpec::new("EditMaskID", RETS_NAME),
    AttrSpec::new("LookupName", RETS_NAME),
    AttrSpec::new("MaxSelect", NUMERIC),
    AttrSpec::new("Units", ALPHANUM_32),
    AttrSpec::new("Index", BOOLEAN),
    AttrSpec::new("Minimum", NUMERIC),
    AttrSpec::new("Maximum", NUMERIC),
    AttrSpec::new("Default", NUMERIC),
    AttrSpec::new("Required", NUMERIC),
    AttrSpec::new("SearchHelpID", RETS_NAME),
    AttrSpec::new("Unique", BOOLEAN),
];

const UPDATE: &[AttrSpec] = &[
    AttrSpec::new("UpdateName", ALPHANUM_24).required(),
    AttrSpec::new("Description", PLAINTEXT_64).required(),
    AttrSpec::new("KeyField", RETS_NAME).required(),
    AttrSpec::new("UpdateTypeVersion", VERSION).version_stamp(),
    AttrSpec::new("UpdateTypeDate", DATE).date_stamp(),
];

const UPDATE_TYPE: &[AttrSpec] = &[
    AttrSpec::new("SystemName", RETS_NAME).required(),
    AttrSpec::new("Sequence", NUMERIC).required(),
    AttrSpec::new("Attributes", ATTRIBUTES_1_TO_5).required(),
    AttrSpec::new("Default", PLAINTEXT),
    AttrSpec::new("ValidationExpressionID", TEXT),
    AttrSpec::new("UpdateHelpID", RETS_NAME),
    AttrSpec::new("ValidationLookupName", RETS_NAME),
    AttrSpec::new("ValidationExternalName", RETS_NAME),
];

const OBJECT: &[AttrSpec] = &[
    AttrSpec::new("ObjectType", ALPHANUM_24).required(),
    AttrSpec::new("StandardName", ALPHANUM_24).required(),
    AttrSpec::new("MimeType", PLAINTEXT_64).required(),
    AttrSpec::new("Description", PLAINTEXT_64),
];

const SEARCH_HELP: &[AttrSpec] = &[
    AttrSpec::new("SearchHelpID", RETS_NAME).required(),
    AttrSpec::new("Value", TEXT_256).required(),
];

const EDIT_MASK: &[AttrSpec] = &[
    AttrSpec::new("EditMaskID", RETS_NAME).required(),
    AttrSpec::new("Value", TEXT_256).required(),
];

const LOOKUP: &[AttrSpec] = &[
    AttrSpec::new("LookupName", RETS_NAME).required(),
    AttrSpec::new("VisibleName", PLAINTEXT_32).required(),
    AttrSpec::new("LookupTypeVersion", VERSION).version_stamp(),
    AttrSpec::new("LookupTypeDate", DATE).date_stamp(),
];

const LOOKUP_TYPE: &[AttrSpec] = &[
    AttrSpec::new("LongValue", PLAINTEXT_128).required(),
    AttrSpec::new("ShortValue", PLAINTEXT_32).required(),
    AttrSpec::new("Value", PLAINTEXT_128).required(),
];

const VALIDATION_LOOKUP: &[AttrSpec] = &[
    AttrSpec::new("ValidationLookupName", RETS_NAME).required(),
    AttrSpec::new("Parent1Field", RETS_NAME),
    AttrSpec::new("Parent2Field", RETS_NAME),
    AttrSpec::new("Version", VERSION).version_stamp(),
    AttrSpec::new("Date", DATE).date_stamp(),
];

const VALIDATION_LOOKUP_TYPE: &[AttrSpec] = &[
    AttrSpec::new("ValidText", PLAINTEXT_32).required(),
    AttrSpec::new("Parent1Value", PLAINTEXT_32),
    AttrSpec::new("Parent2Value", PLAINTEXT_32),
];

const VALIDATION_EXTERNAL: &[AttrSpec] = &[
    AttrSpec::new("ValidationExternalName", RETS_NAME).required(),
    AttrSpec::new("SearchResource", RETS_NAME).required(),
    AttrSpec::new("SearchClass", RETS_NAME).required(),
    AttrSpec::new("Version", VERSION).version_stamp(),
    AttrSpec::new("Date", DATE).date_stamp(),
];

const VALIDATION_EXTERNAL_TYPE: &[AttrSpec] = &[
    AttrSpec::new("SearchField", PLAINTEXT_512).required(),
    AttrSpec::new("DisplayField", PLAINTEXT_512).required(),
    AttrSpec::new("ResultFields", PLAINTEXT_1024).required(),
];

const VALIDATION_EXPRESSION: &[AttrSpec] = &[
    AttrSpec::new("ValidationExpressionID", RETS_NAME).required(),
    AttrSpec::new("ValidationExpressionType", EXPRESSION_TYPE).required(),
    AttrSpec::new("Value", TEXT_512).required(),
];

const FOREIGN_KEY: &[AttrSpec] = &[
    AttrSpec::new("ForeignKeyID", RETS_NAME).required(),
    AttrSpec::new("ParentResourceID", RETS_NAME).required(),
    AttrSpec::new("ParentClassID", RETS_NAME).required(),
    AttrSpec::new("ParentSystemName", RETS_NAME).required(),
    AttrSpec::new("ChildResourceID", RETS_NAME).required(),
    AttrSpec::new("ChildClassID", RETS_NAME).required(),
    AttrSpec::new("ChildSystemName", RETS_NAME).required(),
];

/// The built-in declaration list of a kind.
pub fn builtin_declarations(kind: MetadataKind) -> &'static [AttrSpec] {
    match kind {
        MetadataKind::System => SYSTEM,
        MetadataKind::Resource => RESOURCE,
        MetadataKind::Class => CLASS,
        MetadataKind::Table => TABLE,
        MetadataKind::Update => UPDATE,
        MetadataKind::UpdateType => UPDATE_TYPE,
        MetadataKind::Object => OBJECT,
        MetadataKind::SearchHelp => SEARCH_HELP,
        MetadataKind::EditMask => EDIT_MASK,
        MetadataKind::Lookup => LOOKUP,
        MetadataKind::LookupType => LOOKUP_TYPE,
        MetadataKind::ValidationLookup => VALIDATION_LOOKUP,
        MetadataKind::ValidationLookupType => VALIDATION_LOOKUP_TYPE,
        MetadataKind::ValidationExternal => VALIDATION_EXTERNAL,
        MetadataKind::ValidationExternalType => VALIDATION_EXTERNAL_TYPE,
        MetadataKind::ValidationExpression => VALIDATION_EXPRESSION,
        MetadataKind::ForeignKey => FOREIGN_KEY,
    }
}
