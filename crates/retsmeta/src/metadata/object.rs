//! Metadata entities.
//!
//! A [`MetaObject`] is one node of the metadata tree: typed attributes parsed
//! through its kind's shared [`AttributeMap`], plus one lazily resolved child
//! collection per permitted child kind.
//!
//! ## Child Resolution
//!
//! Each `(entity, child kind)` slot is in one of three states:
//!
//! | State | Meaning | `get_children` |
//! |-------|---------|----------------|
//! | `Unfetched` | never asked for | fetch from the collector |
//! | `Fetched(items)` | fetched, or built by hand | return items |
//! | `FetchFailed` | the collector failed | return empty, never refetch |
//!
//! A slot leaves `Unfetched` exactly once. An unbound entity (no collector, or
//! a collector that has been dropped) resolves to `Fetched` with no items.
//!
//! ## Paths
//!
//! The path of an entity is its parent's path, a colon, and its own id; a
//! parentless entity's path is its id. Adding a child re-parents it: its path
//! and those of its resolved descendants are recomputed and the parent's
//! collector is handed down the same way.

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Weak};
use tracing::{error, warn};

use super::collector::MetaCollector;
use super::kind::MetadataKind;
use super::registry::{AttributeMap, AttributeRegistry};
use crate::attributes::{AttrType, AttrValue, ValueKind};
use crate::error::{MetadataError, Result};

/// Attribute names with this prefix are site extensions and never reported as
/// unrecognized.
pub const EXTENSION_PREFIX: &str = "X-";

/// Strict parsing signals grammar violations; loose parsing tolerates them.
pub const STRICT_PARSING: bool = true;
pub const LOOSE_PARSING: bool = false;

#[derive(Debug, Clone)]
enum ChildSlot {
    Unfetched,
    Fetched(Vec<MetaObject>),
    FetchFailed,
}

/// Observable resolution state of one child kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildState {
    Unfetched,
    Fetched(usize),
    FetchFailed,
}

#[derive(Debug, Clone)]
pub struct MetaObject {
    kind: MetadataKind,
    strict: bool,
    parent_path: Option<String>,
    attr_types: Arc<AttributeMap>,
    values: BTreeMap<String, AttrValue>,
    children: BTreeMap<MetadataKind, ChildSlot>,
    collector: Option<Weak<dyn MetaCollector>>,
}

impl MetaObject {
    /// An unbound, loosely parsed entity using the global registry.
    pub fn new(kind: MetadataKind) -> Self {
        Self::with_parsing(kind, LOOSE_PARSING)
    }

    pub fn with_parsing(kind: MetadataKind, strict: bool) -> Self {
        Self::with_registry(kind, strict, AttributeRegistry::global())
    }

    pub fn with_registry(kind: MetadataKind, strict: bool, registry: &AttributeRegistry) -> Self {
        let children = kind
            .child_kinds()
            .iter()
            .map(|k| (*k, ChildSlot::Unfetched))
            .collect();
        Self {
            kind,
            strict,
            parent_path: None,
            attr_types: registry.attribute_map(kind, strict),
            values: BTreeMap::new(),
            children,
            collector: None,
        }
    }

    /// A root entity of a live tree whose children come from `collector`.
    pub fn bound(kind: MetadataKind, strict: bool, collector: &Arc<dyn MetaCollector>) -> Self {
        let mut object = Self::with_parsing(kind, strict);
        object.set_collector(Some(collector));
        object
    }

    /// Builder form of [`set_attribute`](Self::set_attribute).
    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn kind(&self) -> MetadataKind {
        self.kind
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    pub fn attribute_map(&self) -> &Arc<AttributeMap> {
        &self.attr_types
    }

    // --- Identity ---

    /// Rendered id attribute, the kind's type name when the kind has none, or
    /// an empty string when the id attribute is unset.
    pub fn id(&self) -> String {
        match self.kind.id_attr() {
            Some(attr) => self.attr_string(attr).unwrap_or_default(),
            None => self.kind.type_name().to_string(),
        }
    }

    pub fn path(&self) -> String {
        match &self.parent_path {
            Some(parent) if !parent.is_empty() => format!("{}:{}", parent, self.id()),
            _ => self.id(),
        }
    }

    // --- Attributes ---

    pub fn known_attributes(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.attr_types.names()
    }

    /// Undeclared attributes (site extensions and unrecognized names) with
    /// their verbatim text.
    pub fn extra_attributes(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.values.iter().filter_map(|(name, value)| match value {
            AttrValue::Text(text) if !self.attr_types.contains(name) => {
                Some((name.as_str(), text.as_str()))
            }
            _ => None,
        })
    }

    pub fn attribute_type(&self, name: &str) -> Option<AttrType> {
        self.attr_types.get(name).map(|s| s.attr_type)
    }

    /// Raw parsed value. Declared names resolve through the attribute map, so
    /// loose entities accept any casing.
    pub fn attr(&self, name: &str) -> Option<&AttrValue> {
        match self.attr_types.get(name) {
            Some(spec) => self.values.get(spec.name),
            None => self.values.get(name),
        }
    }

    /// Value rendered through its declared grammar; undeclared values verbatim.
    pub fn attr_string(&self, name: &str) -> Option<String> {
        match self.attr_types.get(name) {
            Some(spec) => self
                .values
                .get(spec.name)
                .map(|v| spec.attr_type.render(v)),
            None => self.values.get(name).map(|v| match v {
                AttrValue::Text(s) => s.clone(),
                other => format!("{:?}", other),
            }),
        }
    }

    fn typed(&self, name: &str, expected: ValueKind) -> Option<&AttrValue> {
        let spec = self.attr_types.get(name)?;
        let declared = spec.attr_type.kind();
        if declared != expected {
            warn!(
                kind = %self.kind,
                attribute = name,
                "type mismatch, expected {} but got {}",
                expected,
                declared
            );
            return None;
        }
        self.values.get(spec.name)
    }

    pub fn string_attr(&self, name: &str) -> Option<&str> {
        self.typed(name, ValueKind::Text)?.as_text()
    }

    /// Integer attribute, `0` when absent or not an integer attribute.
    pub fn int_attr(&self, name: &str) -> i64 {
        self.typed(name, ValueKind::Int)
            .and_then(AttrValue::as_int)
            .unwrap_or(0)
    }

    /// Boolean attribute, `false` when absent or not a boolean attribute.
    pub fn bool_attr(&self, name: &str) -> bool {
        self.typed(name, ValueKind::Bool)
            .and_then(AttrValue::as_bool)
            .unwrap_or(false)
    }

    pub fn date_attr(&self, name: &str) -> Option<DateTime<Utc>> {
        self.typed(name, ValueKind::Date)?.as_date()
    }

    /// Parse and store an attribute using this entity's parsing mode.
    ///
    /// Grammar violations are logged and the value is dropped (strict) or kept
    /// best-effort (loose). Undeclared names are stored verbatim.
    pub fn set_attribute(&mut self, name: &str, text: &str) {
        if let Err(e) = self.store(name, text, self.strict) {
            warn!(entity = %self, attribute = name, value = text, "couldn't parse attribute: {}", e);
        }
    }

    /// Parse and store an attribute with an explicit parsing mode.
    ///
    /// With `strict` set, a grammar violation is returned to the caller.
    pub fn set_attribute_with(&mut self, name: &str, text: &str, strict: bool) -> Result<()> {
        self.store(name, text, strict).inspect_err(|e| {
            warn!(entity = %self, attribute = name, value = text, "couldn't parse attribute: {}", e);
        })
    }

    fn store(&mut self, name: &str, text: &str, strict: bool) -> Result<()> {
        match self.attr_types.get(name).copied() {
            Some(spec) => {
                let value = spec
                    .attr_type
                    .parse(text, strict)
                    .map_err(|e| e.for_attribute(spec.name))?;
                self.values.insert(spec.name.to_string(), value);
            }
            None => {
                if !name.starts_with(EXTENSION_PREFIX) {
                    warn!(kind = %self.kind, attribute = name, "unknown attribute");
                }
                self.values
                    .insert(name.to_string(), AttrValue::Text(text.to_string()));
            }
        }
        Ok(())
    }

    pub fn remove_attribute(&mut self, name: &str) -> Option<AttrValue> {
        let key = self
            .attr_types
            .get(name)
            .map(|s| s.name.to_string())
            .unwrap_or_else(|| name.to_string());
        self.values.remove(&key)
    }

    /// Swap the grammar of one attribute for this entity only.
    ///
    /// The shared map is copied on first write; the registry is not touched.
    pub fn replace_attribute_type(&mut self, name: &'static str, attr_type: AttrType) -> Option<AttrType> {
        Arc::make_mut(&mut self.attr_types).replace_type(name, attr_type)
    }

    pub fn is_attribute_required(&self, name: &str) -> bool {
        self.attr_types.get(name).is_some_and(|s| s.required)
    }

    /// Required attributes without a value, in declared order.
    pub fn missing_required(&self) -> Vec<&'static str> {
        self.attr_types
            .specs()
            .iter()
            .filter(|s| s.required && !self.values.contains_key(s.name))
            .map(|s| s.name)
            .collect()
    }

    // --- Children ---

    /// Bind this entity and its resolved subtree to a collector.
    pub fn set_collector(&mut self, collector: Option<&Arc<dyn MetaCollector>>) {
        let weak = collector.map(Arc::downgrade);
        self.propagate(None, weak);
    }

    fn propagate(&mut self, parent_path: Option<&str>, collector: Option<Weak<dyn MetaCollector>>) {
        if let Some(parent) = parent_path {
            self.parent_path = Some(parent.to_string());
        }
        self.collector = collector.clone();
        let path = self.path();
        for slot in self.children.values_mut() {
            if let ChildSlot::Fetched(items) = slot {
                for child in items {
                    child.propagate(Some(&path), collector.clone());
                }
            }
        }
    }

    pub fn child_state(&self, kind: MetadataKind) -> Option<ChildState> {
        self.children.get(&kind).map(|slot| match slot {
            ChildSlot::Unfetched => ChildState::Unfetched,
            ChildSlot::Fetched(items) => ChildState::Fetched(items.len()),
            ChildSlot::FetchFailed => ChildState::FetchFailed,
        })
    }

    /// Children of `kind`, fetching them from the collector on first use.
    ///
    /// Returns an empty slice for kinds this entity cannot have.
    pub fn get_children(&mut self, kind: MetadataKind) -> &[MetaObject] {
        if matches!(self.children.get(&kind), Some(ChildSlot::Unfetched)) {
            self.fetch_children(kind);
        }
        self.resolved_children(kind)
    }

    /// Children of `kind` already resolved; never fetches.
    pub fn resolved_children(&self, kind: MetadataKind) -> &[MetaObject] {
        match self.children.get(&kind) {
            Some(ChildSlot::Fetched(items)) => items,
            _ => &[],
        }
    }

    pub fn get_child(&mut self, kind: MetadataKind, id: &str) -> Option<&MetaObject> {
        self.get_children(kind).iter().find(|c| c.id() == id)
    }

    fn fetch_children(&mut self, kind: MetadataKind) {
        let Some(collector) = self.collector.as_ref().and_then(Weak::upgrade) else {
            self.children.insert(kind, ChildSlot::Fetched(Vec::new()));
            return;
        };
        match collector.fetch(kind, &self.path()) {
            Ok(fetched) => {
                self.children.insert(kind, ChildSlot::Fetched(Vec::new()));
                for child in fetched {
                    if let Err(e) = self.add_child(child) {
                        warn!(path = %self.path(), %kind, "dropping fetched child: {}", e);
                    }
                }
            }
            Err(e) => {
                error!(entity = %self, %kind, "unable to fetch children: {}", e);
                self.children.insert(kind, ChildSlot::FetchFailed);
            }
        }
    }

    /// Add or replace (by id) a child, re-parenting it under this entity.
    pub fn add_child(&mut self, mut child: MetaObject) -> Result<()> {
        let kind = child.kind;
        if !self.kind.permits_child(kind) {
            return Err(MetadataError::ChildKindNotPermitted {
                parent: self.kind,
                child: kind,
            });
        }
        let id = child.id();
        if id.is_empty() {
            return Err(MetadataError::MissingId(kind));
        }
        child.propagate(Some(&self.path()), self.collector.clone());

        let slot = self.children.entry(kind).or_insert(ChildSlot::Unfetched);
        match slot {
            ChildSlot::Fetched(items) => match items.iter_mut().find(|c| c.id() == id) {
                Some(existing) => *existing = child,
                None => items.push(child),
            },
            _ => *slot = ChildSlot::Fetched(vec![child]),
        }
        Ok(())
    }

    pub fn remove_child(&mut self, kind: MetadataKind, id: &str) -> Option<MetaObject> {
        match self.children.get_mut(&kind) {
            Some(ChildSlot::Fetched(items)) => {
                let pos = items.iter().position(|c| c.id() == id)?;
                Some(items.remove(pos))
            }
            _ => None,
        }
    }

    /// Resolve every child kind, recursively.
    pub fn materialize(&mut self) {
        for kind in self.kind.child_kinds() {
            self.get_children(*kind);
            if let Some(ChildSlot::Fetched(items)) = self.children.get_mut(kind) {
                for child in items.iter_mut() {
                    child.materialize();
                }
            }
        }
    }
}

impl fmt::Display for MetaObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[", self.kind)?;
        for (i, name) in self.attr_types.names().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}={}", name, self.attr_string(name).unwrap_or_default())?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::types::TEXT;
    use crate::metadata::InMemoryCollector;
    use MetadataKind::*;

    fn class(name: &str) -> MetaObject {
        MetaObject::new(Class).with_attribute("ClassName", name)
    }

    fn table(name: &str) -> MetaObject {
        MetaObject::new(Table).with_attribute("SystemName", name)
    }

    #[test]
    fn parentless_path_is_own_id() {
        let resource = MetaObject::new(Resource).with_attribute("ResourceID", "Property");
        assert_eq!(resource.path(), "Property");
        assert_eq!(MetaObject::new(System).path(), "System");
    }

    #[test]
    fn added_child_path_joins_parent_path() {
        let mut resource = MetaObject::new(Resource).with_attribute("ResourceID", "Property");
        resource.add_child(class("RES")).unwrap();
        let child = resource.get_child(Class, "RES").unwrap();
        assert_eq!(child.path(), "Property:RES");
    }

    #[test]
    fn reparenting_recomputes_descendant_paths() {
        let mut res = class("RES");
        res.add_child(table("ListPrice")).unwrap();
        assert_eq!(res.resolved_children(Table)[0].path(), "RES:ListPrice");

        let mut resource = MetaObject::new(Resource).with_attribute("ResourceID", "Property");
        resource.add_child(res).unwrap();
        let res = &resource.resolved_children(Class)[0];
        assert_eq!(res.resolved_children(Table)[0].path(), "Property:RES:ListPrice");
    }

    #[test]
    fn sibling_ids_stay_unique() {
        let mut resource = MetaObject::new(Resource).with_attribute("ResourceID", "Property");
        resource.add_child(class("RES")).unwrap();
        resource
            .add_child(class("RES").with_attribute("VisibleName", "Replaced"))
            .unwrap();
        resource.add_child(class("LND")).unwrap();

        let classes = resource.get_children(Class);
        assert_eq!(classes.len(), 2);
        assert_eq!(classes[0].string_attr("VisibleName"), Some("Replaced"));
    }

    #[test]
    fn rejects_unpermitted_child_and_missing_id() {
        let mut resource = MetaObject::new(Resource).with_attribute("ResourceID", "Property");
        assert!(matches!(
            resource.add_child(table("ListPrice")),
            Err(MetadataError::ChildKindNotPermitted { .. })
        ));
        assert!(matches!(
            resource.add_child(MetaObject::new(Class)),
            Err(MetadataError::MissingId(Class))
        ));
    }

    #[test]
    fn remove_child_by_id() {
        let mut res = class("RES");
        res.add_child(table("ListPrice")).unwrap();
        assert!(res.remove_child(Table, "Nope").is_none());
        let removed = res.remove_child(Table, "ListPrice").unwrap();
        assert_eq!(removed.id(), "ListPrice");
        assert!(res.resolved_children(Table).is_empty());
    }

    #[test]
    fn unbound_entity_resolves_to_empty() {
        let mut res = class("RES");
        assert_eq!(res.child_state(Table), Some(ChildState::Unfetched));
        assert!(res.get_children(Table).is_empty());
        assert_eq!(res.child_state(Table), Some(ChildState::Fetched(0)));
        assert_eq!(res.child_state(Lookup), None);
    }

    #[test]
    fn failed_fetch_is_cached_and_not_retried() {
        let memory = Arc::new(InMemoryCollector::new());
        memory.fail_on(Table, "RES");
        let collector: Arc<dyn MetaCollector> = memory.clone();

        let mut res = MetaObject::bound(Class, false, &collector).with_attribute("ClassName", "RES");
        assert!(res.get_children(Table).is_empty());
        assert_eq!(res.child_state(Table), Some(ChildState::FetchFailed));
        assert!(res.get_children(Table).is_empty());
        assert_eq!(memory.fetch_count(), 1);
    }

    #[test]
    fn typed_accessors_default_on_family_mismatch() {
        let mut table = table("ListPrice")
            .with_attribute("MaximumLength", "12")
            .with_attribute("Searchable", "1");
        table.set_attribute("Precision", "not a number");

        assert_eq!(table.int_attr("MaximumLength"), 12);
        assert!(table.bool_attr("Searchable"));
        // declared integer, asked as string
        assert_eq!(table.string_attr("MaximumLength"), None);
        // declared boolean, asked as integer
        assert_eq!(table.int_attr("Searchable"), 0);
        // loose parse kept raw text under an integer declaration
        assert_eq!(table.int_attr("Precision"), 0);
        assert_eq!(table.attr_string("Precision").as_deref(), Some("not a number"));
        assert!(table.date_attr("SystemName").is_none());
    }

    #[test]
    fn unknown_attributes_are_stored_verbatim() {
        let res = class("RES")
            .with_attribute("X-SiteFlag", "yes")
            .with_attribute("Bogus", "value");
        assert_eq!(res.attr("X-SiteFlag"), Some(&AttrValue::Text("yes".into())));
        assert_eq!(res.attr_string("Bogus").as_deref(), Some("value"));
    }

    #[test]
    fn loose_entities_match_names_case_insensitively() {
        let res = MetaObject::new(Class).with_attribute("classname", "RES");
        assert_eq!(res.id(), "RES");
        assert_eq!(res.string_attr("CLASSNAME"), Some("RES"));
    }

    #[test]
    fn strict_override_surfaces_parse_errors() {
        let mut res = class("RES");
        let err = res.set_attribute_with("DBName", "way too long name", true).unwrap_err();
        match err {
            MetadataError::Parse { attribute, text, .. } => {
                assert_eq!(attribute, "DBName");
                assert_eq!(text, "way too long name");
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert!(res.attr("DBName").is_none());

        res.set_attribute_with("DBName", "way too long name", false).unwrap();
        assert_eq!(res.attr_string("DBName").as_deref(), Some("way too long name"));
    }

    #[test]
    fn strict_entity_drops_invalid_values_without_failing() {
        let mut res = MetaObject::with_parsing(Class, STRICT_PARSING);
        res.set_attribute("ClassName", "not valid!");
        assert!(res.attr("ClassName").is_none());
        res.set_attribute("ClassName", "RES");
        assert_eq!(res.id(), "RES");
    }

    #[test]
    fn replace_attribute_type_is_per_instance() {
        let mut res = class("RES");
        let other = class("LND");
        let old = res.replace_attribute_type("DBName", TEXT);
        assert_eq!(old, Some(crate::attributes::types::ALPHANUM_10));
        assert_eq!(res.attribute_type("DBName"), Some(TEXT));
        assert_eq!(other.attribute_type("DBName"), old);
    }

    #[test]
    fn missing_required_in_declared_order() {
        let res = class("RES");
        assert_eq!(res.missing_required(), vec!["VisibleName"]);
        assert!(res.is_attribute_required("ClassName"));
        assert!(!res.is_attribute_required("DBName"));
    }

    #[test]
    fn display_lists_known_attributes() {
        let mask = MetaObject::new(EditMask)
            .with_attribute("EditMaskID", "LN_EDITMASK")
            .with_attribute("Value", "[0-9]{4,8}");
        assert_eq!(mask.to_string(), "EditMask[EditMaskID=LN_EDITMASK,Value=[0-9]{4,8}]");
    }
}
