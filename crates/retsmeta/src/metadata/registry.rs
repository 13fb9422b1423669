//! Attribute-declaration cache.
//!
//! Building the name → grammar map of a kind is done once per
//! `(kind, strict)` pair and shared by every entity of that kind through an
//! `Arc`. A single lock covers both "build if absent" and "invalidate all";
//! reads vastly outnumber builds so the coarse lock is not contended.
//!
//! Declarations may be changed at runtime with
//! [`AttributeRegistry::update_attribute`] and
//! [`AttributeRegistry::add_attribute`]. Cached maps are immutable, so such
//! changes only reach new entities after [`AttributeRegistry::invalidate_all`].

use once_cell::sync::Lazy;
use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

use super::declarations::builtin_declarations;
use super::kind::MetadataKind;
use crate::attributes::{AttrSpec, AttrType};

/// Ordered attribute declarations of one kind, indexed by name.
///
/// Loose maps match names case-insensitively; strict maps match exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeMap {
    kind: MetadataKind,
    strict: bool,
    specs: Vec<AttrSpec>,
    index: HashMap<String, usize>,
}

impl AttributeMap {
    pub fn build(kind: MetadataKind, strict: bool, declarations: &[AttrSpec]) -> Self {
        let mut map = Self {
            kind,
            strict,
            specs: Vec::with_capacity(declarations.len()),
            index: HashMap::with_capacity(declarations.len()),
        };
        for spec in declarations {
            map.insert(*spec);
        }
        map
    }

    fn key<'a>(&self, name: &'a str) -> Cow<'a, str> {
        if self.strict {
            Cow::Borrowed(name)
        } else {
            Cow::Owned(name.to_ascii_lowercase())
        }
    }

    /// Insert a declaration, replacing one with the same name in place.
    fn insert(&mut self, spec: AttrSpec) {
        let key = self.key(spec.name).into_owned();
        match self.index.get(&key) {
            Some(&pos) => self.specs[pos] = spec,
            None => {
                self.index.insert(key, self.specs.len());
                self.specs.push(spec);
            }
        }
    }

    pub fn kind(&self) -> MetadataKind {
        self.kind
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    pub fn get(&self, name: &str) -> Option<&AttrSpec> {
        self.index.get(self.key(name).as_ref()).map(|&pos| &self.specs[pos])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Declarations in wire order.
    pub fn specs(&self) -> &[AttrSpec] {
        &self.specs
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.specs.iter().map(|s| s.name)
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Swap the grammar of a declared attribute, or declare it (optional) if
    /// unknown. Returns the previous grammar.
    pub(crate) fn replace_type(&mut self, name: &'static str, attr_type: AttrType) -> Option<AttrType> {
        match self.index.get(self.key(name).as_ref()).copied() {
            Some(pos) => Some(std::mem::replace(&mut self.specs[pos].attr_type, attr_type)),
            None => {
                self.insert(AttrSpec::new(name, attr_type));
                None
            }
        }
    }
}

#[derive(Default)]
struct RegistryState {
    /// Kinds whose declarations were changed at runtime; others use the built-ins.
    declarations: HashMap<MetadataKind, Vec<AttrSpec>>,
    cache: HashMap<(MetadataKind, bool), Arc<AttributeMap>>,
}

impl RegistryState {
    fn declarations(&self, kind: MetadataKind) -> &[AttrSpec] {
        self.declarations
            .get(&kind)
            .map(Vec::as_slice)
            .unwrap_or_else(|| builtin_declarations(kind))
    }

    fn declarations_mut(&mut self, kind: MetadataKind) -> &mut Vec<AttrSpec> {
        self.declarations
            .entry(kind)
            .or_insert_with(|| builtin_declarations(kind).to_vec())
    }
}

static GLOBAL: Lazy<AttributeRegistry> = Lazy::new(AttributeRegistry::new);

/// Process-wide cache of attribute maps keyed by `(kind, strict)`.
#[derive(Default)]
pub struct AttributeRegistry {
    state: Mutex<RegistryState>,
}

impl AttributeRegistry {
    /// A registry over the built-in declarations with an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// The shared registry used by entities built without an explicit one.
    pub fn global() -> &'static AttributeRegistry {
        &GLOBAL
    }

    fn lock(&self) -> MutexGuard<'_, RegistryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The cached map for `(kind, strict)`, built on first use.
    pub fn attribute_map(&self, kind: MetadataKind, strict: bool) -> Arc<AttributeMap> {
        let mut state = self.lock();
        if let Some(map) = state.cache.get(&(kind, strict)) {
            return Arc::clone(map);
        }
        let map = Arc::new(AttributeMap::build(kind, strict, state.declarations(kind)));
        state.cache.insert((kind, strict), Arc::clone(&map));
        debug!(%kind, strict, "added attribute map to cache");
        map
    }

    /// Derive a fresh map from the current declarations, bypassing the cache.
    pub fn build_map(&self, kind: MetadataKind, strict: bool) -> AttributeMap {
        AttributeMap::build(kind, strict, self.lock().declarations(kind))
    }

    /// Current declaration list of a kind.
    pub fn declarations(&self, kind: MetadataKind) -> Vec<AttrSpec> {
        self.lock().declarations(kind).to_vec()
    }

    /// Replace the declaration with the same name in place, or append it.
    ///
    /// Does not touch cached maps; call [`invalidate_all`](Self::invalidate_all).
    pub fn update_attribute(&self, kind: MetadataKind, spec: AttrSpec) {
        let mut state = self.lock();
        let declarations = state.declarations_mut(kind);
        match declarations.iter_mut().find(|s| s.name == spec.name) {
            Some(existing) => *existing = spec,
            None => declarations.push(spec),
        }
    }

    /// Append a declaration.
    ///
    /// Does not touch cached maps; call [`invalidate_all`](Self::invalidate_all).
    pub fn add_attribute(&self, kind: MetadataKind, spec: AttrSpec) {
        self.lock().declarations_mut(kind).push(spec);
    }

    /// Drop every cached map. Entities already built keep the map they hold.
    pub fn invalidate_all(&self) {
        let mut state = self.lock();
        let dropped = state.cache.len();
        state.cache.clear();
        debug!(dropped, "invalidated attribute map cache");
    }

    /// Number of `(kind, strict)` maps currently cached.
    pub fn cached_maps(&self) -> usize {
        self.lock().cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::types::{PLAINTEXT_128, TEXT};

    #[test]
    fn map_is_built_once_and_shared() {
        let registry = AttributeRegistry::new();
        let first = registry.attribute_map(MetadataKind::Class, true);
        let second = registry.attribute_map(MetadataKind::Class, true);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(registry.cached_maps(), 1);

        let loose = registry.attribute_map(MetadataKind::Class, false);
        assert!(!Arc::ptr_eq(&first, &loose));
        assert_eq!(registry.cached_maps(), 2);
    }

    #[test]
    fn cached_map_equals_fresh_derivation() {
        let registry = AttributeRegistry::new();
        for kind in MetadataKind::ALL {
            for strict in [true, false] {
                let cached = registry.attribute_map(*kind, strict);
                assert_eq!(*cached, registry.build_map(*kind, strict));
                assert_eq!(*cached, AttributeMap::build(*kind, strict, builtin_declarations(*kind)));
            }
        }
    }

    #[test]
    fn loose_maps_ignore_case() {
        let registry = AttributeRegistry::new();
        let loose = registry.attribute_map(MetadataKind::Class, false);
        assert_eq!(loose.get("classname").map(|s| s.name), Some("ClassName"));
        let strict = registry.attribute_map(MetadataKind::Class, true);
        assert!(strict.get("classname").is_none());
        assert!(strict.contains("ClassName"));
    }

    #[test]
    fn declaration_changes_need_explicit_invalidation() {
        let registry = AttributeRegistry::new();
        let before = registry.attribute_map(MetadataKind::EditMask, true);

        registry.update_attribute(MetadataKind::EditMask, AttrSpec::new("Value", TEXT).required());
        registry.add_attribute(MetadataKind::EditMask, AttrSpec::new("X-Note", PLAINTEXT_128));

        let stale = registry.attribute_map(MetadataKind::EditMask, true);
        assert!(Arc::ptr_eq(&before, &stale));
        assert!(!stale.contains("X-Note"));

        registry.invalidate_all();
        assert_eq!(registry.cached_maps(), 0);

        let fresh = registry.attribute_map(MetadataKind::EditMask, true);
        assert!(!Arc::ptr_eq(&before, &fresh));
        assert_eq!(fresh.get("Value").unwrap().attr_type, TEXT);
        assert_eq!(fresh.names().collect::<Vec<_>>(), vec!["EditMaskID", "Value", "X-Note"]);
        // the entity-held map is untouched
        assert_ne!(before.get("Value").unwrap().attr_type, TEXT);
    }

    #[test]
    fn replace_type_returns_previous_grammar() {
        let mut map = AttributeRegistry::new().build_map(MetadataKind::EditMask, false);
        let old = map.replace_type("Value", TEXT);
        assert_eq!(old, Some(crate::attributes::types::TEXT_256));
        assert_eq!(map.replace_type("X-New", TEXT), None);
        assert!(map.contains("x-new"));
    }
}
