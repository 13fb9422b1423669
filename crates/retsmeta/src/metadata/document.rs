//! JSON metadata documents.
//!
//! A document is the serde form of a metadata subtree:
//!
//! ```json
//! {
//!   "kind": "Class",
//!   "attributes": { "ClassName": "RES", "VisibleName": "Residential" },
//!   "children": [ { "kind": "Table", "attributes": { "SystemName": "ListPrice" } } ]
//! }
//! ```
//!
//! Attribute values are kept as wire text and parsed when the document is
//! turned into a tree. [`DocumentCollector`] serves a document as the source
//! of a lazily fetched tree.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

use super::collector::MetaCollector;
use super::kind::MetadataKind;
use super::object::MetaObject;
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataDocument {
    pub kind: MetadataKind,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<MetadataDocument>,
}

impl MetadataDocument {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Build a fully resolved tree. Children that can't be attached are
    /// logged and skipped.
    pub fn to_object(&self, strict: bool) -> MetaObject {
        let mut object = self.to_leaf(strict);
        for child in &self.children {
            if let Err(e) = object.add_child(child.to_object(strict)) {
                warn!(parent = %object.path(), "skipping document child: {}", e);
            }
        }
        object
    }

    /// This node alone; its children stay unresolved.
    fn to_leaf(&self, strict: bool) -> MetaObject {
        let mut object = MetaObject::with_parsing(self.kind, strict);
        for (name, value) in &self.attributes {
            object.set_attribute(name, value);
        }
        object
    }

    /// Snapshot of an entity and its resolved subtree, undeclared attributes
    /// included.
    pub fn from_object(object: &MetaObject) -> Self {
        let mut attributes: BTreeMap<String, String> = object
            .known_attributes()
            .filter_map(|name| object.attr_string(name).map(|v| (name.to_string(), v)))
            .collect();
        attributes.extend(
            object
                .extra_attributes()
                .map(|(name, text)| (name.to_string(), text.to_string())),
        );
        let children = object
            .kind()
            .child_kinds()
            .iter()
            .flat_map(|k| object.resolved_children(*k))
            .map(Self::from_object)
            .collect();
        Self {
            kind: object.kind(),
            attributes,
            children,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Collector serving the nodes of a document by path.
///
/// Fetched entities are detached: their own children are fetched on demand
/// through the same collector.
pub struct DocumentCollector {
    strict: bool,
    nodes: HashMap<(MetadataKind, String), Vec<MetadataDocument>>,
}

impl DocumentCollector {
    /// Index every node of `root` under its parent's path. Returns the
    /// collector and the root entity bound to it.
    pub fn bind(root: &MetadataDocument, strict: bool) -> (Arc<dyn MetaCollector>, MetaObject) {
        let mut nodes = HashMap::new();
        let root_object = root.to_leaf(strict);
        index(&mut nodes, root, &root_object.path(), strict);
        debug!(entries = nodes.len(), "indexed metadata document");

        let collector: Arc<dyn MetaCollector> = Arc::new(Self { strict, nodes });
        let mut root_object = root_object;
        root_object.set_collector(Some(&collector));
        (collector, root_object)
    }
}

fn index(
    nodes: &mut HashMap<(MetadataKind, String), Vec<MetadataDocument>>,
    doc: &MetadataDocument,
    path: &str,
    strict: bool,
) {
    for child in &doc.children {
        nodes
            .entry((child.kind, path.to_string()))
            .or_default()
            .push(child.clone());
        let child_path = format!("{}:{}", path, child.to_leaf(strict).id());
        index(nodes, child, &child_path, strict);
    }
}

impl MetaCollector for DocumentCollector {
    fn fetch(&self, kind: MetadataKind, parent_path: &str) -> Result<Vec<MetaObject>> {
        let children = self
            .nodes
            .get(&(kind, parent_path.to_string()))
            .map(|docs| docs.iter().map(|d| d.to_leaf(self.strict)).collect())
            .unwrap_or_default();
        Ok(children)
    }
}
