use chrono::{DateTime, TimeZone, Utc};
use std::sync::{Arc, Mutex, PoisonError};

use crate::config::ConfigChangeListener;
use crate::format::FormatContext;
use crate::metadata::{MetaObject, MetadataKind};

pub const VERSION: &str = "1.00.001";

/// 2003-07-22T18:29:44Z
pub fn date() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2003, 7, 22, 18, 29, 44)
        .single()
        .unwrap_or_default()
}

pub fn context() -> FormatContext {
    FormatContext::new(VERSION, date())
}

/// The residential class of the Property resource.
pub fn res_class() -> MetaObject {
    MetaObject::new(MetadataKind::Class)
        .with_attribute("ClassName", "RES")
        .with_attribute("StandardName", "ResidentialProperty")
        .with_attribute("VisibleName", "Single Family")
        .with_attribute("Description", "Single Family Residential")
}

pub fn list_price() -> MetaObject {
    MetaObject::new(MetadataKind::Table)
        .with_attribute("SystemName", "ListPrice")
        .with_attribute("StandardName", "ListPrice")
        .with_attribute("LongName", "List Price")
        .with_attribute("DBName", "r_price")
        .with_attribute("MaximumLength", "12")
        .with_attribute("DataType", "Int")
        .with_attribute("Searchable", "1")
}

pub fn add_update() -> MetaObject {
    MetaObject::new(MetadataKind::Update)
        .with_attribute("UpdateName", "Add")
        .with_attribute("Description", "Add a listing")
        .with_attribute("KeyField", "ListingID")
}

/// Property resource with the `RES` class, one field, one update and an
/// `AREA` lookup, all resolved.
pub fn property_resource() -> MetaObject {
    let mut class = res_class();
    push(&mut class, list_price());
    push(&mut class, add_update());

    let mut lookup = MetaObject::new(MetadataKind::Lookup)
        .with_attribute("LookupName", "AREA")
        .with_attribute("VisibleName", "Area");
    push(
        &mut lookup,
        MetaObject::new(MetadataKind::LookupType)
            .with_attribute("LongValue", "Aurora 306")
            .with_attribute("ShortValue", "306")
            .with_attribute("Value", "306"),
    );

    let mut resource = MetaObject::new(MetadataKind::Resource)
        .with_attribute("ResourceID", "Property")
        .with_attribute("VisibleName", "Property")
        .with_attribute("Description", "Property listings")
        .with_attribute("KeyField", "ListingID")
        .with_attribute("ClassCount", "1");
    push(&mut resource, class);
    push(&mut resource, lookup);
    resource
}

fn push(parent: &mut MetaObject, child: MetaObject) {
    if let Err(e) = parent.add_child(child) {
        panic!("fixture tree is malformed: {e}");
    }
}

/// Listener that records every timestamp it is notified with.
#[derive(Default)]
pub struct RecordingListener {
    seen: Mutex<Vec<DateTime<Utc>>>,
}

impl RecordingListener {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn seen(&self) -> Vec<DateTime<Utc>> {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl ConfigChangeListener for RecordingListener {
    fn config_changed(&self, changed_at: DateTime<Utc>) {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(changed_at);
    }
}
