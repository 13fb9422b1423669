#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn retsmeta_cmd(home: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("retsmeta"));
    // keep the user's own config and environment out of the run
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path())
        .env_remove("RETSMETA_FORMAT")
        .env_remove("RETSMETA_STRICT_PARSING")
        .env_remove("RETSMETA_METADATA_VERSION")
        .env_remove("RUST_LOG");
    cmd
}

const RESOURCE: &str = r#"{
    "kind": "Resource",
    "attributes": { "ResourceID": "Property", "StandardName": "Property", "KeyField": "ListingID" },
    "children": [
        {
            "kind": "Class",
            "attributes": { "ClassName": "RES", "VisibleName": "Residential" },
            "children": [ { "kind": "Table", "attributes": { "SystemName": "ListPrice" } } ]
        },
        {
            "kind": "Lookup",
            "attributes": { "LookupName": "AREA", "VisibleName": "Area" },
            "children": [ { "kind": "LookupType", "attributes": { "LongValue": "North", "Value": "N" } } ]
        }
    ]
}"#;

#[test]
fn test_format_resource_tree() {
    let temp = TempDir::new().unwrap();
    let doc = temp.path().join("resource.json");
    fs::write(&doc, RESOURCE).unwrap();

    retsmeta_cmd(&temp)
        .args(["format", doc.to_str().unwrap()])
        .args(["--metadata-version", "1.00.001", "--date", "2003-07-22T18:29:44Z"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "<METADATA-RESOURCE Version=\"1.00.001\" Date=\"2003-07-22T18:29:44Z\">",
        ))
        .stdout(predicate::str::contains(
            "<METADATA-CLASS Resource=\"Property\" Version=\"1.00.001\"",
        ))
        .stdout(predicate::str::contains(
            "<METADATA-TABLE Resource=\"Property\" Class=\"RES\"",
        ))
        .stdout(predicate::str::contains(
            "<METADATA-LOOKUP_TYPE Resource=\"Property\" Lookup=\"AREA\"",
        ));
}

#[test]
fn test_format_mode_from_config_file() {
    let temp = TempDir::new().unwrap();
    let doc = temp.path().join("resource.json");
    fs::write(&doc, RESOURCE).unwrap();
    let config = temp.path().join("retsmeta.toml");
    fs::write(&config, "format = \"STANDARD-XML\"\n").unwrap();

    retsmeta_cmd(&temp)
        .args(["format", doc.to_str().unwrap(), "--config", config.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("<Resource>\n<ResourceID>Property</ResourceID>"));
}

#[test]
fn test_format_unknown_mode_fails() {
    let temp = TempDir::new().unwrap();
    let doc = temp.path().join("resource.json");
    fs::write(&doc, RESOURCE).unwrap();

    retsmeta_cmd(&temp)
        .args(["format", doc.to_str().unwrap(), "--mode", "fancy"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown format: fancy"));
}

#[test]
fn test_missing_explicit_config_fails() {
    let temp = TempDir::new().unwrap();
    retsmeta_cmd(&temp)
        .args(["columns", "Class", "--config"])
        .arg(temp.path().join("nope.toml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_columns() {
    let temp = TempDir::new().unwrap();
    retsmeta_cmd(&temp)
        .args(["columns", "LOOKUP_TYPE"])
        .assert()
        .success()
        .stdout(predicate::str::contains("LongValue"))
        .stdout(predicate::str::contains("ShortValue"));
}

#[test]
fn test_sql() {
    let temp = TempDir::new().unwrap();
    let clause = temp.path().join("clause.json");
    fs::write(
        &clause,
        r#"{ "type": "composite", "op": "OR", "elements": [
            { "type": "starts_with", "column": "r_city", "prefix": "San" },
            { "type": "not", "clause": { "type": "is_null", "column": "r_zip" } }
        ] }"#,
    )
    .unwrap();

    retsmeta_cmd(&temp)
        .args(["sql", clause.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "(r_city LIKE ? ESCAPE '\\') OR (NOT (r_zip IS NULL))\n",
        ))
        .stdout(predicate::str::contains("?1 = 'San%'"));
}

#[test]
fn test_strict_format_warns_about_missing_required() {
    let temp = TempDir::new().unwrap();
    let doc = temp.path().join("resource.json");
    fs::write(&doc, RESOURCE).unwrap();

    retsmeta_cmd(&temp)
        .args(["format", doc.to_str().unwrap(), "--strict"])
        .assert()
        .success()
        .stderr(predicate::str::contains("entity lacks required attributes"))
        .stderr(predicate::str::contains("Property:RES:ListPrice"));

    retsmeta_cmd(&temp)
        .args(["format", doc.to_str().unwrap()])
        .assert()
        .success()
        .stderr(predicate::str::contains("entity lacks required attributes").not());
}
