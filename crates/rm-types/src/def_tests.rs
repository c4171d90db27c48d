// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::io::Write;

#[test]
fn parses_minimal_toml() {
    let toml = r#"
        plugin = "chain"
        resource_type = "node"
    "#;
    let def = ResourceTypeDef::from_toml_str(toml, "test").unwrap();
    assert_eq!(def.plugin, "chain");
    assert_eq!(def.resource_type, "node");
    assert!(!def.start_on_create);
    assert!(!def.supports_start_stop);
}

#[test]
fn rejects_malformed_toml() {
    let err = ResourceTypeDef::from_toml_str("not valid = = toml", "bad.toml").unwrap_err();
    assert!(matches!(err, ResourceTypeLoadError::Parse { .. }));
}

#[tokio::test]
async fn load_reads_from_disk() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, r#"plugin = "chain"
resource_type = "node"
supports_start_stop = true"#)
        .unwrap();

    let def = ResourceTypeDef::load(file.path()).await.unwrap();
    assert_eq!(def.plugin, "chain");
    assert!(def.supports_start_stop);
}

#[tokio::test]
async fn load_surfaces_io_error_for_missing_file() {
    let missing = std::path::Path::new("/nonexistent/definitely/missing.toml");
    let err = ResourceTypeDef::load(missing).await.unwrap_err();
    assert!(matches!(err, ResourceTypeLoadError::Io { .. }));
}

#[test]
fn into_resource_type_derives_names_and_flags() {
    let def = ResourceTypeDef {
        plugin: "chain".to_string(),
        resource_type: "node".to_string(),
        start_on_create: true,
        supports_start_stop: true,
        supports_describe: false,
    };
    let rt = def.into_resource_type();
    assert_eq!(rt.plugin, "chain");
    assert_eq!(rt.resource_type, "node");
    assert!(rt.create.start_on_create);
    assert!(rt.supports_start_stop());
    assert!(rt.describe.is_none());
    assert_eq!(rt.start.unwrap().names.ed, "started");
}

#[test]
fn into_resource_type_omits_start_stop_when_unsupported() {
    let def = ResourceTypeDef {
        plugin: "chain".to_string(),
        resource_type: "node".to_string(),
        start_on_create: false,
        supports_start_stop: false,
        supports_describe: true,
    };
    let rt = def.into_resource_type();
    assert!(!rt.supports_start_stop());
    assert!(rt.describe.is_some());
}
