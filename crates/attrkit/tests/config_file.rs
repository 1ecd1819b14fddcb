use std::fs;
use std::sync::Arc;

use attrkit::{opts, AttrType, ClassDef, CoercionConfig, Instance, StandardGateway, Value};
use tempfile::TempDir;

fn write_config(dir: &TempDir, body: &str) -> std::path::PathBuf {
    let path = dir.path().join("attrkit.toml");
    fs::write(&path, body).unwrap();
    path
}

#[test]
fn test_load_overrides_from_file() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
true_values = ["sim"]
false_values = ["nao"]
wrap_scalars = true
"#,
    );

    let config = CoercionConfig::load(Some(path.as_path())).unwrap();

    assert_eq!(config.true_values, vec!["sim"]);
    assert_eq!(config.false_values, vec!["nao"]);
    assert!(config.wrap_scalars);
}

#[test]
fn test_load_without_file_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("absent.toml");

    let config = CoercionConfig::load(Some(missing.as_path())).unwrap();

    assert_eq!(config.true_values, CoercionConfig::default().true_values);
    assert_eq!(config.false_values, CoercionConfig::default().false_values);
}

#[test]
fn test_template_parses_as_toml() {
    let template = CoercionConfig::template();
    let parsed: Result<toml::Table, _> = toml::from_str(&template);
    assert!(parsed.is_ok());
    assert!(template.contains("trim_strings"));
}

#[test]
fn test_configured_gateway_drives_setters() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
true_values = ["sim"]
false_values = ["nao"]
wrap_scalars = true
"#,
    );
    let config = CoercionConfig::load(Some(path.as_path())).unwrap();

    let class = ClassDef::builder("Flags")
        .gateway(Arc::new(StandardGateway::new(config)))
        .attribute("enabled", AttrType::BOOL, opts())
        .attribute("ports", AttrType::Sequence, opts().of(AttrType::INT))
        .build();
    let mut instance = Instance::new(&class).unwrap();

    instance.set("enabled", "SIM").unwrap();
    instance.set("ports", "8080").unwrap();

    assert_eq!(instance.get("enabled"), Some(&Value::Bool(true)));
    assert_eq!(instance.get("ports"), Some(&Value::from(vec![8080])));
    assert!(instance.set("enabled", "yes").is_err());
}
