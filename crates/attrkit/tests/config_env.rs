//! Environment overrides live in their own test binary: the variables are
//! process-wide and would otherwise leak into the file-based config tests.

use std::env;
use std::fs;

use attrkit::CoercionConfig;
use tempfile::TempDir;

#[test]
fn test_environment_beats_file_beats_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("attrkit.toml");
    fs::write(
        &path,
        r#"
true_values = ["sim"]
wrap_scalars = false
trim_strings = false
"#,
    )
    .unwrap();

    env::set_var("ATTRKIT_WRAP_SCALARS", "true");
    let loaded = CoercionConfig::load(Some(path.as_path()));
    env::remove_var("ATTRKIT_WRAP_SCALARS");
    let config = loaded.unwrap();

    // env
    assert!(config.wrap_scalars);
    // file
    assert!(!config.trim_strings);
    assert_eq!(config.true_values, vec!["sim"]);
    // defaults
    assert_eq!(config.false_values, CoercionConfig::default().false_values);
}
