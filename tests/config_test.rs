//! Tests for layered settings loading from project config files

use std::fs;

use tempfile::TempDir;

use atlas_layout::application::ApplicationError;
use atlas_layout::config::{project_config_path, Settings};
use atlas_layout::domain::BranchSweep;

#[test]
fn given_local_config_when_loading_then_overrides_defaults() {
    // Arrange
    let temp = TempDir::new().unwrap();
    fs::write(
        project_config_path(temp.path()),
        r#"
docs_dir = "site"
child_url_prefix = "assets/data"

[layout]
ring_capacity = 8
branch_sweep = "share"
"#,
    )
    .unwrap();

    // Act
    let settings = Settings::load(Some(temp.path())).unwrap();

    // Assert
    assert_eq!(settings.docs_dir, std::path::PathBuf::from("site"));
    assert_eq!(settings.child_url_prefix, "assets/data");
    assert_eq!(settings.layout.ring_capacity, 8);
    assert_eq!(settings.layout.branch_sweep, BranchSweep::Share);
    assert_eq!(settings.master_file, "master.json");
    assert!(settings.layout.multiline_labels);
}

#[test]
fn given_zero_ring_capacity_in_local_config_when_loading_then_config_error() {
    let temp = TempDir::new().unwrap();
    fs::write(
        project_config_path(temp.path()),
        "[layout]\nring_capacity = 0\n",
    )
    .unwrap();

    let result = Settings::load(Some(temp.path()));

    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}

#[test]
fn given_unparseable_local_config_when_loading_then_config_error_names_file() {
    let temp = TempDir::new().unwrap();
    fs::write(project_config_path(temp.path()), "layout = [not toml").unwrap();

    match Settings::load(Some(temp.path())) {
        Err(ApplicationError::Config { message }) => assert!(message.contains(".atlas.toml")),
        other => panic!("expected config error, got {other:?}"),
    }
}

#[test]
fn given_settings_when_building_engine_then_capacity_is_applied() {
    let temp = TempDir::new().unwrap();
    fs::write(
        project_config_path(temp.path()),
        "[layout]\nring_capacity = 3\nmultiline_labels = false\n",
    )
    .unwrap();

    let settings = Settings::load(Some(temp.path())).unwrap();
    let engine = settings.layout_engine().unwrap();

    assert_eq!(engine.rings.capacity(), 3);
    assert!(!engine.multiline_labels);
    assert_eq!(settings.partition_options().child_url_prefix, "data");
}
