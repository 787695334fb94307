//! Test support: logging setup and taxonomy fixtures.

use std::path::{Path, PathBuf};
use std::sync::Once;

use tracing::info;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

static TEST_SETUP: Once = Once::new();

/// Small taxonomy: branch "A" with two leaves, leaf branch "B".
pub const SAMPLE_TAXONOMY: &str = r#"{
  "name": "Root",
  "children": [
    {"name": "A", "children": [{"name": "A1"}, {"name": "A2"}]},
    {"name": "B"}
  ]
}"#;

pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        // RUST_LOG wins when set, otherwise log this crate at debug
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("atlas_layout=debug"));

        let subscriber = tracing_subscriber::registry().with(
            fmt::layer()
                .with_test_writer()
                .with_target(true)
                .with_span_events(FmtSpan::CLOSE)
                .with_filter(env_filter),
        );

        if tracing::dispatcher::has_been_set() {
            return;
        }
        if let Err(e) = subscriber.try_init() {
            eprintln!("Error: Failed to set up logging: {}", e);
        }
        info!("Test Setup complete");
    });
}

/// Write a taxonomy document to `<project>/data/master.json`.
pub fn write_master(project: &Path, json: &str) -> PathBuf {
    let data = project.join("data");
    std::fs::create_dir_all(&data).expect("create data dir");
    let path = data.join("master.json");
    std::fs::write(&path, json).expect("write master.json");
    path
}
