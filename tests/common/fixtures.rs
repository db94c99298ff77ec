//! Input files and configurations for end-to-end tests

use super::constants::*;
use plex_stash_migrate::plex::ExportFormat;
use plex_stash_migrate::{AppConfig, SceneSource};
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// A scene as the fake server and scene files carry it.
pub fn stash_scene(id: &str, path: &str, play_count: i64, rating100: i64) -> Value {
    json!({
        "id": id,
        "path": path,
        "title": format!("Scene {}", id),
        "play_count": play_count,
        "rating100": rating100,
    })
}

/// Writes a `|`-delimited Plex export, one line per row, into `dir`.
pub fn write_plex_export(dir: &Path, rows: &[&str]) -> PathBuf {
    let path = dir.join("plex.csv");
    let mut content = rows.join("\n");
    content.push('\n');
    fs::write(&path, content).expect("Failed to write Plex export");
    path
}

/// Writes a raw `allScenes` GraphQL response into `dir`.
#[allow(dead_code)]
pub fn write_scene_file(dir: &Path, scenes: Vec<Value>) -> PathBuf {
    let path = dir.join("stash.json");
    let document = json!({ "data": { "allScenes": scenes } });
    fs::write(&path, document.to_string()).expect("Failed to write scene file");
    path
}

/// Configuration for a full run against `graphql_url`, reporting into `dir`.
pub fn migration_config(
    dir: &Path,
    graphql_url: &str,
    plex_csv: PathBuf,
    scene_source: SceneSource,
) -> AppConfig {
    AppConfig {
        graphql_url: graphql_url.to_string(),
        api_key: Some(TEST_API_KEY.to_string()),
        plex_csv,
        export_format: ExportFormat::Csv,
        scene_source,
        output_path: dir.join("results.csv"),
        timeout: Duration::from_secs(CLIENT_TIMEOUT_SEC),
        dry_run: false,
        show_progress: false,
    }
}
