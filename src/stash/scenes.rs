//! Loading the Stash scene set, either from a pre-fetched document or live.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

use super::api::{StashApi, StashError};
use super::models::{AllScenes, SceneDocument, StashScene};
use super::queries::ALL_SCENES_QUERY;

/// Read scenes from a JSON document previously exported from Stash.
pub fn load_scene_file(path: &Path) -> Result<Vec<StashScene>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read Stash scene file: {:?}", path))?;
    parse_scene_document(&content)
        .with_context(|| format!("Failed to parse Stash scene file: {:?}", path))
}

pub fn parse_scene_document(content: &str) -> Result<Vec<StashScene>> {
    let document: SceneDocument = serde_json::from_str(content)?;
    Ok(document.into_scenes())
}

/// Query every scene from the live Stash instance.
pub async fn fetch_all_scenes(api: &dyn StashApi) -> Result<Vec<StashScene>, StashError> {
    info!("Getting all scenes from Stash, this may take a while...");

    let data = api
        .execute(ALL_SCENES_QUERY, serde_json::Value::Null)
        .await?;
    let scenes: AllScenes = serde_json::from_value(data)
        .map_err(|e| StashError::InvalidResponse(format!("Unexpected allScenes payload: {}", e)))?;

    info!("Found {} scenes", scenes.all_scenes.len());
    Ok(scenes.all_scenes)
}
