//! Stash catalog access.
//!
//! This module provides the GraphQL transport used to talk to Stash:
//! - `StashApi`: the single `execute(query, variables)` operation, as a trait
//! - `GraphqlClient`: the reqwest-backed implementation
//! - `SceneMutation`: the closed set of `sceneUpdate` shapes
//! - scene loading from a pre-fetched document or a live `allScenes` query

mod api;
mod client;
pub mod models;
pub mod queries;
mod scenes;

pub use api::{StashApi, StashError};
pub use client::{GraphqlClient, API_KEY_HEADER};
pub use models::StashScene;
pub use queries::SceneMutation;
pub use scenes::{fetch_all_scenes, load_scene_file, parse_scene_document};
