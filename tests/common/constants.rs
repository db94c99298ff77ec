//! Shared constants for end-to-end tests

#![allow(dead_code)]

// ============================================================================
// Fake Stash server
// ============================================================================

/// API key the fake server accepts
pub const TEST_API_KEY: &str = "test-api-key";

/// Path the fake server serves GraphQL on
pub const GRAPHQL_PATH: &str = "/graphql";

/// GraphQL error message returned for scenes configured to fail
pub const FAILING_SCENE_MESSAGE: &str = "scene update rejected";

/// Per-request timeout used by test clients
pub const CLIENT_TIMEOUT_SEC: u64 = 5;

// ============================================================================
// Scene library
// ============================================================================

pub const SCENE_1_ID: &str = "101";
pub const SCENE_1_PATH: &str = "/media/library/first.mp4";

pub const SCENE_2_ID: &str = "102";
pub const SCENE_2_PATH: &str = "/media/library/second.mp4";

pub const SCENE_3_ID: &str = "103";
pub const SCENE_3_PATH: &str = "/media/library/third, with comma.mkv";

/// A path present in the Plex export but not in Stash
pub const UNKNOWN_PATH: &str = "/media/elsewhere/missing.mp4";
