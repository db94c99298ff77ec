//! Plex to Stash migration library
//!
//! Copies play counts and ratings from a Plex library export onto the
//! matching Stash scenes. Exposed as a library for the binary and for tests.

pub mod config;
pub mod migration;
pub mod plex;
pub mod stash;

// Re-export commonly used types for convenience
pub use config::{AppConfig, CliConfig, FileConfig, SceneSource};
pub use migration::{run_migration, MigrationContext, MigrationOutcome, MigrationSummary};
pub use stash::{GraphqlClient, StashApi, StashError};
