//! Common test infrastructure
//!
//! End-to-end tests run the real `GraphqlClient` against a fake Stash
//! GraphQL server. Tests should only import from this module.
//!
//! # Example
//!
//! ```no_run
//! mod common;
//! use common::{stash_scene, TestServer, TEST_API_KEY};
//!
//! #[tokio::test]
//! async fn test_something() {
//!     let server = TestServer::spawn(vec![stash_scene("1", "/a.mp4", 0, 0)]).await;
//!     let client = server.client(Some(TEST_API_KEY));
//! }
//! ```

mod constants;
mod fixtures;
mod server;

pub use constants::*;
#[allow(unused_imports)]
pub use fixtures::{migration_config, stash_scene, write_plex_export, write_scene_file};
pub use server::{RecordedUpdate, TestServer};
