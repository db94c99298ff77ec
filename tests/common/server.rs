//! Fake Stash GraphQL server
//!
//! Serves `allScenes` from an in-memory scene list and applies
//! `sceneUpdate` mutations to it, recording every update it receives.
//! Each test gets its own server on a random port.

use super::constants::*;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use plex_stash_migrate::stash::API_KEY_HEADER;
use plex_stash_migrate::GraphqlClient;
use serde_json::{json, Value};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

/// One `sceneUpdate` call as the server saw it.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedUpdate {
    pub id: String,
    pub variables: Value,
}

#[derive(Default)]
struct FakeStash {
    scenes: Vec<Value>,
    required_key: Option<String>,
    failing_ids: HashSet<String>,
    updates: Vec<RecordedUpdate>,
    scene_queries: usize,
    seen_keys: Vec<Option<String>>,
}

type SharedState = Arc<Mutex<FakeStash>>;

impl FakeStash {
    fn handle(&mut self, api_key: Option<String>, body: &Value) -> Response {
        self.seen_keys.push(api_key.clone());

        if let Some(required) = &self.required_key {
            if api_key.as_deref() != Some(required.as_str()) {
                return (StatusCode::UNAUTHORIZED, "Unauthorized").into_response();
            }
        }

        let query = body["query"].as_str().unwrap_or_default();
        let variables = body.get("variables").cloned().unwrap_or(Value::Null);

        if query.contains("sceneUpdate") {
            return self.update_scene(variables);
        }
        if query.contains("allScenes") {
            self.scene_queries += 1;
            return Json(json!({ "data": { "allScenes": self.scenes } })).into_response();
        }

        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "errors": [{ "message": "unknown operation" }] })),
        )
            .into_response()
    }

    fn update_scene(&mut self, variables: Value) -> Response {
        let id = variables["id"].as_str().unwrap_or_default().to_string();

        if self.failing_ids.contains(&id) {
            return graphql_error(FAILING_SCENE_MESSAGE);
        }

        let Some(scene) = self.scenes.iter_mut().find(|s| s["id"] == id.as_str()) else {
            return graphql_error("scene not found");
        };
        for field in ["play_count", "rating100"] {
            if let Some(value) = variables.get(field) {
                scene[field] = value.clone();
            }
        }
        let payload = json!({
            "sceneUpdate": {
                "rating100": scene["rating100"],
                "play_count": scene["play_count"],
            }
        });

        self.updates.push(RecordedUpdate { id, variables });
        Json(json!({ "data": payload })).into_response()
    }
}

fn graphql_error(message: &str) -> Response {
    Json(json!({
        "data": { "sceneUpdate": null },
        "errors": [{ "message": message, "path": ["sceneUpdate"] }],
    }))
    .into_response()
}

async fn graphql(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let api_key = headers
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    state.lock().unwrap().handle(api_key, &body)
}

/// Fake Stash instance
///
/// When dropped, the server shuts down gracefully.
pub struct TestServer {
    /// Base URL (e.g., "http://127.0.0.1:12345")
    pub base_url: String,

    /// Full GraphQL endpoint URL
    pub graphql_url: String,

    state: SharedState,
    _shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestServer {
    /// Spawns a server holding `scenes` that requires [`TEST_API_KEY`].
    pub async fn spawn(scenes: Vec<Value>) -> Self {
        Self::spawn_with(scenes, Some(TEST_API_KEY), &[]).await
    }

    /// Spawns a server with an optional required API key and a set of scene
    /// ids whose updates are rejected with a GraphQL error.
    ///
    /// # Panics
    ///
    /// Panics if the port cannot be bound.
    pub async fn spawn_with(
        scenes: Vec<Value>,
        required_key: Option<&str>,
        failing_ids: &[&str],
    ) -> Self {
        let state: SharedState = Arc::new(Mutex::new(FakeStash {
            scenes,
            required_key: required_key.map(str::to_string),
            failing_ids: failing_ids.iter().map(|id| id.to_string()).collect(),
            ..Default::default()
        }));

        // Bind to random port; connections queue until serve() starts accepting.
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let port = listener
            .local_addr()
            .expect("Failed to get local address")
            .port();
        let base_url = format!("http://127.0.0.1:{}", port);

        let app = Router::new()
            .route(GRAPHQL_PATH, post(graphql))
            .with_state(state.clone());

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .expect("Server failed");
        });

        Self {
            graphql_url: format!("{}{}", base_url, GRAPHQL_PATH),
            base_url,
            state,
            _shutdown_tx: Some(shutdown_tx),
        }
    }

    /// A real client pointed at this server.
    pub fn client(&self, api_key: Option<&str>) -> GraphqlClient {
        GraphqlClient::new(
            self.graphql_url.clone(),
            api_key.map(str::to_string),
            Duration::from_secs(CLIENT_TIMEOUT_SEC),
        )
        .expect("Failed to build client")
    }

    /// Every successful `sceneUpdate`, in arrival order.
    pub fn updates(&self) -> Vec<RecordedUpdate> {
        self.state.lock().unwrap().updates.clone()
    }

    /// Number of `allScenes` queries served.
    pub fn scene_queries(&self) -> usize {
        self.state.lock().unwrap().scene_queries
    }

    /// `ApiKey` header of each request, `None` where it was absent.
    pub fn seen_keys(&self) -> Vec<Option<String>> {
        self.state.lock().unwrap().seen_keys.clone()
    }

    /// Current server-side state of a scene.
    pub fn scene(&self, id: &str) -> Option<Value> {
        self.state
            .lock()
            .unwrap()
            .scenes
            .iter()
            .find(|s| s["id"] == id)
            .cloned()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self._shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
