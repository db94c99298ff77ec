//! Scene records as returned by Stash.

use serde::{Deserialize, Deserializer, Serialize};

/// A scene in the Stash catalog.
///
/// `play_count` and `rating100` are nullable on the Stash side; a null is
/// read as 0 (never played / unrated).
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct StashScene {
    pub id: String,
    pub path: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub play_count: i64,
    /// Rating on Stash's 0-100 scale.
    #[serde(default, deserialize_with = "null_as_zero")]
    pub rating100: i64,
}

fn null_as_zero<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<i64>::deserialize(deserializer)?.unwrap_or(0))
}

/// The `allScenes` payload.
#[derive(Debug, Deserialize)]
pub struct AllScenes {
    #[serde(rename = "allScenes")]
    pub all_scenes: Vec<StashScene>,
}

/// Accepted layouts of a pre-fetched scene document.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum SceneDocument {
    /// Raw GraphQL response: `{ "data": { "allScenes": [...] } }`
    Envelope { data: AllScenes },
    /// `{ "allScenes": [...] }`
    Plain(AllScenes),
    /// `[...]`
    Bare(Vec<StashScene>),
}

impl SceneDocument {
    pub(crate) fn into_scenes(self) -> Vec<StashScene> {
        match self {
            SceneDocument::Envelope { data } => data.all_scenes,
            SceneDocument::Plain(doc) => doc.all_scenes,
            SceneDocument::Bare(scenes) => scenes,
        }
    }
}
