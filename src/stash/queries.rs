//! GraphQL documents sent to Stash.

use serde_json::{json, Value};

/// Fetches id, path and the two reconciled counters of every scene.
pub const ALL_SCENES_QUERY: &str = r#"
query {
    allScenes {
        id
        path
        title
        play_count
        rating100
    }
}
"#;

/// Sets both play count and rating.
pub const UPDATE_ALL_MUTATION: &str = r#"
mutation SceneUpdate($id: ID!, $rating100: Int, $play_count: Int) {
    sceneUpdate(input: { id: $id, rating100: $rating100, play_count: $play_count }) {
        rating100
        play_count
    }
}
"#;

/// Sets the play count only.
pub const UPDATE_VIEWS_MUTATION: &str = r#"
mutation SceneUpdate($id: ID!, $play_count: Int) {
    sceneUpdate(input: { id: $id, play_count: $play_count }) {
        rating100
        play_count
    }
}
"#;

/// Sets the rating only.
pub const UPDATE_RATING_MUTATION: &str = r#"
mutation SceneUpdate($id: ID!, $rating100: Int) {
    sceneUpdate(input: { id: $id, rating100: $rating100 }) {
        rating100
        play_count
    }
}
"#;

/// One `sceneUpdate` call, in one of the three accepted shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneMutation {
    All {
        id: String,
        play_count: i64,
        rating100: i64,
    },
    Views {
        id: String,
        play_count: i64,
    },
    /// `rating100: None` is sent as an explicit null.
    Rating {
        id: String,
        rating100: Option<i64>,
    },
}

impl SceneMutation {
    pub fn scene_id(&self) -> &str {
        match self {
            SceneMutation::All { id, .. }
            | SceneMutation::Views { id, .. }
            | SceneMutation::Rating { id, .. } => id,
        }
    }

    pub fn query(&self) -> &'static str {
        match self {
            SceneMutation::All { .. } => UPDATE_ALL_MUTATION,
            SceneMutation::Views { .. } => UPDATE_VIEWS_MUTATION,
            SceneMutation::Rating { .. } => UPDATE_RATING_MUTATION,
        }
    }

    pub fn variables(&self) -> Value {
        match self {
            SceneMutation::All {
                id,
                play_count,
                rating100,
            } => json!({ "id": id, "play_count": play_count, "rating100": rating100 }),
            SceneMutation::Views { id, play_count } => {
                json!({ "id": id, "play_count": play_count })
            }
            SceneMutation::Rating { id, rating100 } => json!({ "id": id, "rating100": rating100 }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queries_match_shapes() {
        let all = SceneMutation::All {
            id: "1".to_string(),
            play_count: 3,
            rating100: 90,
        };
        let views = SceneMutation::Views {
            id: "1".to_string(),
            play_count: 3,
        };
        let rating = SceneMutation::Rating {
            id: "1".to_string(),
            rating100: Some(90),
        };

        assert_eq!(all.query(), UPDATE_ALL_MUTATION);
        assert_eq!(views.query(), UPDATE_VIEWS_MUTATION);
        assert_eq!(rating.query(), UPDATE_RATING_MUTATION);
    }

    #[test]
    fn test_variables_only_carry_declared_fields() {
        let views = SceneMutation::Views {
            id: "7".to_string(),
            play_count: 4,
        };
        assert_eq!(views.variables(), json!({ "id": "7", "play_count": 4 }));
        assert!(views.variables().get("rating100").is_none());
    }

    #[test]
    fn test_missing_rating_is_sent_as_null() {
        let rating = SceneMutation::Rating {
            id: "7".to_string(),
            rating100: None,
        };
        assert_eq!(rating.variables(), json!({ "id": "7", "rating100": null }));
        assert_eq!(rating.scene_id(), "7");
    }
}
