use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Contents of the config file.
///
/// `config.json` is the usual form; a `.toml` file with the same keys is
/// also accepted. Relative input paths are resolved against the directory
/// holding the config file.
#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct FileConfig {
    pub graphql_url: Option<String>,
    pub graphql_api_key: Option<String>,
    pub plex_csv: Option<String>,
    pub stash_json: Option<String>,

    /// "csv" or "lines"
    pub plex_format: Option<String>,
    pub live_scenes: Option<bool>,
    pub output: Option<String>,
    pub timeout_sec: Option<u64>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        let is_toml = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("toml"))
            .unwrap_or(false);

        let config: FileConfig = if is_toml {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?
        } else {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?
        };

        let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
        Ok(config.relative_to(base_dir))
    }

    fn relative_to(mut self, base_dir: &Path) -> Self {
        self.plex_csv = self.plex_csv.map(|p| join_relative(base_dir, &p));
        self.stash_json = self.stash_json.map(|p| join_relative(base_dir, &p));
        self
    }
}

fn join_relative(base_dir: &Path, path: &str) -> String {
    let path = PathBuf::from(path);
    if path.is_absolute() {
        path.display().to_string()
    } else {
        base_dir.join(path).display().to_string()
    }
}
