mod file_config;

pub use file_config::FileConfig;

use crate::migration::DEFAULT_REPORT_FILE;
use crate::plex::ExportFormat;
use anyhow::{anyhow, bail, Result};
use clap::ValueEnum;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

pub const DEFAULT_TIMEOUT_SEC: u64 = 30;

/// CLI arguments that take part in config resolution.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub config_path: Option<PathBuf>,
    pub graphql_url: Option<String>,
    pub api_key: Option<String>,
    pub plex_csv: Option<PathBuf>,
    pub stash_json: Option<PathBuf>,
    pub live_scenes: bool,
    pub export_format: Option<ExportFormat>,
    pub output: Option<PathBuf>,
    pub timeout_sec: Option<u64>,
    pub dry_run: bool,
    pub show_progress: bool,
}

/// Where the Stash scene set comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneSource {
    /// A pre-fetched `allScenes` JSON document.
    File(PathBuf),
    /// A live `allScenes` query.
    Live,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub graphql_url: String,
    pub api_key: Option<String>,
    pub plex_csv: PathBuf,
    pub export_format: ExportFormat,
    pub scene_source: SceneSource,
    pub output_path: PathBuf,
    pub timeout: Duration,
    pub dry_run: bool,
    pub show_progress: bool,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and the optional config file.
    /// Explicit CLI values win over the file.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let graphql_url = cli
            .graphql_url
            .clone()
            .or(file.graphql_url)
            .ok_or_else(|| {
                anyhow!("graphql_url must be specified via --graphql-url or in config file")
            })?;

        let api_key = cli.api_key.clone().or(file.graphql_api_key);

        let plex_csv = cli
            .plex_csv
            .clone()
            .or_else(|| file.plex_csv.map(PathBuf::from))
            .ok_or_else(|| anyhow!("plex_csv must be specified via --plex-csv or in config file"))?;
        ensure_file(&plex_csv, "Plex export")?;

        let export_format = match cli.export_format {
            Some(format) => format,
            None => match file.plex_format {
                Some(s) => parse_export_format(&s)
                    .ok_or_else(|| anyhow!("Unknown plex_format in config file: {}", s))?,
                None => ExportFormat::default(),
            },
        };

        let stash_json = cli
            .stash_json
            .clone()
            .or_else(|| file.stash_json.map(PathBuf::from));
        let live = cli.live_scenes || file.live_scenes.unwrap_or(false);
        let scene_source = match stash_json {
            Some(path) if !live => {
                ensure_file(&path, "Stash scene file")?;
                SceneSource::File(path)
            }
            _ => SceneSource::Live,
        };

        let output_path = cli
            .output
            .clone()
            .or_else(|| file.output.map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_REPORT_FILE));

        let timeout_sec = cli
            .timeout_sec
            .or(file.timeout_sec)
            .unwrap_or(DEFAULT_TIMEOUT_SEC);
        if timeout_sec == 0 {
            bail!("timeout must be greater than zero");
        }

        Ok(Self {
            graphql_url,
            api_key,
            plex_csv,
            export_format,
            scene_source,
            output_path,
            timeout: Duration::from_secs(timeout_sec),
            dry_run: cli.dry_run,
            show_progress: cli.show_progress,
        })
    }

    /// Load the config file (explicit, or `config.json` if present) and resolve.
    pub fn load(cli: &CliConfig) -> Result<Self> {
        let file_config = match &cli.config_path {
            Some(path) => {
                if !path.exists() {
                    bail!("Missing config file: {:?}", path);
                }
                Some(FileConfig::load(path)?)
            }
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Some(FileConfig::load(default_path)?)
                } else {
                    debug!("No {} found, using CLI arguments only", DEFAULT_CONFIG_FILE);
                    None
                }
            }
        };
        Self::resolve(cli, file_config)
    }
}

fn ensure_file(path: &Path, what: &str) -> Result<()> {
    if !path.exists() {
        bail!("Missing {}: {:?}", what, path);
    }
    if !path.is_file() {
        bail!("{} is not a file: {:?}", what, path);
    }
    Ok(())
}

/// Uses clap's ValueEnum trait for parsing.
fn parse_export_format(s: &str) -> Option<ExportFormat> {
    ExportFormat::from_str(s, true).ok()
}
