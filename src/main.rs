use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli_style;
use cli_style::{
    colors, get_styles, print_banner, print_count, print_error, print_info, print_key_value,
    print_section_footer, print_section_header, print_success, print_table, print_warning,
};

use plex_stash_migrate::config::DEFAULT_CONFIG_FILE;
use plex_stash_migrate::migration::{MigrationStats, UpdateCandidate};
use plex_stash_migrate::plex::ExportFormat;
use plex_stash_migrate::{
    run_migration, AppConfig, CliConfig, GraphqlClient, MigrationContext, MigrationOutcome,
    SceneSource,
};

fn parse_path(s: &str) -> Result<PathBuf> {
    let path_buf = PathBuf::from(s);
    if path_buf.is_absolute() {
        return Ok(path_buf);
    }
    let cwd = std::env::current_dir().context("Error resolving current directory")?;
    Ok(cwd.join(path_buf))
}

/// Copy play counts and ratings from a Plex export onto matching Stash scenes.
#[derive(Parser, Debug)]
#[command(name = "plex-stash-migrate", version = env!("MIGRATE_VERSION"), styles = get_styles())]
struct CliArgs {
    /// Config file (JSON, or TOML with a .toml extension). Defaults to ./config.json if present.
    #[clap(short, long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// Stash GraphQL endpoint, e.g. http://localhost:9999/graphql.
    #[clap(long)]
    pub graphql_url: Option<String>,

    /// Stash API key, sent in the ApiKey header.
    #[clap(long)]
    pub api_key: Option<String>,

    /// Path to the pipe-delimited Plex export.
    #[clap(long, value_parser = parse_path)]
    pub plex_csv: Option<PathBuf>,

    /// Path to a pre-fetched allScenes JSON document.
    #[clap(long, value_parser = parse_path)]
    pub stash_json: Option<PathBuf>,

    /// Query allScenes from the server instead of reading a scene file.
    #[clap(long)]
    pub live_scenes: bool,

    /// How to split the Plex export into fields.
    #[clap(long)]
    pub export_format: Option<ExportFormat>,

    /// Where to write the results report.
    #[clap(short, long, value_parser = parse_path)]
    pub output: Option<PathBuf>,

    /// Timeout in seconds for each GraphQL request.
    #[clap(long)]
    pub timeout_sec: Option<u64>,

    /// Compute the update worklist without sending any mutation.
    #[clap(long)]
    pub dry_run: bool,

    /// Hide the progress bars.
    #[clap(long)]
    pub no_progress: bool,

    /// Log at debug level unless LOG_LEVEL says otherwise.
    #[clap(short, long)]
    pub verbose: bool,
}

impl CliArgs {
    fn to_cli_config(&self) -> CliConfig {
        CliConfig {
            config_path: self.config.clone(),
            graphql_url: self.graphql_url.clone(),
            api_key: self.api_key.clone(),
            plex_csv: self.plex_csv.clone(),
            stash_json: self.stash_json.clone(),
            live_scenes: self.live_scenes,
            export_format: self.export_format,
            output: self.output.clone(),
            timeout_sec: self.timeout_sec,
            dry_run: self.dry_run,
            show_progress: !self.no_progress,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli_args = CliArgs::parse();

    let default_level = if cli_args.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let init = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(default_level.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init();
    if let Err(e) = init {
        eprintln!("Failed to initialize logging: {}", e);
    }

    match run(cli_args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            print_error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli_args: CliArgs) -> Result<()> {
    print_banner();

    let config = AppConfig::load(&cli_args.to_cli_config()).with_context(|| {
        format!(
            "Missing or invalid setup. Provide {}, the Plex export and the Stash scene file, \
             or pass them on the command line",
            DEFAULT_CONFIG_FILE
        )
    })?;
    print_config(&config);

    let client = GraphqlClient::new(
        config.graphql_url.clone(),
        config.api_key.clone(),
        config.timeout,
    )?;
    let ctx = MigrationContext::new(config, Arc::new(client));

    let summary = run_migration(&ctx).await?;
    print_stats(&summary.stats);

    match summary.outcome {
        MigrationOutcome::NothingToUpdate => {
            print_success("No scenes to update, exiting...");
        }
        MigrationOutcome::DryRun { worklist } => {
            print_worklist(&worklist);
            print_info("Dry run, no scene was updated");
        }
        MigrationOutcome::Completed { report_path, .. } => {
            if summary.stats.failed > 0 {
                print_warning(&format!(
                    "{} of {} updates failed, see the error column",
                    summary.stats.failed, summary.stats.to_update
                ));
            }
            print_success(&format!(
                "Results are in the {} file",
                report_path.display()
            ));
        }
    }

    Ok(())
}

fn print_config(config: &AppConfig) {
    print_section_header("Configuration");
    print_key_value("GraphQL endpoint", &config.graphql_url);
    print_key_value(
        "API key",
        if config.api_key.as_deref().is_some_and(|k| !k.is_empty()) {
            "set"
        } else {
            "none"
        },
    );
    print_key_value("Plex export", &config.plex_csv.display().to_string());
    let scenes = match &config.scene_source {
        SceneSource::File(path) => path.display().to_string(),
        SceneSource::Live => "live allScenes query".to_string(),
    };
    print_key_value("Stash scenes", &scenes);
    print_key_value("Report", &config.output_path.display().to_string());
    if config.dry_run {
        print_key_value("Mode", "dry run");
    }
    print_section_footer();
}

fn print_stats(stats: &MigrationStats) {
    print_section_header("Summary");
    print_count("Plex rows", stats.plex_records, colors::TEXT);
    print_count("Stash scenes", stats.stash_scenes, colors::TEXT);
    print_count("Matched", stats.matched, colors::OK);
    print_count("Unmatched", stats.unmatched, colors::MUTED);
    print_count("Skipped", stats.skipped, colors::MUTED);
    print_count("To update", stats.to_update, colors::ACCENT);
    if stats.succeeded + stats.failed > 0 {
        print_count("Succeeded", stats.succeeded, colors::OK);
        print_count("Failed", stats.failed, colors::FAIL);
    }
    print_section_footer();
}

fn print_worklist(worklist: &[UpdateCandidate]) {
    let rows: Vec<[&str; 4]> = worklist
        .iter()
        .map(|candidate| {
            [
                candidate.id.as_str(),
                candidate.title.as_str(),
                candidate.views.as_deref().unwrap_or("-"),
                candidate.rating.as_deref().unwrap_or("-"),
            ]
        })
        .collect();
    print_table(["ID", "Title", "Views", "Rating"], &rows);
}
