//! Drives one migration run from loading to the written report.

use anyhow::{Context, Result};
use std::cell::Cell;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

use super::applier::UpdateApplier;
use super::filter::evaluate;
use super::matcher::RecordMatcher;
use super::models::{Outcome, UpdateCandidate};
use super::progress::{ProgressObserver, ProgressReporter};
use super::report::write_report;
use crate::config::{AppConfig, SceneSource};
use crate::plex::{load_export, PlexRecord};
use crate::stash::{fetch_all_scenes, load_scene_file, StashApi, StashScene};

/// Everything a run needs, built once at startup.
pub struct MigrationContext {
    pub config: AppConfig,
    pub api: Arc<dyn StashApi>,
}

impl MigrationContext {
    pub fn new(config: AppConfig, api: Arc<dyn StashApi>) -> Self {
        Self { config, api }
    }
}

/// Stages of a run, in order. A run never moves backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MigrationPhase {
    Idle,
    Loaded,
    Matched,
    Filtered,
    Updating,
    Reporting,
    Done,
}

impl fmt::Display for MigrationPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MigrationPhase::Idle => "idle",
            MigrationPhase::Loaded => "loaded",
            MigrationPhase::Matched => "matched",
            MigrationPhase::Filtered => "filtered",
            MigrationPhase::Updating => "updating",
            MigrationPhase::Reporting => "reporting",
            MigrationPhase::Done => "done",
        };
        f.write_str(name)
    }
}

struct PhaseTracker {
    current: MigrationPhase,
}

impl PhaseTracker {
    fn new() -> Self {
        Self {
            current: MigrationPhase::Idle,
        }
    }

    fn advance(&mut self, next: MigrationPhase) {
        debug_assert!(next > self.current);
        debug!(from = %self.current, to = %next, "Migration phase change");
        self.current = next;
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MigrationStats {
    pub plex_records: usize,
    pub stash_scenes: usize,
    pub matched: usize,
    pub unmatched: usize,
    /// Matched but left out by validation or because nothing changed.
    pub skipped: usize,
    pub to_update: usize,
    pub succeeded: usize,
    pub failed: usize,
}

/// How a run ended.
#[derive(Debug)]
pub enum MigrationOutcome {
    /// No scene needed changing; nothing was written.
    NothingToUpdate,
    /// The worklist was computed but not applied.
    DryRun { worklist: Vec<UpdateCandidate> },
    /// Updates were attempted and the report written.
    Completed {
        report_path: PathBuf,
        outcomes: Vec<Outcome>,
    },
}

#[derive(Debug)]
pub struct MigrationSummary {
    pub stats: MigrationStats,
    pub phase: MigrationPhase,
    pub outcome: MigrationOutcome,
}

/// The update worklist and the counts gathered while building it.
#[derive(Debug, Default)]
pub struct Worklist {
    pub candidates: Vec<UpdateCandidate>,
    pub matched: usize,
    pub skipped: usize,
}

/// Match records to scenes and keep the pairs that need an update.
///
/// `progress` is told about every record visited, matched or not.
pub fn build_worklist(
    records: &[PlexRecord],
    scenes: &[StashScene],
    progress: &dyn ProgressObserver,
) -> Worklist {
    let total = records.len();
    let visited = Cell::new(0usize);
    let matcher = RecordMatcher::new(scenes);

    let mut worklist = Worklist::default();
    let pairs = matcher.matches(records.iter().inspect(|_| {
        visited.set(visited.get() + 1);
        progress.on_progress(visited.get(), total);
    }));

    for pair in pairs {
        worklist.matched += 1;
        match evaluate(&pair) {
            Ok(candidate) => worklist.candidates.push(candidate),
            Err(reason) => {
                debug!(path = %pair.record.path, reason = %reason, "Skipping scene");
                worklist.skipped += 1;
            }
        }
    }

    worklist
}

/// Run the whole migration.
///
/// Loading failures are returned before any mutation is sent. Individual
/// update failures end up in the report instead.
pub async fn run_migration(ctx: &MigrationContext) -> Result<MigrationSummary> {
    let config = &ctx.config;
    let mut phase = PhaseTracker::new();
    let mut stats = MigrationStats::default();

    let records = load_export(&config.plex_csv, config.export_format)
        .with_context(|| format!("Failed to load Plex export {:?}", config.plex_csv))?;
    let scenes = match &config.scene_source {
        SceneSource::File(path) => load_scene_file(path)?,
        SceneSource::Live => fetch_all_scenes(ctx.api.as_ref())
            .await
            .context("Failed to fetch scenes from Stash")?,
    };
    stats.plex_records = records.len();
    stats.stash_scenes = scenes.len();
    info!(
        "Loaded {} Plex rows and {} Stash scenes",
        stats.plex_records, stats.stash_scenes
    );
    phase.advance(MigrationPhase::Loaded);

    let matching_bar =
        ProgressReporter::new("Matching items", records.len(), config.show_progress);
    let worklist = build_worklist(&records, &scenes, &matching_bar);
    matching_bar.finish();
    phase.advance(MigrationPhase::Matched);

    stats.matched = worklist.matched;
    stats.unmatched = stats.plex_records - worklist.matched;
    stats.skipped = worklist.skipped;
    stats.to_update = worklist.candidates.len();
    info!(
        "Found {} scenes to update out of {} total scenes",
        stats.to_update, stats.stash_scenes
    );
    phase.advance(MigrationPhase::Filtered);

    if worklist.candidates.is_empty() {
        return Ok(MigrationSummary {
            stats,
            phase: phase.current,
            outcome: MigrationOutcome::NothingToUpdate,
        });
    }

    if config.dry_run {
        info!("Dry run, no scene will be updated");
        return Ok(MigrationSummary {
            stats,
            phase: phase.current,
            outcome: MigrationOutcome::DryRun {
                worklist: worklist.candidates,
            },
        });
    }

    phase.advance(MigrationPhase::Updating);
    let update_bar = ProgressReporter::new(
        "Updating scenes",
        worklist.candidates.len(),
        config.show_progress,
    );
    let outcomes = UpdateApplier::new(ctx.api.as_ref())
        .apply(&worklist.candidates, &update_bar)
        .await;
    update_bar.finish();

    stats.succeeded = outcomes.iter().filter(|o| o.is_success()).count();
    stats.failed = outcomes.len() - stats.succeeded;

    phase.advance(MigrationPhase::Reporting);
    write_report(&config.output_path, &outcomes)?;
    info!("Report written to {:?}", config.output_path);
    phase.advance(MigrationPhase::Done);

    Ok(MigrationSummary {
        stats,
        phase: phase.current,
        outcome: MigrationOutcome::Completed {
            report_path: config.output_path.clone(),
            outcomes,
        },
    })
}
