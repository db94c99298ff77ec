//! Plex to Stash play count and rating migration.
//!
//! Pipeline, leaves first:
//! - `matcher`: joins export rows to scenes by path
//! - `filter`: validates values and drops pairs that change nothing
//! - `applier`: sends one `sceneUpdate` per candidate, sequentially
//! - `report`: writes the per-scene outcomes to CSV
//! - `runner`: ties the stages together for one run

mod applier;
mod filter;
mod matcher;
mod models;
pub mod progress;
mod report;
mod runner;

pub use applier::{mutation_for, UpdateApplier};
pub use filter::{evaluate, parse_score, SkipReason, MAX_SCORE, MIN_SCORE, RATING_SCALE};
pub use matcher::{Matches, RecordMatcher};
pub use models::{MatchedPair, Outcome, UpdateCandidate};
pub use progress::{NoProgress, ProgressObserver, ProgressReporter};
pub use report::{read_report, write_report, ReportError, DEFAULT_REPORT_FILE, REPORT_HEADER};
pub use runner::{
    build_worklist, run_migration, MigrationContext, MigrationOutcome, MigrationPhase,
    MigrationStats, MigrationSummary, Worklist,
};
