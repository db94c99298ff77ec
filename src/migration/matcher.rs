//! Joins export rows to Stash scenes by file path.

use std::collections::HashMap;

use super::models::MatchedPair;
use crate::plex::PlexRecord;
use crate::stash::StashScene;

/// Path index over the Stash scene set.
///
/// When several scenes share a path the first one wins.
pub struct RecordMatcher<'a> {
    by_path: HashMap<&'a str, &'a StashScene>,
}

impl<'a> RecordMatcher<'a> {
    pub fn new(scenes: &'a [StashScene]) -> Self {
        let mut by_path = HashMap::with_capacity(scenes.len());
        for scene in scenes {
            by_path.entry(scene.path.as_str()).or_insert(scene);
        }
        Self { by_path }
    }

    pub fn find(&self, path: &str) -> Option<&'a StashScene> {
        self.by_path.get(path).copied()
    }

    /// Lazily pair each record with its scene, dropping records without one.
    ///
    /// The input is consumed in order, so wrapping it (e.g. with `inspect`)
    /// observes every record, matched or not.
    pub fn matches<I>(&self, records: I) -> Matches<'_, 'a, I::IntoIter>
    where
        I: IntoIterator<Item = &'a PlexRecord>,
    {
        Matches {
            matcher: self,
            records: records.into_iter(),
        }
    }
}

pub struct Matches<'m, 'a, I> {
    matcher: &'m RecordMatcher<'a>,
    records: I,
}

impl<'a, I> Iterator for Matches<'_, 'a, I>
where
    I: Iterator<Item = &'a PlexRecord>,
{
    type Item = MatchedPair<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        for record in self.records.by_ref() {
            if let Some(scene) = self.matcher.find(&record.path) {
                return Some(MatchedPair { record, scene });
            }
        }
        None
    }
}
