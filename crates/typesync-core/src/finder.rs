//! Two-tier identity resolution.
//!
//! A model (or property) carrying a stable id is first matched through the
//! tracked runtime id; when there is no stable id, no tracking entry, or the
//! tracked record is gone, matching falls back to a case-insensitive alias
//! comparison. The same rules apply to whole records and to the property
//! types nested in an already-resolved record; property lookups only see the
//! entries tracked for that record.

use crate::{
    entity::{Identified, RuntimeId},
    error::TrackingError,
    tracking::{IdentityTracker, TrackingScope},
};
use std::collections::HashSet;
use typesync_schema::alias::alias_eq;
use uuid::Uuid;

///
/// Finder
///

#[derive(Clone, Copy)]
pub struct Finder<'t> {
    tracker: &'t dyn IdentityTracker,
    scope: TrackingScope,
}

impl<'t> Finder<'t> {
    #[must_use]
    pub const fn new(tracker: &'t dyn IdentityTracker, scope: TrackingScope) -> Self {
        Self { tracker, scope }
    }

    #[must_use]
    pub const fn entities(tracker: &'t dyn IdentityTracker) -> Self {
        Self::new(tracker, TrackingScope::Entity)
    }

    /// Property types of the record `owner`.
    #[must_use]
    pub const fn properties(tracker: &'t dyn IdentityTracker, owner: RuntimeId) -> Self {
        Self::new(tracker, TrackingScope::Property(owner))
    }

    /// Every record in `haystack` matching `stable_id` / `alias`.
    pub fn find<'h, R: Identified>(
        &self,
        stable_id: Option<Uuid>,
        alias: &str,
        haystack: &'h [R],
    ) -> Result<Vec<&'h R>, TrackingError> {
        if let Some(stable_id) = stable_id
            && let Some(tracked) = self.tracker.lookup(self.scope, stable_id)?
        {
            let matches = by_runtime_id(tracked, haystack);
            if !matches.is_empty() {
                return Ok(matches);
            }
            tracing::debug!(
                scope = %self.scope,
                %stable_id,
                runtime_id = %tracked,
                "tracked record is gone, falling back to alias"
            );
        }

        Ok(haystack
            .iter()
            .filter(|record| alias_eq(record.alias(), alias))
            .collect())
    }

    /// The first match, warning when the haystack is ambiguous.
    pub fn find_one<'h, R: Identified>(
        &self,
        stable_id: Option<Uuid>,
        alias: &str,
        haystack: &'h [R],
    ) -> Result<Option<&'h R>, TrackingError> {
        let matches = self.find(stable_id, alias, haystack)?;
        if matches.len() > 1 {
            tracing::warn!(
                scope = %self.scope,
                alias,
                matches = matches.len(),
                "ambiguous match, using the first"
            );
        }

        Ok(matches.into_iter().next())
    }
}

// records carrying `id`, one per runtime id
fn by_runtime_id<R: Identified>(id: RuntimeId, haystack: &[R]) -> Vec<&R> {
    let mut seen = HashSet::new();

    haystack
        .iter()
        .filter(|record| record.runtime_id() == Some(id))
        .filter(|record| seen.insert(record.runtime_id()))
        .collect()
}
