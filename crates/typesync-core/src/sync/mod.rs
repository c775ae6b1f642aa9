//! Per-category synchronizers.
//!
//! A run validates the whole batch, takes one snapshot of the category's
//! records and then, model by model in declaration order, resolves or creates
//! the record, copies the declared fields onto it, reconciles its properties,
//! saves it, reads it back and re-tracks it. Composable categories follow up
//! with a whole-batch relationship pass once every record exists.
//!
//! There is no rollback: a failing model aborts the rest of the run, and the
//! models handled before it stay saved and tracked.

mod content_type;
mod data_type;
mod property;
mod relation;

#[cfg(test)]
mod tests;

pub use content_type::ContentTypeSynchronizer;
pub use data_type::DataTypeSynchronizer;
pub use relation::RelationReport;

use crate::{editor::EditorMapping, error::SyncError, tracking::IdentityTracker};
use typesync_schema::{model::Model, types::Category, validate::validate_models};

///
/// Synchronizer
///

pub trait Synchronizer {
    fn category(&self) -> Category;

    /// Reconcile `models` against the store; `models` must all belong to
    /// this synchronizer's category.
    fn run(&mut self, models: &[Model]) -> Result<SyncReport, SyncError>;
}

///
/// SyncContext
/// Collaborators shared by every synchronizer of one run.
///

pub struct SyncContext<'a> {
    pub tracker: &'a mut dyn IdentityTracker,
    pub editors: &'a dyn EditorMapping,
}

impl<'a> SyncContext<'a> {
    pub fn new(tracker: &'a mut dyn IdentityTracker, editors: &'a dyn EditorMapping) -> Self {
        Self { tracker, editors }
    }
}

///
/// SyncReport
///
/// Outcome of one category run. A model is `updated` only when the saved
/// record differs from the snapshot it was resolved from; matched models
/// whose record came out identical are `unchanged` (they are still saved).
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SyncReport {
    pub category: Option<Category>,
    pub created: Vec<String>,
    pub updated: Vec<String>,
    pub unchanged: Vec<String>,
    pub properties_created: usize,
    pub properties_updated: usize,
    pub relations: RelationReport,
}

impl SyncReport {
    #[must_use]
    pub fn new(category: Category) -> Self {
        Self {
            category: Some(category),
            ..Self::default()
        }
    }

    /// Whether the run left every record as it found it.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.created.is_empty()
            && self.updated.is_empty()
            && self.properties_created == 0
            && self.properties_updated == 0
            && self.relations.is_noop()
    }

    /// Number of models the run touched in any way.
    #[must_use]
    pub fn models(&self) -> usize {
        self.created.len() + self.updated.len() + self.unchanged.len()
    }
}

/// Shared run preamble: every model must belong to `category`, then the
/// batch must pass validation before anything is mutated.
pub(crate) fn check_batch(category: Category, models: &[Model]) -> Result<(), SyncError> {
    if let Some(model) = models.iter().find(|m| m.category != category) {
        return Err(SyncError::CategoryMismatch {
            model: model.type_path.to_string(),
            expected: category,
            found: model.category,
        });
    }
    validate_models(models)?;

    Ok(())
}

/// Outcome of reconciling a single model.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Outcome {
    Created,
    Updated,
    Unchanged,
}

impl SyncReport {
    pub(crate) fn record(&mut self, outcome: Outcome, alias: &str) {
        let list = match outcome {
            Outcome::Created => &mut self.created,
            Outcome::Updated => &mut self.updated,
            Outcome::Unchanged => &mut self.unchanged,
        };
        list.push(alias.to_string());
    }
}
