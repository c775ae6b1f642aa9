//! Whole-batch relationship pass for composable categories.
//!
//! Runs after every model of the batch has a record. Each sub-pass takes a
//! fresh snapshot, resolves models to records through the entity finder and
//! skips (without failing) any edge whose endpoint has no record yet; the
//! next run picks it up.

use crate::{
    entity::{AllowedChild, CompositionRef, ContentTypeRecord, RuntimeId},
    error::SyncError,
    finder::Finder,
    store::EntityStore,
    tracking::IdentityTracker,
};
use std::collections::{HashMap, HashSet};
use typesync_schema::{alias::alias_eq, model::Model};

///
/// RelationReport
/// Counts only edges that changed; re-saving an identical relationship is
/// not counted.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RelationReport {
    pub parents_set: usize,
    pub compositions_added: usize,
    pub compositions_removed: usize,
    pub allowed_children_assigned: usize,
    pub skipped_edges: usize,
}

impl RelationReport {
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        self.parents_set == 0
            && self.compositions_added == 0
            && self.compositions_removed == 0
            && self.allowed_children_assigned == 0
    }
}

///
/// Resolver
/// Model-to-record resolution over one snapshot.
///

struct Resolver<'a> {
    finder: Finder<'a>,
    by_path: HashMap<&'static str, &'a Model>,
    snapshot: Vec<ContentTypeRecord>,
}

impl<'a> Resolver<'a> {
    fn new(
        models: &'a [Model],
        tracker: &'a dyn IdentityTracker,
        store: &dyn EntityStore<ContentTypeRecord>,
    ) -> Result<Self, SyncError> {
        Ok(Self {
            finder: Finder::entities(tracker),
            by_path: models.iter().map(|m| (m.type_path, m)).collect(),
            snapshot: store.get_all()?,
        })
    }

    fn record(&self, model: &Model) -> Result<Option<&ContentTypeRecord>, SyncError> {
        Ok(self
            .finder
            .find_one(model.stable_id, &model.alias, &self.snapshot)?)
    }

    fn record_of_path(&self, path: &str) -> Result<Option<&ContentTypeRecord>, SyncError> {
        match self.by_path.get(path) {
            Some(model) => self.record(model),
            None => Ok(None),
        }
    }
}

pub(crate) fn reconcile(
    models: &[Model],
    store: &mut dyn EntityStore<ContentTypeRecord>,
    tracker: &dyn IdentityTracker,
) -> Result<RelationReport, SyncError> {
    let mut report = RelationReport::default();

    inheritance(models, store, tracker, &mut report)?;
    compositions(models, store, tracker, &mut report)?;
    allowed_children(models, store, tracker, &mut report)?;

    Ok(report)
}

// Phase 1: parents; applying one clears every composition
fn inheritance(
    models: &[Model],
    store: &mut dyn EntityStore<ContentTypeRecord>,
    tracker: &dyn IdentityTracker,
    report: &mut RelationReport,
) -> Result<(), SyncError> {
    let resolver = Resolver::new(models, tracker, store)?;

    for model in models {
        let Some(parent_path) = model.hierarchy().and_then(|h| h.parent) else {
            continue;
        };
        let record = resolver.record(model)?;
        let parent_id = resolver.record_of_path(parent_path)?.and_then(|p| p.id);
        let (Some(record), Some(parent_id)) = (record, parent_id) else {
            tracing::warn!(alias = %model.alias, parent = parent_path, "parent not resolvable, skipping");
            report.skipped_edges += 1;
            continue;
        };

        let mut record = record.clone();
        report.compositions_removed += record.compositions.len();
        record.compositions.clear();
        if record.parent != Some(parent_id) {
            record.parent = Some(parent_id);
            report.parents_set += 1;
        }

        store.save(&record)?;
    }

    Ok(())
}

// Phase 2: compositions of parentless models, diffed by alias
fn compositions(
    models: &[Model],
    store: &mut dyn EntityStore<ContentTypeRecord>,
    tracker: &dyn IdentityTracker,
    report: &mut RelationReport,
) -> Result<(), SyncError> {
    let resolver = Resolver::new(models, tracker, store)?;

    for model in models {
        let Some(hierarchy) = model.hierarchy() else {
            continue;
        };
        if hierarchy.parent.is_some() || hierarchy.compositions.is_empty() {
            continue;
        }
        let Some(record) = resolver.record(model)? else {
            report.skipped_edges += hierarchy.compositions.len();
            continue;
        };

        let mut seen = HashSet::new();
        let mut targets = Vec::new();
        for path in &hierarchy.compositions {
            match resolver.record_of_path(path)? {
                Some(target) if target.id.is_some() && target.id != record.id => {
                    if seen.insert(target.id) {
                        targets.push(target);
                    }
                }
                Some(_) => {}
                None => {
                    tracing::warn!(alias = %model.alias, composition = path, "composition not resolvable, skipping");
                    report.skipped_edges += 1;
                }
            }
        }

        let mut record = record.clone();
        let before = record.compositions.len();
        record
            .compositions
            .retain(|c| targets.iter().any(|t| alias_eq(&t.alias, &c.alias)));
        report.compositions_removed += before - record.compositions.len();

        for target in targets {
            if record.compositions.iter().any(|c| alias_eq(&c.alias, &target.alias)) {
                continue;
            }
            if let Some(id) = target.id {
                record.compositions.push(CompositionRef {
                    id,
                    alias: target.alias.clone(),
                });
                report.compositions_added += 1;
            }
        }

        store.save(&record)?;
    }

    Ok(())
}

// Phase 3: allowed children, resolved polymorphically through lineage
fn allowed_children(
    models: &[Model],
    store: &mut dyn EntityStore<ContentTypeRecord>,
    tracker: &dyn IdentityTracker,
    report: &mut RelationReport,
) -> Result<(), SyncError> {
    let resolver = Resolver::new(models, tracker, store)?;

    for model in models {
        let Some(hierarchy) = model.hierarchy() else {
            continue;
        };
        if hierarchy.allowed_children.is_empty() {
            continue;
        }
        let Some(record) = resolver.record(model)? else {
            report.skipped_edges += hierarchy.allowed_children.len();
            continue;
        };

        let mut seen: HashSet<RuntimeId> = HashSet::new();
        let mut children = Vec::new();
        for path in &hierarchy.allowed_children {
            let candidates: Vec<&Model> = models.iter().filter(|m| m.is_assignable_to(path)).collect();
            if candidates.is_empty() {
                tracing::warn!(alias = %model.alias, child = path, "allowed child matches no model, skipping");
                report.skipped_edges += 1;
            }

            for candidate in candidates {
                let Some(child) = resolver.record(candidate)? else {
                    report.skipped_edges += 1;
                    continue;
                };
                let Some(id) = child.id else {
                    report.skipped_edges += 1;
                    continue;
                };
                if seen.insert(id) {
                    children.push(AllowedChild {
                        id,
                        alias: child.alias.clone(),
                        sort_order: i32::try_from(children.len()).unwrap_or(i32::MAX),
                    });
                }
            }
        }

        let mut record = record.clone();
        if record.allowed_children != children {
            record.allowed_children = children;
            report.allowed_children_assigned += 1;
        }
        store.save(&record)?;
    }

    Ok(())
}
