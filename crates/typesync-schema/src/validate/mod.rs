//! Declaration validation.
//!
//! Every check runs to completion and records into one `Conflicts`
//! collector; the batch is rejected only after the whole pass, so a single
//! failure reports every duplicate at once.

mod conflict;


pub use conflict::{ConflictKind, Conflicts, DeclarationConflict, ValidationError};

use crate::{alias::alias_key, model::Model};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Validate one category's batch of models before any mutation happens.
pub fn validate_models(models: &[Model]) -> Result<(), ValidationError> {
    let mut conflicts = Conflicts::new();

    // Phase 1: batch-wide identity.
    check_model_ids(models, &mut conflicts);
    check_model_aliases(models, &mut conflicts);

    // Phase 2: per-model property identity.
    for model in models.iter().filter(|m| m.kind().has_properties()) {
        check_property_ids(model, &mut conflicts);
        check_property_aliases(model, &mut conflicts);
    }

    conflicts.result()
}

/// Stable ids must be unique across every model of a run, whatever the category.
pub fn validate_global_ids<'a>(
    models: impl IntoIterator<Item = &'a Model>,
) -> Result<(), ValidationError> {
    let mut conflicts = Conflicts::new();
    check_model_ids(models, &mut conflicts);

    conflicts.result()
}

fn check_model_ids<'a>(models: impl IntoIterator<Item = &'a Model>, conflicts: &mut Conflicts) {
    let groups = group_by(
        models
            .into_iter()
            .filter_map(|m| m.stable_id.map(|id| (id, m.type_path))),
    );

    for (id, types) in groups {
        conflicts.check(ConflictKind::DuplicateId, id_label(id), None, types);
    }
}

fn check_model_aliases(models: &[Model], conflicts: &mut Conflicts) {
    let groups = group_by(
        models
            .iter()
            .map(|m| (alias_key(&m.alias), (m.alias.as_str(), m.type_path))),
    );

    for (_, entries) in groups {
        let alias = entries[0].0.to_string();
        let types = entries.into_iter().map(|(_, ty)| ty).collect();
        conflicts.check(ConflictKind::DuplicateAlias, alias, None, types);
    }
}

fn check_property_ids(model: &Model, conflicts: &mut Conflicts) {
    let groups = group_by(
        model
            .properties()
            .iter()
            .filter_map(|p| p.stable_id.map(|id| (id, p.member))),
    );

    for (id, members) in groups {
        conflicts.check(
            ConflictKind::DuplicatePropertyId,
            id_label(id),
            Some(model.type_path),
            members,
        );
    }
}

fn check_property_aliases(model: &Model, conflicts: &mut Conflicts) {
    let groups = group_by(
        model
            .properties()
            .iter()
            .map(|p| (alias_key(&p.alias), (p.alias.as_str(), p.member))),
    );

    for (_, entries) in groups {
        let alias = entries[0].0.to_string();
        let members = entries.into_iter().map(|(_, member)| member).collect();
        conflicts.check(
            ConflictKind::DuplicatePropertyAlias,
            alias,
            Some(model.type_path),
            members,
        );
    }
}

// Group values by key; groups keep first-seen order of their members.
fn group_by<K: Ord, V>(entries: impl IntoIterator<Item = (K, V)>) -> BTreeMap<K, Vec<V>> {
    let mut groups: BTreeMap<K, Vec<V>> = BTreeMap::new();
    for (key, value) in entries {
        groups.entry(key).or_default().push(value);
    }

    groups
}

fn id_label(id: Uuid) -> String {
    id.hyphenated().to_string()
}
