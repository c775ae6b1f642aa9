use crate::{
    editor::{EditorMapping, EditorRef},
    entity::{ContentTypeRecord, PropertyTypeRecord},
    error::SyncError,
    finder::Finder,
    tracking::IdentityTracker,
};
use typesync_schema::{
    alias::alias_eq,
    model::{Model, PropertyModel},
};

///
/// PropertyCounts
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct PropertyCounts {
    pub created: usize,
    pub updated: usize,
}

/// Reconcile every declared property of `model` onto `record`.
///
/// Matched property types are updated in place, or moved when their group
/// changed; unmatched ones are added. Property types the model no longer
/// declares are left alone. Editor resolution happens per property and a
/// missing mapping aborts the whole model before anything is saved.
pub(crate) fn reconcile(
    model: &Model,
    record: &mut ContentTypeRecord,
    tracker: &dyn IdentityTracker,
    editors: &dyn EditorMapping,
) -> Result<PropertyCounts, SyncError> {
    // a record without a runtime id has no tracked properties yet
    let finder = record.id.map(|owner| Finder::properties(tracker, owner));
    let mut counts = PropertyCounts::default();

    for (index, prop) in model.properties().iter().enumerate() {
        let editor = editors
            .resolve(prop.editor_hint.as_deref(), prop.value_type)
            .map_err(|source| SyncError::NoMappingFound {
                model: model.alias.clone(),
                property: prop.alias.clone(),
                source,
            })?;
        let sort_order = prop
            .sort_order
            .unwrap_or_else(|| i32::try_from(index).unwrap_or(i32::MAX));
        let group = prop.group.as_deref();

        let matched = {
            let haystack: Vec<&PropertyTypeRecord> = record.property_types().collect();
            let found = match finder {
                Some(finder) => finder.find_one(prop.stable_id, &prop.alias, &haystack)?,
                None => haystack.iter().find(|p| alias_eq(&p.alias, &prop.alias)),
            };
            found.map(|p| p.alias.clone())
        };

        match matched {
            Some(current) => {
                let moved = !same_group(record.group_of(&current), group);
                if moved {
                    tracing::debug!(property = %current, ?group, "moving property to group");
                    record.move_property(&current, group);
                }
                if let Some(target) = record.property_mut(&current) {
                    let before = target.clone();
                    apply(target, prop, editor, sort_order);
                    if moved || *target != before {
                        counts.updated += 1;
                    }
                }
            }
            None => {
                let mut created = PropertyTypeRecord::new(prop.alias.clone(), editor.clone());
                apply(&mut created, prop, editor, sort_order);
                record.add_property(group, created);
                counts.created += 1;
            }
        }
    }

    Ok(counts)
}

fn apply(target: &mut PropertyTypeRecord, prop: &PropertyModel, editor: EditorRef, sort_order: i32) {
    target.alias.clone_from(&prop.alias);
    target.name.clone_from(&prop.name);
    target.description.clone_from(&prop.description);
    target.mandatory = prop.mandatory;
    target.validation_pattern.clone_from(&prop.validation_pattern);
    target.sort_order = sort_order;
    target.editor = editor;
    target.default_value.clone_from(&prop.default_value);
}

// `current` comes from `ContentTypeRecord::group_of` on a present property
fn same_group(current: Option<Option<&str>>, wanted: Option<&str>) -> bool {
    match (current.flatten(), wanted) {
        (None, None) => true,
        (Some(a), Some(b)) => a.eq_ignore_ascii_case(b),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_comparison_ignores_case() {
        assert!(same_group(Some(Some("SEO")), Some("seo")));
        assert!(same_group(Some(None), None));
        assert!(!same_group(Some(Some("Content")), None));
        assert!(!same_group(Some(None), Some("Content")));
    }
}
