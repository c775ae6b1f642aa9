use super::{
    Outcome, SyncContext, SyncReport, Synchronizer, check_batch,
    property::{self, PropertyCounts},
    relation,
};
use crate::{
    entity::ContentTypeRecord, error::SyncError, finder::Finder, store::EntityStore,
};
use typesync_schema::{model::Model, types::Category};

///
/// ContentTypeSynchronizer
///
/// Content and composable models (member, media and document types). Only
/// composable categories run the relationship pass.
///

pub struct ContentTypeSynchronizer<'a> {
    category: Category,
    store: &'a mut dyn EntityStore<ContentTypeRecord>,
    ctx: SyncContext<'a>,
}

impl<'a> ContentTypeSynchronizer<'a> {
    pub fn new(
        category: Category,
        store: &'a mut dyn EntityStore<ContentTypeRecord>,
        ctx: SyncContext<'a>,
    ) -> Self {
        Self {
            category,
            store,
            ctx,
        }
    }

    fn sync_model(
        &mut self,
        model: &Model,
        snapshot: &[ContentTypeRecord],
    ) -> Result<(Outcome, PropertyCounts), SyncError> {
        let defaults = self.store.create_default();
        let existing = Finder::entities(&*self.ctx.tracker).find_one(
            model.stable_id,
            &model.alias,
            snapshot,
        )?;

        let mut record = existing.cloned().unwrap_or_else(|| defaults.clone());
        record.name.clone_from(&model.name);
        record.alias.clone_from(&model.alias);
        record.description.clone_from(&model.description);
        // unset display fields go back to the platform default
        record.icon = model.icon.clone().unwrap_or(defaults.icon);
        if let Some(hierarchy) = model.hierarchy() {
            record.allowed_as_root = hierarchy.allowed_as_root;
            record.thumbnail = hierarchy.thumbnail.clone().unwrap_or(defaults.thumbnail);
            record.is_container = model.is_container;
        }

        let counts = property::reconcile(model, &mut record, &*self.ctx.tracker, self.ctx.editors)?;

        let outcome = match existing {
            None => Outcome::Created,
            Some(before) if *before == record => Outcome::Unchanged,
            Some(_) => Outcome::Updated,
        };

        self.store.save(&record)?;
        let saved = self
            .store
            .get_by_alias(&model.alias)?
            .ok_or_else(|| SyncError::MissingAfterSave {
                alias: model.alias.clone(),
            })?;
        self.track(model, &saved)?;

        tracing::debug!(
            alias = %model.alias,
            ?outcome,
            properties_created = counts.created,
            properties_updated = counts.updated,
            "content type synchronized"
        );

        Ok((outcome, counts))
    }

    fn track(&mut self, model: &Model, saved: &ContentTypeRecord) -> Result<(), SyncError> {
        let runtime_id = saved.id.ok_or_else(|| SyncError::Unidentified {
            alias: model.alias.clone(),
        })?;
        if let Some(stable_id) = model.stable_id {
            self.ctx.tracker.set_entity(stable_id, runtime_id)?;
        }

        for prop in model.properties() {
            let Some(stable_id) = prop.stable_id else {
                continue;
            };
            let label = format!("{}.{}", model.alias, prop.alias);
            let property = saved
                .property(&prop.alias)
                .ok_or_else(|| SyncError::MissingAfterSave {
                    alias: label.clone(),
                })?;
            let property_id = property
                .id
                .ok_or(SyncError::Unidentified { alias: label })?;

            self.ctx
                .tracker
                .set_property(runtime_id, stable_id, property_id)?;
        }

        Ok(())
    }
}

impl Synchronizer for ContentTypeSynchronizer<'_> {
    fn category(&self) -> Category {
        self.category
    }

    #[tracing::instrument(name = "typesync.sync", skip_all, fields(category = %self.category))]
    fn run(&mut self, models: &[Model]) -> Result<SyncReport, SyncError> {
        check_batch(self.category, models)?;

        let snapshot = self.store.get_all()?;
        let mut report = SyncReport::new(self.category);
        for model in models {
            let (outcome, counts) = self.sync_model(model, &snapshot)?;
            report.record(outcome, &model.alias);
            report.properties_created += counts.created;
            report.properties_updated += counts.updated;
        }

        if self.category.kind().is_composable() {
            report.relations = relation::reconcile(models, &mut *self.store, &*self.ctx.tracker)?;
        }

        tracing::info!(
            created = report.created.len(),
            updated = report.updated.len(),
            properties_created = report.properties_created,
            skipped_edges = report.relations.skipped_edges,
            "content types synchronized"
        );

        Ok(report)
    }
}
