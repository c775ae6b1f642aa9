use super::{Outcome, SyncContext, SyncReport, Synchronizer, check_batch};
use crate::{
    entity::DataTypeRecord, error::SyncError, finder::Finder, store::EntityStore,
};
use typesync_schema::{model::Model, types::Category};

///
/// DataTypeSynchronizer
/// Simple models: no properties and no relationships.
///

pub struct DataTypeSynchronizer<'a> {
    store: &'a mut dyn EntityStore<DataTypeRecord>,
    ctx: SyncContext<'a>,
}

impl<'a> DataTypeSynchronizer<'a> {
    pub fn new(store: &'a mut dyn EntityStore<DataTypeRecord>, ctx: SyncContext<'a>) -> Self {
        Self { store, ctx }
    }

    fn sync_model(
        &mut self,
        model: &Model,
        snapshot: &[DataTypeRecord],
    ) -> Result<Outcome, SyncError> {
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
        record.icon = model.icon.clone().unwrap_or(defaults.icon);
        record.editor_alias = model
            .editor()
            .map_or(defaults.editor_alias, str::to_string);

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
        let runtime_id = saved.id.ok_or_else(|| SyncError::Unidentified {
            alias: model.alias.clone(),
        })?;

        if let Some(stable_id) = model.stable_id {
            self.ctx.tracker.set_entity(stable_id, runtime_id)?;
        }
        tracing::debug!(alias = %model.alias, %runtime_id, ?outcome, "data type synchronized");

        Ok(outcome)
    }
}

impl Synchronizer for DataTypeSynchronizer<'_> {
    fn category(&self) -> Category {
        Category::DataType
    }

    #[tracing::instrument(name = "typesync.sync", skip_all, fields(category = %Category::DataType))]
    fn run(&mut self, models: &[Model]) -> Result<SyncReport, SyncError> {
        check_batch(Category::DataType, models)?;

        let snapshot = self.store.get_all()?;
        let mut report = SyncReport::new(Category::DataType);
        for model in models {
            let outcome = self.sync_model(model, &snapshot)?;
            report.record(outcome, &model.alias);
        }

        tracing::info!(
            created = report.created.len(),
            updated = report.updated.len(),
            "data types synchronized"
        );

        Ok(report)
    }
}
