//! Category selection and the orchestration entry point.

use crate::{
    editor::EditorMapping,
    error::SyncError,
    store::SyncBackend,
    sync::{ContentTypeSynchronizer, DataTypeSynchronizer, SyncContext, SyncReport, Synchronizer},
    tracking::IdentityTracker,
};
use bitflags::bitflags;
use typesync_schema::{
    model::{Model, build_models},
    registry::TypeRegistry,
    types::Category,
    validate::validate_global_ids,
};

bitflags! {
    ///
    /// SyncCategories
    /// Which categories a run synchronizes.
    ///
    #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
    pub struct SyncCategories: u8 {
        const DATA_TYPES     = 1 << 0;
        const DOCUMENT_TYPES = 1 << 1;
        const MEDIA_TYPES    = 1 << 2;
        const MEMBER_TYPES   = 1 << 3;
    }
}

impl SyncCategories {
    #[must_use]
    pub const fn of(category: Category) -> Self {
        match category {
            Category::DataType => Self::DATA_TYPES,
            Category::DocumentType => Self::DOCUMENT_TYPES,
            Category::MediaType => Self::MEDIA_TYPES,
            Category::MemberType => Self::MEMBER_TYPES,
        }
    }

    /// Selected categories, in run order.
    pub fn categories(self) -> impl Iterator<Item = Category> {
        Category::ALL
            .into_iter()
            .filter(move |c| self.contains(Self::of(*c)))
    }
}

impl Default for SyncCategories {
    fn default() -> Self {
        Self::all()
    }
}

impl FromIterator<Category> for SyncCategories {
    fn from_iter<I: IntoIterator<Item = Category>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::empty(), |acc, c| acc | Self::of(c))
    }
}

///
/// SynchronizerFactory
///

pub struct SynchronizerFactory;

impl SynchronizerFactory {
    /// The synchronizer for `category`, bound to that category's store.
    pub fn create<'a>(
        category: Category,
        backend: &'a mut dyn SyncBackend,
        ctx: SyncContext<'a>,
    ) -> Box<dyn Synchronizer + 'a> {
        match category {
            Category::DataType => Box::new(DataTypeSynchronizer::new(backend.data_types(), ctx)),
            Category::MediaType => Box::new(ContentTypeSynchronizer::new(
                category,
                backend.media_types(),
                ctx,
            )),
            Category::DocumentType => Box::new(ContentTypeSynchronizer::new(
                category,
                backend.document_types(),
                ctx,
            )),
            Category::MemberType => Box::new(ContentTypeSynchronizer::new(
                category,
                backend.member_types(),
                ctx,
            )),
        }
    }
}

///
/// Batch
/// Models of one category, ready to run.
///

#[derive(Clone, Debug)]
pub struct Batch {
    pub category: Category,
    pub models: Vec<Model>,
}

///
/// SyncRunner
///
/// Builds the models of every selected category, checks stable ids across
/// all of them, then runs one synchronizer per category in run order.
///

pub struct SyncRunner<'a> {
    backend: &'a mut dyn SyncBackend,
    tracker: &'a mut dyn IdentityTracker,
    editors: &'a dyn EditorMapping,
    categories: SyncCategories,
}

impl<'a> SyncRunner<'a> {
    pub fn new(
        backend: &'a mut dyn SyncBackend,
        tracker: &'a mut dyn IdentityTracker,
        editors: &'a dyn EditorMapping,
    ) -> Self {
        Self {
            backend,
            tracker,
            editors,
            categories: SyncCategories::all(),
        }
    }

    #[must_use]
    pub const fn with_categories(mut self, categories: SyncCategories) -> Self {
        self.categories = categories;
        self
    }

    #[must_use]
    pub const fn categories(&self) -> SyncCategories {
        self.categories
    }

    /// Build every selected batch and reject stable ids shared across them.
    pub fn prepare(&self, registry: &TypeRegistry) -> Result<Vec<Batch>, SyncError> {
        let batches = self
            .categories
            .categories()
            .map(|category| {
                build_models(registry, category).map(|models| Batch { category, models })
            })
            .collect::<Result<Vec<_>, _>>()?;

        validate_global_ids(batches.iter().flat_map(|b| &b.models))?;

        Ok(batches)
    }

    pub fn run_batch(&mut self, batch: &Batch) -> Result<SyncReport, SyncError> {
        let ctx = SyncContext::new(&mut *self.tracker, self.editors);
        let mut synchronizer = SynchronizerFactory::create(batch.category, &mut *self.backend, ctx);

        synchronizer.run(&batch.models)
    }

    /// Prepare and run every selected category, stopping at the first error.
    pub fn run(&mut self, registry: &TypeRegistry) -> Result<Vec<SyncReport>, SyncError> {
        let batches = self.prepare(registry)?;

        batches.iter().map(|batch| self.run_batch(batch)).collect()
    }
}
