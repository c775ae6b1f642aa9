//! Once-per-process synchronization entry point.
//!
//! The host calls `Startup::run` while it boots, before serving requests.
//! The first call runs every configured category; later calls on the same
//! `Startup` are no-ops.

use crate::{
    config::{ConfigError, FailurePolicy, TypesyncConfig},
    core::{
        editor::EditorMapping,
        error::{ErrorClass, SyncError, TrackingError},
        factory::SyncRunner,
        store::SyncBackend,
        sync::SyncReport,
        tracking::{IdentityTracker, JsonFileTracker, MemoryTracker},
    },
    schema::{registry::TypeRegistry, types::Category},
};
use std::sync::OnceLock;
use thiserror::Error as ThisError;

///
/// StartupError
///

#[derive(Debug, ThisError)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Tracking(#[from] TrackingError),

    #[error("synchronization failed{}: {source}", for_category(.category))]
    Sync {
        category: Option<Category>,
        #[source]
        source: SyncError,
    },
}

fn for_category(category: &Option<Category>) -> String {
    category.map(|c| format!(" for {c}")).unwrap_or_default()
}

///
/// CategoryFailure
/// A failure logged and skipped under `FailurePolicy::Log`.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CategoryFailure {
    /// `None` when the run failed before any category started.
    pub category: Option<Category>,
    pub class: ErrorClass,
    pub message: String,
}

///
/// StartupReport
///

#[derive(Clone, Debug, Default)]
pub struct StartupReport {
    /// `true` when an earlier call already ran.
    pub skipped: bool,
    pub reports: Vec<SyncReport>,
    pub failures: Vec<CategoryFailure>,
}

impl StartupReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

///
/// Startup
///

#[derive(Debug)]
pub struct Startup {
    config: TypesyncConfig,
    ran: OnceLock<()>,
}

impl Startup {
    #[must_use]
    pub const fn new(config: TypesyncConfig) -> Self {
        Self {
            config,
            ran: OnceLock::new(),
        }
    }

    #[must_use]
    pub const fn config(&self) -> &TypesyncConfig {
        &self.config
    }

    #[must_use]
    pub fn has_run(&self) -> bool {
        self.ran.get().is_some()
    }

    /// Run every configured category against `backend`, once.
    #[tracing::instrument(name = "typesync.startup", skip_all)]
    pub fn run(
        &self,
        registry: &TypeRegistry,
        backend: &mut dyn SyncBackend,
        editors: &dyn EditorMapping,
    ) -> Result<StartupReport, StartupError> {
        if self.has_run() {
            return Ok(Self::skipped());
        }

        // the guard is set only once the tracker is open
        let mut tracker = self.open_tracker()?;
        if self.ran.set(()).is_err() {
            return Ok(Self::skipped());
        }

        self.run_with(registry, backend, tracker.as_mut(), editors)
    }

    fn skipped() -> StartupReport {
        tracing::debug!("synchronization already ran, skipping");

        StartupReport {
            skipped: true,
            ..StartupReport::default()
        }
    }

    fn open_tracker(&self) -> Result<Box<dyn IdentityTracker>, StartupError> {
        match &self.config.tracking_file {
            Some(path) => Ok(Box::new(JsonFileTracker::open(path)?)),
            None => {
                tracing::warn!("no tracking file configured, stable ids are tracked in memory only");
                Ok(Box::new(MemoryTracker::new()))
            }
        }
    }

    fn run_with(
        &self,
        registry: &TypeRegistry,
        backend: &mut dyn SyncBackend,
        tracker: &mut dyn IdentityTracker,
        editors: &dyn EditorMapping,
    ) -> Result<StartupReport, StartupError> {
        let policy = self.config.failure_policy;
        let mut report = StartupReport::default();
        let mut runner =
            SyncRunner::new(backend, tracker, editors).with_categories(self.config.selected());

        let batches = match runner.prepare(registry) {
            Ok(batches) => batches,
            Err(err) => {
                fail(policy, None, err, &mut report)?;
                return Ok(report);
            }
        };

        for batch in &batches {
            tracing::info!(category = %batch.category, models = batch.models.len(), "synchronizing");
            match runner.run_batch(batch) {
                Ok(sync_report) => report.reports.push(sync_report),
                Err(err) => fail(policy, Some(batch.category), err, &mut report)?,
            }
        }

        Ok(report)
    }
}

// abort surfaces the error; log records it and lets the run continue
fn fail(
    policy: FailurePolicy,
    category: Option<Category>,
    err: SyncError,
    report: &mut StartupReport,
) -> Result<(), StartupError> {
    match policy {
        FailurePolicy::Abort => Err(StartupError::Sync {
            category,
            source: err,
        }),
        FailurePolicy::Log => {
            tracing::error!(
                category = ?category,
                class = %err.class(),
                error = %err,
                "synchronization failed, continuing"
            );
            report.failures.push(CategoryFailure {
                category,
                class: err.class(),
                message: err.to_string(),
            });

            Ok(())
        }
    }
}
