use super::{IdentityTracker, TrackingScope, TrackingTable};
use crate::{entity::RuntimeId, error::TrackingError};
use std::{
    ffi::OsStr,
    fs::{self, File},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};
use uuid::Uuid;

///
/// JsonFileTracker
///
/// Tracking table kept in a JSON file. The file is read once on open and
/// rewritten after every change, so each persist-and-retrack step is durable
/// on its own. Rewrites go to a sibling `.tmp` file that is renamed over the
/// table, so the file on disk is always a complete table.
///

#[derive(Debug)]
pub struct JsonFileTracker {
    path: PathBuf,
    table: TrackingTable,
}

impl JsonFileTracker {
    /// Open `path`, starting empty when the file does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, TrackingError> {
        let path = path.into();
        let table = match fs::read(&path) {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => TrackingTable::default(),
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(err) if err.kind() == ErrorKind::NotFound => TrackingTable::default(),
            Err(err) => return Err(err.into()),
        };

        Ok(Self { path, table })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub const fn table(&self) -> &TrackingTable {
        &self.table
    }

    fn flush(&self) -> Result<(), TrackingError> {
        if let Some(dir) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let bytes = serde_json::to_vec_pretty(&self.table)?;
        let staging = self.staging_path();

        let mut file = File::create(&staging)?;
        file.write_all(&bytes)?;
        file.sync_all()?;
        drop(file);

        fs::rename(&staging, &self.path)?;

        Ok(())
    }

    // `tracking.json` -> `tracking.json.tmp`
    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsStr::to_os_string)
            .unwrap_or_default();
        name.push(".tmp");

        self.path.with_file_name(name)
    }
}

impl IdentityTracker for JsonFileTracker {
    fn lookup(
        &self,
        scope: TrackingScope,
        stable_id: Uuid,
    ) -> Result<Option<RuntimeId>, TrackingError> {
        Ok(self.table.get(scope, stable_id))
    }

    fn set(
        &mut self,
        scope: TrackingScope,
        stable_id: Uuid,
        runtime_id: RuntimeId,
    ) -> Result<(), TrackingError> {
        if self.table.insert(scope, stable_id, runtime_id) {
            self.flush()?;
        }

        Ok(())
    }
}
