use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{Competition, DeskError, Result};

/// Durable home of the desk state between invocations.
pub trait SnapshotStore {
    fn load(&self) -> Result<Competition>;
    fn save(&self, competition: &Competition) -> Result<()>;
}

/// Pretty printed JSON file, replaced atomically on every save.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for JsonFileStore {
    fn load(&self) -> Result<Competition> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(DeskError::SnapshotNotFound(self.path.clone()));
            }
            Err(err) => return Err(err.into()),
        };
        Ok(serde_json::from_str(&json)?)
    }

    fn save(&self, competition: &Competition) -> Result<()> {
        write_atomic(&self.path, &serde_json::to_string_pretty(competition)?)?;
        debug!(path = %self.path.display(), "snapshot saved");
        Ok(())
    }
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    let mut file = File::create(&tmp)?;
    file.write_all(contents.as_bytes())?;
    file.sync_all()?;
    drop(file);
    fs::rename(&tmp, path)?;
    if let Some(dir) = path.parent().and_then(|parent| File::open(parent).ok()) {
        // Best effort: not every platform can sync a directory handle.
        let _ = dir.sync_all();
    }
    Ok(())
}

/// Writes the archive copy of a competition to `<archive_dir>/<id>.json`.
pub fn export(competition: &Competition, archive_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(archive_dir)?;
    let path = archive_dir.join(format!("{}.json", competition.id));
    write_atomic(&path, &serde_json::to_string_pretty(&competition.exported())?)?;
    Ok(path)
}
