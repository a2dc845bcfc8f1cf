use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{LookupError, StoreError};
use crate::model::Record;

/// Flat json file holding the records of the last successful build.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn new(path: impl Into<PathBuf>) -> Store {
        Store { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replaces the store with `records`.
    ///
    /// The array is written to a sibling temporary file which is renamed over the store
    /// once it is fully on disk, so a failed write never touches the previous store and a
    /// shorter array never leaves bytes of a longer one behind.
    pub fn write(&self, records: &[Record]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| StoreError::CreateDir(parent.to_path_buf(), e))?;
        }

        let temp_path = self.temp_path();
        debug!(path = %temp_path.display(), "writing records to temporary file");
        let file = File::create(&temp_path).map_err(|e| StoreError::Write(temp_path.clone(), e))?;

        if let Err(e) = self.fill_and_replace(file, &temp_path, records) {
            if let Err(cleanup) = fs::remove_file(&temp_path) {
                warn!(
                    path = %temp_path.display(),
                    error = %cleanup,
                    "could not remove temporary file"
                );
            }
            return Err(e);
        }
        info!(path = %self.path.display(), records = records.len(), "successfully wrote store");
        Ok(())
    }

    fn fill_and_replace(
        &self,
        file: File,
        temp_path: &Path,
        records: &[Record],
    ) -> Result<(), StoreError> {
        let write_error = |e: io::Error| StoreError::Write(temp_path.to_path_buf(), e);

        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, records).map_err(StoreError::Serialize)?;
        writer.write_all(b"\n").map_err(write_error)?;
        let file = writer.into_inner().map_err(|e| write_error(e.into_error()))?;
        file.sync_all().map_err(write_error)?;
        drop(file);

        fs::rename(temp_path, &self.path).map_err(|e| StoreError::Replace(self.path.clone(), e))
    }

    /// Reads the whole store into memory.
    pub fn load(&self) -> Result<Vec<Record>, LookupError> {
        debug!(path = %self.path.display(), "opening store");
        let file = File::open(&self.path)
            .map_err(|e| LookupError::StoreUnavailable(self.path.clone(), e))?;
        serde_json::from_reader(BufReader::new(file)).map_err(LookupError::Corrupt)
    }

    /// Scans the store in order and returns the first record with `id`.
    pub fn lookup(&self, id: u32) -> Result<Record, LookupError> {
        self.load()?
            .into_iter()
            .find(|record| record.id == id)
            .ok_or(LookupError::NotFound(id))
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }
}
