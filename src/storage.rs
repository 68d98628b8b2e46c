//! Durable pipeline artifacts.
//!
//! The fitted pipeline and its preprocessing stage are written as bincode snapshots to
//! two fixed paths. Each write goes to a uniquely named temp file in the target
//! directory and is renamed into place, so neither a crash nor a concurrent save can
//! leave a truncated artifact behind. Saves through clones of one store are serialized
//! so the two files always come from the same pipeline.

use crate::pipeline::{Pipeline, Preprocessor};
use parking_lot::Mutex;
use serde::{de::DeserializeOwned, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::debug;

/// Default artifact file for the full pipeline.
pub const MODEL_FILE: &str = "truvalue_model.pkl";

/// Default artifact file for the preprocessing stage alone.
pub const PREPROCESSOR_FILE: &str = "preprocessor.pkl";

/// Artifact persistence errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] bincode::Error),
}

impl StorageError {
    fn io(path: &Path) -> impl FnOnce(std::io::Error) -> StorageError + '_ {
        move |source| StorageError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Locations of the two persisted artifacts.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    model_path: PathBuf,
    preprocessor_path: PathBuf,
    save_lock: Arc<Mutex<()>>,
}

impl Default for ArtifactStore {
    fn default() -> Self {
        Self::new(MODEL_FILE, PREPROCESSOR_FILE)
    }
}

impl ArtifactStore {
    pub fn new(model_path: impl Into<PathBuf>, preprocessor_path: impl Into<PathBuf>) -> Self {
        Self {
            model_path: model_path.into(),
            preprocessor_path: preprocessor_path.into(),
            save_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Store both artifacts under `dir` with their default file names.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(MODEL_FILE), dir.join(PREPROCESSOR_FILE))
    }

    pub fn model_path(&self) -> &Path {
        &self.model_path
    }

    pub fn preprocessor_path(&self) -> &Path {
        &self.preprocessor_path
    }

    /// Overwrite both artifacts with `pipeline`.
    pub fn save(&self, pipeline: &Pipeline) -> Result<(), StorageError> {
        let _guard = self.save_lock.lock();
        write_atomic(&self.model_path, pipeline)?;
        write_atomic(&self.preprocessor_path, pipeline.preprocessor())?;
        debug!(
            "Saved pipeline to {} and preprocessor to {}",
            self.model_path.display(),
            self.preprocessor_path.display()
        );
        Ok(())
    }

    pub fn load_pipeline(&self) -> Result<Pipeline, StorageError> {
        read(&self.model_path)
    }

    pub fn load_preprocessor(&self) -> Result<Preprocessor, StorageError> {
        read(&self.preprocessor_path)
    }
}

fn write_atomic<T: Serialize>(path: &Path, value: &T) -> Result<(), StorageError> {
    let dir = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => parent,
        None => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(StorageError::io(dir))?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(StorageError::io(dir))?;
    let tmp_path = tmp.path().to_path_buf();
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        bincode::serialize_into(&mut writer, value)?;
        writer.flush().map_err(StorageError::io(&tmp_path))?;
    }

    tmp.persist(path).map_err(|e| StorageError::Io {
        path: path.to_path_buf(),
        source: e.error,
    })?;
    Ok(())
}

fn read<T: DeserializeOwned>(path: &Path) -> Result<T, StorageError> {
    let file = File::open(path).map_err(StorageError::io(path))?;
    Ok(bincode::deserialize_from(BufReader::new(file))?)
}
