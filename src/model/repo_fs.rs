//! Filesystem loader for classifier artefacts.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::common::config::AppCfg;
use crate::common::error::ModelError;

use super::domain::LogisticModel;

/// Reads the artefact at `cfg.model_path`.
pub struct FsModelRepo {
    path: PathBuf,
}

impl FsModelRepo {
    pub fn new(cfg: &AppCfg) -> Self {
        Self::at(&cfg.model_path)
    }

    pub fn at(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read, parse and validate the artefact.
    pub fn load(&self) -> Result<LogisticModel, ModelError> {
        let raw = fs::read_to_string(&self.path).map_err(|source| ModelError::Io {
            path: self.path.display().to_string(),
            source,
        })?;
        let model: LogisticModel = serde_json::from_str(&raw)?;
        model.validate()?;
        info!(
            model = %model.name,
            path = %self.path.display(),
            threshold = model.threshold,
            "classifier loaded"
        );
        Ok(model)
    }
}
