//! Classifier capability, artefact format and loading.

pub mod domain;
pub mod repo_fs;

pub use domain::{Classifier, LogisticModel, ModelHandle};
pub use repo_fs::FsModelRepo;
