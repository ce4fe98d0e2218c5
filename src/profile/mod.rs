//! Profiles: selected classes, the subset documents generated from them, and
//! the ways a saved profile leaves the process (file, local store, HTTP).

use std::path::PathBuf;

pub mod catalog;
pub mod entities;
pub mod export;
pub mod selection;
pub mod service;
pub mod storage;
pub mod submit;
pub mod subset;

pub use entities::{Profile, SelectedField};
pub use selection::SelectionSet;
pub use service::{ProfileService, SavedProfile};
pub use storage::{ProfileRecord, ProfileStore};
pub use submit::{ProfilePayload, ProfileSubmitter, SubmissionReceipt};
pub use subset::{generate, ClassEntry, ProfileSubsetDocument};

/// Errors raised while saving or sending a profile.
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("profile name must not be empty")]
    EmptyName,
    #[error("cannot serialize profile subset: {0}")]
    Serialize(String),
    #[error("cannot write `{path}`: {source}")]
    Export {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("profile store `{path}`: {reason}")]
    Store { path: PathBuf, reason: String },
    #[error("profile submission failed: {0}")]
    Submit(String),
}
