//! Saved profiles kept in a small JSON key-value file.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{
    entities::{Profile, SelectedField},
    ProfileError,
};

/// Key the profile list is stored under.
pub const PROFILES_KEY: &str = "profiles";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub name: String,
    pub fields: Vec<SelectedField>,
    pub saved_at: DateTime<Utc>,
}

impl From<&Profile> for ProfileRecord {
    fn from(profile: &Profile) -> Self {
        Self {
            name: profile.name().to_owned(),
            fields: profile.fields().to_vec(),
            saved_at: Utc::now(),
        }
    }
}

/// Append-only list of [`ProfileRecord`]s.
///
/// Other keys found in the file are preserved on rewrite.
#[derive(Debug)]
pub struct ProfileStore {
    path: PathBuf,
    entries: Map<String, Value>,
    records: Vec<ProfileRecord>,
}

impl ProfileStore {
    /// Opens the store, starting empty when the file does not exist yet.
    ///
    /// # Errors
    ///
    /// When the file exists but cannot be read or decoded.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, ProfileError> {
        let path = path.into();
        let entries = match tokio::fs::read(&path).await {
            Ok(bytes) => {
                serde_json::from_slice::<Map<String, Value>>(&bytes).map_err(|err| {
                    ProfileError::Store {
                        path: path.clone(),
                        reason: err.to_string(),
                    }
                })?
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Map::new(),
            Err(err) => {
                return Err(ProfileError::Store {
                    path,
                    reason: err.to_string(),
                })
            }
        };
        let records = match entries.get(PROFILES_KEY) {
            Some(value) => serde_json::from_value(value.clone()).map_err(|err| {
                ProfileError::Store {
                    path: path.clone(),
                    reason: err.to_string(),
                }
            })?,
            None => Vec::new(),
        };
        Ok(Self {
            path,
            entries,
            records,
        })
    }

    #[must_use]
    pub fn list(&self) -> &[ProfileRecord] {
        &self.records
    }

    /// Most recently saved record with this name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ProfileRecord> {
        self.records.iter().rev().find(|record| record.name == name)
    }

    /// Appends a record and rewrites the file.
    ///
    /// # Errors
    ///
    /// When the file cannot be written; the in-memory list is left unchanged.
    pub async fn append(&mut self, record: ProfileRecord) -> Result<(), ProfileError> {
        let mut records = self.records.clone();
        records.push(record);
        let mut entries = self.entries.clone();
        entries.insert(
            PROFILES_KEY.to_string(),
            serde_json::to_value(&records).map_err(|err| self.store_error(err))?,
        );

        let bytes = serde_json::to_vec_pretty(&entries).map_err(|err| self.store_error(err))?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|err| self.store_error(err))?;
        }
        let staging = self.path.with_extension("json.tmp");
        tokio::fs::write(&staging, bytes)
            .await
            .map_err(|err| self.store_error(err))?;
        tokio::fs::rename(&staging, &self.path)
            .await
            .map_err(|err| self.store_error(err))?;

        self.entries = entries;
        self.records = records;
        Ok(())
    }

    fn store_error(&self, err: impl std::fmt::Display) -> ProfileError {
        ProfileError::Store {
            path: self.path.clone(),
            reason: err.to_string(),
        }
    }
}
