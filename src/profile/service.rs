use std::path::PathBuf;

use super::{
    entities::Profile,
    export,
    selection::SelectionSet,
    storage::{ProfileRecord, ProfileStore},
    submit::{ProfileSubmitter, SubmissionReceipt},
    subset::{self, ProfileSubsetDocument},
    ProfileError,
};
use crate::ontology::store::OntologyStore;

/// Result of a successful save.
#[derive(Debug)]
pub struct SavedProfile {
    pub profile: Profile,
    pub document: ProfileSubsetDocument,
    pub path: PathBuf,
}

/// Save and submit flow over a selection.
pub struct ProfileService {
    export_dir: PathBuf,
    store: ProfileStore,
    submitter: Option<ProfileSubmitter>,
}

impl ProfileService {
    #[must_use]
    pub fn new(
        export_dir: impl Into<PathBuf>,
        store: ProfileStore,
        submitter: Option<ProfileSubmitter>,
    ) -> Self {
        Self {
            export_dir: export_dir.into(),
            store,
            submitter,
        }
    }

    #[must_use]
    pub fn store(&self) -> &ProfileStore {
        &self.store
    }

    /// Validates the name, generates the subset document, writes
    /// `<name>.ttl` and records the profile.
    ///
    /// # Errors
    ///
    /// [`ProfileError::EmptyName`] before anything is written; export and
    /// store failures afterwards.
    pub async fn save(
        &mut self,
        ontology: &OntologyStore,
        name: &str,
        selection: &SelectionSet,
    ) -> Result<SavedProfile, ProfileError> {
        let profile = Profile::new(name, selection.as_slice().to_vec())?;
        let document = subset::generate(ontology, profile.fields())?;
        let path = export::write_turtle(&self.export_dir, profile.name(), &document).await?;
        self.store.append(ProfileRecord::from(&profile)).await?;
        tracing::info!(
            profile = profile.name(),
            fields = profile.fields().len(),
            "profile_saved"
        );
        Ok(SavedProfile {
            profile,
            document,
            path,
        })
    }

    /// Posts the selection to the configured endpoint. The selection is
    /// untouched whatever the outcome.
    ///
    /// # Errors
    ///
    /// [`ProfileError::Submit`] when no endpoint is configured or the call
    /// fails.
    pub async fn submit(&self, selection: &SelectionSet) -> Result<SubmissionReceipt, ProfileError> {
        let submitter = self
            .submitter
            .as_ref()
            .ok_or_else(|| ProfileError::Submit("no profile endpoint configured".to_string()))?;
        match submitter.submit(selection.as_slice()).await {
            Ok(receipt) => {
                tracing::info!(endpoint = submitter.endpoint(), message = %receipt.message, "profile_submitted");
                Ok(receipt)
            }
            Err(err) => {
                tracing::error!(err.msg = %err, endpoint = submitter.endpoint(), "profile_submit_failed");
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::*;
    use crate::{
        ontology::{store::CyclePolicy, value_objects::Iri},
        profile::entities::SelectedField,
    };

    fn scratch_dir(tag: &str) -> PathBuf {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system clock")
            .as_nanos();
        std::env::temp_dir().join(format!("profile-builder-service-{tag}-{seed}"))
    }

    #[tokio::test]
    async fn empty_name_has_no_side_effects() {
        let dir = scratch_dir("empty-name");
        let store = ProfileStore::open(dir.join("profiles.json")).await.unwrap();
        let mut service = ProfileService::new(dir.join("exports"), store, None);
        let selection: SelectionSet = [SelectedField::new(
            Iri::new("http://example.com/ont#Goods").unwrap(),
        )]
        .into_iter()
        .collect();

        let err = service
            .save(&OntologyStore::empty(), " ", &selection)
            .await
            .expect_err("blank name");
        assert!(matches!(err, ProfileError::EmptyName));
        assert!(!dir.exists());
        assert!(service.store().list().is_empty());
    }

    #[tokio::test]
    async fn submit_without_endpoint_keeps_selection() {
        let dir = scratch_dir("no-endpoint");
        let store = ProfileStore::open(dir.join("profiles.json")).await.unwrap();
        let service = ProfileService::new(dir.join("exports"), store, None);
        let selection: SelectionSet = [SelectedField::new(
            Iri::new("http://example.com/ont#Goods").unwrap(),
        )]
        .into_iter()
        .collect();

        let err = service.submit(&selection).await.expect_err("no endpoint");
        assert!(matches!(err, ProfileError::Submit(_)));
        assert_eq!(selection.len(), 1);
    }

    #[tokio::test]
    async fn save_writes_file_and_record() {
        let dir = scratch_dir("save");
        let ontology = OntologyStore::from_turtle(
            "<#Goods> a <http://www.w3.org/2002/07/owl#Class> .",
            "http://example.com/ont",
            CyclePolicy::Break,
        )
        .unwrap();
        let store = ProfileStore::open(dir.join("profiles.json")).await.unwrap();
        let mut service = ProfileService::new(dir.join("exports"), store, None);
        let selection: SelectionSet = ontology
            .classes(true)
            .into_iter()
            .map(SelectedField::from)
            .collect();

        let saved = service
            .save(&ontology, "Cargo Manifest", &selection)
            .await
            .expect("save");
        assert_eq!(saved.path.file_name().unwrap(), "Cargo_Manifest.ttl");
        assert_eq!(
            std::fs::read_to_string(&saved.path).unwrap(),
            saved.document.turtle
        );
        assert_eq!(service.store().list().len(), 1);

        let _ = std::fs::remove_dir_all(dir);
    }
}
