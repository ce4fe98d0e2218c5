//! Shared application state and its construction from configuration.

use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use crate::{
    config::Config,
    ontology::{loader::StandardFetcher, store::OntologyStore, OntologyLoader},
    profile::{ProfileService, ProfileStore, ProfileSubmitter},
    Result,
};

/// State handed to every controller.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<Config>,
    pub loader: OntologyLoader,
    /// Replaced wholesale on reload.
    pub ontology: Arc<RwLock<OntologyStore>>,
    pub profiles: Arc<Mutex<ProfileStore>>,
}

impl AppContext {
    /// Builds the context: loads the configured ontology and opens the
    /// profile store.
    ///
    /// An ontology that fails to load is logged and replaced by an empty
    /// store; the builtin fields stay available.
    ///
    /// # Errors
    ///
    /// When the HTTP client or the profile store cannot be set up.
    pub async fn create(config: Config) -> Result<Self> {
        let loader = create_loader(&config)?;
        let ontology = load_or_empty(&config, &loader).await;
        let profiles = ProfileStore::open(&config.profiles.store_path).await?;
        Ok(Self {
            config: Arc::new(config),
            loader,
            ontology: Arc::new(RwLock::new(ontology)),
            profiles: Arc::new(Mutex::new(profiles)),
        })
    }

    /// Builds a context around an already loaded ontology.
    #[must_use]
    pub fn with_ontology(
        config: Config,
        loader: OntologyLoader,
        ontology: OntologyStore,
        profiles: ProfileStore,
    ) -> Self {
        Self {
            config: Arc::new(config),
            loader,
            ontology: Arc::new(RwLock::new(ontology)),
            profiles: Arc::new(Mutex::new(profiles)),
        }
    }
}

/// Loader over the standard file/HTTP fetcher.
///
/// # Errors
///
/// When the HTTP client cannot be built.
pub fn create_loader(config: &Config) -> Result<OntologyLoader> {
    let fetcher = StandardFetcher::new(config.ontology.fetch_timeout())?;
    Ok(OntologyLoader::new(
        Arc::new(fetcher),
        config.ontology.base_iri.clone(),
    ))
}

/// Loads the configured sources, logging failures and falling back to an
/// empty store.
pub async fn load_or_empty(config: &Config, loader: &OntologyLoader) -> OntologyStore {
    match OntologyStore::load(
        loader,
        &config.ontology.sources,
        config.ontology.cycle_policy,
    )
    .await
    {
        Ok(store) => store,
        Err(err) => {
            tracing::error!(err.msg = %err, err.detail = ?err, "ontology_load_error");
            OntologyStore::empty()
        }
    }
}

/// Save/submit service built from configuration.
///
/// # Errors
///
/// When the profile store cannot be opened or the submit client built.
pub async fn create_profile_service(config: &Config) -> Result<ProfileService> {
    let store = ProfileStore::open(&config.profiles.store_path).await?;
    let submitter = config
        .profiles
        .endpoint
        .as_ref()
        .map(|endpoint| ProfileSubmitter::new(endpoint.clone(), config.profiles.request_timeout()))
        .transpose()?;
    Ok(ProfileService::new(
        config.profiles.export_dir.clone(),
        store,
        submitter,
    ))
}
