use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    hierarchy::{ClassNode, Hierarchy},
    loader::{parse_turtle, LoadError, OntologyLoader, OntologySource},
    statements::StatementIndex,
};

/// What to do when the class hierarchy contains a cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CyclePolicy {
    /// Keep the ontology; traversals stop at already visited classes.
    #[default]
    Break,
    /// Refuse to load the ontology.
    Reject,
}

/// The loaded ontology: statements plus the class hierarchy derived from them.
#[derive(Clone, Debug, Default)]
pub struct OntologyStore {
    index: StatementIndex,
    hierarchy: Hierarchy,
    loaded_at: Option<DateTime<Utc>>,
}

impl OntologyStore {
    /// A store with nothing loaded.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a store from already parsed statements.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Cycle`] under [`CyclePolicy::Reject`] when the
    /// hierarchy is cyclic.
    pub fn from_index(index: StatementIndex, policy: CyclePolicy) -> Result<Self, LoadError> {
        let hierarchy = Hierarchy::extract(&index);
        if let Some(path) = hierarchy.detect_cycle() {
            match policy {
                CyclePolicy::Reject => return Err(LoadError::Cycle { path }),
                CyclePolicy::Break => {
                    let cycle = LoadError::Cycle { path };
                    tracing::warn!(%cycle, "ontology_cycle_broken");
                }
            }
        }
        Ok(Self {
            index,
            hierarchy,
            loaded_at: Some(Utc::now()),
        })
    }

    /// Parses a single Turtle document into a store.
    ///
    /// # Errors
    ///
    /// Parse failures and rejected cycles.
    pub fn from_turtle(text: &str, base_iri: &str, policy: CyclePolicy) -> Result<Self, LoadError> {
        Self::from_index(parse_turtle(text, base_iri)?, policy)
    }

    /// Loads every source and builds a store from the result.
    ///
    /// # Errors
    ///
    /// Any fetch, parse or cycle failure; no partial store is produced.
    pub async fn load(
        loader: &OntologyLoader,
        sources: &[OntologySource],
        policy: CyclePolicy,
    ) -> Result<Self, LoadError> {
        let index = loader.load(sources).await?;
        let store = Self::from_index(index, policy)?;
        tracing::info!(
            sources = sources.len(),
            statements = store.index.len(),
            classes = store.hierarchy.declared().count(),
            "ontology_loaded"
        );
        Ok(store)
    }

    #[must_use]
    pub fn index(&self) -> &StatementIndex {
        &self.index
    }

    #[must_use]
    pub fn hierarchy(&self) -> &Hierarchy {
        &self.hierarchy
    }

    #[must_use]
    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded_at
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.loaded_at.is_some()
    }

    /// Declared classes offered for selection, in statement order or sorted
    /// by label then IRI.
    #[must_use]
    pub fn classes(&self, sort_by_label: bool) -> Vec<&ClassNode> {
        let mut classes: Vec<_> = self.hierarchy.declared().collect();
        if sort_by_label {
            classes.sort_by(|a, b| a.label().cmp(b.label()).then_with(|| a.iri().cmp(b.iri())));
        }
        classes
    }
}
