use serde::{Deserialize, Serialize};

use super::ProfileError;
use crate::ontology::{hierarchy::ClassNode, value_objects::Iri};

/// A class reference chosen for a profile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedField {
    pub iri: Iri,
    pub label: String,
}

impl SelectedField {
    /// Creates a field whose label is derived from the IRI.
    #[must_use]
    pub fn new(iri: Iri) -> Self {
        let label = iri.label().to_owned();
        Self { iri, label }
    }

    #[must_use]
    pub fn with_label(iri: Iri, label: impl Into<String>) -> Self {
        Self {
            iri,
            label: label.into(),
        }
    }
}

impl From<&ClassNode> for SelectedField {
    fn from(node: &ClassNode) -> Self {
        Self::with_label(node.iri().clone(), node.label())
    }
}

/// A named, ordered set of fields.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UncheckedProfile")]
pub struct Profile {
    name: String,
    fields: Vec<SelectedField>,
}

#[derive(Deserialize)]
struct UncheckedProfile {
    name: String,
    fields: Vec<SelectedField>,
}

impl TryFrom<UncheckedProfile> for Profile {
    type Error = ProfileError;

    fn try_from(raw: UncheckedProfile) -> Result<Self, Self::Error> {
        Self::new(raw.name, raw.fields)
    }
}

impl Profile {
    /// Validates the name and builds the profile.
    ///
    /// # Errors
    ///
    /// [`ProfileError::EmptyName`] when the name is empty or only whitespace.
    pub fn new(name: impl Into<String>, fields: Vec<SelectedField>) -> Result<Self, ProfileError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ProfileError::EmptyName);
        }
        Ok(Self { name, fields })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn fields(&self) -> &[SelectedField] {
        &self.fields
    }
}
