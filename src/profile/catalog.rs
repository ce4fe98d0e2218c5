use serde::Serialize;

use super::entities::SelectedField;
use crate::ontology::{store::OntologyStore, value_objects::Iri};

/// Namespace of the fields offered when no ontology is loaded.
pub const BUILTIN_NAMESPACE: &str = "urn:profile-builder:field#";

const BUILTIN_FIELDS: [(&str, &str); 3] = [
    ("TextField", "Text Field"),
    ("NumberField", "Number Field"),
    ("DateField", "Date Field"),
];

/// Where an available field comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldSource {
    /// An `owl:Class` declared in the loaded ontology.
    Declared,
    Builtin,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AvailableField {
    #[serde(flatten)]
    pub field: SelectedField,
    pub source: FieldSource,
}

/// The fixed field list.
#[must_use]
pub fn builtin_fields() -> Vec<SelectedField> {
    BUILTIN_FIELDS
        .iter()
        .filter_map(|(name, label)| {
            Iri::new(format!("{BUILTIN_NAMESPACE}{name}"))
                .ok()
                .map(|iri| SelectedField::with_label(iri, *label))
        })
        .collect()
}

/// Fields a user may pick from: the declared classes of the loaded ontology,
/// or the builtin list when nothing is loaded.
#[must_use]
pub fn available_fields(store: &OntologyStore, sort_by_label: bool) -> Vec<AvailableField> {
    let classes = store.classes(sort_by_label);
    if classes.is_empty() {
        return builtin_fields()
            .into_iter()
            .map(|field| AvailableField {
                field,
                source: FieldSource::Builtin,
            })
            .collect();
    }
    classes
        .into_iter()
        .map(|node| AvailableField {
            field: SelectedField::from(node),
            source: FieldSource::Declared,
        })
        .collect()
}

/// Resolves user input to a field: an exact IRI, else a unique label match
/// among the available fields.
#[must_use]
pub fn resolve<'a>(available: &'a [AvailableField], input: &str) -> Option<&'a SelectedField> {
    if let Some(found) = available.iter().find(|a| a.field.iri.as_str() == input) {
        return Some(&found.field);
    }
    let mut matches = available
        .iter()
        .filter(|a| a.field.label == input || a.field.iri.label() == input);
    let first = matches.next()?;
    if matches.next().is_some() {
        return None;
    }
    Some(&first.field)
}
