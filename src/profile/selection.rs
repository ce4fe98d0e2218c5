use super::entities::SelectedField;
use crate::ontology::value_objects::Iri;

/// Insertion ordered fields, unique by IRI.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionSet {
    fields: Vec<SelectedField>,
}

impl SelectionSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the field unless one with the same IRI is present. Returns
    /// whether it was added.
    pub fn add(&mut self, field: SelectedField) -> bool {
        if self.contains(&field.iri) {
            return false;
        }
        self.fields.push(field);
        true
    }

    /// Removes the field with this IRI. Returns whether one was removed.
    pub fn remove(&mut self, iri: &Iri) -> bool {
        let Some(position) = self.fields.iter().position(|field| field.iri == *iri) else {
            return false;
        };
        self.fields.remove(position);
        true
    }

    #[must_use]
    pub fn contains(&self, iri: &Iri) -> bool {
        self.fields.iter().any(|field| field.iri == *iri)
    }

    pub fn clear(&mut self) {
        self.fields.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SelectedField> {
        self.fields.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[SelectedField] {
        &self.fields
    }
}

impl FromIterator<SelectedField> for SelectionSet {
    fn from_iter<T: IntoIterator<Item = SelectedField>>(iter: T) -> Self {
        let mut selection = Self::new();
        for field in iter {
            selection.add(field);
        }
        selection
    }
}

impl From<SelectionSet> for Vec<SelectedField> {
    fn from(selection: SelectionSet) -> Self {
        selection.fields
    }
}
