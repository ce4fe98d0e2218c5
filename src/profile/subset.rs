//! Self-contained Turtle and JSON projections of a class selection.

use std::collections::{BTreeMap, HashSet};

use oxrdf::TripleRef;
use oxttl::TurtleSerializer;
use serde::Serialize;

use super::{entities::SelectedField, ProfileError};
use crate::ontology::{
    hierarchy::ClassNode,
    statements::Object,
    store::OntologyStore,
    value_objects::Iri,
    vocab::{owl, rdf, rdfs},
};

/// Placeholder value type recorded for every domain property.
pub const PROPERTY_TYPE: &str = "string";

/// JSON view of one emitted class.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ClassEntry {
    #[serde(rename = "type")]
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    pub properties: BTreeMap<String, String>,
}

impl ClassEntry {
    fn new(parent: Option<String>) -> Self {
        Self {
            kind: "Class",
            parent,
            properties: BTreeMap::new(),
        }
    }
}

/// One `owl:Class` declaration, optionally with its `rdfs:subClassOf` parent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassDeclaration {
    pub class: Iri,
    pub parent: Option<Iri>,
}

/// Output of [`generate`]: both projections come from the same traversal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProfileSubsetDocument {
    pub turtle: String,
    pub json: BTreeMap<String, ClassEntry>,
    #[serde(skip)]
    pub declarations: Vec<ClassDeclaration>,
}

/// Builds the subset document for `fields` against the loaded ontology.
///
/// For every selected class, in selection order: the class itself is
/// declared, then its subclasses are walked depth first and each declared as
/// a subclass of the node it was reached from, then properties whose
/// `rdfs:domain` is the selected class are attached to its JSON entry. A
/// class is emitted at most once per call, which also stops traversal on
/// cyclic hierarchies.
///
/// JSON keys are class labels; classes sharing a label share one entry, which
/// keeps the parent of the first class emitted under it and collects the
/// properties of all of them.
///
/// # Errors
///
/// Only when Turtle serialization fails.
pub fn generate(
    store: &OntologyStore,
    fields: &[SelectedField],
) -> Result<ProfileSubsetDocument, ProfileError> {
    let hierarchy = store.hierarchy();
    let mut processed: HashSet<&Iri> = HashSet::new();
    let mut declarations = Vec::new();
    let mut json: BTreeMap<String, ClassEntry> = BTreeMap::new();

    for field in fields {
        let class = &field.iri;
        if processed.insert(class) {
            declarations.push(ClassDeclaration {
                class: class.clone(),
                parent: None,
            });
            json.entry(class.label().to_owned())
                .or_insert_with(|| ClassEntry::new(None));
        }

        let mut worklist: Vec<(&Iri, &ClassNode)> = hierarchy
            .subclasses(class)
            .map(|child| (class, child))
            .collect();
        worklist.reverse();
        while let Some((parent, node)) = worklist.pop() {
            if !processed.insert(node.iri()) {
                continue;
            }
            declarations.push(ClassDeclaration {
                class: node.iri().clone(),
                parent: Some(parent.clone()),
            });
            json.entry(node.label().to_owned())
                .or_insert_with(|| ClassEntry::new(Some(parent.label().to_owned())));
            let children: Vec<_> = hierarchy.subclasses(node.iri()).collect();
            worklist.extend(children.into_iter().rev().map(|child| (node.iri(), child)));
        }

        let entry = json
            .entry(class.label().to_owned())
            .or_insert_with(|| ClassEntry::new(None));
        let domain = Object::Iri(class.clone());
        for statement in store
            .index()
            .matching(None, Some(rdfs::DOMAIN), Some(&domain))
        {
            if let Some(property) = statement.subject.as_iri() {
                entry
                    .properties
                    .insert(property.label().to_owned(), PROPERTY_TYPE.to_owned());
            }
        }
    }

    let turtle = render_turtle(&declarations)?;
    tracing::debug!(
        selected = fields.len(),
        declarations = declarations.len(),
        "profile_subset_generated"
    );
    Ok(ProfileSubsetDocument {
        turtle,
        json,
        declarations,
    })
}

fn render_turtle(declarations: &[ClassDeclaration]) -> Result<String, ProfileError> {
    let serialize = |err: &dyn std::fmt::Display| ProfileError::Serialize(err.to_string());
    let mut serializer = TurtleSerializer::new()
        .with_prefix("owl", owl::NAMESPACE)
        .map_err(|err| serialize(&err))?
        .with_prefix("rdf", rdf::NAMESPACE)
        .map_err(|err| serialize(&err))?
        .with_prefix("rdfs", rdfs::NAMESPACE)
        .map_err(|err| serialize(&err))?
        .for_writer(Vec::new());

    for declaration in declarations {
        let class = declaration.class.as_node();
        serializer
            .serialize_triple(TripleRef::new(class, rdf::TYPE, owl::CLASS))
            .map_err(|err| serialize(&err))?;
        if let Some(parent) = &declaration.parent {
            serializer
                .serialize_triple(TripleRef::new(class, rdfs::SUB_CLASS_OF, parent.as_node()))
                .map_err(|err| serialize(&err))?;
        }
    }

    let bytes = serializer.finish().map_err(|err| serialize(&err))?;
    String::from_utf8(bytes).map_err(|err| serialize(&err))
}
