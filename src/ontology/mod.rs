//! Ontology loading and class extraction.
//!
//! Turtle documents are parsed into a [`StatementIndex`] that answers
//! `(subject, predicate, object)` pattern queries. A [`Hierarchy`] of OWL
//! classes and their `rdfs:subClassOf` edges is derived from the index, and
//! both are owned together by an [`OntologyStore`] which callers pass by
//! reference to whatever needs the loaded ontology.

pub mod hierarchy;
pub mod loader;
pub mod statements;
pub mod store;
pub mod value_objects;
pub mod vocab;

pub use hierarchy::{ClassNode, ClassOrigin, Hierarchy};
pub use loader::{LoadError, OntologyLoader, OntologySource, SourceFetcher, StandardFetcher};
pub use statements::{Object, Statement, StatementIndex, Subject};
pub use store::{CyclePolicy, OntologyStore};
pub use value_objects::{Iri, IriError};
