use std::collections::HashMap;

use oxrdf::{BlankNode, Literal, NamedNodeRef, Term, Triple};

use super::value_objects::Iri;

/// Subject position of a [`Statement`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Subject {
    Iri(Iri),
    Blank(BlankNode),
}

impl Subject {
    #[must_use]
    pub fn as_iri(&self) -> Option<&Iri> {
        match self {
            Self::Iri(iri) => Some(iri),
            Self::Blank(_) => None,
        }
    }
}

/// Object position of a [`Statement`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Object {
    Iri(Iri),
    Blank(BlankNode),
    Literal(Literal),
}

impl Object {
    #[must_use]
    pub fn as_iri(&self) -> Option<&Iri> {
        match self {
            Self::Iri(iri) => Some(iri),
            Self::Blank(_) | Self::Literal(_) => None,
        }
    }
}

impl From<Iri> for Object {
    fn from(iri: Iri) -> Self {
        Self::Iri(iri)
    }
}

/// A parsed RDF triple.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Statement {
    pub subject: Subject,
    pub predicate: Iri,
    pub object: Object,
}

impl Statement {
    /// Converts a parser triple, dropping quoted-triple terms which the
    /// extractor never reads.
    pub(crate) fn from_triple(triple: Triple) -> Option<Self> {
        let subject = match Term::from(triple.subject) {
            Term::NamedNode(node) => Subject::Iri(node.into()),
            Term::BlankNode(node) => Subject::Blank(node),
            #[allow(unreachable_patterns)]
            _ => return None,
        };
        let object = match triple.object {
            Term::NamedNode(node) => Object::Iri(node.into()),
            Term::BlankNode(node) => Object::Blank(node),
            Term::Literal(literal) => Object::Literal(literal),
            #[allow(unreachable_patterns)]
            _ => return None,
        };
        Some(Self {
            subject,
            predicate: triple.predicate.into(),
            object,
        })
    }
}

/// Statements in document order with a predicate index.
///
/// Every query returns matches in the order the statements were inserted.
#[derive(Clone, Debug, Default)]
pub struct StatementIndex {
    statements: Vec<Statement>,
    by_predicate: HashMap<String, Vec<usize>>,
}

impl StatementIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, statement: Statement) {
        let position = self.statements.len();
        self.by_predicate
            .entry(statement.predicate.as_str().to_owned())
            .or_default()
            .push(position);
        self.statements.push(statement);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Statement> {
        self.statements.iter()
    }

    /// Returns statements matching `(subject, predicate, object)`, where `None`
    /// matches anything.
    pub fn matching<'a>(
        &'a self,
        subject: Option<&'a Subject>,
        predicate: Option<NamedNodeRef<'a>>,
        object: Option<&'a Object>,
    ) -> Box<dyn Iterator<Item = &'a Statement> + 'a> {
        let accepts = move |statement: &&'a Statement| {
            subject.map_or(true, |s| statement.subject == *s)
                && object.map_or(true, |o| statement.object == *o)
        };
        match predicate {
            Some(predicate) => {
                let positions = self
                    .by_predicate
                    .get(predicate.as_str())
                    .map_or(&[][..], Vec::as_slice);
                Box::new(
                    positions
                        .iter()
                        .map(move |position| &self.statements[*position])
                        .filter(accepts),
                )
            }
            None => Box::new(self.statements.iter().filter(accepts)),
        }
    }
}

impl Extend<Statement> for StatementIndex {
    fn extend<T: IntoIterator<Item = Statement>>(&mut self, iter: T) {
        for statement in iter {
            self.insert(statement);
        }
    }
}

impl FromIterator<Statement> for StatementIndex {
    fn from_iter<T: IntoIterator<Item = Statement>>(iter: T) -> Self {
        let mut index = Self::new();
        index.extend(iter);
        index
    }
}
