//! Class declarations and `rdfs:subClassOf` edges recovered from a statement
//! index.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use super::{
    statements::{Object, StatementIndex},
    value_objects::Iri,
    vocab::{owl, rdf, rdfs},
};

/// How a class entered the hierarchy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassOrigin {
    /// An explicit `rdf:type owl:Class` statement exists.
    Declared,
    /// Only seen as an endpoint of a subclass edge.
    Inferred,
}

/// A class and its direct subclasses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassNode {
    iri: Iri,
    label: String,
    origin: ClassOrigin,
    subclasses: Vec<usize>,
}

impl ClassNode {
    fn new(iri: Iri, origin: ClassOrigin) -> Self {
        let label = iri.label().to_owned();
        Self {
            iri,
            label,
            origin,
            subclasses: Vec::new(),
        }
    }

    #[must_use]
    pub fn iri(&self) -> &Iri {
        &self.iri
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn origin(&self) -> ClassOrigin {
        self.origin
    }
}

/// Arena of class nodes indexed by IRI.
#[derive(Clone, Debug, Default)]
pub struct Hierarchy {
    nodes: Vec<ClassNode>,
    positions: HashMap<Iri, usize>,
    declared: Vec<usize>,
}

impl Hierarchy {
    /// Builds the hierarchy from `(?, rdf:type, owl:Class)` and
    /// `(?, rdfs:subClassOf, ?)` statements.
    ///
    /// Blank nodes and literals on either side of an edge are skipped.
    /// Endpoints never declared as classes become [`ClassOrigin::Inferred`]
    /// stubs.
    #[must_use]
    pub fn extract(index: &StatementIndex) -> Self {
        let mut hierarchy = Self::default();

        let class = Object::Iri(owl::CLASS.into());
        for statement in index.matching(None, Some(rdf::TYPE), Some(&class)) {
            let Some(iri) = statement.subject.as_iri() else {
                continue;
            };
            let (position, newly_declared) = hierarchy.ensure(iri, ClassOrigin::Declared);
            if newly_declared {
                hierarchy.declared.push(position);
            }
        }

        let mut edges = HashSet::new();
        for statement in index.matching(None, Some(rdfs::SUB_CLASS_OF), None) {
            let (Some(child), Some(parent)) =
                (statement.subject.as_iri(), statement.object.as_iri())
            else {
                continue;
            };
            let (child, _) = hierarchy.ensure(child, ClassOrigin::Inferred);
            let (parent, _) = hierarchy.ensure(parent, ClassOrigin::Inferred);
            if edges.insert((parent, child)) {
                hierarchy.nodes[parent].subclasses.push(child);
            }
        }

        hierarchy
    }

    /// Returns the node position and whether this call made it `Declared`.
    fn ensure(&mut self, iri: &Iri, origin: ClassOrigin) -> (usize, bool) {
        let declaring = origin == ClassOrigin::Declared;
        if let Some(&position) = self.positions.get(iri) {
            let node = &mut self.nodes[position];
            let upgraded = declaring && node.origin != ClassOrigin::Declared;
            if upgraded {
                node.origin = ClassOrigin::Declared;
            }
            return (position, upgraded);
        }
        let position = self.nodes.len();
        self.nodes.push(ClassNode::new(iri.clone(), origin));
        self.positions.insert(iri.clone(), position);
        (position, declaring)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub fn get(&self, iri: &Iri) -> Option<&ClassNode> {
        self.positions.get(iri).map(|position| &self.nodes[*position])
    }

    /// Every node, declared and inferred, in discovery order.
    pub fn nodes(&self) -> impl Iterator<Item = &ClassNode> {
        self.nodes.iter()
    }

    /// Declared classes in statement order.
    pub fn declared(&self) -> impl Iterator<Item = &ClassNode> {
        self.declared.iter().map(|position| &self.nodes[*position])
    }

    /// Direct subclasses of `iri` in edge order. Empty for unknown classes.
    pub fn subclasses<'a>(&'a self, iri: &Iri) -> impl Iterator<Item = &'a ClassNode> + 'a {
        let children = self
            .positions
            .get(iri)
            .map_or(&[][..], |position| self.nodes[*position].subclasses.as_slice());
        children.iter().map(|position| &self.nodes[*position])
    }

    /// Returns one cycle as a path whose first and last entries are equal,
    /// or `None` for an acyclic hierarchy.
    #[must_use]
    pub fn detect_cycle(&self) -> Option<Vec<Iri>> {
        #[derive(Clone, Copy, PartialEq, Eq)]
        enum Mark {
            Unvisited,
            OnPath,
            Done,
        }

        let mut marks = vec![Mark::Unvisited; self.nodes.len()];
        for root in 0..self.nodes.len() {
            if marks[root] != Mark::Unvisited {
                continue;
            }
            // (node, next child offset)
            let mut stack = vec![(root, 0usize)];
            marks[root] = Mark::OnPath;
            while let Some((node, offset)) = stack.last().copied() {
                let children = &self.nodes[node].subclasses;
                if offset == children.len() {
                    marks[node] = Mark::Done;
                    stack.pop();
                    continue;
                }
                if let Some(top) = stack.last_mut() {
                    top.1 += 1;
                }
                let child = children[offset];
                match marks[child] {
                    Mark::Unvisited => {
                        marks[child] = Mark::OnPath;
                        stack.push((child, 0));
                    }
                    Mark::OnPath => {
                        let start = stack
                            .iter()
                            .position(|(entry, _)| *entry == child)
                            .unwrap_or(0);
                        let mut path: Vec<Iri> = stack[start..]
                            .iter()
                            .map(|(entry, _)| self.nodes[*entry].iri.clone())
                            .collect();
                        path.push(self.nodes[child].iri.clone());
                        return Some(path);
                    }
                    Mark::Done => {}
                }
            }
        }
        None
    }
}
