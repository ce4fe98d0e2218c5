//! Build named data profiles from OWL/Turtle ontologies.
//!
//! Ontology documents are parsed into a statement index and a class
//! hierarchy ([`ontology`]); a selection of classes is turned into a
//! self-contained Turtle subset and a JSON projection ([`profile`]). The
//! [`controller`] module exposes the same operations over HTTP and
//! [`cli`] from the command line.

pub mod app;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod controller;
pub mod environment;
mod errors;
pub mod logger;
pub mod ontology;
pub mod profile;
pub mod server;

pub use errors::Error;

/// Application results options list
pub type Result<T, E = Error> = std::result::Result<T, E>;
