//! Fetching and parsing Turtle documents into a [`StatementIndex`].

use std::{
    fmt::{self, Display, Formatter},
    path::PathBuf,
    sync::Arc,
    time::Duration,
};

use async_trait::async_trait;
use futures_util::future::try_join_all;
use oxttl::TurtleParser;
use serde::{Deserialize, Serialize};

use super::{
    statements::{Statement, StatementIndex},
    value_objects::Iri,
};

/// Location of a Turtle document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OntologySource {
    Path(PathBuf),
    Url(String),
}

impl From<String> for OntologySource {
    fn from(value: String) -> Self {
        if value.starts_with("http://") || value.starts_with("https://") {
            Self::Url(value)
        } else if let Some(path) = value.strip_prefix("file://") {
            Self::Path(PathBuf::from(path))
        } else {
            Self::Path(PathBuf::from(value))
        }
    }
}

impl From<&str> for OntologySource {
    fn from(value: &str) -> Self {
        Self::from(value.to_owned())
    }
}

impl From<OntologySource> for String {
    fn from(source: OntologySource) -> Self {
        source.to_string()
    }
}

impl Display for OntologySource {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
        }
    }
}

/// Errors raised while loading an ontology.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("cannot read ontology `{source_name}`: {reason}")]
    Fetch { source_name: String, reason: String },
    #[error("ontology `{source_name}` answered with HTTP status {status}")]
    Status { source_name: String, status: u16 },
    #[error("invalid Turtle in `{source_name}`: {reason}")]
    Parse { source_name: String, reason: String },
    #[error("invalid base IRI `{base}`: {reason}")]
    BaseIri { base: String, reason: String },
    #[error("class hierarchy contains a cycle: {}", render_cycle(.path))]
    Cycle { path: Vec<Iri> },
}

fn render_cycle(path: &[Iri]) -> String {
    path.iter()
        .map(Iri::as_str)
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Retrieves the raw text of an [`OntologySource`].
#[async_trait]
pub trait SourceFetcher: Send + Sync {
    async fn fetch(&self, source: &OntologySource) -> Result<String, LoadError>;
}

/// Reads local paths from disk and URLs over HTTP.
#[derive(Clone, Debug)]
pub struct StandardFetcher {
    client: reqwest::Client,
}

impl StandardFetcher {
    pub fn new(timeout: Duration) -> Result<Self, LoadError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| LoadError::Fetch {
                source_name: "http client".to_string(),
                reason: err.to_string(),
            })?;
        Ok(Self { client })
    }
}

#[async_trait]
impl SourceFetcher for StandardFetcher {
    async fn fetch(&self, source: &OntologySource) -> Result<String, LoadError> {
        let fetch_error = |reason: String| LoadError::Fetch {
            source_name: source.to_string(),
            reason,
        };
        match source {
            OntologySource::Path(path) => tokio::fs::read_to_string(path)
                .await
                .map_err(|err| fetch_error(err.to_string())),
            OntologySource::Url(url) => {
                let response = self
                    .client
                    .get(url)
                    .send()
                    .await
                    .map_err(|err| fetch_error(err.to_string()))?;
                let status = response.status();
                if !status.is_success() {
                    return Err(LoadError::Status {
                        source_name: url.clone(),
                        status: status.as_u16(),
                    });
                }
                response
                    .text()
                    .await
                    .map_err(|err| fetch_error(err.to_string()))
            }
        }
    }
}

/// Parses one Turtle document and appends its statements to `index`.
///
/// # Errors
///
/// Fails on the first syntax error or when `base_iri` is not a valid IRI.
pub fn parse_into(
    index: &mut StatementIndex,
    text: &str,
    base_iri: &str,
    source_name: &str,
) -> Result<usize, LoadError> {
    let parser = TurtleParser::new()
        .with_base_iri(base_iri)
        .map_err(|err| LoadError::BaseIri {
            base: base_iri.to_string(),
            reason: err.to_string(),
        })?;
    let before = index.len();
    for triple in parser.for_reader(text.as_bytes()) {
        let triple = triple.map_err(|err| LoadError::Parse {
            source_name: source_name.to_string(),
            reason: err.to_string(),
        })?;
        if let Some(statement) = Statement::from_triple(triple) {
            index.insert(statement);
        }
    }
    Ok(index.len() - before)
}

/// Parses a single Turtle document into a fresh index.
///
/// # Errors
///
/// See [`parse_into`].
pub fn parse_turtle(text: &str, base_iri: &str) -> Result<StatementIndex, LoadError> {
    let mut index = StatementIndex::new();
    parse_into(&mut index, text, base_iri, "<inline>")?;
    Ok(index)
}

/// Fetches every configured source and parses them into one index.
#[derive(Clone)]
pub struct OntologyLoader {
    fetcher: Arc<dyn SourceFetcher>,
    base_iri: String,
}

impl OntologyLoader {
    #[must_use]
    pub fn new(fetcher: Arc<dyn SourceFetcher>, base_iri: impl Into<String>) -> Self {
        Self {
            fetcher,
            base_iri: base_iri.into(),
        }
    }

    /// Loads all sources.
    ///
    /// Fetches run concurrently and are awaited together; nothing is parsed
    /// until every fetch succeeded. Statements keep source order.
    ///
    /// # Errors
    ///
    /// Returns the first fetch or parse failure.
    pub async fn load(&self, sources: &[OntologySource]) -> Result<StatementIndex, LoadError> {
        let texts = try_join_all(sources.iter().map(|source| self.fetcher.fetch(source))).await?;

        let mut index = StatementIndex::new();
        for (source, text) in sources.iter().zip(texts) {
            let name = source.to_string();
            let count = parse_into(&mut index, &text, &self.base_iri, &name)?;
            tracing::debug!(source = %name, statements = count, "ontology_source_parsed");
        }
        Ok(index)
    }
}
