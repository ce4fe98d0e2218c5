//! Application configuration.
//!
//! Configuration lives in `config/<environment>.yaml`. Files are rendered as
//! Tera templates before being parsed, so values may read environment
//! variables:
//!
//! ```yaml
//! server:
//!   port: {{ get_env(name="PORT", default="8000") }}
//! ```
use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{Deserialize, Serialize};

use crate::{
    environment::Environment,
    logger::LogFormat,
    ontology::{loader::OntologySource, store::CyclePolicy},
    Error, Result,
};

pub const CONFIG_FOLDER: &str = "config";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub logger: Logger,
    #[serde(default)]
    pub server: Server,
    pub ontology: OntologySettings,
    #[serde(default)]
    pub profiles: ProfileSettings,
}

/// Logger configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Logger {
    #[serde(default = "default_true")]
    pub enable: bool,

    /// A tracing filter directive, e.g. `info` or
    /// `profile_builder=debug,tower_http=info`.
    #[serde(default = "default_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,

    /// Also write logs to rolling files.
    #[serde(default)]
    pub file_appender: Option<FileAppender>,
}

impl Default for Logger {
    fn default() -> Self {
        Self {
            enable: true,
            level: default_level(),
            format: LogFormat::default(),
            file_appender: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FileAppender {
    #[serde(default = "default_true")]
    pub enable: bool,
    #[serde(default = "default_log_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_log_prefix")]
    pub filename_prefix: String,
    #[serde(default)]
    pub rotation: Rotation,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Rotation {
    Minutely,
    Hourly,
    #[default]
    Daily,
    Never,
}

/// HTTP backend binding.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Server {
    #[serde(default = "default_binding")]
    pub binding: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for Server {
    fn default() -> Self {
        Self {
            binding: default_binding(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OntologySettings {
    /// Base IRI for relative references in every source.
    pub base_iri: String,
    /// Turtle documents, local paths or `http(s)` URLs.
    #[serde(default)]
    pub sources: Vec<OntologySource>,
    #[serde(default = "default_true")]
    pub sort_by_label: bool,
    #[serde(default)]
    pub cycle_policy: CyclePolicy,
    #[serde(default = "default_timeout_ms")]
    pub fetch_timeout_ms: u64,
}

impl OntologySettings {
    #[must_use]
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProfileSettings {
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,
    #[serde(default = "default_export_dir")]
    pub export_dir: PathBuf,
    /// Where `submit` posts profile fields. Submission is disabled when unset.
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default = "default_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl Default for ProfileSettings {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            export_dir: default_export_dir(),
            endpoint: None,
            request_timeout_ms: default_timeout_ms(),
        }
    }
}

impl ProfileSettings {
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

fn default_true() -> bool {
    true
}

fn default_level() -> String {
    "info".to_string()
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("logs")
}

fn default_log_prefix() -> String {
    "profile-builder.log".to_string()
}

fn default_binding() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_store_path() -> PathBuf {
    PathBuf::from("data/profiles.json")
}

fn default_export_dir() -> PathBuf {
    PathBuf::from("exports")
}

impl Config {
    /// Loads `config/<env>.yaml` relative to the working directory.
    ///
    /// # Errors
    ///
    /// See [`Config::from_folder`].
    pub fn new(env: &Environment) -> Result<Self> {
        Self::from_folder(env, Path::new(CONFIG_FOLDER))
    }

    /// Loads `<folder>/<env>.yaml`, or `<folder>/<env>.local.yaml` when that
    /// exists.
    ///
    /// # Errors
    ///
    /// Missing file, template errors or invalid YAML.
    pub fn from_folder(env: &Environment, folder: &Path) -> Result<Self> {
        let candidates = [
            folder.join(format!("{env}.local.yaml")),
            folder.join(format!("{env}.yaml")),
        ];
        let selected = candidates
            .iter()
            .find(|path| path.exists())
            .ok_or_else(|| Error::Config {
                path: candidates[1].display().to_string(),
                reason: "file not found".to_string(),
            })?;

        let content = std::fs::read_to_string(selected)?;
        let config = Self::from_yaml_template(&content).map_err(|err| Error::Config {
            path: selected.display().to_string(),
            reason: err.to_string(),
        })?;
        tracing::debug!(path = %selected.display(), "config_loaded");
        Ok(config)
    }

    /// Renders `content` through Tera and parses the result.
    ///
    /// # Errors
    ///
    /// Template or YAML errors.
    pub fn from_yaml_template(content: &str) -> Result<Self> {
        let rendered = render_string(content)?;
        Ok(serde_yaml::from_str(&rendered)?)
    }
}

fn render_string(content: &str) -> Result<String> {
    let mut tera = tera::Tera::default();
    Ok(tera.render_str(content, &tera::Context::new())?)
}
