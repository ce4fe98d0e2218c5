use std::{
    fmt::{self, Display, Formatter},
    path::Path,
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::{config::Config, Result};

pub const DEFAULT_ENVIRONMENT: &str = "development";
pub const ENV_VAR: &str = "PROFILE_BUILDER_ENV";

/// Picks the environment name from the CLI value, then
/// `PROFILE_BUILDER_ENV`, then [`DEFAULT_ENVIRONMENT`].
#[must_use]
pub fn resolve_from_env(cli_value: Option<&str>) -> String {
    cli_value
        .map(ToOwned::to_owned)
        .or_else(|| std::env::var(ENV_VAR).ok())
        .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    #[serde(rename = "production")]
    Production,
    #[serde(rename = "development")]
    Development,
    #[serde(rename = "test")]
    Test,
    Any(String),
}

impl Environment {
    /// Loads `config/<environment>.yaml` from `folder`.
    ///
    /// # Errors
    ///
    /// Missing file, template errors or invalid YAML.
    pub fn load_from_folder(&self, folder: &Path) -> Result<Config> {
        Config::from_folder(self, folder)
    }
}

impl From<String> for Environment {
    fn from(env: String) -> Self {
        Self::from_str(&env).unwrap_or(Self::Any(env))
    }
}

impl FromStr for Environment {
    type Err = &'static str;

    fn from_str(input: &str) -> std::result::Result<Self, Self::Err> {
        match input {
            "production" => Ok(Self::Production),
            "development" => Ok(Self::Development),
            "test" => Ok(Self::Test),
            s => Ok(Self::Any(s.to_string())),
        }
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Production => f.write_str("production"),
            Self::Development => f.write_str("development"),
            Self::Test => f.write_str("test"),
            Self::Any(s) => f.write_str(s),
        }
    }
}
