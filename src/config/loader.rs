//! Layered settings loading.
//!
//! Sources, later ones winning: `default.toml`, `<environment>.toml`,
//! `local.toml`, then `FLICKSTREAM_*` variables with `__` between nested
//! keys (`FLICKSTREAM_CACHE__METADATA_TTL_HOURS=48`). Setting
//! `FLICKSTREAM_CONFIG_FILE` replaces the three files with that one file.

use std::path::PathBuf;

use config::{Config, File, FileFormat, Map};

use crate::config::environment::Environment;
use crate::config::error::ConfigError;
use crate::config::settings::Settings;

const PREFIX: &str = "FLICKSTREAM";
const DIR_VAR: &str = "FLICKSTREAM_CONFIG_DIR";
const FILE_VAR: &str = "FLICKSTREAM_CONFIG_FILE";
const DEFAULT_DIR: &str = "config";

/// Keys whose variable value is a comma-separated list.
const LIST_KEYS: &[&str] = &["tmdb.streaming_services"];

#[derive(Debug, Clone, PartialEq, Eq)]
enum Files {
    /// `default.toml` plus the optional environment and local layers.
    Layered(PathBuf),
    Single(PathBuf),
}

/// Resolves where settings come from, then merges and validates them.
///
/// The variable set is captured once at construction, so loading never
/// rereads the process environment.
pub struct ConfigLoader {
    files: Files,
    environment: Environment,
    vars: Map<String, String>,
}

impl ConfigLoader {
    /// Capture the process environment.
    ///
    /// # Errors
    ///
    /// Fails when `FLICKSTREAM_CONFIG_DIR` and `FLICKSTREAM_CONFIG_FILE` are both set.
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_vars(
            std::env::vars_os()
                .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?))),
        )
    }

    /// Build from an explicit variable set instead of the process environment.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars: Map<String, String> = vars
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .filter(|(_, value): &(String, String)| !value.is_empty())
            .collect();

        let files = match (vars.get(DIR_VAR), vars.get(FILE_VAR)) {
            (Some(_), Some(_)) => {
                return Err(ConfigError::Conflict(format!(
                    "{} and {} are mutually exclusive; set a directory for layered files or a single file",
                    DIR_VAR, FILE_VAR
                )));
            }
            (None, Some(file)) => Files::Single(PathBuf::from(file)),
            (Some(dir), None) => Files::Layered(PathBuf::from(dir)),
            (None, None) => Files::Layered(PathBuf::from(DEFAULT_DIR)),
        };

        let environment = vars
            .get(Environment::ENV_VAR)
            .and_then(|value| value.parse().ok())
            .unwrap_or_default();

        Ok(Self {
            files,
            environment,
            vars,
        })
    }

    /// Read only `path`, skipping the layered files.
    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.files = Files::Single(path.into());
        self
    }

    /// Replace the environment taken from `FLICKSTREAM_APP_ENV`.
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// Merge every source, decode and validate.
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let mut settings: Settings = self
            .merge()?
            .try_deserialize()
            .map_err(|e| ConfigError::Decode(e.to_string()))?;
        settings.application.environment = self.environment;
        settings.validate()?;
        Ok(settings)
    }

    fn merge(&self) -> Result<Config, ConfigError> {
        let mut builder = Config::builder();
        for (path, required) in self.file_layers() {
            if required && !path.is_file() {
                return Err(ConfigError::Missing(path));
            }
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(required));
        }

        let env = LIST_KEYS.iter().fold(
            config::Environment::with_prefix(PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .list_separator(","),
            |env, key| env.with_list_parse_key(key),
        );

        Ok(builder
            .add_source(env.source(Some(self.vars.clone())))
            .build()?)
    }

    /// Files in precedence order, each with whether it must exist.
    fn file_layers(&self) -> Vec<(PathBuf, bool)> {
        match &self.files {
            Files::Single(path) => vec![(path.clone(), true)],
            Files::Layered(dir) => vec![
                (dir.join("default.toml"), true),
                (dir.join(self.environment.config_file_name()), false),
                (dir.join("local.toml"), false),
            ],
        }
    }
}
