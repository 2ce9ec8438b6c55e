use crate::error::{ProcessingError, Result};
use crate::utils::constants::{
    DEFAULT_CONFIG_FILE, DEFAULT_DELIMITER, DEFAULT_FETCH_TIMEOUT_SECS, DEFAULT_SUBSET_SIZE,
    DEFAULT_USER_AGENT, ENV_PREFIX,
};
use ::config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use validator::Validate;

/// Session settings: built-in defaults, then an optional TOML file, then
/// `DATAMAP_*` environment variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Settings {
    /// Leading rows visualized when the user has not chosen a subset size
    #[validate(range(min = 1))]
    pub default_subset_size: usize,

    #[validate(range(min = 1, max = 3600))]
    pub fetch_timeout_secs: u64,

    #[validate(length(min = 1))]
    pub user_agent: String,

    pub delimiter: char,

    /// Memory-map local files instead of buffered reads
    pub use_mmap: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_subset_size: DEFAULT_SUBSET_SIZE,
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            delimiter: DEFAULT_DELIMITER,
            use_mmap: false,
        }
    }
}

impl Settings {
    /// Load settings. An explicit `path` must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(p) => File::from(p).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let settings: Settings = Config::builder()
            .add_source(file)
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;

        settings.check()?;
        Ok(settings)
    }

    /// Validate field ranges and the delimiter
    pub fn check(&self) -> Result<()> {
        self.validate()?;
        if !self.delimiter.is_ascii() {
            return Err(ProcessingError::Config(format!(
                "Delimiter must be a single ASCII character, got: '{}'",
                self.delimiter
            )));
        }
        Ok(())
    }
}
