use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProcessingError>;

#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Failed to fetch {url}: {message}")]
    Fetch { url: String, message: String },

    #[error(
        "Cannot convert '{value}' in column '{column}' (canonical row {row}) to a finite number"
    )]
    Conversion {
        column: String,
        /// Zero-based index into the canonical table, after rows missing a
        /// coordinate were dropped. Not a line number of the input file.
        row: usize,
        value: String,
    },

    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("Parquet write error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Settings error: {0}")]
    Settings(#[from] ::config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ProcessingError {
    /// True for the three terminal load failures a caller is expected to show to the user
    pub fn is_load_failure(&self) -> bool {
        matches!(
            self,
            ProcessingError::Parse(_)
                | ProcessingError::Fetch { .. }
                | ProcessingError::Conversion { .. }
        )
    }
}
