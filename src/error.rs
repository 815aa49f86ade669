use thiserror::Error;

/// Errors raised outside the form core: configuration loading and CLI input.
///
/// Field validation failures never surface here; controllers keep them as
/// per-field messages.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Failed to read config {path}: {source}")]
    ConfigRead {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config YAML: {0}")]
    ConfigParse(#[from] serde_yaml::Error),
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("Invalid month {0}, expected 1-12")]
    InvalidMonth(u32),
    #[error("Year {year} is outside the supported range {min}..={max}")]
    YearOutOfRange { year: i32, min: i32, max: i32 },
    #[error("Serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;
