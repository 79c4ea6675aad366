use thiserror::Error;

/// Engine errors
#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Formatting(#[from] FormattingError),

    #[error("RRule export error: {0}")]
    RRuleError(#[from] rrule::RRuleError),

    #[error("Export error: {0}")]
    ExportError(String),
}

pub type EngineResult<T> = std::result::Result<T, EngineError>;

/// Failure to render a rule or instant for a locale.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormattingError {
    #[error("Unsupported locale: {0}")]
    UnsupportedLocale(String),

    #[error("Localization failed: {0}")]
    Localization(String),
}
