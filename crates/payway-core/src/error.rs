use crate::taxonomy::{ErrorCategory, GatewayError};

/// Result alias for operations that can fail terminally
pub type Result<T> = std::result::Result<T, PaywayError>;

/// Terminal gateway failure
///
/// Carries the documented code (a catalog token such as `S9992`, a client
/// credential code, or an HTTP status rendered as a string) and a
/// human-readable message. Displays as `"{code}: {message}"`, which is the
/// form expected in logs. Documented field-validation problems are not
/// errors; they come back as data via
/// [`Classification::Validation`](crate::classify::Classification).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{code}: {message}")]
pub struct PaywayError {
    code: String,
    message: String,
}

impl PaywayError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Build from a documented catalog code, carrying its canonical message
    pub fn from_catalog(code: &str) -> Self {
        GatewayError::from_code(code).map_or_else(
            || Self::new(code.to_owned(), "Undocumented error code".to_owned()),
            Self::from,
        )
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Composed `"{code}: {message}"` form
    pub fn description(&self) -> String {
        self.to_string()
    }
}

impl From<GatewayError> for PaywayError {
    fn from(err: GatewayError) -> Self {
        Self::new(err.code(), err.message())
    }
}

// SDK-side transport conditions map onto the documented Response codes so
// every failure the caller sees carries a catalog code.
impl From<reqwest::Error> for PaywayError {
    fn from(err: reqwest::Error) -> Self {
        let code = if err.is_connect() || err.is_timeout() {
            "S9992"
        } else if err.is_decode() {
            "S9995"
        } else {
            "S9990"
        };
        let base = Self::from_catalog(code);
        Self::new(base.code, format!("{} ({err})", base.message))
    }
}

/// A category error was constructed with a code outside that category's table
///
/// Programmer misuse caught at construction time; a live response cannot
/// trigger this.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {category} error code: {code}")]
pub struct UnknownCode {
    category: ErrorCategory,
    code: String,
}

impl UnknownCode {
    pub(crate) fn new(category: ErrorCategory, code: &str) -> Self {
        Self {
            category,
            code: code.to_owned(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        self.category
    }

    pub fn code(&self) -> &str {
        &self.code
    }
}
