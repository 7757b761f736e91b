use thiserror::Error;

/// Where a configuration or validation error came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorContext {
    /// Offending key or form field, e.g. `VITE_API_BASE_URL` or `listing.price`
    pub field_path: Option<String>,
    /// What was expected or what was received
    pub details: Option<String>,
    /// Component that raised the error, e.g. `config_loader` or `form_validation`
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field_path(self, path: impl Into<String>) -> Self {
        Self {
            field_path: Some(path.into()),
            ..self
        }
    }

    pub fn with_details(self, details: impl Into<String>) -> Self {
        Self {
            details: Some(details.into()),
            ..self
        }
    }

    pub fn with_source(self, source: impl Into<String>) -> Self {
        Self {
            source: Some(source.into()),
            ..self
        }
    }

    fn is_empty(&self) -> bool {
        self.field_path.is_none() && self.details.is_none() && self.source.is_none()
    }
}

/// Status text used when a code has no standard reason phrase.
pub const UNKNOWN_STATUS_TEXT: &str = "Unknown Status";

/// The three failure categories a front end distinguishes when showing an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCategory {
    Timeout,
    Unreachable,
    Other,
}

/// Unified error type for the SNARE client.
///
/// Transport failures are classified where they happen: a caller never has to
/// inspect message text to tell a timeout from a refused connection.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Request timeout - please check your connection and try again")]
    Timeout,

    #[error("Unable to connect to server - please check if the backend is running")]
    Unreachable,

    #[error("HTTP {status}: {status_text}")]
    HttpStatus { status: u16, status_text: String },

    #[error("{0}")]
    Other(String),

    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    #[error("Validation error: {message}{}", format_context(.context))]
    Validation {
        message: String,
        context: ErrorContext,
    },
}

/// Renders as ` (field: .., details: .., source: ..)`, omitting unset parts.
fn format_context(ctx: &ErrorContext) -> String {
    if ctx.is_empty() {
        return String::new();
    }
    let parts: Vec<String> = [
        ("field", &ctx.field_path),
        ("details", &ctx.details),
        ("source", &ctx.source),
    ]
    .iter()
    .filter_map(|(label, value)| value.as_ref().map(|v| format!("{}: {}", label, v)))
    .collect();
    format!(" ({})", parts.join(", "))
}

impl Error {
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Create a new validation error with structured context
    pub fn validation_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Validation {
            message: msg.into(),
            context,
        }
    }

    /// Create a new configuration error with structured context
    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    /// Build the status error for a non-success response.
    pub fn from_status(status: reqwest::StatusCode) -> Self {
        Error::HttpStatus {
            status: status.as_u16(),
            status_text: status
                .canonical_reason()
                .unwrap_or(UNKNOWN_STATUS_TEXT)
                .to_string(),
        }
    }

    /// Which of the user-facing categories this error falls into.
    pub fn category(&self) -> FailureCategory {
        match self {
            Error::Timeout => FailureCategory::Timeout,
            Error::Unreachable => FailureCategory::Unreachable,
            _ => FailureCategory::Other,
        }
    }

    /// Extract error context if available
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::Configuration { context, .. } | Error::Validation { context, .. } => {
                Some(context)
            }
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Other(e.to_string())
    }
}
