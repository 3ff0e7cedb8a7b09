//! Error handling for wattscope.
//!
//! Every failure raised by a data-fetch collaborator is classified into a
//! small taxonomy the view states know how to present:
//!
//! | Variant | Presentation | Recoverable |
//! |---------|--------------|-------------|
//! | `HttpStatus` | Full-screen sticky error | Yes, via dismissal |
//! | `NetworkUnreachable` | Full-screen sticky error | Yes, via dismissal |
//! | `Other` | Dismissable transient notification | Yes |
//!
//! No error in this crate is fatal to the process; all of them resolve to
//! recoverable UI states.

use thiserror::Error;

/// Failure raised by a data-fetch collaborator, classified for presentation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The server answered with a non-success HTTP status.
    #[error("server returned HTTP {status}")]
    HttpStatus { status: u16 },

    /// The server could not be reached at all (connect, DNS, timeout).
    #[error("network unreachable")]
    NetworkUnreachable,

    /// Anything else. The message may be absent, in which case the view
    /// state resolves a localized fallback before presenting it.
    #[error("{}", message.as_deref().unwrap_or("request failed"))]
    Other { message: Option<String> },
}

impl ApiError {
    /// Create a generic error carrying the given message text.
    pub fn other(message: impl Into<String>) -> Self {
        ApiError::Other {
            message: Some(message.into()),
        }
    }

    /// The failure's own message text, when it has one.
    pub fn message(&self) -> Option<&str> {
        match self {
            ApiError::Other { message } => message.as_deref(),
            _ => None,
        }
    }
}

/// Classify a reqwest transport error into the [`ApiError`] taxonomy.
///
/// Status errors keep their code so the error screen can show it.
/// Connect, timeout and DNS failures all collapse into
/// [`ApiError::NetworkUnreachable`]; the distinction is not actionable for
/// the user. Everything else keeps its message for the notification queue.
pub fn classify_reqwest_error(err: &reqwest::Error) -> ApiError {
    if let Some(status) = err.status() {
        return ApiError::HttpStatus {
            status: status.as_u16(),
        };
    }
    if err.is_connect() || err.is_timeout() {
        return ApiError::NetworkUnreachable;
    }
    let text = err.to_string().to_lowercase();
    if text.contains("dns") || text.contains("resolve") {
        ApiError::NetworkUnreachable
    } else {
        ApiError::Other {
            message: Some(err.to_string()),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        classify_reqwest_error(&err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_display_includes_code() {
        let err = ApiError::HttpStatus { status: 503 };
        assert_eq!(err.to_string(), "server returned HTTP 503");
    }

    #[test]
    fn test_network_unreachable_display() {
        assert_eq!(
            ApiError::NetworkUnreachable.to_string(),
            "network unreachable"
        );
    }

    #[test]
    fn test_other_with_message_displays_message() {
        let err = ApiError::other("meter point not configured");
        assert_eq!(err.to_string(), "meter point not configured");
        assert_eq!(err.message(), Some("meter point not configured"));
    }

    #[test]
    fn test_other_without_message_has_fallback_display() {
        let err = ApiError::Other { message: None };
        assert_eq!(err.to_string(), "request failed");
        assert_eq!(err.message(), None);
    }

    #[test]
    fn test_http_and_network_errors_have_no_message_text() {
        assert_eq!(ApiError::HttpStatus { status: 404 }.message(), None);
        assert_eq!(ApiError::NetworkUnreachable.message(), None);
    }
}
