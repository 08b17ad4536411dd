//! Season/bet API integration.
//!
//! This module wraps the remote betting service behind the [`Gateway`] trait so
//! command handlers only ever see typed results.
//!
//! # Modules
//!
//! - `requester` - HTTP client issuing the GET/POST/DELETE calls
//! - `records` - Typed records deserialized from the API responses
//!
//! # Examples
//!
//! ```no_run
//! let gateway = HttpGateway::new("http://localhost:8080", Duration::from_secs(5))?;
//! let seasons = gateway.get_active_seasons().await?;
//! ```

mod records;
mod requester;

use thiserror::Error;

pub use crate::gateway::records::{Bet, DeleteOutcome, Game, Season, User};
#[cfg(test)]
pub use crate::gateway::requester::MockGateway;
pub use crate::gateway::requester::{BetType, Gateway, HttpGateway};

/// Failures of a gateway call.
///
/// Transport problems, HTTP status failures and malformed bodies are folded
/// into these four kinds so handlers never deal with `reqwest` errors.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Connection refused, DNS failure or timeout.
    #[error("gateway unreachable: {0}")]
    Unreachable(String),
    /// The API rejected the request (4xx).
    #[error("gateway rejected the request with status {status}: {body}")]
    ClientError { status: u16, body: String },
    /// The API failed to process the request (5xx).
    #[error("gateway failed with status {status}: {body}")]
    ServerError { status: u16, body: String },
    /// The response body did not match the expected shape.
    #[error("unexpected gateway response: {0}")]
    Decode(String),
}

impl GatewayError {
    /// Short diagnostic line safe to show to chat users.
    ///
    /// Upstream bodies and transport messages stay in the logs.
    pub fn diagnostic(&self) -> String {
        match self {
            GatewayError::Unreachable(_) => "the betting service is unreachable".to_owned(),
            GatewayError::ClientError { status, .. } => {
                format!("the betting service rejected the request (HTTP {})", status)
            }
            GatewayError::ServerError { status, .. } => {
                format!("the betting service failed (HTTP {})", status)
            }
            GatewayError::Decode(_) => "the betting service sent an unexpected response".to_owned(),
        }
    }

    /// Whether the API answered 404.
    pub fn is_not_found(&self) -> bool {
        matches!(self, GatewayError::ClientError { status: 404, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_hides_body() {
        let error = GatewayError::ServerError {
            status: 500,
            body: "java.lang.NullPointerException at ...".to_owned(),
        };

        assert_eq!(error.diagnostic(), "the betting service failed (HTTP 500)");
        assert!(!error.diagnostic().contains("NullPointer"));
    }

    #[test]
    fn test_is_not_found() {
        let not_found = GatewayError::ClientError {
            status: 404,
            body: String::new(),
        };
        let bad_request = GatewayError::ClientError {
            status: 400,
            body: String::new(),
        };

        assert!(not_found.is_not_found());
        assert!(!bad_request.is_not_found());
        assert!(!GatewayError::Unreachable("timeout".to_owned()).is_not_found());
    }
}
