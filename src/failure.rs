use std::fmt;
use std::sync::Arc;

use reqwest::StatusCode;

use crate::payload::{self, Payload};

/// Rejection produced by the HTTP adapter. Carries the original transport error untouched.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("no response received: {0}")]
    Network(#[source] reqwest::Error),
    #[error("request could not be built: {0}")]
    Build(#[source] reqwest::Error),
    #[error("server responded with {status}")]
    Status { status: StatusCode, body: Payload },
    #[error("failed to read response body ({status}): {source}")]
    Body {
        status: StatusCode,
        #[source]
        source: reqwest::Error,
    },
    #[error("session credential unavailable: {0}")]
    Credential(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            TransportError::Build(err)
        } else {
            TransportError::Network(err)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The request never produced a response.
    Network,
    /// The backend answered 401.
    Unauthorized,
    /// A transport-successful body that signals failure itself.
    Application,
    /// Any other status >= 400.
    Server,
    /// Failure on this side before or after the exchange.
    Client,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Network => write!(f, "network"),
            FailureKind::Unauthorized => write!(f, "unauthorized"),
            FailureKind::Application => write!(f, "application"),
            FailureKind::Server => write!(f, "server"),
            FailureKind::Client => write!(f, "client"),
        }
    }
}

/// A 401 is unauthorized whether or not its body could be read.
fn status_kind(status: StatusCode, otherwise: FailureKind) -> FailureKind {
    if status == StatusCode::UNAUTHORIZED {
        FailureKind::Unauthorized
    } else {
        otherwise
    }
}

/// Normalized failure handed to callers of the gateway.
#[derive(Debug, Clone)]
pub struct RequestFailure {
    kind: FailureKind,
    status: Option<StatusCode>,
    description: Option<String>,
    body: Option<Payload>,
    source: Option<Arc<TransportError>>,
}

impl RequestFailure {
    pub fn from_transport(err: TransportError) -> Self {
        let (kind, status, description, body) = match &err {
            TransportError::Network(_) => (FailureKind::Network, None, None, None),
            TransportError::Build(_) | TransportError::Credential(_) => {
                (FailureKind::Client, None, None, None)
            }
            TransportError::Status { status, body } => (
                status_kind(*status, FailureKind::Server),
                Some(*status),
                payload::description(body),
                Some(body.clone()),
            ),
            TransportError::Body { status, .. } => {
                (status_kind(*status, FailureKind::Client), Some(*status), None, None)
            }
        };
        Self {
            kind,
            status,
            description,
            body,
            source: Some(Arc::new(err)),
        }
    }

    /// Promotes a `success: false` body to a failure.
    pub fn application(body: Payload) -> Self {
        Self {
            kind: FailureKind::Application,
            status: None,
            description: payload::description(&body),
            body: Some(body),
            source: None,
        }
    }

    pub fn kind(&self) -> FailureKind {
        self.kind
    }

    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    /// Description supplied by the backend body, if any.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn body(&self) -> Option<&Payload> {
        self.body.as_ref()
    }

    pub fn transport(&self) -> Option<&TransportError> {
        self.source.as_deref()
    }

    pub fn is_unauthorized(&self) -> bool {
        self.kind == FailureKind::Unauthorized
    }

    pub fn is_network_error(&self) -> bool {
        self.kind == FailureKind::Network
    }

    pub fn is_application_error(&self) -> bool {
        self.kind == FailureKind::Application
    }
}

impl fmt::Display for RequestFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failure", self.kind)?;
        if let Some(status) = self.status {
            write!(f, " (status {})", status.as_u16())?;
        }
        match (&self.description, &self.source) {
            (Some(description), _) => write!(f, ": {description}"),
            (None, Some(source)) => write!(f, ": {source}"),
            (None, None) => Ok(()),
        }
    }
}

impl std::error::Error for RequestFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|err| err as &(dyn std::error::Error + 'static))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn classifies_status_failures() {
        let unauthorized = RequestFailure::from_transport(TransportError::Status {
            status: StatusCode::UNAUTHORIZED,
            body: json!({"message": "token expired"}),
        });
        assert!(unauthorized.is_unauthorized());
        assert!(!unauthorized.is_network_error());
        assert_eq!(unauthorized.description(), Some("token expired"));

        let server = RequestFailure::from_transport(TransportError::Status {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: Payload::Null,
        });
        assert_eq!(server.kind(), FailureKind::Server);
        assert_eq!(server.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
        assert_eq!(server.description(), None);
    }

    #[tokio::test]
    async fn unreadable_body_is_classified_by_status() {
        let source = || async {
            reqwest::Client::builder()
                .no_proxy()
                .build()
                .unwrap()
                .get("http://127.0.0.1:9/")
                .send()
                .await
                .unwrap_err()
        };
        let unauthorized = RequestFailure::from_transport(TransportError::Body {
            status: StatusCode::UNAUTHORIZED,
            source: source().await,
        });
        assert!(unauthorized.is_unauthorized());

        let other = RequestFailure::from_transport(TransportError::Body {
            status: StatusCode::OK,
            source: source().await,
        });
        assert_eq!(other.kind(), FailureKind::Client);
        assert_eq!(other.status(), Some(StatusCode::OK));
    }

    #[test]
    fn credential_failure_is_client_side() {
        let failure =
            RequestFailure::from_transport(TransportError::Credential("store locked".into()));
        assert_eq!(failure.kind(), FailureKind::Client);
        assert!(failure.to_string().contains("store locked"));
    }

    #[test]
    fn application_failure_keeps_body() {
        let failure = RequestFailure::application(json!({"success": false, "message": "pond busy"}));
        assert!(failure.is_application_error());
        assert_eq!(failure.description(), Some("pond busy"));
        assert!(failure.transport().is_none());
        assert_eq!(failure.to_string(), "application failure: pond busy");
    }
}
