use std::fmt;

use portal_core::MutationKind;

/// Failure talking to the GraphQL API. `message` is the upstream text,
/// kept verbatim for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub kind: FailureKind,
    pub message: String,
}

impl ApiError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ApiError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidEndpoint,
    HttpStatus(u16),
    Timeout,
    Network,
    /// The response carried a GraphQL `errors` entry.
    GraphQl,
    /// The response body did not have the expected shape.
    Decode,
    /// The engine worker is gone.
    Stopped,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidEndpoint => write!(f, "invalid endpoint"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::GraphQl => write!(f, "graphql error"),
            FailureKind::Decode => write!(f, "unexpected response shape"),
            FailureKind::Stopped => write!(f, "engine stopped"),
        }
    }
}

/// Server confirmation of a mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationReceipt {
    pub kind: MutationKind,
    /// Id echoed back by the server, when the selection returned one.
    pub id: Option<String>,
}
