use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NetworkErrorKind {
    DuplicateName,
    UnknownActor,
    UnknownPort,
    InvalidConnection,
    InvalidSpec,
}

/// Raised while assembling a network, before any tick runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{message}")]
pub struct NetworkError {
    pub kind: NetworkErrorKind,
    pub message: String,
}

impl NetworkError {
    pub fn new(kind: NetworkErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

pub fn duplicate_name(message: impl Into<String>) -> NetworkError {
    NetworkError::new(NetworkErrorKind::DuplicateName, message)
}

pub fn unknown_actor(message: impl Into<String>) -> NetworkError {
    NetworkError::new(NetworkErrorKind::UnknownActor, message)
}

pub fn unknown_port(message: impl Into<String>) -> NetworkError {
    NetworkError::new(NetworkErrorKind::UnknownPort, message)
}

pub fn invalid_connection(message: impl Into<String>) -> NetworkError {
    NetworkError::new(NetworkErrorKind::InvalidConnection, message)
}

pub fn invalid_spec(message: impl Into<String>) -> NetworkError {
    NetworkError::new(NetworkErrorKind::InvalidSpec, message)
}
