use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorErrorKind {
    InvalidConfiguration,
    InvalidPayload,
    MonotonicityViolation,
    CausalityLoop,
    Internal,
}

/// Fatal failure raised while firing. The director stops the run on the
/// first one it sees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{}", render(.actor, .message))]
pub struct ActorError {
    pub kind: ActorErrorKind,
    pub message: String,
    #[serde(default)]
    pub actor: Option<String>,
}

impl ActorError {
    pub fn new(kind: ActorErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            actor: None,
        }
    }

    /// Attaches the name of the actor that raised the error. The innermost
    /// name wins, so composites do not overwrite the name of a failing
    /// interior actor.
    pub fn within(mut self, actor: impl Into<String>) -> Self {
        if self.actor.is_none() {
            self.actor = Some(actor.into());
        }
        self
    }
}

fn render(actor: &Option<String>, message: &str) -> String {
    match actor {
        Some(actor) => format!("{actor}: {message}"),
        None => message.to_string(),
    }
}

pub fn invalid_configuration(message: impl Into<String>) -> ActorError {
    ActorError::new(ActorErrorKind::InvalidConfiguration, message)
}

pub fn invalid_payload(message: impl Into<String>) -> ActorError {
    ActorError::new(ActorErrorKind::InvalidPayload, message)
}

pub fn monotonicity_violation(message: impl Into<String>) -> ActorError {
    ActorError::new(ActorErrorKind::MonotonicityViolation, message)
}

pub fn causality_loop(message: impl Into<String>) -> ActorError {
    ActorError::new(ActorErrorKind::CausalityLoop, message)
}

pub fn internal_error(message: impl Into<String>) -> ActorError {
    ActorError::new(ActorErrorKind::Internal, message)
}
