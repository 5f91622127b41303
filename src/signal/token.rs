use std::fmt;

use serde::{Deserialize, Serialize};

use crate::actor::error::{ActorError, invalid_payload};

/// Payload carried by a present signal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Token {
    Bool(bool),
    Int(i64),
    Text(String),
}

impl Token {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            Self::Bool(_) | Self::Text(_) => None,
        }
    }

    /// Reads the token as a single bit. Booleans and the integers 0 and 1 qualify.
    pub fn as_bit(&self) -> Result<bool, ActorError> {
        match self {
            Self::Bool(value) => Ok(*value),
            Self::Int(0) => Ok(false),
            Self::Int(1) => Ok(true),
            other => Err(invalid_payload(format!(
                "expected a bit (true/false/0/1), got {other}"
            ))),
        }
    }

    pub fn expect_int(&self) -> Result<i64, ActorError> {
        self.as_int()
            .ok_or_else(|| invalid_payload(format!("expected an integer, got {self}")))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => write!(f, "{value}"),
            Self::Int(value) => write!(f, "{value}"),
            Self::Text(value) => write!(f, "\"{value}\""),
        }
    }
}

impl From<bool> for Token {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Token {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for Token {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}
