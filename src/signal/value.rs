use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    actor::error::{ActorError, monotonicity_violation},
    signal::token::Token,
};

/// The value of one channel for the current tick.
///
/// Per tick this is a flat domain: `Unknown` sits below every other value and
/// `Absent` and `Present(_)` are incomparable. A channel only ever moves up.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    #[default]
    Unknown,
    Absent,
    Present(Token),
}

impl Signal {
    pub fn present(token: impl Into<Token>) -> Self {
        Self::Present(token.into())
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }

    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    pub fn token(&self) -> Option<&Token> {
        match self {
            Self::Present(token) => Some(token),
            Self::Unknown | Self::Absent => None,
        }
    }

    /// `self ⊑ other` in the flat per-tick order.
    pub fn refines(&self, other: &Signal) -> bool {
        matches!(self, Self::Unknown) || self == other
    }

    /// Moves `self` up to `next`. Returns whether the channel changed from
    /// unknown to known.
    pub fn merge(&mut self, next: Signal) -> Result<bool, ActorError> {
        if matches!(next, Self::Unknown) || *self == next {
            return Ok(false);
        }
        if self.is_known() {
            return Err(monotonicity_violation(format!(
                "channel already holds {self}, refusing to overwrite with {next}"
            )));
        }
        *self = next;
        Ok(true)
    }
}

impl From<Option<Token>> for Signal {
    fn from(value: Option<Token>) -> Self {
        match value {
            Some(token) => Self::Present(token),
            None => Self::Absent,
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => write!(f, "unknown"),
            Self::Absent => write!(f, "absent"),
            Self::Present(token) => write!(f, "present({token})"),
        }
    }
}
