use std::{fmt, str::FromStr};

use crate::{
    actor::{
        Actor, ActorError, ActorInterface, PortFrame, PortSpec,
        error::{invalid_configuration, invalid_payload},
    },
    signal::{Signal, Token},
};

pub const INPUT: usize = 0;
pub const PRESENT: usize = 0;
pub const VALUE: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombineFunction {
    Add,
    Multiply,
    Max,
    Min,
    And,
    Or,
    Constant(i64),
}

impl CombineFunction {
    /// Folds `value` into the accumulator. The first present channel seeds
    /// it, so no identity element is needed.
    pub fn fold(self, acc: Option<i64>, value: i64) -> Result<i64, ActorError> {
        let Some(acc) = acc else {
            return Ok(value);
        };
        let folded = match self {
            Self::Add => acc.checked_add(value),
            Self::Multiply => acc.checked_mul(value),
            Self::Max => Some(acc.max(value)),
            Self::Min => Some(acc.min(value)),
            Self::And => Some(acc & value),
            Self::Or => Some(acc | value),
            Self::Constant(constant) => Some(constant),
        };
        folded.ok_or_else(|| {
            invalid_payload(format!("combine {self} overflowed folding {acc} with {value}"))
        })
    }

    pub fn finish(self, folded: i64) -> i64 {
        match self {
            Self::Constant(constant) => constant,
            _ => folded,
        }
    }
}

impl fmt::Display for CombineFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Add => f.write_str("add"),
            Self::Multiply => f.write_str("mult"),
            Self::Max => f.write_str("max"),
            Self::Min => f.write_str("min"),
            Self::And => f.write_str("and"),
            Self::Or => f.write_str("or"),
            Self::Constant(constant) => write!(f, "{constant}"),
        }
    }
}

impl FromStr for CombineFunction {
    type Err = ActorError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "add" => Ok(Self::Add),
            "mult" => Ok(Self::Multiply),
            "max" => Ok(Self::Max),
            "min" => Ok(Self::Min),
            "and" => Ok(Self::And),
            "or" => Ok(Self::Or),
            other => other.parse::<i64>().map(Self::Constant).map_err(|_| {
                invalid_configuration(format!(
                    "unrecognized combine function '{other}': expected add, mult, max, min, and, or or an integer"
                ))
            }),
        }
    }
}

/// Folds every present channel of a multiport with one reduction.
///
/// Once every channel is known, emits `1` on `present` and the folded value
/// on `value`, or clears both when no channel carried a token. The fold is a
/// pure function of the current tick, nothing is carried over.
#[derive(Debug, Clone)]
pub struct Combine {
    function: CombineFunction,
    interface: ActorInterface,
}

impl Combine {
    pub fn new(function: CombineFunction) -> Self {
        Self {
            function,
            interface: ActorInterface::new(
                vec![PortSpec::multi("input")],
                vec![PortSpec::single("present"), PortSpec::single("value")],
            ),
        }
    }

    pub fn parse(function: &str) -> Result<Self, ActorError> {
        Ok(Self::new(function.parse()?))
    }

    pub fn function(&self) -> CombineFunction {
        self.function
    }
}

impl Actor for Combine {
    fn interface(&self) -> &ActorInterface {
        &self.interface
    }

    fn is_strict(&self) -> bool {
        false
    }

    fn fire(&mut self, ports: &mut PortFrame) -> Result<(), ActorError> {
        if !ports.is_port_known(INPUT) {
            return Ok(());
        }

        let mut acc = None;
        for channel in 0..ports.input_width(INPUT) {
            if let Signal::Present(token) = ports.signal(INPUT, channel)? {
                acc = Some(self.function.fold(acc, token.expect_int()?)?);
            }
        }

        match acc {
            Some(folded) => {
                ports.send(PRESENT, 0, Token::Int(1))?;
                ports.send(VALUE, 0, Token::Int(self.function.finish(folded)))
            }
            None => {
                ports.send_clear(PRESENT, 0)?;
                ports.send_clear(VALUE, 0)
            }
        }
    }
}
