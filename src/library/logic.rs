use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    actor::{
        Actor, ActorError, ActorInterface, PortFrame, PortSpec, error::invalid_configuration,
    },
    signal::{Signal, Token},
};

pub const INPUT: usize = 0;
pub const OUTPUT: usize = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    And,
    Or,
    Xor,
    Nand,
    Nor,
    Xnor,
}

impl Operator {
    pub fn is_negated(self) -> bool {
        matches!(self, Self::Nand | Self::Nor | Self::Xnor)
    }

    /// A known operand with this value fixes the un-negated result no matter
    /// what the other operands turn out to be.
    pub fn controlling_value(self) -> Option<bool> {
        match self {
            Self::And | Self::Nand => Some(false),
            Self::Or | Self::Nor => Some(true),
            Self::Xor | Self::Xnor => None,
        }
    }

    /// Folds one more operand into an un-negated partial result.
    pub fn combine(self, acc: bool, operand: bool) -> bool {
        match self {
            Self::And | Self::Nand => acc && operand,
            Self::Or | Self::Nor => acc || operand,
            Self::Xor | Self::Xnor => acc ^ operand,
        }
    }

    pub fn finish(self, folded: bool) -> bool {
        folded ^ self.is_negated()
    }

    /// Three-valued evaluation over the known operands. `None` in `operands`
    /// stands for an unknown input; absent inputs are simply left out.
    ///
    /// Returns `None` while the result still depends on unknown operands,
    /// `Some(None)` when every operand is known and none is present, and
    /// `Some(Some(bit))` once the result is decided.
    pub fn evaluate(self, operands: &[Option<Option<bool>>]) -> Option<Option<bool>> {
        let mut folded: Option<bool> = None;
        let mut unresolved = false;
        for operand in operands {
            match operand {
                None => unresolved = true,
                Some(None) => {}
                Some(Some(bit)) => {
                    if self.controlling_value() == Some(*bit) {
                        return Some(Some(self.finish(*bit)));
                    }
                    folded = Some(folded.map_or(*bit, |acc| self.combine(acc, *bit)));
                }
            }
        }
        if unresolved {
            return None;
        }
        Some(folded.map(|value| self.finish(value)))
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::And => "and",
            Self::Or => "or",
            Self::Xor => "xor",
            Self::Nand => "nand",
            Self::Nor => "nor",
            Self::Xnor => "xnor",
        };
        f.write_str(name)
    }
}

impl FromStr for Operator {
    type Err = ActorError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "and" => Ok(Self::And),
            "or" => Ok(Self::Or),
            "xor" => Ok(Self::Xor),
            "nand" => Ok(Self::Nand),
            "nor" => Ok(Self::Nor),
            "xnor" => Ok(Self::Xnor),
            other => Err(invalid_configuration(format!(
                "unrecognized logic operator '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Arity {
    Any,
    Binary,
}

/// N-ary logic gate over a boolean multiport that answers as soon as the
/// result is decided, e.g. AND with one known-false operand.
#[derive(Debug, Clone)]
pub struct NonStrictLogicGate {
    operator: Operator,
    arity: Arity,
    interface: ActorInterface,
}

impl NonStrictLogicGate {
    pub fn new(operator: Operator) -> Self {
        Self::with_arity(operator, Arity::Any)
    }

    /// Gate that insists on exactly two connected input channels.
    pub fn binary(operator: Operator) -> Self {
        Self::with_arity(operator, Arity::Binary)
    }

    fn with_arity(operator: Operator, arity: Arity) -> Self {
        Self {
            operator,
            arity,
            interface: ActorInterface::new(
                vec![PortSpec::multi("input")],
                vec![PortSpec::single("output")],
            ),
        }
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }
}

impl Actor for NonStrictLogicGate {
    fn interface(&self) -> &ActorInterface {
        &self.interface
    }

    fn is_strict(&self) -> bool {
        false
    }

    fn prefire(&mut self, ports: &mut PortFrame) -> Result<bool, ActorError> {
        let width = ports.input_width(INPUT);
        if self.arity == Arity::Binary && width != 2 {
            return Err(invalid_configuration(format!(
                "binary {} gate needs exactly 2 input channels, found {width}",
                self.operator
            )));
        }
        Ok(true)
    }

    fn fire(&mut self, ports: &mut PortFrame) -> Result<(), ActorError> {
        let mut operands = Vec::with_capacity(ports.input_width(INPUT));
        for channel in 0..ports.input_width(INPUT) {
            let operand = match ports.signal(INPUT, channel)? {
                Signal::Unknown => None,
                Signal::Absent => Some(None),
                Signal::Present(token) => Some(Some(token.as_bit()?)),
            };
            operands.push(operand);
        }
        if operands.iter().all(Option::is_none) {
            return Ok(());
        }

        match self.operator.evaluate(&operands) {
            None => Ok(()),
            Some(Some(bit)) => ports.send(OUTPUT, 0, Token::Bool(bit)),
            Some(None) => ports.send_clear(OUTPUT, 0),
        }
    }
}
