use crate::{
    actor::{
        Actor, ActorError, ActorInterface, PortFrame, PortSpec, error::invalid_configuration,
    },
    signal::{Signal, Token},
};

pub const INPUT: usize = 0;
pub const HIGH_BIT: usize = 0;
pub const LOW_BIT: usize = 1;

const REQUIRED_WIDTH: usize = 3;

/// Adds three one-bit inputs into a two-bit sum.
///
/// The low bit is parity and needs all three inputs. The carry is already
/// one as soon as two known inputs are one. Absent inputs count as zero.
#[derive(Debug, Clone)]
pub struct NonStrictThreeBitAdder {
    interface: ActorInterface,
}

impl Default for NonStrictThreeBitAdder {
    fn default() -> Self {
        Self::new()
    }
}

impl NonStrictThreeBitAdder {
    pub fn new() -> Self {
        Self {
            interface: ActorInterface::new(
                vec![PortSpec::multi("input")],
                vec![PortSpec::single("high_bit"), PortSpec::single("low_bit")],
            ),
        }
    }
}

impl Actor for NonStrictThreeBitAdder {
    fn interface(&self) -> &ActorInterface {
        &self.interface
    }

    fn is_strict(&self) -> bool {
        false
    }

    fn prefire(&mut self, ports: &mut PortFrame) -> Result<bool, ActorError> {
        let width = ports.input_width(INPUT);
        if width != REQUIRED_WIDTH {
            return Err(invalid_configuration(format!(
                "three-bit adder needs exactly {REQUIRED_WIDTH} input channels, found {width}"
            )));
        }
        Ok(true)
    }

    fn fire(&mut self, ports: &mut PortFrame) -> Result<(), ActorError> {
        let mut known = 0usize;
        let mut ones = 0i64;
        for channel in 0..ports.input_width(INPUT) {
            match ports.signal(INPUT, channel)? {
                Signal::Unknown => {}
                Signal::Absent => known += 1,
                Signal::Present(token) => {
                    known += 1;
                    if token.as_bit()? {
                        ones += 1;
                    }
                }
            }
        }

        if known == REQUIRED_WIDTH {
            ports.send(LOW_BIT, 0, Token::Int(ones % 2))?;
            ports.send(HIGH_BIT, 0, Token::Int(i64::from(ones >= 2)))?;
        } else if known >= 2 && ones >= 2 {
            ports.send(HIGH_BIT, 0, Token::Int(1))?;
        }
        Ok(())
    }
}
