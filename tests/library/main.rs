mod adder;
mod logic;

use sr_actors::signal::{Signal, Token};

pub(crate) fn int(value: i64) -> Signal {
    Signal::Present(Token::Int(value))
}

pub(crate) fn bit(value: bool) -> Signal {
    Signal::Present(Token::Bool(value))
}
