use crate::{
    actor::{Actor, ActorError, ActorInterface, PortFrame, PortSpec, TickBoundary, TickState},
    signal::{Signal, Token},
};

pub const INPUT: usize = 0;
pub const OUTPUT: usize = 0;

/// Emits the previous present input whenever the input is present.
///
/// An absent input yields an absent output and leaves the memory alone, so
/// the actor holds the last value seen rather than delaying by one tick.
#[derive(Debug, Clone)]
pub struct Pre {
    initial_value: Option<Token>,
    previous: TickState<Option<Token>>,
    interface: ActorInterface,
}

impl Pre {
    pub fn new(initial_value: Option<Token>) -> Self {
        Self {
            previous: TickState::new(initial_value.clone()),
            initial_value,
            interface: ActorInterface::new(
                vec![PortSpec::single("input")],
                vec![PortSpec::single("output")],
            ),
        }
    }

    pub fn previous(&self) -> Option<&Token> {
        self.previous.current().as_ref()
    }
}

impl Actor for Pre {
    fn interface(&self) -> &ActorInterface {
        &self.interface
    }

    fn is_strict(&self) -> bool {
        false
    }

    fn initialize(&mut self, boundary: &TickBoundary) -> Result<(), ActorError> {
        self.previous.commit(boundary, self.initial_value.clone());
        Ok(())
    }

    fn fire(&mut self, ports: &mut PortFrame) -> Result<(), ActorError> {
        match ports.signal(INPUT, 0)? {
            Signal::Unknown => Ok(()),
            Signal::Absent => ports.send_clear(OUTPUT, 0),
            Signal::Present(_) => {
                let previous = Signal::from(self.previous.current().clone());
                ports.send_signal(OUTPUT, 0, previous)
            }
        }
    }

    fn postfire(&mut self, ports: &PortFrame, boundary: &TickBoundary) -> Result<bool, ActorError> {
        if let Signal::Present(token) = ports.signal(INPUT, 0)? {
            self.previous.commit(boundary, Some(token.clone()));
        }
        Ok(true)
    }
}
