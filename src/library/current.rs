use crate::{
    actor::{Actor, ActorError, ActorInterface, PortFrame, PortSpec, TickBoundary, TickState},
    signal::{Signal, Token},
};

pub const INPUT: usize = 0;
pub const OUTPUT: usize = 0;

/// Lustre-style `current`: the most recent present input, however stale.
#[derive(Debug, Clone)]
pub struct Current {
    last: TickState<Option<Token>>,
    interface: ActorInterface,
}

impl Default for Current {
    fn default() -> Self {
        Self::new()
    }
}

impl Current {
    pub fn new() -> Self {
        Self {
            last: TickState::new(None),
            interface: ActorInterface::new(
                vec![PortSpec::single("input")],
                vec![PortSpec::single("output")],
            ),
        }
    }

    pub fn last(&self) -> Option<&Token> {
        self.last.current().as_ref()
    }
}

impl Actor for Current {
    fn interface(&self) -> &ActorInterface {
        &self.interface
    }

    fn is_strict(&self) -> bool {
        false
    }

    fn initialize(&mut self, boundary: &TickBoundary) -> Result<(), ActorError> {
        self.last.commit(boundary, None);
        Ok(())
    }

    fn fire(&mut self, ports: &mut PortFrame) -> Result<(), ActorError> {
        let output = match ports.signal(INPUT, 0)? {
            Signal::Unknown => return Ok(()),
            present @ Signal::Present(_) => present.clone(),
            Signal::Absent => Signal::from(self.last.current().clone()),
        };
        ports.send_signal(OUTPUT, 0, output)
    }

    fn postfire(&mut self, ports: &PortFrame, boundary: &TickBoundary) -> Result<bool, ActorError> {
        if let Signal::Present(token) = ports.signal(INPUT, 0)? {
            self.last.commit(boundary, Some(token.clone()));
        }
        Ok(true)
    }
}
