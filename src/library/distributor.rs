use crate::{
    actor::{Actor, ActorError, ActorInterface, PortFrame, PortSpec, TickBoundary, TickState},
    signal::Signal,
};

pub const INPUT: usize = 0;
pub const OUTPUT: usize = 0;

/// Routes the input to one output channel per tick, round-robin.
///
/// The cursor moves once per tick whether or not a token was routed.
#[derive(Debug, Clone)]
pub struct SingleTokenDistributor {
    cursor: TickState<usize>,
    interface: ActorInterface,
}

impl Default for SingleTokenDistributor {
    fn default() -> Self {
        Self::new()
    }
}

impl SingleTokenDistributor {
    pub fn new() -> Self {
        Self {
            cursor: TickState::new(0),
            interface: ActorInterface::new(
                vec![PortSpec::single("input")],
                vec![PortSpec::multi("output")],
            ),
        }
    }

    pub fn cursor(&self) -> usize {
        *self.cursor.current()
    }
}

impl Actor for SingleTokenDistributor {
    fn interface(&self) -> &ActorInterface {
        &self.interface
    }

    fn is_strict(&self) -> bool {
        false
    }

    fn initialize(&mut self, boundary: &TickBoundary) -> Result<(), ActorError> {
        self.cursor.commit(boundary, 0);
        Ok(())
    }

    fn fire(&mut self, ports: &mut PortFrame) -> Result<(), ActorError> {
        let width = ports.output_width(OUTPUT);
        match ports.signal(INPUT, 0)?.clone() {
            Signal::Unknown => Ok(()),
            Signal::Absent => ports.broadcast_clear(OUTPUT),
            Signal::Present(token) => {
                if width == 0 {
                    return Ok(());
                }
                let target = *self.cursor.current() % width;
                for channel in 0..width {
                    if channel == target {
                        ports.send(OUTPUT, channel, token.clone())?;
                    } else {
                        ports.send_clear(OUTPUT, channel)?;
                    }
                }
                Ok(())
            }
        }
    }

    fn postfire(&mut self, ports: &PortFrame, boundary: &TickBoundary) -> Result<bool, ActorError> {
        let width = ports.output_width(OUTPUT);
        let next = if width == 0 {
            0
        } else {
            (*self.cursor.current() + 1) % width
        };
        self.cursor.commit(boundary, next);
        Ok(true)
    }
}
