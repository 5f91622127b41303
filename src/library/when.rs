use crate::{
    actor::{Actor, ActorError, ActorInterface, PortFrame, PortSpec},
    signal::Signal,
};

pub const INPUT: usize = 0;
pub const CONTROL: usize = 1;
pub const OUTPUT: usize = 0;

/// Samples `input` on ticks where `control` is present and true.
#[derive(Debug, Clone)]
pub struct When {
    interface: ActorInterface,
}

impl Default for When {
    fn default() -> Self {
        Self::new()
    }
}

impl When {
    pub fn new() -> Self {
        Self {
            interface: ActorInterface::new(
                vec![PortSpec::single("input"), PortSpec::single("control")],
                vec![PortSpec::single("output")],
            ),
        }
    }
}

impl Actor for When {
    fn interface(&self) -> &ActorInterface {
        &self.interface
    }

    fn is_strict(&self) -> bool {
        false
    }

    fn fire(&mut self, ports: &mut PortFrame) -> Result<(), ActorError> {
        let open = match ports.signal(CONTROL, 0)? {
            Signal::Unknown => return Ok(()),
            Signal::Absent => false,
            Signal::Present(token) => token.as_bit()?,
        };
        if !open {
            return ports.send_clear(OUTPUT, 0);
        }

        let input = ports.signal(INPUT, 0)?.clone();
        ports.send_signal(OUTPUT, 0, input)
    }
}
