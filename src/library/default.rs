use crate::{
    actor::{Actor, ActorError, ActorInterface, PortFrame, PortSpec},
    signal::Signal,
};

pub const PREFERRED: usize = 0;
pub const ALTERNATE: usize = 1;
pub const OUTPUT: usize = 0;

/// The `Default` operator: forwards `preferred` when it is present and
/// `alternate` otherwise.
///
/// Nothing is produced until `preferred` is known, even if `alternate`
/// already is.
#[derive(Debug, Clone)]
pub struct DefaultMerge {
    interface: ActorInterface,
}

impl Default for DefaultMerge {
    fn default() -> Self {
        Self::new()
    }
}

impl DefaultMerge {
    pub fn new() -> Self {
        Self {
            interface: ActorInterface::new(
                vec![PortSpec::single("preferred"), PortSpec::single("alternate")],
                vec![PortSpec::single("output")],
            ),
        }
    }
}

impl Actor for DefaultMerge {
    fn interface(&self) -> &ActorInterface {
        &self.interface
    }

    fn is_strict(&self) -> bool {
        false
    }

    fn fire(&mut self, ports: &mut PortFrame) -> Result<(), ActorError> {
        match ports.signal(PREFERRED, 0)?.clone() {
            Signal::Unknown => Ok(()),
            preferred @ Signal::Present(_) => ports.send_signal(OUTPUT, 0, preferred),
            Signal::Absent => {
                let alternate = ports.signal(ALTERNATE, 0)?.clone();
                ports.send_signal(OUTPUT, 0, alternate)
            }
        }
    }
}
