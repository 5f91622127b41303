use std::sync::Arc;

use crate::{
    actor::{
        Actor, ActorError, ActorInterface, FunctionDependency, PortFrame, PortSpec, TickBoundary,
    },
    director::{DirectorConfig, DirectorTelemetryPort, FixedPointDirector},
    network::{Network, NetworkError, error::duplicate_name},
    signal::Signal,
};

pub const ENABLE: usize = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnableState {
    #[default]
    NotEnabled,
    Enabled,
}

/// A sub-network that only ticks when `enable` is present and true.
///
/// Inputs are `enable` followed by the interior network's boundary inputs;
/// outputs are its boundary outputs. On any other tick every output is forced
/// absent and the interior does not fire or postfire, so its carried state
/// stays put.
#[derive(Debug)]
pub struct EnabledComposite {
    director: FixedPointDirector,
    interface: ActorInterface,
    state: EnableState,
    interior_open: bool,
}

impl EnabledComposite {
    pub fn new(network: Network, config: DirectorConfig) -> Result<Self, NetworkError> {
        if network.input_index("enable").is_some() {
            return Err(duplicate_name(format!(
                "network '{}' cannot have a boundary input named 'enable' inside an enabled composite",
                network.name()
            )));
        }

        let mut inputs = vec![PortSpec::single("enable")];
        inputs.extend(network.inputs().iter().map(PortSpec::single));
        let outputs = network.outputs().iter().map(PortSpec::single).collect();

        Ok(Self {
            director: FixedPointDirector::new(network, config),
            interface: ActorInterface::new(inputs, outputs),
            state: EnableState::NotEnabled,
            interior_open: false,
        })
    }

    pub fn with_telemetry(mut self, telemetry: Arc<dyn DirectorTelemetryPort>) -> Self {
        self.director = self.director.with_telemetry(telemetry);
        self
    }

    /// The last decision taken on `enable`.
    pub fn state(&self) -> EnableState {
        self.state
    }

    pub fn director(&self) -> &FixedPointDirector {
        &self.director
    }
}

impl Actor for EnabledComposite {
    fn interface(&self) -> &ActorInterface {
        &self.interface
    }

    fn is_strict(&self) -> bool {
        false
    }

    /// The interior's own boundary dependencies, shifted past `enable`, plus
    /// `enable` feeding every output.
    fn causality(&self) -> FunctionDependency {
        let mut dependency = FunctionDependency::independent(&self.interface);
        for (input, output) in self.director.network().boundary_dependencies().edges() {
            dependency.add(input + 1, output);
        }
        for output in 0..self.interface.outputs.len() {
            dependency.add(ENABLE, output);
        }
        dependency
    }

    fn initialize(&mut self, _boundary: &TickBoundary) -> Result<(), ActorError> {
        self.state = EnableState::NotEnabled;
        self.interior_open = false;
        self.director.initialize()
    }

    fn prefire(&mut self, ports: &mut PortFrame) -> Result<bool, ActorError> {
        let enabled = match ports.signal(ENABLE, 0)? {
            Signal::Unknown => return Ok(false),
            Signal::Absent => false,
            Signal::Present(token) => token.as_bit()?,
        };

        if !enabled {
            self.state = EnableState::NotEnabled;
            for output in 0..self.interface.outputs.len() {
                ports.broadcast_clear(output)?;
            }
            return Ok(false);
        }

        self.state = EnableState::Enabled;
        if !self.interior_open {
            self.director.prefire();
            self.interior_open = true;
        }
        Ok(true)
    }

    fn fire(&mut self, ports: &mut PortFrame) -> Result<(), ActorError> {
        for port in 0..self.interface.inputs.len() - 1 {
            let signal = ports.signal(port + 1, 0)?;
            if signal.is_known() {
                self.director.set_input(port, signal.clone())?;
            }
        }

        self.director.fire()?;

        for port in 0..self.interface.outputs.len() {
            if let Some(signal) = self.director.output(port) {
                ports.send_signal(port, 0, signal)?;
            }
        }
        Ok(())
    }

    fn postfire(&mut self, _ports: &PortFrame, _boundary: &TickBoundary) -> Result<bool, ActorError> {
        if !self.interior_open {
            return Ok(true);
        }
        self.interior_open = false;
        self.director.postfire()
    }
}
