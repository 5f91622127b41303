use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{
    actor::Actor,
    director::{DirectorConfig, DirectorTelemetryPort, NoopDirectorTelemetry},
    library::{
        Combine, Current, DefaultMerge, EnabledComposite, NonStrictDelay,
        NonStrictDelayInitialized, NonStrictLogicGate, NonStrictThreeBitAdder, Operator, Pre,
        SingleTokenDistributor, When,
    },
    network::{Network, NetworkError, error::invalid_spec},
    signal::Token,
};

fn default_network_name() -> String {
    "top".to_string()
}

/// Declarative description of a network, as found in a run file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSpec {
    #[serde(default = "default_network_name")]
    pub name: String,
    #[serde(default)]
    pub inputs: Vec<String>,
    #[serde(default)]
    pub outputs: Vec<String>,
    #[serde(default)]
    pub actors: Vec<ActorDecl>,
    #[serde(default)]
    pub connections: Vec<ConnectionSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorDecl {
    pub name: String,
    #[serde(flatten)]
    pub spec: ActorSpec,
}

/// `from` and `to` are written `actor.port`, or a bare `port` for the
/// network's own boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionSpec {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActorSpec {
    LogicGate {
        operator: Operator,
        #[serde(default)]
        binary: bool,
    },
    ThreeBitAdder,
    Default,
    When,
    Pre {
        #[serde(default)]
        initial_value: Option<Token>,
    },
    NonStrictDelay {
        #[serde(default)]
        initial_value: Option<Token>,
    },
    NonStrictDelayInitialized {
        initial_value: Token,
    },
    Current,
    Combine {
        function: String,
    },
    SingleTokenDistributor,
    EnabledComposite {
        network: NetworkSpec,
        #[serde(default)]
        director: DirectorConfig,
    },
}

impl NetworkSpec {
    pub fn build(&self) -> Result<Network, NetworkError> {
        let telemetry: Arc<dyn DirectorTelemetryPort> = Arc::new(NoopDirectorTelemetry);
        self.build_with_telemetry(&telemetry)
    }

    /// Like [`NetworkSpec::build`]; interior directors of nested composites
    /// report to `telemetry`.
    pub fn build_with_telemetry(
        &self,
        telemetry: &Arc<dyn DirectorTelemetryPort>,
    ) -> Result<Network, NetworkError> {
        let mut network = Network::new(self.name.clone());
        for input in &self.inputs {
            network.add_input(input.clone())?;
        }
        for output in &self.outputs {
            network.add_output(output.clone())?;
        }
        for decl in &self.actors {
            let actor = decl.spec.instantiate(telemetry).map_err(|err| NetworkError {
                message: format!("actor '{}': {}", decl.name, err.message),
                ..err
            })?;
            network.add_actor(decl.name.clone(), actor)?;
        }
        for connection in &self.connections {
            network.link(&connection.from, &connection.to)?;
        }
        Ok(network)
    }
}

impl ActorSpec {
    pub fn instantiate(
        &self,
        telemetry: &Arc<dyn DirectorTelemetryPort>,
    ) -> Result<Box<dyn Actor>, NetworkError> {
        let actor: Box<dyn Actor> = match self {
            Self::LogicGate {
                operator,
                binary: false,
            } => Box::new(NonStrictLogicGate::new(*operator)),
            Self::LogicGate {
                operator,
                binary: true,
            } => Box::new(NonStrictLogicGate::binary(*operator)),
            Self::ThreeBitAdder => Box::new(NonStrictThreeBitAdder::new()),
            Self::Default => Box::new(DefaultMerge::new()),
            Self::When => Box::new(When::new()),
            Self::Pre { initial_value } => Box::new(Pre::new(initial_value.clone())),
            Self::NonStrictDelay { initial_value } => {
                Box::new(NonStrictDelay::new(initial_value.clone()))
            }
            Self::NonStrictDelayInitialized { initial_value } => {
                Box::new(NonStrictDelayInitialized::new(initial_value.clone()))
            }
            Self::Current => Box::new(Current::new()),
            Self::Combine { function } => {
                Box::new(Combine::parse(function).map_err(|err| invalid_spec(err.message))?)
            }
            Self::SingleTokenDistributor => Box::new(SingleTokenDistributor::new()),
            Self::EnabledComposite { network, director } => {
                let interior = network.build_with_telemetry(telemetry)?;
                Box::new(
                    EnabledComposite::new(interior, director.clone())?
                        .with_telemetry(Arc::clone(telemetry)),
                )
            }
        };
        Ok(actor)
    }
}
