use std::{collections::BTreeSet, fmt, str::FromStr};

use crate::{
    actor::{Actor, ActorInterface, FunctionDependency, PortSpec},
    network::error::{
        NetworkError, duplicate_name, invalid_connection, invalid_spec, unknown_actor,
        unknown_port,
    },
};

pub type ActorId = usize;

/// A connection end as written by a user: `actor.port` for an actor port,
/// a bare `port` for a port on the network's own boundary.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Endpoint {
    Actor { actor: String, port: String },
    Boundary { port: String },
}

impl Endpoint {
    pub fn actor(actor: impl Into<String>, port: impl Into<String>) -> Self {
        Self::Actor {
            actor: actor.into(),
            port: port.into(),
        }
    }

    pub fn boundary(port: impl Into<String>) -> Self {
        Self::Boundary { port: port.into() }
    }
}

impl FromStr for Endpoint {
    type Err = NetworkError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        if value.is_empty() {
            return Err(invalid_connection("empty endpoint"));
        }
        match value.split_once('.') {
            Some((actor, port)) if !actor.is_empty() && !port.is_empty() => {
                Ok(Self::actor(actor, port))
            }
            Some(_) => Err(invalid_connection(format!(
                "endpoint '{value}' must be 'actor.port' or 'port'"
            ))),
            None => Ok(Self::boundary(value)),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Actor { actor, port } => write!(f, "{actor}.{port}"),
            Self::Boundary { port } => f.write_str(port),
        }
    }
}

/// Where a connection takes its value from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Source {
    ActorOutput { actor: ActorId, port: usize },
    BoundaryInput { port: usize },
}

/// Where a connection delivers its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Sink {
    ActorInput { actor: ActorId, port: usize },
    BoundaryOutput { port: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connection {
    pub source: Source,
    pub sink: Sink,
}

struct ActorSlot {
    name: String,
    actor: Box<dyn Actor>,
}

/// A flat network of actors plus its boundary ports.
///
/// Boundary inputs are driven from outside (the caller, or the composite that
/// owns this network); boundary outputs are read back after each tick.
pub struct Network {
    name: String,
    actors: Vec<ActorSlot>,
    inputs: Vec<String>,
    outputs: Vec<String>,
    connections: Vec<Connection>,
}

impl fmt::Debug for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Network")
            .field("name", &self.name)
            .field(
                "actors",
                &self.actors.iter().map(|slot| &slot.name).collect::<Vec<_>>(),
            )
            .field("inputs", &self.inputs)
            .field("outputs", &self.outputs)
            .field("connections", &self.connections.len())
            .finish()
    }
}

impl Network {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            actors: Vec::new(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            connections: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn add_actor(
        &mut self,
        name: impl Into<String>,
        actor: Box<dyn Actor>,
    ) -> Result<ActorId, NetworkError> {
        let name = name.into();
        validate_name(&name)?;
        if self.actor_id(&name).is_some() {
            return Err(duplicate_name(format!(
                "network '{}' already has an actor named '{name}'",
                self.name
            )));
        }
        self.actors.push(ActorSlot { name, actor });
        Ok(self.actors.len() - 1)
    }

    pub fn add_input(&mut self, name: impl Into<String>) -> Result<usize, NetworkError> {
        let name = name.into();
        self.check_boundary_name(&name)?;
        self.inputs.push(name);
        Ok(self.inputs.len() - 1)
    }

    pub fn add_output(&mut self, name: impl Into<String>) -> Result<usize, NetworkError> {
        let name = name.into();
        self.check_boundary_name(&name)?;
        self.outputs.push(name);
        Ok(self.outputs.len() - 1)
    }

    /// Connects two endpoints. The source must be an actor output or a
    /// boundary input, the sink an actor input or a boundary output.
    pub fn connect(&mut self, from: &Endpoint, to: &Endpoint) -> Result<(), NetworkError> {
        let source = self.resolve_source(from)?;
        let sink = self.resolve_sink(to)?;

        let already_driven = self.connections.iter().any(|existing| existing.sink == sink);
        if already_driven {
            let single = match sink {
                Sink::ActorInput { actor, port } => self.actors[actor]
                    .actor
                    .interface()
                    .inputs
                    .get(port)
                    .is_none_or(|spec| !spec.multiport),
                Sink::BoundaryOutput { .. } => true,
            };
            if single {
                return Err(invalid_connection(format!(
                    "'{to}' is a single port and is already connected"
                )));
            }
        }

        self.connections.push(Connection { source, sink });
        Ok(())
    }

    /// [`Network::connect`] with endpoints written as `actor.port` or `port`.
    pub fn link(&mut self, from: &str, to: &str) -> Result<(), NetworkError> {
        self.connect(&from.parse()?, &to.parse()?)
    }

    pub fn actor_count(&self) -> usize {
        self.actors.len()
    }

    pub fn actor_id(&self, name: &str) -> Option<ActorId> {
        self.actors.iter().position(|slot| slot.name == name)
    }

    pub fn actor_name(&self, actor: ActorId) -> &str {
        self.actors
            .get(actor)
            .map_or("<unknown>", |slot| slot.name.as_str())
    }

    pub fn actor(&self, actor: ActorId) -> Option<&dyn Actor> {
        self.actors.get(actor).map(|slot| slot.actor.as_ref())
    }

    pub(crate) fn actor_mut(&mut self, actor: ActorId) -> Option<&mut (dyn Actor + 'static)> {
        self.actors.get_mut(actor).map(|slot| slot.actor.as_mut())
    }

    pub fn inputs(&self) -> &[String] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[String] {
        &self.outputs
    }

    pub fn input_index(&self, name: &str) -> Option<usize> {
        self.inputs.iter().position(|port| port == name)
    }

    pub fn output_index(&self, name: &str) -> Option<usize> {
        self.outputs.iter().position(|port| port == name)
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// The boundary seen from outside: one single port per boundary input
    /// and output.
    pub fn interface(&self) -> ActorInterface {
        ActorInterface::new(
            self.inputs.iter().map(PortSpec::single).collect(),
            self.outputs.iter().map(PortSpec::single).collect(),
        )
    }

    pub fn causalities(&self) -> Vec<FunctionDependency> {
        self.actors.iter().map(|slot| slot.actor.causality()).collect()
    }

    /// Which boundary outputs can see, within one tick, a value that entered
    /// through which boundary input. Follows connections and each actor's
    /// declared causality.
    pub fn boundary_dependencies(&self) -> FunctionDependency {
        let causalities = self.causalities();
        let mut dependency = FunctionDependency::independent(&self.interface());

        for input in 0..self.inputs.len() {
            let mut visited: BTreeSet<Source> = BTreeSet::new();
            let mut pending = vec![Source::BoundaryInput { port: input }];
            while let Some(source) = pending.pop() {
                if !visited.insert(source) {
                    continue;
                }
                for connection in self.connections.iter().filter(|c| c.source == source) {
                    match connection.sink {
                        Sink::BoundaryOutput { port } => dependency.add(input, port),
                        Sink::ActorInput { actor, port } => {
                            pending.extend(
                                causalities[actor]
                                    .dependents_of(port)
                                    .map(|output| Source::ActorOutput {
                                        actor,
                                        port: output,
                                    }),
                            );
                        }
                    }
                }
            }
        }

        dependency
    }

    fn check_boundary_name(&self, name: &str) -> Result<(), NetworkError> {
        validate_name(name)?;
        if self.inputs.iter().chain(self.outputs.iter()).any(|port| port == name) {
            return Err(duplicate_name(format!(
                "network '{}' already has a boundary port named '{name}'",
                self.name
            )));
        }
        Ok(())
    }

    fn resolve_source(&self, endpoint: &Endpoint) -> Result<Source, NetworkError> {
        match endpoint {
            Endpoint::Boundary { port } => self
                .input_index(port)
                .map(|port| Source::BoundaryInput { port })
                .ok_or_else(|| {
                    unknown_port(format!(
                        "'{port}' is not a boundary input of network '{}'",
                        self.name
                    ))
                }),
            Endpoint::Actor { actor, port } => {
                let id = self.require_actor(actor)?;
                self.actors[id]
                    .actor
                    .interface()
                    .output_index(port)
                    .map(|port| Source::ActorOutput { actor: id, port })
                    .ok_or_else(|| unknown_port(format!("'{endpoint}' is not an output port")))
            }
        }
    }

    fn resolve_sink(&self, endpoint: &Endpoint) -> Result<Sink, NetworkError> {
        match endpoint {
            Endpoint::Boundary { port } => self
                .output_index(port)
                .map(|port| Sink::BoundaryOutput { port })
                .ok_or_else(|| {
                    unknown_port(format!(
                        "'{port}' is not a boundary output of network '{}'",
                        self.name
                    ))
                }),
            Endpoint::Actor { actor, port } => {
                let id = self.require_actor(actor)?;
                self.actors[id]
                    .actor
                    .interface()
                    .input_index(port)
                    .map(|port| Sink::ActorInput { actor: id, port })
                    .ok_or_else(|| unknown_port(format!("'{endpoint}' is not an input port")))
            }
        }
    }

    fn require_actor(&self, name: &str) -> Result<ActorId, NetworkError> {
        self.actor_id(name).ok_or_else(|| {
            unknown_actor(format!(
                "network '{}' has no actor named '{name}'",
                self.name
            ))
        })
    }
}

fn validate_name(name: &str) -> Result<(), NetworkError> {
    if name.trim().is_empty() || name.contains('.') {
        return Err(invalid_spec(format!(
            "'{name}' is not a valid name: it must be non-empty and contain no '.'"
        )));
    }
    Ok(())
}
