use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortSpec {
    pub name: String,
    #[serde(default)]
    pub multiport: bool,
}

impl PortSpec {
    pub fn single(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            multiport: false,
        }
    }

    pub fn multi(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            multiport: true,
        }
    }
}

/// Ports an actor declares at construction. Ports are addressed by their
/// index in `inputs` / `outputs`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorInterface {
    pub inputs: Vec<PortSpec>,
    pub outputs: Vec<PortSpec>,
}

impl ActorInterface {
    pub fn new(inputs: Vec<PortSpec>, outputs: Vec<PortSpec>) -> Self {
        Self { inputs, outputs }
    }

    pub fn input_index(&self, name: &str) -> Option<usize> {
        self.inputs.iter().position(|port| port.name == name)
    }

    pub fn output_index(&self, name: &str) -> Option<usize> {
        self.outputs.iter().position(|port| port.name == name)
    }
}
