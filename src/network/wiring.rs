use crate::network::graph::{Network, Sink, Source};

pub(crate) type CellId = usize;

/// Layout of the per-tick receiver cells of one network.
///
/// Every boundary input and every actor output channel owns one cell. Inputs
/// read the cell of whatever drives them; an unconnected single input reads
/// `None`, which the director presents as absent.
#[derive(Debug, Clone, Default)]
pub(crate) struct Wiring {
    pub cell_count: usize,
    pub boundary_inputs: Vec<CellId>,
    pub boundary_outputs: Vec<Option<CellId>>,
    pub actor_inputs: Vec<Vec<Vec<Option<CellId>>>>,
    pub actor_outputs: Vec<Vec<Vec<CellId>>>,
}

impl Wiring {
    pub fn build(network: &Network) -> Self {
        let mut wiring = Self::default();
        let mut next_cell = 0usize;
        let mut allocate = || {
            let cell = next_cell;
            next_cell += 1;
            cell
        };

        wiring.boundary_inputs = network.inputs().iter().map(|_| allocate()).collect();
        wiring.boundary_outputs = vec![None; network.outputs().len()];

        for actor in 0..network.actor_count() {
            let Some(interface) = network.actor(actor).map(|actor| actor.interface().clone())
            else {
                continue;
            };

            let mut outputs = Vec::with_capacity(interface.outputs.len());
            for (port, spec) in interface.outputs.iter().enumerate() {
                let width = if spec.multiport {
                    network
                        .connections()
                        .iter()
                        .filter(|c| c.source == Source::ActorOutput { actor, port })
                        .count()
                } else {
                    1
                };
                outputs.push((0..width).map(|_| allocate()).collect());
            }
            wiring.actor_outputs.push(outputs);
            wiring
                .actor_inputs
                .push(vec![Vec::new(); interface.inputs.len()]);
        }

        let mut multiport_cursor: Vec<Vec<usize>> = wiring
            .actor_outputs
            .iter()
            .map(|ports| vec![0; ports.len()])
            .collect();

        for connection in network.connections() {
            let cell = match connection.source {
                Source::BoundaryInput { port } => wiring.boundary_inputs[port],
                Source::ActorOutput { actor, port } => {
                    let multiport = network
                        .actor(actor)
                        .and_then(|a| a.interface().outputs.get(port).map(|spec| spec.multiport))
                        .unwrap_or(false);
                    if multiport {
                        let channel = multiport_cursor[actor][port];
                        multiport_cursor[actor][port] += 1;
                        wiring.actor_outputs[actor][port][channel]
                    } else {
                        wiring.actor_outputs[actor][port][0]
                    }
                }
            };

            match connection.sink {
                Sink::ActorInput { actor, port } => {
                    wiring.actor_inputs[actor][port].push(Some(cell));
                }
                Sink::BoundaryOutput { port } => wiring.boundary_outputs[port] = Some(cell),
            }
        }

        for actor in 0..network.actor_count() {
            let Some(interface) = network.actor(actor).map(|actor| actor.interface().clone())
            else {
                continue;
            };
            for (port, spec) in interface.inputs.iter().enumerate() {
                let channels = &mut wiring.actor_inputs[actor][port];
                if !spec.multiport && channels.is_empty() {
                    channels.push(None);
                }
            }
        }

        wiring.cell_count = next_cell;
        wiring
    }
}
