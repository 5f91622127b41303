use std::collections::BTreeSet;

use crate::network::graph::{ActorId, Network, Sink, Source};

/// Firing order for one network.
///
/// Producers come before the consumers whose outputs depend on them. Any
/// order converges under the fixed-point director; a good one just needs
/// fewer rounds. Actors caught in a dependency cycle are appended in
/// declaration order and also listed in `cyclic`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schedule {
    order: Vec<ActorId>,
    cyclic: Vec<ActorId>,
}

impl Schedule {
    pub fn compute(network: &Network) -> Self {
        let count = network.actor_count();
        let causalities = network.causalities();

        let mut successors: Vec<BTreeSet<ActorId>> = vec![BTreeSet::new(); count];
        for connection in network.connections() {
            let (
                Source::ActorOutput {
                    actor: producer, ..
                },
                Sink::ActorInput {
                    actor: consumer,
                    port,
                },
            ) = (connection.source, connection.sink)
            else {
                continue;
            };
            if producer != consumer && causalities[consumer].is_consumed(port) {
                successors[producer].insert(consumer);
            }
        }

        let mut in_degree = vec![0usize; count];
        for consumers in &successors {
            for consumer in consumers {
                in_degree[*consumer] += 1;
            }
        }

        let mut ready: BTreeSet<ActorId> = (0..count).filter(|a| in_degree[*a] == 0).collect();
        let mut order = Vec::with_capacity(count);
        while let Some(actor) = ready.pop_first() {
            order.push(actor);
            for consumer in &successors[actor] {
                in_degree[*consumer] -= 1;
                if in_degree[*consumer] == 0 {
                    ready.insert(*consumer);
                }
            }
        }

        let scheduled: BTreeSet<ActorId> = order.iter().copied().collect();
        let cyclic: Vec<ActorId> = (0..count).filter(|a| !scheduled.contains(a)).collect();
        order.extend(cyclic.iter().copied());

        Self { order, cyclic }
    }

    pub fn order(&self) -> &[ActorId] {
        &self.order
    }

    pub fn cyclic(&self) -> &[ActorId] {
        &self.cyclic
    }

    pub fn is_acyclic(&self) -> bool {
        self.cyclic.is_empty()
    }
}
