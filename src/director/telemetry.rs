#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectorEvent {
    TickStarted {
        network: String,
        tick: u64,
    },
    ActorFired {
        network: String,
        tick: u64,
        actor: String,
        finished: bool,
    },
    ActorRetired {
        network: String,
        tick: u64,
        actor: String,
    },
    FixedPointReached {
        network: String,
        tick: u64,
        rounds: usize,
        known_cells: usize,
    },
    TickCompleted {
        network: String,
        tick: u64,
        firings: usize,
        proceed: bool,
    },
}

pub trait DirectorTelemetryPort: Send + Sync {
    fn on_event(&self, event: DirectorEvent);
}

#[derive(Default)]
pub struct NoopDirectorTelemetry;

impl DirectorTelemetryPort for NoopDirectorTelemetry {
    fn on_event(&self, _event: DirectorEvent) {}
}

/// Forwards director events to `tracing` under the `sr::director` target.
#[derive(Default)]
pub struct TracingDirectorTelemetry;

impl DirectorTelemetryPort for TracingDirectorTelemetry {
    fn on_event(&self, event: DirectorEvent) {
        match event {
            DirectorEvent::TickStarted { network, tick } => {
                tracing::debug!(target: "sr::director", network = %network, tick, "tick_started");
            }
            DirectorEvent::ActorFired {
                network,
                tick,
                actor,
                finished,
            } => {
                tracing::trace!(
                    target: "sr::director",
                    network = %network,
                    tick,
                    actor = %actor,
                    finished,
                    "actor_fired"
                );
            }
            DirectorEvent::ActorRetired {
                network,
                tick,
                actor,
            } => {
                tracing::info!(
                    target: "sr::director",
                    network = %network,
                    tick,
                    actor = %actor,
                    "actor_retired"
                );
            }
            DirectorEvent::FixedPointReached {
                network,
                tick,
                rounds,
                known_cells,
            } => {
                tracing::debug!(
                    target: "sr::director",
                    network = %network,
                    tick,
                    rounds,
                    known_cells,
                    "fixed_point_reached"
                );
            }
            DirectorEvent::TickCompleted {
                network,
                tick,
                firings,
                proceed,
            } => {
                tracing::debug!(
                    target: "sr::director",
                    network = %network,
                    tick,
                    firings,
                    proceed,
                    "tick_completed"
                );
            }
        }
    }
}
