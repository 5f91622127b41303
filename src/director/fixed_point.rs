use std::{collections::BTreeSet, fmt, sync::Arc};

use crate::{
    actor::{
        Actor, PortFrame, TickBoundary,
        error::{ActorError, causality_loop, internal_error, monotonicity_violation},
    },
    director::{
        telemetry::{DirectorEvent, DirectorTelemetryPort, NoopDirectorTelemetry},
        types::{DirectorConfig, TickReport},
    },
    network::{
        ActorId, Network, Schedule,
        wiring::{CellId, Wiring},
    },
    signal::Signal,
};

/// Runs one network tick by tick, searching each tick for the least fixed
/// point of its actors.
///
/// Every tick follows the same protocol: [`prefire`](Self::prefire) resets
/// all cells to unknown, the caller drives the boundary inputs,
/// [`fire`](Self::fire) repeats rounds over the schedule until a round
/// resolves no new cell, and [`postfire`](Self::postfire) lets every actor
/// that fired commit its carried state. [`iterate`](Self::iterate) does all
/// of it in one call.
pub struct FixedPointDirector {
    network: Network,
    wiring: Wiring,
    schedule: Schedule,
    strict: Vec<bool>,
    config: DirectorConfig,
    telemetry: Arc<dyn DirectorTelemetryPort>,
    cells: Vec<Signal>,
    known_cells: usize,
    tick: u64,
    rounds: usize,
    firings: usize,
    allowed_to_fire: BTreeSet<ActorId>,
    finished_firing: BTreeSet<ActorId>,
    retired: BTreeSet<ActorId>,
}

impl fmt::Debug for FixedPointDirector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FixedPointDirector")
            .field("network", &self.network)
            .field("schedule", &self.schedule)
            .field("tick", &self.tick)
            .field("known_cells", &self.known_cells)
            .field("retired", &self.retired)
            .finish()
    }
}

impl FixedPointDirector {
    pub fn new(network: Network, config: DirectorConfig) -> Self {
        let wiring = Wiring::build(&network);
        let schedule = Schedule::compute(&network);
        let strict = (0..network.actor_count())
            .map(|id| network.actor(id).is_some_and(|actor| actor.is_strict()))
            .collect();
        let cells = vec![Signal::Unknown; wiring.cell_count];

        Self {
            network,
            wiring,
            schedule,
            strict,
            config,
            telemetry: Arc::new(NoopDirectorTelemetry),
            cells,
            known_cells: 0,
            tick: 0,
            rounds: 0,
            firings: 0,
            allowed_to_fire: BTreeSet::new(),
            finished_firing: BTreeSet::new(),
            retired: BTreeSet::new(),
        }
    }

    pub fn with_telemetry(mut self, telemetry: Arc<dyn DirectorTelemetryPort>) -> Self {
        self.telemetry = telemetry;
        self
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn config(&self) -> &DirectorConfig {
        &self.config
    }

    /// The current tick, counted from 1. Zero before the first `prefire`.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn is_retired(&self, actor: ActorId) -> bool {
        self.retired.contains(&actor)
    }

    pub fn initialize(&mut self) -> Result<(), ActorError> {
        self.tick = 0;
        self.reset_tick_state();
        self.retired.clear();

        let boundary = TickBoundary::new();
        for id in 0..self.network.actor_count() {
            let name = self.network.actor_name(id).to_string();
            let actor = self.actor_mut(id)?;
            actor
                .initialize(&boundary)
                .map_err(|err| err.within(name))?;
        }
        Ok(())
    }

    pub fn prefire(&mut self) {
        self.tick += 1;
        self.reset_tick_state();
        self.telemetry.on_event(DirectorEvent::TickStarted {
            network: self.network.name().to_string(),
            tick: self.tick,
        });
    }

    /// Resolves one boundary input for the current tick. Returns whether the
    /// cell changed from unknown.
    pub fn set_input(&mut self, port: usize, signal: Signal) -> Result<bool, ActorError> {
        let cell = *self.wiring.boundary_inputs.get(port).ok_or_else(|| {
            internal_error(format!(
                "network '{}' has no boundary input {port}",
                self.network.name()
            ))
        })?;
        self.write_cell(cell, signal)
    }

    /// Fires actors in schedule order until a whole round resolves no new
    /// cell. May be called again within the same tick once more boundary
    /// inputs are known; `max_rounds_per_tick` bounds each call on its own.
    pub fn fire(&mut self) -> Result<(), ActorError> {
        let order = self.schedule.order().to_vec();
        let mut rounds_this_call = 0usize;
        loop {
            if rounds_this_call >= self.config.max_rounds_per_tick {
                return Err(internal_error(format!(
                    "network '{}' did not converge within {} rounds in tick {}",
                    self.network.name(),
                    self.config.max_rounds_per_tick,
                    self.tick
                )));
            }

            let known_before = self.known_cells;
            for id in &order {
                if self.retired.contains(id) {
                    self.clear_unknown_outputs_of(*id);
                } else {
                    self.fire_actor(*id)?;
                }
            }
            rounds_this_call += 1;
            self.rounds += 1;

            if self.known_cells == known_before {
                break;
            }
        }

        self.telemetry.on_event(DirectorEvent::FixedPointReached {
            network: self.network.name().to_string(),
            tick: self.tick,
            rounds: self.rounds,
            known_cells: self.known_cells,
        });
        Ok(())
    }

    /// Closes the tick. Fails if any actor input is still unknown, otherwise
    /// runs `postfire` once on every actor that fired this tick. Returns
    /// `false` once no actor wants to continue or the iteration limit is hit.
    /// A network without actors never continues.
    ///
    /// Actors are postfired one after another, so an error leaves the ones
    /// before the failing actor already committed. After an error the
    /// director must be re-initialized before running another tick.
    pub fn postfire(&mut self) -> Result<bool, ActorError> {
        let count = self.network.actor_count();
        for id in 0..count {
            if !self.all_inputs_known(id) {
                return Err(causality_loop(format!(
                    "unknown inputs remain in tick {}; possible causality loop",
                    self.tick
                ))
                .within(self.network.actor_name(id)));
            }
        }

        let boundary = TickBoundary::new();
        for id in 0..count {
            if self.retired.contains(&id) || !self.allowed_to_fire.contains(&id) {
                continue;
            }
            let name = self.network.actor_name(id).to_string();
            let frame = self.frame_for(id);
            let proceed = self
                .actor_mut(id)?
                .postfire(&frame, &boundary)
                .map_err(|err| err.within(name.as_str()))?;
            if !proceed {
                self.retired.insert(id);
                self.telemetry.on_event(DirectorEvent::ActorRetired {
                    network: self.network.name().to_string(),
                    tick: self.tick,
                    actor: name,
                });
            }
        }

        let mut proceed = self.retired.len() < count;
        if self.config.iterations > 0 && self.tick >= self.config.iterations {
            proceed = false;
        }

        self.telemetry.on_event(DirectorEvent::TickCompleted {
            network: self.network.name().to_string(),
            tick: self.tick,
            firings: self.firings,
            proceed,
        });
        Ok(proceed)
    }

    /// The value of one boundary output in the current tick. An unconnected
    /// output reads absent.
    pub fn output(&self, port: usize) -> Option<Signal> {
        self.wiring
            .boundary_outputs
            .get(port)
            .map(|cell| cell.map_or(Signal::Absent, |cell| self.cells[cell].clone()))
    }

    pub fn output_named(&self, name: &str) -> Option<Signal> {
        self.network
            .output_index(name)
            .and_then(|port| self.output(port))
    }

    pub fn outputs(&self) -> Vec<(String, Signal)> {
        self.network
            .outputs()
            .iter()
            .enumerate()
            .map(|(port, name)| (name.clone(), self.output(port).unwrap_or_default()))
            .collect()
    }

    /// Runs one whole tick. Inputs are given in boundary order; missing or
    /// unknown entries are driven absent.
    pub fn iterate(&mut self, inputs: &[Signal]) -> Result<TickReport, ActorError> {
        self.prefire();
        for port in 0..self.network.inputs().len() {
            let signal = match inputs.get(port) {
                Some(signal) if signal.is_known() => signal.clone(),
                _ => Signal::Absent,
            };
            self.set_input(port, signal)?;
        }
        self.fire()?;
        let outputs = self.outputs();
        let proceed = self.postfire()?;

        Ok(TickReport {
            tick: self.tick,
            rounds: self.rounds,
            firings: self.firings,
            outputs,
            proceed,
        })
    }

    fn fire_actor(&mut self, id: ActorId) -> Result<(), ActorError> {
        if self.finished_firing.contains(&id) {
            return Ok(());
        }
        // Checked before firing: a self-loop can resolve inputs mid-firing.
        let inputs_known = self.all_inputs_known(id);
        if self.strict[id] && !inputs_known {
            return Ok(());
        }

        let name = self.network.actor_name(id).to_string();
        let mut frame = self.frame_for(id);

        let ready = self
            .actor_mut(id)?
            .prefire(&mut frame)
            .map_err(|err| err.within(name.as_str()))?;
        if !ready {
            if self.allowed_to_fire.contains(&id) {
                return Err(monotonicity_violation(format!(
                    "prefire returned false after returning true earlier in tick {}",
                    self.tick
                ))
                .within(name));
            }
            // prefire may already have resolved outputs, e.g. a disabled composite.
            return self.absorb_outputs(id, &name, &frame);
        }

        self.allowed_to_fire.insert(id);
        self.actor_mut(id)?
            .fire(&mut frame)
            .map_err(|err| err.within(name.as_str()))?;
        if inputs_known {
            self.finished_firing.insert(id);
            frame.clear_unknown_outputs();
        }
        self.absorb_outputs(id, &name, &frame)?;
        self.firings += 1;

        self.telemetry.on_event(DirectorEvent::ActorFired {
            network: self.network.name().to_string(),
            tick: self.tick,
            actor: name,
            finished: inputs_known,
        });
        Ok(())
    }

    fn frame_for(&self, id: ActorId) -> PortFrame {
        let read =
            |cell: &Option<CellId>| cell.map_or(Signal::Absent, |cell| self.cells[cell].clone());
        let inputs = self.wiring.actor_inputs[id]
            .iter()
            .map(|channels| channels.iter().map(read).collect())
            .collect();
        let outputs = self.wiring.actor_outputs[id]
            .iter()
            .map(|channels| {
                channels
                    .iter()
                    .map(|cell| self.cells[*cell].clone())
                    .collect()
            })
            .collect();
        PortFrame::from_signals(inputs, outputs)
    }

    fn all_inputs_known(&self, id: ActorId) -> bool {
        self.wiring.actor_inputs[id]
            .iter()
            .flatten()
            .all(|cell| cell.is_none_or(|cell| self.cells[cell].is_known()))
    }

    fn absorb_outputs(
        &mut self,
        id: ActorId,
        name: &str,
        frame: &PortFrame,
    ) -> Result<(), ActorError> {
        for (port, channels) in frame.outputs().iter().enumerate() {
            for (channel, signal) in channels.iter().enumerate() {
                let cell = self.wiring.actor_outputs[id][port][channel];
                self.write_cell(cell, signal.clone())
                    .map_err(|err| err.within(name))?;
            }
        }
        Ok(())
    }

    fn clear_unknown_outputs_of(&mut self, id: ActorId) {
        for port in 0..self.wiring.actor_outputs[id].len() {
            for channel in 0..self.wiring.actor_outputs[id][port].len() {
                let cell = self.wiring.actor_outputs[id][port][channel];
                if !self.cells[cell].is_known() {
                    self.cells[cell] = Signal::Absent;
                    self.known_cells += 1;
                }
            }
        }
    }

    fn write_cell(&mut self, cell: CellId, signal: Signal) -> Result<bool, ActorError> {
        let changed = self.cells[cell].merge(signal)?;
        if changed {
            self.known_cells += 1;
        }
        Ok(changed)
    }

    fn reset_tick_state(&mut self) {
        self.cells.iter_mut().for_each(|cell| *cell = Signal::Unknown);
        self.known_cells = 0;
        self.rounds = 0;
        self.firings = 0;
        self.allowed_to_fire.clear();
        self.finished_firing.clear();
    }

    fn actor_mut(&mut self, id: ActorId) -> Result<&mut (dyn Actor + 'static), ActorError> {
        self.network
            .actor_mut(id)
            .ok_or_else(|| internal_error(format!("no actor with id {id}")))
    }
}
