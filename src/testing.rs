use crate::{
    actor::{Actor, ActorError, PortFrame, TickBoundary},
    signal::Signal,
};

/// Drives a single actor through ticks by hand, without a director.
///
/// Each tick: [`begin_tick`](Self::begin_tick), resolve inputs with
/// [`set_input`](Self::set_input), call `prefire`/`fire` as often as the
/// scenario needs, then [`postfire`](Self::postfire) once.
#[derive(Debug)]
pub struct ActorHarness<A: Actor> {
    actor: A,
    frame: PortFrame,
}

impl<A: Actor> ActorHarness<A> {
    /// Every port one channel wide.
    pub fn new(actor: A) -> Self {
        let interface = actor.interface();
        let inputs = vec![1; interface.inputs.len()];
        let outputs = vec![1; interface.outputs.len()];
        Self::with_widths(actor, &inputs, &outputs)
    }

    pub fn with_widths(actor: A, input_widths: &[usize], output_widths: &[usize]) -> Self {
        Self {
            actor,
            frame: PortFrame::new(input_widths, output_widths),
        }
    }

    pub fn actor(&self) -> &A {
        &self.actor
    }

    pub fn frame(&self) -> &PortFrame {
        &self.frame
    }

    pub fn initialize(&mut self) -> Result<(), ActorError> {
        self.frame.reset();
        self.actor.initialize(&TickBoundary::new())
    }

    pub fn begin_tick(&mut self) {
        self.frame.reset();
    }

    pub fn set_input(
        &mut self,
        port: usize,
        channel: usize,
        signal: Signal,
    ) -> Result<bool, ActorError> {
        self.frame.set_input(port, channel, signal)
    }

    pub fn prefire(&mut self) -> Result<bool, ActorError> {
        self.actor.prefire(&mut self.frame)
    }

    pub fn fire(&mut self) -> Result<(), ActorError> {
        self.actor.fire(&mut self.frame)
    }

    /// `prefire`, then `fire` when it agrees.
    pub fn attempt(&mut self) -> Result<bool, ActorError> {
        let ready = self.prefire()?;
        if ready {
            self.fire()?;
        }
        Ok(ready)
    }

    pub fn postfire(&mut self) -> Result<bool, ActorError> {
        self.actor.postfire(&self.frame, &TickBoundary::new())
    }

    pub fn output(&self, port: usize, channel: usize) -> Signal {
        self.frame
            .output(port, channel)
            .cloned()
            .unwrap_or_default()
    }
}
