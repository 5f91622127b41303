use crate::actor::{
    causality::FunctionDependency, error::ActorError, frame::PortFrame,
    interface::ActorInterface,
};

/// Proof that the caller is at a tick boundary: inside `initialize` or
/// `postfire`. Only the director and the test harness can create one.
#[derive(Debug)]
pub struct TickBoundary {
    _private: (),
}

impl TickBoundary {
    pub(crate) fn new() -> Self {
        Self { _private: () }
    }
}

/// State carried from one tick to the next.
///
/// Reading is free; writing needs a [`TickBoundary`], which keeps repeated
/// `fire` calls within a tick from advancing it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickState<T> {
    committed: T,
}

impl<T> TickState<T> {
    pub fn new(initial: T) -> Self {
        Self { committed: initial }
    }

    pub fn current(&self) -> &T {
        &self.committed
    }

    pub fn commit(&mut self, _boundary: &TickBoundary, next: T) {
        self.committed = next;
    }
}

/// The firing protocol every actor in a synchronous-reactive network follows.
///
/// Within one tick `prefire` and `fire` may run any number of times while the
/// director searches for a fixed point. Each run may only add outputs: a
/// channel resolved to present or absent stays that way. `postfire` runs once
/// per tick after convergence and is the only place carried state advances.
pub trait Actor: Send {
    fn interface(&self) -> &ActorInterface;

    /// Strict actors are fired only once all of their inputs are known.
    fn is_strict(&self) -> bool {
        true
    }

    fn causality(&self) -> FunctionDependency {
        FunctionDependency::full(self.interface())
    }

    fn initialize(&mut self, _boundary: &TickBoundary) -> Result<(), ActorError> {
        Ok(())
    }

    fn prefire(&mut self, _ports: &mut PortFrame) -> Result<bool, ActorError> {
        Ok(true)
    }

    fn fire(&mut self, ports: &mut PortFrame) -> Result<(), ActorError>;

    /// Returns `false` to retire the actor for the rest of the run.
    fn postfire(
        &mut self,
        _ports: &PortFrame,
        _boundary: &TickBoundary,
    ) -> Result<bool, ActorError> {
        Ok(true)
    }
}
