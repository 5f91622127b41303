use crate::{
    actor::{
        Actor, ActorError, ActorInterface, FunctionDependency, PortFrame, PortSpec, TickBoundary,
        TickState, error::causality_loop,
    },
    signal::{Signal, Token},
};

pub const INPUT: usize = 0;
pub const OUTPUT: usize = 0;

/// One-tick delay whose output never waits on its input.
///
/// Tick `n` emits whatever the input was at tick `n - 1`, present or absent.
/// The first tick emits the initial value, or absent without one. Because the
/// output is independent of the current input, this actor breaks feedback
/// loops.
#[derive(Debug, Clone)]
pub struct NonStrictDelay {
    seed: Signal,
    memory: TickState<Signal>,
    interface: ActorInterface,
}

impl NonStrictDelay {
    pub fn new(initial_value: Option<Token>) -> Self {
        let seed = Signal::from(initial_value);
        Self {
            memory: TickState::new(seed.clone()),
            seed,
            interface: ActorInterface::new(
                vec![PortSpec::single("input")],
                vec![PortSpec::single("output")],
            ),
        }
    }

    /// What the next `fire` will emit.
    pub fn pending(&self) -> &Signal {
        self.memory.current()
    }
}

impl Actor for NonStrictDelay {
    fn interface(&self) -> &ActorInterface {
        &self.interface
    }

    fn is_strict(&self) -> bool {
        false
    }

    fn causality(&self) -> FunctionDependency {
        FunctionDependency::independent(&self.interface)
    }

    fn initialize(&mut self, boundary: &TickBoundary) -> Result<(), ActorError> {
        self.memory.commit(boundary, self.seed.clone());
        Ok(())
    }

    fn fire(&mut self, ports: &mut PortFrame) -> Result<(), ActorError> {
        ports.send_signal(OUTPUT, 0, self.memory.current().clone())
    }

    fn postfire(&mut self, ports: &PortFrame, boundary: &TickBoundary) -> Result<bool, ActorError> {
        let input = ports.signal(INPUT, 0)?;
        if !input.is_known() {
            return Err(causality_loop(
                "delay input is still unknown at the end of the tick",
            ));
        }
        self.memory.commit(boundary, input.clone());
        Ok(true)
    }
}

/// [`NonStrictDelay`] that always starts from a concrete initial value.
#[derive(Debug, Clone)]
pub struct NonStrictDelayInitialized {
    inner: NonStrictDelay,
}

impl NonStrictDelayInitialized {
    pub fn new(initial_value: Token) -> Self {
        Self {
            inner: NonStrictDelay::new(Some(initial_value)),
        }
    }

    pub fn pending(&self) -> &Signal {
        self.inner.pending()
    }
}

impl Actor for NonStrictDelayInitialized {
    fn interface(&self) -> &ActorInterface {
        self.inner.interface()
    }

    fn is_strict(&self) -> bool {
        false
    }

    fn causality(&self) -> FunctionDependency {
        self.inner.causality()
    }

    fn initialize(&mut self, boundary: &TickBoundary) -> Result<(), ActorError> {
        self.inner.initialize(boundary)
    }

    fn fire(&mut self, ports: &mut PortFrame) -> Result<(), ActorError> {
        self.inner.fire(ports)
    }

    fn postfire(&mut self, ports: &PortFrame, boundary: &TickBoundary) -> Result<bool, ActorError> {
        self.inner.postfire(ports, boundary)
    }
}
