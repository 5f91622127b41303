use std::sync::{Arc, Mutex};

use sr_actors::{
    actor::{Actor, ActorError, ActorErrorKind, ActorInterface, PortFrame, PortSpec, TickBoundary},
    director::{DirectorConfig, DirectorEvent, DirectorTelemetryPort, FixedPointDirector},
    library::{
        Current, DefaultMerge, NonStrictDelay, NonStrictDelayInitialized, NonStrictLogicGate,
        Operator, When,
    },
    network::Network,
    signal::{Signal, Token},
};

use crate::{bit, int};

/// Strict two-input adder that counts how often it fires.
struct StrictSum {
    interface: ActorInterface,
    fired: Arc<Mutex<usize>>,
}

impl StrictSum {
    fn new(fired: Arc<Mutex<usize>>) -> Self {
        Self {
            interface: ActorInterface::new(
                vec![PortSpec::single("a"), PortSpec::single("b")],
                vec![PortSpec::single("sum")],
            ),
            fired,
        }
    }
}

impl Actor for StrictSum {
    fn interface(&self) -> &ActorInterface {
        &self.interface
    }

    fn fire(&mut self, ports: &mut PortFrame) -> Result<(), ActorError> {
        *self.fired.lock().expect("counter lock") += 1;
        let a = ports.get(0, 0)?.expect_int()?;
        let b = ports.get(1, 0)?.expect_int()?;
        ports.send(0, 0, Token::Int(a + b))
    }
}

/// Agrees to fire while its input is unknown and refuses once it is known.
struct Fickle {
    interface: ActorInterface,
}

impl Actor for Fickle {
    fn interface(&self) -> &ActorInterface {
        &self.interface
    }

    fn is_strict(&self) -> bool {
        false
    }

    fn prefire(&mut self, ports: &mut PortFrame) -> Result<bool, ActorError> {
        Ok(!ports.is_known(0, 0)?)
    }

    fn fire(&mut self, ports: &mut PortFrame) -> Result<(), ActorError> {
        ports.send_clear(0, 0)
    }
}

/// Emits one token, then asks to stop.
struct OneShot {
    interface: ActorInterface,
}

impl Actor for OneShot {
    fn interface(&self) -> &ActorInterface {
        &self.interface
    }

    fn fire(&mut self, ports: &mut PortFrame) -> Result<(), ActorError> {
        ports.send(0, 0, Token::Int(1))
    }

    fn postfire(&mut self, _ports: &PortFrame, _boundary: &TickBoundary) -> Result<bool, ActorError> {
        Ok(false)
    }
}

#[derive(Default)]
struct RecordingTelemetry {
    events: Mutex<Vec<DirectorEvent>>,
}

impl DirectorTelemetryPort for RecordingTelemetry {
    fn on_event(&self, event: DirectorEvent) {
        self.events.lock().expect("events lock").push(event);
    }
}

/// `y = x AND (y one tick ago)`, starting from true.
fn latch() -> Network {
    let mut network = Network::new("latch");
    network.add_input("x").expect("input should be added");
    network.add_output("y").expect("output should be added");
    network
        .add_actor("gate", Box::new(NonStrictLogicGate::new(Operator::And)))
        .expect("gate should be added");
    network
        .add_actor(
            "memory",
            Box::new(NonStrictDelayInitialized::new(Token::Bool(true))),
        )
        .expect("delay should be added");
    network.link("x", "gate.input").expect("link");
    network.link("memory.output", "gate.input").expect("link");
    network.link("gate.output", "memory.input").expect("link");
    network.link("gate.output", "y").expect("link");
    network
}

#[test]
fn feedback_through_a_delay_converges_every_tick() {
    let mut director = FixedPointDirector::new(latch(), DirectorConfig::default());
    director.initialize().expect("director should initialize");

    let expected = [(true, true), (false, false), (true, false)];
    for (tick, (x, y)) in expected.into_iter().enumerate() {
        let report = director.iterate(&[bit(x)]).expect("tick should run");
        assert_eq!(report.tick, tick as u64 + 1);
        assert_eq!(report.outputs, vec![("y".to_string(), bit(y))]);
        assert!(report.proceed);
    }
}

#[test]
fn strict_actor_fires_once_all_inputs_are_known() {
    let fired = Arc::new(Mutex::new(0));
    let mut network = Network::new("sum");
    network.add_input("a").expect("input");
    network.add_input("b").expect("input");
    network.add_output("total").expect("output");
    network
        .add_actor("sum", Box::new(StrictSum::new(Arc::clone(&fired))))
        .expect("actor");
    network.link("a", "sum.a").expect("link");
    network.link("b", "sum.b").expect("link");
    network.link("sum.sum", "total").expect("link");

    let mut director = FixedPointDirector::new(network, DirectorConfig::default());
    director.initialize().expect("director should initialize");

    director.prefire();
    director.set_input(0, int(2)).expect("input should resolve");
    director.fire().expect("fire should converge");
    assert_eq!(*fired.lock().expect("counter lock"), 0);
    assert_eq!(director.output_named("total"), Some(Signal::Unknown));

    director.set_input(1, int(3)).expect("input should resolve");
    director.fire().expect("fire should converge");
    director.fire().expect("refiring after convergence is harmless");
    assert_eq!(*fired.lock().expect("counter lock"), 1);
    assert_eq!(director.output_named("total"), Some(int(5)));
    assert!(director.postfire().expect("postfire should succeed"));
}

#[test]
fn loop_without_a_delay_is_reported_at_postfire() {
    let mut network = Network::new("loop");
    network
        .add_actor("hold", Box::new(Current::new()))
        .expect("actor");
    network.link("hold.output", "hold.input").expect("link");

    let mut director = FixedPointDirector::new(network, DirectorConfig::default());
    director.initialize().expect("director should initialize");

    let err = director.iterate(&[]).expect_err("unknown input must be reported");
    assert_eq!(err.kind, ActorErrorKind::CausalityLoop);
    assert_eq!(err.actor.as_deref(), Some("hold"));
}

#[test]
fn prefire_changing_its_mind_is_a_monotonicity_violation() {
    let mut network = Network::new("fickle");
    network.add_input("x").expect("input");
    network
        .add_actor(
            "fickle",
            Box::new(Fickle {
                interface: ActorInterface::new(
                    vec![PortSpec::single("input")],
                    vec![PortSpec::single("output")],
                ),
            }),
        )
        .expect("actor");
    network
        .add_actor("merge", Box::new(DefaultMerge::new()))
        .expect("actor");
    network.link("fickle.output", "merge.preferred").expect("link");
    network.link("x", "merge.alternate").expect("link");
    network.link("merge.output", "fickle.input").expect("link");

    let mut director = FixedPointDirector::new(network, DirectorConfig::default());
    director.initialize().expect("director should initialize");

    let err = director.iterate(&[int(1)]).expect_err("second prefire must fail");
    assert_eq!(err.kind, ActorErrorKind::MonotonicityViolation);
    assert_eq!(err.actor.as_deref(), Some("fickle"));
}

#[test]
fn retired_actor_outputs_read_absent() {
    let mut network = Network::new("once");
    network.add_output("y").expect("output");
    network
        .add_actor(
            "shot",
            Box::new(OneShot {
                interface: ActorInterface::new(Vec::new(), vec![PortSpec::single("output")]),
            }),
        )
        .expect("actor");
    network.link("shot.output", "y").expect("link");

    let mut director = FixedPointDirector::new(network, DirectorConfig::default());
    director.initialize().expect("director should initialize");

    let first = director.iterate(&[]).expect("tick 1 should run");
    assert_eq!(first.outputs, vec![("y".to_string(), int(1))]);
    assert!(!first.proceed, "no actor is left to continue");
    assert!(director.is_retired(0));

    let second = director.iterate(&[]).expect("tick 2 should run");
    assert_eq!(second.outputs, vec![("y".to_string(), Signal::Absent)]);
}

#[test]
fn iteration_limit_ends_the_run() {
    let config = DirectorConfig {
        iterations: 2,
        ..DirectorConfig::default()
    };
    let mut director = FixedPointDirector::new(latch(), config);
    director.initialize().expect("director should initialize");

    assert!(director.iterate(&[bit(true)]).expect("tick 1").proceed);
    assert!(!director.iterate(&[bit(true)]).expect("tick 2").proceed);
}

/// Refuses to close a tick on which its input carried 13.
struct Superstitious {
    interface: ActorInterface,
}

impl Actor for Superstitious {
    fn interface(&self) -> &ActorInterface {
        &self.interface
    }

    fn fire(&mut self, _ports: &mut PortFrame) -> Result<(), ActorError> {
        Ok(())
    }

    fn postfire(&mut self, ports: &PortFrame, _boundary: &TickBoundary) -> Result<bool, ActorError> {
        if ports.signal(0, 0)? == &Signal::Present(Token::Int(13)) {
            return Err(ActorError::new(ActorErrorKind::InvalidPayload, "13"));
        }
        Ok(true)
    }
}

#[test]
fn initialize_recovers_from_a_failed_postfire() {
    let mut network = Network::new("partial");
    network.add_input("x").expect("input");
    network.add_output("y").expect("output");
    network
        .add_actor("delay", Box::new(NonStrictDelayInitialized::new(Token::Int(0))))
        .expect("actor");
    network
        .add_actor(
            "picky",
            Box::new(Superstitious {
                interface: ActorInterface::new(vec![PortSpec::single("input")], Vec::new()),
            }),
        )
        .expect("actor");
    network.link("x", "delay.input").expect("link");
    network.link("x", "picky.input").expect("link");
    network.link("delay.output", "y").expect("link");

    let mut director = FixedPointDirector::new(network, DirectorConfig::default());
    director.initialize().expect("director should initialize");

    let err = director
        .iterate(&[int(13)])
        .expect_err("picky rejects the tick");
    assert_eq!(err.actor.as_deref(), Some("picky"));

    director.initialize().expect("director should re-initialize");
    let report = director.iterate(&[int(1)]).expect("tick should run");
    assert_eq!(report.tick, 1);
    assert_eq!(report.outputs, vec![("y".to_string(), int(0))]);
}

#[test]
fn network_without_actors_stops_after_one_tick() {
    let mut network = Network::new("wire");
    network.add_input("x").expect("input");
    network.add_output("y").expect("output");
    network.link("x", "y").expect("link");

    let mut director = FixedPointDirector::new(network, DirectorConfig::default());
    director.initialize().expect("director should initialize");

    let report = director.iterate(&[int(3)]).expect("tick should run");
    assert_eq!(report.outputs, vec![("y".to_string(), int(3))]);
    assert!(!report.proceed, "no actor wants to continue");
}

#[test]
fn missing_and_unconnected_inputs_read_absent() {
    let mut network = Network::new("gate");
    network.add_input("x").expect("input");
    network.add_output("delayed").expect("output");
    network.add_output("sampled").expect("output");
    network
        .add_actor("delay", Box::new(NonStrictDelay::new(None)))
        .expect("actor");
    network.add_actor("when", Box::new(When::new())).expect("actor");
    network.link("x", "delay.input").expect("link");
    network.link("delay.output", "delayed").expect("link");
    network.link("when.output", "sampled").expect("link");

    let mut director = FixedPointDirector::new(network, DirectorConfig::default());
    director.initialize().expect("director should initialize");

    director.iterate(&[]).expect("tick 1 should run");
    let report = director.iterate(&[]).expect("tick 2 should run");
    assert_eq!(
        report.outputs,
        vec![
            ("delayed".to_string(), Signal::Absent),
            ("sampled".to_string(), Signal::Absent),
        ]
    );
}

#[test]
fn telemetry_sees_each_tick_boundary() {
    let telemetry = Arc::new(RecordingTelemetry::default());
    let mut director = FixedPointDirector::new(latch(), DirectorConfig::default())
        .with_telemetry(Arc::clone(&telemetry) as Arc<dyn DirectorTelemetryPort>);
    director.initialize().expect("director should initialize");
    director.iterate(&[bit(true)]).expect("tick should run");

    let events = telemetry.events.lock().expect("events lock");
    assert!(matches!(
        events.first(),
        Some(DirectorEvent::TickStarted { tick: 1, .. })
    ));
    assert!(
        events
            .iter()
            .any(|event| matches!(event, DirectorEvent::FixedPointReached { tick: 1, .. }))
    );
    assert!(matches!(
        events.last(),
        Some(DirectorEvent::TickCompleted {
            tick: 1,
            proceed: true,
            ..
        })
    ));
}
