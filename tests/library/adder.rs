use sr_actors::{
    actor::ActorErrorKind,
    library::{NonStrictThreeBitAdder, adder},
    signal::Signal,
    testing::ActorHarness,
};

use crate::{bit, int};

fn adder_with(width: usize) -> ActorHarness<NonStrictThreeBitAdder> {
    let mut harness = ActorHarness::with_widths(NonStrictThreeBitAdder::new(), &[width], &[1, 1]);
    harness.begin_tick();
    harness
}

#[test]
fn adder_requires_exactly_three_channels() {
    for width in [0, 2, 4] {
        let mut harness = adder_with(width);
        let err = harness.prefire().expect_err("wrong width must be fatal");
        assert_eq!(err.kind, ActorErrorKind::InvalidConfiguration);
    }
}

#[test]
fn carry_is_known_from_two_ones() {
    let mut harness = adder_with(3);
    harness.set_input(0, 0, int(1)).expect("input should resolve");
    harness.set_input(0, 2, bit(true)).expect("input should resolve");

    harness.attempt().expect("adder should fire");
    assert_eq!(harness.output(adder::HIGH_BIT, 0), int(1));
    assert_eq!(harness.output(adder::LOW_BIT, 0), Signal::Unknown);

    harness.set_input(0, 1, int(1)).expect("input should resolve");
    harness.attempt().expect("adder should fire again");
    assert_eq!(harness.output(adder::HIGH_BIT, 0), int(1));
    assert_eq!(harness.output(adder::LOW_BIT, 0), int(1));
}

#[test]
fn partial_inputs_without_two_ones_decide_nothing() {
    let mut harness = adder_with(3);
    harness.set_input(0, 0, int(1)).expect("input should resolve");
    harness.set_input(0, 1, int(0)).expect("input should resolve");

    harness.attempt().expect("adder should fire");
    assert_eq!(harness.output(adder::HIGH_BIT, 0), Signal::Unknown);
    assert_eq!(harness.output(adder::LOW_BIT, 0), Signal::Unknown);
}

#[test]
fn absent_inputs_count_as_zero() {
    let mut harness = adder_with(3);
    harness.set_input(0, 0, int(1)).expect("input should resolve");
    harness.set_input(0, 1, Signal::Absent).expect("input should resolve");
    harness.set_input(0, 2, int(0)).expect("input should resolve");

    harness.attempt().expect("adder should fire");
    assert_eq!(harness.output(adder::HIGH_BIT, 0), int(0));
    assert_eq!(harness.output(adder::LOW_BIT, 0), int(1));
}
