use sr_actors::{
    actor::ActorErrorKind,
    library::{NonStrictLogicGate, Operator},
    signal::{Signal, Token},
    testing::ActorHarness,
};

use crate::{bit, int};

fn gate(operator: Operator, width: usize) -> ActorHarness<NonStrictLogicGate> {
    let mut harness = ActorHarness::with_widths(NonStrictLogicGate::new(operator), &[width], &[1]);
    harness.initialize().expect("gate should initialize");
    harness.begin_tick();
    harness
}

#[test]
fn and_is_decided_by_one_false_operand() {
    let mut harness = gate(Operator::And, 2);
    harness.set_input(0, 0, bit(false)).expect("input should resolve");

    assert!(harness.attempt().expect("gate should fire"));
    assert_eq!(harness.output(0, 0), bit(false));
}

#[test]
fn or_is_decided_by_one_true_operand() {
    let mut harness = gate(Operator::Or, 3);
    harness.set_input(0, 2, int(1)).expect("input should resolve");

    harness.attempt().expect("gate should fire");
    assert_eq!(harness.output(0, 0), bit(true));
}

#[test]
fn nand_negates_the_decided_result() {
    let mut harness = gate(Operator::Nand, 2);
    harness.set_input(0, 1, bit(false)).expect("input should resolve");

    harness.attempt().expect("gate should fire");
    assert_eq!(harness.output(0, 0), bit(true));
}

#[test]
fn undecided_gate_waits_for_remaining_operands() {
    let mut harness = gate(Operator::And, 2);
    harness.set_input(0, 0, bit(true)).expect("input should resolve");
    harness.attempt().expect("gate should fire");
    assert_eq!(harness.output(0, 0), Signal::Unknown);

    harness.set_input(0, 1, bit(true)).expect("input should resolve");
    harness.attempt().expect("gate should fire again");
    assert_eq!(harness.output(0, 0), bit(true));
}

#[test]
fn xor_needs_every_operand() {
    let mut harness = gate(Operator::Xor, 3);
    harness.set_input(0, 0, bit(true)).expect("input should resolve");
    harness.set_input(0, 1, bit(true)).expect("input should resolve");
    harness.attempt().expect("gate should fire");
    assert_eq!(harness.output(0, 0), Signal::Unknown);

    harness.set_input(0, 2, Signal::Absent).expect("input should resolve");
    harness.attempt().expect("gate should fire again");
    assert_eq!(harness.output(0, 0), bit(false));
}

#[test]
fn all_absent_operands_give_absent_output() {
    let mut harness = gate(Operator::Or, 2);
    harness.set_input(0, 0, Signal::Absent).expect("input should resolve");
    harness.set_input(0, 1, Signal::Absent).expect("input should resolve");

    harness.attempt().expect("gate should fire");
    assert_eq!(harness.output(0, 0), Signal::Absent);
}

#[test]
fn no_known_operand_means_no_output_attempt() {
    let mut harness = gate(Operator::Nor, 2);
    harness.attempt().expect("gate should fire");
    assert_eq!(harness.output(0, 0), Signal::Unknown);
}

#[test]
fn repeated_firing_with_no_new_information_is_idempotent() {
    let mut harness = gate(Operator::And, 2);
    harness.set_input(0, 0, bit(false)).expect("input should resolve");
    for _ in 0..4 {
        harness.attempt().expect("refiring should not violate monotonicity");
    }
    assert_eq!(harness.output(0, 0), bit(false));

    harness.set_input(0, 1, bit(true)).expect("input should resolve");
    harness.attempt().expect("more information must not change the output");
    assert_eq!(harness.output(0, 0), bit(false));
}

#[test]
fn binary_gate_rejects_wrong_width() {
    let mut harness =
        ActorHarness::with_widths(NonStrictLogicGate::binary(Operator::Xnor), &[3], &[1]);
    let err = harness.prefire().expect_err("three channels must be rejected");
    assert_eq!(err.kind, ActorErrorKind::InvalidConfiguration);

    let mut harness =
        ActorHarness::with_widths(NonStrictLogicGate::binary(Operator::Xnor), &[2], &[1]);
    assert!(harness.prefire().expect("two channels are accepted"));
}

#[test]
fn non_bit_payload_is_fatal() {
    let mut harness = gate(Operator::And, 1);
    harness
        .set_input(0, 0, Signal::Present(Token::Int(7)))
        .expect("input should resolve");

    let err = harness.attempt().expect_err("7 is not a bit");
    assert_eq!(err.kind, ActorErrorKind::InvalidPayload);
}

#[test]
fn operators_parse_from_names() {
    assert_eq!("XNOR".parse::<Operator>().expect("xnor parses"), Operator::Xnor);
    assert_eq!(" and ".parse::<Operator>().expect("and parses"), Operator::And);
    let err = "imply".parse::<Operator>().expect_err("imply is not an operator");
    assert_eq!(err.kind, ActorErrorKind::InvalidConfiguration);
    assert_eq!(Operator::Nor.to_string(), "nor");
}
