use sr_actors::{
    actor::{ActorErrorKind, PortFrame},
    signal::{Signal, Token},
};

#[test]
fn inputs_become_known_channel_by_channel() {
    let mut frame = PortFrame::new(&[2, 1], &[1]);
    assert!(!frame.all_inputs_known());

    frame
        .set_input(0, 0, Signal::Absent)
        .expect("channel should resolve");
    frame
        .set_input(1, 0, Signal::Present(Token::Int(3)))
        .expect("channel should resolve");
    assert!(!frame.all_inputs_known());
    assert!(!frame.is_port_known(0));
    assert!(frame.is_port_known(1));

    frame
        .set_input(0, 1, Signal::present(true))
        .expect("channel should resolve");
    assert!(frame.all_inputs_known());
}

#[test]
fn outputs_resolve_once() {
    let mut frame = PortFrame::new(&[], &[1]);
    assert!(!frame.is_output_known(0, 0).expect("channel exists"));

    frame.send(0, 0, Token::Int(4)).expect("first write succeeds");
    assert!(frame.is_output_known(0, 0).expect("channel exists"));
    frame
        .send(0, 0, Token::Int(4))
        .expect("repeating the same value is harmless");

    let err = frame
        .send_clear(0, 0)
        .expect_err("a resolved output cannot change");
    assert_eq!(err.kind, ActorErrorKind::MonotonicityViolation);

    let err = frame
        .is_output_known(1, 0)
        .expect_err("missing port must be reported");
    assert_eq!(err.kind, ActorErrorKind::Internal);
}
