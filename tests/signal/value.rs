use sr_actors::{
    actor::ActorErrorKind,
    signal::{Signal, Token},
};

fn int(value: i64) -> Signal {
    Signal::Present(Token::Int(value))
}

#[test]
fn unknown_is_the_default_and_refines_everything() {
    assert_eq!(Signal::default(), Signal::Unknown);
    assert!(Signal::Unknown.refines(&Signal::Absent));
    assert!(Signal::Unknown.refines(&int(4)));
    assert!(int(4).refines(&int(4)));
}

#[test]
fn absent_and_present_are_incomparable() {
    assert!(!Signal::Absent.refines(&int(1)));
    assert!(!int(1).refines(&Signal::Absent));
    assert!(!int(1).refines(&int(2)));
    assert!(!Signal::Absent.refines(&Signal::Unknown));
}

#[test]
fn merge_resolves_unknown_once() {
    let mut signal = Signal::Unknown;
    assert!(signal.merge(int(5)).expect("first resolution is allowed"));
    assert_eq!(signal, int(5));

    assert!(!signal.merge(int(5)).expect("same value again is idempotent"));
    assert!(!signal.merge(Signal::Unknown).expect("unknown never lowers a value"));
    assert_eq!(signal, int(5));
}

#[test]
fn merge_rejects_changing_a_known_value() {
    let mut signal = Signal::Absent;
    let err = signal.merge(int(1)).expect_err("absent cannot become present");
    assert_eq!(err.kind, ActorErrorKind::MonotonicityViolation);
    assert_eq!(signal, Signal::Absent);

    let mut signal = int(1);
    let err = signal.merge(int(2)).expect_err("present value cannot change");
    assert_eq!(err.kind, ActorErrorKind::MonotonicityViolation);
}

#[test]
fn optional_token_maps_none_to_absent() {
    assert_eq!(Signal::from(None), Signal::Absent);
    assert_eq!(Signal::from(Some(Token::Bool(false))), Signal::Present(Token::Bool(false)));
    assert!(Signal::Absent.is_known());
    assert!(!Signal::Absent.is_present());
    assert_eq!(int(9).token(), Some(&Token::Int(9)));
}
