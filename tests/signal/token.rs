use sr_actors::{actor::ActorErrorKind, signal::Token};

#[test]
fn bits_accept_booleans_and_zero_or_one() {
    assert!(Token::Bool(true).as_bit().expect("bool is a bit"));
    assert!(!Token::Int(0).as_bit().expect("0 is a bit"));
    assert!(Token::Int(1).as_bit().expect("1 is a bit"));
}

#[test]
fn bits_reject_other_payloads() {
    let err = Token::Int(2).as_bit().expect_err("2 is not a bit");
    assert_eq!(err.kind, ActorErrorKind::InvalidPayload);

    let err = Token::from("high").as_bit().expect_err("text is not a bit");
    assert_eq!(err.kind, ActorErrorKind::InvalidPayload);
}

#[test]
fn tokens_serialize_untagged() {
    let tokens = vec![Token::Int(3), Token::Bool(true), Token::from("x")];
    let json = serde_json::to_value(&tokens).expect("tokens should serialize");
    assert_eq!(json, serde_json::json!([3, true, "x"]));

    let parsed: Vec<Token> = serde_json::from_value(json).expect("tokens should parse back");
    assert_eq!(parsed, tokens);
}
