use port_probe_rs::ports::{parse_ports, PortParseError};

#[test]
fn parse_range_list_and_single() {
    assert_eq!(parse_ports("20-25").expect("parse ok"), vec![20, 21, 22, 23, 24, 25]);
    assert_eq!(parse_ports("80,443,22").expect("parse ok"), vec![80, 443, 22]);
    assert_eq!(parse_ports("8080").expect("parse ok"), vec![8080]);
}

#[test]
fn reversed_range_is_empty_not_error() {
    assert_eq!(parse_ports("25-20").expect("parse ok"), Vec::<i64>::new());
}

#[test]
fn errors_are_distinguished() {
    assert!(matches!(
        parse_ports("abc"),
        Err(PortParseError::InvalidNumber { token }) if token == "abc"
    ));
    assert!(matches!(
        parse_ports("1-2-3"),
        Err(PortParseError::MalformedRange { .. })
    ));
    assert!(matches!(
        parse_ports("1-x"),
        Err(PortParseError::InvalidNumber { token }) if token == "x"
    ));
}

#[test]
fn error_messages_name_the_offending_text() {
    let err = parse_ports("22,ssh").unwrap_err();
    assert!(err.to_string().contains("ssh"));
    let err = parse_ports("1-2-3").unwrap_err();
    assert!(err.to_string().contains("1-2-3"));
}
