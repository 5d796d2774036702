//! Parsing STOMP wire text into frames.

use stomp_session::{Command, FrameError, HeaderKind, parse_frame};

#[test]
fn parse_message_with_headers_and_body() {
    let text = "MESSAGE\ndestination:/user/topic/view/0\nsubscription:sub-0\nmessage-id:1234\ncontent-length:0\n\nbody\n\0";
    let frame = parse_frame(text).expect("parse");
    assert_eq!(frame.command(), Command::Message);
    assert_eq!(frame.headers().len(), 4);
    assert_eq!(frame.destination(), "/user/topic/view/0");
    assert_eq!(frame.headers().get("subscription"), Some("sub-0"));
    assert_eq!(frame.headers().get("message-id"), Some("1234"));
    assert_eq!(frame.body_text(), Some("body\n"));
}

#[test]
fn parsed_headers_are_typed() {
    let frame = parse_frame("MESSAGE\nmessage-id:1\nx-custom:y\n\n\0").expect("parse");
    let kind = |key: &str| frame.headers().get_header(key).map(|h| h.kind());
    assert_eq!(kind("message-id"), Some(HeaderKind::MessageId));
    assert_eq!(kind("x-custom"), Some(HeaderKind::Custom));
}

#[test]
fn no_blank_line_means_no_body() {
    let text = "MESSAGE\ndestination:/user/topic/view/0\nsubscription:sub-0\nmessage-id:1234\ncontent-length:0\0";
    let frame = parse_frame(text).expect("parse");
    assert_eq!(frame.command(), Command::Message);
    assert_eq!(frame.headers().len(), 4);
    assert_eq!(frame.body_text(), None);
}

#[test]
fn body_without_headers() {
    let frame = parse_frame("MESSAGE\n\nbody\n\0").expect("parse");
    assert_eq!(frame.command(), Command::Message);
    assert!(frame.headers().is_empty());
    assert_eq!(frame.body_text(), Some("body\n"));
}

#[test]
fn empty_body_is_present() {
    let frame = parse_frame("MESSAGE\n\n\0").expect("parse");
    assert!(frame.headers().is_empty());
    assert_eq!(frame.body_text(), Some(""));
}

#[test]
fn body_keeps_embedded_linefeeds() {
    let frame = parse_frame("MESSAGE\n\nbody\nbody\n\0").expect("parse");
    assert_eq!(frame.body_text(), Some("body\nbody\n"));
}

#[test]
fn only_one_trailing_nul_is_stripped() {
    let frame = parse_frame("MESSAGE\n\nab\0\0").expect("parse");
    assert_eq!(frame.body_text(), Some("ab\0"));

    let frame = parse_frame("MESSAGE\n\na\0b\0").expect("parse");
    assert_eq!(frame.body_text(), Some("a\0b"));
}

#[test]
fn body_without_terminator_is_kept() {
    let frame = parse_frame("MESSAGE\n\nbody").expect("parse");
    assert_eq!(frame.body_text(), Some("body"));
}

#[test]
fn header_value_splits_on_first_colon() {
    let frame =
        parse_frame("MESSAGE\ndestination:/a:b:c\nurl:http://h:8080/p\n\n\0").expect("parse");
    assert_eq!(frame.destination(), "/a:b:c");
    assert_eq!(frame.headers().get("url"), Some("http://h:8080/p"));
}

#[test]
fn header_values_are_not_unescaped() {
    let frame = parse_frame("MESSAGE\nx:a\\cb\\\\c\n\n\0").expect("parse");
    assert_eq!(frame.headers().get("x"), Some("a\\cb\\\\c"));
}

#[test]
fn duplicate_header_keys_keep_one_value() {
    let frame = parse_frame("MESSAGE\nfoo:1\nfoo:2\n\n\0").expect("parse");
    assert_eq!(frame.headers().len(), 1);
    assert!(frame.headers().contains("foo"));
}

#[test]
fn error_frame_message() {
    let frame =
        parse_frame("ERROR\nmessage:malformed frame received\ncontent-type:text/plain\n\nDetails\0")
            .expect("parse");
    assert_eq!(frame.command(), Command::Error);
    assert_eq!(frame.message(), "malformed frame received");
    assert_eq!(frame.body_text(), Some("Details"));
}

#[test]
fn connected_frame() {
    let frame = parse_frame("CONNECTED\nversion:1.2\nheart-beat:0,0\n\n\0").expect("parse");
    assert_eq!(frame.command(), Command::Connected);
    assert_eq!(frame.headers().get("version"), Some("1.2"));
    assert_eq!(frame.headers().get("heart-beat"), Some("0,0"));
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn two_blank_lines_are_malformed() {
    let err = parse_frame("MESSAGE\n\nbody\n\nbody\n\0").unwrap_err();
    assert_eq!(err, FrameError::MalformedFrame { segments: 3 });
}

#[test]
fn missing_command() {
    let err = parse_frame("\n\nbody\nbody\n\0").unwrap_err();
    assert_eq!(err, FrameError::MissingCommand);
}

#[test]
fn unknown_command() {
    let err = parse_frame("SOMECOMMAND\n\nbody\0").unwrap_err();
    assert_eq!(err, FrameError::UnrecognizedCommand("SOMECOMMAND".into()));
}

#[test]
fn command_with_carriage_return_is_rejected() {
    let err = parse_frame("CONNECTED\r\nversion:1.2\n\n\0").unwrap_err();
    assert_eq!(err, FrameError::UnrecognizedCommand("CONNECTED\r".into()));
}

#[test]
fn empty_text() {
    assert_eq!(parse_frame("").unwrap_err(), FrameError::EmptyFrame);
}
