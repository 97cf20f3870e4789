use super::*;

fn is_event(line: &ParsedLine) -> bool {
    matches!(line, ParsedLine::Event(_))
}

#[test]
fn feeds_complete_line_in_one_call() {
    let mut buf = LineBuffer::new();
    let out = buf.feed(b"{\"type\":\"session_end\",\"session_id\":\"session-1\"}\n");
    assert_eq!(out.len(), 1);
    assert!(is_event(&out[0]));
}

#[test]
fn preserves_partial_line_across_calls() {
    let mut buf = LineBuffer::new();
    let out = buf.feed(b"{\"type\":\"session_end\",\"ses");
    assert!(out.is_empty());
    let out = buf.feed(b"sion_id\":\"session-1\"}\n");
    assert_eq!(out.len(), 1);
    assert!(is_event(&out[0]));
}

#[test]
fn two_lines_in_one_read_both_parse() {
    let mut buf = LineBuffer::new();
    let out = buf.feed(
        b"{\"type\":\"session_end\",\"session_id\":\"session-1\"}\n{\"type\":\"session_end\",\"session_id\":\"session-2\"}\n",
    );
    assert_eq!(out.len(), 2);
}

#[test]
fn malformed_json_is_invalid_not_an_error() {
    let mut buf = LineBuffer::new();
    let out = buf.feed(b"not json at all\n");
    assert_eq!(out.len(), 1);
    assert!(matches!(out[0], ParsedLine::Invalid));
}

#[test]
fn unrecognized_type_still_parses_as_unknown_event() {
    let mut buf = LineBuffer::new();
    let out = buf.feed(b"{\"type\":\"something_new\"}\n");
    assert_eq!(out.len(), 1);
    match &out[0] {
        ParsedLine::Event(DashboardEvent::Unknown) => {}
        _ => panic!("expected Unknown event"),
    }
}

#[test]
fn oversized_unterminated_line_is_dropped() {
    let mut buf = LineBuffer::new();
    let junk = vec![b'x'; DASHBOARD_CLIENT_BUF_BYTES + 1];
    let out = buf.feed(&junk);
    assert_eq!(out.len(), 1);
    assert!(matches!(out[0], ParsedLine::Invalid));
}
