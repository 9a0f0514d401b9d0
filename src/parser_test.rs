use crate::event::Event;
use crate::opts::Opts;
use crate::parser::StreamParser;

const BODY: &[u8] = b"<RETS ReplyCode=\"0\" ReplyText=\"ok\"><COLUMNS>\tA\t</COLUMNS><DATA>\t1\t</DATA></RETS>";

#[test]
fn needs_input_until_events_arrive() {
    let mut parser = StreamParser::new(&Opts::default());
    assert!(parser.needs_input());

    parser.feed(&BODY[..10]);
    assert!(parser.needs_input());
    assert!(parser.next_event().is_none());

    parser.feed(&BODY[10..]);
    assert!(!parser.needs_input());
    assert!(parser.is_finished());
    assert!(!parser.is_drained());

    assert_eq!(parser.events().count(), 3);
    assert!(parser.is_drained());
}

#[test]
fn feed_after_finish_is_ignored() {
    let mut parser = StreamParser::new(&Opts::default());
    parser.feed(BODY);
    parser.end();
    parser.feed(b"<RETS ReplyCode=\"20203\" ReplyText=\"x\"/>");
    assert_eq!(parser.events().count(), 3);
}

#[test]
fn abort_discards_queued_events() {
    let mut parser = StreamParser::new(&Opts::default());
    parser.feed(&BODY[..60]);
    assert!(parser.next_event().is_some());
    parser.abort();
    parser.feed(&BODY[60..]);
    parser.end();
    assert!(parser.next_event().is_none());
    assert!(parser.is_drained());
}

#[test]
fn end_without_input() {
    let mut parser = StreamParser::new(&Opts::default());
    parser.end();
    let events: Vec<_> = parser.events().collect();
    assert_eq!(events.len(), 1);
    assert!(matches!(&events[0], Event::Error(err) if err.is_fatal()));
    assert!(parser.is_drained());
}

#[test]
fn fatal_error_is_last() {
    let mut parser = StreamParser::new(&Opts::default());
    parser.feed(b"<RETS ReplyCode=\"0\" ReplyText=\"\"><DELIMITER value=\"X\"/><COLUMNS>\tA\t</COLUMNS>");
    parser.end();
    let events: Vec<_> = parser.events().collect();
    assert_eq!(events.len(), 2);
    assert!(events[1].is_terminal());
}
