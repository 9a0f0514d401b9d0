#![allow(dead_code)]

use zero_rets::protocol::DataRow;
use zero_rets::{Event, Opts, StreamParser};

/// Feed `chunks` one by one, draining events after each, then end the stream
pub fn decode_chunks(opts: &Opts, chunks: &[&[u8]]) -> Vec<Event> {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let mut parser = StreamParser::new(opts);
    let mut events = Vec::new();
    for chunk in chunks {
        parser.feed(chunk);
        events.extend(parser.events());
    }
    parser.end();
    events.extend(parser.events());
    assert!(parser.is_drained());
    events
}

pub fn decode(opts: &Opts, body: &str) -> Vec<Event> {
    decode_chunks(opts, &[body.as_bytes()])
}

/// Compact one-line rendering, for comparing whole event sequences
pub fn describe(event: &Event) -> String {
    match event {
        Event::Status(status) => format!("status {} {}", status.reply_code, status.reply_text),
        Event::Columns(columns) => format!("columns {:?}", columns),
        Event::RawColumns(text) => format!("raw-columns {:?}", text),
        Event::Data(row) => format!("data {:?}", row.iter().collect::<Vec<_>>()),
        Event::RawData(text) => format!("raw-data {:?}", text),
        Event::Count(records) => format!("count {}", records),
        Event::MetadataStart(block) => format!("metadata-start {} {}", block.tag, block.sequence),
        Event::MetadataEnd(sequence) => format!("metadata-end {}", sequence),
        Event::Done { max_rows_exceeded } => format!("done {}", max_rows_exceeded),
        Event::Error(err) => format!("error {}", err),
    }
}

pub fn describe_all(events: &[Event]) -> Vec<String> {
    events.iter().map(describe).collect()
}

pub fn rows(events: &[Event]) -> Vec<DataRow> {
    events
        .iter()
        .filter_map(|event| match event {
            Event::Data(row) => Some(row.clone()),
            _ => None,
        })
        .collect()
}

pub fn row(pairs: &[(&str, &str)]) -> DataRow {
    pairs.iter().copied().collect()
}

pub const SEARCH: &str = "<RETS ReplyCode=\"0\" ReplyText=\"Success\">
<DELIMITER value=\"09\"/>
<COLUMNS>\tListingID\tPrice\tAddress\t</COLUMNS>
<DATA>\t123\t250000\t123 Main St\t</DATA>
<DATA>\t456\t350000\t456 Oak Ave\t</DATA>
</RETS>";

pub const METADATA: &str = "<RETS ReplyCode=\"0\" ReplyText=\"Success\">
<METADATA-TABLE Resource=\"Property\" Class=\"Residential\">
<DELIMITER value=\"09\"/>
<COLUMNS>\tSystemName\tStandardName\t</COLUMNS>
<DATA>\tListPrice\tListPrice\t</DATA>
</METADATA-TABLE>
</RETS>";
