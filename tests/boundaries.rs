//! Chunk boundary tests
//!
//! The same response is fed split at every byte offset, one byte at a time, and in
//! uneven chunk sizes. The event sequence must not depend on where the splits fall.

mod common;

use common::{METADATA, SEARCH, decode, decode_chunks, describe_all};
use pretty_assertions::assert_eq;
use zero_rets::Opts;

fn assert_split_invariant(opts: &Opts, body: &str) {
    let expected = describe_all(&decode(opts, body));
    let bytes = body.as_bytes();

    for split in 0..=bytes.len() {
        let events = decode_chunks(opts, &[&bytes[..split], &bytes[split..]]);
        assert_eq!(describe_all(&events), expected, "split at {split}");
    }

    let singles: Vec<&[u8]> = bytes.chunks(1).collect();
    assert_eq!(describe_all(&decode_chunks(opts, &singles)), expected);

    for size in [3, 7, 64] {
        let chunks: Vec<&[u8]> = bytes.chunks(size).collect();
        assert_eq!(describe_all(&decode_chunks(opts, &chunks)), expected, "chunks of {size}");
    }
}

#[test]
fn search_response() {
    assert_split_invariant(&Opts::default(), SEARCH);
}

#[test]
fn metadata_response() {
    assert_split_invariant(&Opts::metadata("METADATA-TABLE"), METADATA);
}

#[test]
fn entities_and_multibyte_text() {
    let body = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>
<!-- listing export -->
<RETS ReplyCode=\"0\" ReplyText=\"Opération réussie\">
<COUNT Records=\"1\"/>
<COLUMNS>\tName\tNote\t</COLUMNS>
<DATA>\tCafé &amp; Bar\t&lt;b&gt;日本&lt;/b&gt;\t</DATA>
<MAXROWS/>
</RETS>";
    assert_split_invariant(&Opts::default(), body);
    let lines = describe_all(&decode(&Opts::default(), body));
    assert_eq!(lines[0], "status 0 Opération réussie");
    assert_eq!(
        lines[3],
        r#"data [("Name", "Café & Bar"), ("Note", "<b>日本</b>")]"#
    );
}

#[test]
fn cdata_section() {
    let body = "<RETS ReplyCode=\"0\" ReplyText=\"\"><COLUMNS>\tA\t</COLUMNS><DATA><![CDATA[\t<x>\t]]></DATA></RETS>";
    assert_split_invariant(&Opts::default(), body);
    let lines = describe_all(&decode(&Opts::default(), body));
    assert_eq!(lines[2], r#"data [("A", "<x>")]"#);
}

#[test]
fn raw_response() {
    assert_split_invariant(&Opts::default().with_raw(true), SEARCH);
}
