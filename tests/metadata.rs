mod common;

use common::{METADATA, decode, describe_all, rows};
use pretty_assertions::assert_eq;
use zero_rets::{Event, Opts};

#[test]
fn metadata_table() {
    let events = decode(&Opts::metadata("METADATA-TABLE"), METADATA);
    assert_eq!(
        describe_all(&events),
        vec![
            "status 0 Success",
            "metadata-start METADATA-TABLE 1",
            r#"columns ["", "SystemName", "StandardName", ""]"#,
            r#"data [("SystemName", "ListPrice"), ("StandardName", "ListPrice")]"#,
            "metadata-end 1",
        ]
    );
    match &events[1] {
        Event::MetadataStart(block) => {
            assert_eq!(block.attributes.get("Resource"), Some("Property"));
            assert_eq!(block.attributes.get("Class"), Some("Residential"));
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn untracked_metadata_tag() {
    // Without a tracked tag the blocks are transparent containers
    let events = decode(&Opts::default(), METADATA);
    assert!(!events.iter().any(|e| matches!(e, Event::MetadataStart(_) | Event::MetadataEnd(_))));
    assert_eq!(rows(&events).len(), 1);
}

#[test]
fn sequences_and_inherited_delimiter() {
    let body = "<RETS ReplyCode=\"0\" ReplyText=\"Success\">
<DELIMITER value=\"7C\"/>
<METADATA-CLASS Resource=\"Property\">
<COLUMNS>|ClassName|</COLUMNS>
<DATA>|RES|</DATA>
<DATA>|LND|</DATA>
</METADATA-CLASS>
<METADATA-CLASS Resource=\"Agent\">
<DELIMITER value=\"09\"/>
<COLUMNS>\tClassName\tVisibleName\t</COLUMNS>
<DATA>\tAGT\tAgents\t</DATA>
</METADATA-CLASS>
</RETS>";
    let events = decode(&Opts::metadata("METADATA-CLASS"), body);
    let lines = describe_all(&events);
    let blocks: Vec<_> = lines
        .iter()
        .filter(|line| line.starts_with("metadata-"))
        .map(String::as_str)
        .collect();
    assert_eq!(
        blocks,
        vec![
            "metadata-start METADATA-CLASS 1",
            "metadata-end 1",
            "metadata-start METADATA-CLASS 2",
            "metadata-end 2",
        ]
    );

    let rows = rows(&events);
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[1].get("ClassName"), Some("LND"));
    assert_eq!(rows[2].get("VisibleName"), Some("Agents"));
}

#[test]
fn metadata_error_status() {
    let body = "<RETS ReplyCode=\"20503\" ReplyText=\"No Metadata Found\"></RETS>";
    let events = decode(&Opts::metadata("METADATA-TABLE"), body);
    assert_eq!(
        describe_all(&events),
        vec![
            "status 20503 No Metadata Found",
            "error RETS Server Error: 20503 (NO_METADATA_FOUND): No Metadata Found",
        ]
    );
}
