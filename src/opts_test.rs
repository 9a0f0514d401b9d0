use crate::{Charset, Opts, SuppressPolicy};
use crate::error::ErrorKind;
use crate::protocol::ReplyStatus;

#[test]
fn default_opts() {
    let opts = Opts::default();
    assert!(opts.metadata_tag.is_none());
    assert!(!opts.raw);
    assert_eq!(opts.charset, Charset::Utf8);
    assert_eq!(opts.suppress_count, SuppressPolicy::AnyError);
    assert_eq!(opts.suppress_rows, SuppressPolicy::Never);
    assert_eq!(opts.read_chunk_size, 8192);
    assert_eq!(opts.channel_capacity, 64);
}

#[test]
fn metadata_opts() {
    let opts = Opts::metadata("METADATA-TABLE").with_raw(true);
    assert_eq!(opts.metadata_tag.as_deref(), Some("METADATA-TABLE"));
    assert!(opts.raw);
    assert_eq!(opts.read_chunk_size, 8192);
}

#[test]
fn parse_charset_labels() {
    assert_eq!("UTF-8".parse::<Charset>().unwrap(), Charset::Utf8);
    assert_eq!(" iso-8859-1 ".parse::<Charset>().unwrap(), Charset::Latin1);
    assert_eq!("latin1".parse::<Charset>().unwrap(), Charset::Latin1);

    let err = "shift_jis".parse::<Charset>().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Processing);
    assert!(err.to_string().contains("shift_jis"));
}

#[test]
fn charset_from_content_type() {
    assert_eq!(
        Charset::from_content_type("text/xml; charset=ISO-8859-1").unwrap(),
        Some(Charset::Latin1)
    );
    assert_eq!(
        Charset::from_content_type("text/xml;Charset=\"utf-8\"").unwrap(),
        Some(Charset::Utf8)
    );
    assert_eq!(Charset::from_content_type("text/xml").unwrap(), None);
    assert!(Charset::from_content_type("text/xml; charset=koi8-r").is_err());
}

#[test]
fn latin1_decode() {
    assert_eq!(&*Charset::Latin1.decode(b"abc"), b"abc");
    assert_eq!(&*Charset::Latin1.decode(&[b'C', 0xE9]), "Cé".as_bytes());
    assert_eq!(&*Charset::Utf8.decode(&[0xE9]), &[0xE9]);
}

#[test]
fn suppress_policy() {
    let ok = ReplyStatus::new("0", "Success");
    let none = ReplyStatus::new("20201", "No Records Found");
    let other = ReplyStatus::new("20203", "Misc Error");

    assert!(!SuppressPolicy::AnyError.suppresses(&ok));
    assert!(SuppressPolicy::AnyError.suppresses(&none));
    assert!(SuppressPolicy::AnyError.suppresses(&other));

    assert!(SuppressPolicy::NoRecordsFound.suppresses(&none));
    assert!(!SuppressPolicy::NoRecordsFound.suppresses(&other));

    assert!(!SuppressPolicy::Never.suppresses(&none));
}
