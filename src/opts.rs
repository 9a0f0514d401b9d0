use std::borrow::Cow;
use std::str::FromStr;

use smart_default::SmartDefault;

use crate::constant::REPLY_CODE_NO_RECORDS_FOUND;
use crate::error::{Error, ProcessingError};
use crate::protocol::response::ReplyStatus;

/// A configuration for one response decode
///
/// ```rs
/// let mut opts = Opts::default();
/// opts.metadata_tag = Some("METADATA-TABLE".to_string());
///
/// let charset = Charset::from_content_type("text/xml; charset=ISO-8859-1")?.unwrap_or_default();
/// let opts = Opts::default().with_charset(charset);
/// ```
#[derive(Debug, Clone, SmartDefault)]
pub struct Opts {
    /// Metadata element whose instances are tracked as blocks (e.g. `METADATA-TABLE`).
    /// `None` decodes the response as a plain search result.
    pub metadata_tag: Option<String>,

    /// Emit COLUMNS/DATA text verbatim instead of split fields and keyed rows
    pub raw: bool,

    /// Encoding of the response bytes
    pub charset: Charset,

    /// Which non-zero top-level reply codes suppress COUNT events
    #[default(SuppressPolicy::AnyError)]
    pub suppress_count: SuppressPolicy,

    /// Which non-zero top-level reply codes suppress DATA events
    #[default(SuppressPolicy::Never)]
    pub suppress_rows: SuppressPolicy,

    /// Bytes requested from the upstream reader per read (reader adapters only)
    #[default(8192)]
    pub read_chunk_size: usize,

    /// Bounded event channel capacity of the tokio producer task
    #[default(64)]
    pub channel_capacity: usize,
}

impl Opts {
    /// Options for decoding a metadata response tracking `tag` blocks
    pub fn metadata(tag: impl Into<String>) -> Self {
        Self {
            metadata_tag: Some(tag.into()),
            ..Default::default()
        }
    }

    pub fn with_raw(mut self, raw: bool) -> Self {
        self.raw = raw;
        self
    }

    pub fn with_charset(mut self, charset: Charset) -> Self {
        self.charset = charset;
        self
    }
}

/// Character encoding of a response body
///
/// RETS servers declare it through the `Content-Type` header; the decoder itself
/// always works on UTF-8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Charset {
    #[default]
    Utf8,
    /// ISO-8859-1: every byte is the code point of the same value
    Latin1,
}

impl Charset {
    /// Parse the `charset` parameter of a `Content-Type` header value.
    ///
    /// Returns `Ok(None)` when the header carries no charset.
    pub fn from_content_type(content_type: &str) -> Result<Option<Self>, Error> {
        content_type
            .split(';')
            .skip(1)
            .filter_map(|param| param.split_once('='))
            .find(|(key, _)| key.trim().eq_ignore_ascii_case("charset"))
            .map(|(_, value)| value.trim().trim_matches('"').parse())
            .transpose()
    }

    /// Transcode a chunk of response bytes into UTF-8.
    ///
    /// Latin-1 is stateless per byte, so chunks may be transcoded independently.
    pub fn decode<'a>(&self, bytes: &'a [u8]) -> Cow<'a, [u8]> {
        match self {
            Charset::Utf8 => Cow::Borrowed(bytes),
            Charset::Latin1 if bytes.is_ascii() => Cow::Borrowed(bytes),
            Charset::Latin1 => {
                let text: String = bytes.iter().map(|&b| char::from(b)).collect();
                Cow::Owned(text.into_bytes())
            }
        }
    }
}

impl FromStr for Charset {
    type Err = Error;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        match label.trim().to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" | "us-ascii" | "ascii" => Ok(Charset::Utf8),
            "iso-8859-1" | "iso8859-1" | "latin1" | "latin-1" | "l1" => Ok(Charset::Latin1),
            other => Err(Error::Processing(ProcessingError::BadConfig(format!(
                "Unsupported charset '{}'",
                other
            )))),
        }
    }
}

/// Which non-zero top-level reply codes suppress a class of record events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuppressPolicy {
    Never,
    /// Only `20201` (no records found)
    NoRecordsFound,
    /// Every non-zero code
    AnyError,
}

impl SuppressPolicy {
    pub fn suppresses(self, status: &ReplyStatus) -> bool {
        if status.is_success() {
            return false;
        }
        match self {
            SuppressPolicy::Never => false,
            SuppressPolicy::NoRecordsFound => status.reply_code == REPLY_CODE_NO_RECORDS_FOUND,
            SuppressPolicy::AnyError => true,
        }
    }
}
