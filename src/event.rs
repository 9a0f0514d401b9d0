use crate::error::Error;
use crate::protocol::response::{MetadataBlock, ReplyStatus};
use crate::protocol::row::DataRow;

/// One decoded piece of a RETS response, in document order
///
/// ```text
///   Status            root RETS ReplyCode/ReplyText
///   Error             non-zero root reply code
///   MetadataStart     tracked metadata element opens
///   Columns           COLUMNS split on the active delimiter (placeholders kept)
///   Data              DATA zipped against the columns
///   Count             COUNT Records
///   Status            RETS-STATUS
///   MetadataEnd       tracked metadata element closes
///   Done              root closed after a MAXROWS element
/// ```
#[derive(Debug)]
pub enum Event {
    Status(ReplyStatus),
    Columns(Vec<String>),
    /// COLUMNS text verbatim (raw mode)
    RawColumns(String),
    Data(DataRow),
    /// DATA text verbatim (raw mode)
    RawData(String),
    Count(u64),
    MetadataStart(MetadataBlock),
    /// Sequence number of the block that closed
    MetadataEnd(u32),
    /// Emitted only when the result set was truncated by the server
    Done { max_rows_exceeded: bool },
    Error(Error),
}

impl Event {
    /// Whether nothing can follow this event
    pub fn is_terminal(&self) -> bool {
        match self {
            Event::Done { .. } => true,
            Event::Error(err) => err.is_fatal(),
            _ => false,
        }
    }
}
