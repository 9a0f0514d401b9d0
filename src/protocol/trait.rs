use auto_impl::auto_impl;

use crate::error::{Error, Result};
use crate::protocol::response::{Attributes, MetadataBlock, ReplyStatus};
use crate::protocol::row::DataRow;

/// Low-level notifications produced by an incremental XML tokenizer
///
/// Text may arrive in several pieces for one text node; receivers accumulate.
/// Returning an error aborts tokenization and is handed back to the caller of
/// [`Tokenizer::feed`] / [`Tokenizer::end`].
pub trait XmlHandler {
    fn open_tag(&mut self, name: &str, attrs: Attributes) -> Result<()>;
    fn text(&mut self, text: &str) -> Result<()>;
    fn close_tag(&mut self, name: &str) -> Result<()>;
}

/// Incremental XML tokenizer fed with arbitrary chunks of a document
///
/// Malformed markup is reported once as `Err(ProcessingError::Xml)`; the tokenizer
/// ignores input after that.
pub trait Tokenizer {
    fn feed<H: XmlHandler>(&mut self, bytes: &[u8], handler: &mut H) -> Result<()>;
    fn end<H: XmlHandler>(&mut self, handler: &mut H) -> Result<()>;
}

/// Trait that defines event callbacks for decoded RETS responses
#[auto_impl(&mut, Box)]
pub trait RetsHandler {
    /// Root `RETS` status (`top_level`) or a `RETS-STATUS` element
    fn status(&mut self, status: ReplyStatus, top_level: bool) -> Result<()>;
    /// Non-fatal error: a non-zero root reply code, a malformed row or count
    fn error(&mut self, err: Error) -> Result<()>;
    fn columns(&mut self, columns: Vec<String>) -> Result<()>;
    fn raw_columns(&mut self, text: String) -> Result<()>;
    fn row(&mut self, row: DataRow) -> Result<()>;
    fn raw_row(&mut self, text: String) -> Result<()>;
    fn count(&mut self, records: u64) -> Result<()>;
    fn metadata_start(&mut self, block: MetadataBlock) -> Result<()>;
    fn metadata_end(&mut self, sequence: u32) -> Result<()>;
    /// Called once when the root element closes
    fn done(&mut self, max_rows_exceeded: bool) -> Result<()>;

    /// Body of a `RETS-RESPONSE` element
    fn response(&mut self, _body: String) -> Result<()> {
        Ok(())
    }
}
