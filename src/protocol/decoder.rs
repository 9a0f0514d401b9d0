use bitflags::bitflags;

use crate::constant::{
    ATTR_RECORDS, ATTR_VALUE, DEFAULT_DELIMITER, TAG_COLUMNS, TAG_COUNT, TAG_DATA, TAG_DELIMITER,
    TAG_MAXROWS, TAG_RETS, TAG_RETS_RESPONSE, TAG_RETS_STATUS,
};
use crate::error::{ProcessingError, Result};
use crate::opts::{Opts, SuppressPolicy};
use crate::protocol::primitive::{decode_delimiter, split_fields};
use crate::protocol::response::{Attributes, MetadataBlock, ReplyStatus};
use crate::protocol::row::zip_row;
use crate::protocol::r#trait::{RetsHandler, XmlHandler};

/// Internal state of the tag dispatch state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DecoderState {
    /// Nothing seen yet - the next open tag must be `RETS`
    AwaitingRoot,
    /// Inside the root element (possibly inside tracked metadata blocks)
    InRoot,
    /// Root closed or a fatal error occurred; notifications are ignored
    Finished,
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct DecoderFlags: u8 {
        /// A MAXROWS element was seen
        const MAX_ROWS = 0x01;
        /// Top-level status suppresses COUNT events
        const SUPPRESS_COUNT = 0x02;
        /// Top-level status suppresses DATA events
        const SUPPRESS_ROWS = 0x04;
    }
}

/// Element whose text content is being accumulated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Capture {
    Columns,
    Data,
    Response,
}

/// Delimiter and column context of the root or of one metadata block
#[derive(Debug, Clone)]
struct BlockScope {
    delimiter: u8,
    columns: Vec<String>,
    /// Metadata block sequence, 0 for the root
    sequence: u32,
}

impl BlockScope {
    fn new(delimiter: u8, sequence: u32) -> Self {
        Self {
            delimiter,
            columns: Vec::new(),
            sequence,
        }
    }
}

/// State machine turning tokenizer notifications into RETS events
///
/// The handler is provided at construction and called directly by the state machine.
/// Reply errors, malformed rows and malformed counts are passed to
/// [`RetsHandler::error`] and decoding continues; any other failure is returned
/// from the [`XmlHandler`] callback and finishes the decoder.
pub struct Decoder<H> {
    state: DecoderState,
    flags: DecoderFlags,
    handler: H,
    metadata_tag: Option<String>,
    raw: bool,
    suppress_count: SuppressPolicy,
    suppress_rows: SuppressPolicy,
    /// Innermost scope last; the root scope is pushed when `RETS` opens
    scopes: Vec<BlockScope>,
    capture: Option<Capture>,
    text: String,
    sequence: u32,
    /// Open elements, the root included
    depth: usize,
}

impl<H: RetsHandler> Decoder<H> {
    pub fn new(handler: H, opts: &Opts) -> Self {
        Self {
            state: DecoderState::AwaitingRoot,
            flags: DecoderFlags::empty(),
            handler,
            metadata_tag: opts.metadata_tag.clone(),
            raw: opts.raw,
            suppress_count: opts.suppress_count,
            suppress_rows: opts.suppress_rows,
            scopes: Vec::new(),
            capture: None,
            text: String::new(),
            sequence: 0,
            depth: 0,
        }
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    pub fn into_handler(self) -> H {
        self.handler
    }

    /// The root element closed, or decoding stopped on a fatal error
    pub fn is_finished(&self) -> bool {
        self.state == DecoderState::Finished
    }

    /// Stop decoding without emitting anything further
    pub fn abort(&mut self) {
        self.state = DecoderState::Finished;
        self.capture = None;
        self.text.clear();
    }

    fn scope(&mut self) -> &mut BlockScope {
        if self.scopes.is_empty() {
            self.scopes.push(BlockScope::new(DEFAULT_DELIMITER, 0));
        }
        let last = self.scopes.len() - 1;
        &mut self.scopes[last]
    }

    fn is_metadata_tag(&self, name: &str) -> bool {
        self.metadata_tag.as_deref() == Some(name)
    }

    fn open_root(&mut self, name: &str, attrs: &Attributes) -> Result<()> {
        if name != TAG_RETS {
            return Err(ProcessingError::UnexpectedResults(name.to_string()).into());
        }
        self.state = DecoderState::InRoot;
        self.depth = 1;
        self.scopes.push(BlockScope::new(DEFAULT_DELIMITER, 0));

        let Some(status) = ReplyStatus::from_attributes(attrs) else {
            tracing::warn!("RETS root element carries no ReplyCode");
            return Ok(());
        };
        tracing::debug!(reply_code = %status.reply_code, reply_text = %status.reply_text, "RETS status");
        if self.suppress_count.suppresses(&status) {
            self.flags.insert(DecoderFlags::SUPPRESS_COUNT);
        }
        if self.suppress_rows.suppresses(&status) {
            self.flags.insert(DecoderFlags::SUPPRESS_ROWS);
        }
        let err = status.to_error();
        self.handler.status(status, true)?;
        if let Some(err) = err {
            self.handler.error(err.into())?;
        }
        Ok(())
    }

    fn open_child(&mut self, name: &str, attrs: Attributes) -> Result<()> {
        match name {
            TAG_DELIMITER => {
                let value = attrs.get(ATTR_VALUE).unwrap_or_default();
                let delimiter = decode_delimiter(value)?;
                self.scope().delimiter = delimiter;
                Ok(())
            }
            TAG_COLUMNS => self.start_capture(Capture::Columns),
            TAG_DATA => self.start_capture(Capture::Data),
            TAG_RETS_RESPONSE => self.start_capture(Capture::Response),
            TAG_COUNT => self.count(&attrs),
            TAG_MAXROWS => {
                self.flags.insert(DecoderFlags::MAX_ROWS);
                Ok(())
            }
            TAG_RETS_STATUS => match ReplyStatus::from_attributes(&attrs) {
                Some(status) => self.handler.status(status, false),
                None => {
                    tracing::warn!("RETS-STATUS element carries no ReplyCode");
                    Ok(())
                }
            },
            _ if self.is_metadata_tag(name) => {
                self.sequence += 1;
                tracing::debug!(tag = name, sequence = self.sequence, "metadata block start");
                // Metadata blocks see the delimiter declared around them
                let delimiter = self.scope().delimiter;
                self.scopes.push(BlockScope::new(delimiter, self.sequence));
                self.handler.metadata_start(MetadataBlock {
                    tag: name.to_string(),
                    attributes: attrs,
                    sequence: self.sequence,
                })
            }
            _ => Ok(()),
        }
    }

    fn start_capture(&mut self, capture: Capture) -> Result<()> {
        self.capture = Some(capture);
        self.text.clear();
        Ok(())
    }

    fn count(&mut self, attrs: &Attributes) -> Result<()> {
        if self.flags.contains(DecoderFlags::SUPPRESS_COUNT) {
            return Ok(());
        }
        let records = attrs.get(ATTR_RECORDS).unwrap_or_default();
        match records.trim().parse::<u64>() {
            Ok(records) => self.handler.count(records),
            Err(_) => self
                .handler
                .error(ProcessingError::InvalidCount(records.to_string()).into()),
        }
    }

    fn finish_capture(&mut self, capture: Capture) -> Result<()> {
        self.capture = None;
        let text = std::mem::take(&mut self.text);
        match capture {
            Capture::Columns => {
                let delimiter = self.scope().delimiter;
                let columns = split_fields(&text, delimiter);
                self.scope().columns.clone_from(&columns);
                if self.raw {
                    self.handler.raw_columns(text)
                } else {
                    self.handler.columns(columns)
                }
            }
            Capture::Data => {
                if self.flags.contains(DecoderFlags::SUPPRESS_ROWS) {
                    return Ok(());
                }
                if self.raw {
                    return self.handler.raw_row(text);
                }
                let scope = self.scope();
                let fields = split_fields(&text, scope.delimiter);
                match zip_row(&scope.columns, fields) {
                    Ok(row) => self.handler.row(row),
                    Err(err) => {
                        tracing::warn!(error = %err, "skipping malformed DATA row");
                        self.handler.error(err)
                    }
                }
            }
            Capture::Response => self.handler.response(text),
        }
    }

    fn close_root(&mut self) -> Result<()> {
        self.state = DecoderState::Finished;
        self.scopes.clear();
        let max_rows_exceeded = self.flags.contains(DecoderFlags::MAX_ROWS);
        self.handler.done(max_rows_exceeded)
    }

    /// Run a step and finish the decoder if it failed
    fn guard(&mut self, step: impl FnOnce(&mut Self) -> Result<()>) -> Result<()> {
        let result = step(self);
        if result.is_err() {
            self.abort();
        }
        result
    }
}

impl<H: RetsHandler> XmlHandler for Decoder<H> {
    fn open_tag(&mut self, name: &str, attrs: Attributes) -> Result<()> {
        match self.state {
            DecoderState::AwaitingRoot => self.guard(|this| this.open_root(name, &attrs)),
            DecoderState::InRoot => {
                self.depth += 1;
                self.guard(|this| this.open_child(name, attrs))
            }
            DecoderState::Finished => Ok(()),
        }
    }

    fn text(&mut self, text: &str) -> Result<()> {
        if self.state == DecoderState::InRoot && self.capture.is_some() {
            self.text.push_str(text);
        }
        Ok(())
    }

    fn close_tag(&mut self, name: &str) -> Result<()> {
        if self.state != DecoderState::InRoot {
            return Ok(());
        }
        self.depth = self.depth.saturating_sub(1);
        self.guard(|this| match (name, this.capture) {
            (TAG_COLUMNS, Some(capture @ Capture::Columns))
            | (TAG_DATA, Some(capture @ Capture::Data))
            | (TAG_RETS_RESPONSE, Some(capture @ Capture::Response)) => {
                this.finish_capture(capture)
            }
            (TAG_RETS, _) if this.depth == 0 => this.close_root(),
            _ if this.is_metadata_tag(name) && this.scopes.len() > 1 => {
                let sequence = this.scopes.pop().map_or(0, |scope| scope.sequence);
                tracing::debug!(tag = name, sequence, "metadata block end");
                this.handler.metadata_end(sequence)
            }
            _ => Ok(()),
        })
    }
}

