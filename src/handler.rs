use std::collections::VecDeque;

use crate::error::{Error, Result};
use crate::event::Event;
use crate::protocol::RetsHandler;
use crate::protocol::response::{MetadataBlock, ReplyStatus};
use crate::protocol::row::DataRow;

/// A handler that queues every callback as an [`Event`]
///
/// Streaming adapters drain it between reads, so it never holds more than the
/// events produced by one input chunk.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: VecDeque<Event>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pop(&mut self) -> Option<Event> {
        self.events.pop_front()
    }

    pub fn push(&mut self, event: Event) {
        self.events.push_back(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl RetsHandler for EventQueue {
    fn status(&mut self, status: ReplyStatus, _top_level: bool) -> Result<()> {
        self.push(Event::Status(status));
        Ok(())
    }

    fn error(&mut self, err: Error) -> Result<()> {
        self.push(Event::Error(err));
        Ok(())
    }

    fn columns(&mut self, columns: Vec<String>) -> Result<()> {
        self.push(Event::Columns(columns));
        Ok(())
    }

    fn raw_columns(&mut self, text: String) -> Result<()> {
        self.push(Event::RawColumns(text));
        Ok(())
    }

    fn row(&mut self, row: DataRow) -> Result<()> {
        self.push(Event::Data(row));
        Ok(())
    }

    fn raw_row(&mut self, text: String) -> Result<()> {
        self.push(Event::RawData(text));
        Ok(())
    }

    fn count(&mut self, records: u64) -> Result<()> {
        self.push(Event::Count(records));
        Ok(())
    }

    fn metadata_start(&mut self, block: MetadataBlock) -> Result<()> {
        self.push(Event::MetadataStart(block));
        Ok(())
    }

    fn metadata_end(&mut self, sequence: u32) -> Result<()> {
        self.push(Event::MetadataEnd(sequence));
        Ok(())
    }

    fn done(&mut self, max_rows_exceeded: bool) -> Result<()> {
        if max_rows_exceeded {
            self.push(Event::Done { max_rows_exceeded });
        }
        Ok(())
    }
}

/// A handler that keeps only the top-level status and the `RETS-RESPONSE` body
///
/// Useful for login, logout and other short calls that have no record set.
/// The first error is passed to `on_error`; later ones and anything after
/// [`StatusHandler::close`] are dropped.
pub struct StatusHandler<F> {
    status: Option<ReplyStatus>,
    response: Option<String>,
    on_error: F,
    fired: bool,
    closed: bool,
}

impl<F: FnMut(Error)> StatusHandler<F> {
    pub fn new(on_error: F) -> Self {
        Self {
            status: None,
            response: None,
            on_error,
            fired: false,
            closed: false,
        }
    }

    pub fn reply_status(&self) -> Option<&ReplyStatus> {
        self.status.as_ref()
    }

    pub fn response_body(&self) -> Option<&str> {
        self.response.as_deref()
    }

    /// Report `err` unless an error was already reported or the handler is closed.
    pub fn fail(&mut self, err: Error) {
        if self.fired || self.closed {
            tracing::debug!(error = %err, "dropping error after completion");
            return;
        }
        self.fired = true;
        (self.on_error)(err);
    }

    /// Stop reporting errors. Idempotent.
    pub fn close(&mut self) {
        self.closed = true;
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl<F: FnMut(Error)> RetsHandler for StatusHandler<F> {
    fn status(&mut self, status: ReplyStatus, top_level: bool) -> Result<()> {
        if top_level {
            self.status = Some(status);
        }
        Ok(())
    }

    fn error(&mut self, err: Error) -> Result<()> {
        self.fail(err);
        Ok(())
    }

    fn columns(&mut self, _: Vec<String>) -> Result<()> {
        Ok(())
    }

    fn raw_columns(&mut self, _: String) -> Result<()> {
        Ok(())
    }

    fn row(&mut self, _: DataRow) -> Result<()> {
        Ok(())
    }

    fn raw_row(&mut self, _: String) -> Result<()> {
        Ok(())
    }

    fn count(&mut self, _: u64) -> Result<()> {
        Ok(())
    }

    fn metadata_start(&mut self, _: MetadataBlock) -> Result<()> {
        Ok(())
    }

    fn metadata_end(&mut self, _: u32) -> Result<()> {
        Ok(())
    }

    fn done(&mut self, _: bool) -> Result<()> {
        Ok(())
    }

    fn response(&mut self, body: String) -> Result<()> {
        self.response = Some(body);
        Ok(())
    }
}
