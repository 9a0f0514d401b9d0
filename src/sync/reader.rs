use std::io::{ErrorKind, Read};

use tracing::instrument;

use crate::error::Error;
use crate::event::Event;
use crate::opts::Opts;
use crate::parser::StreamParser;

/// Blocking iterator of events over a response body
///
/// The body is read in chunks of [`Opts::read_chunk_size`], and only when every
/// event decoded from the previous chunk has been taken. A read error is reported
/// as a final [`Event::Error`].
pub struct EventReader<R> {
    reader: R,
    parser: StreamParser,
    chunk: Vec<u8>,
}

impl<R: Read> EventReader<R> {
    pub fn new(reader: R, opts: &Opts) -> Self {
        Self {
            reader,
            parser: StreamParser::new(opts),
            chunk: vec![0; opts.read_chunk_size.max(1)],
        }
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Stop reading; the iterator yields nothing after this.
    pub fn abort(&mut self) {
        self.parser.abort();
    }

    #[instrument(skip_all)]
    fn fill(&mut self) {
        loop {
            match self.reader.read(&mut self.chunk) {
                Ok(0) => {
                    self.parser.end();
                    return;
                }
                Ok(n) => {
                    self.parser.feed(&self.chunk[..n]);
                    return;
                }
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => {
                    self.parser.fail(Error::from(err));
                    return;
                }
            }
        }
    }
}

impl<R: Read> Iterator for EventReader<R> {
    type Item = Event;

    fn next(&mut self) -> Option<Event> {
        loop {
            if let Some(event) = self.parser.next_event() {
                return Some(event);
            }
            if self.parser.is_finished() {
                return None;
            }
            self.fill();
        }
    }
}
