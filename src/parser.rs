use crate::error::Error;
use crate::event::Event;
use crate::handler::EventQueue;
use crate::opts::{Charset, Opts};
use crate::protocol::decoder::Decoder;
use crate::protocol::r#trait::Tokenizer;
use crate::protocol::tokenizer::XmlTokenizer;

/// Sans-io streaming decoder: push bytes in, pull events out
///
/// Events are queued only for the bytes already fed, so a caller that drains
/// [`next_event`](Self::next_event) before feeding the next chunk keeps memory
/// bounded by one chunk plus one unfinished element.
///
/// ```rs
/// let mut parser = StreamParser::new(&Opts::default());
/// for chunk in body {
///     parser.feed(&chunk);
///     while let Some(event) = parser.next_event() { ... }
/// }
/// parser.end();
/// while let Some(event) = parser.next_event() { ... }
/// ```
pub struct StreamParser<T = XmlTokenizer> {
    tokenizer: T,
    decoder: Decoder<EventQueue>,
    charset: Charset,
    closed: bool,
}

impl StreamParser<XmlTokenizer> {
    pub fn new(opts: &Opts) -> Self {
        Self::with_tokenizer(XmlTokenizer::new(), opts)
    }
}

impl<T: Tokenizer> StreamParser<T> {
    pub fn with_tokenizer(tokenizer: T, opts: &Opts) -> Self {
        Self {
            tokenizer,
            decoder: Decoder::new(EventQueue::new(), opts),
            charset: opts.charset,
            closed: false,
        }
    }

    /// Feed the next chunk of the response body
    pub fn feed(&mut self, bytes: &[u8]) {
        if self.is_finished() {
            return;
        }
        let bytes = self.charset.decode(bytes);
        if let Err(err) = self.tokenizer.feed(&bytes, &mut self.decoder) {
            self.fail(err);
        }
    }

    /// Signal the end of the response body
    pub fn end(&mut self) {
        if self.closed {
            return;
        }
        if !self.decoder.is_finished() {
            if let Err(err) = self.tokenizer.end(&mut self.decoder) {
                self.fail(err);
            }
        }
        self.closed = true;
    }

    /// Stop decoding; queued events are discarded and nothing else is emitted.
    pub fn abort(&mut self) {
        self.decoder.abort();
        self.decoder.handler_mut().clear();
        self.closed = true;
    }

    pub fn next_event(&mut self) -> Option<Event> {
        self.decoder.handler_mut().pop()
    }

    /// Drain the events decoded so far
    pub fn events(&mut self) -> impl Iterator<Item = Event> + '_ {
        std::iter::from_fn(move || self.next_event())
    }

    /// No further input will be decoded
    pub fn is_finished(&self) -> bool {
        self.closed || self.decoder.is_finished()
    }

    /// Finished and every event has been taken
    pub fn is_drained(&self) -> bool {
        self.is_finished() && self.decoder.handler().is_empty()
    }

    /// Events are exhausted and more input is required to make progress
    pub fn needs_input(&self) -> bool {
        !self.is_finished() && self.decoder.handler().is_empty()
    }

    /// Stop decoding with a fatal error, queued after the events already decoded
    pub(crate) fn fail(&mut self, err: Error) {
        tracing::debug!(error = %err, "decode failed");
        self.decoder.abort();
        self.decoder.handler_mut().push(Event::Error(err));
        self.closed = true;
    }
}
