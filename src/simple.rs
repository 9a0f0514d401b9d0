use crate::error::Error;
use crate::handler::StatusHandler;
use crate::opts::{Charset, Opts};
use crate::protocol::decoder::Decoder;
use crate::protocol::response::ReplyStatus;
use crate::protocol::r#trait::Tokenizer;
use crate::protocol::tokenizer::XmlTokenizer;

/// Buffered reader for short responses (login, logout, update)
///
/// Only the top-level status is kept. It is available as soon as the root tag has
/// been parsed, before the rest of the document arrives. Completion is decided by
/// the caller through [`finish`](Self::finish), not by the end of the byte stream,
/// because some servers keep sending bytes after the document. Errors go to the
/// callback, at most once and never after `finish`.
pub struct SimpleParser<F, T = XmlTokenizer> {
    tokenizer: T,
    decoder: Decoder<StatusHandler<F>>,
    charset: Charset,
}

impl<F: FnMut(Error)> SimpleParser<F, XmlTokenizer> {
    pub fn new(on_error: F) -> Self {
        Self::with_tokenizer(XmlTokenizer::new(), Charset::default(), on_error)
    }

    /// Reinterpret the response bytes as `charset` instead of UTF-8
    pub fn with_charset(charset: Charset, on_error: F) -> Self {
        Self::with_tokenizer(XmlTokenizer::new(), charset, on_error)
    }
}

impl<F: FnMut(Error), T: Tokenizer> SimpleParser<F, T> {
    pub fn with_tokenizer(tokenizer: T, charset: Charset, on_error: F) -> Self {
        Self {
            tokenizer,
            decoder: Decoder::new(StatusHandler::new(on_error), &Opts::default()),
            charset,
        }
    }

    /// Feed the next chunk of the response body
    pub fn write(&mut self, bytes: &[u8]) {
        if self.decoder.handler().is_closed() {
            return;
        }
        let bytes = self.charset.decode(bytes);
        if let Err(err) = self.tokenizer.feed(&bytes, &mut self.decoder) {
            self.decoder.handler_mut().fail(err);
        }
    }

    /// Signal the end of the byte stream
    pub fn end(&mut self) {
        if self.decoder.handler().is_closed() || self.decoder.is_finished() {
            return;
        }
        if let Err(err) = self.tokenizer.end(&mut self.decoder) {
            self.decoder.handler_mut().fail(err);
        }
    }

    /// Mark the response complete. Idempotent; suppresses every later error.
    pub fn finish(&mut self) {
        if self.decoder.handler().is_closed() {
            return;
        }
        tracing::debug!(complete = self.decoder.is_finished(), "simple response finished");
        self.decoder.handler_mut().close();
    }

    pub fn is_finished(&self) -> bool {
        self.decoder.handler().is_closed()
    }

    /// The root element has closed
    pub fn is_complete(&self) -> bool {
        self.decoder.is_finished()
    }

    pub fn status(&self) -> Option<&ReplyStatus> {
        self.decoder.handler().reply_status()
    }

    /// Body of the `RETS-RESPONSE` element, if one was seen
    pub fn response(&self) -> Option<&str> {
        self.decoder.handler().response_body()
    }

    /// `key=value` lines of the `RETS-RESPONSE` body (login capability URLs etc.)
    pub fn response_fields(&self) -> Vec<(String, String)> {
        self.response().map(parse_response_fields).unwrap_or_default()
    }
}

/// Split a `RETS-RESPONSE` body into trimmed `key=value` pairs, skipping other lines
pub fn parse_response_fields(body: &str) -> Vec<(String, String)> {
    body.lines()
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
        .filter(|(key, _)| !key.is_empty())
        .collect()
}
