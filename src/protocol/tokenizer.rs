use std::borrow::Cow;

use quick_xml::Reader;
use quick_xml::errors::{Error as XmlError, SyntaxError};
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event as XmlEvent};
use memchr::{memchr, memrchr};
use simdutf8::basic::from_utf8;
use simdutf8::compat;

use crate::error::{Error, Result};
use crate::protocol::response::Attributes;
use crate::protocol::r#trait::{Tokenizer, XmlHandler};

/// Longest markup prefix (`<![CDATA[`) that can still turn out to be valid
/// when quick-xml rejects it at the end of the buffered input.
const MAX_BANG_PREFIX: usize = 9;

/// Incremental tokenizer on top of quick-xml
///
/// quick-xml parses complete buffers, so incoming bytes are buffered and only
/// whole tokens are consumed. An unfinished tag or a text node that reaches the end
/// of the buffer stays buffered until more bytes arrive or [`Tokenizer::end`] is
/// called. Everything after the root element closes is discarded.
#[derive(Debug, Default)]
pub struct XmlTokenizer {
    buf: Vec<u8>,
    elements: ElementStack,
    failed: bool,
}

#[derive(Debug, Default)]
struct ElementStack {
    open: Vec<String>,
    root_seen: bool,
    root_closed: bool,
}

impl XmlTokenizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes received but not yet tokenized
    pub fn buffered(&self) -> usize {
        self.buf.len()
    }

    pub fn root_closed(&self) -> bool {
        self.elements.root_closed
    }

    fn drain<H: XmlHandler>(&mut self, handler: &mut H, eof: bool) -> Result<()> {
        if self.failed {
            return Ok(());
        }
        let XmlTokenizer { buf, elements, .. } = self;
        let (consumed, result) = tokenize(buf, elements, handler, eof);
        buf.drain(..consumed);
        if result.is_err() {
            self.failed = true;
            self.buf.clear();
        }
        result
    }
}

impl Tokenizer for XmlTokenizer {
    fn feed<H: XmlHandler>(&mut self, bytes: &[u8], handler: &mut H) -> Result<()> {
        if self.failed || self.elements.root_closed {
            return Ok(());
        }
        self.buf.extend_from_slice(bytes);
        self.drain(handler, false)
    }

    fn end<H: XmlHandler>(&mut self, handler: &mut H) -> Result<()> {
        if self.failed {
            return Ok(());
        }
        self.drain(handler, true)?;
        let unclosed = self.elements.open.last().cloned();
        let result = match unclosed {
            Some(name) => Err(Error::xml(format!("Unclosed root tag <{}>", name))),
            None if !self.elements.root_seen => Err(Error::xml("Document has no root element")),
            None => Ok(()),
        };
        if result.is_err() {
            self.failed = true;
        }
        result
    }
}

/// Dispatch every complete token of `input`.
///
/// Returns how many bytes were consumed, which is less than `input.len()` when the
/// tail holds an unfinished token and `eof` is false.
fn tokenize<H: XmlHandler>(
    input: &[u8],
    elements: &mut ElementStack,
    handler: &mut H,
    eof: bool,
) -> (usize, Result<()>) {
    let mut reader = Reader::from_reader(input);
    let config = reader.config_mut();
    config.trim_text(false);
    config.check_end_names = false;
    // Open tags consumed by an earlier reader are tracked in `elements`
    config.allow_unmatched_ends = true;
    config.expand_empty_elements = false;

    let mut consumed = 0;
    loop {
        if elements.root_closed {
            return (input.len(), Ok(()));
        }
        let event = match reader.read_event() {
            Ok(event) => event,
            Err(err) if !eof && is_incomplete(&err, input.len() - consumed) => {
                return (consumed, Ok(()));
            }
            Err(err) => return (consumed, Err(Error::xml(err))),
        };
        let position = usize::try_from(reader.buffer_position()).unwrap_or(input.len());

        let result = match event {
            XmlEvent::Eof => return (input.len(), Ok(())),
            // The node may continue in the next chunk: pass on the part that can
            // no longer change and keep the rest buffered
            XmlEvent::Text(text) if position >= input.len() && !eof => {
                let safe = settled_text_len(&text);
                if safe == 0 || elements.open.is_empty() {
                    return (consumed, Ok(()));
                }
                return match dispatch_text(&text[..safe], elements, handler) {
                    Ok(()) => (consumed + safe, Ok(())),
                    Err(err) => (consumed, Err(err)),
                };
            }
            XmlEvent::Text(text) => dispatch_text(&text, elements, handler),
            XmlEvent::CData(cdata) => {
                let content = decode_utf8(&cdata);
                if elements.open.is_empty() {
                    Err(Error::xml("Text data outside of root node"))
                } else {
                    handler.text(&content)
                }
            }
            XmlEvent::Start(start) => open_element(&start, elements, handler),
            XmlEvent::Empty(start) => open_element(&start, elements, handler).and_then(|()| {
                let name = elements.open.last().cloned().unwrap_or_default();
                close_element(&name, elements, handler)
            }),
            XmlEvent::End(end) => {
                let name = decode_utf8(end.name().as_ref()).into_owned();
                close_element(&name, elements, handler)
            }
            XmlEvent::Comment(_) | XmlEvent::Decl(_) | XmlEvent::PI(_) | XmlEvent::DocType(_) => {
                Ok(())
            }
        };
        if let Err(err) = result {
            return (position, Err(err));
        }
        consumed = position;
    }
}

/// Length of the prefix of an unfinished text node that more input cannot change.
///
/// Stops before a trailing `&` with no `;` after it (a possibly partial entity)
/// and before a UTF-8 sequence cut off at the end.
fn settled_text_len(text: &[u8]) -> usize {
    let end = match memrchr(b'&', text) {
        Some(amp) if memchr(b';', &text[amp..]).is_none() => amp,
        _ => text.len(),
    };
    match compat::from_utf8(&text[..end]) {
        Err(err) if err.error_len().is_none() => err.valid_up_to(),
        _ => end,
    }
}

/// Whether quick-xml failed only because the buffered input stops mid-token.
fn is_incomplete(err: &XmlError, remaining: usize) -> bool {
    match err {
        XmlError::Syntax(SyntaxError::InvalidBangMarkup) => remaining < MAX_BANG_PREFIX,
        XmlError::Syntax(_) => true,
        _ => false,
    }
}

fn dispatch_text<H: XmlHandler>(
    raw: &[u8],
    elements: &ElementStack,
    handler: &mut H,
) -> Result<()> {
    let text = decode_utf8(raw);
    if elements.open.is_empty() {
        if text.trim().is_empty() {
            return Ok(());
        }
        return Err(Error::xml("Non-whitespace before first tag"));
    }
    match unescape(&text) {
        Ok(unescaped) => handler.text(&unescaped),
        Err(err) => {
            tracing::warn!(error = %err, "passing text with an unresolvable entity through verbatim");
            handler.text(&text)
        }
    }
}

fn open_element<H: XmlHandler>(
    start: &BytesStart<'_>,
    elements: &mut ElementStack,
    handler: &mut H,
) -> Result<()> {
    let name = decode_utf8(start.name().as_ref()).into_owned();
    if elements.open.is_empty() && elements.root_seen {
        return Err(Error::xml(format!("Unexpected element <{}> after root", name)));
    }

    let mut attrs = Attributes::new();
    for attr in start.attributes() {
        let attr = attr.map_err(Error::xml)?;
        let key = decode_utf8(attr.key.as_ref()).into_owned();
        let raw = decode_utf8(&attr.value);
        let value = unescape(&raw).map_err(Error::xml)?.into_owned();
        attrs.push(key, value);
    }

    elements.root_seen = true;
    elements.open.push(name.clone());
    handler.open_tag(&name, attrs)
}

fn close_element<H: XmlHandler>(
    name: &str,
    elements: &mut ElementStack,
    handler: &mut H,
) -> Result<()> {
    match elements.open.pop() {
        Some(expected) if expected == name => {}
        Some(expected) => {
            return Err(Error::xml(format!(
                "Unexpected close tag </{}>, expected </{}>",
                name, expected
            )));
        }
        None => return Err(Error::xml(format!("Unmatched close tag </{}>", name))),
    }
    if elements.open.is_empty() {
        elements.root_closed = true;
    }
    handler.close_tag(name)
}

fn decode_utf8(bytes: &[u8]) -> Cow<'_, str> {
    match from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => {
            tracing::warn!(len = bytes.len(), "replacing invalid UTF-8 in response");
            String::from_utf8_lossy(bytes)
        }
    }
}
