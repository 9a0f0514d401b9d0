use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::sync::mpsc;
use tracing::instrument;

use crate::error::Error;
use crate::event::Event;
use crate::opts::Opts;
use crate::parser::StreamParser;

/// Async event stream over a response body
///
/// Reads the next chunk only after every event from the previous chunk has been
/// taken through [`next`](Self::next), so a slow consumer stops the upstream reads.
pub struct EventStream<R> {
    reader: R,
    parser: StreamParser,
    chunk: Vec<u8>,
}

impl<R: AsyncRead + Unpin> EventStream<R> {
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

    /// Stop reading; `next` returns `None` after this.
    pub fn abort(&mut self) {
        self.parser.abort();
    }

    /// Next decoded event, or `None` once the body is exhausted
    pub async fn next(&mut self) -> Option<Event> {
        loop {
            if let Some(event) = self.parser.next_event() {
                return Some(event);
            }
            if self.parser.is_finished() {
                return None;
            }
            self.fill().await;
        }
    }

    #[instrument(skip_all)]
    async fn fill(&mut self) {
        match self.reader.read(&mut self.chunk).await {
            Ok(0) => self.parser.end(),
            Ok(n) => self.parser.feed(&self.chunk[..n]),
            Err(err) => self.parser.fail(Error::from(err)),
        }
    }
}

/// Decode `reader` on a background task and deliver events over a bounded channel
///
/// The task waits while the channel holds [`Opts::channel_capacity`] undelivered
/// events and stops reading as soon as the receiver is dropped.
pub fn spawn_decoder<R>(reader: R, opts: &Opts) -> mpsc::Receiver<Event>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    let (tx, rx) = mpsc::channel(opts.channel_capacity.max(1));
    let mut stream = EventStream::new(reader, opts);
    tokio::spawn(async move {
        while let Some(event) = stream.next().await {
            if tx.send(event).await.is_err() {
                tracing::debug!("event receiver dropped, stopping decoder");
                stream.abort();
                return;
            }
        }
    });
    rx
}
