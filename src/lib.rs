pub mod constant;
pub mod error;
mod event;
mod handler;
mod opts;
mod parser;
pub mod protocol;
mod simple;

#[cfg(feature = "sync")]
pub mod sync;

#[cfg(feature = "tokio")]
pub mod tokio;

pub use error::{Error, ErrorKind, ProcessingError, Result};
pub use event::Event;
pub use handler::{EventQueue, StatusHandler};
pub use opts::{Charset, Opts, SuppressPolicy};
pub use parser::StreamParser;
pub use simple::{SimpleParser, parse_response_fields};

#[cfg(test)]
mod opts_test;
#[cfg(test)]
mod parser_test;
