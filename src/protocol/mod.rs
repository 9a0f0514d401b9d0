pub mod decoder;
pub mod primitive;
pub mod response;
pub mod row;
pub mod tokenizer;
pub mod r#trait;

pub use decoder::Decoder;
pub use response::{Attributes, MetadataBlock, ReplyError, ReplyStatus};
pub use row::DataRow;
pub use tokenizer::XmlTokenizer;
pub use r#trait::{RetsHandler, Tokenizer, XmlHandler};

#[cfg(test)]
mod row_test;
