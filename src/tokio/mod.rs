mod stream;

pub use stream::{EventStream, spawn_decoder};
