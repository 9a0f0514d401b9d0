mod reader;

pub use reader::EventReader;
