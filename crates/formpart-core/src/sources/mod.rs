//! Bundled [`PartSource`](crate::PartSource) implementations.

mod file_stream;
mod json;

pub use file_stream::FileStream;
pub use json::JsonValue;
