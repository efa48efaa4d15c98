//! # Formpart Core
//!
//! Part source contracts and the orchestrator that encodes an ordered part
//! sequence into one multipart/form-data body.
//!
//! ## Overview
//!
//! This crate provides the foundational components for formpart:
//!
//! - **Part source contract** ([`PartSource`]) letting any data producer
//!   append itself as one part of an in-progress body
//! - **Bundled producers**: [`JsonValue`] (serializes a value as one plain
//!   field) and [`FileStream`] (streams a reader into one file field)
//! - **Part sequence orchestrator** ([`Parts`]) driving the wire writer
//!   part by part and reporting the `Content-Type` header value
//! - **Structured errors** with intact cause chains
//!
//! The wire format itself (boundaries, part header framing, terminator)
//! lives in [`formpart_wire`]; this crate drives it.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`error`] | Source and encode error types |
//! | [`parts`] | [`Part`], [`Parts`] and the encode orchestrator |
//! | [`source`] | The [`PartSource`] trait and [`SourceKind`] |
//! | [`sources`] | Bundled source implementations |
//!
//! ## Quick Start
//!
//! ```rust
//! use formpart_core::{FileStream, JsonValue, Parts};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let parts = Parts::new()
//!         .with_part("meta", JsonValue::new(serde_json::json!({ "a": 1 })))
//!         .with_part("file", FileStream::new("x.txt", &b"hello"[..]));
//!
//!     let mut body = Vec::new();
//!     let content_type = parts.write_into(&mut body)?;
//!
//!     // Send `body` with `content_type` as the Content-Type header.
//!     assert!(content_type.starts_with("multipart/form-data; boundary="));
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Encoding stops at the first failure. The error names the offending part
//! and keeps the underlying cause in the chain:
//!
//! ```rust
//! use formpart_core::{EncodeError, SourceErrorKind};
//!
//! fn handle_error(error: EncodeError) {
//!     match error.source_kind() {
//!         Some(SourceErrorKind::Serialization) => {
//!             // The value could not be encoded; nothing of that field was written.
//!         }
//!         Some(SourceErrorKind::StreamCopy) => {
//!             // The sink or a reader failed mid-part; discard the output.
//!         }
//!         _ => {}
//!     }
//! }
//! ```
//!
//! Whenever `write_into` fails, the output sink holds an incomplete
//! message prefix. There is no rollback; discard the sink contents and do
//! not use a content type for them.

pub mod error;
pub mod parts;
pub mod source;
pub mod sources;

pub use error::{EncodeError, SourceError, SourceErrorKind};
pub use parts::{Part, Parts};
pub use source::{PartSource, SourceKind};
pub use sources::{FileStream, JsonValue};

// The wire writer appears in the `PartSource` contract, so re-export it.
pub use formpart_wire::{FieldWriter, MultipartWriter, WireError};
