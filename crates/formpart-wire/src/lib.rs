//! # Formpart Wire
//!
//! Synchronous multipart/form-data (RFC 7578) wire-format writer.
//!
//! ## Overview
//!
//! This crate is the encoding primitive driven by `formpart-core`. It owns
//! the wire-level concerns and nothing else:
//!
//! - **Boundary generation** (random token) and boundary validation
//! - **Part header framing** (`Content-Disposition`, optional `Content-Type`)
//! - **Body delimiting** and the terminating boundary marker
//! - **Content-Type header value** for the transport layer
//!
//! It does not decide what parts a message contains; callers open fields one
//! at a time and stream bytes into them.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`error`] | Wire-level error type |
//! | [`writer`] | The multipart writer and per-part field writer |
//!
//! ## Quick Start
//!
//! ```rust
//! use std::io::Write;
//! use formpart_wire::MultipartWriter;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut body = Vec::new();
//!     let mut writer = MultipartWriter::new(&mut body);
//!     let content_type = writer.content_type();
//!
//!     let mut field = writer.field("comment")?;
//!     field.write_all(b"hello")?;
//!
//!     writer.finish()?;
//!     assert!(content_type.starts_with("multipart/form-data; boundary="));
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod writer;

pub use error::WireError;
pub use writer::{FieldWriter, MultipartWriter};
