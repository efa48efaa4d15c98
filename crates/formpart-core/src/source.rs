//! Part source contract.
//!
//! A [`PartSource`] knows how to append exactly one logical part, under a
//! caller-chosen field name, to an in-progress multipart writer. The two
//! bundled implementations live in [`crate::sources`]; anything else that
//! can produce a part body may implement the trait.

use std::fmt::{Display, Formatter};

use formpart_wire::MultipartWriter;

use crate::error::SourceError;

/// Identifies the flavour of a part source in error context and debugging
/// output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Json,
    FileStream,
    /// Label for sources implemented outside this crate.
    Other(&'static str),
}

impl SourceKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::FileStream => "file_stream",
            Self::Other(label) => label,
        }
    }
}

impl Display for SourceKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Data producer that can append itself to a multipart writer as one part.
///
/// # Contract
///
/// - `append` writes exactly one logical part under `name` and returns the
///   first failure it hits. On success the writer is left between parts,
///   never inside one.
/// - Sources are single-use: stream-backed implementations consume their
///   reader and release it at most once, so a source must not be appended
///   twice or shared across sequences.
///
/// `append` takes `&mut self` because reading a stream and taking a
/// one-shot release callback both need exclusive access.
pub trait PartSource {
    /// Appends this source's data as one part named `name`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] when serialization, field creation, the
    /// body copy, or resource release fails. The writer may have received
    /// a partial part body by then; the sink is not rolled back.
    fn append(&mut self, name: &str, writer: &mut MultipartWriter<'_>) -> Result<(), SourceError>;

    /// Kind tag used when wrapping this source's failures with context.
    fn kind(&self) -> SourceKind;
}
