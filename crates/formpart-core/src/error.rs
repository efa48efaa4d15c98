use formpart_wire::WireError;
use thiserror::Error;

use crate::source::SourceKind;

/// Classification of a source failure, independent of message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceErrorKind {
    Serialization,
    StreamCopy,
    FieldCreation,
    ResourceRelease,
}

impl SourceErrorKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Serialization => "serialization",
            Self::StreamCopy => "stream_copy",
            Self::FieldCreation => "field_creation",
            Self::ResourceRelease => "resource_release",
        }
    }
}

/// Failure raised by a single part source while appending itself.
///
/// The original cause is preserved as the error source so callers can
/// assert on it independently of message text.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("value serialization failed")]
    Serialization(#[source] serde_json::Error),

    #[error("stream copy to the output sink failed")]
    StreamCopy(#[source] std::io::Error),

    #[error("could not start a new field")]
    FieldCreation(#[source] WireError),

    #[error("releasing the part's stream failed")]
    ResourceRelease(#[source] std::io::Error),
}

impl SourceError {
    pub const fn kind(&self) -> SourceErrorKind {
        match self {
            Self::Serialization(_) => SourceErrorKind::Serialization,
            Self::StreamCopy(_) => SourceErrorKind::StreamCopy,
            Self::FieldCreation(_) => SourceErrorKind::FieldCreation,
            Self::ResourceRelease(_) => SourceErrorKind::ResourceRelease,
        }
    }
}

/// Top-level error returned by [`Parts::write_into`](crate::Parts::write_into).
///
/// A part failure identifies the offending part by name and source kind and
/// chains the underlying [`SourceError`] as its cause. Whatever the
/// variant, bytes already written to the sink stay written; callers must
/// treat the sink contents as an incomplete message.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("failed to append {kind} part '{name}'")]
    Part {
        name: String,
        kind: SourceKind,
        #[source]
        cause: SourceError,
    },

    #[error("failed to finalize the multipart body")]
    Finalization(#[source] WireError),
}

impl EncodeError {
    /// Name of the part that failed, if the failure came from a source.
    pub fn part_name(&self) -> Option<&str> {
        match self {
            Self::Part { name, .. } => Some(name),
            Self::Finalization(_) => None,
        }
    }

    /// Kind of the underlying source failure, if any.
    pub fn source_kind(&self) -> Option<SourceErrorKind> {
        match self {
            Self::Part { cause, .. } => Some(cause.kind()),
            Self::Finalization(_) => None,
        }
    }
}
