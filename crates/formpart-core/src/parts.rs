//! Ordered part sequence and the encoding orchestrator.

use std::io::Write;

use formpart_wire::MultipartWriter;

use crate::error::EncodeError;
use crate::source::PartSource;

/// A named part inside a multipart body.
///
/// `name` is the form field identifier; any filename metadata lives inside
/// the source. Names are not checked for uniqueness — a sequence with
/// duplicate names encodes exactly what it was given.
pub struct Part {
    name: String,
    source: Box<dyn PartSource>,
}

impl Part {
    pub fn new(name: impl Into<String>, source: impl PartSource + 'static) -> Self {
        Self {
            name: name.into(),
            source: Box::new(source),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Debug for Part {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Part")
            .field("name", &self.name)
            .field("kind", &self.source.kind())
            .finish()
    }
}

/// Ordered sequence of parts encoded into one multipart body.
///
/// Order is significant: it determines on-wire field order. A sequence is
/// consumed by [`write_into`](Self::write_into) because its sources are
/// single-use (stream-backed sources read their reader to exhaustion and
/// release it at most once).
#[derive(Debug, Default)]
pub struct Parts {
    parts: Vec<Part>,
}

impl Parts {
    pub fn new() -> Self {
        Self { parts: Vec::new() }
    }

    pub fn push(&mut self, part: Part) {
        self.parts.push(part);
    }

    /// Appends a part, builder style.
    pub fn with_part(mut self, name: impl Into<String>, source: impl PartSource + 'static) -> Self {
        self.parts.push(Part::new(name, source));
        self
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Encodes the sequence into `target` and returns the `Content-Type`
    /// header value the transport must send with the body.
    ///
    /// Parts are appended strictly in sequence order; bytes stream to
    /// `target` as each part is processed, so nothing buffers the whole
    /// message. The first source failure aborts the encode — remaining
    /// sources are never invoked — and is returned wrapped with the
    /// offending part's name and kind. After all parts succeed the writer
    /// is finalized, which writes the terminating boundary marker.
    ///
    /// # Errors
    ///
    /// [`EncodeError::Part`] for a source failure, [`EncodeError::Finalization`]
    /// if closing the body fails. In either case `target` holds a prefix
    /// of the encoded message that is not rolled back, and the content
    /// type is not returned; the caller must discard the sink contents.
    pub fn write_into(self, target: &mut dyn Write) -> Result<String, EncodeError> {
        let mut writer = MultipartWriter::new(target);
        for part in self.parts {
            let Part { name, mut source } = part;
            let kind = source.kind();
            source
                .append(&name, &mut writer)
                .map_err(|cause| EncodeError::Part { name, kind, cause })?;
        }
        let content_type = writer.content_type();
        writer.finish().map_err(EncodeError::Finalization)?;
        Ok(content_type)
    }
}

impl FromIterator<Part> for Parts {
    fn from_iter<I: IntoIterator<Item = Part>>(iter: I) -> Self {
        Self {
            parts: iter.into_iter().collect(),
        }
    }
}

impl Extend<Part> for Parts {
    fn extend<I: IntoIterator<Item = Part>>(&mut self, iter: I) {
        self.parts.extend(iter);
    }
}
