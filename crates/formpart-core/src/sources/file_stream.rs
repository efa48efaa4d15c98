use std::io::{self, Read};

use formpart_wire::MultipartWriter;

use crate::error::SourceError;
use crate::source::{PartSource, SourceKind};

/// One-shot release callback for a streamed part's underlying resource.
type Closer = Box<dyn FnOnce() -> io::Result<()>>;

/// Part source that streams a reader's bytes into one file field.
///
/// The field is written with `filename` metadata taken from `file_name`
/// (distinct from the part name, which identifies the form field). The
/// copy is unbounded and streaming: bytes flow from the reader to the sink
/// without buffering the whole file.
pub struct FileStream<R: Read> {
    file_name: String,
    reader: R,
    closer: Option<Closer>,
}

impl<R: Read> FileStream<R> {
    pub fn new(file_name: impl Into<String>, reader: R) -> Self {
        Self {
            file_name: file_name.into(),
            reader,
            closer: None,
        }
    }

    /// Attaches a release callback invoked once after the copy succeeds.
    ///
    /// The callback is *not* invoked when the copy fails: the original
    /// design releases the resource only on the success path, and callers
    /// relying on that asymmetry would break if it changed. A caller that
    /// needs unconditional cleanup should own the resource outside the
    /// source (e.g. a guard) instead of handing it to the closer.
    pub fn with_closer(mut self, closer: impl FnOnce() -> io::Result<()> + 'static) -> Self {
        self.closer = Some(Box::new(closer));
        self
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }
}

impl<R: Read> PartSource for FileStream<R> {
    fn append(&mut self, name: &str, writer: &mut MultipartWriter<'_>) -> Result<(), SourceError> {
        let mut field = writer
            .file_field(name, &self.file_name)
            .map_err(SourceError::FieldCreation)?;
        io::copy(&mut self.reader, &mut field).map_err(SourceError::StreamCopy)?;
        if let Some(closer) = self.closer.take() {
            closer().map_err(SourceError::ResourceRelease)?;
        }
        Ok(())
    }

    fn kind(&self) -> SourceKind {
        SourceKind::FileStream
    }
}

impl<R: Read> std::fmt::Debug for FileStream<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileStream")
            .field("file_name", &self.file_name)
            .field("has_closer", &self.closer.is_some())
            .finish()
    }
}
