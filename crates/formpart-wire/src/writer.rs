//! Multipart writer over a borrowed output sink.
//!
//! The writer frames one part at a time: opening a field writes the dash
//! boundary line and the part headers, after which the returned
//! [`FieldWriter`] streams body bytes straight through to the sink. Opening
//! the next field (or finishing) closes the previous part body. Nothing is
//! buffered beyond the header lines of the part currently being opened.

use std::io::Write;

use crate::error::WireError;

/// Longest boundary token accepted, per RFC 2046 section 5.1.1.
const MAX_BOUNDARY_LEN: usize = 70;

/// Streaming multipart/form-data writer.
///
/// Parts must be written strictly in sequence: a [`FieldWriter`] borrows the
/// writer mutably, so the previous part is always complete before the next
/// one opens.
pub struct MultipartWriter<'a> {
    target: &'a mut dyn Write,
    boundary: String,
    started: bool,
    finished: bool,
}

impl<'a> MultipartWriter<'a> {
    /// Creates a writer with a freshly generated random boundary.
    pub fn new(target: &'a mut dyn Write) -> Self {
        Self {
            target,
            boundary: gen_boundary(),
            started: false,
            finished: false,
        }
    }

    /// Creates a writer with an explicit boundary token.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::InvalidBoundary`] if the token is empty, longer
    /// than 70 bytes, ends with a space, or contains a character outside
    /// the RFC 2046 boundary set.
    pub fn with_boundary(
        target: &'a mut dyn Write,
        boundary: impl Into<String>,
    ) -> Result<Self, WireError> {
        let boundary = boundary.into();
        if !is_valid_boundary(&boundary) {
            return Err(WireError::InvalidBoundary { boundary });
        }
        Ok(Self {
            target,
            boundary,
            started: false,
            finished: false,
        })
    }

    /// Returns the boundary token separating parts in the output.
    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// Returns the value to send as the transport `Content-Type` header.
    ///
    /// The returned string must be used verbatim; a peer cannot parse the
    /// body without the boundary parameter it carries.
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    /// Opens a plain form field named `name` and returns a writer for its
    /// body bytes.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::Finished`] if called after [`finish`](Self::finish),
    /// or [`WireError::Io`] if writing the part headers to the sink fails.
    pub fn field(&mut self, name: &str) -> Result<FieldWriter<'_, 'a>, WireError> {
        self.open_part(name, None)
    }

    /// Opens a file field named `name` carrying `file_name` metadata.
    ///
    /// The part is given `Content-Type: application/octet-stream`; callers
    /// stream the file bytes through the returned writer.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`field`](Self::field).
    pub fn file_field(
        &mut self,
        name: &str,
        file_name: &str,
    ) -> Result<FieldWriter<'_, 'a>, WireError> {
        self.open_part(name, Some(file_name))
    }

    /// Closes the final part body and writes the terminating boundary
    /// marker. For a writer with no parts the output is the terminator
    /// line alone.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::Io`] if the sink rejects the terminator bytes.
    pub fn finish(&mut self) -> Result<(), WireError> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        if self.started {
            self.target.write_all(b"\r\n")?;
        }
        write!(self.target, "--{}--\r\n", self.boundary)?;
        self.target.flush()?;
        Ok(())
    }

    fn open_part(
        &mut self,
        name: &str,
        file_name: Option<&str>,
    ) -> Result<FieldWriter<'_, 'a>, WireError> {
        if self.finished {
            return Err(WireError::Finished {
                name: name.to_string(),
            });
        }
        if self.started {
            // Close the previous part body.
            self.target.write_all(b"\r\n")?;
        }
        write!(self.target, "--{}\r\n", self.boundary)?;
        write!(
            self.target,
            "Content-Disposition: form-data; name=\"{}\"",
            escape_quoted(name)
        )?;
        if let Some(file_name) = file_name {
            write!(self.target, "; filename=\"{}\"", escape_quoted(file_name))?;
            self.target
                .write_all(b"\r\nContent-Type: application/octet-stream")?;
        }
        self.target.write_all(b"\r\n\r\n")?;
        self.started = true;
        Ok(FieldWriter { writer: self })
    }
}

impl std::fmt::Debug for MultipartWriter<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MultipartWriter")
            .field("boundary", &self.boundary)
            .field("started", &self.started)
            .field("finished", &self.finished)
            .finish()
    }
}

/// Body writer for a single open part.
///
/// Bytes pass straight through to the underlying sink; dropping the value
/// leaves the part body wherever the last write ended.
pub struct FieldWriter<'w, 'a> {
    writer: &'w mut MultipartWriter<'a>,
}

impl std::fmt::Debug for FieldWriter<'_, '_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldWriter").finish_non_exhaustive()
    }
}

impl Write for FieldWriter<'_, '_> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer.target.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.writer.target.flush()
    }
}

/// Escapes a header parameter value for use inside double quotes.
fn escape_quoted(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\r', "\\\r")
        .replace('\n', "\\\n")
}

fn is_valid_boundary(boundary: &str) -> bool {
    if boundary.is_empty() || boundary.len() > MAX_BOUNDARY_LEN {
        return false;
    }
    if boundary.ends_with(' ') {
        return false;
    }
    boundary.bytes().all(|b| {
        b.is_ascii_alphanumeric() || matches!(b, b'\'' | b'(' | b')' | b'+' | b'_' | b',' | b'-' | b'.' | b'/' | b':' | b'=' | b'?' | b' ')
    })
}

fn gen_boundary() -> String {
    let a = fastrand::u64(..);
    let b = fastrand::u64(..);
    format!("{a:016x}-{b:016x}")
}
