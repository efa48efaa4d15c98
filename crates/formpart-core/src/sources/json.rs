use std::io::Write;

use formpart_wire::MultipartWriter;
use serde::Serialize;

use crate::error::SourceError;
use crate::source::{PartSource, SourceKind};

/// Part source that serializes a value to JSON and writes it as one plain
/// form field.
///
/// Serialization happens up front into a buffer, so a value that fails to
/// serialize produces [`SourceError::Serialization`] before any byte of
/// the field reaches the writer. If the buffer copy itself fails partway,
/// the field is left partially written in the sink; the caller sees the
/// error and must discard the output.
#[derive(Debug, Clone)]
pub struct JsonValue<T: Serialize> {
    value: T,
}

impl<T: Serialize> JsonValue<T> {
    pub fn new(value: T) -> Self {
        Self { value }
    }
}

impl<T: Serialize> PartSource for JsonValue<T> {
    fn append(&mut self, name: &str, writer: &mut MultipartWriter<'_>) -> Result<(), SourceError> {
        let encoded = serde_json::to_vec(&self.value).map_err(SourceError::Serialization)?;
        let mut field = writer.field(name).map_err(SourceError::FieldCreation)?;
        field.write_all(&encoded).map_err(SourceError::StreamCopy)?;
        Ok(())
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Json
    }
}
