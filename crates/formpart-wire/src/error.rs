use thiserror::Error;

/// Wire-level errors raised while framing a multipart body.
#[derive(Debug, Error)]
pub enum WireError {
    #[error("write to output sink failed")]
    Io(#[from] std::io::Error),

    #[error("cannot start field '{name}' after the writer is finished")]
    Finished { name: String },

    #[error("invalid boundary token '{boundary}'")]
    InvalidBoundary { boundary: String },
}

impl WireError {
    /// True when the failure came from the output sink rather than misuse
    /// of the writer.
    pub const fn is_io(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}
