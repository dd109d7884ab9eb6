use std::io;
use thiserror::Error;

/// An error raised by a mirror operation against a target VM.
#[derive(Debug, Error)]
pub enum MirrorError {
    /// The mirrored object has been garbage collected in the target VM.
    #[error("object has been collected in the target vm")]
    ObjectCollected,
    /// The backend reported a failure for the query itself.
    #[error("debug interface query failed: {0}")]
    Query(String),
    /// Transport-level failure while talking to the target VM.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl From<MirrorError> for io::Error {
    fn from(value: MirrorError) -> Self {
        match value {
            MirrorError::Io(io) => io,
            other => io::Error::other(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_conversion_preserves_underlying_error() {
        let inner = io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed");
        let err: io::Error = MirrorError::from(inner).into();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);

        let err: io::Error = MirrorError::ObjectCollected.into();
        assert!(err.to_string().contains("collected"));
    }
}
