//! Codec Error Types

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CodecError>;

#[derive(Debug, Error)]
pub enum CodecError {
    /// Payload did not decode under the resolved writer schema (truncated
    /// data or schema/payload mismatch).
    #[error("Avro decode failed: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),
}
