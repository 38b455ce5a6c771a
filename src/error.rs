//! Error types for the paste pipeline.
//!
//! Almost nothing in this crate fails loudly: missing clipboard data, an
//! exhausted allow-list, or a disabled editor all degrade to a lower-fidelity
//! insertion (see `PasteOutcome`). The errors below cover the one genuinely
//! fallible boundary: serializing a DOM tree back to markup.

use thiserror::Error;

/// Errors raised while normalizing or sanitizing pasted content.
#[derive(Debug, Error)]
pub enum PasteError {
    #[error("failed to serialize document fragment: {0}")]
    Serialize(#[from] std::io::Error),

    #[error("serialized fragment was not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}
