//! Agent error types
//!
//! Mirrors the shape of a decode-side `ParseError`: a small enum, a
//! `Display` impl, and a `Result` alias. Every data-path error here is
//! recovered locally by the caller (see `receiver.rs`) — nothing in this
//! crate panics or unwinds on bad input.

use std::fmt;

/// Error surfaced by the encoding data path.
///
/// None of these are fatal to the agent: the offending sample is dropped,
/// the receiver's buffer is reset to a known-good state, and a single line
/// is routed through the agent's error sink (see `callbacks.rs`).
#[derive(Debug)]
pub enum AgentError {
    /// A flow or counters sample would not fit the datagram even on its own.
    EncodingOverflow(String),
    /// An element carried a tag the encoder does not recognize.
    UnknownTag(u32),
    /// The number of bytes written did not match the pre-computed size.
    ///
    /// This indicates a bug in the encoder itself (a size function and its
    /// matching writer have drifted apart), not a caller mistake.
    EncodingMismatch { expected: usize, actual: usize },
}

impl fmt::Display for AgentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentError::EncodingOverflow(msg) => write!(f, "encoding overflow: {}", msg),
            AgentError::UnknownTag(tag) => write!(f, "unexpected tag ({})", tag),
            AgentError::EncodingMismatch { expected, actual } => write!(
                f,
                "encoding_size({}) != expected_size({})",
                actual, expected
            ),
        }
    }
}

impl std::error::Error for AgentError {}

/// Result type for encoding operations.
pub type Result<T> = std::result::Result<T, AgentError>;
