use std::result::Result as StdResult;
use thiserror::Error;
use ua_bridge_sdk::StatusCode;

pub type Result<T> = StdResult<T, ProtocolError>;

/// Unrecoverable wire-contract violation.
///
/// Any of these means the two sides have desynchronized on the term format;
/// the session is terminated without attempting to resynchronize or send a
/// best-effort response.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("bad term version byte: {0}")]
    BadVersion(u8),
    #[error("unexpected tag {found} in {context}, expected {expected}")]
    UnexpectedTag {
        context: &'static str,
        expected: &'static str,
        found: u8,
    },
    #[error("{context} requires a {expected}-tuple, got arity {actual}")]
    ArityMismatch {
        context: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("unknown discriminant {value} in {context}")]
    UnknownDiscriminant { context: &'static str, value: u64 },
    #[error("integer out of range for {target}")]
    IntegerRange { target: &'static str },
    #[error("truncated term: need {needed} more bytes")]
    Truncated { needed: usize },
    #[error("atom is not valid utf-8")]
    AtomNotUtf8,
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    #[error("frame of {0} bytes exceeds the frame limit")]
    FrameTooLarge(usize),
}

/// Application-level failure reason carried inside an `{:error, reason}`
/// response. The session stays open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorReason {
    /// A user-supplied field inside a well-formed message had the wrong type.
    Einval,
    /// The target value attribute is empty.
    Nil,
    /// The actual value kind does not match what the caller asked for.
    Eagain,
    /// The node store reported a non-good status.
    Status(StatusCode),
}

impl ErrorReason {
    /// Short reason atoms; status reasons encode as the mnemonic binary
    /// instead.
    pub const fn atom(&self) -> Option<&'static str> {
        match self {
            ErrorReason::Einval => Some("einval"),
            ErrorReason::Nil => Some("nil"),
            ErrorReason::Eagain => Some("eagain"),
            ErrorReason::Status(_) => None,
        }
    }
}
