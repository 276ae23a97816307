//! Error types for measurement and wrapping.
//!
//! Every operation in this crate is a pure function of its input, so there is
//! no transient failure class: an error always means the buffer (or a host
//! parameter) is unusable and the whole call is abandoned.

/// A byte sequence that does not decode as UTF-8.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// The bytes at `offset` do not form a valid encoding unit.
    InvalidSequence {
        /// Byte offset of the offending unit.
        offset: usize,
    },
    /// A multibyte unit starting at `offset` is cut off by the end of the buffer.
    IncompleteSequence {
        /// Byte offset of the truncated unit.
        offset: usize,
    },
}

impl DecodeError {
    /// Byte offset at which decoding failed.
    #[must_use]
    pub const fn offset(self) -> usize {
        match self {
            Self::InvalidSequence { offset } | Self::IncompleteSequence { offset } => offset,
        }
    }
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidSequence { offset } => {
                write!(f, "invalid multibyte sequence at byte {offset}")
            }
            Self::IncompleteSequence { offset } => {
                write!(f, "incomplete multibyte sequence at byte {offset}")
            }
        }
    }
}

impl std::error::Error for DecodeError {}

/// Errors from the public operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The text buffer could not be decoded.
    Decode(DecodeError),
    /// A host-supplied parameter is outside its domain (e.g. a negative width).
    InvalidArgument {
        /// Parameter name as the host knows it.
        name: &'static str,
        /// The rejected value.
        value: i64,
    },
}

impl Error {
    /// Whether this error comes from decoding the buffer.
    #[must_use]
    pub const fn is_decode(&self) -> bool {
        matches!(self, Self::Decode(_))
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Decode(err) => write!(f, "decode error: {err}"),
            Self::InvalidArgument { name, value } => {
                write!(f, "invalid argument: {name} = {value}")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Decode(err) => Some(err),
            Self::InvalidArgument { .. } => None,
        }
    }
}

impl From<DecodeError> for Error {
    fn from(err: DecodeError) -> Self {
        Self::Decode(err)
    }
}

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn decode_error_display_names_the_offset() {
        let err = DecodeError::IncompleteSequence { offset: 7 };
        assert_eq!(err.to_string(), "incomplete multibyte sequence at byte 7");
        assert_eq!(err.offset(), 7);
    }

    #[test]
    fn error_wraps_decode_error_as_source() {
        let err = Error::from(DecodeError::InvalidSequence { offset: 3 });
        assert!(err.is_decode());
        assert_eq!(
            err.to_string(),
            "decode error: invalid multibyte sequence at byte 3"
        );
        assert!(err.source().is_some());
    }

    #[test]
    fn invalid_argument_display() {
        let err = Error::InvalidArgument {
            name: "width",
            value: -4,
        };
        assert!(!err.is_decode());
        assert_eq!(err.to_string(), "invalid argument: width = -4");
        assert!(err.source().is_none());
    }
}
