//! UTF-8 scalar decoding over a borrowed byte buffer.
//!
//! The decoder never allocates and never looks further ahead than the four
//! bytes a single scalar can span. It reports two failure kinds so callers can
//! tell a corrupt buffer from one that was cut in the middle of a character.

use crate::error::{DecodeError, Result};

/// Longest UTF-8 encoding of a single scalar value.
const MAX_SCALAR_LEN: usize = 4;

/// One scalar value and where it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoded {
    /// The decoded scalar value.
    pub ch: char,
    /// Byte offset of its first byte.
    pub offset: usize,
    /// Number of bytes it occupies.
    pub len: usize,
}

/// Decode the scalar value starting at `cursor`.
///
/// Returns `Ok(None)` when the cursor sits at (or past) the end of the buffer,
/// and `Ok(Some((ch, consumed)))` otherwise.
///
/// # Errors
///
/// [`DecodeError::InvalidSequence`] when the bytes at `cursor` are not valid
/// UTF-8, [`DecodeError::IncompleteSequence`] when they are a valid prefix cut
/// off by the end of the buffer.
pub fn decode_scalar(bytes: &[u8], cursor: usize) -> Result<Option<(char, usize)>> {
    let Some(rest) = bytes.get(cursor..).filter(|rest| !rest.is_empty()) else {
        return Ok(None);
    };

    // ASCII fast path.
    if rest[0] < 0x80 {
        return Ok(Some((char::from(rest[0]), 1)));
    }

    let window = &rest[..rest.len().min(MAX_SCALAR_LEN)];
    let valid = match std::str::from_utf8(window) {
        Ok(s) => s,
        Err(err) if err.valid_up_to() > 0 => {
            // `valid_up_to` lands on a char boundary, so this cannot fail.
            std::str::from_utf8(&window[..err.valid_up_to()]).unwrap_or_default()
        }
        Err(err) => {
            return Err(match err.error_len() {
                Some(_) => DecodeError::InvalidSequence { offset: cursor },
                None => DecodeError::IncompleteSequence { offset: cursor },
            }
            .into());
        }
    };

    Ok(valid.chars().next().map(|ch| (ch, ch.len_utf8())))
}

/// Lazy iterator over the scalar values of a buffer.
///
/// Yields `Err` once at the first undecodable position and then stops.
#[derive(Debug, Clone)]
pub struct ScalarDecoder<'a> {
    bytes: &'a [u8],
    cursor: usize,
    failed: bool,
}

impl<'a> ScalarDecoder<'a> {
    /// Start decoding at the beginning of `bytes`.
    #[must_use]
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            cursor: 0,
            failed: false,
        }
    }

    /// Bytes consumed so far.
    #[inline]
    #[must_use]
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// The undecoded remainder of the buffer.
    #[must_use]
    pub fn remaining(&self) -> &'a [u8] {
        &self.bytes[self.cursor.min(self.bytes.len())..]
    }
}

impl Iterator for ScalarDecoder<'_> {
    type Item = Result<Decoded>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match decode_scalar(self.bytes, self.cursor) {
            Ok(Some((ch, len))) => {
                let offset = self.cursor;
                self.cursor += len;
                Some(Ok(Decoded { ch, offset, len }))
            }
            Ok(None) => None,
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.failed {
            return (0, Some(0));
        }
        let rest = self.bytes.len().saturating_sub(self.cursor);
        (rest.div_ceil(MAX_SCALAR_LEN), Some(rest))
    }
}

impl std::iter::FusedIterator for ScalarDecoder<'_> {}
