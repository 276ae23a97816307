//! In-band format markers.
//!
//! The chat client embeds formatting instructions directly in message text:
//! a marker starts with byte `0x19` and runs up to and including the first
//! terminator byte (`u`, `a`, `i`, `b`, `o` or `}`). Markers occupy logical
//! positions in the host string but are never drawn.
//!
//! A marker that reaches the end of the buffer without a terminator is
//! consumed to the end. Well-formed text never contains one, but the scanner
//! must not fail on it.

/// First byte of every format marker.
pub const MARKER_INTRODUCER: u8 = 0x19;

/// Bytes that end a format marker (inclusive).
pub const MARKER_TERMINATORS: [u8; 6] = [b'u', b'a', b'i', b'b', b'o', b'}'];

/// Result of scanning one marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerScan {
    /// Bytes consumed, introducer and terminator included.
    pub len: usize,
    /// `false` if the buffer ended before a terminator.
    pub terminated: bool,
}

/// Whether a marker begins at `cursor`.
#[inline]
#[must_use]
pub fn is_marker_start(bytes: &[u8], cursor: usize) -> bool {
    bytes.get(cursor) == Some(&MARKER_INTRODUCER)
}

#[inline]
fn is_terminator(b: u8) -> bool {
    MARKER_TERMINATORS.contains(&b)
}

/// Measure the marker starting at `cursor`.
///
/// The caller is expected to have checked [`is_marker_start`]; the byte at
/// `cursor` is consumed unconditionally. A cursor at or past the end of the
/// buffer consumes nothing.
#[must_use]
pub fn scan_marker(bytes: &[u8], cursor: usize) -> MarkerScan {
    let Some(rest) = bytes.get(cursor..).filter(|rest| !rest.is_empty()) else {
        return MarkerScan {
            len: 0,
            terminated: false,
        };
    };
    match rest[1..].iter().position(|&b| is_terminator(b)) {
        Some(idx) => MarkerScan {
            len: idx + 2,
            terminated: true,
        },
        None => {
            tracing::trace!(offset = cursor, len = rest.len(), "unterminated format marker");
            MarkerScan {
                len: rest.len(),
                terminated: false,
            }
        }
    }
}
