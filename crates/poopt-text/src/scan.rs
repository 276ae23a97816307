//! Unit-level scan: scalars and whole format markers.
//!
//! [`Units`] walks a buffer once, advancing the byte cursor and the logical
//! position side by side. A scalar value moves the logical position by one; a
//! marker moves it by its byte length. Neither counter is ever derived from
//! the other.

use crate::decode::decode_scalar;
use crate::error::Result;
use crate::marker::{is_marker_start, scan_marker};

/// What a [`Unit`] holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    /// A decoded scalar value.
    Scalar(char),
    /// A format marker. Zero columns.
    Marker {
        /// `false` if the buffer ended inside the marker.
        terminated: bool,
    },
}

/// One step of the scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unit {
    pub kind: UnitKind,
    /// Byte offset of the first byte.
    pub offset: usize,
    /// Length in bytes.
    pub len: usize,
    /// Logical position of the first byte.
    pub logical: usize,
}

impl Unit {
    /// Logical positions this unit occupies.
    #[inline]
    #[must_use]
    pub fn logical_len(&self) -> usize {
        match self.kind {
            UnitKind::Scalar(_) => 1,
            UnitKind::Marker { .. } => self.len,
        }
    }

    /// Byte offset just past this unit.
    #[inline]
    #[must_use]
    pub fn end(&self) -> usize {
        self.offset + self.len
    }

    #[inline]
    #[must_use]
    pub fn is_marker(&self) -> bool {
        matches!(self.kind, UnitKind::Marker { .. })
    }
}

/// Iterator over the [`Unit`]s of a buffer. Stops after the first error.
#[derive(Debug, Clone)]
pub struct Units<'a> {
    bytes: &'a [u8],
    cursor: usize,
    logical: usize,
    failed: bool,
}

impl<'a> Units<'a> {
    #[must_use]
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            cursor: 0,
            logical: 0,
            failed: false,
        }
    }

    /// Byte position of the next unit.
    #[inline]
    #[must_use]
    pub fn byte_position(&self) -> usize {
        self.cursor
    }

    /// Logical position of the next unit.
    #[inline]
    #[must_use]
    pub fn logical_position(&self) -> usize {
        self.logical
    }
}

impl Iterator for Units<'_> {
    type Item = Result<Unit>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.cursor >= self.bytes.len() {
            return None;
        }

        let (kind, len) = if is_marker_start(self.bytes, self.cursor) {
            let scan = scan_marker(self.bytes, self.cursor);
            (
                UnitKind::Marker {
                    terminated: scan.terminated,
                },
                scan.len,
            )
        } else {
            match decode_scalar(self.bytes, self.cursor) {
                Ok(Some((ch, len))) => (UnitKind::Scalar(ch), len),
                Ok(None) => return None,
                Err(err) => {
                    self.failed = true;
                    return Some(Err(err));
                }
            }
        };

        let unit = Unit {
            kind,
            offset: self.cursor,
            len,
            logical: self.logical,
        };
        self.cursor += len;
        self.logical += unit.logical_len();
        Some(Ok(unit))
    }
}

impl std::iter::FusedIterator for Units<'_> {}

/// Total logical length of `text`: scalars plus marker bytes.
///
/// # Errors
///
/// Propagates the first decode error.
pub fn logical_len(text: &[u8]) -> Result<usize> {
    let mut units = Units::new(text);
    for unit in units.by_ref() {
        unit?;
    }
    Ok(units.logical_position())
}
