//! Entry points shaped for the host application.
//!
//! The host computes widths as `terminal width - offset - 1` and may end up
//! with a negative number on a very narrow window. The `*_checked` functions
//! take the host's signed integers and reject negative values with
//! [`Error::InvalidArgument`] instead of wrapping around.
//!
//! The slicing helpers turn logical spans back into `&str` lines, for callers
//! that hold the text as a Rust string rather than a host-side one.

use crate::error::{Error, Result};
use crate::scan::Units;
use crate::truncate::cut_by_columns;
use crate::wrap::{LineSpan, cut_text};

fn non_negative(name: &'static str, value: i64) -> Result<usize> {
    usize::try_from(value).map_err(|_| Error::InvalidArgument { name, value })
}

/// [`cut_text`] taking a signed host width.
///
/// # Errors
///
/// [`Error::InvalidArgument`] for a negative `width`, otherwise as [`cut_text`].
pub fn cut_text_checked<T>(text: &T, width: i64) -> Result<Vec<LineSpan>>
where
    T: AsRef<[u8]> + ?Sized,
{
    cut_text(text, non_negative("width", width)?)
}

/// [`cut_by_columns`] taking a signed host limit.
///
/// # Errors
///
/// [`Error::InvalidArgument`] for a negative `limit`, otherwise as
/// [`cut_by_columns`].
pub fn cut_by_columns_checked<T>(limit: i64, text: &T) -> Result<&[u8]>
where
    T: AsRef<[u8]> + ?Sized,
{
    cut_by_columns(non_negative("limit", limit)?, text)
}

/// [`cut_by_columns`] over a string, returning a string.
///
/// # Errors
///
/// Never fails for well-formed input; the `Result` mirrors [`cut_by_columns`].
pub fn cut_by_columns_str(limit: usize, text: &str) -> Result<&str> {
    let prefix = cut_by_columns(limit, text)?;
    // Cuts fall after a whole scalar or after an ASCII terminator.
    Ok(&text[..prefix.len()])
}

/// Byte offset of every logical position of `text`, plus its end.
fn logical_offsets(text: &str) -> Result<Vec<usize>> {
    let mut offsets = Vec::with_capacity(text.len() + 1);
    for unit in Units::new(text.as_bytes()) {
        let unit = unit?;
        offsets.extend((0..unit.logical_len()).map(|k| {
            if unit.is_marker() {
                unit.offset + k
            } else {
                unit.offset
            }
        }));
    }
    offsets.push(text.len());
    Ok(offsets)
}

/// Slice `text` by spans from [`cut_text`].
///
/// Positions past the end of the text clamp to it.
///
/// # Errors
///
/// Never fails for spans computed over the same `text`; the scan that maps
/// positions to bytes shares the decoder's error type.
pub fn span_slices<'a>(text: &'a str, spans: &[LineSpan]) -> Result<Vec<&'a str>> {
    let offsets = logical_offsets(text)?;
    let byte_at = |pos: usize| offsets.get(pos).copied().unwrap_or(text.len());
    Ok(spans
        .iter()
        .map(|span| {
            let start = byte_at(span.start);
            let end = byte_at(span.end).max(start);
            text.get(start..end).unwrap_or_default()
        })
        .collect())
}

/// Wrap `text` and return the lines as string slices.
///
/// # Errors
///
/// As [`cut_text`].
pub fn wrap_lines(text: &str, width: usize) -> Result<Vec<&str>> {
    let spans = cut_text(text, width)?;
    span_slices(text, &spans)
}
