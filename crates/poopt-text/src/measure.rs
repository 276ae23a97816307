//! Total display width of a buffer, in the manner of POSIX `wcswidth(3)`.
//!
//! Unlike the wrapper, this walks plain scalar values: format markers are not
//! recognised as units. The `0x19` introducer measures zero columns; the
//! bytes after it are ordinary characters.

use crate::decode::ScalarDecoder;
use crate::error::Result;
use crate::width::{WidthResolver, WidthTable, default_resolver};
use crate::wrap::LARGE_TEXT;

/// Number of columns needed to display `text`.
///
/// # Errors
///
/// Fails on the first undecodable byte sequence.
pub fn wcswidth<T>(text: &T) -> Result<usize>
where
    T: AsRef<[u8]> + ?Sized,
{
    wcswidth_with(default_resolver(), text)
}

/// [`wcswidth`] with an explicit width resolver.
///
/// # Errors
///
/// Fails on the first undecodable byte sequence.
pub fn wcswidth_with<W, T>(resolver: &WidthResolver<W>, text: &T) -> Result<usize>
where
    W: WidthTable,
    T: AsRef<[u8]> + ?Sized,
{
    let bytes = text.as_ref();
    let _span = (bytes.len() >= LARGE_TEXT)
        .then(|| tracing::debug_span!("wcswidth", len = bytes.len()).entered());

    ScalarDecoder::new(bytes).try_fold(0usize, |columns, decoded| {
        Ok(columns + resolver.width(decoded?.ch))
    })
}
