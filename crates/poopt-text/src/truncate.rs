//! Truncation to a column budget.
//!
//! [`cut_by_columns`] returns the longest prefix of a buffer that fits in a
//! number of columns. A wide character is never cut in half: if it does not
//! fit whole, it is left out. Format markers are kept or dropped whole and
//! cost nothing.
//!
//! # Example
//! ```
//! use poopt_text::cut_by_columns;
//!
//! assert_eq!(cut_by_columns(5, "エメルカ").unwrap(), "エメ".as_bytes());
//! assert_eq!(cut_by_columns(1, "エメルカ").unwrap(), b"");
//! ```

use crate::error::Result;
use crate::scan::{UnitKind, Units};
use crate::width::{WidthResolver, WidthTable, default_resolver};

/// Longest byte prefix of `text` taking at most `limit` columns.
///
/// # Errors
///
/// Fails on the first undecodable byte sequence met before the cut point.
pub fn cut_by_columns<T>(limit: usize, text: &T) -> Result<&[u8]>
where
    T: AsRef<[u8]> + ?Sized,
{
    cut_by_columns_with(default_resolver(), limit, text)
}

/// [`cut_by_columns`] with an explicit width resolver.
///
/// # Errors
///
/// Fails on the first undecodable byte sequence met before the cut point.
pub fn cut_by_columns_with<'a, W, T>(
    resolver: &WidthResolver<W>,
    limit: usize,
    text: &'a T,
) -> Result<&'a [u8]>
where
    W: WidthTable,
    T: AsRef<[u8]> + ?Sized,
{
    let bytes = text.as_ref();
    let mut columns = 0;
    let mut cut = 0;

    for unit in Units::new(bytes) {
        if columns == limit {
            break;
        }
        let unit = unit?;
        if let UnitKind::Scalar(ch) = unit.kind {
            let cols = resolver.width(ch);
            if columns + cols > limit {
                break;
            }
            columns += cols;
        }
        cut = unit.end();
    }

    Ok(&bytes[..cut])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DecodeError, Error};
    use crate::width::WidthPolicy;

    fn cut(limit: usize, text: &str) -> &str {
        let bytes = cut_by_columns_with(&WidthResolver::new(WidthPolicy::Standard), limit, text)
            .unwrap();
        std::str::from_utf8(bytes).unwrap()
    }

    #[test]
    fn katakana_budgets() {
        assert_eq!(cut(5, "エメルカ"), "エメ");
        assert_eq!(cut(2, "エメルカ"), "エ");
        assert_eq!(cut(1, "エメルカ"), "");
        assert_eq!(cut(42, "エメルカ"), "エメルカ");
    }

    #[test]
    fn zero_budget_is_empty() {
        assert_eq!(cut(0, "abc"), "");
    }

    #[test]
    fn ascii_prefix() {
        assert_eq!(cut(5, "hello world"), "hello");
        assert_eq!(cut(3, ""), "");
    }

    #[test]
    fn stops_once_budget_is_met() {
        // The combining mark would fit, but the budget is already spent.
        assert_eq!(cut(1, "e\u{301}x"), "e");
        assert_eq!(cut(2, "e\u{301}x"), "e\u{301}x");
    }

    #[test]
    fn markers_are_free_and_whole() {
        assert_eq!(cut(2, "a\x1912}bc"), "a\x1912}b");
        assert_eq!(cut(1, "a\x19bc"), "a");
        assert_eq!(cut(1, "\x19bab"), "\x19ba");
    }

    #[test]
    fn error_after_cut_point_is_not_reached() {
        let bytes = [b'a', b'b', 0xE3];
        assert_eq!(cut_by_columns(2, &bytes[..]).unwrap(), b"ab");
    }

    #[test]
    fn incomplete_sequence_before_cut_point_fails() {
        let bytes = [b'a', 0xE3];
        assert_eq!(
            cut_by_columns(5, &bytes[..]),
            Err(Error::Decode(DecodeError::IncompleteSequence { offset: 1 }))
        );
    }
}
