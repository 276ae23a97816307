//! Column width of a single scalar value.
//!
//! Width tables disagree, and some of them are wrong: a few platform `wcwidth`
//! implementations report "unprintable" for emoji that terminals draw as two
//! cells. The resolver therefore splits the lookup in two steps:
//!
//! 1. a [`WidthTable`] gives the raw answer, `None` meaning unprintable;
//! 2. [`correct_unprintable`] turns a stray `None` into `Some(1)`, except for
//!    the format-marker introducer, which really is non-printing.
//!
//! A table that is known to be correct can be used through
//! [`WidthResolver::without_correction`] and nothing downstream changes.
//!
//! # Configuration
//!
//! The default resolver follows `POOPT_CJK_WIDTH` (`1`, `true`, `yes`, `on`):
//! when set, East Asian Ambiguous characters are measured as double-width.
//! The variable is read once per process.

use std::sync::OnceLock;

use unicode_width::UnicodeWidthChar;

use crate::marker::MARKER_INTRODUCER;

/// Environment variable selecting [`WidthPolicy::CjkAmbiguousWide`].
pub const CJK_WIDTH_ENV: &str = "POOPT_CJK_WIDTH";

/// Widest cell count a terminal gives a single scalar.
const MAX_CELL_WIDTH: usize = 2;

/// Source of raw per-scalar widths.
pub trait WidthTable {
    /// Columns taken by `ch`, or `None` if the table considers it unprintable.
    fn raw_width(&self, ch: char) -> Option<usize>;
}

impl<T: WidthTable + ?Sized> WidthTable for &T {
    #[inline]
    fn raw_width(&self, ch: char) -> Option<usize> {
        (**self).raw_width(ch)
    }
}

/// Unicode width policy backed by the `unicode-width` tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WidthPolicy {
    /// East Asian Ambiguous characters are single-width.
    #[default]
    Standard,
    /// East Asian Ambiguous characters are double-width, as CJK locales expect.
    CjkAmbiguousWide,
}

impl WidthPolicy {
    /// Policy selected by the process environment (cached).
    #[must_use]
    pub fn from_env() -> Self {
        static POLICY: OnceLock<WidthPolicy> = OnceLock::new();
        *POLICY.get_or_init(|| width_policy_from_env(|key| std::env::var(key).ok()))
    }
}

impl WidthTable for WidthPolicy {
    #[inline]
    fn raw_width(&self, ch: char) -> Option<usize> {
        let w = match self {
            Self::Standard => UnicodeWidthChar::width(ch),
            Self::CjkAmbiguousWide => UnicodeWidthChar::width_cjk(ch),
        };
        w.map(|w| w.min(MAX_CELL_WIDTH))
    }
}

#[inline]
fn env_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Compute the width policy using a custom environment lookup.
pub fn width_policy_from_env<F>(get_env: F) -> WidthPolicy
where
    F: Fn(&str) -> Option<String>,
{
    match get_env(CJK_WIDTH_ENV) {
        Some(value) if env_flag(&value) => WidthPolicy::CjkAmbiguousWide,
        _ => WidthPolicy::Standard,
    }
}

/// Replace a spurious "unprintable" answer with the most probable width.
///
/// Only the marker introducer keeps its `None`; every other scalar reaching
/// the resolver comes from a successfully decoded buffer, so an unprintable
/// verdict is taken as a table defect and reported as one column.
#[inline]
#[must_use]
pub fn correct_unprintable(ch: char, raw: Option<usize>) -> Option<usize> {
    match raw {
        None if ch != char::from(MARKER_INTRODUCER) => Some(1),
        other => other,
    }
}

/// Maps scalar values to display columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidthResolver<T = WidthPolicy> {
    table: T,
    correct: bool,
}

impl<T: WidthTable> WidthResolver<T> {
    /// Resolver over `table`, with the unprintable correction applied.
    #[must_use]
    pub const fn new(table: T) -> Self {
        Self {
            table,
            correct: true,
        }
    }

    /// Resolver over a table that is trusted as-is.
    #[must_use]
    pub const fn without_correction(table: T) -> Self {
        Self {
            table,
            correct: false,
        }
    }

    /// The underlying table.
    #[must_use]
    pub fn table(&self) -> &T {
        &self.table
    }

    /// Width after correction; `None` only for non-printing scalars.
    #[inline]
    pub fn resolve(&self, ch: char) -> Option<usize> {
        let raw = self.table.raw_width(ch);
        if self.correct {
            correct_unprintable(ch, raw)
        } else {
            raw
        }
    }

    /// Columns occupied by `ch`; non-printing scalars take none.
    #[inline]
    pub fn width(&self, ch: char) -> usize {
        self.resolve(ch).unwrap_or(0)
    }
}

impl Default for WidthResolver {
    fn default() -> Self {
        Self::new(WidthPolicy::from_env())
    }
}

/// Process-wide resolver used by the crate-level functions.
#[must_use]
pub fn default_resolver() -> &'static WidthResolver {
    static RESOLVER: OnceLock<WidthResolver> = OnceLock::new();
    RESOLVER.get_or_init(WidthResolver::default)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Mimics a libc whose `wcwidth` rejects emoji.
    struct EmojiBlindTable;

    impl WidthTable for EmojiBlindTable {
        fn raw_width(&self, ch: char) -> Option<usize> {
            if ('\u{1F600}'..='\u{1F64F}').contains(&ch) {
                None
            } else {
                WidthPolicy::Standard.raw_width(ch)
            }
        }
    }

    #[test]
    fn ascii_is_one_column() {
        let resolver = WidthResolver::new(WidthPolicy::Standard);
        for ch in ['a', 'Z', '0', '~', ' '] {
            assert_eq!(resolver.width(ch), 1, "{ch:?}");
        }
    }

    #[test]
    fn katakana_is_two_columns() {
        let resolver = WidthResolver::new(WidthPolicy::Standard);
        for ch in ['エ', 'メ', 'ル', 'カ'] {
            assert_eq!(resolver.width(ch), 2, "{ch:?}");
        }
    }

    #[test]
    fn combining_mark_is_zero_columns() {
        let resolver = WidthResolver::new(WidthPolicy::Standard);
        assert_eq!(resolver.width('\u{0301}'), 0);
        assert_eq!(resolver.resolve('\u{0301}'), Some(0));
    }

    #[test]
    fn marker_introducer_stays_unprintable() {
        let resolver = WidthResolver::new(WidthPolicy::Standard);
        assert_eq!(resolver.resolve('\x19'), None);
        assert_eq!(resolver.width('\x19'), 0);
    }

    #[test]
    fn other_control_chars_are_corrected_to_one() {
        let resolver = WidthResolver::new(WidthPolicy::Standard);
        assert_eq!(resolver.resolve('\x07'), Some(1));
        assert_eq!(resolver.resolve('\t'), Some(1));
    }

    #[test]
    fn correction_seam_is_independent_of_tables() {
        assert_eq!(correct_unprintable('x', None), Some(1));
        assert_eq!(correct_unprintable('x', Some(2)), Some(2));
        assert_eq!(correct_unprintable('x', Some(0)), Some(0));
        assert_eq!(correct_unprintable('\x19', None), None);
    }

    #[test]
    fn buggy_table_is_patched_to_one() {
        let resolver = WidthResolver::new(EmojiBlindTable);
        assert_eq!(resolver.width('\u{1F606}'), 1);
    }

    #[test]
    fn uncorrected_resolver_trusts_its_table() {
        let resolver = WidthResolver::without_correction(EmojiBlindTable);
        assert_eq!(resolver.resolve('\u{1F606}'), None);
        assert_eq!(resolver.width('\u{1F606}'), 0);

        let resolver = WidthResolver::without_correction(WidthPolicy::Standard);
        assert_eq!(resolver.width('\u{1F606}'), 2);
    }

    #[test]
    fn ambiguous_width_follows_policy() {
        assert_eq!(WidthResolver::new(WidthPolicy::Standard).width('°'), 1);
        assert_eq!(
            WidthResolver::new(WidthPolicy::CjkAmbiguousWide).width('°'),
            2
        );
    }

    #[test]
    fn policy_from_env_lookup() {
        let on = width_policy_from_env(|key| (key == CJK_WIDTH_ENV).then(|| "Yes".to_string()));
        assert_eq!(on, WidthPolicy::CjkAmbiguousWide);

        let off = width_policy_from_env(|key| (key == CJK_WIDTH_ENV).then(|| "0".to_string()));
        assert_eq!(off, WidthPolicy::Standard);

        assert_eq!(width_policy_from_env(|_| None), WidthPolicy::Standard);
    }

    #[test]
    fn table_by_reference() {
        let table = WidthPolicy::Standard;
        let resolver = WidthResolver::new(&table);
        assert_eq!(resolver.width('エ'), 2);
    }
}
