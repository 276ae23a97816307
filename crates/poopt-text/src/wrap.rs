#![forbid(unsafe_code)]

//! Greedy line wrapping into logical-position spans.
//!
//! [`cut_text`] splits a message into lines no wider than a column budget and
//! returns where each line starts and ends, counted in the host string's
//! coordinates (scalar values, plus every byte of a format marker). It never
//! copies the text; the host slices its own string with the spans.
//!
//! Break policy:
//! - an explicit `\n` always ends the line, and belongs to it;
//! - a character that overflows the line breaks it at the last space seen,
//!   which is dropped, and the partial word after it moves to the next line;
//! - with no space on the line, the break falls right before the overflowing
//!   character, which starts the next line even when it is a space.
//!
//! # Example
//! ```
//! use poopt_text::{WidthPolicy, WidthResolver, cut_text_with};
//!
//! let resolver = WidthResolver::new(WidthPolicy::Standard);
//! let spans = cut_text_with(&resolver, "vivent les réfrigérateurs", 6).unwrap();
//! assert_eq!(spans, [(0, 6), (6, 10), (11, 17), (17, 23), (23, 25)]);
//! ```

use crate::error::Result;
use crate::scan::{UnitKind, Units};
use crate::width::{WidthResolver, WidthTable, default_resolver};

/// Buffers at least this long get a tracing span.
pub(crate) const LARGE_TEXT: usize = 10_000;

/// One wrapped line: a half-open range of logical positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LineSpan {
    pub start: usize,
    pub end: usize,
}

impl LineSpan {
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Logical positions covered.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    #[must_use]
    pub const fn range(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }
}

impl PartialEq<(usize, usize)> for LineSpan {
    fn eq(&self, other: &(usize, usize)) -> bool {
        self.start == other.0 && self.end == other.1
    }
}

impl From<LineSpan> for (usize, usize) {
    fn from(span: LineSpan) -> Self {
        (span.start, span.end)
    }
}

impl From<(usize, usize)> for LineSpan {
    fn from((start, end): (usize, usize)) -> Self {
        Self { start, end }
    }
}

/// Split `text` into lines of at most `width` columns.
///
/// Uses the process-wide [`default_resolver`].
///
/// # Errors
///
/// Fails on the first undecodable byte sequence; no spans are returned.
pub fn cut_text<T>(text: &T, width: usize) -> Result<Vec<LineSpan>>
where
    T: AsRef<[u8]> + ?Sized,
{
    cut_text_with(default_resolver(), text, width)
}

/// [`cut_text`] with an explicit width resolver.
///
/// # Errors
///
/// Fails on the first undecodable byte sequence; no spans are returned.
pub fn cut_text_with<W, T>(
    resolver: &WidthResolver<W>,
    text: &T,
    width: usize,
) -> Result<Vec<LineSpan>>
where
    W: WidthTable,
    T: AsRef<[u8]> + ?Sized,
{
    let bytes = text.as_ref();
    let _span = (bytes.len() >= LARGE_TEXT)
        .then(|| tracing::debug_span!("cut_text", len = bytes.len(), width).entered());

    let mut wrapper = LineWrapper::new(width);
    for unit in Units::new(bytes) {
        let unit = unit?;
        match unit.kind {
            UnitKind::Marker { .. } => wrapper.skip(unit.logical_len()),
            UnitKind::Scalar(ch) => wrapper.push(ch, resolver.width(ch)),
        }
    }
    Ok(wrapper.finish())
}

/// Wrapping state for one scan.
#[derive(Debug)]
struct LineWrapper {
    width: usize,
    spans: Vec<LineSpan>,
    /// Current logical position.
    spos: usize,
    /// Start of the line being filled.
    start_pos: usize,
    /// Most recent space on the current line.
    last_space: Option<usize>,
    /// Columns taken before `last_space`.
    cols_until_space: usize,
    /// Columns taken on the current line.
    columns: usize,
}

impl LineWrapper {
    fn new(width: usize) -> Self {
        Self {
            width,
            spans: Vec::new(),
            spos: 0,
            start_pos: 0,
            last_space: None,
            cols_until_space: 0,
            columns: 0,
        }
    }

    /// Step over marker bytes: positions advance, columns do not.
    #[inline]
    fn skip(&mut self, positions: usize) {
        self.spos += positions;
    }

    #[inline]
    fn emit(&mut self, start: usize, end: usize) {
        self.spans.push(LineSpan::new(start, end));
    }

    #[inline]
    fn overflows(&self, cols: usize) -> bool {
        cols > 0 && self.columns + cols > self.width
    }

    fn push(&mut self, ch: char, cols: usize) {
        if ch == '\n' {
            self.spos += 1;
            self.emit(self.start_pos, self.spos);
            self.start_pos = self.spos;
            self.last_space = None;
            self.columns = 0;
            return;
        }

        if self.overflows(cols) {
            if let Some(space) = self.last_space.take() {
                self.emit(self.start_pos, space);
                self.start_pos = space + 1;
                // Keep the columns of the partial word that follows the space.
                self.columns = self.columns.saturating_sub(self.cols_until_space + 1);
            }

            if self.overflows(cols) {
                if self.spos > self.start_pos {
                    self.emit(self.start_pos, self.spos);
                }
                self.start_pos = self.spos;
                self.columns = 0;
            }
        }

        if ch == ' ' {
            self.last_space = Some(self.spos);
            self.cols_until_space = self.columns;
        }
        self.columns += cols;
        self.spos += 1;
    }

    fn finish(mut self) -> Vec<LineSpan> {
        self.emit(self.start_pos, self.spos);
        self.spans
    }
}
