#![forbid(unsafe_code)]

//! Column-aware text measurement and line wrapping for a terminal chat client.
//!
//! # Role
//! Message text arrives as UTF-8 bytes that may carry in-band format markers
//! (`0x19` ... terminator). Before anything is drawn, the client needs to know
//! where each line ends, how many columns a nickname takes, and how much of a
//! string fits in a fixed-width column. This crate answers those three
//! questions without touching the terminal.
//!
//! # Primary operations
//! - [`cut_text`]: split text into [`LineSpan`]s no wider than a column budget.
//! - [`wcswidth`]: total display width, like POSIX `wcswidth(3)`.
//! - [`cut_by_columns`]: longest prefix fitting in a column budget.
//!
//! Positions in [`LineSpan`] are logical: one per scalar value and one per
//! marker byte, which is how the host indexes its own strings.
//!
//! # Building blocks
//! - [`decode`]: UTF-8 scalar decoding with invalid/incomplete errors.
//! - [`width`]: per-scalar width with the unprintable-sentinel correction.
//! - [`marker`]: format-marker boundaries.
//! - [`scan`]: scalars and markers in one pass, with both counters.
//! - [`markup`]: typed directives parsed from markers.
//! - [`host`]: checked entry points for signed host integers, and slicing.
//!
//! # Example
//! ```
//! use poopt_text::{cut_by_columns, cut_text, wcswidth};
//!
//! assert_eq!(wcswidth("エメルカ").unwrap(), 8);
//! assert_eq!(cut_by_columns(5, "エメルカ").unwrap(), "エメ".as_bytes());
//! assert_eq!(cut_text("a\nb", 10).unwrap(), [(0, 2), (2, 3)]);
//! ```

pub mod decode;
pub mod error;
pub mod host;
pub mod marker;
pub mod markup;
pub mod measure;
pub mod scan;
pub mod truncate;
pub mod width;
pub mod wrap;

pub use error::{DecodeError, Error, Result};
pub use measure::{wcswidth, wcswidth_with};
pub use truncate::{cut_by_columns, cut_by_columns_with};
pub use width::{WidthPolicy, WidthResolver, WidthTable, correct_unprintable};
pub use wrap::{LineSpan, cut_text, cut_text_with};
