use std::ops::Range;

use thiserror::Error;

/// Failure to highlight a single hunk.
///
/// The engine never returns partially spliced output: any of these aborts the whole hunk and
/// the caller decides how to present it.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum HighlightError {
    /// An annotation reaches past the end of the text.
    #[error("annotation {start}..{end} lies outside text of {len} bytes")]
    OutOfBounds { start: usize, end: usize, len: usize },

    /// An annotation ends before it starts.
    #[error("annotation {start}..{end} ends before it starts")]
    InvertedRange { start: usize, end: usize },

    /// An offset falls inside a multi-byte character.
    #[error("offset {offset} splits a multi-byte character")]
    SplitsCharacter { offset: usize },

    /// Two annotations intersect without one containing the other.
    #[error("annotations {outer:?} and {inner:?} overlap without nesting")]
    Overlap {
        outer: Range<usize>,
        inner: Range<usize>,
    },

    /// The annotation sequence is not in nesting order.
    #[error("annotation {next:?} is ordered after {previous:?}")]
    Unordered {
        previous: Range<usize>,
        next: Range<usize>,
    },

    /// An annotation was still open once the whole text had been emitted.
    #[error("annotation {range:?} is still open at the end of the text")]
    Unclosed { range: Range<usize> },
}

impl HighlightError {
    /// Offsets that fall outside the text or inside a character.
    pub fn is_boundary(&self) -> bool {
        matches!(
            self,
            Self::OutOfBounds { .. } | Self::InvertedRange { .. } | Self::SplitsCharacter { .. }
        )
    }

    /// Annotation sets that cannot be spliced into well-formed markup.
    pub fn is_invariant(&self) -> bool {
        !self.is_boundary()
    }
}

/// Checks that `range` is a non-inverted, in-bounds range whose ends are character boundaries.
pub(crate) fn check_range(text: &str, range: Range<usize>) -> Result<(), HighlightError> {
    if range.start > range.end {
        return Err(HighlightError::InvertedRange {
            start: range.start,
            end: range.end,
        });
    }
    if range.end > text.len() {
        return Err(HighlightError::OutOfBounds {
            start: range.start,
            end: range.end,
            len: text.len(),
        });
    }
    for offset in [range.start, range.end] {
        if !text.is_char_boundary(offset) {
            return Err(HighlightError::SplitsCharacter { offset });
        }
    }
    Ok(())
}
