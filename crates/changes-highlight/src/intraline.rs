use std::ops::Range;

use similar::Algorithm;
use similar::DiffTag;
use similar::TextDiff;

use crate::error::HighlightError;
use crate::error::check_range;
use crate::scan::Line;

/// One side of a replace block flattened for character-level diffing.
///
/// Each line contributes its body (marker and newline stripped) followed by `\n`. The segment
/// table maps offsets in the flattened content back to offsets in the hunk text.
#[derive(Clone, Debug, Default)]
pub struct BlockContent {
    content: String,
    segments: Vec<Segment>,
}

#[derive(Clone, Copy, Debug)]
struct Segment {
    local: usize,
    origin: usize,
    len: usize,
}

impl BlockContent {
    pub fn collect(text: &str, lines: &[Line]) -> Result<Self, HighlightError> {
        let mut content = String::new();
        let mut segments = Vec::with_capacity(lines.len());
        for line in lines {
            let body = line.body();
            check_range(text, body.clone())?;
            segments.push(Segment {
                local: content.len(),
                origin: body.start,
                len: body.len(),
            });
            content.push_str(&text[body]);
            content.push('\n');
        }
        Ok(Self { content, segments })
    }

    pub fn as_str(&self) -> &str {
        &self.content
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Maps a range of the flattened content onto the hunk text.
    ///
    /// The result is split per line and never covers a marker or a newline. Every produced
    /// offset is checked to be a character boundary of `text`.
    pub fn translate(
        &self,
        local: Range<usize>,
        text: &str,
    ) -> Result<Vec<Range<usize>>, HighlightError> {
        let mut out = Vec::new();
        for seg in &self.segments {
            let seg_end = seg.local + seg.len;
            if seg_end <= local.start {
                continue;
            }
            if seg.local >= local.end {
                break;
            }
            let start = local.start.max(seg.local);
            let end = local.end.min(seg_end);
            if start >= end {
                continue;
            }
            let range = seg.origin + (start - seg.local)..seg.origin + (end - seg.local);
            check_range(text, range.clone())?;
            out.push(range);
        }
        Ok(out)
    }
}

/// Changed ranges of a character-level diff, in the local offsets of each side.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IntralineSpans {
    pub left: Vec<Range<usize>>,
    pub right: Vec<Range<usize>>,
}

impl IntralineSpans {
    pub fn is_empty(&self) -> bool {
        self.left.is_empty() && self.right.is_empty()
    }
}

/// Diffs `left` against `right` char by char and returns the byte ranges that differ.
///
/// Adjacent or touching ranges on the same side are merged.
pub fn diff_contents(left: &str, right: &str, algorithm: Algorithm) -> IntralineSpans {
    let diff = TextDiff::configure()
        .algorithm(algorithm)
        .diff_chars(left, right);
    let left_map = char_start_indices(left);
    let right_map = char_start_indices(right);

    let mut spans = IntralineSpans::default();
    for op in diff.ops() {
        if op.tag() == DiffTag::Equal {
            continue;
        }
        push_range(&mut spans.left, &left_map, op.old_range());
        push_range(&mut spans.right, &right_map, op.new_range());
    }
    spans
}

fn char_start_indices(s: &str) -> Vec<usize> {
    let mut out: Vec<usize> = Vec::with_capacity(s.len() + 1);
    for (idx, _) in s.char_indices() {
        out.push(idx);
    }
    out.push(s.len());
    out
}

fn push_range(out: &mut Vec<Range<usize>>, char_starts: &[usize], range: Range<usize>) {
    let last = char_starts.len().saturating_sub(1);
    let start_b = char_starts[range.start.min(last)];
    let end_b = char_starts[range.end.min(last)];
    if start_b >= end_b {
        return;
    }
    if let Some(prev) = out.last_mut()
        && start_b <= prev.end
    {
        prev.end = prev.end.max(end_b);
        return;
    }
    out.push(start_b..end_b);
}
