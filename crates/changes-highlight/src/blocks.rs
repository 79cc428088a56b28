use std::ops::Range;

use crate::scan::Line;
use crate::scan::Marker;

/// A run of deleted lines directly followed by a run of inserted lines.
///
/// Both ranges are line indices. Either may be empty (pure deletion or pure insertion), in which
/// case it is anchored where the other run ends or starts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplaceBlock {
    pub deletes: Range<usize>,
    pub inserts: Range<usize>,
    /// The line that ended the block is a hunk header. Such blocks keep their backgrounds but
    /// are not diffed intraline.
    pub closed_by_header: bool,
}

impl ReplaceBlock {
    /// Whether both sides are non-empty.
    pub fn is_replacement(&self) -> bool {
        !self.deletes.is_empty() && !self.inserts.is_empty()
    }

    /// Whether the block gets a character-level diff: both sides present and not cut off by a
    /// hunk header.
    pub fn wants_intraline(&self) -> bool {
        self.is_replacement() && !self.closed_by_header
    }

    /// All line indices covered by the block.
    pub fn lines(&self) -> Range<usize> {
        self.deletes.start..self.inserts.end
    }

    /// Byte range of the delete run, newlines included.
    pub fn delete_span(&self, lines: &[Line]) -> Range<usize> {
        byte_span(lines, self.deletes.clone())
    }

    /// Byte range of the insert run, newlines included.
    pub fn insert_span(&self, lines: &[Line]) -> Range<usize> {
        byte_span(lines, self.inserts.clone())
    }
}

fn byte_span(lines: &[Line], range: Range<usize>) -> Range<usize> {
    if range.is_empty() {
        let at = lines
            .get(range.start)
            .map(|l| l.start)
            .or_else(|| lines.last().map(|l| l.end))
            .unwrap_or(0);
        return at..at;
    }
    match (lines.get(range.start), lines.get(range.end - 1)) {
        (Some(first), Some(last)) => first.start..last.end,
        _ => 0..0,
    }
}

/// Groups the changed lines of a hunk into replace blocks in a single left-to-right pass.
///
/// A delete line arriving while an insert run is open starts a new block, so deletes always
/// precede inserts within a block. Context and metadata lines close any open block; `text` is
/// only consulted to tell hunk headers apart from other metadata.
pub fn detect_blocks(text: &str, lines: &[Line]) -> Vec<ReplaceBlock> {
    let mut blocks = Vec::new();
    let mut cursor = BlockCursor::default();
    for line in lines {
        match line.marker {
            Marker::Delete => {
                if cursor.insert_start.is_some() {
                    cursor.close_at(line.index, false, &mut blocks);
                }
                cursor.delete_start.get_or_insert(line.index);
            }
            Marker::Insert => {
                cursor.insert_start.get_or_insert(line.index);
            }
            Marker::Context | Marker::Other => {
                cursor.close_at(line.index, line.is_header(text), &mut blocks)
            }
        }
    }
    cursor.close_at(lines.len(), false, &mut blocks);
    blocks
}

#[derive(Default)]
struct BlockCursor {
    delete_start: Option<usize>,
    insert_start: Option<usize>,
}

impl BlockCursor {
    fn close_at(&mut self, end: usize, by_header: bool, blocks: &mut Vec<ReplaceBlock>) {
        let (deletes, inserts) = match (self.delete_start.take(), self.insert_start.take()) {
            (None, None) => return,
            (Some(d), None) => (d..end, end..end),
            (None, Some(i)) => (i..i, i..end),
            (Some(d), Some(i)) => (d..i, i..end),
        };
        blocks.push(ReplaceBlock {
            deletes,
            inserts,
            closed_by_header: by_header,
        });
    }
}
