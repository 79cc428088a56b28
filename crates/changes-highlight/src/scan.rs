use std::ops::Range;

/// Classification of a hunk line by its leading byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Marker {
    Context,
    Delete,
    Insert,
    /// Diff metadata: hunk headers (`@@ ... @@`) and `\ No newline at end of file`.
    Other,
}

impl Marker {
    /// Classifies a line (without its trailing newline). Unknown leading bytes are context.
    pub fn classify(line: &str) -> Self {
        match line.as_bytes().first().copied() {
            Some(b'-') => Self::Delete,
            Some(b'+') => Self::Insert,
            Some(b'@' | b'\\') => Self::Other,
            _ => Self::Context,
        }
    }

    pub fn is_change(self) -> bool {
        matches!(self, Self::Delete | Self::Insert)
    }
}

/// One line of a hunk, addressed by byte offsets into the whole hunk text.
///
/// `start..end` includes the trailing newline, so consecutive lines share boundaries and the
/// lines of a text partition it exactly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Line {
    pub index: usize,
    pub start: usize,
    pub end: usize,
    pub marker: Marker,
    pub has_newline: bool,
}

impl Line {
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// The line without its trailing newline.
    pub fn content(&self) -> Range<usize> {
        self.start..self.content_end()
    }

    /// The line without its marker byte or trailing newline.
    ///
    /// Only meaningful for lines whose marker is a single ASCII byte (`-`, `+`, `@`, `\`).
    pub fn body(&self) -> Range<usize> {
        let end = self.content_end();
        (self.start + 1).min(end)..end
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether this is a hunk header (`@@ ... @@`) line of `text`.
    pub fn is_header(&self, text: &str) -> bool {
        self.marker == Marker::Other
            && text
                .get(self.range())
                .is_some_and(|s| s.starts_with('@'))
    }

    fn content_end(&self) -> usize {
        if self.has_newline {
            self.end - 1
        } else {
            self.end
        }
    }
}

/// Splits `text` on `\n` and classifies every line.
///
/// Total over any input: the empty text yields a single empty context line, and a trailing
/// newline yields a final empty context line.
pub fn scan_lines(text: &str) -> Vec<Line> {
    let mut lines = Vec::with_capacity(text.len() / 32 + 1);
    let mut start = 0usize;
    for (index, raw) in text.split('\n').enumerate() {
        let content_end = start + raw.len();
        let has_newline = content_end < text.len();
        let end = if has_newline {
            content_end + 1
        } else {
            content_end
        };
        lines.push(Line {
            index,
            start,
            end,
            marker: Marker::classify(raw),
            has_newline,
        });
        start = end;
    }
    lines
}
