use similar::Algorithm;

use crate::scan::Line;
use crate::scan::Marker;

/// CSS classes attached to the generated `<span>` elements.
///
/// Defaults follow the Pygments/GitHub naming used by most diff stylesheets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiffClasses {
    /// A single deleted line (marker included).
    pub deleted_line: String,
    /// A single inserted line (marker included).
    pub inserted_line: String,
    /// A `@@ ... @@` hunk header line.
    pub header_line: String,
    /// The background of a whole run of deleted lines, newlines included.
    pub delete_block: String,
    /// The background of a whole run of inserted lines, newlines included.
    pub insert_block: String,
    /// Characters that differ between the two sides of a replace block.
    pub intraline: String,
}

impl Default for DiffClasses {
    fn default() -> Self {
        Self {
            deleted_line: "gd".to_string(),
            inserted_line: "gi".to_string(),
            header_line: "gu".to_string(),
            delete_block: "gd input-block".to_string(),
            insert_block: "gi input-block".to_string(),
            intraline: "x".to_string(),
        }
    }
}

impl DiffClasses {
    /// The per-line class for `line`, if it gets one.
    pub fn line_class(&self, line: &Line, text: &str) -> Option<&str> {
        match line.marker {
            Marker::Delete => Some(self.deleted_line.as_str()),
            Marker::Insert => Some(self.inserted_line.as_str()),
            Marker::Other if line.is_header(text) => Some(self.header_line.as_str()),
            Marker::Other | Marker::Context => None,
        }
    }
}

/// Options for [`crate::highlight_with`].
#[derive(Clone, Debug)]
pub struct HighlightOptions {
    pub classes: DiffClasses,
    /// Wrap every changed line and hunk header in its own span, inside the block background.
    pub line_classes: bool,
    /// Compute character-level differences for blocks that have both deletes and inserts.
    pub intraline: bool,
    /// Sequence alignment used for the intraline diff.
    pub algorithm: Algorithm,
    /// Skip the intraline diff when a block's flattened content (both sides) exceeds this many
    /// bytes. Backgrounds are still emitted.
    pub max_intraline_bytes: Option<usize>,
}

impl Default for HighlightOptions {
    fn default() -> Self {
        Self {
            classes: DiffClasses::default(),
            line_classes: true,
            intraline: true,
            algorithm: Algorithm::Myers,
            max_intraline_bytes: Some(64 * 1024),
        }
    }
}

impl HighlightOptions {
    /// Backgrounds and intraline spans only, no per-line spans.
    pub fn blocks_only() -> Self {
        Self {
            line_classes: false,
            ..Self::default()
        }
    }
}
