//! `changes-highlight` turns the printed text of a unified-diff hunk into highlighted HTML.
//!
//! The pipeline is pure and synchronous; every call owns its intermediate data, so hunks can be
//! highlighted concurrently by independent callers.
//!
//! ## Stages
//!
//! - [`scan::scan_lines`]: classify lines by marker and record their byte spans.
//! - [`blocks::detect_blocks`]: group delete runs with the insert runs that follow them.
//! - [`intraline::diff_contents`]: character-level diff of a block's two sides.
//! - [`annotate::sort_annotations`] then [`annotate::validate_annotations`]: order the
//!   annotations for nesting, then reject anything that would produce malformed markup.
//! - [`splice::splice`]: emit escaped text interleaved with the annotation markup.
//!
//! Most callers only need [`highlight`] or [`highlight_with`]. An error means the hunk must not
//! be rendered from this output; nothing partial is ever returned.
pub mod annotate;
pub mod blocks;
pub mod error;
pub mod intraline;
pub mod options;
pub mod scan;
pub mod splice;

mod highlight;

pub use error::HighlightError;
pub use highlight::annotate_hunk;
pub use highlight::highlight;
pub use highlight::highlight_with;
pub use options::DiffClasses;
pub use options::HighlightOptions;
pub use similar::Algorithm;
