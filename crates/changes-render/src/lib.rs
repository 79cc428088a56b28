//! HTML rendering for code-review changes.
//!
//! - [`render_file_diff`] / [`render_diff`]: parse unified diffs and highlight each hunk with
//!   `changes-highlight` (block backgrounds plus intraline differences).
//! - [`render_timeline`] (feature `timeline`, on by default): comments and events of a change.
//!
//! All rendering goes through a request-scoped [`RenderContext`].
pub mod context;
pub mod error;
pub mod file_diff;

#[cfg(feature = "timeline")]
pub mod timeline;

pub use changes_diff as diff;
pub use changes_highlight as highlight;
#[cfg(feature = "timeline")]
pub use changes_timeline as timeline_model;

pub use context::RenderContext;
pub use error::RenderError;
pub use file_diff::RenderedFileDiff;
pub use file_diff::render_diff;
pub use file_diff::render_file_diff;
#[cfg(feature = "timeline")]
pub use timeline::render_timeline;
#[cfg(feature = "timeline")]
pub use timeline::render_timeline_at;
