//! Timeline model for a change: comments and events, ordered by creation time.
//!
//! The model is closed: [`TimelineItem`] is either a [`Comment`] or an [`Event`], and every
//! accessor is an exhaustive match. [`html`] renders items to escaped HTML fragments.
pub mod html;
pub mod markdown;
pub mod model;
pub mod time;

pub use html::TimelineRenderOptions;
pub use html::comment_fragment;
pub use html::render_change_header;
pub use html::render_comment;
pub use html::render_event;
pub use html::render_item;
pub use html::render_state_badge;
pub use model::ChangeState;
pub use model::Comment;
pub use model::Event;
pub use model::EventKind;
pub use model::Label;
pub use model::Rgb;
pub use model::TimelineItem;
pub use model::User;
pub use model::sort_timeline;
pub use time::Timestamp;
