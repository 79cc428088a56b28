use changes_timeline::TimelineItem;
use changes_timeline::TimelineRenderOptions;
use changes_timeline::Timestamp;
use changes_timeline::render_comment;
use changes_timeline::render_event;
use changes_timeline::sort_timeline;
use chrono::Utc;
use tracing::debug;

use crate::RenderContext;
use crate::RenderError;

/// Renders a change's timeline, oldest first, with relative times measured from now.
pub fn render_timeline(
    ctx: &RenderContext,
    items: impl IntoIterator<Item = TimelineItem>,
) -> Result<String, RenderError> {
    render_timeline_at(ctx, items, Utc::now())
}

/// Like [`render_timeline`], with relative times measured from `now`.
pub fn render_timeline_at(
    ctx: &RenderContext,
    items: impl IntoIterator<Item = TimelineItem>,
    now: Timestamp,
) -> Result<String, RenderError> {
    let mut items: Vec<TimelineItem> = items.into_iter().collect();
    sort_timeline(&mut items);
    let opts = TimelineRenderOptions {
        now,
        link_users: !ctx.disable_users,
    };

    let mut out = format!(
        r#"<div class="timeline" data-repo="{}">"#,
        html_escape::encode_double_quoted_attribute(&ctx.repo_spec)
    );
    for item in &items {
        match item {
            TimelineItem::Comment(comment) => {
                let permalink = ctx
                    .change_id
                    .map(|_| ctx.comment_anchor(comment.id))
                    .transpose()?;
                let permalink = permalink.as_ref().map(|url| url.as_str());
                out.push_str(&render_comment(comment, permalink, &opts));
            }
            TimelineItem::Event(event) => out.push_str(&render_event(event, &opts)),
        }
    }
    out.push_str("</div>");
    debug!(items = items.len(), change = ?ctx.change_id, "rendered timeline");
    Ok(out)
}
