//! HTML fragments for timeline items. All user-provided text is escaped.
use chrono::DateTime;
use chrono::Utc;
use html_escape::encode_double_quoted_attribute as attr;
use html_escape::encode_text as text;

use crate::markdown::render_markdown;
use crate::model::ChangeState;
use crate::model::Comment;
use crate::model::Event;
use crate::model::EventKind;
use crate::model::Label;
use crate::model::TimelineItem;
use crate::model::User;
use crate::time::absolute_time;
use crate::time::relative_time;

const NEUTRAL_ICON: (&str, &str) = ("#767676", "#f3f3f3");

#[derive(Clone, Debug)]
pub struct TimelineRenderOptions {
    /// Reference point for relative times.
    pub now: DateTime<Utc>,
    /// Whether user names link to their profile pages.
    pub link_users: bool,
}

impl Default for TimelineRenderOptions {
    fn default() -> Self {
        Self {
            now: Utc::now(),
            link_users: true,
        }
    }
}

/// Element id of a comment, also used as its URL fragment.
pub fn comment_fragment(id: u64) -> String {
    format!("comment-{id}")
}

pub fn render_item(item: &TimelineItem, opts: &TimelineRenderOptions) -> String {
    match item {
        TimelineItem::Comment(c) => render_comment(c, None, opts),
        TimelineItem::Event(e) => render_event(e, opts),
    }
}

/// A comment with its Markdown body. `permalink` wraps the timestamp in a link.
pub fn render_comment(
    comment: &Comment,
    permalink: Option<&str>,
    opts: &TimelineRenderOptions,
) -> String {
    let mut out = format!(
        r#"<div class="list-entry comment" id="{}"><div class="comment-header">"#,
        comment_fragment(comment.id)
    );
    push_user(&mut out, &comment.user, opts);
    out.push_str(" commented ");
    match permalink {
        Some(href) => {
            out.push_str(&format!(r#"<a class="gray" href="{}">"#, attr(href)));
            push_time(&mut out, comment.created_at, opts);
            out.push_str("</a>");
        }
        None => push_time(&mut out, comment.created_at, opts),
    }
    out.push_str(r#"</div><div class="markdown-body">"#);
    out.push_str(&render_markdown(&comment.body));
    out.push_str("</div></div>");
    out
}

pub fn render_event(event: &Event, opts: &TimelineRenderOptions) -> String {
    let (icon, (color, background)) = event_icon(&event.kind);
    let mut out = format!(
        r#"<div class="list-entry event event-{}"><span class="event-icon octicon octicon-{icon}" style="color: {color}; background-color: {background};"></span><div class="event-header">"#,
        event.kind.name()
    );
    push_user(&mut out, &event.actor, opts);
    out.push(' ');
    push_event_text(&mut out, &event.kind, opts);
    out.push(' ');
    push_time(&mut out, event.created_at, opts);
    out.push_str("</div></div>");
    out
}

/// State badge alone: icon and state name on the state colour.
pub fn render_state_badge(state: ChangeState) -> String {
    format!(
        r#"<span class="change-badge" style="display: inline-block; padding: 4px 6px 4px 6px; margin: 4px; color: #fff; background-color: {};"><span class="octicon octicon-{}" style="margin-right: 6px;"></span>{}</span>"#,
        state.color(),
        state.icon(),
        state.text()
    )
}

/// Badge followed by who opened the change and when.
pub fn render_change_header(
    state: ChangeState,
    author: &User,
    opened_at: DateTime<Utc>,
    opts: &TimelineRenderOptions,
) -> String {
    let mut out = render_state_badge(state);
    out.push_str(r#"<span style="margin-left: 4px;">"#);
    push_user(&mut out, author, opts);
    out.push_str(" opened this change ");
    push_time(&mut out, opened_at, opts);
    out.push_str("</span>");
    out
}

fn event_icon(kind: &EventKind) -> (&'static str, (&'static str, &'static str)) {
    match kind {
        EventKind::Reopened => ("primitive-dot", ("#fff", "#6cc644")),
        EventKind::Closed => ("circle-slash", ("#fff", "#bd2c00")),
        EventKind::Merged => ("git-merge", ("#fff", "#6f42c1")),
        EventKind::Renamed { .. } => ("pencil", NEUTRAL_ICON),
        EventKind::Labeled(_) | EventKind::Unlabeled(_) => ("tag", NEUTRAL_ICON),
        EventKind::CommentDeleted | EventKind::ReviewRequestRemoved { .. } => ("x", NEUTRAL_ICON),
        EventKind::ReviewRequested { .. } => ("eye", NEUTRAL_ICON),
    }
}

fn push_event_text(out: &mut String, kind: &EventKind, opts: &TimelineRenderOptions) {
    match kind {
        EventKind::Reopened | EventKind::Closed | EventKind::Merged => {
            out.push_str(&format!("{} this", kind.name()));
        }
        EventKind::Renamed { from, to } => {
            out.push_str(&format!(
                "changed the title from <strong>{}</strong> to <strong>{}</strong>",
                text(from),
                text(to)
            ));
        }
        EventKind::Labeled(label) => {
            out.push_str("added the ");
            push_label(out, label);
            out.push_str(" label");
        }
        EventKind::Unlabeled(label) => {
            out.push_str("removed the ");
            push_label(out, label);
            out.push_str(" label");
        }
        EventKind::CommentDeleted => out.push_str("deleted a comment"),
        EventKind::ReviewRequested { reviewer } => {
            out.push_str("requested a review from ");
            push_user(out, reviewer, opts);
        }
        EventKind::ReviewRequestRemoved { reviewer } => {
            out.push_str("removed the review request from ");
            push_user(out, reviewer, opts);
        }
    }
}

fn push_label(out: &mut String, label: &Label) {
    out.push_str(&format!(
        r#"<span class="label" style="display: inline-block; font-size: 12px; line-height: 1.2; padding: 0px 3px 0px 3px; border-radius: 2px; color: {}; background-color: {};">{}</span>"#,
        label.font_color(),
        label.color.hex_string(),
        text(&label.name)
    ));
}

fn push_user(out: &mut String, user: &User, opts: &TimelineRenderOptions) {
    if opts.link_users {
        out.push_str(&format!(
            r#"<a class="black" href="{}"><strong>{}</strong></a>"#,
            attr(&user.html_url),
            text(&user.login)
        ));
    } else {
        out.push_str(&format!("<strong>{}</strong>", text(&user.login)));
    }
}

fn push_time(out: &mut String, t: DateTime<Utc>, opts: &TimelineRenderOptions) {
    out.push_str(&format!(
        r#"<abbr title="{}">{}</abbr>"#,
        absolute_time(t),
        relative_time(t, opts.now)
    ));
}
