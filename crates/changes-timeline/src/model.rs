use chrono::DateTime;
use chrono::Utc;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct User {
    pub login: String,
    /// Profile page.
    pub html_url: String,
}

impl User {
    pub fn new(login: impl Into<String>, html_url: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            html_url: html_url.into(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `#rrggbb`.
    pub fn hex_string(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// 8-bit luma, computed on 16-bit channels with the usual 0.299/0.587/0.114 weights.
    pub fn gray(self) -> u8 {
        let widen = |c: u8| u64::from(c) * 0x101;
        let y = (19595 * widen(self.r) + 38470 * widen(self.g) + 7471 * widen(self.b) + (1 << 15))
            >> 24;
        y as u8
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Label {
    pub name: String,
    pub color: Rgb,
}

impl Label {
    /// Font colour that stays readable on top of the label colour.
    pub fn font_color(&self) -> &'static str {
        if self.color.gray() < 128 { "#fff" } else { "#000" }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Comment {
    pub id: u64,
    pub user: User,
    pub created_at: DateTime<Utc>,
    /// Markdown source.
    pub body: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Event {
    pub id: u64,
    pub actor: User,
    pub created_at: DateTime<Utc>,
    pub kind: EventKind,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EventKind {
    Reopened,
    Closed,
    Merged,
    Renamed { from: String, to: String },
    Labeled(Label),
    Unlabeled(Label),
    CommentDeleted,
    ReviewRequested { reviewer: User },
    ReviewRequestRemoved { reviewer: User },
}

impl EventKind {
    /// Stable name used in CSS classes (`event-<name>`).
    pub fn name(&self) -> &'static str {
        match self {
            Self::Reopened => "reopened",
            Self::Closed => "closed",
            Self::Merged => "merged",
            Self::Renamed { .. } => "renamed",
            Self::Labeled(_) => "labeled",
            Self::Unlabeled(_) => "unlabeled",
            Self::CommentDeleted => "comment-deleted",
            Self::ReviewRequested { .. } => "review-requested",
            Self::ReviewRequestRemoved { .. } => "review-request-removed",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TimelineItem {
    Comment(Comment),
    Event(Event),
}

impl TimelineItem {
    pub fn created_at(&self) -> DateTime<Utc> {
        match self {
            Self::Comment(c) => c.created_at,
            Self::Event(e) => e.created_at,
        }
    }

    pub fn id(&self) -> u64 {
        match self {
            Self::Comment(c) => c.id,
            Self::Event(e) => e.id,
        }
    }

    pub fn template_name(&self) -> &'static str {
        match self {
            Self::Comment(_) => "comment",
            Self::Event(_) => "event",
        }
    }
}

impl From<Comment> for TimelineItem {
    fn from(c: Comment) -> Self {
        Self::Comment(c)
    }
}

impl From<Event> for TimelineItem {
    fn from(e: Event) -> Self {
        Self::Event(e)
    }
}

/// Orders items by creation time; ties fall back to the id.
pub fn sort_timeline(items: &mut [TimelineItem]) {
    items.sort_by_key(|item| (item.created_at(), item.id()));
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChangeState {
    Open,
    Closed,
    Merged,
}

impl ChangeState {
    pub fn text(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::Closed => "Closed",
            Self::Merged => "Merged",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::Open => "#6cc644",
            Self::Closed => "#bd2c00",
            Self::Merged => "#6f42c1",
        }
    }

    pub(crate) fn icon(self) -> &'static str {
        match self {
            Self::Open | Self::Closed => "git-pull-request",
            Self::Merged => "git-merge",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    fn event(id: u64, secs: i64) -> TimelineItem {
        TimelineItem::Event(Event {
            id,
            actor: User::default(),
            created_at: at(secs),
            kind: EventKind::Closed,
        })
    }

    fn comment(id: u64, secs: i64) -> TimelineItem {
        TimelineItem::Comment(Comment {
            id,
            user: User::default(),
            created_at: at(secs),
            body: String::new(),
        })
    }

    #[test]
    fn sorts_by_time_then_id() {
        let mut items = vec![event(3, 20), comment(2, 10), event(1, 10), comment(0, 30)];
        sort_timeline(&mut items);
        let order: Vec<u64> = items.iter().map(TimelineItem::id).collect();
        assert_eq!(order, vec![1, 2, 3, 0]);
        assert_eq!(items[0].template_name(), "event");
        assert_eq!(items[1].template_name(), "comment");
    }

    #[test]
    fn gray_matches_luma_weights() {
        assert_eq!(Rgb::new(0, 0, 0).gray(), 0);
        assert_eq!(Rgb::new(255, 255, 255).gray(), 255);
        assert_eq!(Rgb::new(255, 0, 0).gray(), 76);
        assert_eq!(Rgb::new(0, 255, 0).gray(), 150);
    }

    #[test]
    fn label_font_color_follows_gray() {
        let label = |color| Label {
            name: "bug".to_string(),
            color,
        };
        assert_eq!(label(Rgb::new(255, 0, 0)).font_color(), "#fff");
        assert_eq!(label(Rgb::new(0, 255, 0)).font_color(), "#000");
        assert_eq!(label(Rgb::new(0xee, 0x0, 0x70)).color.hex_string(), "#ee0070");
    }
}
