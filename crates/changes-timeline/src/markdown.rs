//! Comment bodies: Markdown to HTML with raw HTML shown as text.
//!
//! Links and images whose destination is not an absolute `http`, `https` or `mailto` URL lose
//! their wrapper; their text (or alt text) is kept.
use pulldown_cmark::Event;
use pulldown_cmark::LinkType;
use pulldown_cmark::Options;
use pulldown_cmark::Parser;
use pulldown_cmark::Tag;
use pulldown_cmark::TagEnd;
use url::Url;

const SAFE_SCHEMES: &[&str] = &["http", "https", "mailto"];

pub fn render_markdown(input: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let mut in_dropped_link = false;
    let mut in_dropped_image = false;
    let parser = Parser::new_ext(input, options).filter_map(move |event| match event {
        Event::Html(html) | Event::InlineHtml(html) => Some(Event::Text(html)),
        Event::Start(Tag::Link {
            link_type,
            ref dest_url,
            ..
        }) if !is_safe_destination(link_type, dest_url) => {
            in_dropped_link = true;
            None
        }
        Event::End(TagEnd::Link) if in_dropped_link => {
            in_dropped_link = false;
            None
        }
        Event::Start(Tag::Image {
            link_type,
            ref dest_url,
            ..
        }) if !is_safe_destination(link_type, dest_url) => {
            in_dropped_image = true;
            None
        }
        Event::End(TagEnd::Image) if in_dropped_image => {
            in_dropped_image = false;
            None
        }
        other => Some(other),
    });

    let mut out = String::with_capacity(input.len() * 3 / 2);
    pulldown_cmark::html::push_html(&mut out, parser);
    out
}

fn is_safe_destination(link_type: LinkType, dest: &str) -> bool {
    // Email autolinks carry a bare address; the renderer prefixes `mailto:`.
    link_type == LinkType::Email
        || Url::parse(dest).is_ok_and(|url| SAFE_SCHEMES.contains(&url.scheme()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_basic_markdown() {
        assert_eq!(
            render_markdown("hello *world*"),
            "<p>hello <em>world</em></p>\n"
        );
        assert_eq!(render_markdown("~~gone~~"), "<p><del>gone</del></p>\n");
    }

    #[test]
    fn escapes_raw_html() {
        let out = render_markdown("hi <b>x</b>");
        assert_eq!(out, "<p>hi &lt;b&gt;x&lt;/b&gt;</p>\n");
        let out = render_markdown("<script>alert(1)</script>\n");
        assert!(!out.contains("<script>"));
        assert!(out.contains("&lt;script&gt;"));
    }

    #[test]
    fn script_links_keep_only_their_text() {
        let out = render_markdown("[click](javascript:alert(document.cookie))");
        assert_eq!(out, "<p>click</p>\n");
        let out = render_markdown("<javascript:alert(1)> and [x](JavaScript:void(0))");
        assert!(!out.contains("href"));
        assert!(!out.contains("<a "));
    }

    #[test]
    fn unsafe_images_keep_only_their_alt_text() {
        assert_eq!(render_markdown("![pic](javascript:alert(1))"), "<p>pic</p>\n");
        assert_eq!(render_markdown("![pic](data:image/png;base64,AAAA)"), "<p>pic</p>\n");
    }

    #[test]
    fn relative_links_are_dropped() {
        assert_eq!(render_markdown("[rel](/settings)"), "<p>rel</p>\n");
    }

    #[test]
    fn web_and_mail_links_survive() {
        assert_eq!(
            render_markdown("[ok](https://example.com/a)"),
            "<p><a href=\"https://example.com/a\">ok</a></p>\n"
        );
        assert!(
            render_markdown("[m](mailto:a@example.com)").contains(r#"href="mailto:a@example.com""#)
        );
        assert!(render_markdown("<a@example.com>").contains(r#"href="mailto:a@example.com""#));
    }
}
