use changes_highlight::HighlightError;
use changes_highlight::HighlightOptions;
use changes_highlight::annotate::Annotation;
use changes_highlight::annotate_hunk;
use changes_highlight::highlight;
use changes_highlight::highlight_with;
use changes_highlight::scan::Marker;
use changes_highlight::scan::scan_lines;
use changes_highlight::splice::splice;

fn strip_markup(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for ch in html.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    html_escape::decode_html_entities(&out).into_owned()
}

#[test]
fn identical_sides_get_only_line_backgrounds() {
    let html = highlight("-foo\n+foo\n").unwrap();
    assert_eq!(
        html,
        concat!(
            r#"<span class="gd input-block"><span class="gd">-foo</span>"#,
            "\n</span>",
            r#"<span class="gi input-block"><span class="gi">+foo</span>"#,
            "\n</span>",
        )
    );
    assert!(!html.contains(r#"class="x""#));
}

#[test]
fn single_inserted_char_is_wrapped_inside_background() {
    let html = highlight("-foo\n+food\n").unwrap();
    assert_eq!(
        html,
        concat!(
            r#"<span class="gd input-block"><span class="gd">-foo</span>"#,
            "\n</span>",
            r#"<span class="gi input-block"><span class="gi">+foo<span class="x">d</span></span>"#,
            "\n</span>",
        )
    );
}

#[test]
fn unrelated_sides_highlight_whole_bodies() {
    let html = highlight("-a\n-b\n+c\n").unwrap();
    assert_eq!(
        html,
        concat!(
            r#"<span class="gd input-block">"#,
            r#"<span class="gd">-<span class="x">a</span></span>"#,
            "\n",
            r#"<span class="gd">-<span class="x">b</span></span>"#,
            "\n</span>",
            r#"<span class="gi input-block"><span class="gi">+<span class="x">c</span></span>"#,
            "\n</span>",
        )
    );
}

#[test]
fn no_annotation_crosses_a_hunk_header() {
    let text = "@@ -1,2 +1,2 @@\n-a\n+b\n@@ -9 +9 @@\n-c\n+d\n";
    let lines = scan_lines(text);
    let annotations = annotate_hunk(text, &HighlightOptions::default()).unwrap();
    for header in lines.iter().filter(|l| l.marker == Marker::Other) {
        for ann in &annotations {
            let intersects = ann.start < header.end && header.start < ann.end;
            if intersects {
                assert_eq!(ann.range(), header.content(), "{ann:?} reaches into {header:?}");
            }
        }
    }

    let blocks = annotations
        .iter()
        .filter(|a| a.open.contains("input-block"))
        .map(Annotation::range)
        .collect::<Vec<_>>();
    assert_eq!(blocks, vec![16..19, 19..22, 34..37, 37..40]);

    let intraline = annotations
        .iter()
        .filter(|a| a.open == r#"<span class="x">"#)
        .map(Annotation::range)
        .collect::<Vec<_>>();
    assert_eq!(intraline, vec![35..36, 38..39]);
}

#[test]
fn block_ended_by_hunk_header_gets_backgrounds_only() {
    let html = highlight("-abc\n+axc\n@@ -9 +9 @@\n").unwrap();
    assert_eq!(
        html,
        concat!(
            r#"<span class="gd input-block"><span class="gd">-abc</span>"#,
            "\n</span>",
            r#"<span class="gi input-block"><span class="gi">+axc</span>"#,
            "\n</span>",
            r#"<span class="gu">@@ -9 +9 @@</span>"#,
            "\n",
        )
    );
    assert!(!html.contains(r#"class="x""#));
}

#[test]
fn blocks_ended_by_context_or_end_of_text_get_intraline() {
    let by_context = highlight("-abc\n+axc\n ctx\n").unwrap();
    assert!(by_context.contains(r#"-a<span class="x">b</span>c"#));
    assert!(by_context.contains(r#"+a<span class="x">x</span>c"#));

    let at_end = highlight("-abc\n+axc").unwrap();
    assert!(at_end.contains(r#"-a<span class="x">b</span>c"#));
    assert!(at_end.contains(r#"+a<span class="x">x</span>c"#));
}

#[test]
fn multibyte_chars_are_never_split() {
    let text = "-héllo wörld\n+hello world\n";
    let html = highlight(text).unwrap();
    assert!(html.contains(r#"h<span class="x">é</span>llo w<span class="x">ö</span>rld"#));
    assert!(html.contains(r#"h<span class="x">e</span>llo w<span class="x">o</span>rld"#));
    assert_eq!(strip_markup(&html), text);

    for ann in annotate_hunk(text, &HighlightOptions::default()).unwrap() {
        assert!(text.is_char_boundary(ann.start));
        assert!(text.is_char_boundary(ann.end));
    }
}

#[test]
fn splitting_annotation_is_reported_not_emitted() {
    let text = "-é\n";
    let err = splice(text, &[Annotation::span(0..2, "x")]).unwrap_err();
    assert_eq!(err, HighlightError::SplitsCharacter { offset: 2 });
    assert!(err.is_boundary());
}

#[test]
fn content_is_escaped_exactly_once() {
    let text = "-if a < b && c > \"d\" {\n+if a <= b && c > 'd' {\n";
    let html = highlight(text).unwrap();
    assert!(html.contains("&lt;"));
    assert!(html.contains("&amp;&amp;"));
    assert!(html.contains("&quot;"));
    assert!(html.contains("&#x27;"));
    assert!(!html.contains("&amp;lt;"));
    assert_eq!(strip_markup(&html), text);
}

#[test]
fn plain_round_trip_without_differences() {
    let text = "@@ -1,3 +1,3 @@\n context <tag>\n-same & same\n+same & same\n trailing";
    let html = highlight(text).unwrap();
    assert!(!html.contains(r#"class="x""#));
    assert_eq!(strip_markup(&html), text);
}

#[test]
fn custom_classes_are_used() {
    let mut options = HighlightOptions::blocks_only();
    options.classes.delete_block = "del".to_string();
    options.classes.insert_block = "ins".to_string();
    options.classes.intraline = "chg".to_string();
    let html = highlight_with("-ab\n+ac\n", &options).unwrap();
    assert_eq!(
        html,
        concat!(
            r#"<span class="del">-a<span class="chg">b</span>"#,
            "\n</span>",
            r#"<span class="ins">+a<span class="chg">c</span>"#,
            "\n</span>",
        )
    );
}

#[test]
fn hunks_highlight_concurrently() {
    let texts = ["-a\n+b\n", " x\n-yy\n+yz\n", "@@ -1 +1 @@\n-é\n+è\n"];
    let results = std::thread::scope(|s| {
        let handles = texts
            .iter()
            .map(|t| s.spawn(move || highlight(t)))
            .collect::<Vec<_>>();
        handles
            .into_iter()
            .map(|h| h.join().expect("highlight thread panicked"))
            .collect::<Vec<_>>()
    });
    for (text, result) in texts.iter().zip(results) {
        assert_eq!(result, highlight(text));
    }
}
