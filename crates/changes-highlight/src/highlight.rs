use tracing::debug;
use tracing::warn;

use crate::annotate::Annotation;
use crate::annotate::sort_annotations;
use crate::annotate::validate_annotations;
use crate::blocks::ReplaceBlock;
use crate::blocks::detect_blocks;
use crate::error::HighlightError;
use crate::intraline::BlockContent;
use crate::intraline::diff_contents;
use crate::options::HighlightOptions;
use crate::scan::Line;
use crate::scan::scan_lines;
use crate::splice::splice;

/// Highlights one hunk with [`HighlightOptions::default`].
///
/// ```
/// let html = changes_highlight::highlight("-foo\n+food\n").unwrap();
/// assert!(html.contains(r#"+foo<span class="x">d</span>"#));
/// ```
pub fn highlight(text: &str) -> Result<String, HighlightError> {
    highlight_with(text, &HighlightOptions::default())
}

/// Highlights one hunk: annotate, then splice the annotations into escaped text.
pub fn highlight_with(text: &str, options: &HighlightOptions) -> Result<String, HighlightError> {
    let annotations = annotate_hunk(text, options)?;
    splice(text, &annotations)
}

/// Computes the sorted, validated annotations for one hunk without splicing them.
pub fn annotate_hunk(
    text: &str,
    options: &HighlightOptions,
) -> Result<Vec<Annotation>, HighlightError> {
    let lines = scan_lines(text);
    let blocks = detect_blocks(text, &lines);
    let classes = &options.classes;

    let mut annotations = Vec::new();
    for block in &blocks {
        let deletes = block.delete_span(&lines);
        if !deletes.is_empty() {
            annotations.push(Annotation::span(deletes, &classes.delete_block));
        }
        let inserts = block.insert_span(&lines);
        if !inserts.is_empty() {
            annotations.push(Annotation::span(inserts, &classes.insert_block));
        }
    }

    if options.line_classes {
        for line in &lines {
            if let Some(class) = classes.line_class(line, text) {
                annotations.push(Annotation::span(line.content(), class));
            }
        }
    }

    if options.intraline {
        for block in blocks.iter().filter(|b| b.wants_intraline()) {
            annotations.extend(intraline_annotations(text, &lines, block, options)?);
        }
    }

    sort_annotations(&mut annotations);
    validate_annotations(text, &annotations)?;
    debug!(
        lines = lines.len(),
        blocks = blocks.len(),
        annotations = annotations.len(),
        "annotated hunk"
    );
    Ok(annotations)
}

fn intraline_annotations(
    text: &str,
    lines: &[Line],
    block: &ReplaceBlock,
    options: &HighlightOptions,
) -> Result<Vec<Annotation>, HighlightError> {
    let left = BlockContent::collect(text, &lines[block.deletes.clone()])?;
    let right = BlockContent::collect(text, &lines[block.inserts.clone()])?;

    let size = left.len() + right.len();
    if let Some(limit) = options.max_intraline_bytes
        && size > limit
    {
        warn!(
            size,
            limit,
            first_line = block.deletes.start,
            "skipping intraline diff for oversized block"
        );
        return Ok(Vec::new());
    }

    let spans = diff_contents(left.as_str(), right.as_str(), options.algorithm);
    let class = options.classes.intraline.as_str();
    let mut out = Vec::with_capacity(spans.left.len() + spans.right.len());
    for (side, local_spans) in [(&left, &spans.left), (&right, &spans.right)] {
        for local in local_spans {
            for range in side.translate(local.clone(), text)? {
                out.push(Annotation::span(range, class).inner());
            }
        }
    }
    Ok(out)
}
