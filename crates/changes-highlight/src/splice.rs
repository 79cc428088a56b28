use crate::annotate::Annotation;
use crate::error::HighlightError;
use crate::error::check_range;

/// Interleaves `text` with annotation markup.
///
/// Text between markup boundaries is HTML-escaped (`&`, `<`, `>`, `"`, `'`); markup is
/// emitted verbatim. Annotations must be in nesting order (see
/// [`crate::annotate::validate_annotations`]); closers are emitted innermost first. Any
/// inconsistency is reported instead of producing partial output.
pub fn splice(text: &str, annotations: &[Annotation]) -> Result<String, HighlightError> {
    let markup: usize = annotations
        .iter()
        .map(|a| a.open.len() + a.close.len())
        .sum();
    let mut out = String::with_capacity(text.len() + text.len() / 8 + markup);
    let mut open: Vec<&Annotation> = Vec::new();
    let mut pos = 0usize;

    for ann in annotations {
        while let Some(top) = open.last().copied()
            && top.end <= ann.start
        {
            close(&mut out, text, &mut pos, top)?;
            open.pop();
        }
        if let Some(top) = open.last()
            && ann.end > top.end
        {
            return Err(HighlightError::Overlap {
                outer: top.range(),
                inner: ann.range(),
            });
        }
        if ann.start < pos {
            return Err(HighlightError::Unordered {
                previous: pos..pos,
                next: ann.range(),
            });
        }
        push_escaped(&mut out, text, pos, ann.start)?;
        pos = ann.start;
        out.push_str(&ann.open);
        open.push(ann);
    }

    while let Some(top) = open.pop() {
        if top.end > text.len() {
            return Err(HighlightError::Unclosed { range: top.range() });
        }
        close(&mut out, text, &mut pos, top)?;
    }
    push_escaped(&mut out, text, pos, text.len())?;
    Ok(out)
}

fn close(
    out: &mut String,
    text: &str,
    pos: &mut usize,
    ann: &Annotation,
) -> Result<(), HighlightError> {
    push_escaped(out, text, *pos, ann.end)?;
    *pos = ann.end;
    out.push_str(&ann.close);
    Ok(())
}

fn push_escaped(
    out: &mut String,
    text: &str,
    from: usize,
    to: usize,
) -> Result<(), HighlightError> {
    check_range(text, from..to)?;
    html_escape::encode_quoted_attribute_to_string(&text[from..to], out);
    Ok(())
}
