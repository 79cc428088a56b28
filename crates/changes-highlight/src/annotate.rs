use std::cmp::Ordering;
use std::ops::Range;

use crate::error::HighlightError;
use crate::error::check_range;

/// Markup to inject around a byte range of a text without modifying the text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Annotation {
    pub start: usize,
    pub end: usize,
    /// Emitted verbatim before `start`.
    pub open: String,
    /// Emitted verbatim after `end`.
    pub close: String,
    /// `false` for pure wrappers. When two annotations cover the same range, wrappers open
    /// first and close last.
    pub wants_inner: bool,
}

impl Annotation {
    pub fn new(range: Range<usize>, open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            start: range.start,
            end: range.end,
            open: open.into(),
            close: close.into(),
            wants_inner: false,
        }
    }

    /// A `<span class="...">` wrapper. The class is attribute-escaped.
    pub fn span(range: Range<usize>, class: &str) -> Self {
        let class = html_escape::encode_double_quoted_attribute(class);
        Self::new(range, format!(r#"<span class="{class}">"#), "</span>")
    }

    pub fn inner(mut self) -> Self {
        self.wants_inner = true;
        self
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `other` lies entirely within `self`.
    pub fn contains(&self, other: &Annotation) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Whether the two ranges intersect without either containing the other.
    pub fn crosses(&self, other: &Annotation) -> bool {
        let intersect = self.start < other.end && other.start < self.end;
        intersect && !self.contains(other) && !other.contains(self)
    }
}

/// Total order used for splicing: earlier start first, then wider ranges first, then wrappers
/// before annotations that want to be inner.
pub fn nesting_order(a: &Annotation, b: &Annotation) -> Ordering {
    a.start
        .cmp(&b.start)
        .then_with(|| b.end.cmp(&a.end))
        .then_with(|| a.wants_inner.cmp(&b.wants_inner))
}

/// Sorts annotations into nesting order. Stable, so equal annotations keep insertion order.
pub fn sort_annotations(annotations: &mut [Annotation]) {
    annotations.sort_by(nesting_order);
}

/// Checks that a sorted annotation sequence can be spliced into `text`.
///
/// Rejects annotations outside the text or splitting a character, sequences not in
/// [`nesting_order`], and any pair that overlaps without nesting. Nothing is repaired.
pub fn validate_annotations(text: &str, annotations: &[Annotation]) -> Result<(), HighlightError> {
    let mut open: Vec<&Annotation> = Vec::new();
    let mut previous: Option<&Annotation> = None;
    for ann in annotations {
        check_range(text, ann.range())?;
        if let Some(prev) = previous
            && nesting_order(prev, ann) == Ordering::Greater
        {
            return Err(HighlightError::Unordered {
                previous: prev.range(),
                next: ann.range(),
            });
        }
        previous = Some(ann);

        while let Some(top) = open.last()
            && top.end <= ann.start
        {
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
        open.push(ann);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ann(range: Range<usize>) -> Annotation {
        Annotation::new(range, "<b>", "</b>")
    }

    fn sorted(mut anns: Vec<Annotation>) -> Vec<Range<usize>> {
        sort_annotations(&mut anns);
        anns.iter().map(Annotation::range).collect()
    }

    #[test]
    fn sorts_by_start_then_wider_first() {
        assert_eq!(
            sorted(vec![ann(4..5), ann(0..2), ann(0..6), ann(4..9)]),
            vec![0..6, 0..2, 4..9, 4..5]
        );
    }

    #[test]
    fn wrappers_sort_before_inner_annotations_on_equal_ranges() {
        let mut anns = vec![ann(1..3).inner(), ann(1..3)];
        sort_annotations(&mut anns);
        assert!(!anns[0].wants_inner);
        assert!(anns[1].wants_inner);
    }

    #[test]
    fn span_escapes_class() {
        let a = Annotation::span(0..1, r#"x" onclick="y"#);
        assert_eq!(a.open, r#"<span class="x&quot; onclick=&quot;y">"#);
        assert_eq!(a.close, "</span>");
    }

    #[test]
    fn accepts_disjoint_and_nested() {
        let text = "0123456789";
        let mut anns = vec![ann(0..10), ann(0..4), ann(1..2), ann(4..4), ann(4..9), ann(9..10)];
        sort_annotations(&mut anns);
        assert_eq!(validate_annotations(text, &anns), Ok(()));
    }

    #[test]
    fn rejects_crossing_pair() {
        let text = "0123456789";
        let mut anns = vec![ann(0..5), ann(3..8)];
        sort_annotations(&mut anns);
        assert_eq!(
            validate_annotations(text, &anns),
            Err(HighlightError::Overlap {
                outer: 0..5,
                inner: 3..8
            })
        );
    }

    #[test]
    fn rejects_crossing_hidden_below_nested_child() {
        let text = "0123456789";
        let mut anns = vec![ann(0..5), ann(1..3), ann(2..7)];
        sort_annotations(&mut anns);
        assert!(matches!(
            validate_annotations(text, &anns),
            Err(HighlightError::Overlap { .. })
        ));
    }

    #[test]
    fn rejects_unsorted_sequences() {
        let text = "0123456789";
        let anns = vec![ann(2..3), ann(0..1)];
        assert_eq!(
            validate_annotations(text, &anns),
            Err(HighlightError::Unordered {
                previous: 2..3,
                next: 0..1
            })
        );
    }

    #[test]
    fn rejects_offsets_inside_characters() {
        let text = "aé";
        assert_eq!(
            validate_annotations(text, &[ann(0..2)]),
            Err(HighlightError::SplitsCharacter { offset: 2 })
        );
        assert!(
            validate_annotations(text, &[ann(0..4)])
                .unwrap_err()
                .is_boundary()
        );
    }

    #[test]
    fn crosses_matches_definition() {
        assert!(ann(0..5).crosses(&ann(3..8)));
        assert!(!ann(0..5).crosses(&ann(5..8)));
        assert!(!ann(0..5).crosses(&ann(1..5)));
        assert!(!ann(3..3).crosses(&ann(0..5)));
    }
}
