use changes_diff::DiffStats;
use changes_diff::FileChange;
use changes_diff::FileDiff;
use changes_diff::parse_multi_file_diff;
use changes_diff::print_hunk;
use changes_highlight::HighlightError;
use changes_highlight::HighlightOptions;
use changes_highlight::highlight_with;
use tracing::debug;
use tracing::warn;

use crate::RenderContext;
use crate::RenderError;

/// One file of a diff, rendered hunk by hunk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedFileDiff {
    pub change: FileChange,
    /// Escaped title; removed files are struck through.
    pub title: String,
    /// One `<pre class="hunk">` fragment per hunk, in order.
    pub hunks: Vec<String>,
    /// Indices of hunks that fell back to plain escaped text.
    pub failed_hunks: Vec<usize>,
    pub stats: DiffStats,
}

impl RenderedFileDiff {
    pub fn to_html(&self) -> String {
        let mut out = format!(
            r#"<div class="file-diff"><div class="file-header"><span class="file-title">{}</span> <span class="file-stats"><span class="added">+{}</span> <span class="removed">-{}</span></span></div>"#,
            self.title, self.stats.added, self.stats.removed
        );
        for hunk in &self.hunks {
            out.push_str(hunk);
        }
        out.push_str("</div>");
        out
    }
}

pub fn render_file_diff(
    ctx: &RenderContext,
    file: &FileDiff,
) -> Result<RenderedFileDiff, RenderError> {
    render_file_diff_with(ctx, file, highlight_with)
}

/// Parses `input` and renders every file in it.
pub fn render_diff(ctx: &RenderContext, input: &str) -> Result<Vec<RenderedFileDiff>, RenderError> {
    parse_multi_file_diff(input)?
        .iter()
        .map(|file| render_file_diff(ctx, file))
        .collect()
}

pub(crate) fn render_file_diff_with<F>(
    ctx: &RenderContext,
    file: &FileDiff,
    highlight: F,
) -> Result<RenderedFileDiff, RenderError>
where
    F: Fn(&str, &HighlightOptions) -> Result<String, HighlightError>,
{
    let change = file.change()?;
    let mut hunks = Vec::with_capacity(file.hunks.len());
    let mut failed_hunks = Vec::new();

    for (index, hunk) in file.hunks.iter().enumerate() {
        let printed = print_hunk(hunk);
        match highlight(&printed, &ctx.highlight) {
            Ok(html) => hunks.push(format!(r#"<pre class="hunk">{html}</pre>"#)),
            Err(err) => {
                warn!(
                    file = change.path(),
                    hunk = index,
                    error = %err,
                    "hunk highlighting failed; rendering plain text"
                );
                failed_hunks.push(index);
                hunks.push(format!(
                    r#"<pre class="hunk highlight-failed">{}</pre>"#,
                    html_escape::encode_quoted_attribute(&printed)
                ));
            }
        }
    }
    debug!(
        file = change.path(),
        hunks = hunks.len(),
        failed = failed_hunks.len(),
        "rendered file diff"
    );

    Ok(RenderedFileDiff {
        title: change.title_html(),
        change,
        hunks,
        failed_hunks,
        stats: file.stats(),
    })
}
