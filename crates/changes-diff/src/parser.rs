use std::iter::Peekable;
use std::str::SplitTerminator;

use tracing::trace;

use crate::ParseError;

/// One file's section of a unified diff.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FileDiff {
    /// Name from the `--- ` line, timestamp stripped (e.g. `a/src/main.rs` or `/dev/null`).
    pub orig_name: String,
    /// Name from the `+++ ` line.
    pub new_name: String,
    /// Header lines before `---` (`diff --git`, `index`, mode and rename lines), verbatim.
    pub extended: Vec<String>,
    pub hunks: Vec<Hunk>,
}

/// A single `@@ ... @@` hunk. `body` holds every line after the header, each ending in `\n`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Hunk {
    pub orig_start: u32,
    pub orig_lines: u32,
    pub new_start: u32,
    pub new_lines: u32,
    /// Text after the closing `@@` (usually the enclosing function), without the separator.
    pub section: String,
    pub body: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct HunkHeader {
    orig_start: u32,
    orig_lines: u32,
    new_start: u32,
    new_lines: u32,
    section: String,
}

type Lines<'a> = Peekable<std::iter::Enumerate<SplitTerminator<'a, char>>>;

/// Parses a diff that may cover several files.
pub fn parse_multi_file_diff(input: &str) -> Result<Vec<FileDiff>, ParseError> {
    let mut files: Vec<FileDiff> = Vec::new();
    let mut current: Option<FileDiff> = None;
    let mut lines: Lines<'_> = input.split_terminator('\n').enumerate().peekable();

    while let Some((idx, raw)) = lines.next() {
        let line_no = idx + 1;
        if raw.starts_with("diff ") {
            files.extend(current.take());
            current = Some(FileDiff {
                extended: vec![raw.to_string()],
                ..FileDiff::default()
            });
        } else if let Some(rest) = raw.strip_prefix("--- ") {
            if current.as_ref().is_none_or(|f| !f.hunks.is_empty()) {
                files.extend(current.take());
            }
            current.get_or_insert_default().orig_name = file_name(rest);
        } else if let Some(rest) = raw.strip_prefix("+++ ") {
            current.get_or_insert_default().new_name = file_name(rest);
        } else if raw.starts_with("@@") {
            let header = parse_hunk_header(raw).ok_or_else(|| ParseError::MalformedHunkHeader {
                line: line_no,
                header: raw.to_string(),
            })?;
            let Some(file) = current.as_mut() else {
                return Err(ParseError::HunkOutsideFile { line: line_no });
            };
            let hunk = read_hunk(header, line_no, &mut lines)?;
            file.hunks.push(hunk);
        } else if let Some(file) = current.as_mut()
            && file.hunks.is_empty()
        {
            file.extended.push(raw.to_string());
        } else {
            trace!(line = line_no, "ignoring line outside of any hunk");
        }
    }
    files.extend(current);
    Ok(files)
}

/// Parses a diff that must cover exactly one file.
pub fn parse_file_diff(input: &str) -> Result<FileDiff, ParseError> {
    let mut files = parse_multi_file_diff(input)?;
    match files.len() {
        1 => Ok(files.remove(0)),
        found => Err(ParseError::FileCount { found }),
    }
}

fn read_hunk(
    header: HunkHeader,
    header_line: usize,
    lines: &mut Lines<'_>,
) -> Result<Hunk, ParseError> {
    let mut old_left = header.orig_lines;
    let mut new_left = header.new_lines;
    let mut body = String::new();

    while old_left > 0 || new_left > 0 {
        let Some((idx, line)) = lines.next() else {
            return Err(ParseError::TruncatedHunk {
                line: header_line,
                missing_orig: old_left,
                missing_new: new_left,
            });
        };
        match line.as_bytes().first().copied() {
            Some(b' ') | None => {
                old_left = old_left.saturating_sub(1);
                new_left = new_left.saturating_sub(1);
            }
            Some(b'-') => old_left = old_left.saturating_sub(1),
            Some(b'+') => new_left = new_left.saturating_sub(1),
            Some(b'\\') => {}
            _ => {
                return Err(ParseError::UnexpectedLine {
                    line: idx + 1,
                    content: line.to_string(),
                });
            }
        }
        body.push_str(line);
        body.push('\n');
    }
    while let Some((_, line)) = lines.next_if(|(_, l)| l.starts_with('\\')) {
        body.push_str(line);
        body.push('\n');
    }

    Ok(Hunk {
        orig_start: header.orig_start,
        orig_lines: header.orig_lines,
        new_start: header.new_start,
        new_lines: header.new_lines,
        section: header.section,
        body,
    })
}

/// Renders one hunk back to its printed form: header line, then body.
pub fn print_hunk(hunk: &Hunk) -> String {
    let mut out = format!(
        "@@ -{},{} +{},{} @@",
        hunk.orig_start, hunk.orig_lines, hunk.new_start, hunk.new_lines
    );
    if !hunk.section.is_empty() {
        out.push(' ');
        out.push_str(&hunk.section);
    }
    out.push('\n');
    out.push_str(&hunk.body);
    out
}

/// Concatenation of [`print_hunk`] for every hunk.
pub fn print_hunks(hunks: &[Hunk]) -> String {
    hunks.iter().map(print_hunk).collect()
}

fn file_name(rest: &str) -> String {
    rest.split('\t').next().unwrap_or(rest).trim_end().to_string()
}

fn parse_hunk_header(line: &str) -> Option<HunkHeader> {
    let after = line.strip_prefix("@@")?.trim_start();
    let after = after.strip_prefix('-')?;
    let (old_part, rest) = after.split_once(' ')?;
    let rest = rest.trim_start();
    let rest = rest.strip_prefix('+')?;
    let (new_part, rest) = rest.split_once(' ')?;
    let rest = rest.trim_start().strip_prefix("@@")?;
    let section = rest.strip_prefix(' ').unwrap_or(rest);

    let (orig_start, orig_lines) = parse_range(old_part)?;
    let (new_start, new_lines) = parse_range(new_part)?;
    Some(HunkHeader {
        orig_start,
        orig_lines,
        new_start,
        new_lines,
        section: section.to_string(),
    })
}

fn parse_range(part: &str) -> Option<(u32, u32)> {
    match part.split_once(',') {
        Some((start, len)) => Some((start.parse().ok()?, len.parse().ok()?)),
        None => Some((part.parse().ok()?, 1)),
    }
}
