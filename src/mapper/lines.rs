use regex::Regex;
use std::ops::Range;
use std::sync::OnceLock;

fn decorator_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"#\[[^\]]").expect("decorator pattern"))
}

/// Column width of the leading whitespace of `line`, tabs counted as
/// `tab_width`. Lines with nothing after the whitespace measure 0.
pub fn measure_indentation(line: &str, tab_width: usize) -> usize {
    let rest = line.trim_start();
    if rest.is_empty() {
        return 0;
    }

    line[..line.len() - rest.len()]
        .chars()
        .map(|c| if c == '\t' { tab_width } else { 1 })
        .sum()
}

/// Indices of decorator/attribute lines among `lines`. The opening line of
/// an attribute spanning several lines counts as one.
pub fn decorator_lines<S: AsRef<str>>(lines: &[S]) -> Vec<usize> {
    lines
        .iter()
        .enumerate()
        .filter(|(_, l)| decorator_re().is_match(l.as_ref()))
        .map(|(i, _)| i)
        .collect()
}

/// Index range of the raw comment inside `lines`, ending strictly before
/// `decl_index`. Lines are compared trimmed; the window closest to the
/// declaration wins.
pub fn locate_comment_range<S: AsRef<str>>(
    lines: &[S],
    raw_comment: &str,
    decl_index: usize,
) -> Option<Range<usize>> {
    let comment: Vec<&str> = raw_comment.split('\n').map(str::trim).collect();
    let n = comment.len();
    let limit = decl_index.min(lines.len());

    if n == 0 || n > limit {
        return None;
    }

    (n..=limit).rev().map(|end| end - n..end).find(|range| {
        lines[range.clone()]
            .iter()
            .zip(&comment)
            .all(|(line, expected)| line.as_ref().trim() == *expected)
    })
}
