/// Collapse internal line breaks (and one space before each) to a single space.
pub fn collapse_line_breaks(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            if out.ends_with(' ') {
                out.pop();
            }
            out.push(' ');
        }
        out.push_str(line.strip_suffix('\r').unwrap_or(line));
    }
    out
}

/// Strip the `*` gutter from one comment body line.
pub fn strip_gutter(line: &str) -> &str {
    let t = line.trim_start();
    let t = match t.strip_prefix('*') {
        Some(rest) => rest.strip_prefix(' ').unwrap_or(rest),
        None => t,
    };
    t.trim_end()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_line_breaks() {
        assert_eq!(collapse_line_breaks("one\ntwo"), "one two");
        assert_eq!(collapse_line_breaks("one \ntwo\nthree"), "one two three");
        assert_eq!(collapse_line_breaks("single"), "single");
    }

    #[test]
    fn test_strip_gutter() {
        assert_eq!(strip_gutter("     * Hello world"), "Hello world");
        assert_eq!(strip_gutter(" *"), "");
        assert_eq!(strip_gutter(" *   indented"), "  indented");
        assert_eq!(strip_gutter("no gutter  "), "no gutter");
    }
}
