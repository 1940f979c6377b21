use super::text::strip_gutter;
use super::types::{ParsedComment, TagEntry};
use crate::error::ParseError;

/// Turns raw structured-comment text into its semantic parts.
pub trait DocParser {
    fn parse(&self, raw: &str) -> Result<ParsedComment, ParseError>;
}

/// Parser for `/** ... */` docblocks.
///
/// The summary is the first paragraph, cut at a blank line or at the first
/// line ending with a period. Everything after it up to the first `@tag` line
/// is the description. Tag continuation lines are folded into the value.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocBlockParser;

impl DocParser for DocBlockParser {
    fn parse(&self, raw: &str) -> Result<ParsedComment, ParseError> {
        let body = unwrap_markers(raw)?;
        let lines: Vec<&str> = body.lines().map(strip_gutter).collect();

        let tag_start = lines
            .iter()
            .position(|l| l.starts_with('@'))
            .unwrap_or(lines.len());

        let (summary, description) = split_prose(&lines[..tag_start]);
        let tags = parse_tags(&lines[tag_start..], tag_start)?;

        Ok(ParsedComment {
            summary,
            description,
            tags,
        })
    }
}

fn unwrap_markers(raw: &str) -> Result<&str, ParseError> {
    let trimmed = raw.trim();
    if !trimmed.starts_with("/**") {
        return Err(ParseError::new("docblock must open with /**"));
    }
    if trimmed.len() < 5 || !trimmed.ends_with("*/") {
        return Err(ParseError::new("docblock must close with */"));
    }
    Ok(&trimmed[3..trimmed.len() - 2])
}

fn split_prose(lines: &[&str]) -> (String, String) {
    let mut i = 0usize;
    while i < lines.len() && lines[i].is_empty() {
        i += 1;
    }

    let mut summary: Vec<&str> = Vec::new();
    while i < lines.len() {
        let line = lines[i];
        i += 1;
        if line.is_empty() {
            break;
        }
        summary.push(line);
        if line.ends_with('.') {
            break;
        }
    }

    while i < lines.len() && lines[i].is_empty() {
        i += 1;
    }

    let mut end = lines.len();
    while end > i && lines[end - 1].is_empty() {
        end -= 1;
    }

    let description = if i < end {
        lines[i..end].join("\n")
    } else {
        String::new()
    };

    (summary.join("\n"), description)
}

fn parse_tags(lines: &[&str], offset: usize) -> Result<Vec<TagEntry>, ParseError> {
    let mut tags: Vec<TagEntry> = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        if line.is_empty() {
            continue;
        }

        if let Some(rest) = line.strip_prefix('@') {
            let name_end = rest.find(char::is_whitespace).unwrap_or(rest.len());
            let name = &rest[..name_end];

            if name.is_empty() || !name.chars().all(is_tag_name_char) {
                return Err(ParseError::at_line(
                    format!("invalid tag name '@{}'", name),
                    offset + i + 1,
                ));
            }

            tags.push(TagEntry::new(name, rest[name_end..].trim()));
        } else if let Some(current) = tags.last_mut() {
            if !current.value.is_empty() {
                current.value.push(' ');
            }
            current.value.push_str(line.trim());
        }
    }

    Ok(tags)
}

pub(crate) fn is_tag_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '\\' | ':')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_description_and_tags() {
        let raw = "/**\n * This is a summary for this class.\n *\n * This is an example text\n * for description.\n *\n * @property string|null $name\n * @method void run(mixed $any)\n */";
        let parsed = DocBlockParser.parse(raw).expect("valid docblock");

        assert_eq!(parsed.summary, "This is a summary for this class.");
        assert_eq!(parsed.description, "This is an example text\nfor description.");
        assert_eq!(parsed.tags.len(), 2);
        assert_eq!(parsed.tags[0], TagEntry::new("property", "string|null $name"));
        assert_eq!(parsed.tags[1], TagEntry::new("method", "void run(mixed $any)"));
    }

    #[test]
    fn test_summary_ends_at_period() {
        let raw = "/**\n * First sentence.\n * Rest of the prose.\n */";
        let parsed = DocBlockParser.parse(raw).expect("valid docblock");

        assert_eq!(parsed.summary, "First sentence.");
        assert_eq!(parsed.description, "Rest of the prose.");
    }

    #[test]
    fn test_single_line_docblock() {
        let parsed = DocBlockParser.parse("/** Just a summary */").expect("valid docblock");
        assert_eq!(parsed.summary, "Just a summary");
        assert!(parsed.description.is_empty());
        assert!(parsed.tags.is_empty());
    }

    #[test]
    fn test_tag_continuation_and_duplicates() {
        let raw = "/**\n * @property int $a\n * @property int $a\n * @see Something\n *      spanning lines\n */";
        let parsed = DocBlockParser.parse(raw).expect("valid docblock");

        assert_eq!(parsed.tags.len(), 3);
        assert_eq!(parsed.tags[0], parsed.tags[1]);
        assert_eq!(parsed.tags[2].value, "Something spanning lines");
    }

    #[test]
    fn test_rejects_non_docblock() {
        assert!(DocBlockParser.parse("// not a docblock").is_err());
        assert!(DocBlockParser.parse("/* plain */").is_err());
        assert!(DocBlockParser.parse("/** unterminated").is_err());
    }

    #[test]
    fn test_rejects_bad_tag_name() {
        let err = DocBlockParser
            .parse("/**\n * Summary.\n *\n * @!bad value\n */")
            .unwrap_err();
        assert_eq!(err.line, Some(4));
    }
}
