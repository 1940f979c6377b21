use std::cmp::Ordering;
use std::iter::Peekable;
use std::str::Chars;

/// Human ordering: digit runs compare by numeric value, everything else by
/// character.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut ai = a.chars().peekable();
    let mut bi = b.chars().peekable();

    loop {
        let (x, y) = match (ai.peek(), bi.peek()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(&x), Some(&y)) => (x, y),
        };

        let ord = if x.is_ascii_digit() && y.is_ascii_digit() {
            compare_digit_runs(&take_digits(&mut ai), &take_digits(&mut bi))
        } else {
            ai.next();
            bi.next();
            x.cmp(&y)
        };

        if ord != Ordering::Equal {
            return ord;
        }
    }
}

fn take_digits(it: &mut Peekable<Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(&c) = it.peek() {
        if !c.is_ascii_digit() {
            break;
        }
        run.push(c);
        it.next();
    }
    run
}

fn compare_digit_runs(a: &str, b: &str) -> Ordering {
    let na = a.trim_start_matches('0');
    let nb = b.trim_start_matches('0');

    na.len()
        .cmp(&nb.len())
        .then_with(|| na.cmp(nb))
        .then_with(|| a.len().cmp(&b.len()))
}

/// Greedy fill into lines of at most `width` characters, breaking only at
/// whitespace. A word longer than `width` gets a line of its own.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if current.is_empty() {
            current.push_str(word);
            current_len = word_len;
        } else if current_len + 1 + word_len <= width {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_len = word_len;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

/// Render a complete `/** ... */` block, every line prefixed with `indent`.
pub fn render_block(
    indent: &str,
    summary: Option<&str>,
    description: Option<&str>,
    tags: &[String],
    width: usize,
) -> Vec<String> {
    let mut prose: Vec<String> = Vec::new();

    if let Some(summary) = summary {
        prose.extend(wrap_text(summary, width));
    }
    if summary.is_some() && description.is_some() {
        prose.push(String::new());
    }
    if let Some(description) = description {
        prose.extend(wrap_text(description, width));
    }
    if summary.is_some() || description.is_some() {
        prose.push(String::new());
    }

    let mut block = Vec::with_capacity(prose.len() + tags.len() + 2);
    block.push(format!("{}/**", indent));
    for line in prose {
        if line.is_empty() {
            block.push(format!("{} *", indent));
        } else {
            block.push(format!("{} * {}", indent, line));
        }
    }
    for tag in tags {
        block.push(format!("{} * @{}", indent, tag));
    }
    block.push(format!("{} */", indent));

    block
}
