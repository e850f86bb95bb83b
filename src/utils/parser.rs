//! Command argument parsing.
//!
//! Anime names are free text: any number of words, joined with single spaces,
//! no escaping and no length limit.

/// Why `/remind` arguments were rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemindArgsError {
    /// Fewer than two words (name and minutes).
    Usage,
    /// The last word is not a whole number of minutes.
    InvalidTime,
}

/// Normalize a free-text name: trim and collapse runs of whitespace.
///
/// Returns `None` for empty input.
pub fn parse_name(args: &str) -> Option<String> {
    let name = args.split_whitespace().collect::<Vec<_>>().join(" ");
    (!name.is_empty()).then_some(name)
}

/// Parse `<name...> <minutes>`.
///
/// The last word is the delay, everything before it is the name. A negative
/// delay is accepted and yields a reminder that is already due.
pub fn parse_remind_args(args: &str) -> Result<(String, i64), RemindArgsError> {
    let words: Vec<&str> = args.split_whitespace().collect();
    let Some((minutes, name)) = words.split_last() else {
        return Err(RemindArgsError::Usage);
    };
    if name.is_empty() {
        return Err(RemindArgsError::Usage);
    }

    let minutes = minutes
        .parse::<i64>()
        .map_err(|_| RemindArgsError::InvalidTime)?;

    Ok((name.join(" "), minutes))
}

/// Cut `text` to at most `max_chars` characters on a line boundary.
///
/// Telegram rejects messages longer than 4096 characters.
pub fn truncate_lines(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    const ELLIPSIS: &str = "\n…";
    let budget = max_chars.saturating_sub(ELLIPSIS.chars().count());

    let mut out = String::new();
    let mut used = 0;
    for line in text.lines() {
        let cost = line.chars().count() + usize::from(!out.is_empty());
        if used + cost > budget {
            break;
        }
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(line);
        used += cost;
    }

    out.push_str(ELLIPSIS);
    out
}
