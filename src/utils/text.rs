//! Display-width aware text helpers.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Below this width wrapping is skipped and text is returned as-is.
pub const MIN_WRAP_WIDTH: usize = 10;

/// Terminal columns occupied by `text`.
#[must_use]
pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Word-wrap `text` to `width` columns.
///
/// Breaks on spaces; a word longer than the width is split mid-word. Always
/// returns at least one line.
#[must_use]
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width < MIN_WRAP_WIDTH || display_width(text) <= width {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for word in text.split(' ') {
        let word_width = display_width(word);
        let sep = usize::from(!current.is_empty());

        if current_width + sep + word_width <= width {
            if sep == 1 {
                current.push(' ');
            }
            current.push_str(word);
            current_width += sep + word_width;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            current_width = 0;
        }

        if word_width <= width {
            current.push_str(word);
            current_width = word_width;
            continue;
        }

        for c in word.chars() {
            let w = c.width().unwrap_or(0);
            if current_width + w > width && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }
            current.push(c);
            current_width += w;
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Truncate to `max` columns, appending `…` when cut.
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
    if display_width(text) <= max {
        return text.to_string();
    }
    let mut out = String::new();
    let mut width = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if width + w + 1 > max {
            break;
        }
        out.push(c);
        width += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_untouched() {
        assert_eq!(wrap_text("hello world", 40), vec!["hello world"]);
        assert_eq!(wrap_text("", 40), vec![""]);
    }

    #[test]
    fn test_wraps_on_words() {
        let lines = wrap_text("the quick brown fox jumps over", 15);
        assert_eq!(lines, vec!["the quick brown", "fox jumps over"]);
    }

    #[test]
    fn test_long_word_split() {
        let lines = wrap_text("abcdefghijklmnopqrstuvwxyz", 10);
        assert_eq!(lines, vec!["abcdefghij", "klmnopqrst", "uvwxyz"]);
    }

    #[test]
    fn test_narrow_width_disables_wrap() {
        let text = "a b c d e f g h i j k l m n o p";
        assert_eq!(wrap_text(text, 4), vec![text]);
    }

    #[test]
    fn test_wide_chars() {
        assert_eq!(display_width("日本"), 4);
        for line in wrap_text("日本語のテキストを折り返す", 10) {
            assert!(display_width(&line) <= 10);
        }
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("aws_instance.example", 10), "aws_insta…");
    }
}
