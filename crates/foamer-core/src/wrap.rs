//! Word wrapping for fixed-width displays.
//!
//! The display firmware draws whatever lines it is given, so all wrapping
//! happens before a message leaves the service.

/// Wrap `text` into lines of at most `max_width` characters.
///
/// Words are separated by single spaces. A word longer than the width is
/// split across lines, filling the current line first. Widths are counted in
/// characters. A width of zero yields no lines.
pub fn wrap_lines(text: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    if max_width == 0 {
        return lines;
    }

    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if word_len <= max_width {
            if current_len == 0 {
                current.push_str(word);
                current_len = word_len;
            } else if current_len + 1 + word_len <= max_width {
                current.push(' ');
                current.push_str(word);
                current_len += 1 + word_len;
            } else {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
                current_len = word_len;
            }
            continue;
        }

        // Oversized word: needs a separator plus at least one character.
        if current_len > 0 {
            if current_len + 1 >= max_width {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            } else {
                current.push(' ');
                current_len += 1;
            }
        }

        for ch in word.chars() {
            current.push(ch);
            current_len += 1;
            if current_len == max_width {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
