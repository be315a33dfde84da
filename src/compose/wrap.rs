//! Greedy word wrapping by character count.

/// A body split into display lines.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WrappedText {
    lines: Vec<String>,
}

impl WrappedText {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Character count of the longest line.
    pub fn max_chars(&self) -> usize {
        self.lines
            .iter()
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(0)
    }

    /// The lines joined with `\n`.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Wrap `text` into lines of at most `width` characters.
///
/// Breaks only between words; runs of whitespace collapse to one space.
/// A word longer than `width` is kept whole on its own line.
pub fn wrap_text(text: &str, width: usize) -> WrappedText {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if current_len > 0 && current_len + 1 + word_len > width {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(word);
        current_len += word_len;
    }
    if current_len > 0 {
        lines.push(current);
    }

    WrappedText { lines }
}
