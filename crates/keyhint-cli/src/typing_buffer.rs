//! The text being typed, with the keyboard's editing rules.
//!
//! Each edit returns whether it should refresh the recommendations.

/// A keyboard input buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypingBuffer {
    text: String,
}

impl TypingBuffer {
    /// The raw buffer contents.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The sentence to recommend for.
    pub fn context(&self) -> &str {
        self.text.trim()
    }

    /// Type `text`; a word boundary inside it refreshes.
    pub fn type_text(
        &mut self,
        text: &str,
    ) -> bool {
        self.text.push_str(text);
        text.chars().any(char::is_whitespace)
    }

    /// Type a space; always refreshes.
    pub fn type_space(&mut self) -> bool {
        self.text.push(' ');
        true
    }

    /// Delete the last character; always refreshes.
    pub fn backspace(&mut self) -> bool {
        self.text.pop();
        true
    }

    /// Delete the last word.
    ///
    /// Trailing spaces go with it, and the remaining words are rejoined
    /// with single spaces. Refreshes unless the buffer was blank.
    pub fn delete_word(&mut self) -> bool {
        let trimmed = self.text.trim_end();
        if trimmed.is_empty() {
            return false;
        }

        let words: Vec<&str> = trimmed.split_whitespace().collect();
        self.text = words[..words.len() - 1].join(" ");
        true
    }

    /// Accept a recommended word; always refreshes.
    ///
    /// The word is appended after a separating space, and followed by one.
    pub fn accept(
        &mut self,
        word: &str,
    ) -> bool {
        let mut text = self.text.trim().to_string();
        if !text.is_empty() {
            text.push(' ');
        }
        text.push_str(word);
        text.push(' ');
        self.text = text;
        true
    }

    /// Clear the buffer.
    pub fn clear(&mut self) {
        self.text.clear();
    }
}
