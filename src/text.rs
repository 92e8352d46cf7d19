//! In-memory text state, mutated only by confirmed clicks.

/// The typed text. Append-only except for the two special keys; the engine's
/// confirmed-click dispatch is the sole mutation path.
#[derive(Debug, Default)]
pub struct TextBuffer {
    content: String,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a key label (usually one character, may be more).
    pub fn append(&mut self, label: &str) {
        self.content.push_str(label);
    }

    /// Remove the last character; no-op on an empty buffer.
    pub fn backspace(&mut self) {
        self.content.pop();
    }

    /// Empty the buffer unconditionally.
    pub fn clear_all(&mut self) {
        self.content.clear();
    }

    pub fn as_str(&self) -> &str {
        &self.content
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}
