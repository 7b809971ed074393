//! Draft text owned by the widget's composer footer.

/// Ephemeral composer state. The draft never leaves the widget except
/// through a successful [`ComposerState::submit`].
#[derive(Clone, Debug, Default)]
pub struct ComposerState {
    pub draft: String,
}

impl ComposerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the trimmed draft for sending.
    ///
    /// Returns `None` and leaves the draft alone when it is blank;
    /// otherwise clears the draft.
    pub fn submit(&mut self) -> Option<String> {
        let trimmed = self.draft.trim();
        if trimmed.is_empty() {
            return None;
        }
        let text = trimmed.to_string();
        self.draft.clear();
        Some(text)
    }

    pub fn clear(&mut self) {
        self.draft.clear();
    }

    pub fn is_blank(&self) -> bool {
        self.draft.trim().is_empty()
    }
}
