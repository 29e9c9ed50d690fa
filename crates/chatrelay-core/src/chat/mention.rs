//! Mention detection for non-command messages.
//!
//! A message is addressed to the bot when it contains `@<handle>` anywhere,
//! compared case-insensitively. Matching is substring based, so
//! `@relay_botany` also addresses `relay_bot`.

/// Outcome of classifying a non-command message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Not directed at the bot; stored to history only.
    Ambient,
    /// Contains the bot's mention marker; triggers a completion.
    Addressed,
}

/// Case-insensitive `@handle` matcher.
#[derive(Debug, Clone)]
pub struct MentionMatcher {
    handle: String,
    marker: String,
}

impl MentionMatcher {
    /// Build a matcher for `handle`. A single leading `@` is tolerated.
    pub fn new(handle: &str) -> Self {
        let handle = handle.trim();
        let handle = handle.strip_prefix('@').unwrap_or(handle).to_string();
        let marker = format!("@{}", handle.to_lowercase());
        Self { handle, marker }
    }

    /// The normalized handle, without `@`.
    pub fn handle(&self) -> &str {
        &self.handle
    }

    pub fn is_addressed(&self, text: &str) -> bool {
        text.to_lowercase().contains(&self.marker)
    }

    pub fn classify(&self, text: &str) -> Route {
        if self.is_addressed(text) {
            Route::Addressed
        } else {
            Route::Ambient
        }
    }
}
