use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::Origin;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConversationEntry {
    pub author: String,
    pub text: String,
    pub timestamp: DateTime<Local>,
    pub origin: Origin,
}

impl ConversationEntry {
    pub fn user(author: impl Into<String>, text: impl Into<String>) -> Self {
        ConversationEntry {
            author: author.into(),
            text: text.into(),
            timestamp: Local::now(),
            origin: Origin::User,
        }
    }

    pub fn bot(author: impl Into<String>, text: impl Into<String>) -> Self {
        ConversationEntry {
            author: author.into(),
            text: text.into(),
            timestamp: Local::now(),
            origin: Origin::Bot,
        }
    }
}

/// Append-only message log. Insertion order is chronological order.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    entries: Vec<ConversationEntry>,
}

impl Conversation {
    pub fn push(&mut self, entry: ConversationEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[ConversationEntry] {
        &self.entries
    }

    pub fn last_origin(&self) -> Option<Origin> {
        self.entries.last().map(|e| e.origin)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Wholesale reset: drops every entry and starts over from `seed`.
    /// There is no partial deletion.
    pub fn reset(&mut self, seed: ConversationEntry) {
        self.entries.clear();
        self.entries.push(seed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_conversation() -> Conversation {
        let mut conversation = Conversation::default();
        conversation.push(ConversationEntry::bot("Bot", "Welcome!"));
        conversation.push(ConversationEntry::user("You", "thanks"));
        conversation
    }

    #[test]
    fn last_origin_tracks_latest_entry() {
        let mut conversation = Conversation::default();
        assert_eq!(conversation.last_origin(), None);
        conversation.push(ConversationEntry::user("You", "hello"));
        assert_eq!(conversation.last_origin(), Some(Origin::User));
        conversation.push(ConversationEntry::bot("Bot", "hi"));
        assert_eq!(conversation.last_origin(), Some(Origin::Bot));
    }

    #[test]
    fn entries_keep_insertion_order() {
        let conversation = sample_conversation();
        let texts: Vec<_> = conversation.entries().iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["Welcome!", "thanks"]);
    }

    #[test]
    fn reset_leaves_single_seed_entry() {
        let mut conversation = sample_conversation();
        conversation.reset(ConversationEntry::bot("Bot", "All cleared!"));
        assert_eq!(conversation.len(), 1);
        assert_eq!(conversation.entries()[0].text, "All cleared!");
        assert_eq!(conversation.last_origin(), Some(Origin::Bot));
    }
}
