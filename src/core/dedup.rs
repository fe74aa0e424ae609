//! Order-preserving deduplication on the (timestamp, sender, content) triple.

use std::collections::HashSet;

use tracing::debug;

use crate::Message;

/// Remembers every key it has admitted.
#[derive(Debug, Default)]
pub struct Deduplicator {
    seen: HashSet<(String, String, String)>,
}

impl Deduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` the first time a message's key is seen.
    pub fn admit(&mut self, message: &Message) -> bool {
        let (timestamp, sender, content) = message.dedup_key();
        let fresh = self
            .seen
            .insert((timestamp.to_owned(), sender.to_owned(), content.to_owned()));
        if !fresh {
            let preview: String = message.content().chars().take(20).collect();
            debug!(sender = message.sender(), content = %preview, "Dropping duplicate record");
        }
        fresh
    }

    /// Number of distinct keys admitted so far.
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

/// Keeps the first occurrence of every triple, in input order.
///
/// ```
/// use chatsift::core::dedup::remove_duplicates;
/// use chatsift::format::SourceFormat;
/// use chatsift::Message;
///
/// let messages = vec![
///     Message::new("2024-01-15 10:30:00", "Alice", "hi", SourceFormat::Txt),
///     Message::new("2024-01-15 10:30:00", "Bob", "hi", SourceFormat::Txt),
///     Message::new("2024-01-15 10:30:00", "Alice", "hi", SourceFormat::Txt),
/// ];
/// assert_eq!(remove_duplicates(messages).len(), 2);
/// ```
pub fn remove_duplicates(messages: Vec<Message>) -> Vec<Message> {
    let mut dedup = Deduplicator::new();
    messages.into_iter().filter(|m| dedup.admit(m)).collect()
}
