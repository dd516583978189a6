//! Change events reported by the tag engine

use std::fmt;

/// A reportable change made to a metadata document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagEvent {
    /// A new entry was created for a file that had no tags yet
    EntryCreated { path: String, tags: Vec<String> },

    /// Tags were appended to an existing entry
    TagsAdded { path: String, tags: Vec<String> },

    /// Tags were removed and the entry still has tags left
    TagsRemoved { path: String, tags: Vec<String> },

    /// The entry was removed entirely, along with these tags
    EntryRemoved { path: String, tags: Vec<String> },
}

impl TagEvent {
    /// The file this event applies to
    pub fn path(&self) -> &str {
        match self {
            TagEvent::EntryCreated { path, .. }
            | TagEvent::TagsAdded { path, .. }
            | TagEvent::TagsRemoved { path, .. }
            | TagEvent::EntryRemoved { path, .. } => path,
        }
    }
}

impl fmt::Display for TagEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagEvent::EntryCreated { path, tags } | TagEvent::TagsAdded { path, tags } => {
                write!(f, "Added tags to {}: {}", path, tags.join(", "))
            }
            TagEvent::TagsRemoved { path, tags } => {
                write!(f, "Removed tags from {}: {}", path, tags.join(", "))
            }
            TagEvent::EntryRemoved { path, tags } if tags.is_empty() => {
                write!(f, "Removed all tags from {}", path)
            }
            TagEvent::EntryRemoved { path, tags } => {
                write!(f, "Removed all tags from {}: {}", path, tags.join(", "))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_added() {
        let event = TagEvent::EntryCreated {
            path: "bd1.wav".to_string(),
            tags: vec!["Drums|Kick".to_string(), "Creator|x".to_string()],
        };
        assert_eq!(event.to_string(), "Added tags to bd1.wav: Drums|Kick, Creator|x");
    }

    #[test]
    fn test_display_removed() {
        let event = TagEvent::TagsRemoved {
            path: "ch.wav".to_string(),
            tags: vec!["Creator|x".to_string()],
        };
        assert_eq!(event.to_string(), "Removed tags from ch.wav: Creator|x");
    }

    #[test]
    fn test_display_entry_removed() {
        let event = TagEvent::EntryRemoved {
            path: "ch.wav".to_string(),
            tags: vec!["Drums|Hihat".to_string()],
        };
        assert_eq!(event.to_string(), "Removed all tags from ch.wav: Drums|Hihat");

        let bare = TagEvent::EntryRemoved {
            path: "ch.wav".to_string(),
            tags: Vec::new(),
        };
        assert_eq!(bare.to_string(), "Removed all tags from ch.wav");
        assert_eq!(bare.path(), "ch.wav");
    }
}
