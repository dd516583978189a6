//! Tag mutation engine
//!
//! Add and remove operations on a [`MetadataDocument`]. Entries are keyed by
//! exact string equality on the relative file path. None of the operations
//! fail: re-adding a tag, removing a tag a file does not have, or touching an
//! untracked file are all no-ops that leave the dirty flag alone.
//!
//! # Examples
//!
//! ```
//! use livetagger::domain::MetadataDocument;
//!
//! let mut doc = MetadataDocument::new();
//! doc.add_tags_to_files(&["bd1.wav", "bd2.wav"], &["Drums|Kick"]);
//!
//! assert_eq!(doc.entry_count(), 2);
//! assert!(doc.is_dirty());
//! ```

use super::event::TagEvent;
use crate::domain::document::{entry_tags, MetadataDocument};
use crate::domain::vocabulary::{rdf, RDF_NS};
use crate::domain::xml::Node;

impl MetadataDocument {
    /// Adds tags to a file, creating its entry if needed.
    ///
    /// Tags the file already has are skipped, as are repeats within `tags`.
    pub fn add_tags<S: AsRef<str>>(&mut self, path: &str, tags: &[S]) -> Option<TagEvent> {
        let wanted = unique_tags(tags);
        if wanted.is_empty() {
            return None;
        }

        let Some(index) = self.position(path) else {
            self.push_entry(path, &wanted);
            self.mark_dirty();

            return Some(TagEvent::EntryCreated {
                path: path.to_string(),
                tags: wanted,
            });
        };

        let existing = self.entry_element(index).map(entry_tags).unwrap_or_default();
        let added: Vec<String> = wanted
            .into_iter()
            .filter(|tag| !existing.contains(tag))
            .collect();

        if added.is_empty() {
            return None;
        }

        let keywords: Vec<Node> = added
            .iter()
            .map(|tag| Node::Element(self.keyword(tag)))
            .collect();

        let bag = self.keyword_bag_mut(index)?;
        bag.children.extend(keywords);
        self.mark_dirty();

        Some(TagEvent::TagsAdded {
            path: path.to_string(),
            tags: added,
        })
    }

    /// Removes tags from a file.
    ///
    /// If no tags are left afterwards, the file's entry is removed entirely.
    pub fn remove_tags<S: AsRef<str>>(&mut self, path: &str, tags: &[S]) -> Option<TagEvent> {
        let index = self.position(path)?;
        let existing = self.entry_element(index).map(entry_tags).unwrap_or_default();

        let is_target = |tag: &str| tags.iter().any(|t| t.as_ref() == tag);
        let (removed, kept): (Vec<String>, Vec<String>) =
            existing.into_iter().partition(|tag| is_target(tag.as_str()));

        if removed.is_empty() {
            return None;
        }

        if kept.is_empty() {
            self.remove_item(index);
            self.mark_dirty();

            return Some(TagEvent::EntryRemoved {
                path: path.to_string(),
                tags: removed,
            });
        }

        let bag = self.keyword_bag_mut(index)?;
        bag.children.retain(|node| match node {
            Node::Element(li) if li.is(RDF_NS, rdf::LI) => !is_target(li.text().as_str()),
            _ => true,
        });
        self.mark_dirty();

        Some(TagEvent::TagsRemoved {
            path: path.to_string(),
            tags: removed,
        })
    }

    /// Removes a file's entry, whatever tags it has.
    pub fn remove_all_tags(&mut self, path: &str) -> Option<TagEvent> {
        let index = self.position(path)?;
        let tags = self.entry_element(index).map(entry_tags).unwrap_or_default();

        self.remove_item(index);
        self.mark_dirty();

        Some(TagEvent::EntryRemoved {
            path: path.to_string(),
            tags,
        })
    }

    /// Applies [`add_tags`](Self::add_tags) to each file in order.
    pub fn add_tags_to_files<P, S>(&mut self, files: &[P], tags: &[S]) -> Vec<TagEvent>
    where
        P: AsRef<str>,
        S: AsRef<str>,
    {
        files
            .iter()
            .filter_map(|file| self.add_tags(file.as_ref(), tags))
            .collect()
    }

    /// Applies [`remove_tags`](Self::remove_tags) to each file in order.
    pub fn remove_tags_from_files<P, S>(&mut self, files: &[P], tags: &[S]) -> Vec<TagEvent>
    where
        P: AsRef<str>,
        S: AsRef<str>,
    {
        files
            .iter()
            .filter_map(|file| self.remove_tags(file.as_ref(), tags))
            .collect()
    }

    /// Applies [`remove_all_tags`](Self::remove_all_tags) to each file in order.
    pub fn remove_all_tags_from_files<P: AsRef<str>>(&mut self, files: &[P]) -> Vec<TagEvent> {
        files
            .iter()
            .filter_map(|file| self.remove_all_tags(file.as_ref()))
            .collect()
    }
}

/// Input tags with repeats dropped, first occurrence wins
fn unique_tags<S: AsRef<str>>(tags: &[S]) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.as_ref();
        if !unique.iter().any(|t| t == tag) {
            unique.push(tag.to_string());
        }
    }
    unique
}
