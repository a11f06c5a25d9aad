//! Tag Index Module
//!
//! Maps each tag to the keys stored under it, and keeps a per-tag
//! generation counter that advances on every invalidation.

use std::collections::{HashMap, HashSet};

/// Generation of each tag at the moment a computation started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagSnapshot(Vec<(String, u64)>);

// == Tag Index ==
#[derive(Debug, Default)]
pub struct TagIndex {
    keys_by_tag: HashMap<String, HashSet<String>>,
    generations: HashMap<String, u64>,
}

impl TagIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `key` is stored under each of `tags`.
    pub fn attach(&mut self, key: &str, tags: &[String]) {
        for tag in tags {
            self.keys_by_tag
                .entry(tag.clone())
                .or_default()
                .insert(key.to_string());
        }
    }

    /// Forgets `key` under each of `tags`, dropping tags left empty.
    pub fn detach(&mut self, key: &str, tags: &[String]) {
        for tag in tags {
            if let Some(keys) = self.keys_by_tag.get_mut(tag) {
                keys.remove(key);
                if keys.is_empty() {
                    self.keys_by_tag.remove(tag);
                }
            }
        }
    }

    /// Removes every key listed under `tag` and advances its generation.
    ///
    /// The generation moves even when no key carries the tag, so a
    /// computation already in flight for that tag is still seen as stale.
    pub fn take(&mut self, tag: &str) -> HashSet<String> {
        *self.generations.entry(tag.to_string()).or_insert(0) += 1;
        self.keys_by_tag.remove(tag).unwrap_or_default()
    }

    pub fn generation(&self, tag: &str) -> u64 {
        self.generations.get(tag).copied().unwrap_or(0)
    }

    pub fn snapshot(&self, tags: &[String]) -> TagSnapshot {
        TagSnapshot(
            tags.iter()
                .map(|tag| (tag.clone(), self.generation(tag)))
                .collect(),
        )
    }

    /// True if none of the snapshot's tags were invalidated since it was taken.
    pub fn is_current(&self, snapshot: &TagSnapshot) -> bool {
        snapshot
            .0
            .iter()
            .all(|(tag, generation)| self.generation(tag) == *generation)
    }

    pub fn keys_for(&self, tag: &str) -> usize {
        self.keys_by_tag.get(tag).map_or(0, HashSet::len)
    }
}
