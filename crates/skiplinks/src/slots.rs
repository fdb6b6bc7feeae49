//! Content slots.
//!
//! A view can fill named slots with its own markup. The renderer looks them
//! up through [`SlotLookup`] before falling back to defaults.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// Slot holding a page's own skip links markup.
pub const SKIP_LINKS_SLOT: &str = "skip_links";

/// Slot overriding the text of the "skip to content" link.
pub const CONTENT_SKIP_LINK_TEXT_SLOT: &str = "content_skip_link_text";

/// Named content lookup supplied by the host application.
pub trait SlotLookup {
    /// Content registered under `key`, if any.
    fn lookup(&self, key: &str) -> Option<String>;

    /// Whether content is registered under `key`.
    fn contains(&self, key: &str) -> bool {
        self.lookup(key).is_some()
    }

    /// Content under `key`, treating blank content as absent.
    fn present(&self, key: &str) -> Option<String> {
        self.lookup(key).filter(|content| !content.trim().is_empty())
    }
}

impl<T: SlotLookup + ?Sized> SlotLookup for &T {
    fn lookup(&self, key: &str) -> Option<String> {
        (**self).lookup(key)
    }

    fn contains(&self, key: &str) -> bool {
        (**self).contains(key)
    }
}

impl<S: BuildHasher> SlotLookup for HashMap<String, String, S> {
    fn lookup(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }

    fn contains(&self, key: &str) -> bool {
        self.contains_key(key)
    }
}

impl SlotLookup for BTreeMap<String, String> {
    fn lookup(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }

    fn contains(&self, key: &str) -> bool {
        self.contains_key(key)
    }
}

/// A lookup with every slot empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoSlots;

impl SlotLookup for NoSlots {
    fn lookup(&self, _key: &str) -> Option<String> {
        None
    }
}

/// An in-memory slot store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentSlots {
    slots: BTreeMap<String, String>,
}

impl ContentSlots {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`ContentSlots::set`].
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, content: impl Into<String>) -> Self {
        self.set(key, content);
        self
    }

    /// Fill a slot, returning its previous content.
    pub fn set(&mut self, key: impl Into<String>, content: impl Into<String>) -> Option<String> {
        self.slots.insert(key.into(), content.into())
    }

    /// Borrow a slot's content.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.slots.get(key).map(String::as_str)
    }

    /// Number of filled slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether no slot is filled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl SlotLookup for ContentSlots {
    fn lookup(&self, key: &str) -> Option<String> {
        self.slots.get(key).cloned()
    }

    fn contains(&self, key: &str) -> bool {
        self.slots.contains_key(key)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ContentSlots {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            slots: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
