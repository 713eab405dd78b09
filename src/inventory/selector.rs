//! Ring-buffer selection list with per-key quantities.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectorError {
    #[error("a selector needs at least one key")]
    Empty,

    #[error("key not in selector: {0}")]
    UnknownKey(String),

    #[error("cannot remove the last remaining key: {0}")]
    LastKey(String),
}

/// An ordered list of distinct keys with a wrapping cursor and a signed
/// quantity per key.
///
/// Moving the cursor never touches quantities, and quantities are never
/// clamped: debiting past zero is allowed and shows up as a negative count.
#[derive(Debug, Clone)]
pub struct CyclicSelector<K> {
    keys: Vec<K>,
    cursor: usize,
    quantities: HashMap<K, i32>,
}

impl<K: Eq + Hash> PartialEq for CyclicSelector<K> {
    fn eq(&self, other: &Self) -> bool {
        self.keys == other.keys && self.cursor == other.cursor && self.quantities == other.quantities
    }
}

impl<K: Eq + Hash> Eq for CyclicSelector<K> {}

impl<K: Clone + Eq + Hash + Debug> CyclicSelector<K> {
    /// Builds a selector from a non-empty sequence. Every key starts with a
    /// quantity of 1; repeated keys are kept once.
    pub fn new(keys: impl IntoIterator<Item = K>) -> Result<Self, SelectorError> {
        let mut keys = keys.into_iter();
        let first = keys.next().ok_or(SelectorError::Empty)?;
        Ok(Self::from_first(first, keys))
    }

    /// Infallible constructor for when the first key is known up front.
    pub fn from_first(first: K, rest: impl IntoIterator<Item = K>) -> Self {
        let mut selector = Self {
            keys: Vec::new(),
            cursor: 0,
            quantities: HashMap::new(),
        };
        for key in std::iter::once(first).chain(rest) {
            if selector.append(key.clone()) {
                selector.quantities.insert(key, 1);
            }
        }
        selector
    }

    pub fn selected(&self) -> &K {
        &self.keys[self.cursor]
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.quantities.contains_key(key)
    }

    pub fn quantity(&self, key: &K) -> Option<i32> {
        self.quantities.get(key).copied()
    }

    pub fn selected_quantity(&self) -> i32 {
        self.quantities.get(self.selected()).copied().unwrap_or(0)
    }

    /// Advances the cursor, wrapping from the last key to the first.
    pub fn select_next(&mut self) -> &K {
        self.cursor = (self.cursor + 1) % self.keys.len();
        self.selected()
    }

    /// Moves the cursor back, wrapping from the first key to the last.
    pub fn select_previous(&mut self) -> &K {
        self.cursor = (self.cursor + self.keys.len() - 1) % self.keys.len();
        self.selected()
    }

    /// Moves the cursor onto `key`. Returns false when the key is absent.
    pub fn select(&mut self, key: &K) -> bool {
        match self.keys.iter().position(|k| k == key) {
            Some(index) => {
                self.cursor = index;
                true
            }
            None => false,
        }
    }

    /// Appends `key` at the end with quantity 0. Returns false (and changes
    /// nothing) when the key is already present.
    pub fn append(&mut self, key: K) -> bool {
        if self.quantities.contains_key(&key) {
            return false;
        }
        self.quantities.insert(key.clone(), 0);
        self.keys.push(key);
        true
    }

    /// Removes `key` and returns its last quantity.
    ///
    /// The selected key stays selected when it is not the one removed. When it
    /// is, the cursor stays on the same index, clamped to the new last key.
    pub fn remove(&mut self, key: &K) -> Result<i32, SelectorError> {
        let index = self
            .keys
            .iter()
            .position(|k| k == key)
            .ok_or_else(|| SelectorError::UnknownKey(format!("{key:?}")))?;
        if self.keys.len() == 1 {
            return Err(SelectorError::LastKey(format!("{key:?}")));
        }

        self.keys.remove(index);
        if index < self.cursor {
            self.cursor -= 1;
        }
        self.cursor = self.cursor.min(self.keys.len() - 1);
        Ok(self.quantities.remove(key).unwrap_or(0))
    }

    /// Adds `delta` to `key`'s quantity, appending the key first if it is
    /// unknown. Returns the new quantity.
    pub fn update(&mut self, key: &K, delta: i32) -> i32 {
        self.append(key.clone());
        let quantity = self.quantities.entry(key.clone()).or_insert(0);
        *quantity += delta;
        *quantity
    }

    pub fn update_selected(&mut self, delta: i32) -> i32 {
        let key = self.selected().clone();
        self.update(&key, delta)
    }

    /// Overwrites `key`'s quantity, appending the key first if it is unknown.
    pub fn set(&mut self, key: &K, value: i32) {
        self.append(key.clone());
        self.quantities.insert(key.clone(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tools() -> CyclicSelector<&'static str> {
        CyclicSelector::new(["hoe", "axe", "water"]).unwrap()
    }

    #[test]
    fn test_new_rejects_empty_sequence() {
        let empty: Vec<&str> = Vec::new();
        assert_eq!(CyclicSelector::new(empty), Err(SelectorError::Empty));
    }

    #[test]
    fn test_equality_covers_cursor_and_quantities() {
        let mut a = tools();
        let b = tools();
        assert_eq!(a, b);
        a.select_next();
        assert_ne!(a, b);
        a.select_previous();
        a.update(&"axe", -1);
        assert_ne!(a, b);
        a.update(&"axe", 1);
        assert_eq!(a, b);
    }

    #[test]
    fn test_initial_keys_start_at_one() {
        let sel = tools();
        assert_eq!(sel.selected(), &"hoe");
        assert_eq!(sel.quantity(&"axe"), Some(1));
        assert_eq!(sel.len(), 3);
    }

    #[test]
    fn test_duplicate_initial_keys_kept_once() {
        let sel = CyclicSelector::new(["a", "b", "a"]).unwrap();
        assert_eq!(sel.keys(), &["a", "b"]);
    }

    #[test]
    fn test_next_and_previous_wrap() {
        let mut sel = tools();
        assert_eq!(sel.select_previous(), &"water");
        assert_eq!(sel.select_next(), &"hoe");
        sel.select_next();
        sel.select_next();
        assert_eq!(sel.select_next(), &"hoe");
    }

    #[test]
    fn test_update_unknown_key_appends_with_zero_first() {
        let mut sel = tools();
        assert_eq!(sel.update(&"apple", 2), 2);
        assert_eq!(sel.keys().last(), Some(&"apple"));
        // Cursor did not move.
        assert_eq!(sel.selected(), &"hoe");
    }

    #[test]
    fn test_update_may_go_negative() {
        let mut sel = tools();
        assert_eq!(sel.update_selected(-3), -2);
        assert_eq!(sel.quantity(&"hoe"), Some(-2));
    }

    #[test]
    fn test_set_overwrites_and_appends() {
        let mut sel = tools();
        sel.set(&"axe", 9);
        sel.set(&"corn", 5);
        assert_eq!(sel.quantity(&"axe"), Some(9));
        assert_eq!(sel.quantity(&"corn"), Some(5));
        assert_eq!(sel.len(), 4);
    }

    #[test]
    fn test_append_existing_is_noop() {
        let mut sel = tools();
        sel.set(&"axe", 4);
        assert!(!sel.append("axe"));
        assert_eq!(sel.quantity(&"axe"), Some(4));
        assert_eq!(sel.len(), 3);
    }

    #[test]
    fn test_remove_unknown_key_fails() {
        let mut sel = tools();
        assert!(matches!(sel.remove(&"sword"), Err(SelectorError::UnknownKey(_))));
    }

    #[test]
    fn test_remove_last_key_fails() {
        let mut sel = CyclicSelector::new(["only"]).unwrap();
        assert!(matches!(sel.remove(&"only"), Err(SelectorError::LastKey(_))));
        assert_eq!(sel.selected(), &"only");
    }

    #[test]
    fn test_remove_keeps_selection_stable() {
        let mut sel = tools();
        sel.select_next();
        sel.select_next(); // water
        assert_eq!(sel.remove(&"hoe"), Ok(1));
        assert_eq!(sel.selected(), &"water");
    }

    #[test]
    fn test_remove_selected_tail_clamps_cursor() {
        let mut sel = tools();
        sel.select_previous(); // water, the last key
        sel.remove(&"water").unwrap();
        assert_eq!(sel.cursor(), 1);
        assert_eq!(sel.selected(), &"axe");
        assert_eq!(sel.quantity(&"water"), None);
    }

    #[test]
    fn test_select_by_key() {
        let mut sel = tools();
        assert!(sel.select(&"water"));
        assert_eq!(sel.cursor(), 2);
        assert!(!sel.select(&"sword"));
        assert_eq!(sel.cursor(), 2);
    }
}
