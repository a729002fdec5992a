//! Ordered rows with stable rendering keys.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque per-row rendering identity.
///
/// Assigned when a row is added and kept for as long as the row exists,
/// whatever happens to other rows. Keys are never reused by the array that
/// issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowKey(u64);

impl RowKey {
    /// Returns the raw counter value.
    #[must_use]
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row-{}", self.0)
    }
}

/// A row as seen by the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Row<'a, T> {
    /// Current position, used for error lookup and removal.
    pub index: usize,
    /// Stable rendering identity.
    pub key: RowKey,
    /// Row data.
    pub value: &'a T,
}

/// An ordered list of rows, each paired with a [`RowKey`].
///
/// Positions are never stored: they are recomputed on every iteration, so
/// removing a row shifts the positions of the rows after it while their keys
/// stay put. Operations given an out-of-range index do nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldArray<T> {
    rows: Vec<(RowKey, T)>,
    next_key: u64,
}

impl<T> Default for FieldArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FieldArray<T> {
    /// Creates an empty array.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            next_key: 0,
        }
    }

    fn issue_key(&mut self) -> RowKey {
        let key = RowKey(self.next_key);
        self.next_key += 1;
        key
    }

    /// Adds a row at the end and returns its key.
    pub fn append(&mut self, value: T) -> RowKey {
        let key = self.issue_key();
        self.rows.push((key, value));
        tracing::trace!(%key, len = self.rows.len(), "Row appended");
        key
    }

    /// Inserts a row before `index`; an index past the end appends.
    pub fn insert(&mut self, index: usize, value: T) -> RowKey {
        let key = self.issue_key();
        let at = index.min(self.rows.len());
        self.rows.insert(at, (key, value));
        key
    }

    /// Removes the row at `index` and returns its data.
    ///
    /// Returns `None` and leaves the array untouched when out of range.
    pub fn remove_at(&mut self, index: usize) -> Option<T> {
        if index >= self.rows.len() {
            tracing::trace!(index, len = self.rows.len(), "Ignoring out-of-range row removal");
            return None;
        }
        let (key, value) = self.rows.remove(index);
        tracing::trace!(%key, index, "Row removed");
        Some(value)
    }

    /// Swaps two rows, keys included.
    pub fn swap(&mut self, a: usize, b: usize) {
        if a < self.rows.len() && b < self.rows.len() {
            self.rows.swap(a, b);
        }
    }

    /// Moves the row at `from` so that it ends up at `to`.
    pub fn move_row(&mut self, from: usize, to: usize) {
        if from < self.rows.len() && to < self.rows.len() {
            let row = self.rows.remove(from);
            self.rows.insert(to, row);
        }
    }

    /// Replaces the data at `index`, keeping the key. Returns the old data.
    pub fn update(&mut self, index: usize, value: T) -> Option<T> {
        self.get_mut(index)
            .map(|slot| std::mem::replace(slot, value))
    }

    /// Returns the data at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.rows.get(index).map(|(_, value)| value)
    }

    /// Returns mutable access to the data at `index`.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.rows.get_mut(index).map(|(_, value)| value)
    }

    /// Returns the key of the row at `index`.
    #[must_use]
    pub fn key_at(&self, index: usize) -> Option<RowKey> {
        self.rows.get(index).map(|(key, _)| *key)
    }

    /// Returns the current position of the row with `key`.
    #[must_use]
    pub fn position_of(&self, key: RowKey) -> Option<usize> {
        self.rows.iter().position(|(k, _)| *k == key)
    }

    /// Iterates over rows with their current positions.
    pub fn iter(&self) -> impl Iterator<Item = Row<'_, T>> {
        self.rows
            .iter()
            .enumerate()
            .map(|(index, (key, value))| Row {
                index,
                key: *key,
                value,
            })
    }

    /// Iterates over the keys in order.
    pub fn keys(&self) -> impl Iterator<Item = RowKey> + '_ {
        self.rows.iter().map(|(key, _)| *key)
    }

    /// Iterates over the data in order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.rows.iter().map(|(_, value)| value)
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if there are no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Removes every row. Keys issued so far stay retired.
    pub fn clear(&mut self) {
        self.rows.clear();
    }
}

impl<T: Clone> FieldArray<T> {
    /// Copies the data out in order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.values().cloned().collect()
    }
}

impl<T> FromIterator<T> for FieldArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut array = Self::new();
        for value in iter {
            array.append(value);
        }
        array
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_append_then_remove_first_keeps_second_identity() {
        let mut array = FieldArray::new();
        let _first = array.append("first");
        let second = array.append("second");

        assert_eq!(array.remove_at(0), Some("first"));

        assert_eq!(array.len(), 1);
        assert_eq!(array.get(0), Some(&"second"));
        assert_eq!(array.key_at(0), Some(second));
    }

    #[test]
    fn test_remove_out_of_range_is_noop() {
        let mut array: FieldArray<u8> = [1, 2].into_iter().collect();
        let before = array.clone();

        assert_eq!(array.remove_at(2), None);
        assert_eq!(array.remove_at(usize::MAX), None);
        assert_eq!(array, before);
    }

    #[test]
    fn test_keys_never_reused() {
        let mut array = FieldArray::new();
        let a = array.append(1);
        array.remove_at(0);
        let b = array.append(2);
        array.clear();
        let c = array.append(3);

        assert_ne!(a, b);
        assert_ne!(b, c);
        assert_ne!(a, c);
        assert!(a < b && b < c);
    }

    #[test]
    fn test_iter_recomputes_positions() {
        let mut array: FieldArray<&str> = ["a", "b", "c"].into_iter().collect();
        let c_key = array.key_at(2).unwrap();
        array.remove_at(0);

        let rows: Vec<(usize, &str)> = array.iter().map(|row| (row.index, *row.value)).collect();
        assert_eq!(rows, vec![(0, "b"), (1, "c")]);
        assert_eq!(array.position_of(c_key), Some(1));
        assert_eq!(array.keys().count(), array.len());
    }

    #[test]
    fn test_insert_clamps_to_end() {
        let mut array: FieldArray<u8> = [1, 3].into_iter().collect();
        array.insert(1, 2);
        array.insert(99, 4);
        assert_eq!(array.to_vec(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_swap_and_move_keep_keys_with_data() {
        let mut array: FieldArray<char> = ['a', 'b', 'c'].into_iter().collect();
        let a_key = array.key_at(0).unwrap();

        array.swap(0, 2);
        assert_eq!(array.to_vec(), vec!['c', 'b', 'a']);
        assert_eq!(array.position_of(a_key), Some(2));

        array.move_row(2, 0);
        assert_eq!(array.to_vec(), vec!['a', 'c', 'b']);
        assert_eq!(array.key_at(0), Some(a_key));

        array.swap(0, 5);
        array.move_row(7, 0);
        assert_eq!(array.to_vec(), vec!['a', 'c', 'b']);
    }

    #[test]
    fn test_update_keeps_key() {
        let mut array = FieldArray::new();
        let key = array.append(String::from("old"));

        assert_eq!(array.update(0, String::from("new")), Some(String::from("old")));
        assert_eq!(array.key_at(0), Some(key));
        assert_eq!(array.update(1, String::from("x")), None);
        assert_eq!(array.len(), 1);
    }

    #[test]
    fn test_row_key_display() {
        let mut array = FieldArray::new();
        array.append(());
        let key = array.append(());
        assert_eq!(key.to_string(), "row-1");
        assert_eq!(key.as_u64(), 1);
    }
}
