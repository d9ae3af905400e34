//! Size-keyed maps with case-insensitive lookup.

use serde::{Deserialize, Serialize};

/// An ordered map from size label to a value.
///
/// Labels keep the spelling they arrived with; lookups trim and compare
/// case-insensitively, so `"m"`, `" M "` and `"M"` name the same size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SizeMap<T> {
    entries: Vec<(String, T)>,
}

impl<T> Default for SizeMap<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> SizeMap<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the value for `label`.
    ///
    /// A label that matches an existing one case-insensitively replaces its
    /// value but keeps the original spelling and position.
    pub fn insert(&mut self, label: impl Into<String>, value: T) {
        let label = label.into();
        let trimmed = label.trim();
        if trimmed.is_empty() {
            return;
        }
        match self.position(trimmed) {
            Some(idx) => self.entries[idx].1 = value,
            None => self.entries.push((trimmed.to_string(), value)),
        }
    }

    /// Look up a size, ignoring case and surrounding whitespace.
    pub fn get(&self, label: &str) -> Option<&T> {
        self.position(label.trim()).map(|idx| &self.entries[idx].1)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.get(label).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(label, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(|(_, v)| v)
    }

    fn position(&self, label: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|(k, _)| k.eq_ignore_ascii_case(label))
    }
}

impl<T, K: Into<String>> FromIterator<(K, T)> for SizeMap<T> {
    fn from_iter<I: IntoIterator<Item = (K, T)>>(iter: I) -> Self {
        let mut map = SizeMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

/// Case-insensitive equality for colour and size labels.
pub(crate) fn same_label(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_ignores_case_and_whitespace() {
        let map: SizeMap<i64> = [("M", 3), ("XL", 0)].into_iter().collect();
        assert_eq!(map.get("m"), Some(&3));
        assert_eq!(map.get(" xl "), Some(&0));
        assert_eq!(map.get("L"), None);
    }

    #[test]
    fn test_insert_replaces_case_insensitive_duplicate() {
        let mut map = SizeMap::new();
        map.insert("s", 1);
        map.insert("M", 2);
        map.insert("S", 5);

        assert_eq!(map.len(), 2);
        assert_eq!(map.iter().collect::<Vec<_>>(), vec![("s", &5), ("M", &2)]);
    }

    #[test]
    fn test_blank_labels_are_dropped() {
        let map: SizeMap<i64> = [("  ", 4), ("", 1)].into_iter().collect();
        assert!(map.is_empty());
    }

    #[test]
    fn test_same_label() {
        assert!(same_label("Red ", "red"));
        assert!(!same_label("Red", "Rose"));
    }
}
