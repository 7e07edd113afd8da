//! Grouped key-value data model.
//!
//! A [`GroupedKeyValueTree`] is an ordered list of named [`KvpGroup`]s, each
//! holding an ordered list of [`KvpElement`] key/value pairs. Order is
//! insertion order and doubles as display order.
//!
//! The model itself performs no validation. Uniqueness of group names and of
//! keys within a group is maintained by whoever mutates the tree (normally the
//! grid controller, which looks up before inserting).

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single key/value pair within a group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KvpElement {
    pub key: String,
    pub value: String,
}

impl KvpElement {
    /// Create a new element.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A named, ordered collection of key/value pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KvpGroup {
    pub name: String,
    #[serde(default)]
    pub elements: Vec<KvpElement>,
}

impl KvpGroup {
    /// Create an empty group.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            elements: Vec::new(),
        }
    }

    /// Find the element with the given key.
    pub fn element(&self, key: &str) -> Option<&KvpElement> {
        self.elements.iter().find(|e| e.key == key)
    }

    /// Find the element with the given key for modification.
    pub fn element_mut(&mut self, key: &str) -> Option<&mut KvpElement> {
        self.elements.iter_mut().find(|e| e.key == key)
    }

    /// Position of the element with the given key.
    pub fn element_position(&self, key: &str) -> Option<usize> {
        self.elements.iter().position(|e| e.key == key)
    }

    /// Value stored under `key`, if present.
    pub fn value(&self, key: &str) -> Option<&str> {
        self.element(key).map(|e| e.value.as_str())
    }

    /// Returns true if the group has no elements.
    ///
    /// Empty groups exist in the model but occupy no space in the layout.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Number of elements in the group.
    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }
}

/// Root of the grouped key-value hierarchy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupedKeyValueTree {
    #[serde(default)]
    pub groups: Vec<KvpGroup>,
}

impl GroupedKeyValueTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Find the group with the given name.
    pub fn group(&self, name: &str) -> Option<&KvpGroup> {
        self.groups.iter().find(|g| g.name == name)
    }

    /// Find the group with the given name for modification.
    pub fn group_mut(&mut self, name: &str) -> Option<&mut KvpGroup> {
        self.groups.iter_mut().find(|g| g.name == name)
    }

    /// Position of the group with the given name.
    pub fn group_position(&self, name: &str) -> Option<usize> {
        self.groups.iter().position(|g| g.name == name)
    }

    /// Value stored under `group`/`key`, if present.
    pub fn value(&self, group: &str, key: &str) -> Option<&str> {
        self.group(group).and_then(|g| g.value(key))
    }

    /// Iterate over the groups in display order.
    pub fn iter(&self) -> std::slice::Iter<'_, KvpGroup> {
        self.groups.iter()
    }

    /// Returns true if the tree has no groups.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of groups, including empty ones.
    #[inline]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Total number of elements across all groups.
    pub fn element_count(&self) -> usize {
        self.groups.iter().map(KvpGroup::len).sum()
    }

    /// Remove every group.
    pub fn clear(&mut self) {
        self.groups.clear();
    }

    /// The key with the greatest character count across all groups.
    ///
    /// Ties keep the first key encountered in tree order. Returns `None`
    /// when no group has any elements.
    pub fn longest_key(&self) -> Option<&str> {
        let mut longest: Option<(&str, usize)> = None;
        for element in self.groups.iter().flat_map(|g| g.elements.iter()) {
            let len = element.key.chars().count();
            match longest {
                Some((_, best)) if len <= best => {}
                _ => longest = Some((element.key.as_str(), len)),
            }
        }
        longest.map(|(key, _)| key)
    }
}

impl<'a> IntoIterator for &'a GroupedKeyValueTree {
    type Item = &'a KvpGroup;
    type IntoIter = std::slice::Iter<'a, KvpGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

/// Renders the tree as an INI-style dump:
///
/// ```text
/// [Settings]
/// Theme = Dark
/// ```
impl fmt::Display for GroupedKeyValueTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for group in &self.groups {
            writeln!(f, "[{}]", group.name)?;
            for element in &group.elements {
                writeln!(f, "{} = {}", element.key, element.value)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> GroupedKeyValueTree {
        GroupedKeyValueTree {
            groups: vec![
                KvpGroup {
                    name: "Settings".into(),
                    elements: vec![
                        KvpElement::new("Theme", "Dark"),
                        KvpElement::new("Language", "en-US"),
                    ],
                },
                KvpGroup::new("Empty"),
                KvpGroup {
                    name: "Network".into(),
                    elements: vec![KvpElement::new("Timeout", "30s")],
                },
            ],
        }
    }

    #[test]
    fn test_lookup() {
        let tree = sample();
        assert_eq!(tree.group_position("Network"), Some(2));
        assert_eq!(tree.value("Settings", "Language"), Some("en-US"));
        assert_eq!(tree.value("Settings", "Missing"), None);
        assert!(tree.group("settings").is_none());
        assert_eq!(tree.element_count(), 3);
    }

    #[test]
    fn test_longest_key_first_wins_on_tie() {
        let mut tree = sample();
        assert_eq!(tree.longest_key(), Some("Language"));

        tree.groups[2].elements.push(KvpElement::new("Hostname", ""));
        assert_eq!(tree.longest_key(), Some("Language"));
    }

    #[test]
    fn test_longest_key_counts_characters() {
        let tree = GroupedKeyValueTree {
            groups: vec![KvpGroup {
                name: "g".into(),
                elements: vec![KvpElement::new("äöü", ""), KvpElement::new("abcd", "")],
            }],
        };
        assert_eq!(tree.longest_key(), Some("abcd"));
    }

    #[test]
    fn test_longest_key_empty() {
        let mut tree = GroupedKeyValueTree::new();
        assert_eq!(tree.longest_key(), None);
        tree.groups.push(KvpGroup::new("Only"));
        assert_eq!(tree.longest_key(), None);
    }

    #[test]
    fn test_display_ini_dump() {
        let text = sample().to_string();
        assert_eq!(
            text,
            "[Settings]\nTheme = Dark\nLanguage = en-US\n[Empty]\n[Network]\nTimeout = 30s\n"
        );
    }

    #[test]
    fn test_serde_snapshot() {
        let tree = sample();
        let json = serde_json::to_string(&tree).unwrap();
        let back: GroupedKeyValueTree = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tree);

        let minimal: GroupedKeyValueTree =
            serde_json::from_str(r#"{"groups":[{"name":"G"}]}"#).unwrap();
        assert!(minimal.groups[0].is_empty());
    }
}
