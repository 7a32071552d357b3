//! HTML attribute sets for menu links.

use std::collections::BTreeMap;
use std::collections::btree_map;

/// HTML attributes passed to the link renderer.
///
/// Keys are kept sorted so rendered markup is deterministic.
///
/// # Example
///
/// ```
/// use tabmenu::HtmlAttributes;
///
/// let base = HtmlAttributes::new().with("class", "tab").with("id", "home");
/// let selected = HtmlAttributes::new().with("class", "tab selected");
///
/// let merged = base.merged(&selected);
/// assert_eq!(merged.get("class"), Some("tab selected"));
/// assert_eq!(merged.get("id"), Some("home"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct HtmlAttributes(BTreeMap<String, String>);

impl HtmlAttributes {
    /// Create an empty attribute set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an attribute, consuming and returning the set.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert an attribute, returning the previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(name.into(), value.into())
    }

    /// Remove an attribute, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.0.remove(name)
    }

    /// Get an attribute value.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Number of attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate attributes in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Return a copy with `overlay` applied on top.
    ///
    /// Overlay entries win on key conflict.
    #[must_use]
    pub fn merged(&self, overlay: &HtmlAttributes) -> HtmlAttributes {
        let mut merged = self.clone();
        merged.extend(overlay.iter());
        merged
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for HtmlAttributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for HtmlAttributes {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.0.insert(k.into(), v.into());
        }
    }
}

impl<'a> IntoIterator for &'a HtmlAttributes {
    type Item = (&'a String, &'a String);
    type IntoIter = btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_merge_overlay_wins() {
        let base: HtmlAttributes = [("class", "tab"), ("title", "Home")].into_iter().collect();
        let overlay: HtmlAttributes = [("class", "tab active")].into_iter().collect();

        let merged = base.merged(&overlay);

        assert_eq!(
            merged,
            [("class", "tab active"), ("title", "Home")]
                .into_iter()
                .collect::<HtmlAttributes>()
        );
    }

    #[test]
    fn test_merge_leaves_inputs_untouched() {
        let base = HtmlAttributes::new().with("class", "tab");
        let overlay = HtmlAttributes::new().with("class", "selected");

        let _ = base.merged(&overlay);

        assert_eq!(base.get("class"), Some("tab"));
        assert_eq!(overlay.get("class"), Some("selected"));
    }

    #[test]
    fn test_iter_is_sorted_by_name() {
        let attrs = HtmlAttributes::new().with("title", "x").with("class", "y").with("id", "z");

        let names: Vec<&str> = attrs.iter().map(|(k, _)| k).collect();

        assert_eq!(names, vec!["class", "id", "title"]);
    }

    #[test]
    fn test_insert_and_remove() {
        let mut attrs = HtmlAttributes::new();
        assert!(attrs.is_empty());

        assert_eq!(attrs.insert("class", "tab"), None);
        assert_eq!(attrs.insert("class", "menu"), Some("tab".to_owned()));
        assert_eq!(attrs.len(), 1);
        assert_eq!(attrs.remove("class"), Some("menu".to_owned()));
        assert!(attrs.is_empty());
    }
}
