use serde::Serialize;
use std::fmt;

use crate::error::ValidationError;
use crate::validate;

/// Free-form tags attached to a song.
///
/// Tags keep the casing they were added with and their insertion order,
/// but two tags that differ only in case cannot coexist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TagList(Vec<String>);

impl TagList {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Append a trimmed tag unless it is blank or already present
    /// ignoring case.
    pub fn insert(&mut self, raw: &str) -> Result<(), ValidationError> {
        let tag = validate::tag(raw)?;
        if self.position(&validate::fold(&tag)).is_some() {
            return Err(ValidationError::DuplicateTag(tag));
        }
        self.0.push(tag);
        Ok(())
    }

    /// Remove the first tag equal to `raw` ignoring case and surrounding
    /// whitespace. Returns the tag as it was stored.
    pub fn remove(&mut self, raw: &str) -> Result<String, ValidationError> {
        let wanted = raw.trim();
        match self.position(&validate::fold(wanted)) {
            Some(index) => Ok(self.0.remove(index)),
            None => Err(ValidationError::TagNotFound(wanted.to_string())),
        }
    }

    /// Whether a tag equal to `raw` ignoring case is present.
    pub fn contains(&self, raw: &str) -> bool {
        self.position(&validate::fold(raw.trim())).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn position(&self, folded: &str) -> Option<usize> {
        self.0.iter().position(|t| validate::fold(t) == folded)
    }
}

impl fmt::Display for TagList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(", "))
    }
}

impl<'a> IntoIterator for &'a TagList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(values: &[&str]) -> TagList {
        let mut list = TagList::new();
        for value in values {
            list.insert(value).unwrap();
        }
        list
    }

    #[test]
    fn test_insert_trims_and_keeps_order() {
        let list = tags(&["  Rock ", "Classic", "70s"]);
        assert_eq!(list.as_slice(), ["Rock", "Classic", "70s"]);
    }

    #[test]
    fn test_insert_rejects_case_insensitive_duplicate() {
        let mut list = tags(&["Rock"]);
        assert_eq!(
            list.insert(" ROCK "),
            Err(ValidationError::DuplicateTag("ROCK".to_string()))
        );
        assert_eq!(list.as_slice(), ["Rock"]);
    }

    #[test]
    fn test_insert_rejects_blank() {
        let mut list = TagList::new();
        assert_eq!(list.insert("   "), Err(ValidationError::EmptyTag));
        assert!(list.is_empty());
    }

    #[test]
    fn test_remove_ignores_case_and_preserves_order() {
        let mut list = tags(&["Pop", "Rock", "Live"]);
        assert_eq!(list.remove(" rock").unwrap(), "Rock");
        assert_eq!(list.as_slice(), ["Pop", "Live"]);
    }

    #[test]
    fn test_remove_missing_tag() {
        let mut list = tags(&["Pop"]);
        assert_eq!(
            list.remove("jazz"),
            Err(ValidationError::TagNotFound("jazz".to_string()))
        );
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_contains() {
        let list = tags(&["Singer-Songwriter"]);
        assert!(list.contains("singer-songwriter"));
        assert!(!list.contains("singer"));
    }

    #[test]
    fn test_display_joins_with_comma() {
        assert_eq!(tags(&["a", "B", "c"]).to_string(), "a, B, c");
        assert_eq!(TagList::new().to_string(), "");
    }
}
