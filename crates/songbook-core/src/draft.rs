//! Unvalidated song input.
//!
//! A [`SongDraft`] is what a caller has before validation: raw strings and
//! integers, typically read from a TOML document such as
//!
//! ```toml
//! title = "Imagine"
//! artist = "John Lennon"
//! duration_secs = 183
//! rating = 5
//! tags = ["Classic", "Piano"]
//! ```
//!
//! [`SongDraft::build`] turns it into a [`Song`] or reports why it cannot.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;
use crate::model::{IdAllocator, Song};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongDraft {
    pub title: String,
    pub artist: String,
    pub duration_secs: i64,
    pub rating: i64,

    /// Tags in the order they should be added.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl SongDraft {
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<String>,
        duration_secs: i64,
        rating: i64,
    ) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            duration_secs,
            rating,
            tags: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Parse a draft from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Read and parse a draft from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let draft = Self::from_toml_str(&content)?;
        log::debug!("Loaded song draft from {}", path.display());
        Ok(draft)
    }

    /// Validate every field, then every tag, and only then number the
    /// song from `ids`. Nothing is consumed from `ids` on failure.
    pub fn build(&self, ids: &IdAllocator) -> Result<Song> {
        Ok(Song::create(
            ids,
            &self.title,
            &self.artist,
            self.duration_secs,
            self.rating,
            &self.tags,
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, ValidationError};

    #[test]
    fn test_draft_builder() {
        let draft = SongDraft::new("Imagine", "John Lennon", 183, 5)
            .with_tag("Classic")
            .with_tag("Piano");
        assert_eq!(draft.tags, vec!["Classic", "Piano"]);
    }

    #[test]
    fn test_from_toml_str() {
        let draft = SongDraft::from_toml_str(
            r#"
title = " Imagine "
artist = "John Lennon"
duration_secs = 183
rating = 5
tags = ["Classic"]
"#,
        )
        .unwrap();

        assert_eq!(draft.title, " Imagine ");
        assert_eq!(draft.tags, vec!["Classic"]);
    }

    #[test]
    fn test_tags_default_to_empty() {
        let draft = SongDraft::from_toml_str(
            "title = \"A\"\nartist = \"B\"\nduration_secs = 1\nrating = 1\n",
        )
        .unwrap();
        assert!(draft.tags.is_empty());
    }

    #[test]
    fn test_from_toml_str_missing_field() {
        let result = SongDraft::from_toml_str("title = \"A\"\n");
        assert!(matches!(result, Err(Error::Parse(_))));
    }

    #[test]
    fn test_build() {
        let ids = IdAllocator::new();
        let song = SongDraft::new(" Imagine", "John Lennon ", 183, 5)
            .with_tag("Classic")
            .build(&ids)
            .unwrap();

        assert_eq!(
            song.to_string(),
            "[#1] John Lennon - Imagine (183s) ***** [tags: Classic]"
        );
    }

    #[test]
    fn test_build_rejects_field_before_tags() {
        let ids = IdAllocator::new();
        let result = SongDraft::new("Imagine", "John Lennon", 183, 0)
            .with_tag(" ")
            .build(&ids);

        assert!(matches!(
            result,
            Err(Error::Validation(ValidationError::RatingOutOfRange(0)))
        ));
        assert_eq!(ids.peek().get(), 1);
    }

    #[test]
    fn test_build_rejects_duplicate_tag() {
        let ids = IdAllocator::new();
        let result = SongDraft::new("Imagine", "John Lennon", 183, 5)
            .with_tag("Piano")
            .with_tag("PIANO")
            .build(&ids);

        assert!(matches!(
            result,
            Err(Error::Validation(ValidationError::DuplicateTag(_)))
        ));
        assert_eq!(ids.peek().get(), 1);
    }
}
