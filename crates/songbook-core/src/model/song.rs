use chrono::{DateTime, Utc};
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use std::iter;

use crate::error::ValidationError;
use crate::model::ids::{IdAllocator, SongId};
use crate::model::tags::TagList;
use crate::validate;

/// A single entry in the song catalog.
///
/// A `Song` can only be obtained through validated construction, so every
/// instance has a non-blank title and artist, a positive duration and a
/// rating between 1 and 5. Setters and tag operations either apply their
/// change completely or leave the entry untouched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Song {
    id: SongId,
    title: String,
    artist: String,
    duration_secs: u64,
    rating: u8,
    tags: TagList,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Song {
    /// Validate the fields and number the new entry from the process-wide
    /// allocator.
    ///
    /// Title and artist are trimmed. Checks run in order (title, artist,
    /// duration, rating) and stop at the first failure, which does not
    /// consume an id.
    pub fn new(
        title: &str,
        artist: &str,
        duration_secs: i64,
        rating: i64,
    ) -> Result<Self, ValidationError> {
        Self::with_allocator(IdAllocator::global(), title, artist, duration_secs, rating)
    }

    /// Like [`Song::new`], drawing the id from `ids`.
    pub fn with_allocator(
        ids: &IdAllocator,
        title: &str,
        artist: &str,
        duration_secs: i64,
        rating: i64,
    ) -> Result<Self, ValidationError> {
        Self::create(ids, title, artist, duration_secs, rating, &[])
    }

    /// Validate fields, then tags, and only then take an id.
    pub(crate) fn create(
        ids: &IdAllocator,
        title: &str,
        artist: &str,
        duration_secs: i64,
        rating: i64,
        tags: &[String],
    ) -> Result<Self, ValidationError> {
        let title = validate::title(title).map_err(|e| rejected("Rejected song", e))?;
        let artist = validate::artist(artist).map_err(|e| rejected("Rejected song", e))?;
        let duration_secs =
            validate::duration(duration_secs).map_err(|e| rejected("Rejected song", e))?;
        let rating = validate::rating(rating).map_err(|e| rejected("Rejected song", e))?;

        let mut tag_list = TagList::new();
        for tag in tags {
            tag_list
                .insert(tag)
                .map_err(|e| rejected("Rejected song", e))?;
        }

        let id = ids.allocate();
        log::debug!("Created song #{}: {} - {}", id, artist, title);

        let now = Utc::now();
        Ok(Self {
            id,
            title,
            artist,
            duration_secs,
            rating,
            tags: tag_list,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn id(&self) -> SongId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn artist(&self) -> &str {
        &self.artist
    }

    pub fn duration_secs(&self) -> u64 {
        self.duration_secs
    }

    pub fn rating(&self) -> u8 {
        self.rating
    }

    pub fn tags(&self) -> &TagList {
        &self.tags
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// When the entry last changed. Failed mutations leave this alone.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// The rating rendered as one `*` per point.
    pub fn stars(&self) -> String {
        "*".repeat(usize::from(self.rating))
    }

    pub fn set_title(&mut self, title: &str) -> Result<(), ValidationError> {
        self.title = validate::title(title).map_err(|e| rejected("Ignoring title change", e))?;
        self.touch();
        Ok(())
    }

    pub fn set_artist(&mut self, artist: &str) -> Result<(), ValidationError> {
        self.artist =
            validate::artist(artist).map_err(|e| rejected("Ignoring artist change", e))?;
        self.touch();
        Ok(())
    }

    pub fn set_duration(&mut self, secs: i64) -> Result<(), ValidationError> {
        self.duration_secs =
            validate::duration(secs).map_err(|e| rejected("Ignoring duration change", e))?;
        self.touch();
        Ok(())
    }

    pub fn set_rating(&mut self, rating: i64) -> Result<(), ValidationError> {
        self.rating =
            validate::rating(rating).map_err(|e| rejected("Ignoring rating change", e))?;
        self.touch();
        Ok(())
    }

    /// Append a tag. Blank tags and tags already present (ignoring case)
    /// are refused.
    pub fn add_tag(&mut self, tag: &str) -> Result<(), ValidationError> {
        self.tags
            .insert(tag)
            .map_err(|e| rejected("Ignoring tag", e))?;
        self.touch();
        Ok(())
    }

    /// Remove the first tag matching `tag` ignoring case, returning it as
    /// stored.
    pub fn remove_tag(&mut self, tag: &str) -> Result<String, ValidationError> {
        let removed = self
            .tags
            .remove(tag)
            .map_err(|e| rejected("Ignoring tag removal", e))?;
        self.touch();
        Ok(removed)
    }

    /// Case-insensitive substring search over title, artist and tags.
    ///
    /// A blank keyword never matches.
    pub fn matches_keyword(&self, keyword: &str) -> bool {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return false;
        }
        let needle = validate::fold(keyword);

        iter::once(self.title.as_str())
            .chain(iter::once(self.artist.as_str()))
            .chain(self.tags.iter())
            .any(|field| validate::fold(field).contains(&needle))
    }

    /// Catalog order: rating descending, then title ascending, then id
    /// ascending. Suitable for `sort_by`.
    pub fn catalog_cmp(&self, other: &Self) -> Ordering {
        other
            .rating
            .cmp(&self.rating)
            .then_with(|| self.title.cmp(&other.title))
            .then_with(|| self.id.cmp(&other.id))
    }

    /// Pretty-printed JSON form of the entry.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
        log::debug!("Updated song #{}", self.id);
    }
}

impl fmt::Display for Song {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[#{}] {} - {} ({}s) {}",
            self.id,
            self.artist,
            self.title,
            self.duration_secs,
            self.stars()
        )?;
        if !self.tags.is_empty() {
            write!(f, " [tags: {}]", self.tags)?;
        }
        Ok(())
    }
}

fn rejected(action: &str, err: ValidationError) -> ValidationError {
    log::warn!("{}: {}", action, err);
    err
}
