//! Core catalog entry model for songbook.
//!
//! This crate defines the [`Song`] entity (validated metadata, free-form
//! tags, keyword matching, display and catalog ordering), the id allocator
//! that numbers entries, and [`SongDraft`], the unvalidated input form that
//! can be read from TOML.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod draft;
pub mod error;
pub mod model;
pub mod validate;

pub use draft::SongDraft;
pub use error::{Error, Result, ValidationError};
pub use model::{IdAllocator, Song, SongId, TagList};
