use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::path::Path;

use songbook_core::{IdAllocator, Song, SongDraft};

/// How an entry is printed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Output {
    pub keyword: Option<String>,
    pub json: bool,
}

impl Output {
    #[must_use]
    pub fn new(keyword: Option<String>, json: bool) -> Self {
        Self { keyword, json }
    }
}

/// Build an entry from command line values and print it.
pub fn run_new(draft: &SongDraft, output: &Output) -> Result<()> {
    let song = draft.build(IdAllocator::global()).context("Song rejected")?;
    print!("{}", render(&song, output)?);
    Ok(())
}

/// Build an entry from a TOML file and print it.
pub fn run_load(path: &Path, output: &Output) -> Result<()> {
    log::info!("Loading song from {}", path.display());

    let draft = SongDraft::load(path)
        .with_context(|| format!("Failed to load song from {}", path.display()))?;
    let song = draft
        .build(IdAllocator::global())
        .with_context(|| format!("Song in {} rejected", path.display()))?;

    print!("{}", render(&song, output)?);
    Ok(())
}

fn render(song: &Song, output: &Output) -> Result<String> {
    let mut text = if output.json {
        song.to_json().context("Failed to serialize song")?
    } else {
        song.to_string()
    };
    text.push('\n');

    if let Some(keyword) = &output.keyword {
        let verdict = if song.matches_keyword(keyword) {
            "matches"
        } else {
            "does not match"
        };
        writeln!(text, "#{} {} keyword \"{}\"", song.id(), verdict, keyword.trim())?;
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn imagine(ids: &IdAllocator) -> Song {
        SongDraft::new("Imagine", "John Lennon", 183, 5)
            .with_tag("Piano")
            .build(ids)
            .unwrap()
    }

    #[test]
    fn test_render_text() {
        let ids = IdAllocator::new();
        let text = render(&imagine(&ids), &Output::default()).unwrap();
        assert_eq!(
            text,
            "[#1] John Lennon - Imagine (183s) ***** [tags: Piano]\n"
        );
    }

    #[test]
    fn test_render_with_keyword() {
        let ids = IdAllocator::new();
        let song = imagine(&ids);

        let hit = render(&song, &Output::new(Some(" piano ".to_string()), false)).unwrap();
        assert!(hit.ends_with("#1 matches keyword \"piano\"\n"));

        let miss = render(&song, &Output::new(Some("jazz".to_string()), false)).unwrap();
        assert!(miss.ends_with("#1 does not match keyword \"jazz\"\n"));
    }

    #[test]
    fn test_render_json() {
        let ids = IdAllocator::new();
        let text = render(&imagine(&ids), &Output::new(None, true)).unwrap();
        assert!(text.starts_with('{'));
        assert!(text.contains("\"artist\": \"John Lennon\""));
    }

    #[test]
    fn test_run_load_rejects_invalid_entry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(
            &path,
            "title = \"  \"\nartist = \"A\"\nduration_secs = 10\nrating = 3\n",
        )
        .unwrap();

        let err = run_load(&path, &Output::default()).unwrap_err();
        assert!(format!("{:#}", err).contains("title must not be empty"));
    }
}
