//! Library (`database V2`) projection
//!
//! Unlike the history files, library records use readable field tags
//! directly under each `otrk` wrapper: `tsng`, `tart`, `tbpm`, `tkey`, ...

use serde::{Deserialize, Serialize};

use crate::chunk::{find, Chunk};
use crate::tag::Tag;

pub const FIELD_TITLE: Tag = Tag(*b"tsng");
pub const FIELD_ARTIST: Tag = Tag(*b"tart");
pub const FIELD_BPM: Tag = Tag(*b"tbpm");
pub const FIELD_KEY: Tag = Tag(*b"tkey");

/// A track from the Serato library
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryTrack {
    pub title: String,
    pub artist: String,
    /// Tempo as stored, e.g. `"128"` or `"127.98"`
    pub bpm: Option<String>,
    /// Musical key as stored, e.g. `"Am"`
    pub key: Option<String>,
}

impl LibraryTrack {
    /// Parsed tempo, if present and numeric
    pub fn bpm_value(&self) -> Option<f64> {
        self.bpm.as_deref().and_then(|b| b.trim().parse().ok())
    }
}

/// Collect one track per top-level `otrk` record, in file order
pub fn extract_library_tracks(chunks: &[Chunk]) -> Vec<LibraryTrack> {
    chunks
        .iter()
        .filter(|c| c.tag == Tag::TRACK)
        .filter_map(Chunk::children)
        .map(|fields| LibraryTrack {
            title: text(fields, FIELD_TITLE).unwrap_or_default(),
            artist: text(fields, FIELD_ARTIST).unwrap_or_default(),
            bpm: text(fields, FIELD_BPM),
            key: text(fields, FIELD_KEY),
        })
        .collect()
}

fn text(fields: &[Chunk], tag: Tag) -> Option<String> {
    find(fields, tag)
        .and_then(Chunk::text_lossy)
        .map(|s| s.into_owned())
}
