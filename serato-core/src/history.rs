//! History index and session log projections
//!
//! `history.database` holds one `oses` record per session:
//!
//! ```text
//! oses
//! └── adat
//!     ├── #1   session file number (u32)
//!     ├── #41  date
//!     └── ...
//! ```
//!
//! Each `Sessions/<n>.session` file holds one `oent` record per played track,
//! in playback order, with the same `adat` layout (`#6` title, `#7` artist).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::chunk::{find, Chunk};
use crate::tag::Tag;

/// Session file number field
pub const FIELD_SESSION_NUMBER: Tag = Tag::from_u32(1);
/// Session date field
pub const FIELD_DATE: Tag = Tag::from_u32(41);
/// Track title field
pub const FIELD_TITLE: Tag = Tag::from_u32(6);
/// Track artist field
pub const FIELD_ARTIST: Tag = Tag::from_u32(7);

/// One `oses` record of the history index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionEntry {
    /// Empty when the record has no date field
    pub date: String,
    /// `None` when the record has no session number field
    pub session_file_number: Option<u32>,
}

/// One played track of a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSong {
    pub title: String,
    pub artist: String,
}

/// A session with its played tracks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub date: String,
    pub file_number: u32,
    pub songs: Vec<SessionSong>,
}

/// Collect one entry per top-level `oses` record, in file order
pub fn extract_session_entries(chunks: &[Chunk]) -> Vec<SessionEntry> {
    records(chunks, Tag::SESSION)
        .map(|fields| SessionEntry {
            date: text_field(fields, FIELD_DATE),
            session_file_number: find(fields, FIELD_SESSION_NUMBER).and_then(Chunk::as_u32),
        })
        .collect()
}

/// Date → session file number. A repeated date keeps the later record.
pub fn session_index(entries: &[SessionEntry]) -> BTreeMap<String, Option<u32>> {
    entries
        .iter()
        .map(|e| (e.date.clone(), e.session_file_number))
        .collect()
}

/// Collect the played tracks of a session file in playback order
pub fn extract_session_songs(chunks: &[Chunk]) -> Vec<SessionSong> {
    records(chunks, Tag::ENTRY)
        .map(|fields| SessionSong {
            title: text_field(fields, FIELD_TITLE),
            artist: text_field(fields, FIELD_ARTIST),
        })
        .collect()
}

/// Field arrays of every well-formed `wrapper > adat` record
fn records(chunks: &[Chunk], wrapper: Tag) -> impl Iterator<Item = &[Chunk]> {
    chunks
        .iter()
        .filter(move |c| c.tag == wrapper)
        .filter_map(move |c| {
            let fields = c
                .first_child()
                .filter(|inner| inner.tag == Tag::ARRAY)
                .and_then(Chunk::children);
            if fields.is_none() {
                warn!("Skipping {} record without an adat field array", wrapper);
            }
            fields
        })
}

fn text_field(fields: &[Chunk], tag: Tag) -> String {
    find(fields, tag)
        .and_then(Chunk::text_lossy)
        .map(|s| s.into_owned())
        .unwrap_or_default()
}
