//! serato-core: decoder for Serato's tagged-chunk database files
//!
//! This crate reads:
//! - `History/history.database` - session index (date → session file)
//! - `History/Sessions/*.session` - tracks played in one session
//! - `database V2` - library tracks
//!
//! All three share one big-endian tag/length/value grammar, decoded by
//! [`chunk::decode`] into a [`Chunk`] tree that the projections read from.

pub mod tag;
pub mod chunk;
pub mod history;
pub mod library;
pub mod reader;
pub mod error;

#[cfg(test)]
mod fixtures;

pub use error::{Error, Result};
pub use tag::{tag_to_text, text_to_tag, Tag};
pub use chunk::{decode, decode_all, Chunk, ChunkValue};
pub use history::{
    extract_session_entries, extract_session_songs, session_index, Session, SessionEntry,
    SessionSong,
};
pub use library::{extract_library_tracks, LibraryTrack};
pub use reader::{
    read_dom_tree, read_history, read_library, read_session_entries, read_session_songs,
    read_sessions, SeratoDir,
};
