//! File-level readers
//!
//! Serato keeps its data under a `_Serato_` folder:
//! - `database V2`: library
//! - `History/history.database`: session index
//! - `History/Sessions/<n>.session`: one play log per session
//!
//! Each file is read into memory and decoded in one pass.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::chunk::{decode_all, Chunk};
use crate::error::Result;
use crate::history::{
    extract_session_entries, extract_session_songs, session_index, Session, SessionEntry,
    SessionSong,
};
use crate::library::{extract_library_tracks, LibraryTrack};

/// Layout of a `_Serato_` folder rooted at a caller-supplied path
#[derive(Debug, Clone)]
pub struct SeratoDir {
    root: PathBuf,
}

impl SeratoDir {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn library_database(&self) -> PathBuf {
        self.root.join("database V2")
    }

    pub fn history_database(&self) -> PathBuf {
        self.root.join("History").join("history.database")
    }

    pub fn session_file(&self, number: u32) -> PathBuf {
        self.root
            .join("History")
            .join("Sessions")
            .join(format!("{}.session", number))
    }
}

/// Decode a whole file into its raw chunk tree
pub fn read_dom_tree<P: AsRef<Path>>(path: P) -> Result<Vec<Chunk>> {
    let path = path.as_ref();
    let buffer = fs::read(path)?;
    debug!("Decoding {:?} ({} bytes)", path, buffer.len());
    decode_all(&buffer)
}

/// Session index records of a `history.database` file, in file order
pub fn read_session_entries<P: AsRef<Path>>(path: P) -> Result<Vec<SessionEntry>> {
    Ok(extract_session_entries(&read_dom_tree(path)?))
}

/// Date → session file number of a `history.database` file
pub fn read_sessions<P: AsRef<Path>>(path: P) -> Result<BTreeMap<String, Option<u32>>> {
    Ok(session_index(&read_session_entries(path)?))
}

/// Played tracks of one `.session` file
pub fn read_session_songs<P: AsRef<Path>>(path: P) -> Result<Vec<SessionSong>> {
    Ok(extract_session_songs(&read_dom_tree(path)?))
}

/// Tracks of a `database V2` file
pub fn read_library<P: AsRef<Path>>(path: P) -> Result<Vec<LibraryTrack>> {
    Ok(extract_library_tracks(&read_dom_tree(path)?))
}

/// Every recorded session with its played tracks, ordered by date string
///
/// Session files are decoded in parallel, one file per task. A session file
/// that cannot be read or decoded fails the whole call.
pub fn read_history(dir: &SeratoDir) -> Result<Vec<Session>> {
    let index = read_sessions(dir.history_database())?;
    info!("History index lists {} sessions", index.len());

    let numbered: Vec<(String, u32)> = index
        .into_iter()
        .filter_map(|(date, number)| match number {
            Some(n) => Some((date, n)),
            None => {
                warn!("Session {:?} has no session file number, skipping", date);
                None
            }
        })
        .collect();

    numbered
        .into_par_iter()
        .map(|(date, file_number)| {
            let songs = read_session_songs(dir.session_file(file_number))?;
            debug!("Session {} ({}): {} songs", date, file_number, songs.len());
            Ok(Session {
                date,
                file_number,
                songs,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::fixtures::{entry_record, session_record, track_record, version};
    use tempfile::TempDir;

    fn write(path: &Path, data: &[u8]) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, data).unwrap();
    }

    fn make_serato_dir() -> (TempDir, SeratoDir) {
        let tmp = TempDir::new().unwrap();
        let dir = SeratoDir::new(tmp.path());

        let mut index = version();
        index.extend(session_record(Some(2), Some("2021-05-02")));
        index.extend(session_record(Some(1), Some("2021-05-01")));
        index.extend(session_record(None, Some("2021-05-03")));
        write(&dir.history_database(), &index);

        let mut first = version();
        first.extend(entry_record(Some("Opener"), Some("Artist A")));
        first.extend(entry_record(Some("Closer"), Some("Artist B")));
        write(&dir.session_file(1), &first);

        let mut second = version();
        second.extend(entry_record(Some("Solo"), Some("Artist C")));
        write(&dir.session_file(2), &second);

        (tmp, dir)
    }

    #[test]
    fn test_layout() {
        let dir = SeratoDir::new("/music/_Serato_");
        assert_eq!(dir.library_database(), Path::new("/music/_Serato_/database V2"));
        assert_eq!(
            dir.session_file(12),
            Path::new("/music/_Serato_/History/Sessions/12.session")
        );
    }

    #[test]
    fn test_read_sessions() {
        let (_tmp, dir) = make_serato_dir();
        let index = read_sessions(dir.history_database()).unwrap();

        assert_eq!(index.len(), 3);
        assert_eq!(index["2021-05-01"], Some(1));
        assert_eq!(index["2021-05-03"], None);
    }

    #[test]
    fn test_read_history() {
        let (_tmp, dir) = make_serato_dir();
        let history = read_history(&dir).unwrap();

        assert_eq!(history.len(), 2);
        assert_eq!(history[0].date, "2021-05-01");
        assert_eq!(history[0].file_number, 1);
        assert_eq!(history[0].songs.len(), 2);
        assert_eq!(history[0].songs[1].title, "Closer");
        assert_eq!(history[1].songs[0].artist, "Artist C");
    }

    #[test]
    fn test_read_history_missing_session_file() {
        let (_tmp, dir) = make_serato_dir();
        fs::remove_file(dir.session_file(2)).unwrap();

        assert!(matches!(read_history(&dir), Err(Error::Io(_))));
    }

    #[test]
    fn test_read_library() {
        let tmp = TempDir::new().unwrap();
        let dir = SeratoDir::new(tmp.path());

        let mut data = version();
        data.extend(track_record(&[(b"tsng", "One"), (b"tart", "Someone"), (b"tkey", "F#m")]));
        write(&dir.library_database(), &data);

        let tracks = read_library(dir.library_database()).unwrap();
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].key.as_deref(), Some("F#m"));
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("broken.session");

        let mut data = entry_record(Some("Fine"), Some("Fine"));
        data.extend(entry_record(Some("Cut"), Some("Off")));
        data.truncate(data.len() - 5);
        write(&path, &data);

        assert!(matches!(read_session_songs(&path), Err(Error::Truncated { .. })));
    }

    #[test]
    fn test_missing_file() {
        let tmp = TempDir::new().unwrap();
        assert!(matches!(
            read_dom_tree(tmp.path().join("nope")),
            Err(Error::Io(_))
        ));
    }
}
