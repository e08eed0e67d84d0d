//! Text and JSON printing

use serde::Serialize;

use serato_core::{LibraryTrack, Session, SessionEntry, SessionSong};

use crate::config::Config;

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_sessions(config: &Config, entries: &[SessionEntry]) -> anyhow::Result<()> {
    if config.json {
        return print_json(&serato_core::session_index(entries));
    }

    println!("Sessions:");
    for entry in entries {
        // -1 marks a record without a session file number
        let number = entry.session_file_number.map_or(-1, i64::from);
        println!("  {:>5}  {}", number, entry.date);
    }
    Ok(())
}

pub fn print_songs(config: &Config, songs: &[SessionSong]) -> anyhow::Result<()> {
    if config.json {
        return print_json(songs);
    }

    for (i, song) in songs.iter().enumerate() {
        println!("  {:3}. {}", i + 1, format_song(song));
    }
    Ok(())
}

pub fn print_history(config: &Config, history: &[Session]) -> anyhow::Result<()> {
    if config.json {
        return print_json(history);
    }

    for session in history {
        println!(
            "\n{} (session {}, {} tracks)",
            session.date,
            session.file_number,
            session.songs.len()
        );
        for (i, song) in session.songs.iter().enumerate() {
            println!("  {:3}. {}", i + 1, format_song(song));
        }
    }
    Ok(())
}

pub fn print_library(config: &Config, tracks: &[LibraryTrack]) -> anyhow::Result<()> {
    if config.json {
        return print_json(tracks);
    }

    println!("Tracks:");
    for track in tracks {
        println!(
            "  {} - {} [{} BPM, {}]",
            track.artist,
            track.title,
            track.bpm.as_deref().unwrap_or("?"),
            track.key.as_deref().unwrap_or("-"),
        );
    }
    Ok(())
}

fn format_song(song: &SessionSong) -> String {
    match (song.artist.is_empty(), song.title.is_empty()) {
        (true, true) => "?".to_string(),
        (true, false) => song.title.clone(),
        (false, true) => song.artist.clone(),
        (false, false) => format!("{} - {}", song.artist, song.title),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_song() {
        let song = |title: &str, artist: &str| SessionSong {
            title: title.into(),
            artist: artist.into(),
        };
        assert_eq!(format_song(&song("Title", "Artist")), "Artist - Title");
        assert_eq!(format_song(&song("Title", "")), "Title");
        assert_eq!(format_song(&song("", "")), "?");
    }
}
