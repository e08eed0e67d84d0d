//! Chunk tags
//!
//! Every chunk starts with a 4-byte tag. Serato uses two conventions for the
//! same bytes:
//! - ASCII names for containers and library fields (`oses`, `adat`, `tsng`)
//! - big-endian integers for the fields of history records (`1`, `41`, ...)
//!
//! Text conversion maps each byte to the character with the same code point,
//! so binary markers survive a round trip through a `String`.

use std::fmt;

use serde::{Serialize, Serializer};

/// A 4-byte chunk tag
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tag(pub [u8; 4]);

impl Tag {
    /// Format version marker, always text
    pub const VERSION: Tag = Tag(*b"vrsn");
    /// Session wrapper in `history.database`
    pub const SESSION: Tag = Tag(*b"oses");
    /// Track entry wrapper in `.session` files
    pub const ENTRY: Tag = Tag(*b"oent");
    /// Track metadata wrapper in `database V2`
    pub const TRACK: Tag = Tag(*b"otrk");
    /// Generic field array
    pub const ARRAY: Tag = Tag(*b"adat");

    pub const fn from_u32(n: u32) -> Self {
        Tag(n.to_be_bytes())
    }

    pub const fn as_u32(self) -> u32 {
        u32::from_be_bytes(self.0)
    }

    /// Parse from a 4-character string, `None` if it has another length or
    /// contains a character above U+00FF
    pub fn from_text(s: &str) -> Option<Self> {
        text_to_tag(s).map(Tag)
    }

    pub fn to_text(self) -> String {
        tag_to_text(self.0)
    }

    /// Tags whose payload is a nested chunk sequence
    pub fn is_container(self) -> bool {
        matches!(self, Tag::SESSION | Tag::ENTRY | Tag::TRACK | Tag::ARRAY)
    }

    /// Tags decoded as text regardless of payload length
    pub fn is_text(self) -> bool {
        self == Tag::VERSION
    }
}

impl From<[u8; 4]> for Tag {
    fn from(bytes: [u8; 4]) -> Self {
        Tag(bytes)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.iter().all(|b| b.is_ascii_graphic()) {
            f.write_str(&self.to_text())
        } else {
            write!(f, "#{}", self.as_u32())
        }
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag({})", self)
    }
}

impl Serialize for Tag {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Map 4 raw bytes to a 4-character string, one character per byte
pub fn tag_to_text(bytes: [u8; 4]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Inverse of [`tag_to_text`]
pub fn text_to_tag(s: &str) -> Option<[u8; 4]> {
    let mut out = [0u8; 4];
    let mut chars = s.chars();
    for slot in out.iter_mut() {
        *slot = u8::try_from(u32::from(chars.next()?)).ok()?;
    }
    if chars.next().is_some() {
        return None;
    }
    Some(out)
}
