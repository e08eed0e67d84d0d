//! Byte builders for hand-crafted test files

/// Encode one chunk: tag, big-endian length, payload
pub fn chunk(tag: [u8; 4], payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(8 + payload.len());
    out.extend_from_slice(&tag);
    out.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    out.extend_from_slice(payload);
    out
}

/// Chunk with a numeric field tag
pub fn field(id: u32, payload: &[u8]) -> Vec<u8> {
    chunk(id.to_be_bytes(), payload)
}

pub fn u32_field(id: u32, value: u32) -> Vec<u8> {
    field(id, &value.to_be_bytes())
}

/// Text the way Serato stores it: UTF-16BE
pub fn utf16(s: &str) -> Vec<u8> {
    s.encode_utf16().flat_map(|c| c.to_be_bytes()).collect()
}

pub fn version() -> Vec<u8> {
    chunk(*b"vrsn", &utf16("2.0/Serato Scratch LIVE Review"))
}

/// `oses` record for `history.database`
pub fn session_record(number: Option<u32>, date: Option<&str>) -> Vec<u8> {
    let mut fields = Vec::new();
    if let Some(n) = number {
        fields.extend(u32_field(1, n));
    }
    if let Some(d) = date {
        fields.extend(field(41, &utf16(d)));
    }
    chunk(*b"oses", &chunk(*b"adat", &fields))
}

/// `oent` record for a `.session` file
pub fn entry_record(title: Option<&str>, artist: Option<&str>) -> Vec<u8> {
    let mut fields = u32_field(2, 1);
    if let Some(t) = title {
        fields.extend(field(6, &utf16(t)));
    }
    if let Some(a) = artist {
        fields.extend(field(7, &utf16(a)));
    }
    chunk(*b"oent", &chunk(*b"adat", &fields))
}

/// `otrk` record for `database V2`
pub fn track_record(fields: &[(&[u8; 4], &str)]) -> Vec<u8> {
    let mut payload = chunk(*b"ttyp", &utf16("mp3"));
    for (tag, value) in fields {
        payload.extend(chunk(**tag, &utf16(value)));
    }
    chunk(*b"otrk", &payload)
}
