use super::r#box::{find_box, Boxes};

/// Handler type of a track, read from `mdia/hdlr`
pub fn handler_type(trak: &[u8]) -> Option<&str> {
    let mdia = find_box(trak, "mdia")?;
    let hdlr = find_box(mdia, "hdlr")?;
    std::str::from_utf8(hdlr.get(8..12)?).ok()
}

/// Payload of the first video track in a `moov` payload
pub fn find_video_trak(moov: &[u8]) -> Option<&[u8]> {
    Boxes::new(moov)
        .filter(|(name, _)| name == b"trak")
        .map(|(_, trak)| trak)
        .find(|trak| handler_type(trak) == Some("vide"))
}
