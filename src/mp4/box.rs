use crate::bits::reader::{read_u32, read_u32_be, read_u64, read_u64_be};
use crate::errors::{MemeshotResult, Mp4Error};
use std::io::Read;

/// Box header information
#[derive(Debug, Clone, PartialEq)]
pub struct BoxHeader {
    pub name: [u8; 4],
    /// Total box size including the header. Zero means "to the end of the file".
    pub size: u64,
    pub header_size: u64,
}

impl BoxHeader {
    pub fn payload_size(&self) -> u64 {
        self.size.saturating_sub(self.header_size)
    }

    pub fn name_str(&self) -> String {
        String::from_utf8_lossy(&self.name).into_owned()
    }
}

/// Read a box header from an io source
pub fn read_box_header<R: Read>(r: &mut R) -> MemeshotResult<BoxHeader> {
    let size32 = read_u32_be(r)
        .map_err(|e| Mp4Error::new(format!("Failed to read box size: {}", e)))?;
    let mut name = [0u8; 4];
    r.read_exact(&mut name)
        .map_err(|e| Mp4Error::new(format!("Failed to read box name: {}", e)))?;

    if size32 == 1 {
        let size = read_u64_be(r)
            .map_err(|e| Mp4Error::new(format!("Failed to read extended box size: {}", e)))?;
        return Ok(BoxHeader {
            name,
            size,
            header_size: 16,
        });
    }
    Ok(BoxHeader {
        name,
        size: size32 as u64,
        header_size: 8,
    })
}

/// Iterator over the boxes laid out back to back in a byte slice.
///
/// Yields `(name, payload)` and stops at the first header that does not fit.
pub struct Boxes<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Boxes<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }
}

impl<'a> Iterator for Boxes<'a> {
    type Item = ([u8; 4], &'a [u8]);

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.pos;
        let mut pos = start;
        let size32 = read_u32(self.data, &mut pos)?;
        let name: [u8; 4] = self.data.get(pos..pos + 4)?.try_into().ok()?;
        pos += 4;

        let size = match size32 {
            0 => (self.data.len() - start) as u64,
            1 => read_u64(self.data, &mut pos)?,
            n => n as u64,
        };
        let end = start.checked_add(usize::try_from(size).ok()?)?;
        if end < pos || end > self.data.len() {
            return None;
        }

        self.pos = end;
        Some((name, &self.data[pos..end]))
    }
}

/// Find a box and return its payload
pub fn find_box<'a>(data: &'a [u8], name: &str) -> Option<&'a [u8]> {
    Boxes::new(data)
        .find(|(box_name, _)| box_name == name.as_bytes())
        .map(|(_, payload)| payload)
}

/// Follow a path of nested boxes, e.g. `["mdia", "minf", "stbl"]`
pub fn find_path<'a>(data: &'a [u8], path: &[&str]) -> Option<&'a [u8]> {
    path.iter().try_fold(data, |inner, name| find_box(inner, name))
}

/// Write a box header to a vector
pub fn write_box_header(output: &mut Vec<u8>, name: &str, size: u32) {
    output.extend_from_slice(&size.to_be_bytes());
    output.extend_from_slice(name.as_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_box(name: &str, payload: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        write_box_header(&mut out, name, (payload.len() + 8) as u32);
        out.extend_from_slice(payload);
        out
    }

    #[test]
    fn finds_nested_boxes() {
        let stbl = make_box("stbl", b"tables");
        let mut data = make_box("free", &[0; 4]);
        data.extend(make_box("minf", &stbl));

        assert_eq!(find_path(&data, &["minf", "stbl"]), Some(&b"tables"[..]));
        assert!(find_box(&data, "moov").is_none());
    }

    #[test]
    fn stops_on_truncated_box() {
        let mut data = make_box("free", &[0; 4]);
        data.extend_from_slice(&[0, 0, 0, 64, b'm', b'o', b'o', b'v']);
        let names: Vec<_> = Boxes::new(&data).map(|(n, _)| n).collect();
        assert_eq!(names, vec![*b"free"]);
    }

    #[test]
    fn reads_extended_header() {
        let mut data = vec![0, 0, 0, 1];
        data.extend_from_slice(b"mdat");
        data.extend_from_slice(&20u64.to_be_bytes());
        let header = read_box_header(&mut std::io::Cursor::new(data)).unwrap();
        assert_eq!(header.name_str(), "mdat");
        assert_eq!(header.header_size, 16);
        assert_eq!(header.payload_size(), 4);
    }
}
