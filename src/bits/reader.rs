/*
# Bits Reader Module

 Big endian integer readers used by the MP4 box parsers. The slice readers
 advance a position and return `None` instead of reading past the end; the
 `Read` readers are for walking boxes straight from a file.
*/

use std::io::{self, Read};

/// Read a 32-bit big endian value from `r`.
pub fn read_u32_be<R: Read>(r: &mut R) -> io::Result<u32> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)?;
    Ok(u32::from_be_bytes(buf))
}

/// Read a 64-bit big endian value from `r`.
pub fn read_u64_be<R: Read>(r: &mut R) -> io::Result<u64> {
    let mut buf = [0u8; 8];
    r.read_exact(&mut buf)?;
    Ok(u64::from_be_bytes(buf))
}

/// Read a 16-bit big endian value from a byte slice advancing the position.
pub fn read_u16(data: &[u8], pos: &mut usize) -> Option<u16> {
    let bytes = data.get(*pos..*pos + 2)?;
    *pos += 2;
    Some(u16::from_be_bytes([bytes[0], bytes[1]]))
}

/// Read a 32-bit big endian value from a byte slice advancing the position.
pub fn read_u32(data: &[u8], pos: &mut usize) -> Option<u32> {
    let bytes = data.get(*pos..*pos + 4)?;
    *pos += 4;
    Some(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

/// Read a 64-bit big endian value from a byte slice advancing the position.
pub fn read_u64(data: &[u8], pos: &mut usize) -> Option<u64> {
    let bytes = data.get(*pos..*pos + 8)?;
    *pos += 8;
    let mut buf = [0u8; 8];
    buf.copy_from_slice(bytes);
    Some(u64::from_be_bytes(buf))
}

/// Read a big endian unsigned value of 1 to 4 bytes.
pub fn read_uint(data: &[u8], pos: &mut usize, width: usize) -> Option<u32> {
    let bytes = data.get(*pos..*pos + width)?;
    *pos += width;
    Some(bytes.iter().fold(0u32, |acc, &b| (acc << 8) | b as u32))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slice_readers_stop_at_end() {
        let data = [0x00, 0x01, 0x00, 0x00, 0x00, 0x02];
        let mut pos = 0;
        assert_eq!(read_u16(&data, &mut pos), Some(1));
        assert_eq!(read_u32(&data, &mut pos), Some(2));
        assert_eq!(read_u32(&data, &mut pos), None);
        assert_eq!(pos, 6);
    }

    #[test]
    fn variable_width() {
        let data = [0x01, 0x02, 0x03];
        let mut pos = 0;
        assert_eq!(read_uint(&data, &mut pos, 3), Some(0x010203));
        assert_eq!(read_uint(&data, &mut pos, 1), None);
    }
}
