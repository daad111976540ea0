use super::r#box::read_box_header;
use crate::errors::{MemeshotResult, Mp4Error};
use log::debug;
use std::io::{Read, Seek, SeekFrom};

/// Upper bound on the movie header size we are willing to buffer
const MAX_MOOV_SIZE: u64 = 256 * 1024 * 1024;

/// Walk the top level boxes of a file and read the `moov` payload.
///
/// Works for both layouts: `moov` before `mdat` (fast start) and `moov` at
/// the end of the file.
pub fn read_moov_payload<R: Read + Seek>(reader: &mut R) -> MemeshotResult<Vec<u8>> {
    let file_size = reader.seek(SeekFrom::End(0))?;
    let mut offset = 0u64;

    while offset + 8 <= file_size {
        reader.seek(SeekFrom::Start(offset))?;
        let header = read_box_header(reader)?;
        let size = match header.size {
            0 => file_size - offset,
            n => n,
        };
        if size < header.header_size || offset + size > file_size {
            return Err(Mp4Error::new(format!(
                "box '{}' at {} overruns the file",
                header.name_str(),
                offset
            ))
            .into());
        }
        debug!("Top level box '{}' at {} ({} bytes)", header.name_str(), offset, size);

        if &header.name == b"moov" {
            let payload_size = size - header.header_size;
            if payload_size > MAX_MOOV_SIZE {
                return Err(Mp4Error::new(format!("moov box too large: {} bytes", payload_size)).into());
            }
            let mut payload = vec![0u8; payload_size as usize];
            reader.read_exact(&mut payload)?;
            return Ok(payload);
        }

        offset += size;
    }

    Err(Mp4Error::new("moov box not found").into())
}
