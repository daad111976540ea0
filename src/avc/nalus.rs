use crate::bits::reader::read_uint;

/// Four byte Annex B start code
pub const START_CODE: [u8; 4] = [0, 0, 0, 1];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NaluType {
    NonIdr,
    Idr,
    Sei,
    Sps,
    Pps,
    Aud,
    Other(u8),
}

impl std::fmt::Display for NaluType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            NaluType::NonIdr => "NonIDR_1",
            NaluType::Idr => "IDR_5",
            NaluType::Sei => "SEI_6",
            NaluType::Sps => "SPS_7",
            NaluType::Pps => "PPS_8",
            NaluType::Aud => "AUD_9",
            NaluType::Other(v) => return write!(f, "Other_{v}"),
        };
        f.write_str(s)
    }
}

impl NaluType {
    pub fn from_header_byte(b: u8) -> Self {
        match b & 0x1f {
            1 => NaluType::NonIdr,
            5 => NaluType::Idr,
            6 => NaluType::Sei,
            7 => NaluType::Sps,
            8 => NaluType::Pps,
            9 => NaluType::Aud,
            v => NaluType::Other(v),
        }
    }

    pub fn is_video(&self) -> bool {
        matches!(self, NaluType::NonIdr | NaluType::Idr)
    }
}

/// Split a length-prefixed MP4 sample into its NAL units.
///
/// `length_size` is the prefix width from the avcC record (1, 2 or 4).
/// Returns `None` when a prefix points past the end of the sample.
pub fn split_sample(sample: &[u8], length_size: usize) -> Option<Vec<&[u8]>> {
    let mut pos = 0usize;
    let mut nalus = Vec::new();
    while pos < sample.len() {
        let len = read_uint(sample, &mut pos, length_size)? as usize;
        let nalu = sample.get(pos..pos.checked_add(len)?)?;
        if !nalu.is_empty() {
            nalus.push(nalu);
        }
        pos += len;
    }
    Some(nalus)
}

/// Append one NAL unit to an Annex B byte stream
pub fn push_annexb(stream: &mut Vec<u8>, nalu: &[u8]) {
    stream.extend_from_slice(&START_CODE);
    stream.extend_from_slice(nalu);
}

/// Convert a length-prefixed sample to an Annex B byte stream for the decoder
pub fn sample_to_annexb(sample: &[u8], length_size: usize) -> Option<Vec<u8>> {
    let nalus = split_sample(sample, length_size)?;
    let mut stream = Vec::with_capacity(sample.len() + nalus.len() * START_CODE.len());
    for nalu in nalus {
        push_annexb(&mut stream, nalu);
    }
    Some(stream)
}

/// Types of the NAL units in a sample, for debug output
pub fn nalu_types(sample: &[u8], length_size: usize) -> Vec<NaluType> {
    split_sample(sample, length_size)
        .unwrap_or_default()
        .iter()
        .map(|nalu| NaluType::from_header_byte(nalu[0]))
        .collect()
}
