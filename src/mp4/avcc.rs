//! A module for parsing AVCConfigurationBox (avcC) data.
//! Parses SPS and PPS NAL units for H.264 streams in AVCC format.

use crate::bits::reader::read_u16;
use crate::errors::{MemeshotResult, Mp4Error};

/// Represents the parsed AVCDecoderConfigurationRecord (avcC) configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AvccConfig {
    /// AVCProfileIndication
    pub profile: u8,
    /// AVCLevelIndication
    pub level: u8,
    /// Size in bytes of the length prefix in front of each NAL unit
    pub nalu_length_size: usize,
    /// Sequence Parameter Sets
    pub sps: Vec<Vec<u8>>,
    /// Picture Parameter Sets
    pub pps: Vec<Vec<u8>>,
}

/// Read `count` length-prefixed parameter sets
fn read_parameter_sets(
    data: &[u8],
    pos: &mut usize,
    count: usize,
    kind: &str,
) -> MemeshotResult<Vec<Vec<u8>>> {
    let mut sets = Vec::with_capacity(count);
    for _ in 0..count {
        let len = read_u16(data, pos)
            .ok_or_else(|| Mp4Error::new(format!("Unexpected EOF while reading {} length", kind)))?
            as usize;
        let set = data
            .get(*pos..*pos + len)
            .ok_or_else(|| Mp4Error::new(format!("Unexpected EOF while reading {} data", kind)))?;
        sets.push(set.to_vec());
        *pos += len;
    }
    Ok(sets)
}

impl AvccConfig {
    /// Parse AVCDecoderConfigurationRecord as defined in ISO/IEC 14496-15.
    ///
    /// data: full contents of the avcC box (excluding header).
    pub fn parse(data: &[u8]) -> MemeshotResult<Self> {
        if data.len() < 7 {
            return Err(Mp4Error::new("avcC data too short").into());
        }
        let profile = data[1];
        let level = data[3];
        // lengthSizeMinusOne: 6 bits reserved + 2 bits
        let nalu_length_size = (data[4] & 0x03) as usize + 1;
        // numOfSequenceParameterSets: 3 bits reserved + 5 bits count
        let num_sps = (data[5] & 0x1F) as usize;

        let mut pos = 6;
        let sps = read_parameter_sets(data, &mut pos, num_sps, "SPS")?;
        let num_pps = *data
            .get(pos)
            .ok_or_else(|| Mp4Error::new("Unexpected EOF while reading PPS count"))?
            as usize;
        pos += 1;
        let pps = read_parameter_sets(data, &mut pos, num_pps, "PPS")?;

        Ok(AvccConfig {
            profile,
            level,
            nalu_length_size,
            sps,
            pps,
        })
    }

    /// Check if configuration is valid
    pub fn is_valid(&self) -> bool {
        !self.sps.is_empty() && !self.pps.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sps_and_pps() {
        let data = [
            0x01, 0x4d, 0x40, 0x1e, 0xff, 0xe1, 0x00, 0x03, 0x67, 0x4d, 0x40, 0x01, 0x00, 0x02,
            0x68, 0xe9,
        ];
        let config = AvccConfig::parse(&data).unwrap();
        assert_eq!(config.profile, 0x4d);
        assert_eq!(config.level, 0x1e);
        assert_eq!(config.nalu_length_size, 4);
        assert_eq!(config.sps, vec![vec![0x67, 0x4d, 0x40]]);
        assert_eq!(config.pps, vec![vec![0x68, 0xe9]]);
        assert!(config.is_valid());
    }

    #[test]
    fn truncated_record_is_an_error() {
        let data = [0x01, 0x4d, 0x40, 0x1e, 0xff, 0xe1, 0x00, 0x09, 0x67];
        assert!(AvccConfig::parse(&data).is_err());
    }
}
