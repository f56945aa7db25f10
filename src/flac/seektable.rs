// SEEKTABLE implementation for FLAC

use serde::Serialize;

use crate::error::{FormatError, FormatResult};
use crate::utils::io::PayloadReader;

/// Sample number marking a placeholder seek point
pub const PLACEHOLDER_SAMPLE: u64 = u64::MAX;

/// A single seek point (18 bytes on disk)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeekPoint {
    /// First sample of the target frame
    pub sample_number: u64,
    /// Byte offset of the target frame from the first frame header
    pub stream_offset: u64,
    /// Samples in the target frame
    pub frame_samples: u16,
}

impl SeekPoint {
    pub const SIZE: usize = 18;

    pub fn is_placeholder(&self) -> bool {
        self.sample_number == PLACEHOLDER_SAMPLE
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeekTable {
    pub points: Vec<SeekPoint>,
}

impl SeekTable {
    pub fn from_bytes(data: &[u8]) -> FormatResult<Self> {
        if data.len() % SeekPoint::SIZE != 0 {
            return Err(FormatError::InvalidSeekTableSize(data.len()));
        }

        let mut reader = PayloadReader::new(data);
        let mut points = Vec::with_capacity(data.len() / SeekPoint::SIZE);
        while reader.remaining() > 0 {
            let truncated = || FormatError::InvalidSeekTableSize(data.len());
            points.push(SeekPoint {
                sample_number: reader.read_be_u64().ok_or_else(truncated)?,
                stream_offset: reader.read_be_u64().ok_or_else(truncated)?,
                frame_samples: reader.read_be_u16().ok_or_else(truncated)?,
            });
        }

        Ok(SeekTable { points })
    }

    /// Seek points that refer to an actual frame
    pub fn real_points(&self) -> impl Iterator<Item = &SeekPoint> {
        self.points.iter().filter(|p| !p.is_placeholder())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(sample: u64, offset: u64, samples: u16) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&sample.to_be_bytes());
        out.extend_from_slice(&offset.to_be_bytes());
        out.extend_from_slice(&samples.to_be_bytes());
        out
    }

    #[test]
    fn test_points_and_placeholders() {
        let mut data = point(0, 0, 4096);
        data.extend(point(441_000, 123_456, 4096));
        data.extend(point(PLACEHOLDER_SAMPLE, 0, 0));

        let table = SeekTable::from_bytes(&data).unwrap();
        assert_eq!(table.points.len(), 3);
        assert_eq!(table.points[1].stream_offset, 123_456);
        assert!(table.points[2].is_placeholder());
        assert_eq!(table.real_points().count(), 2);
    }

    #[test]
    fn test_empty_table() {
        assert!(SeekTable::from_bytes(&[]).unwrap().points.is_empty());
    }

    #[test]
    fn test_partial_point_rejected() {
        let data = point(1, 2, 3);
        assert!(matches!(
            SeekTable::from_bytes(&data[..17]),
            Err(FormatError::InvalidSeekTableSize(17))
        ));
    }
}
