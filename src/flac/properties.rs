// Stream properties derived from STREAMINFO and the container size

use std::fmt;

use serde::{Serialize, Serializer};

use crate::flac::streaminfo::StreamInfo;

/// Non-negative exact fraction, always stored in lowest terms.
///
/// Duration and bitrate are kept in this form; callers round them for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ratio {
    numer: u128,
    denom: u128,
}

impl Ratio {
    /// Returns `None` for a zero denominator.
    pub fn new(numer: u128, denom: u128) -> Option<Self> {
        if denom == 0 {
            return None;
        }
        let divisor = gcd(numer, denom);
        Some(Ratio {
            numer: numer / divisor,
            denom: denom / divisor,
        })
    }

    pub fn from_integer(value: u128) -> Self {
        Ratio {
            numer: value,
            denom: 1,
        }
    }

    pub fn numer(&self) -> u128 {
        self.numer
    }

    pub fn denom(&self) -> u128 {
        self.denom
    }

    pub fn is_integer(&self) -> bool {
        self.denom == 1
    }

    /// Nearest integer, halves rounded up.
    pub fn round(&self) -> u128 {
        (self.numer + self.denom / 2) / self.denom
    }

    pub fn to_f64(&self) -> f64 {
        self.numer as f64 / self.denom as f64
    }
}

fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    // gcd(0, 0) only happens for 0/0, which `new` rejects
    a.max(1)
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_integer() {
            write!(f, "{}", self.numer)
        } else {
            write!(f, "{}/{}", self.numer, self.denom)
        }
    }
}

impl Serialize for Ratio {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_f64())
    }
}

/// Derived, read-only view of a stream's audio parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StreamProperties {
    /// `total_samples / sample_rate`, `None` when the sample count is unknown
    pub duration_seconds: Option<Ratio>,
    /// Bits per second over the audio frames, `None` when the duration is unknown
    pub average_bitrate: Option<Ratio>,
    pub channel_count: u8,
    pub sample_rate: u32,
    pub bits_per_sample: u8,
    pub total_samples: Option<u64>,
    /// Bytes following the metadata-block chain
    pub audio_bytes: u64,
}

impl StreamProperties {
    /// Derive properties; never fails, unknown inputs stay unknown.
    pub fn derive(info: &StreamInfo, total_container_bytes: u64, bytes_before_audio: u64) -> Self {
        let total_samples = info.known_total_samples();
        let audio_bytes = total_container_bytes.saturating_sub(bytes_before_audio);

        let duration_seconds =
            total_samples.and_then(|samples| Ratio::new(samples as u128, info.sample_rate as u128));

        // 8 * bytes / (samples / rate) = 8 * bytes * rate / samples
        let average_bitrate = total_samples.and_then(|samples| {
            Ratio::new(
                8 * audio_bytes as u128 * info.sample_rate as u128,
                samples as u128,
            )
        });

        StreamProperties {
            duration_seconds,
            average_bitrate,
            channel_count: info.channel_count,
            sample_rate: info.sample_rate,
            bits_per_sample: info.bits_per_sample,
            total_samples,
            audio_bytes,
        }
    }
}
