//! WAV encoder

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::error::{Result, header_field, invalid_format};

/// Tone parameters for [`wav`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WavOptions {
    /// Tone frequency in Hz
    pub frequency: u32,
    /// Length in seconds
    pub duration: u32,
    /// Amplitude, `0.0..=1.0`
    pub volume: f64,
    pub sample_rate: u32,
}

impl Default for WavOptions {
    fn default() -> Self {
        Self {
            frequency: 440,
            duration: 1,
            volume: 0.5,
            sample_rate: 44100,
        }
    }
}

impl WavOptions {
    pub fn with_frequency(mut self, frequency: u32) -> Self {
        self.frequency = frequency;
        self
    }

    pub fn with_duration(mut self, duration: u32) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_volume(mut self, volume: f64) -> Self {
        self.volume = volume;
        self
    }

    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }
}

/// Encode a mono 16-bit PCM sine tone
///
/// One period is computed once and repeated, so the frequency is rounded
/// to a whole number of samples per cycle.
pub fn wav(options: &WavOptions) -> Result<Vec<u8>> {
    if !(0.0..=1.0).contains(&options.volume) {
        return Err(invalid_format("volume", "must be between 0.0 and 1.0"));
    }
    if options.frequency == 0 || options.frequency > options.sample_rate {
        return Err(invalid_format(
            "frequency",
            "must be positive and not above the sample rate",
        ));
    }

    let nb_samples = u64::from(options.sample_rate) * u64::from(options.duration);
    // RIFF size counts the 36 header bytes after it
    let riff_len: u32 = header_field("duration", 36 + nb_samples * 2)?;
    let data_len = riff_len - 36;
    let byte_rate: u32 = header_field("sample_rate", u64::from(options.sample_rate) * 2)?;

    let samples_per_cycle = (options.sample_rate / options.frequency) as usize;
    let cycle: Vec<i16> = (0..samples_per_cycle)
        .map(|i| {
            let phase = 2.0 * PI * i as f64 / samples_per_cycle as f64;
            (options.volume * 32767.0 * phase.sin()) as i16
        })
        .collect();

    let mut out = Vec::with_capacity(44 + data_len as usize);
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&riff_len.to_le_bytes());
    out.extend_from_slice(b"WAVE");

    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes()); // PCM
    out.extend_from_slice(&1u16.to_le_bytes()); // mono
    out.extend_from_slice(&options.sample_rate.to_le_bytes());
    out.extend_from_slice(&byte_rate.to_le_bytes());
    out.extend_from_slice(&2u16.to_le_bytes()); // block align
    out.extend_from_slice(&16u16.to_le_bytes());

    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_len.to_le_bytes());
    for sample in cycle.iter().cycle().take(nb_samples as usize) {
        out.extend_from_slice(&sample.to_le_bytes());
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{FakefileError, InputError};

    fn le_u32(bytes: &[u8], at: usize) -> u32 {
        u32::from_le_bytes(bytes[at..at + 4].try_into().unwrap())
    }

    #[test]
    fn test_wav_length() {
        for (rate, duration) in [(44100, 1), (8000, 3), (22050, 2)] {
            let options = WavOptions::default()
                .with_sample_rate(rate)
                .with_duration(duration);
            let bytes = wav(&options).unwrap();
            assert_eq!(bytes.len(), 44 + 2 * rate as usize * duration as usize);
            assert_eq!(le_u32(&bytes, 4) as usize, bytes.len() - 8);
            assert_eq!(le_u32(&bytes, 40) as usize, bytes.len() - 44);
        }
    }

    #[test]
    fn test_wav_header() {
        let bytes = wav(&WavOptions::default()).unwrap();
        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(&bytes[8..16], b"WAVEfmt ");
        assert_eq!(le_u32(&bytes, 24), 44100);
        assert_eq!(le_u32(&bytes, 28), 88200);
        assert_eq!(&bytes[34..36], &16u16.to_le_bytes());
        // The tone starts at zero and rises
        assert_eq!(&bytes[44..46], &[0, 0]);
        assert!(i16::from_le_bytes([bytes[46], bytes[47]]) > 0);
    }

    #[test]
    fn test_wav_rejects_bad_parameters() {
        let loud = WavOptions::default().with_volume(1.5);
        assert!(wav(&loud).unwrap_err().is_invalid_format());
        let silent = WavOptions::default().with_frequency(0);
        assert!(wav(&silent).unwrap_err().is_invalid_format());
    }

    #[test]
    fn test_wav_rejects_data_past_4_gib() {
        let long = WavOptions::default().with_duration(50_000);
        let err = wav(&long).unwrap_err();
        assert!(matches!(
            err,
            FakefileError::Input(InputError::InvalidFormat { ref parameter, .. }) if parameter == "duration"
        ));

        let fast = WavOptions::default().with_sample_rate(u32::MAX).with_frequency(440);
        assert!(wav(&fast).unwrap_err().is_invalid_format());
    }
}
