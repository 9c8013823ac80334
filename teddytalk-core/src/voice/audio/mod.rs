//! Audio payload types shared by the cloning and synthesis providers.

pub mod data_uri;
#[cfg(feature = "playback")]
pub mod playback;
pub mod wav;

pub use data_uri::DataUri;

/// Raw little-endian 16-bit PCM samples with their format metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PcmAudio {
    pub data: Vec<u8>,
    pub sample_rate: u32,
    pub channels: u16,
}

/// Audio produced by a synthesis call. Every call yields a fresh,
/// independent payload; nothing is shared or reused between calls.
#[derive(Debug, Clone)]
pub enum AudioPayload {
    /// Audio the upstream already encoded (base64 or data URI). Passed
    /// through verbatim to the caller.
    Encoded(String),
    /// Raw PCM that still needs a container before playback.
    Pcm(PcmAudio),
}

impl AudioPayload {
    /// Render the payload as a media string suitable for playback.
    ///
    /// Encoded audio is returned unchanged; raw PCM is wrapped in a WAV
    /// container and base64-encoded as a data URI.
    pub fn into_media(self) -> String {
        match self {
            AudioPayload::Encoded(media) => media,
            AudioPayload::Pcm(pcm) => {
                let spec = wav::WavSpec {
                    channels: pcm.channels,
                    sample_rate: pcm.sample_rate,
                    bits_per_sample: 16,
                };
                wav::to_data_uri(spec, &pcm.data)
            }
        }
    }
}
