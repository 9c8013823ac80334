//! WAV container packing for raw PCM audio.
//!
//! Some upstreams hand back bare PCM samples instead of a playable file;
//! this wraps them in a canonical RIFF/fmt/data container (and parses one
//! back for playback).

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::FlowError;

/// Container format parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavSpec {
    pub channels: u16,
    pub sample_rate: u32,
    pub bits_per_sample: u16,
}

/// Mono, 24 kHz, 16-bit: the format the synthesis upstreams emit PCM in.
impl Default for WavSpec {
    fn default() -> Self {
        Self {
            channels: 1,
            sample_rate: 24_000,
            bits_per_sample: 16,
        }
    }
}

const HEADER_LEN: usize = 44;
const PCM_FORMAT: u16 = 1;

/// Wrap raw little-endian PCM bytes in a WAV container.
pub fn pack(spec: WavSpec, pcm: &[u8]) -> Vec<u8> {
    let data_len = pcm.len() as u32;
    let bytes_per_sample = u32::from(spec.bits_per_sample) / 8;
    let byte_rate = spec.sample_rate * u32::from(spec.channels) * bytes_per_sample;
    let block_align = spec.channels * (spec.bits_per_sample / 8);

    let mut out = Vec::with_capacity(HEADER_LEN + pcm.len());
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(36 + data_len).to_le_bytes());
    out.extend_from_slice(b"WAVE");
    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&PCM_FORMAT.to_le_bytes());
    out.extend_from_slice(&spec.channels.to_le_bytes());
    out.extend_from_slice(&spec.sample_rate.to_le_bytes());
    out.extend_from_slice(&byte_rate.to_le_bytes());
    out.extend_from_slice(&block_align.to_le_bytes());
    out.extend_from_slice(&spec.bits_per_sample.to_le_bytes());
    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_len.to_le_bytes());
    out.extend_from_slice(pcm);
    out
}

/// Pack PCM bytes and encode the container as an `audio/wav` data URI.
pub fn to_data_uri(spec: WavSpec, pcm: &[u8]) -> String {
    format!(
        "data:audio/wav;base64,{}",
        STANDARD.encode(pack(spec, pcm))
    )
}

/// Parse a WAV container back into its format and raw PCM bytes.
///
/// Only uncompressed PCM is accepted. Unknown chunks are skipped so
/// containers with extra metadata still parse.
pub fn unpack(bytes: &[u8]) -> Result<(WavSpec, Vec<u8>), FlowError> {
    if bytes.len() < 12 || &bytes[0..4] != b"RIFF" || &bytes[8..12] != b"WAVE" {
        return Err(FlowError::validation("not a RIFF/WAVE container"));
    }

    let mut spec: Option<WavSpec> = None;
    let mut pos = 12;

    while pos + 8 <= bytes.len() {
        let id = &bytes[pos..pos + 4];
        let len = u32::from_le_bytes([
            bytes[pos + 4],
            bytes[pos + 5],
            bytes[pos + 6],
            bytes[pos + 7],
        ]) as usize;
        let body_start = pos + 8;
        let body_end = body_start
            .checked_add(len)
            .filter(|end| *end <= bytes.len())
            .ok_or_else(|| FlowError::validation("WAV chunk length exceeds container"))?;
        let body = &bytes[body_start..body_end];

        match id {
            b"fmt " => {
                if len < 16 {
                    return Err(FlowError::validation("WAV fmt chunk too short"));
                }
                let format = u16::from_le_bytes([body[0], body[1]]);
                if format != PCM_FORMAT {
                    return Err(FlowError::validation(format!(
                        "unsupported WAV audio format: {format}"
                    )));
                }
                spec = Some(WavSpec {
                    channels: u16::from_le_bytes([body[2], body[3]]),
                    sample_rate: u32::from_le_bytes([body[4], body[5], body[6], body[7]]),
                    bits_per_sample: u16::from_le_bytes([body[14], body[15]]),
                });
            }
            b"data" => {
                let spec =
                    spec.ok_or_else(|| FlowError::validation("WAV data chunk precedes fmt"))?;
                return Ok((spec, body.to_vec()));
            }
            _ => {}
        }

        // Chunks are word-aligned; odd lengths carry a pad byte.
        pos = body_end + (len & 1);
    }

    Err(FlowError::validation("WAV container has no data chunk"))
}
