//! Speaker playback for synthesized replies (feature = "playback").
//!
//! Media arrives as a WAV data URI or raw PCM; the device rarely runs at the
//! source rate, so samples are resampled and fanned out to the device's
//! channel count before streaming.

use anyhow::{Context, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, FromSample, SampleFormat, SizedSample, Stream, StreamConfig};
use rubato::{FftFixedIn, Resampler};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use super::{wav, DataUri, PcmAudio};

pub struct SpeechPlayer {
    device: Device,
    config: cpal::SupportedStreamConfig,
}

/// Live playback; dropping the handle stops the stream.
pub struct Playback {
    _stream: Stream,
    done: Arc<AtomicBool>,
}

impl Playback {
    pub fn is_done(&self) -> bool {
        self.done.load(Ordering::SeqCst)
    }

    pub async fn wait(&self) {
        while !self.is_done() {
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }
    }
}

impl SpeechPlayer {
    pub fn new() -> Result<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .context("no audio output device available")?;
        let config = device
            .default_output_config()
            .context("failed to query default output config")?;

        Ok(Self { device, config })
    }

    /// Play a media string as produced by the synthesizer. Only WAV data
    /// URIs are playable; other encodings must be saved to disk instead.
    pub fn play_media(&self, media: &str) -> Result<Playback> {
        let uri = DataUri::parse(media).context("media is not a data URI")?;
        if uri.mime() != "audio/wav" {
            anyhow::bail!("cannot play {} media directly; save it instead", uri.mime());
        }

        let (spec, pcm) = wav::unpack(uri.bytes()).context("malformed WAV media")?;
        if spec.bits_per_sample != 16 {
            anyhow::bail!("only 16-bit PCM playback is supported");
        }

        self.play(&PcmAudio {
            data: pcm,
            sample_rate: spec.sample_rate,
            channels: spec.channels,
        })
    }

    /// Play raw PCM through the default output device.
    pub fn play(&self, audio: &PcmAudio) -> Result<Playback> {
        if audio.channels != 1 {
            anyhow::bail!("only mono playback is supported");
        }

        let device_rate = self.config.sample_rate().0;
        let device_channels = self.config.channels() as usize;
        let samples = prepare_samples(audio, device_rate, device_channels)?;

        let samples = Arc::new(samples);
        let cursor = Arc::new(AtomicUsize::new(0));
        let done = Arc::new(AtomicBool::new(false));

        let stream_config: StreamConfig = self.config.clone().into();
        let stream = match self.config.sample_format() {
            SampleFormat::F32 => {
                self.open_stream::<f32>(&stream_config, samples, cursor, done.clone())?
            }
            SampleFormat::I16 => {
                self.open_stream::<i16>(&stream_config, samples, cursor, done.clone())?
            }
            format => anyhow::bail!("unsupported device sample format: {format:?}"),
        };

        stream.play().context("failed to start playback stream")?;

        Ok(Playback {
            _stream: stream,
            done,
        })
    }

    fn open_stream<T>(
        &self,
        config: &StreamConfig,
        samples: Arc<Vec<f32>>,
        cursor: Arc<AtomicUsize>,
        done: Arc<AtomicBool>,
    ) -> Result<Stream>
    where
        T: SizedSample + FromSample<f32> + Default + Send + 'static,
    {
        self.device
            .build_output_stream(
                config,
                move |out: &mut [T], _: &cpal::OutputCallbackInfo| {
                    let start = cursor.load(Ordering::SeqCst);
                    let available = samples.len().saturating_sub(start);

                    if available == 0 {
                        out.fill(T::default());
                        done.store(true, Ordering::SeqCst);
                        return;
                    }

                    let n = available.min(out.len());
                    for (slot, &sample) in out.iter_mut().zip(&samples[start..start + n]) {
                        *slot = T::from_sample(sample);
                    }
                    out[n..].fill(T::default());

                    cursor.store(start + n, Ordering::SeqCst);
                },
                move |err| {
                    tracing::error!(error = ?err, "playback stream error");
                },
                None,
            )
            .context("failed to open output stream")
    }
}

/// Convert to f32, resample to the device rate, and interleave the mono
/// source across the device's channels.
fn prepare_samples(audio: &PcmAudio, device_rate: u32, device_channels: usize) -> Result<Vec<f32>> {
    let mono: Vec<f32> = audio
        .data
        .chunks_exact(2)
        .map(|c| f32::from(i16::from_le_bytes([c[0], c[1]])) / 32768.0)
        .collect();

    let resampled = if audio.sample_rate == device_rate {
        mono
    } else {
        resample(&mono, audio.sample_rate, device_rate)?
    };

    if device_channels <= 1 {
        return Ok(resampled);
    }

    let mut interleaved = Vec::with_capacity(resampled.len() * device_channels);
    for sample in resampled {
        interleaved.extend(std::iter::repeat(sample).take(device_channels));
    }
    Ok(interleaved)
}

fn resample(samples: &[f32], source_rate: u32, target_rate: u32) -> Result<Vec<f32>> {
    const CHUNK: usize = 1024;
    let mut resampler =
        FftFixedIn::<f32>::new(source_rate as usize, target_rate as usize, CHUNK, 2, 1)
            .context("failed to create resampler")?;

    let mut output = Vec::new();
    let mut remaining = samples;

    while !remaining.is_empty() {
        let need = resampler.input_frames_next();
        let take = need.min(remaining.len());

        let mut frame = remaining[..take].to_vec();
        frame.resize(need, 0.0);

        let processed = resampler
            .process(&[frame], None)
            .map_err(|e| anyhow::anyhow!("resampling failed: {e:?}"))?;
        if let Some(channel) = processed.into_iter().next() {
            output.extend(channel);
        }

        remaining = &remaining[take..];
    }

    Ok(output)
}
