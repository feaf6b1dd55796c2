use std::sync::{Arc, RwLock, TryLockError};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::Sample;
use tracing::{debug, error, info, warn};

use crate::error::AudioError;
use crate::types::AudioParams;

/// Writes `-input` into `inverted` and `input + inverted` into `sum`.
pub fn invert_block(input: &[f32], inverted: &mut [f32], sum: &mut [f32]) {
    for ((x, inv), s) in input.iter().zip(inverted.iter_mut()).zip(sum.iter_mut()) {
        *inv = -x;
        *s = x + *inv;
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AncSnapshot {
    sequence: u64,
    original: Vec<f32>,
    inverted: Vec<f32>,
    sum: Vec<f32>,
}

impl AncSnapshot {
    pub fn with_block_size(block_size: usize) -> Self {
        Self {
            sequence: 0,
            original: vec![0.0; block_size],
            inverted: vec![0.0; block_size],
            sum: vec![0.0; block_size],
        }
    }

    pub fn publish(&mut self, input: &[f32]) {
        let len = input.len();
        self.original.clear();
        self.original.extend_from_slice(input);
        self.inverted.resize(len, 0.0);
        self.sum.resize(len, 0.0);
        invert_block(&self.original, &mut self.inverted, &mut self.sum);
        self.sequence = self.sequence.wrapping_add(1);
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn original(&self) -> &[f32] {
        &self.original
    }

    pub fn inverted(&self) -> &[f32] {
        &self.inverted
    }

    pub fn sum(&self) -> &[f32] {
        &self.sum
    }
}

#[derive(Debug, Default)]
struct InvertedPlayback {
    sequence: u64,
    position: usize,
    block: Vec<f32>,
}

impl InvertedPlayback {
    fn refresh(&mut self, snapshot: &AncSnapshot) {
        if snapshot.sequence != self.sequence {
            self.sequence = snapshot.sequence;
            self.position = 0;
            self.block.clear();
            self.block.extend_from_slice(&snapshot.inverted);
        }
    }

    fn next_sample(&mut self) -> f32 {
        match self.block.get(self.position) {
            Some(&sample) => {
                self.position += 1;
                sample
            }
            None => 0.0,
        }
    }
}

#[derive(Debug)]
struct BlockChunker {
    block_size: usize,
    pending: Vec<f32>,
}

impl BlockChunker {
    fn new(block_size: usize) -> Self {
        let block_size = block_size.max(1);
        Self {
            block_size,
            pending: Vec::with_capacity(block_size),
        }
    }

    fn push(&mut self, samples: impl IntoIterator<Item = f32>, mut emit: impl FnMut(&[f32])) {
        for sample in samples {
            self.pending.push(sample);
            if self.pending.len() == self.block_size {
                emit(&self.pending);
                self.pending.clear();
            }
        }
    }
}

/// A device config matching the requested channel count and sample rate, if
/// the device offers one. Callers fall back to the device default otherwise.
fn preferred_config<I>(ranges: I, params: &AudioParams) -> Option<cpal::SupportedStreamConfig>
where
    I: IntoIterator<Item = cpal::SupportedStreamConfigRange>,
{
    let rate = params.sample_rate;
    ranges
        .into_iter()
        .filter(|range| {
            range.channels() == params.channels
                && range.min_sample_rate().0 <= rate
                && rate <= range.max_sample_rate().0
                && matches!(
                    range.sample_format(),
                    cpal::SampleFormat::F32 | cpal::SampleFormat::I16 | cpal::SampleFormat::U16
                )
        })
        .max_by_key(|range| range.sample_format() == cpal::SampleFormat::F32)
        .map(|range| range.with_sample_rate(cpal::SampleRate(rate)))
}

type SharedSnapshot = Arc<RwLock<AncSnapshot>>;

pub struct AudioEngine {
    shared: SharedSnapshot,
    _input: cpal::Stream,
    _output: cpal::Stream,
    pub input_device_name: String,
    pub output_device_name: String,
    pub sample_rate: u32,
    pub block_size: u32,
}

impl AudioEngine {
    /// Both streams stop when the engine is dropped.
    pub fn start(params: AudioParams) -> Result<Self, AudioError> {
        let host = cpal::default_host();
        let input_device = host.default_input_device().ok_or(AudioError::NoInputDevice)?;
        let output_device = host
            .default_output_device()
            .ok_or(AudioError::NoOutputDevice)?;
        let input_device_name = input_device
            .name()
            .unwrap_or_else(|_| "Unknown input device".to_owned());
        let output_device_name = output_device
            .name()
            .unwrap_or_else(|_| "Unknown output device".to_owned());

        let input_config = match input_device.supported_input_configs() {
            Ok(ranges) => preferred_config(ranges, &params),
            Err(err) => {
                debug!("cannot list input configs: {err}");
                None
            }
        };
        let input_config = match input_config {
            Some(config) => config,
            None => input_device
                .default_input_config()
                .map_err(|source| AudioError::DefaultConfig {
                    direction: "input",
                    source,
                })?,
        };

        let output_config = match output_device.supported_output_configs() {
            Ok(ranges) => preferred_config(ranges, &params),
            Err(err) => {
                debug!("cannot list output configs: {err}");
                None
            }
        };
        let output_config = match output_config {
            Some(config) => config,
            None => output_device
                .default_output_config()
                .map_err(|source| AudioError::DefaultConfig {
                    direction: "output",
                    source,
                })?,
        };

        let sample_rate = input_config.sample_rate().0;
        if output_config.sample_rate().0 != sample_rate {
            warn!(
                input = sample_rate,
                output = output_config.sample_rate().0,
                "input and output sample rates differ, inverted audio is not resampled"
            );
        }

        let block_size = params.block_size.max(1) as usize;
        let shared: SharedSnapshot =
            Arc::new(RwLock::new(AncSnapshot::with_block_size(block_size)));
        let input_stream_config = input_config.config();
        let output_stream_config = output_config.config();

        let input = match input_config.sample_format() {
            cpal::SampleFormat::F32 => build_input::<f32>(&input_device, &input_stream_config, block_size, shared.clone())?,
            cpal::SampleFormat::I16 => build_input::<i16>(&input_device, &input_stream_config, block_size, shared.clone())?,
            cpal::SampleFormat::U16 => build_input::<u16>(&input_device, &input_stream_config, block_size, shared.clone())?,
            other => return Err(AudioError::UnsupportedFormat(format!("{other:?}"))),
        };
        let output = match output_config.sample_format() {
            cpal::SampleFormat::F32 => build_output::<f32>(&output_device, &output_stream_config, shared.clone())?,
            cpal::SampleFormat::I16 => build_output::<i16>(&output_device, &output_stream_config, shared.clone())?,
            cpal::SampleFormat::U16 => build_output::<u16>(&output_device, &output_stream_config, shared.clone())?,
            other => return Err(AudioError::UnsupportedFormat(format!("{other:?}"))),
        };

        output.play().map_err(|source| AudioError::PlayStream {
            direction: "output",
            source,
        })?;
        input.play().map_err(|source| AudioError::PlayStream {
            direction: "input",
            source,
        })?;

        info!(
            input = %input_device_name,
            output = %output_device_name,
            sample_rate,
            input_channels = input_stream_config.channels,
            output_channels = output_stream_config.channels,
            block_size,
            "audio passthrough started"
        );

        Ok(Self {
            shared,
            _input: input,
            _output: output,
            input_device_name,
            output_device_name,
            sample_rate,
            block_size: block_size as u32,
        })
    }

    pub fn snapshot(&self) -> AncSnapshot {
        match self.shared.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl Drop for AudioEngine {
    fn drop(&mut self) {
        info!("audio passthrough stopped");
    }
}

fn build_input<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    block_size: usize,
    shared: SharedSnapshot,
) -> Result<cpal::Stream, AudioError>
where
    T: cpal::SizedSample,
    f32: cpal::FromSample<T>,
{
    let channels = config.channels.max(1) as usize;
    let mut chunker = BlockChunker::new(block_size);

    device
        .build_input_stream(
            config,
            move |data: &[T], _: &cpal::InputCallbackInfo| {
                let mono = data.chunks(channels).map(|frame| f32::from_sample(frame[0]));
                chunker.push(mono, |block| {
                    try_update(&shared, |snapshot| snapshot.publish(block));
                });
            },
            move |err| {
                error!("audio input stream error: {err}");
            },
            None,
        )
        .map_err(|source| AudioError::BuildStream {
            direction: "input",
            source,
        })
}

fn build_output<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    shared: SharedSnapshot,
) -> Result<cpal::Stream, AudioError>
where
    T: cpal::SizedSample + cpal::FromSample<f32>,
{
    let channels = config.channels.max(1) as usize;
    let mut playback = InvertedPlayback::default();

    device
        .build_output_stream(
            config,
            move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                try_read(&shared, |snapshot| playback.refresh(snapshot));
                for frame in data.chunks_mut(channels) {
                    let sample = T::from_sample(playback.next_sample());
                    frame.fill(sample);
                }
            },
            move |err| {
                error!("audio output stream error: {err}");
            },
            None,
        )
        .map_err(|source| AudioError::BuildStream {
            direction: "output",
            source,
        })
}

// Audio callbacks never wait on the UI thread: a held lock skips the update.
fn try_update<T>(lock: &RwLock<T>, update: impl FnOnce(&mut T)) {
    match lock.try_write() {
        Ok(mut guard) => update(&mut guard),
        Err(TryLockError::Poisoned(poisoned)) => update(&mut poisoned.into_inner()),
        Err(TryLockError::WouldBlock) => {}
    }
}

fn try_read<T>(lock: &RwLock<T>, read: impl FnOnce(&T)) {
    match lock.try_read() {
        Ok(guard) => read(&guard),
        Err(TryLockError::Poisoned(poisoned)) => read(&poisoned.into_inner()),
        Err(TryLockError::WouldBlock) => {}
    }
}
