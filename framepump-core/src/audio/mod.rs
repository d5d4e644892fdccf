//! Latency-driven audio feed.
//!
//! Rather than queuing a fixed chunk each tick, the feed continuously refills
//! the sink's hardware queue back up to a fixed depth (`latency_sample_count`
//! stereo frames). This self-corrects for frame-time jitter: a slow tick
//! drains the queue further and therefore requests more samples on the next
//! tick, a fast tick requests fewer or none.
//!
//! Sample values pass through unmodified; clipping is the simulation module's
//! responsibility.

use crate::host::AudioSink;


/// Bytes per audio sample: one stereo frame of two 16-bit channels.
pub const BYTES_PER_SAMPLE: u32 = 4;

/// Audio constants the loop is initialized with.
#[derive(Debug, Clone, Copy)]
pub struct AudioConfig {
    /// Device sample rate in Hz.
    pub samples_per_second: u32,
    /// Target steady-state queue depth in stereo frames. Chosen to absorb
    /// one tick's worth of scheduling jitter.
    pub latency_sample_count: u32,
    /// Device buffer size hint in frames, forwarded to the sink at open time.
    pub device_buffer_frames: u16,
}

impl Default for AudioConfig {
    /// 48 kHz with ~1/15th of a second of buffered latency, matching a loop
    /// that ticks at interactive rates without vsync pacing.
    fn default() -> Self {
        let samples_per_second = 48_000;
        Self {
            samples_per_second,
            latency_sample_count: samples_per_second / 15,
            device_buffer_frames: 2048,
        }
    }
}

/// Computes how much audio to request each tick and forwards the produced
/// samples to the sink.
#[derive(Debug)]
pub struct AudioFeedController {
    samples_per_second: u32,
    latency_sample_count: u32,
    running_sample_index: u64,
    rejected_submissions: u64,
}

impl AudioFeedController {
    pub fn new(config: &AudioConfig) -> Self {
        Self {
            samples_per_second: config.samples_per_second,
            // A zero latency target would starve the device permanently.
            latency_sample_count: config.latency_sample_count.max(1),
            running_sample_index: 0,
            rejected_submissions: 0,
        }
    }

    pub fn samples_per_second(&self) -> u32 {
        self.samples_per_second
    }

    pub fn latency_sample_count(&self) -> u32 {
        self.latency_sample_count
    }

    /// Target queue depth in bytes.
    pub fn target_queued_bytes(&self) -> u32 {
        self.latency_sample_count * BYTES_PER_SAMPLE
    }

    /// How many stereo frames the simulation module should produce this tick,
    /// given the sink's current queue depth. Zero when the queue is already at
    /// or above the target. Pure: constant queue depth, constant answer.
    pub fn requested_samples(&self, queued_bytes: u32) -> u32 {
        let target = self.target_queued_bytes() as u64;
        let requested_bytes = target.saturating_sub(queued_bytes as u64);
        (requested_bytes / BYTES_PER_SAMPLE as u64) as u32
    }

    /// Forward `samples` (interleaved stereo i16) to the sink.
    ///
    /// A rejected submission is logged and counted, never retried: the queue
    /// depth query on the next tick requests the shortfall again.
    pub fn submit<S: AudioSink>(&mut self, sink: &mut S, samples: &[i16]) {
        if samples.is_empty() {
            return;
        }
        debug_assert_eq!(samples.len() % 2, 0, "samples must be whole stereo frames");

        match sink.queue(samples) {
            Ok(()) => {
                self.running_sample_index += (samples.len() / 2) as u64;
            }
            Err(err) => {
                self.rejected_submissions += 1;
                log::warn!("{err}");
            }
        }
    }

    /// Monotonically increasing count of stereo frames accepted by the sink.
    pub fn running_sample_index(&self) -> u64 {
        self.running_sample_index
    }

    /// Number of submissions the sink has rejected so far.
    pub fn rejected_submissions(&self) -> u64 {
        self.rejected_submissions
    }
}

/// Writable audio buffer view passed to the simulation module for one tick.
///
/// Holds exactly `sample_count` stereo frames; the module must fill all of
/// them.
pub struct AudioView<'a> {
    samples_per_second: u32,
    samples: &'a mut [i16],
}

impl<'a> AudioView<'a> {
    /// Wrap a staging buffer of interleaved stereo samples.
    pub fn new(samples_per_second: u32, samples: &'a mut [i16]) -> Self {
        debug_assert_eq!(samples.len() % 2, 0, "buffer must hold whole stereo frames");
        Self {
            samples_per_second,
            samples,
        }
    }

    pub fn samples_per_second(&self) -> u32 {
        self.samples_per_second
    }

    /// Number of stereo frames to produce.
    pub fn sample_count(&self) -> u32 {
        (self.samples.len() / 2) as u32
    }

    /// The full interleaved sample storage (`sample_count * 2` values).
    pub fn samples_mut(&mut self) -> &mut [i16] {
        self.samples
    }

    /// Iterate over `[left, right]` frames.
    pub fn frames_mut(&mut self) -> impl Iterator<Item = &mut [i16]> {
        self.samples.chunks_exact_mut(2)
    }
}
