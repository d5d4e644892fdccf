//! The frame loop orchestrator.
//!
//! One `Runner` owns the pixel surface, the audio feed, the control input
//! state, and the platform itself, and drives them through a fixed per-tick
//! sequence:
//!
//! 1. Drain host events (quit → drain, resize → guarded surface swap,
//!    expose → re-present, key edges → collected for the module).
//! 2. Poll controller slots.
//! 3. Ask the audio feed how many samples the sink queue needs.
//! 4. Invoke the simulation module once with the surface view and an audio
//!    buffer of exactly that size.
//! 5. Submit the produced audio.
//! 6. Present the surface.
//! 7. Record the elapsed tick time for diagnostics.
//!
//! Error policy: failures during startup abort before the loop runs; failures
//! during `Running` (resize, audio submission, present) are absorbed with a
//! warning and the loop continues. Continuity outranks perfection here.
//!
//! Everything runs on one logical thread; the audio device's own playback is
//! the only background work, reached through non-blocking sink calls.

use crate::audio::{AudioConfig, AudioFeedController, AudioView};
use crate::host::{AudioSink, DisplayHost, HostEvent, InputSource};
use crate::input::ControlInputs;
use crate::sim::Simulation;
use crate::surface::{AllocationError, PixelSurface};
use std::time::{Duration, Instant};


/// Lifecycle of the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Initializing,
    Running,
    Draining,
    Terminated,
}

/// Per-tick elapsed time measurement. Diagnostics only; nothing in the loop
/// depends on it for correctness.
struct FrameTiming {
    last_tick: Instant,
}

impl FrameTiming {
    fn start() -> Self {
        Self {
            last_tick: Instant::now(),
        }
    }

    fn mark(&mut self) -> Duration {
        let now = Instant::now();
        let elapsed = now - self.last_tick;
        self.last_tick = now;
        elapsed
    }
}

/// The frame loop orchestrator.
///
/// `P` is the platform: one value implementing all three collaborator traits
/// (the SDL layer does exactly that). `S` is the simulation module.
pub struct Runner<P, S>
where
    P: DisplayHost + AudioSink + InputSource,
    S: Simulation,
{
    platform: P,
    sim: S,
    surface: PixelSurface<P::Handle>,
    feed: AudioFeedController,
    inputs: ControlInputs,
    /// Reusable staging buffer for the module's audio output.
    samples: Vec<i16>,
    /// Reusable event buffer, taken out of `self` while handling so event
    /// handlers can borrow the runner freely.
    events: Vec<HostEvent>,
    timing: FrameTiming,
    phase: Phase,
}

impl<P, S> Runner<P, S>
where
    P: DisplayHost + AudioSink + InputSource,
    S: Simulation,
{
    /// Initialize the loop: surface at the host's current window size, feed
    /// controller from `audio`, sink unpaused.
    ///
    /// A surface allocation failure here is fatal to startup; the loop never
    /// enters `Running`.
    pub fn new(mut platform: P, sim: S, audio: AudioConfig) -> Result<Self, AllocationError> {
        let (width, height) = platform.window_size();
        let surface = PixelSurface::create(&mut platform, width, height)?;
        let feed = AudioFeedController::new(&audio);

        log::info!(
            "loop initialized: {width}x{height} surface, {} Hz audio, {} sample latency target",
            feed.samples_per_second(),
            feed.latency_sample_count()
        );

        platform.set_paused(false);

        Ok(Self {
            platform,
            sim,
            surface,
            feed,
            inputs: ControlInputs::default(),
            samples: Vec::new(),
            events: Vec::new(),
            timing: FrameTiming::start(),
            phase: Phase::Running,
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn sim(&self) -> &S {
        &self.sim
    }

    pub fn surface(&self) -> &PixelSurface<P::Handle> {
        &self.surface
    }

    pub fn feed(&self) -> &AudioFeedController {
        &self.feed
    }

    /// Run ticks until a quit signal arrives, then drain and terminate.
    pub fn run(&mut self) {
        while self.phase == Phase::Running {
            self.tick();
        }
        if self.phase == Phase::Draining {
            self.drain();
        }
    }

    /// One full tick of the loop. Public so hosts (and tests) can step the
    /// loop manually instead of calling [`run`](Self::run).
    pub fn tick(&mut self) {
        if self.phase != Phase::Running {
            return;
        }

        // (1) Events. Key edges are collected fresh each tick.
        self.inputs.keys.clear();
        self.platform.poll_events(&mut self.events);
        let mut events = std::mem::take(&mut self.events);
        for event in events.drain(..) {
            self.handle_event(event);
        }
        self.events = events;

        // A quit signal stops the tick before the module runs again.
        if self.phase != Phase::Running {
            return;
        }

        // (2) Controllers. Unattached slots poll neutral.
        self.platform.poll(&mut self.inputs.controllers);

        // (3) Audio request from current sink queue depth.
        let requested = self.feed.requested_samples(self.platform.queued_bytes());
        self.samples.clear();
        self.samples.resize(requested as usize * 2, 0);

        // (4) One synchronous module invocation with exclusive views.
        {
            let mut frame = self.surface.view_mut();
            let mut audio = AudioView::new(self.feed.samples_per_second(), &mut self.samples);
            self.sim.update(&mut frame, &mut audio, &self.inputs);
        }

        // (5) Hand the produced samples to the sink.
        self.feed.submit(&mut self.platform, &self.samples);

        // (6) Present.
        self.present();

        // (7) Timing diagnostics.
        let elapsed = self.timing.mark();
        let ms = elapsed.as_secs_f64() * 1000.0;
        if ms > 0.0 {
            log::trace!("{ms:.2} ms/frame, {:.1} fps", 1000.0 / ms);
        }
    }

    fn handle_event(&mut self, event: HostEvent) {
        match event {
            HostEvent::Quit => {
                log::info!("quit requested");
                self.phase = Phase::Draining;
            }
            HostEvent::SizeChanged { width, height } => {
                match self.surface.resize(&mut self.platform, width, height) {
                    Ok(()) => log::debug!("surface resized to {width}x{height}"),
                    // Recoverable: keep ticking on the previous surface.
                    Err(err) => log::warn!(
                        "resize to {width}x{height} failed ({err}); keeping previous surface"
                    ),
                }
            }
            HostEvent::Exposed => self.present(),
            HostEvent::Key(edge) => self.inputs.keys.push(edge),
        }
    }

    fn present(&mut self) {
        if let Err(err) = self.surface.present(&mut self.platform) {
            log::warn!("{err}");
        }
    }

    /// Stop the sink, release the surface and input state, and terminate.
    fn drain(&mut self) {
        self.platform.set_paused(true);
        self.surface.destroy(&mut self.platform);
        self.inputs = ControlInputs::default();
        self.phase = Phase::Terminated;
        log::info!(
            "loop terminated after {} samples played, {} rejected submissions",
            self.feed.running_sample_index(),
            self.feed.rejected_submissions()
        );
    }

    /// Tear down and hand the platform back (e.g. for host-level cleanup).
    pub fn into_platform(mut self) -> P {
        if self.phase == Phase::Running {
            self.phase = Phase::Draining;
        }
        if self.phase == Phase::Draining {
            self.drain();
        }
        self.platform
    }
}
