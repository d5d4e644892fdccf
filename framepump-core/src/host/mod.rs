//! Collaborator traits for the platform loop.
//!
//! The loop core stays device-agnostic: everything that touches a window, an
//! audio device, or a controller goes through one of these traits.
//!
//! - [`DisplayHost`]: window size queries, presentation-handle lifecycle,
//!   "present this pixel buffer", and the per-tick event stream.
//! - [`AudioSink`]: fire-and-forget sample queuing plus a non-blocking queue
//!   depth query. The sink is the only component doing background work; the
//!   loop never blocks on it.
//! - [`InputSource`]: per-slot controller polling into fixed storage.
//!
//! Every call here is defined to return promptly (bounded polling,
//! non-blocking queries), so the loop has no timeout model.

use crate::input::{ControllerState, MAX_CONTROLLERS};
use crate::surface::{AllocationError, FrameRef};
use thiserror::Error;

/// A display or audio device failed to open.
///
/// Fatal at startup: the loop never enters `Running` (see the error policy in
/// [`crate::runner`]).
#[derive(Debug, Error)]
pub enum DeviceInitError {
    #[error("display init failed: {0}")]
    Display(String),
    #[error("audio device init failed: {0}")]
    Audio(String),
    #[error("input device init failed: {0}")]
    Input(String),
}

/// A frame could not be presented at the display host.
///
/// Non-fatal: the tick continues and the next present retries naturally.
#[derive(Debug, Error)]
#[error("presentation failed: {0}")]
pub struct PresentError(pub String);

/// The audio sink rejected a sample submission.
///
/// Reported, never retried: the next tick's queue depth query compensates for
/// the dropped samples (an audible glitch is preferred over a stalled loop).
#[derive(Debug, Error)]
#[error("audio sink rejected {samples} samples: {reason}")]
pub struct SubmissionError {
    /// Interleaved i16 sample count that was rejected.
    pub samples: usize,
    pub reason: String,
}

/// A keyboard edge delivered through the display host's event stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEdge {
    /// Host-defined keycode (opaque to the loop core).
    pub keycode: i32,
    /// `true` for key-down, `false` for key-up.
    pub pressed: bool,
    /// `true` when this edge is an OS key repeat rather than a fresh press.
    pub repeat: bool,
}

/// Events the display host can deliver to the loop each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    /// Close/quit was requested (window close button, fatal key combo, ...).
    Quit,
    /// The window size changed; the pixel surface should follow.
    SizeChanged { width: u32, height: u32 },
    /// The window contents were invalidated and should be re-presented.
    Exposed,
    /// A keyboard edge.
    Key(KeyEdge),
}

/// Window/surface side of the platform.
///
/// `Handle` is the host's opaque presentation resource (e.g. a streaming
/// texture). Handles are created and destroyed only through the host so their
/// lifetime stays bound to it.
pub trait DisplayHost {
    type Handle;

    /// Current logical window size in pixels.
    fn window_size(&self) -> (u32, u32);

    /// Allocate a presentation handle sized `width` x `height`.
    fn create_handle(&mut self, width: u32, height: u32)
    -> Result<Self::Handle, AllocationError>;

    /// Release a presentation handle.
    fn destroy_handle(&mut self, handle: Self::Handle);

    /// Stage `frame` into `handle` and put it on screen.
    fn present(&mut self, handle: &mut Self::Handle, frame: FrameRef<'_>)
    -> Result<(), PresentError>;

    /// Drain all pending host events into `out` without blocking.
    fn poll_events(&mut self, out: &mut Vec<HostEvent>);
}

/// Audio device side of the platform.
///
/// The device itself is opened when the platform is constructed; failure there
/// surfaces as [`DeviceInitError`] before a loop ever exists.
pub trait AudioSink {
    /// Bytes currently queued at the device awaiting playback.
    fn queued_bytes(&self) -> u32;

    /// Queue interleaved stereo i16 samples, little-endian semantics.
    ///
    /// Must not block beyond what the device itself requires.
    fn queue(&mut self, samples: &[i16]) -> Result<(), SubmissionError>;

    /// Pause or resume playback.
    fn set_paused(&mut self, paused: bool);
}

/// Controller side of the platform.
pub trait InputSource {
    /// Poll every controller slot into `slots`.
    ///
    /// An unattached slot must be left neutral ([`ControllerState::NEUTRAL`]);
    /// it is not an error.
    fn poll(&mut self, slots: &mut [ControllerState; MAX_CONTROLLERS]);
}
