//! framepump-core: a soft-real-time platform loop that drives a pluggable
//! simulation module at interactive rates.
//!
//! This crate implements a **host-owned buffer** model:
//! - The loop owns a resizable packed-pixel surface and a per-tick audio
//!   staging buffer.
//! - Each tick, the simulation module is handed exclusive views of both and
//!   must fully populate them before returning.
//! - The loop then queues the produced audio at the sink and presents the
//!   surface at the display host.
//!
//! The display, audio device, and input devices are collaborators behind the
//! traits in [`host`]; this crate never links a windowing or audio library.
//! `framepump-sdl` provides the SDL2 implementation of those traits.
//!
//! Module map:
//! - [`surface`]: the CPU-writable pixel buffer and its guarded resize path.
//! - [`audio`]: the latency-driven feed that keeps the sink queue topped up.
//! - [`input`]: fixed controller slots and per-tick control inputs.
//! - [`sim`]: the one-call-per-tick contract a simulation module implements.
//! - [`runner`]: the orchestrator tying polling, simulation, audio, and
//!   presentation into one deterministic per-tick sequence.

pub mod audio;
pub mod host;
pub mod input;
pub mod runner;
pub mod sim;
pub mod surface;

pub use audio::{AudioConfig, AudioFeedController, AudioView, BYTES_PER_SAMPLE};
pub use host::{
    AudioSink, DeviceInitError, DisplayHost, HostEvent, InputSource, KeyEdge, PresentError,
    SubmissionError,
};
pub use input::{Buttons, ControlInputs, ControllerState, MAX_CONTROLLERS};
pub use runner::{Phase, Runner};
pub use sim::Simulation;
pub use surface::{AllocationError, BYTES_PER_PIXEL, FrameRef, FrameView, PixelSurface};
