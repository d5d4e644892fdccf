//! framepump-sdl: the SDL2 host layer for `framepump-core`.
//!
//! One [`SdlPlatform`] value implements all three collaborator traits:
//! - `DisplayHost` over a resizable window, a software canvas, and streaming
//!   ARGB8888 textures as presentation handles.
//! - `AudioSink` over `SDL_QueueAudio` (an `AudioQueue<i16>` with a byte-depth
//!   query, pause/resume, and fire-and-forget queuing).
//! - `InputSource` over the game-controller subsystem, with a rumble handle
//!   opened per controller where the hardware supports it.
//!
//! Everything here is thin glue; the loop semantics live in the core crate.

mod events;
mod platform;

pub use platform::SdlPlatform;
