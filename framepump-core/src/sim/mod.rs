//! The contract between the platform loop and a simulation module.

use crate::audio::AudioView;
use crate::input::ControlInputs;
use crate::surface::FrameView;

/// A pluggable simulation/render module, invoked exactly once per tick.
///
/// Contract:
/// - Fully populate every pixel of `frame` (no partial-frame artifacts).
/// - Produce exactly `audio.sample_count()` stereo frames.
/// - Return synchronously once this tick's outputs are complete; spawn no
///   concurrent work that outlives the call.
/// - Do not retain either view past return; the borrows make that stick.
///
/// The loop depends only on this signature, never on what the module renders
/// or simulates internally.
pub trait Simulation {
    fn update(
        &mut self,
        frame: &mut FrameView<'_>,
        audio: &mut AudioView<'_>,
        inputs: &ControlInputs,
    );
}
