//! The SDL2 platform: one value implementing `DisplayHost`, `AudioSink`, and
//! `InputSource` for the loop core.

use crate::events;
use framepump_core::{
    AllocationError, AudioConfig, AudioSink, ControllerState, DeviceInitError, DisplayHost,
    FrameRef, HostEvent, InputSource, MAX_CONTROLLERS, PresentError, SubmissionError,
};
use sdl2::EventPump;
use sdl2::audio::{AudioQueue, AudioSpecDesired};
use sdl2::controller::{Axis, Button, GameController};
use sdl2::haptic::Haptic;
use sdl2::pixels::PixelFormatEnum;
use sdl2::render::{Canvas, Texture, TextureCreator};
use sdl2::video::{Window, WindowContext};

/// SDL2-backed display host, audio sink, and input source.
///
/// Presentation handles are streaming ARGB8888 textures created from this
/// platform's texture creator; they must be destroyed through
/// [`DisplayHost::destroy_handle`] before the platform itself is dropped
/// (the loop's drain phase does exactly that).
pub struct SdlPlatform {
    _sdl: sdl2::Sdl,
    canvas: Canvas<Window>,
    texture_creator: TextureCreator<WindowContext>,
    audio_queue: AudioQueue<i16>,
    event_pump: EventPump,
    pads: [Option<GameController>; MAX_CONTROLLERS],
    rumble: [Option<Haptic>; MAX_CONTROLLERS],
}

impl SdlPlatform {
    /// Open the window, the audio device, and every attached game controller.
    ///
    /// Display or audio failure is fatal (`DeviceInitError`); a missing or
    /// unopenable controller is not, its slot simply stays unattached.
    pub fn new(
        title: &str,
        width: u32,
        height: u32,
        audio: &AudioConfig,
    ) -> Result<Self, DeviceInitError> {
        let sdl = sdl2::init().map_err(DeviceInitError::Display)?;

        let video = sdl.video().map_err(DeviceInitError::Display)?;
        let window = video
            .window(title, width, height)
            .position_centered()
            .resizable()
            .build()
            .map_err(|e| DeviceInitError::Display(e.to_string()))?;
        let canvas = window
            .into_canvas()
            .build()
            .map_err(|e| DeviceInitError::Display(e.to_string()))?;
        let texture_creator = canvas.texture_creator();

        let audio_subsystem = sdl.audio().map_err(DeviceInitError::Audio)?;
        let desired = AudioSpecDesired {
            freq: Some(audio.samples_per_second as i32),
            channels: Some(2),
            samples: Some(audio.device_buffer_frames),
        };
        let audio_queue = audio_subsystem
            .open_queue::<i16, _>(None::<&str>, &desired)
            .map_err(DeviceInitError::Audio)?;
        log::info!(
            "audio device open: {} Hz, {} channel(s)",
            audio_queue.spec().freq,
            audio_queue.spec().channels
        );

        let event_pump = sdl.event_pump().map_err(DeviceInitError::Display)?;

        let (pads, rumble) = open_controllers(&sdl);

        Ok(Self {
            _sdl: sdl,
            canvas,
            texture_creator,
            audio_queue,
            event_pump,
            pads,
            rumble,
        })
    }

    /// Play a rumble effect on `slot` if that controller has rumble support.
    pub fn rumble_play(&mut self, slot: usize, strength: f32, duration_ms: u32) {
        if let Some(haptic) = self.rumble.get_mut(slot).and_then(Option::as_mut) {
            haptic.rumble_play(strength, duration_ms);
        }
    }
}

/// Enumerate joysticks, open those that are game controllers (up to
/// `MAX_CONTROLLERS`), and try to open a rumble handle for each.
fn open_controllers(
    sdl: &sdl2::Sdl,
) -> (
    [Option<GameController>; MAX_CONTROLLERS],
    [Option<Haptic>; MAX_CONTROLLERS],
) {
    let mut pads: [Option<GameController>; MAX_CONTROLLERS] = std::array::from_fn(|_| None);
    let mut rumble: [Option<Haptic>; MAX_CONTROLLERS] = std::array::from_fn(|_| None);

    let controller_subsystem = match sdl.game_controller() {
        Ok(subsystem) => subsystem,
        Err(err) => {
            log::warn!("game controller subsystem unavailable: {err}");
            return (pads, rumble);
        }
    };
    let haptic_subsystem = sdl.haptic().ok();

    let joystick_count = match controller_subsystem.num_joysticks() {
        Ok(count) => count,
        Err(err) => {
            log::warn!("joystick enumeration failed: {err}");
            return (pads, rumble);
        }
    };

    let mut slot = 0;
    for joystick_index in 0..joystick_count {
        if !controller_subsystem.is_game_controller(joystick_index) {
            continue;
        }
        if slot >= MAX_CONTROLLERS {
            break;
        }

        match controller_subsystem.open(joystick_index) {
            Ok(pad) => {
                match haptic_subsystem
                    .as_ref()
                    .map(|h| h.open_from_joystick_id(joystick_index))
                {
                    Some(Ok(haptic)) => {
                        log::info!("rumble enabled for controller {slot}");
                        rumble[slot] = Some(haptic);
                    }
                    Some(Err(err)) => log::info!("no rumble support for controller {slot}: {err}"),
                    None => log::info!("no haptic subsystem; controller {slot} has no rumble"),
                }
                log::info!("controller {slot} attached: {}", pad.name());
                pads[slot] = Some(pad);
                slot += 1;
            }
            Err(err) => log::warn!("failed to open controller at joystick {joystick_index}: {err}"),
        }
    }

    (pads, rumble)
}

fn read_pad(pad: &GameController) -> ControllerState {
    use framepump_core::Buttons;

    let mut buttons = Buttons::empty();
    for (sdl_button, flag) in [
        (Button::DPadUp, Buttons::DPAD_UP),
        (Button::DPadDown, Buttons::DPAD_DOWN),
        (Button::DPadLeft, Buttons::DPAD_LEFT),
        (Button::DPadRight, Buttons::DPAD_RIGHT),
        (Button::Start, Buttons::START),
        (Button::Back, Buttons::BACK),
        (Button::LeftShoulder, Buttons::LEFT_SHOULDER),
        (Button::RightShoulder, Buttons::RIGHT_SHOULDER),
        (Button::A, Buttons::A),
        (Button::B, Buttons::B),
        (Button::X, Buttons::X),
        (Button::Y, Buttons::Y),
    ] {
        if pad.button(sdl_button) {
            buttons |= flag;
        }
    }

    ControllerState {
        attached: true,
        buttons,
        left_stick_x: pad.axis(Axis::LeftX),
        left_stick_y: pad.axis(Axis::LeftY),
        right_stick_x: pad.axis(Axis::RightX),
        right_stick_y: pad.axis(Axis::RightY),
        left_trigger: pad.axis(Axis::TriggerLeft),
        right_trigger: pad.axis(Axis::TriggerRight),
    }
}

impl DisplayHost for SdlPlatform {
    type Handle = Texture;

    fn window_size(&self) -> (u32, u32) {
        self.canvas.window().size()
    }

    fn create_handle(&mut self, width: u32, height: u32) -> Result<Texture, AllocationError> {
        self.texture_creator
            .create_texture_streaming(PixelFormatEnum::ARGB8888, width, height)
            .map_err(|e| AllocationError::Handle(e.to_string()))
    }

    fn destroy_handle(&mut self, handle: Texture) {
        // SAFETY: every handle comes from `self.texture_creator`, which lives
        // as long as the platform; destroying through `&mut self` guarantees
        // the creator is still alive.
        unsafe { handle.destroy() }
    }

    fn present(&mut self, handle: &mut Texture, frame: FrameRef<'_>) -> Result<(), PresentError> {
        handle
            .update(None, frame.bytes(), frame.pitch() as usize)
            .map_err(|e| PresentError(e.to_string()))?;
        self.canvas
            .copy(handle, None, None)
            .map_err(PresentError)?;
        self.canvas.present();
        Ok(())
    }

    fn poll_events(&mut self, out: &mut Vec<HostEvent>) {
        for event in self.event_pump.poll_iter() {
            if let Some(host_event) = events::translate(event) {
                out.push(host_event);
            }
        }
    }
}

impl AudioSink for SdlPlatform {
    fn queued_bytes(&self) -> u32 {
        self.audio_queue.size()
    }

    fn queue(&mut self, samples: &[i16]) -> Result<(), SubmissionError> {
        self.audio_queue
            .queue_audio(samples)
            .map_err(|reason| SubmissionError {
                samples: samples.len(),
                reason,
            })
    }

    fn set_paused(&mut self, paused: bool) {
        if paused {
            self.audio_queue.pause();
        } else {
            self.audio_queue.resume();
        }
    }
}

impl InputSource for SdlPlatform {
    fn poll(&mut self, slots: &mut [ControllerState; MAX_CONTROLLERS]) {
        for (slot, pad) in slots.iter_mut().zip(self.pads.iter()) {
            *slot = match pad {
                Some(controller) if controller.attached() => read_pad(controller),
                _ => ControllerState::NEUTRAL,
            };
        }
    }
}
