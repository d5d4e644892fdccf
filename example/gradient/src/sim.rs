//! The demo simulation module: a scrolling two-axis gradient plus a sine
//! tone, steered by the d-pad and left stick.

use framepump_core::{AudioView, Buttons, ControlInputs, FrameView, MAX_CONTROLLERS, Simulation};

const DPAD_STEP: i32 = 4;
const STICK_DIVISOR: i32 = 4096;

pub struct GradientSim {
    blue_offset: i32,
    green_offset: i32,
    tone_hz: u32,
    tone_volume: i16,
    /// Sine phase carried across ticks so the tone is continuous.
    t_sine: f32,
}

impl GradientSim {
    pub fn new() -> Self {
        Self {
            blue_offset: 0,
            green_offset: 0,
            tone_hz: 256,
            tone_volume: 3000,
            t_sine: 0.0,
        }
    }

    fn advance_offsets(&mut self, inputs: &ControlInputs) {
        for slot in 0..MAX_CONTROLLERS {
            let pad = inputs.controller(slot);
            if !pad.attached {
                continue;
            }

            if pad.is_pressed(Buttons::DPAD_UP) {
                self.green_offset -= DPAD_STEP;
            } else if pad.is_pressed(Buttons::DPAD_DOWN) {
                self.green_offset += DPAD_STEP;
            }
            if pad.is_pressed(Buttons::DPAD_LEFT) {
                self.blue_offset -= DPAD_STEP;
            } else if pad.is_pressed(Buttons::DPAD_RIGHT) {
                self.blue_offset += DPAD_STEP;
            }

            self.blue_offset += pad.left_stick_x as i32 / STICK_DIVISOR;
            self.green_offset += pad.left_stick_y as i32 / STICK_DIVISOR;
        }
    }

    fn render(&self, frame: &mut FrameView<'_>) {
        for y in 0..frame.height() {
            let green = (y as i32).wrapping_add(self.green_offset) as u8;
            let row = frame.row_mut(y);
            for (x, pixel) in row.iter_mut().enumerate() {
                let blue = (x as i32).wrapping_add(self.blue_offset) as u8;
                *pixel = (u32::from(green) << 8) | u32::from(blue);
            }
        }
    }

    fn output_tone(&mut self, audio: &mut AudioView<'_>) {
        let wave_period = (audio.samples_per_second() / self.tone_hz).max(1) as f32;
        let phase_step = std::f32::consts::TAU / wave_period;
        let volume = f32::from(self.tone_volume);

        for frame in audio.frames_mut() {
            let value = (self.t_sine.sin() * volume) as i16;
            frame[0] = value;
            frame[1] = value;

            self.t_sine += phase_step;
        }
        // Keep the phase bounded so precision doesn't degrade over time.
        self.t_sine %= std::f32::consts::TAU;
    }
}

impl Simulation for GradientSim {
    fn update(
        &mut self,
        frame: &mut FrameView<'_>,
        audio: &mut AudioView<'_>,
        inputs: &ControlInputs,
    ) {
        self.advance_offsets(inputs);
        self.output_tone(audio);
        self.render(frame);
    }
}
