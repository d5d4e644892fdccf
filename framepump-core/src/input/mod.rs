//! Control inputs gathered once per tick.
//!
//! Controllers live in a fixed, small set of slots. A slot is explicitly
//! tagged attached or not; an unattached slot always reads as neutral input
//! and is never an error.

use crate::host::KeyEdge;

/// Fixed number of controller slots the loop polls.
pub const MAX_CONTROLLERS: usize = 4;

bitflags::bitflags! {
    /// Digital controller buttons.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Buttons: u16 {
        const DPAD_UP = 1 << 0;
        const DPAD_DOWN = 1 << 1;
        const DPAD_LEFT = 1 << 2;
        const DPAD_RIGHT = 1 << 3;
        const START = 1 << 4;
        const BACK = 1 << 5;
        const LEFT_SHOULDER = 1 << 6;
        const RIGHT_SHOULDER = 1 << 7;
        const A = 1 << 8;
        const B = 1 << 9;
        const X = 1 << 10;
        const Y = 1 << 11;
    }
}

/// One controller slot's state for the current tick.
///
/// Axes are signed 16-bit, centered at zero; triggers rest at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControllerState {
    pub attached: bool,
    pub buttons: Buttons,
    pub left_stick_x: i16,
    pub left_stick_y: i16,
    pub right_stick_x: i16,
    pub right_stick_y: i16,
    pub left_trigger: i16,
    pub right_trigger: i16,
}

impl ControllerState {
    /// What an unattached slot reads as: everything released and centered.
    pub const NEUTRAL: Self = Self {
        attached: false,
        buttons: Buttons::empty(),
        left_stick_x: 0,
        left_stick_y: 0,
        right_stick_x: 0,
        right_stick_y: 0,
        left_trigger: 0,
        right_trigger: 0,
    };

    pub fn is_pressed(&self, buttons: Buttons) -> bool {
        self.buttons.contains(buttons)
    }
}

/// Everything the simulation module sees about input for one tick.
#[derive(Debug, Clone, Default)]
pub struct ControlInputs {
    /// Fixed controller slots, polled independently.
    pub controllers: [ControllerState; MAX_CONTROLLERS],
    /// Keyboard edges delivered this tick, in arrival order.
    pub keys: Vec<KeyEdge>,
}

impl ControlInputs {
    /// Slot accessor; out-of-range slots read as neutral rather than panic.
    pub fn controller(&self, slot: usize) -> &ControllerState {
        self.controllers.get(slot).unwrap_or(&ControllerState::NEUTRAL)
    }
}
