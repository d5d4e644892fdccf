//! Translation from SDL events to the core's host events.

use framepump_core::{HostEvent, KeyEdge};
use sdl2::event::{Event, WindowEvent};
use sdl2::keyboard::{Keycode, Mod};

/// Map one SDL event to a host event, or `None` for events the loop does not
/// care about.
///
/// Alt+F4 is translated into a quit signal here so the core never needs to
/// know about key combos.
pub fn translate(event: Event) -> Option<HostEvent> {
    match event {
        Event::Quit { .. } => Some(HostEvent::Quit),

        Event::Window { win_event, .. } => match win_event {
            WindowEvent::SizeChanged(width, height) => Some(HostEvent::SizeChanged {
                width: width.max(0) as u32,
                height: height.max(0) as u32,
            }),
            WindowEvent::Exposed => Some(HostEvent::Exposed),
            _ => None,
        },

        Event::KeyDown {
            keycode: Some(keycode),
            keymod,
            repeat,
            ..
        } => {
            if keycode == Keycode::F4 && keymod.intersects(Mod::LALTMOD | Mod::RALTMOD) {
                return Some(HostEvent::Quit);
            }
            Some(HostEvent::Key(KeyEdge {
                keycode: keycode as i32,
                pressed: true,
                repeat,
            }))
        }

        Event::KeyUp {
            keycode: Some(keycode),
            repeat,
            ..
        } => Some(HostEvent::Key(KeyEdge {
            keycode: keycode as i32,
            pressed: false,
            repeat,
        })),

        _ => None,
    }
}
