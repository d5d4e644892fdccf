use super::*;
use crate::host::{HostEvent, PresentError};

/// Display host double that hands out integer handles and records the
/// create/destroy order, so tests can check the guarded-swap sequencing.
#[derive(Default)]
struct FakeHost {
    next_handle: u32,
    created: Vec<u32>,
    destroyed: Vec<u32>,
    presented: Vec<u32>,
    fail_next_create: bool,
}

impl DisplayHost for FakeHost {
    type Handle = u32;

    fn window_size(&self) -> (u32, u32) {
        (640, 480)
    }

    fn create_handle(&mut self, _width: u32, _height: u32) -> Result<u32, AllocationError> {
        if self.fail_next_create {
            self.fail_next_create = false;
            return Err(AllocationError::Handle("out of texture memory".into()));
        }
        self.next_handle += 1;
        self.created.push(self.next_handle);
        Ok(self.next_handle)
    }

    fn destroy_handle(&mut self, handle: u32) {
        self.destroyed.push(handle);
    }

    fn present(&mut self, handle: &mut u32, frame: FrameRef<'_>) -> Result<(), PresentError> {
        // Internal consistency is part of the presentation contract.
        assert_eq!(frame.pitch(), frame.width() * BYTES_PER_PIXEL);
        assert_eq!(
            frame.bytes().len(),
            frame.pitch() as usize * frame.height() as usize,
            "presented frame must match its declared geometry"
        );
        self.presented.push(*handle);
        Ok(())
    }

    fn poll_events(&mut self, _out: &mut Vec<HostEvent>) {}
}

#[test]
fn create_computes_pitch_and_allocates_exact_memory() {
    let mut host = FakeHost::default();
    let surface = PixelSurface::create(&mut host, 1920, 1080).expect("create failed");

    assert_eq!(surface.pitch(), 7_680);
    assert_eq!(surface.memory_len(), 8_294_400);
    assert_eq!(surface.width(), 1920);
    assert_eq!(surface.height(), 1080);
}

#[test]
fn create_rejects_degenerate_and_absurd_dimensions() {
    let mut host = FakeHost::default();

    for (w, h) in [(0, 480), (640, 0), (0, 0), (MAX_SURFACE_DIM + 1, 10), (10, u32::MAX)] {
        let result = PixelSurface::create(&mut host, w, h);
        assert!(
            matches!(result, Err(AllocationError::InvalidDimensions { .. })),
            "{w}x{h} should be rejected"
        );
    }
    // No handle may leak from a rejected create.
    assert!(host.created.is_empty());
}

#[test]
fn resize_allocates_replacement_before_retiring_old_handle() {
    let mut host = FakeHost::default();
    let mut surface = PixelSurface::create(&mut host, 320, 240).expect("create failed");

    surface.resize(&mut host, 640, 480).expect("resize failed");

    assert_eq!(host.created, vec![1, 2]);
    assert_eq!(host.destroyed, vec![1], "old handle retired exactly once");
    assert_eq!(surface.pitch(), 640 * BYTES_PER_PIXEL);
    assert_eq!(surface.memory_len(), 640 * 480 * BYTES_PER_PIXEL as usize);
}

#[test]
fn failed_resize_leaves_previous_surface_fully_usable() {
    let mut host = FakeHost::default();
    let mut surface = PixelSurface::create(&mut host, 320, 240).expect("create failed");
    surface.view_mut().fill(0x00FF_00FF);

    host.fail_next_create = true;
    let result = surface.resize(&mut host, 1280, 720);
    assert!(matches!(result, Err(AllocationError::Handle(_))));

    // Geometry, memory, and contents are exactly as before the call.
    assert_eq!(surface.width(), 320);
    assert_eq!(surface.height(), 240);
    assert_eq!(surface.pitch(), 320 * BYTES_PER_PIXEL);
    assert_eq!(surface.memory_len(), 320 * 240 * BYTES_PER_PIXEL as usize);
    assert!(surface.frame().bytes().iter().any(|&b| b != 0));
    assert!(host.destroyed.is_empty(), "old handle must survive a failed resize");

    // And the old surface still presents.
    surface.present(&mut host).expect("present after failed resize");
    assert_eq!(host.presented, vec![1]);
}

#[test]
fn resize_to_current_size_is_a_no_op() {
    let mut host = FakeHost::default();
    let mut surface = PixelSurface::create(&mut host, 320, 240).expect("create failed");

    surface.resize(&mut host, 320, 240).expect("no-op resize failed");
    assert_eq!(host.created.len(), 1);
    assert!(host.destroyed.is_empty());
}

#[test]
fn presented_frame_stays_consistent_across_resize_sequences() {
    let mut host = FakeHost::default();
    let mut surface = PixelSurface::create(&mut host, 100, 100).expect("create failed");

    // Mixed successful and failing resizes; FakeHost::present asserts the
    // geometry/memory invariant on every call.
    surface.present(&mut host).unwrap();
    surface.resize(&mut host, 250, 125).unwrap();
    surface.present(&mut host).unwrap();
    host.fail_next_create = true;
    let _ = surface.resize(&mut host, 4000, 4000);
    surface.present(&mut host).unwrap();
    surface.resize(&mut host, 33, 7).unwrap();
    surface.present(&mut host).unwrap();
}

#[test]
fn destroy_is_idempotent() {
    let mut host = FakeHost::default();
    let mut surface = PixelSurface::create(&mut host, 64, 64).expect("create failed");

    surface.destroy(&mut host);
    assert!(surface.is_empty());
    assert_eq!(surface.memory_len(), 0);
    assert_eq!(host.destroyed, vec![1]);

    // Second destroy is a no-op, and presenting an empty surface is harmless.
    surface.destroy(&mut host);
    assert_eq!(host.destroyed, vec![1]);
    surface.present(&mut host).expect("empty present should succeed");
    assert!(host.presented.is_empty());
}

#[test]
fn view_exposes_bounds_checked_rows() {
    let mut host = FakeHost::default();
    let mut surface = PixelSurface::create(&mut host, 4, 3).expect("create failed");

    let mut view = surface.view_mut();
    assert_eq!(view.width(), 4);
    assert_eq!(view.height(), 3);
    assert_eq!(view.pitch(), 16);

    for y in 0..3 {
        let row = view.row_mut(y);
        assert_eq!(row.len(), 4);
        row.fill(y);
    }

    let frame = surface.frame();
    assert_eq!(frame.bytes().len(), 48);
    // Row 2 was filled with the value 2.
    assert_eq!(frame.bytes()[2 * 16], 2);
}
