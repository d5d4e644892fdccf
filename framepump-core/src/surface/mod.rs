//! The CPU-writable pixel surface and its presentation handle.
//!
//! A [`PixelSurface`] owns exactly one block of packed pixels plus one
//! presentation handle obtained from the display host. The two are created,
//! resized, and destroyed in lockstep so that a presented frame can never
//! disagree with its declared geometry.
//!
//! Resize is a guarded swap: the new handle and the new memory are fully
//! allocated before the old pair is retired. A failed resize leaves the
//! previous surface untouched and usable.

use crate::host::{DisplayHost, PresentError};
use thiserror::Error;

#[cfg(test)]
mod tests;

/// Pixels are always 32 bits wide, memory order BB GG RR XX
/// (`0x00RRGGBB` in a little-endian word).
pub const BYTES_PER_PIXEL: u32 = 4;

/// Upper bound on either surface dimension. Anything larger is treated as a
/// corrupt size report rather than a real window.
pub const MAX_SURFACE_DIM: u32 = 16_384;

/// Surface or presentation-handle creation failed.
///
/// Fatal only to the resize attempt that raised it; the previous surface
/// remains valid and the loop continues on it.
#[derive(Debug, Error)]
pub enum AllocationError {
    #[error("invalid surface dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
    #[error("presentation handle allocation failed: {0}")]
    Handle(String),
}

/// Exclusive mutable view of the surface for one simulation call.
///
/// Lifetime-bound to the surface; it cannot be retained past the tick.
pub struct FrameView<'a> {
    pixels: &'a mut [u32],
    width: u32,
    height: u32,
    pitch: u32,
}

impl FrameView<'_> {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes per row (always `width * BYTES_PER_PIXEL`).
    pub fn pitch(&self) -> u32 {
        self.pitch
    }

    /// One row of packed pixels. Panics if `y >= height`; row access is the
    /// bounds-checked replacement for raw pointer walking.
    pub fn row_mut(&mut self, y: u32) -> &mut [u32] {
        let w = self.width as usize;
        let start = y as usize * w;
        &mut self.pixels[start..start + w]
    }

    /// The whole pixel block, row-major.
    pub fn pixels_mut(&mut self) -> &mut [u32] {
        self.pixels
    }

    /// Fill every pixel with `color`.
    pub fn fill(&mut self, color: u32) {
        self.pixels.fill(color);
    }
}

/// Read-only byte view handed to the display host for presentation.
#[derive(Clone, Copy)]
pub struct FrameRef<'a> {
    bytes: &'a [u8],
    width: u32,
    height: u32,
    pitch: u32,
}

impl FrameRef<'_> {
    /// Raw frame bytes; length is always `height * pitch`.
    pub fn bytes(&self) -> &[u8] {
        self.bytes
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pitch(&self) -> u32 {
        self.pitch
    }
}

/// A resizable pixel buffer paired with its presentation handle.
///
/// `H` is the display host's opaque handle type. The handle is owned by the
/// host but lifetime-bound to this surface: it is only created, swapped, and
/// destroyed through host calls made by this type.
pub struct PixelSurface<H> {
    width: u32,
    height: u32,
    pitch: u32,
    pixels: Vec<u32>,
    handle: Option<H>,
}

impl<H> PixelSurface<H> {
    /// Create a surface at `width` x `height`, zero-initialized, with a
    /// matching presentation handle from `host`.
    pub fn create<D>(host: &mut D, width: u32, height: u32) -> Result<Self, AllocationError>
    where
        D: DisplayHost<Handle = H>,
    {
        validate_dimensions(width, height)?;

        let handle = host.create_handle(width, height)?;
        let pixels = vec![0u32; width as usize * height as usize];

        Ok(Self {
            width,
            height,
            pitch: width * BYTES_PER_PIXEL,
            pixels,
            handle: Some(handle),
        })
    }

    /// Guarded resize: allocate the replacement handle and memory first, then
    /// retire the old pair and update the dimensions together.
    ///
    /// On error the surface is left exactly as it was.
    pub fn resize<D>(&mut self, host: &mut D, width: u32, height: u32) -> Result<(), AllocationError>
    where
        D: DisplayHost<Handle = H>,
    {
        if width == self.width && height == self.height && self.handle.is_some() {
            return Ok(());
        }

        validate_dimensions(width, height)?;

        let new_handle = host.create_handle(width, height)?;
        let new_pixels = vec![0u32; width as usize * height as usize];

        // Past this point nothing can fail; swap everything at once.
        if let Some(old) = self.handle.replace(new_handle) {
            host.destroy_handle(old);
        }
        self.pixels = new_pixels;
        self.width = width;
        self.height = height;
        self.pitch = width * BYTES_PER_PIXEL;

        Ok(())
    }

    /// Release the handle and memory. No-op on an already-empty surface.
    pub fn destroy<D>(&mut self, host: &mut D)
    where
        D: DisplayHost<Handle = H>,
    {
        if let Some(handle) = self.handle.take() {
            host.destroy_handle(handle);
        }
        self.pixels = Vec::new();
        self.width = 0;
        self.height = 0;
        self.pitch = 0;
    }

    /// Upload the current frame through `host` and put it on screen.
    ///
    /// An empty (destroyed) surface presents nothing and reports success.
    pub fn present<D>(&mut self, host: &mut D) -> Result<(), PresentError>
    where
        D: DisplayHost<Handle = H>,
    {
        let Some(handle) = self.handle.as_mut() else {
            return Ok(());
        };
        let frame = FrameRef {
            bytes: bytemuck::cast_slice(&self.pixels),
            width: self.width,
            height: self.height,
            pitch: self.pitch,
        };
        host.present(handle, frame)
    }

    /// The exclusive per-tick view for the simulation module.
    pub fn view_mut(&mut self) -> FrameView<'_> {
        FrameView {
            pixels: &mut self.pixels,
            width: self.width,
            height: self.height,
            pitch: self.pitch,
        }
    }

    /// Read-only byte view of the current frame.
    pub fn frame(&self) -> FrameRef<'_> {
        FrameRef {
            bytes: bytemuck::cast_slice(&self.pixels),
            width: self.width,
            height: self.height,
            pitch: self.pitch,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pitch(&self) -> u32 {
        self.pitch
    }

    /// Total frame memory in bytes (`height * pitch`).
    pub fn memory_len(&self) -> usize {
        self.pixels.len() * BYTES_PER_PIXEL as usize
    }

    /// `true` once destroyed (or never created).
    pub fn is_empty(&self) -> bool {
        self.handle.is_none()
    }
}

fn validate_dimensions(width: u32, height: u32) -> Result<(), AllocationError> {
    if width == 0 || height == 0 || width > MAX_SURFACE_DIM || height > MAX_SURFACE_DIM {
        return Err(AllocationError::InvalidDimensions { width, height });
    }
    Ok(())
}
