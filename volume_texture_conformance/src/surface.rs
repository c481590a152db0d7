//! Gradient surfaces used as volumetric texture layers.
//!
//! Each pixel encodes its own position: red follows y, green follows x and
//! blue is the inverse of red. Every depth layer keeps a different subset of
//! the color channels so swapped or misindexed slices are visible in the
//! rendered output.

use bitflags::bitflags;
use crate::error::Result;
use crate::{conformance_bail, conformance_err, conformance_trace};

const SOURCE: &str = "vtc::Surface";

/// Bytes per gradient pixel (RGBA8888)
pub const GRADIENT_BYTES_PER_PIXEL: u32 = 4;

bitflags! {
    /// Color channels kept for a given depth layer. Alpha is never masked.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ChannelMask: u8 {
        const RED = 0b001;
        const GREEN = 0b010;
        const BLUE = 0b100;
    }
}

impl ChannelMask {
    /// Mask for a depth layer, taken modulo 4.
    ///
    /// Layer 0 keeps every channel, 1 keeps blue, 2 keeps red, 3 keeps green.
    /// Negative layers wrap with a euclidean remainder.
    pub fn for_layer(layer: i32) -> Self {
        match layer.rem_euclid(4) {
            1 => ChannelMask::BLUE,
            2 => ChannelMask::RED,
            3 => ChannelMask::GREEN,
            _ => ChannelMask::all(),
        }
    }

    fn byte_mask(self, channel: ChannelMask) -> u32 {
        if self.contains(channel) { 0xFF } else { 0 }
    }
}

/// Pack four 8-bit channels as RGBA8888 (red in the most significant byte)
#[inline]
pub fn pack_rgba8888(red: u32, green: u32, blue: u32, alpha: u32) -> u32 {
    ((red & 0xFF) << 24) | ((green & 0xFF) << 16) | ((blue & 0xFF) << 8) | (alpha & 0xFF)
}

/// Split an RGBA8888 pixel into `[r, g, b, a]`
#[inline]
pub fn unpack_rgba8888(pixel: u32) -> [u8; 4] {
    pixel.to_be_bytes()
}

/// A 2D buffer of RGBA8888 pixels, stored row-major without padding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl Surface {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row pitch in bytes
    pub fn pitch(&self) -> u32 {
        self.width * GRADIENT_BYTES_PER_PIXEL
    }

    /// Packed pixels, row-major
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Pixel at (x, y)
    ///
    /// # Panics
    ///
    /// Panics when (x, y) is outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> u32 {
        assert!(x < self.width && y < self.height, "pixel ({}, {}) out of bounds", x, y);
        self.pixels[(y * self.width + x) as usize]
    }

    /// Channels of the pixel at (x, y) as `[r, g, b, a]`
    pub fn rgba(&self, x: u32, y: u32) -> [u8; 4] {
        unpack_rgba8888(self.pixel(x, y))
    }

    /// Raw bytes of the packed pixels (native endianness)
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }
}

/// Generate the gradient layer `layer` of a `width` x `height` volume.
///
/// For a pixel at (x, y), with `xn = x*255/width` and `yn = y*255/height`
/// (integer division), red is `yn`, green is `xn`, blue is `255 - yn` and
/// alpha is `(xn + yn) mod 256`. Color channels outside
/// `ChannelMask::for_layer(layer)` are zero.
///
/// # Errors
///
/// `Error::AllocationFailure` if a dimension is zero or the pixel storage
/// cannot be reserved.
pub fn generate_gradient_surface(width: u32, height: u32, layer: i32) -> Result<Surface> {
    if width == 0 || height == 0 {
        conformance_bail!(AllocationFailure, SOURCE,
            "cannot create a {}x{} gradient surface", width, height);
    }

    let count = (width as usize)
        .checked_mul(height as usize)
        .ok_or_else(|| conformance_err!(AllocationFailure, SOURCE,
            "gradient surface {}x{} overflows", width, height))?;

    let mut pixels = Vec::new();
    pixels
        .try_reserve_exact(count)
        .map_err(|err| conformance_err!(AllocationFailure, SOURCE,
            "gradient surface {}x{}: {}", width, height, err))?;

    let mask = ChannelMask::for_layer(layer);
    let red_mask = mask.byte_mask(ChannelMask::RED);
    let green_mask = mask.byte_mask(ChannelMask::GREEN);
    let blue_mask = mask.byte_mask(ChannelMask::BLUE);

    let width64 = width as u64;
    let height64 = height as u64;
    for y in 0..height64 {
        let y_normal = (y * 255 / height64) as u32;
        for x in 0..width64 {
            let x_normal = (x * 255 / width64) as u32;
            pixels.push(pack_rgba8888(
                y_normal & red_mask,
                x_normal & green_mask,
                (255 - y_normal) & blue_mask,
                // Wraps past 255 on purpose.
                x_normal + y_normal,
            ));
        }
    }

    conformance_trace!(SOURCE, "gradient layer {} ({}x{}, mask {:?})", layer, width, height, mask);

    Ok(Surface { width, height, pixels })
}

#[cfg(test)]
#[path = "surface_tests.rs"]
mod tests;
