//! Palette tables and palette-index volumes.
//!
//! The palette is four equal bands of ARGB entries, each ramping down from
//! full intensity: one per color byte and a final gray band. Index volumes mix a flat region and a region of
//! 4-wide stripes in every layer so index packing errors show up distinctly.

use crate::error::Result;
use crate::{conformance_bail, conformance_err, conformance_trace};

const SOURCE: &str = "vtc::Palette";

/// Opaque alpha in a palette entry
const OPAQUE: u32 = 0xFF00_0000;

/// Palette sizes accepted by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaletteSize {
    Entries32 = 32,
    Entries64 = 64,
    Entries128 = 128,
    Entries256 = 256,
}

impl PaletteSize {
    pub const ALL: [PaletteSize; 4] = [
        PaletteSize::Entries32,
        PaletteSize::Entries64,
        PaletteSize::Entries128,
        PaletteSize::Entries256,
    ];

    /// Number of palette entries
    pub fn entries(self) -> u32 {
        self as u32
    }

    /// Mask that reduces an index modulo the palette size
    pub fn index_mask(self) -> u32 {
        self.entries() - 1
    }

    /// Entries per color band
    pub fn band_size(self) -> u32 {
        self.entries() / 4
    }
}

impl Default for PaletteSize {
    fn default() -> Self {
        PaletteSize::Entries256
    }
}

/// Generate a palette of `size` entries.
///
/// Entries are 32-bit ARGB with alpha 0xFF. With `block = size / 4` and
/// `step = ceil(255 / block)`, entry `i` of each band has intensity
/// `value = 0xFF - i * step`. Band 0 stores `value` in the low byte, band 1
/// stores `value << 8`, band 2 stores `value << 16` and band 3 stores all
/// three.
pub fn generate_palette(size: PaletteSize) -> Vec<u32> {
    let block = size.band_size();
    let step = 255u32.div_ceil(block);

    let mut palette = vec![0u32; size.entries() as usize];
    for i in 0..block {
        let value = 0xFF - i * step;
        palette[i as usize] = OPAQUE | value;
        palette[(i + block) as usize] = OPAQUE | (value << 8);
        palette[(i + block * 2) as usize] = OPAQUE | (value << 16);
        palette[(i + block * 3) as usize] = OPAQUE + value + (value << 8) + (value << 16);
    }

    conformance_trace!(SOURCE, "palette of {} entries (band {}, step {})", size.entries(), block, step);

    palette
}

/// Generate `depth` layers of palette indices, layer after layer.
///
/// In layer `d` the first half of the pixels holds `(d << 2) mod size`.
/// The second half is written in groups of 4 pixels; a group starting at
/// position `i` within the layer holds `(i + (d << 2)) mod size`. A trailing
/// group shorter than 4 pixels still takes the value of its start position.
///
/// # Errors
///
/// `Error::AllocationFailure` if a dimension is zero or the index storage
/// cannot be reserved.
pub fn generate_palettized_surface(
    width: u32,
    height: u32,
    depth: u32,
    size: PaletteSize,
) -> Result<Vec<u8>> {
    if width == 0 || height == 0 || depth == 0 {
        conformance_bail!(AllocationFailure, SOURCE,
            "cannot create a {}x{}x{} index volume", width, height, depth);
    }

    let layer_size = (width as usize)
        .checked_mul(height as usize)
        .ok_or_else(|| conformance_err!(AllocationFailure, SOURCE,
            "index layer {}x{} overflows", width, height))?;
    let total = layer_size
        .checked_mul(depth as usize)
        .ok_or_else(|| conformance_err!(AllocationFailure, SOURCE,
            "index volume {}x{}x{} overflows", width, height, depth))?;

    let mut indices: Vec<u8> = Vec::new();
    indices
        .try_reserve_exact(total)
        .map_err(|err| conformance_err!(AllocationFailure, SOURCE,
            "index volume {}x{}x{}: {}", width, height, depth, err))?;
    indices.resize(total, 0);

    let mask = size.index_mask() as usize;
    let half = layer_size / 2;

    for (d, layer) in indices.chunks_exact_mut(layer_size).enumerate() {
        let base = d << 2;
        let (flat, striped) = layer.split_at_mut(half);

        flat.fill((base & mask) as u8);

        for (group, pixels) in striped.chunks_mut(4).enumerate() {
            let position = half + group * 4;
            pixels.fill(((position + base) & mask) as u8);
        }
    }

    conformance_trace!(SOURCE, "index volume {}x{}x{} for {} entries", width, height, depth, size.entries());

    Ok(indices)
}

#[cfg(test)]
#[path = "palette_tests.rs"]
mod tests;
