//! Texture format table and volumetric coverage selection.
//!
//! The table lists the texture color formats understood by the graphics
//! engine under test. Only swizzled formats can back a volumetric texture on
//! that hardware, and the palettized format is driven through its own path
//! (raw indices plus a separate palette), so the selector removes both.

use rustc_hash::FxHashMap;

/// Format code of the 8-bit palettized format (`SZ_I8_A8R8G8B8`).
pub const PALETTIZED_FORMAT_CODE: u32 = 0x0B;

/// Immutable description of one texture color format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureFormatDescriptor {
    /// Human readable name, also used as the test case name
    pub name: &'static str,
    /// Hardware format code
    pub format_code: u32,
    /// Pixels are stored in the swizzled (tiled) layout
    pub swizzled: bool,
    /// Host must convert the generated RGBA data before upload
    pub requires_conversion: bool,
}

impl TextureFormatDescriptor {
    pub const fn new(name: &'static str, format_code: u32, swizzled: bool, requires_conversion: bool) -> Self {
        Self { name, format_code, swizzled, requires_conversion }
    }

    /// True for the format handled by the palettized test case
    pub fn is_palettized(&self) -> bool {
        self.format_code == PALETTIZED_FORMAT_CODE
    }
}

/// Color formats known to the suite, in registration order.
pub static KNOWN_FORMATS: &[TextureFormatDescriptor] = &[
    TextureFormatDescriptor::new("SZ_Y8", 0x00, true, true),
    TextureFormatDescriptor::new("SZ_AY8", 0x01, true, true),
    TextureFormatDescriptor::new("SZ_A1R5G5B5", 0x02, true, false),
    TextureFormatDescriptor::new("SZ_X1R5G5B5", 0x03, true, false),
    TextureFormatDescriptor::new("SZ_A4R4G4B4", 0x04, true, false),
    TextureFormatDescriptor::new("SZ_R5G6B5", 0x05, true, false),
    TextureFormatDescriptor::new("SZ_A8R8G8B8", 0x06, true, false),
    TextureFormatDescriptor::new("SZ_X8R8G8B8", 0x07, true, false),
    TextureFormatDescriptor::new("SZ_I8_A8R8G8B8", PALETTIZED_FORMAT_CODE, true, true),
    TextureFormatDescriptor::new("L_DXT1_A1R5G5B5", 0x0C, false, true),
    TextureFormatDescriptor::new("L_DXT23_A8R8G8B8", 0x0E, false, true),
    TextureFormatDescriptor::new("L_DXT45_A8R8G8B8", 0x0F, false, true),
    TextureFormatDescriptor::new("LU_IMAGE_A1R5G5B5", 0x10, false, false),
    TextureFormatDescriptor::new("LU_IMAGE_R5G6B5", 0x11, false, false),
    TextureFormatDescriptor::new("LU_IMAGE_A8R8G8B8", 0x12, false, false),
    TextureFormatDescriptor::new("LU_IMAGE_Y8", 0x13, false, true),
    TextureFormatDescriptor::new("SZ_A8", 0x19, true, true),
    TextureFormatDescriptor::new("SZ_A8Y8", 0x1A, true, true),
    TextureFormatDescriptor::new("LU_IMAGE_AY8", 0x1B, false, true),
    TextureFormatDescriptor::new("LU_IMAGE_X1R5G5B5", 0x1C, false, false),
    TextureFormatDescriptor::new("LU_IMAGE_A4R4G4B4", 0x1D, false, false),
    TextureFormatDescriptor::new("LU_IMAGE_X8R8G8B8", 0x1E, false, false),
    TextureFormatDescriptor::new("LU_IMAGE_A8", 0x1F, false, true),
    TextureFormatDescriptor::new("LU_IMAGE_A8Y8", 0x20, false, true),
    TextureFormatDescriptor::new("LC_IMAGE_CR8YB8CB8YA8", 0x24, false, true),
    TextureFormatDescriptor::new("LC_IMAGE_YB8CR8YA8CB8", 0x25, false, true),
    TextureFormatDescriptor::new("SZ_R6G5B5", 0x27, true, true),
    TextureFormatDescriptor::new("SZ_G8B8", 0x28, true, true),
    TextureFormatDescriptor::new("SZ_R8B8", 0x29, true, true),
    TextureFormatDescriptor::new("SZ_A8B8G8R8", 0x3A, true, false),
    TextureFormatDescriptor::new("SZ_B8G8R8A8", 0x3B, true, false),
    TextureFormatDescriptor::new("SZ_R8G8B8A8", 0x3C, true, false),
    TextureFormatDescriptor::new("LU_IMAGE_A8B8G8R8", 0x3F, false, false),
    TextureFormatDescriptor::new("LU_IMAGE_B8G8R8A8", 0x40, false, false),
    TextureFormatDescriptor::new("LU_IMAGE_R8G8B8A8", 0x41, false, false),
];

/// Returns the formats that get a generic volumetric test case.
///
/// Keeps table order. Linear formats are skipped (not supported as volumes),
/// as is the palettized format.
pub fn select_volumetric_formats(formats: &[TextureFormatDescriptor]) -> Vec<&TextureFormatDescriptor> {
    formats
        .iter()
        .filter(|format| format.swizzled && !format.is_palettized())
        .collect()
}

// ============================================================================
// FORMAT REGISTRY
// ============================================================================

/// Ordered format table indexed by format code.
pub struct FormatRegistry {
    formats: Vec<TextureFormatDescriptor>,
    by_code: FxHashMap<u32, usize>,
}

impl FormatRegistry {
    /// Build a registry from an ordered table.
    ///
    /// When a code appears twice the first entry wins for lookups; both stay
    /// in iteration order.
    pub fn new(formats: &[TextureFormatDescriptor]) -> Self {
        let mut by_code = FxHashMap::default();
        for (index, format) in formats.iter().enumerate() {
            by_code.entry(format.format_code).or_insert(index);
        }
        Self {
            formats: formats.to_vec(),
            by_code,
        }
    }

    /// Registry over `KNOWN_FORMATS`
    pub fn known() -> Self {
        Self::new(KNOWN_FORMATS)
    }

    /// Look up a format by hardware code
    pub fn by_code(&self, format_code: u32) -> Option<&TextureFormatDescriptor> {
        self.by_code.get(&format_code).map(|&index| &self.formats[index])
    }

    /// The palettized format, if the table carries it
    pub fn palettized(&self) -> Option<&TextureFormatDescriptor> {
        self.by_code(PALETTIZED_FORMAT_CODE)
    }

    /// All formats in table order
    pub fn formats(&self) -> &[TextureFormatDescriptor] {
        &self.formats
    }

    pub fn len(&self) -> usize {
        self.formats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formats.is_empty()
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::known()
    }
}

#[cfg(test)]
#[path = "format_tests.rs"]
mod tests;
