/*!
# Volume Texture Conformance

Test cases that check how a GPU samples volumetric (3D) textures across the
nv2a texture formats, swizzled and palettized encodings included.

The crate generates deterministic texel data and drives a rendering host
through the [`TestHost`](conformance::TestHost) trait. The host owns the
display, the push buffer and frame persistence; it is supplied by the
surrounding test harness.

## Architecture

- **FormatRegistry**: texture format table and volumetric selection
- **Surface**: gradient layers with a per-layer channel mask
- **Palette**: color ramp palettes and palette-index volumes
- **VertexBuffer**: the four-quadrant geometry sampling depth planes
- **VolumeTextureSuite**: per-format test cases run against a host
- **RecordingHost**: in-memory host for dry runs and tests
*/

// Internal modules
mod error;
mod diagnostics;
pub mod log;
pub mod format;
pub mod surface;
pub mod palette;
pub mod geometry;
pub mod host;
pub mod recording_host;
pub mod suite;

// Main conformance namespace module
pub mod conformance {
    // Error types
    pub use crate::error::{Error, Result};

    // Global logger
    pub use crate::diagnostics::Diagnostics;

    // Host capability trait
    pub use crate::host::TestHost;

    // Suite entry point
    pub use crate::suite::{SuiteConfig, VolumeTextureSuite};

    // Logging sub-module (types only, macros live at the crate root)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Texture formats
    pub mod format {
        pub use crate::format::*;
    }

    // Texel data generation
    pub mod texel {
        pub use crate::palette::*;
        pub use crate::surface::*;
    }

    // Geometry
    pub mod geometry {
        pub use crate::geometry::*;
    }

    // Host sub-module with stage and combiner types
    pub mod host {
        pub use crate::host::*;
        pub use crate::recording_host::*;
    }

    // Test cases
    pub mod suite {
        pub use crate::suite::*;
    }
}

// Re-export math library at crate root
pub use glam;
