/// Rendering host capability trait
///
/// The host owns the display, the GPU push buffer and frame persistence. It
/// is implemented by the surrounding test harness; this crate only drives it.

use std::path::Path;

use crate::error::Result;
use crate::format::TextureFormatDescriptor;
use crate::geometry::VertexBuffer;
use crate::palette::PaletteSize;
use crate::surface::Surface;

// ============================================================================
// Texture stage
// ============================================================================

/// Sampling configuration of one texture stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureStage {
    enabled: bool,
    width: u32,
    height: u32,
    depth: u32,
}

impl Default for TextureStage {
    fn default() -> Self {
        Self {
            enabled: false,
            width: 0,
            height: 0,
            depth: 1,
        }
    }
}

impl TextureStage {
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Set the sampled texture size; `depth > 1` makes the stage volumetric
    pub fn set_dimensions(&mut self, width: u32, height: u32, depth: u32) {
        self.width = width;
        self.height = height;
        self.depth = depth;
    }

    /// (width, height, depth)
    pub fn dimensions(&self) -> (u32, u32, u32) {
        (self.width, self.height, self.depth)
    }
}

// ============================================================================
// Fixed-function configuration
// ============================================================================

/// Texture shader stage program
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStageProgram {
    /// Stage disabled
    None,
    /// 2D texture lookup
    Stage2d,
    /// 3D texture lookup with projective coordinates
    Stage3dProjective,
    /// Cube map lookup
    CubeMap,
}

/// Input or output of a register combiner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombinerRegister {
    Zero,
    Texture0,
    Diffuse,
}

/// Register combiner setup for a single stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CombinerConfig {
    /// Combiner stage index
    pub stage: u32,
    /// Color input A (B is inverted zero, i.e. one)
    pub color_input: CombinerRegister,
    /// Alpha input A (B is inverted zero, i.e. one)
    pub alpha_input: CombinerRegister,
    /// Register receiving A*B for color
    pub color_output: CombinerRegister,
    /// Register receiving A*B for alpha
    pub alpha_output: CombinerRegister,
    /// Final combiner color source
    pub final_color: CombinerRegister,
    /// Final combiner alpha source
    pub final_alpha: CombinerRegister,
}

impl CombinerConfig {
    /// Route texture 0 unmodified to the framebuffer through diffuse
    pub fn texture0_passthrough() -> Self {
        Self {
            stage: 0,
            color_input: CombinerRegister::Texture0,
            alpha_input: CombinerRegister::Texture0,
            color_output: CombinerRegister::Diffuse,
            alpha_output: CombinerRegister::Diffuse,
            final_color: CombinerRegister::Diffuse,
            final_alpha: CombinerRegister::Diffuse,
        }
    }
}

// ============================================================================
// TestHost trait
// ============================================================================

/// Rendering host driven by the conformance cases.
///
/// Upload methods report rejection with `Error::UploadFailure`;
/// `finish_draw` reports with `Error::HostFailure`.
pub trait TestHost {
    /// Select the texture format used by subsequent uploads
    fn set_texture_format(&mut self, format: &TextureFormatDescriptor);

    /// Currently selected texture format
    fn texture_format(&self) -> Option<&TextureFormatDescriptor>;

    /// Largest texture width the host will upload
    fn max_texture_width(&self) -> u32;

    /// Largest texture height the host will upload
    fn max_texture_height(&self) -> u32;

    /// Upload `layers` as one volumetric texture, layer 0 first
    fn set_volumetric_texture(&mut self, layers: &[Surface]) -> Result<()>;

    /// Upload raw texel data as is
    #[allow(clippy::too_many_arguments)]
    fn set_raw_texture(
        &mut self,
        data: &[u8],
        width: u32,
        height: u32,
        depth: u32,
        pitch: u32,
        bytes_per_pixel: u32,
        swizzle: bool,
    ) -> Result<()>;

    /// Upload a palette of `size` entries
    fn set_palette(&mut self, palette: &[u32], size: PaletteSize) -> Result<()>;

    /// Configuration of texture stage `stage`
    ///
    /// # Panics
    ///
    /// Implementations panic when `stage` is not below their stage count
    /// (4 for `RecordingHost`).
    fn texture_stage_mut(&mut self, stage: u32) -> &mut TextureStage;

    /// Draw without a vertex shader program
    fn use_fixed_function_pipeline(&mut self);

    fn set_default_viewport_and_fixed_function_matrices(&mut self);

    fn set_shader_stage_program(&mut self, stage: u32, program: ShaderStageProgram);

    fn set_combiners(&mut self, config: &CombinerConfig);

    /// Replace the vertex buffer used by `draw_arrays`
    fn set_vertex_buffer(&mut self, buffer: VertexBuffer);

    /// Begin a frame, clearing to `background_color` (ARGB)
    fn prepare_draw(&mut self, background_color: u32);

    /// Draw the current vertex buffer as triangles
    fn draw_arrays(&mut self);

    /// Render diagnostic text lines over the frame
    fn draw_text(&mut self, lines: &[String]);

    /// Finish the frame, saving it as `name` under `output_dir` when
    /// `allow_saving` is set
    fn finish_draw(&mut self, allow_saving: bool, output_dir: &Path, name: &str) -> Result<()>;
}
