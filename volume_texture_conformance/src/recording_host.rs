/// Recording host - in-memory TestHost (no GPU required)
///
/// Records every call in order, keeps a copy of uploaded data the way
/// texture memory would, and can be told to reject a given operation. Used
/// for dry runs of the suite and by the tests.

use std::path::{Path, PathBuf};
use rustc_hash::FxHashSet;

use crate::error::Result;
use crate::format::TextureFormatDescriptor;
use crate::geometry::VertexBuffer;
use crate::host::{CombinerConfig, ShaderStageProgram, TestHost, TextureStage};
use crate::palette::PaletteSize;
use crate::surface::Surface;
use crate::{conformance_bail, conformance_err, conformance_trace, conformance_warn};

const SOURCE: &str = "vtc::RecordingHost";

/// Number of texture stages exposed by the host
pub const TEXTURE_STAGE_COUNT: usize = 4;

/// One recorded host call
#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    SetTextureFormat(u32),
    SetVolumetricTexture { layers: usize },
    SetRawTexture {
        width: u32,
        height: u32,
        depth: u32,
        pitch: u32,
        bytes_per_pixel: u32,
        swizzle: bool,
    },
    SetPalette(PaletteSize),
    UseFixedFunctionPipeline,
    SetDefaultViewport,
    SetShaderStageProgram { stage: u32, program: ShaderStageProgram },
    SetCombiners(CombinerConfig),
    SetVertexBuffer { vertices: usize },
    PrepareDraw(u32),
    DrawArrays,
    DrawText(Vec<String>),
    FinishDraw { allow_saving: bool, output_dir: PathBuf, name: String },
}

/// Operations that can be made to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailurePoint {
    VolumetricUpload,
    RawUpload,
    PaletteUpload,
    FinishDraw,
}

/// In-memory host
pub struct RecordingHost {
    max_texture_width: u32,
    max_texture_height: u32,
    format: Option<TextureFormatDescriptor>,
    stages: [TextureStage; TEXTURE_STAGE_COUNT],
    calls: Vec<HostCall>,
    volume: Vec<Surface>,
    raw_texture: Vec<u8>,
    palette: Vec<u32>,
    vertex_buffer: Option<VertexBuffer>,
    saved_frames: Vec<PathBuf>,
    failures: FxHashSet<FailurePoint>,
}

impl RecordingHost {
    pub fn new(max_texture_width: u32, max_texture_height: u32) -> Self {
        Self {
            max_texture_width,
            max_texture_height,
            format: None,
            stages: [TextureStage::default(); TEXTURE_STAGE_COUNT],
            calls: Vec::new(),
            volume: Vec::new(),
            raw_texture: Vec::new(),
            palette: Vec::new(),
            vertex_buffer: None,
            saved_frames: Vec::new(),
            failures: FxHashSet::default(),
        }
    }

    /// Make `point` fail until `clear_failures` is called
    pub fn fail_on(&mut self, point: FailurePoint) {
        self.failures.insert(point);
    }

    pub fn clear_failures(&mut self) {
        self.failures.clear();
    }

    /// Every call so far, in order
    pub fn calls(&self) -> &[HostCall] {
        &self.calls
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    /// Layers of the last volumetric upload
    pub fn volume(&self) -> &[Surface] {
        &self.volume
    }

    /// Data of the last raw upload
    pub fn raw_texture(&self) -> &[u8] {
        &self.raw_texture
    }

    /// Last uploaded palette
    pub fn palette(&self) -> &[u32] {
        &self.palette
    }

    pub fn vertex_buffer(&self) -> Option<&VertexBuffer> {
        self.vertex_buffer.as_ref()
    }

    /// Paths of frames finished with saving enabled
    pub fn saved_frames(&self) -> &[PathBuf] {
        &self.saved_frames
    }

    /// Configuration of texture stage `stage`
    ///
    /// # Panics
    ///
    /// Panics if `stage >= TEXTURE_STAGE_COUNT`.
    pub fn texture_stage(&self, stage: u32) -> &TextureStage {
        &self.stages[stage as usize]
    }

    fn should_fail(&self, point: FailurePoint) -> bool {
        self.failures.contains(&point)
    }
}

impl Default for RecordingHost {
    fn default() -> Self {
        Self::new(256, 256)
    }
}

impl TestHost for RecordingHost {
    fn set_texture_format(&mut self, format: &TextureFormatDescriptor) {
        self.calls.push(HostCall::SetTextureFormat(format.format_code));
        self.format = Some(*format);
    }

    fn texture_format(&self) -> Option<&TextureFormatDescriptor> {
        self.format.as_ref()
    }

    fn max_texture_width(&self) -> u32 {
        self.max_texture_width
    }

    fn max_texture_height(&self) -> u32 {
        self.max_texture_height
    }

    fn set_volumetric_texture(&mut self, layers: &[Surface]) -> Result<()> {
        self.calls.push(HostCall::SetVolumetricTexture { layers: layers.len() });

        if self.should_fail(FailurePoint::VolumetricUpload) {
            conformance_bail!(UploadFailure, SOURCE, "volumetric upload rejected");
        }
        let Some(first) = layers.first() else {
            conformance_bail!(UploadFailure, SOURCE, "volumetric upload without layers");
        };
        if layers.iter().any(|l| l.width() != first.width() || l.height() != first.height()) {
            conformance_bail!(UploadFailure, SOURCE, "volumetric layers differ in size");
        }
        if first.width() > self.max_texture_width || first.height() > self.max_texture_height {
            conformance_bail!(UploadFailure, SOURCE,
                "volumetric layers {}x{} exceed {}x{}",
                first.width(), first.height(), self.max_texture_width, self.max_texture_height);
        }

        self.volume = layers.to_vec();
        conformance_trace!(SOURCE, "stored {} volumetric layers", layers.len());
        Ok(())
    }

    fn set_raw_texture(
        &mut self,
        data: &[u8],
        width: u32,
        height: u32,
        depth: u32,
        pitch: u32,
        bytes_per_pixel: u32,
        swizzle: bool,
    ) -> Result<()> {
        self.calls.push(HostCall::SetRawTexture { width, height, depth, pitch, bytes_per_pixel, swizzle });

        if self.should_fail(FailurePoint::RawUpload) {
            conformance_bail!(UploadFailure, SOURCE, "raw upload rejected");
        }
        let row_bytes = width.checked_mul(bytes_per_pixel).ok_or_else(|| conformance_err!(
            UploadFailure, SOURCE, "row of {} pixels of {} bytes overflows", width, bytes_per_pixel))?;
        if pitch < row_bytes {
            conformance_bail!(UploadFailure, SOURCE,
                "pitch {} too small for {} pixels of {} bytes", pitch, width, bytes_per_pixel);
        }
        let expected = (pitch as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(depth as usize))
            .ok_or_else(|| conformance_err!(UploadFailure, SOURCE,
                "raw volume {}x{}x{} with pitch {} overflows", width, height, depth, pitch))?;
        if data.len() < expected {
            conformance_bail!(UploadFailure, SOURCE,
                "raw upload of {} bytes, expected {}", data.len(), expected);
        }
        if data.len() > expected {
            conformance_warn!(SOURCE, "raw upload ignores {} trailing bytes", data.len() - expected);
        }

        self.raw_texture = data[..expected].to_vec();
        conformance_trace!(SOURCE, "stored {} raw texture bytes", expected);
        Ok(())
    }

    fn set_palette(&mut self, palette: &[u32], size: PaletteSize) -> Result<()> {
        self.calls.push(HostCall::SetPalette(size));

        if self.should_fail(FailurePoint::PaletteUpload) {
            conformance_bail!(UploadFailure, SOURCE, "palette upload rejected");
        }
        if palette.len() != size.entries() as usize {
            conformance_bail!(UploadFailure, SOURCE,
                "palette of {} entries for size {}", palette.len(), size.entries());
        }

        self.palette = palette.to_vec();
        Ok(())
    }

    fn texture_stage_mut(&mut self, stage: u32) -> &mut TextureStage {
        &mut self.stages[stage as usize]
    }

    fn use_fixed_function_pipeline(&mut self) {
        self.calls.push(HostCall::UseFixedFunctionPipeline);
    }

    fn set_default_viewport_and_fixed_function_matrices(&mut self) {
        self.calls.push(HostCall::SetDefaultViewport);
    }

    fn set_shader_stage_program(&mut self, stage: u32, program: ShaderStageProgram) {
        self.calls.push(HostCall::SetShaderStageProgram { stage, program });
    }

    fn set_combiners(&mut self, config: &CombinerConfig) {
        self.calls.push(HostCall::SetCombiners(*config));
    }

    fn set_vertex_buffer(&mut self, buffer: VertexBuffer) {
        self.calls.push(HostCall::SetVertexBuffer { vertices: buffer.num_vertices() });
        self.vertex_buffer = Some(buffer);
    }

    fn prepare_draw(&mut self, background_color: u32) {
        self.calls.push(HostCall::PrepareDraw(background_color));
    }

    fn draw_arrays(&mut self) {
        self.calls.push(HostCall::DrawArrays);
    }

    fn draw_text(&mut self, lines: &[String]) {
        self.calls.push(HostCall::DrawText(lines.to_vec()));
    }

    fn finish_draw(&mut self, allow_saving: bool, output_dir: &Path, name: &str) -> Result<()> {
        self.calls.push(HostCall::FinishDraw {
            allow_saving,
            output_dir: output_dir.to_path_buf(),
            name: name.to_string(),
        });

        if self.should_fail(FailurePoint::FinishDraw) {
            conformance_bail!(HostFailure, SOURCE, "frame '{}' could not be finished", name);
        }
        if allow_saving {
            self.saved_frames.push(output_dir.join(format!("{}.png", name)));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "recording_host_tests.rs"]
mod tests;
