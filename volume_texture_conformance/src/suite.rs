//! Volume texture test suite.
//!
//! One test case per swizzled, non-palettized format uploads four gradient
//! layers as a volumetric texture. The palettized format gets a dedicated case
//! that uploads raw indices and a palette. Both draw the four-quadrant
//! geometry, print the format details over the frame and hand the frame to
//! the host under the format's name.

use std::path::PathBuf;

use crate::error::Result;
use crate::format::{select_volumetric_formats, FormatRegistry, TextureFormatDescriptor};
use crate::geometry::build_volume_geometry;
use crate::host::{CombinerConfig, ShaderStageProgram, TestHost};
use crate::palette::{generate_palette, generate_palettized_surface, PaletteSize};
use crate::surface::{generate_gradient_surface, Surface};
use crate::{conformance_bail, conformance_debug, conformance_error, conformance_info};

const SOURCE: &str = "vtc::Suite";

/// Name of the suite as reported to the harness
pub const SUITE_NAME: &str = "Volume texture";

/// Depth of every generated volume
pub const TEXTURE_DEPTH: u32 = 4;

/// Clear color (ARGB) behind the quads
pub const DEFAULT_BACKGROUND_COLOR: u32 = 0xFE20_2020;

/// Texture stage that samples the volume
const VOLUME_STAGE: u32 = 0;

// ============================================================================
// Configuration
// ============================================================================

/// Suite configuration
#[derive(Debug, Clone)]
pub struct SuiteConfig {
    /// Directory frames are saved under
    pub output_dir: PathBuf,
    /// Whether the host should persist finished frames
    pub allow_saving: bool,
    /// Palette size used by the palettized case
    pub palette_size: PaletteSize,
    /// Clear color (ARGB)
    pub background_color: u32,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("volume_texture"),
            allow_saving: true,
            palette_size: PaletteSize::Entries256,
            background_color: DEFAULT_BACKGROUND_COLOR,
        }
    }
}

// ============================================================================
// Test cases
// ============================================================================

/// A single test case of the suite
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestCase {
    /// Gradient layers uploaded as a volumetric texture
    Volume(TextureFormatDescriptor),
    /// Raw palette indices plus an explicit palette
    Palettized(TextureFormatDescriptor),
}

impl TestCase {
    /// Test name (the format name)
    pub fn name(&self) -> &'static str {
        self.format().name
    }

    pub fn format(&self) -> &TextureFormatDescriptor {
        match self {
            TestCase::Volume(format) | TestCase::Palettized(format) => format,
        }
    }
}

/// Progress of a running case
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseState {
    Idle,
    Configured,
    LayersGenerated,
    Uploaded,
    Rendered,
    Persisted,
}

struct CaseTracker {
    name: &'static str,
    state: CaseState,
}

impl CaseTracker {
    fn new(name: &'static str) -> Self {
        Self { name, state: CaseState::Idle }
    }

    fn advance(&mut self, next: CaseState) {
        conformance_debug!(SOURCE, "{}: {:?} -> {:?}", self.name, self.state, next);
        self.state = next;
    }

    /// Log the outcome and return to Idle
    fn conclude(&mut self, result: &Result<()>) {
        match result {
            Ok(()) => conformance_info!(SOURCE, "{}: passed", self.name),
            Err(err) => conformance_error!(SOURCE, "{}: aborted after {:?}: {}", self.name, self.state, err),
        }
        self.state = CaseState::Idle;
    }
}

/// Diagnostic lines printed over every frame
pub fn overlay_lines(format: &TextureFormatDescriptor) -> Vec<String> {
    vec![
        format!("N: {}", format.name),
        format!("F: 0x{:x}", format.format_code),
        format!("SZ: {}", format.swizzled as u8),
        format!("C: {}", format.requires_conversion as u8),
    ]
}

// ============================================================================
// Case bodies
// ============================================================================

/// Run the volumetric case for `format`.
///
/// # Errors
///
/// Fails when a layer cannot be generated, the host rejects the volumetric
/// upload or the frame cannot be finished.
pub fn run_volume_case(
    host: &mut dyn TestHost,
    format: &TextureFormatDescriptor,
    config: &SuiteConfig,
) -> Result<()> {
    let mut tracker = CaseTracker::new(format.name);
    let result = volume_case_steps(host, format, config, &mut tracker);
    tracker.conclude(&result);
    result
}

fn volume_case_steps(
    host: &mut dyn TestHost,
    format: &TextureFormatDescriptor,
    config: &SuiteConfig,
    tracker: &mut CaseTracker,
) -> Result<()> {
    host.set_texture_format(format);
    tracker.advance(CaseState::Configured);

    let width = host.max_texture_width();
    let height = host.max_texture_height();

    let layers = (0..TEXTURE_DEPTH as i32)
        .map(|d| generate_gradient_surface(width, height, d))
        .collect::<Result<Vec<Surface>>>()?;
    tracker.advance(CaseState::LayersGenerated);

    let uploaded = host.set_volumetric_texture(&layers);
    drop(layers);
    uploaded?;
    tracker.advance(CaseState::Uploaded);

    host.texture_stage_mut(VOLUME_STAGE).set_dimensions(width, height, TEXTURE_DEPTH);

    host.prepare_draw(config.background_color);
    host.draw_arrays();
    host.draw_text(&overlay_lines(format));
    tracker.advance(CaseState::Rendered);

    host.finish_draw(config.allow_saving, &config.output_dir, format.name)?;
    tracker.advance(CaseState::Persisted);

    Ok(())
}

/// Run the palettized case for `format`.
///
/// # Errors
///
/// Fails when the index volume cannot be generated, the host rejects the raw
/// upload or the palette, or the frame cannot be finished.
pub fn run_palettized_case(
    host: &mut dyn TestHost,
    format: &TextureFormatDescriptor,
    config: &SuiteConfig,
) -> Result<()> {
    let mut tracker = CaseTracker::new(format.name);
    let result = palettized_case_steps(host, format, config, &mut tracker);
    tracker.conclude(&result);
    result
}

fn palettized_case_steps(
    host: &mut dyn TestHost,
    format: &TextureFormatDescriptor,
    config: &SuiteConfig,
    tracker: &mut CaseTracker,
) -> Result<()> {
    host.prepare_draw(config.background_color);

    host.set_texture_format(format);
    tracker.advance(CaseState::Configured);

    let width = host.max_texture_width();
    let height = host.max_texture_height();

    let indices = generate_palettized_surface(width, height, TEXTURE_DEPTH, config.palette_size)?;
    tracker.advance(CaseState::LayersGenerated);

    // One byte per index, rows packed
    let uploaded = host.set_raw_texture(&indices, width, height, TEXTURE_DEPTH, width, 1, format.swizzled);
    drop(indices);
    uploaded?;

    host.texture_stage_mut(VOLUME_STAGE).set_dimensions(width, height, TEXTURE_DEPTH);

    let palette = generate_palette(config.palette_size);
    let uploaded = host.set_palette(&palette, config.palette_size);
    drop(palette);
    uploaded?;
    tracker.advance(CaseState::Uploaded);

    host.draw_arrays();
    host.draw_text(&overlay_lines(format));
    tracker.advance(CaseState::Rendered);

    host.finish_draw(config.allow_saving, &config.output_dir, format.name)?;
    tracker.advance(CaseState::Persisted);

    Ok(())
}

// ============================================================================
// Suite
// ============================================================================

/// The volume texture suite: its configuration and the cases derived from a
/// format table.
pub struct VolumeTextureSuite {
    config: SuiteConfig,
    cases: Vec<TestCase>,
}

impl VolumeTextureSuite {
    /// Build the case list from `registry`.
    ///
    /// Every format kept by `select_volumetric_formats` gets a volume case,
    /// in table order, followed by the palettized case when the registry
    /// carries the palettized format.
    pub fn new(config: SuiteConfig, registry: &FormatRegistry) -> Self {
        let mut cases: Vec<TestCase> = select_volumetric_formats(registry.formats())
            .into_iter()
            .map(|format| TestCase::Volume(*format))
            .collect();

        if let Some(palettized) = registry.palettized() {
            cases.push(TestCase::Palettized(*palettized));
        }

        conformance_debug!(SOURCE, "{} cases from {} formats", cases.len(), registry.len());

        Self { config, cases }
    }

    pub fn config(&self) -> &SuiteConfig {
        &self.config
    }

    pub fn cases(&self) -> &[TestCase] {
        &self.cases
    }

    /// Names of all cases, in run order
    pub fn test_names(&self) -> Vec<&'static str> {
        self.cases.iter().map(TestCase::name).collect()
    }

    /// Prepare the host pipeline: fixed function, the quad geometry, stage 0
    /// as a projective 3D lookup and combiners passing texture 0 through.
    pub fn initialize(&self, host: &mut dyn TestHost) {
        host.use_fixed_function_pipeline();

        let geometry = build_volume_geometry(host.max_texture_width(), host.max_texture_height());
        host.set_vertex_buffer(geometry);

        host.set_default_viewport_and_fixed_function_matrices();
        host.texture_stage_mut(VOLUME_STAGE).set_enabled(true);
        host.set_shader_stage_program(VOLUME_STAGE, ShaderStageProgram::Stage3dProjective);
        host.set_combiners(&CombinerConfig::texture0_passthrough());

        conformance_debug!(SOURCE, "host initialized");
    }

    /// Run one case
    pub fn run(&self, host: &mut dyn TestHost, case: &TestCase) -> Result<()> {
        conformance_info!(SOURCE, "{} / {}", SUITE_NAME, case.name());
        match case {
            TestCase::Volume(format) => run_volume_case(host, format, &self.config),
            TestCase::Palettized(format) => run_palettized_case(host, format, &self.config),
        }
    }

    /// Run the case called `name`
    ///
    /// # Errors
    ///
    /// `Error::UnknownTest` when no case has that name, otherwise the case's
    /// own error.
    pub fn run_named(&self, host: &mut dyn TestHost, name: &str) -> Result<()> {
        let Some(case) = self.cases.iter().find(|case| case.name() == name) else {
            conformance_bail!(UnknownTest, SOURCE, "{}", name);
        };
        self.run(host, case)
    }

    /// Run every case in order, stopping at the first failure.
    ///
    /// Returns the number of cases run.
    pub fn run_all(&self, host: &mut dyn TestHost) -> Result<usize> {
        for case in &self.cases {
            self.run(host, case)?;
        }
        conformance_info!(SOURCE, "{}: {} cases passed", SUITE_NAME, self.cases.len());
        Ok(self.cases.len())
    }
}

#[cfg(test)]
#[path = "suite_tests.rs"]
mod tests;
