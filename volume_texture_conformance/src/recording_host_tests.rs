/// Tests for RecordingHost
///
/// Validates call recording, upload validation and failure injection.

use super::*;
use crate::error::Error;
use crate::surface::generate_gradient_surface;

fn layers(width: u32, height: u32) -> Vec<Surface> {
    (0..4).map(|d| generate_gradient_surface(width, height, d).unwrap()).collect()
}

// ============================================================================
// Tests: Volumetric upload
// ============================================================================

#[test]
fn test_volumetric_upload_stores_layers() {
    let mut host = RecordingHost::new(64, 64);
    host.set_volumetric_texture(&layers(64, 32)).unwrap();

    assert_eq!(host.volume().len(), 4);
    assert_eq!(host.calls(), &[HostCall::SetVolumetricTexture { layers: 4 }]);
}

#[test]
fn test_volumetric_upload_rejects_oversized_layers() {
    let mut host = RecordingHost::new(32, 32);
    let result = host.set_volumetric_texture(&layers(64, 64));
    assert!(matches!(result, Err(Error::UploadFailure(_))));
    assert!(host.volume().is_empty());
}

#[test]
fn test_volumetric_upload_rejects_empty() {
    let mut host = RecordingHost::default();
    assert!(matches!(host.set_volumetric_texture(&[]), Err(Error::UploadFailure(_))));
}

#[test]
fn test_volumetric_upload_rejects_mismatched_layers() {
    let mut host = RecordingHost::default();
    let mixed = vec![
        generate_gradient_surface(16, 16, 0).unwrap(),
        generate_gradient_surface(8, 16, 1).unwrap(),
    ];
    assert!(matches!(host.set_volumetric_texture(&mixed), Err(Error::UploadFailure(_))));
}

// ============================================================================
// Tests: Raw upload and palette
// ============================================================================

#[test]
fn test_raw_upload_stores_data() {
    let mut host = RecordingHost::default();
    let data = vec![7u8; 4 * 4 * 2];
    host.set_raw_texture(&data, 4, 4, 2, 4, 1, true).unwrap();

    assert_eq!(host.raw_texture(), data.as_slice());
}

#[test]
fn test_raw_upload_rejects_short_data() {
    let mut host = RecordingHost::default();
    let data = vec![0u8; 10];
    let result = host.set_raw_texture(&data, 4, 4, 2, 4, 1, true);
    assert!(matches!(result, Err(Error::UploadFailure(_))));
}

#[test]
fn test_raw_upload_rejects_small_pitch() {
    let mut host = RecordingHost::default();
    let data = vec![0u8; 64];
    let result = host.set_raw_texture(&data, 4, 4, 1, 2, 1, false);
    assert!(matches!(result, Err(Error::UploadFailure(_))));
}

#[test]
fn test_raw_upload_rejects_overflowing_row() {
    let mut host = RecordingHost::default();
    let result = host.set_raw_texture(&[0u8; 16], u32::MAX, 1, 1, u32::MAX, 4, false);
    assert!(matches!(result, Err(Error::UploadFailure(_))));
    assert!(host.raw_texture().is_empty());
}

#[test]
fn test_raw_upload_truncates_trailing_bytes() {
    let mut host = RecordingHost::default();
    let data = vec![3u8; 40];
    host.set_raw_texture(&data, 4, 4, 2, 4, 1, true).unwrap();
    assert_eq!(host.raw_texture().len(), 32);
}

#[test]
fn test_palette_upload_checks_size() {
    let mut host = RecordingHost::default();
    assert!(host.set_palette(&[0u32; 32], PaletteSize::Entries32).is_ok());
    assert_eq!(host.palette().len(), 32);

    let result = host.set_palette(&[0u32; 32], PaletteSize::Entries64);
    assert!(matches!(result, Err(Error::UploadFailure(_))));
}

// ============================================================================
// Tests: Failure injection
// ============================================================================

#[test]
fn test_fail_on_palette_upload() {
    let mut host = RecordingHost::default();
    host.fail_on(FailurePoint::PaletteUpload);

    assert!(host.set_palette(&[0u32; 256], PaletteSize::Entries256).is_err());
    // The call is still recorded
    assert_eq!(host.calls(), &[HostCall::SetPalette(PaletteSize::Entries256)]);

    host.clear_failures();
    assert!(host.set_palette(&[0u32; 256], PaletteSize::Entries256).is_ok());
}

#[test]
fn test_fail_on_finish_draw() {
    let mut host = RecordingHost::default();
    host.fail_on(FailurePoint::FinishDraw);

    let result = host.finish_draw(true, Path::new("out"), "SZ_A8");
    assert!(matches!(result, Err(Error::HostFailure(_))));
    assert!(host.saved_frames().is_empty());
}

// ============================================================================
// Tests: Frames and stages
// ============================================================================

#[test]
fn test_finish_draw_saves_only_when_allowed() {
    let mut host = RecordingHost::default();
    host.finish_draw(false, Path::new("out"), "a").unwrap();
    host.finish_draw(true, Path::new("out"), "b").unwrap();

    assert_eq!(host.saved_frames(), &[PathBuf::from("out").join("b.png")]);
}

#[test]
fn test_texture_stage_dimensions() {
    let mut host = RecordingHost::default();
    assert_eq!(host.texture_stage(0).dimensions(), (0, 0, 1));

    host.texture_stage_mut(0).set_dimensions(256, 128, 4);
    host.texture_stage_mut(0).set_enabled(true);

    assert_eq!(host.texture_stage(0).dimensions(), (256, 128, 4));
    assert!(host.texture_stage(0).is_enabled());
    assert!(!host.texture_stage(1).is_enabled());
}

#[test]
#[should_panic]
fn test_texture_stage_out_of_range_panics() {
    let mut host = RecordingHost::default();
    host.texture_stage_mut(TEXTURE_STAGE_COUNT as u32);
}

#[test]
fn test_texture_format_tracking() {
    let mut host = RecordingHost::default();
    assert!(host.texture_format().is_none());

    let format = TextureFormatDescriptor::new("SZ_A8R8G8B8", 0x06, true, false);
    host.set_texture_format(&format);

    assert_eq!(host.texture_format(), Some(&format));
    assert_eq!(host.calls(), &[HostCall::SetTextureFormat(0x06)]);
}
