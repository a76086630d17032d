use glam::Vec3;
use voxel_hull::{ChannelOrder, normalise, normalise_all};

#[test]
fn test_bgr_to_rgb() {
    let rgb = normalise([255.0, 0.0, 128.0], ChannelOrder::Bgr);
    assert_eq!(rgb, Vec3::new(128.0 / 255.0, 0.0, 1.0));
    assert!((rgb.x - 0.502).abs() < 1e-3);
}

#[test]
fn test_rgb_input_kept() {
    let rgb = normalise([255.0, 0.0, 51.0], ChannelOrder::Rgb);
    assert_eq!(rgb, Vec3::new(1.0, 0.0, 0.2));
}

#[test]
fn test_normalise_all_in_unit_range() {
    let raw: Vec<[f32; 3]> = (0..=255)
        .step_by(17)
        .map(|v| [v as f32, (255 - v) as f32, 0.0])
        .collect();
    let colours = normalise_all(&raw, ChannelOrder::Bgr);

    assert_eq!(colours.len(), raw.len());
    for (c, r) in colours.iter().zip(&raw) {
        assert!(c.cmpge(Vec3::ZERO).all() && c.cmple(Vec3::ONE).all());
        assert_eq!(c.z, r[0] / 255.0);
    }
}
