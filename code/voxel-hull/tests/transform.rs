use enum_map::enum_map;
use glam::IVec3;
use voxel_hull::{Axis, AxisFlip, GridTransform, HullError};

#[test]
fn test_camera_to_grid_swaps_and_flips() {
    let transform = GridTransform::camera_to_grid(1.0, 1.0).expect("valid transform");

    // (2,4,6) -> 重排 (2,6,4) -> 翻转 (2,-6,4) -> 缩放 x1
    assert_eq!(transform.apply([2, 4, 6]).expect("in range"), IVec3::new(2, -6, 4));
    assert_eq!(transform.apply([0, 0, 0]).expect("in range"), IVec3::ZERO);
}

#[test]
fn test_scale_rounds_half_to_even() {
    // scale = 0.5
    let transform = GridTransform::camera_to_grid(1.0, 2.0).expect("valid transform");
    assert_eq!(transform.scale(), 0.5);

    // (1,0,3) -> (1,-3,0) -> (0.5,-1.5,0.0) -> (0,-2,0)
    assert_eq!(transform.apply([1, 0, 3]).expect("in range"), IVec3::new(0, -2, 0));
    // (3,0,5) -> (3,-5,0) -> (1.5,-2.5,0.0) -> (2,-2,0)
    assert_eq!(transform.apply([3, 0, 5]).expect("in range"), IVec3::new(2, -2, 0));
    // 0.75 取整为 1, 不是截断
    let transform = GridTransform::camera_to_grid(3.0, 4.0).expect("valid transform");
    assert_eq!(transform.apply([1, 0, 0]).expect("in range"), IVec3::new(1, 0, 0));
}

#[test]
fn test_block_size_scales_up() {
    let transform = GridTransform::camera_to_grid(115.0, 5.0).expect("valid transform");
    assert_eq!(transform.apply([1, 2, -3]).expect("in range"), IVec3::new(23, 69, 46));
}

#[test]
fn test_apply_all_preserves_order_and_length() {
    let transform = GridTransform::camera_to_grid(1.0, 2.0).expect("valid transform");
    let raw = vec![[4, 0, 0], [0, 0, 0], [1, 0, 0], [4, 0, 0]];
    let grid = transform.apply_all(&raw).expect("in range");

    // [1,0,0] 与 [0,0,0] 缩放后都落在原点, 但序列中仍各占一项
    assert_eq!(
        grid,
        vec![
            IVec3::new(2, 0, 0),
            IVec3::ZERO,
            IVec3::ZERO,
            IVec3::new(2, 0, 0),
        ]
    );
}

#[test]
fn test_out_of_range_coordinate_rejected() {
    let transform = GridTransform::camera_to_grid(115.0, 5.0).expect("valid transform");

    // 23 * 2e8 与 23 * 3e8 都超出 i32, 不能饱和成同一个坐标
    for raw in [[200_000_000, 0, 0], [300_000_000, 0, 0], [0, 0, -100_000_000]] {
        let err = transform.apply(raw).unwrap_err();
        assert!(matches!(err, HullError::InvalidInput(_)), "{err}");
    }
    let err = transform.apply_all(&[[1, 0, 0], [0, i32::MAX, 0]]).unwrap_err();
    assert!(matches!(err, HullError::InvalidInput(_)), "{err}");

    // 边界内仍然正常
    assert_eq!(
        transform.apply([93_368_854, 0, 0]).expect("in range"),
        IVec3::new(2_147_483_642, 0, 0)
    );
}

#[test]
fn test_custom_permutation() {
    let transform = GridTransform::new(
        1.0,
        1.0,
        enum_map! {
            Axis::X => Axis::Z,
            Axis::Y => Axis::X,
            Axis::Z => Axis::Y,
        },
        AxisFlip::X | AxisFlip::Z,
    )
    .expect("valid transform");
    assert_eq!(transform.apply([1, 2, 3]).expect("in range"), IVec3::new(-3, 1, -2));
}

#[test]
fn test_invalid_parameters_rejected() {
    for (block_size, stepsize) in [(1.0, 0.0), (0.0, 1.0), (f64::NAN, 1.0), (1.0, -2.0)] {
        let err = GridTransform::camera_to_grid(block_size, stepsize).unwrap_err();
        assert!(matches!(err, HullError::InvalidParameter(_)), "{err}");
    }

    let err = GridTransform::new(
        1.0,
        1.0,
        enum_map! {
            Axis::X => Axis::X,
            Axis::Y => Axis::X,
            Axis::Z => Axis::Y,
        },
        AxisFlip::empty(),
    )
    .unwrap_err();
    assert!(matches!(err, HullError::InvalidParameter(_)));
}
