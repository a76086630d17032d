use ahash::AHashSet;
use glam::{IVec3, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use voxel_hull::{CameraView, HullError, intersect};

fn view(index: usize, voxels: &[[i32; 3]]) -> CameraView {
    let voxels: Vec<IVec3> = voxels.iter().copied().map(IVec3::from_array).collect();
    let colours = vec![Vec3::ZERO; voxels.len()];
    CameraView::from_grid(index, voxels, colours).expect("aligned camera")
}

#[test]
fn test_two_cameras() {
    let a = view(0, &[[0, 0, 0], [1, 1, 1]]);
    let b = view(1, &[[1, 1, 1], [2, 2, 2]]);

    let hull = intersect(&[a, b]).expect("intersection");
    assert_eq!(hull, vec![IVec3::new(1, 1, 1)]);
}

#[test]
fn test_single_camera_is_deduplicated_set() {
    let a = view(0, &[[3, 0, 0], [1, 1, 1], [3, 0, 0], [0, 0, 0], [1, 1, 1]]);

    let hull = intersect(&[a]).expect("intersection");
    // 0 号相机首次出现顺序
    assert_eq!(
        hull,
        vec![IVec3::new(3, 0, 0), IVec3::new(1, 1, 1), IVec3::ZERO]
    );
}

#[test]
fn test_zero_cameras_is_invalid() {
    let err = intersect(&[]).unwrap_err();
    assert!(matches!(err, HullError::InvalidInput(_)));
}

#[test]
fn test_empty_camera_empties_hull() {
    let a = view(0, &[[0, 0, 0], [1, 1, 1]]);
    let b = view(1, &[]);

    assert!(intersect(&[a, b]).expect("intersection").is_empty());
}

#[test]
fn test_multiplicity_ignored() {
    let a = view(0, &[[5, 5, 5], [5, 5, 5], [5, 5, 5]]);
    let b = view(1, &[[5, 5, 5]]);
    let c = view(2, &[[6, 6, 6], [5, 5, 5], [5, 5, 5]]);

    assert_eq!(
        intersect(&[a, b, c]).expect("intersection"),
        vec![IVec3::splat(5)]
    );
}

/// 随机相机上的集合性质
#[test]
fn test_random_views_hold_hull_properties() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..50 {
        let cameras = rng.gen_range(1..=5);
        let views: Vec<CameraView> = (0..cameras)
            .map(|index| {
                let n = rng.gen_range(0..64);
                let voxels: Vec<[i32; 3]> = (0..n)
                    .map(|_| {
                        [
                            rng.gen_range(-2..2),
                            rng.gen_range(-2..2),
                            rng.gen_range(-2..2),
                        ]
                    })
                    .collect();
                view(index, &voxels)
            })
            .collect();

        let hull = intersect(&views).expect("intersection");

        let unique: AHashSet<IVec3> = hull.iter().copied().collect();
        assert_eq!(unique.len(), hull.len(), "hull voxels must be unique");
        for voxel in &hull {
            assert!(views.iter().all(|v| v.contains(voxel)));
        }
        let min_unique = views.iter().map(CameraView::unique_len).min().unwrap();
        assert!(hull.len() <= min_unique);

        // 暴力求交对照
        let expected: AHashSet<IVec3> = views[0]
            .voxels
            .iter()
            .copied()
            .filter(|v| views.iter().all(|view| view.voxels.contains(v)))
            .collect();
        assert_eq!(unique, expected);
    }
}
