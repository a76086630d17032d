use ahash::AHashSet;
use glam::IVec3;

use crate::{CameraView, HullError};

/// 所有相机都占据的体素 (visual hull)
///
/// 输出顺序为 0 号相机中首次出现的顺序, 每个体素只出现一次。
pub fn intersect(views: &[CameraView]) -> Result<Vec<IVec3>, HullError> {
    let Some(first) = views.first() else {
        return Err(HullError::InvalidInput(
            "cannot intersect voxels of zero cameras".to_string(),
        ));
    };

    // 先用最小的集合筛选, 减少哈希查询
    let smallest = views
        .iter()
        .min_by_key(|view| view.unique_len())
        .unwrap_or(first);
    let survivors: AHashSet<IVec3> = smallest
        .voxels
        .iter()
        .copied()
        .filter(|voxel| views.iter().all(|view| view.contains(voxel)))
        .collect();

    let mut emitted = AHashSet::with_capacity(survivors.len());
    let hull = first
        .voxels
        .iter()
        .copied()
        .filter(|voxel| survivors.contains(voxel) && emitted.insert(*voxel))
        .collect();
    Ok(hull)
}
