use glam::{IVec3, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{CameraView, HullError};

/// 存活体素的上色方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColourMode {
    /// 按相机编号扫描, 取第一个包含该体素的相机中首次出现处的颜色
    #[default]
    Sampled,
    /// 所有包含该体素的相机颜色取平均
    Averaged,
    /// 每个通道独立均匀采样 [0, 1)
    Randomised,
}

/// 为每个体素给出且只给出一个颜色, 顺序与 `voxels` 相同
///
/// `Sampled`/`Averaged` 下若某个体素不在任何相机中, 说明调用方传入的不是
/// 这些相机的交集, 返回 [`HullError::InternalInvariantViolation`]。
pub fn colourise<R: Rng>(
    voxels: &[IVec3],
    views: &[CameraView],
    mode: ColourMode,
    rng: &mut R,
) -> Result<Vec<Vec3>, HullError> {
    match mode {
        ColourMode::Sampled => voxels
            .iter()
            .map(|voxel| {
                views
                    .iter()
                    .find_map(|view| view.colour_of(voxel))
                    .ok_or_else(|| orphan(voxel))
            })
            .collect(),
        ColourMode::Averaged => voxels
            .iter()
            .map(|voxel| {
                let (sum, n) = views
                    .iter()
                    .filter_map(|view| view.colour_of(voxel))
                    .fold((Vec3::ZERO, 0u32), |(sum, n), c| (sum + c, n + 1));
                if n == 0 {
                    Err(orphan(voxel))
                } else {
                    Ok(sum / n as f32)
                }
            })
            .collect(),
        ColourMode::Randomised => Ok(voxels
            .iter()
            .map(|_| {
                Vec3::new(
                    rng.gen_range(0.0..1.0),
                    rng.gen_range(0.0..1.0),
                    rng.gen_range(0.0..1.0),
                )
            })
            .collect()),
    }
}

fn orphan(voxel: &IVec3) -> HullError {
    HullError::InternalInvariantViolation(format!(
        "voxel {voxel} survived the intersection but no camera contains it"
    ))
}
