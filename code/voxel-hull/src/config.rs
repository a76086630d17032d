use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::transform;
use crate::{ChannelOrder, ColourMode, DatasetError, GridTransform, HullError, VoxelIntersector};

/// 后处理配置
/// `stepsize` 不在这里: 它属于每个数据集的 `bounds`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HullConfig {
    /// 网格单元的世界尺寸, 所有相机共用
    pub block_size: f64,
    pub channel_order: ChannelOrder,
    pub colour_mode: ColourMode,
    /// 随机上色的种子; 为空时每次运行结果不同
    pub seed: Option<u64>,
}

impl Default for HullConfig {
    fn default() -> Self {
        Self {
            block_size: 1.0,
            channel_order: ChannelOrder::Bgr,
            colour_mode: ColourMode::Sampled,
            seed: None,
        }
    }
}

impl HullConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), HullError> {
        transform::check_positive("block_size", self.block_size)
    }

    pub fn intersector(&self, stepsize: f64) -> Result<VoxelIntersector, HullError> {
        let transform = GridTransform::camera_to_grid(self.block_size, stepsize)?;
        Ok(VoxelIntersector::new(transform, self.colour_mode)
            .with_channel_order(self.channel_order))
    }
}
