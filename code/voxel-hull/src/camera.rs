//! 单个相机在一帧内的体素视图
//!
//! 体素与颜色按下标一一对应; 变换过程中两者都不重排。
//! `first_occurrence` 记录每个网格体素第一次出现的位置, 上色时按它取色,
//! 避免对体素序列做线性查找。

use ahash::AHashMap;
use glam::{IVec3, Vec3};

use crate::{ChannelOrder, GridTransform, HullError, RawColour, RawVoxel, normalise_all};

#[derive(Debug, Clone)]
pub struct CameraView {
    /// 相机编号, 决定上色时的扫描顺序
    pub index: usize,
    pub voxels: Vec<IVec3>,
    pub colours: Vec<Vec3>,
    first_occurrence: AHashMap<IVec3, usize>,
}

impl CameraView {
    pub fn from_raw(
        index: usize,
        raw_voxels: &[RawVoxel],
        raw_colours: &[RawColour],
        transform: &GridTransform,
        order: ChannelOrder,
    ) -> Result<Self, HullError> {
        check_aligned(index, raw_voxels.len(), raw_colours.len())?;
        Self::from_grid(
            index,
            transform.apply_all(raw_voxels)?,
            normalise_all(raw_colours, order),
        )
    }

    /// 由已经在网格坐标、RGB 归一化颜色下的数据构建
    pub fn from_grid(
        index: usize,
        voxels: Vec<IVec3>,
        colours: Vec<Vec3>,
    ) -> Result<Self, HullError> {
        check_aligned(index, voxels.len(), colours.len())?;
        let mut first_occurrence = AHashMap::with_capacity(voxels.len());
        for (i, voxel) in voxels.iter().enumerate() {
            first_occurrence.entry(*voxel).or_insert(i);
        }
        Ok(Self {
            index,
            voxels,
            colours,
            first_occurrence,
        })
    }

    #[inline]
    pub fn contains(&self, voxel: &IVec3) -> bool {
        self.first_occurrence.contains_key(voxel)
    }

    /// 体素第一次出现处的颜色
    #[inline]
    pub fn colour_of(&self, voxel: &IVec3) -> Option<Vec3> {
        self.first_occurrence.get(voxel).map(|&i| self.colours[i])
    }

    /// 去重后的体素数
    pub fn unique_len(&self) -> usize {
        self.first_occurrence.len()
    }

    pub fn len(&self) -> usize {
        self.voxels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voxels.is_empty()
    }
}

fn check_aligned(index: usize, voxels: usize, colours: usize) -> Result<(), HullError> {
    if voxels == colours {
        Ok(())
    } else {
        Err(HullError::ShapeMismatch {
            context: format!("camera {index} colours"),
            expected: voxels,
            actual: colours,
        })
    }
}
