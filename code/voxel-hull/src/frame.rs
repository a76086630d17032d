//! 单帧处理: 坐标/颜色变换 -> 求交 -> 上色
//!
//! 帧之间互不依赖, [`VoxelIntersector::process_frames`] 用 rayon 并行处理多帧;
//! 帧内部的三个阶段严格串行。

use std::time::Instant;

use glam::{IVec3, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::{
    CameraView, ChannelOrder, ColourMode, GridTransform, HullError, RawColour, RawVoxel,
    colourise, intersect,
};

/// 一个时刻所有相机的原始数据
/// `voxels[c]` 与 `pixel_values[c]` 按下标一一对应
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawFrame {
    pub voxels: Vec<Vec<RawVoxel>>,
    pub pixel_values: Vec<Vec<RawColour>>,
}

impl RawFrame {
    pub fn num_cameras(&self) -> usize {
        self.voxels.len()
    }
}

/// 单帧结果: 每个存活体素对应一个 RGB 颜色
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameResult {
    pub voxels: Vec<IVec3>,
    pub colours: Vec<Vec3>,
}

impl FrameResult {
    pub fn len(&self) -> usize {
        self.voxels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voxels.is_empty()
    }

    /// 按 (x, y, z) 字典序排序, 颜色跟随体素移动
    pub fn sorted(self) -> Self {
        let mut pairs: Vec<(IVec3, Vec3)> = self.voxels.into_iter().zip(self.colours).collect();
        pairs.sort_by_key(|(voxel, _)| voxel.to_array());
        let (voxels, colours) = pairs.into_iter().unzip();
        Self { voxels, colours }
    }
}

/// 多相机体素求交器
#[derive(Debug, Clone)]
pub struct VoxelIntersector {
    pub transform: GridTransform,
    pub channel_order: ChannelOrder,
    pub mode: ColourMode,
}

impl VoxelIntersector {
    pub fn new(transform: GridTransform, mode: ColourMode) -> Self {
        Self {
            transform,
            channel_order: ChannelOrder::default(),
            mode,
        }
    }

    pub fn with_channel_order(mut self, order: ChannelOrder) -> Self {
        self.channel_order = order;
        self
    }

    /// 把一帧的每个相机变换到网格坐标
    pub fn camera_views(&self, frame: &RawFrame) -> Result<Vec<CameraView>, HullError> {
        if frame.voxels.len() != frame.pixel_values.len() {
            return Err(HullError::ShapeMismatch {
                context: "frame camera count (pixel_values)".to_string(),
                expected: frame.voxels.len(),
                actual: frame.pixel_values.len(),
            });
        }
        if frame.voxels.is_empty() {
            return Err(HullError::InvalidInput("frame has no cameras".to_string()));
        }

        frame
            .voxels
            .iter()
            .zip(&frame.pixel_values)
            .enumerate()
            .map(|(index, (voxels, colours))| {
                CameraView::from_raw(index, voxels, colours, &self.transform, self.channel_order)
            })
            .collect()
    }

    pub fn process_frame<R: Rng>(
        &self,
        frame: &RawFrame,
        rng: &mut R,
    ) -> Result<FrameResult, HullError> {
        let views = self.camera_views(frame)?;
        let voxels = intersect(&views)?;
        let colours = colourise(&voxels, &views, self.mode, rng)?;

        tracing::debug!(
            cameras = views.len(),
            input = views.iter().map(CameraView::len).sum::<usize>(),
            survivors = voxels.len(),
            "frame intersected"
        );
        Ok(FrameResult { voxels, colours })
    }

    /// 并行处理多帧, 结果按输入顺序返回
    ///
    /// 给定 `seed` 时第 `i` 帧使用 `seed + i` 作为随机种子, 随机上色可复现。
    /// 任何一帧失败都会中止整个批次。
    pub fn process_frames(
        &self,
        frames: &[RawFrame],
        seed: Option<u64>,
    ) -> Result<Vec<FrameResult>, HullError> {
        let started = Instant::now();
        let results = frames
            .par_iter()
            .enumerate()
            .map(|(i, frame)| {
                let mut rng = match seed {
                    Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(i as u64)),
                    None => StdRng::from_entropy(),
                };
                self.process_frame(frame, &mut rng).inspect_err(|err| {
                    tracing::error!(frame = i, %err, "frame post-processing failed");
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        tracing::info!(
            frames = results.len(),
            voxels = results.iter().map(FrameResult::len).sum::<usize>(),
            mode = ?self.mode,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "post-processing finished"
        );
        Ok(results)
    }
}
