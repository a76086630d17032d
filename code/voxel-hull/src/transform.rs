//! 相机体素坐标 -> 世界网格坐标
//!
//! 轴重排、翻转、按 `block_size / stepsize` 缩放, 最后四舍六入五成双取整。
//! 所有相机必须共用同一个 [`GridTransform`], 否则求交结果没有意义。

use bitflags::bitflags;
use enum_map::{Enum, EnumMap, enum_map};
use glam::IVec3;

use crate::{HullError, RawVoxel};

/// 坐标轴枚举：X/Y/Z
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Enum)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    #[inline]
    fn flip(self) -> AxisFlip {
        match self {
            Axis::X => AxisFlip::X,
            Axis::Y => AxisFlip::Y,
            Axis::Z => AxisFlip::Z,
        }
    }
}

bitflags! {
    /// 重排之后需要取反的输出轴
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct AxisFlip: u8 {
        const X = 0b001;
        const Y = 0b010;
        const Z = 0b100;
    }
}

/// 输出轴 -> 读取的输入轴
pub type AxisPermutation = EnumMap<Axis, Axis>;

#[derive(Debug, Clone, PartialEq)]
pub struct GridTransform {
    /// 网格单元的世界尺寸
    pub block_size: f64,
    /// 本次重建的体素粒度除数
    pub stepsize: f64,
    pub permutation: AxisPermutation,
    pub flips: AxisFlip,
}

impl GridTransform {
    pub fn new(
        block_size: f64,
        stepsize: f64,
        permutation: AxisPermutation,
        flips: AxisFlip,
    ) -> Result<Self, HullError> {
        check_positive("block_size", block_size)?;
        check_positive("stepsize", stepsize)?;

        // 每个输入轴恰好被读取一次
        let mut seen = [false; 3];
        for (_, source) in permutation.iter() {
            seen[source.index()] = true;
        }
        if seen.contains(&false) {
            return Err(HullError::InvalidParameter(format!(
                "axis permutation is not a bijection: {:?}",
                permutation
            )));
        }

        Ok(Self {
            block_size,
            stepsize,
            permutation,
            flips,
        })
    }

    /// 相机坐标系 (x, y, z) -> 网格 (x, -z, y)
    pub fn camera_to_grid(block_size: f64, stepsize: f64) -> Result<Self, HullError> {
        Self::new(
            block_size,
            stepsize,
            enum_map! {
                Axis::X => Axis::X,
                Axis::Y => Axis::Z,
                Axis::Z => Axis::Y,
            },
            AxisFlip::Y,
        )
    }

    #[inline]
    pub fn scale(&self) -> f64 {
        self.block_size / self.stepsize
    }

    /// 缩放后超出 i32 范围的坐标返回 [`HullError::InvalidInput`],
    /// 不做饱和截断, 否则不同体素会塌缩成同一个网格坐标
    pub fn apply(&self, raw: RawVoxel) -> Result<IVec3, HullError> {
        let mut out = [0i32; 3];
        for axis in Axis::ALL {
            let mut v = raw[self.permutation[axis].index()] as f64;
            if self.flips.contains(axis.flip()) {
                v = -v;
            }
            // 取整而非截断
            let rounded = (v * self.block_size / self.stepsize).round_ties_even();
            if !(i32::MIN as f64..=i32::MAX as f64).contains(&rounded) {
                return Err(HullError::InvalidInput(format!(
                    "voxel {raw:?} scales to {rounded} on axis {axis:?}, outside the i32 grid"
                )));
            }
            out[axis.index()] = rounded as i32;
        }
        Ok(IVec3::from_array(out))
    }

    /// 保持顺序与长度, 以便与颜色序列一一对应
    pub fn apply_all(&self, raw: &[RawVoxel]) -> Result<Vec<IVec3>, HullError> {
        raw.iter().map(|v| self.apply(*v)).collect()
    }
}

pub(crate) fn check_positive(name: &str, value: f64) -> Result<(), HullError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(HullError::InvalidParameter(format!(
            "{name} must be finite and > 0, got {value}"
        )))
    }
}
