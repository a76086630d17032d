//! 数据集读写
//!
//! 输入: `{ voxels, pixel_values, bounds }`, 形状为 `[frame][camera][item]`。
//! 输出: `{ voxels, colours, bounds }`, 形状为 `[frame][item]`, `bounds` 原样透传。

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::{DatasetError, FrameResult, HullError, RawColour, RawFrame, RawVoxel};

/// 重建范围参数; 只解释 `stepsize`, 其余字段透传
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub stepsize: f64,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoxelDataset {
    pub voxels: Vec<Vec<Vec<RawVoxel>>>,
    pub pixel_values: Vec<Vec<Vec<RawColour>>>,
    pub bounds: Bounds,
}

impl VoxelDataset {
    pub fn num_frames(&self) -> usize {
        self.voxels.len()
    }

    /// 拆成逐帧数据, 消耗数据集本身, 不复制相机列表
    pub fn into_frames(self) -> Result<Vec<RawFrame>, HullError> {
        if self.voxels.len() != self.pixel_values.len() {
            return Err(HullError::ShapeMismatch {
                context: "dataset frame count (pixel_values)".to_string(),
                expected: self.voxels.len(),
                actual: self.pixel_values.len(),
            });
        }
        Ok(self
            .voxels
            .into_iter()
            .zip(self.pixel_values)
            .map(|(voxels, pixel_values)| RawFrame {
                voxels,
                pixel_values,
            })
            .collect())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntersectionDataset {
    pub voxels: Vec<Vec<[i32; 3]>>,
    pub colours: Vec<Vec<[f32; 3]>>,
    pub bounds: Bounds,
}

impl IntersectionDataset {
    pub fn from_results(results: &[FrameResult], bounds: Bounds) -> Self {
        Self {
            voxels: results
                .iter()
                .map(|r| r.voxels.iter().map(|v| v.to_array()).collect())
                .collect(),
            colours: results
                .iter()
                .map(|r| r.colours.iter().map(|c| c.to_array()).collect())
                .collect(),
            bounds,
        }
    }
}

pub fn load_dataset(path: impl AsRef<Path>) -> Result<VoxelDataset, DatasetError> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

pub fn save_intersection(
    path: impl AsRef<Path>,
    dataset: &IntersectionDataset,
) -> Result<(), DatasetError> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut writer, dataset)?;
    writer.flush()?;
    Ok(())
}

// ===============================================================================
// 紧凑二进制导出
// ===============================================================================

/// 单个体素的打包记录, 16 字节
/// 颜色量化到 0-255, alpha 固定 255
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Pod, Zeroable)]
pub struct PackedVoxel {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl PackedVoxel {
    pub fn pack(voxel: glam::IVec3, colour: glam::Vec3) -> Self {
        let [r, g, b] = colour.to_array().map(quantise);
        Self {
            x: voxel.x,
            y: voxel.y,
            z: voxel.z,
            r,
            g,
            b,
            a: u8::MAX,
        }
    }

    /// 字段转为小端表示; 在小端机器上为恒等
    #[inline]
    fn to_le(self) -> Self {
        Self {
            x: self.x.to_le(),
            y: self.y.to_le(),
            z: self.z.to_le(),
            ..self
        }
    }

    #[inline]
    fn le_to_native(self) -> Self {
        Self {
            x: i32::from_le(self.x),
            y: i32::from_le(self.y),
            z: i32::from_le(self.z),
            ..self
        }
    }
}

#[inline]
fn quantise(channel: f32) -> u8 {
    (channel * 255.0).round().clamp(0.0, 255.0) as u8
}

/// 布局: `u32 帧数`, 每帧 `u32 体素数` + `PackedVoxel[体素数]`
/// 所有整数 (含 `PackedVoxel` 的坐标) 均为小端
pub fn write_packed(path: impl AsRef<Path>, results: &[FrameResult]) -> Result<(), DatasetError> {
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(&(results.len() as u32).to_le_bytes())?;
    for result in results {
        let records: Vec<PackedVoxel> = result
            .voxels
            .iter()
            .zip(&result.colours)
            .map(|(v, c)| PackedVoxel::pack(*v, *c).to_le())
            .collect();
        writer.write_all(&(records.len() as u32).to_le_bytes())?;
        writer.write_all(bytemuck::cast_slice(&records))?;
    }
    writer.flush()?;
    Ok(())
}

/// [`write_packed`] 的逆操作
pub fn read_packed(path: impl AsRef<Path>) -> Result<Vec<Vec<PackedVoxel>>, DatasetError> {
    let bytes = std::fs::read(path)?;
    let mut cursor = bytes.as_slice();
    let frames = take_u32(&mut cursor)? as usize;
    // 帧数来自文件头, 不可信; 每帧至少占 4 字节
    let mut out = Vec::with_capacity(frames.min(cursor.len() / 4));
    for _ in 0..frames {
        let count = take_u32(&mut cursor)? as usize;
        let size = count
            .checked_mul(std::mem::size_of::<PackedVoxel>())
            .filter(|&size| size <= cursor.len())
            .ok_or_else(|| truncated(&format!("{count} voxel records"), cursor.len()))?;
        let (head, rest) = cursor.split_at(size);
        out.push(
            head.chunks_exact(std::mem::size_of::<PackedVoxel>())
                .map(|chunk| {
                    bytemuck::pod_read_unaligned::<PackedVoxel>(chunk).le_to_native()
                })
                .collect(),
        );
        cursor = rest;
    }
    Ok(out)
}

fn take_u32(cursor: &mut &[u8]) -> Result<u32, DatasetError> {
    let Some((head, rest)) = cursor.split_first_chunk::<4>() else {
        return Err(truncated("a u32 length", cursor.len()));
    };
    *cursor = rest;
    Ok(u32::from_le_bytes(*head))
}

fn truncated(what: &str, left: usize) -> DatasetError {
    DatasetError::Io(std::io::Error::new(
        std::io::ErrorKind::UnexpectedEof,
        format!("packed voxel stream truncated: expected {what}, {left} bytes left"),
    ))
}
