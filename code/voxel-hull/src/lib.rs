mod colour;
mod colourise;
mod config;
mod error;
mod intersect;
pub mod camera;
pub mod dataset;
pub mod frame;
pub mod transform;

pub use camera::CameraView;
pub use colour::{ChannelOrder, normalise, normalise_all};
pub use colourise::{ColourMode, colourise};
pub use config::HullConfig;
pub use error::{DatasetError, HullError};
pub use frame::{FrameResult, RawFrame, VoxelIntersector};
pub use intersect::intersect;
pub use transform::{Axis, AxisFlip, GridTransform};

// ===============================================================================
// 基础类型定义
// ===============================================================================

/// 相机原始体素坐标 (相机局部, 未缩放)
pub type RawVoxel = [i32; 3];

/// 相机原始像素采样, 0-255 范围
pub type RawColour = [f32; 3];
