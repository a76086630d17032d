use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::RawColour;

/// 原始像素采样的通道顺序
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelOrder {
    /// OpenCV 风格
    #[default]
    Bgr,
    Rgb,
}

/// 0-255 -> 0.0-1.0, 输出固定为 RGB
/// 不做截断, 超出 0-255 的输入会得到超出 [0,1] 的结果
#[inline]
pub fn normalise(raw: RawColour, order: ChannelOrder) -> Vec3 {
    let [a, b, c] = raw.map(|ch| ch / 255.0);
    match order {
        ChannelOrder::Bgr => Vec3::new(c, b, a),
        ChannelOrder::Rgb => Vec3::new(a, b, c),
    }
}

pub fn normalise_all(raw: &[RawColour], order: ChannelOrder) -> Vec<Vec3> {
    raw.iter().map(|c| normalise(*c, order)).collect()
}
