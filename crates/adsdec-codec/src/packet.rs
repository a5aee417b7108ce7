//! 数据包 (Packet).
//!
//! 对标 FFmpeg 的 `AVPacket`, 表示上游按顺序送来的一段码流.

use bytes::Bytes;

/// 数据包
///
/// ADS 码流没有帧边界, 一个 Packet 只是连续码流中的一段字节.
#[derive(Debug, Clone)]
pub struct Packet {
    /// 码流数据
    pub data: Bytes,
    /// 在输入中的字节偏移量 (-1 表示未知)
    pub pos: i64,
}

impl Packet {
    /// 创建空数据包
    pub fn empty() -> Self {
        Self {
            data: Bytes::new(),
            pos: -1,
        }
    }

    /// 从数据创建数据包
    pub fn from_data(data: impl Into<Bytes>) -> Self {
        Self {
            data: data.into(),
            ..Self::empty()
        }
    }

    /// 设置输入偏移量
    pub fn with_pos(mut self, pos: i64) -> Self {
        self.pos = pos;
        self
    }

    /// 数据大小 (字节)
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// 是否为空包 (flush packet)
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
