//! 编解码器标识符.
//!
//! 对标 FFmpeg 的 `AVCodecID`, 为每种编解码算法分配唯一标识.

use std::fmt;

/// 编解码器标识符
///
/// 唯一标识一种编解码算法, 与容器格式无关.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum CodecId {
    /// 未知编解码器
    None,
    /// Sony ADS (PS2/PSP/Xbox 视频流中的块交织 PCM)
    Ads,
    /// PCM 有符号 16 位小端 (ADS 解码器的输出)
    PcmS16le,
}

impl CodecId {
    /// 获取编解码器的简短名称
    pub const fn name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Ads => "ads",
            Self::PcmS16le => "pcm_s16le",
        }
    }

    /// 获取编解码器的完整名称
    pub const fn long_name(&self) -> &'static str {
        match self {
            Self::None => "unknown",
            Self::Ads => "Sony ADS (PS2)",
            Self::PcmS16le => "PCM signed 16-bit little-endian",
        }
    }

    /// 按简短名称查找编解码器
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ads" => Some(Self::Ads),
            "pcm_s16le" => Some(Self::PcmS16le),
            _ => None,
        }
    }
}

impl fmt::Display for CodecId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
