//! 音频采样格式定义.
//!
//! 对标 FFmpeg 的 `AVSampleFormat`.

use std::fmt;

/// 音频采样格式
///
/// ADS 码流只携带 16 位有符号小端采样, 解码输出为交错排列 (LRLRLR...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum SampleFormat {
    /// 未指定
    None,
    /// 有符号 16 位整数, 交错
    S16,
}

impl SampleFormat {
    /// 每个采样点占用的字节数
    pub const fn bytes_per_sample(&self) -> u32 {
        match self {
            Self::None => 0,
            Self::S16 => 2,
        }
    }
}

impl fmt::Display for SampleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "none",
            Self::S16 => "s16",
        };
        write!(f, "{name}")
    }
}
