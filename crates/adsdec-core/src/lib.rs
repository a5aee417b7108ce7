//! # adsdec-core
//!
//! ADS 解码框架核心库, 提供基础类型定义与错误处理.
//!
//! 本 crate 对标 FFmpeg 的 libavutil, 只保留 PCM 音频解码所需的那一部分:
//! 采样格式、声道布局、时间基与时间戳.

pub mod channel_layout;
pub mod error;
pub mod rational;
pub mod sample_format;
pub mod timestamp;

// 重导出常用类型
pub use channel_layout::ChannelLayout;
pub use error::{AdsError, AdsResult};
pub use rational::Rational;
pub use sample_format::SampleFormat;
pub use timestamp::Timestamp;
