//! 解码后的帧数据 (Frame).
//!
//! 对标 FFmpeg 的 `AVFrame`, 表示解码后的原始音频数据.

use adsdec_core::{ChannelLayout, Rational, SampleFormat, Timestamp};

/// 音频帧
///
/// 包含解码后的原始音频采样数据, 所有声道交替排列在单个平面中.
#[derive(Debug, Clone)]
pub struct AudioFrame {
    /// 音频采样数据, 只有一个平面
    pub data: Vec<Vec<u8>>,
    /// 本帧包含的采样数 (每声道)
    pub nb_samples: u32,
    /// 采样率 (Hz)
    pub sample_rate: u32,
    /// 采样格式
    pub sample_format: SampleFormat,
    /// 声道布局
    pub channel_layout: ChannelLayout,
    /// 显示时间戳 (PTS)
    pub pts: i64,
    /// 时间基
    pub time_base: Rational,
    /// 帧时长 (以 time_base 为单位)
    pub duration: i64,
}

impl AudioFrame {
    /// 创建空的音频帧
    pub fn new(
        nb_samples: u32,
        sample_rate: u32,
        sample_format: SampleFormat,
        channel_layout: ChannelLayout,
    ) -> Self {
        Self {
            data: vec![Vec::new()],
            nb_samples,
            sample_rate,
            sample_format,
            channel_layout,
            pts: adsdec_core::timestamp::NOPTS_VALUE,
            time_base: Rational::UNDEFINED,
            duration: 0,
        }
    }

    /// 帧起始时间戳
    pub fn timestamp(&self) -> Timestamp {
        Timestamp::new(self.pts, self.time_base)
    }

    /// 帧结束时间戳, 即下一帧应有的起始时间戳
    pub fn end_timestamp(&self) -> Timestamp {
        self.timestamp().advance(self.duration)
    }

    /// 以 i16 读取交错采样
    pub fn samples_s16(&self) -> Vec<i16> {
        self.data
            .first()
            .map(|plane| {
                plane
                    .chunks_exact(2)
                    .map(|b| i16::from_le_bytes([b[0], b[1]]))
                    .collect()
            })
            .unwrap_or_default()
    }
}
