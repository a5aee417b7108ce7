//! 编解码器参数.
//!
//! 对标 FFmpeg 的 `AVCodecParameters`, 描述编解码器的配置参数.

use adsdec_core::{ChannelLayout, SampleFormat};

use crate::codec_id::CodecId;

/// 编解码器参数
///
/// 传递给解码器 `start()` 的配置信息. ADS 码流自描述, 容器给出的音频参数
/// 只用于和头部核对.
#[derive(Debug, Clone)]
pub struct CodecParameters {
    /// 编解码器标识
    pub codec_id: CodecId,
    /// 媒体类型特定参数
    pub params: CodecParamsType,
}

/// 媒体类型特定参数
#[derive(Debug, Clone)]
pub enum CodecParamsType {
    /// 音频参数
    Audio(AudioCodecParams),
    /// 无特定参数
    None,
}

/// 音频编解码器参数
#[derive(Debug, Clone, PartialEq)]
pub struct AudioCodecParams {
    /// 采样率 (Hz)
    pub sample_rate: u32,
    /// 声道布局
    pub channel_layout: ChannelLayout,
    /// 采样格式
    pub sample_format: SampleFormat,
    /// 每帧采样数 (0 表示可变)
    pub frame_size: u32,
}

impl CodecParameters {
    /// 仅携带编解码器标识的参数
    pub fn for_codec(codec_id: CodecId) -> Self {
        Self {
            codec_id,
            params: CodecParamsType::None,
        }
    }

    /// 附带容器声明的音频参数
    pub fn with_audio(codec_id: CodecId, audio: AudioCodecParams) -> Self {
        Self {
            codec_id,
            params: CodecParamsType::Audio(audio),
        }
    }

    /// 获取音频参数 (如果是音频流)
    pub fn audio(&self) -> Option<&AudioCodecParams> {
        match &self.params {
            CodecParamsType::Audio(a) => Some(a),
            CodecParamsType::None => None,
        }
    }
}
