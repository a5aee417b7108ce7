//! 解码器 trait 定义.
//!
//! 所有解码器实现必须实现 `Decoder` trait.

use adsdec_core::AdsResult;

use crate::codec_id::CodecId;
use crate::codec_parameters::{AudioCodecParams, CodecParameters};
use crate::frame::AudioFrame;

/// 单次解码调用的结果
#[derive(Debug)]
pub struct DecodeOutput {
    /// 本次调用消费的输入字节数 (含头部)
    pub consumed: usize,
    /// 解码出的音频帧, `None` 表示数据不足以构成一个完整块
    pub frame: Option<AudioFrame>,
}

/// 解码器 trait
///
/// 解码流程:
/// 1. 调用 `start()` 开始一条新流
/// 2. 按顺序对每个数据块调用 `decode()`, 未被消费的尾部字节由调用方保留,
///    并拼接到下一个数据块之前再次送入
/// 3. 调用 `stop()` 结束
///
/// 每个实例只服务一条流, 多条流并发解码时各自持有独立实例.
pub trait Decoder: Send {
    /// 获取解码器标识
    fn codec_id(&self) -> CodecId;

    /// 获取解码器名称
    fn name(&self) -> &str;

    /// 开始一条新流
    ///
    /// 默认实现为空操作.
    fn start(&mut self, _params: &CodecParameters) -> AdsResult<()> {
        Ok(())
    }

    /// 解码一个数据块
    ///
    /// # 返回
    /// - `Ok(DecodeOutput)`: 消费的字节数, 以及可能产出的一帧
    /// - `Err(AdsError::InvalidData)`: 码流损坏, 调用方必须放弃该流
    /// - `Err(AdsError::OutOfMemory)`: 输出缓冲分配失败
    fn decode(&mut self, data: &[u8]) -> AdsResult<DecodeOutput>;

    /// 结束解码
    ///
    /// 默认实现为空操作.
    fn stop(&mut self) {}

    /// 首次调用 `decode()` 前希望缓冲的字节数
    ///
    /// 头部位置不固定的码流需要一段扫描窗口. 默认不要求.
    fn probe_size(&self) -> usize {
        0
    }

    /// 单次 `decode()` 能取得进展所需的最小字节数, 0 表示未知
    ///
    /// 待解码数据达到该长度而解码器仍不消费任何字节时, 说明该流无法继续解码.
    fn input_unit(&self) -> usize {
        0
    }

    /// 输出流参数, 在解码器从码流中得知参数之前为 `None`
    fn output_params(&self) -> Option<&AudioCodecParams> {
        None
    }
}
