//! 解码器注册表.
//!
//! 按注册顺序保存解码器描述, 先注册者优先. 除按 `CodecId` 创建实例外,
//! 还可以用各解码器的探测函数从码流开头识别编码.

use adsdec_core::{AdsError, AdsResult};

use crate::codec_id::CodecId;
use crate::decoder::Decoder;

/// 解码器工厂函数类型
pub type DecoderFactory = fn() -> AdsResult<Box<dyn Decoder>>;

/// 码流探测函数: 输入码流开头, 判断是否属于该解码器
pub type ProbeFn = fn(&[u8]) -> bool;

/// 解码器描述
#[derive(Clone, Copy)]
pub struct DecoderDescriptor {
    pub codec_id: CodecId,
    pub name: &'static str,
    pub factory: DecoderFactory,
    /// 自描述码流的探测函数, 需要容器告知编码的解码器为 `None`
    pub probe: Option<ProbeFn>,
}

/// 解码器注册表
#[derive(Default)]
pub struct CodecRegistry {
    decoders: Vec<DecoderDescriptor>,
}

impl CodecRegistry {
    /// 创建空的注册表
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册一个解码器
    pub fn register(&mut self, descriptor: DecoderDescriptor) {
        self.decoders.push(descriptor);
    }

    /// 创建指定编解码器的解码器实例
    pub fn create_decoder(&self, codec_id: CodecId) -> AdsResult<Box<dyn Decoder>> {
        self.find(|d| d.codec_id == codec_id)
            .ok_or_else(|| AdsError::CodecNotFound(format!("未找到 {codec_id} 的解码器")))
            .and_then(|d| (d.factory)())
    }

    /// 由码流开头识别编码, 返回第一个探测成功的解码器
    pub fn detect(&self, head: &[u8]) -> Option<CodecId> {
        self.find(|d| d.probe.is_some_and(|probe| probe(head)))
            .map(|d| d.codec_id)
    }

    /// 已注册的解码器, 按优先级排列
    pub fn list_decoders(&self) -> Vec<(CodecId, &str)> {
        self.decoders.iter().map(|d| (d.codec_id, d.name)).collect()
    }

    fn find(&self, pred: impl Fn(&DecoderDescriptor) -> bool) -> Option<&DecoderDescriptor> {
        self.decoders.iter().find(|d| pred(d))
    }
}
