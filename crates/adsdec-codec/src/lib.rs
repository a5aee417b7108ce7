//! # adsdec-codec
//!
//! 编解码器库, 提供解码器框架与 Packet/Frame 抽象.
//!
//! 本 crate 对标 FFmpeg 的 libavcodec, 定义了解码器注册、解码流程的核心抽象,
//! 并实现 Sony ADS (PS2/PSP/Xbox 视频流中的交织 PCM) 解码器.
//!
//! ## 使用示例
//!
//! ```rust
//! use adsdec_codec::{CodecId, CodecRegistry, StreamDecoder};
//!
//! let mut reg = CodecRegistry::new();
//! adsdec_codec::register_all(&mut reg);
//!
//! let decoder = reg.create_decoder(CodecId::Ads).unwrap();
//! let stream = StreamDecoder::new(decoder);
//! assert_eq!(stream.pending_len(), 0);
//! ```

pub mod buffer;
pub mod codec_id;
pub mod codec_parameters;
pub mod decoder;
pub mod decoders;
pub mod frame;
pub mod packet;
pub mod registry;
pub mod stream_decoder;

// 重导出常用类型
pub use buffer::{BufferAllocator, HeapAllocator};
pub use codec_id::CodecId;
pub use codec_parameters::{AudioCodecParams, CodecParameters, CodecParamsType};
pub use decoder::{DecodeOutput, Decoder};
pub use frame::AudioFrame;
pub use packet::Packet;
pub use registry::CodecRegistry;
pub use stream_decoder::StreamDecoder;

/// 注册所有内置编解码器
pub fn register_all(registry: &mut CodecRegistry) {
    decoders::register_all_decoders(registry);
}
