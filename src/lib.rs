//! # adsdec
//!
//! 纯 Rust 实现的 Sony ADS 音频解码器.
//!
//! ADS 是 PlayStation 2 / PSP / Xbox 视频流中使用的交织 PCM 音频:
//! 首个数据块内嵌 SShd/SSbd 头部, 之后是按块、按声道平面存放的 16 位采样.
//! 本库定位头部、提取流参数, 并把块结构数据转换为时间交错的 S16 PCM.
//!
//! # 快速开始
//!
//! ```rust,no_run
//! use adsdec::codec::{CodecId, CodecParameters, Packet, StreamDecoder};
//!
//! let data = std::fs::read("movie.ads").unwrap();
//! let registry = adsdec::default_codec_registry();
//! let mut stream = StreamDecoder::new(registry.create_decoder(CodecId::Ads).unwrap());
//! stream.start(&CodecParameters::for_codec(CodecId::Ads)).unwrap();
//!
//! for chunk in data.chunks(0x800) {
//!     stream.send_packet(&Packet::from_data(chunk.to_vec())).unwrap();
//!     while let Ok(frame) = stream.receive_frame() {
//!         println!("{} 采样 @ {}", frame.nb_samples, frame.timestamp());
//!     }
//! }
//! stream.send_packet(&Packet::empty()).unwrap();
//! ```
//!
//! # Crate 结构
//!
//! | Crate | 功能 |
//! |-------|------|
//! | `adsdec-core` | 核心类型与错误 |
//! | `adsdec-codec` | 解码器框架与 ADS 解码器 |

/// 核心类型与工具 (对标 libavutil)
pub use adsdec_core as core;

/// 解码器框架 (对标 libavcodec)
pub use adsdec_codec as codec;

/// 获取版本号
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// 创建已注册所有内置解码器的注册表
pub fn default_codec_registry() -> adsdec_codec::CodecRegistry {
    let mut registry = adsdec_codec::CodecRegistry::new();
    adsdec_codec::register_all(&mut registry);
    registry
}
