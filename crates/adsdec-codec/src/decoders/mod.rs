//! 解码器实现模块.

pub mod ads;

use crate::codec_id::CodecId;
use crate::registry::{CodecRegistry, DecoderDescriptor};

/// 注册所有内置解码器
pub fn register_all_decoders(registry: &mut CodecRegistry) {
    registry.register(DecoderDescriptor {
        codec_id: CodecId::Ads,
        name: "ads",
        factory: ads::AdsDecoder::create,
        probe: Some(ads::AdsHeader::probe),
    });
}
