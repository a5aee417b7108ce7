//! 分块解码驱动.
//!
//! `Decoder::decode()` 只消费完整的块组, 剩余字节要由调用方保留.
//! `StreamDecoder` 承担这部分职责: 把送入的数据包追加到待解码缓冲,
//! 反复调用解码器直到不再产出帧, 再丢弃已消费的前缀.
//!
//! 对外提供 `send_packet()` / `receive_frame()` 风格的接口:
//! 1. 调用 `send_packet()` 送入码流
//! 2. 调用 `receive_frame()` 取出解码后的帧, 直到返回 `NeedMoreData`
//! 3. 送入空包 (flush) 后, `receive_frame()` 取完剩余帧返回 `Eof`

use std::collections::VecDeque;

use bytes::{Buf, BytesMut};
use log::{debug, trace, warn};

use adsdec_core::{AdsError, AdsResult};

use crate::codec_parameters::{AudioCodecParams, CodecParameters};
use crate::decoder::Decoder;
use crate::frame::AudioFrame;
use crate::packet::Packet;

/// 带输入保留的流式解码器
pub struct StreamDecoder {
    /// 实际的解码器
    decoder: Box<dyn Decoder>,
    /// 尚未被消费的码流
    pending: BytesMut,
    /// 已解码帧队列
    frames: VecDeque<AudioFrame>,
    /// 累计送入的字节数
    bytes_in: u64,
    /// 是否已收到刷新信号
    flushing: bool,
}

impl StreamDecoder {
    /// 包装一个解码器
    pub fn new(decoder: Box<dyn Decoder>) -> Self {
        Self {
            decoder,
            pending: BytesMut::new(),
            frames: VecDeque::new(),
            bytes_in: 0,
            flushing: false,
        }
    }

    /// 开始一条新流, 丢弃之前保留的数据
    pub fn start(&mut self, params: &CodecParameters) -> AdsResult<()> {
        self.pending.clear();
        self.frames.clear();
        self.bytes_in = 0;
        self.flushing = false;
        self.decoder.start(params)
    }

    /// 送入一个数据包
    ///
    /// 空包表示码流结束. 解码器返回的错误原样向上传播, 之后该流不可继续使用.
    pub fn send_packet(&mut self, packet: &Packet) -> AdsResult<()> {
        if packet.is_empty() {
            if !self.flushing {
                self.decode_pending(true)?;
                if !self.pending.is_empty() {
                    debug!(
                        "码流结束, 丢弃不足一个块组的 {} 字节",
                        self.pending.len()
                    );
                }
            }
            self.pending.clear();
            self.flushing = true;
            return Ok(());
        }
        if self.flushing {
            return Err(AdsError::InvalidArgument(
                "已收到刷新信号, 不能继续送入数据".into(),
            ));
        }

        trace!("送入数据包: {} 字节, 偏移 {}", packet.size(), packet.pos);
        self.pending.extend_from_slice(&packet.data);
        self.bytes_in += packet.size() as u64;
        self.decode_pending(false)
    }

    /// 反复解码待解码缓冲, 直到解码器不再产出帧
    ///
    /// 非刷新时, 缓冲不足 `probe_size()` 则先不解码.
    fn decode_pending(&mut self, flushing: bool) -> AdsResult<()> {
        while !self.pending.is_empty() {
            if !flushing && self.pending.len() < self.decoder.probe_size() {
                break;
            }
            let output = self.decoder.decode(&self.pending)?;
            self.pending.advance(output.consumed);
            match output.frame {
                Some(frame) => self.frames.push_back(frame),
                None => {
                    self.check_progress(output.consumed)?;
                    break;
                }
            }
        }
        Ok(())
    }

    /// 缓冲已够一个输入单元却没有消费任何字节, 说明解码器无法从该流产出采样
    ///
    /// 继续保留只会让缓冲无限增长, 因此直接报错.
    fn check_progress(&self, consumed: usize) -> AdsResult<()> {
        let unit = self.decoder.input_unit();
        if consumed == 0 && unit > 0 && self.pending.len() >= unit {
            warn!(
                "{} 解码器在 {} 字节输入上没有进展 (输入单元 {} 字节)",
                self.decoder.name(),
                self.pending.len(),
                unit
            );
            return Err(AdsError::InvalidData(format!(
                "码流无法解码: 已缓冲 {} 字节仍不足以产出采样",
                self.pending.len()
            )));
        }
        Ok(())
    }

    /// 取出一帧
    ///
    /// # 返回
    /// - `Ok(frame)`: 成功取出一帧
    /// - `Err(AdsError::NeedMoreData)`: 需要送入更多数据包
    /// - `Err(AdsError::Eof)`: 所有帧已取出
    pub fn receive_frame(&mut self) -> AdsResult<AudioFrame> {
        if let Some(frame) = self.frames.pop_front() {
            return Ok(frame);
        }
        if self.flushing {
            return Err(AdsError::Eof);
        }
        Err(AdsError::NeedMoreData)
    }

    /// 结束解码
    pub fn stop(&mut self) {
        self.decoder.stop();
    }

    /// 保留待解码的字节数
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// 累计送入的字节数
    pub fn bytes_in(&self) -> u64 {
        self.bytes_in
    }

    /// 解码器得知的输出流参数
    pub fn output_params(&self) -> Option<&AudioCodecParams> {
        self.decoder.output_params()
    }

    /// 内部解码器
    pub fn decoder(&self) -> &dyn Decoder {
        self.decoder.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec_id::CodecId;
    use crate::decoders::ads::{AdsDecoder, HEADER_SIZE, MAX_SCAN_OFFSET};

    fn ads_stream(channels: u32, interleave: u32, body: &[u8]) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.extend_from_slice(b"SShd");
        buf.extend_from_slice(&0x18u32.to_le_bytes());
        buf.extend_from_slice(&1u32.to_le_bytes());
        buf.extend_from_slice(&44100u32.to_le_bytes());
        buf.extend_from_slice(&channels.to_le_bytes());
        buf.extend_from_slice(&interleave.to_le_bytes());
        buf.extend_from_slice(&[0xFF; 8]);
        buf.extend_from_slice(b"SSbd");
        buf.extend_from_slice(&(body.len() as u32).to_le_bytes());
        buf.extend_from_slice(body);
        buf
    }

    fn started() -> StreamDecoder {
        let mut dec = StreamDecoder::new(AdsDecoder::create().unwrap());
        dec.start(&CodecParameters::for_codec(CodecId::Ads)).unwrap();
        dec
    }

    fn drain(dec: &mut StreamDecoder) -> Vec<u8> {
        let mut out = Vec::new();
        while let Ok(frame) = dec.receive_frame() {
            out.extend_from_slice(&frame.data[0]);
        }
        out
    }

    #[test]
    fn test_partial_blocks_retained() {
        let body: Vec<u8> = (0..128u8).collect();
        let stream = ads_stream(1, 8, &body);

        let mut dec = started();
        let mut out = Vec::new();
        // 以 5 字节为单位送入, 头部和块组都会被切断
        for chunk in stream.chunks(5) {
            dec.send_packet(&Packet::from_data(chunk.to_vec())).unwrap();
            out.extend(drain(&mut dec));
        }
        assert_eq!(out, body);
        assert_eq!(dec.pending_len(), 0);
        assert_eq!(dec.bytes_in(), stream.len() as u64);
    }

    #[test]
    fn test_short_first_packet_buffered() {
        let stream = ads_stream(2, 4, &[0u8; 16]);
        let mut dec = started();
        dec.send_packet(&Packet::from_data(stream[..20].to_vec())).unwrap();
        assert!(matches!(dec.receive_frame(), Err(AdsError::NeedMoreData)));
        assert_eq!(dec.pending_len(), 20);
    }

    #[test]
    fn test_flush_decodes_short_stream() {
        // 整条流比扫描窗口还短, 只能在刷新时解码
        let stream = ads_stream(2, 4, &[0u8; 16]);
        let mut dec = started();
        dec.send_packet(&Packet::from_data(stream)).unwrap();
        assert!(matches!(dec.receive_frame(), Err(AdsError::NeedMoreData)));

        dec.send_packet(&Packet::empty()).unwrap();
        assert_eq!(dec.receive_frame().unwrap().nb_samples, 4);
        assert!(matches!(dec.receive_frame(), Err(AdsError::Eof)));
    }

    #[test]
    fn test_need_more_then_eof() {
        let mut dec = started();
        let mut stream = ads_stream(2, 4, &[1, 2, 3]);
        stream.extend_from_slice(&[0u8; 0x40]);
        dec.send_packet(&Packet::from_data(stream)).unwrap();
        // 0x43 字节数据体: 8 个完整块组, 剩 3 字节
        assert_eq!(dec.receive_frame().unwrap().nb_samples, 16);
        assert!(matches!(dec.receive_frame(), Err(AdsError::NeedMoreData)));
        assert_eq!(dec.pending_len(), 3);

        dec.send_packet(&Packet::empty()).unwrap();
        assert_eq!(dec.pending_len(), 0);
        assert!(matches!(dec.receive_frame(), Err(AdsError::Eof)));
    }

    #[test]
    fn test_send_after_flush_rejected() {
        let mut dec = started();
        dec.send_packet(&Packet::empty()).unwrap();
        let err = dec.send_packet(&Packet::from_data(vec![0u8; 4])).unwrap_err();
        assert!(matches!(err, AdsError::InvalidArgument(_)));
    }

    #[test]
    fn test_invalid_stream_propagates() {
        let mut dec = started();
        let err = dec.send_packet(&Packet::from_data(vec![0u8; 0x80])).unwrap_err();
        assert!(matches!(err, AdsError::InvalidData(_)));
        assert!(dec.output_params().is_none());
    }

    #[test]
    fn test_zero_sample_blocks_rejected() {
        // 交织大小为 1 时每块不足一个采样, 数据体永远不会被消费
        let mut dec = started();
        let mut stream = ads_stream(2, 1, &[]);
        stream.resize(HEADER_SIZE + MAX_SCAN_OFFSET, 0);
        dec.send_packet(&Packet::from_data(stream)).unwrap();
        assert!(dec.output_params().is_some());

        let err = dec.send_packet(&Packet::from_data(vec![0u8; 0x10000])).unwrap_err();
        assert!(matches!(err, AdsError::InvalidData(_)));
        assert!(matches!(dec.receive_frame(), Err(AdsError::NeedMoreData)));
    }

    #[test]
    fn test_output_params_after_header() {
        let mut dec = started();
        let mut stream = ads_stream(2, 0, &[]);
        stream.resize(HEADER_SIZE + MAX_SCAN_OFFSET, 0);
        dec.send_packet(&Packet::from_data(stream)).unwrap();
        let params = dec.output_params().unwrap();
        assert_eq!(params.sample_rate, 44100);
        assert_eq!(params.channel_layout.channels, 2);
        assert_eq!(dec.decoder().codec_id(), CodecId::Ads);
    }
}
