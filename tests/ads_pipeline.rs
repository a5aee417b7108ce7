//! 端到端集成测试: ADS 码流的完整解码管线.
//!
//! 测试流程: 生成多声道正弦波 → 按块/按声道平面封装为 ADS → 分块送入解码器 → 验证

use adsdec::codec::{CodecId, CodecParameters, Packet, StreamDecoder};
use adsdec::core::{AdsError, ChannelLayout, SampleFormat, Timestamp};

const HEADER_SIZE: usize = 0x28;

/// 生成交错的正弦波采样, 每个声道频率不同
fn generate_sine_interleaved(sample_rate: u32, nb_samples: usize, channels: usize) -> Vec<i16> {
    let mut out = Vec::with_capacity(nb_samples * channels);
    for i in 0..nb_samples {
        let t = i as f64 / sample_rate as f64;
        for ch in 0..channels {
            let freq = 220.0 * (ch + 1) as f64;
            let value = (t * freq * 2.0 * std::f64::consts::PI).sin();
            out.push((value * 32767.0) as i16);
        }
    }
    out
}

/// 把交错采样按 ADS 的块结构重新排列
fn to_ads_blocks(interleaved: &[i16], channels: usize, interleave: usize) -> Vec<u8> {
    let per_block = interleave / 2;
    let mut out = Vec::with_capacity(interleaved.len() * 2);
    for group in interleaved.chunks_exact(per_block * channels) {
        for ch in 0..channels {
            for i in 0..per_block {
                out.extend_from_slice(&group[i * channels + ch].to_le_bytes());
            }
        }
    }
    out
}

/// 构造带头部的 ADS 码流, 头部前填充 `pad` 字节
fn build_ads(pad: usize, sample_rate: u32, channels: u32, interleave: u32, body: &[u8]) -> Vec<u8> {
    let mut buf = vec![0u8; pad];
    buf.extend_from_slice(b"SShd");
    buf.extend_from_slice(&0x18u32.to_le_bytes());
    buf.extend_from_slice(&1u32.to_le_bytes());
    buf.extend_from_slice(&sample_rate.to_le_bytes());
    buf.extend_from_slice(&channels.to_le_bytes());
    buf.extend_from_slice(&interleave.to_le_bytes());
    buf.extend_from_slice(&0xFFFF_FFFFu32.to_le_bytes());
    buf.extend_from_slice(&0xFFFF_FFFFu32.to_le_bytes());
    buf.extend_from_slice(b"SSbd");
    buf.extend_from_slice(&(body.len() as u32).to_le_bytes());
    buf.extend_from_slice(body);
    buf
}

/// 以 `chunk_size` 分块解码整条码流, 返回所有交错采样
fn decode_all(stream: &[u8], chunk_size: usize) -> (StreamDecoder, Vec<i16>) {
    let _ = env_logger::builder().is_test(true).try_init();

    let registry = adsdec::default_codec_registry();
    let mut dec = StreamDecoder::new(registry.create_decoder(CodecId::Ads).unwrap());
    dec.start(&CodecParameters::for_codec(CodecId::Ads)).unwrap();

    let mut samples = Vec::new();
    let mut expected: Option<Timestamp> = None;
    let mut collect = |dec: &mut StreamDecoder, samples: &mut Vec<i16>| loop {
        match dec.receive_frame() {
            Ok(frame) => {
                assert_eq!(frame.sample_format, SampleFormat::S16);
                let start = frame.timestamp();
                assert!(start.is_valid());
                assert_eq!(start.pts, expected.map_or(0, |ts| ts.pts), "帧时间戳应连续");
                expected = Some(frame.end_timestamp());
                samples.extend(frame.samples_s16());
            }
            Err(AdsError::NeedMoreData) | Err(AdsError::Eof) => break,
            Err(e) => panic!("解码失败: {e}"),
        }
    };

    for chunk in stream.chunks(chunk_size) {
        dec.send_packet(&Packet::from_data(chunk.to_vec())).unwrap();
        collect(&mut dec, &mut samples);
    }
    dec.send_packet(&Packet::empty()).unwrap();
    collect(&mut dec, &mut samples);
    log::debug!("解码完成: {} 个采样", samples.len());

    (dec, samples)
}

#[test]
fn test_stereo_block_stream_roundtrip() {
    let sample_rate = 44100;
    let channels = 2usize;
    let interleave = 0x200usize;
    let pcm = generate_sine_interleaved(sample_rate, 4096, channels);
    let body = to_ads_blocks(&pcm, channels, interleave);
    let stream = build_ads(0, sample_rate, channels as u32, interleave as u32, &body);

    for chunk_size in [0x800usize, 1000, 37] {
        let (dec, samples) = decode_all(&stream, chunk_size);
        assert_eq!(samples, pcm, "chunk_size={chunk_size}");

        let params = dec.output_params().unwrap();
        assert_eq!(params.sample_rate, sample_rate);
        assert_eq!(params.channel_layout, ChannelLayout::STEREO);
    }
}

#[test]
fn test_surround_stream_with_padding() {
    let channels = 6usize;
    let interleave = 0x10usize;
    let pcm = generate_sine_interleaved(48000, 800, channels);
    let body = to_ads_blocks(&pcm, channels, interleave);
    let stream = build_ads(0x20, 48000, channels as u32, interleave as u32, &body);

    let (dec, samples) = decode_all(&stream, 0x800);
    assert_eq!(samples, pcm);
    assert_eq!(
        dec.output_params().unwrap().channel_layout,
        ChannelLayout::SURROUND_5_1
    );
}

#[test]
fn test_mono_passthrough() {
    let pcm = generate_sine_interleaved(22050, 2048, 1);
    let body: Vec<u8> = pcm.iter().flat_map(|s| s.to_le_bytes()).collect();
    let stream = build_ads(0, 22050, 1, 0x800, &body);

    let (_, samples) = decode_all(&stream, 0x400);
    assert_eq!(samples, pcm);
}

#[test]
fn test_trailing_partial_block_dropped() {
    let channels = 2usize;
    let pcm = generate_sine_interleaved(44100, 64, channels);
    let mut body = to_ads_blocks(&pcm, channels, 8);
    body.extend_from_slice(&[0x55; 7]);
    let stream = build_ads(0, 44100, channels as u32, 8, &body);

    let (dec, samples) = decode_all(&stream, 0x100);
    assert_eq!(samples, pcm);
    assert_eq!(dec.pending_len(), 0);
    assert_eq!(dec.bytes_in(), (HEADER_SIZE + body.len()) as u64);
}

#[test]
fn test_garbage_stream_is_rejected() {
    let registry = adsdec::default_codec_registry();
    let mut dec = StreamDecoder::new(registry.create_decoder(CodecId::Ads).unwrap());
    dec.start(&CodecParameters::for_codec(CodecId::Ads)).unwrap();

    let garbage: Vec<u8> = (0..0x800u32).map(|i| (i * 31) as u8).collect();
    assert_eq!(registry.detect(&garbage), None);
    let err = dec.send_packet(&Packet::from_data(garbage)).unwrap_err();
    assert!(matches!(err, AdsError::InvalidData(_)));
}

#[test]
fn test_registry_detects_ads_stream() {
    let stream = build_ads(0x20, 32000, 1, 0, &[0u8; 0x40]);
    let registry = adsdec::default_codec_registry();
    assert_eq!(registry.detect(&stream), Some(CodecId::Ads));
}

#[test]
fn test_version() {
    assert!(!adsdec::version().is_empty());
}
