//! 解码 ADS 文件并写出 WAV 或原始 S16LE.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Seek, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::{debug, info};

use adsdec_codec::decoders::ads::{AdsDecoder, AdsDecoderOptions};
use adsdec_codec::{AudioFrame, CodecId, CodecParameters, Packet, StreamDecoder};
use adsdec_core::AdsError;

use crate::wav::WavWriter;

/// 解码配置
#[derive(Debug, Clone)]
pub struct DecodeConfig {
    /// 每次送入解码器的字节数
    pub chunk_size: usize,
    /// 输出无头部的 S16LE
    pub raw: bool,
    /// 见 `AdsDecoderOptions::skip_silent_frames`
    pub skip_silent_frames: bool,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            chunk_size: 2048,
            raw: false,
            skip_silent_frames: false,
        }
    }
}

/// 解码统计
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeSummary {
    pub sample_rate: u32,
    pub channels: u32,
    /// 输出帧数
    pub frames: u64,
    /// 每声道采样数
    pub samples: u64,
    /// 读取的输入字节数
    pub bytes_in: u64,
    /// 写出的 PCM 字节数 (不含 WAV 头部)
    pub bytes_out: u64,
}

/// PCM 输出目标
enum PcmSink<W: Write + Seek> {
    Wav(WavWriter<W>),
    Raw(BufWriter<W>),
}

impl<W: Write + Seek> PcmSink<W> {
    fn open(inner: W, raw: bool, sample_rate: u32, channels: u32) -> Result<Self> {
        if raw {
            return Ok(Self::Raw(BufWriter::new(inner)));
        }
        Ok(Self::Wav(WavWriter::new(inner, sample_rate, channels)?))
    }

    fn write(&mut self, data: &[u8]) -> Result<()> {
        match self {
            Self::Wav(wav) => wav.write_samples(data)?,
            Self::Raw(out) => out.write_all(data)?,
        }
        Ok(())
    }

    fn finish(self) -> Result<()> {
        match self {
            Self::Wav(wav) => {
                wav.finish()?;
            }
            Self::Raw(mut out) => out.flush()?,
        }
        Ok(())
    }
}

/// 把 `input` 解码到 `output`
pub fn decode_file(input: &Path, output: &Path, config: &DecodeConfig) -> Result<DecodeSummary> {
    let reader =
        File::open(input).with_context(|| format!("无法打开文件 '{}'", input.display()))?;
    let writer = File::create(output)
        .with_context(|| format!("无法创建输出文件 '{}'", output.display()))?;
    let summary = decode_stream(BufReader::new(reader), writer, config)
        .with_context(|| format!("解码 '{}' 失败", input.display()))?;

    info!(
        "解码完成: {} -> {}, {} 帧, {} 采样/声道, {} Hz, {} 声道",
        input.display(),
        output.display(),
        summary.frames,
        summary.samples,
        summary.sample_rate,
        summary.channels,
    );
    Ok(summary)
}

/// 按 `config.chunk_size` 分块读取 `reader` 并解码到 `writer`
pub fn decode_stream<R: Read, W: Write + Seek>(
    mut reader: R,
    writer: W,
    config: &DecodeConfig,
) -> Result<DecodeSummary> {
    if config.chunk_size == 0 {
        bail!("分块大小必须大于 0");
    }

    let decoder = AdsDecoder::with_options(AdsDecoderOptions {
        skip_silent_frames: config.skip_silent_frames,
    });
    let mut stream = StreamDecoder::new(Box::new(decoder));
    stream.start(&CodecParameters::for_codec(CodecId::Ads))?;

    let mut writer = Some(writer);
    let mut sink: Option<PcmSink<W>> = None;
    let mut summary = DecodeSummary::default();
    let mut buf = vec![0u8; config.chunk_size];
    let mut pos = 0i64;

    loop {
        let n = reader.read(&mut buf).context("读取输入失败")?;
        let packet = if n == 0 {
            Packet::empty()
        } else {
            Packet::from_data(buf[..n].to_vec()).with_pos(pos)
        };
        pos += n as i64;
        stream.send_packet(&packet)?;

        loop {
            let frame = match stream.receive_frame() {
                Ok(frame) => frame,
                Err(AdsError::NeedMoreData) | Err(AdsError::Eof) => break,
                Err(e) => return Err(e.into()),
            };
            if sink.is_none() {
                sink = open_sink(&mut writer, config.raw, &frame)?;
            }
            if let Some(sink) = sink.as_mut() {
                write_frame(sink, &frame, &mut summary)?;
            }
        }

        if n == 0 {
            break;
        }
    }
    stream.stop();

    let params = stream
        .output_params()
        .context("输入中未找到 ADS 头部")?
        .clone();
    summary.sample_rate = params.sample_rate;
    summary.channels = params.channel_layout.channels;
    summary.bytes_in = stream.bytes_in();

    // 没有任何完整块组时仍然输出一个空文件
    let sink = match sink {
        Some(sink) => sink,
        None => match writer.take() {
            Some(w) => PcmSink::open(w, config.raw, params.sample_rate, summary.channels)?,
            None => bail!("输出目标不可用"),
        },
    };
    sink.finish()?;
    Ok(summary)
}

fn open_sink<W: Write + Seek>(
    writer: &mut Option<W>,
    raw: bool,
    frame: &AudioFrame,
) -> Result<Option<PcmSink<W>>> {
    let Some(inner) = writer.take() else {
        return Ok(None);
    };
    debug!(
        "输出 {}: {} Hz, {}",
        if raw { "S16LE" } else { "WAV" },
        frame.sample_rate,
        frame.channel_layout,
    );
    PcmSink::open(inner, raw, frame.sample_rate, frame.channel_layout.channels).map(Some)
}

fn write_frame<W: Write + Seek>(
    sink: &mut PcmSink<W>,
    frame: &AudioFrame,
    summary: &mut DecodeSummary,
) -> Result<()> {
    for plane in &frame.data {
        sink.write(plane)?;
        summary.bytes_out += plane.len() as u64;
    }
    summary.frames += 1;
    summary.samples += u64::from(frame.nb_samples);
    Ok(())
}
