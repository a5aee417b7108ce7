//! `--probe`: 只解析头部并输出流信息.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use adsdec_codec::CodecId;
use adsdec_codec::decoders::ads::{AdsHeader, BlockLayout, HEADER_SIZE, MAX_SCAN_OFFSET};
use adsdec_core::{ChannelLayout, Rational};

/// 探测结果
#[derive(Debug, Serialize)]
pub struct ProbeInfo {
    filename: String,
    format_name: &'static str,
    format_long_name: &'static str,
    header_offset: usize,
    codec_id: u32,
    coding_type: String,
    sample_rate: u32,
    channels: u32,
    channel_layout: String,
    interleave_size: u32,
    block_size: usize,
    time_base: String,
    body_size: u32,
    /// 由数据体大小估算的每声道采样数
    nb_samples: u64,
    duration: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    loop_start: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    loop_end: Option<u32>,
    /// 把循环点视为数据体字节偏移时对应的每声道采样位置
    #[serde(skip_serializing_if = "Option::is_none")]
    loop_samples: Option<(u64, u64)>,
}

impl ProbeInfo {
    fn from_header(filename: String, header: &AdsHeader) -> Result<Self> {
        let layout = BlockLayout::new(header.interleave_size, header.channels)?;
        let time_base = Rational::from_sample_rate(header.sample_rate);
        let nb_samples = u64::from(header.body_size) / (2 * u64::from(header.channels));
        Ok(Self {
            filename,
            format_name: CodecId::Ads.name(),
            format_long_name: CodecId::Ads.long_name(),
            header_offset: header.offset,
            codec_id: header.codec_id,
            coding_type: header.coding_type.to_string(),
            sample_rate: header.sample_rate,
            channels: header.channels,
            channel_layout: ChannelLayout::from_channels(header.channels).to_string(),
            interleave_size: header.interleave_size,
            block_size: layout.block_size(),
            time_base: time_base.to_string(),
            body_size: header.body_size,
            nb_samples,
            duration: nb_samples as f64 / f64::from(header.sample_rate),
            loop_start: header.loop_region.map(|r| r.start),
            loop_end: header.loop_region.map(|r| r.end),
            loop_samples: header
                .loop_region
                .map(|r| r.byte_offsets_to_samples(header.channels)),
        })
    }
}

/// 读取文件开头并解析头部
pub fn probe_file(path: &Path) -> Result<ProbeInfo> {
    let file = File::open(path).with_context(|| format!("无法打开文件 '{}'", path.display()))?;
    let mut head = Vec::with_capacity(HEADER_SIZE + MAX_SCAN_OFFSET);
    file.take((HEADER_SIZE + MAX_SCAN_OFFSET) as u64)
        .read_to_end(&mut head)
        .with_context(|| format!("读取文件 '{}' 失败", path.display()))?;

    let header = AdsHeader::find(&head)
        .with_context(|| format!("'{}' 不是有效的 ADS 码流", path.display()))?;
    ProbeInfo::from_header(path.display().to_string(), &header)
}

/// 打印探测结果
pub fn print(info: &ProbeInfo, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(info)?);
        return Ok(());
    }

    println!("输入 '{}':", info.filename);
    println!("  格式: {} ({})", info.format_name, info.format_long_name);
    println!("  头部偏移: 0x{:02x}", info.header_offset);
    println!(
        "  流 #0: 音频, {} (0x{:02x}), {} Hz, {}, s16",
        info.coding_type, info.codec_id, info.sample_rate, info.channel_layout,
    );
    println!(
        "    交织: {} 字节 (块 {} 字节), 时间基 {}",
        info.interleave_size, info.block_size, info.time_base,
    );
    println!(
        "    数据体: {} 字节, {} 采样, 时长 {:.3} 秒",
        info.body_size, info.nb_samples, info.duration,
    );
    if let (Some(start), Some(end)) = (info.loop_start, info.loop_end) {
        println!("    循环: {start} - {end}");
    }
    if let Some((start, end)) = info.loop_samples {
        println!("    循环 (按字节偏移换算): 采样 {start} - {end}");
    }
    Ok(())
}
