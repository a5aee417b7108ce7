//! SShd/SSbd 头部解析.
//!
//! ADS 码流的首个数据块前部嵌有一段 0x28 字节的定长记录:
//!
//! | 偏移 | 字段 | 宽度 |
//! |------|------|------|
//! | 0x00 | "SShd" | 4 |
//! | 0x04 | 格式块大小 (忽略) | u32 |
//! | 0x08 | 编码类型 | u32 |
//! | 0x0C | 采样率 | u32 |
//! | 0x10 | 声道数 | u32 |
//! | 0x14 | 交织大小 (每声道每块字节数) | u32 |
//! | 0x18 | 循环起点 | u32 |
//! | 0x1C | 循环终点 | u32 |
//! | 0x20 | "SSbd" | 4 |
//! | 0x24 | 数据体大小 | u32 |
//!
//! 所有整数均为小端序.

use std::fmt;

use adsdec_core::{AdsError, AdsResult};

/// 头部起始标记
pub const SSHD_TAG: &[u8; 4] = b"SShd";
/// 数据体标记, 位于头部 0x20 处
pub const SSBD_TAG: &[u8; 4] = b"SSbd";
/// 头部记录长度
pub const HEADER_SIZE: usize = 0x28;
/// 头部起始偏移的最大扫描位置
pub const MAX_SCAN_OFFSET: usize = 0x40;

const SSBD_OFFSET: usize = 0x20;
const NO_LOOP: u32 = 0xFFFF_FFFF;

/// 头部声明的编码类型
///
/// 只作记录, 解交织时一律按 16 位 PCM 处理.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodingType {
    /// 16 位有符号小端 PCM
    Pcm16Le,
    /// PS-ADPCM (VAG)
    PsAdpcm,
    /// 未知编码
    Unknown(u32),
}

impl CodingType {
    /// 由头部 codec id 推断编码类型
    pub fn from_codec_id(codec_id: u32) -> Self {
        match codec_id {
            0x01 => Self::Pcm16Le,
            0x10 => Self::PsAdpcm,
            other => Self::Unknown(other),
        }
    }

    /// 是否为本解码器原生处理的 PCM
    pub fn is_pcm(&self) -> bool {
        matches!(self, Self::Pcm16Le)
    }
}

impl fmt::Display for CodingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pcm16Le => write!(f, "pcm16le"),
            Self::PsAdpcm => write!(f, "ps-adpcm"),
            Self::Unknown(id) => write!(f, "unknown(0x{id:02x})"),
        }
    }
}

/// 循环区间
///
/// 单位由编码器决定: 有的写采样数, 有的写数据体内的字节偏移.
/// 此处保留原始数值.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopRegion {
    /// 循环起点
    pub start: u32,
    /// 循环终点
    pub end: u32,
}

impl LoopRegion {
    fn from_raw(start: u32, end: u32) -> Option<Self> {
        if start == NO_LOOP || end == NO_LOOP || end <= start {
            return None;
        }
        Some(Self { start, end })
    }

    /// 把按字节偏移记录的区间换算为每声道采样位置
    pub fn byte_offsets_to_samples(&self, channels: u32) -> (u64, u64) {
        let frame_bytes = 2 * u64::from(channels.max(1));
        (
            u64::from(self.start) / frame_bytes,
            u64::from(self.end) / frame_bytes,
        )
    }
}

/// 解析后的 ADS 头部
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdsHeader {
    /// 头部在数据块内的起始偏移
    pub offset: usize,
    /// 头部声明的编码类型原始值
    pub codec_id: u32,
    /// 编码类型
    pub coding_type: CodingType,
    /// 采样率 (Hz), 保证 > 0
    pub sample_rate: u32,
    /// 声道数, 保证 > 0
    pub channels: u32,
    /// 交织大小, 头部值 <= 0 时记为 0
    pub interleave_size: u32,
    /// 循环区间
    pub loop_region: Option<LoopRegion>,
    /// 数据体大小 (字节), 仅作记录
    pub body_size: u32,
}

impl AdsHeader {
    /// 在数据块中查找并解析头部
    ///
    /// 依次尝试偏移 `0..=min(len - 0x28, 0x40)`, 取第一个同时满足
    /// `SShd` 与 `SSbd` 标记的位置.
    pub fn find(chunk: &[u8]) -> AdsResult<Self> {
        if chunk.len() < HEADER_SIZE {
            return Err(AdsError::InvalidData(format!(
                "数据块过短 ({} 字节), 无法容纳 {} 字节的 SShd 头部",
                chunk.len(),
                HEADER_SIZE
            )));
        }

        let last = (chunk.len() - HEADER_SIZE).min(MAX_SCAN_OFFSET);
        let offset = (0..=last)
            .find(|&i| has_markers(&chunk[i..i + HEADER_SIZE]))
            .ok_or_else(|| {
                AdsError::InvalidData(format!("前 {} 字节内未找到 SShd/SSbd 头部", last + 1))
            })?;

        Self::parse(&chunk[offset..offset + HEADER_SIZE], offset)
    }

    /// 数据块开头是否带有 ADS 标记, 不校验字段取值
    pub fn probe(chunk: &[u8]) -> bool {
        let Some(last) = chunk.len().checked_sub(HEADER_SIZE) else {
            return false;
        };
        (0..=last.min(MAX_SCAN_OFFSET)).any(|i| has_markers(&chunk[i..i + HEADER_SIZE]))
    }

    /// 解析一段从 `SShd` 开始的头部记录
    fn parse(record: &[u8], offset: usize) -> AdsResult<Self> {
        let codec_id = read_u32_le(record, 0x08)?;
        let sample_rate = read_i32_le(record, 0x0C)?;
        let channels = read_i32_le(record, 0x10)?;
        let interleave = read_i32_le(record, 0x14)?;
        let loop_start = read_u32_le(record, 0x18)?;
        let loop_end = read_u32_le(record, 0x1C)?;
        let body_size = read_u32_le(record, 0x24)?;

        if sample_rate <= 0 {
            return Err(AdsError::InvalidData(format!("非法采样率: {sample_rate}")));
        }
        if channels <= 0 {
            return Err(AdsError::InvalidData(format!("非法声道数: {channels}")));
        }

        Ok(Self {
            offset,
            codec_id,
            coding_type: CodingType::from_codec_id(codec_id),
            sample_rate: sample_rate.unsigned_abs(),
            channels: channels.unsigned_abs(),
            interleave_size: u32::try_from(interleave).unwrap_or(0),
            loop_region: LoopRegion::from_raw(loop_start, loop_end),
            body_size,
        })
    }

    /// 头部结束位置 (相对数据块起点), 即解析头部所消费的字节数
    pub fn end_offset(&self) -> usize {
        self.offset + HEADER_SIZE
    }
}

fn has_markers(record: &[u8]) -> bool {
    record.get(..4) == Some(SSHD_TAG.as_slice())
        && record.get(SSBD_OFFSET..SSBD_OFFSET + 4) == Some(SSBD_TAG.as_slice())
}

fn read_u32_le(buf: &[u8], pos: usize) -> AdsResult<u32> {
    buf.get(pos..pos + 4)
        .and_then(|b| <[u8; 4]>::try_from(b).ok())
        .map(u32::from_le_bytes)
        .ok_or_else(|| AdsError::InvalidData(format!("头部在偏移 0x{pos:02x} 处被截断")))
}

fn read_i32_le(buf: &[u8], pos: usize) -> AdsResult<i32> {
    read_u32_le(buf, pos).map(|v| v as i32)
}
