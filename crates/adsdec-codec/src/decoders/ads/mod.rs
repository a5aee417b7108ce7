//! Sony ADS 解码器.
//!
//! ADS 是 PlayStation 2 / PSP / Xbox 视频流 (PSS 等) 中使用的交织 PCM 音频.
//! 码流自描述: 首个数据块前部嵌有 SShd/SSbd 头部, 之后是按块、按声道平面存放的
//! 16 位小端采样.
//!
//! 解码分两个阶段, 共用同一份 `DecoderState`:
//! 1. 头部解析: 每条流只执行一次, 定位并解析 SShd 头部
//! 2. 块解交织: 每次调用把完整块组转换为时间交错的 S16 采样
//!
//! 不足一个块组的尾部数据不会被消费, 调用方需要保留并与下一块数据拼接后再送入.

mod deinterleave;
mod header;


pub use deinterleave::{BlockLayout, BlockPlan};
pub use header::{AdsHeader, CodingType, HEADER_SIZE, LoopRegion, MAX_SCAN_OFFSET};

use log::{debug, trace, warn};

use adsdec_core::{AdsError, AdsResult, ChannelLayout, SampleFormat, Timestamp};

use crate::buffer::{BufferAllocator, HeapAllocator};
use crate::codec_id::CodecId;
use crate::codec_parameters::{AudioCodecParams, CodecParameters};
use crate::decoder::{DecodeOutput, Decoder};
use crate::frame::AudioFrame;

/// 解码阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecoderPhase {
    /// 等待头部
    AwaitingHeader,
    /// 头部已解析, 持续解码数据体
    Streaming,
}

/// 解码器选项
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdsDecoderOptions {
    /// 标记该流来自会在开头写入静音帧的编码器
    ///
    /// 仅作为元数据记录, 解码器不会跳过任何采样.
    pub skip_silent_frames: bool,
}

/// 每条流的解码状态
///
/// 头部字段一经写入不再改变; 计数器单调不减.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecoderState {
    /// 采样率, 0 表示尚未解析头部
    pub sample_rate: u32,
    /// 声道数, 0 表示尚未解析头部
    pub channels: u32,
    /// 交织大小 (0 表示使用默认值 2 * 声道数)
    pub interleave_size: u32,
    /// 头部中的编码类型原始值
    pub codec_id: u32,
    /// 编码类型
    pub coding_type: Option<CodingType>,
    /// 累计消费的字节数 (含头部及其之前的填充)
    pub consumed_offset: u64,
    /// 累计输出的每声道采样数
    pub samples_decoded: u64,
    /// 循环区间
    pub loop_region: Option<LoopRegion>,
    /// 数据体大小 (字节)
    pub body_size: u32,
    /// 见 `AdsDecoderOptions::skip_silent_frames`
    pub skip_silent_frames: bool,
}

impl DecoderState {
    /// 当前阶段
    pub fn phase(&self) -> DecoderPhase {
        if self.sample_rate > 0 && self.channels > 0 {
            DecoderPhase::Streaming
        } else {
            DecoderPhase::AwaitingHeader
        }
    }

    /// 单个块的字节数
    pub fn block_size(&self) -> usize {
        if self.interleave_size > 0 {
            self.interleave_size as usize
        } else {
            2 * self.channels as usize
        }
    }

    fn apply_header(&mut self, header: &AdsHeader) {
        self.sample_rate = header.sample_rate;
        self.channels = header.channels;
        self.interleave_size = header.interleave_size;
        self.codec_id = header.codec_id;
        self.coding_type = Some(header.coding_type);
        self.loop_region = header.loop_region;
        self.body_size = header.body_size;
    }
}

/// ADS 解码器
pub struct AdsDecoder {
    /// 流状态
    state: DecoderState,
    /// 头部解析后确定的块几何
    layout: Option<BlockLayout>,
    /// 输出流参数
    output: Option<AudioCodecParams>,
    /// 容器在 start 时声明的音频参数
    declared: Option<AudioCodecParams>,
    /// 选项
    options: AdsDecoderOptions,
    /// 输出缓冲分配器
    allocator: Box<dyn BufferAllocator>,
}

impl AdsDecoder {
    /// 创建解码器实例 (工厂函数)
    pub fn create() -> AdsResult<Box<dyn Decoder>> {
        Ok(Box::new(Self::new()))
    }

    /// 使用默认选项创建解码器
    pub fn new() -> Self {
        Self::with_options(AdsDecoderOptions::default())
    }

    /// 使用指定选项创建解码器
    pub fn with_options(options: AdsDecoderOptions) -> Self {
        Self {
            state: DecoderState {
                skip_silent_frames: options.skip_silent_frames,
                ..DecoderState::default()
            },
            layout: None,
            output: None,
            declared: None,
            options,
            allocator: Box::new(HeapAllocator),
        }
    }

    /// 替换输出缓冲分配器
    pub fn with_allocator(mut self, allocator: Box<dyn BufferAllocator>) -> Self {
        self.allocator = allocator;
        self
    }

    /// 当前流状态
    pub fn state(&self) -> &DecoderState {
        &self.state
    }

    /// 定位并解析头部, 不修改解码器状态
    fn parse_header(&self, chunk: &[u8]) -> AdsResult<ParsedHeader> {
        let header = AdsHeader::find(chunk)?;
        let layout = BlockLayout::new(header.interleave_size, header.channels)?;

        if !header.coding_type.is_pcm() {
            warn!(
                "ADS 头部声明的编码类型为 {}, 仍按 16 位 PCM 处理",
                header.coding_type
            );
        }

        let output = AudioCodecParams {
            sample_rate: header.sample_rate,
            channel_layout: ChannelLayout::from_channels(header.channels),
            sample_format: SampleFormat::S16,
            frame_size: 0,
        };
        if let Some(declared) = &self.declared {
            if declared.sample_rate != output.sample_rate
                || declared.channel_layout.channels != output.channel_layout.channels
            {
                warn!(
                    "容器声明 {} Hz / {} 声道, ADS 头部为 {} Hz / {} 声道, 以头部为准",
                    declared.sample_rate,
                    declared.channel_layout.channels,
                    output.sample_rate,
                    output.channel_layout.channels,
                );
            }
        }

        Ok(ParsedHeader {
            header,
            layout,
            output,
        })
    }

    /// 写入头部并切换到 Streaming 阶段
    fn commit_header(&mut self, parsed: ParsedHeader) {
        let ParsedHeader {
            header,
            layout,
            output,
        } = parsed;
        self.state.apply_header(&header);
        self.state.consumed_offset += header.end_offset() as u64;
        self.layout = Some(layout);
        self.output = Some(output);

        debug!(
            "ADS 头部: 偏移={}, {} Hz, {} 声道, 交织={} (块={} 字节), 编码={}, 循环={:?}",
            header.offset,
            header.sample_rate,
            header.channels,
            header.interleave_size,
            layout.block_size(),
            header.coding_type,
            header.loop_region,
        );
    }

    /// 把 `body` 中的完整块组解交织为一帧, 起始位置为 `position`
    ///
    /// 数据不足一个块组时返回 `None`. 不修改解码器状态, 失败时调用方可原样重试.
    fn deinterleave_body(
        &mut self,
        layout: &BlockLayout,
        sample_rate: u32,
        position: u64,
        body: &[u8],
    ) -> AdsResult<Option<(BlockPlan, AudioFrame)>> {
        let plan = layout.plan(body.len());
        if plan.sample_count == 0 {
            return Ok(None);
        }

        let nb_samples = u32::try_from(plan.sample_count).map_err(|_| {
            AdsError::InvalidData(format!("单次采样数过大: {}", plan.sample_count))
        })?;
        let channel_layout = ChannelLayout::from_channels(layout.channels() as u32);
        let out_len = plan.sample_count * layout.channels() * 2;
        let mut samples = self.allocator.allocate(out_len)?;
        layout.deinterleave(&plan, body, &mut samples)?;

        let mut frame = AudioFrame::new(nb_samples, sample_rate, SampleFormat::S16, channel_layout);
        let start = Timestamp::from_sample_position(position, sample_rate);
        frame.data[0] = samples;
        frame.pts = start.pts;
        frame.time_base = start.time_base;
        frame.duration = i64::from(nb_samples);

        trace!(
            "ADS 解交织: {} 个块组, {} 采样/声道, 消费 {} 字节",
            plan.full_blocks, plan.sample_count, plan.consumed,
        );
        Ok(Some((plan, frame)))
    }
}

/// 已解析但尚未写入状态的头部
struct ParsedHeader {
    header: AdsHeader,
    layout: BlockLayout,
    output: AudioCodecParams,
}

impl Default for AdsDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for AdsDecoder {
    fn codec_id(&self) -> CodecId {
        CodecId::Ads
    }

    fn name(&self) -> &str {
        "ads"
    }

    fn start(&mut self, params: &CodecParameters) -> AdsResult<()> {
        if !matches!(params.codec_id, CodecId::Ads | CodecId::None) {
            return Err(AdsError::InvalidArgument(format!(
                "ADS 解码器不能处理 {} 码流",
                params.codec_id
            )));
        }

        // 每次 start 都开始一条新流
        self.state = DecoderState {
            skip_silent_frames: self.options.skip_silent_frames,
            ..DecoderState::default()
        };
        self.layout = None;
        self.output = None;
        self.declared = params.audio().cloned();

        debug!("打开 {} 解码器", self.name());
        Ok(())
    }

    fn decode(&mut self, data: &[u8]) -> AdsResult<DecodeOutput> {
        // 新头部在本次调用成功之前不写入状态, 出错时同一数据块可以重新送入
        let parsed = match self.state.phase() {
            DecoderPhase::AwaitingHeader => Some(self.parse_header(data)?),
            DecoderPhase::Streaming => None,
        };

        let (header_bytes, layout, sample_rate) = match &parsed {
            Some(p) => (p.header.end_offset(), p.layout, p.header.sample_rate),
            None => {
                let layout = self.layout.ok_or_else(|| {
                    AdsError::InvalidData("尚未解析 ADS 头部, 无法解交织".into())
                })?;
                (0, layout, self.state.sample_rate)
            }
        };
        let position = self.state.samples_decoded;
        let decoded =
            self.deinterleave_body(&layout, sample_rate, position, &data[header_bytes..])?;

        if let Some(parsed) = parsed {
            self.commit_header(parsed);
        }
        let (body_bytes, frame) = match decoded {
            Some((plan, frame)) => {
                self.state.samples_decoded += plan.sample_count as u64;
                self.state.consumed_offset += plan.consumed as u64;
                (plan.consumed, Some(frame))
            }
            None => (0, None),
        };
        Ok(DecodeOutput {
            consumed: header_bytes + body_bytes,
            frame,
        })
    }

    fn probe_size(&self) -> usize {
        match self.state.phase() {
            DecoderPhase::AwaitingHeader => HEADER_SIZE + MAX_SCAN_OFFSET,
            DecoderPhase::Streaming => 0,
        }
    }

    fn input_unit(&self) -> usize {
        self.layout.map_or(0, |layout| layout.group_size())
    }

    fn output_params(&self) -> Option<&AudioCodecParams> {
        self.output.as_ref()
    }
}
