//! 块结构计算与解交织.
//!
//! ADS 数据体由若干"块组"构成, 每个块组依次存放每个声道的一个块:
//!
//! ```text
//! | ch0: block_size 字节 | ch1: block_size 字节 | ... | ch0 | ch1 | ...
//! ```
//!
//! 每个块包含 `block_size / 2` 个连续的 16 位采样. 输出为按时间交错的
//! `s0c0 s0c1 s1c0 s1c1 ...`.

use adsdec_core::{AdsError, AdsResult};

/// 块几何参数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockLayout {
    /// 单个块的字节数
    block_size: usize,
    /// 声道数
    channels: usize,
    /// 头部声明的交织大小
    interleave_size: u32,
}

/// 一次解交织的规模
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockPlan {
    /// 完整块组数
    pub full_blocks: usize,
    /// 每声道采样数
    pub sample_count: usize,
    /// 消费的数据体字节数
    pub consumed: usize,
}

impl BlockLayout {
    /// 由交织大小和声道数计算块几何
    ///
    /// 交织大小为 0 时, 每块为一个采样帧 (2 * 声道数 字节).
    pub fn new(interleave_size: u32, channels: u32) -> AdsResult<Self> {
        if channels == 0 {
            return Err(AdsError::InvalidData("声道数不能为 0".into()));
        }
        let channels = channels as usize;
        let block_size = if interleave_size > 0 {
            interleave_size as usize
        } else {
            channels
                .checked_mul(2)
                .ok_or_else(|| AdsError::InvalidData(format!("声道数过大: {channels}")))?
        };
        // 块组字节数必须可表示
        block_size.checked_mul(channels).ok_or_else(|| {
            AdsError::InvalidData(format!("块大小溢出: {block_size} * {channels}"))
        })?;
        Ok(Self {
            block_size,
            channels,
            interleave_size,
        })
    }

    /// 单个块的字节数
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// 声道数
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// 每块每声道的采样数
    pub fn samples_per_block(&self) -> usize {
        self.block_size / 2
    }

    /// 块组字节数 (所有声道各一块)
    pub fn group_size(&self) -> usize {
        self.block_size * self.channels
    }

    /// 数据已经是交错顺序, 可以直接拷贝
    ///
    /// 单声道时无条件走此分支, 即使交织大小大于 2.
    pub fn is_passthrough(&self) -> bool {
        self.channels == 1 || self.interleave_size <= 2
    }

    /// 计算 `available` 字节能解出的完整块组
    pub fn plan(&self, available: usize) -> BlockPlan {
        let full_blocks = available / self.group_size();
        BlockPlan {
            full_blocks,
            sample_count: full_blocks * self.samples_per_block(),
            consumed: full_blocks * self.group_size(),
        }
    }

    /// 按 `plan` 把 `src` 写入 `dst`
    ///
    /// `dst` 长度必须为 `sample_count * channels * 2`, `src` 至少为 `plan.consumed`.
    pub fn deinterleave(&self, plan: &BlockPlan, src: &[u8], dst: &mut [u8]) -> AdsResult<()> {
        let out_len = plan.sample_count * self.channels * 2;
        if dst.len() != out_len || src.len() < plan.consumed {
            return Err(AdsError::InvalidData(format!(
                "缓冲大小不匹配: src={} dst={} 需要 src>={} dst={}",
                src.len(),
                dst.len(),
                plan.consumed,
                out_len
            )));
        }

        if plan.sample_count == 0 {
            return Ok(());
        }
        if self.is_passthrough() {
            dst.copy_from_slice(&src[..out_len]);
            return Ok(());
        }

        let per_block = self.samples_per_block();
        let frame_bytes = self.channels * 2;
        let groups = src[..plan.consumed].chunks_exact(self.group_size());
        for (group, out_group) in groups.zip(dst.chunks_exact_mut(per_block * frame_bytes)) {
            for (ch, block) in group.chunks_exact(self.block_size).enumerate() {
                for (i, sample) in block.chunks_exact(2).take(per_block).enumerate() {
                    let pos = i * frame_bytes + ch * 2;
                    out_group[pos..pos + 2].copy_from_slice(sample);
                }
            }
        }
        Ok(())
    }
}
