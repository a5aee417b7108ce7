//! 声道布局.
//!
//! ADS 头部只给出声道数, 不描述扬声器位置. 解码器据声道数选一个默认布局
//! 发布给下游; 常见的 1/2/4/6/8 声道有固定映射, 其余声道数只记录数量.

use bitflags::bitflags;
use std::fmt;

bitflags! {
    /// 扬声器位置掩码
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ChannelMask: u64 {
        const FRONT_LEFT    = 1 << 0;
        const FRONT_RIGHT   = 1 << 1;
        const FRONT_CENTER  = 1 << 2;
        /// 低频效果 (LFE)
        const LOW_FREQUENCY = 1 << 3;
        const BACK_LEFT     = 1 << 4;
        const BACK_RIGHT    = 1 << 5;
        const SIDE_LEFT     = 1 << 9;
        const SIDE_RIGHT    = 1 << 10;
    }
}

const FRONT_PAIR: ChannelMask = ChannelMask::FRONT_LEFT.union(ChannelMask::FRONT_RIGHT);
const BACK_PAIR: ChannelMask = ChannelMask::BACK_LEFT.union(ChannelMask::BACK_RIGHT);
const CENTER_LFE: ChannelMask = ChannelMask::FRONT_CENTER.union(ChannelMask::LOW_FREQUENCY);

/// 声道数与位置掩码
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChannelLayout {
    /// 声道数
    pub channels: u32,
    /// 位置掩码, 非标准声道数时为空
    pub mask: ChannelMask,
}

impl ChannelLayout {
    pub const MONO: Self = Self::standard(1, ChannelMask::FRONT_CENTER);
    pub const STEREO: Self = Self::standard(2, FRONT_PAIR);
    /// 4.0, PS2 多声道流常见
    pub const QUAD: Self = Self::standard(4, FRONT_PAIR.union(BACK_PAIR));
    pub const SURROUND_5_1: Self =
        Self::standard(6, FRONT_PAIR.union(CENTER_LFE).union(BACK_PAIR));
    pub const SURROUND_7_1: Self = Self::standard(
        8,
        FRONT_PAIR
            .union(CENTER_LFE)
            .union(BACK_PAIR)
            .union(ChannelMask::SIDE_LEFT)
            .union(ChannelMask::SIDE_RIGHT),
    );

    const DEFAULTS: [Self; 5] = [
        Self::MONO,
        Self::STEREO,
        Self::QUAD,
        Self::SURROUND_5_1,
        Self::SURROUND_7_1,
    ];

    const fn standard(channels: u32, mask: ChannelMask) -> Self {
        Self { channels, mask }
    }

    /// 声道数对应的默认布局
    pub fn from_channels(channels: u32) -> Self {
        Self::DEFAULTS
            .iter()
            .find(|layout| layout.channels == channels)
            .copied()
            .unwrap_or(Self {
                channels,
                mask: ChannelMask::empty(),
            })
    }

    /// 是否带有扬声器位置信息
    pub fn has_positions(&self) -> bool {
        !self.mask.is_empty()
    }
}

impl fmt::Display for ChannelLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self.channels {
            _ if !self.has_positions() => None,
            1 => Some("mono"),
            2 => Some("stereo"),
            4 => Some("quad"),
            6 => Some("5.1"),
            8 => Some("7.1"),
            _ => None,
        };
        match name {
            Some(name) => f.write_str(name),
            None => write!(f, "{}ch", self.channels),
        }
    }
}
