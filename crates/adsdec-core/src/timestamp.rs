//! 以时间基计量的时间点.
//!
//! PCM 解码器按每声道采样数推进 pts, 时间基取 1/采样率,
//! 因此 pts 同时就是流内的采样位置.

use std::fmt;

use crate::rational::Rational;

/// 未定义的 pts
pub const NOPTS_VALUE: i64 = i64::MIN;

/// 时间点: 秒 = pts * time_base
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timestamp {
    /// 时间基单位计数, `NOPTS_VALUE` 表示未定义
    pub pts: i64,
    /// 时间基
    pub time_base: Rational,
}

impl Timestamp {
    pub const fn new(pts: i64, time_base: Rational) -> Self {
        Self { pts, time_base }
    }

    /// 未定义的时间点
    pub const fn none() -> Self {
        Self::new(NOPTS_VALUE, Rational::UNDEFINED)
    }

    /// 由每声道采样位置和采样率构造
    ///
    /// 位置超出 i64 或采样率无效时返回未定义的时间点.
    pub fn from_sample_position(position: u64, sample_rate: u32) -> Self {
        let time_base = Rational::from_sample_rate(sample_rate);
        match i64::try_from(position) {
            Ok(pts) if time_base.is_valid() => Self::new(pts, time_base),
            _ => Self::none(),
        }
    }

    pub const fn is_valid(&self) -> bool {
        self.pts != NOPTS_VALUE && self.time_base.is_valid()
    }

    /// 向后推进 `ticks` 个时间基单位
    ///
    /// 溢出或自身无效时结果为未定义.
    pub fn advance(&self, ticks: i64) -> Self {
        if !self.is_valid() {
            return Self::none();
        }
        match self.pts.checked_add(ticks) {
            Some(pts) if pts != NOPTS_VALUE => Self::new(pts, self.time_base),
            _ => Self::none(),
        }
    }

    /// 换算为秒, 未定义时为 NaN
    pub fn to_seconds(&self) -> f64 {
        if !self.is_valid() {
            return f64::NAN;
        }
        self.pts as f64 * self.time_base.to_f64()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "{} ({:.3}s)", self.pts, self.to_seconds())
        } else {
            write!(f, "NOPTS")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_采样位置换算为秒() {
        let ts = Timestamp::from_sample_position(22050, 44100);
        assert_eq!(ts.pts, 22050);
        assert_eq!(ts.time_base, Rational::new(1, 44100));
        assert!((ts.to_seconds() - 0.5).abs() < f64::EPSILON);
        assert_eq!(ts.to_string(), "22050 (0.500s)");
    }

    #[test]
    fn test_无效采样率() {
        assert!(!Timestamp::from_sample_position(10, 0).is_valid());
        assert!(!Timestamp::from_sample_position(u64::MAX, 48000).is_valid());
    }

    #[test]
    fn test_推进() {
        let ts = Timestamp::from_sample_position(100, 48000).advance(28);
        assert_eq!(ts.pts, 128);
        assert!(!Timestamp::new(i64::MAX, Rational::new(1, 48000)).advance(1).is_valid());
        assert!(!Timestamp::none().advance(1).is_valid());
    }

    #[test]
    fn test_未定义() {
        let ts = Timestamp::none();
        assert!(ts.to_seconds().is_nan());
        assert_eq!(ts.to_string(), "NOPTS");
    }
}
