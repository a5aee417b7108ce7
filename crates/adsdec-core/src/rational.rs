//! 有理数类型, 用于时间基 (time_base).
//!
//! 对标 FFmpeg 的 `AVRational`.

use std::fmt;

/// 有理数, 由分子和分母组成
///
/// 音频流的时间基通常为 1/采样率, 例如 1/44100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rational {
    /// 分子
    pub num: i32,
    /// 分母
    pub den: i32,
}

impl Rational {
    /// 创建新的有理数
    pub const fn new(num: i32, den: i32) -> Self {
        Self { num, den }
    }

    /// 未定义 (分母为 0)
    pub const UNDEFINED: Self = Self { num: 0, den: 0 };

    /// 以采样率构造音频时间基 1/sample_rate
    ///
    /// 采样率超出 i32 范围时返回 `UNDEFINED`.
    pub fn from_sample_rate(sample_rate: u32) -> Self {
        match i32::try_from(sample_rate) {
            Ok(den) if den > 0 => Self { num: 1, den },
            _ => Self::UNDEFINED,
        }
    }

    /// 判断是否有效 (分母不为 0)
    pub const fn is_valid(&self) -> bool {
        self.den != 0
    }

    /// 转换为 f64 浮点数
    ///
    /// 如果分母为 0, 返回 `f64::NAN`.
    pub fn to_f64(self) -> f64 {
        if self.den == 0 {
            return f64::NAN;
        }
        f64::from(self.num) / f64::from(self.den)
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rational_from_sample_rate() {
        assert_eq!(Rational::from_sample_rate(44100), Rational::new(1, 44100));
        assert!(!Rational::from_sample_rate(0).is_valid());
        assert!(!Rational::from_sample_rate(u32::MAX).is_valid());
    }

    #[test]
    fn test_rational_invalid_value() {
        let r = Rational::UNDEFINED;
        assert!(!r.is_valid());
        assert!(r.to_f64().is_nan());
    }

    #[test]
    fn test_rational_display() {
        assert_eq!(format!("{}", Rational::new(1, 48000)), "1/48000");
    }
}
