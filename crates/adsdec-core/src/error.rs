//! 统一错误类型定义.
//!
//! 所有 adsdec crate 共用的错误类型, 支持跨模块传播.

use thiserror::Error;

/// 框架统一错误类型
///
/// 解码核心只会产生 `InvalidData` 和 `OutOfMemory`,
/// 其余变体属于注册表、分块缓冲和生命周期校验.
#[derive(Debug, Error)]
pub enum AdsError {
    /// 无效参数
    #[error("无效参数: {0}")]
    InvalidArgument(String),

    /// 无效数据 (头部缺失、字段非法等), 对当前流是致命的
    #[error("无效数据: {0}")]
    InvalidData(String),

    /// 内存分配失败
    #[error("内存分配失败: {0}")]
    OutOfMemory(String),

    /// 未找到指定的编解码器
    #[error("未找到编解码器: {0}")]
    CodecNotFound(String),

    /// 数据不足, 需要更多输入
    #[error("数据不足, 需要更多输入")]
    NeedMoreData,

    /// 已到达流末尾
    #[error("已到达流末尾")]
    Eof,

    /// I/O 错误
    #[error("I/O 错误: {0}")]
    Io(#[from] std::io::Error),
}

/// 框架统一 Result 类型
pub type AdsResult<T> = Result<T, AdsError>;
