//! 输出缓冲分配.
//!
//! 解码器在写入采样之前通过 `BufferAllocator` 申请输出缓冲.
//! 分配失败以 `AdsError::OutOfMemory` 原样返回给调用方, 不做重试.

use adsdec_core::{AdsError, AdsResult};

/// 输出缓冲分配器
pub trait BufferAllocator: Send {
    /// 申请 `size` 字节、内容全部为 0 的缓冲
    fn allocate(&mut self, size: usize) -> AdsResult<Vec<u8>>;
}

/// 默认堆分配器
///
/// 使用 `try_reserve_exact`, 分配失败时返回错误而不是中止进程.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeapAllocator;

impl BufferAllocator for HeapAllocator {
    fn allocate(&mut self, size: usize) -> AdsResult<Vec<u8>> {
        let mut buf = Vec::new();
        buf.try_reserve_exact(size)
            .map_err(|e| AdsError::OutOfMemory(format!("申请 {size} 字节输出缓冲失败: {e}")))?;
        buf.resize(size, 0);
        Ok(buf)
    }
}
