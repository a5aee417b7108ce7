//! WAV (RIFF WAVE) 写入器.
//!
//! 写入 16 位整数 PCM:
//! 1. `new()` - 写入 RIFF 和 fmt 块, 预留 data 块大小
//! 2. `write_samples()` - 追加交错的 S16LE 数据
//! 3. `finish()` - 回填 RIFF 大小和 data 块大小

use std::io::{self, BufWriter, Seek, SeekFrom, Write};

use log::debug;

/// WAV 音频格式码: PCM 整数
const WAV_FORMAT_PCM: u16 = 0x0001;
/// 采样位深
const BITS_PER_SAMPLE: u16 = 16;
/// 头部总长: 12 (RIFF) + 24 (fmt) + 8 (data 块头)
pub const WAV_HEADER_SIZE: u64 = 44;
/// RIFF 大小字段偏移
const RIFF_SIZE_OFFSET: u64 = 4;
/// data 块大小字段偏移
const DATA_SIZE_OFFSET: u64 = 40;

/// WAV 写入器
pub struct WavWriter<W: Write + Seek> {
    writer: BufWriter<W>,
    /// 已写入的数据字节数
    data_written: u64,
}

impl<W: Write + Seek> WavWriter<W> {
    /// 创建写入器并写入头部
    pub fn new(inner: W, sample_rate: u32, channels: u32) -> io::Result<Self> {
        let channels = u16::try_from(channels)
            .map_err(|_| invalid_input(format!("WAV 不支持 {channels} 个声道")))?;
        let block_align = channels
            .checked_mul(BITS_PER_SAMPLE / 8)
            .ok_or_else(|| invalid_input(format!("WAV 不支持 {channels} 个声道")))?;
        let byte_rate = sample_rate
            .checked_mul(u32::from(block_align))
            .ok_or_else(|| invalid_input(format!("采样率过大: {sample_rate}")))?;

        let mut writer = BufWriter::new(inner);
        writer.write_all(b"RIFF")?;
        writer.write_all(&0u32.to_le_bytes())?; // 占位, finish 中回填
        writer.write_all(b"WAVE")?;

        writer.write_all(b"fmt ")?;
        writer.write_all(&16u32.to_le_bytes())?;
        writer.write_all(&WAV_FORMAT_PCM.to_le_bytes())?;
        writer.write_all(&channels.to_le_bytes())?;
        writer.write_all(&sample_rate.to_le_bytes())?;
        writer.write_all(&byte_rate.to_le_bytes())?;
        writer.write_all(&block_align.to_le_bytes())?;
        writer.write_all(&BITS_PER_SAMPLE.to_le_bytes())?;

        writer.write_all(b"data")?;
        writer.write_all(&0u32.to_le_bytes())?; // 占位, finish 中回填

        debug!("WAV 写入头部: {sample_rate} Hz, {channels} 声道, {BITS_PER_SAMPLE} 位");
        Ok(Self {
            writer,
            data_written: 0,
        })
    }

    /// 追加交错的 S16LE 采样
    pub fn write_samples(&mut self, data: &[u8]) -> io::Result<()> {
        self.writer.write_all(data)?;
        self.data_written += data.len() as u64;
        Ok(())
    }

    /// 已写入的数据字节数
    pub fn data_written(&self) -> u64 {
        self.data_written
    }

    /// 回填大小字段, 返回底层写入器
    pub fn finish(mut self) -> io::Result<W> {
        let data_size = u32::try_from(self.data_written)
            .ok()
            .filter(|size| size.checked_add(36).is_some())
            .ok_or_else(|| {
                invalid_input(format!(
                    "数据过大 ({} 字节), 超出 WAV 上限",
                    self.data_written
                ))
            })?;
        let riff_size = 36 + data_size;

        self.writer.seek(SeekFrom::Start(RIFF_SIZE_OFFSET))?;
        self.writer.write_all(&riff_size.to_le_bytes())?;
        self.writer.seek(SeekFrom::Start(DATA_SIZE_OFFSET))?;
        self.writer.write_all(&data_size.to_le_bytes())?;
        self.writer.seek(SeekFrom::End(0))?;

        debug!("WAV 写入尾部: riff_size={riff_size}, data_size={data_size}");
        self.writer.into_inner().map_err(|e| e.into_error())
    }
}

fn invalid_input(msg: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, msg)
}
