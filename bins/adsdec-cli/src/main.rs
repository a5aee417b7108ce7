//! adsdec-cli - Sony ADS 解码命令行工具
//!
//! 把 ADS 码流解码为 WAV 或原始 S16LE, 或只探测头部信息.

mod decode;
mod logging;
mod probe;
mod wav;

use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Result, bail};
use clap::Parser;

use decode::{DecodeConfig, decode_file};

#[derive(Parser, Debug)]
#[command(name = "adsdec-cli", version, about = "纯 Rust Sony ADS 音频解码工具")]
struct Cli {
    /// 输入文件路径
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// 输出文件路径 (默认 WAV)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// 只解析头部并输出流信息
    #[arg(long)]
    probe: bool,

    /// 探测结果输出为 JSON
    #[arg(long)]
    json: bool,

    /// 输出无头部的 S16LE 而不是 WAV
    #[arg(long)]
    raw: bool,

    /// 每次送入解码器的字节数
    #[arg(long, default_value_t = 2048)]
    chunk_size: usize,

    /// 标记流开头带有编码器写入的静音帧 (仅记录)
    #[arg(long)]
    skip_silent_frames: bool,

    /// 覆盖输出文件
    #[arg(short = 'y', long)]
    overwrite: bool,

    /// 日志目录
    #[arg(long, default_value = "logs")]
    log_dir: PathBuf,

    /// 日志级别 (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = logging::init("adsdec-cli", &cli.log_dir, cli.verbose) {
        eprintln!("警告: 日志初始化失败: {e:#}");
    }

    let Some(input) = cli.input.as_deref() else {
        print_banner();
        return;
    };

    if let Err(e) = run(&cli, input) {
        eprintln!("错误: {e:#}");
        process::exit(1);
    }
}

fn run(cli: &Cli, input: &Path) -> Result<()> {
    if cli.probe {
        let info = probe::probe_file(input)?;
        return probe::print(&info, cli.json);
    }

    let Some(output) = cli.output.as_deref() else {
        bail!("必须指定输出文件 (-o <输出文件>)");
    };
    if output.exists() && !cli.overwrite {
        bail!("输出文件 '{}' 已存在, 使用 -y 覆盖", output.display());
    }

    let config = DecodeConfig {
        chunk_size: cli.chunk_size,
        raw: cli.raw,
        skip_silent_frames: cli.skip_silent_frames,
    };
    let summary = decode_file(input, output, &config)?;

    let seconds = if summary.sample_rate > 0 {
        summary.samples as f64 / f64::from(summary.sample_rate)
    } else {
        0.0
    };
    eprintln!(
        "{} -> {}: {} Hz, {} 声道, {} 采样, {:.3} 秒, {} 字节",
        input.display(),
        output.display(),
        summary.sample_rate,
        summary.channels,
        summary.samples,
        seconds,
        summary.bytes_out,
    );
    Ok(())
}

fn print_banner() {
    println!(
        "adsdec-cli 版本 {} -- 纯 Rust Sony ADS 音频解码工具",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("用法: adsdec-cli -i <输入文件> -o <输出文件> [选项]");
    println!("      adsdec-cli -i <输入文件> --probe [--json]");
    println!();
    println!("选项:");
    println!("  -i <文件>             输入 ADS 文件");
    println!("  -o <文件>             输出文件 (默认 WAV)");
    println!("  --raw                 输出无头部的 S16LE");
    println!("  --probe               只显示头部信息");
    println!("  --json                探测结果输出为 JSON");
    println!("  --chunk-size <字节>   分块大小 (默认 2048)");
    println!("  --skip-silent-frames  标记开头静音帧 (仅记录)");
    println!("  -y                    覆盖输出文件");
    println!("  -v                    日志级别 (-v debug, -vv trace)");
}
