//! FFmpeg 进程管理模块 - 防止管道死锁
//!
//! ## 问题背景
//!
//! 如果 pipe 了 stderr 却只在进程结束后才读取，FFmpeg 输出的日志一旦超过
//! 管道缓冲区（通常 64KB），FFmpeg 就会阻塞在写 stderr 上，而我们阻塞在
//! `wait()` 上，两者互相等待。
//!
//! ## 解决方案
//!
//! stdout 直接丢弃；stderr 由独立线程持续读取，进程退出后随退出状态一起返回，
//! 作为失败时的诊断文本。
//!
//! ## 使用示例
//!
//! ```ignore
//! use shared_utils::ffmpeg_process::FfmpegProcess;
//! use std::process::Command;
//!
//! let mut cmd = Command::new("ffmpeg");
//! cmd.arg("-i").arg("input.mp4").arg("output.mp4");
//!
//! let output = FfmpegProcess::spawn(&mut cmd)?.wait_with_output()?;
//! if !output.status.success() {
//!     eprintln!("{}", format_ffmpeg_error(&output.stderr));
//! }
//! ```

use crate::logging::log_external_tool;
use std::io::{self, BufRead, BufReader};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::info;

/// 已结束的 FFmpeg 进程结果
#[derive(Debug)]
pub struct FfmpegOutput {
    pub status: ExitStatus,
    /// 完整的 stderr 内容
    pub stderr: String,
    pub duration: Duration,
}

/// FFmpeg 进程包装器 - 自动消耗 stderr，防止管道死锁
pub struct FfmpegProcess {
    child: Child,
    stderr_thread: Option<JoinHandle<String>>,
    program: String,
    command_line: String,
    started: Instant,
}

impl FfmpegProcess {
    /// 启动进程：stdin/stdout 置空，stderr 由后台线程收集
    ///
    /// 可执行文件不存在时返回 `io::ErrorKind::NotFound`。
    pub fn spawn(cmd: &mut Command) -> io::Result<Self> {
        let program = cmd.get_program().to_string_lossy().into_owned();
        let command_line = command_line(cmd);
        info!(command = %command_line, "Executing FFmpeg command");

        cmd.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        let mut child = cmd.spawn()?;

        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| io::Error::other("Failed to capture FFmpeg stderr"))?;

        let stderr_thread = thread::spawn(move || drain_lossy(BufReader::new(stderr)));

        Ok(Self {
            child,
            stderr_thread: Some(stderr_thread),
            program,
            command_line,
            started: Instant::now(),
        })
    }

    /// 等待进程结束，返回退出状态和 stderr
    pub fn wait_with_output(mut self) -> io::Result<FfmpegOutput> {
        let status = self.child.wait()?;
        let stderr = self
            .stderr_thread
            .take()
            .map(|t| t.join().unwrap_or_default())
            .unwrap_or_default();
        let duration = self.started.elapsed();

        log_external_tool(
            &self.program,
            &self.command_line,
            &stderr,
            status.code(),
            duration,
        );

        Ok(FfmpegOutput {
            status,
            stderr,
            duration,
        })
    }
}

/// 读到 EOF 为止；非 UTF-8 字节（例如文件名）按 lossy 转换，不能中断读取，
/// 否则管道读端关闭后 FFmpeg 会被 SIGPIPE 杀掉。
fn drain_lossy<R: BufRead>(mut reader: R) -> String {
    let mut buf = String::new();
    let mut line = Vec::new();
    loop {
        line.clear();
        match reader.read_until(b'\n', &mut line) {
            Ok(0) => break,
            Ok(_) => {
                if line.last() == Some(&b'\n') {
                    line.pop();
                }
                buf.push_str(&String::from_utf8_lossy(&line));
                buf.push('\n');
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(_) => break,
        }
    }
    buf
}

/// 把 `Command` 渲染成一行可读的命令（用于日志）
pub fn command_line(cmd: &Command) -> String {
    let mut parts = vec![cmd.get_program().to_string_lossy().into_owned()];
    parts.extend(cmd.get_args().map(|a| a.to_string_lossy().into_owned()));
    parts.join(" ")
}

/// 从 stderr 中提取最有意义的一行错误信息
///
/// 1. 优先查找包含 "Error" 或 "error" 的最后一行
/// 2. 否则返回最后一行非进度内容
/// 3. 全空时返回 "Unknown FFmpeg error"
pub fn format_ffmpeg_error(stderr: &str) -> String {
    if let Some(error_line) = stderr
        .lines()
        .rev()
        .find(|line| line.contains("Error") || line.contains("error"))
    {
        return error_line.trim().to_string();
    }

    stderr
        .lines()
        .rev()
        .find(|line| {
            let trimmed = line.trim();
            !trimmed.is_empty()
                && !trimmed.starts_with("frame=")
                && !trimmed.starts_with("fps=")
                && !trimmed.starts_with("size=")
        })
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "Unknown FFmpeg error".to_string())
}
