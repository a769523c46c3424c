//! # build 子命令 CLI 定义
//!
//! 读取几何表，构建体积树并打印摘要。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/build.rs`

use clap::Args;
use std::path::PathBuf;

/// build 子命令参数
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Input table file (.geo / .ratdb)
    pub input: PathBuf,

    /// Run the overlap check after building
    #[arg(long, default_value_t = false)]
    pub check_overlaps: bool,

    /// Surface sampling divisions per face for the overlap check
    #[arg(long, default_value_t = 10)]
    pub resolution: usize,

    /// Number of parallel jobs (0 = auto)
    #[arg(short, long, default_value_t = 0)]
    pub jobs: usize,
}
