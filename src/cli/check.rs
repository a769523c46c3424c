//! # check 子命令 CLI 定义
//!
//! 构建几何并检查子体积之间的重叠和越界。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/check.rs`

use clap::Args;
use std::path::PathBuf;

/// check 子命令参数
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Input table file (.geo / .ratdb)
    pub input: PathBuf,

    /// Surface sampling divisions per face
    #[arg(long, default_value_t = 10)]
    pub resolution: usize,

    /// Number of parallel jobs (0 = auto)
    #[arg(short, long, default_value_t = 0)]
    pub jobs: usize,

    /// Maximum number of overlap reports to print
    #[arg(long, default_value_t = 20)]
    pub max_reports: usize,
}
