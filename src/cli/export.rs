//! # export 子命令 CLI 定义
//!
//! 构建几何并写出 GDML。输入为目录时批量处理所有匹配文件。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/export.rs`

use clap::Args;
use std::path::PathBuf;

/// export 子命令参数
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Input: table file or directory containing table files
    pub input: PathBuf,

    /// Output: GDML file (single mode) or directory (batch mode)
    #[arg(short, long, default_value = "geometry.gdml")]
    pub output: PathBuf,

    /// Glob pattern(s) for batch mode, comma separated
    #[arg(short, long, default_value = "*.geo,*.ratdb")]
    pub pattern: String,

    /// Recurse into subdirectories (batch mode)
    #[arg(short, long, default_value_t = false)]
    pub recursive: bool,

    /// Number of parallel jobs (0 = auto)
    #[arg(short, long, default_value_t = 0)]
    pub jobs: usize,

    /// Overwrite existing output files (batch mode)
    #[arg(long, default_value_t = false)]
    pub overwrite: bool,
}
