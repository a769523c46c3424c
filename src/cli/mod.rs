//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `build`: 构建几何并输出摘要
//! - `layout`: 计算面板格点并输出排布图 / CSV
//! - `export`: 导出 GDML（支持目录批量）
//! - `check`: 重叠检查
//!
//! ## 全局参数
//! - `--verbose`: 输出调试信息
//! - `--data-dir` / `DICHROICONDATA`: 数据目录（在其 `ratdb/`、`models/` 下查找输入）
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: build, layout, export, check

pub mod build;
pub mod check;
pub mod export;
pub mod layout;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// dichroicon - 六边形 dichroicon 面板几何构建工具
#[derive(Parser)]
#[command(name = "dichroicon")]
#[command(author = "Dichroicon Developers")]
#[command(version)]
#[command(about = "Build, check and export hexagonal dichroicon panel geometries", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Print debug output
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// Data directory searched for inputs (under ratdb/ and models/)
    #[arg(long, global = true, env = "DICHROICONDATA")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// 输入文件的额外搜索目录
    pub fn data_dirs(&self) -> Vec<PathBuf> {
        self.data_dir.iter().cloned().collect()
    }
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Build the geometry described by a table file and print a summary
    Build(build::BuildArgs),

    /// Compute the cell layout of a hexdichroicon panel
    Layout(layout::LayoutArgs),

    /// Export built geometries to GDML
    Export(export::ExportArgs),

    /// Check a built geometry for overlapping placements
    Check(check::CheckArgs),
}
