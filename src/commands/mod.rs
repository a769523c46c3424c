//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `parsers/`, `geo/`, `utils/`
//! - 子模块: build, layout, export, check

pub mod build;
pub mod check;
pub mod export;
pub mod layout;

use crate::cli::{Cli, Commands};
use crate::error::Result;
use crate::geo::{GeoBuilder, OverlapReport};
use crate::models::GeometryStore;
use crate::parsers;
use crate::utils::output;

use std::path::{Path, PathBuf};

/// 执行命令
pub fn run(cli: Cli) -> Result<()> {
    let data_dirs = cli.data_dirs();
    match cli.command {
        Commands::Build(args) => build::execute(args, &data_dirs),
        Commands::Layout(args) => layout::execute(args, &data_dirs),
        Commands::Export(args) => export::execute(args, &data_dirs),
        Commands::Check(args) => check::execute(args, &data_dirs),
    }
}

/// 读取表文件并构建体积树
pub(crate) fn build_geometry(input: &Path, data_dirs: &[PathBuf]) -> Result<GeometryStore> {
    let tables = parsers::load_tables(input, data_dirs)?;
    output::print_debug(&format!(
        "Loaded {} table(s) from '{}'",
        tables.len(),
        input.display()
    ));
    GeoBuilder::with_default_factories().build(&tables)
}

/// 打印重叠报告（最多 `max` 条）
pub(crate) fn print_overlap_reports(reports: &[OverlapReport], max: usize) {
    for report in reports.iter().take(max) {
        output::print_warning(&report.to_string());
    }
    if reports.len() > max {
        output::print_warning(&format!("  ... and {} more", reports.len() - max));
    }
}
