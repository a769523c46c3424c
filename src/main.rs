//! # dichroicon - 六边形 dichroicon 面板几何构建工具
//!
//! 从 RATDB 风格的几何表构建探测器几何：在长方体面板上以六边形密堆积
//! 方式铺满由六棱锥切分得到的 dichroicon 单元。
//!
//! ## 子命令
//! - `build`  - 构建几何并打印摘要
//! - `layout` - 计算面板格点，输出排布图或 CSV
//! - `export` - 导出 GDML（支持目录批量）
//! - `check`  - 重叠检查
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── parsers/   (几何表解析)
//!   │     ├── geo/       (工厂、格点、检查与导出)
//!   │     ├── batch/     (批量处理)
//!   │     └── models/    (实体与体积模型)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod commands;
mod error;
mod geo;
mod models;
mod parsers;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();
    utils::output::set_verbose(cli.verbose);

    if let Err(e) = commands::run(cli) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
