//! # layout 子命令 CLI 定义
//!
//! 计算 `hexdichroicon` 面板的格点排布，输出图像或 CSV。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/layout.rs`

use clap::{Args, ValueEnum};
use std::path::{Path, PathBuf};

/// 排布输出格式
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum LayoutFormat {
    /// PNG image
    Png,
    /// SVG vector image
    Svg,
    /// CSV placement table
    Csv,
}

impl LayoutFormat {
    /// 由扩展名推断
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "png" => Some(LayoutFormat::Png),
            "svg" => Some(LayoutFormat::Svg),
            "csv" => Some(LayoutFormat::Csv),
            _ => None,
        }
    }
}

impl std::fmt::Display for LayoutFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayoutFormat::Png => write!(f, "png"),
            LayoutFormat::Svg => write!(f, "svg"),
            LayoutFormat::Csv => write!(f, "csv"),
        }
    }
}

/// layout 子命令参数
#[derive(Args, Debug)]
pub struct LayoutArgs {
    /// Input table file (.geo / .ratdb)
    pub input: PathBuf,

    /// Index of the hexdichroicon table (required when several exist)
    #[arg(long)]
    pub index: Option<String>,

    /// Output file
    #[arg(short, long, default_value = "layout.png")]
    pub output: PathBuf,

    /// Output format (auto-detected from extension if not specified)
    #[arg(short, long, value_enum)]
    pub format: Option<LayoutFormat>,

    /// Image width in pixels
    #[arg(long, default_value_t = 1200)]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = 1000)]
    pub height: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            LayoutFormat::from_path(Path::new("out/panel.SVG")),
            Some(LayoutFormat::Svg)
        );
        assert_eq!(
            LayoutFormat::from_path(Path::new("cells.csv")),
            Some(LayoutFormat::Csv)
        );
        assert_eq!(LayoutFormat::from_path(Path::new("layout")), None);
        assert_eq!(LayoutFormat::from_path(Path::new("layout.pdf")), None);
    }
}
