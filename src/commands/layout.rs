//! # layout 命令实现
//!
//! 只计算格点，不构建实体：用于快速查看一块面板能放多少单元。
//!
//! ## 功能
//! - 选出一张 `hexdichroicon` 表（多张时用 `--index`）
//! - 打印格点摘要
//! - 输出 PNG/SVG 排布图或 CSV 摆放表
//!
//! ## 依赖关系
//! - 使用 `cli/layout.rs` 定义的参数
//! - 使用 `geo/lattice.rs`, `geo/plot.rs`, `geo/export.rs`
//! - 使用 `utils/output.rs`

use crate::cli::layout::{LayoutArgs, LayoutFormat};
use crate::error::{DichroiconError, Result};
use crate::geo::hex_dichroicon::PanelParams;
use crate::geo::{export, plot, GEO_TABLE};
use crate::parsers;
use crate::utils::output;

use std::path::PathBuf;
use tabled::{Table, Tabled};

#[derive(Debug, Clone, Tabled)]
struct SummaryRow {
    #[tabled(rename = "Quantity")]
    key: String,
    #[tabled(rename = "Value")]
    value: String,
}

fn row(key: &str, value: String) -> SummaryRow {
    SummaryRow {
        key: key.to_string(),
        value,
    }
}

/// 执行 layout 命令
pub fn execute(args: LayoutArgs, data_dirs: &[PathBuf]) -> Result<()> {
    output::print_header("Hexagonal Panel Layout");

    let format = match args.format {
        Some(f) => f,
        None => LayoutFormat::from_path(&args.output).ok_or_else(|| {
            DichroiconError::InvalidArgument(format!(
                "cannot infer output format from '{}'; use --format",
                args.output.display()
            ))
        })?,
    };

    let tables = parsers::load_tables(&args.input, data_dirs)?;
    let table = parsers::select_table(&tables, GEO_TABLE, "hexdichroicon", args.index.as_deref())?;
    output::print_info(&format!("Using table {}", table.label()));

    let params = PanelParams::from_table(table)?;
    let lattice = params.lattice()?;
    let [panel_x, panel_y, _] = params.panel_size;
    let (dx, dy) = lattice.spacing();

    let rows = vec![
        row("Hexagon radius R (mm)", format!("{:.3}", lattice.max_r)),
        row(
            "Panel (mm)",
            format!("{:.1} x {:.1}", 2.0 * panel_x, 2.0 * panel_y),
        ),
        row(
            "Usable half-extent (mm)",
            format!("{:.3} x {:.3}", lattice.usable_x, lattice.usable_y),
        ),
        row("Spacing Δx, Δy (mm)", format!("{:.3}, {:.3}", dx, dy)),
        row(
            "Columns x rows (quadrant)",
            format!("{} x {}", lattice.ncols + 1, lattice.nrows + 1),
        ),
        row("Type-a cells", lattice.count().to_string()),
        row("Type-b cells", lattice.companion_count().to_string()),
    ];
    println!("{}", Table::new(&rows));

    match format {
        LayoutFormat::Csv => export::to_csv(&lattice, &args.output)?,
        LayoutFormat::Png | LayoutFormat::Svg => plot::generate_layout_plot(
            &lattice,
            (panel_x, panel_y),
            &args.output,
            &format!("{} layout", table.index),
            args.width,
            args.height,
            format == LayoutFormat::Svg,
        )?,
    }

    output::print_success(&format!(
        "Layout ({}) saved to '{}'",
        format,
        args.output.display()
    ));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const TABLES: &str = r#"
{ name: "GEO", index: "world", type: "box", mother: "", material: "air", size: [500.0, 500.0, 500.0] }
{
  name: "GEO",
  index: "panel",
  type: "hexdichroicon",
  mother: "world",
  material: "acrylic",
  rs: [0.0, 5.0, 10.0, 0.0],
  zs: [0.0, 0.0, 20.0, 20.0],
  panel_size: [100.0, 100.0, 30.0],
}
"#;

    #[test]
    fn test_layout_csv() {
        let dir = std::env::temp_dir().join(format!("dichroicon_layout_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let input = dir.join("panel.geo");
        fs::write(&input, TABLES).unwrap();

        let args = LayoutArgs {
            input,
            index: None,
            output: dir.join("cells.csv"),
            format: None,
            width: 800,
            height: 600,
        };
        let result = execute(args, &[]);
        let content = fs::read_to_string(dir.join("cells.csv")).unwrap_or_default();
        fs::remove_dir_all(&dir).ok();

        assert!(result.is_ok(), "{:?}", result.err());
        // 137 个 a 型单元 + 126 个 b 型单元 + 表头
        assert_eq!(content.lines().count(), 1 + 137 + 126);
    }

    #[test]
    fn test_unknown_output_format() {
        let args = LayoutArgs {
            input: PathBuf::from("missing.geo"),
            index: None,
            output: PathBuf::from("layout.pdf"),
            format: None,
            width: 800,
            height: 600,
        };
        assert!(matches!(
            execute(args, &[]),
            Err(DichroiconError::InvalidArgument(_))
        ));
    }
}
