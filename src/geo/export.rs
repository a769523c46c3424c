//! # 格点摆放导出
//!
//! 把面板上的单元摆放导出为 CSV，便于在其他工具里核对排布。
//!
//! ## 列
//! `copy_number, kind, x_mm, y_mm, rotation_deg`
//! - a 型单元: 格点中心，不旋转
//! - b 型单元: 格点中心右侧 R 处，旋转 180°
//!
//! ## 依赖关系
//! - 被 `commands/layout.rs` 调用
//! - 使用 `geo/lattice.rs` 的 HexLattice
//! - 使用 `csv` 库写入 CSV 文件

use crate::error::{DichroiconError, Result};
use crate::geo::lattice::{CellKind, HexLattice};

use std::path::Path;

/// 一行摆放记录
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementRow {
    pub copy_number: usize,
    pub kind: CellKind,
    pub x: f64,
    pub y: f64,
    pub rotation_deg: f64,
}

/// 按格点顺序展开 a/b 型摆放
pub fn placement_rows(lattice: &HexLattice) -> Vec<PlacementRow> {
    let mut rows = Vec::with_capacity(lattice.count() + lattice.companion_count());
    for cell in lattice.cells() {
        rows.push(PlacementRow {
            copy_number: cell.copy_number,
            kind: CellKind::A,
            x: cell.x,
            y: cell.y,
            rotation_deg: 0.0,
        });
        if let Some([x, y]) = cell.companion {
            rows.push(PlacementRow {
                copy_number: cell.copy_number,
                kind: CellKind::B,
                x,
                y,
                rotation_deg: 180.0,
            });
        }
    }
    rows
}

/// 导出摆放为 CSV 格式
pub fn to_csv(lattice: &HexLattice, output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path).map_err(DichroiconError::CsvError)?;

    wtr.write_record(["copy_number", "kind", "x_mm", "y_mm", "rotation_deg"])
        .map_err(DichroiconError::CsvError)?;

    for row in placement_rows(lattice) {
        wtr.write_record(&[
            row.copy_number.to_string(),
            row.kind.to_string(),
            format!("{:.4}", row.x),
            format!("{:.4}", row.y),
            format!("{:.1}", row.rotation_deg),
        ])
        .map_err(DichroiconError::CsvError)?;
    }

    wtr.flush()
        .map_err(|e| DichroiconError::write(output_path, e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_follow_cells() {
        let lattice = HexLattice::new(10.0, 100.0, 100.0).unwrap();
        let rows = placement_rows(&lattice);
        assert_eq!(rows.len(), 137 + 126);
        assert_eq!(rows[0].kind, CellKind::A);

        for pair in rows.windows(2) {
            if pair[1].kind == CellKind::B {
                assert_eq!(pair[0].kind, CellKind::A);
                assert_eq!(pair[0].copy_number, pair[1].copy_number);
                assert!((pair[1].x - pair[0].x - 10.0).abs() < 1e-9);
                assert!((pair[1].y - pair[0].y).abs() < 1e-9);
                assert!((pair[1].rotation_deg - 180.0).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_write_csv() {
        let lattice = HexLattice::new(10.0, 10.0, 9.0).unwrap();
        let path = std::env::temp_dir().join(format!(
            "dichroicon_layout_{}.csv",
            std::process::id()
        ));
        to_csv(&lattice, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();

        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "copy_number,kind,x_mm,y_mm,rotation_deg");
        assert_eq!(lines.len(), 2);
        assert!(lines[1].contains(",a,"));
    }
}
