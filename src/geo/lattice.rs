//! # 六边形密堆积格点
//!
//! 计算面板上能放下的六边形单元中心。
//!
//! ## 算法
//! - 可用半宽: `X' = X − R`，`Y' = Y − R·√3/2`
//! - 间距: `Δx = 1.5R`，`Δy = √3·R`
//! - 列数/行数: `⌊X'/Δx⌋`，`⌊Y'/Δy⌋`（闭区间遍历）
//! - 采用旋转 90° 的 Hexagonal Efficient Coordinate System (a, c, r)：
//!   `x = 3(c + a/2)R`，`y = √3(r + a/2)R`；
//!   a 每列在 0/1 间交替，c 每经过一个 a = 1 的列加一，r 为列内行号。
//! - 第一象限的每个中心镜像到其余象限（坐标为 0 时不重复）。
//! - 每个单元右侧 (x + R, y) 处可放置旋转 180° 的 b 型单元，
//!   仅当 `x + R < X'` 时存在。
//!
//! ## 依赖关系
//! - 被 `geo/hex_dichroicon.rs` 和 `commands/layout.rs` 使用

use crate::error::{DichroiconError, Result};
use crate::models::Transform3D;
use crate::utils::output;

use std::f64::consts::PI;

/// 单元类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    /// 主单元
    A,
    /// 右侧旋转 180° 的镜像单元
    B,
}

impl std::fmt::Display for CellKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellKind::A => write!(f, "a"),
            CellKind::B => write!(f, "b"),
        }
    }
}

/// 一个格点单元
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HexCell {
    pub copy_number: usize,
    pub x: f64,
    pub y: f64,
    /// b 型单元中心
    pub companion: Option<[f64; 2]>,
}

impl HexCell {
    pub fn transform(&self) -> Transform3D {
        Transform3D::translation(self.x, self.y, 0.0)
    }

    pub fn companion_transform(&self) -> Option<Transform3D> {
        self.companion
            .map(|[x, y]| Transform3D::rotation_z(PI).with_translation([x, y, 0.0]))
    }
}

/// 六边形格点
#[derive(Debug, Clone)]
pub struct HexLattice {
    /// 单元角点半径
    pub max_r: f64,
    /// 中心可用半宽 X'
    pub usable_x: f64,
    /// 中心可用半高 Y'
    pub usable_y: f64,
    pub ncols: usize,
    pub nrows: usize,
    cells: Vec<HexCell>,
}

impl HexLattice {
    /// 为半宽 `panel_x`、半高 `panel_y` 的面板计算格点
    pub fn new(max_r: f64, panel_x: f64, panel_y: f64) -> Result<Self> {
        if !(max_r > 0.0) || !max_r.is_finite() {
            return Err(DichroiconError::InvalidArgument(format!(
                "hexagon radius must be positive, got {}",
                max_r
            )));
        }

        let usable_x = panel_x - max_r;
        let usable_y = panel_y - max_r * 3f64.sqrt() / 2.0;
        let (delta_x, delta_y) = Self::spacing_for(max_r);

        let mut lattice = HexLattice {
            max_r,
            usable_x,
            usable_y,
            ncols: 0,
            nrows: 0,
            cells: Vec::new(),
        };

        if usable_x < 0.0 || usable_y < 0.0 {
            output::print_warning(&format!(
                "Panel {:.1} mm x {:.1} mm is too small for hexagons of radius {:.1} mm",
                2.0 * panel_x,
                2.0 * panel_y,
                max_r
            ));
            return Ok(lattice);
        }

        lattice.ncols = (usable_x / delta_x).floor() as usize;
        lattice.nrows = (usable_y / delta_y).floor() as usize;
        lattice.fill();
        Ok(lattice)
    }

    fn spacing_for(max_r: f64) -> (f64, f64) {
        (1.5 * max_r, 3f64.sqrt() * max_r)
    }

    /// 中心间距 (Δx, Δy)
    pub fn spacing(&self) -> (f64, f64) {
        Self::spacing_for(self.max_r)
    }

    fn fill(&mut self) {
        let r = self.max_r;
        let mut hecs_a = 0usize;
        let mut hecs_c = 0usize;

        for _col in 0..=self.ncols {
            let mut hecs_r = 0usize;
            for _row in 0..=self.nrows {
                let a = hecs_a as f64 / 2.0;
                let x = 3.0 * (hecs_c as f64 + a) * r;
                let y = 3f64.sqrt() * (hecs_r as f64 + a) * r;
                // a = 1 的列仍可能越界
                if x > self.usable_x || y > self.usable_y {
                    continue;
                }
                output::print_debug(&format!("x = {:.3} mm, y = {:.3} mm", x, y));

                self.push_cell(x, y);
                if x != 0.0 {
                    self.push_cell(-x, y);
                }
                if y != 0.0 {
                    self.push_cell(x, -y);
                }
                if x != 0.0 && y != 0.0 {
                    self.push_cell(-x, -y);
                }
                hecs_r += 1;
            }
            if hecs_a == 1 {
                hecs_c += 1;
            }
            hecs_a = 1 - hecs_a;
        }
    }

    fn push_cell(&mut self, x: f64, y: f64) {
        // TODO: gaps left of the leftmost column never receive a b-type companion
        let companion = (x + self.max_r < self.usable_x).then_some([x + self.max_r, y]);
        self.cells.push(HexCell {
            copy_number: self.cells.len(),
            x,
            y,
            companion,
        });
    }

    pub fn cells(&self) -> &[HexCell] {
        &self.cells
    }

    /// a 型单元数
    pub fn count(&self) -> usize {
        self.cells.len()
    }

    /// b 型单元数
    pub fn companion_count(&self) -> usize {
        self.cells.iter().filter(|c| c.companion.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_panel_counts() {
        let lattice = HexLattice::new(10.0, 100.0, 100.0).unwrap();
        assert_eq!(lattice.ncols, 6);
        assert_eq!(lattice.nrows, 5);
        assert_eq!(lattice.count(), 137);
        // 只有 x = +90 mm 的 11 个单元没有 b 型单元
        assert_eq!(lattice.companion_count(), 137 - 11);
    }

    #[test]
    fn test_placement_order() {
        let lattice = HexLattice::new(10.0, 100.0, 100.0).unwrap();
        let cells = lattice.cells();
        let dy = 3f64.sqrt() * 10.0;
        assert_eq!((cells[0].x, cells[0].y), (0.0, 0.0));
        assert!((cells[1].y - dy).abs() < 1e-9 && cells[1].x == 0.0);
        assert!((cells[2].y + dy).abs() < 1e-9 && cells[2].x == 0.0);
        assert!(cells.iter().enumerate().all(|(i, c)| c.copy_number == i));
    }

    #[test]
    fn test_mirror_symmetry() {
        let lattice = HexLattice::new(12.5, 180.0, 95.0).unwrap();
        let cells = lattice.cells();
        let has = |x: f64, y: f64| {
            cells
                .iter()
                .any(|c| (c.x - x).abs() < 1e-9 && (c.y - y).abs() < 1e-9)
        };
        for c in cells {
            assert!(has(-c.x, c.y));
            assert!(has(c.x, -c.y));
            assert!(c.x.abs() <= lattice.usable_x + 1e-9);
            assert!(c.y.abs() <= lattice.usable_y + 1e-9);
        }
    }

    #[test]
    fn test_no_overlapping_centres() {
        let lattice = HexLattice::new(10.0, 100.0, 100.0).unwrap();
        let cells = lattice.cells();
        // 相邻中心距离至少为 √3·R
        let min_dist = 3f64.sqrt() * 10.0 - 1e-9;
        for (i, a) in cells.iter().enumerate() {
            for b in &cells[i + 1..] {
                let d = ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt();
                assert!(d >= min_dist);
            }
        }
    }

    #[test]
    fn test_single_cell_panel() {
        let lattice = HexLattice::new(10.0, 10.0, 9.0).unwrap();
        assert_eq!(lattice.count(), 1);
        assert_eq!(lattice.companion_count(), 0);
    }

    #[test]
    fn test_panel_too_small() {
        let lattice = HexLattice::new(10.0, 5.0, 5.0).unwrap();
        assert_eq!(lattice.count(), 0);
    }

    #[test]
    fn test_invalid_radius() {
        assert!(HexLattice::new(0.0, 100.0, 100.0).is_err());
    }

    #[test]
    fn test_companion_transform() {
        let lattice = HexLattice::new(10.0, 100.0, 100.0).unwrap();
        let cell = lattice.cells()[0];
        let t = cell.companion_transform().unwrap();
        let p = t.apply([1.0, 0.0, 0.0]);
        assert!((p[0] - 9.0).abs() < 1e-9);
        assert!(p[1].abs() < 1e-9);
    }
}
