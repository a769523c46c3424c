//! # 面板排布图
//!
//! 使用 `plotters` 绘制面板俯视图：
//! - 面板外框
//! - a 型单元的六边形轮廓
//! - b 型单元的六边形轮廓（半径 R，旋转 180°，半透明填充以示区分）
//!
//! 支持 PNG 和 SVG 输出。
//!
//! ## 依赖关系
//! - 被 `commands/layout.rs` 调用
//! - 使用 `geo/lattice.rs` 的 HexLattice
//! - 使用 `plotters` 渲染图表

use crate::error::{DichroiconError, Result};
use crate::geo::lattice::HexLattice;

use plotters::prelude::*;
use std::f64::consts::PI;
use std::path::Path;

const A_COLOR: RGBColor = RGBColor(0, 102, 204);
const B_COLOR: RGBColor = RGBColor(204, 51, 0);

/// 以 (cx, cy) 为中心、角点半径为 r 的闭合六边形顶点
///
/// `phase` 为第一个角点的方位角。
pub fn hexagon_points(cx: f64, cy: f64, r: f64, phase: f64) -> Vec<(f64, f64)> {
    (0..=6)
        .map(|k| {
            let phi = phase + k as f64 * PI / 3.0;
            (cx + r * phi.cos(), cy + r * phi.sin())
        })
        .collect()
}

/// b 型单元轮廓：与 a 型同为角点半径 R 的六边形，绕 z 旋转 180°
pub fn companion_outlines(lattice: &HexLattice) -> Vec<Vec<(f64, f64)>> {
    lattice
        .cells()
        .iter()
        .filter_map(|cell| cell.companion)
        .map(|[x, y]| hexagon_points(x, y, lattice.max_r, PI))
        .collect()
}

/// 生成排布图
pub fn generate_layout_plot(
    lattice: &HexLattice,
    panel: (f64, f64),
    output_path: &Path,
    title: &str,
    width: u32,
    height: u32,
    use_svg: bool,
) -> Result<()> {
    if use_svg {
        let root = SVGBackend::new(output_path, (width, height)).into_drawing_area();
        draw_layout_chart(&root, lattice, panel, title)?;
        root.present()
            .map_err(|e| DichroiconError::Other(e.to_string()))?;
    } else {
        let root = BitMapBackend::new(output_path, (width, height)).into_drawing_area();
        draw_layout_chart(&root, lattice, panel, title)?;
        root.present()
            .map_err(|e| DichroiconError::Other(e.to_string()))?;
    }
    Ok(())
}

/// 绘制排布图的核心逻辑
fn draw_layout_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    lattice: &HexLattice,
    panel: (f64, f64),
    title: &str,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)
        .map_err(|e| DichroiconError::Other(format!("{:?}", e)))?;

    let (px, py) = panel;
    let margin = 0.05 * px.max(py);

    let mut chart = ChartBuilder::on(root)
        .caption(title, ("sans-serif", 28).into_font())
        .margin(30)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(-px - margin..px + margin, -py - margin..py + margin)
        .map_err(|e| DichroiconError::Other(format!("{:?}", e)))?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("x (mm)")
        .y_desc("y (mm)")
        .x_label_style(("sans-serif", 16))
        .y_label_style(("sans-serif", 16))
        .axis_desc_style(("sans-serif", 18))
        .draw()
        .map_err(|e| DichroiconError::Other(format!("{:?}", e)))?;

    // 面板外框
    chart
        .draw_series(std::iter::once(PathElement::new(
            vec![(-px, -py), (px, -py), (px, py), (-px, py), (-px, -py)],
            BLACK.stroke_width(2),
        )))
        .map_err(|e| DichroiconError::Other(format!("{:?}", e)))?;

    let r = lattice.max_r;

    chart
        .draw_series(lattice.cells().iter().map(|cell| {
            PathElement::new(hexagon_points(cell.x, cell.y, r, 0.0), A_COLOR.stroke_width(1))
        }))
        .map_err(|e| DichroiconError::Other(format!("{:?}", e)))?
        .label(format!("type a ({})", lattice.count()))
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], A_COLOR.stroke_width(2)));

    let b_outlines = companion_outlines(lattice);
    chart
        .draw_series(
            b_outlines
                .iter()
                .map(|pts| Polygon::new(pts.clone(), B_COLOR.mix(0.25).filled())),
        )
        .map_err(|e| DichroiconError::Other(format!("{:?}", e)))?
        .label(format!("type b ({})", lattice.companion_count()))
        .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 20, y + 5)], B_COLOR.mix(0.25).filled()));
    chart
        .draw_series(
            b_outlines
                .into_iter()
                .map(|pts| PathElement::new(pts, B_COLOR.stroke_width(1))),
        )
        .map_err(|e| DichroiconError::Other(format!("{:?}", e)))?;

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(|e| DichroiconError::Other(format!("{:?}", e)))?;

    Ok(())
}
