//! # 显示属性读取
//!
//! 从几何表的可选字段构造 `VisAttributes`：
//! - `color`: 3 (RGB) 或 4 (RGBA) 个分量
//! - `drawstyle`: `"wireframe"` 或 `"solid"`
//! - `force_auxedge`: 1 时显示辅助边
//! - `invisible`: 1 时不可见（最后检查，覆盖其余设置）
//!
//! 取值不合法时只给出警告，字段缺失时跳过。
//!
//! ## 依赖关系
//! - 被 `geo/box_factory.rs` 和 `geo/hex_dichroicon.rs` 使用

use crate::error::Result;
use crate::models::{DbTable, VisAttributes};
use crate::utils::output;

/// 读取显示属性
pub fn vis_attributes(table: &DbTable) -> Result<VisAttributes> {
    vis_attributes_with_colour(table, "color")
}

/// 读取显示属性，颜色取自指定字段
pub fn vis_attributes_with_colour(table: &DbTable, colour_field: &str) -> Result<VisAttributes> {
    let mut vis = VisAttributes::default();

    if let Some(colour) = table.opt_d_array(colour_field)? {
        match colour.as_slice() {
            [r, g, b] => vis.colour = Some([*r, *g, *b, 1.0]),
            [r, g, b, a] => vis.colour = Some([*r, *g, *b, *a]),
            _ => output::print_warning(&format!(
                "{}.{} must have 3 or 4 components",
                table.label(),
                colour_field
            )),
        }
    }

    if let Some(drawstyle) = table.opt_s("drawstyle")? {
        match drawstyle.as_str() {
            "wireframe" => vis.force_wireframe = true,
            "solid" => vis.force_solid = true,
            _ => output::print_warning(&format!(
                "{}.drawstyle must be either \"wireframe\" or \"solid\"",
                table.label()
            )),
        }
    }

    if let Some(aux) = table.opt_i("force_auxedge")? {
        vis.force_aux_edge = aux == 1;
    }

    if table.opt_i("invisible")? == Some(1) {
        return Ok(VisAttributes::invisible());
    }

    Ok(vis)
}
