//! # 长方体工厂
//!
//! `type: "box"`，字段 `size` 为三个方向的半长 (mm)。
//! 通常用于世界体积和安装面板所在的母体积。
//!
//! ## 依赖关系
//! - 被 `geo/factory.rs` 注册
//! - 使用 `geo/vis.rs`

use crate::error::{DichroiconError, Result};
use crate::geo::factory::GeoFactory;
use crate::geo::vis;
use crate::models::{DbTable, GeometryStore, LogicalVolume, LvId, Solid};

use std::sync::Arc;

pub struct BoxFactory;

impl GeoFactory for BoxFactory {
    fn type_name(&self) -> &str {
        "box"
    }

    fn make_logical(&self, table: &DbTable, store: &mut GeometryStore) -> Result<LvId> {
        let size = table.get_d_array("size")?;
        let half = match size.as_slice() {
            [x, y, z] => [*x, *y, *z],
            _ => {
                return Err(DichroiconError::InvalidTable {
                    table: table.label(),
                    reason: format!("size must have 3 components, got {}", size.len()),
                })
            }
        };

        let solid = Solid::new_box(format!("{}_solid", table.index), half)?;
        let lv = LogicalVolume::new(
            table.index.clone(),
            Arc::new(solid),
            table.get_s("material")?,
            vis::vis_attributes(table)?,
        );
        store.add_logical(lv)
    }
}
