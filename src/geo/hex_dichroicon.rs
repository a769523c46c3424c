//! # 六边形 dichroicon 面板工厂
//!
//! `type: "hexdichroicon"`。在长方体面板上以六边形密堆积方式铺满
//! dichroicon 锥体单元。
//!
//! ## 字段
//! - `material`: 材料名
//! - `rs`, `zs`: 六棱锥的 (角点半径, z) 轮廓 (mm)，长度必须相同
//! - `panel_size`: 面板半长 [x, y, z] (mm)
//! - `color` / `drawstyle` / `force_auxedge` / `invisible`: 显示属性
//! - `color_b`: b 型单元的颜色（可选，默认与 a 型相同）
//!
//! ## 单元构造
//! 设 R 为最大半径，三个偏移 `t1 = (R, 0)`、`t2 = (−R/2, R√3/2)`、
//! `t3 = (−R/2, −R√3/2)` 指向相间的三个角点：
//! - `trisect_i = hex ∩ (hex + t_i)`
//! - `base = hex − (hex + t1) − (hex + t2) − (hex + t3)`
//!
//! a 型单元 = base + 三个 trisect，放在格点中心；
//! b 型单元 = base 绕 z 旋转 180°，放在格点中心右侧 R 处。
//!
//! ## 依赖关系
//! - 被 `geo/factory.rs` 注册
//! - 使用 `geo/lattice.rs`、`geo/vis.rs`、`models/`

use crate::error::{DichroiconError, Result};
use crate::geo::factory::GeoFactory;
use crate::geo::lattice::HexLattice;
use crate::geo::vis;
use crate::models::{
    DbTable, GeometryStore, LogicalVolume, LvId, PhysicalVolume, Solid, Transform3D,
    VisAttributes,
};
use crate::utils::output;

use std::sync::Arc;

/// 六棱锥的边数
pub const HEX_SIDES: usize = 6;

pub struct HexDichroiconFactory;

/// 一个 dichroicon 单元的实体
#[derive(Debug, Clone)]
pub struct DichroiconSolids {
    pub hex: Arc<Solid>,
    pub trisects: [Arc<Solid>; 3],
    pub base: Arc<Solid>,
}

/// 指向三个相间角点的偏移
pub fn trisect_offsets(max_r: f64) -> [Transform3D; 3] {
    let h = max_r * 3f64.sqrt() / 2.0;
    [
        Transform3D::translation(max_r, 0.0, 0.0),
        Transform3D::translation(-max_r / 2.0, h, 0.0),
        Transform3D::translation(-max_r / 2.0, -h, 0.0),
    ]
}

/// 由 (r, z) 轮廓构造单元实体
pub fn build_solids(volume_name: &str, rs: &[f64], zs: &[f64]) -> Result<DichroiconSolids> {
    let hex = Arc::new(Solid::polyhedra(
        format!("{}_hex_solid", volume_name),
        0.0,
        HEX_SIDES,
        rs,
        zs,
    )?);
    let max_r = rs.iter().copied().fold(0.0_f64, f64::max);
    let offsets = trisect_offsets(max_r);

    let trisect = |i: usize| {
        Arc::new(Solid::intersection(
            format!("{}_trisec{}_solid", volume_name, i + 1),
            hex.clone(),
            hex.clone(),
            offsets[i],
        ))
    };
    let trisects = [trisect(0), trisect(1), trisect(2)];

    let partial1 = Arc::new(Solid::subtraction(
        format!("{}_base_solid_partial1", volume_name),
        hex.clone(),
        hex.clone(),
        offsets[0],
    ));
    let partial2 = Arc::new(Solid::subtraction(
        format!("{}_base_solid_partial2", volume_name),
        partial1,
        hex.clone(),
        offsets[1],
    ));
    let base = Arc::new(Solid::subtraction(
        format!("{}_base_solid", volume_name),
        partial2,
        hex.clone(),
        offsets[2],
    ));

    Ok(DichroiconSolids {
        hex,
        trisects,
        base,
    })
}

/// 面板参数
#[derive(Debug, Clone, PartialEq)]
pub struct PanelParams {
    pub rs: Vec<f64>,
    pub zs: Vec<f64>,
    /// 单元角点半径 R（`rs` 的最大值）
    pub max_r: f64,
    /// 面板半长 [x, y, z]
    pub panel_size: [f64; 3],
}

impl PanelParams {
    /// 读取并校验 `rs`、`zs`、`panel_size`
    pub fn from_table(table: &DbTable) -> Result<Self> {
        let rs = table.get_d_array("rs")?;
        let zs = table.get_d_array("zs")?;
        if rs.len() != zs.len() {
            return Err(DichroiconError::InvalidTable {
                table: table.label(),
                reason: "rs and zs must have the same number of elements".to_string(),
            });
        }
        let max_r = rs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if !(max_r > 0.0) {
            return Err(DichroiconError::InvalidTable {
                table: table.label(),
                reason: "rs must contain a positive radius".to_string(),
            });
        }

        let panel_size = table.get_d_array("panel_size")?;
        let panel_size = match panel_size.as_slice() {
            [x, y, z, ..] => [*x, *y, *z],
            _ => {
                return Err(DichroiconError::InvalidTable {
                    table: table.label(),
                    reason: format!(
                        "panel_size must have 3 components, got {}",
                        panel_size.len()
                    ),
                })
            }
        };

        Ok(PanelParams {
            rs,
            zs,
            max_r,
            panel_size,
        })
    }

    /// 面板上的格点
    pub fn lattice(&self) -> Result<HexLattice> {
        HexLattice::new(self.max_r, self.panel_size[0], self.panel_size[1])
    }
}

impl HexDichroiconFactory {
    /// 构造面板逻辑体积并铺满单元
    pub fn make_dichroicon(&self, table: &DbTable, store: &mut GeometryStore) -> Result<LvId> {
        let volume_name = table.index.clone();
        let material = table.get_s("material")?;

        let params = PanelParams::from_table(table)?;
        let [panel_x, panel_y, panel_z] = params.panel_size;
        output::print_debug(&format!(
            "{}: max radius {:.3} mm",
            table.label(),
            params.max_r
        ));
        output::print_debug(&format!(
            "{}: panel size {:.3} mm x {:.3} mm x {:.3} mm",
            table.label(),
            panel_x,
            panel_y,
            panel_z
        ));

        let panel_solid = Solid::new_box(
            format!("{}_panel_solid", volume_name),
            [panel_x, panel_y, panel_z],
        )?;
        let panel = store.add_logical(LogicalVolume::new(
            format!("{}_panel_lv", volume_name),
            Arc::new(panel_solid),
            material.clone(),
            VisAttributes::wireframe(),
        ))?;

        let solids = build_solids(&volume_name, &params.rs, &params.zs)?;

        let vis_a = vis::vis_attributes(table)?;
        let vis_b = if table.has("color_b") {
            vis::vis_attributes_with_colour(table, "color_b")?
        } else {
            vis_a.clone()
        };

        let mut trisect_lvs = Vec::with_capacity(3);
        for (i, solid) in solids.trisects.iter().enumerate() {
            trisect_lvs.push(store.add_logical(LogicalVolume::new(
                format!("{}_trisec{}_lv", volume_name, i + 1),
                solid.clone(),
                material.clone(),
                vis_a.clone(),
            ))?);
        }
        let base_a = store.add_logical(LogicalVolume::new(
            format!("{}_base_a_lv", volume_name),
            solids.base.clone(),
            material.clone(),
            vis_a,
        ))?;
        let base_b = store.add_logical(LogicalVolume::new(
            format!("{}_base_b_lv", volume_name),
            solids.base.clone(),
            material,
            vis_b,
        ))?;

        let lattice = params.lattice()?;
        for cell in lattice.cells() {
            let n = cell.copy_number;
            let at = cell.transform();

            store.place(
                PhysicalVolume::new(format!("{}_base_a_phys_{}", volume_name, n), base_a, at, n),
                Some(panel),
            )?;
            for (i, lv) in trisect_lvs.iter().enumerate() {
                store.place(
                    PhysicalVolume::new(
                        format!("{}_trisect{}_phys_{}", volume_name, i + 1, n),
                        *lv,
                        at,
                        n,
                    ),
                    Some(panel),
                )?;
            }
            if let Some(companion) = cell.companion_transform() {
                store.place(
                    PhysicalVolume::new(
                        format!("{}_base_b_phys_{}", volume_name, n),
                        base_b,
                        companion,
                        n,
                    ),
                    Some(panel),
                )?;
            }
        }

        output::print_debug(&format!(
            "{}: placed {} type-a cells and {} type-b cells",
            table.label(),
            lattice.count(),
            lattice.companion_count()
        ));

        Ok(panel)
    }
}

impl GeoFactory for HexDichroiconFactory {
    fn type_name(&self) -> &str {
        "hexdichroicon"
    }

    fn make_logical(&self, table: &DbTable, store: &mut GeometryStore) -> Result<LvId> {
        self.make_dichroicon(table, store)
    }
}
