//! # 几何工厂与构建器
//!
//! - `GeoFactory`: 按 `type` 字段处理一张 `GEO` 表，构造逻辑体积并摆放到母体积中
//! - `GeoBuilder`: 工厂注册表，按依赖顺序构建一组表
//!
//! ## 通用字段
//! - `mother`: 母体积名，空字符串或缺省表示世界体积
//! - `position`: 在母体积中的位置 [x, y, z] (mm)，默认原点
//! - `rotation`: 依次绕 X、Y、Z 轴的转角 [rx, ry, rz] (度)，默认不旋转
//! - `enable`: 为 0 时跳过该表
//!
//! ## 依赖关系
//! - 被 `commands/` 调用
//! - 子工厂: `geo/box_factory.rs`, `geo/hex_dichroicon.rs`
//! - 使用 `models/`

use crate::error::{DichroiconError, Result};
use crate::geo::box_factory::BoxFactory;
use crate::geo::hex_dichroicon::HexDichroiconFactory;
use crate::models::{DbTable, GeometryStore, LvId, PhysicalVolume, Transform3D};
use crate::utils::output;

/// 几何表名
pub const GEO_TABLE: &str = "GEO";

/// 几何工厂
pub trait GeoFactory: Send + Sync {
    /// 对应 `type` 字段的取值
    fn type_name(&self) -> &str;

    /// 构造逻辑体积（含其内部的子体积摆放）
    fn make_logical(&self, table: &DbTable, store: &mut GeometryStore) -> Result<LvId>;

    /// 构造并摆放
    fn construct(&self, table: &DbTable, store: &mut GeometryStore) -> Result<()> {
        let mother = resolve_mother(table, store)?;
        let logical = self.make_logical(table, store)?;
        construct_physical_volume(table, logical, mother, store)
    }
}

/// 查找母体积；`mother` 为空时返回 `None`（世界体积）
pub fn resolve_mother(table: &DbTable, store: &GeometryStore) -> Result<Option<LvId>> {
    let mother_name = table.get_s_or("mother", "")?;
    if mother_name.is_empty() {
        return Ok(None);
    }
    store
        .find_mother(&mother_name)
        .map(Some)
        .ok_or_else(|| DichroiconError::MotherNotFound {
            mother: mother_name,
            table: table.label(),
        })
}

/// 以表索引为名，把逻辑体积摆放到母体积中
pub fn construct_physical_volume(
    table: &DbTable,
    logical: LvId,
    mother: Option<LvId>,
    store: &mut GeometryStore,
) -> Result<()> {
    let position = read_vec3(table, "position")?.unwrap_or([0.0; 3]);
    let rotation = read_vec3(table, "rotation")?.unwrap_or([0.0; 3]);
    let transform = Transform3D::from_rotation_degrees(rotation).with_translation(position);

    output::print_debug(&format!(
        "Placing {} at ({:.3}, {:.3}, {:.3}) mm",
        table.label(),
        position[0],
        position[1],
        position[2]
    ));

    store.place(
        PhysicalVolume::new(table.index.clone(), logical, transform, 0),
        mother,
    )
}

fn read_vec3(table: &DbTable, field: &str) -> Result<Option<[f64; 3]>> {
    match table.opt_d_array(field)? {
        None => Ok(None),
        Some(v) => match v.as_slice() {
            [x, y, z] => Ok(Some([*x, *y, *z])),
            _ => Err(DichroiconError::InvalidTable {
                table: table.label(),
                reason: format!("{} must have 3 components, got {}", field, v.len()),
            }),
        },
    }
}

/// 工厂注册表
pub struct GeoBuilder {
    factories: Vec<Box<dyn GeoFactory>>,
}

impl Default for GeoBuilder {
    fn default() -> Self {
        Self::with_default_factories()
    }
}

impl GeoBuilder {
    /// 空注册表
    pub fn new() -> Self {
        GeoBuilder {
            factories: Vec::new(),
        }
    }

    /// 注册 `box` 与 `hexdichroicon` 工厂
    pub fn with_default_factories() -> Self {
        let mut builder = Self::new();
        builder.register(Box::new(BoxFactory));
        builder.register(Box::new(HexDichroiconFactory));
        builder
    }

    pub fn register(&mut self, factory: Box<dyn GeoFactory>) {
        self.factories.push(factory);
    }

    pub fn factory(&self, geo_type: &str) -> Option<&dyn GeoFactory> {
        self.factories
            .iter()
            .find(|f| f.type_name() == geo_type)
            .map(|f| f.as_ref())
    }

    /// 构建所有启用的 `GEO` 表
    ///
    /// 母体积尚未构建的表会推迟，直到没有任何表可以继续构建。
    pub fn build(&self, tables: &[DbTable]) -> Result<GeometryStore> {
        let mut pending = Vec::new();
        for table in tables.iter().filter(|t| t.name == GEO_TABLE) {
            if table.opt_i("enable")? == Some(0) {
                output::print_debug(&format!("Skipping disabled table {}", table.label()));
                continue;
            }
            pending.push(table);
        }

        let mut store = GeometryStore::new();
        while !pending.is_empty() {
            let mut deferred = Vec::new();
            let before = pending.len();

            for table in pending {
                let mother = table.get_s_or("mother", "")?;
                if !mother.is_empty() && store.find_mother(&mother).is_none() {
                    deferred.push(table);
                    continue;
                }

                let geo_type = table.get_s("type")?;
                let factory =
                    self.factory(&geo_type)
                        .ok_or_else(|| DichroiconError::UnknownGeoType {
                            geo_type: geo_type.clone(),
                            table: table.label(),
                        })?;

                output::print_debug(&format!("Constructing {} ({})", table.label(), geo_type));
                factory.construct(table, &mut store)?;
            }

            if deferred.len() == before {
                // 无法继续：报告第一张缺少母体积的表
                let table = deferred[0];
                return Err(DichroiconError::MotherNotFound {
                    mother: table.get_s_or("mother", "")?,
                    table: table.label(),
                });
            }
            pending = deferred;
        }

        if store.world().is_none() {
            return Err(DichroiconError::NoWorld);
        }
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DbValue;

    fn world() -> DbTable {
        DbTable::new("GEO", "world")
            .with("type", DbValue::Str("box".into()))
            .with("mother", DbValue::Str("".into()))
            .with("material", DbValue::Str("air".into()))
            .with("size", DbValue::NumArray(vec![1000.0, 1000.0, 1000.0]))
    }

    fn inner(index: &str, mother: &str) -> DbTable {
        DbTable::new("GEO", index)
            .with("type", DbValue::Str("box".into()))
            .with("mother", DbValue::Str(mother.into()))
            .with("material", DbValue::Str("water".into()))
            .with("size", DbValue::NumArray(vec![10.0, 10.0, 10.0]))
            .with("position", DbValue::NumArray(vec![100.0, 0.0, 0.0]))
    }

    #[test]
    fn test_build_in_dependency_order() {
        let tables = vec![inner("tank", "world"), world()];
        let store = GeoBuilder::with_default_factories().build(&tables).unwrap();
        let world_id = store.world().unwrap().logical;
        let daughters = &store.logical(world_id).daughters;
        assert_eq!(daughters.len(), 1);
        assert_eq!(daughters[0].name, "tank");
        assert!((daughters[0].transform.translation[0] - 100.0).abs() < 1e-12);
    }

    #[test]
    fn test_missing_mother() {
        let tables = vec![world(), inner("tank", "cavern")];
        let err = GeoBuilder::with_default_factories()
            .build(&tables)
            .unwrap_err();
        match err {
            DichroiconError::MotherNotFound { mother, table } => {
                assert_eq!(mother, "cavern");
                assert_eq!(table, "GEO[tank]");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_unknown_type() {
        let tables = vec![world().with("type", DbValue::Str("sphere".into()))];
        assert!(matches!(
            GeoBuilder::with_default_factories().build(&tables),
            Err(DichroiconError::UnknownGeoType { .. })
        ));
    }

    #[test]
    fn test_disabled_table_skipped() {
        let tables = vec![world(), inner("tank", "world").with("enable", DbValue::Int(0))];
        let store = GeoBuilder::with_default_factories().build(&tables).unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_no_world() {
        let tables: Vec<DbTable> = vec![DbTable::new("MATERIAL", "air")];
        assert!(matches!(
            GeoBuilder::with_default_factories().build(&tables),
            Err(DichroiconError::NoWorld)
        ));
    }

    #[test]
    fn test_bad_position_length() {
        let tables = vec![
            world(),
            inner("tank", "world").with("position", DbValue::NumArray(vec![1.0, 2.0])),
        ];
        assert!(matches!(
            GeoBuilder::with_default_factories().build(&tables),
            Err(DichroiconError::InvalidTable { .. })
        ));
    }
}
