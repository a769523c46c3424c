//! # 逻辑体积 / 物理体积 / 体积仓库
//!
//! - `LogicalVolume`: 实体 + 材料 + 显示属性 + 子体积摆放
//! - `PhysicalVolume`: 某个逻辑体积在母体积中的一次摆放
//! - `GeometryStore`: 以 arena 方式持有所有逻辑体积，并记录世界体积
//!
//! ## 依赖关系
//! - 被 `geo/` 工厂填充
//! - 被 `geo/overlap.rs`、`geo/gdml.rs` 和 `commands/` 读取
//! - 使用 `models/solid.rs`、`models/transform.rs`

use crate::error::{DichroiconError, Result};
use crate::models::solid::Solid;
use crate::models::transform::Transform3D;

use std::collections::HashMap;
use std::sync::Arc;

/// 显示属性
#[derive(Debug, Clone, PartialEq)]
pub struct VisAttributes {
    /// RGBA 颜色
    pub colour: Option<[f64; 4]>,
    pub force_wireframe: bool,
    pub force_solid: bool,
    pub force_aux_edge: bool,
    pub visible: bool,
}

impl Default for VisAttributes {
    fn default() -> Self {
        VisAttributes {
            colour: None,
            force_wireframe: false,
            force_solid: false,
            force_aux_edge: false,
            visible: true,
        }
    }
}

impl VisAttributes {
    pub fn invisible() -> Self {
        VisAttributes {
            visible: false,
            ..Default::default()
        }
    }

    pub fn wireframe() -> Self {
        VisAttributes {
            force_wireframe: true,
            ..Default::default()
        }
    }
}

/// 逻辑体积 ID（`GeometryStore` 内的下标）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LvId(pub usize);

/// 逻辑体积
#[derive(Debug, Clone)]
pub struct LogicalVolume {
    pub name: String,
    pub solid: Arc<Solid>,
    pub material: String,
    pub vis: VisAttributes,
    pub daughters: Vec<PhysicalVolume>,
}

impl LogicalVolume {
    pub fn new(
        name: impl Into<String>,
        solid: Arc<Solid>,
        material: impl Into<String>,
        vis: VisAttributes,
    ) -> Self {
        LogicalVolume {
            name: name.into(),
            solid,
            material: material.into(),
            vis,
            daughters: Vec::new(),
        }
    }
}

/// 物理体积（一次摆放）
#[derive(Debug, Clone)]
pub struct PhysicalVolume {
    pub name: String,
    pub logical: LvId,
    /// 子体积坐标 -> 母体积坐标
    pub transform: Transform3D,
    pub copy_number: usize,
}

impl PhysicalVolume {
    pub fn new(
        name: impl Into<String>,
        logical: LvId,
        transform: Transform3D,
        copy_number: usize,
    ) -> Self {
        PhysicalVolume {
            name: name.into(),
            logical,
            transform,
            copy_number,
        }
    }
}

/// 体积仓库
#[derive(Debug, Default)]
pub struct GeometryStore {
    volumes: Vec<LogicalVolume>,
    by_name: HashMap<String, LvId>,
    /// 物理体积名 -> 其逻辑体积（同名时保留最早登记的）
    physical_by_name: HashMap<String, LvId>,
    world: Option<PhysicalVolume>,
}

impl GeometryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 登记逻辑体积
    pub fn add_logical(&mut self, lv: LogicalVolume) -> Result<LvId> {
        if self.by_name.contains_key(&lv.name) {
            return Err(DichroiconError::DuplicateVolume(format!(
                "logical volume '{}' already exists",
                lv.name
            )));
        }
        let id = LvId(self.volumes.len());
        self.by_name.insert(lv.name.clone(), id);
        self.volumes.push(lv);
        Ok(id)
    }

    /// 摆放物理体积；`mother` 为 `None` 时作为世界体积
    pub fn place(&mut self, pv: PhysicalVolume, mother: Option<LvId>) -> Result<()> {
        if pv.logical.0 >= self.volumes.len() {
            return Err(DichroiconError::Other(format!(
                "placement '{}' refers to an unknown logical volume",
                pv.name
            )));
        }
        self.physical_by_name
            .entry(pv.name.clone())
            .or_insert(pv.logical);
        match mother {
            None => {
                if let Some(world) = &self.world {
                    return Err(DichroiconError::DuplicateVolume(format!(
                        "world volume already set to '{}', cannot place '{}'",
                        world.name, pv.name
                    )));
                }
                self.world = Some(pv);
            }
            Some(id) => {
                let mother = self.volumes.get_mut(id.0).ok_or_else(|| {
                    DichroiconError::Other(format!("unknown mother volume id {}", id.0))
                })?;
                mother.daughters.push(pv);
            }
        }
        Ok(())
    }

    /// 按物理体积名、再按逻辑体积名查找母体积
    pub fn find_mother(&self, name: &str) -> Option<LvId> {
        self.physical_by_name
            .get(name)
            .copied()
            .or_else(|| self.find_logical(name))
    }

    pub fn find_logical(&self, name: &str) -> Option<LvId> {
        self.by_name.get(name).copied()
    }

    pub fn logical(&self, id: LvId) -> &LogicalVolume {
        &self.volumes[id.0]
    }

    pub fn len(&self) -> usize {
        self.volumes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.volumes.is_empty()
    }

    pub fn world(&self) -> Option<&PhysicalVolume> {
        self.world.as_ref()
    }

    /// 逻辑体积展开后的物理体积总数（含自身的子孙摆放，不含自身）
    pub fn count_physical(&self, id: LvId) -> usize {
        self.logical(id)
            .daughters
            .iter()
            .map(|d| 1 + self.count_physical(d.logical))
            .sum()
    }

    /// 从世界体积出发，按"子先于母"的顺序列出可达的逻辑体积
    pub fn reachable_postorder(&self) -> Vec<LvId> {
        let mut order = Vec::new();
        let mut visited = vec![false; self.volumes.len()];
        if let Some(world) = &self.world {
            self.visit_postorder(world.logical, &mut visited, &mut order);
        }
        order
    }

    fn visit_postorder(&self, id: LvId, visited: &mut [bool], order: &mut Vec<LvId>) {
        if visited[id.0] {
            return;
        }
        visited[id.0] = true;
        for daughter in &self.logical(id).daughters {
            self.visit_postorder(daughter.logical, visited, order);
        }
        order.push(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn box_lv(name: &str) -> LogicalVolume {
        let solid = Arc::new(Solid::new_box(format!("{}_solid", name), [1.0; 3]).unwrap());
        LogicalVolume::new(name, solid, "air", VisAttributes::default())
    }

    #[test]
    fn test_duplicate_logical_rejected() {
        let mut store = GeometryStore::new();
        store.add_logical(box_lv("a")).unwrap();
        assert!(matches!(
            store.add_logical(box_lv("a")),
            Err(DichroiconError::DuplicateVolume(_))
        ));
    }

    #[test]
    fn test_world_and_find_mother() {
        let mut store = GeometryStore::new();
        let world_lv = store.add_logical(box_lv("world_lv")).unwrap();
        store
            .place(
                PhysicalVolume::new("world", world_lv, Transform3D::identity(), 0),
                None,
            )
            .unwrap();
        assert_eq!(store.find_mother("world"), Some(world_lv));
        assert_eq!(store.find_mother("world_lv"), Some(world_lv));
        assert_eq!(store.find_mother("nothing"), None);

        let again = PhysicalVolume::new("world2", world_lv, Transform3D::identity(), 0);
        assert!(store.place(again, None).is_err());
    }

    #[test]
    fn test_count_physical_and_postorder() {
        let mut store = GeometryStore::new();
        let world = store.add_logical(box_lv("world")).unwrap();
        let panel = store.add_logical(box_lv("panel")).unwrap();
        let cell = store.add_logical(box_lv("cell")).unwrap();
        store
            .place(PhysicalVolume::new("w", world, Transform3D::identity(), 0), None)
            .unwrap();
        store
            .place(
                PhysicalVolume::new("p", panel, Transform3D::identity(), 0),
                Some(world),
            )
            .unwrap();
        for i in 0..3 {
            let pv = PhysicalVolume::new(
                format!("c{}", i),
                cell,
                Transform3D::translation(i as f64, 0.0, 0.0),
                i,
            );
            store.place(pv, Some(panel)).unwrap();
        }
        assert_eq!(store.count_physical(panel), 3);
        assert_eq!(store.count_physical(world), 4);
        assert_eq!(store.reachable_postorder(), vec![cell, panel, world]);
    }

    #[test]
    fn test_duplicate_physical_name_keeps_first() {
        let mut store = GeometryStore::new();
        let world = store.add_logical(box_lv("world")).unwrap();
        let first = store.add_logical(box_lv("holder_a")).unwrap();
        let second = store.add_logical(box_lv("holder_b")).unwrap();
        store
            .place(PhysicalVolume::new("w", world, Transform3D::identity(), 0), None)
            .unwrap();
        store
            .place(
                PhysicalVolume::new("holder", first, Transform3D::identity(), 0),
                Some(world),
            )
            .unwrap();
        store
            .place(
                PhysicalVolume::new("holder", second, Transform3D::translation(5.0, 0.0, 0.0), 1),
                Some(world),
            )
            .unwrap();

        assert_eq!(store.logical(world).daughters.len(), 2);
        assert_eq!(store.find_mother("holder"), Some(first));
        assert_eq!(store.find_mother("holder_b"), Some(second));
    }
}
