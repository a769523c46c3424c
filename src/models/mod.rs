//! # 数据模型模块
//!
//! 定义几何数据库表、刚体变换、实体以及逻辑/物理体积模型。
//!
//! ## 依赖关系
//! - 被 `parsers/`、`geo/` 和 `commands/` 使用
//! - 子模块: table, transform, solid, volume

pub mod solid;
pub mod table;
pub mod transform;
pub mod volume;

pub use solid::{BoundingBox, Inside, Shape, Solid};
pub use table::{DbTable, DbValue};
pub use transform::{Transform3D, Vec3};
pub use volume::{GeometryStore, LogicalVolume, LvId, PhysicalVolume, VisAttributes};
