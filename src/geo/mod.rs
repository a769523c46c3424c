//! # 几何构建模块
//!
//! 从几何表构建体积树，并提供检查与导出。
//!
//! ## 子模块
//! - `factory`: 工厂接口与构建器
//! - `box_factory`: 长方体
//! - `hex_dichroicon`: 六边形 dichroicon 面板
//! - `lattice`: 六边形密堆积格点
//! - `vis`: 显示属性
//! - `overlap`: 摆放重叠检查
//! - `gdml`: GDML 导出
//! - `export`: 格点摆放 CSV 导出
//! - `plot`: 排布图
//!
//! ## 依赖关系
//! - 被 `commands/` 和 `batch/` 使用
//! - 使用 `models/`

pub mod box_factory;
pub mod export;
pub mod factory;
pub mod gdml;
pub mod hex_dichroicon;
pub mod lattice;
pub mod overlap;
pub mod plot;
pub mod vis;

pub use factory::{GeoBuilder, GEO_TABLE};
pub use overlap::{OverlapChecker, OverlapKind, OverlapReport};
