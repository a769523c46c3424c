//! # 解析器模块
//!
//! 读取 RATDB 风格的几何表文件。
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 使用 `models/` 数据模型
//! - 子模块: ratdb

pub mod ratdb;

use crate::error::{DichroiconError, Result};
use crate::models::DbTable;
use crate::utils::output;
use std::path::{Path, PathBuf};

/// 定位并解析输入文件
pub fn load_tables(path: &Path, data_dirs: &[PathBuf]) -> Result<Vec<DbTable>> {
    let resolved = ratdb::resolve_input(path, data_dirs)?;
    output::print_debug(&format!("Reading tables from '{}'", resolved.display()));

    let tables = ratdb::parse_ratdb_file(&resolved)?;
    if tables.is_empty() {
        return Err(DichroiconError::ParseError {
            format: "ratdb".to_string(),
            path: resolved.display().to_string(),
            reason: "file contains no tables".to_string(),
        });
    }
    Ok(tables)
}

/// 按表名、类型和可选索引选出唯一的表
pub fn select_table<'a>(
    tables: &'a [DbTable],
    name: &str,
    geo_type: &str,
    index: Option<&str>,
) -> Result<&'a DbTable> {
    let candidates: Vec<&DbTable> = tables
        .iter()
        .filter(|t| t.name == name)
        .filter(|t| t.get_s("type").map(|ty| ty == geo_type).unwrap_or(false))
        .filter(|t| index.map_or(true, |i| t.index == i))
        .collect();

    let wanted = match index {
        Some(i) => format!("{}[{}] (type {})", name, i, geo_type),
        None => format!("{} (type {})", name, geo_type),
    };

    match candidates.as_slice() {
        [] => Err(DichroiconError::TableNotFound(wanted)),
        [table] => Ok(table),
        many => Err(DichroiconError::InvalidArgument(format!(
            "{} tables match {}; choose one with --index ({})",
            many.len(),
            wanted,
            many.iter()
                .map(|t| t.index.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DbValue;

    fn geo(index: &str, ty: &str) -> DbTable {
        DbTable::new("GEO", index).with("type", DbValue::Str(ty.into()))
    }

    #[test]
    fn test_select_single() {
        let tables = vec![geo("world", "box"), geo("panel", "hexdichroicon")];
        let t = select_table(&tables, "GEO", "hexdichroicon", None).unwrap();
        assert_eq!(t.index, "panel");
    }

    #[test]
    fn test_select_ambiguous_and_missing() {
        let tables = vec![geo("a", "hexdichroicon"), geo("b", "hexdichroicon")];
        assert!(matches!(
            select_table(&tables, "GEO", "hexdichroicon", None),
            Err(DichroiconError::InvalidArgument(_))
        ));
        assert_eq!(
            select_table(&tables, "GEO", "hexdichroicon", Some("b"))
                .unwrap()
                .index,
            "b"
        );
        assert!(matches!(
            select_table(&tables, "GEO", "box", None),
            Err(DichroiconError::TableNotFound(_))
        ));
    }
}
