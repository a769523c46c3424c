//! # 几何数据库表模型
//!
//! RATDB 风格的数据表：`name` + `index` + 若干命名字段。
//! 几何工厂通过 `get_*` 系列方法读取字段，缺失或类型不符时返回错误。
//!
//! ## 依赖关系
//! - 被 `parsers/ratdb.rs` 构造
//! - 被 `geo/` 工厂读取
//! - 使用 `serde` 反序列化字段值

use crate::error::{DichroiconError, Result};
use serde::Deserialize;
use std::collections::BTreeMap;

/// 字段值
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DbValue {
    Int(i64),
    Float(f64),
    Str(String),
    NumArray(Vec<f64>),
    StrArray(Vec<String>),
}

impl DbValue {
    fn type_name(&self) -> &'static str {
        match self {
            DbValue::Int(_) => "int",
            DbValue::Float(_) => "double",
            DbValue::Str(_) => "string",
            DbValue::NumArray(_) => "double array",
            DbValue::StrArray(_) => "string array",
        }
    }
}

/// 数据库表
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DbTable {
    /// 表名（如 `GEO`）
    pub name: String,

    /// 表索引（如 `dichroicon`）
    #[serde(default)]
    pub index: String,

    /// 其余字段
    #[serde(flatten)]
    pub fields: BTreeMap<String, DbValue>,
}

impl DbTable {
    pub fn new(name: impl Into<String>, index: impl Into<String>) -> Self {
        DbTable {
            name: name.into(),
            index: index.into(),
            fields: BTreeMap::new(),
        }
    }

    /// 链式设置字段（主要用于测试和程序化构造）
    pub fn with(mut self, field: &str, value: DbValue) -> Self {
        self.fields.insert(field.to_string(), value);
        self
    }

    /// `NAME[index]` 形式的标签
    pub fn label(&self) -> String {
        format!("{}[{}]", self.name, self.index)
    }

    pub fn has(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    fn field(&self, field: &str) -> Result<&DbValue> {
        self.fields
            .get(field)
            .ok_or_else(|| DichroiconError::FieldNotFound {
                table: self.label(),
                field: field.to_string(),
            })
    }

    fn type_error(&self, field: &str, expected: &str, found: &DbValue) -> DichroiconError {
        DichroiconError::FieldType {
            table: self.label(),
            field: field.to_string(),
            expected: format!("{} (found {})", expected, found.type_name()),
        }
    }

    /// 读取字符串字段
    pub fn get_s(&self, field: &str) -> Result<String> {
        match self.field(field)? {
            DbValue::Str(s) => Ok(s.clone()),
            other => Err(self.type_error(field, "a string", other)),
        }
    }

    /// 读取整数字段
    pub fn get_i(&self, field: &str) -> Result<i64> {
        match self.field(field)? {
            DbValue::Int(i) => Ok(*i),
            other => Err(self.type_error(field, "an int", other)),
        }
    }

    /// 读取数值数组字段
    pub fn get_d_array(&self, field: &str) -> Result<Vec<f64>> {
        match self.field(field)? {
            DbValue::NumArray(v) => Ok(v.clone()),
            other => Err(self.type_error(field, "a double array", other)),
        }
    }

    /// 读取字符串字段，缺失时返回默认值
    pub fn get_s_or(&self, field: &str, default: &str) -> Result<String> {
        if self.has(field) {
            self.get_s(field)
        } else {
            Ok(default.to_string())
        }
    }

    pub fn opt_s(&self, field: &str) -> Result<Option<String>> {
        self.has(field).then(|| self.get_s(field)).transpose()
    }

    pub fn opt_i(&self, field: &str) -> Result<Option<i64>> {
        self.has(field).then(|| self.get_i(field)).transpose()
    }

    pub fn opt_d_array(&self, field: &str) -> Result<Option<Vec<f64>>> {
        self.has(field).then(|| self.get_d_array(field)).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DbTable {
        DbTable::new("GEO", "dichroicon")
            .with("material", DbValue::Str("acrylic".into()))
            .with("invisible", DbValue::Int(1))
            .with("rs", DbValue::NumArray(vec![0.0, 10.0]))
    }

    #[test]
    fn test_label() {
        assert_eq!(sample().label(), "GEO[dichroicon]");
    }

    #[test]
    fn test_typed_getters() {
        let t = sample();
        assert_eq!(t.get_s("material").unwrap(), "acrylic");
        assert_eq!(t.get_i("invisible").unwrap(), 1);
        assert_eq!(t.get_d_array("rs").unwrap(), vec![0.0, 10.0]);
    }

    #[test]
    fn test_missing_field() {
        let err = sample().get_s("mother").unwrap_err();
        assert!(matches!(err, DichroiconError::FieldNotFound { .. }));
        assert!(err.to_string().contains("GEO[dichroicon]"));
    }

    #[test]
    fn test_wrong_type() {
        let err = sample().get_i("material").unwrap_err();
        assert!(matches!(err, DichroiconError::FieldType { .. }));
    }

    #[test]
    fn test_optional_getters() {
        let t = sample();
        assert_eq!(t.opt_i("force_auxedge").unwrap(), None);
        assert_eq!(t.opt_i("invisible").unwrap(), Some(1));
        assert_eq!(t.get_s_or("mother", "").unwrap(), "");
        assert!(t.opt_d_array("material").is_err());
    }
}
