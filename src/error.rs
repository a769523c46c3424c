//! # 统一错误处理模块
//!
//! 定义 dichroicon 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// dichroicon 统一错误类型
#[derive(Error, Debug)]
pub enum DichroiconError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ─────────────────────────────────────────────────────────────
    // 解析错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to parse {format} file: {path}\nReason: {reason}")]
    ParseError {
        format: String,
        path: String,
        reason: String,
    },

    // ─────────────────────────────────────────────────────────────
    // 数据库表错误
    // ─────────────────────────────────────────────────────────────
    #[error("Field '{field}' not found in table {table}")]
    FieldNotFound { table: String, field: String },

    #[error("Field '{field}' in table {table} must be {expected}")]
    FieldType {
        table: String,
        field: String,
        expected: String,
    },

    #[error("Invalid table {table}: {reason}")]
    InvalidTable { table: String, reason: String },

    #[error("No table matching {0}")]
    TableNotFound(String),

    // ─────────────────────────────────────────────────────────────
    // 几何构建错误
    // ─────────────────────────────────────────────────────────────
    #[error("Unable to find mother volume \"{mother}\" for {table}")]
    MotherNotFound { mother: String, table: String },

    #[error("Unknown geometry type \"{geo_type}\" for {table}")]
    UnknownGeoType { geo_type: String, table: String },

    #[error("Duplicate volume: {0}")]
    DuplicateVolume(String),

    #[error("Invalid solid {name}: {reason}")]
    InvalidSolid { name: String, reason: String },

    #[error("No world volume has been constructed")]
    NoWorld,

    #[error("Geometry check failed: {0} overlap(s) found")]
    OverlapsFound(usize),

    // ─────────────────────────────────────────────────────────────
    // 参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // ─────────────────────────────────────────────────────────────
    // CSV 错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    // ─────────────────────────────────────────────────────────────
    // 其他
    // ─────────────────────────────────────────────────────────────
    #[error("{0}")]
    Other(String),
}

impl DichroiconError {
    /// 构造写文件错误
    pub fn write(path: &std::path::Path, source: std::io::Error) -> Self {
        DichroiconError::FileWriteError {
            path: path.display().to_string(),
            source,
        }
    }
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, DichroiconError>;
