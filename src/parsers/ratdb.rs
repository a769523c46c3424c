//! # RATDB 几何表解析器
//!
//! 解析 RATDB 风格的 `.geo` / `.ratdb` 文本文件。
//!
//! ## 格式说明
//! ```text
//! // 行注释与 /* 块注释 */ 均可出现
//! {
//!   name: "GEO",
//!   index: "dichroicon",
//!   type: "hexdichroicon",
//!   mother: "world",
//!   rs: [0.0, 10.0, 30.0, 0.0],
//!   zs: [0.0, 0.0, 50.0, 50.0],
//! }
//! ```
//! 键名不加引号、允许尾随逗号、一个文件可包含多个表。
//! 预处理为标准 JSON 后用 `serde_json` 流式解码。
//!
//! ## 依赖关系
//! - 被 `parsers/mod.rs` 和 `commands/` 使用
//! - 使用 `models/table.rs`
//! - 使用 `regex`、`serde_json`

use crate::error::{DichroiconError, Result};
use crate::models::DbTable;

use regex::{Captures, Regex};
use std::fs;
use std::path::{Path, PathBuf};

/// 数据目录下的搜索子目录
const DATA_SUBDIRS: [&str; 2] = ["ratdb", "models"];

/// 解析 RATDB 文件
pub fn parse_ratdb_file(path: &Path) -> Result<Vec<DbTable>> {
    let content = fs::read_to_string(path).map_err(|e| DichroiconError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_ratdb_content(&content, &path.display().to_string())
}

/// 从字符串内容解析 RATDB 表
pub fn parse_ratdb_content(content: &str, source: &str) -> Result<Vec<DbTable>> {
    let normalized = normalize(content, source)?;

    // 字符串字面量整体匹配后原样保留，只删除其外的尾随逗号
    let trailing_comma =
        Regex::new(r#""(?:[^"\\]|\\.)*"|,(\s*[}\]])"#).map_err(|e| parse_error(source, e))?;
    let normalized = trailing_comma.replace_all(&normalized, |caps: &Captures| match caps.get(1) {
        Some(tail) => tail.as_str().to_string(),
        None => caps[0].to_string(),
    });

    let mut tables = Vec::new();
    let stream = serde_json::Deserializer::from_str(&normalized).into_iter::<DbTable>();
    for item in stream {
        let table = item.map_err(|e| parse_error(source, e))?;
        tables.push(table);
    }

    Ok(tables)
}

/// 在当前路径和数据目录中定位输入文件
pub fn resolve_input(path: &Path, data_dirs: &[PathBuf]) -> Result<PathBuf> {
    if path.exists() {
        return Ok(path.to_path_buf());
    }

    if path.is_relative() {
        for dir in data_dirs {
            for sub in DATA_SUBDIRS {
                let candidate = dir.join(sub).join(path);
                if candidate.exists() {
                    return Ok(candidate);
                }
            }
        }
    }

    Err(DichroiconError::FileNotFound {
        path: path.display().to_string(),
    })
}

fn parse_error(source: &str, reason: impl std::fmt::Display) -> DichroiconError {
    DichroiconError::ParseError {
        format: "ratdb".to_string(),
        path: source.to_string(),
        reason: reason.to_string(),
    }
}

/// 去除注释并为裸键名加引号（字符串字面量内部保持不变）
fn normalize(content: &str, source: &str) -> Result<String> {
    let chars: Vec<char> = content.chars().collect();
    let len = chars.len();
    let mut out = String::with_capacity(content.len() + content.len() / 8);
    let mut i = 0;

    while i < len {
        let c = chars[i];
        let next = chars.get(i + 1).copied();

        if c == '"' {
            out.push(c);
            i += 1;
            loop {
                let ch = *chars
                    .get(i)
                    .ok_or_else(|| parse_error(source, "unterminated string literal"))?;
                out.push(ch);
                i += 1;
                if ch == '\\' {
                    if let Some(escaped) = chars.get(i) {
                        out.push(*escaped);
                        i += 1;
                    }
                } else if ch == '"' {
                    break;
                }
            }
        } else if c == '/' && next == Some('/') {
            while i < len && chars[i] != '\n' {
                i += 1;
            }
        } else if c == '/' && next == Some('*') {
            i += 2;
            loop {
                if i + 1 >= len {
                    return Err(parse_error(source, "unterminated block comment"));
                }
                if chars[i] == '*' && chars[i + 1] == '/' {
                    i += 2;
                    break;
                }
                i += 1;
            }
            out.push(' ');
        } else if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            while i < len && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let ident: String = chars[start..i].iter().collect();

            let mut j = i;
            while j < len && chars[j].is_whitespace() {
                j += 1;
            }
            if j < len && chars[j] == ':' {
                out.push('"');
                out.push_str(&ident);
                out.push('"');
            } else {
                out.push_str(&ident);
            }
        } else {
            out.push(c);
            i += 1;
        }
    }

    Ok(out)
}
