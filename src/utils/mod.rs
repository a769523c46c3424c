//! # 工具函数模块
//!
//! 提供美化输出（兼日志）和进度条工具。
//!
//! ## 依赖关系
//! - 被 `commands/`、`geo/` 和 `batch/` 模块使用
//! - 子模块: output, progress

pub mod output;
pub mod progress;
