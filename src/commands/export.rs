//! # export 命令实现
//!
//! 构建几何并写出 GDML。
//!
//! ## 功能
//! - 单文件模式: 输入文件 → 输出文件
//! - 批量模式: 输入目录中所有匹配文件 → 输出目录下的 `<stem>.gdml`
//! - 批量模式并行处理，已存在的输出默认跳过
//!
//! ## 依赖关系
//! - 使用 `cli/export.rs` 定义的参数
//! - 使用 `batch/` 模块进行批量处理
//! - 使用 `geo/gdml.rs`
//! - 使用 `utils/output.rs`

use crate::batch::{BatchRunner, FileCollector, ProcessResult};
use crate::cli::export::ExportArgs;
use crate::error::{DichroiconError, Result};
use crate::geo::gdml;
use crate::utils::output;

use std::fs;
use std::path::{Path, PathBuf};

/// 执行 export 命令
pub fn execute(args: ExportArgs, data_dirs: &[PathBuf]) -> Result<()> {
    output::print_header("GDML Export");

    if args.input.is_dir() {
        execute_batch(&args, data_dirs)
    } else {
        execute_single_file(&args, data_dirs)
    }
}

/// 单文件模式
fn execute_single_file(args: &ExportArgs, data_dirs: &[PathBuf]) -> Result<()> {
    output::print_info(&format!("Single file mode: '{}'", args.input.display()));

    export_file(&args.input, &args.output, data_dirs)?;
    output::print_success(&format!(
        "{} -> {}",
        args.input.display(),
        args.output.display()
    ));
    Ok(())
}

/// 批量处理模式
fn execute_batch(args: &ExportArgs, data_dirs: &[PathBuf]) -> Result<()> {
    output::print_info(&format!("Batch mode: directory '{}'", args.input.display()));

    let files = FileCollector::new(args.input.clone())
        .with_pattern(&args.pattern)?
        .recursive(args.recursive)
        .collect();

    if files.is_empty() {
        output::print_warning(&format!(
            "No matching files found with pattern '{}'",
            args.pattern
        ));
        return Ok(());
    }

    output::print_info(&format!("Found {} table files", files.len()));

    fs::create_dir_all(&args.output).map_err(|e| DichroiconError::write(&args.output, e))?;

    let runner = BatchRunner::new(args.jobs);
    let result = runner.run(files, |file| {
        process_batch_file(file, &args.output, args.overwrite, data_dirs)
    })?;

    output::print_separator();
    output::print_success(&format!(
        "Batch complete ({} files): {} success, {} skipped, {} failed",
        result.total(),
        result.success, result.skipped, result.failed
    ));

    if !result.failures.is_empty() {
        output::print_warning("Failed files:");
        for (path, err) in result.failures.iter().take(10) {
            output::print_error(&format!("  {}: {}", path, err));
        }
        if result.failures.len() > 10 {
            output::print_warning(&format!("  ... and {} more", result.failures.len() - 10));
        }
    }

    Ok(())
}

/// 批量模式中的单个文件
fn process_batch_file(
    input: &PathBuf,
    output_dir: &Path,
    overwrite: bool,
    data_dirs: &[PathBuf],
) -> ProcessResult {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("geometry");
    let output_file = output_dir.join(format!("{}.gdml", stem));

    if output_file.exists() && !overwrite {
        return ProcessResult::Skipped(format!(
            "Output exists, skipping: {}",
            output_file.display()
        ));
    }

    match export_file(input, &output_file, data_dirs) {
        Ok(()) => {
            ProcessResult::Success(format!("{} -> {}", input.display(), output_file.display()))
        }
        Err(e) => ProcessResult::Failed(input.display().to_string(), e.to_string()),
    }
}

fn export_file(input: &Path, output_file: &Path, data_dirs: &[PathBuf]) -> Result<()> {
    let store = super::build_geometry(input, data_dirs)?;
    gdml::write_gdml(&store, output_file)
}
