//! # check 命令实现
//!
//! 构建几何后对每个母体积做重叠检查，发现问题时以非零状态退出。
//!
//! ## 依赖关系
//! - 使用 `cli/check.rs` 定义的参数
//! - 使用 `geo/overlap.rs`
//! - 使用 `utils/output.rs`

use crate::cli::check::CheckArgs;
use crate::error::{DichroiconError, Result};
use crate::geo::{OverlapChecker, OverlapKind};
use crate::utils::output;

use std::path::PathBuf;

/// 执行 check 命令
pub fn execute(args: CheckArgs, data_dirs: &[PathBuf]) -> Result<()> {
    output::print_header("Checking Geometry Overlaps");
    output::print_info(&format!("Input: '{}'", args.input.display()));

    let store = super::build_geometry(&args.input, data_dirs)?;

    output::print_info(&format!(
        "Sampling {} x {} points per face",
        args.resolution, args.resolution
    ));
    let reports = OverlapChecker::new(args.resolution, args.jobs).check_tree(&store)?;

    if reports.is_empty() {
        output::print_done("No overlaps found");
        return Ok(());
    }

    let protrusions = reports
        .iter()
        .filter(|r| r.kind == OverlapKind::Protrusion)
        .count();

    output::print_separator();
    super::print_overlap_reports(&reports, args.max_reports);
    output::print_separator();
    output::print_warning(&format!(
        "{} overlap(s) between sisters, {} protrusion(s) from mothers",
        reports.len() - protrusions,
        protrusions
    ));

    Err(DichroiconError::OverlapsFound(reports.len()))
}
