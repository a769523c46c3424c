//! # build 命令实现
//!
//! 构建几何并打印摘要表。
//!
//! ## 功能
//! - 读取几何表并按依赖顺序构建
//! - 终端表格列出逻辑体积、实体、材料、子体积数和体积
//! - 可选执行重叠检查（只给出警告）
//!
//! ## 依赖关系
//! - 使用 `cli/build.rs` 定义的参数
//! - 使用 `geo/`, `parsers/`
//! - 使用 `utils/output.rs`

use crate::cli::build::BuildArgs;
use crate::error::Result;
use crate::geo::OverlapChecker;
use crate::models::GeometryStore;
use crate::utils::output;

use std::path::PathBuf;
use tabled::{Table, Tabled};

/// 摘要表中的一行
#[derive(Debug, Clone, Tabled)]
struct VolumeRow {
    #[tabled(rename = "Logical volume")]
    name: String,
    #[tabled(rename = "Solid")]
    solid: String,
    #[tabled(rename = "Shape")]
    shape: String,
    #[tabled(rename = "Material")]
    material: String,
    #[tabled(rename = "Daughters")]
    daughters: usize,
    #[tabled(rename = "Volume (cm³)")]
    volume: String,
}

/// 执行 build 命令
pub fn execute(args: BuildArgs, data_dirs: &[PathBuf]) -> Result<()> {
    output::print_header("Building Geometry");
    output::print_info(&format!("Input: '{}'", args.input.display()));

    let store = super::build_geometry(&args.input, data_dirs)?;

    let rows = summary_rows(&store);
    println!("{}", Table::new(&rows));

    let world = store.world().map(|w| w.logical);
    let placements = world.map_or(0, |id| store.count_physical(id) + 1);
    output::print_success(&format!(
        "Built {} logical volume(s), {} physical volume(s)",
        rows.len(),
        placements
    ));

    if args.check_overlaps {
        output::print_info(&format!(
            "Checking overlaps (resolution {})...",
            args.resolution
        ));
        let reports = OverlapChecker::new(args.resolution, args.jobs).check_tree(&store)?;
        if reports.is_empty() {
            output::print_success("No overlaps found");
        } else {
            super::print_overlap_reports(&reports, 20);
            output::print_warning(&format!("{} overlap(s) found", reports.len()));
        }
    }

    output::print_done("Build complete");
    Ok(())
}

/// 从世界体积向下列出可达的逻辑体积
fn summary_rows(store: &GeometryStore) -> Vec<VolumeRow> {
    store
        .reachable_postorder()
        .into_iter()
        .rev()
        .map(|id| {
            let lv = store.logical(id);
            VolumeRow {
                name: lv.name.clone(),
                solid: lv.solid.name.clone(),
                shape: lv.solid.kind(),
                material: lv.material.clone(),
                daughters: lv.daughters.len(),
                volume: format!("{:.3}", lv.solid.cubic_volume() / 1000.0),
            }
        })
        .collect()
}
