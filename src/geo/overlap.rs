//! # 摆放重叠检查
//!
//! 对母体积中的每个子体积：
//! - 在子体积表面取规则采样点，变换到母体积坐标系
//! - 有点落在母体积之外 → `Protrusion`
//! - 有点严格落在某个兄弟体积内部 → `Overlap`（双向检查，每对只报告一次）
//!
//! 兄弟体积先用包围盒筛选，子体积之间并行检查（rayon），并显示进度条。
//!
//! ## 依赖关系
//! - 被 `commands/build.rs` 和 `commands/check.rs` 调用
//! - 使用 `models/`、`utils/progress.rs`
//! - 使用 `rayon` 进行并行计算

use crate::error::{DichroiconError, Result};
use crate::models::{BoundingBox, GeometryStore, Inside, LvId, Vec3};
use crate::utils::progress;

use rayon::prelude::*;
use std::collections::HashMap;

/// 重叠类型
#[derive(Debug, Clone, PartialEq)]
pub enum OverlapKind {
    /// 子体积超出母体积
    Protrusion,
    /// 与兄弟体积重叠
    Overlap { sister: String },
}

/// 一条重叠报告
#[derive(Debug, Clone, PartialEq)]
pub struct OverlapReport {
    pub mother: String,
    pub daughter: String,
    pub kind: OverlapKind,
    /// 违规采样点数
    pub points: usize,
    /// 第一个违规点（母体积坐标系，mm）
    pub first_point: Vec3,
}

impl std::fmt::Display for OverlapReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [x, y, z] = self.first_point;
        match &self.kind {
            OverlapKind::Protrusion => write!(
                f,
                "{} protrudes from mother {} ({} points, e.g. ({:.3}, {:.3}, {:.3}) mm)",
                self.daughter, self.mother, self.points, x, y, z
            ),
            OverlapKind::Overlap { sister } => write!(
                f,
                "{} overlaps {} in {} ({} points, e.g. ({:.3}, {:.3}, {:.3}) mm)",
                self.daughter, sister, self.mother, self.points, x, y, z
            ),
        }
    }
}

/// 重叠检查器
pub struct OverlapChecker {
    /// 每个面的网格划分数
    resolution: usize,
    /// 并行作业数
    jobs: usize,
    show_progress: bool,
}

impl OverlapChecker {
    pub fn new(resolution: usize, jobs: usize) -> Self {
        let jobs = if jobs == 0 { num_cpus::get() } else { jobs };
        OverlapChecker {
            resolution: resolution.max(1),
            jobs,
            show_progress: true,
        }
    }

    /// 关闭进度条
    pub fn quiet(mut self) -> Self {
        self.show_progress = false;
        self
    }

    /// 检查从世界体积可达的所有逻辑体积
    pub fn check_tree(&self, store: &GeometryStore) -> Result<Vec<OverlapReport>> {
        if store.world().is_none() {
            return Err(DichroiconError::NoWorld);
        }
        let mut reports = Vec::new();
        for id in store.reachable_postorder() {
            if !store.logical(id).daughters.is_empty() {
                reports.extend(self.check_volume(store, id)?);
            }
        }
        Ok(reports)
    }

    /// 检查一个母体积中的所有子体积
    pub fn check_volume(&self, store: &GeometryStore, mother: LvId) -> Result<Vec<OverlapReport>> {
        let mother_lv = store.logical(mother);
        let daughters = &mother_lv.daughters;

        // 同一逻辑体积的采样点只算一次
        let mut samples: HashMap<LvId, Vec<Vec3>> = HashMap::new();
        for d in daughters {
            samples
                .entry(d.logical)
                .or_insert_with(|| store.logical(d.logical).solid.surface_points(self.resolution));
        }

        let boxes: Vec<BoundingBox> = daughters
            .iter()
            .map(|d| store.logical(d.logical).solid.extent().transformed(&d.transform))
            .collect();

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.jobs)
            .build()
            .map_err(|e| DichroiconError::Other(e.to_string()))?;

        let pb = if self.show_progress {
            progress::create_progress_bar(daughters.len() as u64, &mother_lv.name)
        } else {
            progress::create_hidden_bar()
        };

        let reports: Vec<OverlapReport> = pool.install(|| {
            (0..daughters.len())
                .into_par_iter()
                .flat_map_iter(|i| {
                    let d = &daughters[i];
                    let mut found = Vec::new();

                    let points: Vec<Vec3> = samples[&d.logical]
                        .iter()
                        .map(|p| d.transform.apply(*p))
                        .collect();

                    let outside: Vec<&Vec3> = points
                        .iter()
                        .filter(|p| mother_lv.solid.inside(**p) == Inside::Outside)
                        .collect();
                    if let Some(first) = outside.first() {
                        found.push(OverlapReport {
                            mother: mother_lv.name.clone(),
                            daughter: d.name.clone(),
                            kind: OverlapKind::Protrusion,
                            points: outside.len(),
                            first_point: **first,
                        });
                    }

                    for j in (i + 1)..daughters.len() {
                        if !boxes[i].overlaps(&boxes[j], crate::models::solid::SURFACE_TOLERANCE)
                        {
                            continue;
                        }
                        let s = &daughters[j];
                        let sister_solid = &store.logical(s.logical).solid;
                        let own_solid = &store.logical(d.logical).solid;

                        let mut hits = points
                            .iter()
                            .filter(|p| sister_solid.inside(s.transform.apply_inverse(**p)) == Inside::Inside);
                        let first = hits.next().copied();
                        let mut count = first.map_or(0, |_| 1 + hits.count());

                        // 反向：兄弟体积的表面点落在本体积内部
                        let mut reverse = samples[&s.logical]
                            .iter()
                            .map(|p| s.transform.apply(*p))
                            .filter(|p| own_solid.inside(d.transform.apply_inverse(*p)) == Inside::Inside);
                        let reverse_first = reverse.next();
                        count += reverse_first.map_or(0, |_| 1 + reverse.count());

                        if let Some(point) = first.or(reverse_first) {
                            found.push(OverlapReport {
                                mother: mother_lv.name.clone(),
                                daughter: d.name.clone(),
                                kind: OverlapKind::Overlap {
                                    sister: s.name.clone(),
                                },
                                points: count,
                                first_point: point,
                            });
                        }
                    }

                    pb.inc(1);
                    found
                })
                .collect()
        });

        pb.finish_and_clear();
        Ok(reports)
    }
}
