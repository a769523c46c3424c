//! # 实体（Solid）模型
//!
//! 几何构建所需的最小实体集合：
//! - `Box`: 以半长描述的长方体
//! - `Polyhedra`: 由 (r, z) 轮廓描述的正多边形旋转体（r 为角点半径）
//! - `Boolean`: 交、差、并组合，保留为符号树，按点求值
//!
//! 提供点分类 (`inside`)、包围盒、体积和表面采样点，
//! 供重叠检查和摘要输出使用。
//!
//! ## 依赖关系
//! - 被 `models/volume.rs`、`geo/` 使用
//! - 使用 `models/transform.rs`

use crate::error::{DichroiconError, Result};
use crate::models::transform::{Transform3D, Vec3};

use std::f64::consts::{PI, TAU};
use std::sync::Arc;

/// 表面容差 (mm)
pub const SURFACE_TOLERANCE: f64 = 1e-9;

/// 布尔实体体积估算时每个轴的网格划分数
const VOLUME_GRID: usize = 64;

/// 点相对实体的位置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inside {
    Inside,
    Surface,
    Outside,
}

/// 轴对齐包围盒
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl BoundingBox {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        BoundingBox { min, max }
    }

    /// 空包围盒（并运算的单位元）
    pub fn empty() -> Self {
        BoundingBox {
            min: [f64::INFINITY; 3],
            max: [f64::NEG_INFINITY; 3],
        }
    }

    pub fn is_empty(&self) -> bool {
        (0..3).any(|i| self.min[i] > self.max[i])
    }

    pub fn size(&self) -> Vec3 {
        if self.is_empty() {
            return [0.0; 3];
        }
        [
            self.max[0] - self.min[0],
            self.max[1] - self.min[1],
            self.max[2] - self.min[2],
        ]
    }

    pub fn expand(&mut self, p: Vec3) {
        for i in 0..3 {
            self.min[i] = self.min[i].min(p[i]);
            self.max[i] = self.max[i].max(p[i]);
        }
    }

    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        let mut out = *self;
        for i in 0..3 {
            out.min[i] = out.min[i].min(other.min[i]);
            out.max[i] = out.max[i].max(other.max[i]);
        }
        out
    }

    pub fn intersection(&self, other: &BoundingBox) -> BoundingBox {
        let mut out = *self;
        for i in 0..3 {
            out.min[i] = out.min[i].max(other.min[i]);
            out.max[i] = out.max[i].min(other.max[i]);
        }
        if out.is_empty() {
            BoundingBox::empty()
        } else {
            out
        }
    }

    /// 变换后的包围盒（取 8 个角点的包络）
    pub fn transformed(&self, t: &Transform3D) -> BoundingBox {
        if self.is_empty() {
            return *self;
        }
        let mut out = BoundingBox::empty();
        for corner in 0..8 {
            let p = [
                if corner & 1 == 0 { self.min[0] } else { self.max[0] },
                if corner & 2 == 0 { self.min[1] } else { self.max[1] },
                if corner & 4 == 0 { self.min[2] } else { self.max[2] },
            ];
            out.expand(t.apply(p));
        }
        out
    }

    /// 两个包围盒是否有体积意义上的重叠
    pub fn overlaps(&self, other: &BoundingBox, tolerance: f64) -> bool {
        (0..3).all(|i| {
            self.min[i] < other.max[i] - tolerance && other.min[i] < self.max[i] - tolerance
        })
    }
}

/// 布尔运算类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BooleanOp {
    Intersection,
    Subtraction,
    Union,
}

impl std::fmt::Display for BooleanOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BooleanOp::Intersection => write!(f, "intersection"),
            BooleanOp::Subtraction => write!(f, "subtraction"),
            BooleanOp::Union => write!(f, "union"),
        }
    }
}

/// 实体形状
#[derive(Debug, Clone)]
pub enum Shape {
    /// 长方体，`half` 为三个方向的半长
    Box { half: Vec3 },

    /// 正多边形旋转体，`rz` 为封闭的 (角点半径, z) 轮廓
    Polyhedra {
        phi_start: f64,
        num_sides: usize,
        rz: Vec<(f64, f64)>,
    },

    /// 布尔组合，`b` 经 `b_transform` 放置在 `a` 的坐标系中
    Boolean {
        op: BooleanOp,
        a: Arc<Solid>,
        b: Arc<Solid>,
        b_transform: Transform3D,
    },
}

/// 命名实体
#[derive(Debug, Clone)]
pub struct Solid {
    pub name: String,
    pub shape: Shape,
}

impl Solid {
    /// 创建长方体
    pub fn new_box(name: impl Into<String>, half: Vec3) -> Result<Self> {
        let name = name.into();
        if half.iter().any(|h| !(*h > 0.0)) {
            return Err(DichroiconError::InvalidSolid {
                name,
                reason: format!("box half-lengths must be positive, got {:?}", half),
            });
        }
        Ok(Solid {
            name,
            shape: Shape::Box { half },
        })
    }

    /// 由 (r, z) 轮廓创建正多边形旋转体
    pub fn polyhedra(
        name: impl Into<String>,
        phi_start: f64,
        num_sides: usize,
        rs: &[f64],
        zs: &[f64],
    ) -> Result<Self> {
        let name = name.into();
        if rs.len() != zs.len() {
            return Err(DichroiconError::InvalidSolid {
                name,
                reason: format!(
                    "r and z must have the same number of elements ({} vs {})",
                    rs.len(),
                    zs.len()
                ),
            });
        }
        if rs.len() < 3 {
            return Err(DichroiconError::InvalidSolid {
                name,
                reason: "an (r, z) contour needs at least 3 points".to_string(),
            });
        }
        if num_sides < 3 {
            return Err(DichroiconError::InvalidSolid {
                name,
                reason: format!("a polyhedra needs at least 3 sides, got {}", num_sides),
            });
        }
        if rs.iter().any(|r| *r < 0.0 || !r.is_finite()) || zs.iter().any(|z| !z.is_finite()) {
            return Err(DichroiconError::InvalidSolid {
                name,
                reason: "radii must be finite and non-negative".to_string(),
            });
        }
        Ok(Solid {
            name,
            shape: Shape::Polyhedra {
                phi_start,
                num_sides,
                rz: rs.iter().copied().zip(zs.iter().copied()).collect(),
            },
        })
    }

    /// 创建布尔组合
    pub fn boolean(
        name: impl Into<String>,
        op: BooleanOp,
        a: Arc<Solid>,
        b: Arc<Solid>,
        b_transform: Transform3D,
    ) -> Self {
        Solid {
            name: name.into(),
            shape: Shape::Boolean {
                op,
                a,
                b,
                b_transform,
            },
        }
    }

    pub fn intersection(
        name: impl Into<String>,
        a: Arc<Solid>,
        b: Arc<Solid>,
        b_transform: Transform3D,
    ) -> Self {
        Self::boolean(name, BooleanOp::Intersection, a, b, b_transform)
    }

    pub fn subtraction(
        name: impl Into<String>,
        a: Arc<Solid>,
        b: Arc<Solid>,
        b_transform: Transform3D,
    ) -> Self {
        Self::boolean(name, BooleanOp::Subtraction, a, b, b_transform)
    }

    /// 类型名（用于输出表格）
    pub fn kind(&self) -> String {
        match &self.shape {
            Shape::Box { .. } => "box".to_string(),
            Shape::Polyhedra { num_sides, .. } => format!("polyhedra({})", num_sides),
            Shape::Boolean { op, .. } => op.to_string(),
        }
    }

    /// 点分类
    pub fn inside(&self, p: Vec3) -> Inside {
        match &self.shape {
            Shape::Box { half } => box_inside(half, p),
            Shape::Polyhedra {
                phi_start,
                num_sides,
                rz,
            } => polyhedra_inside(*phi_start, *num_sides, rz, p),
            Shape::Boolean {
                op,
                a,
                b,
                b_transform,
            } => {
                let in_a = a.inside(p);
                // 短路：结果已由 a 决定时不再计算 b
                match (op, in_a) {
                    (BooleanOp::Intersection, Inside::Outside) => return Inside::Outside,
                    (BooleanOp::Subtraction, Inside::Outside) => return Inside::Outside,
                    (BooleanOp::Union, Inside::Inside) => return Inside::Inside,
                    _ => {}
                }
                let in_b = b.inside(b_transform.apply_inverse(p));
                combine(*op, in_a, in_b)
            }
        }
    }

    /// 包围盒
    pub fn extent(&self) -> BoundingBox {
        match &self.shape {
            Shape::Box { half } => BoundingBox::new([-half[0], -half[1], -half[2]], *half),
            Shape::Polyhedra {
                phi_start,
                num_sides,
                rz,
            } => {
                let r_max = rz.iter().map(|(r, _)| *r).fold(0.0_f64, f64::max);
                let z_min = rz.iter().map(|(_, z)| *z).fold(f64::INFINITY, f64::min);
                let z_max = rz.iter().map(|(_, z)| *z).fold(f64::NEG_INFINITY, f64::max);
                let mut bb = BoundingBox::empty();
                for k in 0..*num_sides {
                    let phi = phi_start + k as f64 * TAU / *num_sides as f64;
                    bb.expand([r_max * phi.cos(), r_max * phi.sin(), z_min]);
                    bb.expand([r_max * phi.cos(), r_max * phi.sin(), z_max]);
                }
                bb
            }
            Shape::Boolean {
                op,
                a,
                b,
                b_transform,
            } => {
                let ea = a.extent();
                let eb = b.extent().transformed(b_transform);
                match op {
                    BooleanOp::Intersection => ea.intersection(&eb),
                    BooleanOp::Subtraction => ea,
                    BooleanOp::Union => ea.union(&eb),
                }
            }
        }
    }

    /// 体积 (mm³)：长方体与多边形旋转体为精确值，布尔组合为网格估计
    pub fn cubic_volume(&self) -> f64 {
        match &self.shape {
            Shape::Box { half } => 8.0 * half[0] * half[1] * half[2],
            Shape::Polyhedra { num_sides, rz, .. } => {
                let n = *num_sides as f64;
                // 角点半径为 r 的正 n 边形面积 = area_factor * r²
                let area_factor = 0.5 * n * (TAU / n).sin();
                2.0 * area_factor * contour_first_moment(rz).abs()
            }
            Shape::Boolean { .. } => self.estimate_volume(VOLUME_GRID),
        }
    }

    /// 在包围盒内用规则网格估计体积
    pub fn estimate_volume(&self, divisions: usize) -> f64 {
        let bb = self.extent();
        if bb.is_empty() || divisions == 0 {
            return 0.0;
        }
        let size = bb.size();
        let step = [
            size[0] / divisions as f64,
            size[1] / divisions as f64,
            size[2] / divisions as f64,
        ];
        let mut count = 0usize;
        for i in 0..divisions {
            for j in 0..divisions {
                for k in 0..divisions {
                    let p = [
                        bb.min[0] + (i as f64 + 0.5) * step[0],
                        bb.min[1] + (j as f64 + 0.5) * step[1],
                        bb.min[2] + (k as f64 + 0.5) * step[2],
                    ];
                    if self.inside(p) != Inside::Outside {
                        count += 1;
                    }
                }
            }
        }
        count as f64 * step[0] * step[1] * step[2]
    }

    /// 表面采样点（每个面 `divisions × divisions` 个网格中心）
    pub fn surface_points(&self, divisions: usize) -> Vec<Vec3> {
        let n = divisions.max(1);
        match &self.shape {
            Shape::Box { half } => box_surface_points(half, n),
            Shape::Polyhedra {
                phi_start,
                num_sides,
                rz,
            } => polyhedra_surface_points(*phi_start, *num_sides, rz, n),
            Shape::Boolean {
                a, b, b_transform, ..
            } => a
                .surface_points(n)
                .into_iter()
                .chain(
                    b.surface_points(n)
                        .into_iter()
                        .map(|p| b_transform.apply(p)),
                )
                .filter(|p| self.inside(*p) == Inside::Surface)
                .collect(),
        }
    }
}

/// 布尔运算的点分类规则
fn combine(op: BooleanOp, a: Inside, b: Inside) -> Inside {
    use self::Inside as I;
    match op {
        BooleanOp::Intersection => match (a, b) {
            (I::Inside, I::Inside) => I::Inside,
            (I::Outside, _) | (_, I::Outside) => I::Outside,
            _ => I::Surface,
        },
        BooleanOp::Subtraction => match (a, b) {
            (I::Outside, _) | (_, I::Inside) => I::Outside,
            (I::Inside, I::Outside) => I::Inside,
            _ => I::Surface,
        },
        BooleanOp::Union => match (a, b) {
            (I::Inside, _) | (_, I::Inside) => I::Inside,
            (I::Outside, I::Outside) => I::Outside,
            _ => I::Surface,
        },
    }
}

fn box_inside(half: &Vec3, p: Vec3) -> Inside {
    let d = (0..3)
        .map(|i| p[i].abs() - half[i])
        .fold(f64::NEG_INFINITY, f64::max);
    if d > SURFACE_TOLERANCE {
        Inside::Outside
    } else if d >= -SURFACE_TOLERANCE {
        Inside::Surface
    } else {
        Inside::Inside
    }
}

/// 点在正多边形截面上的"角点半径"坐标
///
/// 即：经过该点、与实体同向的正多边形的外接圆半径。
fn polygon_radius(phi_start: f64, num_sides: usize, x: f64, y: f64) -> f64 {
    let dphi = TAU / num_sides as f64;
    let phi = (y.atan2(x) - phi_start).rem_euclid(TAU);
    let sector = (phi / dphi).floor().min(num_sides as f64 - 1.0);
    let normal = phi_start + (sector + 0.5) * dphi;
    (x * normal.cos() + y * normal.sin()) / (0.5 * dphi).cos()
}

fn polyhedra_inside(phi_start: f64, num_sides: usize, rz: &[(f64, f64)], p: Vec3) -> Inside {
    let rho = polygon_radius(phi_start, num_sides, p[0], p[1]);
    // 按侧面法向距离缩放 r，使容差对应真实距离
    let scale = (PI / num_sides as f64).cos();
    classify_in_contour(rz, rho, p[2], scale)
}

/// (r, z) 平面内的点在多边形中的分类
fn classify_in_contour(rz: &[(f64, f64)], rho: f64, z: f64, scale: f64) -> Inside {
    let n = rz.len();
    let q = (rho * scale, z);
    let mut min_dist = f64::INFINITY;
    let mut crossings = 0;
    for i in 0..n {
        let (r0, z0) = rz[i];
        let (r1, z1) = rz[(i + 1) % n];
        // 轴线上的边不是表面
        if r0 != 0.0 || r1 != 0.0 {
            let a = (r0 * scale, z0);
            let b = (r1 * scale, z1);
            min_dist = min_dist.min(segment_distance(q, a, b));
        }

        if (z0 > z) != (z1 > z) {
            let r_cross = r0 + (z - z0) * (r1 - r0) / (z1 - z0);
            if rho < r_cross {
                crossings += 1;
            }
        }
    }
    if min_dist <= SURFACE_TOLERANCE {
        Inside::Surface
    } else if crossings % 2 == 1 {
        Inside::Inside
    } else {
        Inside::Outside
    }
}

fn segment_distance(p: (f64, f64), a: (f64, f64), b: (f64, f64)) -> f64 {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let len2 = dx * dx + dy * dy;
    let t = if len2 > 0.0 {
        (((p.0 - a.0) * dx + (p.1 - a.1) * dy) / len2).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let (cx, cy) = (a.0 + t * dx, a.1 + t * dy);
    ((p.0 - cx).powi(2) + (p.1 - cy).powi(2)).sqrt()
}

/// 轮廓关于 z 轴的一阶矩 ∫∫ r dr dz（带符号）
fn contour_first_moment(rz: &[(f64, f64)]) -> f64 {
    let n = rz.len();
    let mut sum = 0.0;
    for i in 0..n {
        let (x0, y0) = rz[i];
        let (x1, y1) = rz[(i + 1) % n];
        sum += (x0 + x1) * (x0 * y1 - x1 * y0);
    }
    sum / 6.0
}

fn box_surface_points(half: &Vec3, n: usize) -> Vec<Vec3> {
    let mut points = Vec::with_capacity(6 * n * n);
    for axis in 0..3 {
        let u = (axis + 1) % 3;
        let v = (axis + 2) % 3;
        for sign in [-1.0, 1.0] {
            for i in 0..n {
                for j in 0..n {
                    let mut p = [0.0; 3];
                    p[axis] = sign * half[axis];
                    p[u] = -half[u] + (i as f64 + 0.5) * 2.0 * half[u] / n as f64;
                    p[v] = -half[v] + (j as f64 + 0.5) * 2.0 * half[v] / n as f64;
                    points.push(p);
                }
            }
        }
    }
    points
}

fn polyhedra_surface_points(
    phi_start: f64,
    num_sides: usize,
    rz: &[(f64, f64)],
    n: usize,
) -> Vec<Vec3> {
    let corners: Vec<(f64, f64)> = (0..=num_sides)
        .map(|k| {
            let phi = phi_start + k as f64 * TAU / num_sides as f64;
            (phi.cos(), phi.sin())
        })
        .collect();

    let mut points = Vec::new();
    for i in 0..rz.len() {
        let (r0, z0) = rz[i];
        let (r1, z1) = rz[(i + 1) % rz.len()];
        if r0 == 0.0 && r1 == 0.0 {
            continue; // 轴线上的边不构成表面
        }
        for side in 0..num_sides {
            let (c0, c1) = (corners[side], corners[side + 1]);
            for a in 0..n {
                let u = (a as f64 + 0.5) / n as f64;
                let r = r0 + u * (r1 - r0);
                let z = z0 + u * (z1 - z0);
                for b in 0..n {
                    let v = (b as f64 + 0.5) / n as f64;
                    let x = r * ((1.0 - v) * c0.0 + v * c1.0);
                    let y = r * ((1.0 - v) * c0.1 + v * c1.1);
                    points.push([x, y, z]);
                }
            }
        }
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    const R: f64 = 30.0;

    fn hex_prism() -> Solid {
        Solid::polyhedra(
            "prism",
            0.0,
            6,
            &[0.0, R, R, 0.0],
            &[0.0, 0.0, 50.0, 50.0],
        )
        .unwrap()
    }

    /// 从 r=10 (z=0) 扩张到 r=30 (z=50) 的六棱台
    fn hex_cone() -> Arc<Solid> {
        Arc::new(
            Solid::polyhedra(
                "cone",
                0.0,
                6,
                &[0.0, 10.0, R, 0.0],
                &[0.0, 0.0, 50.0, 50.0],
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_box_inside() {
        let b = Solid::new_box("b", [1.0, 2.0, 3.0]).unwrap();
        assert_eq!(b.inside([0.0, 0.0, 0.0]), Inside::Inside);
        assert_eq!(b.inside([1.0, 0.0, 0.0]), Inside::Surface);
        assert_eq!(b.inside([0.0, 2.5, 0.0]), Inside::Outside);
        assert!((b.cubic_volume() - 48.0).abs() < 1e-9);
    }

    #[test]
    fn test_box_rejects_non_positive() {
        assert!(Solid::new_box("b", [1.0, 0.0, 1.0]).is_err());
    }

    #[test]
    fn test_polyhedra_validation() {
        assert!(Solid::polyhedra("p", 0.0, 6, &[0.0, 1.0], &[0.0, 1.0]).is_err());
        assert!(Solid::polyhedra("p", 0.0, 6, &[0.0, 1.0, 1.0], &[0.0, 1.0]).is_err());
        assert!(Solid::polyhedra("p", 0.0, 2, &[0.0, 1.0, 1.0], &[0.0, 0.0, 1.0]).is_err());
        assert!(Solid::polyhedra("p", 0.0, 6, &[0.0, -1.0, 1.0], &[0.0, 0.0, 1.0]).is_err());
    }

    #[test]
    fn test_hex_orientation() {
        let hex = hex_prism();
        // 角点在 +x 方向，平边朝向 ±y
        assert_eq!(hex.inside([0.99 * R, 0.0, 25.0]), Inside::Inside);
        assert_eq!(hex.inside([0.0, 0.9 * R, 25.0]), Inside::Outside);
        assert_eq!(hex.inside([0.0, 0.85 * R, 25.0]), Inside::Inside);
        assert_eq!(hex.inside([0.0, 0.5 * 3f64.sqrt() * R, 25.0]), Inside::Surface);
        assert_eq!(hex.inside([0.0, 0.0, 50.0]), Inside::Surface);
        assert_eq!(hex.inside([0.0, 0.0, 51.0]), Inside::Outside);
    }

    #[test]
    fn test_hex_prism_volume() {
        let expected = 1.5 * 3f64.sqrt() * R * R * 50.0;
        assert!((hex_prism().cubic_volume() - expected).abs() / expected < 1e-12);
    }

    #[test]
    fn test_hex_extent() {
        let bb = hex_prism().extent();
        assert!((bb.max[0] - R).abs() < 1e-9);
        assert!((bb.max[1] - 0.5 * 3f64.sqrt() * R).abs() < 1e-9);
        assert!((bb.min[2] - 0.0).abs() < 1e-9);
        assert!((bb.max[2] - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_polyhedra_surface_points_on_surface() {
        let hex = hex_prism();
        let points = hex.surface_points(4);
        assert!(!points.is_empty());
        assert!(points.iter().all(|p| hex.inside(*p) == Inside::Surface));
    }

    #[test]
    fn test_intersection_of_shifted_cones() {
        let cone = hex_cone();
        let t = Solid::intersection(
            "t1",
            cone.clone(),
            cone.clone(),
            Transform3D::translation(R, 0.0, 0.0),
        );
        assert_eq!(t.inside([25.0, 0.0, 49.0]), Inside::Inside);
        assert_eq!(t.inside([0.0, 0.0, 1.0]), Inside::Outside);
        let bb = t.extent();
        assert!((bb.min[0] - 0.0).abs() < 1e-9);
        assert!((bb.max[0] - R).abs() < 1e-9);
    }

    #[test]
    fn test_subtraction_of_shifted_cones() {
        let cone = hex_cone();
        let base = Solid::subtraction(
            "base",
            cone.clone(),
            cone.clone(),
            Transform3D::translation(R, 0.0, 0.0),
        );
        assert_eq!(base.inside([0.0, 0.0, 1.0]), Inside::Inside);
        assert_eq!(base.inside([25.0, 0.0, 49.0]), Inside::Outside);
        assert_eq!(base.inside([-25.0, 0.0, 49.0]), Inside::Inside);
    }

    #[test]
    fn test_boolean_surface_points_classify_as_surface() {
        let cone = hex_cone();
        let t = Solid::intersection(
            "t1",
            cone.clone(),
            cone,
            Transform3D::translation(R, 0.0, 0.0),
        );
        let points = t.surface_points(6);
        assert!(!points.is_empty());
        assert!(points.iter().all(|p| t.inside(*p) == Inside::Surface));
    }

    #[test]
    fn test_estimate_volume_close_to_exact() {
        let hex = hex_prism();
        let exact = hex.cubic_volume();
        let estimate = hex.estimate_volume(48);
        assert!((estimate - exact).abs() / exact < 0.02);
    }

    #[test]
    fn test_boolean_classification_rules() {
        use super::Inside::{Inside as In, Outside as Out, Surface as Surf};
        assert_eq!(combine(BooleanOp::Intersection, In, In), In);
        assert_eq!(combine(BooleanOp::Intersection, In, Surf), Surf);
        assert_eq!(combine(BooleanOp::Intersection, Surf, Out), Out);
        assert_eq!(combine(BooleanOp::Subtraction, In, Out), In);
        assert_eq!(combine(BooleanOp::Subtraction, In, In), Out);
        assert_eq!(combine(BooleanOp::Subtraction, In, Surf), Surf);
        assert_eq!(combine(BooleanOp::Subtraction, Out, Out), Out);
        assert_eq!(combine(BooleanOp::Union, Out, In), In);
        assert_eq!(combine(BooleanOp::Union, Surf, Out), Surf);
        assert_eq!(combine(BooleanOp::Union, Out, Out), Out);
    }

    #[test]
    fn test_bounding_box_overlap() {
        let a = BoundingBox::new([0.0; 3], [1.0; 3]);
        let b = BoundingBox::new([1.0, 0.0, 0.0], [2.0, 1.0, 1.0]);
        let c = BoundingBox::new([0.5, 0.5, 0.5], [2.0, 2.0, 2.0]);
        assert!(!a.overlaps(&b, 1e-9));
        assert!(a.overlaps(&c, 1e-9));
        assert!(a.intersection(&BoundingBox::new([5.0; 3], [6.0; 3])).is_empty());
    }
}
