//! # GDML 导出
//!
//! 把构建好的体积仓库写成 GDML 文档，可直接被 Geant4 的 GDML 读取器加载。
//!
//! ## 文档结构
//! - `define`: 空
//! - `materials`: 空，材料只以名字引用（应为 NIST 名称或由外部文件提供）
//! - `solids`: `box`（全长）、`genericPolyhedra`（`rzpoint` 为角点半径）、
//!   `intersection` / `subtraction` / `union`，操作数先于组合体写出
//! - `structure`: 子体积先于母体积
//! - `setup`: 指向世界体积
//!
//! ## 转角约定
//! GDML 读取器对 `rotation` 取逆后再用于摆放，
//! 因此写出的是逆变换按 X、Y、Z 顺序分解的转角（度）。
//!
//! ## 依赖关系
//! - 被 `commands/export.rs` 和 `batch/runner.rs` 调用
//! - 使用 `models/`

use crate::error::{DichroiconError, Result};
use crate::models::{GeometryStore, Shape, Solid, Transform3D};

use std::collections::HashSet;
use std::f64::consts::TAU;
use std::path::Path;

const GDML_HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<gdml xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xsi:noNamespaceSchemaLocation="http://service-spi.web.cern.ch/service-spi/app/releases/GDML/schema/gdml.xsd">"#;

/// 按缩进逐行累积的文本
struct Lines {
    buf: String,
}

impl Lines {
    fn new() -> Self {
        Lines { buf: String::new() }
    }

    fn push(&mut self, indent: usize, line: &str) {
        for _ in 0..indent {
            self.buf.push_str("  ");
        }
        self.buf.push_str(line);
        self.buf.push('\n');
    }
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn fmt_len(v: f64) -> String {
    format!("{:.6}", v)
}

/// 写出变换的 position / rotation 元素（单位元素省略）
fn write_transform(lines: &mut Lines, indent: usize, name: &str, t: &Transform3D) {
    let [x, y, z] = t.translation;
    if x != 0.0 || y != 0.0 || z != 0.0 {
        lines.push(
            indent,
            &format!(
                r#"<position name="{}_pos" x="{}" y="{}" z="{}" unit="mm"/>"#,
                escape(name),
                fmt_len(x),
                fmt_len(y),
                fmt_len(z)
            ),
        );
    }
    let rotation_only = Transform3D {
        rotation: t.rotation,
        translation: [0.0; 3],
    };
    if !rotation_only.is_identity() {
        let [rx, ry, rz] = rotation_only.inverse().euler_xyz();
        lines.push(
            indent,
            &format!(
                r#"<rotation name="{}_rot" x="{}" y="{}" z="{}" unit="deg"/>"#,
                escape(name),
                fmt_len(rx.to_degrees()),
                fmt_len(ry.to_degrees()),
                fmt_len(rz.to_degrees())
            ),
        );
    }
}

/// 递归写出实体，操作数先于组合体
fn write_solid(lines: &mut Lines, solid: &Solid, written: &mut HashSet<String>) {
    if written.contains(&solid.name) {
        return;
    }
    let name = escape(&solid.name);
    match &solid.shape {
        Shape::Box { half } => {
            lines.push(
                2,
                &format!(
                    r#"<box name="{}" x="{}" y="{}" z="{}" lunit="mm"/>"#,
                    name,
                    fmt_len(2.0 * half[0]),
                    fmt_len(2.0 * half[1]),
                    fmt_len(2.0 * half[2])
                ),
            );
        }
        Shape::Polyhedra {
            phi_start,
            num_sides,
            rz,
        } => {
            lines.push(
                2,
                &format!(
                    r#"<genericPolyhedra name="{}" startphi="{}" deltaphi="{}" numsides="{}" aunit="rad" lunit="mm">"#,
                    name,
                    fmt_len(*phi_start),
                    fmt_len(TAU),
                    num_sides
                ),
            );
            for (r, z) in rz {
                lines.push(
                    3,
                    &format!(r#"<rzpoint r="{}" z="{}"/>"#, fmt_len(*r), fmt_len(*z)),
                );
            }
            lines.push(2, "</genericPolyhedra>");
        }
        Shape::Boolean {
            op,
            a,
            b,
            b_transform,
        } => {
            write_solid(lines, a, written);
            write_solid(lines, b, written);
            let tag = op.to_string();
            lines.push(2, &format!(r#"<{} name="{}">"#, tag, name));
            lines.push(3, &format!(r#"<first ref="{}"/>"#, escape(&a.name)));
            lines.push(3, &format!(r#"<second ref="{}"/>"#, escape(&b.name)));
            write_transform(lines, 3, &solid.name, b_transform);
            lines.push(2, &format!("</{}>", tag));
        }
    }
    written.insert(solid.name.clone());
}

/// 生成 GDML 文本
pub fn to_gdml_string(store: &GeometryStore) -> Result<String> {
    let world = store.world().ok_or(DichroiconError::NoWorld)?;
    let order = store.reachable_postorder();

    let mut lines = Lines::new();
    lines.buf.push_str(GDML_HEADER);
    lines.buf.push('\n');

    lines.push(1, "<define/>");

    let mut materials: Vec<&str> = order
        .iter()
        .map(|id| store.logical(*id).material.as_str())
        .collect();
    materials.sort_unstable();
    materials.dedup();
    lines.push(1, "<materials>");
    for material in &materials {
        lines.push(2, &format!("<!-- {} -->", escape(material)));
    }
    lines.push(1, "</materials>");

    lines.push(1, "<solids>");
    let mut written = HashSet::new();
    for id in &order {
        write_solid(&mut lines, &store.logical(*id).solid, &mut written);
    }
    lines.push(1, "</solids>");

    lines.push(1, "<structure>");
    for id in &order {
        let lv = store.logical(*id);
        lines.push(2, &format!(r#"<volume name="{}">"#, escape(&lv.name)));
        lines.push(3, &format!(r#"<materialref ref="{}"/>"#, escape(&lv.material)));
        lines.push(3, &format!(r#"<solidref ref="{}"/>"#, escape(&lv.solid.name)));
        for pv in &lv.daughters {
            lines.push(
                3,
                &format!(
                    r#"<physvol name="{}" copynumber="{}">"#,
                    escape(&pv.name),
                    pv.copy_number
                ),
            );
            lines.push(
                4,
                &format!(
                    r#"<volumeref ref="{}"/>"#,
                    escape(&store.logical(pv.logical).name)
                ),
            );
            write_transform(&mut lines, 4, &pv.name, &pv.transform);
            lines.push(3, "</physvol>");
        }
        lines.push(2, "</volume>");
    }
    lines.push(1, "</structure>");

    lines.push(1, r#"<setup name="Default" version="1.0">"#);
    lines.push(
        2,
        &format!(
            r#"<world ref="{}"/>"#,
            escape(&store.logical(world.logical).name)
        ),
    );
    lines.push(1, "</setup>");
    lines.buf.push_str("</gdml>\n");

    Ok(lines.buf)
}

/// 写出 GDML 文件
pub fn write_gdml(store: &GeometryStore, output_path: &Path) -> Result<()> {
    let content = to_gdml_string(store)?;
    std::fs::write(output_path, content).map_err(|e| DichroiconError::write(output_path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::factory::GeoBuilder;
    use crate::models::{DbTable, DbValue};

    fn tables() -> Vec<DbTable> {
        vec![
            DbTable::new("GEO", "world")
                .with("type", DbValue::Str("box".into()))
                .with("mother", DbValue::Str("".into()))
                .with("material", DbValue::Str("G4_AIR".into()))
                .with("size", DbValue::NumArray(vec![500.0, 500.0, 500.0])),
            DbTable::new("GEO", "dichroicon")
                .with("type", DbValue::Str("hexdichroicon".into()))
                .with("mother", DbValue::Str("world".into()))
                .with("material", DbValue::Str("G4_PLEXIGLASS".into()))
                .with("rs", DbValue::NumArray(vec![0.0, 10.0, 30.0, 0.0]))
                .with("zs", DbValue::NumArray(vec![0.0, 0.0, 50.0, 50.0]))
                .with("panel_size", DbValue::NumArray(vec![100.0, 80.0, 60.0]))
                .with("rotation", DbValue::NumArray(vec![0.0, 0.0, 30.0])),
        ]
    }

    #[test]
    fn test_document_structure() {
        let store = GeoBuilder::with_default_factories()
            .build(&tables())
            .unwrap();
        let gdml = to_gdml_string(&store).unwrap();

        assert!(gdml.starts_with("<?xml"));
        assert!(gdml.trim_end().ends_with("</gdml>"));
        assert!(gdml.contains(r#"<world ref="world"/>"#));
        assert!(gdml.contains(r#"<box name="world_solid" x="1000.000000""#));
        assert_eq!(gdml.matches("<genericPolyhedra ").count(), 1);
        assert_eq!(gdml.matches("<rzpoint ").count(), 4);
        assert!(gdml.contains(r#"<subtraction name="dichroicon_base_solid">"#));

        let world_id = store.world().unwrap().logical;
        assert_eq!(
            gdml.matches("<physvol ").count(),
            store.count_physical(world_id)
        );
    }

    #[test]
    fn test_definitions_precede_references() {
        let store = GeoBuilder::with_default_factories()
            .build(&tables())
            .unwrap();
        let gdml = to_gdml_string(&store).unwrap();

        let hex = gdml.find(r#"<genericPolyhedra name="dichroicon_hex_solid""#).unwrap();
        let trisect = gdml.find(r#"<intersection name="dichroicon_trisec1_solid">"#).unwrap();
        assert!(hex < trisect);

        let panel = gdml.find(r#"<volume name="dichroicon_panel_lv">"#).unwrap();
        let base = gdml.find(r#"<volume name="dichroicon_base_a_lv">"#).unwrap();
        let world = gdml.find(r#"<volume name="world">"#).unwrap();
        assert!(base < panel && panel < world);
    }

    #[test]
    fn test_rotation_written_inverted() {
        let store = GeoBuilder::with_default_factories()
            .build(&tables())
            .unwrap();
        let gdml = to_gdml_string(&store).unwrap();
        let line = gdml
            .lines()
            .find(|l| l.contains(r#"<rotation name="dichroicon_rot""#))
            .unwrap();

        let attr = |key: &str| -> f64 {
            let start = line.find(&format!(r#" {}=""#, key)).unwrap() + key.len() + 3;
            let end = start + line[start..].find('"').unwrap();
            line[start..end].parse().unwrap()
        };
        assert!(attr("x").abs() < 1e-6);
        assert!(attr("y").abs() < 1e-6);
        assert!((attr("z") + 30.0).abs() < 1e-6);
    }

    #[test]
    fn test_no_world() {
        let store = GeometryStore::new();
        assert!(matches!(
            to_gdml_string(&store),
            Err(DichroiconError::NoWorld)
        ));
    }
}
