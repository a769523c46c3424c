//! # 刚体变换
//!
//! 3×3 旋转矩阵 + 平移向量，描述子体积在母体积坐标系中的摆放，
//! 以及布尔实体中第二个操作数相对第一个操作数的位置。
//!
//! ## 依赖关系
//! - 被 `models/solid.rs`、`models/volume.rs` 和 `geo/` 使用
//! - 无外部模块依赖

pub type Vec3 = [f64; 3];

/// 刚体变换：`p_parent = R · p_local + t`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform3D {
    /// 旋转矩阵（行优先）
    pub rotation: [[f64; 3]; 3],

    /// 平移 (mm)
    pub translation: Vec3,
}

impl Default for Transform3D {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform3D {
    pub fn identity() -> Self {
        Transform3D {
            rotation: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
            translation: [0.0, 0.0, 0.0],
        }
    }

    pub fn translation(x: f64, y: f64, z: f64) -> Self {
        Transform3D {
            translation: [x, y, z],
            ..Self::identity()
        }
    }

    /// 绕 z 轴旋转（弧度）
    pub fn rotation_z(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Transform3D {
            rotation: [[c, -s, 0.0], [s, c, 0.0], [0.0, 0.0, 1.0]],
            translation: [0.0, 0.0, 0.0],
        }
    }

    fn rotation_x(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Transform3D {
            rotation: [[1.0, 0.0, 0.0], [0.0, c, -s], [0.0, s, c]],
            translation: [0.0, 0.0, 0.0],
        }
    }

    fn rotation_y(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Transform3D {
            rotation: [[c, 0.0, s], [0.0, 1.0, 0.0], [-s, 0.0, c]],
            translation: [0.0, 0.0, 0.0],
        }
    }

    /// 依次绕 X、Y、Z 轴旋转（角度制）
    pub fn from_rotation_degrees(angles: Vec3) -> Self {
        let rx = Self::rotation_x(angles[0].to_radians());
        let ry = Self::rotation_y(angles[1].to_radians());
        let rz = Self::rotation_z(angles[2].to_radians());
        rz.then(&ry.then(&rx))
    }

    /// 设置平移部分
    pub fn with_translation(mut self, translation: Vec3) -> Self {
        self.translation = translation;
        self
    }

    /// 局部坐标 -> 父坐标
    pub fn apply(&self, p: Vec3) -> Vec3 {
        let r = &self.rotation;
        let t = &self.translation;
        [
            r[0][0] * p[0] + r[0][1] * p[1] + r[0][2] * p[2] + t[0],
            r[1][0] * p[0] + r[1][1] * p[1] + r[1][2] * p[2] + t[1],
            r[2][0] * p[0] + r[2][1] * p[1] + r[2][2] * p[2] + t[2],
        ]
    }

    /// 父坐标 -> 局部坐标
    pub fn apply_inverse(&self, p: Vec3) -> Vec3 {
        let r = &self.rotation;
        let d = [
            p[0] - self.translation[0],
            p[1] - self.translation[1],
            p[2] - self.translation[2],
        ];
        [
            r[0][0] * d[0] + r[1][0] * d[1] + r[2][0] * d[2],
            r[0][1] * d[0] + r[1][1] * d[1] + r[2][1] * d[2],
            r[0][2] * d[0] + r[1][2] * d[1] + r[2][2] * d[2],
        ]
    }

    /// 复合变换：先应用 `inner`，再应用 `self`
    pub fn then(&self, inner: &Transform3D) -> Transform3D {
        let a = &self.rotation;
        let b = &inner.rotation;
        let mut rotation = [[0.0; 3]; 3];
        for (i, row) in rotation.iter_mut().enumerate() {
            for (j, value) in row.iter_mut().enumerate() {
                *value = (0..3).map(|k| a[i][k] * b[k][j]).sum();
            }
        }
        Transform3D {
            rotation,
            translation: self.apply(inner.translation),
        }
    }

    /// 逆变换
    pub fn inverse(&self) -> Transform3D {
        let r = &self.rotation;
        let mut rotation = [[0.0; 3]; 3];
        for (i, row) in rotation.iter_mut().enumerate() {
            for (j, value) in row.iter_mut().enumerate() {
                *value = r[j][i];
            }
        }
        let inv = Transform3D {
            rotation,
            translation: [0.0, 0.0, 0.0],
        };
        let t = inv.apply(self.translation);
        inv.with_translation([-t[0], -t[1], -t[2]])
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    /// 分解为 `from_rotation_degrees` 约定下的 X、Y、Z 转角（弧度）
    pub fn euler_xyz(&self) -> Vec3 {
        let r = &self.rotation;
        let ry = (-r[2][0]).clamp(-1.0, 1.0).asin();
        if ry.cos().abs() > 1e-12 {
            let rx = r[2][1].atan2(r[2][2]);
            let rz = r[1][0].atan2(r[0][0]);
            [rx, ry, rz]
        } else {
            // 万向锁：把旋转全部归到 z 轴
            let rz = (-r[0][1]).atan2(r[1][1]);
            [0.0, ry, rz]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn close(a: Vec3, b: Vec3) -> bool {
        a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < 1e-9)
    }

    #[test]
    fn test_translation_apply() {
        let t = Transform3D::translation(1.0, 2.0, 3.0);
        assert!(close(t.apply([0.0, 0.0, 0.0]), [1.0, 2.0, 3.0]));
        assert!(close(t.apply_inverse([1.0, 2.0, 3.0]), [0.0, 0.0, 0.0]));
    }

    #[test]
    fn test_rotation_z_half_turn() {
        let t = Transform3D::rotation_z(PI).with_translation([10.0, 0.0, 0.0]);
        assert!(close(t.apply([1.0, 2.0, 5.0]), [9.0, -2.0, 5.0]));
        assert!(close(t.apply_inverse([9.0, -2.0, 5.0]), [1.0, 2.0, 5.0]));
    }

    #[test]
    fn test_compose_and_inverse() {
        let a = Transform3D::rotation_z(PI / 2.0).with_translation([1.0, 0.0, 0.0]);
        let b = Transform3D::translation(0.0, 3.0, -1.0);
        let ab = a.then(&b);
        let p = [0.5, -0.25, 2.0];
        assert!(close(ab.apply(p), a.apply(b.apply(p))));
        assert!(close(ab.inverse().apply(ab.apply(p)), p));
    }

    #[test]
    fn test_from_rotation_degrees_matches_euler() {
        let t = Transform3D::from_rotation_degrees([30.0, -20.0, 75.0]);
        let [rx, ry, rz] = t.euler_xyz();
        assert!((rx.to_degrees() - 30.0).abs() < 1e-9);
        assert!((ry.to_degrees() + 20.0).abs() < 1e-9);
        assert!((rz.to_degrees() - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_identity() {
        assert!(Transform3D::identity().is_identity());
        assert!(!Transform3D::translation(1.0, 0.0, 0.0).is_identity());
    }
}
