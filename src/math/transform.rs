//! 刚体变换（平移 + 旋转 + 缩放）

use glam::{Mat4, Quat, Vec3};

/// 世界或组件空间中的变换
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn new(translation: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            translation,
            rotation,
            scale,
        }
    }

    pub fn from_translation_rotation(translation: Vec3, rotation: Quat) -> Self {
        Self::new(translation, rotation, Vec3::ONE)
    }

    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }

    /// 局部点 -> 外部空间
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.rotation * (point * self.scale) + self.translation
    }

    /// 外部空间点 -> 局部
    pub fn inverse_transform_point(&self, point: Vec3) -> Vec3 {
        let local = self.rotation.inverse() * (point - self.translation);
        local * safe_reciprocal(self.scale)
    }

    pub fn transform_rotation(&self, rotation: Quat) -> Quat {
        (self.rotation * rotation).normalize()
    }

    pub fn inverse_transform_rotation(&self, rotation: Quat) -> Quat {
        (self.rotation.inverse() * rotation).normalize()
    }

    /// 以 X 轴为前方的偏航角（度）
    pub fn yaw(&self) -> f32 {
        let forward = self.rotation * Vec3::X;
        forward.y.atan2(forward.x).to_degrees()
    }
}

fn safe_reciprocal(scale: Vec3) -> Vec3 {
    Vec3::new(
        if scale.x.abs() > f32::EPSILON { 1.0 / scale.x } else { 0.0 },
        if scale.y.abs() > f32::EPSILON { 1.0 / scale.y } else { 0.0 },
        if scale.z.abs() > f32::EPSILON { 1.0 / scale.z } else { 0.0 },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_round_trip_with_rotation_and_scale() {
        let transform = Transform::new(
            Vec3::new(100.0, -50.0, 10.0),
            Quat::from_rotation_z(45f32.to_radians()),
            Vec3::splat(2.0),
        );
        let point = Vec3::new(3.0, 4.0, 5.0);
        let world = transform.transform_point(point);
        let back = transform.inverse_transform_point(world);
        assert!((back - point).length() < 0.001);

        let matrix_world = transform.to_matrix().transform_point3(point);
        assert!((matrix_world - world).length() < 0.001);
    }

    #[test]
    fn test_yaw() {
        let transform =
            Transform::from_translation_rotation(Vec3::ZERO, Quat::from_rotation_z(90f32.to_radians()));
        assert!((transform.yaw() - 90.0).abs() < 0.001);
    }
}
