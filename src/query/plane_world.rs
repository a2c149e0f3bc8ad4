//! 解析平面世界
//!
//! 由无限平面组成的简易碰撞世界，用于预览与测试。所有通道都会命中。

use glam::Vec3;

use super::{CollisionShape, GeometryQuery, QueryChannel, QueryHit};

/// 无限平面，法线指向可通行一侧
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane {
    pub point: Vec3,
    pub normal: Vec3,
}

impl Plane {
    pub fn new(point: Vec3, normal: Vec3) -> Self {
        let normal = normal.normalize_or_zero();
        Self {
            point,
            normal: if normal == Vec3::ZERO { Vec3::Z } else { normal },
        }
    }

    /// 水平地面
    pub fn ground(height: f32) -> Self {
        Self::new(Vec3::new(0.0, 0.0, height), Vec3::Z)
    }

    fn signed_distance(&self, point: Vec3) -> f32 {
        self.normal.dot(point - self.point)
    }

    fn project(&self, point: Vec3) -> Vec3 {
        point - self.normal * self.signed_distance(point)
    }
}

#[derive(Clone, Debug, Default)]
pub struct PlaneWorld {
    planes: Vec<Plane>,
}

impl PlaneWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_plane(mut self, plane: Plane) -> Self {
        self.planes.push(plane);
        self
    }

    pub fn add_plane(&mut self, plane: Plane) {
        self.planes.push(plane);
    }

    /// 以形状在法线方向上的半径做一次平面检测，返回最早命中
    fn cast(&self, start: Vec3, end: Vec3, extent: impl Fn(&Plane) -> f32) -> Option<QueryHit> {
        let delta = end - start;
        let mut best: Option<QueryHit> = None;

        for plane in &self.planes {
            let radius = extent(plane);
            let start_distance = plane.signed_distance(start) - radius;
            let approach = plane.normal.dot(delta);

            // 起点已在平面背面
            if plane.signed_distance(start) < 0.0 {
                continue;
            }

            let time = if start_distance <= 0.0 {
                0.0
            } else if approach < 0.0 {
                let t = start_distance / -approach;
                if t > 1.0 {
                    continue;
                }
                t
            } else {
                continue;
            };

            if best.map_or(true, |hit| time < hit.time) {
                let center = start + delta * time;
                best = Some(QueryHit {
                    impact_point: plane.project(center),
                    impact_normal: plane.normal,
                    time,
                });
            }
        }

        best
    }
}

impl GeometryQuery for PlaneWorld {
    fn sweep(
        &self,
        start: Vec3,
        end: Vec3,
        shape: CollisionShape,
        _channel: QueryChannel,
    ) -> Option<QueryHit> {
        self.cast(start, end, |plane| match shape {
            // 竖直胶囊：半高包含两端半球
            CollisionShape::Capsule {
                radius,
                half_height,
            } => radius + (half_height - radius).max(0.0) * plane.normal.z.abs(),
            CollisionShape::Sphere { radius } => radius,
        })
    }

    fn line_trace(&self, start: Vec3, end: Vec3, _channel: QueryChannel) -> Option<QueryHit> {
        self.cast(start, end, |_| 0.0)
    }
}
