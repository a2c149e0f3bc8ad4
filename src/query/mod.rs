//! 几何查询
//!
//! 扫掠与射线检测由外部碰撞世界提供，只读、同步，可在工作线程调用。

mod plane_world;

pub use plane_world::{Plane, PlaneWorld};

use glam::Vec3;

/// 查询通道
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum QueryChannel {
    /// 静态世界几何
    #[default]
    WorldStatic,
    /// 可见性（脚部 IK 默认通道）
    Visibility,
    Custom(u8),
}

/// 扫掠形状
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CollisionShape {
    Capsule { radius: f32, half_height: f32 },
    Sphere { radius: f32 },
}

/// 命中结果
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QueryHit {
    pub impact_point: Vec3,
    pub impact_normal: Vec3,
    /// 命中位置在起点到终点之间的比例 [0, 1]
    pub time: f32,
}

/// 几何查询服务
pub trait GeometryQuery: Send + Sync {
    fn sweep(
        &self,
        start: Vec3,
        end: Vec3,
        shape: CollisionShape,
        channel: QueryChannel,
    ) -> Option<QueryHit>;

    fn line_trace(&self, start: Vec3, end: Vec3, channel: QueryChannel) -> Option<QueryHit>;
}

/// 没有任何几何的空世界
#[derive(Clone, Copy, Debug, Default)]
pub struct EmptyWorld;

impl GeometryQuery for EmptyWorld {
    fn sweep(&self, _: Vec3, _: Vec3, _: CollisionShape, _: QueryChannel) -> Option<QueryHit> {
        None
    }

    fn line_trace(&self, _: Vec3, _: Vec3, _: QueryChannel) -> Option<QueryHit> {
        None
    }
}
