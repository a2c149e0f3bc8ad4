//! 角色协作者接口

use glam::Quat;

use super::snapshot::{
    Gait, LocomotionMode, LocomotionSnapshot, LocomotionState, MovementBaseSnapshot,
    RotationMode, Stance, ViewSnapshot,
};
use crate::math::Transform;

/// 角色 / 移动组件
///
/// 只在主线程阶段被访问。
pub trait CharacterSource {
    fn locomotion(&self) -> LocomotionState;
    fn view(&self) -> ViewSnapshot;
    fn movement_base(&self) -> MovementBaseSnapshot;

    fn locomotion_mode(&self) -> LocomotionMode;
    fn stance(&self) -> Stance;
    fn gait(&self) -> Gait;
    fn rotation_mode(&self) -> RotationMode;

    /// 距上次传送的时间（秒）
    fn time_since_teleport(&self) -> f32 {
        f32::MAX
    }

    fn actor_transform(&self) -> Transform;

    /// 骨骼网格组件的世界变换
    fn component_transform(&self) -> Transform;

    /// 网格是否使用绝对旋转（需要手动与角色同步）
    fn uses_absolute_rotation(&self) -> bool {
        false
    }

    /// 网格相对角色的基础旋转偏移
    fn base_rotation_offset(&self) -> Quat {
        Quat::IDENTITY
    }

    /// 设置网格组件的世界旋转
    fn set_component_rotation(&mut self, rotation: Quat);

    /// 骨骼插槽的世界变换，不存在时返回 `None`
    fn socket_transform(&self, name: &str) -> Option<Transform>;

    /// 采集一帧的只读快照
    fn snapshot(&self) -> LocomotionSnapshot {
        LocomotionSnapshot {
            locomotion: self.locomotion(),
            view: self.view(),
            movement_base: self.movement_base(),
            locomotion_mode: self.locomotion_mode(),
            stance: self.stance(),
            gait: self.gait(),
            rotation_mode: self.rotation_mode(),
            component_transform: self.component_transform(),
            time_since_teleport: self.time_since_teleport(),
        }
    }
}
