//! 每帧输入快照
//!
//! 坐标系：Z 向上，X 向前，Y 向右；角度单位为度，距离单位为厘米。

use glam::{Quat, Vec3};

use crate::math::Transform;

/// 支撑状态
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LocomotionMode {
    #[default]
    OnGround,
    InAir,
    InWater,
    Custom,
}

/// 姿态
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Stance {
    #[default]
    Standing,
    Crouching,
}

/// 步态
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Gait {
    #[default]
    Walking,
    Running,
    Sprinting,
}

/// 朝向模式
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RotationMode {
    /// 朝向移动方向
    #[default]
    VelocityDirection,
    /// 朝向视角方向
    ViewDirection,
    /// 瞄准
    Aiming,
}

/// 移动组件状态
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LocomotionState {
    pub location: Vec3,
    pub rotation: Quat,
    /// 角色偏航角
    pub yaw: f32,
    pub velocity: Vec3,
    pub acceleration: Vec3,
    pub speed: f32,
    /// 统一缩放
    pub scale: f32,
    pub capsule_radius: f32,
    pub capsule_half_height: f32,
    /// 可行走地面法线 Z 的下限
    pub walkable_floor_z: f32,
    pub max_acceleration: f32,
    pub max_braking_deceleration: f32,
    /// 偏航角速度（度/秒）
    pub yaw_speed: f32,
    pub velocity_yaw: f32,
    pub has_input: bool,
    pub input_yaw: f32,
    pub target_yaw: f32,
    pub moving: bool,
    pub moving_smooth: bool,
}

impl Default for LocomotionState {
    fn default() -> Self {
        Self {
            location: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            yaw: 0.0,
            velocity: Vec3::ZERO,
            acceleration: Vec3::ZERO,
            speed: 0.0,
            scale: 1.0,
            capsule_radius: 30.0,
            capsule_half_height: 90.0,
            walkable_floor_z: 0.71,
            max_acceleration: 2000.0,
            max_braking_deceleration: 2000.0,
            yaw_speed: 0.0,
            velocity_yaw: 0.0,
            has_input: false,
            input_yaw: 0.0,
            target_yaw: 0.0,
            moving: false,
            moving_smooth: false,
        }
    }
}

impl LocomotionState {
    /// 世界向量 -> 角色空间
    pub fn unrotate(&self, v: Vec3) -> Vec3 {
        self.rotation.inverse() * v
    }
}

/// 视角状态
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewSnapshot {
    /// 视角世界偏航
    pub rotation_yaw: f32,
    pub rotation_pitch: f32,
    /// 相对角色的偏航
    pub yaw: f32,
    pub pitch: f32,
    pub yaw_speed: f32,
    pub view_amount: f32,
    pub aiming_amount: f32,
}

impl Default for ViewSnapshot {
    fn default() -> Self {
        Self {
            rotation_yaw: 0.0,
            rotation_pitch: 0.0,
            yaw: 0.0,
            pitch: 0.0,
            yaw_speed: 0.0,
            view_amount: 1.0,
            aiming_amount: 1.0,
        }
    }
}

/// 移动平台（支撑物）状态
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MovementBaseSnapshot {
    pub has_relative_location: bool,
    pub has_relative_rotation: bool,
    pub location: Vec3,
    pub rotation: Quat,
    /// 本帧平台偏航变化
    pub delta_yaw: f32,
    pub base_changed: bool,
}

impl Default for MovementBaseSnapshot {
    fn default() -> Self {
        Self {
            has_relative_location: false,
            has_relative_rotation: false,
            location: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            delta_yaw: 0.0,
            base_changed: false,
        }
    }
}

/// 一帧的完整输入快照
///
/// 主线程阶段采集，之后在同一帧内只读。
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LocomotionSnapshot {
    pub locomotion: LocomotionState,
    pub view: ViewSnapshot,
    pub movement_base: MovementBaseSnapshot,
    pub locomotion_mode: LocomotionMode,
    pub stance: Stance,
    pub gait: Gait,
    pub rotation_mode: RotationMode,
    /// 骨骼网格组件的世界变换
    pub component_transform: Transform,
    /// 距上次传送的时间（秒）
    pub time_since_teleport: f32,
}

impl Default for LocomotionSnapshot {
    fn default() -> Self {
        Self {
            locomotion: LocomotionState::default(),
            view: ViewSnapshot::default(),
            movement_base: MovementBaseSnapshot::default(),
            locomotion_mode: LocomotionMode::default(),
            stance: Stance::default(),
            gait: Gait::default(),
            rotation_mode: RotationMode::default(),
            component_transform: Transform::IDENTITY,
            time_since_teleport: f32::MAX,
        }
    }
}

impl LocomotionSnapshot {
    pub fn on_ground(&self) -> bool {
        self.locomotion_mode == LocomotionMode::OnGround
    }

    pub fn in_air(&self) -> bool {
        self.locomotion_mode == LocomotionMode::InAir
    }

    pub fn velocity_direction_mode(&self) -> bool {
        self.rotation_mode == RotationMode::VelocityDirection
    }

    /// 有输入时取输入偏航，否则取目标偏航，转为角色相对角度
    pub fn desired_relative_yaw(&self) -> f32 {
        let yaw = if self.locomotion.has_input {
            self.locomotion.input_yaw
        } else {
            self.locomotion.target_yaw
        };
        crate::math::normalize_axis(yaw - self.locomotion.yaw)
    }
}
