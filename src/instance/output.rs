//! 对外发布的帧结果
//!
//! 每次并行阶段结束后整体替换，任何线程可读。

use std::sync::{Arc, PoisonError, RwLock};

use glam::{Quat, Vec2, Vec3};

use crate::state::{
    FeetState, InAirState, LayeringState, LeanState, LookState, OnGroundState, PoseState,
    RotateInPlaceState, SpineRotationState, TransitionsState,
};

/// 控制绑定（IK rig）输入
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControlRigInput {
    pub use_hand_ik_bones: bool,
    pub use_foot_ik_bones: bool,
    pub velocity_blend_forward_amount: f32,
    pub velocity_blend_backward_amount: f32,
    pub spine_yaw_angle: f32,
    pub foot_left_ik_rotation: Quat,
    pub foot_left_ik_location: Vec3,
    pub foot_left_ik_amount: f32,
    pub foot_right_ik_rotation: Quat,
    pub foot_right_ik_location: Vec3,
    pub foot_right_ik_amount: f32,
    pub min_max_pelvis_offset_z: Vec2,
}

impl Default for ControlRigInput {
    fn default() -> Self {
        Self {
            use_hand_ik_bones: true,
            use_foot_ik_bones: true,
            velocity_blend_forward_amount: 0.0,
            velocity_blend_backward_amount: 0.0,
            spine_yaw_angle: 0.0,
            foot_left_ik_rotation: Quat::IDENTITY,
            foot_left_ik_location: Vec3::ZERO,
            foot_left_ik_amount: 0.0,
            foot_right_ik_rotation: Quat::IDENTITY,
            foot_right_ik_location: Vec3::ZERO,
            foot_right_ik_amount: 0.0,
            min_max_pelvis_offset_z: Vec2::ZERO,
        }
    }
}

/// 所有状态块的副本
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnimStateSnapshot {
    pub layering: LayeringState,
    pub pose: PoseState,
    pub look: LookState,
    pub spine: SpineRotationState,
    pub lean: LeanState,
    pub on_ground: OnGroundState,
    pub in_air: InAirState,
    pub feet: FeetState,
    pub transitions: TransitionsState,
    pub rotate_in_place: RotateInPlaceState,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PublishedState {
    pub control_rig: ControlRigInput,
    pub states: AnimStateSnapshot,
    /// 已发布的帧数
    pub frame: u64,
}

pub type SharedPublishedState = Arc<RwLock<PublishedState>>;

/// 只读访问已发布状态
pub trait PublishedStateReader: Send + Sync {
    fn published_state(&self) -> PublishedState;

    fn control_rig_input(&self) -> ControlRigInput {
        self.published_state().control_rig
    }
}

impl PublishedStateReader for RwLock<PublishedState> {
    fn published_state(&self) -> PublishedState {
        self.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn control_rig_input(&self) -> ControlRigInput {
        self.read().unwrap_or_else(PoisonError::into_inner).control_rig
    }
}
