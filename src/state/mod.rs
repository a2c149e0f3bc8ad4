//! 状态块
//!
//! 每个状态块持有自己的状态，并提供一个更新操作：
//! 读取同一份只读帧输入和自己上一帧的状态，写回新的状态。
//!
//! 更新模式 [`UpdateMode::Snapshot`] 表示历史已失效（例如实例休眠后恢复），
//! 所有插值直接吸附到目标。

mod feet;
mod in_air;
mod layering;
mod lean;
mod look;
mod on_ground;
mod pose;
mod rotate_in_place;
mod spine;
mod transitions;

pub use feet::{FeetState, FootSide, FootState};
pub use in_air::InAirState;
pub use layering::LayeringState;
pub use lean::LeanState;
pub use look::LookState;
pub use on_ground::{
    classify_movement_direction, HipsDirection, MovementDirection, OnGroundState,
    RotationYawOffsets, VelocityBlendState,
};
pub use pose::{GaitTiers, PoseState};
pub use rotate_in_place::RotateInPlaceState;
pub use spine::SpineRotationState;
pub use transitions::{
    select_dynamic_transition, select_quick_stop, TransitionRequest, TransitionSide,
    TransitionsState,
};

use crate::config::AnimConfig;
use crate::curves::CurveSource;
use crate::input::LocomotionSnapshot;

/// 插值模式
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UpdateMode {
    /// 正常平滑
    #[default]
    Smoothed,
    /// 历史无效，直接吸附到目标
    Snapshot,
}

impl UpdateMode {
    pub fn from_pending(pending_update: bool) -> Self {
        if pending_update {
            Self::Snapshot
        } else {
            Self::Smoothed
        }
    }

    #[inline]
    pub fn is_snapshot(self) -> bool {
        self == Self::Snapshot
    }
}

/// 一次状态块更新所需的只读输入
#[derive(Clone, Copy)]
pub struct FrameInput<'a> {
    pub snapshot: &'a LocomotionSnapshot,
    pub curves: &'a dyn CurveSource,
    pub config: &'a AnimConfig,
    pub delta_time: f32,
    pub mode: UpdateMode,
}

impl<'a> FrameInput<'a> {
    pub fn new(
        snapshot: &'a LocomotionSnapshot,
        curves: &'a dyn CurveSource,
        config: &'a AnimConfig,
        delta_time: f32,
        mode: UpdateMode,
    ) -> Self {
        Self {
            snapshot,
            curves,
            config,
            delta_time,
            mode,
        }
    }
}
