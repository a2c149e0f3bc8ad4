//! 过渡动画
//!
//! 动态过渡：静止时脚部目标与锁定点偏离过大，选一侧纠正动画放入信箱，
//! 主线程阶段播放。急停：按当前朝向与期望方向的夹角选左右并调整播放速率。

use super::{FeetState, FrameInput};
use crate::config::{AnimConfig, TransitionClips};
use crate::curves::names;
use crate::input::{LocomotionSnapshot, Stance};
use crate::math::{is_full_weight, is_relevant, lerp, COUNTER_CLOCKWISE_ROTATION_ANGLE_THRESHOLD};
use crate::playback::{AnimClip, AnimationPlayback, SlotPlayRequest, TransitionMailbox};

/// 触发动态过渡后屏蔽的帧数，给动画图留出反应时间
const DYNAMIC_TRANSITION_FRAME_DELAY: u32 = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransitionSide {
    Left,
    Right,
}

impl TransitionSide {
    pub fn clip(self, clips: &TransitionClips, stance: Stance) -> Option<&AnimClip> {
        let crouching = stance == Stance::Crouching;
        match self {
            Self::Left => clips.left(crouching),
            Self::Right => clips.right(crouching),
        }
    }
}

/// 一次过渡动画的播放参数
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionRequest {
    pub side: TransitionSide,
    pub blend_in: f32,
    pub blend_out: f32,
    pub play_rate: f32,
    pub start_time: f32,
}

impl TransitionRequest {
    pub fn to_slot_request(&self, clip: AnimClip) -> SlotPlayRequest {
        SlotPlayRequest {
            clip,
            slot: names::TRANSITION_SLOT.to_string(),
            blend_in: self.blend_in,
            blend_out: self.blend_out,
            play_rate: self.play_rate,
            loop_count: 1,
            start_time: self.start_time,
        }
    }
}

/// 急停：非速度朝向模式固定播左侧最低速率；
/// 否则按期望方向夹角选边，速率随夹角线性增大
pub fn select_quick_stop(snapshot: &LocomotionSnapshot, config: &AnimConfig) -> TransitionRequest {
    let (min_rate, max_rate) = config.quick_stop_play_rate;

    let (side, play_rate) = if !snapshot.velocity_direction_mode() {
        (TransitionSide::Left, min_rate)
    } else {
        let mut yaw = snapshot.desired_relative_yaw();
        if yaw > 180.0 - COUNTER_CLOCKWISE_ROTATION_ANGLE_THRESHOLD {
            yaw -= 360.0;
        }

        let side = if yaw <= 0.0 {
            TransitionSide::Left
        } else {
            TransitionSide::Right
        };
        (side, lerp(min_rate, max_rate, yaw.abs() / 180.0))
    };

    TransitionRequest {
        side,
        blend_in: config.quick_stop_blend_in_duration,
        blend_out: config.quick_stop_blend_out_duration,
        play_rate,
        start_time: config.quick_stop_start_time,
    }
}

/// 比较两脚目标与锁定点的距离，超过阈值的一侧需要纠正；两侧都超过时取偏离更大者，相等取左
pub fn select_dynamic_transition(feet: &FeetState, threshold: f32) -> Option<TransitionSide> {
    let threshold_squared = threshold * threshold;

    let left_distance_squared = feet.left.target_location.distance_squared(feet.left.lock_location);
    let right_distance_squared = feet.right.target_location.distance_squared(feet.right.lock_location);

    let left_allowed = is_relevant(feet.left.lock_amount) && left_distance_squared > threshold_squared;
    let right_allowed = is_relevant(feet.right.lock_amount) && right_distance_squared > threshold_squared;

    match (left_allowed, right_allowed) {
        (false, false) => None,
        (true, false) => Some(TransitionSide::Left),
        (false, true) => Some(TransitionSide::Right),
        (true, true) if left_distance_squared >= right_distance_squared => Some(TransitionSide::Left),
        (true, true) => Some(TransitionSide::Right),
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransitionsState {
    pub transitions_allowed: bool,
    pub dynamic_transitions_frame_delay: u32,
    pub queued_dynamic_transition: TransitionMailbox,
}

impl TransitionsState {
    /// 返回本帧是否有新的动态过渡入队
    pub fn update(&mut self, frame: &FrameInput, feet: &FeetState) -> bool {
        // 该曲线只在特定状态内为满值
        self.transitions_allowed = is_full_weight(frame.curves.value(names::ALLOW_TRANSITIONS));

        self.update_dynamic_transition(frame, feet)
    }

    fn update_dynamic_transition(&mut self, frame: &FrameInput, feet: &FeetState) -> bool {
        if self.dynamic_transitions_frame_delay > 0 {
            self.dynamic_transitions_frame_delay -= 1;
            return false;
        }

        let snapshot = frame.snapshot;
        if !self.transitions_allowed || snapshot.locomotion.moving || !snapshot.on_ground() {
            return false;
        }

        let threshold = frame.config.dynamic_transition_foot_lock_distance_threshold * snapshot.locomotion.scale;

        let Some(side) = select_dynamic_transition(feet, threshold) else {
            return false;
        };

        let Some(clip) = side.clip(&frame.config.dynamic_transition_clips, snapshot.stance) else {
            return false;
        };

        self.dynamic_transitions_frame_delay = DYNAMIC_TRANSITION_FRAME_DELAY;
        self.queued_dynamic_transition.post(clip.clone());

        log::debug!("动态过渡入队: {} ({:?})", clip, side);
        true
    }

    /// 主线程：播放信箱中的动态过渡，最多一次
    pub fn play_queued(&mut self, playback: &mut dyn AnimationPlayback, config: &AnimConfig) -> bool {
        let Some(clip) = self.queued_dynamic_transition.take() else {
            return false;
        };

        log::debug!("播放动态过渡: {}", clip);

        playback.play_slot(SlotPlayRequest {
            clip,
            slot: names::TRANSITION_SLOT.to_string(),
            blend_in: config.dynamic_transition_blend_duration,
            blend_out: config.dynamic_transition_blend_duration,
            play_rate: config.dynamic_transition_play_rate,
            loop_count: 1,
            start_time: 0.0,
        });
        true
    }
}
