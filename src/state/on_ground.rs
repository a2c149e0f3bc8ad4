//! 地面运动
//!
//! 移动方向判定、速度混合、旋转偏移、冲刺计时、步幅与播放速率、加速度倾斜。
//! 转身（pivot）请求与髋部朝向在主线程写入。

use glam::Vec3;

use super::{FrameInput, LeanState, PoseState, UpdateMode};
use crate::curves::{names, CurveSource};
use crate::input::{Gait, LocomotionSnapshot};
use crate::math::{clamp01, clamp_magnitude01, interp_to, lerp, normalize_axis, SMALL_NUMBER};

/// 冲刺加速倾斜只在开始冲刺的这段时间内生效
const SPRINT_TIME_THRESHOLD: f32 = 0.5;

const FORWARD_HALF_ANGLE: f32 = 70.0;
const MOVEMENT_DIRECTION_THRESHOLD: f32 = 5.0;

/// 髋部朝向
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum HipsDirection {
    #[default]
    Forward,
    Backward,
    LeftForward,
    LeftBackward,
    RightForward,
    RightBackward,
}

/// 视角相对的移动方向
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MovementDirection {
    #[default]
    Forward,
    Backward,
    Left,
    Right,
}

impl MovementDirection {
    pub fn is_forward(self) -> bool {
        self == Self::Forward
    }

    pub fn is_backward(self) -> bool {
        self == Self::Backward
    }

    pub fn is_left(self) -> bool {
        self == Self::Left
    }

    pub fn is_right(self) -> bool {
        self == Self::Right
    }
}

/// 按角度划分移动方向，相邻区间有 `threshold` 的重叠带，前方优先
pub fn classify_movement_direction(angle: f32, forward_half_angle: f32, threshold: f32) -> MovementDirection {
    if angle >= -forward_half_angle - threshold && angle <= forward_half_angle + threshold {
        return MovementDirection::Forward;
    }

    if angle >= forward_half_angle - threshold && angle <= 180.0 - forward_half_angle + threshold {
        return MovementDirection::Right;
    }

    if angle <= -(forward_half_angle - threshold) && angle >= -(180.0 - forward_half_angle + threshold) {
        return MovementDirection::Left;
    }

    MovementDirection::Backward
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VelocityBlendState {
    pub reinitialization_required: bool,
    pub forward_amount: f32,
    pub backward_amount: f32,
    pub left_amount: f32,
    pub right_amount: f32,
}

impl Default for VelocityBlendState {
    fn default() -> Self {
        Self {
            reinitialization_required: true,
            forward_amount: 0.0,
            backward_amount: 0.0,
            left_amount: 0.0,
            right_amount: 0.0,
        }
    }
}

impl VelocityBlendState {
    /// 角色空间速度方向（按 L1 范数归一）拆成四个非负分量
    pub fn targets(relative_velocity: Vec3) -> [f32; 4] {
        let direction = relative_velocity.normalize_or_zero();
        let l1 = direction.x.abs() + direction.y.abs() + direction.z.abs();
        let relative = if l1 > SMALL_NUMBER { direction / l1 } else { Vec3::ZERO };

        [
            clamp01(relative.x),
            relative.x.clamp(-1.0, 0.0).abs(),
            relative.y.clamp(-1.0, 0.0).abs(),
            clamp01(relative.y),
        ]
    }

    fn update(&mut self, relative_velocity: Vec3, delta_time: f32, speed: f32, mode: UpdateMode) {
        self.reinitialization_required |= mode.is_snapshot();

        let [forward, backward, left, right] = Self::targets(relative_velocity);

        if self.reinitialization_required {
            self.reinitialization_required = false;

            self.forward_amount = forward;
            self.backward_amount = backward;
            self.left_amount = left;
            self.right_amount = right;
        } else {
            self.forward_amount = interp_to(self.forward_amount, forward, delta_time, speed);
            self.backward_amount = interp_to(self.backward_amount, backward, delta_time, speed);
            self.left_amount = interp_to(self.left_amount, left, delta_time, speed);
            self.right_amount = interp_to(self.right_amount, right, delta_time, speed);
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RotationYawOffsets {
    pub forward_angle: f32,
    pub backward_angle: f32,
    pub left_angle: f32,
    pub right_angle: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OnGroundState {
    pub hips_direction: HipsDirection,
    pub hips_direction_lock_amount: f32,

    pub pivot_activation_requested: bool,
    pub pivot_active: bool,

    pub movement_direction: MovementDirection,
    pub velocity_blend: VelocityBlendState,
    pub rotation_yaw_offsets: RotationYawOffsets,

    pub sprint_time: f32,
    pub sprint_acceleration_amount: f32,
    pub sprint_block_amount: f32,

    pub walk_run_blend_amount: f32,
    pub stride_blend_amount: f32,

    pub standing_play_rate: f32,
    pub crouching_play_rate: f32,
}

impl Default for OnGroundState {
    fn default() -> Self {
        Self {
            hips_direction: HipsDirection::Forward,
            hips_direction_lock_amount: 0.0,
            pivot_activation_requested: false,
            pivot_active: false,
            movement_direction: MovementDirection::Forward,
            velocity_blend: VelocityBlendState::default(),
            rotation_yaw_offsets: RotationYawOffsets::default(),
            sprint_time: 0.0,
            sprint_acceleration_amount: 0.0,
            sprint_block_amount: 0.0,
            walk_run_blend_amount: 0.0,
            stride_blend_amount: 0.0,
            standing_play_rate: 1.0,
            crouching_play_rate: 1.0,
        }
    }
}

impl OnGroundState {
    pub fn set_hips_direction(&mut self, direction: HipsDirection) {
        self.hips_direction = direction;
    }

    pub fn activate_pivot(&mut self) {
        self.pivot_activation_requested = true;
    }

    /// 主线程：消费转身请求
    pub fn update_main(&mut self, speed: f32, pivot_speed_threshold: f32, mode: UpdateMode) {
        self.pivot_active =
            self.pivot_activation_requested && !mode.is_snapshot() && speed < pivot_speed_threshold;
        self.pivot_activation_requested = false;
    }

    pub fn update(&mut self, frame: &FrameInput, pose: &PoseState, lean: &mut LeanState) {
        let snapshot = frame.snapshot;
        let config = frame.config;

        // 无论状态如何都要采样，否则惯性混合会错位
        self.sample_always_on_curves(frame.curves);

        if !snapshot.on_ground() {
            self.velocity_blend.reinitialization_required = true;
            self.sprint_time = 0.0;
            return;
        }

        if !snapshot.locomotion.moving {
            lean.reset(frame.delta_time, config.lean_interpolation_speed, frame.mode);
            return;
        }

        let relative_acceleration = relative_acceleration_amount(snapshot);

        self.movement_direction = if snapshot.gait == Gait::Sprinting {
            MovementDirection::Forward
        } else {
            classify_movement_direction(
                view_relative_velocity_yaw(snapshot),
                FORWARD_HALF_ANGLE,
                MOVEMENT_DIRECTION_THRESHOLD,
            )
        };

        self.velocity_blend.update(
            snapshot.locomotion.unrotate(snapshot.locomotion.velocity),
            frame.delta_time,
            config.velocity_blend_interpolation_speed,
            frame.mode,
        );

        let offset_yaw = view_relative_velocity_yaw(snapshot);
        self.rotation_yaw_offsets = RotationYawOffsets {
            forward_angle: config.rotation_yaw_offset_forward_curve.evaluate(offset_yaw),
            backward_angle: config.rotation_yaw_offset_backward_curve.evaluate(offset_yaw),
            left_angle: config.rotation_yaw_offset_left_curve.evaluate(offset_yaw),
            right_angle: config.rotation_yaw_offset_right_curve.evaluate(offset_yaw),
        };

        self.update_sprint(snapshot.gait, relative_acceleration, frame.delta_time, frame.mode);

        self.update_stride_blend_amount(frame, pose);
        self.walk_run_blend_amount = if snapshot.gait == Gait::Walking { 0.0 } else { 1.0 };

        self.update_play_rates(frame, pose);

        lean.approach(
            relative_acceleration,
            frame.delta_time,
            config.lean_interpolation_speed,
            frame.mode,
        );
    }

    fn sample_always_on_curves(&mut self, curves: &dyn CurveSource) {
        self.sprint_block_amount = curves.value_clamped01(names::SPRINT_BLOCK);
        self.hips_direction_lock_amount = curves.value(names::HIPS_DIRECTION_LOCK).clamp(-1.0, 1.0);
    }

    fn update_sprint(&mut self, gait: Gait, relative_acceleration: Vec3, delta_time: f32, mode: UpdateMode) {
        if gait != Gait::Sprinting {
            self.sprint_time = 0.0;
            self.sprint_acceleration_amount = 0.0;
            return;
        }

        self.sprint_time = if mode.is_snapshot() {
            SPRINT_TIME_THRESHOLD
        } else {
            self.sprint_time + delta_time
        };

        self.sprint_acceleration_amount = if self.sprint_time >= SPRINT_TIME_THRESHOLD {
            0.0
        } else {
            relative_acceleration.x
        };
    }

    fn update_stride_blend_amount(&mut self, frame: &FrameInput, pose: &PoseState) {
        let locomotion = &frame.snapshot.locomotion;
        let config = frame.config;

        let speed = if locomotion.scale > SMALL_NUMBER {
            locomotion.speed / locomotion.scale
        } else {
            locomotion.speed
        };

        let walk = config.stride_blend_walk_curve.evaluate(speed);
        let run = config.stride_blend_run_curve.evaluate(speed);

        let standing = lerp(walk, run, pose.unweighted_gait.running);
        self.stride_blend_amount = lerp(standing, walk, pose.crouching_amount);
    }

    fn update_play_rates(&mut self, frame: &FrameInput, pose: &PoseState) {
        let locomotion = &frame.snapshot.locomotion;
        let config = frame.config;
        let speed = locomotion.speed;

        let walk_run = lerp(
            speed / config.animated_walk_speed,
            speed / config.animated_run_speed,
            pose.unweighted_gait.running,
        );
        let walk_run_sprint = lerp(
            walk_run,
            speed / config.animated_sprint_speed,
            pose.unweighted_gait.sprinting,
        );

        let stride_scale = self.stride_blend_amount * locomotion.scale;

        self.standing_play_rate = if stride_scale > SMALL_NUMBER {
            (walk_run_sprint / stride_scale).clamp(0.0, 3.0)
        } else {
            0.0
        };

        let crouch_denominator = config.animated_crouch_speed * stride_scale;
        self.crouching_play_rate = if crouch_denominator > SMALL_NUMBER {
            (speed / crouch_denominator).clamp(0.0, 2.0)
        } else {
            0.0
        };
    }
}

/// 角色空间加速度，按最大加速度（同向）或最大制动减速度（反向）归一
fn relative_acceleration_amount(snapshot: &LocomotionSnapshot) -> Vec3 {
    let locomotion = &snapshot.locomotion;

    let limit = if locomotion.acceleration.dot(locomotion.velocity) >= 0.0 {
        locomotion.max_acceleration
    } else {
        locomotion.max_braking_deceleration
    };

    if limit <= SMALL_NUMBER {
        return Vec3::ZERO;
    }

    clamp_magnitude01(locomotion.unrotate(locomotion.acceleration) / limit)
}

fn view_relative_velocity_yaw(snapshot: &LocomotionSnapshot) -> f32 {
    normalize_axis(snapshot.locomotion.velocity_yaw - snapshot.view.rotation_yaw)
}
