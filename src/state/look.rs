//! 视线状态
//!
//! 按朝向模式求目标偏航/俯仰，再按方向感知的最短路径插值。
//! 偏航被拆成 前/左/右 三个权重，角色整圈转头时左右混合不会跳变。

use super::FrameInput;
use crate::math::{
    exponential_decay, lerp_angle, normalize_axis, COUNTER_CLOCKWISE_ROTATION_ANGLE_THRESHOLD,
    SMALL_NUMBER,
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LookState {
    pub reinitialization_required: bool,
    pub world_yaw: f32,
    /// 相对角色的偏航，(-180, 180]
    pub yaw: f32,
    pub pitch: f32,
    pub yaw_forward_amount: f32,
    pub yaw_left_amount: f32,
    pub yaw_right_amount: f32,
}

impl Default for LookState {
    fn default() -> Self {
        Self {
            reinitialization_required: true,
            world_yaw: 0.0,
            yaw: 0.0,
            pitch: 0.0,
            yaw_forward_amount: 0.5,
            yaw_left_amount: 0.5,
            yaw_right_amount: 0.5,
        }
    }
}

impl LookState {
    /// 下一次更新直接吸附到目标
    pub fn reinitialize(&mut self) {
        self.reinitialization_required = true;
    }

    pub fn update(&mut self, frame: &FrameInput) {
        let snapshot = frame.snapshot;
        let config = frame.config;

        self.reinitialization_required |= frame.mode.is_snapshot();

        let character_yaw = snapshot.locomotion.yaw;

        // 站在旋转平台上时保持相对平台的角度
        if snapshot.movement_base.has_relative_rotation {
            self.world_yaw = normalize_axis(self.world_yaw + snapshot.movement_base.delta_yaw);
        }

        let (target_yaw, target_pitch, interpolation_speed) = if snapshot.velocity_direction_mode() {
            (
                snapshot.desired_relative_yaw(),
                0.0,
                config.look_towards_input_yaw_interpolation_speed,
            )
        } else {
            (
                snapshot.view.yaw,
                snapshot.view.pitch,
                config.look_towards_camera_rotation_interpolation_speed,
            )
        };

        if self.reinitialization_required || interpolation_speed <= 0.0 {
            self.yaw = target_yaw;
            self.pitch = target_pitch;
        } else {
            let yaw = normalize_axis(self.world_yaw - character_yaw);
            let mut delta_yaw = normalize_axis(target_yaw - yaw);

            let yaw_speed = snapshot.locomotion.yaw_speed;
            if delta_yaw > 180.0 - COUNTER_CLOCKWISE_ROTATION_ANGLE_THRESHOLD {
                delta_yaw -= 360.0;
            } else if yaw_speed.abs() > SMALL_NUMBER && target_yaw.abs() > 90.0 {
                // 跟随角色转向，头和身体同向转
                delta_yaw = if yaw_speed > 0.0 {
                    delta_yaw.abs()
                } else {
                    -delta_yaw.abs()
                };
            }

            let alpha = exponential_decay(frame.delta_time, interpolation_speed);

            self.yaw = normalize_axis(yaw + delta_yaw * alpha);
            self.pitch = lerp_angle(self.pitch, target_pitch, alpha);
        }

        self.world_yaw = normalize_axis(character_yaw + self.yaw);

        self.yaw_forward_amount = self.yaw / 360.0 + 0.5;
        self.yaw_left_amount = 0.5 - (self.yaw_forward_amount - 0.5).abs();
        self.yaw_right_amount = 0.5 + (self.yaw_forward_amount - 0.5).abs();

        self.reinitialization_required = false;
    }
}
