//! 脊柱反向旋转
//!
//! 允许时上半身向视角方向转，不允许时权重回落。进入比退出快。

use super::FrameInput;
use crate::math::{exponential_decay_to, lerp_angle};

const ENGAGE_INTERPOLATION_SPEED: f32 = 20.0;
const DISENGAGE_INTERPOLATION_SPEED: f32 = 10.0;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SpineRotationState {
    pub spine_rotation_allowed: bool,
    pub spine_amount: f32,
    pub start_yaw: f32,
    pub target_yaw: f32,
    pub current_yaw: f32,
    /// 乘以视角与瞄准权重后的最终偏航
    pub yaw: f32,
}

impl SpineRotationState {
    pub fn update(&mut self, frame: &FrameInput) {
        let allowed = !frame.snapshot.velocity_direction_mode();
        let snapshot_mode = frame.mode.is_snapshot();

        if self.spine_rotation_allowed != allowed {
            self.spine_rotation_allowed = allowed;
            self.start_yaw = self.current_yaw;
        }

        if self.spine_rotation_allowed {
            self.spine_amount = if snapshot_mode {
                1.0
            } else {
                exponential_decay_to(self.spine_amount, 1.0, frame.delta_time, ENGAGE_INTERPOLATION_SPEED)
            };
            self.target_yaw = frame.snapshot.view.yaw;
        } else {
            self.spine_amount = if snapshot_mode {
                0.0
            } else {
                exponential_decay_to(self.spine_amount, 0.0, frame.delta_time, DISENGAGE_INTERPOLATION_SPEED)
            };
        }

        self.current_yaw = lerp_angle(self.start_yaw, self.target_yaw, self.spine_amount);

        let view = &frame.snapshot.view;
        self.yaw = self.current_yaw * (view.view_amount * view.aiming_amount);
    }
}
