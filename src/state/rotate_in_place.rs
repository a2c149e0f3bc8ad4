//! 原地转身
//!
//! 仅在静止、着地且非速度朝向模式下生效。转得越快越远，脚锁屏蔽越强，避免腿部扭曲。

use super::FrameInput;
use crate::math::{interp_to, mapped_range_clamped};

const PLAY_RATE_INTERPOLATION_SPEED: f32 = 5.0;
const FOOT_LOCK_BLOCK_INTERPOLATION_SPEED: f32 = 5.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RotateInPlaceState {
    pub rotating_left: bool,
    pub rotating_right: bool,
    pub play_rate: f32,
    pub foot_lock_block_amount: f32,
}

impl Default for RotateInPlaceState {
    fn default() -> Self {
        Self {
            rotating_left: false,
            rotating_right: false,
            play_rate: 1.0,
            foot_lock_block_amount: 0.0,
        }
    }
}

impl RotateInPlaceState {
    pub fn update(&mut self, frame: &FrameInput) {
        let snapshot = frame.snapshot;
        let config = frame.config;
        let view = &snapshot.view;

        let allowed = !snapshot.locomotion.moving && snapshot.on_ground() && !snapshot.velocity_direction_mode();

        if allowed {
            self.rotating_left = view.yaw < -config.view_yaw_angle_threshold;
            self.rotating_right = view.yaw > config.view_yaw_angle_threshold;
        }

        if !allowed || !(self.rotating_left || self.rotating_right) {
            self.stop(frame);
            return;
        }

        let play_rate = mapped_range_clamped(
            config.reference_view_yaw_speed,
            config.rotate_in_place_play_rate,
            view.yaw_speed,
        );
        self.play_rate = self.approach(self.play_rate, play_rate, frame, PLAY_RATE_INTERPOLATION_SPEED);

        self.foot_lock_block_amount = if config.disable_foot_lock {
            1.0
        } else if view.yaw.abs() > config.foot_lock_block_view_yaw_angle_threshold {
            0.5
        } else if view.yaw_speed <= config.foot_lock_block_view_yaw_speed_threshold {
            0.0
        } else {
            self.approach(self.foot_lock_block_amount, 1.0, frame, FOOT_LOCK_BLOCK_INTERPOLATION_SPEED)
        };
    }

    fn stop(&mut self, frame: &FrameInput) {
        self.rotating_left = false;
        self.rotating_right = false;

        let base_rate = frame.config.rotate_in_place_play_rate.0;
        self.play_rate = self.approach(self.play_rate, base_rate, frame, PLAY_RATE_INTERPOLATION_SPEED);

        self.foot_lock_block_amount = 0.0;
    }

    fn approach(&self, current: f32, target: f32, frame: &FrameInput, speed: f32) -> f32 {
        if frame.mode.is_snapshot() {
            target
        } else {
            interp_to(current, target, frame.delta_time, speed)
        }
    }
}
