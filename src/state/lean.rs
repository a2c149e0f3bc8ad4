//! 身体倾斜量，地面与空中共用，每帧只有其中之一写入

use glam::Vec3;

use super::UpdateMode;
use crate::math::interp_to;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LeanState {
    pub right_amount: f32,
    pub forward_amount: f32,
}

impl LeanState {
    /// 向角色空间下的目标量（X 前 Y 右）插值
    pub fn approach(&mut self, target: Vec3, delta_time: f32, speed: f32, mode: UpdateMode) {
        if mode.is_snapshot() {
            self.right_amount = target.y;
            self.forward_amount = target.x;
        } else {
            self.right_amount = interp_to(self.right_amount, target.y, delta_time, speed);
            self.forward_amount = interp_to(self.forward_amount, target.x, delta_time, speed);
        }
    }

    /// 回到零
    pub fn reset(&mut self, delta_time: f32, speed: f32, mode: UpdateMode) {
        self.approach(Vec3::ZERO, delta_time, speed, mode);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approach_and_reset() {
        let mut lean = LeanState::default();
        lean.approach(Vec3::new(1.0, -0.5, 0.0), 0.1, 4.0, UpdateMode::Smoothed);
        assert!((lean.forward_amount - 0.4).abs() < 0.001);
        assert!((lean.right_amount - (-0.2)).abs() < 0.001);

        lean.reset(0.1, 4.0, UpdateMode::Snapshot);
        assert_eq!(lean, LeanState::default());
    }
}
