//! 姿态混合量
//!
//! 步态曲线取值 [0, 3]，按 走/跑/冲刺 三段拆分成三个 [0, 1] 的分量。

use crate::curves::{names, CurveSource};
use crate::math::clamp01;

/// 步态分段
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GaitTiers {
    pub walking: f32,
    pub running: f32,
    pub sprinting: f32,
}

impl GaitTiers {
    pub fn from_gait_amount(gait_amount: f32) -> Self {
        Self {
            walking: clamp01(gait_amount),
            running: clamp01(gait_amount - 1.0),
            sprinting: clamp01(gait_amount - 2.0),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PoseState {
    pub grounded_amount: f32,
    pub in_air_amount: f32,
    pub standing_amount: f32,
    pub crouching_amount: f32,
    pub moving_amount: f32,

    pub gait_amount: f32,
    pub gait: GaitTiers,

    /// 除以落地权重后的步态值
    pub unweighted_gait_amount: f32,
    pub unweighted_gait: GaitTiers,
}

impl PoseState {
    pub fn update(&mut self, curves: &dyn CurveSource) {
        self.grounded_amount = curves.value(names::POSE_GROUNDED);
        self.in_air_amount = curves.value(names::POSE_IN_AIR);

        self.standing_amount = curves.value(names::POSE_STANDING);
        self.crouching_amount = curves.value(names::POSE_CROUCHING);

        self.moving_amount = curves.value(names::POSE_MOVING);

        self.gait_amount = curves.value(names::POSE_GAIT).clamp(0.0, 3.0);
        self.gait = GaitTiers::from_gait_amount(self.gait_amount);

        // 落地过渡一开始就拿到完整步态值
        self.unweighted_gait_amount = if self.grounded_amount > 0.0 {
            self.gait_amount / self.grounded_amount
        } else {
            self.gait_amount
        };
        self.unweighted_gait = GaitTiers::from_gait_amount(self.unweighted_gait_amount);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curves::CurveValues;

    #[test]
    fn test_gait_tiers_at_integer_points() {
        let at = |g: f32| GaitTiers::from_gait_amount(g);

        assert_eq!(at(0.0), GaitTiers { walking: 0.0, running: 0.0, sprinting: 0.0 });
        assert_eq!(at(1.0), GaitTiers { walking: 1.0, running: 0.0, sprinting: 0.0 });
        assert_eq!(at(2.0), GaitTiers { walking: 1.0, running: 1.0, sprinting: 0.0 });
        assert_eq!(at(3.0), GaitTiers { walking: 1.0, running: 1.0, sprinting: 1.0 });
    }

    #[test]
    fn test_gait_tiers_monotonic() {
        let mut previous = GaitTiers::default();
        for i in 0..=300 {
            let tiers = GaitTiers::from_gait_amount(i as f32 * 0.01);
            assert!(tiers.walking >= previous.walking);
            assert!(tiers.running >= previous.running);
            assert!(tiers.sprinting >= previous.sprinting);
            // 高一级分量非零时低一级必为满
            if tiers.running > 0.0 {
                assert_eq!(tiers.walking, 1.0);
            }
            if tiers.sprinting > 0.0 {
                assert_eq!(tiers.running, 1.0);
            }
            previous = tiers;
        }
    }

    #[test]
    fn test_unweighted_gait() {
        let curves = CurveValues::new()
            .with(names::POSE_GAIT, 1.0)
            .with(names::POSE_GROUNDED, 0.5);
        let mut pose = PoseState::default();
        pose.update(&curves);

        assert!((pose.unweighted_gait_amount - 2.0).abs() < 0.001);
        assert_eq!(pose.unweighted_gait.running, 1.0);
        assert_eq!(pose.gait.running, 0.0);
    }

    #[test]
    fn test_unweighted_gait_without_grounded() {
        let curves = CurveValues::new().with(names::POSE_GAIT, 5.0);
        let mut pose = PoseState::default();
        pose.update(&curves);

        assert_eq!(pose.gait_amount, 3.0);
        assert_eq!(pose.unweighted_gait_amount, 3.0);
    }
}
