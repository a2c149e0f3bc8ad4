//! 身体分层混合量

use crate::curves::{names, CurveSource};
use crate::math::is_full_weight;

/// 各身体部位的分层权重，全部直接来自动画曲线
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LayeringState {
    pub head_blend_amount: f32,
    pub head_additive_blend_amount: f32,
    pub head_slot_blend_amount: f32,

    pub arm_left_blend_amount: f32,
    pub arm_left_additive_blend_amount: f32,
    pub arm_left_slot_blend_amount: f32,
    pub arm_left_local_space_blend_amount: f32,
    pub arm_left_mesh_space_blend_amount: f32,

    pub arm_right_blend_amount: f32,
    pub arm_right_additive_blend_amount: f32,
    pub arm_right_slot_blend_amount: f32,
    pub arm_right_local_space_blend_amount: f32,
    pub arm_right_mesh_space_blend_amount: f32,

    pub hand_left_blend_amount: f32,
    pub hand_right_blend_amount: f32,

    pub spine_blend_amount: f32,
    pub spine_additive_blend_amount: f32,
    pub spine_slot_blend_amount: f32,

    pub pelvis_blend_amount: f32,
    pub pelvis_slot_blend_amount: f32,

    pub legs_blend_amount: f32,
    pub legs_slot_blend_amount: f32,
}

impl LayeringState {
    pub fn update(&mut self, curves: &dyn CurveSource) {
        self.head_blend_amount = curves.value(names::LAYER_HEAD);
        self.head_additive_blend_amount = curves.value(names::LAYER_HEAD_ADDITIVE);
        self.head_slot_blend_amount = curves.value(names::LAYER_HEAD_SLOT);

        // 局部空间权重未满时，剩余部分用网格空间
        self.arm_left_blend_amount = curves.value(names::LAYER_ARM_LEFT);
        self.arm_left_additive_blend_amount = curves.value(names::LAYER_ARM_LEFT_ADDITIVE);
        self.arm_left_slot_blend_amount = curves.value(names::LAYER_ARM_LEFT_SLOT);
        self.arm_left_local_space_blend_amount = curves.value(names::LAYER_ARM_LEFT_LOCAL_SPACE);
        self.arm_left_mesh_space_blend_amount = mesh_space_amount(self.arm_left_local_space_blend_amount);

        self.arm_right_blend_amount = curves.value(names::LAYER_ARM_RIGHT);
        self.arm_right_additive_blend_amount = curves.value(names::LAYER_ARM_RIGHT_ADDITIVE);
        self.arm_right_slot_blend_amount = curves.value(names::LAYER_ARM_RIGHT_SLOT);
        self.arm_right_local_space_blend_amount = curves.value(names::LAYER_ARM_RIGHT_LOCAL_SPACE);
        self.arm_right_mesh_space_blend_amount = mesh_space_amount(self.arm_right_local_space_blend_amount);

        self.hand_left_blend_amount = curves.value(names::LAYER_HAND_LEFT);
        self.hand_right_blend_amount = curves.value(names::LAYER_HAND_RIGHT);

        self.spine_blend_amount = curves.value(names::LAYER_SPINE);
        self.spine_additive_blend_amount = curves.value(names::LAYER_SPINE_ADDITIVE);
        self.spine_slot_blend_amount = curves.value(names::LAYER_SPINE_SLOT);

        self.pelvis_blend_amount = curves.value(names::LAYER_PELVIS);
        self.pelvis_slot_blend_amount = curves.value(names::LAYER_PELVIS_SLOT);

        self.legs_blend_amount = curves.value(names::LAYER_LEGS);
        self.legs_slot_blend_amount = curves.value(names::LAYER_LEGS_SLOT);
    }
}

fn mesh_space_amount(local_space_amount: f32) -> f32 {
    if is_full_weight(local_space_amount) {
        0.0
    } else {
        1.0
    }
}
