//! 曲线 / 骨骼 / 插槽名称表
//!
//! 动画资源上写入的曲线名与运行时采样的曲线名必须一致。

// ========== 姿态 ==========
pub const POSE_GAIT: &str = "PoseGait";
pub const POSE_MOVING: &str = "PoseMoving";
pub const POSE_STANDING: &str = "PoseStanding";
pub const POSE_CROUCHING: &str = "PoseCrouching";
pub const POSE_IN_AIR: &str = "PoseInAir";
pub const POSE_GROUNDED: &str = "PoseGrounded";

// ========== 脚部 ==========
pub const FOOT_LEFT_IK: &str = "FootLeftIk";
pub const FOOT_LEFT_LOCK: &str = "FootLeftLock";
pub const FOOT_RIGHT_IK: &str = "FootRightIk";
pub const FOOT_RIGHT_LOCK: &str = "FootRightLock";
pub const FOOT_PLANTED: &str = "FootPlanted";
pub const FEET_CROSSING: &str = "FeetCrossing";

// ========== 通用控制 ==========
pub const SPRINT_BLOCK: &str = "SprintBlock";
pub const HIPS_DIRECTION_LOCK: &str = "HipsDirectionLock";
pub const ALLOW_TRANSITIONS: &str = "AllowTransitions";
pub const GROUND_PREDICTION_BLOCK: &str = "GroundPredictionBlock";
pub const FOOTSTEP_SOUND_BLOCK: &str = "FootstepSoundBlock";
pub const VIEW_BLOCK: &str = "ViewBlock";
pub const ALLOW_AIMING: &str = "AllowAiming";

// ========== 分层 ==========
pub const LAYER_HEAD: &str = "LayerHead";
pub const LAYER_HEAD_ADDITIVE: &str = "LayerHeadAdditive";
pub const LAYER_HEAD_SLOT: &str = "LayerHeadSlot";

pub const LAYER_ARM_LEFT: &str = "LayerArmLeft";
pub const LAYER_ARM_LEFT_ADDITIVE: &str = "LayerArmLeftAdditive";
pub const LAYER_ARM_LEFT_SLOT: &str = "LayerArmLeftSlot";
pub const LAYER_ARM_LEFT_LOCAL_SPACE: &str = "LayerArmLeftLocalSpace";

pub const LAYER_ARM_RIGHT: &str = "LayerArmRight";
pub const LAYER_ARM_RIGHT_ADDITIVE: &str = "LayerArmRightAdditive";
pub const LAYER_ARM_RIGHT_SLOT: &str = "LayerArmRightSlot";
pub const LAYER_ARM_RIGHT_LOCAL_SPACE: &str = "LayerArmRightLocalSpace";

pub const LAYER_HAND_LEFT: &str = "LayerHandLeft";
pub const LAYER_HAND_RIGHT: &str = "LayerHandRight";

pub const LAYER_SPINE: &str = "LayerSpine";
pub const LAYER_SPINE_ADDITIVE: &str = "LayerSpineAdditive";
pub const LAYER_SPINE_SLOT: &str = "LayerSpineSlot";

pub const LAYER_PELVIS: &str = "LayerPelvis";
pub const LAYER_PELVIS_SLOT: &str = "LayerPelvisSlot";

pub const LAYER_LEGS: &str = "LayerLegs";
pub const LAYER_LEGS_SLOT: &str = "LayerLegsSlot";

pub const HAND_LEFT_IK: &str = "HandLeftIk";
pub const HAND_RIGHT_IK: &str = "HandRightIk";

// ========== 骨骼 / 插槽 ==========
pub const FOOT_LEFT_IK_BONE: &str = "ik_foot_l";
pub const FOOT_RIGHT_IK_BONE: &str = "ik_foot_r";
pub const FOOT_LEFT_VIRTUAL_BONE: &str = "VB foot_l";
pub const FOOT_RIGHT_VIRTUAL_BONE: &str = "VB foot_r";

/// 过渡动画播放插槽
pub const TRANSITION_SLOT: &str = "Transition";

/// 运动动画上需要写入的曲线
pub const HUMAN_CURVES: &[&str] = &[
    POSE_GAIT,
    POSE_MOVING,
    POSE_STANDING,
    POSE_CROUCHING,
    POSE_IN_AIR,
    POSE_GROUNDED,
    FOOT_LEFT_IK,
    FOOT_LEFT_LOCK,
    FOOT_RIGHT_IK,
    FOOT_RIGHT_LOCK,
    FOOT_PLANTED,
    FEET_CROSSING,
    SPRINT_BLOCK,
    ALLOW_TRANSITIONS,
    GROUND_PREDICTION_BLOCK,
    FOOTSTEP_SOUND_BLOCK,
];

/// 分层动画上需要写入的曲线
pub const LAYERING_CURVES: &[&str] = &[
    LAYER_HEAD,
    LAYER_HEAD_ADDITIVE,
    LAYER_ARM_LEFT,
    LAYER_ARM_LEFT_ADDITIVE,
    LAYER_ARM_LEFT_LOCAL_SPACE,
    LAYER_ARM_RIGHT,
    LAYER_ARM_RIGHT_ADDITIVE,
    LAYER_ARM_RIGHT_LOCAL_SPACE,
    LAYER_HAND_LEFT,
    LAYER_HAND_RIGHT,
    LAYER_SPINE,
    LAYER_SPINE_ADDITIVE,
    LAYER_PELVIS,
    LAYER_LEGS,
    HAND_LEFT_IK,
    HAND_RIGHT_IK,
    VIEW_BLOCK,
    ALLOW_AIMING,
    HIPS_DIRECTION_LOCK,
];

/// 插槽分层曲线
pub const LAYERING_SLOT_CURVES: &[&str] = &[
    LAYER_HEAD_SLOT,
    LAYER_ARM_LEFT_SLOT,
    LAYER_ARM_RIGHT_SLOT,
    LAYER_SPINE_SLOT,
    LAYER_PELVIS_SLOT,
    LAYER_LEGS_SLOT,
];
