//! 动画参数配置
//!
//! 所有参数扁平化。新实例构造时复制一份进程级默认配置，
//! 之后实例持有自己的副本。

use std::sync::{Arc, PoisonError, RwLock};

use once_cell::sync::Lazy;

use crate::math::{BezierEase, CurveKey, KeyedCurve, ResponseCurve};
use crate::playback::AnimClip;
use crate::query::QueryChannel;
use crate::{LocomotionError, Result};

/// 共享的响应曲线
pub type SharedCurve = Arc<dyn ResponseCurve>;

/// 左右 × 站立/蹲伏 四个过渡动画
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransitionClips {
    pub standing_left: Option<AnimClip>,
    pub standing_right: Option<AnimClip>,
    pub crouching_left: Option<AnimClip>,
    pub crouching_right: Option<AnimClip>,
}

impl TransitionClips {
    pub fn left(&self, crouching: bool) -> Option<&AnimClip> {
        if crouching {
            self.crouching_left.as_ref()
        } else {
            self.standing_left.as_ref()
        }
    }

    pub fn right(&self, crouching: bool) -> Option<&AnimClip> {
        if crouching {
            self.crouching_right.as_ref()
        } else {
            self.standing_right.as_ref()
        }
    }
}

/// 动画配置（扁平化，不嵌套）
#[derive(Debug, Clone)]
pub struct AnimConfig {
    // ========== 视线 ==========
    /// 朝向视角时的视线插值速度，默认 8.0
    pub look_towards_camera_rotation_interpolation_speed: f32,
    /// 朝向输入方向时的视线插值速度，默认 8.0
    pub look_towards_input_yaw_interpolation_speed: f32,
    /// 并行阶段是否自动更新视线，默认 true
    /// 关闭后由动画图每帧调用一次 `update_look`
    pub update_look_in_parallel: bool,

    // ========== 倾斜 ==========
    /// 倾斜插值速度，默认 4.0
    pub lean_interpolation_speed: f32,

    // ========== 地面 ==========
    /// 步幅混合曲线（走），以 速度/缩放 为输入
    pub stride_blend_walk_curve: SharedCurve,
    /// 步幅混合曲线（跑）
    pub stride_blend_run_curve: SharedCurve,
    /// 旋转偏航偏移曲线，以视角相对的速度偏航为输入
    pub rotation_yaw_offset_forward_curve: SharedCurve,
    pub rotation_yaw_offset_backward_curve: SharedCurve,
    pub rotation_yaw_offset_left_curve: SharedCurve,
    pub rotation_yaw_offset_right_curve: SharedCurve,
    /// 速度混合插值速度，默认 12.0
    pub velocity_blend_interpolation_speed: f32,
    /// 低于此速度才允许转身（pivot），默认 200.0
    pub pivot_activation_speed_threshold: f32,
    /// 动画本身的移动速度
    pub animated_walk_speed: f32,
    pub animated_run_speed: f32,
    pub animated_sprint_speed: f32,
    pub animated_crouch_speed: f32,

    // ========== 空中 ==========
    /// 空中倾斜曲线，以垂直速度为输入
    pub in_air_lean_curve: SharedCurve,
    /// 落地预测曲线，以扫掠命中比例为输入
    pub ground_prediction_curve: SharedCurve,

    // ========== 脚部 ==========
    /// 使用 IK 骨骼（否则使用虚拟骨骼），默认 true
    pub use_foot_ik_bones: bool,
    /// 全局禁用脚锁，默认 false
    pub disable_foot_lock: bool,
    /// 脚踝到地面的高度，默认 13.5
    pub foot_height: f32,
    pub ik_trace_channel: QueryChannel,
    /// 脚部射线向上 / 向下距离，默认 50 / 45
    pub ik_trace_distance_upward: f32,
    pub ik_trace_distance_downward: f32,

    // ========== 手部 ==========
    pub use_hand_ik_bones: bool,

    // ========== 过渡 ==========
    pub quick_stop_blend_in_duration: f32,
    pub quick_stop_blend_out_duration: f32,
    /// 急停播放速率区间 (最小, 最大)
    pub quick_stop_play_rate: (f32, f32),
    pub quick_stop_start_time: f32,
    pub transition_clips: TransitionClips,

    /// 脚锁偏离超过此距离才触发动态过渡，默认 8.0
    pub dynamic_transition_foot_lock_distance_threshold: f32,
    pub dynamic_transition_blend_duration: f32,
    pub dynamic_transition_play_rate: f32,
    pub dynamic_transition_clips: TransitionClips,

    // ========== 原地转身 ==========
    /// 视角偏航超过此角度开始原地转身，默认 50.0
    pub view_yaw_angle_threshold: f32,
    /// 视角偏航角速度参考区间
    pub reference_view_yaw_speed: (f32, f32),
    /// 原地转身播放速率区间
    pub rotate_in_place_play_rate: (f32, f32),
    /// 视角偏航超过此角度时脚锁屏蔽 0.5，默认 120.0
    pub foot_lock_block_view_yaw_angle_threshold: f32,
    /// 视角角速度低于此值时不屏蔽脚锁，默认 620.0
    pub foot_lock_block_view_yaw_speed_threshold: f32,
}

fn linear_curve(points: &[(f32, f32)]) -> SharedCurve {
    match KeyedCurve::from_points(points) {
        Ok(curve) => Arc::new(curve),
        Err(_) => Arc::new(KeyedCurve::constant_value(0.0)),
    }
}

fn eased_curve(from: (f32, f32), to: (f32, f32)) -> SharedCurve {
    let keys = vec![
        CurveKey::eased(from.0, from.1, BezierEase::ease_in_out()),
        CurveKey::linear(to.0, to.1),
    ];
    match KeyedCurve::new(keys) {
        Ok(curve) => Arc::new(curve),
        Err(_) => Arc::new(KeyedCurve::constant_value(from.1)),
    }
}

impl Default for AnimConfig {
    fn default() -> Self {
        Self {
            look_towards_camera_rotation_interpolation_speed: 8.0,
            look_towards_input_yaw_interpolation_speed: 8.0,
            update_look_in_parallel: true,

            lean_interpolation_speed: 4.0,

            // 走路动画在 150 时步幅最大，跑步动画在 350 时最大
            stride_blend_walk_curve: linear_curve(&[(0.0, 0.2), (150.0, 1.0)]),
            stride_blend_run_curve: linear_curve(&[(0.0, 0.2), (350.0, 1.0)]),
            // 默认不做旋转偏移，需要时换成美术曲线
            rotation_yaw_offset_forward_curve: Arc::new(KeyedCurve::constant_value(0.0)),
            rotation_yaw_offset_backward_curve: Arc::new(KeyedCurve::constant_value(0.0)),
            rotation_yaw_offset_left_curve: Arc::new(KeyedCurve::constant_value(0.0)),
            rotation_yaw_offset_right_curve: Arc::new(KeyedCurve::constant_value(0.0)),
            velocity_blend_interpolation_speed: 12.0,
            pivot_activation_speed_threshold: 200.0,
            animated_walk_speed: 150.0,
            animated_run_speed: 350.0,
            animated_sprint_speed: 600.0,
            animated_crouch_speed: 150.0,

            // 下落越快身体越往后仰
            in_air_lean_curve: linear_curve(&[(-1000.0, -1.0), (500.0, 1.0)]),
            // 命中越近预测权重越大
            ground_prediction_curve: eased_curve((0.0, 1.0), (1.0, 0.0)),

            use_foot_ik_bones: true,
            disable_foot_lock: false,
            foot_height: 13.5,
            ik_trace_channel: QueryChannel::Visibility,
            ik_trace_distance_upward: 50.0,
            ik_trace_distance_downward: 45.0,

            use_hand_ik_bones: true,

            quick_stop_blend_in_duration: 0.1,
            quick_stop_blend_out_duration: 0.2,
            quick_stop_play_rate: (1.75, 3.0),
            quick_stop_start_time: 0.3,
            transition_clips: TransitionClips::default(),

            dynamic_transition_foot_lock_distance_threshold: 8.0,
            dynamic_transition_blend_duration: 0.2,
            dynamic_transition_play_rate: 1.5,
            dynamic_transition_clips: TransitionClips::default(),

            view_yaw_angle_threshold: 50.0,
            reference_view_yaw_speed: (180.0, 460.0),
            rotate_in_place_play_rate: (1.15, 3.0),
            foot_lock_block_view_yaw_angle_threshold: 120.0,
            foot_lock_block_view_yaw_speed_threshold: 620.0,
        }
    }
}

impl AnimConfig {
    /// 检查参数是否合理
    pub fn validate(&self) -> Result<()> {
        let non_negative = [
            ("look_towards_camera_rotation_interpolation_speed", self.look_towards_camera_rotation_interpolation_speed),
            ("look_towards_input_yaw_interpolation_speed", self.look_towards_input_yaw_interpolation_speed),
            ("lean_interpolation_speed", self.lean_interpolation_speed),
            ("velocity_blend_interpolation_speed", self.velocity_blend_interpolation_speed),
            ("pivot_activation_speed_threshold", self.pivot_activation_speed_threshold),
            ("foot_height", self.foot_height),
            ("ik_trace_distance_upward", self.ik_trace_distance_upward),
            ("ik_trace_distance_downward", self.ik_trace_distance_downward),
            ("quick_stop_blend_in_duration", self.quick_stop_blend_in_duration),
            ("quick_stop_blend_out_duration", self.quick_stop_blend_out_duration),
            ("quick_stop_start_time", self.quick_stop_start_time),
            ("dynamic_transition_foot_lock_distance_threshold", self.dynamic_transition_foot_lock_distance_threshold),
            ("dynamic_transition_blend_duration", self.dynamic_transition_blend_duration),
            ("view_yaw_angle_threshold", self.view_yaw_angle_threshold),
            ("foot_lock_block_view_yaw_angle_threshold", self.foot_lock_block_view_yaw_angle_threshold),
            ("foot_lock_block_view_yaw_speed_threshold", self.foot_lock_block_view_yaw_speed_threshold),
        ];

        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(LocomotionError::InvalidConfig(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }

        let positive = [
            ("animated_walk_speed", self.animated_walk_speed),
            ("animated_run_speed", self.animated_run_speed),
            ("animated_sprint_speed", self.animated_sprint_speed),
            ("animated_crouch_speed", self.animated_crouch_speed),
            ("dynamic_transition_play_rate", self.dynamic_transition_play_rate),
        ];

        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(LocomotionError::InvalidConfig(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }

        let ranges = [
            ("quick_stop_play_rate", self.quick_stop_play_rate),
            ("reference_view_yaw_speed", self.reference_view_yaw_speed),
            ("rotate_in_place_play_rate", self.rotate_in_place_play_rate),
        ];

        for (name, (min, max)) in ranges {
            if !(min.is_finite() && max.is_finite()) || min > max {
                return Err(LocomotionError::InvalidConfig(format!(
                    "{} range is inverted: ({}, {})",
                    name, min, max
                )));
            }
        }

        Ok(())
    }
}

// ========== 进程级默认配置 ==========

static ANIM_CONFIG: Lazy<RwLock<AnimConfig>> = Lazy::new(|| RwLock::new(AnimConfig::default()));

/// 获取当前默认配置（副本）
pub fn get_config() -> AnimConfig {
    ANIM_CONFIG
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// 替换默认配置，之后创建的实例生效
pub fn set_config(config: AnimConfig) -> Result<()> {
    config.validate()?;
    *ANIM_CONFIG.write().unwrap_or_else(PoisonError::into_inner) = config;
    log::info!("动画默认配置已更新");
    Ok(())
}

/// 重置为默认配置
pub fn reset_config() {
    *ANIM_CONFIG.write().unwrap_or_else(PoisonError::into_inner) = AnimConfig::default();
    log::info!("动画默认配置已重置");
}
