//! 数学工具
//!
//! 所有状态块共用的平滑插值、角度处理、弹簧阻尼和响应曲线。

mod curve;
mod smoothing;
mod spring;
mod transform;

pub use curve::{BezierEase, CurveKey, KeyInterpolation, KeyedCurve, ResponseCurve};
pub use smoothing::{
    clamp01, clamp_magnitude01, direction_to_angle, exponential_decay, exponential_decay_to,
    interp_to, is_full_weight, is_relevant, lerp, lerp_angle, mapped_range_clamped,
    normalize_axis, quat_interp_to, rotator_to_quat, vector_interp_to,
    COUNTER_CLOCKWISE_ROTATION_ANGLE_THRESHOLD, SMALL_NUMBER,
};
pub use spring::{spring_damp, SpringState, SpringValue};
pub use transform::Transform;
