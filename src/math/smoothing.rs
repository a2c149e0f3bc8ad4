//! 平滑与角度工具
//!
//! 角度统一使用度，偏航取值区间 (-180, 180]。

use glam::{EulerRot, Quat, Vec2, Vec3};

/// 视为零的阈值
pub const SMALL_NUMBER: f32 = 1.0e-8;

/// 动画权重阈值
const ZERO_ANIM_WEIGHT_THRESH: f32 = 1.0e-5;

/// 逆时针插值偏向阈值（度）
///
/// 角度差超过 `180 - 阈值` 时改走负方向。
pub const COUNTER_CLOCKWISE_ROTATION_ANGLE_THRESHOLD: f32 = 5.0;

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
pub fn clamp01(value: f32) -> f32 {
    value.clamp(0.0, 1.0)
}

/// 长度超过 1 时归一化
pub fn clamp_magnitude01(v: Vec3) -> Vec3 {
    let len_sq = v.length_squared();
    if len_sq > 1.0 {
        v / len_sq.sqrt()
    } else {
        v
    }
}

/// 把角度规范到 (-180, 180]
pub fn normalize_axis(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

/// 权重是否有效（不可忽略）
#[inline]
pub fn is_relevant(weight: f32) -> bool {
    weight > ZERO_ANIM_WEIGHT_THRESH
}

/// 权重是否为满权重
#[inline]
pub fn is_full_weight(weight: f32) -> bool {
    weight >= 1.0 - ZERO_ANIM_WEIGHT_THRESH
}

/// 指数衰减的插值系数
///
/// `lambda <= 0` 时返回 1（直接到达目标）。
pub fn exponential_decay(delta_time: f32, lambda: f32) -> f32 {
    if lambda > 0.0 {
        1.0 - (-lambda * delta_time).exp()
    } else {
        1.0
    }
}

/// 以指数衰减方式逼近目标
pub fn exponential_decay_to(current: f32, target: f32, delta_time: f32, lambda: f32) -> f32 {
    if lambda > 0.0 {
        lerp(current, target, exponential_decay(delta_time, lambda))
    } else {
        target
    }
}

/// 恒定比例插值：每帧移动剩余距离的 `clamp(dt * speed, 0, 1)`
pub fn interp_to(current: f32, target: f32, delta_time: f32, speed: f32) -> f32 {
    if speed <= 0.0 {
        return target;
    }

    let distance = target - current;
    if distance * distance < SMALL_NUMBER {
        return target;
    }

    current + distance * clamp01(delta_time * speed)
}

pub fn vector_interp_to(current: Vec3, target: Vec3, delta_time: f32, speed: f32) -> Vec3 {
    if speed <= 0.0 {
        return target;
    }

    let distance = target - current;
    if distance.length_squared() < SMALL_NUMBER {
        return target;
    }

    current + distance * clamp01(delta_time * speed)
}

pub fn quat_interp_to(current: Quat, target: Quat, delta_time: f32, speed: f32) -> Quat {
    if speed <= 0.0 || current.abs_diff_eq(target, 1.0e-6) {
        return target;
    }

    current.slerp(target, clamp01(speed * delta_time)).normalize()
}

/// 最短路径角度插值
pub fn lerp_angle(from: f32, to: f32, ratio: f32) -> f32 {
    let mut delta = normalize_axis(to - from);

    if delta > 180.0 - COUNTER_CLOCKWISE_ROTATION_ANGLE_THRESHOLD {
        delta -= 360.0;
    }

    normalize_axis(from + delta * ratio)
}

/// 把值从输入区间映射到输出区间，超出部分截断
pub fn mapped_range_clamped(in_range: (f32, f32), out_range: (f32, f32), value: f32) -> f32 {
    let divisor = in_range.1 - in_range.0;
    let pct = if divisor.abs() < SMALL_NUMBER {
        if value >= in_range.1 {
            1.0
        } else {
            0.0
        }
    } else {
        clamp01((value - in_range.0) / divisor)
    };

    lerp(out_range.0, out_range.1, pct)
}

/// 平面方向转偏航角（度）
pub fn direction_to_angle(direction: Vec2) -> f32 {
    direction.y.atan2(direction.x).to_degrees()
}

/// 由俯仰/偏航/横滚（度）构造旋转
///
/// Z 轴向上，偏航绕 Z（正值由 X 转向 Y），俯仰绕 Y（正值抬头），
/// 横滚绕 X（正值把 Z 轴转向 +Y）。
pub fn rotator_to_quat(pitch: f32, yaw: f32, roll: f32) -> Quat {
    Quat::from_euler(
        EulerRot::ZYX,
        yaw.to_radians(),
        -pitch.to_radians(),
        -roll.to_radians(),
    )
}
