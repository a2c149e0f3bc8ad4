//! 弹簧阻尼积分器
//!
//! 用于脚部地面偏移等需要平滑追踪移动目标的量。
//! 积分采用隐式欧拉，阻尼比 >= 1 时不会振荡。

use std::ops::{Add, Mul, Sub};

use glam::Vec3;

use super::smoothing::{clamp01, SMALL_NUMBER};

/// 可被弹簧积分的值
pub trait SpringValue:
    Copy + Add<Output = Self> + Sub<Output = Self> + Mul<f32, Output = Self>
{
    const ZERO: Self;
}

impl SpringValue for f32 {
    const ZERO: Self = 0.0;
}

impl SpringValue for Vec3 {
    const ZERO: Self = Vec3::ZERO;
}

/// 弹簧状态（速度 + 上一帧目标）
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringState<T: SpringValue> {
    pub velocity: T,
    pub previous_target: T,
    pub state_valid: bool,
}

impl<T: SpringValue> Default for SpringState<T> {
    fn default() -> Self {
        Self {
            velocity: T::ZERO,
            previous_target: T::ZERO,
            state_valid: false,
        }
    }
}

impl<T: SpringValue> SpringState<T> {
    /// 使状态失效，下次调用直接吸附到目标
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// 推进一步弹簧阻尼
///
/// - `frequency`：无阻尼频率（Hz）
/// - `damping_ratio`：阻尼比，1 为临界阻尼
/// - `target_velocity_amount`：目标速度估计的权重，截断到 [0, 1]
pub fn spring_damp<T: SpringValue>(
    state: &mut SpringState<T>,
    current: T,
    target: T,
    delta_time: f32,
    frequency: f32,
    damping_ratio: f32,
    target_velocity_amount: f32,
) -> T {
    if delta_time <= SMALL_NUMBER {
        return current;
    }

    if !state.state_valid {
        state.velocity = T::ZERO;
        state.previous_target = target;
        state.state_valid = true;
        return target;
    }

    let target_velocity =
        (target - state.previous_target) * (clamp01(target_velocity_amount) / delta_time);

    let omega = frequency * std::f32::consts::TAU;
    let omega_sq = omega * omega;
    let damping = 2.0 * damping_ratio * omega;

    // v' = v + dt * (-w^2 (x' - xt) - 2 zeta w (v' - vt)), x' = x + dt * v'
    let denominator = 1.0 + damping * delta_time + delta_time * delta_time * omega_sq;
    let velocity = (state.velocity - (current - target) * (delta_time * omega_sq)
        + target_velocity * (damping * delta_time))
        * (1.0 / denominator);

    state.velocity = velocity;
    state.previous_target = target;

    current + velocity * delta_time
}
