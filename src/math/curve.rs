//! 响应曲线
//!
//! 步幅、旋转偏移、空中倾斜、落地预测等由美术调出的 float -> float 曲线。
//! 每段可选常量、线性或贝塞尔缓动。

use std::fmt::Debug;

use crate::{LocomotionError, Result};

/// 可被采样的曲线
pub trait ResponseCurve: Debug + Send + Sync {
    fn evaluate(&self, x: f32) -> f32;
}

/// 贝塞尔缓动控制点（两端固定在 (0,0) 与 (1,1)）
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BezierEase {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl BezierEase {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            x1: x1.clamp(0.0, 1.0),
            y1,
            x2: x2.clamp(0.0, 1.0),
            y2,
        }
    }

    /// 缓入缓出
    pub fn ease_in_out() -> Self {
        Self::new(0.42, 0.0, 0.58, 1.0)
    }

    /// 求 t 处的缓动系数
    pub fn evaluate(&self, t: f32) -> f32 {
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }

        // 牛顿法求解 x(s) = t
        let mut s = t;
        for _ in 0..15 {
            let x = cubic(s, self.x1, self.x2);
            let dx = cubic_derivative(s, self.x1, self.x2);

            if dx.abs() < 1e-6 {
                break;
            }

            let next = (s - (x - t) / dx).clamp(0.0, 1.0);
            if (next - s).abs() < 1e-6 {
                s = next;
                break;
            }
            s = next;
        }

        cubic(s, self.y1, self.y2)
    }
}

fn cubic(s: f32, p1: f32, p2: f32) -> f32 {
    let inv = 1.0 - s;
    3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
}

fn cubic_derivative(s: f32, p1: f32, p2: f32) -> f32 {
    let inv = 1.0 - s;
    3.0 * inv * inv * p1 + 6.0 * inv * s * (p2 - p1) + 3.0 * s * s * (1.0 - p2)
}

/// 关键帧到下一关键帧之间的插值方式
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum KeyInterpolation {
    Constant,
    Linear,
    Bezier(BezierEase),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurveKey {
    pub x: f32,
    pub y: f32,
    pub interpolation: KeyInterpolation,
}

impl CurveKey {
    pub fn linear(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            interpolation: KeyInterpolation::Linear,
        }
    }

    pub fn constant(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            interpolation: KeyInterpolation::Constant,
        }
    }

    pub fn eased(x: f32, y: f32, ease: BezierEase) -> Self {
        Self {
            x,
            y,
            interpolation: KeyInterpolation::Bezier(ease),
        }
    }
}

/// 关键帧曲线，区间外取端点值
#[derive(Clone, Debug, PartialEq)]
pub struct KeyedCurve {
    keys: Vec<CurveKey>,
}

impl KeyedCurve {
    pub fn new(keys: Vec<CurveKey>) -> Result<Self> {
        if keys.is_empty() {
            return Err(LocomotionError::InvalidCurve("curve has no keys".into()));
        }

        if keys.iter().any(|k| !k.x.is_finite() || !k.y.is_finite()) {
            return Err(LocomotionError::InvalidCurve(
                "curve key is not finite".into(),
            ));
        }

        if keys.windows(2).any(|pair| pair[1].x <= pair[0].x) {
            return Err(LocomotionError::InvalidCurve(
                "curve keys must be strictly increasing".into(),
            ));
        }

        Ok(Self { keys })
    }

    /// 只有一个值的曲线
    pub fn constant_value(value: f32) -> Self {
        Self {
            keys: vec![CurveKey::constant(0.0, value)],
        }
    }

    /// 由 (x, y) 点构造线性曲线
    pub fn from_points(points: &[(f32, f32)]) -> Result<Self> {
        Self::new(
            points
                .iter()
                .map(|&(x, y)| CurveKey::linear(x, y))
                .collect(),
        )
    }

    pub fn keys(&self) -> &[CurveKey] {
        &self.keys
    }
}

impl ResponseCurve for KeyedCurve {
    fn evaluate(&self, x: f32) -> f32 {
        let first = &self.keys[0];
        if x <= first.x {
            return first.y;
        }

        let last = &self.keys[self.keys.len() - 1];
        if x >= last.x {
            return last.y;
        }

        // 找到 x 所在区段
        let index = self.keys.partition_point(|k| k.x <= x);
        let from = &self.keys[index - 1];
        let to = &self.keys[index];

        let t = (x - from.x) / (to.x - from.x);
        let alpha = match from.interpolation {
            KeyInterpolation::Constant => 0.0,
            KeyInterpolation::Linear => t,
            KeyInterpolation::Bezier(ease) => ease.evaluate(t),
        };

        from.y + (to.y - from.y) * alpha
    }
}
