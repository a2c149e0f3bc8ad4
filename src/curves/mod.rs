//! 动画曲线采样
//!
//! 曲线值由动画图在求值时产生，这里只做按名称查找。
//! 不存在的曲线一律视为 0。

pub mod names;

use std::collections::HashMap;

use crate::math::clamp01;

/// 具名曲线数据源
pub trait CurveSource: Send + Sync {
    /// 查找曲线值，不存在时返回 `None`
    fn find(&self, name: &str) -> Option<f32>;

    fn value(&self, name: &str) -> f32 {
        self.find(name).unwrap_or(0.0)
    }

    fn value_clamped01(&self, name: &str) -> f32 {
        clamp01(self.value(name))
    }
}

/// 基于 HashMap 的曲线表
#[derive(Clone, Debug, Default)]
pub struct CurveValues {
    values: HashMap<String, f32>,
}

impl CurveValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: &str, value: f32) {
        if let Some(existing) = self.values.get_mut(name) {
            *existing = value;
        } else {
            self.values.insert(name.to_string(), value);
        }
    }

    pub fn with(mut self, name: &str, value: f32) -> Self {
        self.set(name, value);
        self
    }

    pub fn remove(&mut self, name: &str) {
        self.values.remove(name);
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl CurveSource for CurveValues {
    fn find(&self, name: &str) -> Option<f32> {
        self.values.get(name).copied()
    }
}

impl CurveSource for HashMap<String, f32> {
    fn find(&self, name: &str) -> Option<f32> {
        self.get(name).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_curve_is_zero() {
        let curves = CurveValues::new();
        assert_eq!(curves.value(names::POSE_GAIT), 0.0);
        assert!(curves.find(names::POSE_GAIT).is_none());
    }

    #[test]
    fn test_clamped_lookup() {
        let curves = CurveValues::new()
            .with(names::SPRINT_BLOCK, 1.7)
            .with(names::FOOT_LEFT_LOCK, -0.2);
        assert_eq!(curves.value_clamped01(names::SPRINT_BLOCK), 1.0);
        assert_eq!(curves.value_clamped01(names::FOOT_LEFT_LOCK), 0.0);
        assert_eq!(curves.value(names::SPRINT_BLOCK), 1.7);
    }

    #[test]
    fn test_set_overwrites() {
        let mut curves = CurveValues::new();
        curves.set(names::POSE_MOVING, 0.5);
        curves.set(names::POSE_MOVING, 1.0);
        assert_eq!(curves.len(), 1);
        assert_eq!(curves.value(names::POSE_MOVING), 1.0);
    }
}
