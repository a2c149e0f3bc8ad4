//! 链接实例
//!
//! 副实例不持有主实例，只保留两个弱引用能力：读取已发布状态、转发少量控制调用。
//! 主实例未设置或已销毁时所有调用都是空操作。

use std::sync::{Arc, Mutex, PoisonError, Weak};

use super::human::HumanAnimInstance;
use super::output::{ControlRigInput, PublishedState, PublishedStateReader};
use crate::state::HipsDirection;

/// 允许跨实例调用的控制入口
pub trait LocomotionControl: Send + Sync {
    fn reinitialize_look(&self);
    fn refresh_look(&self, delta_time: f32);
    fn set_hips_direction(&self, direction: HipsDirection);
    fn activate_pivot(&self);
    fn reset_jumped(&self);
}

impl LocomotionControl for Mutex<HumanAnimInstance> {
    fn reinitialize_look(&self) {
        self.lock().unwrap_or_else(PoisonError::into_inner).reinitialize_look();
    }

    fn refresh_look(&self, delta_time: f32) {
        self.lock().unwrap_or_else(PoisonError::into_inner).update_look(delta_time);
    }

    fn set_hips_direction(&self, direction: HipsDirection) {
        self.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .set_hips_direction(direction);
    }

    fn activate_pivot(&self) {
        self.lock().unwrap_or_else(PoisonError::into_inner).activate_pivot();
    }

    fn reset_jumped(&self) {
        self.lock().unwrap_or_else(PoisonError::into_inner).reset_jumped();
    }
}

#[derive(Default)]
pub struct LinkedAnimInstance {
    reader: Option<Weak<dyn PublishedStateReader>>,
    control: Option<Weak<dyn LocomotionControl>>,
}

impl LinkedAnimInstance {
    pub fn new() -> Self {
        Self::default()
    }

    /// 链接到共享的主实例
    pub fn link(&mut self, primary: &Arc<Mutex<HumanAnimInstance>>) {
        let published = primary
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .published();

        let reader: Weak<dyn PublishedStateReader> = Arc::downgrade(&published) as Weak<_>;
        let control: Weak<dyn LocomotionControl> = Arc::downgrade(primary) as Weak<_>;
        self.link_with(reader, control);
    }

    pub fn link_with(&mut self, reader: Weak<dyn PublishedStateReader>, control: Weak<dyn LocomotionControl>) {
        self.reader = Some(reader);
        self.control = Some(control);
        log::debug!("链接实例已绑定主实例");
    }

    pub fn unlink(&mut self) {
        self.reader = None;
        self.control = None;
    }

    pub fn is_linked(&self) -> bool {
        self.control.as_ref().is_some_and(|control| control.strong_count() > 0)
    }

    fn with_control(&self, f: impl FnOnce(&dyn LocomotionControl)) {
        match self.control.as_ref().and_then(Weak::upgrade) {
            Some(control) => f(control.as_ref()),
            None => log::trace!("主实例不存在，忽略调用"),
        }
    }

    pub fn published_state(&self) -> Option<PublishedState> {
        let reader = self.reader.as_ref().and_then(Weak::upgrade)?;
        Some(reader.published_state())
    }

    pub fn control_rig_input(&self) -> Option<ControlRigInput> {
        let reader = self.reader.as_ref().and_then(Weak::upgrade)?;
        Some(reader.control_rig_input())
    }

    pub fn reinitialize_look(&self) {
        self.with_control(|control| control.reinitialize_look());
    }

    pub fn refresh_look(&self, delta_time: f32) {
        self.with_control(|control| control.refresh_look(delta_time));
    }

    pub fn set_hips_direction(&self, direction: HipsDirection) {
        self.with_control(|control| control.set_hips_direction(direction));
    }

    pub fn activate_pivot(&self) {
        self.with_control(|control| control.activate_pivot());
    }

    pub fn reset_jumped(&self) {
        self.with_control(|control| control.reset_jumped());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnimConfig;

    #[test]
    fn test_forwards_to_live_primary() {
        let primary = Arc::new(Mutex::new(HumanAnimInstance::new(AnimConfig::default())));
        let mut linked = LinkedAnimInstance::new();
        assert!(!linked.is_linked());

        linked.link(&primary);
        assert!(linked.is_linked());

        linked.set_hips_direction(HipsDirection::LeftBackward);
        linked.activate_pivot();
        {
            let primary = primary.lock().unwrap();
            assert_eq!(primary.on_ground().hips_direction, HipsDirection::LeftBackward);
            assert!(primary.on_ground().pivot_activation_requested);
        }

        let published = linked.published_state().unwrap();
        assert_eq!(published.frame, 0);
        assert!(linked.control_rig_input().unwrap().use_foot_ik_bones);
    }

    #[test]
    fn test_noop_after_primary_dropped() {
        let primary = Arc::new(Mutex::new(HumanAnimInstance::new(AnimConfig::default())));
        let mut linked = LinkedAnimInstance::new();
        linked.link(&primary);
        drop(primary);

        assert!(!linked.is_linked());
        linked.reinitialize_look();
        linked.refresh_look(0.016);
        linked.reset_jumped();
        assert!(linked.published_state().is_none());
        assert!(linked.control_rig_input().is_none());
    }

    #[test]
    fn test_unlinked_is_noop() {
        let linked = LinkedAnimInstance::new();
        linked.activate_pivot();
        assert!(linked.published_state().is_none());
    }
}
