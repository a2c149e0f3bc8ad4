//! 脚部 IK
//!
//! 每只脚依次经过：
//! 1. 传送修正：短时间内发生传送时按组件相对位置恢复锁定点
//! 2. 平台切换修正：支撑物变化时重新计算锁定点的相对坐标
//! 3. 脚锁：锁定量只在达到 1 时重新捕获位置，其余时候只能下降
//! 4. 地面偏移：向下射线检测地面，弹簧平滑位置、插值旋转
//!
//! 输出为组件空间的 IK 位置与旋转。

use glam::{Quat, Vec2, Vec3};

use super::FrameInput;
use crate::curves::{names, CurveSource};
use crate::input::{CharacterSource, LocomotionSnapshot, MovementBaseSnapshot};
use crate::math::{
    direction_to_angle, is_full_weight, is_relevant, quat_interp_to, rotator_to_quat,
    spring_damp, vector_interp_to, SpringState, Transform,
};
use crate::query::GeometryQuery;

/// 传送后多长时间内修正锁定点
const TELEPORT_CORRECTION_TIME: f32 = 0.2;

const MOVING_LOCK_DECREASE_SPEED: f32 = 5.0;
const NOT_GROUNDED_LOCK_DECREASE_SPEED: f32 = 0.6;
/// 锁定量高于此值时再次满锁不重新捕获位置
const LOCK_RECAPTURE_THRESHOLD: f32 = 0.9;

const IN_AIR_OFFSET_INTERPOLATION_SPEED: f32 = 15.0;
const OFFSET_LOCATION_FREQUENCY: f32 = 0.4;
const OFFSET_LOCATION_DAMPING_RATIO: f32 = 4.0;
const OFFSET_LOCATION_TARGET_VELOCITY_AMOUNT: f32 = 1.0;
const OFFSET_ROTATION_INTERPOLATION_SPEED: f32 = 30.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FootSide {
    Left,
    Right,
}

impl FootSide {
    pub fn ik_curve(self) -> &'static str {
        match self {
            Self::Left => names::FOOT_LEFT_IK,
            Self::Right => names::FOOT_RIGHT_IK,
        }
    }

    pub fn lock_curve(self) -> &'static str {
        match self {
            Self::Left => names::FOOT_LEFT_LOCK,
            Self::Right => names::FOOT_RIGHT_LOCK,
        }
    }

    /// 目标骨骼：IK 骨骼或虚拟骨骼
    pub fn target_bone(self, use_ik_bones: bool) -> &'static str {
        match (self, use_ik_bones) {
            (Self::Left, true) => names::FOOT_LEFT_IK_BONE,
            (Self::Right, true) => names::FOOT_RIGHT_IK_BONE,
            (Self::Left, false) => names::FOOT_LEFT_VIRTUAL_BONE,
            (Self::Right, false) => names::FOOT_RIGHT_VIRTUAL_BONE,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FootState {
    pub ik_amount: f32,

    /// 动画姿势给出的脚部世界变换
    pub target_location: Vec3,
    pub target_rotation: Quat,

    pub lock_amount: f32,
    pub lock_location: Vec3,
    pub lock_rotation: Quat,
    pub lock_component_relative_location: Vec3,
    pub lock_component_relative_rotation: Quat,
    pub lock_movement_base_relative_location: Vec3,
    pub lock_movement_base_relative_rotation: Quat,

    pub offset_target_location: Vec3,
    pub offset_target_rotation: Quat,
    pub offset_location: Vec3,
    pub offset_rotation: Quat,
    pub offset_spring: SpringState<Vec3>,

    /// 组件空间 IK 结果
    pub ik_location: Vec3,
    pub ik_rotation: Quat,
}

impl Default for FootState {
    fn default() -> Self {
        Self {
            ik_amount: 0.0,
            target_location: Vec3::ZERO,
            target_rotation: Quat::IDENTITY,
            lock_amount: 0.0,
            lock_location: Vec3::ZERO,
            lock_rotation: Quat::IDENTITY,
            lock_component_relative_location: Vec3::ZERO,
            lock_component_relative_rotation: Quat::IDENTITY,
            lock_movement_base_relative_location: Vec3::ZERO,
            lock_movement_base_relative_rotation: Quat::IDENTITY,
            offset_target_location: Vec3::ZERO,
            offset_target_rotation: Quat::IDENTITY,
            offset_location: Vec3::ZERO,
            offset_rotation: Quat::IDENTITY,
            offset_spring: SpringState::default(),
            ik_location: Vec3::ZERO,
            ik_rotation: Quat::IDENTITY,
        }
    }
}

impl FootState {
    fn clear_lock(&mut self) {
        self.lock_amount = 0.0;
        self.lock_location = Vec3::ZERO;
        self.lock_rotation = Quat::IDENTITY;
        self.lock_component_relative_location = Vec3::ZERO;
        self.lock_component_relative_rotation = Quat::IDENTITY;
        self.lock_movement_base_relative_location = Vec3::ZERO;
        self.lock_movement_base_relative_rotation = Quat::IDENTITY;
    }

    fn store_base_relative_lock(&mut self, base: &MovementBaseSnapshot, location: Vec3, rotation: Quat) {
        let base_rotation_inverse = base.rotation.inverse();
        self.lock_movement_base_relative_location = base_rotation_inverse * (location - base.location);
        self.lock_movement_base_relative_rotation = (base_rotation_inverse * rotation).normalize();
    }

    fn store_component_relative_lock(&mut self, component: &Transform) {
        self.lock_component_relative_location = component.inverse_transform_point(self.lock_location);
        self.lock_component_relative_rotation = component.inverse_transform_rotation(self.lock_rotation);
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FeetState {
    pub left: FootState,
    pub right: FootState,
    /// [-1, 1]，负值左脚着地，正值右脚着地
    pub foot_planted_amount: f32,
    pub feet_crossing_amount: f32,
    /// 两脚地面偏移目标 Z 的 (最小, 最大)，已除以缩放
    pub min_max_pelvis_offset_z: Vec2,
}

impl FeetState {
    pub fn foot(&self, side: FootSide) -> &FootState {
        match side {
            FootSide::Left => &self.left,
            FootSide::Right => &self.right,
        }
    }

    pub fn foot_mut(&mut self, side: FootSide) -> &mut FootState {
        match side {
            FootSide::Left => &mut self.left,
            FootSide::Right => &mut self.right,
        }
    }

    /// 主线程：读取骨骼插槽作为脚部目标。插槽缺失时保留上一帧目标
    pub fn update_targets(&mut self, character: &dyn CharacterSource, use_ik_bones: bool) {
        for side in [FootSide::Left, FootSide::Right] {
            let bone = side.target_bone(use_ik_bones);
            match character.socket_transform(bone) {
                Some(transform) => {
                    let foot = self.foot_mut(side);
                    foot.target_location = transform.translation;
                    foot.target_rotation = transform.rotation;
                }
                None => log::warn!("脚部插槽不存在: {}", bone),
            }
        }
    }

    pub fn update(&mut self, frame: &FrameInput, query: &dyn GeometryQuery, foot_lock_block_amount: f32) {
        self.foot_planted_amount = frame.curves.value(names::FOOT_PLANTED).clamp(-1.0, 1.0);
        self.feet_crossing_amount = frame.curves.value_clamped01(names::FEET_CROSSING);

        self.min_max_pelvis_offset_z = Vec2::ZERO;

        let context = FootContext {
            frame,
            query,
            foot_lock_block_amount,
        };

        context.update_foot(&mut self.left, FootSide::Left);
        context.update_foot(&mut self.right, FootSide::Right);

        let scale = frame.snapshot.locomotion.scale;
        let left_z = self.left.offset_target_location.z;
        let right_z = self.right.offset_target_location.z;
        if scale > f32::EPSILON {
            self.min_max_pelvis_offset_z = Vec2::new(left_z.min(right_z), left_z.max(right_z)) / scale;
        }
    }
}

struct FootContext<'a, 'b> {
    frame: &'a FrameInput<'b>,
    query: &'a dyn GeometryQuery,
    foot_lock_block_amount: f32,
}

impl FootContext<'_, '_> {
    fn snapshot(&self) -> &LocomotionSnapshot {
        self.frame.snapshot
    }

    fn curves(&self) -> &dyn CurveSource {
        self.frame.curves
    }

    fn pending(&self) -> bool {
        self.frame.mode.is_snapshot()
    }

    fn update_foot(&self, foot: &mut FootState, side: FootSide) {
        foot.ik_amount = self.curves().value_clamped01(side.ik_curve());

        self.process_teleport(foot);
        self.process_base_change(foot);

        let mut final_location = foot.target_location;
        let mut final_rotation = foot.target_rotation;

        self.update_lock(foot, side, &mut final_location, &mut final_rotation);
        self.update_offset(foot, &mut final_location, &mut final_rotation);

        let component = &self.snapshot().component_transform;
        foot.ik_location = component.inverse_transform_point(final_location);
        foot.ik_rotation = component.inverse_transform_rotation(final_rotation);
    }

    /// 网络平滑下传送通常在很短时间内完成，按组件相对位置恢复锁定点
    fn process_teleport(&self, foot: &mut FootState) {
        let snapshot = self.snapshot();
        if self.pending()
            || snapshot.time_since_teleport > TELEPORT_CORRECTION_TIME
            || !is_relevant(foot.ik_amount * foot.lock_amount)
        {
            return;
        }

        let component = &snapshot.component_transform;
        foot.lock_location = component.transform_point(foot.lock_component_relative_location);
        foot.lock_rotation = component.transform_rotation(foot.lock_component_relative_rotation);

        let base = &snapshot.movement_base;
        if base.has_relative_location {
            foot.store_base_relative_lock(base, foot.lock_location, foot.lock_rotation);
        }
    }

    fn process_base_change(&self, foot: &mut FootState) {
        let base = &self.snapshot().movement_base;
        if (!self.pending() && !base.base_changed) || !is_relevant(foot.ik_amount * foot.lock_amount) {
            return;
        }

        if self.pending() {
            foot.lock_location = foot.target_location;
            foot.lock_rotation = foot.target_rotation;
        }

        foot.store_component_relative_lock(&self.snapshot().component_transform);

        if base.has_relative_location {
            foot.store_base_relative_lock(base, foot.lock_location, foot.lock_rotation);
        } else {
            foot.lock_movement_base_relative_location = Vec3::ZERO;
            foot.lock_movement_base_relative_rotation = Quat::IDENTITY;
        }
    }

    fn update_lock(
        &self,
        foot: &mut FootState,
        side: FootSide,
        final_location: &mut Vec3,
        final_rotation: &mut Quat,
    ) {
        let snapshot = self.snapshot();
        let locomotion = &snapshot.locomotion;

        let mut new_amount =
            self.curves().value_clamped01(side.lock_curve()) * (1.0 - self.foot_lock_block_amount);

        // 移动或离地时脚锁逐渐释放
        if locomotion.moving_smooth || !snapshot.on_ground() {
            new_amount = if self.pending() {
                0.0
            } else {
                let decrease_speed = if locomotion.moving_smooth {
                    MOVING_LOCK_DECREASE_SPEED
                } else {
                    NOT_GROUNDED_LOCK_DECREASE_SPEED
                };
                new_amount
                    .min(foot.lock_amount - self.frame.delta_time * decrease_speed)
                    .max(0.0)
            };
        }

        if self.frame.config.disable_foot_lock || !is_relevant(foot.ik_amount * new_amount) {
            if foot.lock_amount > 0.0 {
                foot.clear_lock();
            }
            return;
        }

        let greater_than_previous = new_amount > foot.lock_amount;

        if is_full_weight(new_amount) {
            if greater_than_previous {
                if foot.lock_amount <= LOCK_RECAPTURE_THRESHOLD {
                    foot.lock_location = *final_location;
                    foot.lock_rotation = *final_rotation;
                }

                let base = &snapshot.movement_base;
                if base.has_relative_location {
                    foot.store_base_relative_lock(base, *final_location, *final_rotation);
                } else {
                    foot.lock_movement_base_relative_location = Vec3::ZERO;
                    foot.lock_movement_base_relative_rotation = Quat::IDENTITY;
                }
            }

            foot.lock_amount = 1.0;
        } else if !greater_than_previous {
            foot.lock_amount = new_amount;
        }

        let base = &snapshot.movement_base;
        if base.has_relative_location {
            foot.lock_location = base.location + base.rotation * foot.lock_movement_base_relative_location;
            foot.lock_rotation = (base.rotation * foot.lock_movement_base_relative_rotation).normalize();
        }

        foot.store_component_relative_lock(&snapshot.component_transform);

        *final_location = final_location.lerp(foot.lock_location, foot.lock_amount);
        *final_rotation = final_rotation.slerp(foot.lock_rotation, foot.lock_amount);
    }

    fn update_offset(&self, foot: &mut FootState, final_location: &mut Vec3, final_rotation: &mut Quat) {
        if !is_relevant(foot.ik_amount) {
            foot.offset_target_location = Vec3::ZERO;
            foot.offset_target_rotation = Quat::IDENTITY;
            foot.offset_spring.reset();
            return;
        }

        let snapshot = self.snapshot();
        let delta_time = self.frame.delta_time;

        if snapshot.in_air() {
            foot.offset_target_location = Vec3::ZERO;
            foot.offset_target_rotation = Quat::IDENTITY;
            foot.offset_spring.reset();

            if self.pending() {
                foot.offset_location = Vec3::ZERO;
                foot.offset_rotation = Quat::IDENTITY;
            } else {
                foot.offset_location = vector_interp_to(
                    foot.offset_location,
                    Vec3::ZERO,
                    delta_time,
                    IN_AIR_OFFSET_INTERPOLATION_SPEED,
                );
                foot.offset_rotation = quat_interp_to(
                    foot.offset_rotation,
                    Quat::IDENTITY,
                    delta_time,
                    IN_AIR_OFFSET_INTERPOLATION_SPEED,
                );

                *final_location += foot.offset_location;
                *final_rotation = foot.offset_rotation * *final_rotation;
            }
            return;
        }

        let config = self.frame.config;
        let locomotion = &snapshot.locomotion;

        // 从脚的水平位置、组件高度处向下检测
        let trace_location = Vec3::new(
            final_location.x,
            final_location.y,
            snapshot.component_transform.translation.z,
        );

        let hit = self.query.line_trace(
            trace_location + Vec3::Z * (config.ik_trace_distance_upward * locomotion.scale),
            trace_location - Vec3::Z * (config.ik_trace_distance_downward * locomotion.scale),
            config.ik_trace_channel,
        );

        // 未命中或不可行走时保留上一帧目标
        if let Some(hit) = hit.filter(|hit| hit.impact_normal.z >= locomotion.walkable_floor_z) {
            let foot_height = config.foot_height * locomotion.scale;

            let mut target = hit.impact_point - trace_location + hit.impact_normal * foot_height;
            target.z -= foot_height;
            foot.offset_target_location = target;

            let normal = hit.impact_normal;
            foot.offset_target_rotation = rotator_to_quat(
                -direction_to_angle(Vec2::new(normal.z, normal.x)),
                0.0,
                direction_to_angle(Vec2::new(normal.z, normal.y)),
            );
        }

        if self.pending() {
            foot.offset_spring.reset();
            foot.offset_location = foot.offset_target_location;
            foot.offset_rotation = foot.offset_target_rotation;
        } else {
            foot.offset_location = spring_damp(
                &mut foot.offset_spring,
                foot.offset_location,
                foot.offset_target_location,
                delta_time,
                OFFSET_LOCATION_FREQUENCY,
                OFFSET_LOCATION_DAMPING_RATIO,
                OFFSET_LOCATION_TARGET_VELOCITY_AMOUNT,
            );
            foot.offset_rotation = quat_interp_to(
                foot.offset_rotation,
                foot.offset_target_rotation,
                delta_time,
                OFFSET_ROTATION_INTERPOLATION_SPEED,
            );
        }

        *final_location += foot.offset_location;
        *final_rotation = foot.offset_rotation * *final_rotation;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnimConfig;
    use crate::curves::CurveValues;
    use crate::input::LocomotionMode;
    use crate::query::{EmptyWorld, Plane, PlaneWorld};
    use crate::state::UpdateMode;

    fn grounded_snapshot() -> LocomotionSnapshot {
        let mut snapshot = LocomotionSnapshot::default();
        snapshot.locomotion_mode = LocomotionMode::OnGround;
        snapshot
    }

    fn lock_curves(lock: f32) -> CurveValues {
        CurveValues::new()
            .with(names::FOOT_LEFT_IK, 1.0)
            .with(names::FOOT_LEFT_LOCK, lock)
            .with(names::FOOT_RIGHT_IK, 1.0)
            .with(names::FOOT_RIGHT_LOCK, lock)
    }

    fn step(feet: &mut FeetState, snapshot: &LocomotionSnapshot, curves: &CurveValues, config: &AnimConfig) {
        feet.update(
            &FrameInput::new(snapshot, curves, config, 0.016, UpdateMode::Smoothed),
            &EmptyWorld,
            0.0,
        );
    }

    #[test]
    fn test_lock_amount_only_decreases_below_full() {
        let snapshot = grounded_snapshot();
        let config = AnimConfig::default();
        let mut feet = FeetState::default();

        // 从零开始的部分锁定不生效
        step(&mut feet, &snapshot, &lock_curves(0.3), &config);
        assert_eq!(feet.left.lock_amount, 0.0);

        step(&mut feet, &snapshot, &lock_curves(1.0), &config);
        step(&mut feet, &snapshot, &lock_curves(0.3), &config);
        assert!((feet.left.lock_amount - 0.3).abs() < 0.001);

        // 未满锁时上升被忽略
        step(&mut feet, &snapshot, &lock_curves(0.7), &config);
        assert!((feet.left.lock_amount - 0.3).abs() < 0.001);

        step(&mut feet, &snapshot, &lock_curves(0.1), &config);
        assert!((feet.left.lock_amount - 0.1).abs() < 0.001);
    }

    #[test]
    fn test_full_lock_captures_and_holds_position() {
        let snapshot = grounded_snapshot();
        let config = AnimConfig::default();
        let mut feet = FeetState::default();

        feet.left.target_location = Vec3::new(10.0, -10.0, 0.0);
        step(&mut feet, &snapshot, &lock_curves(1.0), &config);
        assert_eq!(feet.left.lock_amount, 1.0);
        assert!((feet.left.lock_location - Vec3::new(10.0, -10.0, 0.0)).length() < 0.001);

        // 姿势移动了脚，锁定点不变
        feet.left.target_location = Vec3::new(30.0, -10.0, 0.0);
        step(&mut feet, &snapshot, &lock_curves(1.0), &config);
        assert!((feet.left.lock_location - Vec3::new(10.0, -10.0, 0.0)).length() < 0.001);
        assert!((feet.left.ik_location - Vec3::new(10.0, -10.0, 0.0)).length() < 0.001);

        // 半锁时 IK 位于目标与锁定点之间
        step(&mut feet, &snapshot, &lock_curves(0.5), &config);
        assert!((feet.left.ik_location - Vec3::new(20.0, -10.0, 0.0)).length() < 0.001);
    }

    #[test]
    fn test_release_clears_lock() {
        let snapshot = grounded_snapshot();
        let config = AnimConfig::default();
        let mut feet = FeetState::default();

        feet.right.target_location = Vec3::new(0.0, 10.0, 0.0);
        step(&mut feet, &snapshot, &lock_curves(1.0), &config);
        assert_eq!(feet.right.lock_amount, 1.0);

        step(&mut feet, &snapshot, &lock_curves(0.0), &config);
        assert_eq!(feet.right.lock_amount, 0.0);
        assert_eq!(feet.right.lock_location, Vec3::ZERO);
        assert!((feet.right.ik_location - Vec3::new(0.0, 10.0, 0.0)).length() < 0.001);
    }

    #[test]
    fn test_moving_decays_lock() {
        let mut snapshot = grounded_snapshot();
        let config = AnimConfig::default();
        let mut feet = FeetState::default();

        step(&mut feet, &snapshot, &lock_curves(1.0), &config);
        snapshot.locomotion.moving_smooth = true;
        step(&mut feet, &snapshot, &lock_curves(1.0), &config);
        assert!((feet.left.lock_amount - (1.0 - 0.016 * 5.0)).abs() < 0.001);

        // 回放模式下直接释放
        feet.update(
            &FrameInput::new(&snapshot, &lock_curves(1.0), &config, 0.016, UpdateMode::Snapshot),
            &EmptyWorld,
            0.0,
        );
        assert_eq!(feet.left.lock_amount, 0.0);
    }

    #[test]
    fn test_disable_foot_lock() {
        let snapshot = grounded_snapshot();
        let config = AnimConfig {
            disable_foot_lock: true,
            ..Default::default()
        };
        let mut feet = FeetState::default();
        step(&mut feet, &snapshot, &lock_curves(1.0), &config);
        assert_eq!(feet.left.lock_amount, 0.0);
    }

    #[test]
    fn test_foot_lock_block_scales_lock() {
        let snapshot = grounded_snapshot();
        let config = AnimConfig::default();
        let mut feet = FeetState::default();
        step(&mut feet, &snapshot, &lock_curves(1.0), &config);
        feet.update(
            &FrameInput::new(&snapshot, &lock_curves(1.0), &config, 0.016, UpdateMode::Smoothed),
            &EmptyWorld,
            0.5,
        );
        assert!((feet.left.lock_amount - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_lock_follows_moving_base() {
        let mut snapshot = grounded_snapshot();
        snapshot.movement_base.has_relative_location = true;
        let config = AnimConfig::default();
        let mut feet = FeetState::default();

        feet.left.target_location = Vec3::new(5.0, 0.0, 0.0);
        step(&mut feet, &snapshot, &lock_curves(1.0), &config);

        snapshot.movement_base.location = Vec3::new(0.0, 100.0, 0.0);
        step(&mut feet, &snapshot, &lock_curves(1.0), &config);
        assert!((feet.left.lock_location - Vec3::new(5.0, 100.0, 0.0)).length() < 0.001);
    }

    #[test]
    fn test_ground_offset_on_raised_floor() {
        let mut snapshot = grounded_snapshot();
        snapshot.component_transform = Transform::from_translation_rotation(Vec3::ZERO, Quat::IDENTITY);
        let config = AnimConfig::default();
        let curves = CurveValues::new()
            .with(names::FOOT_LEFT_IK, 1.0)
            .with(names::FOOT_RIGHT_IK, 1.0);
        let world = PlaneWorld::new().with_plane(Plane::ground(10.0));

        let mut feet = FeetState::default();
        feet.update(
            &FrameInput::new(&snapshot, &curves, &config, 0.016, UpdateMode::Snapshot),
            &world,
            0.0,
        );

        assert!((feet.left.offset_target_location - Vec3::new(0.0, 0.0, 10.0)).length() < 0.001);
        assert!((feet.left.offset_location - Vec3::new(0.0, 0.0, 10.0)).length() < 0.001);
        assert!((feet.left.ik_location.z - 10.0).abs() < 0.001);
        assert!((feet.min_max_pelvis_offset_z - Vec2::new(10.0, 10.0)).length() < 0.001);

        // 未命中时保留目标
        feet.update(
            &FrameInput::new(&snapshot, &curves, &config, 0.016, UpdateMode::Smoothed),
            &EmptyWorld,
            0.0,
        );
        assert!((feet.left.offset_target_location.z - 10.0).abs() < 0.001);
    }

    #[test]
    fn test_ground_offset_rotation_follows_slope() {
        let snapshot = grounded_snapshot();
        let config = AnimConfig::default();
        let curves = CurveValues::new().with(names::FOOT_LEFT_IK, 1.0);
        // 向 +X 上坡 20 度
        let angle = 20f32.to_radians();
        let world = PlaneWorld::new().with_plane(Plane::new(Vec3::ZERO, Vec3::new(-angle.sin(), 0.0, angle.cos())));

        let mut feet = FeetState::default();
        feet.update(
            &FrameInput::new(&snapshot, &curves, &config, 0.016, UpdateMode::Snapshot),
            &world,
            0.0,
        );

        let up = feet.left.offset_target_rotation * Vec3::Z;
        assert!((up - Vec3::new(-angle.sin(), 0.0, angle.cos())).length() < 0.001);
    }

    #[test]
    fn test_in_air_resets_offset_targets() {
        let mut snapshot = grounded_snapshot();
        snapshot.locomotion_mode = LocomotionMode::InAir;
        let config = AnimConfig::default();
        let curves = CurveValues::new().with(names::FOOT_LEFT_IK, 1.0);

        let mut feet = FeetState::default();
        feet.left.offset_target_location = Vec3::new(0.0, 0.0, 5.0);
        feet.left.offset_location = Vec3::new(0.0, 0.0, 5.0);
        feet.update(
            &FrameInput::new(&snapshot, &curves, &config, 0.1, UpdateMode::Smoothed),
            &EmptyWorld,
            0.0,
        );

        assert_eq!(feet.left.offset_target_location, Vec3::ZERO);
        // 以 15 的速度回落，dt 0.1 时一步到位
        assert!(feet.left.offset_location.length() < 0.001);
    }
}
