//! 三阶段帧流水线的端到端测试

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use glam::{Quat, Vec3};

use human_locomotion::config::TransitionClips;
use human_locomotion::curves::names;
use human_locomotion::input::{LocomotionState, MovementBaseSnapshot, ViewSnapshot};
use human_locomotion::math::Transform;
use human_locomotion::query::Plane;
use human_locomotion::{
    update_parallel_batch, AnimClip, AnimConfig, CharacterSource, CurveValues, Gait, HipsDirection,
    HumanAnimInstance, LinkedAnimInstance, LocomotionMode, MainContext, ParallelJob, PlaneWorld,
    PlaybackLog, RotationMode, Stance,
};

struct TestCharacter {
    locomotion: LocomotionState,
    view: ViewSnapshot,
    locomotion_mode: LocomotionMode,
    gait: Gait,
    rotation_mode: RotationMode,
    sockets: HashMap<String, Transform>,
}

impl Default for TestCharacter {
    fn default() -> Self {
        Self {
            locomotion: LocomotionState::default(),
            view: ViewSnapshot::default(),
            locomotion_mode: LocomotionMode::OnGround,
            gait: Gait::Walking,
            rotation_mode: RotationMode::ViewDirection,
            sockets: HashMap::new(),
        }
    }
}

impl TestCharacter {
    fn set_foot(&mut self, bone: &str, location: Vec3) {
        self.sockets.insert(
            bone.to_string(),
            Transform::from_translation_rotation(location, Quat::IDENTITY),
        );
    }

    fn set_velocity(&mut self, velocity: Vec3) {
        self.locomotion.velocity = velocity;
        self.locomotion.speed = velocity.length();
        self.locomotion.velocity_yaw = velocity.y.atan2(velocity.x).to_degrees();
        self.locomotion.moving = velocity.length() > 1.0;
        self.locomotion.moving_smooth = self.locomotion.moving;
    }
}

impl CharacterSource for TestCharacter {
    fn locomotion(&self) -> LocomotionState {
        self.locomotion
    }

    fn view(&self) -> ViewSnapshot {
        self.view
    }

    fn movement_base(&self) -> MovementBaseSnapshot {
        MovementBaseSnapshot::default()
    }

    fn locomotion_mode(&self) -> LocomotionMode {
        self.locomotion_mode
    }

    fn stance(&self) -> Stance {
        Stance::Standing
    }

    fn gait(&self) -> Gait {
        self.gait
    }

    fn rotation_mode(&self) -> RotationMode {
        self.rotation_mode
    }

    fn actor_transform(&self) -> Transform {
        Transform::from_translation_rotation(self.locomotion.location, self.locomotion.rotation)
    }

    fn component_transform(&self) -> Transform {
        Transform::from_translation_rotation(self.locomotion.location, self.locomotion.rotation)
    }

    fn set_component_rotation(&mut self, _rotation: Quat) {}

    fn socket_transform(&self, name: &str) -> Option<Transform> {
        self.sockets.get(name).copied()
    }
}

fn run_frame(
    context: &MainContext,
    instance: &mut HumanAnimInstance,
    character: &mut TestCharacter,
    curves: &CurveValues,
    world: &PlaneWorld,
    playback: &mut PlaybackLog,
    delta_time: f32,
) {
    instance.update_main_context(context, Some(character));
    instance.update_parallel(delta_time, curves, world);
    instance.post_evaluate(context, Some(playback));
}

fn grounded_curves() -> CurveValues {
    CurveValues::new()
        .with(names::POSE_GROUNDED, 1.0)
        .with(names::POSE_STANDING, 1.0)
        .with(names::POSE_GAIT, 1.0)
        .with(names::FOOT_LEFT_IK, 1.0)
        .with(names::FOOT_RIGHT_IK, 1.0)
        .with(names::FOOT_LEFT_LOCK, 1.0)
        .with(names::FOOT_RIGHT_LOCK, 1.0)
}

#[test]
fn snapshot_frames_are_idempotent() {
    let context = MainContext::current();
    let world = PlaneWorld::new().with_plane(Plane::ground(0.0));
    let curves = grounded_curves();

    let mut character = TestCharacter::default();
    character.gait = Gait::Sprinting;
    character.set_velocity(Vec3::new(600.0, 50.0, 0.0));
    character.locomotion.acceleration = Vec3::new(800.0, 0.0, 0.0);
    character.view.yaw = 70.0;
    character.set_foot(names::FOOT_LEFT_IK_BONE, Vec3::new(5.0, -12.0, 3.0));
    character.set_foot(names::FOOT_RIGHT_IK_BONE, Vec3::new(-5.0, 12.0, 3.0));

    let mut instance = HumanAnimInstance::new(AnimConfig::default());

    instance.update_main_context(&context, Some(&mut character));
    instance.update_parallel(0.016, &curves, &world);
    let first = instance.state_snapshot();
    let first_rig = instance.control_rig_input();

    instance.mark_pending_update();
    instance.update_main_context(&context, Some(&mut character));
    instance.update_parallel(0.016, &curves, &world);

    assert_eq!(instance.state_snapshot(), first);
    assert_eq!(instance.control_rig_input(), first_rig);
}

#[test]
fn sprint_acceleration_window_and_reset() {
    let context = MainContext::current();
    let world = PlaneWorld::new().with_plane(Plane::ground(0.0));
    let curves = grounded_curves();
    let mut playback = PlaybackLog::new();

    let mut character = TestCharacter::default();
    character.set_velocity(Vec3::new(600.0, 0.0, 0.0));
    character.locomotion.acceleration = Vec3::new(1000.0, 0.0, 0.0);

    let mut instance = HumanAnimInstance::new(AnimConfig::default());
    // 首帧为回放帧，先用走路消耗掉
    run_frame(&context, &mut instance, &mut character, &curves, &world, &mut playback, 0.1);
    assert!(!instance.is_pending_update());

    character.gait = Gait::Sprinting;
    let dt = 0.1;
    let mut elapsed = 0.0;
    for _ in 0..6 {
        run_frame(&context, &mut instance, &mut character, &curves, &world, &mut playback, dt);
        elapsed += dt;

        let on_ground = instance.on_ground();
        if on_ground.sprint_time >= 0.5 {
            assert_eq!(on_ground.sprint_acceleration_amount, 0.0);
        } else {
            assert!(on_ground.sprint_acceleration_amount > 0.0);
        }
    }
    assert!(elapsed >= 0.5);
    assert!(instance.on_ground().sprint_time >= 0.5);
    assert_eq!(instance.on_ground().sprint_acceleration_amount, 0.0);

    character.gait = Gait::Running;
    run_frame(&context, &mut instance, &mut character, &curves, &world, &mut playback, dt);
    assert_eq!(instance.on_ground().sprint_time, 0.0);
}

#[test]
fn look_follows_turn_direction_toward_large_view_yaw() {
    let context = MainContext::current();
    let world = PlaneWorld::new().with_plane(Plane::ground(0.0));
    let curves = CurveValues::new();
    let mut playback = PlaybackLog::new();

    for (yaw_speed, expect_positive) in [(120.0, true), (-120.0, false)] {
        let mut character = TestCharacter::default();
        let mut instance = HumanAnimInstance::new(AnimConfig::default());

        run_frame(&context, &mut instance, &mut character, &curves, &world, &mut playback, 0.016);
        assert_eq!(instance.look().yaw, 0.0);

        character.view.yaw = 170.0;
        character.locomotion.yaw_speed = yaw_speed;
        run_frame(&context, &mut instance, &mut character, &curves, &world, &mut playback, 0.016);

        let yaw = instance.look().yaw;
        assert!(yaw.abs() > 0.0 && yaw.abs() < 170.0);
        assert_eq!(yaw > 0.0, expect_positive);
    }
}

#[test]
fn dynamic_transition_plays_exactly_once() {
    let context = MainContext::current();
    let world = PlaneWorld::new();
    let curves = grounded_curves().with(names::ALLOW_TRANSITIONS, 1.0);
    let mut playback = PlaybackLog::new();

    let config = AnimConfig {
        dynamic_transition_clips: TransitionClips {
            standing_left: Some(AnimClip::new("DynamicLeft")),
            standing_right: Some(AnimClip::new("DynamicRight")),
            ..Default::default()
        },
        ..Default::default()
    };
    let mut instance = HumanAnimInstance::new(config);

    let mut character = TestCharacter::default();
    character.set_foot(names::FOOT_LEFT_IK_BONE, Vec3::new(0.0, -10.0, 0.0));
    character.set_foot(names::FOOT_RIGHT_IK_BONE, Vec3::new(0.0, 10.0, 0.0));

    run_frame(&context, &mut instance, &mut character, &curves, &world, &mut playback, 0.016);
    assert_eq!(instance.feet().left.lock_amount, 1.0);
    assert!(playback.events.is_empty());

    // 姿势里的左脚滑开，锁定点不动
    character.set_foot(names::FOOT_LEFT_IK_BONE, Vec3::new(20.0, -10.0, 0.0));

    instance.update_main_context(&context, Some(&mut character));
    instance.update_parallel(0.016, &curves, &world);
    assert_eq!(
        instance.transitions().queued_dynamic_transition.peek().map(AnimClip::name),
        Some("DynamicLeft")
    );
    assert!(playback.events.is_empty());
    instance.post_evaluate(&context, Some(&mut playback));
    assert!(instance.transitions().queued_dynamic_transition.is_empty());

    // 冷却期内不会再次入队
    for _ in 0..2 {
        run_frame(&context, &mut instance, &mut character, &curves, &world, &mut playback, 0.016);
    }

    let played: Vec<_> = playback.played().collect();
    assert_eq!(played.len(), 1);
    assert_eq!(played[0].clip.name(), "DynamicLeft");
    assert_eq!(played[0].slot, "Transition");
    assert!((played[0].play_rate - 1.5).abs() < 0.001);
}

#[test]
fn slow_fall_has_no_ground_prediction() {
    let context = MainContext::current();
    let world = PlaneWorld::new().with_plane(Plane::ground(0.0));
    let curves = CurveValues::new();
    let mut playback = PlaybackLog::new();

    let mut character = TestCharacter::default();
    character.locomotion_mode = LocomotionMode::InAir;
    character.locomotion.location = Vec3::new(0.0, 0.0, 120.0);
    character.set_velocity(Vec3::new(0.0, 0.0, -100.0));

    let mut instance = HumanAnimInstance::new(AnimConfig::default());
    run_frame(&context, &mut instance, &mut character, &curves, &world, &mut playback, 0.016);
    assert_eq!(instance.in_air().ground_prediction_amount, 0.0);

    character.set_velocity(Vec3::new(0.0, 0.0, -1500.0));
    run_frame(&context, &mut instance, &mut character, &curves, &world, &mut playback, 0.016);
    assert!(instance.in_air().ground_prediction_amount > 0.0);
}

#[test]
fn jump_latches_across_frames() {
    let context = MainContext::current();
    let world = PlaneWorld::new();
    let curves = CurveValues::new();
    let mut playback = PlaybackLog::new();

    let mut character = TestCharacter::default();
    character.locomotion_mode = LocomotionMode::InAir;
    character.set_velocity(Vec3::new(600.0, 0.0, 400.0));

    let mut instance = HumanAnimInstance::new(AnimConfig::default());
    run_frame(&context, &mut instance, &mut character, &curves, &world, &mut playback, 0.016);
    // 回放帧不判定起跳
    assert!(!instance.in_air().jumped);

    run_frame(&context, &mut instance, &mut character, &curves, &world, &mut playback, 0.016);
    assert!(instance.in_air().jumped);

    character.set_velocity(Vec3::new(600.0, 0.0, -300.0));
    run_frame(&context, &mut instance, &mut character, &curves, &world, &mut playback, 0.016);
    assert!(instance.in_air().jumped);

    instance.reset_jumped();
    run_frame(&context, &mut instance, &mut character, &curves, &world, &mut playback, 0.016);
    assert!(!instance.in_air().jumped);
}

#[test]
fn batch_update_publishes_each_instance() {
    let context = MainContext::current();
    let world = PlaneWorld::new().with_plane(Plane::ground(0.0));
    let curves = grounded_curves();

    let mut characters: Vec<TestCharacter> = (0..8)
        .map(|i| {
            let mut character = TestCharacter::default();
            character.set_velocity(Vec3::new(100.0 + i as f32 * 50.0, 0.0, 0.0));
            character
        })
        .collect();
    let mut instances: Vec<HumanAnimInstance> =
        (0..8).map(|_| HumanAnimInstance::new(AnimConfig::default())).collect();

    for (instance, character) in instances.iter_mut().zip(characters.iter_mut()) {
        instance.update_main_context(&context, Some(character));
    }

    let mut jobs: Vec<ParallelJob> = instances
        .iter_mut()
        .map(|instance| ParallelJob {
            instance,
            curves: &curves,
            delta_time: 0.016,
        })
        .collect();
    update_parallel_batch(&mut jobs, &world);
    drop(jobs);

    for instance in &instances {
        let published = instance.published();
        let published = published.read().unwrap();
        assert_eq!(published.frame, 1);
        assert_eq!(published.control_rig, instance.control_rig_input());
        assert_eq!(published.control_rig.velocity_blend_forward_amount, 1.0);
    }
}

#[test]
fn linked_instance_reads_primary_output() {
    let context = MainContext::current();
    let world = PlaneWorld::new().with_plane(Plane::ground(0.0));
    let curves = grounded_curves();
    let mut playback = PlaybackLog::new();

    let primary = Arc::new(Mutex::new(HumanAnimInstance::new(AnimConfig::default())));
    let mut linked = LinkedAnimInstance::new();
    linked.link(&primary);

    let mut character = TestCharacter::default();
    character.view.yaw = 30.0;
    {
        let mut primary = primary.lock().unwrap();
        run_frame(&context, &mut primary, &mut character, &curves, &world, &mut playback, 0.016);
    }

    let published = linked.published_state().unwrap();
    assert_eq!(published.frame, 1);
    assert!((published.states.look.yaw - 30.0).abs() < 0.001);

    linked.set_hips_direction(HipsDirection::RightForward);
    assert_eq!(
        primary.lock().unwrap().on_ground().hips_direction,
        HipsDirection::RightForward
    );

    drop(primary);
    linked.activate_pivot();
    assert!(linked.published_state().is_none());
}
