//! 人形动画实例
//!
//! 每帧三个阶段，严格按顺序执行：
//! - 主线程阶段 [`HumanAnimInstance::update_main_context`]：同步网格旋转、采集快照、
//!   消费转身请求、更新起跳标记、读取脚部插槽
//! - 并行阶段 [`HumanAnimInstance::update_parallel`]：全部数值平滑与几何查询，可在工作线程运行
//! - 求值后阶段 [`HumanAnimInstance::post_evaluate`]：播放信箱中的过渡动画，清除回放标记
//!
//! 角色不存在时三个阶段都直接跳过，保留上一帧状态。

use std::sync::{Arc, PoisonError, RwLock};
use std::thread::ThreadId;

use super::context::MainContext;
use super::output::{AnimStateSnapshot, ControlRigInput, PublishedState, SharedPublishedState};
use crate::config::{get_config, AnimConfig};
use crate::curves::{names, CurveSource, CurveValues};
use crate::input::{CharacterSource, LocomotionSnapshot, Stance};
use crate::playback::{AnimClip, AnimationPlayback};
use crate::query::GeometryQuery;
use crate::state::{
    select_quick_stop, FeetState, FrameInput, HipsDirection, InAirState, LayeringState, LeanState,
    LookState, OnGroundState, PoseState, RotateInPlaceState, SpineRotationState, TransitionRequest,
    TransitionSide, TransitionsState, UpdateMode,
};
use crate::Result;

pub struct HumanAnimInstance {
    config: AnimConfig,

    /// 历史失效标记：为真时所有插值直接吸附到目标
    pending_update: bool,
    character_present: bool,
    owner_thread: Option<ThreadId>,

    snapshot: LocomotionSnapshot,

    layering: LayeringState,
    pose: PoseState,
    look: LookState,
    spine: SpineRotationState,
    lean: LeanState,
    on_ground: OnGroundState,
    in_air: InAirState,
    feet: FeetState,
    transitions: TransitionsState,
    rotate_in_place: RotateInPlaceState,

    published: SharedPublishedState,
    frame: u64,
}

impl Default for HumanAnimInstance {
    fn default() -> Self {
        Self::new(get_config())
    }
}

impl HumanAnimInstance {
    pub fn new(config: AnimConfig) -> Self {
        let control_rig = ControlRigInput {
            use_hand_ik_bones: config.use_hand_ik_bones,
            use_foot_ik_bones: config.use_foot_ik_bones,
            ..Default::default()
        };

        Self {
            config,
            pending_update: true,
            character_present: false,
            owner_thread: None,
            snapshot: LocomotionSnapshot::default(),
            layering: LayeringState::default(),
            pose: PoseState::default(),
            look: LookState::default(),
            spine: SpineRotationState::default(),
            lean: LeanState::default(),
            on_ground: OnGroundState::default(),
            in_air: InAirState::default(),
            feet: FeetState::default(),
            transitions: TransitionsState::default(),
            rotate_in_place: RotateInPlaceState::default(),
            published: Arc::new(RwLock::new(PublishedState {
                control_rig,
                ..Default::default()
            })),
            frame: 0,
        }
    }

    // ========== 配置 ==========

    pub fn config(&self) -> &AnimConfig {
        &self.config
    }

    /// 替换实例配置，无效配置保持原配置不变
    pub fn set_config(&mut self, config: AnimConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    // ========== 回放标记 ==========

    /// 标记历史失效（例如实例休眠后恢复），下一帧所有插值直接吸附
    pub fn mark_pending_update(&mut self) {
        self.pending_update = true;
    }

    pub fn is_pending_update(&self) -> bool {
        self.pending_update
    }

    fn mode(&self) -> UpdateMode {
        UpdateMode::from_pending(self.pending_update)
    }

    fn bind_context(&mut self, context: &MainContext) {
        match self.owner_thread {
            None => self.owner_thread = Some(context.thread_id()),
            Some(owner) => assert_eq!(
                owner,
                context.thread_id(),
                "主线程操作必须在实例所属线程调用"
            ),
        }
    }

    // ========== 主线程阶段 ==========

    pub fn update_main_context(&mut self, context: &MainContext, character: Option<&mut dyn CharacterSource>) {
        self.bind_context(context);

        let Some(character) = character else {
            self.character_present = false;
            log::trace!("角色不存在，跳过主线程阶段");
            return;
        };
        self.character_present = true;

        if character.uses_absolute_rotation() {
            // 网格使用绝对旋转时手动与角色同步
            let rotation = character.actor_transform().rotation * character.base_rotation_offset();
            character.set_component_rotation(rotation.normalize());
        }

        self.snapshot = character.snapshot();

        let mode = self.mode();
        self.on_ground.update_main(
            self.snapshot.locomotion.speed,
            self.config.pivot_activation_speed_threshold,
            mode,
        );
        self.in_air.update_main(self.pending_update);
        self.feet.update_targets(&*character, self.config.use_foot_ik_bones);
    }

    // ========== 并行阶段 ==========

    pub fn update_parallel(&mut self, delta_time: f32, curves: &dyn CurveSource, query: &dyn GeometryQuery) {
        if !self.character_present {
            log::trace!("角色不存在，跳过并行阶段");
            return;
        }

        let mode = self.mode();
        if mode.is_snapshot() {
            log::trace!("回放帧，所有插值直接吸附");
        }

        let frame = FrameInput::new(&self.snapshot, curves, &self.config, delta_time, mode);

        self.layering.update(curves);
        self.pose.update(curves);

        if self.config.update_look_in_parallel {
            self.look.update(&frame);
        }

        self.spine.update(&frame);
        self.on_ground.update(&frame, &self.pose, &mut self.lean);
        self.in_air.update(&frame, query, &mut self.lean);
        // 水中状态没有专门的处理

        // 使用上一帧的脚锁屏蔽量
        self.feet.update(&frame, query, self.rotate_in_place.foot_lock_block_amount);

        self.transitions.update(&frame, &self.feet);
        self.rotate_in_place.update(&frame);

        self.publish();
    }

    /// 在主线程上运行并行阶段，入队的动态过渡立即播放
    pub fn update_parallel_on_main(
        &mut self,
        context: &MainContext,
        delta_time: f32,
        curves: &dyn CurveSource,
        query: &dyn GeometryQuery,
        playback: &mut dyn AnimationPlayback,
    ) {
        self.bind_context(context);
        self.update_parallel(delta_time, curves, query);
        self.transitions.play_queued(playback, &self.config);
    }

    // ========== 求值后阶段 ==========

    pub fn post_evaluate(&mut self, context: &MainContext, playback: Option<&mut dyn AnimationPlayback>) {
        self.bind_context(context);

        if !self.character_present {
            log::trace!("角色不存在，跳过求值后阶段");
            return;
        }

        match playback {
            Some(playback) => {
                self.transitions.play_queued(playback, &self.config);
            }
            None => {
                if let Some(clip) = self.transitions.queued_dynamic_transition.take() {
                    log::warn!("没有播放器，丢弃动态过渡: {}", clip);
                }
            }
        }

        self.pending_update = false;
    }

    // ========== 视线 ==========

    pub fn reinitialize_look(&mut self) {
        self.look.reinitialize();
    }

    /// 用当前快照更新视线，关闭 `update_look_in_parallel` 时由动画图每帧调用一次
    pub fn update_look(&mut self, delta_time: f32) {
        if !self.character_present {
            return;
        }

        let curves = CurveValues::new();
        let frame = FrameInput::new(&self.snapshot, &curves, &self.config, delta_time, self.mode());
        self.look.update(&frame);

        let look = self.look;
        self.published
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .states
            .look = look;
    }

    // ========== 地面 / 空中 ==========

    pub fn set_hips_direction(&mut self, direction: HipsDirection) {
        self.on_ground.set_hips_direction(direction);
    }

    pub fn activate_pivot(&mut self) {
        self.on_ground.activate_pivot();
    }

    pub fn reset_jumped(&mut self) {
        self.in_air.reset_jumped();
    }

    // ========== 过渡动画 ==========

    pub fn play_quick_stop_animation(&mut self, context: &MainContext, playback: &mut dyn AnimationPlayback) {
        let request = select_quick_stop(&self.snapshot, &self.config);
        self.play_transition_request(context, playback, request, false);
    }

    /// 在过渡插槽上播放指定动画
    ///
    /// `from_standing_idle_only` 为真时只在静止站立时播放
    #[allow(clippy::too_many_arguments)]
    pub fn play_transition_animation(
        &mut self,
        context: &MainContext,
        playback: &mut dyn AnimationPlayback,
        clip: Option<&AnimClip>,
        blend_in: f32,
        blend_out: f32,
        play_rate: f32,
        start_time: f32,
        from_standing_idle_only: bool,
    ) {
        self.bind_context(context);

        if !self.character_present {
            return;
        }

        if from_standing_idle_only
            && (self.snapshot.locomotion.moving || self.snapshot.stance != Stance::Standing)
        {
            return;
        }

        let Some(clip) = clip else {
            log::debug!("过渡动画未配置，跳过");
            return;
        };

        let request = TransitionRequest {
            side: TransitionSide::Left,
            blend_in,
            blend_out,
            play_rate,
            start_time,
        };
        playback.play_slot(request.to_slot_request(clip.clone()));
    }

    #[allow(clippy::too_many_arguments)]
    pub fn play_transition_left_animation(
        &mut self,
        context: &MainContext,
        playback: &mut dyn AnimationPlayback,
        blend_in: f32,
        blend_out: f32,
        play_rate: f32,
        start_time: f32,
        from_standing_idle_only: bool,
    ) {
        let request = TransitionRequest {
            side: TransitionSide::Left,
            blend_in,
            blend_out,
            play_rate,
            start_time,
        };
        self.play_transition_request(context, playback, request, from_standing_idle_only);
    }

    #[allow(clippy::too_many_arguments)]
    pub fn play_transition_right_animation(
        &mut self,
        context: &MainContext,
        playback: &mut dyn AnimationPlayback,
        blend_in: f32,
        blend_out: f32,
        play_rate: f32,
        start_time: f32,
        from_standing_idle_only: bool,
    ) {
        let request = TransitionRequest {
            side: TransitionSide::Right,
            blend_in,
            blend_out,
            play_rate,
            start_time,
        };
        self.play_transition_request(context, playback, request, from_standing_idle_only);
    }

    fn play_transition_request(
        &mut self,
        context: &MainContext,
        playback: &mut dyn AnimationPlayback,
        request: TransitionRequest,
        from_standing_idle_only: bool,
    ) {
        let clip = request
            .side
            .clip(&self.config.transition_clips, self.snapshot.stance)
            .cloned();

        self.play_transition_animation(
            context,
            playback,
            clip.as_ref(),
            request.blend_in,
            request.blend_out,
            request.play_rate,
            request.start_time,
            from_standing_idle_only,
        );
    }

    pub fn stop_transition_and_turn_in_place_animations(
        &mut self,
        context: &MainContext,
        playback: &mut dyn AnimationPlayback,
        blend_out: f32,
    ) {
        self.bind_context(context);
        playback.stop_slot(names::TRANSITION_SLOT, blend_out);
    }

    // ========== 输出 ==========

    pub fn control_rig_input(&self) -> ControlRigInput {
        ControlRigInput {
            use_hand_ik_bones: self.config.use_hand_ik_bones,
            use_foot_ik_bones: self.config.use_foot_ik_bones,
            velocity_blend_forward_amount: self.on_ground.velocity_blend.forward_amount,
            velocity_blend_backward_amount: self.on_ground.velocity_blend.backward_amount,
            spine_yaw_angle: self.spine.yaw,
            foot_left_ik_rotation: self.feet.left.ik_rotation,
            foot_left_ik_location: self.feet.left.ik_location,
            foot_left_ik_amount: self.feet.left.ik_amount,
            foot_right_ik_rotation: self.feet.right.ik_rotation,
            foot_right_ik_location: self.feet.right.ik_location,
            foot_right_ik_amount: self.feet.right.ik_amount,
            min_max_pelvis_offset_z: self.feet.min_max_pelvis_offset_z,
        }
    }

    pub fn state_snapshot(&self) -> AnimStateSnapshot {
        AnimStateSnapshot {
            layering: self.layering,
            pose: self.pose,
            look: self.look,
            spine: self.spine,
            lean: self.lean,
            on_ground: self.on_ground,
            in_air: self.in_air,
            feet: self.feet,
            transitions: self.transitions.clone(),
            rotate_in_place: self.rotate_in_place,
        }
    }

    /// 已发布状态的共享句柄
    pub fn published(&self) -> SharedPublishedState {
        Arc::clone(&self.published)
    }

    fn publish(&mut self) {
        self.frame += 1;

        let state = PublishedState {
            control_rig: self.control_rig_input(),
            states: self.state_snapshot(),
            frame: self.frame,
        };
        *self.published.write().unwrap_or_else(PoisonError::into_inner) = state;
    }

    // ========== 状态访问 ==========

    pub fn snapshot(&self) -> &LocomotionSnapshot {
        &self.snapshot
    }

    pub fn layering(&self) -> &LayeringState {
        &self.layering
    }

    pub fn pose(&self) -> &PoseState {
        &self.pose
    }

    pub fn look(&self) -> &LookState {
        &self.look
    }

    pub fn spine(&self) -> &SpineRotationState {
        &self.spine
    }

    pub fn lean(&self) -> &LeanState {
        &self.lean
    }

    pub fn on_ground(&self) -> &OnGroundState {
        &self.on_ground
    }

    pub fn in_air(&self) -> &InAirState {
        &self.in_air
    }

    pub fn feet(&self) -> &FeetState {
        &self.feet
    }

    pub fn transitions(&self) -> &TransitionsState {
        &self.transitions
    }

    pub fn rotate_in_place(&self) -> &RotateInPlaceState {
        &self.rotate_in_place
    }
}
