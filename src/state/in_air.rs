//! 空中状态：起跳播放速率、落地预测、空中倾斜

use glam::Vec3;

use super::{FrameInput, LeanState};
use crate::curves::names;
use crate::math::{clamp01, lerp, mapped_range_clamped};
use crate::query::{CollisionShape, GeometryQuery, QueryChannel};

const JUMP_REFERENCE_SPEED: f32 = 600.0;
const JUMP_MIN_PLAY_RATE: f32 = 1.2;
const JUMP_MAX_PLAY_RATE: f32 = 1.5;

const PREDICTION_VERTICAL_VELOCITY_THRESHOLD: f32 = -200.0;
const PREDICTION_MIN_VERTICAL_VELOCITY: f32 = -4000.0;
const PREDICTION_MAX_VERTICAL_VELOCITY: f32 = -200.0;
const PREDICTION_MIN_SWEEP_DISTANCE: f32 = 150.0;
const PREDICTION_MAX_SWEEP_DISTANCE: f32 = 2000.0;
const PREDICTION_MIN_ALLOWANCE: f32 = 1.0e-4;

const LEAN_REFERENCE_SPEED: f32 = 350.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InAirState {
    /// 垂直速度（厘米/秒）
    pub vertical_velocity: f32,
    pub jumped: bool,
    pub jump_play_rate: f32,
    pub ground_prediction_amount: f32,
}

impl Default for InAirState {
    fn default() -> Self {
        Self {
            vertical_velocity: 0.0,
            jumped: false,
            jump_play_rate: 1.0,
            ground_prediction_amount: 1.0,
        }
    }
}

impl InAirState {
    /// 主线程：起跳标记在向上速度出现后保持，直到显式重置
    pub fn update_main(&mut self, pending_update: bool) {
        self.jumped = !pending_update && (self.jumped || self.vertical_velocity > 0.0);
    }

    pub fn reset_jumped(&mut self) {
        self.jumped = false;
    }

    pub fn update(&mut self, frame: &FrameInput, query: &dyn GeometryQuery, lean: &mut LeanState) {
        let snapshot = frame.snapshot;
        if !snapshot.in_air() {
            return;
        }

        if self.jumped {
            self.jump_play_rate = lerp(
                JUMP_MIN_PLAY_RATE,
                JUMP_MAX_PLAY_RATE,
                clamp01(snapshot.locomotion.speed / JUMP_REFERENCE_SPEED),
            );
        }

        self.vertical_velocity = snapshot.locomotion.velocity.z;

        self.ground_prediction_amount = self.predict_ground(frame, query);

        self.update_lean(frame, lean);
    }

    /// 沿速度方向扫掠胶囊体，命中可行走地面时按命中比例取曲线值
    fn predict_ground(&self, frame: &FrameInput, query: &dyn GeometryQuery) -> f32 {
        if self.vertical_velocity > PREDICTION_VERTICAL_VELOCITY_THRESHOLD {
            return 0.0;
        }

        let allowance = 1.0 - frame.curves.value_clamped01(names::GROUND_PREDICTION_BLOCK);
        if allowance <= PREDICTION_MIN_ALLOWANCE {
            return 0.0;
        }

        let locomotion = &frame.snapshot.locomotion;

        let mut direction = locomotion.velocity;
        direction.z = direction.z.clamp(PREDICTION_MIN_VERTICAL_VELOCITY, PREDICTION_MAX_VERTICAL_VELOCITY);
        let direction = direction.normalize_or_zero();

        let distance = mapped_range_clamped(
            (PREDICTION_MAX_VERTICAL_VELOCITY, PREDICTION_MIN_VERTICAL_VELOCITY),
            (PREDICTION_MIN_SWEEP_DISTANCE, PREDICTION_MAX_SWEEP_DISTANCE),
            self.vertical_velocity,
        );

        let start = locomotion.location;
        let end = start + direction * distance * locomotion.scale;

        let hit = query.sweep(
            start,
            end,
            CollisionShape::Capsule {
                radius: locomotion.capsule_radius,
                half_height: locomotion.capsule_half_height,
            },
            QueryChannel::WorldStatic,
        );

        match hit {
            Some(hit) if hit.impact_normal.z >= locomotion.walkable_floor_z => {
                frame.config.ground_prediction_curve.evaluate(hit.time) * allowance
            }
            _ => 0.0,
        }
    }

    fn update_lean(&self, frame: &FrameInput, lean: &mut LeanState) {
        let locomotion = &frame.snapshot.locomotion;

        let relative_velocity: Vec3 = locomotion.unrotate(locomotion.velocity) / LEAN_REFERENCE_SPEED
            * frame.config.in_air_lean_curve.evaluate(self.vertical_velocity);

        lean.approach(
            relative_velocity,
            frame.delta_time,
            frame.config.lean_interpolation_speed,
            frame.mode,
        );
    }
}
