//! 动画播放接口
//!
//! 单次插槽动画只能在主线程启动。并行阶段选出的过渡动画先放进信箱，
//! 由主线程阶段取出播放。

use std::fmt;
use std::sync::Arc;

/// 动画片段句柄
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct AnimClip(Arc<str>);

impl AnimClip {
    pub fn new(name: &str) -> Self {
        Self(Arc::from(name))
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AnimClip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AnimClip({})", self.0)
    }
}

impl fmt::Display for AnimClip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 插槽播放请求
#[derive(Clone, Debug, PartialEq)]
pub struct SlotPlayRequest {
    pub clip: AnimClip,
    pub slot: String,
    pub blend_in: f32,
    pub blend_out: f32,
    pub play_rate: f32,
    pub loop_count: u32,
    pub start_time: f32,
}

/// 动画播放协作者（仅主线程）
pub trait AnimationPlayback {
    fn play_slot(&mut self, request: SlotPlayRequest);

    fn stop_slot(&mut self, slot: &str, blend_out: f32);
}

/// 单槽信箱：并行阶段写入，主线程阶段取出一次
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransitionMailbox {
    queued: Option<AnimClip>,
}

impl TransitionMailbox {
    pub fn post(&mut self, clip: AnimClip) {
        self.queued = Some(clip);
    }

    pub fn take(&mut self) -> Option<AnimClip> {
        self.queued.take()
    }

    pub fn peek(&self) -> Option<&AnimClip> {
        self.queued.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.queued.is_none()
    }
}

/// 播放事件
#[derive(Clone, Debug, PartialEq)]
pub enum PlaybackEvent {
    Play(SlotPlayRequest),
    Stop { slot: String, blend_out: f32 },
}

/// 只记录事件的播放器，供预览与调试
#[derive(Clone, Debug, Default)]
pub struct PlaybackLog {
    pub events: Vec<PlaybackEvent>,
}

impl PlaybackLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn played(&self) -> impl Iterator<Item = &SlotPlayRequest> {
        self.events.iter().filter_map(|event| match event {
            PlaybackEvent::Play(request) => Some(request),
            PlaybackEvent::Stop { .. } => None,
        })
    }
}

impl AnimationPlayback for PlaybackLog {
    fn play_slot(&mut self, request: SlotPlayRequest) {
        self.events.push(PlaybackEvent::Play(request));
    }

    fn stop_slot(&mut self, slot: &str, blend_out: f32) {
        self.events.push(PlaybackEvent::Stop {
            slot: slot.to_string(),
            blend_out,
        });
    }
}
