//! Human Locomotion - 人形角色程序化运动动画状态引擎
//!
//! 把角色的原始运动信号（速度、加速度、视角、地面接触、动画曲线）
//! 转换为平滑的混合权重与脚部 IK 变换，供动画混合与 IK 层使用：
//! - 姿态 / 分层权重
//! - 视线与脊柱反向旋转
//! - 地面运动：移动方向、速度混合、冲刺、步幅、播放速率、倾斜
//! - 空中：起跳、落地预测、空中倾斜
//! - 脚部 IK：脚锁状态机、地面偏移
//! - 过渡动画与原地转身
//!
//! 每帧分三个阶段：主线程阶段、并行阶段、求值后阶段，见 [`instance`]。

pub mod config;
pub mod curves;
pub mod input;
pub mod instance;
pub mod math;
pub mod playback;
pub mod query;
pub mod state;

pub use config::{get_config, reset_config, set_config, AnimConfig, TransitionClips};
pub use curves::{CurveSource, CurveValues};
pub use input::{CharacterSource, Gait, LocomotionMode, LocomotionSnapshot, RotationMode, Stance};
pub use instance::{
    update_parallel_batch, ControlRigInput, HumanAnimInstance, LinkedAnimInstance, MainContext,
    ParallelJob, PublishedState,
};
pub use playback::{AnimClip, AnimationPlayback, PlaybackLog};
pub use query::{GeometryQuery, PlaneWorld};
pub use state::{HipsDirection, UpdateMode};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LocomotionError {
    #[error("Invalid curve: {0}")]
    InvalidCurve(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, LocomotionError>;
