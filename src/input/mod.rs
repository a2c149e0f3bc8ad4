//! 运动输入
//!
//! 角色/移动组件每帧提供的只读数据，以及读取这些数据的协作者接口。

mod character;
mod snapshot;

pub use character::CharacterSource;
pub use snapshot::{
    Gait, LocomotionMode, LocomotionSnapshot, LocomotionState, MovementBaseSnapshot,
    RotationMode, Stance, ViewSnapshot,
};
