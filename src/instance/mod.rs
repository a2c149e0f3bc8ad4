//! 动画实例：三阶段帧更新、发布状态、链接实例、批量并行更新

mod context;
mod human;
mod linked;
mod output;

pub use context::MainContext;
pub use human::HumanAnimInstance;
pub use linked::{LinkedAnimInstance, LocomotionControl};
pub use output::{
    AnimStateSnapshot, ControlRigInput, PublishedState, PublishedStateReader, SharedPublishedState,
};

use rayon::prelude::*;

use crate::curves::CurveSource;
use crate::query::GeometryQuery;

/// 批量并行阶段中的一个实例
pub struct ParallelJob<'a> {
    pub instance: &'a mut HumanAnimInstance,
    pub curves: &'a dyn CurveSource,
    pub delta_time: f32,
}

/// 用 rayon 并行运行多个实例的并行阶段
///
/// 每个实例同一时刻只出现在一个任务中，实例之间互不依赖。
pub fn update_parallel_batch(jobs: &mut [ParallelJob<'_>], query: &dyn GeometryQuery) {
    jobs.par_iter_mut().for_each(|job| {
        job.instance.update_parallel(job.delta_time, job.curves, query);
    });

    log::trace!("批量并行更新完成: {} 个实例", jobs.len());
}
