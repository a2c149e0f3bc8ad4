//! 主线程令牌

use std::marker::PhantomData;
use std::thread::{self, ThreadId};

/// 证明调用方位于实例的所属线程
///
/// 令牌不能跨线程传递（`!Send`、`!Sync`），只能在当前线程构造。
/// 实例第一次收到令牌时绑定其线程，之后使用其他线程的令牌会直接断言失败。
#[derive(Debug)]
pub struct MainContext {
    thread: ThreadId,
    _not_send: PhantomData<*const ()>,
}

impl MainContext {
    pub fn current() -> Self {
        Self {
            thread: thread::current().id(),
            _not_send: PhantomData,
        }
    }

    pub fn thread_id(&self) -> ThreadId {
        self.thread
    }

    /// 当前线程是否为令牌所属线程
    pub fn is_current(&self) -> bool {
        thread::current().id() == self.thread
    }
}
