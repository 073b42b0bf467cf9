//! 查询观察者
//!
//! 查询逻辑不直接依赖全局日志，入口、出口、未命中和错误都通过这里通知。

use tracing::{debug, warn};

/// 查询过程中的事件回调
pub trait LookupObserver: Send + Sync {
    /// 开始查询
    fn on_enter(&self, _requested: &[Option<String>]) {}

    /// 查询结束
    fn on_exit(&self, _found: usize, _requested: usize) {}

    /// 某个位置没有找到题目
    fn on_miss(&self, _index: usize, _message: &str) {}

    /// 前置条件不满足
    fn on_error(&self, _message: &str) {}
}

/// 把事件写入 tracing 日志
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl LookupObserver for TracingObserver {
    fn on_enter(&self, requested: &[Option<String>]) {
        debug!("查询题目: {:?}", requested);
    }

    fn on_exit(&self, found: usize, requested: usize) {
        debug!("查询完成: 找到 {}/{}", found, requested);
    }

    fn on_miss(&self, index: usize, message: &str) {
        warn!("位置 {} 没有题目: {}", index, message);
    }

    fn on_error(&self, message: &str) {
        warn!("查询被拒绝: {}", message);
    }
}

/// 丢弃所有事件
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl LookupObserver for NoopObserver {}
