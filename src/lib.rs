//! # Ham Question Pool
//!
//! 业余无线电执照考试题库查询
//!
//! ## 架构设计
//!
//! ### ① 数据层（Models）
//! - `models/pool` - 题库结构：Pool → Subelement → Group → RawQuestion
//! - `models/question` - 整理后的题目与结果占位
//! - `models/loaders` - 从文件或 URL 异步加载题库
//!
//! ### ② 业务能力层（Services）
//! - `QuestionLookup` - 按题目 ID 查询，保持请求顺序并返回诊断消息
//! - `LookupObserver` - 查询事件回调，默认写入 tracing 日志
//! - `PoolSummary` - 题库统计
//!
//! ### ③ 应用层
//! - `App` - 加载配置和题库，执行查询并输出 JSON
//!
//! ## 模块结构

pub mod app;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod services;
pub mod utils;

// 重新导出常用类型
pub use app::App;
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{NormalizedQuestion, Pool, QuestionSlot};
pub use services::{LookupOptions, LookupResult, QuestionLookup};
