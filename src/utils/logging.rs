//! 日志工具模块
//!
//! 提供日志格式化和输出的辅助函数

use crate::services::LookupResult;
use tracing::{info, warn};

/// 记录程序启动信息
///
/// # 参数
/// - `pool_location`: 题库位置
/// - `requested`: 请求的题目数量
pub fn log_startup(pool_location: &str, requested: usize) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 题库查询");
    info!("📁 题库: {}", pool_location);
    info!("📋 请求题目数: {}", requested);
    info!("{}", "=".repeat(60));
}

/// 逐条记录查询诊断
///
/// # 参数
/// - `ids`: 请求的题目 ID
/// - `result`: 查询结果
pub fn log_lookup_messages(ids: &[String], result: &LookupResult) {
    for (index, message) in result.messages.iter().enumerate() {
        let id = ids.get(index).map(String::as_str).unwrap_or("-");
        match result.results.get(index) {
            Some(slot) if slot.is_found() => info!("✓ [{}] {}: {}", index, id, message),
            _ => warn!("✗ [{}] {}: {}", index, id, message),
        }
    }
}

/// 打印最终统计信息
///
/// # 参数
/// - `found`: 找到的数量
/// - `total`: 请求总数
pub fn print_final_stats(found: usize, total: usize) {
    info!("\n{}", "=".repeat(60));
    info!("📊 查询完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 找到: {}/{}", found, total);
    info!("❌ 缺失: {}", total.saturating_sub(found));
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("Question #T1A01", 10), "Question #...");
        assert_eq!(truncate_text("短文本", 10), "短文本");
    }
}
