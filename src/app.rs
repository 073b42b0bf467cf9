use crate::config::Config;
use crate::error::AppError;
use crate::models::{load_all_pools, question_id};
use crate::services::{LookupOptions, LookupResult, PoolSummary, QuestionLookup};
use crate::utils::logging::{log_lookup_messages, log_startup, print_final_stats, truncate_text};
use anyhow::{Context, Result};
use tracing::{debug, info, warn};

/// 应用主结构
pub struct App {
    config: Config,
    lookup: QuestionLookup,
}

impl App {
    /// 初始化应用：加载题库并输出统计
    pub async fn initialize(config: Config) -> Result<Self> {
        log_startup(&config.pool_location, config.question_ids.len());

        let lookup = QuestionLookup::load(&config.pool_location)
            .await
            .with_context(|| format!("无法加载题库: {}", config.pool_location))?;

        if let Some(pool) = lookup.pool() {
            PoolSummary::from_pool(pool).log_summary();
        }

        if let Some(folder) = &config.pool_folder {
            summarize_folder(folder).await?;
        }

        Ok(Self { config, lookup })
    }

    /// 运行查询并输出结果
    pub async fn run(&self) -> Result<LookupResult> {
        let ids = &self.config.question_ids;
        if ids.is_empty() {
            warn!("⚠️ 没有指定题目 ID (QUESTION_IDS 或命令行参数)");
        }
        for id in ids.iter().filter(|id| !question_id::is_well_formed(id)) {
            warn!("题目 ID 格式可疑: {:?}", id);
        }

        let options = LookupOptions {
            strip_answer_prefix: self.config.strip_answer_prefix,
        };
        let result = self.lookup.lookup_by_ids(ids.as_slice(), options);

        log_lookup_messages(ids, &result);
        for question in result.questions() {
            debug!("{}", truncate_text(&question.title, 80));
        }

        let json = serde_json::to_string_pretty(&result)?;
        println!("{}", json);

        if let Some(path) = &self.config.output_file {
            tokio::fs::write(path, &json)
                .await
                .map_err(|e| AppError::file_write_failed(path, e))?;
            info!("结果已保存至: {}", path);
        }

        print_final_stats(result.found_count(), ids.len());
        Ok(result)
    }
}

/// 统计文件夹中的所有题库
async fn summarize_folder(folder: &str) -> Result<()> {
    info!("\n📁 正在扫描题库目录: {}", folder);
    let pools = load_all_pools(folder).await?;
    for (path, pool) in &pools {
        info!("— {}", path.display());
        PoolSummary::from_pool(pool).log_summary();
    }
    Ok(())
}
