use crate::error::{ApiError, AppError, AppResult, FileError};
use crate::models::pool::Pool;
use futures::future::join_all;
use std::path::{Path, PathBuf};
use tokio::fs;

/// 题库来源
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PoolSource {
    File(PathBuf),
    Url(String),
}

impl PoolSource {
    /// `http://` 或 `https://` 开头视为 URL，其余视为文件路径
    pub fn parse(location: &str) -> Self {
        let trimmed = location.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            PoolSource::Url(trimmed.to_string())
        } else {
            PoolSource::File(PathBuf::from(trimmed))
        }
    }
}

impl std::fmt::Display for PoolSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PoolSource::File(path) => write!(f, "{}", path.display()),
            PoolSource::Url(url) => write!(f, "{}", url),
        }
    }
}

/// 从文件路径或 URL 加载题库
pub async fn load_pool(location: &str) -> AppResult<Pool> {
    match PoolSource::parse(location) {
        PoolSource::File(path) => load_pool_file(&path).await,
        PoolSource::Url(url) => fetch_pool(&url).await,
    }
}

/// 从 JSON 文件加载题库
pub async fn load_pool_file(path: &Path) -> AppResult<Pool> {
    let path_str = path.display().to_string();
    if !path.exists() {
        return Err(AppError::File(FileError::NotFound { path: path_str }));
    }

    let content = fs::read_to_string(path)
        .await
        .map_err(|e| AppError::file_read_failed(&path_str, e))?;

    let pool: Pool =
        serde_json::from_str(&content).map_err(|e| AppError::pool_parse_failed(&path_str, e))?;

    tracing::debug!(
        "从 {} 加载题库: {} 个子元素, {} 道题",
        path_str,
        pool.subelements.len(),
        pool.question_count()
    );
    Ok(pool)
}

/// 通过 HTTP 获取题库
pub async fn fetch_pool(url: &str) -> AppResult<Pool> {
    tracing::debug!("正在下载题库: {}", url);

    let response = reqwest::get(url).await?;

    let status = response.status();
    if !status.is_success() {
        return Err(AppError::Api(ApiError::BadResponse {
            url: url.to_string(),
            status: status.as_u16(),
        }));
    }

    let body = response.text().await?;

    let pool: Pool =
        serde_json::from_str(&body).map_err(|e| AppError::remote_parse_failed(url, e))?;
    Ok(pool)
}

/// 加载文件夹中所有 `.json` 题库
///
/// 解析失败的文件只记录警告并跳过；结果按文件名排序。
pub async fn load_all_pools(folder_path: &str) -> AppResult<Vec<(PathBuf, Pool)>> {
    let folder = PathBuf::from(folder_path);

    if !folder.is_dir() {
        return Err(AppError::File(FileError::DirectoryNotFound {
            path: folder_path.to_string(),
        }));
    }

    let mut json_files = Vec::new();
    let mut entries = fs::read_dir(&folder)
        .await
        .map_err(|e| AppError::file_read_failed(folder_path, e))?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) == Some("json") {
            json_files.push(path);
        }
    }
    json_files.sort();

    if json_files.is_empty() {
        tracing::warn!("在文件夹 {} 中没有找到题库文件", folder_path);
        return Ok(Vec::new());
    }

    let loaded = join_all(json_files.iter().map(|path| load_pool_file(path))).await;

    let mut pools = Vec::new();
    for (path, result) in json_files.into_iter().zip(loaded) {
        match result {
            Ok(pool) => {
                tracing::info!(
                    "成功加载 {}: {} 道题",
                    path.file_name().unwrap_or_default().to_string_lossy(),
                    pool.question_count()
                );
                pools.push((path, pool));
            }
            Err(e) => {
                tracing::warn!("加载文件失败 {}: {}", path.display(), e);
            }
        }
    }

    Ok(pools)
}
