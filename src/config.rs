use crate::error::{AppError, AppResult, ConfigError, FileError};
use serde::Deserialize;
use std::path::Path;

/// 指定配置文件路径的环境变量
pub const CONFIG_FILE_ENV: &str = "QUESTION_POOL_CONFIG";

/// 程序配置
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 题库位置（文件路径或 http(s) URL）
    pub pool_location: String,
    /// 额外扫描的题库目录（为空时不扫描）
    pub pool_folder: Option<String>,
    /// 要查询的题目 ID
    pub question_ids: Vec<String>,
    /// 是否去掉答案前缀 "A. "
    pub strip_answer_prefix: bool,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 查询结果输出文件（为空时只打印到标准输出）
    pub output_file: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pool_location: "output/element2.json".to_string(),
            pool_folder: None,
            question_ids: Vec::new(),
            strip_answer_prefix: true,
            verbose_logging: false,
            output_file: None,
        }
    }
}

impl Config {
    /// 从环境变量读取配置，未设置的项使用默认值
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// 从 TOML 文件读取配置
    pub fn from_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;
        Self::from_toml_str(&content).map_err(|e| match e {
            AppError::Config(ConfigError::TomlParseFailed { source, .. }) => {
                AppError::Config(ConfigError::TomlParseFailed {
                    path: path.display().to_string(),
                    source,
                })
            }
            other => other,
        })
    }

    /// 解析 TOML 文本
    pub fn from_toml_str(content: &str) -> AppResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// 加载配置：若设置了 `QUESTION_POOL_CONFIG` 则以该文件为基础，
    /// 再叠加环境变量
    pub fn load() -> AppResult<Self> {
        match std::env::var(CONFIG_FILE_ENV) {
            Ok(path) if !path.trim().is_empty() => {
                if !Path::new(&path).exists() {
                    return Err(AppError::File(FileError::NotFound { path }));
                }
                Ok(Self::from_file(&path)?.with_env_overrides())
            }
            _ => Ok(Self::from_env()),
        }
    }

    /// 用环境变量覆盖已有配置
    pub fn with_env_overrides(self) -> Self {
        Self {
            pool_location: std::env::var("POOL_LOCATION").unwrap_or(self.pool_location),
            pool_folder: std::env::var("POOL_FOLDER").ok().or(self.pool_folder),
            question_ids: std::env::var("QUESTION_IDS")
                .map(|v| parse_id_list(&v))
                .unwrap_or(self.question_ids),
            strip_answer_prefix: std::env::var("STRIP_ANSWER_PREFIX").ok().and_then(|v| v.parse().ok()).unwrap_or(self.strip_answer_prefix),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(self.verbose_logging),
            output_file: std::env::var("OUTPUT_FILE").ok().or(self.output_file),
        }
    }

    /// 用命令行参数替换题目 ID 列表（没有参数时保持不变）
    pub fn with_question_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let ids: Vec<String> = ids
            .into_iter()
            .flat_map(|s| parse_id_list(s.as_ref()))
            .collect();
        if !ids.is_empty() {
            self.question_ids = ids;
        }
        self
    }
}

/// 把 "T1A01, T1A02" 这样的逗号分隔列表拆成 ID
fn parse_id_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
