//! 题目查询服务 - 业务能力层
//!
//! 持有一份只读题库，按调用方给出的题目 ID 顺序取出题目并整理格式。
//!
//! ## 行为
//!
//! - 结果长度始终等于请求的 ID 数量，按请求位置（而不是题库顺序）放置
//! - 没找到的位置填入空占位并附带诊断消息，不会让整个查询失败
//! - 题库为空或输入不是数组时，返回单元素的退化结果 `[""]`
//! - 每次查询都完整遍历题库，不做缓存

use crate::error::AppResult;
use crate::models::loaders::load_pool;
use crate::models::{NormalizedQuestion, Pool, QuestionSlot, RawQuestion};
use crate::services::observer::{LookupObserver, TracingObserver};
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::sync::Arc;

/// 识别的选项标记
pub const STRIP_ANSWER_PREFIX: &str = "strip-answer-prefix";

pub const EMPTY_POOL_MESSAGE: &str = "pool is empty";
pub const NOT_AN_ARRAY_MESSAGE: &str = "input is not an array";
pub const FOUND_MESSAGE: &str = "question found";

const ANSWER_LETTERS: [&str; 4] = ["A", "B", "C", "D"];

/// 答案前缀 "A. " 的长度
const ANSWER_PREFIX_LEN: usize = 3;

/// 查询选项
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LookupOptions {
    /// 去掉每个答案开头的 3 个字符
    pub strip_answer_prefix: bool,
}

impl LookupOptions {
    /// 从选项字符串解析，包含 `strip-answer-prefix` 即开启
    pub fn parse(flags: &str) -> Self {
        Self {
            strip_answer_prefix: flags.contains(STRIP_ANSWER_PREFIX),
        }
    }

    pub fn strip_prefix() -> Self {
        Self {
            strip_answer_prefix: true,
        }
    }
}

/// 查询结果：题目与诊断消息按位置一一对应
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LookupResult {
    pub results: Vec<QuestionSlot>,
    pub messages: Vec<String>,
}

impl LookupResult {
    fn rejected(message: &str) -> Self {
        Self {
            results: vec![QuestionSlot::Rejected],
            messages: vec![message.to_string()],
        }
    }

    /// 是否因前置条件不满足而被拒绝
    pub fn is_rejected(&self) -> bool {
        matches!(self.results.as_slice(), [QuestionSlot::Rejected])
    }

    pub fn found_count(&self) -> usize {
        self.results.iter().filter(|s| s.is_found()).count()
    }

    /// 所有找到的题目（保持请求顺序）
    pub fn questions(&self) -> impl Iterator<Item = &NormalizedQuestion> {
        self.results.iter().filter_map(QuestionSlot::question)
    }
}

/// 题目查询服务
///
/// 题库加载后不可变，可以在多个任务间共享同一个实例。
pub struct QuestionLookup {
    pool: Option<Arc<Pool>>,
    observer: Arc<dyn LookupObserver>,
}

impl QuestionLookup {
    /// 使用已加载的题库创建
    pub fn new(pool: Pool) -> Self {
        Self::from_shared(Arc::new(pool))
    }

    pub fn from_shared(pool: Arc<Pool>) -> Self {
        Self {
            pool: Some(pool),
            observer: Arc::new(TracingObserver),
        }
    }

    /// 没有题库的实例，所有查询都会返回退化结果
    pub fn empty() -> Self {
        Self {
            pool: None,
            observer: Arc::new(TracingObserver),
        }
    }

    /// 从文件路径或 URL 加载题库后创建；加载失败时直接返回错误
    pub async fn load(location: &str) -> AppResult<Self> {
        let pool = load_pool(location).await?;
        Ok(Self::new(pool))
    }

    /// 替换观察者
    pub fn with_observer(mut self, observer: impl LookupObserver + 'static) -> Self {
        self.observer = Arc::new(observer);
        self
    }

    pub fn pool(&self) -> Option<&Pool> {
        self.pool.as_deref()
    }

    /// 按 ID 查询题目
    pub fn lookup_by_ids<S: AsRef<str>>(
        &self,
        ids: &[S],
        options: LookupOptions,
    ) -> LookupResult {
        let requested: Vec<Option<&str>> = ids.iter().map(|id| Some(id.as_ref())).collect();
        lookup_slots(
            self.pool(),
            Some(requested.as_slice()),
            options,
            self.observer.as_ref(),
        )
    }

    /// 按 JSON 形式的 ID 列表查询
    ///
    /// 不是数组时返回退化结果；数组里不是字符串的元素永远不会命中。
    pub fn lookup_json(&self, ids: &JsonValue, options: LookupOptions) -> LookupResult {
        let requested: Option<Vec<Option<&str>>> = ids
            .as_array()
            .map(|items| items.iter().map(JsonValue::as_str).collect());
        lookup_slots(
            self.pool(),
            requested.as_deref(),
            options,
            self.observer.as_ref(),
        )
    }
}

/// 纯函数形式的查询，供不需要持有题库的调用方使用
pub fn lookup_by_ids<S: AsRef<str>>(
    pool: &Pool,
    ids: &[S],
    options: LookupOptions,
    observer: &dyn LookupObserver,
) -> LookupResult {
    let requested: Vec<Option<&str>> = ids.iter().map(|id| Some(id.as_ref())).collect();
    lookup_slots(Some(pool), Some(requested.as_slice()), options, observer)
}

fn lookup_slots(
    pool: Option<&Pool>,
    requested: Option<&[Option<&str>]>,
    options: LookupOptions,
    observer: &dyn LookupObserver,
) -> LookupResult {
    let pool = match pool {
        Some(pool) if !pool.is_empty() => pool,
        _ => {
            observer.on_error(EMPTY_POOL_MESSAGE);
            return LookupResult::rejected(EMPTY_POOL_MESSAGE);
        }
    };
    let Some(requested) = requested else {
        observer.on_error(NOT_AN_ARRAY_MESSAGE);
        return LookupResult::rejected(NOT_AN_ARRAY_MESSAGE);
    };

    observer.on_enter(
        &requested
            .iter()
            .map(|id| id.map(str::to_string))
            .collect::<Vec<_>>(),
    );

    // 重复的 ID 只占用第一次出现的位置
    let mut positions: HashMap<&str, usize> = HashMap::with_capacity(requested.len());
    for (index, id) in requested.iter().enumerate() {
        if let Some(id) = id {
            positions.entry(*id).or_insert(index);
        }
    }

    let mut results = vec![QuestionSlot::Missing; requested.len()];
    let mut messages = vec![String::new(); requested.len()];

    for subelement in &pool.subelements {
        for group in &subelement.groups {
            for raw in &group.questions {
                if let Some(&index) = positions.get(raw.qid.as_str()) {
                    results[index] = QuestionSlot::Found(normalize(raw, options));
                    messages[index] = FOUND_MESSAGE.to_string();
                }
            }
        }
    }

    let mut found = 0;
    for (index, slot) in results.iter().enumerate() {
        if slot.is_found() {
            found += 1;
            continue;
        }
        let message = format!("result is empty at index {}", index);
        observer.on_miss(index, &message);
        messages[index] = message;
    }

    observer.on_exit(found, requested.len());
    LookupResult { results, messages }
}

fn normalize(raw: &RawQuestion, options: LookupOptions) -> NormalizedQuestion {
    let correct = ANSWER_LETTERS
        .iter()
        .position(|letter| *letter == raw.correct)
        .map_or(-1, |i| i as i32);

    let answers = raw
        .answers
        .iter()
        .map(|answer| {
            if options.strip_answer_prefix {
                answer.chars().skip(ANSWER_PREFIX_LEN).collect()
            } else {
                answer.clone()
            }
        })
        .collect();

    NormalizedQuestion {
        qid: raw.qid.clone(),
        figure: raw.figure().map(str::to_string),
        title: format!("Question #{} {}", raw.qid, raw.text),
        correct,
        answers,
    }
}
