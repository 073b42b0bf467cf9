use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// 整理后返回给调用方的题目
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedQuestion {
    pub qid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub figure: Option<String>,
    /// "Question #T1A01 <题干>"
    pub title: String,
    /// 正确答案下标 0-3；无法识别的字母为 -1
    pub correct: i32,
    pub answers: Vec<String>,
}

impl NormalizedQuestion {
    /// 正确答案的文本（下标无效时为 None）
    pub fn correct_answer(&self) -> Option<&str> {
        usize::try_from(self.correct)
            .ok()
            .and_then(|i| self.answers.get(i))
            .map(String::as_str)
    }
}

/// 查询结果中的一个位置
///
/// 序列化形式：
/// - `Found` → 题目对象
/// - `Missing` → `{}`
/// - `Rejected` → `""`（前置条件不满足时的唯一元素）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionSlot {
    Found(NormalizedQuestion),
    Missing,
    Rejected,
}

impl QuestionSlot {
    pub fn question(&self) -> Option<&NormalizedQuestion> {
        match self {
            QuestionSlot::Found(q) => Some(q),
            _ => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, QuestionSlot::Found(_))
    }
}

impl Serialize for QuestionSlot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            QuestionSlot::Found(q) => q.serialize(serializer),
            QuestionSlot::Missing => serializer.serialize_map(Some(0))?.end(),
            QuestionSlot::Rejected => serializer.serialize_str(""),
        }
    }
}
