use serde::{Deserialize, Serialize};

/// 一个考试元素的完整题库（例如 Element 2, Technician Class）
///
/// 由题库生成器输出的 JSON 文件反序列化而来，加载后只读。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pool {
    /// 元素编号，如 "2"
    #[serde(default)]
    pub elem: String,
    /// 执照等级名称，如 "Technician"
    #[serde(default)]
    pub elname: String,
    /// 题库有效年份
    #[serde(default, deserialize_with = "deserialize_period")]
    pub yrvalid: Period,
    /// 题库生效日期
    #[serde(default, deserialize_with = "deserialize_period")]
    pub effective: Period,
    /// 生成时间
    #[serde(default)]
    pub timestamp: String,
    /// 生成题库时使用的源文件
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub filetype: String,
    pub subelements: Vec<Subelement>,
}

impl Pool {
    /// 题库是否为空（没有任何子元素）
    pub fn is_empty(&self) -> bool {
        self.subelements.is_empty()
    }

    /// 按遍历顺序迭代所有题目
    pub fn questions(&self) -> impl Iterator<Item = &RawQuestion> {
        self.subelements
            .iter()
            .flat_map(|se| se.groups.iter())
            .flat_map(|g| g.questions.iter())
    }

    /// 按遍历顺序列出所有题目 ID
    pub fn question_ids(&self) -> Vec<&str> {
        self.questions().map(|q| q.qid.as_str()).collect()
    }

    pub fn question_count(&self) -> usize {
        self.questions().count()
    }
}

/// 起止时间段；年份既可能是字符串也可能是整数
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    #[serde(default, deserialize_with = "deserialize_year")]
    pub begin: String,
    #[serde(default, deserialize_with = "deserialize_year")]
    pub end: String,
}

/// 子元素（顶层主题，如 "T1"）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Subelement {
    #[serde(default)]
    pub elem: String,
    pub sub_el: String,
    #[serde(default)]
    pub description: String,
    /// 声明的题目数量
    #[serde(default, deserialize_with = "deserialize_count")]
    pub numq: Option<usize>,
    /// 声明的分组数量
    #[serde(default, deserialize_with = "deserialize_count")]
    pub numg: Option<usize>,
    pub groups: Vec<Group>,
}

/// 题目分组（如 "T1A"）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Group {
    #[serde(default)]
    pub subelement: String,
    pub group_id: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub topics: Vec<String>,
    pub questions: Vec<RawQuestion>,
}

impl Group {
    /// 分组的主题列表；文件里没有时按 ';' 拆分描述得到
    pub fn topic_list(&self) -> Vec<String> {
        if !self.topics.is_empty() {
            return self.topics.clone();
        }
        self.description
            .split(';')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// 题库中存储的原始题目
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawQuestion {
    #[serde(default)]
    pub subelement: String,
    #[serde(default)]
    pub group: String,
    #[serde(default)]
    pub num: String,
    /// 题目 ID，如 "T1A05"
    pub qid: String,
    pub text: String,
    /// 正确答案字母 A-D
    pub correct: String,
    /// 关联的插图，如 "T-2"
    #[serde(default)]
    pub figure: Option<String>,
    /// 相关的 FCC 条款
    #[serde(default)]
    pub fcc: String,
    /// 四个带 "A. " 前缀的选项
    pub answers: Vec<String>,
    #[serde(default)]
    pub topics: Vec<String>,
}

impl RawQuestion {
    /// 插图名称；空字符串视为没有插图
    pub fn figure(&self) -> Option<&str> {
        self.figure.as_deref().filter(|f| !f.trim().is_empty())
    }
}

// 年份在文件里可能写成 "2022" 也可能写成 2022
fn deserialize_year<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Visitor;
    use std::fmt;

    struct YearVisitor;

    impl<'de> Visitor<'de> for YearVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or integer representing a year or date")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(String::new())
        }
    }

    deserializer.deserialize_any(YearVisitor)
}

// 生成器在没有解析到日期时写入 ""，否则写入 {"begin": .., "end": ..}
fn deserialize_period<'de, D>(deserializer: D) -> Result<Period, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawPeriod {
        Range(Period),
        Text(String),
        Missing(()),
    }

    Ok(match RawPeriod::deserialize(deserializer)? {
        RawPeriod::Range(period) => period,
        RawPeriod::Text(begin) => Period {
            begin,
            end: String::new(),
        },
        RawPeriod::Missing(()) => Period::default(),
    })
}

// 数量可能是整数、数字字符串或空字符串
fn deserialize_count<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawCount {
        Number(usize),
        Text(String),
        Missing(()),
    }

    Ok(match RawCount::deserialize(deserializer)? {
        RawCount::Number(n) => Some(n),
        RawCount::Text(s) => s.trim().parse().ok(),
        RawCount::Missing(()) => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_json() -> serde_json::Value {
        json!({
            "elem": "2",
            "elname": "Technician",
            "yrvalid": {"begin": 2022, "end": "2026"},
            "effective": "",
            "subelements": [{
                "sub_el": "T1",
                "description": "COMMISSION'S RULES",
                "numq": "6",
                "numg": 1,
                "groups": [{
                    "group_id": "T1A",
                    "description": "Purpose of the amateur service; Definitions",
                    "questions": [{
                        "qid": "T1A01",
                        "text": "Which of the following is part of the Basis and Purpose?",
                        "correct": "C",
                        "figure": "",
                        "answers": ["A. a", "B. b", "C. c", "D. d"]
                    }]
                }]
            }]
        })
    }

    #[test]
    fn test_deserialize_generator_output() {
        let pool: Pool = serde_json::from_value(sample_json()).unwrap();

        assert_eq!(pool.elname, "Technician");
        assert_eq!(pool.yrvalid.begin, "2022");
        assert_eq!(pool.yrvalid.end, "2026");
        assert_eq!(pool.effective, Period::default());
        assert_eq!(pool.subelements[0].numq, Some(6));
        assert_eq!(pool.subelements[0].numg, Some(1));
        assert_eq!(pool.question_ids(), vec!["T1A01"]);
        assert_eq!(pool.questions().next().unwrap().figure(), None);
    }

    #[test]
    fn test_missing_questions_is_rejected() {
        let broken = json!({
            "subelements": [{"sub_el": "T1", "groups": [{"group_id": "T1A"}]}]
        });
        assert!(serde_json::from_value::<Pool>(broken).is_err());
    }

    #[test]
    fn test_missing_subelements_is_rejected() {
        assert!(serde_json::from_value::<Pool>(json!({"elem": "2"})).is_err());
    }

    #[test]
    fn test_topic_list_falls_back_to_description() {
        let group = Group {
            group_id: "T1A".to_string(),
            description: "Purpose of the amateur service; Definitions ; ".to_string(),
            ..Group::default()
        };
        assert_eq!(
            group.topic_list(),
            vec!["Purpose of the amateur service", "Definitions"]
        );

        let group = Group {
            topics: vec!["Spectrum".to_string()],
            ..group
        };
        assert_eq!(group.topic_list(), vec!["Spectrum"]);
    }
}
