//! 题库统计
//!
//! 统计子元素、分组、题目和主题数量，并检查文件中声明的数量是否与实际一致。

use crate::models::Pool;
use tracing::info;

/// 单个分组的统计
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSummary {
    pub group_id: String,
    pub questions: usize,
    pub topics: usize,
}

/// 单个子元素的统计
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubelementSummary {
    pub sub_el: String,
    pub groups: Vec<GroupSummary>,
}

impl SubelementSummary {
    pub fn question_count(&self) -> usize {
        self.groups.iter().map(|g| g.questions).sum()
    }
}

/// 整个题库的统计
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoolSummary {
    pub elem: String,
    pub elname: String,
    pub subelements: Vec<SubelementSummary>,
    pub groups: usize,
    pub questions: usize,
    pub topics: usize,
    /// 声明数量与实际数量不一致的描述
    pub mismatches: Vec<String>,
}

impl PoolSummary {
    pub fn from_pool(pool: &Pool) -> Self {
        let mut summary = PoolSummary {
            elem: pool.elem.clone(),
            elname: pool.elname.clone(),
            ..Default::default()
        };

        for subelement in &pool.subelements {
            let groups: Vec<GroupSummary> = subelement
                .groups
                .iter()
                .map(|g| GroupSummary {
                    group_id: g.group_id.clone(),
                    questions: g.questions.len(),
                    topics: g.topic_list().len(),
                })
                .collect();

            let sub = SubelementSummary {
                sub_el: subelement.sub_el.clone(),
                groups,
            };

            if let Some(numg) = subelement.numg {
                if numg != sub.groups.len() {
                    summary.mismatches.push(format!(
                        "{}: declared {} groups, found {}",
                        sub.sub_el,
                        numg,
                        sub.groups.len()
                    ));
                }
            }
            if let Some(numq) = subelement.numq {
                if numq != sub.question_count() {
                    summary.mismatches.push(format!(
                        "{}: declared {} questions, found {}",
                        sub.sub_el,
                        numq,
                        sub.question_count()
                    ));
                }
            }

            summary.groups += sub.groups.len();
            summary.questions += sub.question_count();
            summary.topics += sub.groups.iter().map(|g| g.topics).sum::<usize>();
            summary.subelements.push(sub);
        }

        summary
    }

    /// 输出统计报告
    pub fn log_summary(&self) {
        let class = if self.elname.is_empty() {
            String::new()
        } else {
            format!(" ({} Class)", self.elname)
        };
        info!("*** 题库统计 - Element {}{} ***", self.elem, class);
        info!("子元素: {}", self.subelements.len());
        for sub in &self.subelements {
            info!("  子元素: {}, 分组: {}", sub.sub_el, sub.groups.len());
            for group in &sub.groups {
                info!(
                    "    分组: {}, 题目: {}, 主题: {}",
                    group.group_id, group.questions, group.topics
                );
            }
        }
        info!(
            "子元素: {}, 分组: {}, 题目: {}, 主题: {}",
            self.subelements.len(),
            self.groups,
            self.questions,
            self.topics
        );
        for mismatch in &self.mismatches {
            tracing::warn!("数量不一致: {}", mismatch);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Group, RawQuestion, Subelement};

    fn group(id: &str, description: &str, questions: usize) -> Group {
        Group {
            group_id: id.to_string(),
            description: description.to_string(),
            questions: (1..=questions)
                .map(|n| RawQuestion {
                    qid: format!("{}{:02}", id, n),
                    ..RawQuestion::default()
                })
                .collect(),
            ..Group::default()
        }
    }

    #[test]
    fn test_counts() {
        let pool = Pool {
            elem: "2".to_string(),
            elname: "Technician".to_string(),
            subelements: vec![
                Subelement {
                    sub_el: "T1".to_string(),
                    numq: Some(3),
                    numg: Some(2),
                    groups: vec![
                        group("T1A", "Purpose; Definitions", 2),
                        group("T1B", "Frequency allocations", 1),
                    ],
                    ..Subelement::default()
                },
                Subelement {
                    sub_el: "T2".to_string(),
                    numq: Some(5),
                    numg: None,
                    groups: vec![group("T2A", "", 4)],
                    ..Subelement::default()
                },
            ],
            ..Pool::default()
        };

        let summary = PoolSummary::from_pool(&pool);

        assert_eq!(summary.subelements.len(), 2);
        assert_eq!(summary.groups, 3);
        assert_eq!(summary.questions, 7);
        assert_eq!(summary.topics, 3);
        assert_eq!(summary.subelements[0].groups[0].questions, 2);
        assert_eq!(
            summary.mismatches,
            vec!["T2: declared 5 questions, found 4"]
        );
    }

    #[test]
    fn test_empty_pool() {
        let summary = PoolSummary::from_pool(&Pool::default());
        assert_eq!(summary.questions, 0);
        assert!(summary.mismatches.is_empty());
    }
}
