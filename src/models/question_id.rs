use regex::Regex;
use std::sync::OnceLock;

/// 题目 ID 是否符合 `<字母><数字><字母><两位数字>` 的格式，如 "T1A02"
///
/// 查询本身不做格式校验，这里只供命令行给出提示。
pub fn is_well_formed(qid: &str) -> bool {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^[A-Z][0-9][A-Z][0-9]{2}$").expect("valid regex"))
        .is_match(qid)
}
