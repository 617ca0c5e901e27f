//! 模型回答切分
//!
//! 按语言对应的标签把回答拆成"思考过程"和"解答"两段：
//! - 中文：`思考：` 开始思考段，遇到 `解答` / `答案` 结束；`解答：` / `答案：` 之后全部为解答
//! - 英文：`thinking` 开始思考段，遇到 `solution` / `answer` 结束（不区分大小写，冒号可选）
//!
//! 找不到思考段时使用"正在分析"占位文本，找不到解答段时整段原文作为解答。

use std::borrow::Cow;

use crate::models::{Locale, SolveResult};

const COLONS: [char; 2] = ['：', ':'];

struct LabelSet {
    thinking: &'static [&'static str],
    solution: &'static [&'static str],
    colon_required: bool,
    ignore_case: bool,
}

const ZH_LABELS: LabelSet = LabelSet {
    thinking: &["思考"],
    solution: &["解答", "答案"],
    colon_required: true,
    ignore_case: false,
};

const EN_LABELS: LabelSet = LabelSet {
    thinking: &["thinking"],
    solution: &["solution", "answer"],
    colon_required: false,
    ignore_case: true,
};

impl LabelSet {
    fn for_locale(locale: Locale) -> &'static LabelSet {
        match locale {
            Locale::Zh => &ZH_LABELS,
            Locale::En => &EN_LABELS,
        }
    }
}

/// 找不到思考段时的占位文本
pub fn analyzing_placeholder(locale: Locale) -> &'static str {
    match locale {
        Locale::Zh => "正在分析题目...",
        Locale::En => "Analyzing the problem...",
    }
}

/// 切分结果，未命中的段为 None
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sections<'a> {
    pub thinking: Option<&'a str>,
    pub solution: Option<&'a str>,
}

/// 定位两段文本，不做任何兜底
pub fn find_sections(raw: &str, locale: Locale) -> Sections<'_> {
    let labels = LabelSet::for_locale(locale);
    // ASCII 小写化不改变字节偏移，下标可直接用于原文
    let hay: Cow<'_, str> = if labels.ignore_case {
        Cow::Owned(raw.to_ascii_lowercase())
    } else {
        Cow::Borrowed(raw)
    };

    let thinking = find_labelled(&hay, labels.thinking, labels.colon_required).map(|body| {
        let end = find_earliest(&hay, labels.solution, body).map_or(hay.len(), |(start, _)| start);
        raw[body..end].trim()
    });

    let solution = find_labelled(&hay, labels.solution, labels.colon_required)
        .map(|body| raw[body..].trim());

    Sections { thinking, solution }
}

/// 切分回答并应用兜底规则
pub fn split_response(raw: &str, locale: Locale) -> SolveResult {
    let sections = find_sections(raw, locale);
    SolveResult {
        thinking: sections
            .thinking
            .unwrap_or_else(|| analyzing_placeholder(locale))
            .to_string(),
        solution: sections.solution.unwrap_or(raw).to_string(),
    }
}

/// 从 `from` 开始最早出现的标签，返回 (起点, 终点)
fn find_earliest(hay: &str, labels: &[&str], from: usize) -> Option<(usize, usize)> {
    labels
        .iter()
        .filter_map(|label| {
            hay[from..]
                .find(label)
                .map(|pos| (from + pos, from + pos + label.len()))
        })
        .min_by_key(|(start, _)| *start)
}

/// 查找第一个满足冒号规则的标签，返回标签（含冒号）之后的位置
fn find_labelled(hay: &str, labels: &[&str], colon_required: bool) -> Option<usize> {
    let mut from = 0;
    while let Some((start, end)) = find_earliest(hay, labels, from) {
        match hay[end..].chars().next() {
            Some(c) if COLONS.contains(&c) => return Some(end + c.len_utf8()),
            _ if !colon_required => return Some(end),
            _ => {
                from = start + hay[start..].chars().next().map_or(1, char::len_utf8);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_labels() {
        let result = split_response("Thinking: abc\nSolution: xyz", Locale::En);
        assert_eq!(result.thinking, "abc");
        assert_eq!(result.solution, "xyz");
    }

    #[test]
    fn test_chinese_labels() {
        let result = split_response("思考：分析中\n解答：答案是5", Locale::Zh);
        assert_eq!(result.thinking, "分析中");
        assert_eq!(result.solution, "答案是5");
    }

    #[test]
    fn test_no_labels_uses_placeholder_and_raw_text() {
        let raw = "x = 3, so y = 9.";
        let en = split_response(raw, Locale::En);
        assert_eq!(en.thinking, "Analyzing the problem...");
        assert_eq!(en.solution, raw);

        let zh = split_response(raw, Locale::Zh);
        assert_eq!(zh.thinking, "正在分析题目...");
        assert_eq!(zh.solution, raw);
    }

    #[test]
    fn test_english_is_case_insensitive_and_accepts_answer() {
        let result = split_response("THINKING\nfactor it\nANSWER: (x-1)(x+1)", Locale::En);
        assert_eq!(result.thinking, "factor it");
        assert_eq!(result.solution, "(x-1)(x+1)");
    }

    #[test]
    fn test_english_fullwidth_colon() {
        let result = split_response("Thinking：a\nSolution：b", Locale::En);
        assert_eq!(result.thinking, "a");
        assert_eq!(result.solution, "b");
    }

    #[test]
    fn test_chinese_answer_label() {
        let result = split_response("思考: 先通分\n答案: 1/2", Locale::Zh);
        assert_eq!(result.thinking, "先通分");
        assert_eq!(result.solution, "1/2");
    }

    #[test]
    fn test_chinese_label_without_colon_is_ignored() {
        // "思考过程" 后没有冒号，不算思考段；后面的 "思考：" 才算
        let raw = "思考过程如下\n思考：列方程\n解答：x=2";
        let sections = find_sections(raw, Locale::Zh);
        assert_eq!(sections.thinking, Some("列方程"));
        assert_eq!(sections.solution, Some("x=2"));
    }

    #[test]
    fn test_thinking_runs_to_end_without_solution() {
        let sections = find_sections("思考：还没想完", Locale::Zh);
        assert_eq!(sections.thinking, Some("还没想完"));
        assert_eq!(sections.solution, None);

        let result = split_response("思考：还没想完", Locale::Zh);
        assert_eq!(result.solution, "思考：还没想完");
    }

    #[test]
    fn test_solution_without_thinking() {
        let result = split_response("解答：面积为 12", Locale::Zh);
        assert_eq!(result.thinking, "正在分析题目...");
        assert_eq!(result.solution, "面积为 12");
    }

    #[test]
    fn test_non_ascii_text_keeps_offsets_in_english_mode() {
        let result = split_response("Thinking: 三角形 ABC\nSolution: 面积 = 6", Locale::En);
        assert_eq!(result.thinking, "三角形 ABC");
        assert_eq!(result.solution, "面积 = 6");
    }
}
