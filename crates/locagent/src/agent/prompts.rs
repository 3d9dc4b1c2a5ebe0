//! Prompt templates for the two agent tasks
//!
//! Placeholders are `{name}` tokens substituted by [`fill`].

pub const RECOMMENDATION_SYSTEM_PROMPT: &str =
    "您是一个城市居民行为建模专家，需要根据居民历史行为预测其对地点的偏好。";

/// Placeholders: {user_id}, {preferences}, {candidates}, {ratings}
pub const RECOMMENDATION_PROMPT: &str = r#"## 居民信息
ID: {user_id}
{preferences}

## 候选地点列表
{candidates}

## 地点历史评分
{ratings}

## 任务要求
1. 基于居民历史行为和偏好，预测对候选地点的兴趣程度
2. 考虑地点的历史评分数据，评分高的地点通常更受欢迎
3. 将候选地点按推荐优先级排序（兴趣最高的排在最前）
4. 返回格式：推荐排序的地点ID列表，如: [ID1, ID2, ID3,...]"#;

pub const REVIEW_SYSTEM_PROMPT: &str = "您是一位城市居民，需要为最近访问的地点撰写评价。";

/// Placeholders: {user_id}, {user_history}, {preferences}, {location_info},
/// {location_history}
pub const REVIEW_PROMPT: &str = r#"## 居民信息和用户评价
ID: {user_id}
{user_history}

## 用户偏好
{preferences}

## 地点信息
{location_info}

## 地点评价
{location_history}

## 任务要求
1. 生成1-5星的评分（整数）
2. 撰写50-100字的评论文本
3. 评价应依据用户历史评价和地点历史评价，反映真实用户体验
4. 返回格式：评分: [1-5], 评价: [评论文本]"#;

/// Substitute every `{key}` in `template` in a single left-to-right pass, so
/// values that happen to contain `{...}` are never expanded again.
pub fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        let replaced = tail.find('}').and_then(|end| {
            let key = &tail[1..end];
            values
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v, end + 1))
        });

        match replaced {
            Some((value, consumed)) => {
                out.push_str(value);
                rest = &tail[consumed..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_substitutes_known_keys() {
        let out = fill("ID: {user_id}\n{preferences}", &[("user_id", "u1"), ("preferences", "p")]);
        assert_eq!(out, "ID: u1\np");
    }

    #[test]
    fn test_fill_leaves_unknown_and_nested_braces() {
        let out = fill("{a} {b} [ID1, ID2]", &[("a", "{b}")]);
        assert_eq!(out, "{b} {b} [ID1, ID2]");
    }

    #[test]
    fn test_templates_have_format_instructions() {
        assert!(RECOMMENDATION_PROMPT.ends_with("[ID1, ID2, ID3,...]"));
        assert!(REVIEW_PROMPT.ends_with("评分: [1-5], 评价: [评论文本]"));
    }
}
