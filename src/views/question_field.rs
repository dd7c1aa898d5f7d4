use pulldown_cmark::{Options, Parser, html};

use super::escape;
use crate::models::answered::entities::Answered;
use crate::models::questions::entities::{Question, QuestionType};

/// 将 Markdown 渲染为 HTML 并清洗，去掉脚本和事件属性
pub fn render_markdown(input: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);

    let parser = Parser::new_ext(input, options);
    let mut output = String::new();
    html::push_html(&mut output, parser);
    ammonia::clean(&output)
}

/// 题目展示组件
///
/// 题干和重点提示按 Markdown 渲染；代码原样转义显示。
/// 已作答时显示答案和得分，否则在 `action` 不为空时渲染作答表单。
pub fn question_field(question: &Question, answered: Option<&Answered>, action: Option<&str>) -> String {
    let mut out = format!(
        r#"<article class="card question-field" id="question-{id}">
<header class="muted">Question {id} · v{version} · {points} pt</header>
<div class="body">{body}</div>"#,
        id = question.id,
        version = question.version,
        points = question.max_points,
        body = render_markdown(&question.body),
    );

    if let Some(code) = question.code.as_deref().filter(|c| !c.is_empty()) {
        out.push_str(&format!("<pre><code>{}</code></pre>", escape(code)));
    }
    if let Some(highlights) = question.highlights.as_deref().filter(|h| !h.is_empty()) {
        out.push_str(&format!(
            r#"<div class="highlights">{}</div>"#,
            render_markdown(highlights)
        ));
    }

    match (answered, action) {
        (Some(answered), _) => out.push_str(&answered_block(question, answered)),
        (None, Some(action)) => out.push_str(&answer_form(question, action)),
        (None, None) => {}
    }

    out.push_str("</article>");
    out
}

fn choice_label(question: &Question, answer: &str) -> String {
    let choice = answer
        .trim()
        .parse::<usize>()
        .ok()
        .and_then(|i| question.answer_choices.as_ref()?.get(i));
    match choice {
        Some(choice) => escape(choice),
        None => escape(answer),
    }
}

fn answered_block(question: &Question, answered: &Answered) -> String {
    let answer = match question.question_type {
        QuestionType::MultipleChoice => choice_label(question, &answered.answer),
        _ => format!("<pre>{}</pre>", escape(&answered.answer)),
    };
    let score = match (answered.graded, answered.score) {
        (true, Some(score)) => format!("{score} / {}", answered.max_points),
        _ => "Awaiting grading".to_string(),
    };
    format!(
        r#"<div class="answered"><p><strong>Your answer:</strong> {answer}</p><p class="muted">{score}</p></div>"#
    )
}

fn answer_form(question: &Question, action: &str) -> String {
    let input = match question.question_type {
        QuestionType::MultipleChoice => question
            .answer_choices
            .iter()
            .flatten()
            .enumerate()
            .map(|(i, choice)| {
                format!(
                    r#"<label><input type="radio" name="answer" value="{i}" required> {}</label>"#,
                    escape(choice)
                )
            })
            .collect::<String>(),
        _ => r#"<textarea name="answer" rows="5" required></textarea>"#.to_string(),
    };
    format!(
        r#"<form method="post" action="{action}">
<input type="hidden" name="question_id" value="{id}">
{input}
<p><button type="submit">Submit answer</button></p>
</form>"#,
        id = question.id,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(body: &str, question_type: QuestionType) -> Question {
        Question {
            id: 3,
            version: 2,
            drill_id: 1,
            question_type,
            body: body.to_string(),
            code: Some("fn main() { println!(\"<hi>\"); }".to_string()),
            highlights: None,
            rubric: None,
            answer_choices: Some(vec!["ref".to_string(), "move".to_string()]),
            correct: None,
            max_points: 2,
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_markdown_is_rendered() {
        let html = render_markdown("**bold** and `code`\n\n- item");
        assert!(html.contains("<strong>bold</strong>"));
        assert!(html.contains("<code>code</code>"));
        assert!(html.contains("<li>item</li>"));
    }

    #[test]
    fn test_scripts_are_stripped() {
        let html = render_markdown("hi <script>alert(1)</script> <a href=\"#\" onclick=\"x()\">x</a>");
        assert!(!html.contains("<script"));
        assert!(!html.contains("alert(1)"));
        assert!(!html.contains("onclick"));
    }

    #[test]
    fn test_code_is_escaped() {
        let html = question_field(&question("Body", QuestionType::Code), None, None);
        assert!(html.contains("&lt;hi&gt;"));
        assert!(!html.contains("<form"));
    }

    #[test]
    fn test_multiple_choice_form_lists_choices() {
        let html = question_field(
            &question("Pick one", QuestionType::MultipleChoice),
            None,
            Some("/drills/4"),
        );
        assert!(html.contains(r#"value="0""#));
        assert!(html.contains(r#"value="1""#));
        assert!(html.contains(r#"action="/drills/4""#));
    }
}
