use super::{Viewer, escape, layout, render_markdown};
use crate::models::answered::entities::Answered;
use crate::models::questions::entities::Question;

/// 评分页：列出待评分作答，每条附带评分表单
pub fn assess(viewer: Viewer<'_>, pending: &[(Answered, Option<Question>)], error: Option<&str>) -> String {
    let error = error
        .map(|e| format!(r#"<p class="error">{}</p>"#, escape(e)))
        .unwrap_or_default();

    let cards = pending
        .iter()
        .map(|(answered, question)| {
            let prompt = question
                .as_ref()
                .map(|q| render_markdown(&q.body))
                .unwrap_or_default();
            let rubric = answered
                .rubric
                .as_deref()
                .map(|r| format!(r#"<div class="highlights">{}</div>"#, render_markdown(r)))
                .unwrap_or_default();
            format!(
                r#"<article class="card question-field">
<header class="muted">Answer {id} · question {qid} v{version}</header>
<div class="body">{prompt}</div>
{rubric}
<pre>{answer}</pre>
<form method="post" action="/assess">
<input type="hidden" name="answer_id" value="{id}">
<label>Score (0 to {max})<input name="score" type="text" required></label>
<label>Feedback<textarea name="highlights" rows="3"></textarea></label>
<p><button type="submit">Grade</button></p>
</form>
</article>"#,
                id = answered.id,
                qid = answered.question_id,
                version = answered.question_version,
                answer = escape(&answered.answer),
                max = answered.max_points,
            )
        })
        .collect::<String>();

    let body = if pending.is_empty() {
        format!(r#"<section class="card"><h1>Grading</h1>{error}<p class="muted">Nothing left to grade.</p></section>"#)
    } else {
        format!(r#"<section class="card"><h1>Grading</h1>{error}</section>{cards}"#)
    };

    layout::page("Assess", Some(viewer), &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::{Role, sample_user};

    #[test]
    fn test_assess_renders_grade_form_per_answer() {
        let now = chrono::Utc::now();
        let answered = Answered {
            id: 9,
            trainee_drill_id: 1,
            question_id: 2,
            question_version: 1,
            autograded: false,
            graded: false,
            score: None,
            max_points: 5,
            highlights: None,
            rubric: Some("Mentions borrowing".to_string()),
            answer: "<script>x</script>".to_string(),
            graded_by: None,
            graded_at: None,
            created_at: now,
            updated_at: now,
        };
        let user = sample_user(false, true);
        let viewer = Viewer {
            user: &user,
            active_role: Some(Role::Assessor),
        };
        let html = assess(viewer, &[(answered, None)], None);
        assert!(html.contains(r#"name="answer_id" value="9""#));
        assert!(html.contains("Score (0 to 5)"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_assess_empty_queue() {
        let user = sample_user(false, true);
        let viewer = Viewer {
            user: &user,
            active_role: Some(Role::Assessor),
        };
        assert!(assess(viewer, &[], None).contains("Nothing left to grade."));
    }
}
