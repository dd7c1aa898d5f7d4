use super::{Viewer, escape, layout, question_field};
use crate::models::answered::entities::Answered;
use crate::models::questions::entities::Question;
use crate::models::trainee_drills::responses::TraineeDrillItem;

/// 学员训练页数据
pub struct DrillPageProps<'a> {
    pub item: &'a TraineeDrillItem,
    pub questions: &'a [Question],
    pub answers: &'a [Answered],
    pub error: Option<&'a str>,
}

/// 学员训练页：逐题展示，未作答的题目附带作答表单
pub fn drill_page(viewer: Viewer<'_>, props: DrillPageProps<'_>) -> String {
    let td = &props.item.trainee_drill;
    let action = format!("/drills/{}", td.id);
    let open = td.deleted_at.is_none();

    let fields = props
        .questions
        .iter()
        .map(|q| {
            let answered = props.answers.iter().find(|a| a.question_id == q.id);
            question_field(q, answered, open.then_some(action.as_str()))
        })
        .collect::<String>();

    let error = props
        .error
        .map(|e| format!(r#"<p class="error">{}</p>"#, escape(e)))
        .unwrap_or_default();

    let body = format!(
        r#"<section class="card">
<h1>{name}</h1>
<p class="muted">Progress {progress} / {total} · Completed: {completed}</p>
{error}
</section>
{fields}"#,
        name = escape(&props.item.drill_name),
        progress = td.progress,
        total = props.item.num_questions,
        completed = td.completed_date,
    );

    layout::page(&props.item.drill_name, Some(viewer), &body)
}
